//! Algorithm comparison and recommendation.
//!
//! Runs every applicable algorithm over one process set, sweeping the Round
//! Robin quantum, and ranks the results by average turnaround, waiting or
//! response time.
//!
//! # Procedure
//!
//! 1. FCFS, SJF and SRTF run once each.
//! 2. Round Robin runs for every quantum in `1..=min(max_burst, max_quantum)`;
//!    only the quantum with the lowest sweep metric (average waiting by
//!    default) is kept. Equal scores keep the smaller quantum.
//! 3. Priority (NP) and Priority (P) run when every process has a priority.
//!
//! Rows keep that insertion order, which also breaks ties in
//! [`Comparison::best`].

mod cancel;
mod config;

pub use cancel::CancelFlag;
pub use config::{ComparatorConfig, DEFAULT_MAX_QUANTUM};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::error::{Result, SchedError};
use crate::models::Process;
use crate::scheduler::{Algorithm, ScheduleMetrics};
use crate::validation::{missing_priorities, validate_processes};

/// Metric used to rank algorithms. Lower is better for all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    /// Average turnaround time.
    Turnaround,
    /// Average waiting time.
    Waiting,
    /// Average response time.
    Response,
}

impl Metric {
    /// All metrics, in display order.
    pub const ALL: [Metric; 3] = [Metric::Turnaround, Metric::Waiting, Metric::Response];

    /// Reads this metric from a metrics set.
    pub fn value(&self, metrics: &ScheduleMetrics) -> f64 {
        match self {
            Metric::Turnaround => metrics.avg_turnaround,
            Metric::Waiting => metrics.avg_waiting,
            Metric::Response => metrics.avg_response,
        }
    }

    /// Machine key (`"avg_turnaround"`, `"avg_waiting"`, `"avg_response"`).
    pub fn key(&self) -> &'static str {
        match self {
            Metric::Turnaround => "avg_turnaround",
            Metric::Waiting => "avg_waiting",
            Metric::Response => "avg_response",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Metric::Turnaround => "Average Turnaround Time",
            Metric::Waiting => "Average Waiting Time",
            Metric::Response => "Average Response Time",
        })
    }
}

/// Unknown metric name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown metric '{0}' (expected turnaround, waiting or response)")]
pub struct ParseMetricError(String);

impl FromStr for Metric {
    type Err = ParseMetricError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "avg_turnaround" | "turnaround" => Ok(Metric::Turnaround),
            "avg_waiting" | "waiting" => Ok(Metric::Waiting),
            "avg_response" | "response" => Ok(Metric::Response),
            _ => Err(ParseMetricError(s.to_string())),
        }
    }
}

/// One compared configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    /// Display label (e.g. `"RR (TQ=3)"`).
    pub label: String,
    /// Algorithm and parameters.
    pub algorithm: Algorithm,
    /// Aggregated results.
    pub metrics: ScheduleMetrics,
}

/// One candidate of the Round Robin sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantumTrial {
    /// Quantum tried.
    pub quantum: i64,
    /// Resulting metrics.
    pub metrics: ScheduleMetrics,
}

/// Result of an algorithm comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// Compared configurations in insertion order.
    pub rows: Vec<ComparisonRow>,
    /// Every Round Robin quantum tried, ascending.
    pub rr_sweep: Vec<QuantumTrial>,
    /// Quantum kept for the Round Robin row.
    pub best_quantum: i64,
}

impl Comparison {
    /// Row with the lowest value of `metric`; ties go to the earlier row.
    pub fn best(&self, metric: Metric) -> Option<&ComparisonRow> {
        self.rows
            .iter()
            .min_by(|a, b| metric.value(&a.metrics).total_cmp(&metric.value(&b.metrics)))
    }

    /// Rows sorted by `metric`, ascending. Equal values keep insertion order.
    pub fn ranked(&self, metric: Metric) -> Vec<&ComparisonRow> {
        let mut rows: Vec<&ComparisonRow> = self.rows.iter().collect();
        rows.sort_by(|a, b| metric.value(&a.metrics).total_cmp(&metric.value(&b.metrics)));
        rows
    }

    /// Finds a row by label.
    pub fn row(&self, label: &str) -> Option<&ComparisonRow> {
        self.rows.iter().find(|r| r.label == label)
    }

    /// Row labels in insertion order.
    pub fn labels(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.label.as_str()).collect()
    }
}

/// Runs and ranks all algorithms over one process set.
///
/// # Example
///
/// ```
/// use cpu_sched::comparator::{Comparator, Metric};
/// use cpu_sched::models::processes;
///
/// let ps = processes([(1, 0, 5), (2, 1, 3), (3, 2, 8)]);
/// let comparison = Comparator::new().compare(&ps).unwrap();
/// assert_eq!(comparison.labels(), vec!["FCFS", "SJF", "SRTF", "RR (TQ=5)"]);
/// assert_eq!(comparison.best(Metric::Waiting).unwrap().label, "SRTF");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Comparator {
    config: ComparatorConfig,
}

impl Comparator {
    /// Creates a comparator with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: ComparatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &ComparatorConfig {
        &self.config
    }

    /// Compares all applicable algorithms.
    pub fn compare(&self, processes: &[Process]) -> Result<Comparison> {
        self.compare_with_cancel(processes, &CancelFlag::new())
    }

    /// Compares all applicable algorithms, stopping early if `cancel` is set.
    ///
    /// The flag is checked before every configuration. A cancelled run
    /// returns `SchedError::Cancelled` and discards everything computed so
    /// far.
    pub fn compare_with_cancel(
        &self,
        processes: &[Process],
        cancel: &CancelFlag,
    ) -> Result<Comparison> {
        self.compare_with_progress(processes, cancel, |_| {})
    }

    /// Like [`compare_with_cancel`](Self::compare_with_cancel), reporting
    /// each evaluated configuration (every swept quantum included) to
    /// `progress` as soon as it finishes.
    pub fn compare_with_progress<F>(
        &self,
        processes: &[Process],
        cancel: &CancelFlag,
        mut progress: F,
    ) -> Result<Comparison>
    where
        F: FnMut(&ComparisonRow),
    {
        let progress: &mut dyn FnMut(&ComparisonRow) = &mut progress;
        validate_processes(processes)?;
        let with_priority = self.config.include_priority && missing_priorities(processes).is_empty();
        debug!(processes = processes.len(), with_priority, "comparison started");

        let mut rows = Vec::new();
        for algorithm in [Algorithm::Fcfs, Algorithm::Sjf, Algorithm::Srtf] {
            rows.push(evaluate(algorithm, processes, cancel, progress)?);
        }

        let (best_quantum, rr_row, rr_sweep) =
            self.sweep_quantum(processes, cancel, progress)?;
        rows.push(rr_row);

        if with_priority {
            for algorithm in [Algorithm::PriorityNonPreemptive, Algorithm::PriorityPreemptive] {
                rows.push(evaluate(algorithm, processes, cancel, progress)?);
            }
        }

        let comparison = Comparison {
            rows,
            rr_sweep,
            best_quantum,
        };
        if let Some(best) = comparison.best(self.config.sweep_metric) {
            info!(
                best = %best.label,
                metric = self.config.sweep_metric.key(),
                value = self.config.sweep_metric.value(&best.metrics),
                "comparison finished"
            );
        }
        Ok(comparison)
    }

    /// Tries every quantum in range and keeps the best one.
    fn sweep_quantum(
        &self,
        processes: &[Process],
        cancel: &CancelFlag,
        progress: &mut dyn FnMut(&ComparisonRow),
    ) -> Result<(i64, ComparisonRow, Vec<QuantumTrial>)> {
        let max_burst = processes.iter().map(|p| p.burst).max().unwrap_or(1);
        let upper = max_burst.min(self.config.max_quantum).max(1);
        let metric = self.config.sweep_metric;

        let mut best_quantum = 1;
        let mut best = evaluate(
            Algorithm::RoundRobin { quantum: 1 },
            processes,
            cancel,
            progress,
        )?;
        let mut trials = Vec::with_capacity(upper as usize);
        trials.push(QuantumTrial {
            quantum: 1,
            metrics: best.metrics.clone(),
        });

        for quantum in 2..=upper {
            let row = evaluate(
                Algorithm::RoundRobin { quantum },
                processes,
                cancel,
                progress,
            )?;
            trials.push(QuantumTrial {
                quantum,
                metrics: row.metrics.clone(),
            });
            if metric.value(&row.metrics) < metric.value(&best.metrics) {
                best_quantum = quantum;
                best = row;
            }
        }

        debug!(quantum = best_quantum, tried = trials.len(), "round robin sweep finished");
        Ok((best_quantum, best, trials))
    }
}

/// Runs one configuration unless cancellation was requested.
fn evaluate(
    algorithm: Algorithm,
    processes: &[Process],
    cancel: &CancelFlag,
    progress: &mut dyn FnMut(&ComparisonRow),
) -> Result<ComparisonRow> {
    if cancel.is_cancelled() {
        debug!(next = %algorithm, "comparison cancelled");
        return Err(SchedError::Cancelled);
    }
    let schedule = algorithm.run(processes)?;
    let metrics = ScheduleMetrics::calculate(&schedule)?;
    debug!(
        algorithm = %schedule.algorithm,
        avg_turnaround = metrics.avg_turnaround,
        avg_waiting = metrics.avg_waiting,
        avg_response = metrics.avg_response,
        "configuration evaluated"
    );
    let row = ComparisonRow {
        label: schedule.algorithm,
        algorithm,
        metrics,
    };
    progress(&row);
    Ok(row)
}
