//! Schedule quality metrics.
//!
//! Reduces a results table and timeline to the averages used to compare
//! algorithms, plus CPU-level indicators.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Avg Turnaround | mean(completion − arrival) |
//! | Avg Waiting | mean(turnaround − burst) |
//! | Avg Response | mean(first dispatch − arrival) |
//! | Makespan | Latest completion |
//! | CPU Utilization | busy time / makespan |
//! | Throughput | processes / makespan |
//! | Context Switches | Hand-overs between distinct processes |

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedError};
use crate::models::Schedule;
use crate::validation::{ValidationError, ValidationErrorKind};

/// Aggregate performance indicators of one schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleMetrics {
    /// Mean turnaround time.
    pub avg_turnaround: f64,
    /// Mean waiting time.
    pub avg_waiting: f64,
    /// Mean response time.
    pub avg_response: f64,
    /// Latest completion tick.
    pub makespan: i64,
    /// Ticks the CPU was executing.
    pub busy_time: i64,
    /// Ticks the CPU was idle within `[0, makespan)`.
    pub idle_time: i64,
    /// busy_time / makespan (0.0..=1.0).
    pub cpu_utilization: f64,
    /// Completed processes per tick.
    pub throughput: f64,
    /// Hand-overs between distinct processes along the timeline.
    pub context_switches: usize,
}

impl ScheduleMetrics {
    /// Computes metrics from a schedule.
    ///
    /// Fails with `InvalidInput` for a schedule without processes; averages
    /// over an empty set are undefined.
    pub fn calculate(schedule: &Schedule) -> Result<Self> {
        let count = schedule.outcomes.len();
        if count == 0 {
            return Err(SchedError::InvalidInput(vec![ValidationError::new(
                ValidationErrorKind::EmptyWorkload,
                "Cannot aggregate metrics of an empty schedule",
            )]));
        }

        let n = count as f64;
        // summed as f64: per-process values fit in i64, their totals may not
        let (turnaround, waiting, response) =
            schedule
                .outcomes
                .iter()
                .fold((0.0, 0.0, 0.0), |(t, w, r), o| {
                    (
                        t + o.turnaround as f64,
                        w + o.waiting as f64,
                        r + o.response as f64,
                    )
                });

        let makespan = schedule.makespan();
        let busy_time = schedule.timeline.busy_time();
        let (cpu_utilization, throughput) = if makespan > 0 {
            (busy_time as f64 / makespan as f64, n / makespan as f64)
        } else {
            (0.0, 0.0)
        };

        Ok(Self {
            avg_turnaround: turnaround / n,
            avg_waiting: waiting / n,
            avg_response: response / n,
            makespan,
            busy_time,
            idle_time: makespan - busy_time,
            cpu_utilization,
            throughput,
            context_switches: schedule.timeline.context_switches(),
        })
    }
}
