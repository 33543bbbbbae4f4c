//! Single-CPU scheduling algorithms and schedule metrics.
//!
//! Every algorithm is a pure function of its inputs: it validates the
//! process set, copies it into a private snapshot and returns a
//! [`Schedule`] (results table + timeline). Nothing is shared between runs.
//!
//! # Algorithms
//!
//! | Algorithm | Preemptive | Selection key |
//! |-----------|------------|---------------|
//! | FCFS | no | arrival |
//! | SJF | no | burst |
//! | SRTF | yes (per tick) | remaining burst |
//! | Round Robin | yes (per quantum) | FIFO queue |
//! | Priority (NP) | no | priority number |
//! | Priority (P) | yes (per tick) | priority number |
//!
//! Ties are always broken by arrival order, then input order.
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

mod metrics;
mod non_preemptive;
mod preemptive;
mod round_robin;
mod workload;

pub use metrics::ScheduleMetrics;
pub use non_preemptive::{fcfs, priority_non_preemptive, sjf};
pub use preemptive::{priority_preemptive, srtf};
pub use round_robin::round_robin;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Process, Schedule};

/// A scheduling algorithm and its parameters.
///
/// # Example
///
/// ```
/// use cpu_sched::models::processes;
/// use cpu_sched::scheduler::Algorithm;
///
/// let ps = processes([(1, 0, 5), (2, 1, 3)]);
/// let schedule = Algorithm::RoundRobin { quantum: 2 }.run(&ps).unwrap();
/// assert_eq!(schedule.algorithm, "RR (TQ=2)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// First-Come, First-Served.
    Fcfs,
    /// Shortest Job First (non-preemptive).
    Sjf,
    /// Shortest Remaining Time First.
    Srtf,
    /// Round Robin with a fixed time quantum.
    RoundRobin { quantum: i64 },
    /// Priority scheduling, non-preemptive.
    PriorityNonPreemptive,
    /// Priority scheduling, preemptive.
    PriorityPreemptive,
}

impl Algorithm {
    /// Short name (e.g., "FCFS", "RR").
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Fcfs => "FCFS",
            Algorithm::Sjf => "SJF",
            Algorithm::Srtf => "SRTF",
            Algorithm::RoundRobin { .. } => "RR",
            Algorithm::PriorityNonPreemptive => "Priority (NP)",
            Algorithm::PriorityPreemptive => "Priority (P)",
        }
    }

    /// Display label, including the quantum for Round Robin.
    pub fn label(&self) -> String {
        match self {
            Algorithm::RoundRobin { quantum } => format!("RR (TQ={quantum})"),
            other => other.name().to_string(),
        }
    }

    /// Whether a running process can lose the CPU before finishing.
    pub fn is_preemptive(&self) -> bool {
        matches!(
            self,
            Algorithm::Srtf | Algorithm::RoundRobin { .. } | Algorithm::PriorityPreemptive
        )
    }

    /// Whether every process must carry a priority.
    pub fn requires_priority(&self) -> bool {
        matches!(
            self,
            Algorithm::PriorityNonPreemptive | Algorithm::PriorityPreemptive
        )
    }

    /// How the algorithm behaves, with its main trade-off.
    pub fn description(&self) -> &'static str {
        match self {
            Algorithm::Fcfs => {
                "Runs processes in arrival order, each to completion. Simple and fair \
                 by arrival, but short jobs can wait behind long ones (convoy effect)."
            }
            Algorithm::Sjf => {
                "Runs the ready process with the smallest burst to completion. Minimizes \
                 average waiting among non-preemptive policies; long jobs may starve."
            }
            Algorithm::Srtf => {
                "Preemptive SJF: always runs the ready process with the least remaining \
                 time. Best average waiting, at the cost of frequent context switches."
            }
            Algorithm::RoundRobin { .. } => {
                "Gives each ready process at most one time quantum in FIFO order, then \
                 requeues it. Good response time; results depend on the quantum."
            }
            Algorithm::PriorityNonPreemptive => {
                "Runs the ready process with the lowest priority number to completion. \
                 Important work goes first; low-priority processes may starve."
            }
            Algorithm::PriorityPreemptive => {
                "Always runs the ready process with the lowest priority number, \
                 preempting on a better arrival. Responsive, with more context switches."
            }
        }
    }

    /// Runs this algorithm over a private copy of `processes`.
    pub fn run(&self, processes: &[Process]) -> Result<Schedule> {
        match *self {
            Algorithm::Fcfs => fcfs(processes),
            Algorithm::Sjf => sjf(processes),
            Algorithm::Srtf => srtf(processes),
            Algorithm::RoundRobin { quantum } => round_robin(processes, quantum),
            Algorithm::PriorityNonPreemptive => priority_non_preemptive(processes),
            Algorithm::PriorityPreemptive => priority_preemptive(processes),
        }
    }

    /// All six algorithms, using `quantum` for Round Robin.
    pub fn all(quantum: i64) -> [Algorithm; 6] {
        [
            Algorithm::Fcfs,
            Algorithm::Sjf,
            Algorithm::Srtf,
            Algorithm::RoundRobin { quantum },
            Algorithm::PriorityNonPreemptive,
            Algorithm::PriorityPreemptive,
        ]
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchedError;
    use crate::generator::WorkloadGenerator;
    use crate::validation::ValidationErrorKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Checks the invariants every algorithm must uphold.
    fn assert_consistent(processes: &[Process], schedule: &Schedule) {
        assert_eq!(schedule.outcomes.len(), processes.len());
        assert!(schedule.timeline.is_well_formed(), "{}", schedule.algorithm);

        let mut sum_turnaround = 0;
        let mut sum_waiting = 0;
        let mut sum_burst = 0;
        for p in processes {
            let matching: Vec<_> = schedule
                .outcomes
                .iter()
                .filter(|o| o.pid == p.pid)
                .collect();
            assert_eq!(matching.len(), 1, "P{} must appear exactly once", p.pid);
            let o = matching[0];

            assert!(o.completion > o.arrival);
            assert!(o.waiting >= 0);
            assert!(o.response >= 0);
            assert!(o.response <= o.waiting);
            assert_eq!(o.turnaround, o.waiting + o.burst);
            assert_eq!(o.completion, o.arrival + o.turnaround);
            assert_eq!(
                schedule.timeline.busy_time_for(p.pid),
                p.burst,
                "{}: P{} coverage",
                schedule.algorithm,
                p.pid
            );
            // nothing runs before it arrives
            for iv in schedule.intervals_for(p.pid) {
                assert!(iv.start >= p.arrival);
                assert!(iv.end <= o.completion);
            }
            assert_eq!(
                schedule.intervals_for(p.pid).first().map(|iv| iv.start),
                Some(o.start)
            );

            sum_turnaround += o.turnaround;
            sum_waiting += o.waiting;
            sum_burst += o.burst;
        }
        assert_eq!(sum_turnaround, sum_waiting + sum_burst);
    }

    #[test]
    fn test_invariants_on_random_workloads() {
        let mut rng = StdRng::seed_from_u64(42);
        let generator = WorkloadGenerator::new(8)
            .with_max_arrival(15)
            .with_max_burst(9)
            .with_priorities(0, 4);

        for _ in 0..50 {
            let ps = generator.generate(&mut rng);
            for q in 1..=4 {
                for algorithm in Algorithm::all(q) {
                    let schedule = algorithm.run(&ps).unwrap();
                    assert_consistent(&ps, &schedule);
                }
            }
        }
    }

    #[test]
    fn test_non_preemptive_runs_once() {
        let mut rng = StdRng::seed_from_u64(7);
        let ps = WorkloadGenerator::new(10).with_priorities(0, 3).generate(&mut rng);
        for algorithm in Algorithm::all(1).iter().filter(|a| !a.is_preemptive()) {
            let schedule = algorithm.run(&ps).unwrap();
            for o in &schedule.outcomes {
                assert_eq!(schedule.intervals_for(o.pid).len(), 1);
                assert_eq!(o.response, o.waiting);
            }
        }
    }

    #[test]
    fn test_idempotent_runs() {
        let mut rng = StdRng::seed_from_u64(99);
        let ps = WorkloadGenerator::new(12).with_priorities(0, 5).generate(&mut rng);
        let snapshot = ps.clone();
        for algorithm in Algorithm::all(3) {
            let first = algorithm.run(&ps).unwrap();
            let second = algorithm.run(&ps).unwrap();
            assert_eq!(first, second);
        }
        assert_eq!(ps, snapshot);
    }

    #[test]
    fn test_algorithm_labels() {
        assert_eq!(Algorithm::Fcfs.label(), "FCFS");
        assert_eq!(Algorithm::RoundRobin { quantum: 4 }.label(), "RR (TQ=4)");
        assert_eq!(Algorithm::PriorityPreemptive.to_string(), "Priority (P)");
        assert!(Algorithm::Srtf.is_preemptive());
        assert!(!Algorithm::Sjf.is_preemptive());
        assert!(Algorithm::PriorityNonPreemptive.requires_priority());
        assert!(!Algorithm::Fcfs.description().is_empty());
    }

    #[test]
    fn test_run_labels_schedule() {
        let ps = crate::models::processes([(1, 0, 2, 1)]);
        for algorithm in Algorithm::all(2) {
            assert_eq!(algorithm.run(&ps).unwrap().algorithm, algorithm.label());
        }
    }

    #[test]
    fn test_invalid_input_rejected_everywhere() {
        let ps = vec![Process::new(1, 0, 0).with_priority(1)];
        for algorithm in Algorithm::all(1) {
            assert!(matches!(
                algorithm.run(&ps),
                Err(SchedError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_tick_range_limits() {
        let late = vec![Process::new(1, i64::MAX - 1, 5).with_priority(0)];
        for algorithm in Algorithm::all(2) {
            let err = algorithm.run(&late).unwrap_err();
            assert_eq!(
                err.validation_errors()[0].kind,
                ValidationErrorKind::TimeOverflow,
                "{algorithm}"
            );
        }

        // completing exactly at i64::MAX is fine
        let edge = vec![Process::new(1, i64::MAX - 5, 5).with_priority(0)];
        for algorithm in Algorithm::all(2) {
            let schedule = algorithm.run(&edge).unwrap();
            assert_eq!(schedule.makespan(), i64::MAX);
            assert_consistent(&edge, &schedule);
        }
    }
}
