//! Non-preemptive algorithms: FCFS, SJF and Priority (NP).
//!
//! # Algorithm
//!
//! 1. Copy and sort the process set by arrival (stable).
//! 2. At each decision point, pick among arrived, unrun processes the one
//!    with the smallest key (FCFS: arrival order, SJF: burst, Priority:
//!    priority number). Ties fall back to arrival order, then input order.
//! 3. If nothing has arrived, jump the clock to the next arrival.
//! 4. Run the chosen process to completion.
//!
//! Response time equals waiting time since each process runs exactly once.

use tracing::{debug, trace};

use super::workload::{log_finished, Workload};
use crate::error::Result;
use crate::models::{Process, ProcessOutcome, Schedule};

/// First-Come, First-Served.
///
/// # Example
///
/// ```
/// use cpu_sched::models::processes;
/// use cpu_sched::scheduler::fcfs;
///
/// let ps = processes([(1, 0, 5), (2, 1, 3), (3, 2, 8)]);
/// let schedule = fcfs(&ps).unwrap();
/// assert_eq!(schedule.completions(&ps), vec![5, 8, 16]);
/// assert_eq!(schedule.waiting_times(&ps), vec![0, 4, 6]);
/// ```
pub fn fcfs(processes: &[Process]) -> Result<Schedule> {
    let workload = Workload::prepare(processes, false)?;
    debug!(algorithm = "FCFS", processes = workload.len(), "simulation started");

    let mut schedule = Schedule::new("FCFS");
    let mut clock = 0;
    for p in workload.processes() {
        // CPU idles until the process arrives
        let start = clock.max(p.arrival);
        clock = start + p.burst;
        trace!(pid = p.pid, start, end = clock, "dispatch");
        schedule.timeline.push(start, clock, p.pid);
        schedule.add_outcome(ProcessOutcome::new(p, start, clock));
    }

    log_finished(&schedule);
    Ok(schedule)
}

/// Shortest Job First (non-preemptive).
///
/// Ties on burst length go to the earlier arrival, then to the earlier
/// input position.
pub fn sjf(processes: &[Process]) -> Result<Schedule> {
    let workload = Workload::prepare(processes, false)?;
    let schedule = run_to_completion(&workload, "SJF", false, |p| p.burst);
    log_finished(&schedule);
    Ok(schedule)
}

/// Priority scheduling (non-preemptive). Lower number = higher priority.
///
/// Fails with `MissingPriority` if any process has no priority.
pub fn priority_non_preemptive(processes: &[Process]) -> Result<Schedule> {
    let workload = Workload::prepare(processes, true)?;
    let schedule = run_to_completion(&workload, "Priority (NP)", true, |p| p.priority);
    log_finished(&schedule);
    Ok(schedule)
}

/// Shared dispatch loop for key-selected, run-to-completion policies.
fn run_to_completion<K, F>(
    workload: &Workload,
    label: &str,
    report_priority: bool,
    key: F,
) -> Schedule
where
    K: Ord,
    F: Fn(&Process) -> K,
{
    debug!(algorithm = label, processes = workload.len(), "simulation started");

    let mut schedule = Schedule::new(label);
    let mut pending: Vec<&Process> = workload.processes().iter().collect();
    let mut clock = 0;

    while !pending.is_empty() {
        // min_by_key keeps the first of equal minima
        let chosen = (0..pending.len())
            .filter(|&idx| pending[idx].arrival <= clock)
            .min_by_key(|&idx| key(pending[idx]));

        let Some(idx) = chosen else {
            // pending stays in arrival order, so the head arrives next
            clock = pending[0].arrival;
            continue;
        };

        let p = pending.remove(idx);
        let start = clock;
        clock += p.burst;
        trace!(pid = p.pid, start, end = clock, "dispatch");
        schedule.timeline.push(start, clock, p.pid);

        let outcome = ProcessOutcome::new(p, start, clock);
        schedule.add_outcome(if report_priority {
            outcome.with_priority(p.priority)
        } else {
            outcome
        });
    }

    schedule
}
