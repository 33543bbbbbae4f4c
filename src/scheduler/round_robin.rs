//! Round Robin scheduling.
//!
//! # Algorithm
//!
//! 1. Admit every process with `arrival ≤ clock` to a FIFO ready queue,
//!    in arrival order.
//! 2. Run the head for `min(quantum, remaining)` units.
//! 3. Admit processes that arrived during the slice, then re-append the
//!    head if it still has work. New arrivals therefore queue ahead of the
//!    process returning from its quantum.
//! 4. If the queue is empty but arrivals remain, jump to the next arrival.
//!
//! Each dispatch emits its own timeline interval; back-to-back slices of a
//! lone process are not merged, so quantum boundaries stay visible.

use std::collections::VecDeque;

use tracing::{debug, trace};

use super::workload::{log_finished, Workload};
use crate::error::Result;
use crate::models::{Process, ProcessOutcome, Schedule};
use crate::validation::validate_quantum;

/// Round Robin with the given time quantum.
///
/// Fails with `InvalidInput` when `quantum ≤ 0`.
///
/// # Example
///
/// ```
/// use cpu_sched::models::processes;
/// use cpu_sched::scheduler::round_robin;
///
/// let ps = processes([(1, 0, 5), (2, 1, 3)]);
/// let schedule = round_robin(&ps, 2).unwrap();
/// let spans: Vec<_> = schedule
///     .timeline
///     .iter()
///     .map(|iv| (iv.start, iv.end, iv.pid))
///     .collect();
/// assert_eq!(spans, vec![(0, 2, 1), (2, 4, 2), (4, 6, 1), (6, 7, 2), (7, 8, 1)]);
/// ```
pub fn round_robin(processes: &[Process], quantum: i64) -> Result<Schedule> {
    validate_quantum(quantum)?;
    let workload = Workload::prepare(processes, false)?;
    let label = format!("RR (TQ={quantum})");
    debug!(algorithm = %label, processes = workload.len(), "simulation started");

    let procs = workload.processes();
    let n = procs.len();
    let mut remaining: Vec<i64> = procs.iter().map(|p| p.burst).collect();
    let mut first_dispatch: Vec<Option<i64>> = vec![None; n];
    let mut completion: Vec<Option<i64>> = vec![None; n];

    let mut schedule = Schedule::new(label);
    let mut queue: VecDeque<usize> = VecDeque::with_capacity(n);
    let mut next = 0;
    let mut clock = 0;

    loop {
        admit(procs, &mut next, clock, &mut queue);

        let Some(i) = queue.pop_front() else {
            match procs.get(next) {
                Some(p) => {
                    clock = p.arrival;
                    continue;
                }
                None => break,
            }
        };

        first_dispatch[i].get_or_insert(clock);
        let slice = quantum.min(remaining[i]);
        trace!(pid = procs[i].pid, start = clock, slice, "dispatch");
        schedule.timeline.push(clock, clock + slice, procs[i].pid);
        clock += slice;
        remaining[i] -= slice;

        admit(procs, &mut next, clock, &mut queue);

        if remaining[i] > 0 {
            queue.push_back(i);
        } else {
            completion[i] = Some(clock);
        }
    }

    for (i, p) in procs.iter().enumerate() {
        let (Some(start), Some(end)) = (first_dispatch[i], completion[i]) else {
            unreachable!("process {} left the queue unfinished", p.pid);
        };
        schedule.add_outcome(ProcessOutcome::new(p, start, end));
    }

    log_finished(&schedule);
    Ok(schedule)
}

/// Moves every process that has arrived by `clock` onto the queue.
fn admit(procs: &[Process], next: &mut usize, clock: i64, queue: &mut VecDeque<usize>) {
    while *next < procs.len() && procs[*next].arrival <= clock {
        queue.push_back(*next);
        *next += 1;
    }
}
