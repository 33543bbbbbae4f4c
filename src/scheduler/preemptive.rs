//! Tick-driven preemptive algorithms: SRTF and Priority (P).
//!
//! # Algorithm
//!
//! Every time unit:
//! 1. Among arrived, unfinished processes pick the smallest key
//!    (SRTF: remaining burst, Priority: priority number). Ties fall back to
//!    arrival order, then input order.
//! 2. If none is ready, jump the clock to the next arrival.
//! 3. Execute one unit; a process finishing records its completion.
//!
//! Consecutive units of the same process are merged into one timeline
//! interval. The first unit executed anchors the response time.
//!
//! With this tie-break a running process is never displaced by an equal
//! key: anything ahead of it in tie-break order had a strictly larger key
//! when it was chosen, and the running key never grows.

use tracing::{debug, trace};

use super::workload::{log_finished, Workload};
use crate::error::Result;
use crate::models::{Process, ProcessOutcome, Schedule};

/// Shortest Remaining Time First.
///
/// # Example
///
/// ```
/// use cpu_sched::models::{processes, TimelineInterval};
/// use cpu_sched::scheduler::srtf;
///
/// let ps = processes([(1, 0, 8), (2, 1, 4)]);
/// let schedule = srtf(&ps).unwrap();
/// assert_eq!(
///     schedule.timeline.intervals(),
///     &[
///         TimelineInterval::new(0, 1, 1),
///         TimelineInterval::new(1, 5, 2),
///         TimelineInterval::new(5, 12, 1),
///     ]
/// );
/// ```
pub fn srtf(processes: &[Process]) -> Result<Schedule> {
    let workload = Workload::prepare(processes, false)?;
    let schedule = run_ticks(&workload, "SRTF", false, |_, remaining| remaining);
    log_finished(&schedule);
    Ok(schedule)
}

/// Priority scheduling (preemptive). Lower number = higher priority.
///
/// A newly arrived process with a strictly lower priority number takes the
/// CPU in the tick it arrives. Fails with `MissingPriority` if any process
/// has no priority.
pub fn priority_preemptive(processes: &[Process]) -> Result<Schedule> {
    let workload = Workload::prepare(processes, true)?;
    let schedule = run_ticks(&workload, "Priority (P)", true, |p, _| {
        i64::from(p.priority.unwrap_or(i32::MAX))
    });
    log_finished(&schedule);
    Ok(schedule)
}

/// Shared unit-step loop. `key` receives the process and its remaining burst.
fn run_ticks<F>(workload: &Workload, label: &str, report_priority: bool, key: F) -> Schedule
where
    F: Fn(&Process, i64) -> i64,
{
    debug!(algorithm = label, processes = workload.len(), "simulation started");

    let procs = workload.processes();
    let n = procs.len();
    let mut remaining: Vec<i64> = procs.iter().map(|p| p.burst).collect();
    let mut first_dispatch: Vec<Option<i64>> = vec![None; n];
    let mut completion: Vec<Option<i64>> = vec![None; n];

    let mut schedule = Schedule::new(label);
    let mut clock = 0;
    let mut finished = 0;
    let mut running: Option<usize> = None;

    while finished < n {
        let chosen = (0..n)
            .filter(|&i| procs[i].arrival <= clock && remaining[i] > 0)
            .min_by_key(|&i| key(&procs[i], remaining[i]));

        let Some(i) = chosen else {
            clock = workload
                .next_arrival_after(clock)
                .expect("unfinished processes must arrive after an idle clock");
            running = None;
            continue;
        };

        if running != Some(i) {
            if let Some(prev) = running {
                trace!(at = clock, from = procs[prev].pid, to = procs[i].pid, "preempt");
            } else {
                trace!(at = clock, pid = procs[i].pid, "dispatch");
            }
            running = Some(i);
        }
        first_dispatch[i].get_or_insert(clock);

        schedule.timeline.record(clock, clock + 1, procs[i].pid);
        clock += 1;
        remaining[i] -= 1;

        if remaining[i] == 0 {
            completion[i] = Some(clock);
            finished += 1;
            running = None;
        }
    }

    for (i, p) in procs.iter().enumerate() {
        let (Some(start), Some(end)) = (first_dispatch[i], completion[i]) else {
            unreachable!("process {} left the loop unfinished", p.pid);
        };
        let outcome = ProcessOutcome::new(p, start, end);
        schedule.add_outcome(if report_priority {
            outcome.with_priority(p.priority)
        } else {
            outcome
        });
    }

    schedule
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchedError;
    use crate::models::{processes, TimelineInterval};

    fn spans(s: &Schedule) -> Vec<(i64, i64, u32)> {
        s.timeline.iter().map(|iv| (iv.start, iv.end, iv.pid)).collect()
    }

    #[test]
    fn test_srtf_preempts() {
        let ps = processes([(1, 0, 8), (2, 1, 4)]);
        let s = srtf(&ps).unwrap();
        assert_eq!(spans(&s), vec![(0, 1, 1), (1, 5, 2), (5, 12, 1)]);
        assert_eq!(s.outcome(2).map(|o| o.completion), Some(5));
        assert_eq!(s.outcome(1).map(|o| o.completion), Some(12));
        assert_eq!(s.outcome(1).map(|o| o.response), Some(0));
        assert_eq!(s.outcome(1).map(|o| o.waiting), Some(4));
    }

    #[test]
    fn test_srtf_textbook_case() {
        let ps = processes([(1, 0, 8), (2, 1, 4), (3, 2, 9), (4, 3, 5)]);
        let s = srtf(&ps).unwrap();
        assert_eq!(
            spans(&s),
            vec![(0, 1, 1), (1, 5, 2), (5, 10, 4), (10, 17, 1), (17, 26, 3)]
        );
        let total_wait: i64 = s.outcomes.iter().map(|o| o.waiting).sum();
        assert_eq!(total_wait, 26);
    }

    #[test]
    fn test_srtf_equal_remaining_keeps_running() {
        // at t=1 both have 3 units left; P1 keeps the CPU
        let ps = processes([(1, 0, 4), (2, 1, 3)]);
        let s = srtf(&ps).unwrap();
        assert_eq!(spans(&s), vec![(0, 4, 1), (4, 7, 2)]);
    }

    #[test]
    fn test_srtf_idle_jump() {
        let ps = processes([(1, 2, 2), (2, 7, 1)]);
        let s = srtf(&ps).unwrap();
        assert_eq!(
            s.timeline.intervals(),
            &[TimelineInterval::new(2, 4, 1), TimelineInterval::new(7, 8, 2)]
        );
        assert_eq!(s.outcome(2).map(|o| o.waiting), Some(0));
    }

    #[test]
    fn test_srtf_response_differs_from_waiting() {
        let ps = processes([(1, 0, 5), (2, 1, 2)]);
        let s = srtf(&ps).unwrap();
        let p1 = s.outcome(1).unwrap();
        assert_eq!(p1.response, 0);
        assert_eq!(p1.waiting, 2);
    }

    #[test]
    fn test_priority_preemptive() {
        let ps = vec![
            Process::new(1, 0, 5).with_priority(3),
            Process::new(2, 1, 3).with_priority(1),
            Process::new(3, 2, 2).with_priority(2),
        ];
        let s = priority_preemptive(&ps).unwrap();
        assert_eq!(spans(&s), vec![(0, 1, 1), (1, 4, 2), (4, 6, 3), (6, 10, 1)]);
        assert_eq!(s.outcome(1).map(|o| o.completion), Some(10));
        assert_eq!(s.outcome(3).map(|o| o.response), Some(2));
        assert_eq!(s.outcome(1).and_then(|o| o.priority), Some(3));
    }

    #[test]
    fn test_priority_preemptive_equal_priority_no_preempt() {
        let ps = vec![
            Process::new(1, 0, 3).with_priority(2),
            Process::new(2, 1, 1).with_priority(2),
        ];
        let s = priority_preemptive(&ps).unwrap();
        assert_eq!(spans(&s), vec![(0, 3, 1), (3, 4, 2)]);
    }

    #[test]
    fn test_priority_preemptive_requires_priority() {
        let ps = vec![Process::new(1, 0, 3)];
        let err = priority_preemptive(&ps).unwrap_err();
        assert_eq!(err, SchedError::MissingPriority { pids: vec![1] });
    }
}
