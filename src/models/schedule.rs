//! Schedule (simulation result) model.
//!
//! A schedule pairs the per-process results table with the CPU timeline
//! produced by one algorithm run.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{Pid, Process, ProcessOutcome, Timeline, TimelineInterval};

/// The result of running one scheduling algorithm over a process set.
///
/// `outcomes` keep the algorithm's natural order (dispatch or arrival
/// order). Use [`Schedule::in_input_order`] to restore the caller's order
/// for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Label of the algorithm that produced this schedule (e.g. `"RR (TQ=2)"`).
    pub algorithm: String,
    /// One row per process.
    pub outcomes: Vec<ProcessOutcome>,
    /// CPU occupancy.
    pub timeline: Timeline,
}

impl Schedule {
    /// Creates an empty schedule for the given algorithm label.
    pub fn new(algorithm: impl Into<String>) -> Self {
        Self {
            algorithm: algorithm.into(),
            outcomes: Vec::new(),
            timeline: Timeline::new(),
        }
    }

    /// Adds a results row.
    pub(crate) fn add_outcome(&mut self, outcome: ProcessOutcome) {
        self.outcomes.push(outcome);
    }

    /// Finds the row for a process.
    pub fn outcome(&self, pid: Pid) -> Option<&ProcessOutcome> {
        self.outcomes.iter().find(|o| o.pid == pid)
    }

    /// Timeline intervals of a process.
    pub fn intervals_for(&self, pid: Pid) -> Vec<&TimelineInterval> {
        self.timeline.intervals_for(pid)
    }

    /// Latest completion tick (0 when empty).
    pub fn makespan(&self) -> i64 {
        self.outcomes.iter().map(|o| o.completion).max().unwrap_or(0)
    }

    /// Number of processes scheduled.
    pub fn process_count(&self) -> usize {
        self.outcomes.len()
    }

    /// Rows re-ordered to match `processes`.
    ///
    /// Processes absent from the schedule are skipped.
    pub fn in_input_order(&self, processes: &[Process]) -> Vec<&ProcessOutcome> {
        let by_pid: HashMap<Pid, &ProcessOutcome> =
            self.outcomes.iter().map(|o| (o.pid, o)).collect();
        processes
            .iter()
            .filter_map(|p| by_pid.get(&p.pid).copied())
            .collect()
    }

    /// Completion ticks in the order of `processes`.
    pub fn completions(&self, processes: &[Process]) -> Vec<i64> {
        self.in_input_order(processes)
            .iter()
            .map(|o| o.completion)
            .collect()
    }

    /// Waiting times in the order of `processes`.
    pub fn waiting_times(&self, processes: &[Process]) -> Vec<i64> {
        self.in_input_order(processes)
            .iter()
            .map(|o| o.waiting)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Vec<Process>, Schedule) {
        let ps = vec![Process::new(1, 0, 3), Process::new(2, 0, 2)];
        let mut s = Schedule::new("SJF");
        s.add_outcome(ProcessOutcome::new(&ps[1], 0, 2));
        s.add_outcome(ProcessOutcome::new(&ps[0], 2, 5));
        s.timeline.push(0, 2, 2);
        s.timeline.push(2, 5, 1);
        (ps, s)
    }

    #[test]
    fn test_schedule_lookup() {
        let (_, s) = sample();
        assert_eq!(s.outcome(1).map(|o| o.completion), Some(5));
        assert!(s.outcome(9).is_none());
        assert_eq!(s.intervals_for(2).len(), 1);
        assert_eq!(s.makespan(), 5);
        assert_eq!(s.process_count(), 2);
    }

    #[test]
    fn test_in_input_order() {
        let (ps, s) = sample();
        let pids: Vec<Pid> = s.in_input_order(&ps).iter().map(|o| o.pid).collect();
        assert_eq!(pids, vec![1, 2]);
        assert_eq!(s.completions(&ps), vec![5, 2]);
        assert_eq!(s.waiting_times(&ps), vec![2, 0]);
    }

    #[test]
    fn test_schedule_json_roundtrip() {
        let (_, s) = sample();
        let json = serde_json::to_string(&s).unwrap();
        let back: Schedule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn test_empty_schedule() {
        let s = Schedule::new("FCFS");
        assert_eq!(s.makespan(), 0);
        assert_eq!(s.process_count(), 0);
        assert!(s.timeline.is_empty());
    }
}
