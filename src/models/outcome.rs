//! Per-process scheduling outcome (one row of the results table).

use serde::{Deserialize, Serialize};

use super::{Pid, Process};

/// Timing results for a single process.
///
/// # Definitions
/// - turnaround = completion − arrival
/// - waiting = turnaround − burst
/// - response = first dispatch − arrival
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessOutcome {
    /// Process identifier.
    pub pid: Pid,
    /// Arrival tick.
    pub arrival: i64,
    /// Burst length.
    pub burst: i64,
    /// Priority, reported only by priority-driven algorithms.
    pub priority: Option<i32>,
    /// First dispatch tick.
    pub start: i64,
    /// Tick at which the last unit of work finished.
    pub completion: i64,
    /// Completion minus arrival.
    pub turnaround: i64,
    /// Turnaround minus burst.
    pub waiting: i64,
    /// First dispatch minus arrival.
    pub response: i64,
}

impl ProcessOutcome {
    /// Derives all timing fields from the first dispatch and completion ticks.
    pub(crate) fn new(process: &Process, start: i64, completion: i64) -> Self {
        let turnaround = completion - process.arrival;
        Self {
            pid: process.pid,
            arrival: process.arrival,
            burst: process.burst,
            priority: None,
            start,
            completion,
            turnaround,
            waiting: turnaround - process.burst,
            response: start - process.arrival,
        }
    }

    /// Reports the process priority in this row.
    pub(crate) fn with_priority(mut self, priority: Option<i32>) -> Self {
        self.priority = priority;
        self
    }

    /// Priority as displayed in a results table (`"-"` when absent).
    pub fn priority_label(&self) -> String {
        self.priority
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string())
    }
}
