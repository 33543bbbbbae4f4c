//! Process model.
//!
//! A process is the unit of work handed to the CPU scheduler: it becomes
//! eligible at its arrival time and needs `burst` time units of CPU.
//!
//! # Time Representation
//! All times are integer ticks relative to the simulation epoch (t=0).

use serde::{Deserialize, Serialize};

/// Process identifier, unique within a single run.
pub type Pid = u32;

/// A process to be scheduled.
///
/// Values are never mutated by the algorithms; every run works on a
/// private copy of the caller's slice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Process {
    /// Unique process identifier.
    pub pid: Pid,
    /// Tick at which the process becomes ready (≥ 0).
    pub arrival: i64,
    /// Total CPU time required (> 0).
    pub burst: i64,
    /// Scheduling priority (lower = more important). `None` = not given.
    #[serde(default)]
    pub priority: Option<i32>,
}

impl Process {
    /// Creates a process without a priority.
    pub fn new(pid: Pid, arrival: i64, burst: i64) -> Self {
        Self {
            pid,
            arrival,
            burst,
            priority: None,
        }
    }

    /// Sets the scheduling priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Whether a priority was supplied.
    #[inline]
    pub fn has_priority(&self) -> bool {
        self.priority.is_some()
    }
}

impl From<(Pid, i64, i64)> for Process {
    fn from((pid, arrival, burst): (Pid, i64, i64)) -> Self {
        Self::new(pid, arrival, burst)
    }
}

impl From<(Pid, i64, i64, i32)> for Process {
    fn from((pid, arrival, burst, priority): (Pid, i64, i64, i32)) -> Self {
        Self::new(pid, arrival, burst).with_priority(priority)
    }
}

/// Builds a process list from `(pid, arrival, burst)` tuples.
pub fn processes<I, T>(items: I) -> Vec<Process>
where
    I: IntoIterator<Item = T>,
    T: Into<Process>,
{
    items.into_iter().map(Into::into).collect()
}
