//! Private per-run snapshot of the caller's process set.

use tracing::debug;

use crate::error::{Result, SchedError};
use crate::models::{Process, Schedule};
use crate::validation::{missing_priorities, validate_processes};

/// Validated copy of a process set, stably sorted by arrival.
///
/// The sort order (arrival, then input position) is the tie-break order
/// shared by every algorithm.
#[derive(Debug, Clone)]
pub(crate) struct Workload {
    processes: Vec<Process>,
}

impl Workload {
    /// Validates `processes` and takes a private copy.
    ///
    /// With `needs_priority`, fails with `MissingPriority` if any process
    /// lacks one. The caller's slice is never touched.
    pub(crate) fn prepare(processes: &[Process], needs_priority: bool) -> Result<Self> {
        validate_processes(processes)?;
        if needs_priority {
            let pids = missing_priorities(processes);
            if !pids.is_empty() {
                return Err(SchedError::MissingPriority { pids });
            }
        }

        let mut processes = processes.to_vec();
        processes.sort_by_key(|p| p.arrival);
        Ok(Self { processes })
    }

    /// Processes in tie-break order.
    pub(crate) fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub(crate) fn len(&self) -> usize {
        self.processes.len()
    }

    /// First arrival strictly after `clock`.
    pub(crate) fn next_arrival_after(&self, clock: i64) -> Option<i64> {
        self.processes
            .iter()
            .map(|p| p.arrival)
            .find(|&arrival| arrival > clock)
    }
}

/// Emits the end-of-run event shared by all algorithms.
pub(crate) fn log_finished(schedule: &Schedule) {
    debug!(
        algorithm = %schedule.algorithm,
        processes = schedule.process_count(),
        intervals = schedule.timeline.len(),
        makespan = schedule.makespan(),
        "simulation finished"
    );
}
