//! Input validation for simulation runs.
//!
//! Checks a process set before any algorithm runs. Detects:
//! - Empty process sets
//! - Duplicate PIDs
//! - Non-positive burst times
//! - Negative arrival times and priorities
//! - Non-positive Round Robin quanta
//! - Workloads whose timeline would not fit in `i64` ticks
//!
//! All defects are reported together, not just the first one found.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{Pid, Process};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// No processes were supplied.
    EmptyWorkload,
    /// Two processes share the same PID.
    DuplicatePid,
    /// A burst time is zero or negative.
    NonPositiveBurst,
    /// An arrival time is negative.
    NegativeArrival,
    /// A priority is negative.
    NegativePriority,
    /// A Round Robin quantum is zero or negative.
    NonPositiveQuantum,
    /// Latest arrival plus total burst exceeds the tick range.
    TimeOverflow,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a process set.
///
/// Checks:
/// 1. At least one process
/// 2. No duplicate PIDs
/// 3. Every burst > 0
/// 4. Every arrival ≥ 0
/// 5. Every supplied priority ≥ 0
/// 6. Latest arrival + total burst fits in `i64`
///
/// Missing priorities are not an error here; only the priority algorithms
/// require them (see [`missing_priorities`]).
pub fn validate_processes(processes: &[Process]) -> ValidationResult {
    let mut errors = Vec::new();

    if processes.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyWorkload,
            "Process set is empty",
        ));
    }

    let mut seen = HashSet::new();
    for p in processes {
        if !seen.insert(p.pid) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicatePid,
                format!("Duplicate PID: {}", p.pid),
            ));
        }
        if p.burst <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!("Process {} has non-positive burst {}", p.pid, p.burst),
            ));
        }
        if p.arrival < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!("Process {} has negative arrival {}", p.pid, p.arrival),
            ));
        }
        if let Some(priority) = p.priority.filter(|&pr| pr < 0) {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativePriority,
                format!("Process {} has negative priority {priority}", p.pid),
            ));
        }
    }

    // every completion is bounded by the horizon, so no clock can overflow
    if errors.is_empty() && time_horizon(processes).is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::TimeOverflow,
            "Latest arrival plus total burst exceeds the representable time range",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Latest arrival plus total burst, or `None` on overflow.
fn time_horizon(processes: &[Process]) -> Option<i64> {
    let latest = processes.iter().map(|p| p.arrival).max().unwrap_or(0);
    processes
        .iter()
        .try_fold(latest, |horizon, p| horizon.checked_add(p.burst))
}

/// Validates a Round Robin time quantum.
pub fn validate_quantum(quantum: i64) -> ValidationResult {
    if quantum > 0 {
        Ok(())
    } else {
        Err(vec![ValidationError::new(
            ValidationErrorKind::NonPositiveQuantum,
            format!("Time quantum must be positive, got {quantum}"),
        )])
    }
}

/// PIDs of processes without a priority, in input order.
pub fn missing_priorities(processes: &[Process]) -> Vec<Pid> {
    processes
        .iter()
        .filter(|p| !p.has_priority())
        .map(|p| p.pid)
        .collect()
}
