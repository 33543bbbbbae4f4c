//! Error types for simulation and comparison.

use thiserror::Error;

use crate::models::Pid;
use crate::validation::ValidationError;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SchedError>;

/// Errors surfaced to callers of the algorithms and the comparator.
///
/// Every variant is raised before any simulation output exists, so no
/// partial results accompany an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedError {
    /// The process set or a parameter failed validation.
    #[error("invalid input: {}", join(.0))]
    InvalidInput(Vec<ValidationError>),

    /// A priority algorithm was given processes without a priority.
    #[error("priority required but missing for process(es) {pids:?}")]
    MissingPriority { pids: Vec<Pid> },

    /// A comparison was cancelled between configurations.
    #[error("comparison cancelled")]
    Cancelled,
}

impl SchedError {
    /// Validation errors carried by `InvalidInput`, empty otherwise.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            SchedError::InvalidInput(errors) => errors,
            _ => &[],
        }
    }
}

impl From<Vec<ValidationError>> for SchedError {
    fn from(errors: Vec<ValidationError>) -> Self {
        SchedError::InvalidInput(errors)
    }
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
