//! Comparator configuration.

use serde::{Deserialize, Serialize};

use super::Metric;

/// Default upper bound of the Round Robin quantum sweep.
pub const DEFAULT_MAX_QUANTUM: i64 = 20;

/// Settings for an algorithm comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparatorConfig {
    /// Largest Round Robin quantum tried; the sweep stops at
    /// `min(max_burst, max_quantum)`.
    pub max_quantum: i64,
    /// Metric used to pick the best Round Robin quantum.
    pub sweep_metric: Metric,
    /// Whether to include the priority algorithms when every process has a
    /// priority.
    pub include_priority: bool,
}

impl Default for ComparatorConfig {
    fn default() -> Self {
        Self {
            max_quantum: DEFAULT_MAX_QUANTUM,
            sweep_metric: Metric::Waiting,
            include_priority: true,
        }
    }
}

impl ComparatorConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sweep bound (at least 1).
    pub fn with_max_quantum(mut self, max_quantum: i64) -> Self {
        self.max_quantum = max_quantum.max(1);
        self
    }

    /// Sets the metric used to pick the Round Robin quantum.
    pub fn with_sweep_metric(mut self, metric: Metric) -> Self {
        self.sweep_metric = metric;
        self
    }

    /// Enables or disables the priority algorithms.
    pub fn with_priority(mut self, include: bool) -> Self {
        self.include_priority = include;
        self
    }
}
