//! Cooperative cancellation for long comparisons.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag checked by the comparator between configurations.
///
/// Clones share the same flag, so one clone can be handed to a UI thread
/// while another is passed to [`Comparator::compare_with_cancel`].
///
/// [`Comparator::compare_with_cancel`]: super::Comparator::compare_with_cancel
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancelFlag {
    /// Creates an unset flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
