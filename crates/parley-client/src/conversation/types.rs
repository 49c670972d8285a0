//! Conversation state and the in-flight guard.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Agent reply appended when a query fails for any reason.
pub const FALLBACK_REPLY: &str = "Sorry, something went wrong. Please try again.";

/// Whether any query round trip is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationState {
    Idle,
    Submitting,
}

/// Counts one outstanding query for as long as it lives. Dropping it,
/// including when the submitting future is cancelled, releases the count.
pub(crate) struct InFlightGuard<'a> {
    counter: &'a AtomicUsize,
}

impl<'a> InFlightGuard<'a> {
    pub(crate) fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::AcqRel);
        Self { counter }
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::AcqRel);
    }
}
