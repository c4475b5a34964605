//! Resize coalescing.

use std::time::{Duration, Instant};

/// Coalesces a burst of resize notifications into a single fit trigger.
///
/// Every notification restarts the quiet-period timer (last write wins, no
/// backlog); [`ready`](ResizeDebouncer::ready) reports `true` exactly once
/// when the quiet period has elapsed. The host drives this from whatever
/// clock its frame loop uses.
#[derive(Debug, Clone)]
pub struct ResizeDebouncer {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl ResizeDebouncer {
    pub fn new(quiet: Duration) -> Self {
        Self { quiet, deadline: None }
    }

    pub fn notify(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    pub fn pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// True once the quiet period after the last notification has elapsed;
    /// consumes the pending deadline.
    pub fn ready(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
