#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Session tracking system that surfaces the end-of-game report exactly once.
//!
//! The tracker observes level event batches and latches the first
//! [`Event::SessionEnded`]. Hosts call [`SessionTracker::handle`] every frame
//! and receive the final score a single time, which is the seam the external
//! notifier (name entry, leaderboard submission) hangs off.

use garden_snake_core::{EndReason, Event};

/// One-shot report describing how a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionReport {
    /// Final score at the instant the session ended.
    pub score: u32,
    /// Outcome that terminated the session.
    pub reason: EndReason,
}

/// Pure system that latches the terminal session event.
#[derive(Debug, Default)]
pub struct SessionTracker {
    ended: Option<SessionReport>,
    delivered: bool,
}

impl SessionTracker {
    /// Creates a tracker for a fresh session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes an event batch and returns the end report exactly once.
    ///
    /// The first batch containing [`Event::SessionEnded`] yields
    /// `Some(report)`; every later call returns `None` regardless of input.
    pub fn handle(&mut self, events: &[Event]) -> Option<SessionReport> {
        if self.ended.is_none() {
            for event in events {
                if let Event::SessionEnded { score, reason } = event {
                    self.ended = Some(SessionReport {
                        score: *score,
                        reason: *reason,
                    });
                    break;
                }
            }
        }

        if self.delivered {
            return None;
        }

        let report = self.ended?;
        self.delivered = true;
        Some(report)
    }

    /// Reports whether the tracked session has reached its terminal state.
    #[must_use]
    pub const fn is_ended(&self) -> bool {
        self.ended.is_some()
    }
}
