#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Leaderboard collaborator contract and its in-memory record-keeper.
//!
//! The simulation core never talks to a leaderboard directly; the host
//! collects a display name after the session ends and forwards the final
//! score through the [`Leaderboard`] trait. Storage is raw: entries keep
//! their insertion order and no ranking or sorting contract is imposed —
//! ordering, if any, is a presentation concern of the consumer.

use serde::{Deserialize, Serialize};

/// Stored leaderboard record pairing a display name with a final score.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Display name supplied by the player.
    pub name: String,
    /// Final score reported by the session-end notifier.
    pub score: u32,
}

/// Contiguous slice of the stored entries requested by a consumer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntryRange {
    start: usize,
    amount: usize,
}

impl EntryRange {
    /// Creates a range starting at `start` spanning at most `amount` entries.
    #[must_use]
    pub const fn new(start: usize, amount: usize) -> Self {
        Self { start, amount }
    }

    /// Index of the first entry covered by the range.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Maximum number of entries covered by the range.
    #[must_use]
    pub const fn amount(&self) -> usize {
        self.amount
    }
}

/// Record-keeper accepting `(name, score)` pairs and listing stored entries.
pub trait Leaderboard {
    /// Stores a new entry and returns the stored value.
    fn create(&mut self, name: &str, score: u32) -> Entry;

    /// Lists the stored entries covered by `range`, clamped to the store.
    fn list(&self, range: EntryRange) -> Vec<Entry>;
}

/// Leaderboard keeping entries in process memory, in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryLeaderboard {
    entries: Vec<Entry>,
}

impl InMemoryLeaderboard {
    /// Creates an empty leaderboard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether no entries are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Leaderboard for InMemoryLeaderboard {
    fn create(&mut self, name: &str, score: u32) -> Entry {
        let entry = Entry {
            name: name.to_owned(),
            score,
        };
        self.entries.push(entry.clone());
        entry
    }

    fn list(&self, range: EntryRange) -> Vec<Entry> {
        let start = range.start().min(self.entries.len());
        let end = start.saturating_add(range.amount()).min(self.entries.len());
        self.entries[start..end].to_vec()
    }
}
