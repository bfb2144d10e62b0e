//! Bounded last-in-first-out log of removed guests.
//!
//! # Invariants
//! - `len() <= capacity()` at all times; the oldest entry is dropped first.
//! - Entries are consumed on pop and never restored twice.

use crate::model::guest::Guest;
use std::collections::VecDeque;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default number of removals kept for undo.
pub const DEFAULT_UNDO_CAPACITY: usize = 10;

/// Snapshot of a removed guest and the position it occupied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedEntry {
    pub guest: Guest,
    pub original_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoError {
    NothingToUndo,
}

impl Display for UndoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NothingToUndo => write!(f, "nothing to undo"),
        }
    }
}

impl Error for UndoError {}

#[derive(Debug, Clone)]
pub struct UndoLog {
    entries: VecDeque<RemovedEntry>,
    capacity: usize,
}

impl UndoLog {
    /// Creates an empty log. A zero capacity is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Pushes a removal to the tail, evicting the oldest entry when full.
    ///
    /// Returns the evicted entry, if any.
    pub fn record_removal(&mut self, guest: Guest, original_index: usize) -> Option<RemovedEntry> {
        let evicted = if self.entries.len() == self.capacity {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(RemovedEntry {
            guest,
            original_index,
        });
        evicted
    }

    pub fn pop_last(&mut self) -> Result<RemovedEntry, UndoError> {
        self.entries.pop_back().ok_or(UndoError::NothingToUndo)
    }

    pub fn peek_last(&self) -> Option<&RemovedEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for UndoLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_UNDO_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::{UndoError, UndoLog};
    use crate::model::guest::Guest;

    #[test]
    fn pops_in_reverse_order_of_removal() {
        let mut log = UndoLog::default();
        log.record_removal(Guest::new("Treasure"), 0);
        log.record_removal(Guest::new("Nic"), 1);

        let last = log.pop_last().unwrap();
        assert_eq!(last.guest.name, "Nic");
        assert_eq!(last.original_index, 1);
        assert_eq!(log.pop_last().unwrap().guest.name, "Treasure");
        assert_eq!(log.pop_last(), Err(UndoError::NothingToUndo));
    }

    #[test]
    fn full_log_evicts_oldest_entry() {
        let mut log = UndoLog::with_capacity(2);
        assert!(log.record_removal(Guest::new("Ann"), 0).is_none());
        assert!(log.record_removal(Guest::new("Bob"), 0).is_none());

        let evicted = log.record_removal(Guest::new("Cat"), 0).unwrap();
        assert_eq!(evicted.guest.name, "Ann");
        assert_eq!(log.len(), 2);
        assert_eq!(log.peek_last().unwrap().guest.name, "Cat");
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let mut log = UndoLog::with_capacity(0);
        assert_eq!(log.capacity(), 1);

        log.record_removal(Guest::new("Ann"), 0);
        log.record_removal(Guest::new("Bob"), 1);
        assert_eq!(log.len(), 1);
        assert_eq!(log.pop_last().unwrap().guest.name, "Bob");
    }
}
