//! Ordered guest roster with copy-on-write mutations.
//!
//! # Responsibility
//! - Own the ordered guest sequence and its primitive mutations.
//! - Keep the bounded undo log for removals next to the data it restores.
//!
//! # Invariants
//! - Every mutation returns a new `Roster`; the receiver is never modified.
//! - Insertion order is significant and preserved by every operation.
//! - Mutations do not re-validate names; callers validate first.

pub mod undo;

use crate::model::guest::Guest;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RosterResult<T> = Result<T, RosterError>;

/// Roster mutation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterError {
    /// Index came from a stale snapshot or a caller bug.
    IndexOutOfRange { index: usize, len: usize },
}

impl Display for RosterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "guest index {index} out of range for roster of {len}")
            }
        }
    }
}

impl Error for RosterError {}

/// Ordered guest collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    guests: Vec<Guest>,
}

impl Roster {
    pub fn new(guests: Vec<Guest>) -> Self {
        Self { guests }
    }

    /// Default roster used when nothing is stored yet.
    pub fn seed() -> Self {
        Self::new(vec![
            Guest::new("Treasure"),
            Guest::new("Nic").confirmed(true),
        ])
    }

    pub fn guests(&self) -> &[Guest] {
        &self.guests
    }

    pub fn get(&self, index: usize) -> Option<&Guest> {
        self.guests.get(index)
    }

    pub fn len(&self) -> usize {
        self.guests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guests.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Guest> {
        self.guests.iter()
    }

    pub fn into_guests(self) -> Vec<Guest> {
        self.guests
    }

    /// Appends an unconfirmed guest. The name is trimmed, not validated.
    pub fn add(&self, name: &str) -> Roster {
        self.push(Guest::new(name))
    }

    /// Appends an already-built guest record.
    pub fn push(&self, guest: Guest) -> Roster {
        let mut guests = self.guests.clone();
        guests.push(guest);
        Roster::new(guests)
    }

    /// Removes the guest at `index`, returning the new roster and the removed
    /// record so callers can feed the undo log.
    pub fn remove(&self, index: usize) -> RosterResult<(Roster, Guest)> {
        self.check_index(index)?;
        let mut guests = self.guests.clone();
        let removed = guests.remove(index);
        Ok((Roster::new(guests), removed))
    }

    /// Inserts `guest` at `index`, clamped to `[0, len]`.
    pub fn insert_at(&self, index: usize, guest: Guest) -> Roster {
        let mut guests = self.guests.clone();
        let position = index.min(guests.len());
        guests.insert(position, guest);
        Roster::new(guests)
    }

    pub fn toggle_confirmation(&self, index: usize) -> RosterResult<Roster> {
        self.modify(index, |guest| guest.is_confirmed = !guest.is_confirmed)
    }

    /// Replaces the name only; id, status and details are kept.
    pub fn update_name(&self, index: usize, name: &str) -> RosterResult<Roster> {
        let name = name.trim().to_string();
        self.modify(index, move |guest| guest.name = name)
    }

    /// Whole-record replace, used for detail-field edits.
    pub fn replace(&self, index: usize, guest: Guest) -> RosterResult<Roster> {
        self.modify(index, move |slot| *slot = guest)
    }

    fn modify(&self, index: usize, apply: impl FnOnce(&mut Guest)) -> RosterResult<Roster> {
        self.check_index(index)?;
        let mut guests = self.guests.clone();
        apply(&mut guests[index]);
        Ok(Roster::new(guests))
    }

    fn check_index(&self, index: usize) -> RosterResult<()> {
        if index >= self.guests.len() {
            return Err(RosterError::IndexOutOfRange {
                index,
                len: self.guests.len(),
            });
        }
        Ok(())
    }
}

impl From<Vec<Guest>> for Roster {
    fn from(value: Vec<Guest>) -> Self {
        Self::new(value)
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Guest;
    type IntoIter = std::slice::Iter<'a, Guest>;

    fn into_iter(self) -> Self::IntoIter {
        self.guests.iter()
    }
}
