//! Guest domain model.
//!
//! # Responsibility
//! - Define the record persisted for each invitee/visitor.
//! - Provide constructors that default optional detail fields.
//!
//! # Invariants
//! - `id` is stable for the lifetime of the record and survives undo.
//! - `name` is stored trimmed when created through `Guest::new`.
//! - Detail fields default to empty strings, including on decode of legacy
//!   records that predate them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a guest record.
pub type GuestId = Uuid;

/// Free-form contact details attached to a guest.
///
/// None of these fields are validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuestDetails {
    pub email: String,
    pub phone: String,
    pub notes: String,
}

/// One invitee/visitor on the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    /// Generated when missing from persisted data.
    #[serde(default = "Uuid::new_v4")]
    pub id: GuestId,
    pub name: String,
    /// Attendance confirmation; serialized as `isConfirmed`.
    #[serde(default)]
    pub is_confirmed: bool,
    #[serde(flatten)]
    pub details: GuestDetails,
}

impl Guest {
    /// Creates an unconfirmed guest with a generated id and empty details.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    /// Creates an unconfirmed guest with a caller-provided id.
    pub fn with_id(id: GuestId, name: impl AsRef<str>) -> Self {
        Self {
            id,
            name: name.as_ref().trim().to_string(),
            is_confirmed: false,
            details: GuestDetails::default(),
        }
    }

    /// Builder-style helper used by seeds and tests.
    pub fn confirmed(mut self, is_confirmed: bool) -> Self {
        self.is_confirmed = is_confirmed;
        self
    }

    /// Case- and whitespace-insensitive key used for uniqueness checks.
    pub fn name_key(&self) -> String {
        normalize_name_key(&self.name)
    }

    /// Human-readable confirmation label used by export and reports.
    pub fn status_label(&self) -> &'static str {
        if self.is_confirmed {
            "Confirmed"
        } else {
            "Pending"
        }
    }

    /// Two-letter initials: first + last word when the name has several
    /// words, otherwise the first two characters.
    pub fn initials(&self) -> String {
        let words: Vec<&str> = self.name.split_whitespace().collect();
        let raw: String = match words.as_slice() {
            [first, .., last] => first
                .chars()
                .take(1)
                .chain(last.chars().take(1))
                .collect(),
            _ => self.name.trim().chars().take(2).collect(),
        };
        raw.to_uppercase()
    }
}

pub(crate) fn normalize_name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::{Guest, GuestDetails};

    #[test]
    fn new_guest_defaults_to_unconfirmed_with_empty_details() {
        let guest = Guest::new("  John Doe ");

        assert_eq!(guest.name, "John Doe");
        assert!(!guest.is_confirmed);
        assert_eq!(guest.details, GuestDetails::default());
        assert!(!guest.id.is_nil());
    }

    #[test]
    fn initials_use_first_and_last_word() {
        assert_eq!(Guest::new("mary ann smith").initials(), "MS");
        assert_eq!(Guest::new("Nic").initials(), "NI");
    }

    #[test]
    fn decodes_legacy_record_without_id_or_details() {
        let guest: Guest =
            serde_json::from_str(r#"{"name":"Treasure","isConfirmed":false}"#).unwrap();

        assert_eq!(guest.name, "Treasure");
        assert!(!guest.is_confirmed);
        assert!(!guest.id.is_nil());
        assert!(guest.details.email.is_empty());
    }

    #[test]
    fn serializes_with_flat_camel_case_fields() {
        let mut guest = Guest::new("Nic").confirmed(true);
        guest.details.phone = "555-0100".to_string();

        let json = serde_json::to_value(&guest).unwrap();
        assert_eq!(json["name"], "Nic");
        assert_eq!(json["isConfirmed"], true);
        assert_eq!(json["phone"], "555-0100");
        assert_eq!(json["notes"], "");
        assert_eq!(json["id"], guest.id.to_string());
    }
}
