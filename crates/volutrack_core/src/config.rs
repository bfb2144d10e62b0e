//! Session configuration.
//!
//! Hosts may build `SessionConfig` in code or deserialize it from JSON; any
//! omitted field takes its default.

use crate::roster::undo::DEFAULT_UNDO_CAPACITY;
use serde::{Deserialize, Serialize};

/// Storage key for the serialized roster.
pub const DEFAULT_STORAGE_KEY: &str = "volutrack_guests";
/// Storage key for the dark-mode preference.
pub const DEFAULT_DARK_MODE_KEY: &str = "volutrack_dark_mode";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub storage_key: String,
    pub dark_mode_key: String,
    /// Number of removals kept for undo; 0 is treated as 1.
    pub undo_capacity: usize,
    /// Run the name validator on inline renames and record edits.
    ///
    /// When `false`, renamed names are only trimmed: empty, malformed or
    /// duplicate names can enter the roster, so names are no longer
    /// guaranteed unique. Adds are validated either way.
    pub validate_on_rename: bool,
    /// Start from the two-guest seed roster when nothing is stored.
    pub seed_on_empty: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            dark_mode_key: DEFAULT_DARK_MODE_KEY.to_string(),
            undo_capacity: DEFAULT_UNDO_CAPACITY,
            validate_on_rename: true,
            seed_on_empty: true,
        }
    }
}

impl SessionConfig {
    /// Parses a JSON config document, filling omitted fields with defaults.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
