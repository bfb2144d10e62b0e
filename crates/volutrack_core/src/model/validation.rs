//! Guest name validation.
//!
//! # Responsibility
//! - Check candidate names against length, character and uniqueness rules.
//! - Return stable user-facing messages for each failure.
//!
//! # Invariants
//! - Checks run in a fixed order: empty, too short, too long, invalid
//!   characters, duplicate. Callers display only the first failure.
//! - Validation is pure; the roster is never touched.

use crate::model::guest::{normalize_name_key, Guest};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Minimum trimmed name length, in characters.
pub const NAME_MIN_LENGTH: usize = 2;
/// Maximum trimmed name length, in characters.
pub const NAME_MAX_LENGTH: usize = 50;
/// Human-readable description of the allowed character class.
pub const NAME_PATTERN_DESCRIPTION: &str = "letters, spaces, hyphens, and apostrophes";

static NAME_PATTERN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z\s'-]+$").expect("valid guest name regex"));

/// Reason a candidate guest name was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuestValidationError {
    Empty,
    TooShort,
    TooLong,
    InvalidCharacters,
    Duplicate,
}

impl Display for GuestValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "Guest name cannot be empty"),
            Self::TooShort => write!(
                f,
                "Guest name must be at least {NAME_MIN_LENGTH} characters"
            ),
            Self::TooLong => write!(
                f,
                "Guest name must be less than {NAME_MAX_LENGTH} characters"
            ),
            Self::InvalidCharacters => write!(
                f,
                "Guest name can only contain {NAME_PATTERN_DESCRIPTION}"
            ),
            Self::Duplicate => write!(f, "This guest name already exists"),
        }
    }
}

impl Error for GuestValidationError {}

/// Validates a new guest name against the current roster.
///
/// Returns the trimmed name on success.
///
/// # Errors
/// - The first failing rule, in the order documented on this module.
pub fn validate_guest_name(
    candidate: &str,
    roster: &[Guest],
) -> Result<String, GuestValidationError> {
    validate_against(candidate, roster, None)
}

/// Validates a rename of the guest at `index`.
///
/// Identical to [`validate_guest_name`] except the guest being renamed is
/// excluded from the duplicate check, so a recasing of its own name passes.
pub fn validate_guest_rename(
    candidate: &str,
    roster: &[Guest],
    index: usize,
) -> Result<String, GuestValidationError> {
    validate_against(candidate, roster, Some(index))
}

fn validate_against(
    candidate: &str,
    roster: &[Guest],
    skip_index: Option<usize>,
) -> Result<String, GuestValidationError> {
    let trimmed = candidate.trim();
    let length = trimmed.chars().count();

    if length == 0 {
        return Err(GuestValidationError::Empty);
    }
    if length < NAME_MIN_LENGTH {
        return Err(GuestValidationError::TooShort);
    }
    if length > NAME_MAX_LENGTH {
        return Err(GuestValidationError::TooLong);
    }
    if !NAME_PATTERN_RE.is_match(trimmed) {
        return Err(GuestValidationError::InvalidCharacters);
    }

    let key = normalize_name_key(trimmed);
    let is_duplicate = roster
        .iter()
        .enumerate()
        .filter(|(position, _)| Some(*position) != skip_index)
        .any(|(_, guest)| guest.name_key() == key);
    if is_duplicate {
        return Err(GuestValidationError::Duplicate);
    }

    Ok(trimmed.to_string())
}
