//! Filter/sort view and summary counts.

use crate::model::guest::Guest;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Display ordering for the guest list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortMode {
    #[serde(rename = "name-asc")]
    NameAsc,
    #[serde(rename = "name-desc")]
    NameDesc,
    /// Confirmed guests first.
    #[serde(rename = "status-confirmed")]
    StatusConfirmed,
    /// Pending guests first.
    #[serde(rename = "status-pending")]
    StatusPending,
    /// Insertion order.
    #[default]
    #[serde(rename = "recent")]
    Recent,
}

const SORT_MODE_NAME_ASC: &str = "name-asc";
const SORT_MODE_NAME_DESC: &str = "name-desc";
const SORT_MODE_STATUS_CONFIRMED: &str = "status-confirmed";
const SORT_MODE_STATUS_PENDING: &str = "status-pending";
const SORT_MODE_RECENT: &str = "recent";

impl SortMode {
    pub const ALL: [SortMode; 5] = [
        SortMode::NameAsc,
        SortMode::NameDesc,
        SortMode::StatusConfirmed,
        SortMode::StatusPending,
        SortMode::Recent,
    ];

    /// Stable string id shared with UI select options.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NameAsc => SORT_MODE_NAME_ASC,
            Self::NameDesc => SORT_MODE_NAME_DESC,
            Self::StatusConfirmed => SORT_MODE_STATUS_CONFIRMED,
            Self::StatusPending => SORT_MODE_STATUS_PENDING,
            Self::Recent => SORT_MODE_RECENT,
        }
    }

    /// User-facing option label.
    pub fn label(self) -> &'static str {
        match self {
            Self::NameAsc => "Name (A-Z)",
            Self::NameDesc => "Name (Z-A)",
            Self::StatusConfirmed => "Confirmed First",
            Self::StatusPending => "Pending First",
            Self::Recent => "Recently Added",
        }
    }
}

impl Display for SortMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSortMode(pub String);

impl Display for UnknownSortMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown sort mode: `{}`", self.0)
    }
}

impl Error for UnknownSortMode {}

impl FromStr for SortMode {
    type Err = UnknownSortMode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            SORT_MODE_NAME_ASC => Ok(Self::NameAsc),
            SORT_MODE_NAME_DESC => Ok(Self::NameDesc),
            SORT_MODE_STATUS_CONFIRMED => Ok(Self::StatusConfirmed),
            SORT_MODE_STATUS_PENDING => Ok(Self::StatusPending),
            SORT_MODE_RECENT => Ok(Self::Recent),
            other => Err(UnknownSortMode(other.to_string())),
        }
    }
}

/// Filter and ordering options for [`view`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery {
    /// Case-insensitive substring; trimmed before matching.
    pub search: String,
    pub hide_unconfirmed: bool,
    pub sort_by: SortMode,
}

/// One visible row plus its position in the source roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuestView<'a> {
    pub roster_index: usize,
    pub guest: &'a Guest,
}

/// Summary counts over the full roster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RosterCounts {
    pub total: usize,
    pub attending: usize,
    pub unconfirmed: usize,
}

impl RosterCounts {
    /// Rounded percentage of confirmed guests; 0 for an empty roster.
    pub fn confirmation_rate_percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        let rate = self.attending as f64 / self.total as f64 * 100.0;
        rate.round() as u32
    }
}

/// Builds the filtered, sorted view of `guests`.
///
/// Sorting is stable, so `Recent` and status ties keep insertion order.
pub fn view<'a>(guests: &'a [Guest], query: &ViewQuery) -> Vec<GuestView<'a>> {
    let needle = query.search.trim().to_lowercase();

    let mut rows: Vec<GuestView<'a>> = guests
        .iter()
        .enumerate()
        .filter(|(_, guest)| !query.hide_unconfirmed || guest.is_confirmed)
        .filter(|(_, guest)| needle.is_empty() || guest.name.to_lowercase().contains(&needle))
        .map(|(roster_index, guest)| GuestView {
            roster_index,
            guest,
        })
        .collect();

    match query.sort_by {
        SortMode::NameAsc => rows.sort_by(|a, b| compare_names(a.guest, b.guest)),
        SortMode::NameDesc => rows.sort_by(|a, b| compare_names(b.guest, a.guest)),
        // `false < true`, so reverse to put confirmed first.
        SortMode::StatusConfirmed => {
            rows.sort_by(|a, b| b.guest.is_confirmed.cmp(&a.guest.is_confirmed))
        }
        SortMode::StatusPending => {
            rows.sort_by(|a, b| a.guest.is_confirmed.cmp(&b.guest.is_confirmed))
        }
        SortMode::Recent => {}
    }

    rows
}

/// Counts derived from the full roster, independent of any filter.
pub fn counts(guests: &[Guest]) -> RosterCounts {
    let total = guests.len();
    let attending = guests.iter().filter(|guest| guest.is_confirmed).count();
    RosterCounts {
        total,
        attending,
        unconfirmed: total - attending,
    }
}

fn compare_names(a: &Guest, b: &Guest) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
}

#[cfg(test)]
mod tests {
    use super::{counts, view, SortMode, ViewQuery};
    use crate::model::guest::Guest;

    fn roster() -> Vec<Guest> {
        vec![
            Guest::new("charlie"),
            Guest::new("Alice").confirmed(true),
            Guest::new("bob"),
            Guest::new("Dana").confirmed(true),
        ]
    }

    fn names(guests: &[Guest], query: &ViewQuery) -> Vec<String> {
        view(guests, query)
            .into_iter()
            .map(|row| row.guest.name.clone())
            .collect()
    }

    #[test]
    fn name_sort_ignores_case() {
        let guests = roster();
        let mut query = ViewQuery {
            sort_by: SortMode::NameAsc,
            ..ViewQuery::default()
        };
        assert_eq!(names(&guests, &query), ["Alice", "bob", "charlie", "Dana"]);

        query.sort_by = SortMode::NameDesc;
        assert_eq!(names(&guests, &query), ["Dana", "charlie", "bob", "Alice"]);
    }

    #[test]
    fn search_is_trimmed_and_case_insensitive() {
        let guests = roster();
        let query = ViewQuery {
            search: "  AL ".to_string(),
            ..ViewQuery::default()
        };

        let rows = view(&guests, &query);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].roster_index, 1);
    }

    #[test]
    fn status_pending_puts_unconfirmed_first() {
        let guests = roster();
        let query = ViewQuery {
            sort_by: SortMode::StatusPending,
            ..ViewQuery::default()
        };
        assert_eq!(names(&guests, &query), ["charlie", "bob", "Alice", "Dana"]);
    }

    #[test]
    fn rows_keep_roster_index_after_sorting() {
        let guests = roster();
        let query = ViewQuery {
            sort_by: SortMode::NameAsc,
            ..ViewQuery::default()
        };

        for row in view(&guests, &query) {
            assert_eq!(&guests[row.roster_index], row.guest);
        }
    }

    #[test]
    fn sort_mode_string_ids_parse_back() {
        for mode in SortMode::ALL {
            assert_eq!(mode.as_str().parse::<SortMode>().unwrap(), mode);
        }
        assert!("newest".parse::<SortMode>().is_err());
        assert_eq!(SortMode::default(), SortMode::Recent);
    }

    #[test]
    fn confirmation_rate_rounds_and_handles_empty() {
        assert_eq!(counts(&[]).confirmation_rate_percent(), 0);
        assert_eq!(counts(&roster()).confirmation_rate_percent(), 50);

        let two_of_three = vec![
            Guest::new("Ann").confirmed(true),
            Guest::new("Bob").confirmed(true),
            Guest::new("Cat"),
        ];
        assert_eq!(counts(&two_of_three).confirmation_rate_percent(), 67);
    }
}
