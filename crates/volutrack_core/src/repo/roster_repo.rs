//! Roster and preference codecs over a persistence gateway.
//!
//! # Responsibility
//! - Serialize the roster as a JSON array under a fixed key.
//! - Load the roster at startup with seed fallback.
//! - Persist the dark-mode preference.
//!
//! # Invariants
//! - Load never fails: missing or unreadable data yields the fallback value.
//! - Guest names are never written to logs; only keys and counts are.

use crate::model::guest::Guest;
use crate::repo::gateway::{GatewayError, GatewayResult, PersistenceGateway};
use crate::roster::Roster;
use log::{info, warn};

/// Where a loaded roster came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterSource {
    Stored,
    /// Nothing stored under the key yet.
    SeedMissing,
    /// Stored value could not be read or decoded.
    SeedRecovered,
    /// Nothing stored and seeding disabled.
    Empty,
}

/// Encodes the roster as a JSON array of guest records.
pub fn encode_roster(roster: &Roster) -> GatewayResult<String> {
    Ok(serde_json::to_string(roster.guests())?)
}

/// Decodes a JSON array of guest records.
pub fn decode_roster(key: &str, raw: &str) -> GatewayResult<Roster> {
    serde_json::from_str::<Vec<Guest>>(raw)
        .map(Roster::new)
        .map_err(|err| GatewayError::Decode {
            key: key.to_string(),
            message: err.to_string(),
        })
}

/// Loads the roster stored under `key`, falling back to the seed roster
/// (or an empty roster when `seed_on_empty` is false).
pub fn load_roster<G: PersistenceGateway>(
    gateway: &G,
    key: &str,
    seed_on_empty: bool,
) -> (Roster, RosterSource) {
    let fallback = |source: RosterSource| {
        if seed_on_empty {
            (Roster::seed(), source)
        } else {
            (Roster::default(), RosterSource::Empty)
        }
    };

    let raw = match gateway.load(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            info!("event=roster_load module=repo status=ok source=seed key={key}");
            return fallback(RosterSource::SeedMissing);
        }
        Err(err) => {
            warn!("event=roster_load module=repo status=error key={key} error={err}");
            return fallback(RosterSource::SeedRecovered);
        }
    };

    match decode_roster(key, &raw) {
        Ok(roster) => {
            info!(
                "event=roster_load module=repo status=ok source=stored key={key} total={}",
                roster.len()
            );
            (roster, RosterSource::Stored)
        }
        Err(err) => {
            warn!("event=roster_load module=repo status=error key={key} error={err}");
            fallback(RosterSource::SeedRecovered)
        }
    }
}

/// Encodes and saves the roster under `key`.
pub fn save_roster<G: PersistenceGateway>(
    gateway: &G,
    key: &str,
    roster: &Roster,
) -> GatewayResult<()> {
    let encoded = encode_roster(roster)?;
    gateway.save(key, &encoded)
}

/// Loads the dark-mode flag; `None` when unset or unreadable.
pub fn load_dark_mode<G: PersistenceGateway>(gateway: &G, key: &str) -> Option<bool> {
    match gateway.load(key) {
        Ok(Some(raw)) => match serde_json::from_str::<bool>(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("event=preference_load module=repo status=error key={key} error={err}");
                None
            }
        },
        Ok(None) => None,
        Err(err) => {
            warn!("event=preference_load module=repo status=error key={key} error={err}");
            None
        }
    }
}

pub fn save_dark_mode<G: PersistenceGateway>(
    gateway: &G,
    key: &str,
    enabled: bool,
) -> GatewayResult<()> {
    gateway.save(key, &serde_json::to_string(&enabled)?)
}

#[cfg(test)]
mod tests {
    use super::{load_dark_mode, load_roster, save_dark_mode, save_roster, RosterSource};
    use crate::model::guest::Guest;
    use crate::repo::gateway::MemoryGateway;
    use crate::roster::Roster;

    const KEY: &str = "volutrack_guests";

    #[test]
    fn missing_key_yields_seed() {
        let gateway = MemoryGateway::new();
        let (roster, source) = load_roster(&gateway, KEY, true);

        assert_eq!(source, RosterSource::SeedMissing);
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn corrupted_value_yields_seed() {
        let gateway = MemoryGateway::new().with_value(KEY, "{not json");
        let (roster, source) = load_roster(&gateway, KEY, true);

        assert_eq!(source, RosterSource::SeedRecovered);
        assert_eq!(roster.guests()[0].name, "Treasure");
    }

    #[test]
    fn seeding_can_be_disabled() {
        let gateway = MemoryGateway::new();
        let (roster, source) = load_roster(&gateway, KEY, false);

        assert_eq!(source, RosterSource::Empty);
        assert!(roster.is_empty());
    }

    #[test]
    fn saved_roster_loads_back_identically() {
        let gateway = MemoryGateway::new();
        let roster = Roster::new(vec![Guest::new("Ann"), Guest::new("Bob").confirmed(true)]);

        save_roster(&gateway, KEY, &roster).unwrap();
        let (loaded, source) = load_roster(&gateway, KEY, true);

        assert_eq!(source, RosterSource::Stored);
        assert_eq!(loaded, roster);
    }

    #[test]
    fn legacy_records_without_ids_load() {
        let gateway = MemoryGateway::new().with_value(
            KEY,
            r#"[{"name":"Treasure","isConfirmed":false},{"name":"Nic","isConfirmed":true}]"#,
        );
        let (roster, source) = load_roster(&gateway, KEY, true);

        assert_eq!(source, RosterSource::Stored);
        assert!(roster.guests()[1].is_confirmed);
        assert_ne!(roster.guests()[0].id, roster.guests()[1].id);
    }

    #[test]
    fn dark_mode_round_trips_and_ignores_garbage() {
        let gateway = MemoryGateway::new().with_value("volutrack_dark_mode", "maybe");
        assert_eq!(load_dark_mode(&gateway, "volutrack_dark_mode"), None);

        save_dark_mode(&gateway, "volutrack_dark_mode", true).unwrap();
        assert_eq!(load_dark_mode(&gateway, "volutrack_dark_mode"), Some(true));
    }
}
