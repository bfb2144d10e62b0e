//! Core guest list engine for Volutrack.
//! This crate is the single source of truth for roster invariants; UI hosts
//! drive it through [`GuestSession`].

pub mod config;
pub mod db;
pub mod export;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod roster;
pub mod service;
pub mod shortcut;

pub use config::SessionConfig;
pub use export::report::{export_csv, print_report, ExportError};
pub use logging::{default_log_level, init_default_logging, init_logging, logging_status};
pub use model::guest::{Guest, GuestDetails, GuestId};
pub use model::validation::{validate_guest_name, validate_guest_rename, GuestValidationError};
pub use query::view::{counts, view, GuestView, RosterCounts, SortMode, ViewQuery};
pub use repo::gateway::{GatewayError, GatewayResult, MemoryGateway, PersistenceGateway};
pub use repo::roster_repo::{load_roster, save_roster, RosterSource};
pub use repo::sqlite_gateway::SqliteKvGateway;
pub use roster::undo::{RemovedEntry, UndoError, UndoLog};
pub use roster::{Roster, RosterError, RosterResult};
pub use service::guest_session::{
    GuestSession, KeyDispatch, KeyEffect, MutationOutcome, SessionError, SessionResult, ViewState,
};
pub use shortcut::dispatcher::{
    default_shortcuts, KeyChord, KeyEvent, ShortcutAction, ShortcutParseError, ShortcutTable,
};

/// Minimal health-check API for host integration probes.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
