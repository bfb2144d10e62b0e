//! SQLite storage bootstrap for the key-value persistence backend.
//!
//! # Responsibility
//! - Open file or in-memory connections configured for the gateway.
//! - Run schema migrations before any key-value read or write.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - A database written by a newer binary is refused, never downgraded.
//!
//! Failures surface as `GatewayError` so hosts handle storage errors in one
//! place, whether they happen at open time or on a later `load`/`save`.

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};
