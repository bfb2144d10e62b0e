//! Persistence gateway contracts and implementations.
//!
//! # Responsibility
//! - Define the opaque key-value `load`/`save` contract used by the session.
//! - Provide SQLite-backed and in-memory gateways.
//! - Encode and decode the roster and preferences stored behind it.
//!
//! # Invariants
//! - Gateways store UTF-8 text values; encoding lives above them.
//! - Decode failures never surface to callers; they fall back to defaults.

pub mod gateway;
pub mod roster_repo;
pub mod sqlite_gateway;
