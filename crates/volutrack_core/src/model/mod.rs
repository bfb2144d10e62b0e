//! Guest domain model and name validation rules.
//!
//! # Responsibility
//! - Define the canonical guest record shared by roster, query and export.
//! - Own the syntactic and uniqueness rules for guest names.
//!
//! # Invariants
//! - Every guest carries a stable `GuestId`.
//! - Detail fields are always present (empty string, never missing).

pub mod guest;
pub mod validation;
