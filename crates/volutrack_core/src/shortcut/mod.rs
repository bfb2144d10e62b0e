//! Declarative keyboard shortcut tables.
//!
//! # Responsibility
//! - Parse chord strings such as `ctrl+z` into typed chords.
//! - Match key events against a table and return the bound action.
//!
//! # Invariants
//! - Modifier sets must match exactly; extra held modifiers reject a chord.
//! - The first matching entry wins; unmatched events pass through.

pub mod dispatcher;
