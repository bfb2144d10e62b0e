//! Read-only roster projections.
//!
//! # Responsibility
//! - Derive filtered and sorted views for display.
//! - Compute summary counts over the full roster.
//!
//! # Invariants
//! - Queries never mutate the roster.
//! - Each view row keeps its roster index so edits route back correctly.

pub mod view;
