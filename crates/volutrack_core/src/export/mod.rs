//! Roster export for download and printing.
//!
//! # Responsibility
//! - Render the full roster as CSV rows (`Name,Status`).
//! - Render a printable plain-text report with summary counts.
//!
//! # Invariants
//! - Export always covers the full roster, never the filtered view.
//! - Row order follows roster insertion order.

pub mod report;
