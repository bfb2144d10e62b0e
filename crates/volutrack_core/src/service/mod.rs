//! Core use-case services.
//!
//! # Responsibility
//! - Own one guest list session and orchestrate validation, roster
//!   mutations, undo capture and persistence.
//! - Keep UI layers decoupled from storage and codec details.

pub mod guest_session;
