//! Domain records for cycle tracking.
//!
//! # Responsibility
//! - Define the records read from and written to storage.
//! - Keep serialized shapes identical to the response payloads.
//!
//! # Invariants
//! - Identifiers are generated by storage and never reused.
//! - Calendar dates and timestamps travel as plain text.

pub mod article;
pub mod cycle;
pub mod daily_note;
pub mod user;
