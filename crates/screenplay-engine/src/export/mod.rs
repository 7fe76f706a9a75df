//! Plain-text export.
//!
//! The inverse of [`crate::parsing`]: `parse_fountain(to_fountain(doc))` is not
//! guaranteed to equal `doc`, but applying the pair a second time changes
//! nothing.

pub mod fountain;

pub use fountain::to_fountain;
