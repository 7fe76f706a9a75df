//! # Plain-Text Import
//!
//! Two-phase parsing of Fountain-like screenplay text.
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): each line is matched against an
//!    ordered list of rules (scene heading, transition, parenthetical,
//!    character, heading) and falls back to action. Blank lines are separators.
//!
//! 2. **Block Construction** (`builder`): a `BlockBuilder` state machine emits
//!    blocks; a character line switches it into a dialogue group that consumes
//!    the following non-blank lines as dialogue or parenthetical.
//!
//! ## Key Invariants
//!
//! - Import is total: every line becomes a block or is a separator.
//! - Blank lines never materialise as blocks.

pub mod builder;
pub mod classify;

pub use builder::BlockBuilder;
pub use classify::{FountainLineClassifier, LineClass};

use crate::model::Document;

/// Parse plain screenplay text into a document.
pub fn parse_fountain(text: &str) -> Document {
    let mut builder = BlockBuilder::new();
    for line in text.split('\n') {
        builder.push(line);
    }
    let doc = builder.finish();
    log::debug!("Imported {} blocks from plain text", doc.len());
    doc
}

impl Document {
    /// Replace the contents with the parsed plain text. Never fails.
    pub fn import_fountain(&mut self, text: &str) {
        *self = parse_fountain(text);
    }
}
