//! # Block Model
//!
//! A screenplay is a [`Document`]: an ordered list of typed [`Block`]s. Order is
//! significant; dialogue and parentheticals belong to the nearest preceding
//! character block by position only.
//!
//! - **`block`**: `Block`, `BlockKind`, `HeadingLevel`, `Align`
//! - **`document`**: `Document` and the `Cmd` edits applied to it
//! - **`input_rules`**: typing shortcuts that convert a block's kind

pub mod block;
pub mod document;
pub mod input_rules;

pub use block::{Align, Block, BlockKind, HeadingLevel};
pub use document::{Cmd, Document, EditError};
pub use input_rules::apply_input_rule;
