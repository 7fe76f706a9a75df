//! Typing shortcuts that convert the block under the cursor.
//!
//! A rule fires only when the marker and the space typed after it are the
//! whole block text. Markers (`@`, `(`, `INT.`, `EXT.`) are removed; a
//! transition keeps the `... TO:` text that triggered it.

use std::sync::OnceLock;

use regex::Regex;

use super::block::{Block, BlockKind};

fn scene_heading_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(INT\.|EXT\.|INT\./EXT\.)\s$").expect("Invalid scene heading input regex")
    })
}

fn character_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^@\s$").expect("Invalid character input regex"))
}

fn parenthetical_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\(\s$").expect("Invalid parenthetical input regex"))
}

fn transition_suffix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.+TO:)\s$").expect("Invalid transition input regex"))
}

/// Returns the converted block if one of the input rules matches.
///
/// Blocks that already have the target kind are left alone.
pub fn apply_input_rule(block: &Block) -> Option<Block> {
    let text = block.text.as_str();

    let (kind, new_text) = if scene_heading_marker().is_match(text) {
        (BlockKind::SceneHeading, String::new())
    } else if let Some(caps) = transition_suffix().captures(text) {
        (BlockKind::Transition, caps[1].to_string())
    } else if character_marker().is_match(text) {
        (BlockKind::Character, String::new())
    } else if parenthetical_marker().is_match(text) {
        (BlockKind::Parenthetical, String::new())
    } else {
        return None;
    };

    if kind == block.kind {
        return None;
    }

    Some(Block {
        kind,
        text: new_text,
        align: block.align,
    })
}
