use std::sync::OnceLock;

use regex::Regex;

use crate::model::{Block, BlockKind};

/// Classification of a single non-blank line.
///
/// Classification is local: each line is classified without reference to its
/// neighbours. Grouping dialogue under a character happens in the builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineClass {
    pub kind: BlockKind,
    /// Text after marker punctuation (`> `, parentheses, `#`) is stripped.
    pub text: String,
}

impl LineClass {
    fn new(kind: BlockKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// A character line starts a dialogue group.
    pub fn opens_dialogue(&self) -> bool {
        self.kind == BlockKind::Character
    }

    pub fn into_block(self) -> Block {
        Block::new(self.kind, self.text)
    }
}

/// A classification rule: returns `Some` when the (right-trimmed) line matches.
struct Rule {
    name: &'static str,
    apply: fn(&str) -> Option<LineClass>,
}

/// Rules in priority order; the first match wins.
const RULES: &[Rule] = &[
    Rule {
        name: "scene heading",
        apply: scene_heading,
    },
    Rule {
        name: "transition (arrow)",
        apply: arrow_transition,
    },
    Rule {
        name: "transition (suffix)",
        apply: suffix_transition,
    },
    Rule {
        name: "parenthetical",
        apply: parenthetical,
    },
    Rule {
        name: "character",
        apply: character,
    },
    Rule {
        name: "heading",
        apply: heading,
    },
];

/// Classifies raw lines of Fountain-like plain text.
pub struct FountainLineClassifier;

impl FountainLineClassifier {
    /// Classifies a top-level line. Blank lines are separators and yield `None`.
    ///
    /// Total: anything that matches no rule is action.
    pub fn classify(&self, raw: &str) -> Option<LineClass> {
        let line = raw.trim_end();
        if line.is_empty() {
            return None;
        }

        let class = RULES
            .iter()
            .find_map(|rule| {
                let class = (rule.apply)(line)?;
                log::trace!("{line:?} matched {} rule", rule.name);
                Some(class)
            })
            .unwrap_or_else(|| LineClass::new(BlockKind::Action, line));
        Some(class)
    }

    /// Classifies a line inside a character's dialogue group: parenthetical
    /// when wrapped in parentheses, dialogue otherwise. Blank lines end the
    /// group and yield `None`.
    pub fn classify_in_dialogue(&self, raw: &str) -> Option<LineClass> {
        let line = raw.trim();
        if line.is_empty() {
            return None;
        }
        Some(
            parenthetical(line).unwrap_or_else(|| LineClass::new(BlockKind::Dialogue, line)),
        )
    }
}

fn scene_heading(line: &str) -> Option<LineClass> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"(?i)^(INT\.|EXT\.|INT\./EXT\.)").expect("Invalid scene heading regex")
    });
    re.is_match(line)
        .then(|| LineClass::new(BlockKind::SceneHeading, line))
}

fn arrow_transition(line: &str) -> Option<LineClass> {
    line.strip_prefix("> ")
        .map(|rest| LineClass::new(BlockKind::Transition, rest.trim()))
}

fn suffix_transition(line: &str) -> Option<LineClass> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^[A-Z\s]+TO:$").expect("Invalid transition regex"));
    let trimmed = line.trim();
    re.is_match(trimmed)
        .then(|| LineClass::new(BlockKind::Transition, trimmed))
}

fn parenthetical(line: &str) -> Option<LineClass> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^\(.*\)$").expect("Invalid parenthetical regex"));
    let trimmed = line.trim();
    re.is_match(trimmed).then(|| {
        let inner = &trimmed[1..trimmed.len() - 1];
        LineClass::new(BlockKind::Parenthetical, inner)
    })
}

fn character(line: &str) -> Option<LineClass> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re =
        RE.get_or_init(|| Regex::new(r"^[A-Z][A-Z\s.'-]{1,}$").expect("Invalid character regex"));
    let trimmed = line.trim();
    (re.is_match(trimmed) && !line.starts_with("> "))
        .then(|| LineClass::new(BlockKind::Character, trimmed))
}

fn heading(line: &str) -> Option<LineClass> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^(#{1,3})\s+(.*)").expect("Invalid heading regex"));
    let caps = re.captures(line)?;
    let level = caps[1].len() as u8;
    Some(LineClass::new(BlockKind::heading(level), &caps[2]))
}
