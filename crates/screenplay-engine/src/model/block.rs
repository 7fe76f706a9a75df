/// Heading level for generic document headings, always within 1..=3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 3;

    /// Create a heading level, clamping out-of-range values into 1..=3.
    pub fn new(level: u8) -> Self {
        Self(level.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for HeadingLevel {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

/// The type of a screenplay block.
///
/// Every place that dispatches on block type matches on this enum
/// exhaustively, so a new kind cannot silently fall through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// `INT. HOUSE - DAY`
    SceneHeading,
    /// Description of what happens on screen.
    Action,
    /// Name of the speaking character; opens a dialogue group.
    Character,
    /// Spoken line belonging to the preceding character.
    Dialogue,
    /// Direction such as `(whispering)` inside a dialogue group.
    Parenthetical,
    /// `CUT TO:`
    Transition,
    /// Generic document title or section heading.
    Heading { level: HeadingLevel },
}

impl BlockKind {
    /// The six screenplay kinds in toolbar order.
    pub const SCREENPLAY: [BlockKind; 6] = [
        BlockKind::SceneHeading,
        BlockKind::Action,
        BlockKind::Character,
        BlockKind::Dialogue,
        BlockKind::Parenthetical,
        BlockKind::Transition,
    ];

    pub fn heading(level: u8) -> Self {
        BlockKind::Heading {
            level: HeadingLevel::new(level),
        }
    }

    /// Node type name used by the structured tree format.
    pub fn type_name(self) -> &'static str {
        match self {
            BlockKind::SceneHeading => "sceneHeading",
            BlockKind::Action => "action",
            BlockKind::Character => "character",
            BlockKind::Dialogue => "dialogue",
            BlockKind::Parenthetical => "parenthetical",
            BlockKind::Transition => "transition",
            BlockKind::Heading { .. } => "heading",
        }
    }

    /// Resolve a tree node type name. Headings take their level from `level`
    /// (default 1). Unknown names resolve to `None`.
    pub fn from_type_name(name: &str, level: Option<u64>) -> Option<Self> {
        let kind = match name {
            "sceneHeading" => BlockKind::SceneHeading,
            "action" => BlockKind::Action,
            "character" => BlockKind::Character,
            "dialogue" => BlockKind::Dialogue,
            "parenthetical" => BlockKind::Parenthetical,
            "transition" => BlockKind::Transition,
            "heading" => {
                let level = level.unwrap_or(1).min(u64::from(HeadingLevel::MAX)) as u8;
                BlockKind::heading(level)
            }
            _ => return None,
        };
        Some(kind)
    }

    /// Keyboard shortcut shown in the editor toolbar.
    pub fn shortcut(self) -> Option<&'static str> {
        match self {
            BlockKind::SceneHeading => Some("Ctrl+1"),
            BlockKind::Action => Some("Ctrl+2"),
            BlockKind::Character => Some("Ctrl+3"),
            BlockKind::Dialogue => Some("Ctrl+4"),
            BlockKind::Parenthetical => Some("Ctrl+5"),
            BlockKind::Transition => Some("Ctrl+6"),
            BlockKind::Heading { .. } => None,
        }
    }

    /// Kinds whose text is always rendered upper-case.
    pub fn renders_uppercase(self) -> bool {
        matches!(
            self,
            BlockKind::SceneHeading | BlockKind::Character | BlockKind::Transition
        )
    }

    /// Kinds that live inside a character's dialogue group.
    pub fn is_dialogue_part(self) -> bool {
        matches!(self, BlockKind::Dialogue | BlockKind::Parenthetical)
    }
}

/// Paragraph alignment. Presentation only; the plain-text format drops it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Align {
    Left,
    Center,
    Right,
    Justify,
}

impl Align {
    pub fn as_str(self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
            Align::Justify => "justify",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "left" => Some(Align::Left),
            "center" => Some(Align::Center),
            "right" => Some(Align::Right),
            "justify" => Some(Align::Justify),
            _ => None,
        }
    }
}

/// One semantic unit of screenplay text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub text: String,
    pub align: Option<Align>,
}

impl Block {
    pub fn new(kind: BlockKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            align: None,
        }
    }

    pub fn scene_heading(text: impl Into<String>) -> Self {
        Self::new(BlockKind::SceneHeading, text)
    }

    pub fn action(text: impl Into<String>) -> Self {
        Self::new(BlockKind::Action, text)
    }

    pub fn character(text: impl Into<String>) -> Self {
        Self::new(BlockKind::Character, text)
    }

    pub fn dialogue(text: impl Into<String>) -> Self {
        Self::new(BlockKind::Dialogue, text)
    }

    pub fn parenthetical(text: impl Into<String>) -> Self {
        Self::new(BlockKind::Parenthetical, text)
    }

    pub fn transition(text: impl Into<String>) -> Self {
        Self::new(BlockKind::Transition, text)
    }

    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self::new(BlockKind::heading(level), text)
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    /// Text as it appears on the page: upper-cased for scene headings,
    /// characters and transitions, parenthesised for parentheticals.
    pub fn display_text(&self) -> String {
        match self.kind {
            BlockKind::Parenthetical => format!("({})", self.text),
            kind if kind.renders_uppercase() => self.text.to_uppercase(),
            _ => self.text.clone(),
        }
    }

    /// Whether two blocks print the same. Scene headings, characters and
    /// transitions are printed upper-case, so their text compares
    /// case-insensitively.
    pub fn equivalent(&self, other: &Self) -> bool {
        if self.kind != other.kind || self.align != other.align {
            return false;
        }
        if self.kind.renders_uppercase() {
            self.text.to_uppercase() == other.text.to_uppercase()
        } else {
            self.text == other.text
        }
    }
}
