use crate::model::BlockKind;

use super::{LayoutConfig, units::Twips};

/// Courier advances 0.6 em per glyph: 10 columns per inch at 12 pt.
const COURIER_ADVANCE_EM: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Normal,
    Bold,
}

/// Geometry and font of a block kind on the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockStyle {
    /// Left edge of the text column, measured from the page's left edge.
    pub x: Twips,
    /// Column width used as the word-wrap budget.
    pub width: Twips,
    pub space_before: Twips,
    /// Vertical advance of each wrapped line.
    pub line_advance: Twips,
    pub weight: FontWeight,
    pub italic: bool,
    /// Font size in points.
    pub font_size: f32,
}

impl BlockStyle {
    pub fn bold(&self) -> bool {
        self.weight == FontWeight::Bold
    }

    /// Width of one monospaced glyph at this style's font size.
    pub fn char_width(&self) -> Twips {
        Twips::from_points(self.font_size * COURIER_ADVANCE_EM).max(Twips(1))
    }

    /// Number of glyphs that fit in the column; at least one.
    pub fn columns(&self) -> usize {
        (self.width.0 / self.char_width().0).max(1) as usize
    }
}

/// Industry screenplay geometry for each block kind.
pub fn style_for(kind: BlockKind, config: &LayoutConfig) -> BlockStyle {
    let left = config.margin_left();
    let usable = config.usable_width();
    let body = BlockStyle {
        x: left,
        width: usable,
        space_before: Twips::ZERO,
        line_advance: config.line_height(),
        weight: FontWeight::Normal,
        italic: false,
        font_size: config.font_size,
    };

    match kind {
        BlockKind::SceneHeading => BlockStyle {
            weight: FontWeight::Bold,
            space_before: Twips::from_inches(0.3),
            ..body
        },
        BlockKind::Action => BlockStyle {
            space_before: Twips::from_inches(0.15),
            ..body
        },
        BlockKind::Character => BlockStyle {
            x: Twips::from_inches(3.7),
            width: Twips::from_inches(3.0),
            weight: FontWeight::Bold,
            space_before: Twips::from_inches(0.3),
            ..body
        },
        BlockKind::Dialogue => BlockStyle {
            x: Twips::from_inches(2.5),
            width: Twips::from_inches(3.5),
            ..body
        },
        BlockKind::Parenthetical => BlockStyle {
            x: Twips::from_inches(3.1),
            width: Twips::from_inches(2.5),
            italic: true,
            ..body
        },
        BlockKind::Transition => BlockStyle {
            x: Twips::from_inches(5.5),
            width: Twips::from_inches(2.0),
            weight: FontWeight::Bold,
            space_before: Twips::from_inches(0.3),
            ..body
        },
        BlockKind::Heading { level } => {
            let font_size = match level.get() {
                1 => 18.0,
                2 => 15.0,
                _ => 13.0,
            };
            BlockStyle {
                weight: FontWeight::Bold,
                space_before: Twips::from_inches(0.4),
                font_size,
                line_advance: body.line_advance.max(Twips::from_points(font_size * 1.2)),
                ..body
            }
        }
    }
}
