//! # Layout Engine
//!
//! Maps each block to positioned, word-wrapped lines on fixed-size pages using
//! industry screenplay geometry (Courier 12 pt, US Letter, 1.5 in binding
//! margin). The result is renderer-agnostic: the PDF renderer places lines at
//! their coordinates, the Word renderer turns block styles into paragraph
//! properties and page breaks into `pageBreakBefore`.
//!
//! ## Modules
//!
//! - **`units`**: `Twips`, the integer length all geometry is computed in
//! - **`style`**: per-kind `BlockStyle` (offset, width, spacing, font)
//! - **`wrap`**: greedy word wrap with guaranteed forward progress
//! - **`paginate`**: `Paginator`, the vertical cursor that emits page breaks

pub mod paginate;
pub mod style;
pub mod units;
pub mod wrap;

use serde::{Deserialize, Serialize};

pub use paginate::Paginator;
pub use style::{BlockStyle, FontWeight, style_for};
pub use units::Twips;

use crate::model::Document;

/// Page geometry. Lengths are in inches, font size in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub line_height: f32,
    pub font_size: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_width: 8.5,
            page_height: 11.0,
            margin_left: 1.5,
            margin_right: 1.0,
            margin_top: 1.0,
            margin_bottom: 1.0,
            line_height: 0.2,
            font_size: 12.0,
        }
    }
}

impl LayoutConfig {
    pub fn page_width(&self) -> Twips {
        Twips::from_inches(self.page_width)
    }

    pub fn page_height(&self) -> Twips {
        Twips::from_inches(self.page_height)
    }

    pub fn margin_left(&self) -> Twips {
        Twips::from_inches(self.margin_left)
    }

    pub fn margin_right(&self) -> Twips {
        Twips::from_inches(self.margin_right)
    }

    pub fn margin_top(&self) -> Twips {
        Twips::from_inches(self.margin_top)
    }

    pub fn margin_bottom(&self) -> Twips {
        Twips::from_inches(self.margin_bottom)
    }

    pub fn line_height(&self) -> Twips {
        Twips::from_inches(self.line_height)
    }

    /// Width between the left and right margins.
    pub fn usable_width(&self) -> Twips {
        self.page_width() - self.margin_left() - self.margin_right()
    }

    /// Lowest point a line may reach: page height minus bottom margin.
    pub fn content_bottom(&self) -> Twips {
        self.page_height() - self.margin_bottom()
    }
}

/// A wrapped line at its final position.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    /// Index of the source block in the document.
    pub block: usize,
    /// Zero-based page number.
    pub page: usize,
    /// Distance from the page's left edge.
    pub x: Twips,
    /// Top of the line box, measured from the page's top edge.
    pub y: Twips,
    pub text: String,
    pub style: BlockStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutItem {
    /// Following lines start a new page at the top margin.
    PageBreak,
    Line(PlacedLine),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub items: Vec<LayoutItem>,
    /// Always at least one, even for an empty document.
    pub page_count: usize,
}

impl PageLayout {
    pub fn lines(&self) -> impl Iterator<Item = &PlacedLine> {
        self.items.iter().filter_map(|item| match item {
            LayoutItem::Line(line) => Some(line),
            LayoutItem::PageBreak => None,
        })
    }

    pub fn lines_on_page(&self, page: usize) -> impl Iterator<Item = &PlacedLine> {
        self.lines().filter(move |line| line.page == page)
    }

    /// Indexes of blocks whose first line opens a page after the first.
    pub fn blocks_starting_page(&self) -> Vec<usize> {
        let mut out = Vec::new();
        let mut after_break = false;
        let mut last_block = None;
        for item in &self.items {
            match item {
                LayoutItem::PageBreak => after_break = true,
                LayoutItem::Line(line) => {
                    if after_break && last_block != Some(line.block) {
                        out.push(line.block);
                    }
                    after_break = false;
                    last_block = Some(line.block);
                }
            }
        }
        out
    }
}

/// Lay out a whole document. Deterministic and total.
pub fn layout_document(doc: &Document, config: &LayoutConfig) -> PageLayout {
    let mut paginator = Paginator::new(config);
    for (index, block) in doc.blocks().iter().enumerate() {
        paginator.place(index, block);
    }
    let layout = paginator.finish();
    log::debug!(
        "Laid out {} blocks on {} pages",
        doc.len(),
        layout.page_count
    );
    layout
}
