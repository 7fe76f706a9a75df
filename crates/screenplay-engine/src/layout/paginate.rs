use crate::model::{Align, Block};

use super::{
    LayoutConfig, LayoutItem, PageLayout, PlacedLine,
    style::{BlockStyle, style_for},
    units::Twips,
    wrap::wrap,
};

/// Vertical cursor over a sequence of fixed-size pages.
pub struct Paginator<'a> {
    config: &'a LayoutConfig,
    top: Twips,
    limit: Twips,
    cursor: Twips,
    page: usize,
    items: Vec<LayoutItem>,
}

impl<'a> Paginator<'a> {
    pub fn new(config: &'a LayoutConfig) -> Self {
        let top = config.margin_top();
        Self {
            config,
            top,
            limit: config.content_bottom(),
            cursor: top,
            page: 0,
            items: vec![],
        }
    }

    fn at_page_top(&self) -> bool {
        self.cursor == self.top
    }

    fn fits(&self, advance: Twips) -> bool {
        self.cursor + advance <= self.limit
    }

    fn break_page(&mut self) {
        self.items.push(LayoutItem::PageBreak);
        self.page += 1;
        self.cursor = self.top;
    }

    pub fn place(&mut self, index: usize, block: &Block) {
        let style = style_for(block.kind, self.config);

        // Leading space is dropped at the top of a page.
        if !self.at_page_top() {
            if self.fits(style.space_before) {
                self.cursor += style.space_before;
            } else {
                self.break_page();
            }
        }

        for text in wrap(&block.display_text(), style.columns()) {
            // A line taller than the whole page still goes on the fresh page.
            if !self.fits(style.line_advance) && !self.at_page_top() {
                self.break_page();
            }
            self.items.push(LayoutItem::Line(PlacedLine {
                block: index,
                page: self.page,
                x: aligned_x(&style, block.align, &text),
                y: self.cursor,
                text,
                style,
            }));
            self.cursor += style.line_advance;
        }
    }

    pub fn finish(self) -> PageLayout {
        PageLayout {
            items: self.items,
            page_count: self.page + 1,
        }
    }
}

fn aligned_x(style: &BlockStyle, align: Option<Align>, text: &str) -> Twips {
    let glyphs = i32::try_from(text.chars().count()).unwrap_or(i32::MAX);
    let used = Twips(style.char_width().0.saturating_mul(glyphs));
    let slack = (style.width - used).max(Twips::ZERO);
    match align {
        Some(Align::Center) => style.x + Twips(slack.0 / 2),
        Some(Align::Right) => style.x + slack,
        Some(Align::Left | Align::Justify) | None => style.x,
    }
}
