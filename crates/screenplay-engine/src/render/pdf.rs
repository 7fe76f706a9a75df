use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::layout::{BlockStyle, LayoutConfig, PageLayout};

/// Built-in Type 1 Courier faces, indexed by `font_index`.
const FONTS: [(&[u8], &[u8]); 4] = [
    (b"F1", b"Courier"),
    (b"F2", b"Courier-Bold"),
    (b"F3", b"Courier-Oblique"),
    (b"F4", b"Courier-BoldOblique"),
];

/// Baseline sits this fraction of the font size below the top of the line box.
const BASELINE_EM: f32 = 0.8;

fn font_index(style: &BlockStyle) -> usize {
    match (style.bold(), style.italic) {
        (false, false) => 0,
        (true, false) => 1,
        (false, true) => 2,
        (true, true) => 3,
    }
}

/// Render a laid-out document to PDF bytes, one PDF page per layout page.
pub fn render_pdf(layout: &PageLayout, config: &LayoutConfig) -> Vec<u8> {
    let mut alloc = Ref::new(1);
    let catalog_id = alloc.bump();
    let page_tree_id = alloc.bump();
    let info_id = alloc.bump();
    let font_ids: Vec<Ref> = FONTS.iter().map(|_| alloc.bump()).collect();
    let page_ids: Vec<Ref> = (0..layout.page_count).map(|_| alloc.bump()).collect();
    let content_ids: Vec<Ref> = (0..layout.page_count).map(|_| alloc.bump()).collect();

    let page_width = config.page_width().points();
    let page_height = config.page_height().points();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id)
        .kids(page_ids.iter().copied())
        .count(layout.page_count as i32);
    pdf.document_info(info_id)
        .producer(TextStr("screenplay-studio"));

    for ((_, base_font), id) in FONTS.iter().zip(&font_ids) {
        pdf.type1_font(*id)
            .base_font(Name(base_font))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    for (page_index, (page_id, content_id)) in page_ids.iter().zip(&content_ids).enumerate() {
        {
            let mut page = pdf.page(*page_id);
            page.media_box(Rect::new(0.0, 0.0, page_width, page_height));
            page.parent(page_tree_id);
            page.contents(*content_id);
            let mut resources = page.resources();
            let mut fonts = resources.fonts();
            for ((name, _), id) in FONTS.iter().zip(&font_ids) {
                fonts.pair(Name(name), *id);
            }
            fonts.finish();
            resources.finish();
            page.finish();
        }

        let mut content = Content::new();
        for line in layout.lines_on_page(page_index) {
            if line.text.is_empty() {
                continue;
            }
            let (name, _) = FONTS[font_index(&line.style)];
            let baseline =
                page_height - line.y.points() - line.style.font_size * BASELINE_EM;
            content.begin_text();
            content.set_font(Name(name), line.style.font_size);
            content.next_line(line.x.points(), baseline);
            content.show(Str(&encode_win_ansi(&line.text)));
            content.end_text();
        }
        pdf.stream(*content_id, &content.finish());
    }

    pdf.finish()
}

/// Map text to single-byte WinAnsi codes; characters WinAnsi lacks become `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' | '\u{a0}'..='\u{ff}' => c as u8,
            '€' => 0x80,
            '‚' => 0x82,
            'ƒ' => 0x83,
            '„' => 0x84,
            '…' => 0x85,
            '†' => 0x86,
            '‡' => 0x87,
            'ˆ' => 0x88,
            '‰' => 0x89,
            'Š' => 0x8a,
            '‹' => 0x8b,
            'Œ' => 0x8c,
            'Ž' => 0x8e,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '˜' => 0x98,
            '™' => 0x99,
            'š' => 0x9a,
            '›' => 0x9b,
            'œ' => 0x9c,
            'ž' => 0x9e,
            'Ÿ' => 0x9f,
            _ => b'?',
        })
        .collect()
}
