use std::io::{Cursor, Write};

use html_escape::encode_text;
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

use crate::layout::{LayoutConfig, PageLayout, Twips, style_for};
use crate::model::{Align, Block, Document};

use super::RenderError;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
<Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
</Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#;

pub(crate) const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Render a document to a WordprocessingML package.
///
/// Each block becomes one paragraph carrying its kind's indents, spacing and
/// font. Word reflows the text itself, so only the page breaks are taken from
/// `layout`: blocks that open a page get `pageBreakBefore`.
pub fn render_docx(
    doc: &Document,
    layout: &PageLayout,
    config: &LayoutConfig,
) -> Result<Vec<u8>, RenderError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let parts = [
        ("[Content_Types].xml", CONTENT_TYPES.to_string()),
        ("_rels/.rels", PACKAGE_RELS.to_string()),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS.to_string()),
        ("word/styles.xml", styles_xml(config)),
        ("word/document.xml", document_xml(doc, layout, config)),
    ];
    for (name, body) in parts {
        zip.start_file(name, options)?;
        zip.write_all(body.as_bytes())?;
    }

    let cursor = zip.finish()?;
    log::debug!("Rendered {} blocks to docx", doc.len());
    Ok(cursor.into_inner())
}

fn styles_xml(config: &LayoutConfig) -> String {
    let size = half_points(config.font_size);
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="{W_NS}">
<w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Courier New" w:hAnsi="Courier New" w:cs="Courier New"/><w:sz w:val="{size}"/><w:szCs w:val="{size}"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:before="0" w:after="0"/></w:pPr></w:pPrDefault></w:docDefaults>
<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style>
</w:styles>"#
    )
}

fn document_xml(doc: &Document, layout: &PageLayout, config: &LayoutConfig) -> String {
    let breaks = layout.blocks_starting_page();
    let mut body = String::new();
    for (index, block) in doc.blocks().iter().enumerate() {
        paragraph(&mut body, block, breaks.contains(&index), config);
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{W_NS}"><w:body>{body}<w:sectPr><w:pgSz w:w="{}" w:h="{}"/><w:pgMar w:top="{}" w:right="{}" w:bottom="{}" w:left="{}" w:header="0" w:footer="0" w:gutter="0"/></w:sectPr></w:body></w:document>"#,
        config.page_width().0,
        config.page_height().0,
        config.margin_top().0,
        config.margin_right().0,
        config.margin_bottom().0,
        config.margin_left().0,
    )
}

fn paragraph(out: &mut String, block: &Block, page_break: bool, config: &LayoutConfig) {
    let style = style_for(block.kind, config);
    let indent_left = (style.x - config.margin_left()).max(Twips::ZERO);
    let indent_right =
        (config.page_width() - config.margin_right() - (style.x + style.width)).max(Twips::ZERO);

    out.push_str("<w:p><w:pPr>");
    if page_break {
        out.push_str("<w:pageBreakBefore/>");
    }
    out.push_str(&format!(
        r#"<w:spacing w:before="{}" w:after="0" w:line="{}" w:lineRule="exact"/>"#,
        style.space_before.0, style.line_advance.0
    ));
    out.push_str(&format!(
        r#"<w:ind w:left="{}" w:right="{}"/>"#,
        indent_left.0, indent_right.0
    ));
    if let Some(align) = block.align {
        out.push_str(&format!(r#"<w:jc w:val="{}"/>"#, justification(align)));
    }
    out.push_str("</w:pPr>");

    let text = block.display_text();
    if !text.is_empty() {
        out.push_str("<w:r><w:rPr>");
        if style.bold() {
            out.push_str("<w:b/>");
        }
        if style.italic {
            out.push_str("<w:i/>");
        }
        let size = half_points(style.font_size);
        out.push_str(&format!(r#"<w:sz w:val="{size}"/><w:szCs w:val="{size}"/>"#));
        out.push_str("</w:rPr>");
        for (i, segment) in text.split('\n').enumerate() {
            if i > 0 {
                out.push_str("<w:br/>");
            }
            out.push_str(r#"<w:t xml:space="preserve">"#);
            out.push_str(&encode_text(segment));
            out.push_str("</w:t>");
        }
        out.push_str("</w:r>");
    }

    out.push_str("</w:p>");
}

fn justification(align: Align) -> &'static str {
    match align {
        Align::Left => "left",
        Align::Center => "center",
        Align::Right => "right",
        Align::Justify => "both",
    }
}

fn half_points(size: f32) -> u32 {
    (size * 2.0).round() as u32
}
