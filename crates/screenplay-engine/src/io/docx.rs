use std::io::{Cursor, Read};

use roxmltree::Node;

use super::IoError;
use crate::render::docx::W_NS;

fn is_w(node: Node, name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == name
        && node.tag_name().namespace() == Some(W_NS)
}

/// A paragraph with `w:spacing w:before="0"` continues the previous group.
fn joins_previous(paragraph: Node) -> bool {
    paragraph
        .children()
        .filter(|child| is_w(*child, "pPr"))
        .flat_map(|props| props.children())
        .find(|child| is_w(*child, "spacing"))
        .and_then(|spacing| spacing.attribute((W_NS, "before")))
        .and_then(|before| before.trim().parse::<i64>().ok())
        == Some(0)
}

fn paragraph_text(paragraph: Node) -> String {
    let mut text = String::new();
    for node in paragraph.descendants().filter(Node::is_element) {
        // Paragraphs nested in text boxes are extracted on their own.
        let owner = node.ancestors().skip(1).find(|a| is_w(*a, "p"));
        if owner.map(|p| p.id()) != Some(paragraph.id()) {
            continue;
        }
        if !node.parent_element().is_some_and(|parent| is_w(parent, "r")) {
            continue;
        }
        if is_w(node, "t") {
            text.push_str(node.text().unwrap_or_default());
        } else if is_w(node, "br") || is_w(node, "cr") {
            text.push('\n');
        } else if is_w(node, "tab") {
            text.push('\t');
        }
    }
    text
}

/// Pull the paragraph text out of a `.docx` package as plain screenplay text.
///
/// Paragraphs with zero spacing before them continue the previous group on the
/// next line; every other paragraph is preceded by a blank line. This keeps
/// dialogue groups written by [`render_docx`](crate::render::render_docx)
/// together when the text goes back through the plain-text importer.
pub fn extract_docx_text(bytes: &[u8]) -> Result<String, IoError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")?
        .read_to_string(&mut xml)?;
    let doc = roxmltree::Document::parse(&xml)?;

    let mut out = String::new();
    for (index, paragraph) in doc
        .descendants()
        .filter(|node| is_w(*node, "p"))
        .enumerate()
    {
        if index > 0 {
            out.push_str(if joins_previous(paragraph) { "\n" } else { "\n\n" });
        }
        out.push_str(&paragraph_text(paragraph));
    }

    log::debug!("Extracted {} bytes of text from docx", out.len());
    Ok(out)
}
