//! Structured interchange format.
//!
//! The editor hydrates and persists the block model as a generic node tree:
//!
//! ```json
//! { "type": "doc", "content": [
//!     { "type": "heading", "attrs": { "level": 1 }, "content": [{ "type": "text", "text": "Title" }] },
//!     { "type": "sceneHeading", "content": [{ "type": "text", "text": "INT. HOUSE - DAY" }] }
//! ] }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::{Align, Block, BlockKind, Document};

#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    #[error("Invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A node of the interchange tree. The document root is a node of type `doc`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<Node>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Inline formatting (bold, italic, underline). Carried but not interpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marks: Option<Vec<Value>>,
}

pub type Tree = Node;

const DOC: &str = "doc";
const TEXT: &str = "text";

impl Node {
    fn text_node(text: &str) -> Self {
        Self {
            kind: TEXT.to_string(),
            attrs: None,
            content: None,
            text: Some(text.to_string()),
            marks: None,
        }
    }

    /// Concatenated text of the direct children.
    fn inline_text(&self) -> String {
        self.content
            .iter()
            .flatten()
            .filter_map(|child| child.text.as_deref())
            .collect()
    }

    fn attr(&self, key: &str) -> Option<&Value> {
        self.attrs.as_ref()?.get(key)
    }
}

/// Accepted top-level shapes: the `doc` node or a bare array of block nodes.
#[derive(Deserialize)]
#[serde(untagged)]
enum TreeRepr {
    Root(Node),
    Blocks(Vec<Node>),
}

pub fn to_tree(doc: &Document) -> Tree {
    let content = doc.blocks().iter().map(block_to_node).collect();
    Node {
        kind: DOC.to_string(),
        attrs: None,
        content: Some(content),
        text: None,
        marks: None,
    }
}

/// Build a document from a tree. Total: unknown node types become action.
pub fn from_tree(tree: &Tree) -> Document {
    if tree.kind == DOC {
        tree.content.iter().flatten().map(node_to_block).collect()
    } else {
        Document::from_blocks(vec![node_to_block(tree)])
    }
}

pub fn parse_tree(json: &str) -> Result<Tree, TreeError> {
    let tree = match serde_json::from_str::<TreeRepr>(json)? {
        TreeRepr::Root(node) => node,
        TreeRepr::Blocks(nodes) => Node {
            kind: DOC.to_string(),
            attrs: None,
            content: Some(nodes),
            text: None,
            marks: None,
        },
    };
    Ok(tree)
}

pub fn to_json(doc: &Document) -> Result<String, TreeError> {
    Ok(serde_json::to_string_pretty(&to_tree(doc))?)
}

pub fn from_json(json: &str) -> Result<Document, TreeError> {
    Ok(from_tree(&parse_tree(json)?))
}

fn block_to_node(block: &Block) -> Node {
    let mut attrs = Map::new();
    if let BlockKind::Heading { level } = block.kind {
        attrs.insert("level".to_string(), Value::from(level.get()));
    }
    if let Some(align) = block.align {
        attrs.insert("textAlign".to_string(), Value::from(align.as_str()));
    }

    Node {
        kind: block.kind.type_name().to_string(),
        attrs: (!attrs.is_empty()).then_some(attrs),
        // Empty blocks carry no content array.
        content: (!block.text.is_empty()).then(|| vec![Node::text_node(&block.text)]),
        text: None,
        marks: None,
    }
}

fn node_to_block(node: &Node) -> Block {
    let level = node.attr("level").and_then(Value::as_u64);
    let kind = BlockKind::from_type_name(&node.kind, level).unwrap_or_else(|| {
        log::debug!("Unknown node type {:?} imported as action", node.kind);
        BlockKind::Action
    });
    let align = node
        .attr("textAlign")
        .and_then(Value::as_str)
        .and_then(Align::parse);

    Block {
        kind,
        text: node.inline_text(),
        align,
    }
}

impl Document {
    /// Replace the contents with a parsed JSON tree.
    ///
    /// On invalid JSON the document is left untouched and the error returned
    /// for the caller to surface.
    pub fn import_json(&mut self, json: &str) -> Result<(), TreeError> {
        match from_json(json) {
            Ok(doc) => {
                log::debug!("Imported {} blocks from JSON", doc.len());
                *self = doc;
                Ok(())
            }
            Err(e) => {
                log::warn!("Ignoring JSON import: {e}");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Document {
        Document::from_blocks(vec![
            Block::heading(2, "Act One"),
            Block::scene_heading("INT. HOUSE - DAY"),
            Block::action("").with_align(Align::Center),
            Block::character("JOHN"),
            Block::dialogue("Hello."),
            Block::transition("cut to:"),
        ])
    }

    #[test]
    fn tree_round_trip_is_lossless() {
        let doc = sample();
        assert_eq!(from_tree(&to_tree(&doc)), doc);
        assert_eq!(from_json(&to_json(&doc).unwrap()).unwrap(), doc);
        assert_eq!(from_tree(&to_tree(&doc)).blocks()[5].text, "cut to:");
    }

    #[test]
    fn tree_shape() {
        let value = serde_json::to_value(to_tree(&sample())).unwrap();
        assert_eq!(value["type"], "doc");
        assert_eq!(value["content"][0]["attrs"]["level"], 2);
        assert_eq!(value["content"][1]["content"][0]["text"], "INT. HOUSE - DAY");
        assert_eq!(value["content"][2]["attrs"]["textAlign"], "center");
        assert!(value["content"][2].get("content").is_none());
        assert!(value["content"][1].get("attrs").is_none());
    }

    #[test]
    fn accepts_bare_node_array() {
        let doc = from_json(r#"[{"type":"transition","content":[{"type":"text","text":"CUT TO:"}]}]"#)
            .unwrap();
        assert_eq!(doc.blocks(), &[Block::transition("CUT TO:")]);
    }

    #[test]
    fn concatenates_marked_text_runs() {
        let json = json!({
            "type": "doc",
            "content": [{
                "type": "action",
                "content": [
                    { "type": "text", "text": "He " },
                    { "type": "text", "text": "runs", "marks": [{ "type": "bold" }] },
                    { "type": "text", "text": "." }
                ]
            }]
        });
        let doc = from_json(&json.to_string()).unwrap();
        assert_eq!(doc.blocks(), &[Block::action("He runs.")]);
    }

    #[test]
    fn unknown_types_become_action_and_levels_clamp() {
        let json = json!([
            { "type": "paragraph", "content": [{ "type": "text", "text": "Prose" }] },
            { "type": "heading", "attrs": { "level": 6 } },
            { "type": "heading" }
        ]);
        let doc = from_json(&json.to_string()).unwrap();
        assert_eq!(
            doc.blocks(),
            &[Block::action("Prose"), Block::heading(3, ""), Block::heading(1, "")]
        );
    }

    #[test]
    fn invalid_json_leaves_document_untouched() {
        let mut doc = sample();
        let before = doc.clone();
        assert!(doc.import_json("{ not json").is_err());
        assert!(doc.import_json(r#"{"content": []}"#).is_err());
        assert_eq!(doc, before);
    }

    #[test]
    fn valid_json_replaces_document() {
        let mut doc = sample();
        doc.import_json(r#"{"type":"doc","content":[]}"#).unwrap();
        assert!(doc.is_empty());
    }
}
