pub mod export;
pub mod io;
pub mod layout;
pub mod model;
pub mod parsing;
pub mod render;
pub mod tree;

// Re-export key types for easier usage
pub use export::to_fountain;
pub use io::{Format, IoError, read_document, write_document};
pub use layout::{LayoutConfig, PageLayout, layout_document};
pub use model::*;
pub use parsing::parse_fountain;
pub use render::{RenderError, render_docx, render_pdf};
pub use tree::{Node, Tree, TreeError, from_json, from_tree, to_json, to_tree};
