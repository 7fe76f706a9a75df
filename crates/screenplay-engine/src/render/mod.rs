//! Page renderers.
//!
//! Both renderers consume a [`PageLayout`](crate::layout::PageLayout): the PDF
//! writer places every wrapped line at its computed position, the Word writer
//! emits one styled paragraph per block and uses the layout only for page
//! breaks.

pub mod docx;
pub mod pdf;

use thiserror::Error;

pub use docx::render_docx;
pub use pdf::render_pdf;

use crate::layout::{LayoutConfig, layout_document};
use crate::model::Document;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to build docx package: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Failed to write rendered output: {0}")]
    Io(#[from] std::io::Error),
}

impl Document {
    /// Lay out and render to PDF bytes.
    pub fn to_pdf(&self, config: &LayoutConfig) -> Vec<u8> {
        render_pdf(&layout_document(self, config), config)
    }

    /// Lay out and render to a `.docx` package.
    pub fn to_docx(&self, config: &LayoutConfig) -> Result<Vec<u8>, RenderError> {
        render_docx(self, &layout_document(self, config), config)
    }
}
