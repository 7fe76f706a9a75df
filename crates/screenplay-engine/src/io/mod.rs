pub mod docx;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub use docx::extract_docx_text;

use crate::layout::LayoutConfig;
use crate::model::Document;
use crate::parsing::parse_fountain;
use crate::render::RenderError;
use crate::tree::{TreeError, from_json, to_json};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error(transparent)]
    Tree(#[from] TreeError),
    #[error("Render failed: {0}")]
    Render(#[from] RenderError),
    #[error("Invalid docx package: {0}")]
    Docx(#[from] zip::result::ZipError),
    #[error("Invalid docx document part: {0}")]
    Xml(#[from] roxmltree::Error),
}

/// File formats a document moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Fountain-like plain text (`.fountain`, `.txt`).
    Fountain,
    /// Structured node tree (`.json`).
    Json,
    Pdf,
    Docx,
}

impl Format {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "fountain" | "txt" => Some(Format::Fountain),
            "json" => Some(Format::Json),
            "pdf" => Some(Format::Pdf),
            "docx" => Some(Format::Docx),
            _ => None,
        }
    }

    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, IoError> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_name)
            .ok_or_else(|| IoError::UnsupportedFormat(path.display().to_string()))
    }

    pub fn extension(self) -> &'static str {
        match self {
            Format::Fountain => "fountain",
            Format::Json => "json",
            Format::Pdf => "pdf",
            Format::Docx => "docx",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Read a document from disk, choosing the importer by extension.
///
/// Plain text is decoded lossily so that any byte sequence imports. PDF input
/// is not supported.
pub fn read_document(path: &Path) -> Result<Document, IoError> {
    let format = Format::from_path(path)?;
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }

    let doc = match format {
        Format::Fountain => parse_fountain(&String::from_utf8_lossy(&fs::read(path)?)),
        Format::Json => from_json(&fs::read_to_string(path)?)?,
        Format::Docx => parse_fountain(&extract_docx_text(&fs::read(path)?)?),
        Format::Pdf => return Err(IoError::UnsupportedFormat("pdf import".to_string())),
    };
    log::debug!("Read {} blocks from {}", doc.len(), path.display());
    Ok(doc)
}

/// Serialize a document into `format`.
pub fn export_bytes(
    doc: &Document,
    format: Format,
    config: &LayoutConfig,
) -> Result<Vec<u8>, IoError> {
    Ok(match format {
        Format::Fountain => doc.to_fountain().into_bytes(),
        Format::Json => to_json(doc)?.into_bytes(),
        Format::Pdf => doc.to_pdf(config),
        Format::Docx => doc.to_docx(config)?,
    })
}

/// Write a document to disk in `format`, creating parent directories.
pub fn write_document(
    doc: &Document,
    path: &Path,
    format: Format,
    config: &LayoutConfig,
) -> Result<(), IoError> {
    let bytes = export_bytes(doc, format, config)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, bytes)?;
    log::info!("Wrote {} ({format})", path.display());
    Ok(())
}

impl Document {
    /// Replace the contents with the document read from `path`. On any error
    /// the document is left as it was.
    pub fn import_file(&mut self, path: &Path) -> Result<(), IoError> {
        *self = read_document(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::model::Block;

    fn sample() -> Document {
        Document::from_blocks(vec![
            Block::scene_heading("INT. HOUSE - DAY"),
            Block::action("Rain hammers the window."),
            Block::character("JOHN"),
            Block::parenthetical("quietly"),
            Block::dialogue("Not again."),
            Block::transition("CUT TO:"),
        ])
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(Format::from_path(Path::new("a.fountain")).unwrap(), Format::Fountain);
        assert_eq!(Format::from_path(Path::new("a.TXT")).unwrap(), Format::Fountain);
        assert_eq!(Format::from_path(Path::new("dir/a.json")).unwrap(), Format::Json);
        assert_eq!(Format::from_path(Path::new("a.docx")).unwrap(), Format::Docx);
        assert!(matches!(
            Format::from_path(Path::new("a.rtf")),
            Err(IoError::UnsupportedFormat(_))
        ));
        assert!(Format::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn fountain_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/script.fountain");
        let config = LayoutConfig::default();

        write_document(&sample(), &path, Format::Fountain, &config).unwrap();
        assert_eq!(read_document(&path).unwrap(), sample());
    }

    #[test]
    fn json_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("script.json");
        let config = LayoutConfig::default();

        write_document(&sample(), &path, Format::Json, &config).unwrap();
        assert_eq!(read_document(&path).unwrap(), sample());
    }

    #[test]
    fn docx_export_reimports_as_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("script.docx");
        let config = LayoutConfig::default();

        write_document(&sample(), &path, Format::Docx, &config).unwrap();
        assert_eq!(read_document(&path).unwrap(), sample());
    }

    #[test]
    fn pdf_is_export_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("script.pdf");
        let config = LayoutConfig::default();

        write_document(&sample(), &path, Format::Pdf, &config).unwrap();
        assert!(fs::read(&path).unwrap().starts_with(b"%PDF-"));
        assert!(matches!(
            read_document(&path),
            Err(IoError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn missing_file_is_not_found() {
        let result = read_document(Path::new("/this/path/does/not/exist.fountain"));
        assert!(matches!(result, Err(IoError::NotFound(_))));
    }

    #[test]
    fn non_utf8_text_still_imports() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("junk.txt");
        fs::write(&path, b"Hello \xff\xfe world\n\nINT. ROOM").unwrap();

        let doc = read_document(&path).unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.get(1), Some(&Block::scene_heading("INT. ROOM")));
    }

    #[test]
    fn failed_import_leaves_document_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let mut doc = sample();
        let result = doc.import_file(&path);
        assert!(matches!(result, Err(IoError::Tree(_))));
        assert_eq!(doc, sample());
    }
}
