// Document Emitter: renders optimized resume text as DOCX and PDF files.
// Rendering is blocking file I/O and must run inside tokio::task::spawn_blocking.

use std::path::Path;

use thiserror::Error;

mod docx;
pub mod metrics;
pub mod pdf;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("DOCX packaging failed: {0}")]
    Docx(String),

    #[error("PDF rendering failed: {0}")]
    Pdf(String),
}

/// Downloadable output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Docx,
    Pdf,
}

impl DocumentFormat {
    pub const ALL: [DocumentFormat; 2] = [DocumentFormat::Docx, DocumentFormat::Pdf];

    /// Parses a path segment; only the exact lowercase names are accepted.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "docx" => Some(DocumentFormat::Docx),
            "pdf" => Some(DocumentFormat::Pdf),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            DocumentFormat::Docx => "docx",
            DocumentFormat::Pdf => "pdf",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            DocumentFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            DocumentFormat::Pdf => "application/pdf",
        }
    }
}

/// Writes `text` to `path` in the given format, replacing any existing file.
pub fn write_document(format: DocumentFormat, text: &str, path: &Path) -> Result<(), RenderError> {
    match format {
        DocumentFormat::Docx => docx::write_docx(text, path),
        DocumentFormat::Pdf => pdf::write_pdf(text, path),
    }
}

/// Splits on `\n` keeping blank lines (including a trailing one); drops a `\r` before each break.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line))
}
