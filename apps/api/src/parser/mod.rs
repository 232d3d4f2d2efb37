//! Resume Parser — extracts plain text from an uploaded PDF or DOCX file.
//!
//! The format is decided once at the boundary (`ResumeFormat::from_file_name`);
//! extraction is then a match over the closed enum. Both extractors are
//! CPU-bound and synchronous; async callers must use `spawn_blocking`.

use bytes::Bytes;
use thiserror::Error;

mod docx;
mod pdf;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Unsupported file format. Please upload a PDF or DOCX file.")]
    UnsupportedFormat,

    #[error("PDF text extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX read failed: {0}")]
    Docx(String),
}

/// Supported resume upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Pdf,
    Docx,
}

impl ResumeFormat {
    /// Picks the format from the file name suffix (case-insensitive).
    pub fn from_file_name(file_name: &str) -> Result<Self, ParseError> {
        let lower = file_name.trim().to_ascii_lowercase();
        if lower.ends_with(".pdf") {
            Ok(ResumeFormat::Pdf)
        } else if lower.ends_with(".docx") {
            Ok(ResumeFormat::Docx)
        } else {
            Err(ParseError::UnsupportedFormat)
        }
    }
}

/// A resume as received from the client. Lives for one request only.
#[derive(Debug, Clone)]
pub struct UploadedResume {
    pub file_name: String,
    pub content: Bytes,
}

impl UploadedResume {
    pub fn format(&self) -> Result<ResumeFormat, ParseError> {
        ResumeFormat::from_file_name(&self.file_name)
    }
}

/// Extracts the resume's text. Empty output is not an error here.
pub fn extract_text(resume: &UploadedResume) -> Result<String, ParseError> {
    match resume.format()? {
        ResumeFormat::Pdf => pdf::extract_text(&resume.content),
        ResumeFormat::Docx => docx::extract_text(&resume.content),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::io::Cursor;

    use docx_rs::{Docx, Paragraph, Run};

    /// Builds an in-memory DOCX with one paragraph per entry.
    pub fn docx_with_paragraphs(paragraphs: &[&str]) -> Vec<u8> {
        let mut doc = Docx::new();
        for text in paragraphs {
            doc = doc.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)));
        }
        let mut cursor = Cursor::new(Vec::new());
        doc.build().pack(&mut cursor).unwrap();
        cursor.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(file_name: &str, content: Vec<u8>) -> UploadedResume {
        UploadedResume {
            file_name: file_name.to_string(),
            content: Bytes::from(content),
        }
    }

    #[test]
    fn test_format_from_pdf_suffix() {
        assert_eq!(
            ResumeFormat::from_file_name("resume.pdf").unwrap(),
            ResumeFormat::Pdf
        );
    }

    #[test]
    fn test_format_from_docx_suffix() {
        assert_eq!(
            ResumeFormat::from_file_name("cv.final.docx").unwrap(),
            ResumeFormat::Docx
        );
    }

    #[test]
    fn test_format_suffix_is_case_insensitive() {
        assert_eq!(
            ResumeFormat::from_file_name("RESUME.PDF").unwrap(),
            ResumeFormat::Pdf
        );
    }

    #[test]
    fn test_format_rejects_txt() {
        assert!(matches!(
            ResumeFormat::from_file_name("resume.txt"),
            Err(ParseError::UnsupportedFormat)
        ));
    }

    #[test]
    fn test_format_rejects_legacy_doc() {
        assert!(matches!(
            ResumeFormat::from_file_name("resume.doc"),
            Err(ParseError::UnsupportedFormat)
        ));
    }

    #[test]
    fn test_extract_text_unsupported_never_reads_content() {
        let resume = upload("notes.txt", b"plain text".to_vec());
        assert!(matches!(
            extract_text(&resume),
            Err(ParseError::UnsupportedFormat)
        ));
    }

    #[test]
    fn test_extract_text_dispatches_docx() {
        let bytes = fixtures::docx_with_paragraphs(&["Jane Doe, Software Engineer"]);
        let text = extract_text(&upload("resume.docx", bytes)).unwrap();
        assert_eq!(text, "Jane Doe, Software Engineer\n");
    }

    #[test]
    fn test_extract_text_dispatches_pdf() {
        let bytes = crate::render::pdf::render_pdf_bytes("Jane Doe\nSoftware Engineer").unwrap();
        let text = extract_text(&upload("resume.pdf", bytes)).unwrap();
        assert!(text.contains("Jane"), "extracted: {text:?}");
        assert!(text.contains("Engineer"), "extracted: {text:?}");
    }
}
