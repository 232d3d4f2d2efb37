use std::fs::File;
use std::path::Path;

use docx_rs::{Docx, Paragraph, Run};

use super::{split_lines, RenderError};

/// One paragraph per line, blank lines kept as empty paragraphs.
pub fn write_docx(text: &str, path: &Path) -> Result<(), RenderError> {
    let doc = split_lines(text).fold(Docx::new(), |doc, line| {
        doc.add_paragraph(Paragraph::new().add_run(Run::new().add_text(line)))
    });

    let file = File::create(path)?;
    doc.build()
        .pack(file)
        .map_err(|e| RenderError::Docx(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{extract_text, UploadedResume};

    #[test]
    fn test_written_docx_reads_back_line_for_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.docx");

        write_docx("Jane Doe\n\nSkills: Rust, Python", &path).unwrap();

        let resume = UploadedResume {
            file_name: "resume.docx".to_string(),
            content: std::fs::read(&path).unwrap().into(),
        };
        assert_eq!(
            extract_text(&resume).unwrap(),
            "Jane Doe\n\nSkills: Rust, Python\n"
        );
    }
}
