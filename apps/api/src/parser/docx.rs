use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};

use super::ParseError;

/// Concatenates the run text of every top-level body paragraph, in order,
/// each followed by a newline. Tables and other block content are skipped.
pub fn extract_text(data: &[u8]) -> Result<String, ParseError> {
    let docx = read_docx(data).map_err(|e| ParseError::Docx(e.to_string()))?;

    let mut text = String::new();
    for child in docx.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            for paragraph_child in paragraph.children {
                if let ParagraphChild::Run(run) = paragraph_child {
                    for run_child in run.children {
                        match run_child {
                            RunChild::Text(t) => text.push_str(&t.text),
                            RunChild::Tab(_) => text.push('\t'),
                            _ => {}
                        }
                    }
                }
            }
            text.push('\n');
        }
    }
    Ok(text)
}
