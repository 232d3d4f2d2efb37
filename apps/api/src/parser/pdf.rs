use super::ParseError;

/// Extracts text from a PDF held fully in memory.
///
/// `pdf-extract` walks pages in document order and emits nothing for pages
/// without a text layer, so scanned pages contribute an empty string.
pub fn extract_text(data: &[u8]) -> Result<String, ParseError> {
    pdf_extract::extract_text_from_mem(data).map_err(|e| ParseError::Pdf(e.to_string()))
}
