//! PDF writer — lays text out top-to-bottom on letter pages in Helvetica.
//!
//! Each source line becomes one paragraph, word-wrapped against the static
//! Helvetica metrics. A fresh page starts when the next printed line would
//! cross the bottom margin.

use std::path::Path;

use printpdf::{BuiltinFont, Mm, PdfDocument};

use super::metrics::{default_page_config, helvetica, PageConfig};
use super::{split_lines, RenderError};

const DOCUMENT_TITLE: &str = "Optimized Resume";
const LAYER_NAME: &str = "Layer 1";

pub fn write_pdf(text: &str, path: &Path) -> Result<(), RenderError> {
    let bytes = render_pdf_bytes(text)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Renders the whole document in memory.
pub fn render_pdf_bytes(text: &str) -> Result<Vec<u8>, RenderError> {
    let config = default_page_config();
    let pages = paginate(text, &config);

    let (doc, first_page, first_layer) = PdfDocument::new(
        DOCUMENT_TITLE,
        Mm(config.page_width_mm),
        Mm(config.page_height_mm),
        LAYER_NAME,
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;

    let mut first = Some((first_page, first_layer));
    for lines in &pages {
        let (page, layer) = match first.take() {
            Some(indices) => indices,
            None => doc.add_page(
                Mm(config.page_width_mm),
                Mm(config.page_height_mm),
                LAYER_NAME,
            ),
        };
        let layer = doc.get_page(page).get_layer(layer);

        let mut baseline = config.first_baseline_mm();
        for line in lines {
            if !line.is_empty() {
                layer.use_text(
                    line.as_str(),
                    config.font_size_pt,
                    Mm(config.margin_mm),
                    Mm(baseline),
                    &font,
                );
            }
            baseline -= config.leading_mm();
        }
    }

    doc.save_to_bytes()
        .map_err(|e| RenderError::Pdf(e.to_string()))
}

/// Wraps every source line and groups the printed lines into pages.
/// Always returns at least one page.
fn paginate(text: &str, config: &PageConfig) -> Vec<Vec<String>> {
    let metrics = helvetica();
    let per_page = config.lines_per_page();

    let printed: Vec<String> = split_lines(text)
        .flat_map(|line| metrics.wrap_line(&to_latin1(line), config))
        .collect();

    let mut pages: Vec<Vec<String>> = printed
        .chunks(per_page)
        .map(|chunk| chunk.to_vec())
        .collect();
    if pages.is_empty() {
        pages.push(Vec::new());
    }
    pages
}

/// The base-14 fonts only encode Latin-1; anything else would render as garbage.
fn to_latin1(line: &str) -> String {
    line.chars()
        .map(|c| match c {
            '\t' => ' ',
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2013}' | '\u{2014}' => '-',
            '\u{2022}' => '*',
            c if (c as u32) < 0x20 => ' ',
            c if (c as u32) <= 0xFF => c,
            _ => '?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_is_pdf() {
        let bytes = render_pdf_bytes("Jane Doe").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_empty_text_is_one_blank_page() {
        let pages = paginate("", &default_page_config());
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn test_overflow_starts_new_page() {
        let config = default_page_config();
        let per_page = config.lines_per_page();
        let text = vec!["line"; per_page + 1].join("\n");

        let pages = paginate(&text, &config);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].len(), per_page);
        assert_eq!(pages[1].len(), 1);
    }

    #[test]
    fn test_blank_lines_keep_their_slot() {
        let pages = paginate("Summary\n\nExperience", &default_page_config());
        assert_eq!(
            pages[0],
            vec!["Summary".to_string(), String::new(), "Experience".to_string()]
        );
    }

    #[test]
    fn test_to_latin1_replaces_unencodable_characters() {
        assert_eq!(to_latin1("Café – “Rust” 日本"), "Café - \"Rust\" ??");
    }
}
