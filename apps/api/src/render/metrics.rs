//! Static font metrics and page geometry for PDF output.
//!
//! Character widths are in em units (relative to font size), taken from the
//! Helvetica AFM that every PDF viewer ships as a base-14 font. They drive the
//! greedy word-wrap; pagination is a simple line budget per page.
//! Index = (char as usize) - 32, covering ASCII 0x20..=0x7E.

const MM_PER_PT: f32 = 25.4 / 72.0;

// ────────────────────────────────────────────────────────────────────────────
// Page configuration
// ────────────────────────────────────────────────────────────────────────────

/// Layout parameters for every rendered page.
#[derive(Debug, Clone)]
pub struct PageConfig {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_mm: f32,
    pub font_size_pt: f32,
    /// Baseline-to-baseline distance.
    pub leading_pt: f32,
}

/// US letter (8.5" × 11"), 1" margins, 11pt text on 14pt leading.
pub fn default_page_config() -> PageConfig {
    PageConfig {
        page_width_mm: 215.9,
        page_height_mm: 279.4,
        margin_mm: 25.4,
        font_size_pt: 11.0,
        leading_pt: 14.0,
    }
}

impl PageConfig {
    /// Usable text width in em units at the configured font size.
    /// Letter with 1" margins at 11pt → 6.5" × (72pt/in ÷ 11pt) ≈ 42.5em.
    pub fn text_width_em(&self) -> f32 {
        let text_width_mm = self.page_width_mm - 2.0 * self.margin_mm;
        text_width_mm / (self.font_size_pt * MM_PER_PT)
    }

    pub fn leading_mm(&self) -> f32 {
        self.leading_pt * MM_PER_PT
    }

    /// Baseline of the first line on a page, measured from the bottom edge.
    pub fn first_baseline_mm(&self) -> f32 {
        self.page_height_mm - self.margin_mm - self.font_size_pt * MM_PER_PT
    }

    /// Number of lines that fit between the top and bottom margins.
    pub fn lines_per_page(&self) -> usize {
        let usable = self.first_baseline_mm() - self.margin_mm;
        ((usable / self.leading_mm()).floor() as usize + 1).max(1)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for the output font.
pub struct FontMetricTable {
    widths: [f32; 95],
    /// Fallback width for non-ASCII characters (codepoints > 0x7E).
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    ///
    /// Non-ASCII characters fall back to `average_char_width`.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else {
                    self.average_char_width
                }
            })
            .sum()
    }

    /// Greedy word-wrap of one source line into printed lines.
    ///
    /// Runs of whitespace collapse to a single space. A blank source line yields
    /// one empty printed line so vertical spacing survives. A single word wider
    /// than the text width is broken between characters.
    pub fn wrap_line(&self, line: &str, config: &PageConfig) -> Vec<String> {
        let max_width = config.text_width_em();
        let mut lines = Vec::new();
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in line.split_whitespace() {
            let word_w = self.measure_str(word);

            if word_w > max_width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0.0;
                }
                for piece in self.break_word(word, max_width) {
                    lines.push(piece);
                }
                // The tail of a broken word continues on the last line.
                if let Some(tail) = lines.pop() {
                    current_width = self.measure_str(&tail);
                    current = tail;
                }
                continue;
            }

            let space_w = if current.is_empty() { 0.0 } else { self.space_width };
            if !current.is_empty() && current_width + space_w + word_w > max_width {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_w;
            } else {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
                current_width += space_w + word_w;
            }
        }

        if !current.is_empty() || lines.is_empty() {
            lines.push(current);
        }
        lines
    }

    fn break_word(&self, word: &str, max_width: f32) -> Vec<String> {
        let mut pieces = Vec::new();
        let mut piece = String::new();
        let mut width = 0.0_f32;
        for c in word.chars() {
            let mut buf = [0u8; 4];
            let w = self.measure_str(c.encode_utf8(&mut buf));
            if !piece.is_empty() && width + w > max_width {
                pieces.push(std::mem::take(&mut piece));
                width = 0.0;
            }
            piece.push(c);
            width += w;
        }
        if !piece.is_empty() {
            pieces.push(piece);
        }
        pieces
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width table
// ────────────────────────────────────────────────────────────────────────────

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.556,
    space_width: 0.278,
};

pub fn helvetica() -> &'static FontMetricTable {
    &HELVETICA_TABLE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        assert_eq!(helvetica().measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        // "Rust" = R(0.722) + u(0.556) + s(0.500) + t(0.278) = 2.056
        let width = helvetica().measure_str("Rust");
        assert!((width - 2.056).abs() < 1e-3, "got {width}");
    }

    #[test]
    fn test_measure_str_non_ascii_falls_back() {
        let metrics = helvetica();
        assert!((metrics.measure_str("é") - metrics.average_char_width).abs() < 1e-4);
    }

    #[test]
    fn test_default_page_config_sanity() {
        let config = default_page_config();
        let width = config.text_width_em();
        assert!(width > 40.0 && width < 45.0, "got {width}");
        assert!(config.lines_per_page() > 40 && config.lines_per_page() < 60);
    }

    #[test]
    fn test_wrap_short_line_is_single_line() {
        let config = default_page_config();
        assert_eq!(
            helvetica().wrap_line("Jane Doe, Software Engineer", &config),
            vec!["Jane Doe, Software Engineer".to_string()]
        );
    }

    #[test]
    fn test_wrap_blank_line_keeps_one_empty_line() {
        let config = default_page_config();
        assert_eq!(helvetica().wrap_line("   ", &config), vec![String::new()]);
    }

    #[test]
    fn test_wrap_long_line_preserves_all_words_in_order() {
        let config = default_page_config();
        let bullet = "Architected a distributed caching layer using Redis and consistent hashing, \
                      reducing p99 latency by 40% under 50k RPS peak load while mentoring four \
                      engineers and owning the on-call rotation for the platform team";
        let lines = helvetica().wrap_line(bullet, &config);
        assert!(lines.len() >= 2, "expected wrapping, got {lines:?}");
        assert_eq!(lines.join(" "), bullet.split_whitespace().collect::<Vec<_>>().join(" "));
        for line in &lines {
            assert!(helvetica().measure_str(line) <= config.text_width_em());
        }
    }

    #[test]
    fn test_wrap_breaks_overlong_word() {
        let config = default_page_config();
        let url = format!("https://example.com/{}", "a".repeat(200));
        let lines = helvetica().wrap_line(&url, &config);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), url);
    }
}
