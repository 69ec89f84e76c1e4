//! Static font-metric tables and page geometry for the resume document.
//!
//! The document uses the PDF standard-14 Helvetica family, so widths come from
//! the Adobe AFM files (divided by 1000 to get em units) and no font program is
//! embedded. Oblique shares the regular widths.
//! All tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Font faces
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFace {
    Regular,
    Bold,
    Oblique,
}

impl FontFace {
    pub const ALL: [FontFace; 3] = [FontFace::Regular, FontFace::Bold, FontFace::Oblique];

    /// PDF base-font name.
    pub fn base_font(&self) -> &'static str {
        match self {
            FontFace::Regular => "Helvetica",
            FontFace::Bold => "Helvetica-Bold",
            FontFace::Oblique => "Helvetica-Oblique",
        }
    }

    /// Resource name used in page content streams.
    pub fn resource_name(&self) -> &'static str {
        match self {
            FontFace::Regular => "F1",
            FontFace::Bold => "F2",
            FontFace::Oblique => "F3",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Page configuration
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    A4,
    Letter,
}

impl PaperSize {
    /// (width, height) in PDF points.
    pub fn dimensions_pt(&self) -> (f32, f32) {
        match self {
            PaperSize::A4 => (595.28, 841.89),
            PaperSize::Letter => (612.0, 792.0),
        }
    }
}

impl FromStr for PaperSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a4" => Ok(PaperSize::A4),
            "letter" | "us-letter" => Ok(PaperSize::Letter),
            other => Err(format!("unknown paper size '{other}' (expected 'a4' or 'letter')")),
        }
    }
}

/// Geometry and type sizes for the rendered document. All lengths in points.
///
/// Content flows from `margin_top_pt` down to `height_pt - break_margin_pt`;
/// the footer sits inside the break margin at `footer_baseline_pt` above the
/// bottom edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    pub paper: PaperSize,
    pub width_pt: f32,
    pub height_pt: f32,
    pub margin_left_pt: f32,
    pub margin_right_pt: f32,
    pub margin_top_pt: f32,
    /// Automatic page break threshold, measured from the bottom edge.
    pub break_margin_pt: f32,
    pub footer_baseline_pt: f32,
    pub title_size_pt: f32,
    pub header_size_pt: f32,
    pub body_size_pt: f32,
    pub footer_size_pt: f32,
    /// Line height as a multiple of font size.
    pub leading: f32,
    /// Space before each section header.
    pub section_gap_pt: f32,
    /// Space after each work-experience block.
    pub block_gap_pt: f32,
}

impl PageConfig {
    pub fn text_width_pt(&self) -> f32 {
        self.width_pt - self.margin_left_pt - self.margin_right_pt
    }

    /// Lowest y (from the top edge) a line box may reach before a page break.
    pub fn content_bottom_pt(&self) -> f32 {
        self.height_pt - self.break_margin_pt
    }
}

/// Returns the default page config for the given paper size.
///
/// 10mm side/top margins, 15mm automatic break margin, Helvetica 11pt body.
pub fn default_page_config(paper: PaperSize) -> PageConfig {
    let (width_pt, height_pt) = paper.dimensions_pt();
    PageConfig {
        paper,
        width_pt,
        height_pt,
        margin_left_pt: 28.35,
        margin_right_pt: 28.35,
        margin_top_pt: 28.35,
        break_margin_pt: 42.52,
        footer_baseline_pt: 24.0,
        title_size_pt: 16.0,
        header_size_pt: 12.0,
        body_size_pt: 11.0,
        footer_size_pt: 8.0,
        leading: 1.3,
        section_gap_pt: 8.0,
        block_gap_pt: 6.0,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for one face.
///
/// `widths[i]` = width of ASCII character `(i + 32)` in em units.
pub struct FontMetricTable {
    pub face: FontFace,
    widths: [f32; 95],
    /// Fallback width for characters outside printable ASCII.
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Width of a string in em units.
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

    /// Width of a string in points at `size_pt`.
    pub fn width_pt(&self, s: &str, size_pt: f32) -> f32 {
        self.measure_str(s) * size_pt
    }

    /// Greedy word-wrap at `max_width_pt`.
    ///
    /// Each `\n`-separated paragraph starts on a new line; blank paragraphs are
    /// dropped. Within a paragraph whitespace runs collapse to single spaces and
    /// a word wider than the line is split by character. Blank input yields no
    /// lines.
    pub fn wrap(&self, s: &str, size_pt: f32, max_width_pt: f32) -> Vec<String> {
        s.lines()
            .flat_map(|paragraph| self.wrap_paragraph(paragraph, size_pt, max_width_pt))
            .collect()
    }

    fn wrap_paragraph(&self, s: &str, size_pt: f32, max_width_pt: f32) -> Vec<String> {
        let space_w = self.space_width * size_pt;
        let mut lines = Vec::new();
        let mut current = String::new();
        let mut current_w = 0.0_f32;

        for word in s.split_whitespace() {
            let word_w = self.width_pt(word, size_pt);

            if word_w > max_width_pt {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_w = 0.0;
                }
                let mut pieces = self.split_word(word, size_pt, max_width_pt);
                if let Some(last) = pieces.pop() {
                    lines.extend(pieces);
                    current_w = self.width_pt(&last, size_pt);
                    current = last;
                }
                continue;
            }

            if current.is_empty() {
                current.push_str(word);
                current_w = word_w;
            } else if current_w + space_w + word_w > max_width_pt {
                lines.push(std::mem::replace(&mut current, word.to_string()));
                current_w = word_w;
            } else {
                current.push(' ');
                current.push_str(word);
                current_w += space_w + word_w;
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }

    /// Breaks a single overlong word into chunks no wider than `max_width_pt`.
    /// Every chunk holds at least one character.
    fn split_word(&self, word: &str, size_pt: f32, max_width_pt: f32) -> Vec<String> {
        let mut pieces = Vec::new();
        let mut piece = String::new();
        let mut piece_w = 0.0_f32;
        let mut buf = [0u8; 4];

        for c in word.chars() {
            let c_w = self.width_pt(c.encode_utf8(&mut buf), size_pt);
            if !piece.is_empty() && piece_w + c_w > max_width_pt {
                pieces.push(std::mem::take(&mut piece));
                piece_w = 0.0;
            }
            piece.push(c);
            piece_w += c_w;
        }
        if !piece.is_empty() {
            pieces.push(piece);
        }
        pieces
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

#[rustfmt::skip]
const HELVETICA_WIDTHS: [f32; 95] = [
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
];

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    face: FontFace::Regular,
    widths: HELVETICA_WIDTHS,
    average_char_width: 0.556,
    space_width: 0.278,
};

static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    face: FontFace::Bold,
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.333, 0.474, 0.556, 0.556, 0.889, 0.722, 0.238, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.333, 0.333, 0.584, 0.584, 0.584, 0.611, 0.975,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.722, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.556, 0.722, 0.611, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.584, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.611, 0.556, 0.611, 0.556, 0.333, 0.611, 0.611, 0.278, 0.278, 0.556, 0.278, 0.889,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.611, 0.611, 0.611, 0.611, 0.389, 0.556, 0.333, 0.611, 0.556, 0.778, 0.556, 0.556, 0.500,
        // {      |      }      ~
        0.389, 0.280, 0.389, 0.584,
    ],
    average_char_width: 0.611,
    space_width: 0.278,
};

static HELVETICA_OBLIQUE_TABLE: FontMetricTable = FontMetricTable {
    face: FontFace::Oblique,
    widths: HELVETICA_WIDTHS,
    average_char_width: 0.556,
    space_width: 0.278,
};

/// Returns the static metric table for a face.
pub fn get_metrics(face: FontFace) -> &'static FontMetricTable {
    match face {
        FontFace::Regular => &HELVETICA_TABLE,
        FontFace::Bold => &HELVETICA_BOLD_TABLE,
        FontFace::Oblique => &HELVETICA_OBLIQUE_TABLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        assert_eq!(get_metrics(FontFace::Regular).measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_matches_afm_widths() {
        let m = get_metrics(FontFace::Regular);
        // H=722, i=222
        assert!((m.measure_str("Hi") - 0.944).abs() < 1e-4);
        // Bold W=944
        assert!((get_metrics(FontFace::Bold).measure_str("W") - 0.944).abs() < 1e-4);
    }

    #[test]
    fn test_measure_str_non_ascii_falls_back() {
        let m = get_metrics(FontFace::Regular);
        assert!((m.measure_str("é") - m.average_char_width).abs() < 1e-6);
    }

    #[test]
    fn test_bold_is_at_least_as_wide_as_regular() {
        let text = "Senior Software Engineer at Example Corporation";
        let regular = get_metrics(FontFace::Regular).measure_str(text);
        let bold = get_metrics(FontFace::Bold).measure_str(text);
        assert!(bold >= regular);
    }

    #[test]
    fn test_oblique_shares_regular_widths() {
        let text = "Generated using AI Resume Builder";
        assert_eq!(
            get_metrics(FontFace::Oblique).measure_str(text),
            get_metrics(FontFace::Regular).measure_str(text)
        );
    }

    #[test]
    fn test_wrap_blank_text_yields_no_lines() {
        let m = get_metrics(FontFace::Regular);
        assert!(m.wrap("   \n\t ", 11.0, 500.0).is_empty());
    }

    #[test]
    fn test_wrap_short_text_is_single_line() {
        let m = get_metrics(FontFace::Regular);
        assert_eq!(m.wrap("Built  data\npipelines", 11.0, 500.0), vec!["Built data pipelines"]);
    }

    #[test]
    fn test_wrap_respects_width_and_keeps_words() {
        let m = get_metrics(FontFace::Regular);
        let text = "Designed and operated streaming ingestion for clickstream analytics \
                    across twelve regional deployments with strict latency budgets";
        let lines = m.wrap(text, 11.0, 200.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(m.width_pt(line, 11.0) <= 200.0, "line too wide: {line}");
        }
        assert_eq!(lines.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn test_wrap_starts_each_paragraph_on_new_line() {
        let m = get_metrics(FontFace::Regular);
        let lines = m.wrap("First point.\r\n\n  \nSecond point.\nThird", 11.0, 500.0);
        assert_eq!(lines, vec!["First point.", "Second point.", "Third"]);
    }

    #[test]
    fn test_wrap_splits_overlong_word() {
        let m = get_metrics(FontFace::Regular);
        let word = "x".repeat(200);
        let lines = m.wrap(&format!("a {word} b"), 11.0, 100.0);
        assert_eq!(lines.first().map(String::as_str), Some("a"));
        for line in &lines {
            assert!(m.width_pt(line, 11.0) <= 100.0);
        }
        assert_eq!(lines.concat().matches('x').count(), 200);
        assert!(lines.last().unwrap().ends_with(" b"));
    }

    #[test]
    fn test_paper_size_parsing() {
        assert_eq!("A4".parse::<PaperSize>(), Ok(PaperSize::A4));
        assert_eq!(" letter ".parse::<PaperSize>(), Ok(PaperSize::Letter));
        assert!("tabloid".parse::<PaperSize>().is_err());
    }

    #[test]
    fn test_default_page_config_sanity() {
        for paper in [PaperSize::A4, PaperSize::Letter] {
            let config = default_page_config(paper);
            assert!(config.text_width_pt() > 500.0);
            assert!(config.content_bottom_pt() > config.margin_top_pt);
            assert!(config.footer_baseline_pt < config.break_margin_pt);
        }
    }

    #[test]
    fn test_resource_names_are_distinct() {
        let names: std::collections::HashSet<_> =
            FontFace::ALL.iter().map(|f| f.resource_name()).collect();
        assert_eq!(names.len(), FontFace::ALL.len());
    }
}
