//! Font loading and text measurement.
//!
//! One system sans-serif is located through fontdb and rasterized with
//! ab_glyph. When no system font exists (bare CI containers), measurement
//! falls back to fixed per-em metrics so layout and tests stay
//! deterministic; only glyph painting needs the real font.

use std::sync::OnceLock;

use ab_glyph::{Font, FontArc, FontVec, PxScale, ScaleFont};
use fontdb::{Database, Family, Query};
use unicode_segmentation::UnicodeSegmentation;

/// Advance per em for the metric fallback.
const FALLBACK_ADVANCE: f32 = 0.55;
const FALLBACK_LINE: f32 = 1.3;

static FONT: OnceLock<Option<FontArc>> = OnceLock::new();

fn load_system_font() -> Option<FontArc> {
    let mut db = Database::new();
    db.load_system_fonts();

    let query = Query {
        families: &[Family::SansSerif],
        ..Query::default()
    };
    let id = db.query(&query)?;
    let loaded = db
        .with_face_data(id, |data, index| {
            FontVec::try_from_vec_and_index(data.to_vec(), index)
                .ok()
                .map(FontArc::from)
        })
        .flatten();
    if loaded.is_none() {
        log::warn!("system sans-serif font found but could not be parsed");
    }
    loaded
}

pub fn font() -> Option<&'static FontArc> {
    FONT.get_or_init(load_system_font).as_ref()
}

pub fn line_height(px: f32) -> f32 {
    match font() {
        Some(f) => {
            let s = f.as_scaled(PxScale::from(px));
            s.height() + s.line_gap()
        }
        None => px * FALLBACK_LINE,
    }
}

fn advance(c: char, px: f32) -> f32 {
    match font() {
        Some(f) => {
            let s = f.as_scaled(PxScale::from(px));
            s.h_advance(s.glyph_id(c))
        }
        None => px * FALLBACK_ADVANCE,
    }
}

pub fn line_width(text: &str, px: f32) -> f32 {
    text.chars().map(|c| advance(c, px)).sum()
}

/// Greedy word wrap. Explicit newlines are respected; a word wider than
/// `max_width` gets a line of its own rather than being split.
pub fn wrap_lines(text: &str, px: f32, max_width: f32) -> Vec<String> {
    wrap_map(text, px, max_width)
        .into_iter()
        .map(|(line, _)| line)
        .collect()
}

/// Like [`wrap_lines`], but each line carries its starting byte offset in
/// `text` so a caret byte index can be mapped to (line, column).
pub fn wrap_map(text: &str, px: f32, max_width: f32) -> Vec<(String, usize)> {
    let space_w = advance(' ', px);
    let mut out: Vec<(String, usize)> = Vec::new();

    let mut para_start = 0usize;
    for para in text.split('\n') {
        let mut line = String::new();
        let mut line_start = para_start;
        let mut line_w = 0.0f32;
        let mut cursor = para_start;

        for word in para.split(' ') {
            let word_w = line_width(word, px);
            if !line.is_empty() && line_w + space_w + word_w > max_width {
                out.push((std::mem::take(&mut line), line_start));
                line_start = cursor;
                line_w = 0.0;
            }
            if line.is_empty() {
                line_start = cursor;
                line.push_str(word);
                line_w = word_w;
            } else {
                line.push(' ');
                line.push_str(word);
                line_w += space_w + word_w;
            }
            cursor += word.len() + 1; // past the split space
        }
        out.push((line, line_start));
        para_start += para.len() + 1; // past the newline
    }
    out
}

/// Per-grapheme caret metrics for a single line of text.
pub struct TextMetrics {
    /// positions[i] = advance up to the i-th grapheme (len == graphemes + 1)
    pub positions: Vec<f32>,
    /// byte_offsets[i] = byte index of the i-th grapheme (last == text.len())
    pub byte_offsets: Vec<usize>,
}

pub fn measure_text(text: &str, px: f32) -> TextMetrics {
    let mut positions = vec![0.0f32];
    let mut byte_offsets = vec![0usize];
    let mut x = 0.0f32;
    for (i, g) in text.grapheme_indices(true) {
        x += line_width(g, px);
        positions.push(x);
        byte_offsets.push(i + g.len());
    }
    TextMetrics {
        positions,
        byte_offsets,
    }
}

pub fn byte_to_grapheme_index(m: &TextMetrics, byte: usize) -> usize {
    match m.byte_offsets.binary_search(&byte) {
        Ok(i) | Err(i) => i,
    }
}

/// Nearest caret byte index for a given x offset.
pub fn byte_index_for_x(text: &str, px: f32, x: f32) -> usize {
    let m = measure_text(text, px);
    let mut best_i = 0usize;
    let mut best_d = f32::INFINITY;
    for (i, &pos) in m.positions.iter().enumerate() {
        let d = (pos - x).abs();
        if d < best_d {
            best_d = d;
            best_i = i;
        }
    }
    m.byte_offsets.get(best_i).copied().unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_respects_width() {
        let px = 16.0;
        let w = line_width("aaaa bbbb", px) - 1.0;
        let lines = wrap_lines("aaaa bbbb", px, w);
        assert_eq!(lines, vec!["aaaa".to_string(), "bbbb".to_string()]);
    }

    #[test]
    fn wrap_keeps_short_text_on_one_line() {
        let lines = wrap_lines("hello world", 16.0, 10_000.0);
        assert_eq!(lines, vec!["hello world".to_string()]);
    }

    #[test]
    fn wrap_honors_explicit_newlines() {
        let lines = wrap_lines("a\nb", 16.0, 10_000.0);
        assert_eq!(lines, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn wrap_map_tracks_byte_starts() {
        let px = 16.0;
        let text = "aaaa bbbb";
        let w = line_width(text, px) - 1.0;
        let mapped = wrap_map(text, px, w);
        assert_eq!(mapped[0].1, 0);
        assert_eq!(mapped[1].1, 5);
    }

    #[test]
    fn measure_counts_graphemes() {
        let m = measure_text("héllo", 16.0);
        assert_eq!(m.positions.len(), 6);
        assert_eq!(*m.byte_offsets.last().unwrap(), "héllo".len());
    }
}
