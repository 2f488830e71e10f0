//! Bitmap text for report rendering.
//!
//! Sets text with the Spleen PSF2 font family, integer-scaled where a
//! report heading needs to be larger than the biggest face.

use spleen_font::{FONT_6X12, FONT_8X16, FONT_12X24, PSF2Font};

use super::canvas::Canvas;

/// Text sizes used in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSize {
    /// 6x12 — axis and value labels
    Small,
    /// 8x16 — tick labels
    Medium,
    /// 12x24 — chart titles
    Large,
    /// 12x24 scaled 2x (24x48) — stat tile headings and values
    Heading,
}

impl FontSize {
    pub fn char_width(self) -> usize {
        match self {
            FontSize::Small => 6,
            FontSize::Medium => 8,
            FontSize::Large => 12,
            FontSize::Heading => 24,
        }
    }

    pub fn char_height(self) -> usize {
        match self {
            FontSize::Small => 12,
            FontSize::Medium => 16,
            FontSize::Large => 24,
            FontSize::Heading => 48,
        }
    }

    fn font_data(self) -> &'static [u8] {
        match self {
            FontSize::Small => FONT_6X12,
            FontSize::Medium => FONT_8X16,
            FontSize::Large | FontSize::Heading => FONT_12X24,
        }
    }

    fn scale(self) -> usize {
        match self {
            FontSize::Heading => 2,
            _ => 1,
        }
    }
}

pub fn text_width(text: &str, size: FontSize) -> usize {
    text.chars().count() * size.char_width()
}

pub fn draw_text(canvas: &mut Canvas, text: &str, x: usize, y: usize, intensity: f32, size: FontSize) {
    let mut font = match PSF2Font::new(size.font_data()) {
        Ok(font) => font,
        Err(_) => return,
    };
    let scale = size.scale();
    let mut cursor_x = x;
    for ch in text.chars() {
        let utf8 = ch.to_string();
        if let Some(glyph) = font.glyph_for_utf8(utf8.as_bytes()) {
            for (row_y, row) in glyph.enumerate() {
                for (col_x, on) in row.enumerate() {
                    if on {
                        for dy in 0..scale {
                            for dx in 0..scale {
                                canvas.blend(
                                    cursor_x + col_x * scale + dx,
                                    y + row_y * scale + dy,
                                    intensity,
                                );
                            }
                        }
                    }
                }
            }
        }
        cursor_x += size.char_width();
    }
}

pub fn draw_text_centered(
    canvas: &mut Canvas,
    text: &str,
    center_x: usize,
    y: usize,
    intensity: f32,
    size: FontSize,
) {
    let w = text_width(text, size);
    let x = center_x.saturating_sub(w / 2);
    draw_text(canvas, text, x, y, intensity, size);
}

pub fn draw_text_right(
    canvas: &mut Canvas,
    text: &str,
    right_x: usize,
    y: usize,
    intensity: f32,
    size: FontSize,
) {
    let w = text_width(text, size);
    let x = right_x.saturating_sub(w);
    draw_text(canvas, text, x, y, intensity, size);
}

/// Shorten a label to `max_chars`, marking the cut with a trailing `..`.
pub fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_string();
    }
    let kept: String = label.chars().take(max_chars.saturating_sub(2)).collect();
    format!("{}..", kept.trim_end())
}
