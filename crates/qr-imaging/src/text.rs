//! Text rendering utilities for badge labels.
//!
//! Thin helpers over `ab_glyph` metrics and `imageproc` glyph drawing.

use ab_glyph::{Font, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;

/// Measure the pixel width of a string at the given font and scale.
pub fn measure_text_width<F: Font>(font: &F, scale: PxScale, text: &str) -> u32 {
    let scaled = font.as_scaled(scale);
    let mut width = 0.0f32;
    let mut prev_glyph: Option<ab_glyph::GlyphId> = None;

    for ch in text.chars() {
        let glyph_id = scaled.glyph_id(ch);
        if let Some(prev) = prev_glyph {
            width += scaled.kern(prev, glyph_id);
        }
        width += scaled.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }

    width.ceil() as u32
}

/// Height of the glyph box (ascent to descent) for the given font and scale.
pub fn glyph_height<F: Font>(font: &F, scale: PxScale) -> u32 {
    let scaled = font.as_scaled(scale);
    (scaled.ascent() - scaled.descent()).ceil() as u32
}

/// How a line of text is inked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub scale: PxScale,
    pub color: Rgba<u8>,
    /// Above 1, the text is struck again shifted one pixel right per extra
    /// stroke, thickening the face when no bold font is available.
    pub bold_strokes: u32,
}

/// Draw `text` with its horizontal centre at `anchor.0` and its glyph box top at `anchor.1`.
pub fn draw_centered_line<F: Font>(
    img: &mut RgbaImage,
    font: &F,
    style: &TextStyle,
    anchor: (i32, i32),
    text: &str,
) {
    let text_width = measure_text_width(font, style.scale, text) as i32;
    let x = anchor.0 - text_width / 2;
    for offset in 0..style.bold_strokes.max(1) as i32 {
        draw_text_mut(img, style.color, x + offset, anchor.1, style.scale, font, text);
    }
}

/// Number of strokes needed to fake a bold face at `font_size`.
pub fn faux_bold_strokes(font_size: f32) -> u32 {
    1 + (font_size / 24.0).round().max(1.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faux_bold_grows_with_size() {
        assert_eq!(faux_bold_strokes(12.0), 2);
        assert_eq!(faux_bold_strokes(24.0), 2);
        assert_eq!(faux_bold_strokes(72.0), 4);
    }

    #[test]
    fn wider_text_measures_wider() {
        let Some(font) = crate::badge::tests::system_font() else {
            return;
        };
        let scale = PxScale::from(24.0);
        let short = measure_text_width(&font, scale, "ab");
        let long = measure_text_width(&font, scale, "abcdef");
        assert!(long > short);
        assert_eq!(measure_text_width(&font, scale, ""), 0);
    }

    #[test]
    fn centered_line_draws_around_center() {
        let Some(font) = crate::badge::tests::system_font() else {
            return;
        };
        let mut img = RgbaImage::new(200, 60);
        let style = TextStyle {
            scale: PxScale::from(32.0),
            color: Rgba([0, 0, 0, 255]),
            bold_strokes: 1,
        };
        draw_centered_line(&mut img, &font, &style, (100, 10), "HHHH");

        let inked: Vec<u32> = img
            .enumerate_pixels()
            .filter(|(_, _, p)| p[3] > 0)
            .map(|(x, _, _)| x)
            .collect();
        assert!(!inked.is_empty());
        let min = *inked.iter().min().unwrap() as i32;
        let max = *inked.iter().max().unwrap() as i32;
        assert!(((min + max) / 2 - 100).abs() <= 4, "ink spans {min}..{max}");
    }
}
