//! Round center-text badge stamped over a finished QR code.
//!
//! The badge is a near-white disc with a thin gray rim, carrying one or more
//! lines of centred text. Its radius is capped at 12% of the code size so
//! the error-correction budget still covers the hidden modules.

use ab_glyph::{Font, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_circle_mut};
use tracing::debug;

use crate::color::legible_text_color;
use crate::compose;
use crate::text::{self, TextStyle, faux_bold_strokes};
use crate::RenderError;

/// Badge radius ceiling as a fraction of the code size.
pub const MAX_RADIUS_RATIO: f32 = 0.12;

const LINE_HEIGHT_RATIO: f32 = 1.2;
const PADDING_RATIO: f32 = 0.8;
/// Average glyph advance relative to the font size, used before any font is loaded.
const CHAR_WIDTH_RATIO: f32 = 0.6;

const FILL: Rgba<u8> = Rgba([250, 250, 250, 255]);
const RIM: Rgba<u8> = Rgba([153, 153, 153, 255]);
const RIM_WIDTH: i32 = 2;

/// What to print inside the badge.
#[derive(Debug, Clone, PartialEq)]
pub struct BadgeSpec {
    pub text: String,
    pub color: Rgba<u8>,
    pub font_size: f32,
    pub bold: bool,
}

/// Geometry of a badge for a given text and code size.
#[derive(Debug, Clone, PartialEq)]
pub struct BadgeLayout {
    pub lines: Vec<String>,
    pub line_height: f32,
    pub total_height: f32,
    pub radius: f32,
}

impl BadgeLayout {
    pub fn compute(text: &str, font_size: f32, pixel_size: u32) -> Self {
        let lines: Vec<String> = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();

        let line_height = font_size * LINE_HEIGHT_RATIO;
        let total_height = lines.len() as f32 * line_height;
        let padding = font_size * PADDING_RATIO;
        let max_chars = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let estimated_width = max_chars as f32 * font_size * CHAR_WIDTH_RATIO;

        let radius = (total_height / 2.0 + padding)
            .max(estimated_width / 2.0 + padding)
            .min(pixel_size as f32 * MAX_RADIUS_RATIO);

        Self {
            lines,
            line_height,
            total_height,
            radius,
        }
    }
}

/// Keep the font size within `[1, badge diameter]`.
///
/// Glyphs taller than the largest possible badge cannot fit in it, and an
/// unbounded scale makes the rasteriser allocate without limit.
pub fn clamp_font_size(font_size: f32, size: u32) -> f32 {
    let ceiling = (size as f32 * 2.0 * MAX_RADIUS_RATIO).max(1.0);
    if font_size.is_nan() {
        return 1.0;
    }
    font_size.clamp(1.0, ceiling)
}

/// Render the badge on a transparent `size × size` layer.
///
/// `bold_font` is used for bold badges when given; otherwise bold text is
/// struck several times with `font`.
pub fn render_badge<F: Font>(
    spec: &BadgeSpec,
    size: u32,
    font: &F,
    bold_font: Option<&F>,
) -> Result<RgbaImage, RenderError> {
    if spec.text.trim().is_empty() {
        return Err(RenderError::EmptyText);
    }

    let font_size = clamp_font_size(spec.font_size, size);
    let layout = BadgeLayout::compute(&spec.text, font_size, size);
    let color = legible_text_color(spec.color);

    debug!(
        lines = layout.lines.len(),
        radius = layout.radius,
        font_size,
        bold = spec.bold,
        "Rendering center badge"
    );

    let mut layer = RgbaImage::new(size, size);
    let center = (size as i32 / 2, size as i32 / 2);
    let radius = layout.radius.round() as i32;

    draw_filled_circle_mut(&mut layer, center, radius, FILL);
    for inset in 0..RIM_WIDTH {
        draw_hollow_circle_mut(&mut layer, center, radius - inset, RIM);
    }

    let (face, strokes) = match (spec.bold, bold_font) {
        (true, Some(bold)) => (bold, 1),
        (true, None) => (font, faux_bold_strokes(font_size)),
        (false, _) => (font, 1),
    };

    let style = TextStyle {
        scale: PxScale::from(font_size),
        color,
        bold_strokes: strokes,
    };
    let glyph_height = text::glyph_height(face, style.scale) as f32;
    let block_top = center.1 as f32 - layout.total_height / 2.0;

    for (i, line) in layout.lines.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_top = block_top + i as f32 * layout.line_height;
        let y = line_top + (layout.line_height - glyph_height) / 2.0;
        text::draw_centered_line(&mut layer, face, &style, (center.0, y.round() as i32), line);
    }

    Ok(layer)
}

/// Render the badge and composite it over `base`.
pub fn apply_badge<F: Font>(
    base: &mut RgbaImage,
    spec: &BadgeSpec,
    font: &F,
    bold_font: Option<&F>,
) -> Result<(), RenderError> {
    let layer = render_badge(spec, base.width().min(base.height()), font, bold_font)?;
    compose::overlay(base, &layer, 0, 0);
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use ab_glyph::FontArc;

    const SYSTEM_FONTS: &[&str] = &[
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ];

    /// First installed system font, if any. Font-dependent tests skip without one.
    pub(crate) fn system_font() -> Option<FontArc> {
        SYSTEM_FONTS
            .iter()
            .filter_map(|path| std::fs::read(path).ok())
            .find_map(|data| FontArc::try_from_vec(data).ok())
    }

    fn spec(text: &str, color: Rgba<u8>) -> BadgeSpec {
        BadgeSpec {
            text: text.to_string(),
            color,
            font_size: 24.0,
            bold: false,
        }
    }

    #[test]
    fn layout_short_text_is_not_clamped() {
        let layout = BadgeLayout::compute("Hi", 24.0, 1024);
        assert_eq!(layout.lines, vec!["Hi".to_string()]);
        assert!((layout.line_height - 28.8).abs() < 1e-4);
        assert!((layout.radius - 33.6).abs() < 1e-3);
    }

    #[test]
    fn layout_radius_never_exceeds_ceiling() {
        let long = "a very long line of center text that would cover the code";
        for size in [128u32, 256, 512, 1024] {
            for font_size in [8.0, 24.0, 48.0, 96.0] {
                let layout = BadgeLayout::compute(long, font_size, size);
                assert!(layout.radius <= size as f32 * MAX_RADIUS_RATIO + 1e-4);
            }
        }
        let layout = BadgeLayout::compute(long, 24.0, 512);
        assert!(layout.radius <= 61.44 + 1e-4);
        assert!((layout.radius - 61.44).abs() < 1e-3);
    }

    #[test]
    fn layout_counts_lines() {
        let layout = BadgeLayout::compute("one\r\ntwo\nthree", 10.0, 2000);
        assert_eq!(layout.lines, vec!["one", "two", "three"]);
        assert!((layout.total_height - 36.0).abs() < 1e-4);
        // Height term: 18 + 8 = 26; width term: 5 * 6 / 2 + 8 = 23.
        assert!((layout.radius - 26.0).abs() < 1e-3);
    }

    #[test]
    fn blank_text_is_rejected() {
        let Some(font) = system_font() else {
            return;
        };
        let err = render_badge(&spec("  \n ", Rgba([0, 0, 0, 255])), 256, &font, None).unwrap_err();
        assert!(matches!(err, RenderError::EmptyText));
    }

    #[test]
    fn badge_draws_disc_rim_and_transparent_outside() {
        let Some(font) = system_font() else {
            return;
        };
        let layer = render_badge(&spec("A", Rgba([0, 0, 0, 255])), 512, &font, None).unwrap();
        // radius = max(14.4 + 19.2, 7.2 + 19.2) = 33.6 -> 34
        assert_eq!(*layer.get_pixel(256 - 28, 256), FILL);
        assert_eq!(*layer.get_pixel(256 - 34, 256), RIM);
        assert_eq!(layer.get_pixel(0, 0)[3], 0);
        assert_eq!(layer.get_pixel(256 - 40, 256)[3], 0);
    }

    #[test]
    fn white_text_is_drawn_black() {
        let Some(font) = system_font() else {
            return;
        };
        let layer = render_badge(&spec("WWW", Rgba([255, 255, 255, 255])), 512, &font, None).unwrap();
        let dark = layer
            .pixels()
            .filter(|p| p[3] == 255 && p[0] < 60 && p[1] < 60 && p[2] < 60)
            .count();
        assert!(dark > 20, "expected black glyph pixels, found {dark}");
    }

    #[test]
    fn faux_bold_inks_more_than_regular() {
        let Some(font) = system_font() else {
            return;
        };
        let ink = |bold: bool| {
            let mut s = spec("Bold", Rgba([0, 0, 0, 255]));
            s.bold = bold;
            render_badge(&s, 512, &font, None)
                .unwrap()
                .pixels()
                .filter(|p| p[3] == 255 && p[0] < 128)
                .count()
        };
        assert!(ink(true) > ink(false));
    }

    #[test]
    fn font_size_is_bounded_by_badge_diameter() {
        // 256 * 0.24 = 61.44
        assert!((clamp_font_size(1e9, 256) - 61.44).abs() < 1e-3);
        assert!((clamp_font_size(f32::INFINITY, 256) - 61.44).abs() < 1e-3);
        assert_eq!(clamp_font_size(f32::NAN, 256), 1.0);
        assert_eq!(clamp_font_size(0.25, 256), 1.0);
        assert_eq!(clamp_font_size(24.0, 256), 24.0);
        assert_eq!(clamp_font_size(24.0, 1), 1.0);
    }

    #[test]
    fn huge_and_tiny_font_sizes_still_render() {
        let Some(font) = system_font() else {
            return;
        };
        for font_size in [1e9, f32::INFINITY, f32::MAX, 0.5] {
            let mut s = spec("Hi", Rgba([0, 0, 0, 255]));
            s.font_size = font_size;
            s.bold = true;
            let layer = render_badge(&s, 256, &font, None).unwrap();
            assert_eq!(layer.dimensions(), (256, 256));
            assert_eq!(layer.get_pixel(0, 0)[3], 0);
            assert_eq!(layer.get_pixel(128, 128)[3], 255);
        }
    }

    #[test]
    fn apply_badge_keeps_corners() {
        let Some(font) = system_font() else {
            return;
        };
        let red = Rgba([255, 0, 0, 255]);
        let mut base = RgbaImage::from_pixel(300, 300, red);
        apply_badge(&mut base, &spec("QR", Rgba([0, 0, 255, 255])), &font, None).unwrap();
        assert_eq!(*base.get_pixel(0, 0), red);
        assert_eq!(*base.get_pixel(299, 299), red);
        assert_ne!(*base.get_pixel(150, 150), red);
    }
}
