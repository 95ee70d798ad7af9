//! Hex color parsing and legibility helpers.

use image::Rgba;

use crate::RenderError;

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Lowest channel value still treated as white for text legibility.
const NEAR_WHITE_MIN: u8 = 240;

/// Parse `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa` (the `#` is optional).
pub fn parse_hex_color(input: &str) -> Result<Rgba<u8>, RenderError> {
    let hex = input.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    let invalid = || RenderError::InvalidColor(input.to_string());

    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let expanded: String = match hex.len() {
        3 | 4 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 | 8 => hex.to_string(),
        _ => return Err(invalid()),
    };

    let channel = |i: usize| u8::from_str_radix(&expanded[i * 2..i * 2 + 2], 16).map_err(|_| invalid());
    let alpha = if expanded.len() == 8 { channel(3)? } else { 255 };

    Ok(Rgba([channel(0)?, channel(1)?, channel(2)?, alpha]))
}

/// True when every color channel is at or above the near-white floor.
pub fn is_near_white(color: Rgba<u8>) -> bool {
    color.0[..3].iter().all(|c| *c >= NEAR_WHITE_MIN)
}

/// Text over the white badge must stay readable: near-white becomes black.
pub fn legible_text_color(color: Rgba<u8>) -> Rgba<u8> {
    if is_near_white(color) { BLACK } else { color }
}
