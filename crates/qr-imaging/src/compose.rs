//! Image composition utilities — overlay layers and knock out backgrounds.

use image::{Rgba, RgbaImage};

/// Overlay `top` onto `base` with its top-left corner at (`x`, `y`).
///
/// Source-over alpha compositing at full opacity. Pixels falling outside
/// `base` are clipped.
pub fn overlay(base: &mut RgbaImage, top: &RgbaImage, x: u32, y: u32) {
    for (dx, dy, pixel) in top.enumerate_pixels() {
        let (Some(target_x), Some(target_y)) = (x.checked_add(dx), y.checked_add(dy)) else {
            continue;
        };
        if target_x < base.width() && target_y < base.height() {
            let alpha = pixel[3] as f32 / 255.0;
            if alpha > 0.99 {
                base.put_pixel(target_x, target_y, *pixel);
            } else if alpha > 0.01 {
                let bg = base.get_pixel(target_x, target_y);
                let blended = blend_pixel(bg, pixel, alpha);
                base.put_pixel(target_x, target_y, blended);
            }
        }
    }
}

/// Overlay `top` centred on `base`: `((W - w) / 2, (H - h) / 2)`.
pub fn overlay_centered(base: &mut RgbaImage, top: &RgbaImage) {
    let x = base.width().saturating_sub(top.width()) / 2;
    let y = base.height().saturating_sub(top.height()) / 2;
    overlay(base, top, x, y);
}

/// Make every pixel whose R, G and B all exceed `threshold` fully transparent.
///
/// Any foreground color that is itself that light is knocked out too.
pub fn knock_out_light(img: &mut RgbaImage, threshold: u8) {
    for pixel in img.pixels_mut() {
        if pixel[0] > threshold && pixel[1] > threshold && pixel[2] > threshold {
            pixel[3] = 0;
        }
    }
}

fn blend_pixel(bg: &Rgba<u8>, fg: &Rgba<u8>, alpha: f32) -> Rgba<u8> {
    let bg_alpha = bg[3] as f32 / 255.0;
    let out_alpha = alpha + bg_alpha * (1.0 - alpha);
    if out_alpha <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let channel = |i: usize| {
        let c = (fg[i] as f32 * alpha + bg[i] as f32 * bg_alpha * (1.0 - alpha)) / out_alpha;
        c.round().clamp(0.0, 255.0) as u8
    };
    Rgba([
        channel(0),
        channel(1),
        channel(2),
        (out_alpha * 255.0).round() as u8,
    ])
}
