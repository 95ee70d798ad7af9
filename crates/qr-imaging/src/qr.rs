//! QR code rendering at an exact output size.

use image::{Rgba, RgbaImage};
use qrcode::{Color, EcLevel, QrCode};
use tracing::debug;

use crate::RenderError;

/// Colors and geometry of a rendered code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrStyle {
    /// Output width and height in pixels.
    pub size: u32,
    /// Quiet zone width, in modules.
    pub margin: u32,
    pub dark: Rgba<u8>,
    pub light: Rgba<u8>,
}

impl QrStyle {
    pub fn new(size: u32, dark: Rgba<u8>, light: Rgba<u8>) -> Self {
        Self {
            size,
            margin: 1,
            dark,
            light,
        }
    }
}

/// Render `data` as a `style.size` square RGBA image.
///
/// Modules are stretched over the whole output, so module edges land on
/// `floor(px * total_modules / size)` and the image is never padded or
/// cropped. The quiet zone takes the light color.
pub fn render_qr(data: &str, style: &QrStyle) -> Result<RgbaImage, RenderError> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::M)?;
    let module_count = code.width() as u32;
    let total = module_count + style.margin * 2;

    if style.size < total {
        return Err(RenderError::SizeTooSmall {
            size: style.size,
            modules: total,
        });
    }

    debug!(
        module_count,
        size = style.size,
        margin = style.margin,
        "Rendering QR code"
    );

    let modules = code.to_colors();
    let size = style.size;
    // Module index along one axis for every output pixel column/row.
    let axis: Vec<Option<u32>> = (0..size)
        .map(|px| {
            let m = (u64::from(px) * u64::from(total) / u64::from(size)) as u32;
            m.checked_sub(style.margin).filter(|m| *m < module_count)
        })
        .collect();

    let img = RgbaImage::from_fn(size, size, |x, y| {
        match (axis[x as usize], axis[y as usize]) {
            (Some(mx), Some(my)) => {
                if modules[(my * module_count + mx) as usize] == Color::Dark {
                    style.dark
                } else {
                    style.light
                }
            }
            _ => style.light,
        }
    });

    Ok(img)
}
