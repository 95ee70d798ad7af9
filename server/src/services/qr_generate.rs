//! QR image generation pipeline: base render, logo or background layer,
//! optional center-text badge, PNG encoding.

use std::fmt;
use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use qr_imaging::{BadgeSpec, QrStyle, RenderError};

use super::font::{BadgeFonts, FontError};
use super::qr_request::{CenterText, GenerationRequest, QrMode, ValidationError};

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// A user-supplied image layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Asset {
    Logo,
    Background,
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Logo => "logo",
            Self::Background => "background",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("undecodable image: {0}")]
    Image(#[from] image::ImageError),
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Failed to process {asset} image")]
    Asset {
        asset: Asset,
        #[source]
        source: AssetError,
    },
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("Failed to generate QR code")]
    Internal,
}

impl GenerateError {
    /// HTTP status for this failure: bad input is the caller's fault, the rest is ours.
    pub fn status(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::Render(RenderError::SizeTooSmall { .. }) => 400,
            Self::Asset { .. } | Self::Render(_) | Self::Internal => 500,
        }
    }
}

/// Center-text failures. Never surfaced to the client.
#[derive(Debug, thiserror::Error)]
enum BadgeError {
    #[error(transparent)]
    Font(#[from] FontError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Builds PNG QR codes for validated requests.
pub struct QrGenerator<'a> {
    fonts: &'a BadgeFonts,
}

impl<'a> QrGenerator<'a> {
    pub fn new(fonts: &'a BadgeFonts) -> Self {
        Self { fonts }
    }

    /// Run the whole pipeline and return PNG bytes.
    pub fn generate(&self, req: &GenerationRequest) -> Result<Vec<u8>, GenerateError> {
        let image = self.compose(req)?;
        let png = encode_png(&image)?;
        tracing::debug!(
            mode = %req.mode,
            size = req.pixel_size,
            bytes = png.len(),
            "QR code generated"
        );
        Ok(png)
    }

    /// Build the final raster without encoding it.
    pub fn compose(&self, req: &GenerationRequest) -> Result<RgbaImage, GenerateError> {
        let size = req.pixel_size;
        let dark = qr_imaging::parse_hex_color(&req.foreground)?;
        // The photo is the backdrop in background mode; white gets knocked out below.
        let light = match req.mode {
            QrMode::Background => WHITE,
            _ => qr_imaging::parse_hex_color(&req.background)?,
        };

        let mut image = qr_imaging::render_qr(&req.content, &QrStyle::new(size, dark, light))?;

        match (req.mode, req.logo.as_deref(), req.background_image.as_deref()) {
            (QrMode::Logo, Some(logo), _) => {
                let decoded = decode_asset(logo, Asset::Logo)?;
                apply_logo(&mut image, &decoded, size);
            }
            (QrMode::Background, _, Some(photo)) => {
                let decoded = decode_asset(photo, Asset::Background)?;
                image = apply_background(image, &decoded, size);
            }
            _ => {}
        }

        if let Some(center) = &req.center_text {
            if let Err(e) = self.apply_center_text(&mut image, center) {
                tracing::warn!("Center text skipped: {e}");
            }
        }

        Ok(image)
    }

    fn apply_center_text(&self, image: &mut RgbaImage, center: &CenterText) -> Result<(), BadgeError> {
        let font = self.fonts.regular()?;
        let spec = BadgeSpec {
            text: center.text.clone(),
            color: qr_imaging::parse_hex_color(&center.color)?,
            font_size: center.font_size,
            bold: center.bold,
        };
        qr_imaging::apply_badge(image, &spec, font, self.fonts.bold.as_ref())?;
        Ok(())
    }
}

/// Resize the logo to 30% of the code and paste it in the middle.
fn apply_logo(image: &mut RgbaImage, logo: &DynamicImage, size: u32) {
    let logo_size = (size as f32 * qr_imaging::LOGO_RATIO).floor() as u32;
    let resized = qr_imaging::resize_square(logo, logo_size).to_rgba8();
    qr_imaging::overlay_centered(image, &resized);
}

/// Lay the code's dark modules over a cover-scaled photo.
fn apply_background(mut qr: RgbaImage, photo: &DynamicImage, size: u32) -> RgbaImage {
    let mut backdrop = qr_imaging::resize_cover(photo, size).to_rgba8();
    qr_imaging::knock_out_light(&mut qr, qr_imaging::KNOCK_OUT_THRESHOLD);
    qr_imaging::overlay(&mut backdrop, &qr, 0, 0);
    backdrop
}

fn decode_asset(data: &str, asset: Asset) -> Result<DynamicImage, GenerateError> {
    decode_base64_image(data).map_err(|source| GenerateError::Asset { asset, source })
}

/// Decode a base64 image, tolerating a `data:` URL prefix, line breaks and missing padding.
pub fn decode_base64_image(data: &str) -> Result<DynamicImage, AssetError> {
    let data = data.trim();
    let payload = match data.strip_prefix("data:") {
        Some(rest) => rest.split_once(',').map_or(rest, |(_, b64)| b64),
        None => data,
    };
    let cleaned: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD
        .decode(&cleaned)
        .or_else(|_| STANDARD_NO_PAD.decode(&cleaned))?;
    Ok(image::load_from_memory(&bytes)?)
}

fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, RenderError> {
    let mut cursor = Cursor::new(Vec::new());
    image.write_to(&mut cursor, ImageFormat::Png)?;
    Ok(cursor.into_inner())
}
