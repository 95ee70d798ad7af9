use thiserror::Error;

/// Errors raised while building QR images.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("QR encode error: {0}")]
    Encode(#[from] qrcode::types::QrError),
    #[error("Size {size}px is too small for this content; it needs at least {modules} pixels")]
    SizeTooSmall { size: u32, modules: u32 },
    #[error("Invalid hex color: {0}")]
    InvalidColor(String),
    #[error("center text is empty")]
    EmptyText,
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}
