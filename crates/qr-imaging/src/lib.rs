//! Image building blocks for QR code generation.
//!
//! Provides QR rendering at an exact pixel size, hex color parsing,
//! resizing (square and cover), alpha compositing, text layout, and the
//! round center-text badge stamped over finished codes.

pub mod badge;
pub mod color;
pub mod compose;
pub mod error;
pub mod qr;
pub mod resize;
pub mod text;

// Re-exports for convenience
pub use badge::{BadgeLayout, BadgeSpec, apply_badge, render_badge};
pub use color::{is_near_white, legible_text_color, parse_hex_color};
pub use compose::{knock_out_light, overlay, overlay_centered};
pub use error::RenderError;
pub use qr::{QrStyle, render_qr};
pub use resize::{resize_cover, resize_square};

/// Channel value above which a pixel counts as "white" for background knock-out.
pub const KNOCK_OUT_THRESHOLD: u8 = 250;

/// Fraction of the code size a logo occupies.
pub const LOGO_RATIO: f32 = 0.3;
