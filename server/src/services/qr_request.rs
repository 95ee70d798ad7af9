//! Request payload for `POST /api/generate-qr` and its validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

pub const DEFAULT_FOREGROUND: &str = "#000000";
pub const DEFAULT_BACKGROUND: &str = "#ffffff";
pub const DEFAULT_CENTER_TEXT_COLOR: &str = "#000000";
pub const DEFAULT_CENTER_TEXT_SIZE: f32 = 24.0;

/// Raw JSON body as sent by the generator form.
///
/// Every field is optional here so that absent fields surface as
/// [`ValidationError`]s rather than deserialisation failures.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQrPayload {
    #[serde(rename = "type")]
    pub qr_type: Option<String>,
    pub text: Option<String>,
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub size: Option<f64>,
    pub color: Option<String>,
    pub background_color: Option<String>,
    /// Base64 logo image.
    pub logo: Option<String>,
    /// Base64 background photo.
    pub bg_image: Option<String>,
    pub center_text: Option<String>,
    pub center_text_color: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub center_text_size: Option<f64>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub center_text_bold: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QrMode {
    Text,
    Url,
    Logo,
    Background,
}

impl QrMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Url => "url",
            Self::Logo => "logo",
            Self::Background => "background",
        }
    }
}

impl fmt::Display for QrMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QrMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "url" => Ok(Self::Url),
            "logo" => Ok(Self::Logo),
            "background" => Ok(Self::Background),
            other => Err(ValidationError::UnsupportedType(other.to_string())),
        }
    }
}

/// Decorative text stamped in the middle of the code.
#[derive(Debug, Clone, PartialEq)]
pub struct CenterText {
    pub text: String,
    pub color: String,
    pub font_size: f32,
    pub bold: bool,
}

/// A request that passed validation; lives for one request/response cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub mode: QrMode,
    /// Encoded verbatim.
    pub content: String,
    pub pixel_size: u32,
    pub foreground: String,
    /// Quiet-zone color; ignored in background mode.
    pub background: String,
    pub logo: Option<String>,
    pub background_image: Option<String>,
    pub center_text: Option<CenterText>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required fields: type and size")]
    MissingFields,
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),
    #[error("Text is required for text type")]
    MissingText,
    #[error("URL is required for url type")]
    MissingUrl,
    #[error("Logo is required for logo type")]
    MissingLogo,
    #[error("Background image is required for background type")]
    MissingBackgroundImage,
    #[error("Text or URL is required for logo and background types")]
    MissingContent,
    #[error("Size must be between 1 and {max} pixels")]
    SizeOutOfRange { max: u32 },
    #[error("Invalid JSON body: {0}")]
    InvalidJson(String),
    #[error("Unreadable request body: {0}")]
    UnreadableBody(String),
}

impl GenerateQrPayload {
    /// Check the payload and resolve it into a [`GenerationRequest`].
    ///
    /// Empty strings count as absent, matching the form's behaviour.
    pub fn validate(self, max_size: u32) -> Result<GenerationRequest, ValidationError> {
        let qr_type = present(self.qr_type);
        let size = self.size.filter(|s| s.is_finite() && *s != 0.0);
        let (Some(qr_type), Some(size)) = (qr_type, size) else {
            return Err(ValidationError::MissingFields);
        };

        let mode: QrMode = qr_type.parse()?;
        let text = present(self.text);
        let url = present(self.url);
        let logo = present(self.logo);
        let background_image = present(self.bg_image);

        let content = match mode {
            QrMode::Text => text.ok_or(ValidationError::MissingText)?,
            QrMode::Url => url.ok_or(ValidationError::MissingUrl)?,
            QrMode::Logo | QrMode::Background => {
                if mode == QrMode::Logo && logo.is_none() {
                    return Err(ValidationError::MissingLogo);
                }
                if mode == QrMode::Background && background_image.is_none() {
                    return Err(ValidationError::MissingBackgroundImage);
                }
                text.or(url).ok_or(ValidationError::MissingContent)?
            }
        };

        if size < 1.0 || size > f64::from(max_size) {
            return Err(ValidationError::SizeOutOfRange { max: max_size });
        }

        let center_text = present(self.center_text)
            .filter(|t| !t.trim().is_empty())
            .map(|text| CenterText {
                text,
                color: present(self.center_text_color)
                    .unwrap_or_else(|| DEFAULT_CENTER_TEXT_COLOR.to_string()),
                font_size: self
                    .center_text_size
                    .map(|s| s as f32)
                    .filter(|s| s.is_finite() && *s > 0.0)
                    .unwrap_or(DEFAULT_CENTER_TEXT_SIZE),
                bold: self.center_text_bold.unwrap_or(false),
            });

        Ok(GenerationRequest {
            mode,
            content,
            pixel_size: size as u32,
            foreground: present(self.color).unwrap_or_else(|| DEFAULT_FOREGROUND.to_string()),
            background: present(self.background_color)
                .unwrap_or_else(|| DEFAULT_BACKGROUND.to_string()),
            logo: if mode == QrMode::Logo { logo } else { None },
            background_image: if mode == QrMode::Background {
                background_image
            } else {
                None
            },
            center_text,
        })
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Bool(bool),
    Number(f64),
    Text(String),
}

/// Accept a JSON number or a numeric string; anything else reads as absent.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Loose>::deserialize(deserializer)? {
        Some(Loose::Number(n)) => Some(n),
        Some(Loose::Text(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Accept `true`/`false` or the strings a checkbox may post.
fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Loose>::deserialize(deserializer)? {
        Some(Loose::Bool(b)) => Some(b),
        Some(Loose::Number(n)) => Some(n != 0.0),
        Some(Loose::Text(s)) => Some(matches!(s.trim(), "true" | "on" | "1" | "yes")),
        None => None,
    })
}
