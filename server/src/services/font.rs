//! Font loading for center-text badges.

use std::path::{Path, PathBuf};

use ab_glyph::FontArc;

use crate::config::AppConfig;

#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("Invalid font format in {0} (only TTF/OTF supported)")]
    InvalidFormat(PathBuf),
    #[error("no usable badge font found (set QR_FONT_PATH or install system fonts)")]
    NoFont,
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Faces used to draw badge text, parsed once at startup.
#[derive(Clone, Default)]
pub struct BadgeFonts {
    pub regular: Option<FontArc>,
    pub bold: Option<FontArc>,
}

impl BadgeFonts {
    /// Regular face or the reason no badge can be drawn.
    pub fn regular(&self) -> Result<&FontArc, FontError> {
        self.regular.as_ref().ok_or(FontError::NoFont)
    }
}

pub struct FontService;

impl FontService {
    /// Resolve configured fonts, falling back to system fonts for the regular face.
    ///
    /// Never fails: without a font the service still runs, minus badges.
    pub fn load(config: &AppConfig) -> BadgeFonts {
        let regular = config
            .font_path
            .as_deref()
            .and_then(|path| match load_font_file(path) {
                Ok(font) => {
                    tracing::info!(path = %path.display(), "Using configured badge font");
                    Some(font)
                }
                Err(e) => {
                    tracing::warn!("Failed to load QR_FONT_PATH: {e}");
                    None
                }
            })
            .or_else(|| match load_system_font() {
                Ok(font) => Some(font),
                Err(e) => {
                    tracing::warn!("Center text disabled: {e}");
                    None
                }
            });

        let bold = config
            .bold_font_path
            .as_deref()
            .and_then(|path| match load_font_file(path) {
                Ok(font) => Some(font),
                Err(e) => {
                    tracing::warn!("Failed to load QR_BOLD_FONT_PATH, bold will be synthesised: {e}");
                    None
                }
            });

        BadgeFonts { regular, bold }
    }
}

/// Read and parse a TTF/OTF file.
pub fn load_font_file(path: &Path) -> Result<FontArc, FontError> {
    let data = std::fs::read(path).map_err(|source| FontError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    FontArc::try_from_vec(data).map_err(|_| FontError::InvalidFormat(path.to_path_buf()))
}

fn load_system_font() -> Result<FontArc, FontError> {
    for path in system_font_candidates() {
        if let Ok(font) = load_font_file(Path::new(path)) {
            tracing::info!(path = %path, "Using system font for center text");
            return Ok(font);
        }
    }
    Err(FontError::NoFont)
}

fn system_font_candidates() -> &'static [&'static str] {
    #[cfg(target_os = "macos")]
    {
        &[
            "/System/Library/Fonts/Supplemental/Arial.ttf",
            "/System/Library/Fonts/Supplemental/Helvetica.ttf",
            "/System/Library/Fonts/Helvetica.ttc",
        ]
    }
    #[cfg(target_os = "windows")]
    {
        &["C:\\Windows\\Fonts\\arial.ttf", "C:\\Windows\\Fonts\\segoeui.ttf"]
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        &[
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/usr/share/fonts/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/opentype/noto/NotoSans-Regular.ttf",
        ]
    }
}
