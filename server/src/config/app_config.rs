//! Runtime application configuration loaded from environment variables.

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MAX_SIZE: u32 = 4096;
pub const DEFAULT_MAX_BODY_BYTES: usize = 25 * 1024 * 1024; // 25MB

/// Runtime configuration for the generator service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_port: u16,
    pub bind_address: String,
    /// Regular face for center text. Falls back to a system font when unset.
    pub font_path: Option<PathBuf>,
    /// Bold face for center text. Bold is synthesised when unset.
    pub bold_font_path: Option<PathBuf>,
    /// Largest accepted `size`, in pixels.
    pub max_size: u32,
    /// Request body cap; base64 uploads count against it.
    pub max_body_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_port: DEFAULT_PORT,
            bind_address: "0.0.0.0".into(),
            font_path: None,
            bold_font_path: None,
            max_size: DEFAULT_MAX_SIZE,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let g = |key: &str| -> String { lookup(key).unwrap_or_default().trim().to_string() };
        let defaults = Self::default();

        Self {
            server_port: parse_or(&g("SERVER_PORT"), defaults.server_port),
            bind_address: {
                let addr = g("BIND_ADDRESS");
                if addr.is_empty() { defaults.bind_address } else { addr }
            },
            font_path: non_empty_path(g("QR_FONT_PATH")),
            bold_font_path: non_empty_path(g("QR_BOLD_FONT_PATH")),
            max_size: match parse_or(&g("QR_MAX_SIZE"), defaults.max_size) {
                0 => defaults.max_size,
                n => n,
            },
            max_body_bytes: parse_or(&g("QR_MAX_BODY_BYTES"), defaults.max_body_bytes),
        }
    }

    /// Socket address string the server binds to.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.server_port)
    }
}

fn parse_or<T: std::str::FromStr>(s: &str, default: T) -> T {
    if s.is_empty() {
        return default;
    }
    s.parse().unwrap_or(default)
}

fn non_empty_path(s: String) -> Option<PathBuf> {
    if s.is_empty() { None } else { Some(PathBuf::from(s)) }
}
