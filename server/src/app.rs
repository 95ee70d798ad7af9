use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::font::BadgeFonts;

/// Application state shared by every axum handler. Immutable after startup.
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<SharedStateInner>,
}

struct SharedStateInner {
    config: AppConfig,
    fonts: BadgeFonts,
}

impl SharedState {
    pub fn new(config: AppConfig, fonts: BadgeFonts) -> Self {
        Self {
            inner: Arc::new(SharedStateInner { config, fonts }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn fonts(&self) -> &BadgeFonts {
        &self.inner.fonts
    }
}
