pub mod app;
pub mod config;
pub mod server;
pub mod services;

use config::AppConfig;
use services::font::FontService;

/// Load .env from multiple candidate paths.
fn load_dotenv() {
    let candidates = [".env", "../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}

/// Load configuration and fonts, ready for [`server::start_server`].
pub fn init_foundation() -> app::SharedState {
    load_dotenv();

    let config = AppConfig::load();
    let fonts = FontService::load(&config);

    tracing::info!(
        port = config.server_port,
        max_size = config.max_size,
        center_text = fonts.regular.is_some(),
        "Settings loaded"
    );
    app::SharedState::new(config, fonts)
}
