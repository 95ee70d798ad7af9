use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app::SharedState;
use super::{api, assets};

/// Create the axum router with all routes.
pub fn create_router(state: SharedState) -> Router {
    let body_limit = state.config().max_body_bytes;

    Router::new()
        // --- Core ---
        .route("/status", get(status_handler))
        // --- Generator ---
        .route("/api/generate-qr", post(api::generate::generate_qr))
        // --- Form (Generator UI) at / ---
        .route("/", get(assets::form_index))
        .fallback(assets::form_fallback)
        // --- Middleware ---
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn status_handler() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
