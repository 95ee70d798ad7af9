//! REST API handlers.

pub mod generate;

use axum::Json;
use serde_json::{json, Value};

/// Standard error response: `{"error": message}`.
pub fn err_json(status: u16, message: &str) -> (axum::http::StatusCode, Json<Value>) {
    (
        axum::http::StatusCode::from_u16(status).unwrap_or(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
        Json(json!({ "error": message })),
    )
}
