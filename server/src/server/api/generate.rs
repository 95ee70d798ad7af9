//! QR generation API:
//!   POST /api/generate-qr – validate the JSON body and return a PNG

use axum::body::{Body, Bytes};
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::Response;
use axum::Json;
use serde_json::Value;

use crate::app::SharedState;
use crate::services::qr_generate::{GenerateError, QrGenerator};
use crate::services::qr_request::{GenerateQrPayload, ValidationError};

use super::err_json;

type ApiResult = Result<Response, (StatusCode, Json<Value>)>;

/// POST /api/generate-qr
pub async fn generate_qr(
    State(state): State<SharedState>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult {
    let body = body
        .map_err(|e| error_response(ValidationError::UnreadableBody(e.body_text()).into()))?;
    let payload: GenerateQrPayload = serde_json::from_slice(&body)
        .map_err(|e| error_response(ValidationError::InvalidJson(e.to_string()).into()))?;

    let request = payload
        .validate(state.config().max_size)
        .map_err(|e| error_response(e.into()))?;

    tracing::info!(
        mode = %request.mode,
        size = request.pixel_size,
        content_len = request.content.len(),
        center_text = request.center_text.is_some(),
        "Generating QR code"
    );

    // Image work is CPU-bound; keep it off the async workers.
    let png = tokio::task::spawn_blocking(move || {
        QrGenerator::new(state.fonts()).generate(&request)
    })
    .await
    .map_err(|e| {
        tracing::error!("QR generation task failed: {e}");
        error_response(GenerateError::Internal)
    })?
    .map_err(error_response)?;

    Response::builder()
        .header(header::CONTENT_TYPE, "image/png")
        .header(header::CACHE_CONTROL, "no-cache, no-store, must-revalidate")
        .body(Body::from(png))
        .map_err(|e| err_json(500, &e.to_string()))
}

fn error_response(err: GenerateError) -> (StatusCode, Json<Value>) {
    let status = err.status();
    if status >= 500 {
        match std::error::Error::source(&err) {
            Some(source) => tracing::error!("Error generating QR code: {err}: {source}"),
            None => tracing::error!("Error generating QR code: {err}"),
        }
    } else {
        tracing::debug!("Rejected QR request: {err}");
    }
    let message = err.to_string();
    let message = if message.is_empty() { "Failed to generate QR code" } else { &message };
    err_json(status, message)
}
