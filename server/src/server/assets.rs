//! Static file serving for the generator form (web/).

use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use rust_embed::Embed;
use serde_json::json;

#[derive(Embed)]
#[folder = "web/"]
struct FormAssets;

/// Serve the form for bare `/` requests.
pub async fn form_index() -> Response {
    serve_embedded::<FormAssets>("index.html")
}

/// Fallback handler: serve form assets for unmatched paths.
/// Uses `Uri` instead of `Path` because fallback has no capture parameter.
pub async fn form_fallback(uri: Uri) -> Response {
    let request_path = uri.path();
    if is_api_path(request_path) {
        return (
            StatusCode::NOT_FOUND,
            axum::Json(json!({
                "error": "Not Found",
                "path": request_path,
            })),
        )
            .into_response();
    }

    serve_embedded::<FormAssets>(request_path.trim_start_matches('/'))
}

fn is_api_path(path: &str) -> bool {
    path == "/api"
        || path
            .strip_prefix("/api")
            .is_some_and(|rest| rest.starts_with('/'))
}

fn serve_embedded<E: Embed>(path: &str) -> Response {
    let (asset, served) = match E::get(path) {
        Some(asset) => (Some(asset), path),
        None => (E::get("index.html"), "index.html"),
    };

    match asset {
        Some(content) => {
            let mime = mime_guess::from_path(served).first_or_octet_stream();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.as_ref())],
                content.data.to_vec(),
            )
                .into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
