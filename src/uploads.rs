//! Static uploads.
//!
//! Serves the files behind relative banner and product media references,
//! which the homepage anchors to this service's public origin.

use axum::{extract::Request, handler::HandlerWithoutStateExt, http::{header, HeaderValue, StatusCode}, middleware::{self, Next}, response::{IntoResponse, Response}, Json, Router};
use std::path::Path;
use tower_http::{services::ServeDir, set_header::SetResponseHeaderLayer};

const CACHE_FOREVER: &str = "public, max-age=31536000, immutable";

/// Flat directory of uploaded files. Content type follows the extension and
/// byte ranges are honoured, so videos can be streamed.
pub fn service(dir: &Path) -> Router {
    let files = ServeDir::new(dir).not_found_service(not_found.into_service());
    Router::new()
        .fallback_service(files)
        .layer(middleware::from_fn(reject_unsafe_names))
        .layer(SetResponseHeaderLayer::overriding(header::CACHE_CONTROL, |res: &Response| {
            res.status().is_success().then(|| HeaderValue::from_static(CACHE_FOREVER))
        }))
}

/// A single path segment with no parent references, encoded or not.
pub fn is_safe_upload_name(name: &str) -> bool {
    let lowered = name.to_ascii_lowercase();
    !name.is_empty()
        && !name.contains("..")
        && !name.contains(['/', '\\'])
        && !["%2e%2e", "%2f", "%5c"].iter().any(|encoded| lowered.contains(encoded))
}

async fn reject_unsafe_names(req: Request, next: Next) -> Response {
    let name = req.uri().path().trim_start_matches('/');
    if !is_safe_upload_name(name) {
        tracing::debug!(path = %req.uri().path(), "rejecting upload path");
        return (StatusCode::BAD_REQUEST, Json(serde_json::json!({"message": "Invalid filename"}))).into_response();
    }
    next.run(req).await
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(serde_json::json!({"message": "Not found"})))
}
