use axum::{body::Body, http::{header, Request, StatusCode}, response::Response, Router};
use std::sync::Arc;
use storefront_homepage::domain::value_objects::MediaOrigin;
use storefront_homepage::store::{InMemoryBannerStore, InMemoryCatalog};
use storefront_homepage::{router, AppState, CorsOrigins, HomepageAggregator, HomepageConfig};
use tempfile::TempDir;
use tower::ServiceExt;

fn app(uploads: &TempDir) -> Router {
    let homepage = HomepageAggregator::new(Arc::new(InMemoryBannerStore::new()), Arc::new(InMemoryCatalog::new()), MediaOrigin::default(), HomepageConfig::default());
    router(AppState::new(homepage).with_uploads_dir(uploads.path()), &CorsOrigins::Any)
}

fn uploads_with(name: &str, contents: &[u8]) -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(name), contents).unwrap();
    dir
}

async fn send(app: Router, req: Request<Body>) -> (Response, Vec<u8>) {
    let resp = app.oneshot(req).await.unwrap();
    let (parts, body) = resp.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap().to_vec();
    (Response::from_parts(parts, Body::empty()), bytes)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_serves_upload_with_type_and_cache_headers() {
    let dir = uploads_with("x.png", b"\x89PNG fake");
    let (resp, body) = send(app(&dir), get("/static/uploads/x.png")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::CONTENT_TYPE], "image/png");
    assert_eq!(resp.headers()[header::CACHE_CONTROL], "public, max-age=31536000, immutable");
    assert_eq!(body, b"\x89PNG fake");
}

#[tokio::test]
async fn test_missing_upload_is_404() {
    let dir = uploads_with("x.png", b"png");
    let (resp, body) = send(app(&dir), get("/static/uploads/missing.png")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(resp.headers().get(header::CACHE_CONTROL).is_none());
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["message"], "Not found");
}

#[tokio::test]
async fn test_nested_or_parent_paths_rejected() {
    let dir = uploads_with("x.png", b"png");
    std::fs::create_dir(dir.path().join("nested")).unwrap();
    std::fs::write(dir.path().join("nested").join("y.png"), b"png").unwrap();
    for uri in ["/static/uploads/nested/y.png", "/static/uploads/..%2Fx.png", "/static/uploads/x..png"] {
        let (resp, body) = send(app(&dir), get(uri)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "Invalid filename");
    }
}

#[tokio::test]
async fn test_range_request_returns_partial_content() {
    let dir = uploads_with("clip.mp4", b"0123456789");
    let req = Request::builder().uri("/static/uploads/clip.mp4").header(header::RANGE, "bytes=2-5").body(Body::empty()).unwrap();
    let (resp, body) = send(app(&dir), req).await;
    assert_eq!(resp.status(), StatusCode::PARTIAL_CONTENT);
    assert_eq!(resp.headers()[header::CONTENT_RANGE], "bytes 2-5/10");
    assert_eq!(resp.headers()[header::CONTENT_TYPE], "video/mp4");
    assert_eq!(body, b"2345");
}
