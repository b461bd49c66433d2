//! HTTP surface.

use axum::{extract::{Query, State}, http::{HeaderValue, Method, StatusCode}, response::{IntoResponse, Response}, routing::get, Json, Router};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{cors::{AllowOrigin, Any, CorsLayer}, trace::TraceLayer};
use crate::config::CorsOrigins;
use crate::domain::aggregates::HomepagePayload;
use crate::homepage::HomepageAggregator;
use crate::{uploads, HomepageError};

const DEFAULT_UPLOADS_DIR: &str = "static/uploads";

#[derive(Clone)]
pub struct AppState { pub homepage: Arc<HomepageAggregator>, pub uploads_dir: PathBuf }

impl AppState {
    pub fn new(homepage: HomepageAggregator) -> Self { Self { homepage: Arc::new(homepage), uploads_dir: PathBuf::from(DEFAULT_UPLOADS_DIR) } }
    pub fn with_uploads_dir(mut self, dir: impl Into<PathBuf>) -> Self { self.uploads_dir = dir.into(); self }
}

#[derive(Debug, Deserialize)] pub struct HomepageParams { pub locale: Option<String> }

/// Failure rendered as `{"message": ...}`.
#[derive(Debug)]
pub struct ApiError(HomepageError);

impl From<HomepageError> for ApiError {
    fn from(e: HomepageError) -> Self { Self(e) }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(serde_json::json!({"message": self.0.to_string()}))).into_response()
    }
}

pub fn router(state: AppState, cors: &CorsOrigins) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(serde_json::json!({"status": "healthy", "service": "storefront-homepage"})) }))
        .route("/store/homepage", get(get_homepage))
        .nest_service("/static/uploads", uploads::service(&state.uploads_dir))
        .layer(TraceLayer::new_for_http()).layer(cors_layer(cors)).with_state(state)
}

pub fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    match origins {
        CorsOrigins::Any => CorsLayer::permissive(),
        CorsOrigins::List(list) => {
            let allowed: Vec<HeaderValue> = list.iter()
                .filter_map(|origin| match origin.parse::<HeaderValue>() {
                    Ok(v) => Some(v),
                    Err(_) => { tracing::warn!(origin = %origin, "ignoring invalid CORS origin"); None }
                })
                .collect();
            CorsLayer::new().allow_origin(AllowOrigin::list(allowed)).allow_methods([Method::GET, Method::OPTIONS]).allow_headers(Any)
        }
    }
}

async fn get_homepage(State(s): State<AppState>, Query(p): Query<HomepageParams>) -> Result<Json<HomepagePayload>, ApiError> {
    let payload = s.homepage.build(p.locale).await.map_err(|e| {
        tracing::error!(error = %e, "homepage endpoint error");
        ApiError::from(e)
    })?;
    Ok(Json(payload))
}
