//! Application router and its middleware stack.
//!
//! `main.rs` and the integration tests both go through [`build_app_router`],
//! so every test request sees the same layers as production traffic.

use std::time::Duration;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, StatusCode};
use axum::Router;
use newsdesk_cloud::StorageConfig;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::routes;
use crate::state::AppState;

/// Path under which locally stored uploads are served.
pub const UPLOADS_PATH: &str = "/uploads";

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Build the newsroom API with all middleware layers.
///
/// Layers, outermost first: CORS, request id, tracing, request id
/// propagation, gzip, timeout, panic recovery.
pub fn build_app_router(state: AppState, config: &ServerConfig) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    content_routes(config)
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        // Article lists carry full HTML bodies.
        .layer(CompressionLayer::new().gzip(true))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .layer(build_cors_layer(config))
        .with_state(state)
}

/// `/health` at the root, the JSON API under `/api/v1`, and the upload
/// directory when files are kept on local disk.
fn content_routes(config: &ServerConfig) -> Router<AppState> {
    let router = Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes());

    match &config.storage {
        StorageConfig::Local { root, .. } => {
            router.nest_service(UPLOADS_PATH, ServeDir::new(root))
        }
        // S3 objects are fetched from their public URLs.
        StorageConfig::S3 { .. } => router,
    }
}

/// CORS for the admin front end.
///
/// Panics at startup if any configured origin is invalid.
pub fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .map(|o| {
            o.parse()
                .unwrap_or_else(|e| panic!("Invalid CORS origin '{o}': {e}"))
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}
