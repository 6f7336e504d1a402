//! Route configuration and setup.

use crate::api_doc::ApiDoc;
use crate::constants::{API_PREFIX, MULTIPART_OVERHEAD_BYTES};
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, patch, post},
    Json, Router,
};
use freightdesk_core::Config;
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(config)?;

    let api = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/openapi.json", get(serve_openapi))
        .route(
            &format!("{}/rates/files", API_PREFIX),
            post(handlers::rate_file_upload::upload_rate_file),
        )
        .route(
            &format!("{}/rates/files", API_PREFIX),
            get(handlers::rate_files::list_rate_files),
        )
        .route(
            &format!("{}/rates/files/{{id}}", API_PREFIX),
            get(handlers::rate_files::get_rate_file),
        )
        .route(
            &format!("{}/rates/files/{{id}}/entries", API_PREFIX),
            get(handlers::rate_entries::list_file_entries),
        )
        .route(
            &format!("{}/rates/files/{{id}}/export", API_PREFIX),
            get(handlers::rate_export::export_rate_file),
        )
        .route(
            &format!("{}/rates/entries/{{id}}", API_PREFIX),
            patch(handlers::rate_entries::update_rate_entry),
        )
        .with_state(state);

    let docs: Router = utoipa_rapidoc::RapiDoc::new("/api/openapi.json")
        .path("/docs")
        .into();

    let http_concurrency_limit = std::env::var("HTTP_CONCURRENCY_LIMIT")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(10_000)
        .max(1);

    let app = api
        .merge(docs)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(DefaultBodyLimit::max(
            config.max_rate_file_size_bytes + MULTIPART_OVERHEAD_BYTES,
        ));

    Ok(app)
}

async fn serve_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    if config.cors_origins.iter().any(|origin| origin == "*") {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    let origins = config
        .cors_origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers(Any))
}
