//! Test helpers: build AppState and router over the in-memory store.
//!
//! Run from workspace root: `cargo test -p freightdesk-api --test rates_test`.
//! No database is needed; the router is wired to `MemoryRateStore`.

#![allow(dead_code)]

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use freightdesk_api::setup::routes::setup_routes;
use freightdesk_api::state::AppState;
use freightdesk_core::Config;
use freightdesk_ingest::{MemoryRateStore, RateStore};
use std::sync::Arc;

pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<MemoryRateStore>,
}

pub fn test_config() -> Config {
    Config {
        server_port: 0,
        database_url: "postgres://unused-in-tests".to_string(),
        db_max_connections: 1,
        db_timeout_seconds: 5,
        cors_origins: vec!["*".to_string()],
        environment: "test".to_string(),
        max_rate_file_size_bytes: 1024 * 1024,
        rate_file_allowed_extensions: vec!["csv".to_string()],
        rate_file_allowed_content_types: vec![
            "text/csv".to_string(),
            "application/csv".to_string(),
        ],
    }
}

pub fn setup_test_app() -> TestApp {
    let config = test_config();
    let store = Arc::new(MemoryRateStore::new());
    let store_dyn: Arc<dyn RateStore> = store.clone();
    let state = Arc::new(AppState::new(config.clone(), store_dyn));
    let router = setup_routes(&config, state).expect("Failed to build router");
    TestApp {
        server: TestServer::new(router).expect("Failed to start test server"),
        store,
    }
}

/// Multipart form with one CSV `file` part.
pub fn csv_upload(content: &str) -> MultipartForm {
    csv_upload_named(content, "rates.csv")
}

pub fn csv_upload_named(content: &str, filename: &str) -> MultipartForm {
    let part = Part::bytes(content.as_bytes().to_vec())
        .file_name(filename.to_string())
        .mime_type("text/csv");
    MultipartForm::new().add_part("file", part)
}
