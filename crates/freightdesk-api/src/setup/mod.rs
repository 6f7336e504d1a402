//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from
//! main.rs for better organization and testability.

pub mod database;
pub mod routes;
pub mod server;
pub mod telemetry;

use crate::state::AppState;
use anyhow::{Context, Result};
use freightdesk_core::Config;
use freightdesk_db::PgRateStore;
use freightdesk_ingest::RateStore;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    telemetry::init_tracing();

    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;
    tracing::info!("Configuration loaded and validated successfully");

    // Setup database
    let pool = database::setup_database(&config).await?;
    let store: Arc<dyn RateStore> = Arc::new(PgRateStore::new(pool));

    let state = Arc::new(AppState::new(config.clone(), store));

    // Setup routes
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
