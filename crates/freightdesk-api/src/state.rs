//! Application state shared across handlers.

use freightdesk_core::Config;
use freightdesk_ingest::{IngestPipeline, RateStore};
use std::sync::Arc;

/// Handler state: configuration, the rate store, and the ingestion pipeline
/// built on top of it. The store is behind a trait object so router-level
/// tests can swap Postgres for the in-memory backend.
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn RateStore>,
    pub pipeline: IngestPipeline,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn RateStore>) -> Self {
        Self {
            pipeline: IngestPipeline::new(store.clone()),
            config,
            store,
        }
    }
}
