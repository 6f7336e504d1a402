//! Freightdesk database layer.
//!
//! Postgres repositories for rate files and rate entries, plus the
//! transactional [`PgRateStore`] that backs the ingestion pipeline in
//! production.

mod db;

pub use db::{PgRateStore, RateEntryRepository, RateFileRepository};
