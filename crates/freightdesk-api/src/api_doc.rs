//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use freightdesk_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Freightdesk API",
        version = "0.1.0",
        description = "Rate management API for the logistics dashboard: CSV rate file ingestion and validation, entry maintenance, and CSV export. All endpoints are versioned under /api/v0/."
    ),
    paths(
        handlers::health::health,
        handlers::rate_file_upload::upload_rate_file,
        handlers::rate_files::list_rate_files,
        handlers::rate_files::get_rate_file,
        handlers::rate_entries::list_file_entries,
        handlers::rate_entries::update_rate_entry,
        handlers::rate_export::export_rate_file,
    ),
    components(schemas(
        models::RateFileResponse,
        models::RateFileStatus,
        models::RateEntryResponse,
        models::UpdateRateEntryRequest,
        handlers::health::HealthResponse,
        error::ErrorResponse,
    )),
    tags(
        (name = "rates", description = "Rate file ingestion and management"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;
