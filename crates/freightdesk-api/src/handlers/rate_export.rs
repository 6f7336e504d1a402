use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use freightdesk_core::AppError;
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/v0/rates/files/{id}/export",
    tag = "rates",
    params(("id" = Uuid, Path, description = "Rate file identifier")),
    responses(
        (status = 200, description = "CSV rendering of the file's entries", content_type = "text/csv"),
        (status = 404, description = "Unknown rate file", body = ErrorResponse)
    )
)]
pub async fn export_rate_file(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Response, HttpAppError> {
    let file = state
        .store
        .get_file(id)
        .await
        .map_err(HttpAppError::from)?
        .ok_or_else(|| HttpAppError::from(AppError::NotFound(format!("Rate file {} not found", id))))?;

    let entries = state
        .store
        .entries_for_file(id)
        .await
        .map_err(HttpAppError::from)?;

    let csv = freightdesk_ingest::to_csv(&entries);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.filename),
            ),
        ],
        csv,
    )
        .into_response())
}
