use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use freightdesk_core::models::RateFileResponse;
use freightdesk_core::AppError;
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/v0/rates/files",
    tag = "rates",
    responses(
        (status = 200, description = "All rate files, newest upload first", body = [RateFileResponse]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_rate_files(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RateFileResponse>>, HttpAppError> {
    let files = state.store.list_files().await.map_err(HttpAppError::from)?;
    Ok(Json(files.into_iter().map(RateFileResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v0/rates/files/{id}",
    tag = "rates",
    params(("id" = Uuid, Path, description = "Rate file identifier")),
    responses(
        (status = 200, description = "One rate file record", body = RateFileResponse),
        (status = 404, description = "Unknown rate file", body = ErrorResponse)
    )
)]
pub async fn get_rate_file(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<RateFileResponse>, HttpAppError> {
    let file = state
        .store
        .get_file(id)
        .await
        .map_err(HttpAppError::from)?
        .ok_or_else(|| HttpAppError::from(AppError::NotFound(format!("Rate file {} not found", id))))?;

    Ok(Json(RateFileResponse::from(file)))
}
