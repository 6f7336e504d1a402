use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::validation::validate_rate_file_upload;
use axum::{
    extract::{Multipart, State},
    Json,
};
use freightdesk_core::models::RateFileResponse;
use freightdesk_core::AppError;
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/v0/rates/files",
    tag = "rates",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Terminal rate file record; status is 'processed' or 'error' with the full validation message list", body = RateFileResponse),
        (status = 400, description = "Invalid upload", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn upload_rate_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<RateFileResponse>, HttpAppError> {
    let mut upload: Option<(String, String)> = None;

    while let Some(field) = multipart.next_field().await.map_err(HttpAppError::from)? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("rates.csv").to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map_err(HttpAppError::from)?;

        validate_rate_file_upload(&state.config, &filename, content_type.as_deref(), data.len())
            .map_err(HttpAppError::from)?;

        let content = String::from_utf8(data.to_vec()).map_err(|_| {
            HttpAppError::from(AppError::InvalidInput(
                "Rate file must be valid UTF-8 text".to_string(),
            ))
        })?;

        upload = Some((filename, content));
        break;
    }

    let (filename, content) = upload.ok_or_else(|| {
        HttpAppError::from(AppError::BadRequest(
            "Missing 'file' part in multipart upload".to_string(),
        ))
    })?;

    // Validation failures are a domain outcome: the terminal record comes
    // back with status 'error' and the message list, not an HTTP error.
    let file = state
        .pipeline
        .ingest(&filename, &content)
        .await
        .map_err(HttpAppError::from)?;

    Ok(Json(RateFileResponse::from(file)))
}
