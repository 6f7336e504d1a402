use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use freightdesk_core::models::{RateEntryResponse, UpdateRateEntryRequest};
use freightdesk_core::AppError;
use freightdesk_ingest::currency_is_valid;
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/v0/rates/files/{id}/entries",
    tag = "rates",
    params(("id" = Uuid, Path, description = "Rate file identifier")),
    responses(
        (status = 200, description = "Entries for one file in source row order; empty for errored files", body = [RateEntryResponse]),
        (status = 404, description = "Unknown rate file", body = ErrorResponse)
    )
)]
pub async fn list_file_entries(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<RateEntryResponse>>, HttpAppError> {
    state
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

    Ok(Json(entries.into_iter().map(RateEntryResponse::from).collect()))
}

/// Field rules mirror row validation: edits must not let a malformed value
/// into a table that uploads could never have produced.
fn validate_update(update: &UpdateRateEntryRequest) -> Result<(), AppError> {
    if !update.has_changes() {
        return Err(AppError::BadRequest("No fields to update".to_string()));
    }

    for (field, value) in [
        ("Origin", &update.origin),
        ("Destination", &update.destination),
        ("Weight", &update.weight),
        ("ServiceType", &update.service_type),
    ] {
        if let Some(value) = value {
            if value.trim().is_empty() {
                return Err(AppError::InvalidInput(format!("{} must not be empty", field)));
            }
        }
    }

    if let Some(rate) = update.rate {
        if !rate.is_finite() {
            return Err(AppError::InvalidInput("Rate must be a number".to_string()));
        }
    }

    if let Some(ref currency) = update.currency {
        if !currency_is_valid(currency) {
            return Err(AppError::InvalidInput(
                "Currency must be a 3-letter code (e.g., USD)".to_string(),
            ));
        }
    }

    Ok(())
}

#[utoipa::path(
    patch,
    path = "/api/v0/rates/entries/{id}",
    tag = "rates",
    params(("id" = Uuid, Path, description = "Rate entry identifier")),
    request_body = UpdateRateEntryRequest,
    responses(
        (status = 200, description = "Updated entry", body = RateEntryResponse),
        (status = 400, description = "Invalid field value", body = ErrorResponse),
        (status = 404, description = "Unknown rate entry", body = ErrorResponse)
    )
)]
pub async fn update_rate_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(update): Json<UpdateRateEntryRequest>,
) -> Result<Json<RateEntryResponse>, HttpAppError> {
    validate_update(&update).map_err(HttpAppError::from)?;

    let entry = state
        .store
        .update_entry(id, update)
        .await
        .map_err(HttpAppError::from)?;

    Ok(Json(RateEntryResponse::from(entry)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_update_rejects_empty_payload() {
        assert!(matches!(
            validate_update(&UpdateRateEntryRequest::default()),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_validate_update_rejects_blank_origin() {
        let update = UpdateRateEntryRequest {
            origin: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            validate_update(&update),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_validate_update_rejects_bad_currency() {
        let update = UpdateRateEntryRequest {
            currency: Some("usd".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            validate_update(&update),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_validate_update_accepts_partial_edit() {
        let update = UpdateRateEntryRequest {
            rate: Some(52.5),
            currency: Some("AED".to_string()),
            ..Default::default()
        };
        assert!(validate_update(&update).is_ok());
    }
}
