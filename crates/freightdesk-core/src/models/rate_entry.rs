use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// One validated shipping-rate rule from a rate file.
///
/// `weight` is a raw descriptor (e.g. "5kg") and is intentionally not parsed
/// into a numeric/unit pair. Effective and expiry dates are independently
/// valid calendar dates; `effective_date <= expiry_date` is not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct RateEntry {
    pub id: Uuid,
    pub file_id: Uuid,
    pub origin: String,
    pub destination: String,
    pub weight: String,
    pub service_type: String,
    pub rate: f64,
    pub currency: String,
    pub effective_date: NaiveDate,
    pub expiry_date: NaiveDate,
}

/// A fully validated row, typed but not yet persisted.
///
/// Produced only by row validation; rows that fail validation never reach
/// this form, and the untyped header→value mapping is never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct RateEntryCandidate {
    pub origin: String,
    pub destination: String,
    pub weight: String,
    pub service_type: String,
    pub rate: f64,
    pub currency: String,
    pub effective_date: NaiveDate,
    pub expiry_date: NaiveDate,
}

impl RateEntryCandidate {
    /// Attach identifiers to produce a persistable entry.
    pub fn into_entry(self, id: Uuid, file_id: Uuid) -> RateEntry {
        RateEntry {
            id,
            file_id,
            origin: self.origin,
            destination: self.destination,
            weight: self.weight,
            service_type: self.service_type,
            rate: self.rate,
            currency: self.currency,
            effective_date: self.effective_date,
            expiry_date: self.expiry_date,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RateEntryResponse {
    pub id: Uuid,
    pub file_id: Uuid,
    pub origin: String,
    pub destination: String,
    pub weight: String,
    pub service_type: String,
    pub rate: f64,
    pub currency: String,
    pub effective_date: NaiveDate,
    pub expiry_date: NaiveDate,
}

impl From<RateEntry> for RateEntryResponse {
    fn from(entry: RateEntry) -> Self {
        RateEntryResponse {
            id: entry.id,
            file_id: entry.file_id,
            origin: entry.origin,
            destination: entry.destination,
            weight: entry.weight,
            service_type: entry.service_type,
            rate: entry.rate,
            currency: entry.currency,
            effective_date: entry.effective_date,
            expiry_date: entry.expiry_date,
        }
    }
}

/// Partial field edits for the entry maintenance interface.
///
/// Absent fields are left unchanged. Field-level rules (numeric rate,
/// currency code shape, date validity) are re-checked by the HTTP layer
/// before the update reaches storage.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateRateEntryRequest {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub weight: Option<String>,
    pub service_type: Option<String>,
    pub rate: Option<f64>,
    pub currency: Option<String>,
    pub effective_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
}

impl UpdateRateEntryRequest {
    pub fn has_changes(&self) -> bool {
        self.origin.is_some()
            || self.destination.is_some()
            || self.weight.is_some()
            || self.service_type.is_some()
            || self.rate.is_some()
            || self.currency.is_some()
            || self.effective_date.is_some()
            || self.expiry_date.is_some()
    }

    /// Apply this update on top of an existing entry.
    pub fn apply_to(self, entry: RateEntry) -> RateEntry {
        RateEntry {
            id: entry.id,
            file_id: entry.file_id,
            origin: self.origin.unwrap_or(entry.origin),
            destination: self.destination.unwrap_or(entry.destination),
            weight: self.weight.unwrap_or(entry.weight),
            service_type: self.service_type.unwrap_or(entry.service_type),
            rate: self.rate.unwrap_or(entry.rate),
            currency: self.currency.unwrap_or(entry.currency),
            effective_date: self.effective_date.unwrap_or(entry.effective_date),
            expiry_date: self.expiry_date.unwrap_or(entry.expiry_date),
        }
    }
}
