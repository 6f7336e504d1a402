use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle status of an uploaded rate file.
///
/// A file is created `pending`, then transitions exactly once to `processed`
/// or `error` when validation completes. Terminal records are never reworked;
/// a re-upload creates a new file record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "rate_file_status", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum RateFileStatus {
    Pending,
    Processed,
    Error,
}

impl Display for RateFileStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            RateFileStatus::Pending => write!(f, "pending"),
            RateFileStatus::Processed => write!(f, "processed"),
            RateFileStatus::Error => write!(f, "error"),
        }
    }
}

impl FromStr for RateFileStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RateFileStatus::Pending),
            "processed" => Ok(RateFileStatus::Processed),
            "error" => Ok(RateFileStatus::Error),
            _ => Err(anyhow::anyhow!("Invalid rate file status: {}", s)),
        }
    }
}

/// One uploaded CSV document of shipping rates.
///
/// Invariant: `errors` is non-empty if and only if `status` is
/// [`RateFileStatus::Error`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateFile {
    pub id: Uuid,
    pub filename: String,
    pub uploaded_at: DateTime<Utc>,
    pub status: RateFileStatus,
    pub errors: Vec<String>,
}

impl RateFile {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Whether validation has completed for this file.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.status,
            RateFileStatus::Processed | RateFileStatus::Error
        )
    }
}

#[cfg(feature = "sqlx")]
impl sqlx::FromRow<'_, sqlx::postgres::PgRow> for RateFile {
    fn from_row(row: &sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        use sqlx::Row;
        // error_details is a JSON-encoded list of strings, null unless status = 'error'
        let errors = match row.get::<Option<String>, _>("error_details") {
            Some(raw) => serde_json::from_str(&raw).map_err(|e| {
                sqlx::Error::Decode(format!("Failed to parse error_details: {}", e).into())
            })?,
            None => Vec::new(),
        };
        Ok(RateFile {
            id: row.get("id"),
            filename: row.get("filename"),
            uploaded_at: row.get("uploaded_at"),
            status: row.get("status"),
            errors,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RateFileResponse {
    pub id: Uuid,
    pub filename: String,
    pub uploaded_at: DateTime<Utc>,
    pub status: RateFileStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl From<RateFile> for RateFileResponse {
    fn from(file: RateFile) -> Self {
        RateFileResponse {
            id: file.id,
            filename: file.filename,
            uploaded_at: file.uploaded_at,
            status: file.status,
            errors: file.errors,
        }
    }
}
