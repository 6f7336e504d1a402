use freightdesk_core::models::{RateFile, RateFileStatus};
use freightdesk_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for uploaded rate file records
#[derive(Clone)]
pub struct RateFileRepository {
    pool: PgPool,
}

impl RateFileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new file record in the `pending` state
    #[tracing::instrument(skip(self), fields(db.table = "rate_files", db.operation = "insert"))]
    pub async fn create(&self, filename: &str) -> Result<RateFile, AppError> {
        let file = sqlx::query_as::<Postgres, RateFile>(
            r#"
            INSERT INTO rate_files (id, filename, uploaded_at, status)
            VALUES ($1, $2, now(), $3)
            RETURNING id, filename, uploaded_at, status, error_details
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(filename)
        .bind(RateFileStatus::Pending)
        .fetch_one(&self.pool)
        .await?;

        Ok(file)
    }

    #[tracing::instrument(skip(self), fields(db.table = "rate_files", db.operation = "select", db.record_id = %id))]
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<RateFile>, AppError> {
        let file = sqlx::query_as::<Postgres, RateFile>(
            "SELECT id, filename, uploaded_at, status, error_details FROM rate_files WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(file)
    }

    /// List all file records, newest upload first
    #[tracing::instrument(skip(self), fields(db.table = "rate_files", db.operation = "select"))]
    pub async fn list(&self) -> Result<Vec<RateFile>, AppError> {
        let files = sqlx::query_as::<Postgres, RateFile>(
            "SELECT id, filename, uploaded_at, status, error_details FROM rate_files ORDER BY uploaded_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(files)
    }

    /// Transition a pending file to `error`, storing the JSON-encoded error
    /// list. Fails when the file is missing or already finalized, so a file
    /// can never leave a terminal state.
    #[tracing::instrument(skip(self, errors), fields(db.table = "rate_files", db.operation = "update", db.record_id = %id))]
    pub async fn mark_error(&self, id: Uuid, errors: &[String]) -> Result<RateFile, AppError> {
        let details = serde_json::to_string(errors)?;
        let file = sqlx::query_as::<Postgres, RateFile>(
            r#"
            UPDATE rate_files
            SET status = $2, error_details = $3
            WHERE id = $1 AND status = $4
            RETURNING id, filename, uploaded_at, status, error_details
            "#,
        )
        .bind(id)
        .bind(RateFileStatus::Error)
        .bind(details)
        .bind(RateFileStatus::Pending)
        .fetch_optional(&self.pool)
        .await?;

        file.ok_or_else(|| {
            AppError::Internal(format!("Pending rate file {} not found for update", id))
        })
    }
}
