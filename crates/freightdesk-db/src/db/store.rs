//! Postgres-backed [`RateStore`].
//!
//! `mark_processed` is the one multi-statement operation: the status flip
//! and the entry inserts share a transaction so a crash mid-batch can never
//! leave a `processed` file with a partial entry set.

use async_trait::async_trait;
use freightdesk_core::models::{
    RateEntry, RateEntryCandidate, RateFile, RateFileStatus, UpdateRateEntryRequest,
};
use freightdesk_core::AppError;
use freightdesk_ingest::RateStore;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use super::rate_entry::RateEntryRepository;
use super::rate_file::RateFileRepository;

#[derive(Clone)]
pub struct PgRateStore {
    pool: PgPool,
    files: RateFileRepository,
    entries: RateEntryRepository,
}

impl PgRateStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            files: RateFileRepository::new(pool.clone()),
            entries: RateEntryRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl RateStore for PgRateStore {
    async fn create_file(&self, filename: &str) -> Result<RateFile, AppError> {
        self.files.create(filename).await
    }

    #[tracing::instrument(skip(self, candidates), fields(db.table = "rate_entries", db.operation = "insert", file_id = %file_id))]
    async fn mark_processed(
        &self,
        file_id: Uuid,
        candidates: Vec<RateEntryCandidate>,
    ) -> Result<RateFile, AppError> {
        let mut tx = self.pool.begin().await?;

        let file = sqlx::query_as::<Postgres, RateFile>(
            r#"
            UPDATE rate_files
            SET status = $2
            WHERE id = $1 AND status = $3
            RETURNING id, filename, uploaded_at, status, error_details
            "#,
        )
        .bind(file_id)
        .bind(RateFileStatus::Processed)
        .bind(RateFileStatus::Pending)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            AppError::Internal(format!("Pending rate file {} not found for update", file_id))
        })?;

        for (row_index, candidate) in candidates.into_iter().enumerate() {
            let entry = candidate.into_entry(Uuid::new_v4(), file_id);
            sqlx::query(
                r#"
                INSERT INTO rate_entries
                    (id, file_id, row_index, origin, destination, weight, service_type,
                     rate, currency, effective_date, expiry_date)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                "#,
            )
            .bind(entry.id)
            .bind(entry.file_id)
            .bind(row_index as i32)
            .bind(&entry.origin)
            .bind(&entry.destination)
            .bind(&entry.weight)
            .bind(&entry.service_type)
            .bind(entry.rate)
            .bind(&entry.currency)
            .bind(entry.effective_date)
            .bind(entry.expiry_date)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(file)
    }

    async fn mark_error(&self, file_id: Uuid, errors: Vec<String>) -> Result<RateFile, AppError> {
        self.files.mark_error(file_id, &errors).await
    }

    async fn get_file(&self, file_id: Uuid) -> Result<Option<RateFile>, AppError> {
        self.files.get_by_id(file_id).await
    }

    async fn list_files(&self) -> Result<Vec<RateFile>, AppError> {
        self.files.list().await
    }

    async fn entries_for_file(&self, file_id: Uuid) -> Result<Vec<RateEntry>, AppError> {
        self.entries.list_by_file(file_id).await
    }

    async fn get_entry(&self, entry_id: Uuid) -> Result<Option<RateEntry>, AppError> {
        self.entries.get_by_id(entry_id).await
    }

    async fn update_entry(
        &self,
        entry_id: Uuid,
        update: UpdateRateEntryRequest,
    ) -> Result<RateEntry, AppError> {
        self.entries.update(entry_id, update).await
    }
}
