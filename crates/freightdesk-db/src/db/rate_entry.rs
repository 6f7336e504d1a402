use freightdesk_core::models::{RateEntry, UpdateRateEntryRequest};
use freightdesk_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for validated rate entries
#[derive(Clone)]
pub struct RateEntryRepository {
    pool: PgPool,
}

impl RateEntryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Entries for one file, in source row order
    #[tracing::instrument(skip(self), fields(db.table = "rate_entries", db.operation = "select", file_id = %file_id))]
    pub async fn list_by_file(&self, file_id: Uuid) -> Result<Vec<RateEntry>, AppError> {
        let entries = sqlx::query_as::<Postgres, RateEntry>(
            r#"
            SELECT id, file_id, origin, destination, weight, service_type,
                   rate, currency, effective_date, expiry_date
            FROM rate_entries
            WHERE file_id = $1
            ORDER BY row_index ASC
            "#,
        )
        .bind(file_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    #[tracing::instrument(skip(self), fields(db.table = "rate_entries", db.operation = "select", db.record_id = %id))]
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<RateEntry>, AppError> {
        let entry = sqlx::query_as::<Postgres, RateEntry>(
            r#"
            SELECT id, file_id, origin, destination, weight, service_type,
                   rate, currency, effective_date, expiry_date
            FROM rate_entries
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry)
    }

    /// Partial field edit for the maintenance interface. The current row is
    /// fetched first so absent fields keep their stored values.
    #[tracing::instrument(skip(self, update), fields(db.table = "rate_entries", db.operation = "update", db.record_id = %id))]
    pub async fn update(
        &self,
        id: Uuid,
        update: UpdateRateEntryRequest,
    ) -> Result<RateEntry, AppError> {
        let current = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Rate entry {} not found", id)))?;

        let updated = update.apply_to(current);

        let entry = sqlx::query_as::<Postgres, RateEntry>(
            r#"
            UPDATE rate_entries
            SET origin = $2, destination = $3, weight = $4, service_type = $5,
                rate = $6, currency = $7, effective_date = $8, expiry_date = $9
            WHERE id = $1
            RETURNING id, file_id, origin, destination, weight, service_type,
                      rate, currency, effective_date, expiry_date
            "#,
        )
        .bind(id)
        .bind(&updated.origin)
        .bind(&updated.destination)
        .bind(&updated.weight)
        .bind(&updated.service_type)
        .bind(updated.rate)
        .bind(&updated.currency)
        .bind(updated.effective_date)
        .bind(updated.expiry_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(entry)
    }
}
