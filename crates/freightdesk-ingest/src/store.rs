//! Storage seam for the ingestion pipeline.
//!
//! The pipeline only talks to [`RateStore`]; production backs it with
//! Postgres (freightdesk-db), tests and embedded use with
//! [`MemoryRateStore`]. Identifier uniqueness is the only invariant the
//! pipeline requires of a backend.

use async_trait::async_trait;
use chrono::Utc;
use freightdesk_core::models::{
    RateEntry, RateEntryCandidate, RateFile, RateFileStatus, UpdateRateEntryRequest,
};
use freightdesk_core::AppError;
use std::sync::Mutex;
use uuid::Uuid;

#[async_trait]
pub trait RateStore: Send + Sync {
    /// Create a file record in the `pending` state.
    async fn create_file(&self, filename: &str) -> Result<RateFile, AppError>;

    /// Flip a pending file to `processed` and persist one entry per
    /// candidate, in order. The two steps are atomic on backends that
    /// support it.
    async fn mark_processed(
        &self,
        file_id: Uuid,
        candidates: Vec<RateEntryCandidate>,
    ) -> Result<RateFile, AppError>;

    /// Flip a pending file to `error`, storing the full ordered error list.
    /// No entries are ever written for an errored file.
    async fn mark_error(&self, file_id: Uuid, errors: Vec<String>) -> Result<RateFile, AppError>;

    async fn get_file(&self, file_id: Uuid) -> Result<Option<RateFile>, AppError>;

    /// All files, newest upload first.
    async fn list_files(&self) -> Result<Vec<RateFile>, AppError>;

    /// Entries for one file in insertion order.
    async fn entries_for_file(&self, file_id: Uuid) -> Result<Vec<RateEntry>, AppError>;

    async fn get_entry(&self, entry_id: Uuid) -> Result<Option<RateEntry>, AppError>;

    /// Partial field edit for the maintenance interface. Fails with
    /// `NotFound` for unknown entries.
    async fn update_entry(
        &self,
        entry_id: Uuid,
        update: UpdateRateEntryRequest,
    ) -> Result<RateEntry, AppError>;
}

/// Mutex-guarded in-memory backend.
///
/// Used by tests and as an embedded stand-in when no database is available.
#[derive(Debug, Default)]
pub struct MemoryRateStore {
    inner: Mutex<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    files: Vec<RateFile>,
    entries: Vec<RateEntry>,
}

impl MemoryRateStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryInner> {
        // Lock poisoning only happens if another thread panicked mid-write;
        // the data is plain values, so continue with whatever is there.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl RateStore for MemoryRateStore {
    async fn create_file(&self, filename: &str) -> Result<RateFile, AppError> {
        let file = RateFile {
            id: Uuid::new_v4(),
            filename: filename.to_string(),
            uploaded_at: Utc::now(),
            status: RateFileStatus::Pending,
            errors: Vec::new(),
        };
        self.lock().files.push(file.clone());
        Ok(file)
    }

    async fn mark_processed(
        &self,
        file_id: Uuid,
        candidates: Vec<RateEntryCandidate>,
    ) -> Result<RateFile, AppError> {
        let mut inner = self.lock();
        let file = inner
            .files
            .iter_mut()
            .find(|f| f.id == file_id)
            .ok_or_else(|| AppError::NotFound(format!("Rate file {} not found", file_id)))?;
        if file.status != RateFileStatus::Pending {
            return Err(AppError::Internal(format!(
                "Rate file {} is already {}",
                file_id, file.status
            )));
        }
        file.status = RateFileStatus::Processed;
        let file = file.clone();

        for candidate in candidates {
            let entry = candidate.into_entry(Uuid::new_v4(), file_id);
            inner.entries.push(entry);
        }
        Ok(file)
    }

    async fn mark_error(&self, file_id: Uuid, errors: Vec<String>) -> Result<RateFile, AppError> {
        let mut inner = self.lock();
        let file = inner
            .files
            .iter_mut()
            .find(|f| f.id == file_id)
            .ok_or_else(|| AppError::NotFound(format!("Rate file {} not found", file_id)))?;
        if file.status != RateFileStatus::Pending {
            return Err(AppError::Internal(format!(
                "Rate file {} is already {}",
                file_id, file.status
            )));
        }
        file.status = RateFileStatus::Error;
        file.errors = errors;
        Ok(file.clone())
    }

    async fn get_file(&self, file_id: Uuid) -> Result<Option<RateFile>, AppError> {
        Ok(self.lock().files.iter().find(|f| f.id == file_id).cloned())
    }

    async fn list_files(&self) -> Result<Vec<RateFile>, AppError> {
        Ok(self.lock().files.iter().rev().cloned().collect())
    }

    async fn entries_for_file(&self, file_id: Uuid) -> Result<Vec<RateEntry>, AppError> {
        Ok(self
            .lock()
            .entries
            .iter()
            .filter(|e| e.file_id == file_id)
            .cloned()
            .collect())
    }

    async fn get_entry(&self, entry_id: Uuid) -> Result<Option<RateEntry>, AppError> {
        Ok(self.lock().entries.iter().find(|e| e.id == entry_id).cloned())
    }

    async fn update_entry(
        &self,
        entry_id: Uuid,
        update: UpdateRateEntryRequest,
    ) -> Result<RateEntry, AppError> {
        let mut inner = self.lock();
        let entry = inner
            .entries
            .iter_mut()
            .find(|e| e.id == entry_id)
            .ok_or_else(|| AppError::NotFound(format!("Rate entry {} not found", entry_id)))?;
        *entry = update.apply_to(entry.clone());
        Ok(entry.clone())
    }
}
