//! File-level orchestration: the rate file state machine.
//!
//! One upload is tokenized, validated, and persisted (or rejected) within a
//! single call. The file record is created `pending`, then moved exactly
//! once to `processed` or `error`; persistence is all-or-nothing at the file
//! level even though validation is row-granular.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use freightdesk_core::models::{RateEntryCandidate, RateFile};
use freightdesk_core::AppError;

use crate::header::missing_header_errors;
use crate::row::validate_row;
use crate::store::RateStore;
use crate::tokenizer::{tokenize, CsvError};

/// Outcome of validating one CSV blob, before anything is persisted.
#[derive(Debug)]
pub enum CsvValidation {
    Valid(Vec<RateEntryCandidate>),
    Invalid(Vec<String>),
}

impl CsvValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, CsvValidation::Valid(_))
    }
}

/// Validate a full CSV blob without touching storage.
///
/// Structural problems (empty blob, no data rows) and schema problems
/// (missing headers) are terminal on their own; header failures
/// short-circuit row validation so the result carries only header messages.
/// Otherwise every row is validated and all row errors are accumulated in
/// source order.
pub fn validate_rate_csv(content: &str) -> CsvValidation {
    let document = match tokenize(content) {
        Ok(document) => document,
        Err(CsvError::EmptyInput) => {
            return CsvValidation::Invalid(vec!["CSV file is empty".to_string()])
        }
    };

    let header_errors = missing_header_errors(&document.headers);
    if !header_errors.is_empty() {
        return CsvValidation::Invalid(header_errors);
    }

    if document.rows.is_empty() {
        return CsvValidation::Invalid(vec!["CSV file has no data rows".to_string()]);
    }

    let mut errors = Vec::new();
    let mut candidates = Vec::with_capacity(document.rows.len());
    for row in &document.rows {
        match validate_row(row) {
            Ok(candidate) => candidates.push(candidate),
            Err(row_errors) => errors.extend(row_errors),
        }
    }

    if errors.is_empty() {
        CsvValidation::Valid(candidates)
    } else {
        CsvValidation::Invalid(errors)
    }
}

/// Synchronous ingestion front door for uploaded rate files.
#[derive(Clone)]
pub struct IngestPipeline {
    store: Arc<dyn RateStore>,
}

impl IngestPipeline {
    pub fn new(store: Arc<dyn RateStore>) -> Self {
        Self { store }
    }

    /// Ingest one uploaded file and return its terminal record.
    ///
    /// Validation failures are a domain outcome, not an error: the returned
    /// file carries status `error` and the full message list. `Err` is
    /// reserved for storage failures. A panic inside validation is
    /// downgraded to a single-element error list so the caller still
    /// receives a terminal file record.
    #[tracing::instrument(skip(self, content), fields(filename = %filename, content_bytes = content.len()))]
    pub async fn ingest(&self, filename: &str, content: &str) -> Result<RateFile, AppError> {
        let file = self.store.create_file(filename).await?;

        let outcome = catch_unwind(AssertUnwindSafe(|| validate_rate_csv(content)))
            .unwrap_or_else(|panic| CsvValidation::Invalid(vec![panic_message(panic)]));

        match outcome {
            CsvValidation::Valid(candidates) => {
                let entry_count = candidates.len();
                let file = self.store.mark_processed(file.id, candidates).await?;
                tracing::info!(file_id = %file.id, entry_count, "rate file processed");
                Ok(file)
            }
            CsvValidation::Invalid(errors) => {
                tracing::warn!(
                    file_id = %file.id,
                    error_count = errors.len(),
                    "rate file rejected"
                );
                let file = self.store.mark_error(file.id, errors).await?;
                Ok(file)
            }
        }
    }
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "Unexpected failure while processing CSV".to_string()
    }
}
