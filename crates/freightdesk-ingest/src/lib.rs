//! Freightdesk rate ingestion.
//!
//! Parses uploaded CSV rate files, validates every row against the fixed
//! schema, and persists valid rows as rate entries tied to the source file
//! through a pluggable [`RateStore`]. Validation is all-or-nothing at the
//! file level: a single bad row rejects the whole upload with the complete
//! error list so the operator can fix the file in one pass.

pub mod export;
pub mod header;
pub mod pipeline;
pub mod row;
pub mod store;
pub mod tokenizer;

// Re-export the pipeline surface
pub use export::to_csv;
pub use header::{missing_header_errors, REQUIRED_HEADERS};
pub use pipeline::{validate_rate_csv, CsvValidation, IngestPipeline};
pub use row::{currency_is_valid, parse_date, validate_row};
pub use store::{MemoryRateStore, RateStore};
pub use tokenizer::{tokenize, CsvDocument, CsvError, RawRow};
