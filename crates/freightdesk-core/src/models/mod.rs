//! Data models for the application
//!
//! Rate files and rate entries are the two domain records owned by the
//! ingestion pipeline; everything else in the dashboard consumes them.

mod rate_entry;
mod rate_file;

pub use rate_entry::*;
pub use rate_file::*;
