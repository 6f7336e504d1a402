//! Transport-level upload validation.
//!
//! These checks belong to the HTTP layer, not the ingestion pipeline: the
//! pipeline receives already-decoded text and does not re-validate size or
//! content type.

use freightdesk_core::{AppError, Config};
use std::path::Path;

/// Enforce the upload contract for a rate file part: allowed extension,
/// CSV-indicating content type (when the client sent one), and the size
/// ceiling from configuration.
pub fn validate_rate_file_upload(
    config: &Config,
    filename: &str,
    content_type: Option<&str>,
    size: usize,
) -> Result<(), AppError> {
    if size == 0 {
        return Err(AppError::InvalidInput("Uploaded file is empty".to_string()));
    }

    if size > config.max_rate_file_size_bytes {
        return Err(AppError::PayloadTooLarge(format!(
            "{} bytes exceeds max {} bytes",
            size, config.max_rate_file_size_bytes
        )));
    }

    let extension = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| AppError::InvalidInput(format!("Missing file extension: {}", filename)))?;

    if !config.rate_file_allowed_extensions.contains(&extension) {
        return Err(AppError::InvalidInput(format!(
            "Invalid extension '{}', allowed: {:?}",
            extension, config.rate_file_allowed_extensions
        )));
    }

    if let Some(content_type) = content_type {
        let normalized = content_type
            .split(';')
            .next()
            .unwrap_or(content_type)
            .trim()
            .to_lowercase();
        if !config
            .rate_file_allowed_content_types
            .iter()
            .any(|ct| ct == &normalized)
        {
            return Err(AppError::InvalidInput(format!(
                "Invalid content type '{}', allowed: {:?}",
                content_type, config.rate_file_allowed_content_types
            )));
        }
    }

    Ok(())
}
