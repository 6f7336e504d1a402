//! CSV re-serialization for rate export/download.

use freightdesk_core::models::RateEntry;

use crate::header::REQUIRED_HEADERS;

/// Render entries back to CSV: the fixed header line plus one line per
/// entry, in header column order. Rates render via `f64` display (no fixed
/// decimal places) and dates as `YYYY-MM-DD`. Embedded commas are not
/// escaped, mirroring the tokenizer's lack of quoting support.
pub fn to_csv(entries: &[RateEntry]) -> String {
    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(REQUIRED_HEADERS.join(","));
    for entry in entries {
        lines.push(format!(
            "{},{},{},{},{},{},{},{}",
            entry.origin,
            entry.destination,
            entry.weight,
            entry.service_type,
            entry.rate,
            entry.currency,
            entry.effective_date,
            entry.expiry_date,
        ));
    }
    lines.join("\n")
}
