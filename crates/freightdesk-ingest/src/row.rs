//! Per-row field validation.
//!
//! Every applicable rule is checked independently so one upload surfaces all
//! of its problems at once; error messages carry the 1-based source line
//! number as "Row N".

use chrono::NaiveDate;
use freightdesk_core::models::RateEntryCandidate;
use regex::Regex;
use std::sync::OnceLock;

use crate::tokenizer::RawRow;

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date pattern"))
}

/// Exactly three uppercase ASCII letters.
pub fn currency_is_valid(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase())
}

/// Strict `YYYY-MM-DD`: the shape must match and the date must exist on the
/// calendar. `chrono` alone would accept unpadded months, so the shape is
/// checked first.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    if !date_pattern().is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Validate one data row against the field rules.
///
/// Returns a typed candidate when every rule passes, or the full list of
/// rule violations for this row (never just the first).
pub fn validate_row(row: &RawRow) -> Result<RateEntryCandidate, Vec<String>> {
    let line = row.line_number();
    let mut errors = Vec::new();

    let origin = row.get("Origin");
    if origin.is_empty() {
        errors.push(format!("Row {}: Missing Origin", line));
    }

    let destination = row.get("Destination");
    if destination.is_empty() {
        errors.push(format!("Row {}: Missing Destination", line));
    }

    let weight = row.get("Weight");
    if weight.is_empty() {
        errors.push(format!("Row {}: Missing Weight", line));
    }

    let service_type = row.get("ServiceType");
    if service_type.is_empty() {
        errors.push(format!("Row {}: Missing ServiceType", line));
    }

    let raw_rate = row.get("Rate");
    let rate = if raw_rate.is_empty() {
        errors.push(format!("Row {}: Missing Rate", line));
        None
    } else {
        match raw_rate.parse::<f64>() {
            Ok(value) => Some(value),
            Err(_) => {
                errors.push(format!("Row {}: Rate must be a number", line));
                None
            }
        }
    };

    let currency = row.get("Currency");
    if currency.is_empty() {
        errors.push(format!("Row {}: Missing Currency", line));
    } else if !currency_is_valid(currency) {
        errors.push(format!(
            "Row {}: Currency must be a 3-letter code (e.g., USD)",
            line
        ));
    }

    let effective_date = validate_date_field(row, "EffectiveDate", line, &mut errors);
    let expiry_date = validate_date_field(row, "ExpiryDate", line, &mut errors);

    match (rate, effective_date, expiry_date) {
        (Some(rate), Some(effective_date), Some(expiry_date)) if errors.is_empty() => {
            Ok(RateEntryCandidate {
                origin: origin.to_string(),
                destination: destination.to_string(),
                weight: weight.to_string(),
                service_type: service_type.to_string(),
                rate,
                currency: currency.to_string(),
                effective_date,
                expiry_date,
            })
        }
        _ => Err(errors),
    }
}

fn validate_date_field(
    row: &RawRow,
    field: &str,
    line: usize,
    errors: &mut Vec<String>,
) -> Option<NaiveDate> {
    let raw = row.get(field);
    if raw.is_empty() {
        errors.push(format!("Row {}: Missing {}", line, field));
        return None;
    }
    match parse_date(raw) {
        Some(date) => Some(date),
        None => {
            errors.push(format!("Row {}: {} must be in YYYY-MM-DD format", line, field));
            None
        }
    }
}
