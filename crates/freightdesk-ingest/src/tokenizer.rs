//! CSV tokenizer for rate files.
//!
//! Turns a raw text blob into a header row and an ordered sequence of
//! header→value mappings, one per non-blank data line. Fields are
//! comma-delimited with no quoted-field support: a field value containing a
//! literal comma shifts column alignment (documented limitation, kept to
//! match the format the dashboard produces and consumes).

use std::collections::HashMap;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CsvError {
    #[error("CSV file is empty")]
    EmptyInput,
}

/// One untyped data row: header-keyed string fields plus the 1-based source
/// line number used in user-facing error messages.
///
/// Never persisted; converted to a typed candidate only after validation.
#[derive(Debug, Clone)]
pub struct RawRow {
    line_number: usize,
    fields: HashMap<String, String>,
}

impl RawRow {
    /// 1-based line index in the source text, header line included.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Field value under the given header, `""` when the row is short or the
    /// header is absent.
    pub fn get(&self, header: &str) -> &str {
        self.fields.get(header).map(String::as_str).unwrap_or("")
    }
}

#[derive(Debug)]
pub struct CsvDocument {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

/// Split a blob into trimmed headers and data rows.
///
/// Accepts `\n` or `\r\n` separators. The first line is always the header
/// row; blank (post-trim) lines are skipped but still advance the source
/// line numbering. Short rows map missing trailing fields to the empty
/// string; extra fields beyond the header count are dropped.
pub fn tokenize(content: &str) -> Result<CsvDocument, CsvError> {
    if content.trim().is_empty() {
        return Err(CsvError::EmptyInput);
    }

    let mut lines = content.lines().enumerate();
    let headers: Vec<String> = match lines.next() {
        Some((_, header_line)) => header_line
            .split(',')
            .map(|h| h.trim().to_string())
            .collect(),
        None => return Err(CsvError::EmptyInput),
    };

    let mut rows = Vec::new();
    for (index, line) in lines {
        if line.trim().is_empty() {
            continue;
        }

        let values: Vec<&str> = line.split(',').map(str::trim).collect();
        let mut fields = HashMap::with_capacity(headers.len());
        for (column, header) in headers.iter().enumerate() {
            let value = values.get(column).copied().unwrap_or("");
            fields.insert(header.clone(), value.to_string());
        }

        rows.push(RawRow {
            line_number: index + 1,
            fields,
        });
    }

    Ok(CsvDocument { headers, rows })
}
