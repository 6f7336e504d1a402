//! Header validation for rate files.

/// The fixed column set every rate file must carry, in export order.
/// Matching is case-sensitive; column order in the upload does not matter
/// and unknown extra columns are ignored.
pub const REQUIRED_HEADERS: [&str; 8] = [
    "Origin",
    "Destination",
    "Weight",
    "ServiceType",
    "Rate",
    "Currency",
    "EffectiveDate",
    "ExpiryDate",
];

/// One error message per required column absent from `headers`.
/// An empty result means the header row passed.
pub fn missing_header_errors(headers: &[String]) -> Vec<String> {
    REQUIRED_HEADERS
        .iter()
        .filter(|required| !headers.iter().any(|header| header == *required))
        .map(|required| format!("Missing required header: {}", required))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_all_headers_present() {
        assert!(missing_header_errors(&headers(&REQUIRED_HEADERS)).is_empty());
    }

    #[test]
    fn test_order_does_not_matter() {
        let shuffled = headers(&[
            "ExpiryDate",
            "Rate",
            "Origin",
            "Weight",
            "Currency",
            "ServiceType",
            "Destination",
            "EffectiveDate",
        ]);
        assert!(missing_header_errors(&shuffled).is_empty());
    }

    #[test]
    fn test_extra_headers_ignored() {
        let mut with_extra = headers(&REQUIRED_HEADERS);
        with_extra.push("Notes".to_string());
        assert!(missing_header_errors(&with_extra).is_empty());
    }

    #[test]
    fn test_missing_header_reported_by_name() {
        let partial = headers(&[
            "Origin",
            "Destination",
            "Weight",
            "ServiceType",
            "Rate",
            "Currency",
            "EffectiveDate",
        ]);
        assert_eq!(
            missing_header_errors(&partial),
            vec!["Missing required header: ExpiryDate".to_string()]
        );
    }

    #[test]
    fn test_header_match_is_case_sensitive() {
        let lowercased = headers(&[
            "origin",
            "Destination",
            "Weight",
            "ServiceType",
            "Rate",
            "Currency",
            "EffectiveDate",
            "ExpiryDate",
        ]);
        assert_eq!(
            missing_header_errors(&lowercased),
            vec!["Missing required header: Origin".to_string()]
        );
    }

    #[test]
    fn test_all_missing_reports_every_column() {
        let errors = missing_header_errors(&headers(&["foo"]));
        assert_eq!(errors.len(), REQUIRED_HEADERS.len());
        assert_eq!(errors[0], "Missing required header: Origin");
        assert_eq!(errors[7], "Missing required header: ExpiryDate");
    }
}
