//! Numeric normalization utilities.
//!
//! Form fields arrive as free text typed by the operator, with either a
//! decimal comma ("4,5") or a decimal point ("4.5"). Anything that is not a
//! finite number is "absent", never an error.

/// Parses a clinical number, returning `None` for empty, non-numeric or
/// non-finite input.
///
/// # Examples
/// ```
/// use eco_normalization::numeric::parse_clinical_number;
///
/// assert_eq!(parse_clinical_number("4,5"), Some(4.5));
/// assert_eq!(parse_clinical_number(" 12.25 "), Some(12.25));
/// assert_eq!(parse_clinical_number(""), None);
/// assert_eq!(parse_clinical_number("abc"), None);
/// ```
pub fn parse_clinical_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let normalized = trimmed.replace(',', ".");
    normalized
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Parses a strictly positive clinical number.
pub fn parse_positive(raw: &str) -> Option<f64> {
    parse_clinical_number(raw).filter(|value| *value > 0.0)
}

/// Formats a number with a fixed count of decimals.
///
/// Non-finite values produce the empty-string sentinel.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return String::new();
    }
    let formatted = format!("{value:.decimals$}");
    // "-0.00" reads as a sign error in a report
    if formatted.starts_with('-') && formatted[1..].chars().all(|ch| ch == '0' || ch == '.') {
        return formatted[1..].to_string();
    }
    formatted
}

/// Formats an optional number; absent and non-finite values become `""`.
pub fn format_optional(value: Option<f64>, decimals: usize) -> String {
    value
        .map(|v| format_fixed(v, decimals))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_and_point() {
        assert_eq!(parse_clinical_number("52,3"), Some(52.3));
        assert_eq!(parse_clinical_number("52.3"), Some(52.3));
        assert_eq!(parse_clinical_number("-1"), Some(-1.0));
        assert_eq!(parse_clinical_number("0"), Some(0.0));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_clinical_number("   "), None);
        assert_eq!(parse_clinical_number("12 mm"), None);
        assert_eq!(parse_clinical_number("NaN"), None);
        assert_eq!(parse_clinical_number("inf"), None);
        assert_eq!(parse_clinical_number("1,2,3"), None);
    }

    #[test]
    fn positive_filter() {
        assert_eq!(parse_positive("0"), None);
        assert_eq!(parse_positive("-3"), None);
        assert_eq!(parse_positive("3"), Some(3.0));
    }

    #[test]
    fn formats_fixed_decimals() {
        assert_eq!(format_fixed(40.0, 2), "40.00");
        assert_eq!(format_fixed(64.0, 1), "64.0");
        assert_eq!(format_fixed(1.5685, 2), "1.57");
        assert_eq!(format_fixed(-0.0001, 2), "0.00");
        assert_eq!(format_fixed(f64::NAN, 2), "");
        assert_eq!(format_fixed(f64::INFINITY, 1), "");
    }

    #[test]
    fn formats_optional_values() {
        assert_eq!(format_optional(Some(1.66), 2), "1.66");
        assert_eq!(format_optional(Some(f64::NAN), 2), "");
        assert_eq!(format_optional(None, 1), "");
    }
}
