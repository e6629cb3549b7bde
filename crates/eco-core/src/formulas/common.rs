//! Shared helpers for the formula library.

use eco_normalization::{format_optional, parse_clinical_number, parse_positive};

/// Render a computed value; absent or non-finite results become `""`.
pub(crate) fn render(value: Option<f64>, decimals: usize) -> String {
    format_optional(value, decimals)
}

pub(crate) fn number(raw: &str) -> Option<f64> {
    parse_clinical_number(raw)
}

pub(crate) fn positive(raw: &str) -> Option<f64> {
    parse_positive(raw)
}

pub(crate) fn non_negative(raw: &str) -> Option<f64> {
    parse_clinical_number(raw).filter(|v| *v >= 0.0)
}

/// `numerator / denominator` with a divide-by-zero guard (E/A, S/D, E/e').
pub fn ratio(numerator: &str, denominator: &str, decimals: usize) -> String {
    render(ratio_value(numerator, denominator), decimals)
}

fn ratio_value(numerator: &str, denominator: &str) -> Option<f64> {
    let num = number(numerator)?;
    let den = number(denominator).filter(|d| *d != 0.0)?;
    Some(num / den)
}

/// Mean of two readings; a single present reading is returned as is.
pub fn average(first: &str, second: &str, decimals: usize) -> String {
    let value = match (number(first), number(second)) {
        (Some(a), Some(b)) => Some((a + b) / 2.0),
        (Some(a), None) | (None, Some(a)) => Some(a),
        (None, None) => None,
    };
    render(value, decimals)
}

/// `minuend − subtrahend`.
pub fn difference(minuend: &str, subtrahend: &str, decimals: usize) -> String {
    let value = number(minuend).zip(number(subtrahend)).map(|(a, b)| a - b);
    render(value, decimals)
}

/// `value / bsa` (mass index, volume indices).
pub fn indexed_value(value: &str, bsa: &str, decimals: usize) -> String {
    let indexed = number(value).zip(positive(bsa)).map(|(v, s)| v / s);
    render(indexed, decimals)
}
