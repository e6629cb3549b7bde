//! Normalization of categorical form tokens.

use eco_model::{BsaFormula, Sex};

/// Parse a sex indicator ("M", "F", "masculino", "femenino", ...).
pub fn parse_sex(raw: &str) -> Option<Sex> {
    raw.parse().ok()
}

/// Parse a body surface area formula selector ("dubois", "mosteller").
pub fn parse_bsa_formula(raw: &str) -> Option<BsaFormula> {
    raw.parse().ok()
}

/// Lowercase, trimmed token with collapsed inner whitespace.
pub fn normalize_token(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
