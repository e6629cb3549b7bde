//! Normalization functions for echocardiogram form input.
//!
//! - **numeric**: locale-tolerant number parsing and fixed-decimal formatting
//! - **datetime**: date parsing and calendar age
//! - **tokens**: sex, BSA formula and free-text token normalization

pub mod datetime;
pub mod numeric;
pub mod tokens;

pub use datetime::{age_in_years, parse_clinical_date};
pub use numeric::{format_fixed, format_optional, parse_clinical_number, parse_positive};
pub use tokens::{normalize_token, parse_bsa_formula, parse_sex};
