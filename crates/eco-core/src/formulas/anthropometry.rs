//! Body surface area and calendar age.

use eco_model::BsaFormula;
use eco_normalization::{age_in_years, parse_clinical_date};

use super::common::{positive, render};

/// Body surface area (m²) from weight (kg) and height (cm).
///
/// ```
/// use eco_core::formulas::body_surface_area;
/// use eco_model::BsaFormula;
///
/// assert_eq!(body_surface_area("50", "170", BsaFormula::DuBois), "1.57");
/// assert_eq!(body_surface_area("50", "170", BsaFormula::Mosteller), "1.54");
/// assert_eq!(body_surface_area("0", "170", BsaFormula::DuBois), "");
/// ```
pub fn body_surface_area(weight_kg: &str, height_cm: &str, formula: BsaFormula) -> String {
    render(body_surface_area_value(weight_kg, height_cm, formula), 2)
}

pub(crate) fn body_surface_area_value(
    weight_kg: &str,
    height_cm: &str,
    formula: BsaFormula,
) -> Option<f64> {
    let weight = positive(weight_kg)?;
    let height = positive(height_cm)?;
    let bsa = match formula {
        BsaFormula::DuBois => 0.007184 * height.powf(0.725) * weight.powf(0.425),
        BsaFormula::Mosteller => (height * weight / 3600.0).sqrt(),
    };
    Some(bsa)
}

/// Whole years between a birth date and the study date; `""` when either
/// date is unparseable or the birth date is later.
pub fn age(birth_date: &str, reference_date: &str) -> String {
    parse_clinical_date(birth_date)
        .zip(parse_clinical_date(reference_date))
        .and_then(|(birth, reference)| age_in_years(birth, reference))
        .map(|years| years.to_string())
        .unwrap_or_default()
}
