//! Left ventricular formulas.
//!
//! Diameters and wall thicknesses are in millimetres, volumes in millilitres.

use eco_model::UnitPolicy;

use super::common::{non_negative, number, positive, render};

/// Linear ejection fraction: `((D³ − S³) / D³) × 100`.
pub fn linear_ejection_fraction(diastolic_mm: &str, systolic_mm: &str) -> String {
    render(linear_ejection_fraction_value(diastolic_mm, systolic_mm), 2)
}

fn linear_ejection_fraction_value(diastolic_mm: &str, systolic_mm: &str) -> Option<f64> {
    let d = positive(diastolic_mm)?;
    let s = non_negative(systolic_mm)?;
    Some((d.powi(3) - s.powi(3)) / d.powi(3) * 100.0)
}

/// Fractional shortening: `((D − S) / D) × 100`.
///
/// ```
/// use eco_core::formulas::fractional_shortening;
///
/// assert_eq!(fractional_shortening("50", "30"), "40.00");
/// assert_eq!(fractional_shortening("", "30"), "");
/// ```
pub fn fractional_shortening(diastolic_mm: &str, systolic_mm: &str) -> String {
    let value = positive(diastolic_mm)
        .zip(non_negative(systolic_mm))
        .map(|(d, s)| (d - s) / d * 100.0);
    render(value, 2)
}

/// Volumetric (Simpson) ejection fraction: `((EDV − ESV) / EDV) × 100`.
pub fn simpson_ejection_fraction(edv_ml: &str, esv_ml: &str) -> String {
    let value = positive(edv_ml)
        .zip(non_negative(esv_ml))
        .map(|(edv, esv)| (edv - esv) / edv * 100.0);
    render(value, 2)
}

/// Stroke volume: `EDV − ESV`.
pub fn stroke_volume(edv_ml: &str, esv_ml: &str) -> String {
    let value = number(edv_ml).zip(number(esv_ml)).map(|(edv, esv)| edv - esv);
    render(value, 1)
}

/// Left ventricular mass (cube formula), grams:
/// `0.8 × {1.04 × [(D + S + P)³ − D³]} + 0.6` with every operand in cm.
pub fn left_ventricular_mass(diastolic_mm: &str, septum_mm: &str, posterior_mm: &str) -> String {
    render(
        left_ventricular_mass_value(diastolic_mm, septum_mm, posterior_mm),
        1,
    )
}

fn left_ventricular_mass_value(
    diastolic_mm: &str,
    septum_mm: &str,
    posterior_mm: &str,
) -> Option<f64> {
    let d = positive(diastolic_mm)? / 10.0;
    let s = positive(septum_mm)? / 10.0;
    let p = positive(posterior_mm)? / 10.0;
    Some(0.8 * (1.04 * ((d + s + p).powi(3) - d.powi(3))) + 0.6)
}

/// Relative wall thickness: `(septum + posterior) / diastolic diameter`.
///
/// With [`UnitPolicy::MagnitudeHeuristic`] any operand below 10 is read as
/// centimetres and multiplied by 10 before dividing.
pub fn relative_wall_thickness(
    septum: &str,
    posterior: &str,
    diastolic: &str,
    policy: UnitPolicy,
) -> String {
    render(
        relative_wall_thickness_value(septum, posterior, diastolic, policy),
        2,
    )
}

fn relative_wall_thickness_value(
    septum: &str,
    posterior: &str,
    diastolic: &str,
    policy: UnitPolicy,
) -> Option<f64> {
    let s = to_millimetres(positive(septum)?, policy);
    let p = to_millimetres(positive(posterior)?, policy);
    let d = to_millimetres(positive(diastolic)?, policy);
    Some((s + p) / d)
}

fn to_millimetres(value: f64, policy: UnitPolicy) -> f64 {
    match policy {
        UnitPolicy::MagnitudeHeuristic if value < 10.0 => value * 10.0,
        _ => value,
    }
}
