//! Right heart and pulmonary pressure formulas.

use crate::rules::vena_cava::classify_vena_cava;

use super::common::{non_negative, number, positive, render};

/// Right ventricular fractional area change: `((Ad − As) / Ad) × 100`.
pub fn fractional_area_change(diastolic_area: &str, systolic_area: &str) -> String {
    let value = positive(diastolic_area)
        .zip(non_negative(systolic_area))
        .map(|(ad, as_)| (ad - as_) / ad * 100.0);
    render(value, 2)
}

/// Right ventricular shape index: `basal / longitudinal`.
pub fn eccentricity_index(basal_mm: &str, longitudinal_mm: &str) -> String {
    let value = number(basal_mm)
        .zip(positive(longitudinal_mm))
        .map(|(basal, length)| basal / length);
    render(value, 2)
}

/// Basal chamber ratio: `RV basal / LV basal`.
pub fn rv_lv_ratio(basal_rv_mm: &str, basal_lv_mm: &str) -> String {
    let value = number(basal_rv_mm)
        .zip(positive(basal_lv_mm))
        .map(|(rv, lv)| rv / lv);
    render(value, 2)
}

/// Right atrial pressure (mmHg) estimated from the inferior vena cava.
///
/// ```
/// use eco_core::formulas::estimate_right_atrial_pressure;
///
/// assert_eq!(estimate_right_atrial_pressure("18", "60"), "3");
/// assert_eq!(estimate_right_atrial_pressure("25", "30"), "15");
/// assert_eq!(estimate_right_atrial_pressure("21", "50"), "8");
/// assert_eq!(estimate_right_atrial_pressure("", "50"), "");
/// ```
pub fn estimate_right_atrial_pressure(ivc_diameter_mm: &str, collapse_pct: &str) -> String {
    classify_vena_cava(ivc_diameter_mm, collapse_pct)
        .map(|tier| tier.right_atrial_pressure().to_string())
        .unwrap_or_default()
}

/// Right ventricular systolic pressure: `4 × (V_TR m/s)² + RAP`.
///
/// The regurgitant velocity is entered in cm/s.
pub fn rv_systolic_pressure(tr_velocity_cm_s: &str, rap_mmhg: &str) -> String {
    let value = non_negative(tr_velocity_cm_s)
        .zip(non_negative(rap_mmhg))
        .map(|(v, rap)| {
            let v = v / 100.0;
            4.0 * v * v + rap
        });
    render(value, 1)
}

/// Mean pulmonary artery pressure from the pulmonary acceleration time
/// (Mahan): `79 − 0.45 × AT`.
pub fn mean_pulmonary_pressure_from_acceleration(acceleration_ms: &str) -> String {
    let value = positive(acceleration_ms)
        .map(|at| 79.0 - 0.45 * at)
        .filter(|pressure| *pressure > 0.0);
    render(value, 1)
}
