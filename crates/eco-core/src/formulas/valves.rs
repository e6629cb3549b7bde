//! Doppler valve formulas. Velocities are entered in cm/s.

use std::f64::consts::PI;

use super::common::{non_negative, positive, render};

/// Peak instantaneous gradient (mmHg): `4 × (V m/s)²`.
///
/// ```
/// use eco_core::formulas::peak_gradient_from_velocity;
///
/// assert_eq!(peak_gradient_from_velocity("400"), "64.0");
/// assert_eq!(peak_gradient_from_velocity(""), "");
/// ```
pub fn peak_gradient_from_velocity(velocity_cm_s: &str) -> String {
    let value = non_negative(velocity_cm_s).map(|v| {
        let v = v / 100.0;
        4.0 * v * v
    });
    render(value, 1)
}

/// Mitral valve area from pressure half-time: `220 / PHT`.
pub fn mitral_area_pht(pht_ms: &str) -> String {
    render(positive(pht_ms).map(|pht| 220.0 / pht), 2)
}

/// PISA effective regurgitant orifice (cm²): `2πr² × Va / Vmax`.
pub fn effective_regurgitant_orifice(
    radius_cm: &str,
    aliasing_velocity_cm_s: &str,
    peak_velocity_cm_s: &str,
) -> String {
    render(
        effective_regurgitant_orifice_value(radius_cm, aliasing_velocity_cm_s, peak_velocity_cm_s),
        2,
    )
}

fn effective_regurgitant_orifice_value(radius: &str, aliasing: &str, peak: &str) -> Option<f64> {
    let r = positive(radius)?;
    let va = positive(aliasing)?;
    let vmax = positive(peak)?;
    Some(2.0 * PI * r * r * va / vmax)
}

/// Regurgitant volume (ml): `ERO × VTI`.
///
/// ```
/// use eco_core::formulas::regurgitant_volume;
///
/// assert_eq!(regurgitant_volume("0.5", "20"), "10.0");
/// assert_eq!(regurgitant_volume("", "5"), "");
/// ```
pub fn regurgitant_volume(ero_cm2: &str, vti_cm: &str) -> String {
    let value = non_negative(ero_cm2)
        .zip(non_negative(vti_cm))
        .map(|(ero, vti)| ero * vti);
    render(value, 1)
}

/// Aortic valve area by the continuity equation:
/// `0.785 × (LVOT cm)² × VTI_LVOT / VTI_Ao`, LVOT diameter entered in mm.
pub fn aortic_valve_area(lvot_diameter_mm: &str, vti_lvot_cm: &str, vti_aortic_cm: &str) -> String {
    render(
        aortic_valve_area_value(lvot_diameter_mm, vti_lvot_cm, vti_aortic_cm),
        2,
    )
}

fn aortic_valve_area_value(lvot_mm: &str, vti_lvot: &str, vti_aortic: &str) -> Option<f64> {
    let diameter_cm = positive(lvot_mm)? / 10.0;
    let vti_lvot = positive(vti_lvot)?;
    let vti_aortic = positive(vti_aortic)?;
    Some(0.785 * diameter_cm * diameter_cm * vti_lvot / vti_aortic)
}
