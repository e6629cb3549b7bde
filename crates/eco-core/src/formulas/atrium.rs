//! Atrial formulas.

use super::common::{positive, render};

/// Left atrial volume by the biplane area-length method, millilitres:
/// `0.85 × A4C × A2C / L`, with the length entered in mm and used in cm.
///
/// ```
/// use eco_core::formulas::left_atrial_volume;
///
/// assert_eq!(left_atrial_volume("20", "20", "50"), "68.0");
/// assert_eq!(left_atrial_volume("20", "20", "0"), "");
/// ```
pub fn left_atrial_volume(area_4c_cm2: &str, area_2c_cm2: &str, length_mm: &str) -> String {
    render(left_atrial_volume_value(area_4c_cm2, area_2c_cm2, length_mm), 1)
}

fn left_atrial_volume_value(area_4c: &str, area_2c: &str, length_mm: &str) -> Option<f64> {
    let a4c = positive(area_4c)?;
    let a2c = positive(area_2c)?;
    let length_cm = positive(length_mm)? / 10.0;
    Some(0.85 * a4c * a2c / length_cm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_every_operand() {
        assert_eq!(left_atrial_volume("", "20", "50"), "");
        assert_eq!(left_atrial_volume("20", "abc", "50"), "");
        assert_eq!(left_atrial_volume("20,0", "20", "50"), "68.0");
    }
}
