//! Clinical formula library.
//!
//! Every formula takes raw form strings and returns a fixed-decimal string,
//! or `""` when an input is absent or the result is not a valid number.

mod anthropometry;
mod atrium;
mod common;
mod right_heart;
mod valves;
mod ventricle;

pub(crate) use anthropometry::body_surface_area_value;
pub(crate) use common::{number, render};

pub use anthropometry::{age, body_surface_area};
pub use atrium::left_atrial_volume;
pub use common::{average, difference, indexed_value, ratio};
pub use right_heart::{
    eccentricity_index, estimate_right_atrial_pressure, fractional_area_change,
    mean_pulmonary_pressure_from_acceleration, rv_lv_ratio, rv_systolic_pressure,
};
pub use valves::{
    aortic_valve_area, effective_regurgitant_orifice, mitral_area_pht,
    peak_gradient_from_velocity, regurgitant_volume,
};
pub use ventricle::{
    fractional_shortening, left_ventricular_mass, linear_ejection_fraction,
    relative_wall_thickness, simpson_ejection_fraction, stroke_volume,
};
