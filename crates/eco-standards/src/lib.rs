#![deny(unsafe_code)]

//! Echocardiographic reference range standards.

pub mod doctor;
pub mod error;
pub mod loader;
pub mod paths;

pub use doctor::{DoctorIssue, DoctorReport, IssueSeverity, doctor};
pub use error::StandardsError;
pub use loader::{
    EMBEDDED_REFERENCE_RANGES, load_default_reference_table, load_reference_table,
    parse_reference_table,
};
pub use paths::{STANDARDS_ENV_VAR, bundled_standards_dir, reference_ranges_path};
