#![deny(unsafe_code)]

//! Echocardiogram derived measurements and diagnostic classification.
//!
//! - **formulas**: clinical formulas over raw form strings
//! - **classifier**: reference range lookups for raw values
//! - **rules**: composite diagnostic rules (geometry, diastolic grade, valves)
//! - **compiler**: flattening of one examination into the report record

pub mod classifier;
pub mod compiler;
pub mod formulas;
pub mod rules;

pub use classifier::Classifier;
pub use compiler::{ExamInput, REPORT_KEYS, compile_report};
