//! Report data compiler.
//!
//! Runs the formula library, the classifier and the composite rules over
//! one examination snapshot and flattens everything into a
//! [`ReportRecord`] whose keys are exactly [`REPORT_KEYS`].

mod input;
mod keys;
mod sections;

use eco_model::{EngineOptions, ReferenceTable, ReportRecord};
use tracing::{info_span, warn};

use crate::classifier::Classifier;

pub use input::{
    AortaSection, AorticValveSection, DiastolicSection, ExamInput, Field, LeftAtriumSection,
    LeftVentricleSection, MitralValveSection, PatientSection, PericardiumSection,
    RightHeartSection, TricuspidPulmonarySection,
};
pub use keys::{CONCLUSIONS_KEY, REPORT_KEYS};

/// Compile one examination into the flat report record.
///
/// Pure: the same snapshot, table and options always give the same record.
/// Every key of [`REPORT_KEYS`] is present; values that could not be
/// evaluated hold [`EngineOptions::absent_text`].
pub fn compile_report(
    exam: &ExamInput,
    table: &ReferenceTable,
    options: &EngineOptions,
) -> ReportRecord {
    let span = info_span!("compile_report", table = table.source.as_deref().unwrap_or("inline"));
    let _guard = span.enter();

    let ctx = sections::SectionContext::new(exam, Classifier::new(table), options);
    let mut out = sections::ReportBuilder::default();
    sections::map_patient(&exam.patient, &ctx, &mut out);
    sections::map_left_ventricle(&exam.left_ventricle, &ctx, &mut out);
    sections::map_diastolic(&exam.diastolic, &ctx, &mut out);
    sections::map_right_heart(&exam.right_heart, &ctx, &mut out);
    sections::map_left_atrium(&exam.left_atrium, &ctx, &mut out);
    sections::map_aortic_valve(&exam.aortic_valve, &ctx, &mut out);
    sections::map_mitral_valve(&exam.mitral_valve, &ctx, &mut out);
    sections::map_tricuspid_pulmonary(&exam.tricuspid_pulmonary, &ctx, &mut out);
    sections::map_aorta(&exam.aorta, &ctx, &mut out);
    sections::map_pericardium(&exam.pericardium, &mut out);

    let mut record = out.finish();
    for key in record.missing_keys(REPORT_KEYS) {
        warn!(key, "report key not produced by any section");
        record.insert(key, "");
    }
    record.fill_empty(&options.absent_text);
    record
}
