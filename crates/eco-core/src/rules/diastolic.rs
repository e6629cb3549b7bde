//! Diastolic function grading.
//!
//! An ordered cascade over E/A, deceleration time (DT), isovolumic
//! relaxation time (IVRT), pulmonary vein S/D ratio and the Ar−A duration
//! difference. When the cascade does not resolve, the E/e' classification
//! decides between normal and elevated filling pressures.

use std::sync::LazyLock;

use eco_model::{ClassificationResult, Severity};

use super::rule_table::RuleTable;
use super::{Finding, out_of_range_text};

pub const DIASTOLIC_NOT_EVALUATED: &str = "Función diastólica no evaluada.";
pub const DIASTOLIC_INDETERMINATE: &str =
    "Función diastólica indeterminada con los parámetros disponibles.";

/// Parsed diastolic measurements; any of them may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DiastolicInput {
    pub e_a_ratio: Option<f64>,
    /// Deceleration time, ms.
    pub deceleration_ms: Option<f64>,
    /// Isovolumic relaxation time, ms.
    pub ivrt_ms: Option<f64>,
    pub s_d_ratio: Option<f64>,
    /// Pulmonary Ar duration minus mitral A duration, ms.
    pub ar_minus_a_ms: Option<f64>,
}

impl DiastolicInput {
    pub fn is_empty(&self) -> bool {
        self.e_a_ratio.is_none()
            && self.deceleration_ms.is_none()
            && self.ivrt_ms.is_none()
            && self.s_d_ratio.is_none()
            && self.ar_minus_a_ms.is_none()
    }

    /// Pulmonary venous or atrial reversal evidence of raised pressure.
    fn raised_pressure_signs(&self) -> bool {
        self.s_d_ratio.is_some_and(|sd| sd < 1.0)
            || self.ar_minus_a_ms.is_some_and(|d| d >= 30.0)
    }

    fn pseudonormal_e_a(&self) -> bool {
        self.e_a_ratio.is_some_and(|ea| ea > 0.8 && ea < 2.0)
    }
}

/// Diastolic dysfunction grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiastolicGrade {
    Normal,
    /// Grade I, impaired relaxation.
    ImpairedRelaxation,
    /// Grade II, pseudonormal filling.
    Pseudonormal,
    /// Grade III, restrictive filling.
    Restrictive,
    /// Cascade did not resolve.
    Unresolved,
}

impl DiastolicGrade {
    pub fn narrative(&self) -> &'static str {
        match self {
            DiastolicGrade::Normal => "Función diastólica del ventrículo izquierdo normal.",
            DiastolicGrade::ImpairedRelaxation => {
                "Disfunción diastólica grado I (alteración de la relajación)."
            }
            DiastolicGrade::Pseudonormal => "Disfunción diastólica grado II (patrón pseudonormal).",
            DiastolicGrade::Restrictive => "Disfunción diastólica grado III (patrón restrictivo).",
            DiastolicGrade::Unresolved => DIASTOLIC_INDETERMINATE,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            DiastolicGrade::Normal => Severity::Normal,
            DiastolicGrade::ImpairedRelaxation => Severity::Mild,
            DiastolicGrade::Pseudonormal => Severity::Moderate,
            DiastolicGrade::Restrictive => Severity::Severe,
            DiastolicGrade::Unresolved => Severity::Indeterminate,
        }
    }
}

static DIASTOLIC_RULES: LazyLock<RuleTable<DiastolicInput, DiastolicGrade>> =
    LazyLock::new(|| {
        RuleTable::<DiastolicInput, DiastolicGrade>::new("diastolic", DiastolicGrade::Unresolved)
            .rule(
                "grade-iii-restrictive",
                "E/A >= 2, DT < 160 ms and (IVRT < 60 ms or S/D < 1 or Ar-A >= 30 ms)",
                |d| {
                    d.e_a_ratio.is_some_and(|ea| ea >= 2.0)
                        && d.deceleration_ms.is_some_and(|dt| dt < 160.0)
                        && (d.ivrt_ms.is_some_and(|ivrt| ivrt < 60.0) || d.raised_pressure_signs())
                },
                DiastolicGrade::Restrictive,
            )
            .rule(
                "grade-i-relaxation",
                "E/A <= 0.8, DT > 200 ms and IVRT > 100 ms",
                |d| {
                    d.e_a_ratio.is_some_and(|ea| ea <= 0.8)
                        && d.deceleration_ms.is_some_and(|dt| dt > 200.0)
                        && d.ivrt_ms.is_some_and(|ivrt| ivrt > 100.0)
                },
                DiastolicGrade::ImpairedRelaxation,
            )
            .rule(
                "grade-ii-pseudonormal",
                "0.8 < E/A < 2, 160 <= DT <= 200 ms and (S/D < 1 or Ar-A >= 30 ms)",
                |d| {
                    d.pseudonormal_e_a()
                        && d.deceleration_ms.is_some_and(|dt| (160.0..=200.0).contains(&dt))
                        && d.raised_pressure_signs()
                },
                DiastolicGrade::Pseudonormal,
            )
            .rule(
                "normal",
                "0.8 < E/A < 2, 160 <= DT <= 240 ms, no pulmonary venous signs",
                |d| {
                    d.pseudonormal_e_a()
                        && d.deceleration_ms.is_some_and(|dt| (160.0..=240.0).contains(&dt))
                        && !d.raised_pressure_signs()
                },
                DiastolicGrade::Normal,
            )
    });

/// Grade from the cascade alone.
pub fn grade_diastolic_function(input: &DiastolicInput) -> DiastolicGrade {
    let outcome = DIASTOLIC_RULES.evaluate(input);
    tracing::trace!(rule = outcome.rule_id.unwrap_or("default"), "diastolic cascade");
    *outcome.outcome
}

/// Final diastolic assessment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiastolicAssessment {
    pub grade: DiastolicGrade,
    pub text: String,
    pub severity: Severity,
    /// The cascade was unresolved and E/e' fell outside every declared band.
    pub out_of_range: bool,
}

impl DiastolicAssessment {
    pub fn finding(&self) -> Finding {
        if self.out_of_range {
            Finding::unclassified(self.text.clone())
        } else {
            Finding::new(self.text.clone(), self.severity)
        }
    }
}

/// Grade the cascade, falling back to the E/e' classification.
pub fn assess_diastolic_function(
    input: &DiastolicInput,
    e_over_e_prime: Option<&ClassificationResult>,
) -> DiastolicAssessment {
    let grade = grade_diastolic_function(input);
    if grade != DiastolicGrade::Unresolved {
        return DiastolicAssessment {
            grade,
            text: grade.narrative().to_string(),
            severity: grade.severity(),
            out_of_range: false,
        };
    }
    if let Some(result) = e_over_e_prime.filter(|r| r.severity() != Severity::Indeterminate) {
        return DiastolicAssessment {
            grade,
            text: result.narrative.clone(),
            severity: result.severity(),
            out_of_range: false,
        };
    }
    if e_over_e_prime.is_some_and(ClassificationResult::is_out_of_range) {
        return DiastolicAssessment {
            grade,
            text: out_of_range_text("Relación E/e'"),
            severity: Severity::Indeterminate,
            out_of_range: true,
        };
    }
    let text = if input.is_empty() {
        DIASTOLIC_NOT_EVALUATED
    } else {
        DIASTOLIC_INDETERMINATE
    };
    DiastolicAssessment {
        grade,
        text: text.to_string(),
        severity: Severity::Indeterminate,
        out_of_range: false,
    }
}
