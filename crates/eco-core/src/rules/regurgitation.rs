//! Regurgitation grade text and PISA quantification.

use eco_model::{ClassificationResult, Severity};
use eco_normalization::normalize_token;

use super::{Valve, most_severe};
use crate::classifier::Classifier;

/// Semiquantitative regurgitation grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RegurgitationGrade {
    None,
    Trivial,
    Mild,
    Moderate,
    ModerateToSevere,
    Severe,
}

impl RegurgitationGrade {
    fn phrase(&self) -> &'static str {
        match self {
            RegurgitationGrade::None => "",
            RegurgitationGrade::Trivial => "trivial",
            RegurgitationGrade::Mild => "leve",
            RegurgitationGrade::Moderate => "moderada",
            RegurgitationGrade::ModerateToSevere => "moderada a severa",
            RegurgitationGrade::Severe => "severa",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            RegurgitationGrade::None | RegurgitationGrade::Trivial => Severity::Normal,
            RegurgitationGrade::Mild => Severity::Mild,
            RegurgitationGrade::Moderate => Severity::Moderate,
            RegurgitationGrade::ModerateToSevere | RegurgitationGrade::Severe => Severity::Severe,
        }
    }
}

/// Accepted grade tokens, matched after whitespace/case normalization.
const GRADE_TOKENS: &[(RegurgitationGrade, &[&str])] = &[
    (
        RegurgitationGrade::None,
        &["0", "-", "no", "ausente", "sin insuficiencia", "none"],
    ),
    (
        RegurgitationGrade::Trivial,
        &["trivial", "mínima", "minima", "traza", "fisiológica", "fisiologica"],
    ),
    (RegurgitationGrade::Mild, &["+", "1", "1+", "i", "leve"]),
    (RegurgitationGrade::Moderate, &["++", "2", "2+", "ii", "moderada"]),
    (
        RegurgitationGrade::ModerateToSevere,
        &["+++", "3", "3+", "iii", "moderada a severa", "moderada-severa"],
    ),
    (RegurgitationGrade::Severe, &["++++", "4", "4+", "iv", "severa"]),
];

/// Interpretation of a grade field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegurgitationReading {
    NotEvaluated,
    Graded(RegurgitationGrade),
    /// Unrecognised token, reported as typed.
    Verbatim(String),
}

impl RegurgitationReading {
    pub fn severity(&self) -> Severity {
        match self {
            RegurgitationReading::Graded(grade) => grade.severity(),
            RegurgitationReading::NotEvaluated | RegurgitationReading::Verbatim(_) => {
                Severity::Indeterminate
            }
        }
    }
}

pub fn parse_regurgitation_grade(raw: &str) -> RegurgitationReading {
    let token = normalize_token(raw);
    if token.is_empty() {
        return RegurgitationReading::NotEvaluated;
    }
    GRADE_TOKENS
        .iter()
        .find(|(_, tokens)| tokens.contains(&token.as_str()))
        .map_or_else(
            || RegurgitationReading::Verbatim(raw.trim().to_string()),
            |(grade, _)| RegurgitationReading::Graded(*grade),
        )
}

/// Report sentence for one valve's regurgitation grade.
///
/// ```
/// use eco_core::rules::{Valve, regurgitation_text};
///
/// assert_eq!(regurgitation_text(Valve::Mitral, "++"), "Insuficiencia mitral moderada.");
/// assert_eq!(regurgitation_text(Valve::Aortic, ""), "Insuficiencia aórtica no evaluada.");
/// assert_eq!(regurgitation_text(Valve::Tricuspid, "excéntrica"), "excéntrica");
/// ```
pub fn regurgitation_text(valve: Valve, raw: &str) -> String {
    reading_text(valve, &parse_regurgitation_grade(raw))
}

pub fn reading_text(valve: Valve, reading: &RegurgitationReading) -> String {
    match reading {
        RegurgitationReading::NotEvaluated => {
            format!("Insuficiencia {} no evaluada.", valve.adjective())
        }
        RegurgitationReading::Graded(RegurgitationGrade::None) => {
            format!("Sin insuficiencia {}.", valve.adjective())
        }
        RegurgitationReading::Graded(grade) => {
            format!("Insuficiencia {} {}.", valve.adjective(), grade.phrase())
        }
        RegurgitationReading::Verbatim(text) => text.clone(),
    }
}

/// Most severe of the PISA orifice and regurgitant volume classifications.
pub fn quantify_mitral_regurgitation(
    classifier: &Classifier<'_>,
    ero_cm2: &str,
    regurgitant_volume_ml: &str,
) -> Option<ClassificationResult> {
    most_severe([
        classifier.classify_raw("valvulaMitral", "ore", ero_cm2, None),
        classifier.classify_raw("valvulaMitral", "volumenRegurgitante", regurgitant_volume_ml, None),
    ])
}
