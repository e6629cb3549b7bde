pub mod enums;
pub mod error;
pub mod options;
pub mod ranges;
pub mod record;

pub use enums::{BsaFormula, Severity, Sex, UnitPolicy};
pub use error::{EcoError, Result};
pub use options::{DEFAULT_ABSENT_TEXT, EngineOptions};
pub use ranges::{
    ClassificationResult, MatchKind, ParameterRanges, RangeGroup, ReferenceCategory,
    ReferenceRange, ReferenceTable, SEX_REQUIRED_TEXT, UNKNOWN_CLASSIFICATION,
    UNKNOWN_PARAMETER_TEXT, classify_entries,
};
pub use record::ReportRecord;
