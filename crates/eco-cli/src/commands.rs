use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::Local;
use tracing::{info, info_span, warn};

use eco_core::{Classifier, ExamInput, compile_report};
use eco_model::{BsaFormula, EngineOptions, ReferenceTable, ReportRecord, Sex};
use eco_standards::{doctor, load_default_reference_table};

use crate::cli::{BsaFormulaArg, ClassifyArgs, RangesArgs, ReportArgs, ReportFormatArg, SexArg};
use crate::config::{OptionOverrides, apply_overrides, fill_study_date, load_engine_options};
use crate::logging::redact_value;
use crate::summary::{classification_table, doctor_table, ranges_table, report_json, report_table};

/// Output of the `check` command.
#[derive(Debug)]
pub struct CheckOutcome {
    pub rendered: String,
    pub has_errors: bool,
}

pub fn run_report(args: &ReportArgs) -> Result<String> {
    let span = info_span!("report", input = %args.input.display());
    let _guard = span.enter();

    let options = apply_overrides(
        load_engine_options(args.config.as_deref())?,
        &OptionOverrides {
            bsa_formula: args.bsa_formula.map(bsa_formula_from_arg),
            strict_units: args.strict_units,
            absent_text: args.absent_text.clone(),
        },
    );
    let mut exam = read_exam(&args.input)?;
    fill_study_date(&mut exam, Local::now().date_naive());
    let table = reference_table()?;
    let record = compile_exam(&exam, &table, &options);

    match args.format {
        ReportFormatArg::Json => report_json(&record),
        ReportFormatArg::Table => Ok(report_table(&record, &options.absent_text).to_string()),
    }
}

/// Read an examination snapshot from a JSON file.
pub fn read_exam(path: &Path) -> Result<ExamInput> {
    let content =
        fs::read_to_string(path).with_context(|| format!("read examination {}", path.display()))?;
    ExamInput::from_json_str(&content)
        .with_context(|| format!("parse examination {}", path.display()))
}

pub fn compile_exam(
    exam: &ExamInput,
    table: &ReferenceTable,
    options: &EngineOptions,
) -> ReportRecord {
    info!(
        patient = redact_value(exam.patient.name.as_str()),
        document = redact_value(exam.patient.document.as_str()),
        study_date = exam.patient.study_date.as_str(),
        "compiling report"
    );
    let record = compile_report(exam, table, options);
    let conclusions = record.get(eco_core::compiler::CONCLUSIONS_KEY).unwrap_or_default();
    info!(fields = record.len(), conclusions, "report compiled");
    record
}

pub fn run_classify(args: &ClassifyArgs) -> Result<String> {
    let table = reference_table()?;
    let classifier = Classifier::new(&table);
    let sex = args.sex.map(sex_from_arg);
    let Some(result) = classifier.classify_raw(&args.category, &args.parameter, &args.value, sex)
    else {
        bail!("'{}' is not a number", args.value);
    };
    if !result.is_match() {
        warn!(
            category = %args.category,
            parameter = %args.parameter,
            match_kind = result.match_kind.as_str(),
            "value not matched by a declared band"
        );
    }
    Ok(classification_table(&result).to_string())
}

pub fn run_ranges(args: &RangesArgs) -> Result<String> {
    let table = reference_table()?;
    Ok(ranges_table(&table, args.category.as_deref())?.to_string())
}

pub fn run_check() -> Result<CheckOutcome> {
    let table = reference_table()?;
    let report = doctor(&table);
    let mut rendered = format!(
        "Reference table: {}\nCategories: {}\nParameters: {}\n",
        report.source.as_deref().unwrap_or("inline"),
        report.categories,
        report.parameters
    );
    if report.is_clean() {
        rendered.push_str("No issues found.");
    } else {
        rendered.push_str(&doctor_table(&report).to_string());
        rendered.push_str(&format!(
            "\n{} error(s), {} warning(s)",
            report.error_count(),
            report.warning_count()
        ));
    }
    Ok(CheckOutcome {
        rendered,
        has_errors: report.error_count() > 0,
    })
}

fn reference_table() -> Result<ReferenceTable> {
    load_default_reference_table().context("load reference ranges")
}

fn bsa_formula_from_arg(arg: BsaFormulaArg) -> BsaFormula {
    match arg {
        BsaFormulaArg::Dubois => BsaFormula::DuBois,
        BsaFormulaArg::Mosteller => BsaFormula::Mosteller,
    }
}

fn sex_from_arg(arg: SexArg) -> Sex {
    match arg {
        SexArg::Female => Sex::Female,
        SexArg::Male => Sex::Male,
    }
}
