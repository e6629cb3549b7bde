//! Integration tests for the command implementations.

use std::fs;
use std::path::PathBuf;

use serde_json::Value;
use tempfile::TempDir;

use eco_cli::cli::{ClassifyArgs, RangesArgs, ReportArgs, ReportFormatArg, SexArg};
use eco_cli::commands::{read_exam, run_check, run_classify, run_ranges, run_report};
use eco_cli::config::load_engine_options;
use eco_core::REPORT_KEYS;
use eco_model::{BsaFormula, UnitPolicy};

const EXAM: &str = r#"{
    "nombre": "Juan Gómez",
    "sexo": "M",
    "peso": 80,
    "talla": 180,
    "ddvi": "50",
    "dsvi": "30",
    "septum": "10",
    "paredPosterior": "10",
    "tapse": "15"
}"#;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write fixture");
    path
}

fn report_args(input: PathBuf) -> ReportArgs {
    ReportArgs {
        input,
        format: ReportFormatArg::Json,
        config: None,
        bsa_formula: None,
        strict_units: false,
        absent_text: None,
    }
}

#[test]
fn report_json_lists_keys_in_report_order() {
    let dir = TempDir::new().expect("temp dir");
    let args = report_args(write(&dir, "exam.json", EXAM));

    let output = run_report(&args).expect("report");
    let value: Value = serde_json::from_str(&output).expect("json output");
    let object = value.as_object().expect("json object");
    let keys: Vec<&str> = object.keys().map(String::as_str).collect();
    assert_eq!(keys, REPORT_KEYS);

    assert_eq!(object["feLineal"], "78.40");
    assert_eq!(object["sexo"], "masculino");
    let right_ventricle = object["diag_ventriculoDerecho"].as_str().unwrap_or_default();
    assert!(right_ventricle.contains("TAPSE disminuido"));
    assert_eq!(object["psvd"], "no evaluado");
}

#[test]
fn blank_study_date_is_set_to_today() {
    let dir = TempDir::new().expect("temp dir");
    let args = report_args(write(&dir, "exam.json", EXAM));

    let output = run_report(&args).expect("report");
    let value: Value = serde_json::from_str(&output).expect("json output");
    let today = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();
    assert_eq!(value["fechaEstudio"], today.as_str());
}

#[test]
fn flags_override_config_file() {
    let dir = TempDir::new().expect("temp dir");
    let config = write(
        &dir,
        "eco.toml",
        "bsa_formula = \"mosteller\"\nabsent_text = \"n/e\"\n",
    );
    let mut args = report_args(write(&dir, "exam.json", EXAM));
    args.config = Some(config);
    args.absent_text = Some("-".to_string());

    let output = run_report(&args).expect("report");
    let value: Value = serde_json::from_str(&output).expect("json output");
    assert_eq!(value["formulaSc"], "mosteller");
    assert_eq!(value["psvd"], "-");
}

#[test]
fn table_format_renders_every_key() {
    let dir = TempDir::new().expect("temp dir");
    let mut args = report_args(write(&dir, "exam.json", EXAM));
    args.format = ReportFormatArg::Table;

    let output = run_report(&args).expect("report");
    assert!(output.contains("diag_conclusiones"));
    assert!(output.contains("superficieCorporal"));
}

#[test]
fn unreadable_exam_names_the_file() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(&dir, "broken.json", "[1, 2");

    let error = read_exam(&path).expect_err("invalid json");
    assert!(format!("{error:#}").contains("broken.json"));

    let missing = dir.path().join("missing.json");
    assert!(run_report(&report_args(missing)).is_err());
}

#[test]
fn config_file_keys_are_optional() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(&dir, "eco.toml", "unit_policy = \"millimetres\"\n");

    let options = load_engine_options(Some(&path)).expect("config");
    assert_eq!(options.unit_policy, UnitPolicy::Millimetres);
    assert_eq!(options.bsa_formula, BsaFormula::DuBois);
    assert_eq!(options.absent_text, "no evaluado");

    let bad = write(&dir, "bad.toml", "unit_policy = \"inches\"\n");
    assert!(load_engine_options(Some(&bad)).is_err());
}

#[test]
fn classify_sex_specific_value() {
    let args = ClassifyArgs {
        category: "ventriculoIzquierdo".to_string(),
        parameter: "imvi".to_string(),
        value: "120".to_string(),
        sex: Some(SexArg::Male),
    };
    let output = run_classify(&args).expect("classify");
    assert!(output.contains("levemente aumentado"));
    assert!(output.contains("matched"));

    let without_sex = ClassifyArgs { sex: None, ..args };
    let output = run_classify(&without_sex).expect("classify");
    assert!(output.contains("sexo no especificado"));
}

#[test]
fn classify_rejects_non_numbers() {
    let args = ClassifyArgs {
        category: "aorta".to_string(),
        parameter: "ascendente".to_string(),
        value: "abc".to_string(),
        sex: None,
    };
    let error = run_classify(&args).expect_err("not a number");
    assert_eq!(error.to_string(), "'abc' is not a number");
}

#[test]
fn ranges_for_one_category() {
    let output = run_ranges(&RangesArgs {
        category: Some("auriculaDerecha".to_string()),
    })
    .expect("ranges");
    assert!(output.contains("auriculaDerecha"));
    assert!(output.contains("severamente dilatada"));
    assert!(output.contains("150"));
    assert!(!output.contains("ventriculoIzquierdo"));

    let unknown = run_ranges(&RangesArgs {
        category: Some("rinon".to_string()),
    });
    assert!(unknown.is_err());
}

#[test]
fn shipped_table_passes_check() {
    let outcome = run_check().expect("check");
    assert!(!outcome.has_errors);
    insta::assert_snapshot!(outcome.rendered, @r"
    Reference table: embedded
    Categories: 10
    Parameters: 31
    No issues found.
    ");
}
