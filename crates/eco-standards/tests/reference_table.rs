use std::fs;
use std::path::PathBuf;

use eco_model::{MatchKind, Sex};
use eco_standards::{
    EMBEDDED_REFERENCE_RANGES, bundled_standards_dir, doctor, load_reference_table,
    parse_reference_table, reference_ranges_path,
};

fn unique_temp_dir(name: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!(
        "eco-standards-{}-{}-{}",
        name,
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    dir
}

fn shipped() -> eco_model::ReferenceTable {
    parse_reference_table(EMBEDDED_REFERENCE_RANGES, "embedded").expect("shipped table parses")
}

#[test]
fn every_declared_boundary_matches_its_band() {
    let table = shipped();
    for category in table.categories.values() {
        for parameter in category.parameters.values() {
            for (sex, entries) in parameter.group.variants() {
                for (idx, entry) in entries.iter().enumerate() {
                    for bound in [entry.min, entry.max] {
                        // a bound shared with an earlier band belongs to that band
                        let owner = entries[..idx]
                            .iter()
                            .find(|earlier| earlier.contains(bound))
                            .unwrap_or(entry);
                        let result = table.classify(&category.name, &parameter.name, bound, sex);
                        assert_eq!(
                            result.classification, owner.classification,
                            "{}.{} {:?} at {}",
                            category.name, parameter.name, sex, bound
                        );
                        assert_eq!(result.match_kind, MatchKind::Matched);
                    }
                }
            }
        }
    }
}

#[test]
fn values_between_adjacent_bands_are_matched() {
    let table = shipped();
    for category in table.categories.values() {
        for parameter in category.parameters.values() {
            for (sex, entries) in parameter.group.variants() {
                let mut sorted: Vec<_> = entries.iter().collect();
                sorted.sort_by(|a, b| a.min.total_cmp(&b.min));
                for pair in sorted.windows(2) {
                    let midpoint = (pair[0].max + pair[1].min) / 2.0;
                    for value in [midpoint - 0.005, midpoint, midpoint + 0.005] {
                        let result =
                            table.classify(&category.name, &parameter.name, value, sex);
                        assert_eq!(
                            result.match_kind,
                            MatchKind::Matched,
                            "{}.{} {:?} at {}",
                            category.name,
                            parameter.name,
                            sex,
                            value
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn clinical_cut_points_keep_their_band() {
    let table = shipped();
    let cases = [
        ("valvulaAortica", "gradienteMedio", 40.0, None, "estenosis aórtica severa"),
        ("valvulaAortica", "gradienteMedio", 39.9, None, "estenosis aórtica moderada"),
        ("valvulaAortica", "gradienteMedio", 39.95, None, "estenosis aórtica severa"),
        ("valvulaMitral", "gradienteMedio", 4.95, None, "estenosis mitral moderada"),
        ("ventriculoDerecho", "tapse", 17.0, None, "normal"),
        ("ventriculoDerecho", "tapse", 16.95, None, "disminuido"),
        ("aorta", "raiz", 40.0, Some(Sex::Male), "normal"),
        ("aorta", "raiz", 40.05, Some(Sex::Male), "levemente dilatada"),
        ("ventriculoIzquierdo", "ddvi", 37.75, Some(Sex::Female), "disminuido"),
        ("ventriculoIzquierdo", "fe", 53.995, Some(Sex::Female), "levemente anormal"),
        ("ventriculoIzquierdo", "fe", 54.0, Some(Sex::Female), "normal"),
    ];
    for (category, parameter, value, sex, expected) in cases {
        let result = table.classify(category, parameter, value, sex);
        assert_eq!(
            result.classification, expected,
            "{category}.{parameter} at {value}"
        );
    }
}

#[test]
fn shipped_table_has_no_overlaps_or_gaps() {
    let report = doctor(&shipped());
    assert_eq!(report.error_count(), 0, "{:?}", report.issues);
    assert_eq!(report.warning_count(), 0, "{:?}", report.issues);
    assert_eq!(report.categories, 10);
    assert_eq!(report.parameters, 31);
}

#[test]
fn bundled_file_matches_embedded_table() {
    let path = reference_ranges_path(bundled_standards_dir());
    let loaded = load_reference_table(&path).expect("bundled table loads");
    let embedded = shipped();
    assert_eq!(loaded.categories, embedded.categories);
    assert_eq!(loaded.source.as_deref(), Some("reference_ranges.json"));
}

#[test]
fn loads_table_from_custom_directory() {
    let dir = unique_temp_dir("custom");
    fs::create_dir_all(&dir).unwrap();
    let path = reference_ranges_path(&dir);
    fs::write(
        &path,
        r#"{"aorta": {"raiz": {
            "normal": {"min": 0, "max": 35, "texto": "Raíz normal."},
            "dilatada": {"min": 35.1, "max": 80, "texto": "Raíz dilatada."}
        }}}"#,
    )
    .unwrap();
    let table = load_reference_table(&path).unwrap();
    let result = table.classify("aorta", "raiz", 35.1, Some(Sex::Female));
    assert_eq!(result.narrative, "Raíz dilatada.");
    fs::remove_dir_all(&dir).ok();
}

#[test]
fn missing_file_is_an_io_error() {
    let path = unique_temp_dir("missing").join("reference_ranges.json");
    let err = load_reference_table(&path).unwrap_err();
    assert!(err.to_string().starts_with("failed to read file"));
}

#[test]
fn sex_specific_ejection_fraction() {
    let table = shipped();
    let female = table.classify("ventriculoIzquierdo", "fe", 53.0, Some(Sex::Female));
    let male = table.classify("ventriculoIzquierdo", "fe", 53.0, Some(Sex::Male));
    insta::assert_snapshot!(female.classification, @"levemente anormal");
    insta::assert_snapshot!(male.narrative, @"Función sistólica del ventrículo izquierdo conservada.");
}

#[test]
fn classification_result_shape() {
    let table = shipped();
    let result = table.classify("valvulaAortica", "vmax", 420.0, None);
    insta::assert_json_snapshot!(result, @r#"
    {
      "classification": "estenosis aórtica severa",
      "narrative": "Estenosis aórtica severa.",
      "match_kind": "Matched"
    }
    "#);
}
