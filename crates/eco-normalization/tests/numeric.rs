use eco_normalization::{format_fixed, parse_clinical_number};
use proptest::prelude::*;

proptest! {
    #[test]
    fn parse_never_yields_non_finite(raw in ".*") {
        if let Some(value) = parse_clinical_number(&raw) {
            prop_assert!(value.is_finite());
        }
    }

    #[test]
    fn comma_and_point_agree(int in 0u32..100_000, frac in 0u32..100) {
        let with_point = format!("{int}.{frac:02}");
        let with_comma = format!("{int},{frac:02}");
        prop_assert_eq!(parse_clinical_number(&with_point), parse_clinical_number(&with_comma));
    }

    #[test]
    fn formatting_reparses(value in -1.0e6f64..1.0e6) {
        let text = format_fixed(value, 2);
        let reparsed = parse_clinical_number(&text).expect("formatted number parses");
        prop_assert!((reparsed - value).abs() <= 0.005 + f64::EPSILON * value.abs());
    }
}
