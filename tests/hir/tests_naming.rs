//! Name conversion tests.

use indexmap::IndexMap;
use rstest::rstest;
use symq::hir::{CaseConverter, NameCase, NameConversion, NameConversionRules};
use symq::{QualifiedKind, SmolStr};

use crate::helpers::fixtures::*;

fn conversion(rules: NameConversionRules) -> NameConversion {
    NameConversion::new(vec![rules], IndexMap::new(), None)
}

fn props_rules() -> NameConversionRules {
    NameConversionRules::new()
        .with_storage(props(), NameCase::KebabCase)
        .with_completion_variants(
            props(),
            CaseConverter::new([NameCase::CamelCase, NameCase::KebabCase]),
        )
        .with_rename(
            props(),
            CaseConverter::new([NameCase::CamelCase, NameCase::KebabCase]),
        )
}

// =============================================================================
// RENAME ADJUSTMENT
// =============================================================================

#[rstest]
#[case(props(), "fooBar")]
#[case(props(), "x")]
#[case(tag(), "DIV")]
#[case(QualifiedKind::new("custom", "thing"), "")]
fn test_adjust_rename_base_case(#[case] kind: QualifiedKind, #[case] name: &str) {
    let naming = conversion(props_rules());
    let qn = kind.with_name(name);
    assert_eq!(naming.adjust_rename(&qn, "newName", qn.name()), "newName");
}

#[rstest]
#[case("fooBar", "bazQux")]
#[case("foo-bar", "baz-qux")]
#[case("unrelated", "bazQux")]
fn test_adjust_rename_follows_occurrence_form(#[case] occurrence: &str, #[case] expected: &str) {
    let naming = conversion(props_rules());
    let qn = props().with_name("fooBar");
    assert_eq!(naming.adjust_rename(&qn, "bazQux", occurrence), expected);
}

// =============================================================================
// TARGETS AND FALLBACKS
// =============================================================================

#[test]
fn test_storage_groups_case_variants() {
    let naming = conversion(props_rules());
    assert_eq!(
        naming.storage_name(&props().with_name("fooBar")),
        naming.storage_name(&props().with_name("foo-bar"))
    );
}

#[test]
fn test_rename_falls_back_to_match_then_storage() {
    let storage_only = conversion(NameConversionRules::new().with_storage(props(), NameCase::SnakeCase));
    assert_eq!(
        storage_only.rename_variants(&props().with_name("fooBar")),
        vec![SmolStr::from("foo_bar")]
    );

    let with_match = conversion(
        NameConversionRules::new()
            .with_storage(props(), NameCase::SnakeCase)
            .with_match(props(), NameCase::Uppercase),
    );
    assert_eq!(
        with_match.rename_variants(&props().with_name("fooBar")),
        vec![SmolStr::from("FOOBAR")]
    );
}

#[rstest]
#[case(tag(), "DiV", "div")]
#[case(attr(), "CLASS", "class")]
#[case(props(), "ClassName", "ClassName")]
fn test_last_resort_rule(#[case] kind: QualifiedKind, #[case] name: &str, #[case] expected: &str) {
    let naming = NameConversion::default();
    assert_eq!(naming.storage_name(&kind.with_name(name)), expected);
}

#[test]
fn test_names_match_across_cases_in_structural_namespace() {
    let naming = NameConversion::default();
    assert!(naming.names_match(&tag().with_name("DIV"), &tag().with_name("div")));
    assert!(!naming.names_match(&props().with_name("Foo"), &props().with_name("foo")));
}

#[cfg(feature = "serde")]
#[test]
fn test_rules_from_json_drive_conversion() {
    let rules = NameConversionRules::from_json(
        r#"{ "storage": { "js/props": ["kebab-case"] },
             "completion": { "js/props": ["camelCase", "kebab-case"] } }"#,
    )
    .unwrap();
    let naming = conversion(rules);
    assert_eq!(naming.storage_name(&props().with_name("fooBar")), "foo-bar");
    assert_eq!(naming.completion_variants(&props().with_name("foo-bar")).len(), 2);
}
