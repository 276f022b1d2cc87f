//! Pattern expansion and matching through the executor.

use std::sync::Arc;

use rstest::rstest;
use symq::hir::{ComplexPattern, MatchProblem};
use symq::{Priority, QueryExecutor, Symbol};

use crate::helpers::fixtures::*;

/// `on-` followed by any `js/event`.
fn event_handler() -> Symbol {
    Symbol::builder(attr(), "on-*")
        .priority(Priority::Normal)
        .pattern(Arc::new(ComplexPattern::new().literal("on-").symbols_of(event())))
        .build()
}

fn pattern_executor() -> QueryExecutor {
    executor(vec![
        scope(
            "events",
            vec![Symbol::new(event(), "click"), Symbol::new(event(), "input")],
        ),
        scope("attributes", vec![event_handler(), Symbol::new(attr(), "class")]),
    ])
}

#[test]
fn test_symbol_without_pattern_expands_to_itself() {
    let class = Symbol::new(attr(), "class");
    let executor = executor(vec![scope("attributes", vec![class.clone()])]);

    let listed = executor.list_symbols_query([], attr(), true).run().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].clone().into_symbol(), class);
}

#[test]
fn test_list_expands_patterns_on_request() {
    let executor = pattern_executor();

    let expanded = executor.list_symbols_query([], attr(), true).run().unwrap();
    let names: Vec<&str> = expanded.iter().map(|m| m.name()).collect();
    assert_eq!(names, vec!["on-click", "on-input", "class"]);

    let unexpanded = executor.list_symbols_query([], attr(), false).run().unwrap();
    let names: Vec<&str> = unexpanded.iter().map(|m| m.name()).collect();
    assert_eq!(names, vec!["on-*", "class"]);
}

#[test]
fn test_pattern_match_attributes_segments() {
    let executor = pattern_executor();
    let matches = executor
        .name_match_query([attr().with_name("on-click")])
        .run()
        .unwrap();

    assert_eq!(matches.len(), 1, "Expected one match, got {:?}", matches);
    let segments = matches[0].segments();
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].symbols()[0], event_handler());
    assert_eq!(segments[1].symbols()[0], Symbol::new(event(), "click"));
    assert_eq!(matches[0].problem_count(), 0);
}

#[test]
fn test_pattern_partial_match_marks_unknown_tail() {
    let executor = pattern_executor();
    let matches = executor
        .name_match_query([attr().with_name("on-foo")])
        .run()
        .unwrap();

    assert_eq!(matches.len(), 1);
    let last = matches[0].segments().last().unwrap();
    assert_eq!(last.problem(), Some(MatchProblem::UnknownSymbol));
    assert_eq!((last.start(), last.end()), (3, 6));
}

#[rstest]
#[case("xyz")]
#[case("o")]
fn test_pattern_without_any_parse_yields_nothing(#[case] name: &str) {
    let executor = pattern_executor();
    let matches = executor.name_match_query([attr().with_name(name)]).run().unwrap();
    assert!(matches.is_empty(), "Expected no match for '{}', got {:?}", name, matches);
}

#[test]
fn test_pattern_names_are_completed() {
    let executor = pattern_executor();
    let items = executor
        .code_completion_query([attr().with_name("on-c")], 4)
        .run()
        .unwrap();
    let names: Vec<&str> = items.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(names, vec!["on-click"]);
}
