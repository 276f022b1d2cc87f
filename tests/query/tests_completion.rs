//! Code-completion query tests.

use std::sync::Arc;

use rstest::rstest;
use symq::query::CompletionItem;
use symq::{
    Priority, QualifiedKind, QualifiedName, QueryExecutor, QueryParams, ResultsCustomizer, Scope,
    ScopeProvider, Symbol,
};

use crate::helpers::fixtures::*;

/// Answers every completion request with a fixed item list.
#[derive(Debug, PartialEq, Eq, Hash)]
struct FixedCompletions(Vec<CompletionItem>);

impl ScopeProvider for FixedCompletions {
    fn code_completions(
        &self,
        _: &QualifiedName,
        _: &QueryParams<'_>,
        _: &[Scope],
    ) -> Vec<CompletionItem> {
        self.0.clone()
    }
}

fn completions(items: Vec<CompletionItem>) -> Scope {
    Scope::opaque(FixedCompletions(items))
}

fn complete(executor: &QueryExecutor, position: usize) -> Vec<CompletionItem> {
    executor
        .code_completion_query([tag().with_name("")], position)
        .run()
        .unwrap()
}

// =============================================================================
// FILTERING
// =============================================================================

#[rstest]
#[case(0, vec!["a"])]
#[case(3, vec!["a", "b"])]
#[case(10, vec!["a", "b", "c"])]
fn test_items_past_cursor_are_dropped(#[case] position: usize, #[case] expected: Vec<&str>) {
    let executor = executor(vec![completions(vec![
        CompletionItem::new("a"),
        CompletionItem::new("b").with_offset(3),
        CompletionItem::new("c").with_offset(10),
    ])]);

    let items = complete(&executor, position);
    let names: Vec<&str> = items.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(names, expected);
}

#[test]
fn test_hidden_items_are_dropped() {
    let executor = executor(vec![completions(vec![
        CompletionItem::new("shown"),
        CompletionItem::new("secret").with_hidden(true),
    ])]);
    let items = complete(&executor, 0);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "shown");
}

#[test]
fn test_default_completion_is_prefix_filtered_case_insensitively() {
    let executor = executor(vec![scope(
        "tags",
        vec![
            Symbol::new(tag(), "div"),
            Symbol::new(tag(), "dialog"),
            Symbol::new(tag(), "span"),
            Symbol::builder(tag(), "dir").hide_from_completion(true).build(),
        ],
    )]);

    let items = executor
        .code_completion_query([tag().with_name("DI")], 2)
        .run()
        .unwrap();
    let names: Vec<&str> = items.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(names, vec!["dialog", "div"]);
}

#[rstest]
#[case("dXX", 1, vec!["dialog", "div"])]
#[case("dia", 3, vec!["dialog"])]
#[case("dia", 99, vec!["dialog"])]
#[case("DIv", 0, vec!["dialog", "div", "span"])]
fn test_prefix_ends_at_cursor(
    #[case] typed: &str,
    #[case] position: usize,
    #[case] expected: Vec<&str>,
) {
    let executor = executor(vec![scope(
        "tags",
        vec![
            Symbol::new(tag(), "div"),
            Symbol::new(tag(), "dialog"),
            Symbol::new(tag(), "span"),
        ],
    )]);

    let items = executor
        .code_completion_query([tag().with_name(typed)], position)
        .run()
        .unwrap();
    let names: Vec<&str> = items.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(names, expected, "Completing {:?} at {}", typed, position);
}

#[test]
fn test_cursor_inside_character_uses_whole_name() {
    let executor = executor(vec![scope(
        "tags",
        vec![Symbol::new(tag(), "é-x"), Symbol::new(tag(), "é-y")],
    )]);
    // Offset 1 splits the two-byte `é`.
    let items = executor
        .code_completion_query([tag().with_name("é-x")], 1)
        .run()
        .unwrap();
    let names: Vec<&str> = items.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(names, vec!["é-x"]);
}

// =============================================================================
// RANKING
// =============================================================================

#[test]
fn test_duplicates_keep_highest_priority_then_proximity() {
    let executor = executor(vec![completions(vec![
        CompletionItem::new("div").with_priority(Priority::Low),
        CompletionItem::new("div").with_priority(Priority::High),
        CompletionItem::new("span").with_proximity(1),
        CompletionItem::new("span").with_proximity(4),
    ])]);

    let items = complete(&executor, 0);
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].name, "div");
    assert_eq!(items[0].priority, Priority::High);
    assert_eq!(items[1].name, "span");
    assert_eq!(items[1].proximity, 4);
}

#[test]
fn test_priority_is_raised_to_owning_symbol() {
    let owner = symbol(tag(), "div", Priority::Highest);
    let executor = executor(vec![completions(vec![
        CompletionItem::new("div").with_symbol(owner),
    ])]);
    assert_eq!(complete(&executor, 0)[0].priority, Priority::Highest);
}

#[rstest]
#[case(0, 1)]
#[case(2, 3)]
#[case(10, 5)]
fn test_proximity_base_grows_by_bounded_step(#[case] first_proximity: i32, #[case] second_base: i32) {
    let executor = executor(vec![
        completions(vec![CompletionItem::new("a").with_proximity(first_proximity)]),
        completions(vec![CompletionItem::new("b")]),
    ]);

    let items = complete(&executor, 0);
    assert_eq!(items[0].proximity, first_proximity);
    assert_eq!(items[1].proximity, second_base);
}

/// An extension symbol scope answering with fixed completions.
fn extension_scope(name: &str, items: Vec<CompletionItem>) -> Scope {
    Scope::Symbol(
        Symbol::builder(tag(), name)
            .extension(true)
            .members(Arc::new(FixedCompletions(items)))
            .build(),
    )
}

#[test]
fn test_same_named_extension_scopes_share_proximity_base() {
    let executor = executor(vec![
        extension_scope("button", vec![CompletionItem::new("a").with_proximity(2)]),
        extension_scope("button", vec![CompletionItem::new("b")]),
        extension_scope("input", vec![CompletionItem::new("c")]),
    ]);

    let items = complete(&executor, 0);
    let proximities: Vec<(&str, i32)> = items
        .iter()
        .map(|item| (item.name.as_str(), item.proximity))
        .collect();
    assert_eq!(proximities, vec![("a", 2), ("b", 0), ("c", 3)]);
}

#[test]
fn test_proximity_saturates() {
    let executor = executor(vec![
        completions(vec![CompletionItem::new("a").with_proximity(i32::MAX)]),
        completions(vec![CompletionItem::new("b").with_proximity(i32::MAX)]),
    ]);

    let items = complete(&executor, 0);
    assert_eq!(items[0].proximity, i32::MAX);
    assert_eq!(items[1].proximity, i32::MAX);
}

// =============================================================================
// CUSTOMIZATION
// =============================================================================

#[derive(Debug, PartialEq, Eq, Hash)]
struct DropPrefixed(&'static str);

impl ResultsCustomizer for DropPrefixed {
    fn apply_completion(
        &self,
        item: CompletionItem,
        _: bool,
        _: &QualifiedKind,
    ) -> Option<CompletionItem> {
        (!item.name.starts_with(self.0)).then_some(item)
    }

    fn name(&self) -> &'static str {
        "DropPrefixed"
    }
}

#[test]
fn test_customizer_may_drop_items() {
    let executor = QueryExecutor::builder()
        .root_scope(completions(vec![
            CompletionItem::new("x-internal"),
            CompletionItem::new("visible"),
        ]))
        .customizer(DropPrefixed("x-"))
        .build();

    let items = complete(&executor, 0);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "visible");
}
