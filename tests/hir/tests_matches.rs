//! Match ranking tests.

use rstest::rstest;
use symq::hir::{MatchProblem, SymbolOrigin, select_best};
use symq::{Match, NameSegment, Priority, Symbol};

use crate::helpers::fixtures::*;

fn ranked(priority: Priority, extension: bool) -> Match {
    Match::from_symbol(
        &Symbol::builder(tag(), "btn")
            .priority(priority)
            .extension(extension)
            .build(),
    )
}

// =============================================================================
// SELECT BEST
// =============================================================================

#[rstest]
#[case(Priority::Low, Priority::Normal)]
#[case(Priority::Normal, Priority::High)]
#[case(Priority::Lowest, Priority::Highest)]
fn test_strictly_higher_priority_is_sole_survivor(#[case] lower: Priority, #[case] higher: Priority) {
    let winner = ranked(higher, false);
    for candidates in [
        vec![ranked(lower, false), winner.clone()],
        vec![winner.clone(), ranked(lower, false)],
    ] {
        let best = select_best(candidates);
        assert_eq!(best, vec![winner.clone()], "Expected only {:?} to survive", higher);
    }
}

#[rstest]
#[case(Priority::Low)]
#[case(Priority::Normal)]
#[case(Priority::Highest)]
fn test_non_extension_beats_extension_at_equal_priority(#[case] priority: Priority) {
    let plain = ranked(priority, false);
    let best = select_best(vec![ranked(priority, true), plain.clone()]);
    assert_eq!(best, vec![plain]);
}

#[test]
fn test_priority_outranks_extension_flag() {
    let extension = ranked(Priority::High, true);
    let best = select_best(vec![ranked(Priority::Normal, false), extension.clone()]);
    assert_eq!(best, vec![extension]);
}

#[test]
fn test_unresolved_segment_loses_to_full_coverage() {
    let owner = Symbol::new(attr(), "on");
    let partial = Match::new(
        "onfoo",
        attr(),
        SymbolOrigin::default(),
        vec![
            NameSegment::new(0, 2, vec![owner]),
            NameSegment::unresolved(2, 5, MatchProblem::UnknownSymbol),
        ],
    )
    .with_priority(Priority::Highest);
    let full = Match::from_symbol(&Symbol::new(attr(), "onfoo"));

    assert_eq!(partial.problem_count(), 1);
    assert_eq!(full.coverage(), 5);
    assert_eq!(select_best(vec![partial, full.clone()]), vec![full]);
}

#[test]
fn test_different_kinds_are_not_compared() {
    let a = Match::from_symbol(&symbol(tag(), "x", Priority::Low));
    let b = Match::from_symbol(&symbol(attr(), "x", Priority::High));
    assert_eq!(select_best(vec![a.clone(), b.clone()]).len(), 2);
}

// =============================================================================
// DERIVED PROPERTIES
// =============================================================================

#[test]
fn test_priority_is_highest_found_on_segments() {
    let m = Match::new(
        "ab",
        tag(),
        SymbolOrigin::default(),
        vec![
            NameSegment::new(0, 1, vec![symbol(tag(), "a", Priority::High)]),
            NameSegment::new(1, 2, vec![symbol(tag(), "b", Priority::Low)]),
        ],
    );
    assert_eq!(m.priority(), Some(Priority::High));
}

#[test]
fn test_documentation_from_deepest_supplier() {
    let first = Symbol::builder(tag(), "a").documentation("first").build();
    let second = Symbol::new(tag(), "b");
    let m = Match::new(
        "ab",
        tag(),
        SymbolOrigin::default(),
        vec![
            NameSegment::new(0, 1, vec![first]),
            NameSegment::new(1, 2, vec![second]),
        ],
    );
    assert_eq!(m.documentation(), Some("first"));
}

#[test]
fn test_renamed_match_attributes_original() {
    let original = Match::from_symbol(&symbol(props(), "fooBar", Priority::High));
    let renamed = original.renamed("foo-bar");
    assert_eq!(renamed.name(), "foo-bar");
    assert_eq!(renamed.priority(), Some(Priority::High));
    assert_eq!(renamed.segments()[0].symbols()[0].as_match(), Some(&original));
}
