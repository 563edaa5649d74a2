use std::collections::HashSet;

use super::*;

#[test]
fn indexes_and_names_are_unique() {
    let mut names = HashSet::new();
    let mut indexes = HashSet::new();
    for op in OPERATIONS {
        assert!(names.insert(op.name), "duplicate name {}", op.name);
        assert!(indexes.insert(op.index), "duplicate index {}", op.index);
    }
}

#[test]
fn operator_indexes() {
    assert_eq!(by_name("add").unwrap().index, 0);
    assert_eq!(by_name("mod").unwrap().index, 4);
    assert_eq!(by_name("equal").unwrap().index, 10);
    assert_eq!(by_name("logical_or").unwrap().index, 17);
    assert_eq!(by_name("not").unwrap().index, 21);
    assert_eq!(by_name(CONDITIONAL).unwrap().index, 22);
}

#[test]
fn function_indexes() {
    assert_eq!(function("Flow.index").unwrap().index, 24);
    assert_eq!(function("Flow.makeArrayValue").unwrap().index, 28);
    assert_eq!(function("Math.pow").unwrap().index, 68);
    assert_eq!(function("String.formatPrefix").unwrap().index, 80);
    assert_eq!(function("Flow.themes").unwrap().index, 89);
}

#[test]
fn operators_are_not_functions() {
    assert!(by_name("add").is_some());
    assert!(function("add").is_none());
    assert!(function(CONDITIONAL).is_none());
    assert!(function("Math.nope").is_none());
}

#[test]
fn by_index_skips_gaps() {
    assert!(by_index(69).is_none());
    assert!(by_index(78).is_none());
    assert_eq!(by_index(88).unwrap().name, "Blob.toString");
}

#[test]
fn arity_checks() {
    let round = function("Math.round").unwrap().arity;
    assert!(round.is_variadic());
    assert!(!round.accepts(0));
    assert!(round.accepts(1));
    assert!(round.accepts(2));
    assert!(!round.accepts(3));

    let pad = function("String.padStart").unwrap().arity;
    assert!(!pad.is_variadic());
    assert!(pad.accepts(3));
    assert!(!pad.accepts(2));

    assert_eq!(function("Date.make").unwrap().arity, Arity::Fixed(7));
    assert_eq!(
        function("Math.max").unwrap().arity,
        Arity::Range { min: 2, max: 255 }
    );
}
