use super::*;
use crate::combinators::retn;
use crate::text::{chr, letter};
use crate::State;
use std::sync::Arc;
use pretty_assertions::assert_eq;

/// `list := '(' list* ')' | letter`, counting letters.
fn letters_in_lists() -> Parser<char, usize> {
    let list: Forward<char, usize> = Forward::new();
    let nested = list
        .parser()
        .many()
        .between(chr('('), chr(')'))
        .map(|counts| counts.into_iter().sum::<usize>());
    list.set(nested.or(letter().map(|_| 1)));
    list.into_parser()
}

#[test]
fn test_recursive_grammar() {
    let parser = letters_in_lists();
    assert_eq!(parser.parse_str("a").ok(), Some(1));
    assert_eq!(parser.parse_str("(a(bc)()d)").ok(), Some(4));
}

#[test]
fn test_deep_nesting_does_not_overflow() {
    let depth = 10_000;
    let input = format!("{}x{}", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(letters_in_lists().parse_str(&input).ok(), Some(1));
}

#[test]
fn test_is_set_and_clones_share_slot() {
    let forward: Forward<char, i32> = Forward::default();
    let alias = forward.clone();
    assert!(!alias.is_set());

    forward.set(retn(5));
    assert!(alias.is_set());
    assert_eq!(alias.parser().parse(&State::from("")).value(), Some(&5));
}

#[test]
#[should_panic(expected = "forward reference run before being assigned")]
fn test_running_unset_reference_panics() {
    let forward: Forward<char, i32> = Forward::new();
    let _ = forward.parser().parse_str("1");
}

#[test]
#[should_panic(expected = "forward reference assigned twice")]
fn test_double_assignment_panics() {
    let forward: Forward<char, i32> = Forward::new();
    forward.set(retn(1));
    forward.set(retn(2));
}

#[test]
fn test_grammar_is_freed_with_its_entry_point() {
    let owner = Arc::new(());
    let watcher = Arc::downgrade(&owner);

    let rule: Forward<char, usize> = Forward::new();
    let nested = {
        let owner = Arc::clone(&owner);
        chr('(')
            .then(rule.parser())
            .skip(chr(')'))
            .map(move |inner| inner + Arc::strong_count(&owner).min(1))
    };
    rule.set(nested.or(retn(0)));
    let parser = rule.into_parser();
    drop(owner);

    assert_eq!(parser.parse_str("(())").ok(), Some(2));
    assert!(watcher.upgrade().is_some());

    drop(parser);
    assert!(watcher.upgrade().is_none(), "grammar outlived its entry point");
}

#[test]
fn test_forward_handle_keeps_grammar_alive() {
    let rule: Forward<char, usize> = Forward::new();
    let inner = rule.parser();
    rule.set(chr('x').then(inner.clone()).map(|n| n + 1).or(retn(0)));

    assert_eq!(inner.parse_str("xxx").ok(), Some(3));
}

#[test]
#[should_panic(expected = "forward reference run after its grammar was dropped")]
fn test_weak_reference_outliving_grammar_panics() {
    let rule: Forward<char, i32> = Forward::new();
    let inner = rule.parser();
    rule.set(retn(1));
    drop(rule);
    let _ = inner.parse_str("");
}
