//! Long inputs must not exhaust the stack, whether the grammar repeats
//! iteratively or recurses.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use kombi::combinators::{eof, many, retn};
use kombi::text::{chr, digit, intr};
use kombi::{Forward, Parser};
use pretty_assertions::assert_eq;

/// Counts digits with right recursion: `list := digit list | ε`.
fn right_recursive_count() -> Parser<char, usize> {
    let list: Forward<char, usize> = Forward::new();
    let rest = list.parser().map(|rest: usize| rest + 1);
    let step = digit().bind(move |_| rest.clone());
    list.set(step.or(retn(0)));
    list.into_parser()
}

#[test]
fn many_over_long_input() {
    let input = "7".repeat(100_000);
    let digits = many(digit()).skip(eof()).parse_str(&input).unwrap();
    assert_eq!(digits.len(), 100_000);
    assert!(digits.iter().all(|&c| c == '7'));
}

#[test]
fn sep_by_over_long_input() {
    let input = vec!["12"; 50_000].join(",");
    let numbers = intr().sep_by(chr(',')).parse_str(&input).unwrap();
    assert_eq!(numbers.len(), 50_000);
    assert_eq!(numbers.iter().sum::<i64>(), 600_000);
}

#[test]
fn right_recursive_bind_chain() {
    let input = "1".repeat(10_000);
    assert_eq!(right_recursive_count().parse_str(&input).ok(), Some(10_000));
}

#[test]
fn right_recursive_failure_at_depth() {
    let input = format!("{}x", "1".repeat(10_000));
    let counted = right_recursive_count().skip(eof());
    let failure = counted.parse_str(&input).unwrap_err();
    assert_eq!(failure.position(), 10_000);
}
