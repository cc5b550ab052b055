//! Character-level parsers.
//!
//! Everything here is built from [`satisfy`] and the general combinators;
//! nothing reaches into the engine directly except [`regex`], which needs
//! to match against the remaining input as a whole.

use regex::Regex;

use crate::combinators::{fail, retn, satisfy};
use crate::{Message, Outcome, Parser};

/// Label for [`intr`].
pub const INTEGER_LABEL: &str = "integer";

/// Label for [`dble`].
pub const NUMBER_LABEL: &str = "number";

/// Reported when an integer literal does not fit in `i64`.
pub const INTEGER_RANGE_LABEL: &str = "integer within i64 range";

// === Single characters ===

/// Exactly the character `c`. Expected label: `c` quoted, e.g. `'('`.
pub fn chr(c: char) -> Parser<char, char> {
    satisfy(move |x: &char| *x == c).label(format!("{c:?}"))
}

/// Any alphabetic character.
pub fn letter() -> Parser<char, char> {
    satisfy(|c: &char| c.is_alphabetic()).label("letter")
}

/// An ASCII decimal digit.
pub fn digit() -> Parser<char, char> {
    satisfy(char::is_ascii_digit).label("digit")
}

/// An alphabetic character or ASCII digit.
pub fn alpha_num() -> Parser<char, char> {
    satisfy(|c: &char| c.is_alphabetic() || c.is_ascii_digit()).label("letter or digit")
}

/// A whitespace character.
pub fn space() -> Parser<char, char> {
    satisfy(|c: &char| c.is_whitespace()).label("whitespace")
}

/// Any character from `chars`.
pub fn one_of(chars: &str) -> Parser<char, char> {
    let set: Vec<char> = chars.chars().collect();
    satisfy(move |c: &char| set.contains(c)).label(format!("one of {chars:?}"))
}

/// Any character not in `chars`. Fails at end of input.
pub fn none_of(chars: &str) -> Parser<char, char> {
    let set: Vec<char> = chars.chars().collect();
    satisfy(move |c: &char| !set.contains(c)).label(format!("none of {chars:?}"))
}

// === Sequences ===

/// Exactly the literal `lit`.
///
/// Matches character by character. A partial match has consumed input, so
/// the failure is committed: wrap in [`attempt`](Parser::attempt) to let an
/// alternative start over. A mismatch on the first character fails without
/// consuming and expects the quoted literal.
pub fn string(lit: &str) -> Parser<char, String> {
    let literal = lit.to_string();
    lit.chars()
        .fold(retn(()), |acc, c| acc.then(chr(c)).map(|_| ()))
        .map(move |()| literal.clone())
        .label(format!("{lit:?}"))
}

/// Zero or more whitespace characters. Never fails.
pub fn wspaces() -> Parser<char, ()> {
    space().skip_many()
}

/// `parser` followed by any amount of whitespace.
pub fn lexeme<A: 'static>(parser: Parser<char, A>) -> Parser<char, A> {
    parser.skip(wspaces())
}

// === Numbers ===

/// A signed decimal integer: `[+-]?[0-9]+`.
///
/// Digits accumulate left to right (`value * 10 + digit`). A literal that
/// overflows `i64` fails after the digits, expecting
/// [`INTEGER_RANGE_LABEL`].
pub fn intr() -> Parser<char, i64> {
    sign()
        .bind(|negative| {
            decimal_digits().bind(move |digits| match accumulate_i64(negative, &digits) {
                Some(value) => retn(value),
                None => fail().label(INTEGER_RANGE_LABEL),
            })
        })
        .label(INTEGER_LABEL)
}

/// A signed decimal floating-point number:
/// `[+-]?[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?`.
///
/// The integer part is mandatory.
pub fn dble() -> Parser<char, f64> {
    sign()
        .and(decimal_digits())
        .and(fraction())
        .and(exponent())
        .map(|(((negative, whole), frac), exp)| assemble_f64(negative, &whole, &frac, exp))
        .label(NUMBER_LABEL)
}

/// `true` for a leading `-`, `false` for `+` or no sign.
fn sign() -> Parser<char, bool> {
    one_of("+-").map(|c| c == '-').or(retn(false))
}

fn decimal_digits() -> Parser<char, Vec<u32>> {
    digit().map(|c| c.to_digit(10).unwrap_or(0)).many1()
}

fn fraction() -> Parser<char, Vec<u32>> {
    chr('.')
        .then(decimal_digits())
        .optional()
        .map(Option::unwrap_or_default)
}

fn exponent() -> Parser<char, i32> {
    one_of("eE")
        .then(sign().and(decimal_digits()))
        .map(|(negative, digits)| {
            let magnitude = digits.iter().fold(0_i32, |acc, &d| {
                acc.saturating_mul(10)
                    .saturating_add(i32::try_from(d).unwrap_or(0))
            });
            if negative {
                -magnitude
            } else {
                magnitude
            }
        })
        .optional()
        .map(|exp| exp.unwrap_or(0))
}

fn accumulate_i64(negative: bool, digits: &[u32]) -> Option<i64> {
    digits.iter().try_fold(0_i64, |acc, &d| {
        let shifted = acc.checked_mul(10)?;
        if negative {
            shifted.checked_sub(i64::from(d))
        } else {
            shifted.checked_add(i64::from(d))
        }
    })
}

fn assemble_f64(negative: bool, whole: &[u32], frac: &[u32], exp: i32) -> f64 {
    let mantissa = whole
        .iter()
        .chain(frac)
        .fold(0.0_f64, |acc, &d| acc * 10.0 + f64::from(d));
    let frac_len = i32::try_from(frac.len()).unwrap_or(i32::MAX);
    let scale = exp.saturating_sub(frac_len);
    // Dividing by an exact power of ten keeps short decimals like 1.2 exact.
    let magnitude = if scale < 0 {
        mantissa / 10_f64.powi(scale.saturating_neg())
    } else {
        mantissa * 10_f64.powi(scale)
    };
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

// === Regular expressions ===

/// Text matching `pattern`, anchored at the current position.
///
/// Returns the matched text. An empty match succeeds without consuming.
/// On no match, fails without consuming and expects `/pattern/`.
///
/// Matches run against [`State::remaining_str`], so repeating a regex
/// parser costs time in proportion to the text it matches.
///
/// [`State::remaining_str`]: crate::State::remaining_str
pub fn regex(pattern: &str) -> Result<Parser<char, String>, regex::Error> {
    let anchored = Regex::new(&format!("^(?:{pattern})"))?;
    let label = format!("/{pattern}/");
    Ok(Parser::new(move |state| {
        match anchored.find(state.remaining_str()) {
            Some(found) => {
                let text = found.as_str().to_string();
                match text.chars().count() {
                    0 => Outcome::empty_ok(text, state.clone()),
                    len => Outcome::consumed_ok(text, state.advance_by(len)),
                }
            }
            None => Outcome::empty_error(Message::expecting(state, label.clone())),
        }
    }))
}
