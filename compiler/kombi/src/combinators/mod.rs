//! Primitive parsers and the free-function form of every combinator.
//!
//! The free functions mirror the chainable methods on [`Parser`], so a
//! grammar can be written in either style:
//!
//! ```
//! use kombi::combinators::{between, many, satisfy};
//! use kombi::text::chr;
//!
//! let digits = many(satisfy(|c: &char| c.is_ascii_digit()));
//! let same = satisfy(|c: &char| c.is_ascii_digit()).many();
//! let bracketed = between(chr('['), chr(']'), digits);
//! assert_eq!(bracketed.parse_str("[42]").ok(), Some(vec!['4', '2']));
//! assert_eq!(same.parse_str("7").ok(), Some(vec!['7']));
//! ```

use kombi_stack::ensure_sufficient_stack;
use once_cell::sync::OnceCell;

use crate::{Message, Outcome, Parser, Symbol};

/// Label used by [`satisfy`] before a grammar supplies its own.
pub const PREDICATE_LABEL: &str = "<predicate>";

/// Label used by [`eof`].
pub const EOF_LABEL: &str = "end of input";

// === Primitives ===

/// Succeed with `value` without consuming input.
pub fn retn<S: Symbol, A: Clone + Send + Sync + 'static>(value: A) -> Parser<S, A> {
    Parser::new(move |state| Outcome::empty_ok(value.clone(), state.clone()))
}

/// Succeed with a freshly built value without consuming input.
pub fn retn_with<S: Symbol, A: 'static>(
    make: impl Fn() -> A + Send + Sync + 'static,
) -> Parser<S, A> {
    Parser::new(move |state| Outcome::empty_ok(make(), state.clone()))
}

/// Fail without consuming input. The message names the current symbol and
/// expects nothing; attach expectations with [`label`].
pub fn fail<S: Symbol, A: 'static>() -> Parser<S, A> {
    Parser::new(|state| Outcome::empty_error(Message::at(state)))
}

/// Consume one symbol if `predicate` accepts it.
///
/// On a mismatch or at end of input, fails without consuming and expects
/// [`PREDICATE_LABEL`].
pub fn satisfy<S: Symbol>(
    predicate: impl Fn(&S) -> bool + Send + Sync + 'static,
) -> Parser<S, S> {
    Parser::new(move |state| match state.peek() {
        Some(symbol) if predicate(symbol) => {
            Outcome::consumed_ok(symbol.clone(), state.advance())
        }
        _ => Outcome::empty_error(Message::expecting(state, PREDICATE_LABEL)),
    })
}

/// Succeed with `()` only at end of input.
pub fn eof<S: Symbol>() -> Parser<S, ()> {
    Parser::new(|state| {
        if state.is_at_end() {
            Outcome::empty_ok((), state.clone())
        } else {
            Outcome::empty_error(Message::expecting(state, EOF_LABEL))
        }
    })
}

// === Sequencing ===

/// Free form of [`Parser::bind`].
pub fn bind<S: Symbol, A: 'static, B: 'static>(
    parser: Parser<S, A>,
    f: impl Fn(A) -> Parser<S, B> + Send + Sync + 'static,
) -> Parser<S, B> {
    parser.bind(f)
}

/// Free form of [`Parser::between`].
pub fn between<S: Symbol, O: 'static, C: 'static, A: 'static>(
    open: Parser<S, O>,
    close: Parser<S, C>,
    parser: Parser<S, A>,
) -> Parser<S, A> {
    parser.between(open, close)
}

// === Alternation ===

/// Free form of [`Parser::or`].
pub fn or<S: Symbol, A: 'static>(first: Parser<S, A>, second: Parser<S, A>) -> Parser<S, A> {
    first.or(second)
}

/// Try each parser in order with [`or`] semantics. No parsers: [`fail`].
pub fn choice<S: Symbol, A: 'static>(
    parsers: impl IntoIterator<Item = Parser<S, A>>,
) -> Parser<S, A> {
    let mut parsers = parsers.into_iter();
    match parsers.next() {
        Some(first) => parsers.fold(first, Parser::or),
        None => fail(),
    }
}

/// Free form of [`Parser::attempt`].
pub fn attempt<S: Symbol, A: 'static>(parser: Parser<S, A>) -> Parser<S, A> {
    parser.attempt()
}

/// Free form of [`Parser::label`].
pub fn label<S: Symbol, A: 'static>(
    parser: Parser<S, A>,
    name: impl Into<String>,
) -> Parser<S, A> {
    parser.label(name)
}

/// Free form of [`Parser::optional`].
pub fn optional<S: Symbol, A: 'static>(parser: Parser<S, A>) -> Parser<S, Option<A>> {
    parser.optional()
}

/// `parser`'s value, or `default` if it fails without consuming input.
pub fn option<S: Symbol, A: Clone + Send + Sync + 'static>(
    default: A,
    parser: Parser<S, A>,
) -> Parser<S, A> {
    parser.or(retn(default))
}

// === Repetition ===

/// Free form of [`Parser::many`].
pub fn many<S: Symbol, A: 'static>(parser: Parser<S, A>) -> Parser<S, Vec<A>> {
    parser.many()
}

/// Free form of [`Parser::many1`].
pub fn many1<S: Symbol, A: 'static>(parser: Parser<S, A>) -> Parser<S, Vec<A>> {
    parser.many1()
}

/// Free form of [`Parser::skip_many`].
pub fn skip_many<S: Symbol, A: 'static>(parser: Parser<S, A>) -> Parser<S, ()> {
    parser.skip_many()
}

/// Free form of [`Parser::sep_by`].
pub fn sep_by<S: Symbol, A: 'static, B: 'static>(
    parser: Parser<S, A>,
    sep: Parser<S, B>,
) -> Parser<S, Vec<A>> {
    parser.sep_by(sep)
}

/// Free form of [`Parser::sep_by1`].
pub fn sep_by1<S: Symbol, A: 'static, B: 'static>(
    parser: Parser<S, A>,
    sep: Parser<S, B>,
) -> Parser<S, Vec<A>> {
    parser.sep_by1(sep)
}

// === Recursion ===

/// Build the parser with `make` on first use.
///
/// Lets a recursive rule be written as a plain function:
///
/// ```
/// use kombi::combinators::{lazy, retn};
/// use kombi::text::chr;
/// use kombi::Parser;
///
/// fn nested() -> Parser<char, usize> {
///     chr('(')
///         .then(lazy(nested))
///         .skip(chr(')'))
///         .map(|depth| depth + 1)
///         .or(retn(0))
/// }
///
/// assert_eq!(nested().parse_str("((()))").ok(), Some(3));
/// ```
pub fn lazy<S: Symbol, A: 'static>(
    make: impl Fn() -> Parser<S, A> + Send + Sync + 'static,
) -> Parser<S, A> {
    let cell: OnceCell<Parser<S, A>> = OnceCell::new();
    Parser::new(move |state| {
        let parser = cell.get_or_init(&make);
        ensure_sufficient_stack(|| parser.run(state))
    })
}
