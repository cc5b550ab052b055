//! The parser type and its chainable combinators.
//!
//! A [`Parser`] is a shared, pure function from a [`State`] to an
//! [`Outcome`]. Every combinator here builds a new parser around existing
//! ones; nothing runs until [`Parser::run`] (or one of the entry points that
//! force the reply) is called.

use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::combinators::retn_with;
use crate::{Deferred, Outcome, ParseFailure, Reply, State, Symbol};

type ParseFn<S, A> = dyn Fn(&State<S>) -> Outcome<S, A> + Send + Sync;

/// A parser from symbols `S` to values `A`.
///
/// Cloning shares the underlying function. Parsers hold no mutable state,
/// so one grammar can serve any number of concurrent parses.
pub struct Parser<S, A> {
    run: Arc<ParseFn<S, A>>,
}

impl<S, A> Clone for Parser<S, A> {
    fn clone(&self) -> Self {
        Parser {
            run: Arc::clone(&self.run),
        }
    }
}

impl<S: Symbol, A: 'static> Parser<S, A> {
    /// Wrap a parse function.
    ///
    /// The function must honor the outcome contract: an `Empty` success
    /// returns the input state unchanged, a `Consumed` success returns a
    /// state strictly further along.
    pub fn new(f: impl Fn(&State<S>) -> Outcome<S, A> + Send + Sync + 'static) -> Self {
        Parser { run: Arc::new(f) }
    }

    // === Execution ===

    /// Run against `state`, leaving a consumed reply deferred.
    #[inline]
    pub fn run(&self, state: &State<S>) -> Outcome<S, A> {
        (self.run)(state)
    }

    /// Run against `state` and force the reply.
    pub fn parse(&self, state: &State<S>) -> Reply<S, A> {
        self.run(state).into_reply()
    }

    /// Run against `state` and return the value or a structured failure.
    ///
    /// Trailing input is not an error; sequence with
    /// [`eof`](crate::combinators::eof) to require it.
    pub fn parse_value(&self, state: &State<S>) -> Result<A, ParseFailure<S>> {
        let result = self.parse(state).into_result();
        if let Err(failure) = &result {
            debug!(position = failure.position(), "parse failed");
        }
        result
    }

    // === Sequencing ===

    /// Monadic bind: run `self`, feed its value to `f`, run the parser `f`
    /// returns on the remaining input.
    pub fn bind<B: 'static>(
        self,
        f: impl Fn(A) -> Parser<S, B> + Send + Sync + 'static,
    ) -> Parser<S, B> {
        let f = Arc::new(f);
        Parser::new(move |state| {
            let f = Arc::clone(&f);
            self.run(state)
                .and_then(move |value, rest| f(value).run(&rest))
        })
    }

    /// Transform the parsed value.
    pub fn map<B: 'static>(self, f: impl Fn(A) -> B + Send + Sync + 'static) -> Parser<S, B> {
        let f = Arc::new(f);
        Parser::new(move |state| {
            let f = Arc::clone(&f);
            self.run(state).map(move |value| f(value))
        })
    }

    /// Run `self` then `next`, keeping `next`'s value.
    pub fn then<B: 'static>(self, next: Parser<S, B>) -> Parser<S, B> {
        Parser::new(move |state| {
            let next = next.clone();
            self.run(state).and_then(move |_, rest| next.run(&rest))
        })
    }

    /// Run `self` then `next`, keeping `self`'s value.
    pub fn skip<B: 'static>(self, next: Parser<S, B>) -> Parser<S, A> {
        Parser::new(move |state| {
            let next = next.clone();
            self.run(state)
                .and_then(move |value, rest| next.run(&rest).map(move |_| value))
        })
    }

    /// Run `self` then `next`, keeping both values.
    pub fn and<B: 'static>(self, next: Parser<S, B>) -> Parser<S, (A, B)> {
        Parser::new(move |state| {
            let next = next.clone();
            self.run(state)
                .and_then(move |first, rest| next.run(&rest).map(move |second| (first, second)))
        })
    }

    /// Run `open`, `self`, `close` in order, keeping `self`'s value.
    pub fn between<O: 'static, C: 'static>(
        self,
        open: Parser<S, O>,
        close: Parser<S, C>,
    ) -> Parser<S, A> {
        open.then(self).skip(close)
    }

    // === Alternation ===

    /// Try `self`; if it fails without consuming input, try `other`.
    ///
    /// A consumed outcome from `self` (success or failure) is returned as
    /// is. When both fail without consuming, their messages are merged.
    pub fn or(self, other: Parser<S, A>) -> Parser<S, A> {
        Parser::new(move |state| match self.run(state) {
            Outcome::Empty(Reply::Error(first)) => match other.run(state) {
                Outcome::Empty(Reply::Error(second)) => Outcome::empty_error(first.merge(second)),
                outcome => outcome,
            },
            outcome => outcome,
        })
    }

    /// Turn a failure after consumption into a failure without consumption,
    /// so an enclosing [`or`](Self::or) may still try its alternative.
    ///
    /// The message keeps the position where `self` actually failed, which
    /// may be well past the point the alternative restarts from.
    pub fn attempt(self) -> Parser<S, A> {
        Parser::new(move |state| match self.run(state) {
            Outcome::Consumed(deferred) => match deferred.into_reply() {
                Reply::Error(message) => {
                    trace!(
                        from = state.position(),
                        failed_at = message.position,
                        "backtracking"
                    );
                    Outcome::empty_error(message)
                }
                ok => Outcome::Consumed(Deferred::ready(ok)),
            },
            outcome => outcome,
        })
    }

    /// Replace the expected labels of a failure that consumed nothing.
    ///
    /// Failures after consumption keep their more specific labels.
    pub fn label(self, name: impl Into<String>) -> Parser<S, A> {
        let name = name.into();
        Parser::new(move |state| match self.run(state) {
            Outcome::Empty(Reply::Error(message)) => {
                Outcome::empty_error(message.relabel(name.clone()))
            }
            outcome => outcome,
        })
    }

    /// `Some(value)` if `self` succeeds, `None` if it fails without
    /// consuming input.
    pub fn optional(self) -> Parser<S, Option<A>> {
        self.map(Some).or(retn_with(|| None))
    }

    // === Repetition ===

    /// Zero or more repetitions. Never fails without consuming input.
    pub fn many(self) -> Parser<S, Vec<A>> {
        Parser::new(move |state| repeat(self.clone(), state, Vec::new()))
    }

    /// One or more repetitions.
    pub fn many1(self) -> Parser<S, Vec<A>> {
        Parser::new(move |state| {
            let item = self.clone();
            self.run(state)
                .and_then(move |first, rest| repeat(item, &rest, vec![first]))
        })
    }

    /// Zero or more repetitions, discarding the values.
    pub fn skip_many(self) -> Parser<S, ()> {
        self.map(|_| ()).many().map(|_| ())
    }

    /// Zero or more `self`, separated by `sep`.
    pub fn sep_by<B: 'static>(self, sep: Parser<S, B>) -> Parser<S, Vec<A>> {
        self.sep_by1(sep).or(retn_with(Vec::new))
    }

    /// One or more `self`, separated by `sep`.
    ///
    /// A separator that is not followed by an item is a failure after
    /// consumption.
    pub fn sep_by1<B: 'static>(self, sep: Parser<S, B>) -> Parser<S, Vec<A>> {
        let tail = sep.then(self.clone());
        Parser::new(move |state| {
            let tail = tail.clone();
            self.run(state)
                .and_then(move |first, rest| repeat(tail, &rest, vec![first]))
        })
    }
}

impl<A: 'static> Parser<char, A> {
    /// Parse a string slice and return the value or a structured failure.
    pub fn parse_str(&self, input: &str) -> Result<A, ParseFailure<char>> {
        self.parse_value(&State::from(input))
    }
}

/// Run `item` repeatedly from `state`, appending to `values`.
///
/// The loop is iterative: each consumed reply is forced before the next
/// attempt, so stack use does not grow with the number of repetitions.
fn repeat<S: Symbol, A: 'static>(
    item: Parser<S, A>,
    state: &State<S>,
    mut values: Vec<A>,
) -> Outcome<S, Vec<A>> {
    let mut pending = match item.run(state) {
        Outcome::Consumed(deferred) => deferred,
        Outcome::Empty(reply) => {
            if reply.is_ok() {
                warn_empty_repetition(state);
            }
            return Outcome::empty_ok(values, state.clone());
        }
    };

    Outcome::consumed(move || loop {
        match pending.into_reply() {
            Reply::Error(message) => return Reply::error(message),
            Reply::Ok { value, rest } => {
                values.push(value);
                match item.run(&rest) {
                    Outcome::Consumed(deferred) => pending = deferred,
                    Outcome::Empty(reply) => {
                        if reply.is_ok() {
                            warn_empty_repetition(&rest);
                        }
                        return Reply::ok(values, rest);
                    }
                }
            }
        }
    })
}

#[cold]
fn warn_empty_repetition<S: Symbol>(state: &State<S>) {
    warn!(
        position = state.position(),
        "repeated parser succeeded without consuming input; stopping repetition"
    );
}
