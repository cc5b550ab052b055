//! Consumed/empty parse outcomes.
//!
//! An [`Outcome`] pairs a [`Reply`] with whether any input was consumed to
//! produce it. Alternation only needs the tag, so the consumed reply is kept
//! behind a [`Deferred`] thunk and computed on demand:
//!
//! | Variant | Reply | Meaning |
//! |---------|-------|---------|
//! | `Consumed` | deferred | Committed; `or` will not try alternatives |
//! | `Empty` | eager | Nothing read; `Ok` rest equals the input state |
//!
//! [`Outcome::and_then`] is the sequencing rule behind every combinator that
//! runs one parser after another:
//!
//! | First | Second | Result |
//! |-------|--------|--------|
//! | `Empty(Ok)` | `Empty` | `Empty`, second's reply |
//! | `Empty(Ok)` | `Consumed` | `Consumed`, second's reply |
//! | `Empty(Error)` | not run | `Empty(Error)` |
//! | `Consumed(Ok)` | any | `Consumed`, second's reply forced lazily |
//! | `Consumed(Error)` | not run | `Consumed(Error)` |

use std::fmt;

use kombi_stack::ensure_sufficient_stack;
use once_cell::unsync::Lazy;

use crate::{Message, Reply, State, Symbol};

type Thunk<S, A> = Box<dyn FnOnce() -> Reply<S, A>>;

/// A reply computed at most once, on first demand.
pub struct Deferred<S, A> {
    cell: Lazy<Reply<S, A>, Thunk<S, A>>,
}

impl<S: Symbol, A: 'static> Deferred<S, A> {
    /// Defer `f` until the reply is needed.
    pub fn new(f: impl FnOnce() -> Reply<S, A> + 'static) -> Self {
        Deferred {
            cell: Lazy::new(Box::new(f)),
        }
    }

    /// Wrap a reply that is already known.
    pub fn ready(reply: Reply<S, A>) -> Self {
        Self::new(move || reply)
    }

    /// Compute the reply if needed and borrow it. Later calls reuse it.
    pub fn force(&self) -> &Reply<S, A> {
        ensure_sufficient_stack(|| Lazy::force(&self.cell))
    }

    /// Compute the reply if needed and take it.
    pub fn into_reply(self) -> Reply<S, A> {
        ensure_sufficient_stack(|| match Lazy::into_value(self.cell) {
            Ok(reply) => reply,
            Err(thunk) => thunk(),
        })
    }
}

impl<S, A> fmt::Debug for Deferred<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Deferred(..)")
    }
}

/// Result of running a parser: a reply tagged with input consumption.
#[derive(Debug)]
pub enum Outcome<S, A> {
    /// At least one symbol was consumed.
    Consumed(Deferred<S, A>),
    /// No symbols were consumed.
    Empty(Reply<S, A>),
}

impl<S: Symbol, A: 'static> Outcome<S, A> {
    // === Constructors ===

    /// A consumed outcome whose reply is computed by `f` on demand.
    #[inline]
    pub fn consumed(f: impl FnOnce() -> Reply<S, A> + 'static) -> Self {
        Outcome::Consumed(Deferred::new(f))
    }

    /// A consumed success with a known value.
    #[inline]
    pub fn consumed_ok(value: A, rest: State<S>) -> Self {
        Outcome::Consumed(Deferred::ready(Reply::ok(value, rest)))
    }

    /// Success without consuming input; `state` is the input state.
    #[inline]
    pub fn empty_ok(value: A, state: State<S>) -> Self {
        Outcome::Empty(Reply::ok(value, state))
    }

    /// Failure without consuming input.
    #[inline]
    pub fn empty_error(message: Message<S>) -> Self {
        Outcome::Empty(Reply::error(message))
    }

    // === Predicates ===

    /// Returns `true` if input was consumed. Never forces the reply.
    #[inline]
    pub fn is_consumed(&self) -> bool {
        matches!(self, Outcome::Consumed(_))
    }

    /// Returns `true` if this failed without consuming input, the one case
    /// in which alternatives are tried.
    #[inline]
    pub fn failed_without_progress(&self) -> bool {
        matches!(self, Outcome::Empty(Reply::Error(_)))
    }

    // === Access ===

    /// Borrow the reply, forcing it if deferred.
    pub fn reply(&self) -> &Reply<S, A> {
        match self {
            Outcome::Consumed(deferred) => deferred.force(),
            Outcome::Empty(reply) => reply,
        }
    }

    /// Take the reply, forcing it if deferred.
    pub fn into_reply(self) -> Reply<S, A> {
        match self {
            Outcome::Consumed(deferred) => deferred.into_reply(),
            Outcome::Empty(reply) => reply,
        }
    }

    // === Transformations ===

    /// Map the success value, preserving the tag. Lazy for `Consumed`.
    pub fn map<B: 'static>(self, f: impl FnOnce(A) -> B + 'static) -> Outcome<S, B> {
        match self {
            Outcome::Consumed(deferred) => Outcome::consumed(move || deferred.into_reply().map(f)),
            Outcome::Empty(reply) => Outcome::Empty(reply.map(f)),
        }
    }

    /// Sequence a continuation after a success.
    ///
    /// `k` receives the value and the remaining input. Once anything has
    /// been consumed the combined outcome is `Consumed`, whatever `k` does.
    pub fn and_then<B: 'static>(
        self,
        k: impl FnOnce(A, State<S>) -> Outcome<S, B> + 'static,
    ) -> Outcome<S, B> {
        match self {
            Outcome::Empty(Reply::Ok { value, rest }) => k(value, rest),
            Outcome::Empty(Reply::Error(message)) => Outcome::Empty(Reply::Error(message)),
            Outcome::Consumed(deferred) => Outcome::consumed(move || match deferred.into_reply() {
                Reply::Ok { value, rest } => k(value, rest).into_reply(),
                Reply::Error(message) => Reply::Error(message),
            }),
        }
    }
}
