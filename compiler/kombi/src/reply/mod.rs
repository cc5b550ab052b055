//! Parse replies: the value-level result of one parse attempt.

use crate::{Message, ParseFailure, State, Symbol};

/// Success with a value and the remaining input, or failure with a message.
#[derive(Clone, Debug, PartialEq)]
pub enum Reply<S, A> {
    /// The parser produced `value`; parsing continues from `rest`.
    Ok {
        /// The parsed value.
        value: A,
        /// Input left after the parse.
        rest: State<S>,
    },
    /// The parser failed.
    Error(Message<S>),
}

impl<S: Symbol, A> Reply<S, A> {
    /// Create a successful reply.
    #[inline]
    pub fn ok(value: A, rest: State<S>) -> Self {
        Reply::Ok { value, rest }
    }

    /// Create a failed reply.
    #[inline]
    pub fn error(message: Message<S>) -> Self {
        Reply::Error(message)
    }

    /// Case dispatch: exactly one handler runs.
    pub fn fold<R>(
        self,
        ok: impl FnOnce(A, State<S>) -> R,
        error: impl FnOnce(Message<S>) -> R,
    ) -> R {
        match self {
            Reply::Ok { value, rest } => ok(value, rest),
            Reply::Error(message) => error(message),
        }
    }

    /// Returns `true` on success.
    #[inline]
    pub fn is_ok(&self) -> bool {
        matches!(self, Reply::Ok { .. })
    }

    /// The parsed value, if any.
    pub fn value(&self) -> Option<&A> {
        match self {
            Reply::Ok { value, .. } => Some(value),
            Reply::Error(_) => None,
        }
    }

    /// The remaining input, if the parse succeeded.
    pub fn rest(&self) -> Option<&State<S>> {
        match self {
            Reply::Ok { rest, .. } => Some(rest),
            Reply::Error(_) => None,
        }
    }

    /// The failure message, if the parse failed.
    pub fn message(&self) -> Option<&Message<S>> {
        match self {
            Reply::Ok { .. } => None,
            Reply::Error(message) => Some(message),
        }
    }

    /// Transform the success value.
    pub fn map<B>(self, f: impl FnOnce(A) -> B) -> Reply<S, B> {
        match self {
            Reply::Ok { value, rest } => Reply::Ok {
                value: f(value),
                rest,
            },
            Reply::Error(message) => Reply::Error(message),
        }
    }

    /// Keep the value, discard the remaining input.
    pub fn into_result(self) -> Result<A, ParseFailure<S>> {
        self.fold(|value, _| Ok(value), |message| Err(ParseFailure::new(message)))
    }
}
