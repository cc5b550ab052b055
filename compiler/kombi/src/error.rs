//! The failure type returned by the convenience entry points.

use crate::{Message, Symbol};

/// A parse that did not succeed.
///
/// Displays as the rendered [`Message`], e.g.
/// ``position 2: unexpected 'z'; expected `integer` ``.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ParseFailure<S: Symbol> {
    /// What went wrong and where.
    pub message: Message<S>,
}

impl<S: Symbol> ParseFailure<S> {
    pub fn new(message: Message<S>) -> Self {
        ParseFailure { message }
    }

    /// Offset of the failure, in symbols.
    pub fn position(&self) -> usize {
        self.message.position
    }
}

impl<S: Symbol> From<Message<S>> for ParseFailure<S> {
    fn from(message: Message<S>) -> Self {
        ParseFailure::new(message)
    }
}
