//! Parse error descriptors.
//!
//! A [`Message`] says where a parse failed, what was found there, and what
//! would have been accepted instead. Alternation merges the messages of
//! failed branches: messages at the same position pool their expected
//! labels, and otherwise the one that got further wins.

use std::collections::BTreeSet;
use std::fmt;

use crate::{State, Symbol};

/// Description of a parse failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message<S> {
    /// Offset (in symbols) where the failure was detected.
    pub position: usize,
    /// Symbol found at `position`, or `None` for end of input.
    pub unexpected: Option<S>,
    /// Labels of what would have been accepted. Sorted and deduplicated.
    pub expected: BTreeSet<String>,
}

impl<S: Symbol> Message<S> {
    /// Create a message with no expectations.
    pub fn new(position: usize, unexpected: Option<S>) -> Self {
        Message {
            position,
            unexpected,
            expected: BTreeSet::new(),
        }
    }

    /// Create a message describing the symbol under `state`.
    pub fn at(state: &State<S>) -> Self {
        Self::new(state.position(), state.peek().cloned())
    }

    /// Create a message at `state` expecting a single label.
    pub fn expecting(state: &State<S>, label: impl Into<String>) -> Self {
        Self::at(state).with_expected(label)
    }

    /// Add an expected label.
    #[must_use]
    pub fn with_expected(mut self, label: impl Into<String>) -> Self {
        self.expected.insert(label.into());
        self
    }

    /// Replace the expected labels with exactly one.
    #[must_use]
    pub fn relabel(mut self, label: impl Into<String>) -> Self {
        self.expected = BTreeSet::from([label.into()]);
        self
    }

    /// Combine the messages of two failed alternatives.
    ///
    /// Same position: union of expected labels. Otherwise the message with
    /// the greater position is returned unchanged.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        match self.position.cmp(&other.position) {
            std::cmp::Ordering::Less => other,
            std::cmp::Ordering::Greater => self,
            std::cmp::Ordering::Equal => {
                self.expected.extend(other.expected);
                self
            }
        }
    }

    /// Returns `true` if the failure was at end of input.
    pub fn is_at_end(&self) -> bool {
        self.unexpected.is_none()
    }

    /// Format the expected labels as a human-readable list.
    ///
    /// "`a`", "`a` or `b`", "`a`, `b`, or `c`"; "nothing" when empty.
    pub fn format_expected(&self) -> String {
        let names: Vec<&str> = self.expected.iter().map(String::as_str).collect();
        match names.as_slice() {
            [] => "nothing".to_string(),
            [single] => format!("`{single}`"),
            [first, second] => format!("`{first}` or `{second}`"),
            [rest @ .., last] => {
                let rest_str = rest
                    .iter()
                    .map(|n| format!("`{n}`"))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{rest_str}, or `{last}`")
            }
        }
    }
}

impl<S: Symbol> fmt::Display for Message<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "position {}: ", self.position)?;
        match &self.unexpected {
            Some(symbol) => write!(f, "unexpected {symbol:?}")?,
            None => f.write_str("unexpected end of input")?,
        }
        if !self.expected.is_empty() {
            write!(f, "; expected {}", self.format_expected())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
