//! Immutable input cursor.
//!
//! A `State` is a shared symbol sequence plus an offset. Advancing returns a
//! new `State`; the old one stays valid, which is what lets alternatives and
//! `attempt` resume from an earlier position without any restore step.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::Symbol;

/// The symbols of one parse, shared by every state derived from it.
struct Source<S> {
    symbols: Arc<[S]>,
    /// Built on first request, character input only.
    text: OnceCell<TextIndex>,
}

/// Character input as a `String`, with the byte offset of every character.
///
/// `offsets[i]` is the byte offset of character `i`; the final entry is the
/// text length, so every valid position has an entry.
struct TextIndex {
    text: String,
    offsets: Vec<usize>,
}

impl TextIndex {
    fn build(chars: &[char]) -> Self {
        let mut text = String::with_capacity(chars.len());
        let mut offsets = Vec::with_capacity(chars.len() + 1);
        for &c in chars {
            offsets.push(text.len());
            text.push(c);
        }
        offsets.push(text.len());
        TextIndex { text, offsets }
    }

    fn suffix(&self, pos: usize) -> &str {
        let start = self.offsets.get(pos).copied().unwrap_or(self.text.len());
        &self.text[start..]
    }
}

/// Cursor over an input sequence of symbols.
///
/// Cloning is cheap: the sequence is reference-counted and only the offset
/// is copied.
pub struct State<S> {
    input: Arc<Source<S>>,
    pos: usize,
}

impl<S: Symbol> State<S> {
    /// Create a state at the start of `input`.
    pub fn new(input: impl Into<Arc<[S]>>) -> Self {
        State {
            input: Arc::new(Source {
                symbols: input.into(),
                text: OnceCell::new(),
            }),
            pos: 0,
        }
    }

    /// Create a state from any finite symbol sequence.
    pub fn from_symbols(symbols: impl IntoIterator<Item = S>) -> Self {
        Self::new(symbols.into_iter().collect::<Arc<[S]>>())
    }

    /// Returns `true` when no symbols remain.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.input.symbols.len()
    }

    /// The symbol under the cursor.
    ///
    /// # Panics
    ///
    /// Panics at end of input. Check [`is_at_end`](Self::is_at_end) first,
    /// or use [`peek`](Self::peek).
    #[inline]
    pub fn current(&self) -> &S {
        assert!(
            !self.is_at_end(),
            "current() called at end of input (position {})",
            self.pos
        );
        &self.input.symbols[self.pos]
    }

    /// The symbol under the cursor, or `None` at end of input.
    #[inline]
    pub fn peek(&self) -> Option<&S> {
        self.input.symbols.get(self.pos)
    }

    /// A state one symbol further along the same input.
    ///
    /// # Panics
    ///
    /// Panics at end of input.
    #[must_use]
    pub fn advance(&self) -> Self {
        assert!(
            !self.is_at_end(),
            "advance() called at end of input (position {})",
            self.pos
        );
        State {
            input: Arc::clone(&self.input),
            pos: self.pos + 1,
        }
    }

    /// A state `n` symbols further along the same input.
    ///
    /// # Panics
    ///
    /// Panics if fewer than `n` symbols remain.
    #[must_use]
    pub fn advance_by(&self, n: usize) -> Self {
        assert!(
            n <= self.remaining().len(),
            "advance_by({n}) past end of input (position {}, length {})",
            self.pos,
            self.input.symbols.len()
        );
        State {
            input: Arc::clone(&self.input),
            pos: self.pos + n,
        }
    }

    /// Offset of the cursor, counted in symbols from the start of input.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Total number of symbols in the underlying input.
    pub fn len(&self) -> usize {
        self.input.symbols.len()
    }

    /// Returns `true` if the underlying input has no symbols at all.
    pub fn is_empty(&self) -> bool {
        self.input.symbols.is_empty()
    }

    /// The symbols from the cursor to the end of input.
    pub fn remaining(&self) -> &[S] {
        &self.input.symbols[self.pos.min(self.input.symbols.len())..]
    }
}

impl<S> Clone for State<S> {
    fn clone(&self) -> Self {
        State {
            input: Arc::clone(&self.input),
            pos: self.pos,
        }
    }
}

/// Equal only when both cursors sit at the same offset of the *same* input
/// allocation. Two separately built inputs with equal contents are distinct.
impl<S> PartialEq for State<S> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.input, &other.input) && self.pos == other.pos
    }
}

impl<S> Eq for State<S> {}

impl<S> fmt::Debug for State<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("pos", &self.pos)
            .field("len", &self.input.symbols.len())
            .finish()
    }
}

impl State<char> {
    /// The characters from the cursor to the end of input, as a `&str`.
    ///
    /// The input is converted to a `String` once, on first call, and shared
    /// by every state over the same input. Later calls only slice it.
    pub fn remaining_str(&self) -> &str {
        self.input
            .text
            .get_or_init(|| TextIndex::build(&self.input.symbols))
            .suffix(self.pos)
    }
}

impl From<&str> for State<char> {
    fn from(input: &str) -> Self {
        State::from_symbols(input.chars())
    }
}

impl From<String> for State<char> {
    fn from(input: String) -> Self {
        State::from(input.as_str())
    }
}

impl From<&[u8]> for State<u8> {
    fn from(input: &[u8]) -> Self {
        State::new(input)
    }
}
