//! Forward references for self-referential grammars.
//!
//! A rule that mentions itself (directly, or through other rules) cannot be
//! built bottom-up. Create a [`Forward`] first, use [`Forward::parser`]
//! wherever the rule is referenced, [`Forward::set`] it once the real
//! definition exists, and hand out [`Forward::into_parser`] as the entry
//! point:
//!
//! ```
//! use kombi::combinators::retn;
//! use kombi::text::chr;
//! use kombi::{Forward, Parser};
//!
//! fn depth() -> Parser<char, usize> {
//!     let rule: Forward<char, usize> = Forward::new();
//!     let nested = chr('(')
//!         .then(rule.parser())
//!         .skip(chr(')'))
//!         .map(|inner| inner + 1);
//!     rule.set(nested.or(retn(0)));
//!     rule.into_parser()
//! }
//!
//! assert_eq!(depth().parse_str("((()))").ok(), Some(3));
//! ```
//!
//! References from inside the definition are weak, so the grammar does not
//! own itself: it is freed once the entry point and every `Forward` handle
//! are gone.

use std::sync::{Arc, Weak};

use kombi_stack::ensure_sufficient_stack;
use once_cell::sync::OnceCell;
use tracing::debug;

use crate::{Outcome, Parser, State, Symbol};

type Slot<S, A> = OnceCell<Parser<S, A>>;

/// A write-once slot holding a parser defined later.
///
/// Clones share the slot and keep it alive.
pub struct Forward<S, A> {
    slot: Arc<Slot<S, A>>,
}

impl<S, A> Clone for Forward<S, A> {
    fn clone(&self) -> Self {
        Forward {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<S: Symbol, A: 'static> Forward<S, A> {
    /// Create an unset reference.
    pub fn new() -> Self {
        Forward {
            slot: Arc::new(OnceCell::new()),
        }
    }

    /// Assign the definition.
    ///
    /// # Panics
    ///
    /// Panics if the reference was already set.
    pub fn set(&self, parser: Parser<S, A>) {
        if self.slot.set(parser).is_err() {
            panic!("forward reference assigned twice");
        }
        debug!("forward reference assigned");
    }

    /// Returns `true` once [`set`](Self::set) has been called.
    pub fn is_set(&self) -> bool {
        self.slot.get().is_some()
    }

    /// A weak reference to the eventual definition, for use inside it.
    ///
    /// The returned parser does not keep the slot alive. Keep a `Forward`
    /// or the parser from [`into_parser`](Self::into_parser) for as long as
    /// the grammar runs.
    ///
    /// # Panics
    ///
    /// The returned parser panics when run before [`set`](Self::set), or
    /// after the slot has been dropped.
    pub fn parser(&self) -> Parser<S, A> {
        let slot = Arc::downgrade(&self.slot);
        Parser::new(move |state| match Weak::upgrade(&slot) {
            Some(slot) => delegate(&slot, state),
            None => panic!(
                "forward reference run after its grammar was dropped (position {})",
                state.position()
            ),
        })
    }

    /// The grammar's entry point: a parser that owns the slot.
    ///
    /// # Panics
    ///
    /// The returned parser panics when run before [`set`](Self::set).
    pub fn into_parser(self) -> Parser<S, A> {
        let slot = self.slot;
        Parser::new(move |state| delegate(&slot, state))
    }
}

impl<S: Symbol, A: 'static> Default for Forward<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

fn delegate<S: Symbol, A: 'static>(slot: &Slot<S, A>, state: &State<S>) -> Outcome<S, A> {
    match slot.get() {
        Some(parser) => ensure_sufficient_stack(|| parser.run(state)),
        None => panic!(
            "forward reference run before being assigned (position {})",
            state.position()
        ),
    }
}

#[cfg(test)]
mod tests;
