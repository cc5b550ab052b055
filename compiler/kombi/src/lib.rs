//! Monadic parser combinators with consumed/empty backtracking control.
//!
//! A grammar is written as ordinary Rust values: small [`Parser`]s glued
//! together by combinators. Running a parser against a [`State`] produces an
//! [`Outcome`], which records two things at once:
//!
//! | Progress | Reply | Meaning |
//! |----------|-------|---------|
//! | `Consumed` | `Ok` | Committed to this path, succeeded |
//! | `Consumed` | `Error` | Committed, failed: no backtracking |
//! | `Empty` | `Ok` | Succeeded without reading input |
//! | `Empty` | `Error` | Not committed: alternatives may run |
//!
//! The consumed reply is deferred and memoized, so alternation can decide
//! what to do without forcing it, and long `bind` chains unwind through
//! [`kombi_stack::ensure_sufficient_stack`] instead of overflowing.
//!
//! # Example
//!
//! ```
//! use kombi::text::{chr, intr};
//!
//! let sum = intr().bind(|a| chr('+').then(intr()).map(move |b| a + b));
//! assert_eq!(sum.parse_str("1+2").ok(), Some(3));
//!
//! let failure = sum.parse_str("1+z").unwrap_err();
//! assert_eq!(failure.to_string(), "position 2: unexpected 'z'; expected `integer`");
//! ```

pub mod combinators;
mod error;
mod forward;
mod message;
mod outcome;
mod parser;
mod reply;
mod state;
pub mod text;

pub use error::ParseFailure;
pub use forward::Forward;
pub use message::Message;
pub use outcome::{Deferred, Outcome};
pub use parser::Parser;
pub use reply::Reply;
pub use state::State;

use std::fmt;

/// An input symbol.
///
/// Anything cheap to clone, printable in error messages, and shareable
/// across threads qualifies: `char`, `u8`, or a lexer's token enum.
pub trait Symbol: Clone + fmt::Debug + PartialEq + Send + Sync + 'static {}

impl<T> Symbol for T where T: Clone + fmt::Debug + PartialEq + Send + Sync + 'static {}
