//! Stack growth guard for deeply nested parser evaluation.
//!
//! Combinator parsers recurse in two places that scale with the input rather
//! than with the grammar: forcing a chain of deferred replies built by `bind`,
//! and re-entering a recursive rule (`(((...)))`). Both go through
//! [`ensure_sufficient_stack`], which moves execution onto a fresh
//! heap-allocated stack segment whenever the current one runs low.
//!
//! It is a separate crate so the platform split and the `stacker`
//! dependency live in one place. `kombi` calls it from the three spots
//! where depth follows the input: `Deferred::force`/`into_reply`, forward
//! references, and `lazy`.
//!
//! # Platform Support
//!
//! - **Native targets**: `stacker::maybe_grow`.
//! - **WASM targets**: plain call; the host engine owns the stack.
//!
//! # Configuration
//!
//! - **Red zone**: 128KB. Below this much remaining stack we switch segments.
//! - **Segment size**: 2MB per growth.

/// Remaining stack below which a new segment is allocated.
#[cfg(not(target_arch = "wasm32"))]
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
#[cfg(not(target_arch = "wasm32"))]
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first switching to a new stack segment if the current one is
/// nearly exhausted.
///
/// Wrap the recursive step, not the whole computation:
///
/// ```text
/// fn force(&self) -> &Reply {
///     ensure_sufficient_stack(|| self.cell.force())
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM version: call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
