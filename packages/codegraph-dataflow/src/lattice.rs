//! The lattice a client's value domain must form.
//!
//! This mirrors `IDEValue` in IDE-style data-flow frameworks: every value
//! type an edge function maps between needs a top element (no information
//! yet), a bottom element (conflicting information), and a `join` that
//! merges two values the way control-flow merges merge facts along
//! different paths.

use std::fmt::Debug;

/// A bounded join-semilattice over `Self`.
///
/// Implementations must satisfy, for all `a, b, c: Self`:
/// - `a.join(&a) == a` (idempotent)
/// - `a.join(&b) == b.join(&a)` (commutative)
/// - `a.join(&b).join(&c) == a.join(&b.join(&c))` (associative)
/// - `a.join(&Self::top()) == a` (top is the join identity)
/// - `a.join(&Self::bottom()) == Self::bottom()` (bottom absorbs)
pub trait Lattice: Clone + Eq + Debug {
    /// The identity element for `join`: "no information yet".
    fn top() -> Self;

    /// The absorbing element for `join`: "conflicting information".
    fn bottom() -> Self;

    /// Merge two values along a control-flow join point.
    fn join(&self, other: &Self) -> Self;

    fn is_top(&self) -> bool
    where
        Self: Sized,
    {
        *self == Self::top()
    }

    fn is_bottom(&self) -> bool
    where
        Self: Sized,
    {
        *self == Self::bottom()
    }
}
