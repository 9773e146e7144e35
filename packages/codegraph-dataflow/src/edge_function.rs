//! Edge functions: `L -> L`, the per-exploded-edge value transformer.
//!
//! Mirrors `EdgeFunction<V>` and its built-ins (`IdentityEdgeFunction`,
//! `AllTopEdgeFunction`, and the composer chain built by
//! `EdgeFunctionComposer`) from an IDE framework, generalized so the
//! algebra (`compose`, `join_with`, `equals`) is owned by this crate
//! instead of being re-derived per client.

use std::any::Any;
use std::fmt::Debug;
use std::rc::Rc;

use crate::lattice::Lattice;

/// A client-defined edge function, used through the `Custom` variant of
/// [`EdgeFunction`] when none of the built-ins apply.
pub trait CustomEdgeFunction<L>: Debug {
    fn apply(&self, input: &L) -> L;

    fn equals_dyn(&self, other: &dyn Any) -> bool;

    fn as_any(&self) -> &dyn Any;
}

/// A per-edge value transformer over a lattice `L`.
///
/// `Composer` and `Joined` are not built directly by clients; they are
/// produced by [`EdgeFunction::compose`] and [`EdgeFunction::join_with`]
/// to represent the composition and join of two arbitrary edge functions
/// without requiring every pair to be hand-written.
#[derive(Clone, Debug)]
pub enum EdgeFunction<L> {
    /// `apply(x) = x` for every `x`.
    Identity,
    /// `apply(x) = L::top()` for every `x`.
    AllTop,
    /// `apply(x) = L::bottom()` for every `x`.
    AllBottom,
    /// Applies `first`, then `second`: `apply(x) = second.apply(first.apply(x))`.
    Composer {
        first: Rc<EdgeFunction<L>>,
        second: Rc<EdgeFunction<L>>,
    },
    /// The pointwise join of two edge functions:
    /// `apply(x) = a.apply(x).join(&b.apply(x))`.
    Joined {
        a: Rc<EdgeFunction<L>>,
        b: Rc<EdgeFunction<L>>,
    },
    /// A client-supplied edge function that doesn't fit a built-in.
    Custom(Rc<dyn CustomEdgeFunction<L>>),
}

impl<L: Lattice> EdgeFunction<L> {
    pub fn apply(&self, input: &L) -> L {
        match self {
            EdgeFunction::Identity => input.clone(),
            EdgeFunction::AllTop => L::top(),
            EdgeFunction::AllBottom => L::bottom(),
            EdgeFunction::Composer { first, second } => second.apply(&first.apply(input)),
            EdgeFunction::Joined { a, b } => a.apply(input).join(&b.apply(input)),
            EdgeFunction::Custom(custom) => custom.apply(input),
        }
    }

    /// Build the edge function representing "apply `first`, then `second`".
    ///
    /// Reproduces `EdgeFunctionComposer`'s reduction: identities drop out,
    /// `AllTop` composed as the first function annihilates the whole chain
    /// (composing anything after `AllTop` yields `AllTop`), and a
    /// `Composer` as `first` is flattened by recursing into its own
    /// `first`/`second` rather than nesting composers arbitrarily deep.
    /// The one exception to that flattening: extending an existing
    /// `Composer` with `AllBottom` as the new `second` returns the
    /// composer unchanged rather than collapsing it, matching
    /// `Composer(F, G).compose(h)`'s own rule that `h` being `Identity`
    /// or `AllBottom` is a no-op. Outside of that case, `AllBottom` on
    /// either side still annihilates the chain to bare `AllBottom`.
    pub fn compose(first: Rc<EdgeFunction<L>>, second: Rc<EdgeFunction<L>>) -> Rc<EdgeFunction<L>> {
        if matches!(*first, EdgeFunction::Identity) {
            return second;
        }
        if matches!(*second, EdgeFunction::Identity) {
            return first;
        }
        if matches!(*first, EdgeFunction::AllTop) {
            return first;
        }
        if let EdgeFunction::Composer { .. } = first.as_ref() {
            if matches!(*second, EdgeFunction::AllBottom) {
                return first;
            }
        }
        if matches!(*first, EdgeFunction::AllBottom) || matches!(*second, EdgeFunction::AllBottom) {
            return Rc::new(EdgeFunction::AllBottom);
        }
        if let EdgeFunction::Composer { first: f, second: g } = first.as_ref() {
            return Self::compose(f.clone(), Self::compose(g.clone(), second));
        }
        Rc::new(EdgeFunction::Composer { first, second })
    }

    /// Build the edge function representing the pointwise join of `a` and
    /// `b`. Reduces via the underlying lattice's join laws: joining
    /// with `AllTop` (the join identity) returns the other operand;
    /// joining with `AllBottom` (the join-absorbing element) returns
    /// `AllBottom`.
    pub fn join_with(a: Rc<EdgeFunction<L>>, b: Rc<EdgeFunction<L>>) -> Rc<EdgeFunction<L>>
    where
        L: 'static,
    {
        if a.equals(&b) {
            return a;
        }
        if matches!(*a, EdgeFunction::AllTop) {
            return b;
        }
        if matches!(*b, EdgeFunction::AllTop) {
            return a;
        }
        if matches!(*a, EdgeFunction::AllBottom) || matches!(*b, EdgeFunction::AllBottom) {
            return Rc::new(EdgeFunction::AllBottom);
        }
        Rc::new(EdgeFunction::Joined { a, b })
    }

    /// Structural equality, used by the memory manager to recognize
    /// requests for already-interned singletons and by `compose`/
    /// `join_with`'s reduction rules above.
    pub fn equals(&self, other: &Self) -> bool {
        match (self, other) {
            (EdgeFunction::Identity, EdgeFunction::Identity) => true,
            (EdgeFunction::AllTop, EdgeFunction::AllTop) => true,
            (EdgeFunction::AllBottom, EdgeFunction::AllBottom) => true,
            (
                EdgeFunction::Composer { first: f1, second: s1 },
                EdgeFunction::Composer { first: f2, second: s2 },
            ) => f1.equals(f2) && s1.equals(s2),
            (
                EdgeFunction::Joined { a: a1, b: b1 },
                EdgeFunction::Joined { a: a2, b: b2 },
            ) => (a1.equals(a2) && b1.equals(b2)) || (a1.equals(b2) && b1.equals(a2)),
            (EdgeFunction::Custom(a), EdgeFunction::Custom(b)) => {
                a.equals_dyn(b.as_any()) || b.equals_dyn(a.as_any())
            }
            _ => false,
        }
    }

    pub fn is_identity(&self) -> bool {
        matches!(self, EdgeFunction::Identity)
    }
}
