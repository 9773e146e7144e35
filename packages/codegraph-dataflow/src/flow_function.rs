//! Flow functions: `D -> 2^D`, the per-statement data-flow transfer.
//!
//! Mirrors `FlowFunction<F>` and its built-ins (`IdentityFlowFunction`,
//! `KillFlowFunction`, `GenFlowFunction`) from an IFDS framework, widened
//! from a `String`-keyed concrete fact type to any `D: DataflowFact`, and
//! closed over a `Custom` escape hatch so client-specific transfer
//! functions stay representable without becoming the only variant.

use std::any::Any;
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

use rustc_hash::FxHashSet;

/// The fact type an analysis propagates. Facts must be hashable and
/// comparable so they can live in the exploded supergraph's node/edge
/// sets and in interning-cache keys.
pub trait DataflowFact: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> DataflowFact for T {}

/// A client-defined transfer function, used through the `Custom` variant
/// of [`FlowFunction`] when none of the built-ins apply.
pub trait CustomFlowFunction<D>: Debug {
    fn compute_targets(&self, input: &D) -> FxHashSet<D>;

    /// Structural equality against another `Custom` flow function,
    /// dispatched through `Any` since `dyn CustomFlowFunction` cannot
    /// itself require `PartialEq`.
    fn equals_dyn(&self, other: &dyn Any) -> bool;

    fn as_any(&self) -> &dyn Any;
}

/// A per-statement flow function: maps one incoming fact to the set of
/// facts that hold after the statement executes.
#[derive(Clone, Debug)]
pub enum FlowFunction<D> {
    /// `compute_targets(d) = {d}` for every `d`.
    Identity,
    /// `compute_targets(d) = {}` for every `d`.
    KillAll,
    /// Generates `fact` alongside the zero fact when the incoming fact is
    /// zero; passes every other fact through unchanged. Facts are only
    /// generated along the zero edge, matching how new data-flow facts
    /// enter the exploded supergraph in an IFDS formulation.
    Gen { fact: D, zero: D },
    /// Passes every fact through except `fact`, which is dropped.
    Kill(D),
    /// Wraps `inner`; when the incoming fact equals `zero`, the zero fact
    /// is folded back into the output alongside whatever `inner` produces,
    /// so clients don't have to special-case zero propagation themselves.
    Zeroed { inner: Rc<FlowFunction<D>>, zero: D },
    /// A client-supplied transfer function that doesn't fit a built-in.
    Custom(Rc<dyn CustomFlowFunction<D>>),
}

impl<D: DataflowFact> FlowFunction<D> {
    pub fn compute_targets(&self, input: &D) -> FxHashSet<D> {
        match self {
            FlowFunction::Identity => {
                let mut out = FxHashSet::default();
                out.insert(input.clone());
                out
            }
            FlowFunction::KillAll => FxHashSet::default(),
            FlowFunction::Gen { fact, zero } => {
                let mut out = FxHashSet::default();
                if input == zero {
                    out.insert(zero.clone());
                    out.insert(fact.clone());
                } else {
                    out.insert(input.clone());
                }
                out
            }
            FlowFunction::Kill(fact) => {
                if input == fact {
                    FxHashSet::default()
                } else {
                    let mut out = FxHashSet::default();
                    out.insert(input.clone());
                    out
                }
            }
            FlowFunction::Zeroed { inner, zero } => {
                let mut out = inner.compute_targets(input);
                if input == zero {
                    out.insert(zero.clone());
                }
                out
            }
            FlowFunction::Custom(custom) => custom.compute_targets(input),
        }
    }

    /// Structural equality, used by the memory manager to recognize
    /// requests for functions it has already interned as a singleton
    /// (e.g. `Identity`, `KillAll`).
    pub fn equals(&self, other: &Self) -> bool {
        match (self, other) {
            (FlowFunction::Identity, FlowFunction::Identity) => true,
            (FlowFunction::KillAll, FlowFunction::KillAll) => true,
            (
                FlowFunction::Gen { fact: fa, zero: za },
                FlowFunction::Gen { fact: fb, zero: zb },
            ) => fa == fb && za == zb,
            (FlowFunction::Kill(a), FlowFunction::Kill(b)) => a == b,
            (
                FlowFunction::Zeroed { inner: ia, zero: za },
                FlowFunction::Zeroed { inner: ib, zero: zb },
            ) => za == zb && ia.equals(ib),
            (FlowFunction::Custom(a), FlowFunction::Custom(b)) => {
                a.equals_dyn(b.as_any()) || b.equals_dyn(a.as_any())
            }
            _ => false,
        }
    }

    pub fn is_identity(&self) -> bool {
        matches!(self, FlowFunction::Identity)
    }
}
