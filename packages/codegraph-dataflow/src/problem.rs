//! The contract a client implements to describe an IFDS/IDE problem.
//!
//! Mirrors the ten factory methods `IFDSProblem`/`IDEProblem` require in
//! a taint-analysis infrastructure, merged into one trait
//! since this crate represents both flow and edge functions with a single
//! concrete enum per kind rather than a `Box<dyn FlowFunction<F>>`/
//! `Box<dyn EdgeFunction<V>>` pair per problem. The client only has to
//! name its node, fact, function, and value types, not a separate
//! function-object type.

use std::rc::Rc;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::edge_function::EdgeFunction;
use crate::flow_function::{DataflowFact, FlowFunction};
use crate::lattice::Lattice;

/// A client's IFDS/IDE problem definition.
///
/// `Node` identifies a point in the (client-owned) interprocedural
/// control-flow graph, `Fact` is the data-flow fact domain, `Function`
/// identifies a callable procedure (used at call sites to name the
/// callee, independently of any particular node in it), and `Value` is
/// the IDE value lattice attached to edges.
pub trait TabulationProblem {
    type Node: Clone + Eq + std::hash::Hash + std::fmt::Debug;
    type Fact: DataflowFact;
    type Function: Clone + Eq + std::hash::Hash + std::fmt::Debug;
    type Value: Lattice;

    /// The zero fact: "analysis is alive here", independent of any real
    /// tracked fact. Propagated along every path so reachability itself
    /// is trackable.
    fn zero_value(&self) -> Self::Fact;

    fn is_zero(&self, fact: &Self::Fact) -> bool {
        *fact == self.zero_value()
    }

    /// Where analysis starts: a map from entry node to the facts that
    /// hold there (typically just the zero fact).
    fn initial_seeds(&self) -> FxHashMap<Self::Node, FxHashSet<Self::Fact>>;

    /// Flow function along an intraprocedural edge `curr -> succ`.
    fn normal_flow(&self, curr: &Self::Node, succ: &Self::Node) -> Rc<FlowFunction<Self::Fact>>;

    /// Flow function mapping actual parameters at `call_stmt` into formal
    /// parameters of `dest_fun`.
    fn call_flow(
        &self,
        call_stmt: &Self::Node,
        dest_fun: &Self::Function,
    ) -> Rc<FlowFunction<Self::Fact>>;

    /// Flow function mapping facts at `exit_stmt` (inside `callee`) back
    /// into facts at `ret_site`, given the call was made from
    /// `call_site`.
    fn return_flow(
        &self,
        call_site: &Self::Node,
        callee: &Self::Function,
        exit_stmt: &Self::Node,
        ret_site: &Self::Node,
    ) -> Rc<FlowFunction<Self::Fact>>;

    /// Flow function for facts that skip every callee at `call_site`
    /// entirely (e.g. facts unrelated to the call's arguments or return
    /// value).
    fn call_to_ret_flow(
        &self,
        call_site: &Self::Node,
        ret_site: &Self::Node,
        callees: &FxHashSet<Self::Function>,
    ) -> Rc<FlowFunction<Self::Fact>>;

    /// An optional precomputed summary flow function for the call,
    /// bypassing normal call/return composition. Returning `None` (the
    /// default) tells the cache to skip interning entirely for this
    /// factory and let the solver fall back to call/return composition;
    /// unlike every other factory this one is never memoized or counted.
    fn summary_flow(
        &self,
        call_stmt: &Self::Node,
        dest_fun: &Self::Function,
    ) -> Option<Rc<FlowFunction<Self::Fact>>> {
        let _ = (call_stmt, dest_fun);
        None
    }

    /// Edge function attached to the normal-flow edge from `(curr,
    /// curr_d)` to `(succ, succ_d)`.
    fn normal_edge(
        &self,
        curr: &Self::Node,
        curr_d: &Self::Fact,
        succ: &Self::Node,
        succ_d: &Self::Fact,
    ) -> Rc<EdgeFunction<Self::Value>>;

    /// Edge function attached to the call edge.
    fn call_edge(
        &self,
        call_stmt: &Self::Node,
        src_d: &Self::Fact,
        dest_fun: &Self::Function,
        dest_d: &Self::Fact,
    ) -> Rc<EdgeFunction<Self::Value>>;

    /// Edge function attached to the return edge.
    fn return_edge(
        &self,
        call_site: &Self::Node,
        callee: &Self::Function,
        exit_stmt: &Self::Node,
        exit_d: &Self::Fact,
        ret_site: &Self::Node,
        ret_d: &Self::Fact,
    ) -> Rc<EdgeFunction<Self::Value>>;

    /// Edge function attached to the call-to-return edge. `callees` is
    /// accepted for symmetry with `call_to_ret_flow` but is deliberately
    /// not part of the cache key for this factory. See the cache's own
    /// documentation.
    fn call_to_ret_edge(
        &self,
        call_site: &Self::Node,
        call_d: &Self::Fact,
        ret_site: &Self::Node,
        ret_d: &Self::Fact,
        callees: &FxHashSet<Self::Function>,
    ) -> Rc<EdgeFunction<Self::Value>>;

    /// Edge function for a precomputed call summary. Unlike
    /// `summary_flow`, this one participates in the cache exactly like
    /// the other edge factories.
    fn summary_edge(
        &self,
        call_site: &Self::Node,
        call_d: &Self::Fact,
        ret_site: &Self::Node,
        ret_d: &Self::Fact,
    ) -> Rc<EdgeFunction<Self::Value>>;

    /// The edge function representing "no information flows here yet".
    /// Defaults to `EdgeFunction::AllTop`, matching the convention that
    /// `AllTop` is the lattice's join identity.
    fn all_top(&self) -> Rc<EdgeFunction<Self::Value>> {
        Rc::new(EdgeFunction::AllTop)
    }
}
