//! The sole owner of every flow/edge function instance the cache builds.
//!
//! A handle handed out by this manager is an `Rc`: a reference-counted,
//! non-owning pointer into the manager's tables. `Rc` rather than `Arc`
//! is deliberate: the cache and manager are single-threaded per the
//! engine's concurrency model, so there is nothing to gain from atomic
//! refcounting, and `Rc` is already exactly the "opaque handle into a
//! heap allocation" a slab-and-index arena would otherwise hand-roll.

use std::rc::Rc;

use crate::edge_function::EdgeFunction;
use crate::flow_function::FlowFunction;
use crate::lattice::Lattice;

/// Owns every interned flow and edge function for one analysis run.
///
/// Singletons (registered via `register_*_singleton`, typically
/// `Identity`/`KillAll`/`AllTop`/`AllBottom`) are recognized by
/// structural `equals`, not `Rc` pointer identity, so a client asking for
/// "the identity flow function" twice gets back the same `Rc` both
/// times. Non-singleton functions built by `manage_*` are simply kept
/// alive for the manager's lifetime; nothing beyond that is deduplicated
/// for them, since most flow/edge functions a client builds (e.g. `Gen
/// { fact, zero }` for a specific fact) are not expected to recur
/// structurally often enough to justify scanning for them on every call.
#[derive(Debug)]
pub struct MemoryManager<D, L> {
    flow_singletons: Vec<Rc<FlowFunction<D>>>,
    edge_singletons: Vec<Rc<EdgeFunction<L>>>,
    managed_flows: Vec<Rc<FlowFunction<D>>>,
    managed_edges: Vec<Rc<EdgeFunction<L>>>,
}

impl<D, L> Default for MemoryManager<D, L> {
    fn default() -> Self {
        MemoryManager {
            flow_singletons: Vec::new(),
            edge_singletons: Vec::new(),
            managed_flows: Vec::new(),
            managed_edges: Vec::new(),
        }
    }
}

impl<D, L> MemoryManager<D, L>
where
    D: crate::flow_function::DataflowFact,
    L: Lattice,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt `function`, keeping it alive for as long as this manager
    /// lives, and return the same handle back to the caller. Accepts an
    /// `Rc` directly since both the cache's own constructions (e.g. a
    /// freshly built `Zeroed` wrapper) and a client factory's return
    /// value already arrive as `Rc`.
    pub fn manage_flow(&mut self, function: Rc<FlowFunction<D>>) -> Rc<FlowFunction<D>> {
        self.managed_flows.push(function.clone());
        function
    }

    /// Adopt `function`, keeping it alive for as long as this manager
    /// lives, and return the same handle back to the caller.
    pub fn manage_edge(&mut self, function: Rc<EdgeFunction<L>>) -> Rc<EdgeFunction<L>> {
        self.managed_edges.push(function.clone());
        function
    }

    /// Register a flow function as a singleton: if a structurally equal
    /// one was already registered, return the existing handle instead of
    /// allocating a new one.
    pub fn register_flow_singleton(&mut self, function: FlowFunction<D>) -> Rc<FlowFunction<D>> {
        if let Some(existing) = self.flow_singletons.iter().find(|s| s.equals(&function)) {
            return existing.clone();
        }
        let handle = Rc::new(function);
        self.flow_singletons.push(handle.clone());
        handle
    }

    /// Register an edge function as a singleton: if a structurally equal
    /// one was already registered, return the existing handle instead of
    /// allocating a new one.
    pub fn register_edge_singleton(&mut self, function: EdgeFunction<L>) -> Rc<EdgeFunction<L>> {
        if let Some(existing) = self.edge_singletons.iter().find(|s| s.equals(&function)) {
            return existing.clone();
        }
        let handle = Rc::new(function);
        self.edge_singletons.push(handle.clone());
        handle
    }

    pub fn flow_singleton_count(&self) -> usize {
        self.flow_singletons.len()
    }

    pub fn edge_singleton_count(&self) -> usize {
        self.edge_singletons.len()
    }

    pub fn managed_flow_count(&self) -> usize {
        self.managed_flows.len()
    }

    pub fn managed_edge_count(&self) -> usize {
        self.managed_edges.len()
    }
}
