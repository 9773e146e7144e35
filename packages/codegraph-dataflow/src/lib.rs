//! Core solver-agnostic building blocks for IFDS/IDE data-flow analysis.
//!
//! This crate owns the parts of an IFDS/IDE engine that are independent of
//! any concrete client problem: the lattice and flow/edge-function
//! contracts a client implements, the algebra built-in functions obey
//! (identity, all-top, all-bottom, composition, join), the interning cache
//! that memoizes per-(node, fact) function instances, and the memory
//! manager that owns every function the cache ever builds.
//!
//! What lives outside this crate: ICFG construction, pointer analysis,
//! type hierarchy construction, IR ingestion, a CLI driver, and the
//! worklist/tabulation loop itself. Those are collaborators that consume
//! the contracts defined here; none of them are implemented by it.

#![allow(clippy::type_complexity)]
#![allow(clippy::too_many_arguments)]

#[macro_use]
pub mod shared;

pub mod cache;
pub mod config;
pub mod edge_function;
pub mod errors;
pub mod flow_function;
pub mod lattice;
pub mod memory;
pub mod problem;
pub mod stats;

pub use cache::FlowEdgeFunctionCache;
pub use config::{SolverConfig, Verbosity};
pub use edge_function::EdgeFunction;
pub use errors::SolverError;
pub use flow_function::FlowFunction;
pub use lattice::Lattice;
pub use memory::MemoryManager;
pub use problem::TabulationProblem;
pub use stats::CacheStatistics;
