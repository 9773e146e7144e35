//! Solver configuration.
//!
//! A small, serde-derived struct in the style of the codebase's stage
//! configs (`#[derive(Debug, Clone, Serialize, Deserialize)]` with
//! `#[serde(default)]` fields), scaled down to the one documented knob
//! the cache actually reads plus a verbosity switch for statistics
//! printing.

use serde::{Deserialize, Serialize};

/// How much detail `FlowEdgeFunctionCache::print_statistics` emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verbosity {
    /// No statistics are printed.
    Quiet,
    /// Per-category hit/construction counts only.
    Summary,
    /// Per-category counts plus the full re-entrancy guard state.
    Full,
}

impl Default for Verbosity {
    fn default() -> Self {
        Verbosity::Summary
    }
}

fn default_auto_add_zero() -> bool {
    true
}

/// Configuration read by the cache when it is constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// When set, flow functions built by `normal_flow`/`call_flow`/
    /// `return_flow`/`call_to_return_flow` are wrapped in
    /// `FlowFunction::Zeroed` so the zero fact is re-injected without the
    /// client having to special-case it in every factory.
    #[serde(default = "default_auto_add_zero")]
    pub auto_add_zero: bool,

    #[serde(default)]
    pub verbosity: Verbosity,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            auto_add_zero: default_auto_add_zero(),
            verbosity: Verbosity::default(),
        }
    }
}
