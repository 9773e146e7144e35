//! Error types for the solver core.
//!
//! All variants are fatal to the enclosing solve: none of them is
//! recoverable at the cache or algebra level, so factory methods return
//! `Result<_, SolverError>` rather than panicking.

use thiserror::Error;

/// Main error type for cache, algebra, and memory-manager operations.
#[derive(Debug, Error)]
pub enum SolverError {
    /// A client implementation of `TabulationProblem` broke one of its
    /// documented obligations (e.g. returned `None` from a factory that
    /// must always produce a function).
    #[error("client contract violation: {detail}")]
    ClientContractViolation { detail: String },

    /// Two edge/flow functions were combined (composed, joined, compared)
    /// in a way the algebra does not define.
    #[error("edge/flow function algebra mismatch: {detail}")]
    AlgebraMismatch { detail: String },

    /// A cache factory was re-entered for a key that is still being built,
    /// i.e. the client's factory closure called back into the cache for
    /// the same key before returning.
    #[error("cache cycle detected while building {category} for key {key}")]
    CacheCycle { category: &'static str, key: String },

    /// A `Lattice` implementation violated one of its required laws
    /// (idempotence, absorption, top/bottom identity) in a way the engine
    /// detected at runtime.
    #[error("lattice invariant violated: {detail}")]
    LatticeInvariant { detail: String },
}

impl SolverError {
    pub fn client_contract_violation(detail: impl Into<String>) -> Self {
        SolverError::ClientContractViolation {
            detail: detail.into(),
        }
    }

    pub fn algebra_mismatch(detail: impl Into<String>) -> Self {
        SolverError::AlgebraMismatch {
            detail: detail.into(),
        }
    }

    pub fn cache_cycle(category: &'static str, key: impl Into<String>) -> Self {
        SolverError::CacheCycle {
            category,
            key: key.into(),
        }
    }

    pub fn lattice_invariant(detail: impl Into<String>) -> Self {
        SolverError::LatticeInvariant {
            detail: detail.into(),
        }
    }
}

/// Result type alias for solver-core operations.
pub type Result<T> = std::result::Result<T, SolverError>;
