//! Shared, dependency-free utilities used across the solver modules.

#[macro_use]
pub mod macros;
