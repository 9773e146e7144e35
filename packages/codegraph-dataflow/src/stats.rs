//! Per-category cache counters.
//!
//! Mirrors the PAMM counters `FlowEdgeFunctionCache` keeps per factory
//! (one pair of counters per factory, hits vs. fresh constructions) and
//! the hit-rate reporting style of a differential-analysis cache
//! (`features/taint_analysis/infrastructure/differential/cache.rs
//! ::CacheStats`). `summary_flow` has no counter: it bypasses the cache
//! entirely and is never counted.

use std::fmt;

use crate::config::Verbosity;

/// Hits vs. fresh constructions for one cache factory.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CategoryCounter {
    pub hits: u64,
    pub constructions: u64,
}

impl CategoryCounter {
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_construction(&mut self) {
        self.constructions += 1;
    }

    pub fn total(&self) -> u64 {
        self.hits + self.constructions
    }

    pub fn hit_rate(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.hits as f64 / self.total() as f64
        }
    }
}

impl fmt::Display for CategoryCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} hits, {} constructions ({:.1}% hit rate)",
            self.hits,
            self.constructions,
            self.hit_rate() * 100.0
        )
    }
}

/// Counters for every cached factory on [`crate::cache::FlowEdgeFunctionCache`].
#[derive(Debug, Default, Clone, Copy)]
pub struct CacheStatistics {
    pub normal_flow: CategoryCounter,
    pub call_flow: CategoryCounter,
    pub return_flow: CategoryCounter,
    pub call_to_return_flow: CategoryCounter,
    pub normal_edge: CategoryCounter,
    pub call_edge: CategoryCounter,
    pub return_edge: CategoryCounter,
    pub call_to_return_edge: CategoryCounter,
    pub summary_edge: CategoryCounter,
}

impl CacheStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Print a breakdown of per-category cache effectiveness. Counters are
    /// only ever emitted at `Full` verbosity, matching the specification's
    /// rule that the statistics stream is "emitted only when a verbosity
    /// flag is at Full"; `Quiet` and `Summary` print nothing.
    pub fn print_statistics(&self, verbosity: Verbosity) {
        if verbosity != Verbosity::Full {
            return;
        }

        println!("normal_flow:         {}", self.normal_flow);
        println!("call_flow:           {}", self.call_flow);
        println!("return_flow:         {}", self.return_flow);
        println!("call_to_return_flow: {}", self.call_to_return_flow);
        println!("normal_edge:         {}", self.normal_edge);
        println!("call_edge:           {}", self.call_edge);
        println!("return_edge:         {}", self.return_edge);
        println!("call_to_return_edge: {}", self.call_to_return_edge);
        println!("summary_edge:        {}", self.summary_edge);

        let total_hits = self.normal_flow.hits
            + self.call_flow.hits
            + self.return_flow.hits
            + self.call_to_return_flow.hits
            + self.normal_edge.hits
            + self.call_edge.hits
            + self.return_edge.hits
            + self.call_to_return_edge.hits
            + self.summary_edge.hits;
        let total_constructions = self.normal_flow.constructions
            + self.call_flow.constructions
            + self.return_flow.constructions
            + self.call_to_return_flow.constructions
            + self.normal_edge.constructions
            + self.call_edge.constructions
            + self.return_edge.constructions
            + self.call_to_return_edge.constructions
            + self.summary_edge.constructions;
        println!("total:               {total_hits} hits, {total_constructions} constructions");
    }
}
