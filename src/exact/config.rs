//! Exact solver configuration.

use serde::{Deserialize, Serialize};

use crate::error::{TspError, TspResult};

/// Bounding rule used to prune partial tours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Bound {
    /// Prune when the path length alone reaches the incumbent.
    PartialCost,
    /// Prune when the path length plus the cheapest outgoing edge of every
    /// vertex still to be left reaches the incumbent.
    #[default]
    MinOutgoing,
}

/// Configuration for [`ExactSolver`](super::ExactSolver).
///
/// With no budget set the search is exhaustive and the result is proven
/// optimal.
///
/// # Examples
///
/// ```
/// use u_tsp::exact::{Bound, ExactConfig};
///
/// let config = ExactConfig::default()
///     .with_bound(Bound::PartialCost)
///     .with_node_limit(1_000_000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExactConfig {
    /// Pruning rule.
    pub bound: Bound,

    /// Explore only one direction of each cycle (`tour[1] < tour[n-1]`).
    pub break_reflection: bool,

    /// Seed the incumbent with a nearest-neighbour tour before searching.
    pub warm_start: bool,

    /// Stop after expanding this many search nodes.
    pub node_limit: Option<u64>,

    /// Stop after approximately this many milliseconds.
    pub time_limit_ms: Option<u64>,
}

impl Default for ExactConfig {
    fn default() -> Self {
        Self {
            bound: Bound::default(),
            break_reflection: true,
            warm_start: false,
            node_limit: None,
            time_limit_ms: None,
        }
    }
}

impl ExactConfig {
    /// Sets the bounding rule.
    pub fn with_bound(mut self, bound: Bound) -> Self {
        self.bound = bound;
        self
    }

    /// Enables or disables reflection symmetry breaking.
    pub fn with_break_reflection(mut self, on: bool) -> Self {
        self.break_reflection = on;
        self
    }

    /// Enables or disables the nearest-neighbour warm start.
    pub fn with_warm_start(mut self, on: bool) -> Self {
        self.warm_start = on;
        self
    }

    /// Caps the number of expanded nodes.
    pub fn with_node_limit(mut self, nodes: u64) -> Self {
        self.node_limit = Some(nodes);
        self
    }

    /// Caps wall-clock time in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> TspResult<()> {
        if self.node_limit == Some(0) {
            return Err(TspError::config("node_limit must be positive or None"));
        }
        if self.time_limit_ms == Some(0) {
            return Err(TspError::config("time_limit_ms must be positive or None"));
        }
        Ok(())
    }
}
