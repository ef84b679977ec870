//! Error types.
//!
//! Every fallible entry point validates its input eagerly and returns
//! [`TspResult`]. Heuristic solvers never fail mid-run on valid input; a
//! suboptimal tour is a result, not an error.

use thiserror::Error;

/// Result alias used across the crate.
pub type TspResult<T> = Result<T, TspError>;

/// Errors raised while building graphs, tours, or solver configurations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TspError {
    /// The distance matrix is malformed or degenerate.
    #[error("invalid graph: {0}")]
    InvalidGraph(String),

    /// A vertex sequence is not a permutation of the graph's vertices.
    #[error("invalid tour: {0}")]
    InvalidTour(String),

    /// A configuration value is out of range or contradicts another one.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl TspError {
    pub(crate) fn graph(msg: impl Into<String>) -> Self {
        Self::InvalidGraph(msg.into())
    }

    pub(crate) fn tour(msg: impl Into<String>) -> Self {
        Self::InvalidTour(msg.into())
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            TspError::graph("n = 2").to_string(),
            "invalid graph: n = 2"
        );
        assert_eq!(
            TspError::tour("vertex 3 repeated").to_string(),
            "invalid tour: vertex 3 repeated"
        );
        assert_eq!(
            TspError::config("population_size must be at least 2").to_string(),
            "invalid configuration: population_size must be at least 2"
        );
    }

    #[test]
    fn test_variants_compare() {
        assert_ne!(TspError::graph("x"), TspError::tour("x"));
        assert_eq!(TspError::config("x"), TspError::InvalidConfig("x".into()));
    }
}
