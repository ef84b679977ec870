//! Exact solver: depth-first branch-and-bound over partial tours.
//!
//! - [`ExactSolver`]: the search driver
//! - [`ExactConfig`] / [`Bound`]: pruning rule, symmetry breaking, budgets
//! - [`SearchState`]: one frontier node (path, unvisited set, path length)
//! - [`VertexSet`]: packed unvisited-vertex set
//!
//! # Reference
//!
//! Little, J.D.C. et al. (1963). "An algorithm for the traveling salesman
//! problem", *Operations Research* 11(6), 972-989.

mod config;
mod solver;
mod state;
mod vertex_set;

pub use config::{Bound, ExactConfig};
pub use solver::{ExactOutcome, ExactSolver, ExactStats, Termination};
pub use state::SearchState;
pub use vertex_set::VertexSet;
