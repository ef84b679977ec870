//! # u-tsp
//!
//! Symmetric Traveling Salesman Problem solvers for small complete graphs:
//! exact branch-and-bound, a genetic algorithm, and a memetic algorithm
//! (the genetic algorithm with local-search refinement of offspring), plus a
//! harness that runs them under one configuration and records convergence.
//!
//! ## Modules
//!
//! - [`graph`]: Validated complete graph over a distance matrix or points
//! - [`models`]: [`Tour`](models::Tour): permutation with cached cost
//! - [`exact`]: Depth-first branch-and-bound with an explicit stack
//! - [`local_search`]: [`Refine`](local_search::Refine) strategies (2-opt, group rotation)
//! - [`ga`]: Genetic algorithm engine, selection and permutation operators
//! - [`harness`]: Run configuration, solver dispatch, and results
//! - [`random`]: Seeded generators
//! - [`error`]: Error type shared by all modules
//!
//! ## Example
//!
//! ```
//! use u_tsp::graph::{Graph, Point};
//! use u_tsp::harness::{compare, RunConfig};
//!
//! let points: Vec<Point> = (0..8)
//!     .map(|k| {
//!         let a = std::f64::consts::TAU * k as f64 / 8.0;
//!         Point::new(a.cos(), a.sin())
//!     })
//!     .collect();
//! let graph = Graph::from_points(&points).unwrap();
//!
//! let config = RunConfig::default().with_population_size(30).with_generations(50);
//! let results = compare(&graph, &config).unwrap();
//! assert!(results.exact.proven_optimal);
//! assert!(results.memetic.cost >= results.exact.cost - 1e-9);
//! ```

pub mod error;
pub mod exact;
pub mod ga;
pub mod graph;
pub mod harness;
pub mod local_search;
pub mod models;
pub mod random;

pub use error::{TspError, TspResult};
