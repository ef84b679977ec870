//! Genetic and memetic algorithms over tours.
//!
//! - [`GaConfig`]: population, operator, and stopping parameters
//! - [`GaEngine`]: the evolutionary loop; installing a
//!   [`Refine`](crate::local_search::Refine) strategy makes it memetic
//! - [`Selection`], [`Crossover`], [`Mutation`]: permutation operators
//!
//! # References
//!
//! - Holland (1975), "Adaptation in Natural and Artificial Systems"
//! - Moscato (1989), "On Evolution, Search, Optimization, Genetic Algorithms
//!   and Martial Arts: Towards Memetic Algorithms"

mod config;
mod engine;
mod operators;
mod selection;
mod types;

pub use config::GaConfig;
pub use engine::{GaEngine, GaOutcome, GaStats, TracePoint};
pub use operators::{
    insert_mutation, invert_mutation, one_point_crossover, order_crossover, pmx_crossover,
    swap_mutation, Crossover, Mutation,
};
pub use selection::Selection;
pub use types::Individual;
