//! Run harness.
//!
//! Drives one solver under a [`RunConfig`] and returns a [`RunResult`]
//! holding the best tour, its cost, and (for GA/MA) the convergence trace.
//!
//! - [`run`]: dispatch on [`SolverKind`]
//! - [`solve_exact`], [`solve_ga`], [`solve_memetic`]: per-solver entry points
//! - [`compare`]: all three solvers on one instance

mod config;
mod runner;

pub use crate::ga::TracePoint;
pub use config::{LocalSearch, RunConfig, SolverKind};
pub use runner::{
    compare, run, solve_exact, solve_ga, solve_memetic, Comparison, RunResult, RunStats,
};
