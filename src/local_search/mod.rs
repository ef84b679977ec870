//! Local search refinement for tours.
//!
//! - [`Refine`]: strategy trait plugged into the GA engine to form the memetic algorithm
//! - [`TwoOpt`]: 2-opt segment reversal to a local optimum
//! - [`GroupRotation`]: best cyclic shift of equal-length segments

mod group_rotation;
mod refine;
mod two_opt;

pub use group_rotation::GroupRotation;
pub use refine::Refine;
pub use two_opt::{two_opt_improve, TwoOpt};
