//! Graph model.
//!
//! - [`Point`]: planar coordinates for Euclidean instances
//! - [`DistanceMatrix`]: unvalidated dense storage
//! - [`Graph`]: validated, immutable complete graph consumed by the solvers

mod complete;
mod matrix;
mod point;

pub use complete::{Graph, MIN_VERTICES, SYMMETRY_TOLERANCE};
pub use matrix::DistanceMatrix;
pub use point::Point;
