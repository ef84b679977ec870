//! Population member contract.

use crate::models::Tour;

/// A candidate solution in a GA population.
///
/// Lower fitness is better. An unevaluated individual reports
/// `f64::INFINITY`, so it can never displace an evaluated one.
pub trait Individual: Clone {
    /// Current fitness (tour cost).
    fn fitness(&self) -> f64;
}

impl Individual for Tour {
    fn fitness(&self) -> f64 {
        self.cost().unwrap_or(f64::INFINITY)
    }
}
