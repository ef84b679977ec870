//! Pluggable refinement step.

use crate::graph::Graph;
use crate::models::Tour;

/// A tour improvement procedure.
///
/// The GA engine calls [`refine`](Refine::refine) on offspring between
/// creation and evaluation; with no refiner installed the engine is a plain
/// GA, with one it is a memetic algorithm. The same value can also be applied
/// once to a finished tour.
///
/// Implementations must never make a tour worse and must leave it evaluated.
pub trait Refine: Send + Sync {
    /// Improves `tour` in place and returns the number of accepted moves.
    fn refine(&self, graph: &Graph, tour: &mut Tour) -> usize;

    /// Short name used in logs.
    fn name(&self) -> &str;

    /// By-value form of [`refine`](Refine::refine).
    fn refined(&self, graph: &Graph, mut tour: Tour) -> Tour {
        self.refine(graph, &mut tour);
        tour
    }
}
