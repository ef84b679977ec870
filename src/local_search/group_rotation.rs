//! Group-rotation refinement.
//!
//! The tour is cut into `groups` consecutive segments of equal length. Each
//! segment in turn is tried at every cyclic shift; the shift giving the
//! shortest full tour is kept before moving on to the next segment. Tours
//! whose length is not a multiple of `groups` are left unchanged.
//!
//! Each accepted rotation strictly shortens the tour.
//!
//! # Complexity
//!
//! O(n²): n/groups shifts per group, each evaluated in O(n).

use crate::graph::Graph;
use crate::models::Tour;

use super::Refine;

/// Rotates equal-length segments of a tour to their best cyclic shift.
///
/// # Examples
///
/// ```
/// use u_tsp::graph::{Graph, Point};
/// use u_tsp::local_search::{GroupRotation, Refine};
/// use u_tsp::models::Tour;
///
/// let graph = Graph::from_points(&[
///     Point::new(0.0, 0.0),
///     Point::new(1.0, 0.0),
///     Point::new(2.0, 0.0),
///     Point::new(2.0, 1.0),
///     Point::new(1.0, 1.0),
///     Point::new(0.0, 1.0),
/// ]).unwrap();
///
/// // First half is out of order by one shift.
/// let mut tour = Tour::new(vec![1, 2, 0, 3, 4, 5]).unwrap();
/// let before = tour.evaluate(&graph);
/// GroupRotation::new(2).refine(&graph, &mut tour);
/// assert!(tour.cost().unwrap() <= before);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupRotation {
    groups: usize,
}

impl Default for GroupRotation {
    fn default() -> Self {
        Self { groups: 3 }
    }
}

impl GroupRotation {
    /// Creates the refiner. `groups` below 1 is raised to 1.
    pub fn new(groups: usize) -> Self {
        Self {
            groups: groups.max(1),
        }
    }

    /// Number of segments.
    pub fn groups(&self) -> usize {
        self.groups
    }
}

impl Refine for GroupRotation {
    fn refine(&self, graph: &Graph, tour: &mut Tour) -> usize {
        let mut best_cost = match tour.cost() {
            Some(c) => c,
            None => tour.evaluate(graph),
        };

        let n = tour.len();
        if n == 0 || n % self.groups != 0 {
            return 0;
        }

        let size = n / self.groups;
        let mut accepted = 0;

        for g in 0..self.groups {
            let start = g * size;
            let end = start + size;
            let mut best_shift = 0;
            let mut candidate = tour.order().to_vec();

            for shift in 1..size {
                candidate[start..end].copy_from_slice(&tour.order()[start..end]);
                candidate[start..end].rotate_left(shift);
                let cost = graph.cycle_length(&candidate);
                if cost < best_cost {
                    best_cost = cost;
                    best_shift = shift;
                }
            }

            if best_shift > 0 {
                tour.rotate_segment(start, end, best_shift);
                tour.evaluate(graph);
                accepted += 1;
            }
        }

        accepted
    }

    fn name(&self) -> &str {
        "group-rotation"
    }
}
