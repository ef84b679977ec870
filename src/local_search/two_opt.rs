//! 2-opt improvement on closed tours.
//!
//! # Algorithm
//!
//! For each pair of non-adjacent edges (t[i], t[i+1]) and (t[j], t[j+1]) of
//! the cycle, compute the change in length from reversing the segment
//! between them:
//!
//! ```text
//! delta = d(t[i], t[j]) + d(t[i+1], t[j+1]) - d(t[i], t[i+1]) - d(t[j], t[j+1])
//! ```
//!
//! If delta < 0, reverse t[i+1..=j] and keep scanning. Passes repeat until a
//! full pass finds no improving pair (first-improvement strategy), or until
//! the move cap is reached.
//!
//! A tour returned without hitting the cap is a 2-opt local optimum, so a
//! second application changes nothing.
//!
//! # Complexity
//!
//! O(n²) per pass.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use crate::graph::Graph;
use crate::models::Tour;

use super::Refine;

/// Improvements smaller than this are treated as ties.
const IMPROVEMENT_EPS: f64 = 1e-10;

/// 2-opt refinement with an optional cap on applied moves.
///
/// # Examples
///
/// ```
/// use u_tsp::graph::{Graph, Point};
/// use u_tsp::local_search::{Refine, TwoOpt};
/// use u_tsp::models::Tour;
///
/// // Unit square visited in a crossing order.
/// let graph = Graph::from_points(&[
///     Point::new(0.0, 0.0),
///     Point::new(1.0, 0.0),
///     Point::new(1.0, 1.0),
///     Point::new(0.0, 1.0),
/// ]).unwrap();
/// let mut tour = Tour::new(vec![0, 2, 1, 3]).unwrap();
///
/// TwoOpt::new().refine(&graph, &mut tour);
/// assert!((tour.cost().unwrap() - 4.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TwoOpt {
    iteration_cap: usize,
}

impl TwoOpt {
    /// Runs to a local optimum.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops after `cap` improving moves. `0` means no cap.
    pub fn with_iteration_cap(cap: usize) -> Self {
        Self { iteration_cap: cap }
    }

    /// The configured move cap (`0` = none).
    pub fn iteration_cap(&self) -> usize {
        self.iteration_cap
    }
}

impl Refine for TwoOpt {
    fn refine(&self, graph: &Graph, tour: &mut Tour) -> usize {
        let n = tour.len();
        if n < 4 {
            if tour.cost().is_none() {
                tour.evaluate(graph);
            }
            return 0;
        }

        let mut moves = 0;
        let mut improved = true;

        'search: while improved {
            improved = false;
            for i in 0..n - 2 {
                // (t[n-1], t[0]) is adjacent to (t[0], t[1]).
                let j_end = if i == 0 { n - 1 } else { n };
                for j in (i + 2)..j_end {
                    if two_opt_delta(tour.order(), graph, i, j) < -IMPROVEMENT_EPS {
                        tour.reverse_segment(i + 1, j);
                        moves += 1;
                        improved = true;
                        if self.iteration_cap > 0 && moves >= self.iteration_cap {
                            break 'search;
                        }
                    }
                }
            }
        }

        if moves > 0 || tour.cost().is_none() {
            tour.evaluate(graph);
        }
        moves
    }

    fn name(&self) -> &str {
        "2-opt"
    }
}

/// Applies 2-opt once to a copy of `tour` and returns the improved tour.
///
/// `iteration_cap` bounds the number of applied moves; `0` means run to a
/// local optimum. Tours with fewer than 4 vertices are returned unchanged.
pub fn two_opt_improve(tour: &Tour, graph: &Graph, iteration_cap: usize) -> Tour {
    TwoOpt::with_iteration_cap(iteration_cap).refined(graph, tour.clone())
}

/// Length change from reversing `order[i+1..=j]` in the closed tour.
fn two_opt_delta(order: &[usize], graph: &Graph, i: usize, j: usize) -> f64 {
    let n = order.len();
    let a = order[i];
    let b = order[i + 1];
    let c = order[j];
    let d = order[(j + 1) % n];

    graph.distance(a, c) + graph.distance(b, d) - graph.distance(a, b) - graph.distance(c, d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Point;
    use crate::random::create_rng;

    fn circle(n: usize) -> Graph {
        let points: Vec<Point> = (0..n)
            .map(|k| {
                let a = 2.0 * std::f64::consts::PI * k as f64 / n as f64;
                Point::new(a.cos() * 10.0, a.sin() * 10.0)
            })
            .collect();
        Graph::from_points(&points).unwrap()
    }

    #[test]
    fn test_2opt_already_optimal() {
        let g = circle(6);
        let mut tour = Tour::identity(6);
        let before = tour.evaluate(&g);
        let moves = TwoOpt::new().refine(&g, &mut tour);
        assert_eq!(moves, 0);
        assert_eq!(tour.order(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(tour.cost(), Some(before));
    }

    #[test]
    fn test_2opt_uncrosses_square() {
        let g = Graph::from_points(&[
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ])
        .unwrap();
        let improved = two_opt_improve(&Tour::new(vec![0, 2, 1, 3]).unwrap(), &g, 0);
        assert!((improved.cost().unwrap() - 4.0).abs() < 1e-10);
        assert!(improved.is_valid());
    }

    #[test]
    fn test_2opt_reaches_circle_optimum() {
        // On points in convex position the 2-opt optimum is the hull order.
        let g = circle(10);
        let optimum = g.cycle_length(&(0..10).collect::<Vec<_>>());
        let mut rng = create_rng(5);
        for _ in 0..10 {
            let improved = two_opt_improve(&Tour::random(10, &mut rng), &g, 0);
            assert!((improved.cost().unwrap() - optimum).abs() < 1e-9);
        }
    }

    #[test]
    fn test_2opt_small_tours_unchanged() {
        let g = circle(3);
        let tour = Tour::new(vec![2, 0, 1]).unwrap();
        let out = two_opt_improve(&tour, &g, 0);
        assert_eq!(out.order(), tour.order());
        assert!(out.cost().is_some());
    }

    #[test]
    fn test_2opt_does_not_worsen() {
        let g = Graph::from_points(&[
            Point::new(5.0, 5.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
            Point::new(3.0, 7.0),
        ])
        .unwrap();
        let mut tour = Tour::new(vec![0, 4, 1, 3, 2, 5]).unwrap();
        let initial = tour.evaluate(&g);
        TwoOpt::new().refine(&g, &mut tour);
        assert!(tour.cost().unwrap() <= initial + 1e-10);
        assert!((tour.cost().unwrap() - tour.length(&g)).abs() < 1e-12);
    }

    #[test]
    fn test_2opt_idempotent() {
        let g = circle(12);
        let mut rng = create_rng(9);
        let once = two_opt_improve(&Tour::random(12, &mut rng), &g, 0);
        let twice = two_opt_improve(&once, &g, 0);
        assert_eq!(once.order(), twice.order());
    }

    #[test]
    fn test_2opt_iteration_cap() {
        let g = circle(12);
        let mut rng = create_rng(21);
        let start = Tour::random(12, &mut rng);
        let mut capped = start.clone();
        let moves = TwoOpt::with_iteration_cap(1).refine(&g, &mut capped);
        assert!(moves <= 1);
        let full_moves = TwoOpt::new().refine(&g, &mut start.clone());
        assert!(full_moves >= moves);
    }

    #[test]
    fn test_delta_matches_recomputed_length() {
        let g = circle(7);
        let order = vec![0, 3, 1, 5, 2, 6, 4];
        let base = g.cycle_length(&order);
        for i in 0..5 {
            for j in (i + 2)..7 {
                if i == 0 && j == 6 {
                    continue;
                }
                let mut moved = order.clone();
                moved[i + 1..=j].reverse();
                let expected = g.cycle_length(&moved) - base;
                assert!((two_opt_delta(&order, &g, i, j) - expected).abs() < 1e-9);
            }
        }
    }
}
