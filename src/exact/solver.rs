//! Depth-first branch-and-bound.
//!
//! # Algorithm
//!
//! The search fixes vertex 0 as the start of every tour, which removes
//! rotational symmetry. Nodes live on an explicit LIFO stack of
//! [`SearchState`] values. Popping a node:
//!
//! 1. complete path → close the cycle and compare with the incumbent;
//! 2. lower bound ≥ incumbent → prune;
//! 3. otherwise push every child, most expensive edge first, so the cheapest
//!    extension is explored next.
//!
//! With reflection breaking on, a child is skipped when no vertex left to
//! end the tour can exceed `tour[1]`, so each undirected cycle is reached in
//! one direction only.
//!
//! Runtime is factorial in the worst case; intended for n up to about 15.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::TspResult;
use crate::graph::Graph;
use crate::models::Tour;

use super::config::ExactConfig;
use super::state::SearchState;

/// Vertex every explored tour starts from.
const ROOT: usize = 0;

/// How often (in expanded nodes) the wall clock is read.
const CLOCK_CHECK_INTERVAL: u64 = 1024;

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// The whole tree was explored or pruned.
    OptimalityProven,
    /// The node budget ran out.
    NodeLimit,
    /// The time budget ran out.
    TimeLimit,
}

/// Search counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExactStats {
    /// Nodes popped from the stack, complete tours included.
    pub nodes_generated: u64,
    /// Nodes discarded by the bound.
    pub nodes_pruned: u64,
    /// Times the incumbent improved.
    pub incumbent_updates: u64,
    /// Wall-clock duration.
    pub elapsed_ms: u64,
}

/// Result of an exact solve.
#[derive(Debug, Clone, PartialEq)]
pub struct ExactOutcome {
    /// Best tour found, rooted at vertex 0.
    pub tour: Tour,
    /// Its closed-cycle length.
    pub cost: f64,
    /// Why the search stopped.
    pub termination: Termination,
    /// Search counters.
    pub stats: ExactStats,
}

impl ExactOutcome {
    /// Returns `true` if the tour is proven optimal.
    pub fn is_optimal(&self) -> bool {
        self.termination == Termination::OptimalityProven
    }
}

/// Branch-and-bound TSP solver.
///
/// Deterministic: the same graph and configuration always give the same
/// tour, unless a time limit interrupts the search.
///
/// # Examples
///
/// ```
/// use u_tsp::exact::{ExactConfig, ExactSolver};
/// use u_tsp::graph::Graph;
///
/// let graph = Graph::from_edges(4, &[
///     (0, 1, 1.0), (0, 2, 4.0), (0, 3, 3.0),
///     (1, 2, 2.0), (1, 3, 5.0), (2, 3, 1.0),
/// ]).unwrap();
///
/// let outcome = ExactSolver::new(ExactConfig::default()).solve(&graph).unwrap();
/// assert_eq!(outcome.cost, 7.0);
/// assert!(outcome.is_optimal());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExactSolver {
    config: ExactConfig,
}

impl ExactSolver {
    /// Creates a solver with the given configuration.
    pub fn new(config: ExactConfig) -> Self {
        Self { config }
    }

    /// The solver configuration.
    pub fn config(&self) -> &ExactConfig {
        &self.config
    }

    /// Runs the search to completion or until a budget trips.
    pub fn solve(&self, graph: &Graph) -> TspResult<ExactOutcome> {
        self.config.validate()?;
        let started = Instant::now();
        let n = graph.vertex_count();
        let min_outgoing = graph.min_outgoing();

        debug!(vertices = n, bound = ?self.config.bound, "exact search started");

        let mut stats = ExactStats::default();
        let mut incumbent: Option<(Vec<usize>, f64)> = if self.config.warm_start {
            let order = graph.nearest_neighbor_order(ROOT);
            let cost = graph.cycle_length(&order);
            Some((order, cost))
        } else {
            None
        };

        let mut stack = vec![SearchState::root(n, ROOT)];
        let mut termination = Termination::OptimalityProven;

        while let Some(state) = stack.pop() {
            if let Some(limit) = self.config.node_limit {
                if stats.nodes_generated >= limit {
                    termination = Termination::NodeLimit;
                    break;
                }
            }
            if let Some(ms) = self.config.time_limit_ms {
                if stats.nodes_generated % CLOCK_CHECK_INTERVAL == 0
                    && started.elapsed().as_millis() >= u128::from(ms)
                {
                    termination = Termination::TimeLimit;
                    break;
                }
            }
            stats.nodes_generated += 1;

            let best_cost = incumbent.as_ref().map_or(f64::INFINITY, |(_, c)| *c);

            if state.is_complete() {
                let total = state.closed_cost(graph);
                if total < best_cost {
                    trace!(cost = total, nodes = stats.nodes_generated, "incumbent improved");
                    stats.incumbent_updates += 1;
                    incumbent = Some((state.prefix().to_vec(), total));
                }
                continue;
            }

            if state.lower_bound(self.config.bound, &min_outgoing) >= best_cost {
                stats.nodes_pruned += 1;
                continue;
            }

            self.push_children(&state, graph, &mut stack);
        }

        let (order, cost) = match incumbent {
            Some(found) => found,
            None => {
                let order = graph.nearest_neighbor_order(ROOT);
                let cost = graph.cycle_length(&order);
                (order, cost)
            }
        };
        stats.elapsed_ms = started.elapsed().as_millis() as u64;

        debug!(
            cost,
            nodes = stats.nodes_generated,
            pruned = stats.nodes_pruned,
            termination = ?termination,
            "exact search finished"
        );

        let mut tour = Tour::from_permutation(order);
        tour.evaluate(graph);
        Ok(ExactOutcome {
            tour,
            cost,
            termination,
            stats,
        })
    }

    /// Pushes the children of `state` so the cheapest edge is popped first.
    fn push_children(&self, state: &SearchState, graph: &Graph, stack: &mut Vec<SearchState>) {
        let last = state.last();
        let mut candidates: Vec<usize> = state.unvisited().iter().collect();
        // Stable sort: equal edges keep ascending vertex order.
        candidates.sort_by(|&a, &b| graph.distance(last, a).total_cmp(&graph.distance(last, b)));

        for &v in candidates.iter().rev() {
            if self.config.break_reflection && !can_end_above_second(state, v) {
                continue;
            }
            stack.push(state.extend(v, graph));
        }
    }
}

/// After stepping to `v`, can the tour still end on a vertex greater than
/// its second vertex?
fn can_end_above_second(state: &SearchState, v: usize) -> bool {
    let second = if state.depth() == 1 { v } else { state.prefix()[1] };
    let rest = state.unvisited().without(v);
    let final_max = rest.max().unwrap_or(v);
    final_max > second
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exact::Bound;
    use crate::graph::Point;
    use crate::random::create_rng;
    use rand::Rng;

    fn example_graph() -> Graph {
        Graph::from_edges(
            4,
            &[(0, 1, 1.0), (0, 2, 4.0), (0, 3, 3.0), (1, 2, 2.0), (1, 3, 5.0), (2, 3, 1.0)],
        )
        .unwrap()
    }

    fn random_graph(n: usize, seed: u64) -> Graph {
        let mut rng = create_rng(seed);
        let points: Vec<Point> = (0..n)
            .map(|_| Point::new(rng.random_range(0.0..100.0), rng.random_range(0.0..100.0)))
            .collect();
        Graph::from_points(&points).unwrap()
    }

    /// Minimum over every permutation of 1..n, vertex 0 fixed first.
    fn brute_force(graph: &Graph) -> f64 {
        fn permute(rest: &mut Vec<usize>, k: usize, graph: &Graph, best: &mut f64) {
            if k == rest.len() {
                let mut order = vec![0];
                order.extend_from_slice(rest);
                *best = best.min(graph.cycle_length(&order));
                return;
            }
            for i in k..rest.len() {
                rest.swap(k, i);
                permute(rest, k + 1, graph, best);
                rest.swap(k, i);
            }
        }
        let mut rest: Vec<usize> = (1..graph.vertex_count()).collect();
        let mut best = f64::INFINITY;
        permute(&mut rest, 0, graph, &mut best);
        best
    }

    #[test]
    fn test_example_graph_optimum() {
        let outcome = ExactSolver::default().solve(&example_graph()).unwrap();
        assert_eq!(outcome.cost, 7.0);
        assert_eq!(outcome.tour.canonical(), vec![0, 1, 2, 3]);
        assert_eq!(outcome.tour.cost(), Some(7.0));
        assert!(outcome.is_optimal());
    }

    #[test]
    fn test_three_vertices() {
        let g = Graph::from_rows(&[
            vec![0.0, 2.0, 3.0],
            vec![2.0, 0.0, 4.0],
            vec![3.0, 4.0, 0.0],
        ])
        .unwrap();
        let outcome = ExactSolver::default().solve(&g).unwrap();
        assert_eq!(outcome.cost, 9.0);
        assert_eq!(outcome.tour.order(), &[0, 1, 2]);
    }

    #[test]
    fn test_matches_brute_force() {
        for seed in 0..8 {
            for n in [5, 6, 7] {
                let g = random_graph(n, seed);
                let expected = brute_force(&g);
                for bound in [Bound::PartialCost, Bound::MinOutgoing] {
                    for reflection in [true, false] {
                        let config = ExactConfig::default()
                            .with_bound(bound)
                            .with_break_reflection(reflection);
                        let outcome = ExactSolver::new(config).solve(&g).unwrap();
                        assert!(
                            (outcome.cost - expected).abs() < 1e-9,
                            "n={n} seed={seed} {bound:?} reflection={reflection}: {} vs {expected}",
                            outcome.cost
                        );
                        assert!(outcome.tour.is_valid());
                        assert!((outcome.tour.length(&g) - outcome.cost).abs() < 1e-9);
                    }
                }
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let g = random_graph(9, 3);
        let a = ExactSolver::default().solve(&g).unwrap();
        let b = ExactSolver::default().solve(&g).unwrap();
        assert_eq!(a.cost, b.cost);
        assert_eq!(a.tour, b.tour);
        assert_eq!(a.stats.nodes_generated, b.stats.nodes_generated);
    }

    #[test]
    fn test_bounding_prunes() {
        let g = random_graph(9, 4);
        let plain = ExactSolver::new(ExactConfig::default().with_bound(Bound::PartialCost))
            .solve(&g)
            .unwrap();
        let tight = ExactSolver::default().solve(&g).unwrap();
        assert!(tight.stats.nodes_pruned > 0);
        assert!(tight.stats.nodes_generated <= plain.stats.nodes_generated);
        assert!((plain.cost - tight.cost).abs() < 1e-9);
    }

    #[test]
    fn test_reflection_breaking_shrinks_search() {
        let g = random_graph(8, 5);
        let both = ExactSolver::new(ExactConfig::default().with_break_reflection(false))
            .solve(&g)
            .unwrap();
        let one = ExactSolver::default().solve(&g).unwrap();
        assert!(one.stats.nodes_generated < both.stats.nodes_generated);
        let order = one.tour.order();
        assert!(order[1] < order[order.len() - 1]);
    }

    #[test]
    fn test_warm_start_same_optimum() {
        let g = random_graph(9, 6);
        let cold = ExactSolver::default().solve(&g).unwrap();
        let warm = ExactSolver::new(ExactConfig::default().with_warm_start(true))
            .solve(&g)
            .unwrap();
        assert!((cold.cost - warm.cost).abs() < 1e-9);
        assert!(warm.stats.nodes_generated <= cold.stats.nodes_generated);
    }

    #[test]
    fn test_node_limit_returns_incumbent() {
        let g = random_graph(12, 7);
        let outcome = ExactSolver::new(ExactConfig::default().with_node_limit(50))
            .solve(&g)
            .unwrap();
        assert_eq!(outcome.termination, Termination::NodeLimit);
        assert!(!outcome.is_optimal());
        assert_eq!(outcome.stats.nodes_generated, 50);
        assert!(outcome.tour.is_valid());
        assert_eq!(outcome.tour.len(), 12);
        assert!((outcome.tour.length(&g) - outcome.cost).abs() < 1e-9);
    }

    #[test]
    fn test_node_limit_before_first_tour_falls_back() {
        let g = random_graph(10, 8);
        let outcome = ExactSolver::new(ExactConfig::default().with_node_limit(1))
            .solve(&g)
            .unwrap();
        assert_eq!(outcome.termination, Termination::NodeLimit);
        assert_eq!(outcome.tour.order(), g.nearest_neighbor_order(0).as_slice());
    }

    #[test]
    fn test_time_limit_returns_valid_tour() {
        let g = random_graph(25, 9);
        let outcome = ExactSolver::new(ExactConfig::default().with_time_limit_ms(20))
            .solve(&g)
            .unwrap();
        assert_eq!(outcome.termination, Termination::TimeLimit);
        assert!(!outcome.is_optimal());
        assert!(outcome.tour.is_valid());
        assert_eq!(outcome.tour.len(), 25);
        assert!((outcome.tour.length(&g) - outcome.cost).abs() < 1e-9);
        assert!(outcome.stats.nodes_generated > 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = ExactSolver::new(ExactConfig::default().with_node_limit(0))
            .solve(&example_graph())
            .unwrap_err();
        assert!(matches!(err, crate::error::TspError::InvalidConfig(_)));
    }
}
