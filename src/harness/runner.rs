//! Solver invocation and result recording.

use serde::{Deserialize, Serialize};
use tracing::{debug, info_span};

use crate::error::TspResult;
use crate::exact::{ExactSolver, ExactStats};
use crate::ga::{GaEngine, GaOutcome, GaStats, TracePoint};
use crate::graph::Graph;
use crate::random::create_rng;

use super::config::{RunConfig, SolverKind};

/// Solver-specific counters of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStats {
    /// Branch-and-bound counters.
    Exact(ExactStats),
    /// GA/MA operator counters.
    Evolutionary(GaStats),
}

impl RunStats {
    /// Wall-clock duration of the run.
    pub fn elapsed_ms(&self) -> u64 {
        match self {
            RunStats::Exact(s) => s.elapsed_ms,
            RunStats::Evolutionary(s) => s.elapsed_ms,
        }
    }
}

/// Outcome of one harness invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Solver that produced the result.
    pub solver: SolverKind,
    /// Best tour as vertex indices.
    pub tour: Vec<usize>,
    /// Closed-cycle length of `tour`.
    pub cost: f64,
    /// Best cost after each generation, generation 0 first. Empty for exact runs.
    pub trace: Vec<TracePoint>,
    /// Whether `cost` is proven minimal. Only exact runs can set this.
    pub proven_optimal: bool,
    /// Solver-specific counters.
    pub stats: RunStats,
}

impl RunResult {
    /// The trace as bare costs.
    pub fn trace_costs(&self) -> Vec<f64> {
        self.trace.iter().map(|p| p.best_cost).collect()
    }

    /// Relative gap `(cost - reference) / reference`, or 0 when `reference` is 0.
    pub fn gap_to(&self, reference: f64) -> f64 {
        if reference == 0.0 {
            0.0
        } else {
            (self.cost - reference) / reference
        }
    }
}

/// Runs `solver` on `graph`.
///
/// Each call seeds its own generator from `config.seed`, so repeated calls
/// with the same arguments return identical results.
///
/// # Examples
///
/// ```
/// use u_tsp::graph::Graph;
/// use u_tsp::harness::{run, RunConfig, SolverKind};
///
/// let graph = Graph::from_rows(&[
///     vec![0.0, 1.0, 4.0, 3.0],
///     vec![1.0, 0.0, 2.0, 5.0],
///     vec![4.0, 2.0, 0.0, 1.0],
///     vec![3.0, 5.0, 1.0, 0.0],
/// ]).unwrap();
///
/// let exact = run(&graph, SolverKind::Exact, &RunConfig::default()).unwrap();
/// assert_eq!(exact.cost, 7.0);
/// assert!(exact.proven_optimal);
/// assert!(exact.trace.is_empty());
///
/// let config = RunConfig::default().with_population_size(20).with_generations(30);
/// let ga = run(&graph, SolverKind::Genetic, &config).unwrap();
/// assert_eq!(ga.trace.len(), 31);
/// ```
pub fn run(graph: &Graph, solver: SolverKind, config: &RunConfig) -> TspResult<RunResult> {
    let span = info_span!("run", solver = solver.as_str(), seed = config.seed);
    let _guard = span.enter();

    config.validate_for(solver)?;
    let result = match solver {
        SolverKind::Exact => solve_exact(graph, config),
        SolverKind::Genetic => solve_ga(graph, config),
        SolverKind::Memetic => solve_memetic(graph, config),
    }?;

    debug!(
        cost = result.cost,
        elapsed_ms = result.stats.elapsed_ms(),
        "run finished"
    );
    Ok(result)
}

/// Runs the branch-and-bound solver with the budgets in `config`.
pub fn solve_exact(graph: &Graph, config: &RunConfig) -> TspResult<RunResult> {
    let outcome = ExactSolver::new(config.to_exact_config()).solve(graph)?;
    let proven_optimal = outcome.is_optimal();
    Ok(RunResult {
        solver: SolverKind::Exact,
        tour: outcome.tour.into_order(),
        cost: outcome.cost,
        trace: Vec::new(),
        proven_optimal,
        stats: RunStats::Exact(outcome.stats),
    })
}

/// Runs the plain genetic algorithm. `use_local_search` is ignored.
pub fn solve_ga(graph: &Graph, config: &RunConfig) -> TspResult<RunResult> {
    let engine = GaEngine::new(graph, config.to_ga_config())?;
    let mut rng = create_rng(config.seed);
    Ok(evolutionary_result(
        SolverKind::Genetic,
        engine.run_with_rng(&mut rng),
    ))
}

/// Runs the memetic algorithm with the refiner selected by
/// `config.local_search`.
pub fn solve_memetic(graph: &Graph, config: &RunConfig) -> TspResult<RunResult> {
    let refiner = config.local_search.build(config.local_search_iteration_cap);
    let engine = GaEngine::new(graph, config.to_ga_config())?.with_refiner(refiner.as_ref());
    let mut rng = create_rng(config.seed);
    Ok(evolutionary_result(
        SolverKind::Memetic,
        engine.run_with_rng(&mut rng),
    ))
}

fn evolutionary_result(solver: SolverKind, outcome: GaOutcome) -> RunResult {
    RunResult {
        solver,
        tour: outcome.best.into_order(),
        cost: outcome.best_cost,
        trace: outcome.trace,
        proven_optimal: false,
        stats: RunStats::Evolutionary(outcome.stats),
    }
}

/// The three solvers run on one instance with one configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// Baseline from the exact solver.
    pub exact: RunResult,
    /// Plain GA.
    pub genetic: RunResult,
    /// GA with local search.
    pub memetic: RunResult,
}

impl Comparison {
    /// Relative gap of the GA to the exact baseline.
    pub fn genetic_gap(&self) -> f64 {
        self.genetic.gap_to(self.exact.cost)
    }

    /// Relative gap of the MA to the exact baseline.
    pub fn memetic_gap(&self) -> f64 {
        self.memetic.gap_to(self.exact.cost)
    }
}

/// Runs exact, GA, and MA on `graph`. `use_local_search` is ignored.
pub fn compare(graph: &Graph, config: &RunConfig) -> TspResult<Comparison> {
    Ok(Comparison {
        exact: run(graph, SolverKind::Exact, config)?,
        genetic: run(graph, SolverKind::Genetic, config)?,
        memetic: run(graph, SolverKind::Memetic, config)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TspError;
    use crate::harness::LocalSearch;

    fn example() -> Graph {
        Graph::from_rows(&[
            vec![0.0, 1.0, 4.0, 3.0],
            vec![1.0, 0.0, 2.0, 5.0],
            vec![4.0, 2.0, 0.0, 1.0],
            vec![3.0, 5.0, 1.0, 0.0],
        ])
        .unwrap()
    }

    fn small() -> RunConfig {
        RunConfig::default()
            .with_population_size(20)
            .with_generations(25)
            .with_seed(42)
    }

    #[test]
    fn test_exact_run_has_no_trace() {
        let result = run(&example(), SolverKind::Exact, &small()).unwrap();
        assert_eq!(result.solver, SolverKind::Exact);
        assert_eq!(result.cost, 7.0);
        assert!(result.proven_optimal);
        assert!(result.trace.is_empty());
        assert!(matches!(result.stats, RunStats::Exact(s) if s.nodes_generated > 0));
    }

    #[test]
    fn test_exact_budget_reports_unproven() {
        let config = small().with_exact_node_limit(1);
        let result = run(&example(), SolverKind::Exact, &config).unwrap();
        assert!(!result.proven_optimal);
        assert_eq!(result.tour.len(), 4);
    }

    #[test]
    fn test_ga_and_ma_find_example_optimum() {
        for solver in [SolverKind::Genetic, SolverKind::Memetic] {
            let result = run(&example(), solver, &small()).unwrap();
            assert_eq!(result.solver, solver);
            assert_eq!(result.cost, 7.0, "{solver}");
            assert!(!result.proven_optimal);
            assert_eq!(result.trace.len(), 26);
            assert_eq!(result.trace_costs().last().copied(), Some(7.0));
        }
    }

    #[test]
    fn test_memetic_counts_refinements() {
        let result = run(&example(), SolverKind::Memetic, &small()).unwrap();
        match result.stats {
            RunStats::Evolutionary(s) => assert!(s.refinements > 0),
            RunStats::Exact(_) => panic!("expected evolutionary stats"),
        }
    }

    #[test]
    fn test_memetic_without_refinement() {
        let config = small().with_local_search_probability(0.0);
        let result = run(&example(), SolverKind::Memetic, &config).unwrap();
        match result.stats {
            RunStats::Evolutionary(s) => assert_eq!(s.refinements, 0),
            RunStats::Exact(_) => panic!("expected evolutionary stats"),
        }
    }

    #[test]
    fn test_memetic_with_group_rotation() {
        let config = small().with_local_search_strategy(LocalSearch::GroupRotation(2));
        let result = run(&example(), SolverKind::Memetic, &config).unwrap();
        assert_eq!(result.cost, 7.0);
    }

    #[test]
    fn test_invalid_config_fails_before_running() {
        let err = run(&example(), SolverKind::Genetic, &small().with_population_size(1));
        assert!(matches!(err, Err(TspError::InvalidConfig(_))));
    }

    #[test]
    fn test_compare() {
        let comparison = compare(&example(), &small()).unwrap();
        assert_eq!(comparison.exact.cost, 7.0);
        assert!(comparison.genetic_gap() >= 0.0);
        assert!(comparison.memetic_gap().abs() < 1e-12);
    }

    #[test]
    fn test_gap_to_zero_reference() {
        let mut result = run(&example(), SolverKind::Exact, &small()).unwrap();
        assert_eq!(result.gap_to(0.0), 0.0);
        result.cost = 11.0;
        assert!((result.gap_to(10.0) - 0.1).abs() < 1e-12);
    }
}
