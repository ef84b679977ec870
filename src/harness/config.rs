//! Run configuration shared by all three solvers.

use serde::{Deserialize, Serialize};

use crate::error::{TspError, TspResult};
use crate::exact::ExactConfig;
use crate::ga::{Crossover, GaConfig, Mutation, Selection};
use crate::local_search::{GroupRotation, Refine, TwoOpt};

/// Which solver a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverKind {
    /// Branch-and-bound.
    Exact,
    /// Genetic algorithm.
    Genetic,
    /// Genetic algorithm with local-search refinement of offspring.
    Memetic,
}

impl SolverKind {
    /// Short lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SolverKind::Exact => "exact",
            SolverKind::Genetic => "genetic",
            SolverKind::Memetic => "memetic",
        }
    }
}

impl std::fmt::Display for SolverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Refinement strategy used by memetic runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocalSearch {
    /// 2-opt, capped by `local_search_iteration_cap`.
    #[default]
    TwoOpt,
    /// Best cyclic rotation of each of `groups` equal segments.
    GroupRotation(usize),
}

impl LocalSearch {
    /// Builds the refiner. `iteration_cap` only applies to 2-opt.
    pub fn build(&self, iteration_cap: usize) -> Box<dyn Refine> {
        match *self {
            LocalSearch::TwoOpt => Box::new(TwoOpt::with_iteration_cap(iteration_cap)),
            LocalSearch::GroupRotation(groups) => Box::new(GroupRotation::new(groups)),
        }
    }
}

/// Parameters of a single harness run.
///
/// Defaults: population 100, 500 generations, seed 999, mutation rate 0.1.
///
/// # Examples
///
/// ```
/// use u_tsp::harness::RunConfig;
///
/// let config = RunConfig::default()
///     .with_population_size(50)
///     .with_generations(200)
///     .with_seed(7)
///     .with_local_search(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Individuals per generation (GA/MA, ≥ 2).
    pub population_size: usize,
    /// Generation budget (GA/MA, ≥ 1).
    pub generations: usize,
    /// Seed of the run's private generator.
    pub seed: u64,
    /// Per-offspring mutation probability.
    pub mutation_rate: f64,
    /// Tournament size, `2 ≤ k ≤ population_size`.
    pub tournament_size: usize,
    /// Selects the memetic variant in [`RunConfig::evolutionary_solver`].
    pub use_local_search: bool,
    /// Maximum improving 2-opt moves per refinement; 0 runs to a local optimum.
    /// To apply no moves, set `local_search_probability` to 0 or run the
    /// genetic solver instead.
    pub local_search_iteration_cap: usize,
    /// Refinement strategy for memetic runs.
    pub local_search: LocalSearch,
    /// Probability of refining each offspring in memetic runs.
    pub local_search_probability: f64,
    /// Per-pair crossover probability.
    pub crossover_rate: f64,
    /// Individuals copied unchanged into the next generation.
    pub elite_count: usize,
    /// Generations without improvement before stopping; 0 disables.
    pub stagnation_limit: usize,
    /// Crossover operator.
    pub crossover: Crossover,
    /// Mutation operator.
    pub mutation: Mutation,
    /// Node budget of the exact solver.
    pub exact_node_limit: Option<u64>,
    /// Time budget of the exact solver in milliseconds.
    pub exact_time_limit_ms: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 500,
            seed: 999,
            mutation_rate: 0.1,
            tournament_size: 3,
            use_local_search: false,
            local_search_iteration_cap: 0,
            local_search: LocalSearch::default(),
            local_search_probability: 1.0,
            crossover_rate: 0.9,
            elite_count: 1,
            stagnation_limit: 0,
            crossover: Crossover::default(),
            mutation: Mutation::default(),
            exact_node_limit: None,
            exact_time_limit_ms: None,
        }
    }
}

impl RunConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the generation budget.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the mutation rate. Not clamped; [`validate`](Self::validate)
    /// rejects values outside `[0, 1]`.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Toggles the memetic variant.
    pub fn with_local_search(mut self, on: bool) -> Self {
        self.use_local_search = on;
        self
    }

    /// Sets the 2-opt iteration cap.
    pub fn with_local_search_iteration_cap(mut self, cap: usize) -> Self {
        self.local_search_iteration_cap = cap;
        self
    }

    /// Sets the refinement strategy.
    pub fn with_local_search_strategy(mut self, strategy: LocalSearch) -> Self {
        self.local_search = strategy;
        self
    }

    /// Sets the refinement probability.
    pub fn with_local_search_probability(mut self, p: f64) -> Self {
        self.local_search_probability = p;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the number of elites.
    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    /// Sets the stagnation limit.
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Sets the crossover operator.
    pub fn with_crossover(mut self, op: Crossover) -> Self {
        self.crossover = op;
        self
    }

    /// Sets the mutation operator.
    pub fn with_mutation(mut self, op: Mutation) -> Self {
        self.mutation = op;
        self
    }

    /// Sets the exact solver's node budget.
    pub fn with_exact_node_limit(mut self, nodes: u64) -> Self {
        self.exact_node_limit = Some(nodes);
        self
    }

    /// Sets the exact solver's time budget.
    pub fn with_exact_time_limit_ms(mut self, ms: u64) -> Self {
        self.exact_time_limit_ms = Some(ms);
        self
    }

    /// [`SolverKind::Memetic`] if `use_local_search` is set, else
    /// [`SolverKind::Genetic`].
    pub fn evolutionary_solver(&self) -> SolverKind {
        if self.use_local_search {
            SolverKind::Memetic
        } else {
            SolverKind::Genetic
        }
    }

    /// GA engine parameters. The seed is always set.
    pub fn to_ga_config(&self) -> GaConfig {
        GaConfig {
            population_size: self.population_size,
            max_generations: self.generations,
            selection: Selection::Tournament(self.tournament_size),
            crossover: self.crossover,
            mutation: self.mutation,
            elite_count: self.elite_count,
            crossover_rate: self.crossover_rate,
            mutation_rate: self.mutation_rate,
            local_search_probability: self.local_search_probability,
            stagnation_limit: self.stagnation_limit,
            seed: Some(self.seed),
        }
    }

    /// Exact solver parameters.
    pub fn to_exact_config(&self) -> ExactConfig {
        ExactConfig {
            node_limit: self.exact_node_limit,
            time_limit_ms: self.exact_time_limit_ms,
            ..ExactConfig::default()
        }
    }

    /// Validates the fields used by `solver`.
    pub fn validate_for(&self, solver: SolverKind) -> TspResult<()> {
        match solver {
            SolverKind::Exact => self.to_exact_config().validate(),
            SolverKind::Genetic => self.to_ga_config().validate(),
            SolverKind::Memetic => {
                self.to_ga_config().validate()?;
                if let LocalSearch::GroupRotation(0) = self.local_search {
                    return Err(TspError::config("group rotation needs at least one group"));
                }
                Ok(())
            }
        }
    }

    /// Validates every field.
    pub fn validate(&self) -> TspResult<()> {
        self.validate_for(SolverKind::Exact)?;
        self.validate_for(SolverKind::Memetic)
    }
}
