//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use serde::{Deserialize, Serialize};

use crate::error::{TspError, TspResult};

use super::operators::{Crossover, Mutation};
use super::selection::Selection;

/// Configuration for the genetic and memetic algorithms.
///
/// # Defaults
///
/// ```
/// use u_tsp::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 500);
/// assert_eq!(config.elite_count, 1);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_tsp::ga::{Crossover, GaConfig, Mutation, Selection};
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_selection(Selection::Tournament(5))
///     .with_crossover(Crossover::OnePoint)
///     .with_mutation(Mutation::Invert)
///     .with_mutation_rate(0.2)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaConfig {
    /// Number of individuals in the population. Constant across generations.
    pub population_size: usize,

    /// Number of generations to run.
    pub max_generations: usize,

    /// Selection strategy for choosing parents.
    pub selection: Selection,

    /// Crossover operator.
    pub crossover: Crossover,

    /// Mutation operator.
    pub mutation: Mutation,

    /// Number of best individuals copied unchanged into the next generation.
    ///
    /// At least one, so the best cost never regresses.
    pub elite_count: usize,

    /// Probability of recombining a selected pair (0.0–1.0).
    ///
    /// When crossover is not applied, a clone of the first parent is used.
    pub crossover_rate: f64,

    /// Probability of mutating each offspring (0.0–1.0).
    pub mutation_rate: f64,

    /// Probability of refining each offspring when a refiner is installed
    /// (0.0–1.0). Ignored by the plain GA.
    pub local_search_probability: f64,

    /// Generations without improvement of the best cost before stopping.
    ///
    /// Set to 0 to always run `max_generations` (the default).
    pub stagnation_limit: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` draws a fresh seed from the operating system.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 500,
            selection: Selection::default(),
            crossover: Crossover::default(),
            mutation: Mutation::default(),
            elite_count: 1,
            crossover_rate: 0.9,
            mutation_rate: 0.1,
            local_search_probability: 1.0,
            stagnation_limit: 0,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Convenience builder for tournament selection.
    ///
    /// Equivalent to `.with_selection(Selection::Tournament(k))`.
    pub fn with_tournament_size(self, k: usize) -> Self {
        self.with_selection(Selection::Tournament(k))
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

    /// Sets the number of elites.
    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the mutation rate. Out-of-range values are kept and rejected by
    /// [`validate`](Self::validate).
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the per-offspring refinement probability.
    pub fn with_local_search_probability(mut self, p: f64) -> Self {
        self.local_search_probability = p;
        self
    }

    /// Sets the stagnation limit (0 to disable).
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> TspResult<()> {
        if self.population_size < 2 {
            return Err(TspError::config(format!(
                "population_size must be at least 2, got {}",
                self.population_size
            )));
        }
        if self.max_generations == 0 {
            return Err(TspError::config("max_generations must be at least 1"));
        }
        if self.elite_count == 0 {
            return Err(TspError::config("elite_count must be at least 1"));
        }
        if self.elite_count >= self.population_size {
            return Err(TspError::config(format!(
                "elite_count {} leaves no room for offspring in a population of {}",
                self.elite_count, self.population_size
            )));
        }
        for (name, value) in [
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate", self.mutation_rate),
            ("local_search_probability", self.local_search_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(TspError::config(format!("{name} must be in [0, 1], got {value}")));
            }
        }
        if let Selection::Tournament(k) = self.selection {
            if k < 2 || k > self.population_size {
                return Err(TspError::config(format!(
                    "tournament_size must be in [2, {}], got {k}",
                    self.population_size
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 100);
        assert_eq!(config.max_generations, 500);
        assert_eq!(config.selection, Selection::Tournament(3));
        assert_eq!(config.crossover, Crossover::Order);
        assert_eq!(config.mutation, Mutation::Swap);
        assert_eq!(config.elite_count, 1);
        assert!((config.crossover_rate - 0.9).abs() < 1e-10);
        assert!((config.mutation_rate - 0.1).abs() < 1e-10);
        assert!((config.local_search_probability - 1.0).abs() < 1e-10);
        assert_eq!(config.stagnation_limit, 0);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::default()
            .with_population_size(200)
            .with_max_generations(1000)
            .with_selection(Selection::Rank)
            .with_elite_count(4)
            .with_crossover_rate(0.8)
            .with_mutation_rate(0.05)
            .with_local_search_probability(0.5)
            .with_stagnation_limit(100)
            .with_seed(42);

        assert_eq!(config.population_size, 200);
        assert_eq!(config.max_generations, 1000);
        assert_eq!(config.selection, Selection::Rank);
        assert_eq!(config.elite_count, 4);
        assert!((config.crossover_rate - 0.8).abs() < 1e-10);
        assert!((config.mutation_rate - 0.05).abs() < 1e-10);
        assert!((config.local_search_probability - 0.5).abs() < 1e-10);
        assert_eq!(config.stagnation_limit, 100);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_validate_population_too_small() {
        let config = GaConfig::default().with_population_size(1);
        assert!(matches!(config.validate(), Err(TspError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_zero_generations() {
        let config = GaConfig::default().with_max_generations(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_elites() {
        assert!(GaConfig::default().with_elite_count(0).validate().is_err());
        let full = GaConfig::default()
            .with_population_size(4)
            .with_tournament_size(2)
            .with_elite_count(4);
        assert!(full.validate().is_err());
    }

    #[test]
    fn test_validate_rates_outside_unit_interval() {
        let mut config = GaConfig::default();
        config.mutation_rate = 1.5;
        assert!(config.validate().is_err());
        config.mutation_rate = f64::NAN;
        assert!(config.validate().is_err());
        config.mutation_rate = 0.0;
        config.crossover_rate = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_tournament_size() {
        let base = GaConfig::default().with_population_size(10);
        assert!(base.clone().with_tournament_size(1).validate().is_err());
        assert!(base.clone().with_tournament_size(11).validate().is_err());
        assert!(base.clone().with_tournament_size(10).validate().is_ok());
        assert!(base.with_tournament_size(2).validate().is_ok());
    }

    #[test]
    fn test_minimal_population() {
        let config = GaConfig::default()
            .with_population_size(2)
            .with_tournament_size(2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_out_of_range_rates_fail_validation() {
        let base = GaConfig::default().with_population_size(10);
        let bad = [
            base.clone().with_mutation_rate(1.5),
            base.clone().with_mutation_rate(-0.01),
            base.clone().with_crossover_rate(-0.5),
            base.clone().with_local_search_probability(3.0),
        ];
        for config in bad {
            assert!(
                matches!(config.validate(), Err(TspError::InvalidConfig(_))),
                "{config:?} accepted"
            );
        }
        let kept = base.with_mutation_rate(2.0);
        assert!((kept.mutation_rate - 2.0).abs() < 1e-10);
    }
}
