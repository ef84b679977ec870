//! GA evolutionary loop execution.
//!
//! [`GaEngine`] orchestrates the complete evolutionary process:
//! initialization → evaluation → selection → crossover → mutation →
//! (refinement) → evaluation → replacement → repeat.
//!
//! Installing a [`Refine`] strategy turns the GA into a memetic algorithm.
//! Nothing else about the loop changes.

use std::time::Instant;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::TspResult;
use crate::graph::Graph;
use crate::local_search::Refine;
use crate::models::Tour;
use crate::random::create_rng;

use super::config::GaConfig;
use super::types::Individual;

/// Best cost known after a given generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TracePoint {
    /// Generation index; 0 is the initial population.
    pub generation: usize,
    /// Best cost seen up to and including this generation.
    pub best_cost: f64,
}

/// Operator counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GaStats {
    /// Offspring produced by crossover.
    pub crossover_offspring: u64,
    /// Offspring that were mutated.
    pub mutations: u64,
    /// Offspring passed through the refiner.
    pub refinements: u64,
    /// Tour cost evaluations, initial population included.
    pub evaluations: u64,
    /// Wall-clock duration.
    pub elapsed_ms: u64,
}

impl GaStats {
    /// New solutions created by the variation operators.
    pub fn total_solutions(&self) -> u64 {
        self.crossover_offspring + self.mutations
    }
}

/// Result of a GA or MA run.
#[derive(Debug, Clone, PartialEq)]
pub struct GaOutcome {
    /// The best tour found during the entire run.
    pub best: Tour,
    /// Its cost.
    pub best_cost: f64,
    /// Number of generations executed.
    pub generations: usize,
    /// Whether the run stopped on the stagnation limit.
    pub stagnated: bool,
    /// Best cost after the initial population and after each generation.
    pub trace: Vec<TracePoint>,
    /// Operator counters.
    pub stats: GaStats,
}

/// Genetic algorithm over tours of one graph, optionally memetic.
///
/// # Usage
///
/// ```
/// use u_tsp::ga::{GaConfig, GaEngine};
/// use u_tsp::graph::{Graph, Point};
/// use u_tsp::local_search::TwoOpt;
///
/// let graph = Graph::from_points(&[
///     Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(2.0, 0.0),
///     Point::new(2.0, 1.0), Point::new(1.0, 1.0), Point::new(0.0, 1.0),
/// ]).unwrap();
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_max_generations(30)
///     .with_seed(42);
///
/// let ga = GaEngine::new(&graph, config.clone()).unwrap().run();
/// let two_opt = TwoOpt::new();
/// let ma = GaEngine::new(&graph, config).unwrap().with_refiner(&two_opt).run();
///
/// assert_eq!(ga.trace.len(), 31);
/// assert!(ma.best_cost <= ma.trace[0].best_cost);
/// assert!(ma.stats.refinements > 0);
/// ```
pub struct GaEngine<'a> {
    graph: &'a Graph,
    config: GaConfig,
    refiner: Option<&'a dyn Refine>,
}

impl<'a> GaEngine<'a> {
    /// Creates an engine after validating `config`.
    pub fn new(graph: &'a Graph, config: GaConfig) -> TspResult<Self> {
        config.validate()?;
        Ok(Self {
            graph,
            config,
            refiner: None,
        })
    }

    /// Installs a refinement step for offspring.
    pub fn with_refiner(mut self, refiner: &'a dyn Refine) -> Self {
        self.refiner = Some(refiner);
        self
    }

    /// The engine configuration.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Returns `true` when a refiner is installed.
    pub fn is_memetic(&self) -> bool {
        self.refiner.is_some()
    }

    /// Runs with a generator seeded from `config.seed`.
    pub fn run(&self) -> GaOutcome {
        let seed = self.config.seed.unwrap_or_else(rand::random);
        let mut rng = create_rng(seed);
        self.run_with_rng(&mut rng)
    }

    /// Runs drawing all randomness from `rng`.
    pub fn run_with_rng<R: Rng>(&self, rng: &mut R) -> GaOutcome {
        let started = Instant::now();
        let config = &self.config;
        let graph = self.graph;
        let n = graph.vertex_count();
        let mut stats = GaStats::default();

        debug!(
            vertices = n,
            population = config.population_size,
            generations = config.max_generations,
            refiner = self.refiner.map(|r| r.name()),
            "evolution started"
        );

        // 1. Initialize and evaluate
        let mut population: Vec<Tour> = (0..config.population_size)
            .map(|_| {
                let mut tour = Tour::random(n, rng);
                tour.evaluate(graph);
                tour
            })
            .collect();
        stats.evaluations += population.len() as u64;
        sort_population(&mut population);

        let mut best = population[0].clone();
        let mut trace = Vec::with_capacity(config.max_generations + 1);
        trace.push(TracePoint {
            generation: 0,
            best_cost: best.fitness(),
        });

        let mut stagnation_counter = 0usize;
        let mut stagnated = false;
        let mut generations = 0;

        // 2. Evolutionary loop
        for gen in 1..=config.max_generations {
            let mut next_gen: Vec<Tour> = population[..config.elite_count].to_vec();

            while next_gen.len() < config.population_size {
                let p1 = config.selection.select(&population, rng);
                let p2 = config.selection.select(&population, rng);

                let children = if rng.random_range(0.0..1.0) < config.crossover_rate {
                    let (c1, c2) = config.crossover.apply(&population[p1], &population[p2], rng);
                    stats.crossover_offspring += 2;
                    vec![c1, c2]
                } else {
                    vec![population[p1].clone()]
                };

                for mut child in children {
                    if next_gen.len() >= config.population_size {
                        break;
                    }

                    if rng.random_range(0.0..1.0) < config.mutation_rate {
                        config.mutation.apply(&mut child, rng);
                        stats.mutations += 1;
                    }

                    if let Some(refiner) = self.refiner {
                        if rng.random_range(0.0..1.0) < config.local_search_probability {
                            refiner.refine(graph, &mut child);
                            stats.refinements += 1;
                        }
                    }

                    if child.cost().is_none() {
                        child.evaluate(graph);
                        stats.evaluations += 1;
                    }

                    next_gen.push(child);
                }
            }

            population = next_gen;
            sort_population(&mut population);
            generations = gen;

            if population[0].fitness() < best.fitness() {
                best = population[0].clone();
                stagnation_counter = 0;
            } else {
                stagnation_counter += 1;
            }

            trace.push(TracePoint {
                generation: gen,
                best_cost: best.fitness(),
            });
            trace!(generation = gen, best = best.fitness(), "generation finished");

            if config.stagnation_limit > 0 && stagnation_counter >= config.stagnation_limit {
                stagnated = true;
                break;
            }
        }

        stats.elapsed_ms = started.elapsed().as_millis() as u64;
        let best_cost = best.fitness();

        debug!(
            best_cost,
            generations,
            stagnated,
            evaluations = stats.evaluations,
            "evolution finished"
        );

        GaOutcome {
            best,
            best_cost,
            generations,
            stagnated,
            trace,
            stats,
        }
    }
}

/// Sort by fitness ascending (best first). Stable, so equal-cost individuals
/// keep their order and runs stay reproducible.
fn sort_population(population: &mut [Tour]) {
    population.sort_by(|a, b| a.fitness().total_cmp(&b.fitness()));
}

// ============================================================================
// Tests
// ============================================================================
