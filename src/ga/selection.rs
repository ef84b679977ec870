//! Parent selection strategies.
//!
//! All strategies assume **minimization**: lower cost means higher fitness.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::types::Individual;

/// Selection strategy for choosing parents.
///
/// # Examples
///
/// ```
/// use u_tsp::ga::Selection;
///
/// // Tournament with size 3 (moderate selection pressure)
/// let sel = Selection::Tournament(3);
///
/// // Roulette wheel on inverse cost
/// let sel = Selection::Roulette;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// Pick `k` individuals uniformly at random (with replacement) and keep
    /// the cheapest.
    ///
    /// Higher `k` = stronger selection pressure.
    Tournament(usize),

    /// Fitness-proportionate selection with fitness `1 / cost`.
    Roulette,

    /// Linear ranking: the best of `n` gets weight `n`, the worst weight 1.
    ///
    /// Reference: Baker (1985), "Adaptive Selection Methods for Genetic
    /// Algorithms"
    Rank,

    /// Uniform choice among the cheaper half of the population.
    Truncation,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl Selection {
    /// Select a parent index from the population.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn select<I: Individual, R: Rng>(&self, population: &[I], rng: &mut R) -> usize {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );

        match self {
            Selection::Tournament(k) => tournament(population, *k, rng),
            Selection::Roulette => roulette(population, rng),
            Selection::Rank => rank(population, rng),
            Selection::Truncation => truncation(population, rng),
        }
    }
}

/// Tournament selection: pick k random individuals, return best.
fn tournament<I: Individual, R: Rng>(population: &[I], k: usize, rng: &mut R) -> usize {
    let k = k.max(1);
    let n = population.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if population[idx].fitness() < population[best_idx].fitness() {
            best_idx = idx;
        }
    }
    best_idx
}

/// Roulette wheel selection with weight `1 / cost`.
///
/// Zero-cost individuals are clamped to a tiny positive cost so the weight
/// stays finite.
fn roulette<I: Individual, R: Rng>(population: &[I], rng: &mut R) -> usize {
    let n = population.len();
    if n == 1 {
        return 0;
    }

    let weights: Vec<f64> = population
        .iter()
        .map(|ind| {
            let cost = ind.fitness();
            if cost.is_finite() {
                1.0 / cost.max(f64::EPSILON)
            } else {
                0.0
            }
        })
        .collect();

    let total: f64 = weights.iter().sum();
    if !(total > 0.0 && total.is_finite()) {
        return rng.random_range(0..n);
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }

    n - 1 // floating-point fallback
}

/// Indices sorted by fitness ascending (best first).
fn ranked<I: Individual>(population: &[I]) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..population.len()).collect();
    idx.sort_by(|&a, &b| population[a].fitness().total_cmp(&population[b].fitness()));
    idx
}

/// Rank-based selection using linear ranking.
fn rank<I: Individual, R: Rng>(population: &[I], rng: &mut R) -> usize {
    let n = population.len();
    if n == 1 {
        return 0;
    }

    let order = ranked(population);
    let total: f64 = (n * (n + 1)) as f64 / 2.0;
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;

    for (position, &original_idx) in order.iter().enumerate() {
        cumulative += (n - position) as f64;
        if cumulative > threshold {
            return original_idx;
        }
    }

    order[n - 1]
}

/// Uniform selection among the best `ceil(n / 2)` individuals.
fn truncation<I: Individual, R: Rng>(population: &[I], rng: &mut R) -> usize {
    let order = ranked(population);
    let cut = population.len().div_ceil(2);
    order[rng.random_range(0..cut)]
}
