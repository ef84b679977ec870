//! Permutation crossover and mutation operators for tours.
//!
//! Every operator only rearranges vertices that are already present, so
//! offspring are valid permutations by construction.
//!
//! # Crossover Operators
//!
//! - [`Crossover::Order`] (OX): Davis (1985), preserves relative order
//! - [`Crossover::OnePoint`]: prefix of one parent, remainder in the other's order
//! - [`Crossover::PartiallyMapped`] (PMX): Goldberg & Lingle (1985), preserves absolute position
//!
//! # Mutation Operators
//!
//! - [`Mutation::Swap`]: exchange two distinct positions, O(1)
//! - [`Mutation::Invert`]: reverse a random segment, O(n)
//! - [`Mutation::Insert`]: remove and reinsert at a random position, O(n)
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Goldberg & Lingle (1985), "Alleles, Loci, and the Traveling Salesman Problem"

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::Tour;

/// Crossover operator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Crossover {
    /// Order crossover (OX) on a random segment.
    #[default]
    Order,
    /// One-point crossover with duplicate-skipping repair.
    OnePoint,
    /// Partially mapped crossover (PMX) on a random segment.
    PartiallyMapped,
}

impl Crossover {
    /// Produces two children from two parents of equal length.
    ///
    /// # Panics
    /// Panics if the parents differ in length.
    pub fn apply<R: Rng>(&self, parent1: &Tour, parent2: &Tour, rng: &mut R) -> (Tour, Tour) {
        assert_eq!(parent1.len(), parent2.len(), "parents must have equal length");
        if parent1.len() < 2 {
            return (parent1.clone(), parent2.clone());
        }
        match self {
            Crossover::Order => order_crossover(parent1, parent2, rng),
            Crossover::OnePoint => {
                let point = rng.random_range(1..parent1.len());
                one_point_crossover(parent1, parent2, point)
            }
            Crossover::PartiallyMapped => pmx_crossover(parent1, parent2, rng),
        }
    }
}

/// Mutation operator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mutation {
    /// Swap two distinct positions.
    #[default]
    Swap,
    /// Reverse a random segment.
    Invert,
    /// Move one vertex to another position.
    Insert,
}

impl Mutation {
    /// Perturbs `tour` in place. Tours shorter than 2 are left alone.
    pub fn apply<R: Rng>(&self, tour: &mut Tour, rng: &mut R) {
        if tour.len() < 2 {
            return;
        }
        match self {
            Mutation::Swap => swap_mutation(tour, rng),
            Mutation::Invert => invert_mutation(tour, rng),
            Mutation::Insert => insert_mutation(tour, rng),
        }
    }
}

// ============================================================================
// Crossover operators
// ============================================================================

/// Order Crossover (OX).
///
/// 1. Select a random segment `[start, end]`
/// 2. Copy it from one parent into the child at the same positions
/// 3. Fill the rest from the other parent in its order, starting after the
///    segment and wrapping, skipping vertices already copied
pub fn order_crossover<R: Rng>(parent1: &Tour, parent2: &Tour, rng: &mut R) -> (Tour, Tour) {
    let (start, end) = random_segment(parent1.len(), rng);
    (
        parent1.splice(parent2, start, end),
        parent2.splice(parent1, start, end),
    )
}

/// One-point crossover with repair.
///
/// `child1 = parent1[..point]` followed by the vertices of `parent2` not in
/// that prefix, in `parent2` order; `child2` symmetrically.
///
/// # Examples
///
/// ```
/// use u_tsp::ga::one_point_crossover;
/// use u_tsp::models::Tour;
///
/// let p1 = Tour::new(vec![0, 1, 2, 3, 4]).unwrap();
/// let p2 = Tour::new(vec![4, 3, 2, 1, 0]).unwrap();
/// let (c1, c2) = one_point_crossover(&p1, &p2, 2);
/// assert_eq!(c1.order(), &[0, 1, 4, 3, 2]);
/// assert_eq!(c2.order(), &[4, 3, 0, 1, 2]);
/// ```
pub fn one_point_crossover(parent1: &Tour, parent2: &Tour, point: usize) -> (Tour, Tour) {
    let point = point.min(parent1.len());
    (
        one_point_child(parent1.order(), parent2.order(), point),
        one_point_child(parent2.order(), parent1.order(), point),
    )
}

fn one_point_child(head: &[usize], tail: &[usize], point: usize) -> Tour {
    let mut used = vec![false; head.len()];
    let mut child = Vec::with_capacity(head.len());
    for &v in &head[..point] {
        used[v] = true;
        child.push(v);
    }
    child.extend(tail.iter().copied().filter(|&v| !used[v]));
    Tour::from_permutation(child)
}

/// Partially Mapped Crossover (PMX).
pub fn pmx_crossover<R: Rng>(parent1: &Tour, parent2: &Tour, rng: &mut R) -> (Tour, Tour) {
    let (start, end) = random_segment(parent1.len(), rng);
    (
        pmx_build_child(parent1.order(), parent2.order(), start, end),
        pmx_build_child(parent2.order(), parent1.order(), start, end),
    )
}

/// Build one PMX child: copy segment from `template`, map from `donor`.
fn pmx_build_child(template: &[usize], donor: &[usize], start: usize, end: usize) -> Tour {
    let n = template.len();
    let sentinel = usize::MAX;
    let mut child = vec![sentinel; n];
    let mut placed = vec![false; n];
    let mut donor_pos = vec![0; n];
    for (i, &v) in donor.iter().enumerate() {
        donor_pos[v] = i;
    }

    for i in start..=end {
        child[i] = template[i];
        placed[template[i]] = true;
    }

    // Donor segment values not yet placed follow the template→donor mapping
    // chain until it leaves the segment.
    for i in start..=end {
        let donor_val = donor[i];
        if placed[donor_val] {
            continue;
        }
        let mut pos = i;
        loop {
            let target = donor_pos[template[pos]];
            if target < start || target > end {
                child[target] = donor_val;
                placed[donor_val] = true;
                break;
            }
            pos = target;
        }
    }

    for i in 0..n {
        if child[i] == sentinel {
            child[i] = donor[i];
        }
    }

    Tour::from_permutation(child)
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Swap mutation: exchange two distinct random positions.
pub fn swap_mutation<R: Rng>(tour: &mut Tour, rng: &mut R) {
    let (i, j) = distinct_pair(tour.len(), rng);
    tour.swap(i, j);
}

/// Invert mutation: reverse a random segment of at least two positions.
pub fn invert_mutation<R: Rng>(tour: &mut Tour, rng: &mut R) {
    let (i, j) = distinct_pair(tour.len(), rng);
    tour.reverse_segment(i.min(j), i.max(j));
}

/// Insert mutation: move one vertex to a different position.
pub fn insert_mutation<R: Rng>(tour: &mut Tour, rng: &mut R) {
    let (from, to) = distinct_pair(tour.len(), rng);
    tour.relocate(from, to);
}

// ============================================================================
// Helpers
// ============================================================================

/// Random segment `start <= end` within `0..n`.
fn random_segment<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    (a.min(b), a.max(b))
}

/// Two distinct positions in `0..n`, `n >= 2`.
fn distinct_pair<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let i = rng.random_range(0..n);
    let mut j = rng.random_range(0..n - 1);
    if j >= i {
        j += 1;
    }
    (i, j)
}
