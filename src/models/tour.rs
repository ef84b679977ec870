//! Tour representation.

use rand::Rng;

use crate::error::{TspError, TspResult};
use crate::graph::Graph;
use crate::random::random_permutation;

/// A Hamiltonian cycle, stored as a permutation of `0..n`.
///
/// The cycle closes from the last vertex back to the first. The cost is
/// cached after [`evaluate`](Tour::evaluate) and is dropped by every
/// structural edit, so a cached value always matches the current order.
///
/// Structural edits ([`swap`](Tour::swap), [`reverse_segment`](Tour::reverse_segment),
/// [`rotate_segment`](Tour::rotate_segment), [`splice`](Tour::splice)) only
/// rearrange positions that already exist, so they cannot break the
/// permutation invariant.
///
/// # Examples
///
/// ```
/// use u_tsp::graph::Graph;
/// use u_tsp::models::Tour;
///
/// let graph = Graph::from_rows(&[
///     vec![0.0, 1.0, 2.0],
///     vec![1.0, 0.0, 3.0],
///     vec![2.0, 3.0, 0.0],
/// ]).unwrap();
///
/// let mut tour = Tour::new(vec![2, 0, 1]).unwrap();
/// assert_eq!(tour.cost(), None);
/// assert_eq!(tour.evaluate(&graph), 6.0);
/// assert_eq!(tour.cost(), Some(6.0));
///
/// tour.swap(0, 1);
/// assert_eq!(tour.cost(), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    order: Vec<usize>,
    cost: Option<f64>,
}

impl Tour {
    /// Creates a tour from a vertex sequence.
    ///
    /// Fails with [`TspError::InvalidTour`] unless `order` is a permutation
    /// of `0..order.len()`.
    pub fn new(order: Vec<usize>) -> TspResult<Self> {
        check_permutation(&order)?;
        Ok(Self { order, cost: None })
    }

    /// Creates a tour over all vertices of `graph` and evaluates it.
    pub fn for_graph(order: Vec<usize>, graph: &Graph) -> TspResult<Self> {
        if order.len() != graph.vertex_count() {
            return Err(TspError::tour(format!(
                "tour has {} vertices, graph has {}",
                order.len(),
                graph.vertex_count()
            )));
        }
        let mut tour = Self::new(order)?;
        tour.evaluate(graph);
        Ok(tour)
    }

    /// The identity tour `0, 1, ..., n-1`.
    pub fn identity(n: usize) -> Self {
        Self {
            order: (0..n).collect(),
            cost: None,
        }
    }

    /// A uniformly random tour over `n` vertices.
    pub fn random<R: Rng>(n: usize, rng: &mut R) -> Self {
        Self {
            order: random_permutation(n, rng),
            cost: None,
        }
    }

    /// Wraps an operator output that is a permutation by construction.
    pub(crate) fn from_permutation(order: Vec<usize>) -> Self {
        debug_assert!(check_permutation(&order).is_ok(), "operator broke permutation");
        Self { order, cost: None }
    }

    /// The vertex sequence.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Consumes the tour, returning its vertex sequence.
    pub fn into_order(self) -> Vec<usize> {
        self.order
    }

    /// Number of vertices in the tour.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` for an empty tour.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns `true` if the sequence is a permutation of `0..len`.
    pub fn is_valid(&self) -> bool {
        check_permutation(&self.order).is_ok()
    }

    /// Cached closed-cycle length, or `None` if not evaluated since the
    /// last edit.
    pub fn cost(&self) -> Option<f64> {
        self.cost
    }

    /// Computes, caches, and returns the closed-cycle length.
    pub fn evaluate(&mut self, graph: &Graph) -> f64 {
        let cost = graph.cycle_length(&self.order);
        self.cost = Some(cost);
        cost
    }

    /// Closed-cycle length, recomputed from scratch.
    pub fn length(&self, graph: &Graph) -> f64 {
        graph.cycle_length(&self.order)
    }

    /// Exchanges the vertices at positions `i` and `j`.
    ///
    /// # Panics
    ///
    /// Panics if either position is out of bounds.
    pub fn swap(&mut self, i: usize, j: usize) {
        self.order.swap(i, j);
        self.cost = None;
    }

    /// Reverses positions `i..=j`.
    ///
    /// # Panics
    ///
    /// Panics if `i > j` or `j` is out of bounds.
    pub fn reverse_segment(&mut self, i: usize, j: usize) {
        self.order[i..=j].reverse();
        self.cost = None;
    }

    /// Rotates positions `start..end` left by `shift`.
    pub fn rotate_segment(&mut self, start: usize, end: usize, shift: usize) {
        let len = end - start;
        if len > 0 {
            self.order[start..end].rotate_left(shift % len);
            self.cost = None;
        }
    }

    /// Moves the vertex at position `from` to position `to`, shifting the
    /// vertices between them by one.
    pub fn relocate(&mut self, from: usize, to: usize) {
        let v = self.order.remove(from);
        self.order.insert(to, v);
        self.cost = None;
    }

    /// Two-point splice: keeps positions `start..=end` of `self` and fills the
    /// remaining positions with `donor`'s vertices in donor order, starting
    /// after `end` and wrapping around.
    ///
    /// This is the child construction of order crossover (OX).
    ///
    /// # Panics
    ///
    /// Panics if the tours differ in length or the segment is out of bounds.
    pub fn splice(&self, donor: &Tour, start: usize, end: usize) -> Tour {
        let n = self.len();
        assert_eq!(n, donor.len(), "tours must have equal length");
        assert!(start <= end && end < n, "segment {start}..={end} out of bounds");

        let mut child = vec![usize::MAX; n];
        let mut in_segment = vec![false; n];
        for i in start..=end {
            child[i] = self.order[i];
            in_segment[self.order[i]] = true;
        }

        let mut pos = (end + 1) % n;
        for offset in 0..n {
            let v = donor.order[(end + 1 + offset) % n];
            if !in_segment[v] {
                child[pos] = v;
                pos = (pos + 1) % n;
            }
        }

        Tour::from_permutation(child)
    }

    /// Rotation and direction that put vertex 0 first and the smaller of its
    /// two neighbours second.
    ///
    /// Two tours describe the same cycle iff their canonical forms are equal.
    pub fn canonical(&self) -> Vec<usize> {
        let n = self.len();
        if n == 0 {
            return Vec::new();
        }
        let Some(zero) = self.order.iter().position(|&v| v == 0) else {
            return self.order.clone();
        };
        let forward: Vec<usize> = (0..n).map(|k| self.order[(zero + k) % n]).collect();
        if n < 3 || forward[1] < forward[n - 1] {
            return forward;
        }
        let mut backward = Vec::with_capacity(n);
        backward.push(0);
        backward.extend(forward[1..].iter().rev());
        backward
    }
}

/// Checks that `order` is a permutation of `0..order.len()`.
fn check_permutation(order: &[usize]) -> TspResult<()> {
    let n = order.len();
    let mut seen = vec![false; n];
    for &v in order {
        if v >= n {
            return Err(TspError::tour(format!(
                "vertex {v} outside 0..{n}"
            )));
        }
        if seen[v] {
            return Err(TspError::tour(format!("vertex {v} appears more than once")));
        }
        seen[v] = true;
    }
    Ok(())
}

/// Renders a tour as `(a)-(b)-...-(a)` using optional vertex labels.
///
/// # Examples
///
/// ```
/// use u_tsp::models::format_tour;
///
/// assert_eq!(format_tour(&[0, 2, 1], None), "(0)-(2)-(1)-(0)");
/// assert_eq!(format_tour(&[1, 0], Some(&["a", "b"][..])), "(b)-(a)-(b)");
/// ```
pub fn format_tour(order: &[usize], labels: Option<&[&str]>) -> String {
    let label = |v: usize| match labels.and_then(|l| l.get(v)) {
        Some(s) => (*s).to_string(),
        None => v.to_string(),
    };
    let Some(&first) = order.first() else {
        return String::new();
    };
    let mut out: Vec<String> = order.iter().map(|&v| format!("({})", label(v))).collect();
    out.push(format!("({})", label(first)));
    out.join("-")
}
