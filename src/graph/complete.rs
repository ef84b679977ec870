//! Validated weighted complete graph.

use crate::error::{TspError, TspResult};

use super::{DistanceMatrix, Point};

/// Maximum allowed `|d(i, j) - d(j, i)|` for a matrix to count as symmetric.
pub const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// Minimum number of vertices for a meaningful tour.
pub const MIN_VERTICES: usize = 3;

/// An immutable, fully connected, symmetric weighted graph.
///
/// Built once from a distance matrix, nested rows, an edge list, or planar
/// coordinates, and then shared read-only by every solver. A `&Graph` can be
/// handed to any number of concurrent runs.
///
/// # Invariants
///
/// - at least [`MIN_VERTICES`] vertices
/// - every entry finite and non-negative
/// - zero diagonal
/// - symmetric within [`SYMMETRY_TOLERANCE`]
///
/// # Examples
///
/// ```
/// use u_tsp::graph::Graph;
///
/// let graph = Graph::from_rows(&[
///     vec![0.0, 1.0, 2.0],
///     vec![1.0, 0.0, 3.0],
///     vec![2.0, 3.0, 0.0],
/// ]).unwrap();
/// assert_eq!(graph.vertex_count(), 3);
/// assert_eq!(graph.distance(1, 2), 3.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    matrix: DistanceMatrix,
}

impl Graph {
    /// Validates a distance matrix and wraps it.
    pub fn new(matrix: DistanceMatrix) -> TspResult<Self> {
        let n = matrix.size();
        if n < MIN_VERTICES {
            return Err(TspError::graph(format!(
                "graph needs at least {MIN_VERTICES} vertices, got {n}"
            )));
        }
        for i in 0..n {
            for j in 0..n {
                let d = matrix.get(i, j);
                if !d.is_finite() {
                    return Err(TspError::graph(format!("d({i}, {j}) is not finite")));
                }
                if d < 0.0 {
                    return Err(TspError::graph(format!("d({i}, {j}) = {d} is negative")));
                }
            }
            if matrix.get(i, i) > SYMMETRY_TOLERANCE {
                return Err(TspError::graph(format!(
                    "d({i}, {i}) = {} must be zero",
                    matrix.get(i, i)
                )));
            }
        }
        if let Some((i, j)) = matrix.first_asymmetry(SYMMETRY_TOLERANCE) {
            return Err(TspError::graph(format!(
                "asymmetric: d({i}, {j}) = {} but d({j}, {i}) = {}",
                matrix.get(i, j),
                matrix.get(j, i)
            )));
        }
        Ok(Self { matrix })
    }

    /// Builds a graph from nested rows.
    ///
    /// Fails if the rows don't form a square matrix.
    pub fn from_rows(rows: &[Vec<f64>]) -> TspResult<Self> {
        let matrix = DistanceMatrix::from_rows(rows).ok_or_else(|| {
            TspError::graph(format!("distance matrix with {} rows is not square", rows.len()))
        })?;
        Self::new(matrix)
    }

    /// Builds a graph from a row-major `n * n` buffer.
    pub fn from_data(size: usize, data: Vec<f64>) -> TspResult<Self> {
        let len = data.len();
        let matrix = DistanceMatrix::from_data(size, data).ok_or_else(|| {
            TspError::graph(format!("expected {} entries for {size} vertices, got {len}", size * size))
        })?;
        Self::new(matrix)
    }

    /// Builds a graph from undirected weighted edges `(a, b, weight)`.
    ///
    /// Every unordered pair of distinct vertices must appear exactly once.
    pub fn from_edges(size: usize, edges: &[(usize, usize, f64)]) -> TspResult<Self> {
        let mut matrix = DistanceMatrix::new(size);
        let mut seen = vec![false; size * size];
        for &(a, b, w) in edges {
            if a >= size || b >= size {
                return Err(TspError::graph(format!(
                    "edge ({a}, {b}) references a vertex outside 0..{size}"
                )));
            }
            if a == b {
                return Err(TspError::graph(format!("self-loop on vertex {a}")));
            }
            let key = a.min(b) * size + a.max(b);
            if seen[key] {
                return Err(TspError::graph(format!("edge ({a}, {b}) given twice")));
            }
            seen[key] = true;
            matrix.set_symmetric(a, b, w);
        }
        let expected = size * size.saturating_sub(1) / 2;
        if edges.len() != expected {
            return Err(TspError::graph(format!(
                "complete graph on {size} vertices needs {expected} edges, got {}",
                edges.len()
            )));
        }
        Self::new(matrix)
    }

    /// Builds a Euclidean graph from planar coordinates.
    pub fn from_points(points: &[Point]) -> TspResult<Self> {
        if let Some(i) = points.iter().position(|p| !p.is_finite()) {
            return Err(TspError::graph(format!("point {i} has non-finite coordinates")));
        }
        Self::new(DistanceMatrix::from_points(points))
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.matrix.size()
    }

    /// Distance between vertices `i` and `j`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.matrix.get(i, j)
    }

    /// The underlying matrix.
    pub fn matrix(&self) -> &DistanceMatrix {
        &self.matrix
    }

    /// Length of the closed cycle visiting `order` and returning to its start.
    ///
    /// Does not check that `order` is a permutation.
    pub fn cycle_length(&self, order: &[usize]) -> f64 {
        let n = order.len();
        if n < 2 {
            return 0.0;
        }
        let mut total = 0.0;
        for i in 0..n {
            total += self.distance(order[i], order[(i + 1) % n]);
        }
        total
    }

    /// Cheapest edge leaving each vertex.
    pub fn min_outgoing(&self) -> Vec<f64> {
        let n = self.vertex_count();
        (0..n)
            .map(|i| {
                (0..n)
                    .filter(|&j| j != i)
                    .map(|j| self.distance(i, j))
                    .fold(f64::INFINITY, f64::min)
            })
            .collect()
    }

    /// Returns the nearest neighbor of `from` among the given candidates.
    ///
    /// Ties resolve to the earliest candidate. Returns `None` if
    /// `candidates` is empty.
    pub fn nearest_neighbor(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for &c in candidates {
            let d = self.distance(from, c);
            match best {
                Some((_, bd)) if bd <= d => {}
                _ => best = Some((c, d)),
            }
        }
        best.map(|(c, _)| c)
    }

    /// Greedy nearest-neighbour tour starting at `start`.
    pub fn nearest_neighbor_order(&self, start: usize) -> Vec<usize> {
        let n = self.vertex_count();
        let mut order = Vec::with_capacity(n);
        let mut remaining: Vec<usize> = (0..n).filter(|&v| v != start).collect();
        order.push(start);
        let mut current = start;
        while let Some(next) = self.nearest_neighbor(current, &remaining) {
            remaining.retain(|&v| v != next);
            order.push(next);
            current = next;
        }
        order
    }
}
