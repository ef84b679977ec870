//! Dense distance matrix storage.

use super::Point;

/// A dense n×n distance matrix stored in row-major order.
///
/// This is raw storage with no invariants beyond its shape. It becomes a
/// solver input only after [`Graph::new`](super::Graph::new) has validated it.
///
/// # Examples
///
/// ```
/// use u_tsp::graph::{DistanceMatrix, Point};
///
/// let points = vec![Point::new(0.0, 0.0), Point::new(3.0, 4.0), Point::new(6.0, 8.0)];
/// let dm = DistanceMatrix::from_points(&points);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes a Euclidean distance matrix from vertex coordinates.
    pub fn from_points(points: &[Point]) -> Self {
        let n = points.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = points[i].distance_to(&points[j]);
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Creates a distance matrix from an explicit row-major n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Creates a distance matrix from nested rows.
    ///
    /// Returns `None` if any row length differs from the number of rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return None;
        }
        Some(Self {
            data: rows.iter().flatten().copied().collect(),
            size,
        })
    }

    /// Returns the distance from vertex `from` to vertex `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from vertex `from` to vertex `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Sets both `from → to` and `to → from`.
    pub fn set_symmetric(&mut self, a: usize, b: usize, distance: f64) {
        self.set(a, b, distance);
        self.set(b, a, distance);
    }

    /// Number of vertices in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Row `i` as a slice.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.size..(i + 1) * self.size]
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        self.first_asymmetry(tol).is_none()
    }

    /// First pair `(i, j)`, `i < j`, whose entries differ by more than `tol`.
    pub fn first_asymmetry(&self, tol: f64) -> Option<(usize, usize)> {
        (0..self.size)
            .flat_map(|i| ((i + 1)..self.size).map(move |j| (i, j)))
            .find(|&(i, j)| (self.get(i, j) - self.get(j, i)).abs() > tol)
    }
}
