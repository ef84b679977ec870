//! Search frontier entries.

use crate::graph::Graph;

use super::config::Bound;
use super::VertexSet;

/// One node of the branch-and-bound tree: a path from the root vertex, the
/// vertices it has not reached yet, and the length of the path so far.
///
/// States are values. Extending one produces a new state; backtracking is
/// simply dropping it.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    prefix: Vec<usize>,
    unvisited: VertexSet,
    cost: f64,
}

impl SearchState {
    /// The root node: a path consisting of `root` alone.
    pub fn root(vertex_count: usize, root: usize) -> Self {
        let mut prefix = Vec::with_capacity(vertex_count);
        prefix.push(root);
        Self {
            prefix,
            unvisited: VertexSet::full(vertex_count).without(root),
            cost: 0.0,
        }
    }

    /// The partial tour.
    pub fn prefix(&self) -> &[usize] {
        &self.prefix
    }

    /// Vertices not yet on the path.
    pub fn unvisited(&self) -> &VertexSet {
        &self.unvisited
    }

    /// Length of the open path.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of vertices on the path.
    pub fn depth(&self) -> usize {
        self.prefix.len()
    }

    /// Vertex at the open end of the path.
    pub fn last(&self) -> usize {
        self.prefix[self.prefix.len() - 1]
    }

    /// Returns `true` once every vertex is on the path.
    pub fn is_complete(&self) -> bool {
        self.unvisited.is_empty()
    }

    /// Length of the cycle formed by closing a complete path.
    pub fn closed_cost(&self, graph: &Graph) -> f64 {
        self.cost + graph.distance(self.last(), self.prefix[0])
    }

    /// The child reached by stepping to unvisited vertex `v`.
    pub fn extend(&self, v: usize, graph: &Graph) -> Self {
        debug_assert!(self.unvisited.contains(v), "vertex {v} already visited");
        let mut prefix = Vec::with_capacity(self.prefix.capacity());
        prefix.extend_from_slice(&self.prefix);
        prefix.push(v);
        Self {
            prefix,
            unvisited: self.unvisited.without(v),
            cost: self.cost + graph.distance(self.last(), v),
        }
    }

    /// Lower bound on the length of any tour completing this path.
    ///
    /// Every vertex not yet left (the open end plus all unvisited vertices)
    /// still needs one outgoing edge, so adding each one's cheapest edge never
    /// overestimates.
    pub fn lower_bound(&self, bound: Bound, min_outgoing: &[f64]) -> f64 {
        match bound {
            Bound::PartialCost => self.cost,
            Bound::MinOutgoing => {
                let rest: f64 = self.unvisited.iter().map(|v| min_outgoing[v]).sum();
                self.cost + min_outgoing[self.last()] + rest
            }
        }
    }
}
