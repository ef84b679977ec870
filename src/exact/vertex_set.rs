//! Fixed-capacity vertex bitset.

/// A set of vertex indices in `0..capacity`, stored as packed bits.
///
/// # Examples
///
/// ```
/// use u_tsp::exact::VertexSet;
///
/// let mut set = VertexSet::full(70);
/// set.remove(0);
/// set.remove(69);
/// assert_eq!(set.len(), 68);
/// assert_eq!(set.max(), Some(68));
/// assert!(!set.contains(0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexSet {
    words: Vec<u64>,
    capacity: usize,
}

impl VertexSet {
    /// An empty set over `0..capacity`.
    pub fn empty(capacity: usize) -> Self {
        Self {
            words: vec![0; capacity.div_ceil(64)],
            capacity,
        }
    }

    /// The set `{0, ..., capacity - 1}`.
    pub fn full(capacity: usize) -> Self {
        let mut set = Self::empty(capacity);
        for v in 0..capacity {
            set.insert(v);
        }
        set
    }

    /// Upper bound (exclusive) on storable vertices.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Adds `v`.
    ///
    /// # Panics
    ///
    /// Panics if `v >= capacity`.
    pub fn insert(&mut self, v: usize) {
        assert!(v < self.capacity, "vertex {v} out of range");
        self.words[v / 64] |= 1 << (v % 64);
    }

    /// Removes `v` (no-op if absent).
    pub fn remove(&mut self, v: usize) {
        if v < self.capacity {
            self.words[v / 64] &= !(1 << (v % 64));
        }
    }

    /// Returns a copy without `v`.
    pub fn without(&self, v: usize) -> Self {
        let mut next = self.clone();
        next.remove(v);
        next
    }

    /// Membership test.
    pub fn contains(&self, v: usize) -> bool {
        v < self.capacity && self.words[v / 64] & (1 << (v % 64)) != 0
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns `true` if the set has no members.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Largest member.
    pub fn max(&self) -> Option<usize> {
        self.words
            .iter()
            .enumerate()
            .rev()
            .find(|(_, w)| **w != 0)
            .map(|(i, w)| i * 64 + 63 - w.leading_zeros() as usize)
    }

    /// Members in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.capacity).filter(move |&v| self.contains(v))
    }
}
