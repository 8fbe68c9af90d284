//! The QAP instance (component C4): immutable after construction.

use crate::error::QapError;

/// An n×n flow matrix and an n×n distance matrix, stored contiguously in
/// row-major order (indexed `i * n + j`) rather than as a pointer-of-pointers
/// layout, per the matrix-storage design note.
pub struct Instance {
    n: usize,
    flow: Vec<i64>,
    dist: Vec<i64>,
}

impl Instance {
    /// Builds a new instance from row-major `flow`/`dist` matrices.
    ///
    /// Returns [`QapError::InvalidDimension`] if `n < 2` or either matrix
    /// does not have exactly `n * n` entries.
    pub fn new(n: usize, flow: Vec<i64>, dist: Vec<i64>) -> Result<Self, QapError> {
        if n < 2 || flow.len() != n * n || dist.len() != n * n {
            return Err(QapError::InvalidDimension { n });
        }
        Ok(Instance { n, flow, dist })
    }

    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn flow(&self, i: usize, j: usize) -> i64 {
        self.flow[i * self.n + j]
    }

    #[inline]
    pub fn dist(&self, i: usize, j: usize) -> i64 {
        self.dist[i * self.n + j]
    }
}
