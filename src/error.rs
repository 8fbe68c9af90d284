//! Error type surfaced by the public solver API.

use thiserror::Error;

/// Failure modes of [`crate::Instance::new`] and [`crate::solve`].
///
/// Rust's allocator aborts the process on allocation failure rather than
/// returning a recoverable error, so the source solver's `AllocationFailure`
/// kind has no safe equivalent here and is not modeled (see `DESIGN.md`).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QapError {
    /// `n < 2`, or the flow/distance matrices do not have exactly `n * n`
    /// entries.
    #[error("invalid QAP dimension: n = {n} (must be >= 2, matrices must have n*n entries)")]
    InvalidDimension { n: usize },
}
