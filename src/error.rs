//! Failure values surfaced by puzzle generation.
//!
//! Boundary tracing never fails: a trace that cannot close returns a
//! best-effort partial polygon and logs a warning instead, since it only
//! affects rendering and not puzzle validity.

use thiserror::Error;

/// A fatal error aborting a `generate` call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// The requested grid size is below the 2×2 minimum.
    #[error("puzzle size must be at least 2, got {0}")]
    InvalidSize(usize),

    /// The latin grid filler hit its restart bound without producing a
    /// valid grid. Retrying with a different seed may succeed.
    #[error("no valid latin grid found after {attempts} attempts")]
    GenerationExhausted {
        /// Number of from-scratch fill attempts that were made.
        attempts: usize,
    },

    /// A cage was left with no usable operation after size-based filtering
    /// of the configured operation set.
    #[error("no valid operation for a cage of {cage_size} cells")]
    NoValidOperation {
        /// Number of cells in the offending cage.
        cage_size: usize,
    },
}
