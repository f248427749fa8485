//! Failure kinds surfaced by tree construction and evaluation.

use thiserror::Error;

/// Everything that can go wrong building or evaluating a [`crate::node::Tree`].
///
/// All variants are immediate, non-recoverable failures: the caller either
/// gets a fully constructed tree or none at all, never a partially built one.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Points were not given as a flat 1-D sequence, or the charge matrix's
    /// row count didn't match the number of points.
    #[error("invalid shape: expected {expected} rows, found {found}")]
    InvalidShape { expected: usize, found: usize },

    /// `rank` (the number of Chebyshev nodes per interval) was less than 1.
    #[error("invalid rank: {0} (must be >= 1)")]
    InvalidRank(usize),

    /// The point set was empty (`N == 0`).
    #[error("empty input: point set has zero elements")]
    EmptyInput,

    /// A coordinate or charge was NaN or infinite.
    #[error("non-finite input at index {index}: {value}")]
    NonFiniteInput { index: usize, value: f64 },

    /// The user-supplied kernel callable failed.
    #[error("kernel evaluation failed: {0}")]
    KernelError(String),
}

pub type Result<T> = std::result::Result<T, Error>;
