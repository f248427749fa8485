//! 1-D Chebyshev fast multipole evaluator.
//!
//! Computes `p = K * q` for an `N x N` dense kernel matrix
//! `K[i, j] = k(x_i, y_j)` induced by a user-supplied kernel `k` over
//! 1-D point locations, in `O(N * m)` work instead of the `O(N^2 * m)` a
//! direct evaluation costs, via a hierarchical Chebyshev-interpolation
//! fast multipole decomposition (`bbfmm1d_tree`, `bbfmm1d_fmm`).
//!
//! This crate re-exports the public API of its two workspace members and
//! adds the acceptance-testing fixture loader; see those crates for the
//! actual tree/evaluator implementation.

pub mod fixture;

pub use bbfmm1d_fmm::{abs_diff_1d, build_tree, evaluate, gaussian_1d, gaussian_1d_default, laplacian_1d};
pub use bbfmm1d_tree::error::{Error, Result};
pub use bbfmm1d_tree::Tree;
