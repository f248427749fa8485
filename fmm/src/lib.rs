//! Kernel-dependent evaluation for the 1-D Chebyshev fast multipole method.
//!
//! Builds on [`bbfmm1d_tree`] (tree construction + topology) to provide the
//! three-phase evaluator and the two public entry points described in
//! `spec.md` §4.6: [`driver::build_tree`] and [`driver::evaluate`].

pub mod driver;
pub mod evaluator;
pub mod kernel;

pub use driver::{build_tree, evaluate};
pub use kernel::{abs_diff_1d, gaussian_1d, gaussian_1d_default, laplacian_1d};

pub use bbfmm1d_tree::{error::Error, error::Result, Tree};
