//! Multipole-to-multipole / local-to-local transfer operators.
//!
//! `R[0]` and `R[1]` interpolate values known at a parent's Chebyshev nodes
//! onto a child's Chebyshev nodes. `R[k]` is used directly for L2L (downward,
//! local expansion) and transposed for M2M (upward, multipole aggregation) —
//! see `spec.md` §4.2 and invariant 5 in §8.

use ndarray::{s, Array1, Array2};

use crate::chebyshev::{cheb_polys, standard_cheb_nodes};

/// The two `rank x rank` transfer matrices, one per child slot (0 = left,
/// 1 = right).
#[derive(Debug, Clone)]
pub struct TransferOperators {
    pub rank: usize,
    pub r: [Array2<f64>; 2],
}

impl TransferOperators {
    /// Build `R[0]`, `R[1]` from the standard Chebyshev nodes `c` and the
    /// reference evaluation matrix `t_ref = cheb_polys(rank, &c)`.
    pub fn build(rank: usize, c: &Array1<f64>, t_ref: &Array2<f64>) -> Self {
        let mut child_c = Array1::<f64>::zeros(2 * rank);
        for k in 0..rank {
            child_c[k] = 0.5 * (c[k] - 1.0);
            child_c[rank + k] = 0.5 * (c[k] + 1.0);
        }

        let p = cheb_polys(rank, &child_c);
        // S = (2 P T_ref^T - 1) / rank, shape (2*rank) x rank.
        let s = (p.dot(&t_ref.t()) * 2.0 - 1.0) / rank as f64;

        let r0 = s.slice(s![0..rank, ..]).to_owned();
        let r1 = s.slice(s![rank..2 * rank, ..]).to_owned();

        TransferOperators { rank, r: [r0, r1] }
    }
}

/// Reference Chebyshev evaluation matrix at the standard nodes themselves:
/// `T_ref[i, k] = T_k(c_i)`, a square `rank x rank` matrix.
pub fn reference_eval_matrix(rank: usize, c: &Array1<f64>) -> Array2<f64> {
    cheb_polys(rank, c)
}
