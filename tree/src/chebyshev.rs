//! Standard Chebyshev nodes and polynomial evaluation.
//!
//! This is the sole source of interpolation weights used to build the
//! transfer operators (`crate::transfer`) and the per-leaf interpolation
//! matrices (`crate::build`).

use ndarray::{Array1, Array2};

/// Standard Chebyshev nodes of the first kind on `[-1, 1]`.
///
/// `c_k = cos((k + 0.5) * pi / n)`, `k = 0 .. n`.
pub fn standard_cheb_nodes(n: usize) -> Array1<f64> {
    Array1::from_iter(
        (0..n).map(|k| ((k as f64 + 0.5) * std::f64::consts::PI / n as f64).cos()),
    )
}

/// Evaluate Chebyshev polynomials `T_0 .. T_{n-1}` at each of the `x.len()`
/// points, returning the `x.len() x n` matrix `T[i, k] = T_k(x_i)`.
///
/// Uses the three-term recurrence `T_k = 2 x T_{k-1} - T_{k-2}`.
pub fn cheb_polys(n: usize, x: &Array1<f64>) -> Array2<f64> {
    let m = x.len();
    let mut t = Array2::<f64>::zeros((m, n));
    t.column_mut(0).fill(1.0);
    if n > 1 {
        t.column_mut(1).assign(x);
        for k in 2..n {
            for i in 0..m {
                t[[i, k]] = 2.0 * x[i] * t[[i, k - 1]] - t[[i, k - 2]];
            }
        }
    }
    t
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn nodes_are_in_open_interval() {
        let c = standard_cheb_nodes(5);
        for &x in c.iter() {
            assert!(x > -1.0 && x < 1.0);
        }
    }

    #[test]
    fn nodes_count_matches_rank() {
        for n in 1..8 {
            assert_eq!(standard_cheb_nodes(n).len(), n);
        }
    }

    #[test]
    fn t0_is_constant_one() {
        let c = standard_cheb_nodes(4);
        let t = cheb_polys(4, &c);
        for i in 0..4 {
            assert_relative_eq!(t[[i, 0]], 1.0);
        }
    }

    #[test]
    fn t1_equals_x() {
        let c = standard_cheb_nodes(4);
        let t = cheb_polys(4, &c);
        for i in 0..4 {
            assert_relative_eq!(t[[i, 1]], c[i]);
        }
    }

    #[test]
    fn recurrence_matches_cosine_identity() {
        // T_k(cos theta) = cos(k theta); check at an arbitrary point, not just nodes.
        let x = Array1::from(vec![0.37, -0.81]);
        let t = cheb_polys(6, &x);
        for (i, &xi) in x.iter().enumerate() {
            let theta = xi.acos();
            for k in 0..6 {
                assert_relative_eq!(t[[i, k]], (k as f64 * theta).cos(), epsilon = 1e-10);
            }
        }
    }
}
