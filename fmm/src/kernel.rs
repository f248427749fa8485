//! Reference kernels (`spec.md` §6).
//!
//! A kernel is any `Fn(&[f64], &[f64]) -> Array2<f64>` producing
//! `K[i, j] = k(x_i, y_j)` — the driver and evaluator are generic over this
//! bound rather than over a dedicated trait, since the contract is a single
//! pure function and Rust's `Fn` traits already express that directly.

use ndarray::Array2;

/// `k(r) = 1/r`, with `0` substituted for `r <= 1e-10` so that the
/// self-block term at zero distance stays finite (`spec.md` §4.5
/// "Numerical semantics").
pub fn laplacian_1d(x: &[f64], y: &[f64]) -> Array2<f64> {
    let mut k = Array2::<f64>::zeros((x.len(), y.len()));
    for i in 0..x.len() {
        for j in 0..y.len() {
            let r = (x[i] - y[j]).abs();
            k[[i, j]] = if r > 1e-10 { 1.0 / r } else { 0.0 };
        }
    }
    k
}

/// `k(r; a) = exp(-(r/a)^2)`, returned as a closure over the scale `a`.
/// Never singular, so it needs no special-casing at zero distance.
pub fn gaussian_1d(a: f64) -> impl Fn(&[f64], &[f64]) -> Array2<f64> {
    move |x: &[f64], y: &[f64]| {
        let mut k = Array2::<f64>::zeros((x.len(), y.len()));
        for i in 0..x.len() {
            for j in 0..y.len() {
                let r = (x[i] - y[j]).abs();
                k[[i, j]] = (-(r / a).powi(2)).exp();
            }
        }
        k
    }
}

/// `gaussian_1d` with the default scale `a = 1`, matching
/// `original_source/CustomKernels.py`'s `gaussian1D` default argument.
pub fn gaussian_1d_default(x: &[f64], y: &[f64]) -> Array2<f64> {
    gaussian_1d(1.0)(x, y)
}

/// `k(x, y) = |x - y|`. Dropped from `spec.md`'s distillation but present
/// in `original_source/CustomKernels.py` as `exampleKernelA/B/C` (three
/// implementation variants of the same kernel); reinstated here as a single
/// vectorized definition since it costs nothing and is singularity-free,
/// giving the `Kernel` contract a third worked example.
pub fn abs_diff_1d(x: &[f64], y: &[f64]) -> Array2<f64> {
    let mut k = Array2::<f64>::zeros((x.len(), y.len()));
    for i in 0..x.len() {
        for j in 0..y.len() {
            k[[i, j]] = (x[i] - y[j]).abs();
        }
    }
    k
}
