//! Public driver API (`spec.md` §4.6 / §6).

use ndarray::Array2;

use bbfmm1d_tree::build::Tree;
use bbfmm1d_tree::error::{Error, Result};

use crate::evaluator;

/// Build the tree: compute the bounding interval, recursively split, and
/// wire up neighbor/interaction topology. The returned tree is opaque to
/// the caller beyond what's needed to call [`evaluate`] on it; charges
/// supplied here are only used to validate shape, not retained.
pub fn build_tree(rank: usize, points: &[f64], charges: &[Vec<f64>]) -> Result<Tree> {
    let mut tree = Tree::new(rank, points, charges)?;
    tree.assign_topology();
    Ok(tree)
}

/// Evaluate `p = K * q` for the user-supplied `kernel`, given a
/// pre-built `tree` and a (possibly different from build time) charge
/// matrix `charges`. Returns the `N x m` potential.
pub fn evaluate<K>(kernel: K, tree: &mut Tree, charges: &[Vec<f64>]) -> Result<Array2<f64>>
where
    K: Fn(&[f64], &[f64]) -> Array2<f64>,
{
    if charges.len() != tree.n {
        return Err(Error::InvalidShape {
            expected: tree.n,
            found: charges.len(),
        });
    }
    for row in charges {
        if row.len() != tree.m {
            return Err(Error::InvalidShape {
                expected: tree.m,
                found: row.len(),
            });
        }
    }

    evaluator::zero_scratch(tree);
    evaluator::upward_pass(tree, charges);

    let mut out = Array2::<f64>::zeros((tree.n, tree.m));
    evaluator::downward_pass(tree, &kernel, &mut out);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::laplacian_1d;
    use approx::assert_relative_eq;

    #[test]
    fn scenario_a_two_points_laplacian() {
        let points = vec![0.0, 1.0];
        let charges = vec![vec![1.0], vec![1.0]];
        let mut tree = build_tree(2, &points, &charges).unwrap();
        let p = evaluate(laplacian_1d, &mut tree, &charges).unwrap();
        assert_relative_eq!(p[[0, 0]], 1.0, epsilon = 1e-9);
        assert_relative_eq!(p[[1, 0]], 1.0, epsilon = 1e-9);
    }

    #[test]
    fn charges_can_differ_between_build_and_evaluate() {
        let points = vec![0.0, 1.0, 0.3];
        let build_charges = vec![vec![1.0], vec![1.0], vec![1.0]];
        let mut tree = build_tree(2, &points, &build_charges).unwrap();

        let eval_charges = vec![vec![2.0], vec![-1.0], vec![0.5]];
        let p = evaluate(laplacian_1d, &mut tree, &eval_charges).unwrap();

        // Direct computation for comparison.
        let mut direct = Array2::<f64>::zeros((3, 1));
        for i in 0..3 {
            for j in 0..3 {
                let r = (points[i] - points[j]).abs();
                let k = if r > 1e-10 { 1.0 / r } else { 0.0 };
                direct[[i, 0]] += k * eval_charges[j][0];
            }
        }
        for i in 0..3 {
            assert_relative_eq!(p[[i, 0]], direct[[i, 0]], epsilon = 1e-9);
        }
    }

    #[test]
    fn rejects_charge_count_mismatch_at_evaluate() {
        let points = vec![0.0, 1.0];
        let charges = vec![vec![1.0], vec![1.0]];
        let mut tree = build_tree(2, &points, &charges).unwrap();
        let bad = vec![vec![1.0]];
        assert!(evaluate(laplacian_1d, &mut tree, &bad).is_err());
    }
}
