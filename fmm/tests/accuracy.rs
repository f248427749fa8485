//! Scenario and invariant tests from `spec.md` §8.

use bbfmm1d_fmm::{build_tree, evaluate, gaussian_1d, laplacian_1d};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn direct(kernel: impl Fn(&[f64], &[f64]) -> Array2<f64>, points: &[f64], charges: &[Vec<f64>]) -> Array2<f64> {
    let n = points.len();
    let m = charges[0].len();
    let k = kernel(points, points);
    let mut q = Array2::<f64>::zeros((n, m));
    for i in 0..n {
        for j in 0..m {
            q[[i, j]] = charges[i][j];
        }
    }
    k.dot(&q)
}

fn relative_error(a: &Array2<f64>, b: &Array2<f64>) -> f64 {
    let diff = a - b;
    let num: f64 = diff.iter().map(|x| x * x).sum::<f64>().sqrt();
    let den: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    num / den
}

#[test]
fn scenario_b_three_points_gaussian() {
    let points = vec![0.0, 0.5, 2.0];
    let charges = vec![vec![1.0], vec![1.0], vec![1.0]];
    let kernel = gaussian_1d(1.0);

    let mut tree = build_tree(4, &points, &charges).unwrap();
    let p = evaluate(gaussian_1d(1.0), &mut tree, &charges).unwrap();
    let expected = direct(kernel, &points, &charges);

    assert!(relative_error(&p, &expected) <= 1e-6);
}

#[test]
fn scenario_c_uniform_grid_gaussian() {
    let n = 64;
    let points: Vec<f64> = (0..n).map(|i| i as f64 / (n - 1) as f64).collect();
    let mut rng = StdRng::seed_from_u64(42);
    let charges: Vec<Vec<f64>> = (0..n).map(|_| vec![rng.gen_range(-1.0..1.0)]).collect();

    let mut tree = build_tree(8, &points, &charges).unwrap();
    let p = evaluate(gaussian_1d(1.0), &mut tree, &charges).unwrap();
    let expected = direct(gaussian_1d(1.0), &points, &charges);

    assert!(relative_error(&p, &expected) <= 1e-6);
}

#[test]
fn scenario_d_multi_rhs_independent_columns() {
    let n = 64;
    let m = 3;
    let points: Vec<f64> = (0..n).map(|i| i as f64 / (n - 1) as f64).collect();
    let mut rng = StdRng::seed_from_u64(7);
    let charges: Vec<Vec<f64>> = (0..n)
        .map(|_| (0..m).map(|_| rng.gen_range(-1.0..1.0)).collect())
        .collect();

    let mut tree = build_tree(8, &points, &charges).unwrap();
    let p = evaluate(gaussian_1d(1.0), &mut tree, &charges).unwrap();
    let expected = direct(gaussian_1d(1.0), &points, &charges);

    for col in 0..m {
        let p_col = p.column(col).to_owned().insert_axis(ndarray::Axis(1));
        let e_col = expected.column(col).to_owned().insert_axis(ndarray::Axis(1));
        assert!(relative_error(&p_col, &e_col) <= 1e-6);
    }
}

#[test]
fn scenario_f_empty_half_contributes_nothing() {
    // All points packed into [0, 0.1]; whatever empty subtrees the
    // builder creates while splitting must not perturb the result at all
    // relative to a direct evaluation.
    let n = 200;
    let points: Vec<f64> = (0..n).map(|i| 0.1 * i as f64 / (n - 1) as f64).collect();
    let charges: Vec<Vec<f64>> = (0..n).map(|i| vec![(i as f64 * 0.37).sin()]).collect();

    let mut tree = build_tree(5, &points, &charges).unwrap();
    let p = evaluate(laplacian_1d, &mut tree, &charges).unwrap();
    let expected = direct(laplacian_1d, &points, &charges);

    assert!(relative_error(&p, &expected) <= 1e-3);
}

#[test]
fn invariant_linearity() {
    let n = 40;
    let points: Vec<f64> = (0..n).map(|i| i as f64 / (n - 1) as f64).collect();
    let mut rng = StdRng::seed_from_u64(11);
    let q1: Vec<Vec<f64>> = (0..n).map(|_| vec![rng.gen_range(-1.0..1.0)]).collect();
    let q2: Vec<Vec<f64>> = (0..n).map(|_| vec![rng.gen_range(-1.0..1.0)]).collect();
    let alpha = 2.0;
    let beta = -0.5;
    let combo: Vec<Vec<f64>> = (0..n)
        .map(|i| vec![alpha * q1[i][0] + beta * q2[i][0]])
        .collect();

    let mut tree = build_tree(6, &points, &q1).unwrap();
    let p1 = evaluate(gaussian_1d(1.0), &mut tree, &q1).unwrap();
    let p2 = evaluate(gaussian_1d(1.0), &mut tree, &q2).unwrap();
    let p_combo = evaluate(gaussian_1d(1.0), &mut tree, &combo).unwrap();

    for i in 0..n {
        let expected = alpha * p1[[i, 0]] + beta * p2[[i, 0]];
        assert!((p_combo[[i, 0]] - expected).abs() < 1e-9);
    }
}

#[test]
fn invariant_determinism() {
    let n = 100;
    let points: Vec<f64> = (0..n).map(|i| i as f64 / (n - 1) as f64).collect();
    let charges: Vec<Vec<f64>> = (0..n).map(|i| vec![(i as f64).cos()]).collect();

    let mut tree_a = build_tree(5, &points, &charges).unwrap();
    let mut tree_b = build_tree(5, &points, &charges).unwrap();
    let p_a = evaluate(gaussian_1d(1.0), &mut tree_a, &charges).unwrap();
    let p_b = evaluate(gaussian_1d(1.0), &mut tree_b, &charges).unwrap();

    assert_eq!(p_a, p_b);
}
