//! Demo binary: load a fixture, build a tree, evaluate with the FMM, and
//! compare against a direct O(N^2) evaluation — the idiomatic-Rust
//! counterpart of `original_source/FMM_Main.py`.

use std::time::Instant;

use clap::{Parser, ValueEnum};
use ndarray::Array2;

use bbfmm1d::fixture;
use bbfmm1d::{build_tree, evaluate, gaussian_1d, laplacian_1d};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum KernelChoice {
    Laplacian,
    Gaussian,
}

/// Build and evaluate a 1-D Chebyshev FMM over a whitespace-delimited
/// input fixture, reporting timings and relative error against a direct
/// evaluation.
#[derive(Parser, Debug)]
#[command(name = "fmm_demo")]
struct Args {
    /// Path to a whitespace-delimited fixture file (location, charge columns...).
    #[arg(long, default_value = "Input/input.txt")]
    input: String,

    /// Number of Chebyshev nodes per interval.
    #[arg(long, default_value_t = 5)]
    rank: usize,

    /// Which reference kernel to evaluate.
    #[arg(long, value_enum, default_value_t = KernelChoice::Laplacian)]
    kernel: KernelChoice,

    /// Restrict to the first `n` rows of the fixture (0 = use all rows).
    #[arg(long, default_value_t = 0)]
    n: usize,
}

fn main() {
    let args = Args::parse();

    let mut loaded = match fixture::load(&args.input) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("failed to load fixture '{}': {e}", args.input);
            std::process::exit(1);
        }
    };
    if args.n > 0 && args.n < loaded.points.len() {
        loaded.points.truncate(args.n);
        loaded.charges.truncate(args.n);
    }

    let n = loaded.points.len();
    let m = loaded.charges[0].len();
    println!(" Number of charges: {n}");
    println!(" Number of sets of charges: {m}");
    println!(" Number of Chebyshev Nodes: {}", args.rank);

    let start = Instant::now();
    let mut tree = build_tree(args.rank, &loaded.points, &loaded.charges).unwrap();
    println!(
        " Total time taken for FMM(build tree): {:.6} seconds",
        start.elapsed().as_secs_f64()
    );

    let start = Instant::now();
    let potential_fmm = match args.kernel {
        KernelChoice::Laplacian => evaluate(laplacian_1d, &mut tree, &loaded.charges).unwrap(),
        KernelChoice::Gaussian => {
            evaluate(gaussian_1d(1.0), &mut tree, &loaded.charges).unwrap()
        }
    };
    println!(
        " Total time taken for FMM(calculations): {:.6} seconds",
        start.elapsed().as_secs_f64()
    );

    let start = Instant::now();
    println!("\n Starting exact computation...");
    let k: Array2<f64> = match args.kernel {
        KernelChoice::Laplacian => laplacian_1d(&loaded.points, &loaded.points),
        KernelChoice::Gaussian => gaussian_1d(1.0)(&loaded.points, &loaded.points),
    };
    let mut q = Array2::<f64>::zeros((n, m));
    for i in 0..n {
        for j in 0..m {
            q[[i, j]] = loaded.charges[i][j];
        }
    }
    let potential_exact = k.dot(&q);
    println!(" Done.");
    println!(
        " Total time taken for Exact(calculations): {:.6} seconds",
        start.elapsed().as_secs_f64()
    );

    let diff = &potential_fmm - &potential_exact;
    let num: f64 = diff.iter().map(|x| x * x).sum::<f64>().sqrt();
    let den: f64 = potential_exact.iter().map(|x| x * x).sum::<f64>().sqrt();
    println!("\n Maximum Error: {:.3e}\n", num / den);
}
