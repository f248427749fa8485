//! Whitespace-delimited input-fixture loader (`spec.md` §6).
//!
//! Not part of the core contract — acceptance-testing convenience only,
//! the idiomatic-Rust counterpart of `original_source/FMM_Main.py`'s
//! `np.loadtxt('Input/input.txt')` followed by column slicing.

use std::fs;
use std::path::Path;

use bbfmm1d_tree::error::Error;

/// A loaded fixture: one point location per row, and one charge column
/// per remaining column.
pub struct Fixture {
    pub points: Vec<f64>,
    pub charges: Vec<Vec<f64>>,
}

/// Load a fixture file: first column is point location, remaining columns
/// are `m` charge vectors, whitespace-delimited, one row per line.
pub fn load(path: impl AsRef<Path>) -> Result<Fixture, Error> {
    let text = fs::read_to_string(path.as_ref())
        .map_err(|e| Error::KernelError(format!("failed to read fixture: {e}")))?;

    let mut points = Vec::new();
    let mut charges = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let cols: Result<Vec<f64>, _> = line.split_whitespace().map(|s| s.parse::<f64>()).collect();
        let cols = cols.map_err(|_| Error::NonFiniteInput {
            index: line_no,
            value: f64::NAN,
        })?;
        if cols.is_empty() {
            continue;
        }
        points.push(cols[0]);
        charges.push(cols[1..].to_vec());
    }

    if points.is_empty() {
        return Err(Error::EmptyInput);
    }
    let m = charges[0].len();
    for row in &charges {
        if row.len() != m {
            return Err(Error::InvalidShape {
                expected: m,
                found: row.len(),
            });
        }
    }

    Ok(Fixture { points, charges })
}
