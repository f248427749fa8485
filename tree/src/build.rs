//! Bounding-interval computation and recursive tree construction.

use ndarray::{Array1, Array2};

use crate::chebyshev::{cheb_polys, standard_cheb_nodes};
use crate::error::{Error, Result};
use crate::node::{Node, NONE};
use crate::transfer::{reference_eval_matrix, TransferOperators};

/// The adaptive 1-D binary tree over a fixed point set.
///
/// Points and charges are consumed at construction time (`new`) and are not
/// retained by reference; `index[]` on each node records which global
/// particle indices it owns. Charges may be re-supplied at evaluation time
/// (`fmm::driver::evaluate`) — the tree itself never bakes charge values
/// into its structure beyond the scratch space needed for one pass.
#[derive(Debug, Clone)]
pub struct Tree {
    pub rank: usize,
    pub n: usize,
    pub m: usize,
    pub max_level: usize,

    /// Standard Chebyshev nodes, shared by every node in the tree.
    pub c: Array1<f64>,
    /// Reference Chebyshev evaluation matrix at `c` itself.
    pub t_ref: Array2<f64>,
    pub transfer: TransferOperators,

    /// All nodes, arena-indexed; `nodes[0]` is always the root.
    pub nodes: Vec<Node>,
}

pub const ROOT: usize = 0;

impl Tree {
    /// Build a tree over `points` with Chebyshev rank `rank`, sized to carry
    /// `m` right-hand-side columns (the actual charge values are supplied
    /// separately at evaluation time; `charges` here is only used to
    /// validate shape and finiteness up front).
    pub fn new(rank: usize, points: &[f64], charges: &[Vec<f64>]) -> Result<Tree> {
        if rank < 1 {
            return Err(Error::InvalidRank(rank));
        }
        let n = points.len();
        if n == 0 {
            return Err(Error::EmptyInput);
        }
        if charges.len() != n {
            return Err(Error::InvalidShape {
                expected: n,
                found: charges.len(),
            });
        }
        let m = charges.first().map(|row| row.len()).unwrap_or(0);
        for row in charges {
            if row.len() != m {
                return Err(Error::InvalidShape {
                    expected: m,
                    found: row.len(),
                });
            }
        }
        for (i, &x) in points.iter().enumerate() {
            if !x.is_finite() {
                return Err(Error::NonFiniteInput { index: i, value: x });
            }
        }
        for row in charges {
            for &q in row {
                if !q.is_finite() {
                    return Err(Error::NonFiniteInput {
                        index: n,
                        value: q,
                    });
                }
            }
        }

        let c = standard_cheb_nodes(rank);
        let t_ref = reference_eval_matrix(rank, &c);
        let transfer = TransferOperators::build(rank, &c, &t_ref);

        let max_x = points.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let min_x = points.iter().cloned().fold(f64::INFINITY, f64::min);
        let center = 0.5 * (max_x + min_x);
        let radius = 0.5 * (max_x - min_x);

        let mut root = Node::new_uninit(0);
        root.center = center;
        root.radius = radius;
        root.index = (0..n).collect();
        root.is_root = true;

        let mut tree = Tree {
            rank,
            n,
            m,
            max_level: 0,
            c,
            t_ref,
            transfer,
            nodes: vec![root],
        };

        tree.assign_children(ROOT, points);
        Ok(tree)
    }

    /// Recursively split `node` into two children until the leaf criterion
    /// is met (`spec.md` §3: `N_local <= 2*rank` or `N_local == 0`), with
    /// the correction noted in §9: a node all of whose points are
    /// coincident is also terminal, regardless of `N_local`, since
    /// splitting a set of identical points never reduces its size.
    fn assign_children(&mut self, idx: usize, points: &[f64]) {
        let n_local = self.nodes[idx].n_local();
        if n_local == 0 {
            self.nodes[idx].is_empty = true;
            self.nodes[idx].is_leaf = true;
            return;
        }

        let rank = self.rank;
        let m = self.m;
        self.nodes[idx].is_empty = false;
        self.nodes[idx].potential = Array2::zeros((n_local, m));
        self.nodes[idx].node_potential = Array2::zeros((rank, m));
        self.nodes[idx].node_charge = Array2::zeros((rank, m));

        let center = self.nodes[idx].center;
        let radius = self.nodes[idx].radius;
        self.nodes[idx].scaled_cnodes = &self.c * radius + center;
        self.nodes[idx].location = self.nodes[idx].index.iter().map(|&i| points[i]).collect();

        let all_coincident = {
            let idxs = &self.nodes[idx].index;
            idxs.iter().all(|&i| points[i] == points[idxs[0]])
        };

        if n_local <= 2 * rank || all_coincident {
            self.nodes[idx].is_leaf = true;
            let standardized =
                (&self.nodes[idx].location - center) / radius.max(f64::MIN_POSITIVE);
            let p = cheb_polys(rank, &standardized);
            let r_leaf = (p.dot(&self.t_ref.t()) * 2.0 - 1.0) / rank as f64;
            self.nodes[idx].r_leaf = Some(r_leaf);
            self.nodes[idx].charge = Array2::zeros((n_local, m));
            if self.max_level < self.nodes[idx].level {
                self.max_level = self.nodes[idx].level;
            }
            return;
        }

        self.nodes[idx].is_leaf = false;
        let level = self.nodes[idx].level + 1;

        let mut left = Node::new_uninit(level);
        left.center = center - 0.5 * radius;
        left.radius = 0.5 * radius;
        left.parent = idx;

        let mut right = Node::new_uninit(level);
        right.center = center + 0.5 * radius;
        right.radius = 0.5 * radius;
        right.parent = idx;

        // Strict `<` test: a particle exactly at the center goes right
        // (spec.md §4.3 step 5, §9 "Charge-at-boundary policy").
        for &i in &self.nodes[idx].index {
            if points[i] < center {
                left.index.push(i);
            } else {
                right.index.push(i);
            }
        }

        let left_idx = self.nodes.len();
        self.nodes.push(left);
        let right_idx = self.nodes.len();
        self.nodes.push(right);
        self.nodes[idx].children = [left_idx, right_idx];

        self.assign_children(left_idx, points);
        self.assign_children(right_idx, points);
    }

    pub fn node(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    pub fn is_none(idx: usize) -> bool {
        idx == NONE
    }
}
