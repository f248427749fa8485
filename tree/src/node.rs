//! Arena-indexed tree nodes.
//!
//! Nodes live in a single `Vec<Node>` owned by [`crate::build::Tree`];
//! parent/neighbor/interaction relationships are plain `usize` indices into
//! that vector rather than owned or reference-counted pointers, so the tree
//! can't form a cycle and has a single, obvious owner (`spec.md` §9).

use ndarray::{Array1, Array2};

/// Sentinel used in place of an index when a slot (parent, neighbor,
/// interaction entry, child) is absent.
pub const NONE: usize = usize::MAX;

/// A single node of the 1-D binary tree.
///
/// `children`, `neighbors` and `interaction` are fixed-capacity inline
/// arrays of arena indices (`spec.md` §9: "Fixed-capacity small arrays") —
/// at most 2 children, 2 neighbors, 3 interaction-list entries in 1-D.
#[derive(Debug, Clone)]
pub struct Node {
    pub level: usize,
    pub center: f64,
    pub radius: f64,

    /// Global indices of the particles contained in this node.
    pub index: Vec<usize>,

    pub is_leaf: bool,
    pub is_empty: bool,
    pub is_root: bool,

    /// `center + radius * c_k` for the tree's standard Chebyshev nodes `c`.
    pub scaled_cnodes: Array1<f64>,

    /// Coordinates of this node's own particles (`points[index[k]]`),
    /// populated for every non-empty node, leaf or internal — an internal
    /// node needs these to accumulate near-field contributions directly
    /// when one of its own same-level neighbors happens to be a leaf
    /// (`spec.md` §4.5, mixed-depth case).
    pub location: Array1<f64>,

    /// Upward (multipole) coefficients, shape `rank x m`.
    pub node_charge: Array2<f64>,
    /// Downward (local) coefficients, shape `rank x m`.
    pub node_potential: Array2<f64>,
    /// Accumulated particle potentials, shape `N_local x m`.
    pub potential: Array2<f64>,
    /// Particle charges gathered from the global charge matrix, shape
    /// `N_local x m`. Populated for every non-empty node during the upward
    /// pass, leaf or internal — an internal node's same-level leaf
    /// neighbors read this directly during near-field accumulation.
    pub charge: Array2<f64>,

    /// Leaf-only: particle-to-Chebyshev interpolation matrix, `N_local x rank`.
    pub r_leaf: Option<Array2<f64>>,

    pub children: [usize; 2],
    pub parent: usize,

    /// Same-level touching nodes; slot 0 = left, slot 1 = right.
    pub neighbors: [usize; 2],
    pub n_neighbor: usize,

    /// Same-level well-separated nodes (at most 3 in 1-D).
    pub interaction: [usize; 3],
    pub n_interaction: usize,
}

impl Node {
    pub fn n_local(&self) -> usize {
        self.index.len()
    }

    pub(crate) fn new_uninit(level: usize) -> Self {
        Node {
            level,
            center: 0.0,
            radius: 0.0,
            index: Vec::new(),
            is_leaf: true,
            is_empty: true,
            is_root: false,
            scaled_cnodes: Array1::zeros(0),
            location: Array1::zeros(0),
            node_charge: Array2::zeros((0, 0)),
            node_potential: Array2::zeros((0, 0)),
            potential: Array2::zeros((0, 0)),
            charge: Array2::zeros((0, 0)),
            r_leaf: None,
            children: [NONE, NONE],
            parent: NONE,
            neighbors: [NONE, NONE],
            n_neighbor: 0,
            interaction: [NONE, NONE, NONE],
            n_interaction: 0,
        }
    }

    pub(crate) fn push_interaction(&mut self, other: usize) {
        self.interaction[self.n_interaction] = other;
        self.n_interaction += 1;
    }
}
