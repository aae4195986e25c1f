//! Recovery of explicit triangular faces from a final edge set.
//!
//! Every 3-combination of the points is tested for its three edges, so the
//! cost is cubic in the point count times a linear edge lookup. This is meant
//! for the small inputs the sweep handles, not for large point sets.

use itertools::Itertools;

use crate::edges::EdgeSet;
use crate::triangle::TriangleIndex;

/// A triangle whose three edges are all in the final edge set.
///
/// Vertex indices are stored in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Face {
    vertices: [u32; 3],
}

impl Face {
    pub fn new(mut vertices: [u32; 3]) -> Self {
        vertices.sort();
        Self { vertices }
    }

    pub fn vertices(&self) -> [u32; 3] {
        self.vertices
    }

    pub fn triangle(&self) -> TriangleIndex {
        TriangleIndex::new(self.vertices)
    }
}

/// All index triples `i < j < k` below `n`, in lexicographic order.
pub fn candidate_triples(n: usize) -> impl Iterator<Item = [u32; 3]> {
    (0..n as u32)
        .tuple_combinations()
        .map(|(a, b, c)| [a, b, c])
}

/// Collect every triple of points whose three connecting edges are stored.
pub fn recover_faces(edges: &EdgeSet) -> Vec<Face> {
    candidate_triples(edges.points().len())
        .filter(|&[a, b, c]| edges.contains(a, b) && edges.contains(b, c) && edges.contains(a, c))
        .map(Face::new)
        .collect()
}

// =============================================================================
