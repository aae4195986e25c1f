//! Divide-and-conquer triangulation of a planar point set.
//!
//! Points sorted by ascending x are cut into groups of three, each seeded as a
//! triangle, and neighbouring groups are zipped together at increasingly
//! coarse granularities. Edges whose triangles turn out to have a point inside
//! their circumcircle are pruned along the way. Faces are recovered afterwards
//! from the final edge set.
//!
//! ```
//! use zipper_delaunay::{triangulate, TriangulationConfig};
//!
//! let points = vec![
//!     (0.0, 0.0).into(),
//!     (0.0, 1.0).into(),
//!     (1.0, 0.0).into(),
//!     (1.0, 1.0).into(),
//! ];
//!
//! let triangulation = triangulate(points, &TriangulationConfig::default()).unwrap();
//! assert_eq!(triangulation.edges().count(), 5);
//! assert_eq!(triangulation.faces().len(), 2);
//! ```

pub mod config;
pub mod edges;
pub mod error;
pub mod faces;
pub mod geometry;
pub mod merge;
pub mod partition;
pub mod triangle;

use glam::DVec2;

pub use config::{AmbiguityPolicy, Tolerance, TriangulationConfig};
pub use edges::{EdgeIndex, EdgeSet};
pub use error::{Result, TriangulationError};
pub use faces::{candidate_triples, recover_faces, Face};
pub use triangle::{Circumcircle, Triangle, TriangleIndex};

/// The result of one triangulation run: the point arena and its final edges.
#[derive(Debug)]
pub struct Triangulation {
    edges: EdgeSet,
}

impl Triangulation {
    /// Triangulate `points`, which must be sorted by ascending x.
    pub fn new(points: Vec<DVec2>, config: &TriangulationConfig) -> Result<Self> {
        config.validate()?;
        validate_points(&points, &config.tolerance)?;

        let mut edges = EdgeSet::new(points, config.tolerance);
        partition::sweep(&mut edges, config)?;

        tracing::debug!(
            points = edges.points().len(),
            edges = edges.len(),
            "triangulation complete"
        );

        Ok(Self { edges })
    }

    pub fn points(&self) -> &[DVec2] {
        self.edges.points()
    }

    /// Final edges as index pairs, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.edges.edges()
    }

    /// Final edges as coordinate pairs, in insertion order.
    pub fn segments(&self) -> impl Iterator<Item = (DVec2, DVec2)> + '_ {
        self.edges.segments()
    }

    pub fn edge_set(&self) -> &EdgeSet {
        &self.edges
    }

    /// Recover the triangular faces. This is cubic in the point count.
    pub fn faces(&self) -> Vec<Face> {
        recover_faces(&self.edges)
    }

    pub fn realize_face(&self, face: &Face) -> Triangle {
        self.edges.realize_triangle(&face.triangle())
    }
}

/// Compute the triangulation of a list of points sorted by ascending x.
pub fn triangulate(points: Vec<DVec2>, config: &TriangulationConfig) -> Result<Triangulation> {
    Triangulation::new(points, config)
}

fn validate_points(points: &[DVec2], tolerance: &Tolerance) -> Result<()> {
    let invalid = |msg: String| Err(TriangulationError::InvalidInput(msg));

    if points.len() < 3 {
        return invalid(format!("need at least 3 points, got {}", points.len()));
    }
    if u32::try_from(points.len()).is_err() {
        return invalid(format!("too many points: {}", points.len()));
    }
    if let Some(p) = points.iter().find(|p| !p.is_finite()) {
        return invalid(format!("non-finite point {p}"));
    }
    if let Some(i) = points.windows(2).position(|w| w[0].x > w[1].x) {
        return invalid(format!(
            "points must be sorted by ascending x, {} comes before {}",
            points[i],
            points[i + 1]
        ));
    }

    // at least one triple has to span a face
    let a = points[0];
    let b = points
        .iter()
        .copied()
        .max_by(|p, q| a.distance_squared(*p).total_cmp(&a.distance_squared(*q)))
        .unwrap_or(a);
    let spans = points
        .iter()
        .any(|&c| !Triangle::new([a, b, c]).is_degenerate(tolerance));
    if !spans {
        let c = points
            .iter()
            .copied()
            .find(|&p| p != a && p != b)
            .unwrap_or(b);
        return Err(TriangulationError::DegenerateTriangle { a, b, c });
    }

    Ok(())
}

// =============================================================================
