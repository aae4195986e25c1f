use glam::DVec2;
use rstar::{
    primitives::{GeomWithData, Rectangle},
    RTree, AABB,
};

use crate::config::Tolerance;
use crate::geometry::{on_segment, orientation, points_almost_equal, segments_intersect, Orientation};
use crate::triangle::{Triangle, TriangleIndex};

/// An undirected edge, represented as 2x indices into a point array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeIndex {
    pub vertices: [u32; 2],
}

impl EdgeIndex {
    pub fn new(a: u32, b: u32) -> Self {
        Self { vertices: [a, b] }
    }
}

// =============================================================================

type TreePoint = [f64; 2];
type TreeRect = Rectangle<TreePoint>;
type IndexRect = GeomWithData<TreeRect, usize>;

fn segment_rect(p: DVec2, q: DVec2, slot: usize) -> IndexRect {
    IndexRect::new(TreeRect::from_corners(p.into(), q.into()), slot)
}

// =============================================================================

/// The accepted edges of one triangulation run, together with the point arena
/// they index into.
///
/// Edges are compared with epsilon point equality, never by index, so two
/// input points at the same location share their edges. Slots of removed
/// edges are left empty to keep insertion order stable.
#[derive(Debug)]
pub struct EdgeSet {
    points: Vec<DVec2>,
    edges: Vec<Option<EdgeIndex>>,
    lookup_accel: RTree<IndexRect>,
    tolerance: Tolerance,
    live: usize,
}

impl EdgeSet {
    pub fn new(points: Vec<DVec2>, tolerance: Tolerance) -> Self {
        Self {
            points,
            edges: Default::default(),
            lookup_accel: Default::default(),
            tolerance,
            live: 0,
        }
    }

    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    pub fn point(&self, index: u32) -> DVec2 {
        self.points[index as usize]
    }

    pub fn tolerance(&self) -> &Tolerance {
        &self.tolerance
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Stored edges, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.edges.iter().filter_map(|e| *e)
    }

    /// Stored edges as coordinate pairs, in insertion order.
    pub fn segments(&self) -> impl Iterator<Item = (DVec2, DVec2)> + '_ {
        self.edges()
            .map(|e| (self.point(e.vertices[0]), self.point(e.vertices[1])))
    }

    pub fn realize_triangle(&self, triangle: &TriangleIndex) -> Triangle {
        triangle.realize(&self.points)
    }

    fn same_point(&self, a: u32, b: u32) -> bool {
        a == b || points_almost_equal(self.point(a), self.point(b), self.tolerance.ulps)
    }

    fn matches(&self, edge: &EdgeIndex, p: u32, q: u32) -> bool {
        let [a, b] = edge.vertices;
        (self.same_point(a, p) && self.same_point(b, q))
            || (self.same_point(a, q) && self.same_point(b, p))
    }

    /// Bounding box of `p-q`, grown by the point equality tolerance so that
    /// near-equal endpoints still hit it.
    fn envelope(&self, p: u32, q: u32) -> AABB<TreePoint> {
        let (pp, pq) = (self.point(p), self.point(q));
        let scale = 4.0 * f64::EPSILON * f64::from(self.tolerance.ulps);
        let slack = pp.abs().max(pq.abs()) * scale + DVec2::splat(f64::MIN_POSITIVE);

        AABB::from_corners((pp.min(pq) - slack).into(), (pp.max(pq) + slack).into())
    }

    /// Exact-pair membership: is there a stored edge with endpoints `{p, q}`?
    pub fn contains(&self, p: u32, q: u32) -> bool {
        self.lookup_accel
            .locate_in_envelope_intersecting(&self.envelope(p, q))
            .filter_map(|rect| self.edges[rect.data])
            .any(|e| self.matches(&e, p, q))
    }

    /// True if segment `p-q` properly crosses a stored edge.
    ///
    /// Edges that share an endpoint with `p-q` may touch it there, but not
    /// fold back over it collinearly.
    pub fn would_cross(&self, p: u32, q: u32) -> bool {
        self.lookup_accel
            .locate_in_envelope_intersecting(&self.envelope(p, q))
            .filter_map(|rect| self.edges[rect.data])
            .any(|e| self.crosses(p, q, &e))
    }

    fn crosses(&self, p: u32, q: u32, edge: &EdgeIndex) -> bool {
        let [a, b] = edge.vertices;
        let (pp, pq, pa, pb) = (self.point(p), self.point(q), self.point(a), self.point(b));

        if !segments_intersect(pp, pq, pa, pb) {
            return false;
        }

        // find the shared endpoint, if any, and the two far ends
        let shared = [(p, q), (q, p)].into_iter().find_map(|(s, u)| {
            if self.same_point(s, a) {
                Some((s, u, b))
            } else if self.same_point(s, b) {
                Some((s, u, a))
            } else {
                None
            }
        });

        let Some((s, u, v)) = shared else {
            return true;
        };
        if self.same_point(u, v) {
            // same edge; duplicates are rejected elsewhere
            return false;
        }

        let (ps, pu, pv) = (self.point(s), self.point(u), self.point(v));
        orientation(ps, pu, pv) == Orientation::Collinear
            && (on_segment(ps, pv, pu) || on_segment(ps, pu, pv))
    }

    /// Insert `p-q` unless it is degenerate, already stored, or crosses a stored edge.
    ///
    /// Returns whether the edge was inserted.
    pub fn insert_if_valid(&mut self, p: u32, q: u32) -> bool {
        if self.same_point(p, q) {
            tracing::trace!(p, q, "reject zero-length edge");
            return false;
        }
        if self.contains(p, q) {
            tracing::trace!(p, q, "reject duplicate edge");
            return false;
        }
        if self.would_cross(p, q) {
            tracing::trace!(p, q, "reject crossing edge");
            return false;
        }

        let slot = self.edges.len();
        self.edges.push(Some(EdgeIndex::new(p, q)));
        self.lookup_accel
            .insert(segment_rect(self.point(p), self.point(q), slot));
        self.live += 1;

        tracing::trace!(p, q, "insert edge");
        true
    }

    /// Remove every stored edge with endpoints `{p, q}`, in either order.
    ///
    /// Returns the number of edges removed.
    pub fn remove_matching(&mut self, p: u32, q: u32) -> usize {
        let doomed: Vec<usize> = self
            .edges
            .iter()
            .enumerate()
            .filter_map(|(slot, e)| match e {
                Some(e) if self.matches(e, p, q) => Some(slot),
                _ => None,
            })
            .collect();

        for &slot in &doomed {
            if let Some(edge) = self.edges[slot].take() {
                let [a, b] = edge.vertices;
                self.lookup_accel
                    .remove(&segment_rect(self.point(a), self.point(b), slot));
                self.live -= 1;
                tracing::trace!(a, b, "erase edge");
            }
        }

        doomed.len()
    }
}

// =============================================================================

#[cfg(test)]
mod test {
    use super::*;
    use glam::dvec2;

    fn unit_square() -> EdgeSet {
        EdgeSet::new(
            vec![
                dvec2(0.0, 0.0),
                dvec2(0.0, 1.0),
                dvec2(1.0, 0.0),
                dvec2(1.0, 1.0),
            ],
            Tolerance::default(),
        )
    }

    #[test]
    fn test_insert_rejects_duplicates() {
        let mut edges = unit_square();

        assert!(edges.insert_if_valid(0, 1));
        assert!(!edges.insert_if_valid(0, 1));
        assert!(!edges.insert_if_valid(1, 0));
        assert!(!edges.insert_if_valid(2, 2));
        assert_eq!(edges.len(), 1);
        assert!(edges.contains(1, 0));
    }

    #[test]
    fn test_insert_rejects_crossing() {
        let mut edges = unit_square();

        assert!(edges.insert_if_valid(1, 2));
        assert!(edges.would_cross(0, 3));
        assert!(!edges.insert_if_valid(0, 3));

        // shared endpoints are fine
        assert!(!edges.would_cross(0, 1));
        assert!(edges.insert_if_valid(0, 1));
        assert!(edges.insert_if_valid(0, 2));
        assert!(edges.insert_if_valid(1, 3));
        assert!(edges.insert_if_valid(2, 3));

        assert_eq!(edges.len(), 5);
        assert_eq!(edges.segments().count(), 5);
    }

    #[test]
    fn test_insert_rejects_collinear_overlap() {
        let mut edges = EdgeSet::new(
            vec![dvec2(0.0, 0.0), dvec2(1.0, 0.0), dvec2(2.0, 0.0), dvec2(-1.0, 0.0)],
            Tolerance::default(),
        );

        assert!(edges.insert_if_valid(0, 1));
        assert!(edges.insert_if_valid(1, 2));
        // folds back over both stored edges
        assert!(!edges.insert_if_valid(0, 2));
        // only touches at the shared endpoint
        assert!(edges.insert_if_valid(3, 0));
        assert_eq!(edges.len(), 3);
    }

    #[test]
    fn test_epsilon_duplicates() {
        let mut edges = EdgeSet::new(
            vec![dvec2(0.0, 0.0), dvec2(1.0, 1.0), dvec2(1.0 + f64::EPSILON, 1.0)],
            Tolerance::default(),
        );

        assert!(edges.insert_if_valid(0, 1));
        assert!(!edges.insert_if_valid(0, 2));
        assert!(!edges.insert_if_valid(1, 2));
        assert!(edges.contains(2, 0));
    }

    #[test]
    fn test_contains_near_equal_vertical_edge() {
        // the stored edge and the query have zero-width boxes one ulp apart
        let mut edges = EdgeSet::new(
            vec![
                dvec2(1.0, 0.0),
                dvec2(1.0, 2.0),
                dvec2(1.0 + f64::EPSILON, 0.0),
                dvec2(1.0 + f64::EPSILON, 2.0),
                dvec2(3.0, 0.0),
            ],
            Tolerance::default(),
        );

        assert!(edges.insert_if_valid(0, 1));
        assert!(edges.contains(3, 2));
        assert!(!edges.insert_if_valid(2, 3));
        assert!(!edges.contains(0, 4));
        assert_eq!(edges.len(), 1);
    }

    #[test]
    fn test_remove_matching() {
        let mut edges = unit_square();

        assert!(edges.insert_if_valid(1, 2));
        assert!(edges.insert_if_valid(0, 1));
        assert_eq!(edges.remove_matching(2, 1), 1);
        assert_eq!(edges.remove_matching(2, 1), 0);
        assert_eq!(edges.len(), 1);
        assert!(!edges.contains(1, 2));

        // the removed diagonal no longer blocks the other one
        assert!(edges.insert_if_valid(0, 3));
        assert_eq!(
            edges.edges().collect::<Vec<_>>(),
            vec![EdgeIndex::new(0, 1), EdgeIndex::new(0, 3)]
        );
    }
}
