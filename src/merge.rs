//! Merging of two neighbouring point groups.
//!
//! The merge walks a frontier edge between the groups, starting from each
//! group's topmost point. At every step both groups are scanned for vertices
//! that could close a triangle with the frontier edge and whose circumcircle
//! holds no later vertex of the same group. Surviving candidates on one side
//! become the next frontier edges; when both sides have candidates a
//! circumcircle comparison picks the side.
//!
//! The walk is depth first over an explicit work-list, so its depth is a
//! checked bound rather than native recursion.

use glam::DVec2;

use crate::config::{AmbiguityPolicy, TriangulationConfig};
use crate::edges::EdgeSet;
use crate::error::{Result, TriangulationError};
use crate::geometry::signed_angle;
use crate::triangle::{Circumcircle, TriangleIndex};

/// Which of the two merged groups a step advances on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// The current connecting edge between the groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frontier {
    pub left: u32,
    pub right: u32,
    pub depth: usize,
}

impl Frontier {
    /// The frontier endpoint on `side`, followed by the opposite endpoint.
    fn base(&self, side: Side) -> (u32, u32) {
        match side {
            Side::Left => (self.left, self.right),
            Side::Right => (self.right, self.left),
        }
    }

    fn advance(&self, side: Side, vertex: u32) -> Frontier {
        let (left, right) = match side {
            Side::Left => (vertex, self.right),
            Side::Right => (self.left, vertex),
        };
        Frontier {
            left,
            right,
            depth: self.depth + 1,
        }
    }
}

/// A vertex that may close a triangle with the frontier edge.
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub vertex: u32,
    pub circle: Circumcircle,
}

// =============================================================================

/// Merge two adjacent groups of point indices, mutating `edges` in place.
///
/// The groups are copied and sorted by descending y; the slices passed in are
/// left untouched. Empty groups are a no-op.
pub fn merge_groups(
    edges: &mut EdgeSet,
    left: &[u32],
    right: &[u32],
    config: &TriangulationConfig,
) -> Result<()> {
    if left.is_empty() || right.is_empty() {
        return Ok(());
    }

    let mut merger = Merger {
        left: sorted_descending_y(edges.points(), left, Side::Left),
        right: sorted_descending_y(edges.points(), right, Side::Right),
        edges,
        config,
    };
    merger.run()
}

/// Order a group by descending y. Equal y puts the point nearer the other
/// group first, so the topmost pair spans the gap between the groups.
fn sorted_descending_y(points: &[DVec2], group: &[u32], side: Side) -> Vec<u32> {
    let mut sorted = group.to_vec();
    sorted.sort_by(|&a, &b| {
        let (pa, pb) = (points[a as usize], points[b as usize]);
        let toward_other = match side {
            Side::Left => pb.x.total_cmp(&pa.x),
            Side::Right => pa.x.total_cmp(&pb.x),
        };
        pb.y.total_cmp(&pa.y).then(toward_other)
    });
    sorted
}

/// Angle from the frontier edge to `query`, seen from `base`.
///
/// Positive values lie on the side of the frontier the merge walks toward,
/// for either group.
fn sweep_angle(edges: &EdgeSet, side: Side, base: u32, other: u32, query: u32) -> Option<f64> {
    let angle = signed_angle(edges.point(base), edges.point(other), edges.point(query))?;
    Some(match side {
        Side::Left => -angle,
        Side::Right => angle,
    })
}

/// Pick the side to advance on when both groups offer a candidate: the side
/// whose circumcircle leaves the other candidate outside.
///
/// The triangle through the left candidate wins if its circumcircle leaves
/// the right candidate outside, and symmetrically for the right. When each
/// circle contains the other candidate the configured policy decides.
pub fn choose_side(
    edges: &EdgeSet,
    frontier: &Frontier,
    left: &Candidate,
    right: &Candidate,
    policy: AmbiguityPolicy,
) -> Result<Side> {
    if !left.circle.contains(edges.point(right.vertex)) {
        return Ok(Side::Left);
    }
    if !right.circle.contains(edges.point(left.vertex)) {
        return Ok(Side::Right);
    }

    match policy {
        AmbiguityPolicy::SmallerCircumradius => {
            let side = if left.circle.radius_squared <= right.circle.radius_squared {
                Side::Left
            } else {
                Side::Right
            };
            tracing::debug!(
                left = frontier.left,
                right = frontier.right,
                ?side,
                "mutually containing circumcircles, advancing on smaller circle"
            );
            Ok(side)
        }
        AmbiguityPolicy::Fail => Err(TriangulationError::AmbiguousMerge {
            left: frontier.left,
            right: frontier.right,
        }),
    }
}

// =============================================================================

struct Merger<'a> {
    edges: &'a mut EdgeSet,
    config: &'a TriangulationConfig,
    left: Vec<u32>,
    right: Vec<u32>,
}

impl Merger<'_> {
    fn run(&mut self) -> Result<()> {
        let depth_limit = self.left.len();
        let root = Frontier {
            left: self.left[0],
            right: self.right[0],
            depth: 0,
        };

        tracing::debug!(
            left = self.left.len(),
            right = self.right.len(),
            root.left,
            root.right,
            "merge groups"
        );

        // a rejected root edge still seeds the walk
        self.edges.insert_if_valid(root.left, root.right);

        let mut pending = Vec::new();
        self.expand(root, depth_limit, &mut pending)?;

        let mut steps = 0;
        while let Some(frontier) = pending.pop() {
            steps += 1;
            if steps > self.config.max_merge_steps {
                return Err(TriangulationError::MergeBudgetExceeded {
                    limit: self.config.max_merge_steps,
                });
            }

            if self.edges.insert_if_valid(frontier.left, frontier.right) {
                self.expand(frontier, depth_limit, &mut pending)?;
            }
        }

        Ok(())
    }

    /// Scan both groups from `frontier` and queue the next frontier edges.
    ///
    /// Scanning happens even at the depth limit, since it also prunes
    /// superseded edges.
    fn expand(
        &mut self,
        frontier: Frontier,
        depth_limit: usize,
        pending: &mut Vec<Frontier>,
    ) -> Result<()> {
        let right = self.scan(Side::Right, &frontier);
        let left = self.scan(Side::Left, &frontier);

        if frontier.depth >= depth_limit {
            return Ok(());
        }

        let side = match (left.first(), right.first()) {
            (None, None) => return Ok(()),
            (Some(_), None) => Side::Left,
            (None, Some(_)) => Side::Right,
            (Some(l), Some(r)) => choose_side(self.edges, &frontier, l, r, self.config.ambiguity)?,
        };

        let chosen = match side {
            Side::Left => left,
            Side::Right => right,
        };

        // reversed so the first candidate is popped first
        pending.extend(chosen.iter().rev().map(|c| frontier.advance(side, c.vertex)));
        Ok(())
    }

    /// Collect the viable candidates of one group, sorted toward the other group.
    fn scan(&mut self, side: Side, frontier: &Frontier) -> Vec<Candidate> {
        let (base, other) = frontier.base(side);
        let tolerance = *self.edges.tolerance();
        let group = match side {
            Side::Left => self.left.clone(),
            Side::Right => self.right.clone(),
        };

        let mut found = Vec::new();
        for (pos, &k) in group.iter().enumerate() {
            let Some(sweep) = sweep_angle(self.edges, side, base, other, k) else {
                continue;
            };
            if !(sweep > 0.0 && sweep < 180.0) {
                continue;
            }

            let triangle = TriangleIndex::new([frontier.left, frontier.right, k]);
            let circle = match self.edges.realize_triangle(&triangle).circumcircle(&tolerance) {
                Ok(circle) => circle,
                Err(err) => {
                    tracing::trace!(k, %err, "skip candidate");
                    continue;
                }
            };

            let challenger = group[pos + 1..]
                .iter()
                .copied()
                .find(|&q| circle.strictly_contains(self.edges.point(q), &tolerance));

            match challenger {
                None => found.push(Candidate { vertex: k, circle }),
                Some(q) => {
                    // base-k is superseded only when the challenger lies past it
                    let beyond = sweep_angle(self.edges, side, base, other, q)
                        .is_some_and(|angle| angle > sweep);
                    if beyond {
                        self.edges.remove_matching(base, k);
                    }
                    tracing::trace!(k, q, beyond, "candidate challenged");
                }
            }
        }

        let x = |c: &Candidate| self.edges.point(c.vertex).x;
        match side {
            Side::Left => found.sort_by(|a, b| x(b).total_cmp(&x(a))),
            Side::Right => found.sort_by(|a, b| x(a).total_cmp(&x(b))),
        }
        found
    }
}

// =============================================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::Tolerance;
    use glam::dvec2;

    fn seeded_square() -> EdgeSet {
        let mut edges = EdgeSet::new(
            vec![
                dvec2(0.0, 0.0),
                dvec2(0.0, 1.0),
                dvec2(1.0, 0.0),
                dvec2(1.0, 1.0),
            ],
            Tolerance::default(),
        );
        assert!(edges.insert_if_valid(0, 1));
        assert!(edges.insert_if_valid(1, 2));
        assert!(edges.insert_if_valid(2, 0));
        edges
    }

    fn candidate(edges: &EdgeSet, frontier: &Frontier, vertex: u32) -> Candidate {
        let triangle = TriangleIndex::new([frontier.left, frontier.right, vertex]);
        Candidate {
            vertex,
            circle: edges
                .realize_triangle(&triangle)
                .circumcircle(edges.tolerance())
                .unwrap(),
        }
    }

    #[test]
    fn test_merge_square() {
        let mut edges = seeded_square();
        merge_groups(&mut edges, &[0, 1, 2], &[3], &TriangulationConfig::default()).unwrap();

        assert_eq!(edges.len(), 5);
        assert!(edges.contains(1, 3));
        assert!(edges.contains(2, 3));
        assert!(edges.contains(1, 2));
        assert!(!edges.contains(0, 3));
    }

    #[test]
    fn test_sort_breaks_ties_toward_other_group() {
        let points = [
            dvec2(1.0, 1.0),
            dvec2(3.0, 0.0),
            dvec2(3.0, 1.0),
            dvec2(4.0, 1.0),
            dvec2(6.0, 1.0),
        ];

        assert_eq!(sorted_descending_y(&points, &[0, 1, 2], Side::Left), vec![2, 0, 1]);
        assert_eq!(sorted_descending_y(&points, &[4, 3], Side::Right), vec![3, 4]);
    }

    #[test]
    fn test_merge_tied_tops() {
        // left group tops (1,1) and (3,1); the walk must start at (3,1)
        let mut edges = EdgeSet::new(
            vec![
                dvec2(1.0, 1.0),
                dvec2(3.0, 0.0),
                dvec2(3.0, 1.0),
                dvec2(4.0, 1.0),
            ],
            Tolerance::default(),
        );
        assert!(edges.insert_if_valid(0, 1));
        assert!(edges.insert_if_valid(1, 2));
        assert!(edges.insert_if_valid(2, 0));

        merge_groups(&mut edges, &[0, 1, 2], &[3], &TriangulationConfig::default()).unwrap();

        assert!(edges.contains(2, 3));
        assert!(!edges.contains(0, 3));
    }

    #[test]
    fn test_merge_empty_group() {
        let mut edges = seeded_square();
        merge_groups(&mut edges, &[0, 1, 2], &[], &TriangulationConfig::default()).unwrap();
        assert_eq!(edges.len(), 3);
    }

    #[test]
    fn test_merge_budget() {
        let mut edges = seeded_square();
        let config = TriangulationConfig::default().with_max_merge_steps(1);

        assert_eq!(
            merge_groups(&mut edges, &[0, 1, 2], &[3], &config),
            Err(TriangulationError::MergeBudgetExceeded { limit: 1 })
        );
    }

    #[test]
    fn test_sweep_angle_sides() {
        let edges = seeded_square();

        // frontier (0,1)-(1,1): both groups walk downward
        let left = sweep_angle(&edges, Side::Left, 1, 3, 0).unwrap();
        let right = sweep_angle(&edges, Side::Right, 3, 1, 2).unwrap();
        assert!((left - 90.0).abs() < 1e-9);
        assert!((right - 90.0).abs() < 1e-9);

        assert!(sweep_angle(&edges, Side::Left, 1, 3, 1).is_none());
    }

    #[test]
    fn test_choose_side() {
        let edges = EdgeSet::new(
            vec![
                dvec2(0.0, 1.0),
                dvec2(2.0, 1.0),
                dvec2(0.9, 0.0),
                dvec2(1.5, -3.0),
            ],
            Tolerance::default(),
        );
        let frontier = Frontier {
            left: 0,
            right: 1,
            depth: 0,
        };

        // the circle through the near left vertex leaves the far right one out
        let left = candidate(&edges, &frontier, 2);
        let right = candidate(&edges, &frontier, 3);
        assert_eq!(
            choose_side(&edges, &frontier, &left, &right, AmbiguityPolicy::Fail),
            Ok(Side::Left)
        );

        // and the other way round
        let left = candidate(&edges, &frontier, 3);
        let right = candidate(&edges, &frontier, 2);
        assert_eq!(
            choose_side(&edges, &frontier, &left, &right, AmbiguityPolicy::Fail),
            Ok(Side::Right)
        );
    }

    #[test]
    fn test_choose_side_ambiguous() {
        let edges = seeded_square();
        let frontier = Frontier {
            left: 1,
            right: 3,
            depth: 0,
        };

        // all four corners lie on one circle
        let left = candidate(&edges, &frontier, 0);
        let right = candidate(&edges, &frontier, 2);

        assert_eq!(
            choose_side(
                &edges,
                &frontier,
                &left,
                &right,
                AmbiguityPolicy::SmallerCircumradius
            ),
            Ok(Side::Left)
        );
        assert_eq!(
            choose_side(&edges, &frontier, &left, &right, AmbiguityPolicy::Fail),
            Err(TriangulationError::AmbiguousMerge { left: 1, right: 3 })
        );
    }
}
