//! Pure 2D predicates over `DVec2` points.

use glam::DVec2;

/// Compare two coordinates with a tolerance scaled by their magnitude.
///
/// `ulps` multiplies the machine epsilon; values whose difference is below the
/// smallest normal `f64` are always equal.
pub fn almost_equal(a: f64, b: f64, ulps: u32) -> bool {
    let diff = (a - b).abs();
    diff <= f64::EPSILON * (a + b).abs() * f64::from(ulps) || diff < f64::MIN_POSITIVE
}

/// Epsilon equality of two points, applied to each coordinate independently.
pub fn points_almost_equal(p: DVec2, q: DVec2, ulps: u32) -> bool {
    almost_equal(p.x, q.x, ulps) && almost_equal(p.y, q.y, ulps)
}

// =============================================================================

/// Turn direction of an ordered point triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

/// Orientation of `(p1, p2, p3)` from the cross product of `p2 - p1` and `p3 - p2`.
pub fn orientation(p1: DVec2, p2: DVec2, p3: DVec2) -> Orientation {
    let val = (p2.y - p1.y) * (p3.x - p2.x) - (p2.x - p1.x) * (p3.y - p2.y);
    if val == 0.0 {
        Orientation::Collinear
    } else if val > 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::CounterClockwise
    }
}

/// True if `q` is inside the axis aligned box spanned by `p` and `r`.
///
/// Only meaningful once the three points are known to be collinear.
pub fn on_segment(p: DVec2, q: DVec2, r: DVec2) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

/// Test whether segment `p1-q1` intersects segment `p2-q2`.
///
/// Touching endpoints and collinear overlap both count as an intersection.
pub fn segments_intersect(p1: DVec2, q1: DVec2, p2: DVec2, q2: DVec2) -> bool {
    let o1 = orientation(p1, q1, p2);
    let o2 = orientation(p1, q1, q2);
    let o3 = orientation(p2, q2, p1);
    let o4 = orientation(p2, q2, q1);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    (o1 == Orientation::Collinear && on_segment(p1, p2, q1))
        || (o2 == Orientation::Collinear && on_segment(p1, q2, q1))
        || (o3 == Orientation::Collinear && on_segment(p2, p1, q2))
        || (o4 == Orientation::Collinear && on_segment(p2, q1, q2))
}

/// Angle in degrees swept from `toward - base` to `query - base`.
///
/// Counter-clockwise sweeps are positive. Returns `None` when either direction
/// has zero length.
pub fn signed_angle(base: DVec2, toward: DVec2, query: DVec2) -> Option<f64> {
    let u = toward - base;
    let v = query - base;
    let norms = u.length() * v.length();
    if norms == 0.0 {
        return None;
    }

    let cos = (u.dot(v) / norms).clamp(-1.0, 1.0);
    let angle = cos.acos().to_degrees();
    if u.perp_dot(v) < 0.0 {
        Some(-angle)
    } else {
        Some(angle)
    }
}

// =============================================================================

#[cfg(test)]
mod test {
    use super::*;
    use glam::dvec2;

    #[test]
    fn test_almost_equal() {
        assert!(almost_equal(0.1 + 0.2, 0.3, 2));
        assert!(almost_equal(0.0, 0.0, 2));
        assert!(!almost_equal(1.0, 1.0001, 2));
        assert!(!almost_equal(0.0, 1e-12, 2));

        assert!(points_almost_equal(
            dvec2(1.0, 2.0),
            dvec2(1.0 + f64::EPSILON, 2.0),
            2
        ));
        assert!(!points_almost_equal(dvec2(1.0, 2.0), dvec2(1.0, 2.5), 2));
    }

    #[test]
    fn test_orientation() {
        let a = dvec2(0.0, 0.0);
        let b = dvec2(1.0, 0.0);

        assert_eq!(orientation(a, b, dvec2(2.0, 0.0)), Orientation::Collinear);
        assert_eq!(orientation(a, b, dvec2(1.0, 1.0)), Orientation::CounterClockwise);
        assert_eq!(orientation(a, b, dvec2(1.0, -1.0)), Orientation::Clockwise);
    }

    #[test]
    fn test_on_segment() {
        let p = dvec2(0.0, 0.0);
        let r = dvec2(2.0, 2.0);
        assert!(on_segment(p, dvec2(1.0, 1.0), r));
        assert!(on_segment(p, r, r));
        assert!(!on_segment(p, dvec2(3.0, 3.0), r));
    }

    #[test]
    fn test_segments_intersect() {
        let o = dvec2(0.0, 0.0);

        // proper crossing
        assert!(segments_intersect(
            o,
            dvec2(1.0, 1.0),
            dvec2(0.0, 1.0),
            dvec2(1.0, 0.0)
        ));

        // parallel, disjoint
        assert!(!segments_intersect(
            o,
            dvec2(1.0, 0.0),
            dvec2(0.0, 1.0),
            dvec2(1.0, 1.0)
        ));

        // shared endpoint
        assert!(segments_intersect(
            o,
            dvec2(1.0, 0.0),
            dvec2(1.0, 0.0),
            dvec2(1.0, 1.0)
        ));

        // collinear overlap
        assert!(segments_intersect(
            o,
            dvec2(2.0, 0.0),
            dvec2(1.0, 0.0),
            dvec2(3.0, 0.0)
        ));

        // collinear, disjoint
        assert!(!segments_intersect(
            o,
            dvec2(1.0, 0.0),
            dvec2(2.0, 0.0),
            dvec2(3.0, 0.0)
        ));
    }

    #[test]
    fn test_signed_angle() {
        let base = dvec2(1.0, 1.0);
        let toward = dvec2(0.0, 1.0);

        let below = signed_angle(base, toward, dvec2(1.0, 0.0)).unwrap();
        assert!((below - 90.0).abs() < 1e-9);

        let above = signed_angle(base, toward, dvec2(1.0, 2.0)).unwrap();
        assert!((above + 90.0).abs() < 1e-9);

        assert!(signed_angle(base, toward, base).is_none());
    }
}
