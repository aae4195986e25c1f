use glam::DVec2;

use crate::config::Tolerance;
use crate::error::{Result, TriangulationError};

/// A triangle, represented as 3x 2D points.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    vertices: [DVec2; 3],
}

impl Triangle {
    pub fn new(vertices: [DVec2; 3]) -> Self {
        Self { vertices }
    }

    pub fn vertices(&self) -> [DVec2; 3] {
        self.vertices
    }

    /// Twice the signed area of this [`Triangle`]; positive when counter-clockwise.
    pub fn doubled_area(&self) -> f64 {
        let [a, b, c] = self.vertices;
        (b - a).perp_dot(c - a)
    }

    /// True if the vertices are too close to collinear to define a circle.
    ///
    /// The doubled area is compared against the longest squared edge, so the
    /// test does not depend on the scale of the coordinates.
    pub fn is_degenerate(&self, tolerance: &Tolerance) -> bool {
        let [a, b, c] = self.vertices;
        let scale = a
            .distance_squared(b)
            .max(b.distance_squared(c))
            .max(c.distance_squared(a));
        self.doubled_area().abs() <= tolerance.degenerate * scale
    }

    /// Returns the circumcircle of this [`Triangle`].
    ///
    /// Fails with [`TriangulationError::DegenerateTriangle`] instead of
    /// dividing by a vanishing denominator.
    pub fn circumcircle(&self, tolerance: &Tolerance) -> Result<Circumcircle> {
        let [a, b, c] = self.vertices;
        if self.is_degenerate(tolerance) {
            return Err(TriangulationError::DegenerateTriangle { a, b, c });
        }

        let ab = a.length_squared();
        let cd = b.length_squared();
        let ef = c.length_squared();

        let denom_x = a.x * (c.y - b.y) + b.x * (a.y - c.y) + c.x * (b.y - a.y);
        let denom_y = a.y * (c.x - b.x) + b.y * (a.x - c.x) + c.y * (b.x - a.x);

        let circum_x = (ab * (c.y - b.y) + cd * (a.y - c.y) + ef * (b.y - a.y)) / denom_x;
        let circum_y = (ab * (c.x - b.x) + cd * (a.x - c.x) + ef * (b.x - a.x)) / denom_y;

        let center = DVec2::new(circum_x / 2.0, circum_y / 2.0);

        Ok(Circumcircle {
            center,
            radius_squared: a.distance_squared(center),
        })
    }

    /// Closed-disk test: is `query` on or inside the circumcircle?
    pub fn circumcircle_contains(&self, query: DVec2, tolerance: &Tolerance) -> Result<bool> {
        Ok(self.circumcircle(tolerance)?.contains(query))
    }
}

// =============================================================================

/// A circle stored as center and squared radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circumcircle {
    pub center: DVec2,
    pub radius_squared: f64,
}

impl Circumcircle {
    pub fn radius(&self) -> f64 {
        self.radius_squared.sqrt()
    }

    /// True if `point` lies on or inside the circle.
    pub fn contains(&self, point: DVec2) -> bool {
        point.distance_squared(self.center) <= self.radius_squared
    }

    /// True if `point` lies inside the circle and clear of its boundary band.
    pub fn strictly_contains(&self, point: DVec2, tolerance: &Tolerance) -> bool {
        let dist = point.distance_squared(self.center);
        self.radius_squared - dist > tolerance.circle * self.radius_squared
    }
}

// =============================================================================

/// A triangle, represented as 3x indices into a point array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TriangleIndex {
    pub vertices: [u32; 3],
}

impl TriangleIndex {
    pub fn new(vertices: [u32; 3]) -> Self {
        Self { vertices }
    }

    pub fn realize(&self, points: &[DVec2]) -> Triangle {
        Triangle::new(self.vertices.map(|v| points[v as usize]))
    }
}

// =============================================================================
