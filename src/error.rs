use glam::DVec2;
use thiserror::Error;

/// Errors that terminate a triangulation run.
///
/// A failed run produces no edge set; there is no partial result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TriangulationError {
    /// The input points or the configuration cannot be triangulated.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The three points are collinear (or coincident), so they have no circumcircle.
    #[error("degenerate triangle: {a}, {b}, {c} are collinear")]
    DegenerateTriangle { a: DVec2, b: DVec2, c: DVec2 },

    /// Both candidate circumcircles contain the other side's candidate.
    #[error("ambiguous merge step between left vertex {left} and right vertex {right}")]
    AmbiguousMerge { left: u32, right: u32 },

    /// The merge work-list grew past its configured bound.
    #[error("merge exceeded {limit} work-list steps")]
    MergeBudgetExceeded { limit: usize },
}

pub type Result<T> = std::result::Result<T, TriangulationError>;
