use crate::error::{Result, TriangulationError};

/// Granularities merged after the size-3 base pass.
pub const DEFAULT_COARSENING: [usize; 4] = [4, 6, 8, 12];

/// Default bound on merge work-list pops for a single pair of groups.
pub const DEFAULT_MAX_MERGE_STEPS: usize = 1 << 20;

/// Floating point tolerances used by the predicates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    /// ULP multiplier for epsilon equality of coordinates.
    ///
    /// Larger values absorb more rounding noise, but risk collapsing real
    /// distinct vertices into one.
    pub ulps: u32,
    /// Relative size below which a circumcenter denominator counts as zero.
    pub degenerate: f64,
    /// Relative band around the circumradius treated as "on the circle".
    pub circle: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            ulps: 2,
            degenerate: 1e-12,
            circle: 1e-10,
        }
    }
}

/// What the merger does when both candidate circumcircles contain the
/// opposite candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AmbiguityPolicy {
    /// Advance on the side whose triangle has the smaller circumradius,
    /// preferring the left side on an exact tie.
    #[default]
    SmallerCircumradius,
    /// Stop the run with [`TriangulationError::AmbiguousMerge`].
    Fail,
}

/// Parameters for a single triangulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangulationConfig {
    pub tolerance: Tolerance,
    /// Group sizes merged after the base pass, strictly increasing.
    pub coarsening: Vec<usize>,
    /// Keep doubling the last group size while it is smaller than the input.
    pub extend_schedule: bool,
    pub ambiguity: AmbiguityPolicy,
    pub max_merge_steps: usize,
}

impl Default for TriangulationConfig {
    fn default() -> Self {
        Self {
            tolerance: Tolerance::default(),
            coarsening: DEFAULT_COARSENING.to_vec(),
            extend_schedule: true,
            ambiguity: AmbiguityPolicy::default(),
            max_merge_steps: DEFAULT_MAX_MERGE_STEPS,
        }
    }
}

impl TriangulationConfig {
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_ulps(mut self, ulps: u32) -> Self {
        self.tolerance.ulps = ulps;
        self
    }

    pub fn with_coarsening(mut self, coarsening: Vec<usize>) -> Self {
        self.coarsening = coarsening;
        self
    }

    pub fn with_extend_schedule(mut self, extend: bool) -> Self {
        self.extend_schedule = extend;
        self
    }

    pub fn with_ambiguity(mut self, ambiguity: AmbiguityPolicy) -> Self {
        self.ambiguity = ambiguity;
        self
    }

    pub fn with_max_merge_steps(mut self, steps: usize) -> Self {
        self.max_merge_steps = steps;
        self
    }

    /// Check the configuration before a run starts.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(TriangulationError::InvalidInput(msg));

        if self.tolerance.ulps == 0 {
            return invalid("tolerance ulps must be at least 1".into());
        }
        for (name, value) in [
            ("degenerate", self.tolerance.degenerate),
            ("circle", self.tolerance.circle),
        ] {
            if !value.is_finite() || value < 0.0 {
                return invalid(format!("{name} tolerance must be finite and >= 0, got {value}"));
            }
        }

        let mut previous = 3;
        for &size in &self.coarsening {
            if size <= previous {
                return invalid(format!(
                    "coarsening sizes must be strictly increasing and above 3, got {:?}",
                    self.coarsening
                ));
            }
            previous = size;
        }

        if self.max_merge_steps == 0 {
            return invalid("max_merge_steps must be at least 1".into());
        }

        Ok(())
    }
}

// =============================================================================
