use crate::error::{GenerationError, Result};
use crate::math::{Point3, TOLERANCE};

/// Arc-length parameterization of a fine vertex path.
///
/// Precomputes the cumulative arc length at each path vertex; [`at`](Self::at)
/// then maps a fraction of the total length to an interpolated world
/// position. Every returned point lies on the piecewise-linear surface: it is
/// either a path vertex or a lerp between two consecutive path vertices.
pub struct PathInterpolator {
    positions: Vec<Point3>,
    cumulative: Vec<f64>,
}

impl PathInterpolator {
    /// Builds the parameterization for a path over the given world vertices.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::EmptyArcPath`] for an empty path.
    pub fn new(world_vertices: &[Point3], path: &[u32]) -> Result<Self> {
        if path.is_empty() {
            return Err(GenerationError::EmptyArcPath { arc: "interpolated" }.into());
        }

        let positions: Vec<Point3> =
            path.iter().map(|&i| world_vertices[i as usize]).collect();

        let mut cumulative = Vec::with_capacity(positions.len());
        let mut total = 0.0;
        cumulative.push(0.0);
        for pair in positions.windows(2) {
            total += (pair[1] - pair[0]).norm();
            cumulative.push(total);
        }

        Ok(Self {
            positions,
            cumulative,
        })
    }

    /// Total arc length of the path.
    #[must_use]
    pub fn total_length(&self) -> f64 {
        *self.cumulative.last().unwrap_or(&0.0)
    }

    /// Returns the position at fraction `percentage` of the total arc length.
    ///
    /// The percentage is clamped to [0, 1]. Exactly 0 and 1 return the first
    /// and last path vertices with no arithmetic; a single-vertex or
    /// zero-length path maps every percentage to its single point.
    #[must_use]
    pub fn at(&self, percentage: f64) -> Point3 {
        let percentage = percentage.clamp(0.0, 1.0);
        let total = self.total_length();

        if percentage <= 0.0 || total < TOLERANCE {
            return self.positions[0];
        }
        if percentage >= 1.0 {
            return self.positions[self.positions.len() - 1];
        }

        let target = percentage * total;

        // Find the bracketing segment [cumulative[j], cumulative[j + 1]].
        let mut j = 0;
        while j + 1 < self.cumulative.len() && self.cumulative[j + 1] < target {
            j += 1;
        }

        let segment = self.cumulative[j + 1] - self.cumulative[j];
        if segment < TOLERANCE {
            // Zero-length segment (degenerate edge); either endpoint works.
            return self.positions[j];
        }

        let ratio = (target - self.cumulative[j]) / segment;
        let a = self.positions[j];
        let b = self.positions[j + 1];
        a + (b - a) * ratio
    }
}
