use crate::error::{GenerationError, Result};
use crate::math::Point3;

use super::nearest_vertex;

/// The four user-placed anatomical anchors, in world space.
///
/// Positions are wherever the user dragged them; they typically hover near
/// but not exactly on the scalp surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fiducials {
    pub nasion: Point3,
    pub inion: Point3,
    pub left_preauricular: Point3,
    pub right_preauricular: Point3,
}

/// A fiducial after snapping: the exact vertex position and its index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnappedFiducial {
    pub position: Point3,
    pub vertex: u32,
}

/// All four fiducials snapped onto the mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnappedFiducials {
    pub nasion: SnappedFiducial,
    pub inion: SnappedFiducial,
    pub left_preauricular: SnappedFiducial,
    pub right_preauricular: SnappedFiducial,
}

/// Snaps each fiducial to its nearest mesh vertex.
///
/// Returns a new [`SnappedFiducials`] structure rather than mutating the
/// input, so callers can keep the user-entered positions distinct from the
/// surface-snapped ones.
pub struct SnapFiducials {
    fiducials: Fiducials,
}

impl SnapFiducials {
    /// Creates a new `SnapFiducials` operation.
    #[must_use]
    pub fn new(fiducials: Fiducials) -> Self {
        Self { fiducials }
    }

    /// Executes the snap against the world-space vertex positions.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::EmptySurface`] when there are no vertices
    /// to snap to.
    pub fn execute(&self, world_vertices: &[Point3]) -> Result<SnappedFiducials> {
        let snap = |point: &Point3| -> Result<SnappedFiducial> {
            let vertex = nearest_vertex(point, world_vertices)
                .ok_or(GenerationError::EmptySurface)?;
            Ok(SnappedFiducial {
                position: world_vertices[vertex as usize],
                vertex,
            })
        };

        Ok(SnappedFiducials {
            nasion: snap(&self.fiducials.nasion)?,
            inion: snap(&self.fiducials.inion)?,
            left_preauricular: snap(&self.fiducials.left_preauricular)?,
            right_preauricular: snap(&self.fiducials.right_preauricular)?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn snaps_each_fiducial_to_exact_vertex_position() {
        let vertices = vec![
            p(0.0, 0.0, -10.0),
            p(0.0, 0.0, 10.0),
            p(-10.0, 0.0, 0.0),
            p(10.0, 0.0, 0.0),
        ];
        let fiducials = Fiducials {
            nasion: p(0.1, -0.2, -9.7),
            inion: p(-0.3, 0.1, 10.4),
            left_preauricular: p(-9.8, 0.0, 0.2),
            right_preauricular: p(10.1, -0.1, -0.3),
        };

        let snapped = SnapFiducials::new(fiducials).execute(&vertices).unwrap();

        assert_eq!(snapped.nasion.vertex, 0);
        assert_eq!(snapped.nasion.position, vertices[0]);
        assert_eq!(snapped.inion.vertex, 1);
        assert_eq!(snapped.left_preauricular.vertex, 2);
        assert_eq!(snapped.right_preauricular.vertex, 3);
    }

    #[test]
    fn input_fiducials_are_left_untouched() {
        let vertices = vec![p(0.0, 0.0, 0.0)];
        let fiducials = Fiducials {
            nasion: p(1.0, 2.0, 3.0),
            inion: p(4.0, 5.0, 6.0),
            left_preauricular: p(7.0, 8.0, 9.0),
            right_preauricular: p(1.0, 1.0, 1.0),
        };
        let before = fiducials;

        let _ = SnapFiducials::new(fiducials).execute(&vertices).unwrap();
        assert_eq!(fiducials, before);
    }

    #[test]
    fn empty_surface_is_an_error() {
        let fiducials = Fiducials {
            nasion: Point3::origin(),
            inion: Point3::origin(),
            left_preauricular: Point3::origin(),
            right_preauricular: Point3::origin(),
        };
        assert!(SnapFiducials::new(fiducials).execute(&[]).is_err());
    }
}
