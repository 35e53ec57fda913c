use crate::math::{Matrix4, Point3, Vector3};

/// An immutable triangulated head surface.
///
/// Owned by an external mesh asset; the generator only reads it. Positions
/// are stored in model space and mapped to world space once per generation
/// run via [`Surface::world_vertices`].
#[derive(Debug, Clone, Default)]
pub struct Surface {
    /// Vertex positions (model space).
    pub vertices: Vec<Point3>,
    /// Vertex normals (unused by the generator, carried for the renderer).
    pub normals: Vec<Vector3>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}

impl Surface {
    /// Creates a surface from positions and triangle indices, without normals.
    #[must_use]
    pub fn new(vertices: Vec<Point3>, indices: Vec<[u32; 3]>) -> Self {
        Self {
            vertices,
            normals: Vec::new(),
            indices,
        }
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Applies the world transform to every vertex position.
    ///
    /// All downstream computations (graph weights, ray casting, snapping,
    /// interpolation) operate on this world-space copy.
    #[must_use]
    pub fn world_vertices(&self, transform: &Matrix4) -> Vec<Point3> {
        self.vertices
            .iter()
            .map(|p| transform.transform_point(p))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn identity_transform_preserves_positions() {
        let surface = Surface::new(
            vec![Point3::new(1.0, 2.0, 3.0), Point3::new(-4.0, 0.0, 0.5)],
            vec![],
        );
        let world = surface.world_vertices(&Matrix4::identity());
        assert_eq!(world, surface.vertices);
    }

    #[test]
    fn translation_moves_all_vertices() {
        let surface = Surface::new(vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)], vec![]);
        let transform = Matrix4::new_translation(&Vector3::new(0.0, 5.0, 0.0));
        let world = surface.world_vertices(&transform);
        assert!((world[0] - Point3::new(0.0, 5.0, 0.0)).norm() < 1e-12);
        assert!((world[1] - Point3::new(1.0, 5.0, 0.0)).norm() < 1e-12);
    }
}
