use super::{Point3, Vector3, RAY_EPSILON};

/// A finite ray segment in world space, stored as origin and endpoint so the
/// visualization layer can draw it directly as a line segment.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Point3,
    pub end: Point3,
}

impl Ray {
    /// Creates a ray from an origin, a direction, and a length.
    #[must_use]
    pub fn new(origin: Point3, direction: Vector3, length: f64) -> Self {
        Self {
            origin,
            end: origin + direction * length,
        }
    }

    /// The (non-normalized) vector from origin to endpoint.
    #[must_use]
    pub fn displacement(&self) -> Vector3 {
        self.end - self.origin
    }

    /// The length of the ray segment.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.displacement().norm()
    }
}

/// Intersects a ray with a single triangle (Möller–Trumbore).
///
/// `dir` must be unit-length for `t` to be a Euclidean distance. Returns
/// `Some(t)` with the distance along the ray, or `None` when the ray is
/// parallel to the triangle plane, the hit lies outside the triangle, or the
/// hit is behind the origin.
#[must_use]
pub fn ray_triangle_intersect(
    origin: &Point3,
    dir: &Vector3,
    v0: &Point3,
    v1: &Point3,
    v2: &Point3,
) -> Option<f64> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let pvec = dir.cross(&edge2);
    let det = edge1.dot(&pvec);

    // Ray parallel to the triangle plane.
    if det.abs() < RAY_EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let tvec = origin - v0;

    let u = tvec.dot(&pvec) * inv_det;
    if u < -RAY_EPSILON || u > 1.0 + RAY_EPSILON {
        return None;
    }

    let qvec = tvec.cross(&edge1);
    let v = dir.dot(&qvec) * inv_det;
    if v < -RAY_EPSILON || u + v > 1.0 + RAY_EPSILON {
        return None;
    }

    let t = edge2.dot(&qvec) * inv_det;
    if t < RAY_EPSILON {
        // Intersection behind (or at) the ray origin.
        return None;
    }

    Some(t)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn v(x: f64, y: f64, z: f64) -> Vector3 {
        Vector3::new(x, y, z)
    }

    // Triangle in the z = 5 plane covering the first quadrant corner.
    fn tri() -> (Point3, Point3, Point3) {
        (p(-1.0, -1.0, 5.0), p(3.0, -1.0, 5.0), p(-1.0, 3.0, 5.0))
    }

    #[test]
    fn ray_hits_triangle_center() {
        let (v0, v1, v2) = tri();
        let t = ray_triangle_intersect(&p(0.0, 0.0, 0.0), &v(0.0, 0.0, 1.0), &v0, &v1, &v2);
        assert!((t.unwrap() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn ray_misses_outside_triangle() {
        let (v0, v1, v2) = tri();
        let t = ray_triangle_intersect(&p(10.0, 10.0, 0.0), &v(0.0, 0.0, 1.0), &v0, &v1, &v2);
        assert!(t.is_none());
    }

    #[test]
    fn parallel_ray_is_rejected() {
        let (v0, v1, v2) = tri();
        let t = ray_triangle_intersect(&p(0.0, 0.0, 0.0), &v(1.0, 0.0, 0.0), &v0, &v1, &v2);
        assert!(t.is_none());
    }

    #[test]
    fn hit_behind_origin_is_rejected() {
        let (v0, v1, v2) = tri();
        let t = ray_triangle_intersect(&p(0.0, 0.0, 10.0), &v(0.0, 0.0, 1.0), &v0, &v1, &v2);
        assert!(t.is_none());
    }

    #[test]
    fn hit_on_vertex_is_accepted() {
        let (v0, v1, v2) = tri();
        // Aim exactly at v0; barycentric u = v = 0 sits on the epsilon boundary.
        let t = ray_triangle_intersect(&p(-1.0, -1.0, 0.0), &v(0.0, 0.0, 1.0), &v0, &v1, &v2);
        assert!((t.unwrap() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn ray_segment_geometry() {
        let ray = Ray::new(p(1.0, 2.0, 3.0), v(0.0, 1.0, 0.0), 4.0);
        assert!((ray.length() - 4.0).abs() < 1e-12);
        assert!((ray.end - p(1.0, 6.0, 3.0)).norm() < 1e-12);
    }
}
