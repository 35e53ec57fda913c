use nalgebra::{Rotation3, Unit};
use tracing::debug;

use crate::error::{GeometryError, Result};
use crate::math::ray::{ray_triangle_intersect, Ray};
use crate::math::{Point3, Vector3, TOLERANCE};
use crate::surface::Surface;

use super::generate::RayFanParams;
use super::nearest_vertex;

/// Closest intersection of one ray with the surface.
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    /// Distance along the ray to the intersection.
    pub distance: f64,
    /// Index triple of the struck triangle.
    pub triangle: [u32; 3],
}

/// Casts one finite ray against every triangle of the surface, keeping the
/// minimum valid hit distance.
///
/// Brute force over all triangles is intentional at these mesh sizes; a
/// spatial index could replace the scan without changing this contract.
#[must_use]
pub fn cast_ray(ray: &Ray, surface: &Surface, world_vertices: &[Point3]) -> Option<RayHit> {
    let length = ray.length();
    let dir = ray.displacement() / length;

    let mut best: Option<RayHit> = None;
    for tri in &surface.indices {
        let v0 = &world_vertices[tri[0] as usize];
        let v1 = &world_vertices[tri[1] as usize];
        let v2 = &world_vertices[tri[2] as usize];

        if let Some(t) = ray_triangle_intersect(&ray.origin, &dir, v0, v1, v2) {
            if t <= length && best.is_none_or(|hit| t < hit.distance) {
                best = Some(RayHit {
                    distance: t,
                    triangle: *tri,
                });
            }
        }
    }
    best
}

/// Everything one fan sweep produces.
#[derive(Debug, Clone, Default)]
pub struct RayFanResult {
    /// Nearest mesh vertices to the ray intersections, in sweep order. Not
    /// necessarily edge-connected (a rough path).
    pub rough_path: Vec<u32>,
    /// Every ray that was cast, hit or miss.
    pub rays: Vec<Ray>,
    /// World-space intersection points, one per hit.
    pub intersections: Vec<Point3>,
}

/// A fan of rays swept from `theta_min` to `theta_max` about a fixed axis.
///
/// The fan starts at the base direction and rotates it toward the up vector,
/// tracing an arc across the scalp between two fiducials.
pub struct RayFan {
    origin: Point3,
    direction: Unit<Vector3>,
    axis: Unit<Vector3>,
    params: RayFanParams,
}

impl RayFan {
    /// Creates a fan at `origin` sweeping `direction` toward `up`.
    ///
    /// The rotation axis is `direction × up`, so positive angles tilt the ray
    /// out of the base direction toward `up`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] when `direction` and `up` are
    /// (anti-)parallel or either is zero-length, and
    /// [`GeometryError::Degenerate`] for a non-positive sweep step.
    pub fn new(
        origin: Point3,
        direction: Vector3,
        up: Vector3,
        params: RayFanParams,
    ) -> Result<Self> {
        if params.theta_step <= 0.0 {
            return Err(
                GeometryError::Degenerate("ray fan step must be positive".into()).into(),
            );
        }
        let direction =
            Unit::try_new(direction, TOLERANCE).ok_or(GeometryError::ZeroVector)?;
        let axis = Unit::try_new(direction.cross(&up), TOLERANCE)
            .ok_or(GeometryError::ZeroVector)?;

        Ok(Self {
            origin,
            direction,
            axis,
            params,
        })
    }

    /// Sweeps the fan and collects the rough path.
    ///
    /// Rays that miss every triangle are skipped (logged, non-fatal); they
    /// just leave the rough path a little sparser. Consecutive duplicate
    /// vertices (two rays snapping to the same vertex) are collapsed.
    #[must_use]
    pub fn cast(&self, surface: &Surface, world_vertices: &[Point3]) -> RayFanResult {
        let mut result = RayFanResult::default();

        let mut theta = self.params.theta_min;
        while theta <= self.params.theta_max + TOLERANCE {
            let rotation = Rotation3::from_axis_angle(&self.axis, theta.to_radians());
            let dir = rotation * self.direction.into_inner();
            let ray = Ray::new(self.origin, dir, self.params.ray_distance);

            match cast_ray(&ray, surface, world_vertices) {
                Some(hit) => {
                    let point = ray.origin + dir * hit.distance;
                    result.intersections.push(point);

                    let candidates: Vec<Point3> = hit
                        .triangle
                        .iter()
                        .map(|&i| world_vertices[i as usize])
                        .collect();
                    if let Some(local) = nearest_vertex(&point, &candidates) {
                        let vertex = hit.triangle[local as usize];
                        if result.rough_path.last() != Some(&vertex) {
                            result.rough_path.push(vertex);
                        }
                    }
                }
                None => {
                    debug!(theta, "ray missed the surface; skipping");
                }
            }

            result.rays.push(ray);
            theta += self.params.theta_step;
        }

        result
    }
}
