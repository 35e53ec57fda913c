use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::error::{GenerationError, Result};
use crate::graph::SurfaceGraph;
use crate::landmark::{
    CoordinateSystem, Landmark, CORONAL, LEFT_TEMPORAL, RIGHT_TEMPORAL, SAGITTAL,
};
use crate::math::{Matrix4, Point3, Vector3};
use crate::surface::Surface;

use super::ray_fan::{RayFan, RayFanResult};
use super::snap_fiducials::{Fiducials, SnapFiducials, SnappedFiducial};
use super::{nearest_vertex, PathInterpolator};

/// User-editable parameters for the sagittal and coronal ray fans.
///
/// Angles are in degrees. Defaults sweep a 10° fan step from 10° to 170°,
/// with rays long enough to cross a head-sized mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayFanParams {
    pub theta_step: f64,
    pub theta_min: f64,
    pub theta_max: f64,
    pub ray_distance: f64,
}

impl Default for RayFanParams {
    fn default() -> Self {
        Self {
            theta_step: 10.0,
            theta_min: 10.0,
            theta_max: 170.0,
            ray_distance: 15.0,
        }
    }
}

/// Generates the full 10/20 landmark set for one head surface.
///
/// A single synchronous run sequencing: fiducial snapping, the sagittal
/// Nasion↔Inion arc, the coronal LPA↔RPA arc (whose fan orientation depends
/// on the just-computed Cz), the two temporal arcs, and finalization. Any
/// stage failure aborts the whole run; no partial landmark set is returned.
pub struct GenerateCoordinateSystem<'a> {
    surface: &'a Surface,
    transform: Matrix4,
    fiducials: Fiducials,
    params: RayFanParams,
}

impl<'a> GenerateCoordinateSystem<'a> {
    /// Creates a new generation run.
    #[must_use]
    pub fn new(
        surface: &'a Surface,
        transform: Matrix4,
        fiducials: Fiducials,
        params: RayFanParams,
    ) -> Self {
        Self {
            surface,
            transform,
            fiducials,
            params,
        }
    }

    /// Executes the run, returning the finished coordinate system by value.
    ///
    /// # Errors
    ///
    /// Fails before any computation when the surface is empty, and during
    /// the run when a fan produces no intersections, a fan axis degenerates,
    /// or two rough-path vertices have no connecting path (disconnected
    /// mesh region). Callers keep their previous snapshot on failure.
    pub fn execute(&self) -> Result<CoordinateSystem> {
        if self.surface.vertex_count() == 0 {
            return Err(GenerationError::EmptySurface.into());
        }

        let world = self.surface.world_vertices(&self.transform);
        let graph = SurfaceGraph::build(self.surface, &world);
        if !graph.is_connected() {
            warn!("surface graph is not a single connected component; arcs crossing the gap will fail");
        }

        let snapped = SnapFiducials::new(self.fiducials).execute(&world)?;
        debug!(
            nasion = snapped.nasion.vertex,
            inion = snapped.inion.vertex,
            lpa = snapped.left_preauricular.vertex,
            rpa = snapped.right_preauricular.vertex,
            "fiducials snapped to mesh vertices"
        );

        let mut system = CoordinateSystem::default();

        // Sagittal arc: fan rotates about an axis orthogonal to the
        // nasion→inion direction and world-up.
        let (sagittal_path, sagittal_fan) = self.fan_arc(
            &graph,
            &world,
            &snapped.nasion,
            &snapped.inion,
            Vector3::y(),
            "sagittal",
        )?;
        Self::place_landmarks(&mut system.landmarks, &world, &sagittal_path, &SAGITTAL)?;
        Self::record_fan(&mut system, &world, &sagittal_path, sagittal_fan);

        // Coronal arc: the up vector comes from the just-derived Cz, so this
        // stage must run strictly after the sagittal one.
        let lpa = snapped.left_preauricular;
        let rpa = snapped.right_preauricular;
        let ear_midpoint = Point3::from((lpa.position.coords + rpa.position.coords) / 2.0);
        let cz = Self::landmark_position(&system.landmarks, "Cz")?;
        let (coronal_path, coronal_fan) =
            self.fan_arc(&graph, &world, &lpa, &rpa, cz - ear_midpoint, "coronal")?;
        Self::place_landmarks(&mut system.landmarks, &world, &coronal_path, &CORONAL)?;
        Self::record_fan(&mut system, &world, &coronal_path, coronal_fan);

        // Temporal arcs: no new rays, just stitching between landmarks
        // already snapped to vertices.
        let fpz = Self::landmark_vertex(&system.landmarks, "Fpz")?;
        let oz = Self::landmark_vertex(&system.landmarks, "Oz")?;
        let t3 = Self::landmark_vertex(&system.landmarks, "T3")?;
        let t4 = Self::landmark_vertex(&system.landmarks, "T4")?;

        for (rough, table) in [
            (vec![fpz, t3, oz], &LEFT_TEMPORAL),
            (vec![oz, t4, fpz], &RIGHT_TEMPORAL),
        ] {
            let fine = stitch(&graph, &rough)?;
            Self::place_landmarks(&mut system.landmarks, &world, &fine, table)?;
            system.paths.push(path_positions(&world, &fine));
        }

        // Finalization: refresh every landmark's cached vertex index and
        // reset visibility.
        for landmark in system.landmarks.values_mut() {
            landmark.vertex = nearest_vertex(&landmark.position, &world)
                .ok_or(GenerationError::EmptySurface)?;
            landmark.visible = true;
        }

        Ok(system)
    }

    /// Runs one ray-fan arc between two snapped fiducials and returns the
    /// fine vertex path from `start` to `end`.
    ///
    /// The fan direction points start→end, so intersections are discovered
    /// from the `end` side first; the stitched path is reversed and then
    /// pinned to the exact fiducial vertices at both ends.
    fn fan_arc(
        &self,
        graph: &SurfaceGraph,
        world: &[Point3],
        start: &SnappedFiducial,
        end: &SnappedFiducial,
        up: Vector3,
        arc: &'static str,
    ) -> Result<(Vec<u32>, RayFanResult)> {
        let midpoint = Point3::from((start.position.coords + end.position.coords) / 2.0);
        let direction = end.position - start.position;

        let fan = RayFan::new(midpoint, direction, up, self.params)?;
        let fan_result = fan.cast(self.surface, world);
        if fan_result.rough_path.is_empty() {
            return Err(GenerationError::ArcWithoutIntersections { arc }.into());
        }

        let mut fine = stitch(graph, &fan_result.rough_path)?;
        fine.reverse();
        if fine.first() != Some(&start.vertex) {
            fine.insert(0, start.vertex);
        }
        if fine.last() != Some(&end.vertex) {
            fine.push(end.vertex);
        }

        Ok((fine, fan_result))
    }

    /// Interpolates a label/percentage table along a fine path and inserts
    /// the resulting landmarks.
    fn place_landmarks(
        landmarks: &mut BTreeMap<String, Landmark>,
        world: &[Point3],
        path: &[u32],
        table: &[(&str, f64)],
    ) -> Result<()> {
        let interpolator = PathInterpolator::new(world, path)?;
        for &(label, percentage) in table {
            let position = interpolator.at(percentage);
            let vertex =
                nearest_vertex(&position, world).ok_or(GenerationError::EmptySurface)?;
            landmarks.insert(
                label.to_string(),
                Landmark {
                    position,
                    vertex,
                    visible: true,
                },
            );
        }
        Ok(())
    }

    fn record_fan(
        system: &mut CoordinateSystem,
        world: &[Point3],
        path: &[u32],
        fan: RayFanResult,
    ) {
        system.paths.push(path_positions(world, path));
        system.rays.extend(fan.rays);
        system.waypoints.extend(fan.intersections);
    }

    fn landmark_position(landmarks: &BTreeMap<String, Landmark>, label: &str) -> Result<Point3> {
        landmarks
            .get(label)
            .map(|lm| lm.position)
            .ok_or_else(|| GenerationError::MissingLandmark(label.to_string()).into())
    }

    fn landmark_vertex(landmarks: &BTreeMap<String, Landmark>, label: &str) -> Result<u32> {
        landmarks
            .get(label)
            .map(|lm| lm.vertex)
            .ok_or_else(|| GenerationError::MissingLandmark(label.to_string()).into())
    }
}

/// Stitches a rough path into an edge-connected fine path by joining the
/// shortest path between each consecutive vertex pair.
fn stitch(graph: &SurfaceGraph, rough: &[u32]) -> Result<Vec<u32>> {
    let mut fine = vec![rough[0]];
    for pair in rough.windows(2) {
        let segment = graph.shortest_path(pair[0], pair[1])?;
        fine.extend_from_slice(&segment[1..]);
    }
    Ok(fine)
}

fn path_positions(world: &[Point3], path: &[u32]) -> Vec<Point3> {
    path.iter().map(|&i| world[i as usize]).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_params_sweep_ten_to_one_seventy() {
        let params = RayFanParams::default();
        assert!((params.theta_step - 10.0).abs() < f64::EPSILON);
        assert!((params.theta_min - 10.0).abs() < f64::EPSILON);
        assert!((params.theta_max - 170.0).abs() < f64::EPSILON);
        assert!((params.ray_distance - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_surface_fails_before_any_computation() {
        let surface = Surface::default();
        let fiducials = Fiducials {
            nasion: Point3::origin(),
            inion: Point3::origin(),
            left_preauricular: Point3::origin(),
            right_preauricular: Point3::origin(),
        };
        let run = GenerateCoordinateSystem::new(
            &surface,
            Matrix4::identity(),
            fiducials,
            RayFanParams::default(),
        );
        assert!(run.execute().is_err());
    }

    #[test]
    fn stitch_joins_consecutive_shortest_paths() {
        let surface = Surface::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(2.0, 0.0, 0.0),
                Point3::new(2.0, 1.0, 0.0),
            ],
            vec![[0, 2, 1], [1, 2, 3], [2, 4, 3], [3, 4, 5]],
        );
        let world = surface.world_vertices(&Matrix4::identity());
        let graph = SurfaceGraph::build(&surface, &world);

        let fine = stitch(&graph, &[0, 2, 4]).unwrap();
        assert_eq!(fine, vec![0, 2, 4]);

        let fine = stitch(&graph, &[0, 4]).unwrap();
        assert_eq!(fine.first(), Some(&0));
        assert_eq!(fine.last(), Some(&4));
    }
}
