use crate::math::Point3;

/// Snaps a world-space point to the index of the closest mesh vertex.
///
/// Linear scan on squared distance; ties break toward the first-encountered
/// index, so the result is deterministic for a fixed vertex order. Returns
/// `None` only for an empty vertex list.
#[must_use]
pub fn nearest_vertex(point: &Point3, world_vertices: &[Point3]) -> Option<u32> {
    let mut best: Option<(u32, f64)> = None;

    for (i, v) in world_vertices.iter().enumerate() {
        let d2 = (point - v).norm_squared();
        if best.is_none_or(|(_, best_d2)| d2 < best_d2) {
            #[allow(clippy::cast_possible_truncation)]
            let i = i as u32;
            best = Some((i, d2));
        }
    }

    best.map(|(i, _)| i)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn picks_closest_vertex() {
        let vertices = vec![p(0.0, 0.0, 0.0), p(5.0, 0.0, 0.0), p(2.0, 2.0, 0.0)];
        assert_eq!(nearest_vertex(&p(4.5, 0.1, 0.0), &vertices), Some(1));
    }

    #[test]
    fn tie_breaks_to_first_index() {
        let vertices = vec![p(-1.0, 0.0, 0.0), p(1.0, 0.0, 0.0)];
        assert_eq!(nearest_vertex(&p(0.0, 0.0, 0.0), &vertices), Some(0));
    }

    #[test]
    fn empty_input_yields_none() {
        assert_eq!(nearest_vertex(&Point3::origin(), &[]), None);
    }
}
