use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use super::SurfaceGraph;
use crate::error::GraphError;

/// Accumulated path distance, ordered totally so it can key a binary heap.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Dist(f64);

impl Eq for Dist {}

impl PartialOrd for Dist {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Dist {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl SurfaceGraph {
    /// Finds the shortest path between two vertices (Dijkstra).
    ///
    /// All edge weights are non-negative Euclidean distances, so Dijkstra is
    /// correct and terminates. The returned path includes both `start` and
    /// `end`; `start == end` yields the single-element path.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexOutOfRange`] for indices beyond the graph
    /// and [`GraphError::NoPath`] when `end` is unreachable from `start`
    /// (disconnected components). The failure is explicit so callers never
    /// mistake it for a trivial path.
    pub fn shortest_path(&self, start: u32, end: u32) -> Result<Vec<u32>, GraphError> {
        let n = self.vertex_count();
        for v in [start, end] {
            if v as usize >= n {
                return Err(GraphError::VertexOutOfRange(v, n));
            }
        }

        if start == end {
            return Ok(vec![start]);
        }

        let mut dist = vec![f64::INFINITY; n];
        let mut prev: Vec<Option<u32>> = vec![None; n];
        let mut heap = BinaryHeap::new();

        dist[start as usize] = 0.0;
        heap.push(Reverse((Dist(0.0), start)));

        while let Some(Reverse((Dist(d), v))) = heap.pop() {
            if v == end {
                break;
            }
            // Stale entry: a shorter route to v was already settled.
            if d > dist[v as usize] {
                continue;
            }
            for &(n_idx, weight) in self.neighbors(v) {
                let candidate = d + weight;
                if candidate < dist[n_idx as usize] {
                    dist[n_idx as usize] = candidate;
                    prev[n_idx as usize] = Some(v);
                    heap.push(Reverse((Dist(candidate), n_idx)));
                }
            }
        }

        if prev[end as usize].is_none() {
            return Err(GraphError::NoPath { start, end });
        }

        let mut path = vec![end];
        let mut current = end;
        while let Some(p) = prev[current as usize] {
            path.push(p);
            current = p;
        }
        path.reverse();
        Ok(path)
    }

    /// Total edge-weight cost of a vertex path.
    #[must_use]
    pub fn path_cost(&self, path: &[u32]) -> f64 {
        path.windows(2)
            .map(|pair| {
                self.neighbors(pair[0])
                    .iter()
                    .find(|(n, _)| *n == pair[1])
                    .map_or(f64::INFINITY, |(_, w)| *w)
            })
            .sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Matrix4, Point3};
    use crate::surface::Surface;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    // A strip of triangles along the x-axis:
    //   1   3   5
    //   | \ | \ |
    //   0   2   4
    fn strip() -> SurfaceGraph {
        let surface = Surface::new(
            vec![
                p(0.0, 0.0, 0.0),
                p(0.0, 1.0, 0.0),
                p(1.0, 0.0, 0.0),
                p(1.0, 1.0, 0.0),
                p(2.0, 0.0, 0.0),
                p(2.0, 1.0, 0.0),
            ],
            vec![[0, 2, 1], [1, 2, 3], [2, 4, 3], [3, 4, 5]],
        );
        let world = surface.world_vertices(&Matrix4::identity());
        SurfaceGraph::build(&surface, &world)
    }

    #[test]
    fn path_includes_both_endpoints() {
        let graph = strip();
        let path = graph.shortest_path(0, 4).unwrap();
        assert_eq!(path.first(), Some(&0));
        assert_eq!(path.last(), Some(&4));
    }

    #[test]
    fn straight_run_follows_bottom_edge() {
        let graph = strip();
        let path = graph.shortest_path(0, 4).unwrap();
        assert_eq!(path, vec![0, 2, 4]);
        assert!((graph.path_cost(&path) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn same_start_and_end_yields_single_element() {
        let graph = strip();
        assert_eq!(graph.shortest_path(3, 3).unwrap(), vec![3]);
    }

    #[test]
    fn cost_is_symmetric() {
        let graph = strip();
        let forward = graph.shortest_path(0, 5).unwrap();
        let backward = graph.shortest_path(5, 0).unwrap();
        assert!((graph.path_cost(&forward) - graph.path_cost(&backward)).abs() < 1e-12);
    }

    #[test]
    fn disconnected_components_are_an_explicit_error() {
        let surface = Surface::new(
            vec![
                p(0.0, 0.0, 0.0),
                p(1.0, 0.0, 0.0),
                p(0.0, 1.0, 0.0),
                p(10.0, 0.0, 0.0),
                p(11.0, 0.0, 0.0),
                p(10.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2], [3, 4, 5]],
        );
        let world = surface.world_vertices(&Matrix4::identity());
        let graph = SurfaceGraph::build(&surface, &world);

        match graph.shortest_path(0, 5) {
            Err(GraphError::NoPath { start: 0, end: 5 }) => {}
            other => panic!("expected NoPath, got {other:?}"),
        }
    }

    #[test]
    fn out_of_range_vertex_is_rejected() {
        let graph = strip();
        assert!(matches!(
            graph.shortest_path(0, 99),
            Err(GraphError::VertexOutOfRange(99, 6))
        ));
    }
}
