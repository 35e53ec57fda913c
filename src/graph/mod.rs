mod shortest_path;

use std::collections::{HashSet, VecDeque};

use crate::math::Point3;
use crate::surface::Surface;

/// Undirected weighted adjacency graph over the vertices of a [`Surface`].
///
/// One edge per triangle edge, weighted by the Euclidean distance between the
/// endpoints' world-space positions. Built once per generation run; never
/// updated incrementally. Shared triangle edges are deduplicated (the
/// duplicates would be harmless for Dijkstra, just slower).
#[derive(Debug, Clone)]
pub struct SurfaceGraph {
    adjacency: Vec<Vec<(u32, f64)>>,
}

impl SurfaceGraph {
    /// Builds the adjacency graph from a surface and its world-space vertex
    /// positions.
    ///
    /// Degenerate triangles are legal and contribute zero-weight edges.
    /// Deterministic: the same mesh and transform always yield the same graph.
    #[must_use]
    pub fn build(surface: &Surface, world_vertices: &[Point3]) -> Self {
        let mut adjacency = vec![Vec::new(); world_vertices.len()];
        let mut seen: HashSet<(u32, u32)> = HashSet::new();

        for tri in &surface.indices {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                let key = (a.min(b), a.max(b));
                if !seen.insert(key) {
                    continue;
                }
                let weight =
                    (world_vertices[a as usize] - world_vertices[b as usize]).norm();
                adjacency[a as usize].push((b, weight));
                adjacency[b as usize].push((a, weight));
            }
        }

        Self { adjacency }
    }

    /// Number of vertices the graph was built over.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Neighbors of a vertex with their edge weights.
    #[must_use]
    pub fn neighbors(&self, vertex: u32) -> &[(u32, f64)] {
        &self.adjacency[vertex as usize]
    }

    /// Reports whether every vertex is reachable from vertex 0.
    ///
    /// Diagnostic only: a disconnected graph does not block generation, but
    /// shortest-path queries across disconnected components will fail.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        if self.adjacency.is_empty() {
            return true;
        }

        let mut visited = vec![false; self.adjacency.len()];
        let mut queue = VecDeque::from([0u32]);
        visited[0] = true;
        let mut reached = 1usize;

        while let Some(v) = queue.pop_front() {
            for &(n, _) in &self.adjacency[v as usize] {
                if !visited[n as usize] {
                    visited[n as usize] = true;
                    reached += 1;
                    queue.push_back(n);
                }
            }
        }

        reached == self.adjacency.len()
    }
}
