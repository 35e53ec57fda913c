use thiserror::Error;

/// Top-level error type for the Scalpgrid coordinate-system generator.
#[derive(Debug, Error)]
pub enum ScalpgridError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to the mesh adjacency graph.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("vertex index {0} is out of range for a graph of {1} vertices")]
    VertexOutOfRange(u32, usize),

    #[error("no path between vertices {start} and {end}")]
    NoPath { start: u32, end: u32 },
}

/// Errors related to coordinate-system generation.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("surface has no vertices")]
    EmptySurface,

    #[error("{arc} arc produced no ray intersections")]
    ArcWithoutIntersections { arc: &'static str },

    #[error("{arc} arc path is empty")]
    EmptyArcPath { arc: &'static str },

    #[error("landmark {0:?} was not derived before it was needed")]
    MissingLandmark(String),
}

/// Convenience type alias for results using [`ScalpgridError`].
pub type Result<T> = std::result::Result<T, ScalpgridError>;
