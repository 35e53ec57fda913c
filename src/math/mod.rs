pub mod ray;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// 4x4 transformation matrix.
pub type Matrix4 = nalgebra::Matrix4<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Tolerance for ray/triangle intersection: rejects near-parallel rays,
/// intersections behind the ray origin, and barycentric coordinates just
/// outside the triangle.
pub const RAY_EPSILON: f64 = 1e-6;
