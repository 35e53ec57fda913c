mod generate;
mod interpolate;
mod nearest_vertex;
mod ray_fan;
mod snap_fiducials;

pub use generate::{GenerateCoordinateSystem, RayFanParams};
pub use interpolate::PathInterpolator;
pub use nearest_vertex::nearest_vertex;
pub use ray_fan::{RayFan, RayFanResult, RayHit};
pub use snap_fiducials::{Fiducials, SnapFiducials, SnappedFiducial, SnappedFiducials};
