pub mod error;
pub mod graph;
pub mod landmark;
pub mod math;
pub mod operations;
pub mod surface;

pub use error::{Result, ScalpgridError};
