//! Ground filtering of airborne LiDAR point clouds and rasterization of the
//! ground into a digital terrain model
//!
//! The lowest point of every cell of a coarse grid seeds a TIN, every point is
//! tested against the plane of its supporting seed triangle, and a TIN of the
//! accepted ground points is sampled with Laplace natural neighbor interpolation.

pub mod error;
pub mod geometry;
pub mod parameters;
pub mod raster;
pub mod steps;
pub mod tin;

pub use error::{Error, Result};

/// Number of seed cells added outside of the extent on every side
pub const SEED_BUFFER_CELLS: f64 = 2.;
