use crate::geometry::Extent;
use crate::{Error, Result};

/// Everything the DTM steps need, passed explicitly to every entry point
#[derive(Clone, Debug, PartialEq)]
pub struct DtmParameters {
    /// area to classify and rasterize, defaults to the bounds of the point cloud
    pub extent: Option<Extent>,

    // ground filtering
    pub seed_cell_size: f64,
    pub dist_threshold: f64,
    /// degrees
    pub max_angle: f64,

    // rasterization
    pub raster_cell_size: f64,
    pub nodata: f64,
    pub num_threads: usize,
}

impl Default for DtmParameters {
    fn default() -> Self {
        Self {
            extent: None,
            seed_cell_size: 30.,
            dist_threshold: 5.,
            max_angle: 30.,
            raster_cell_size: 0.5,
            nodata: -9999.,
            num_threads: 1,
        }
    }
}

impl DtmParameters {
    pub fn validate(&self) -> Result<()> {
        if !(self.seed_cell_size > 0. && self.seed_cell_size.is_finite()) {
            return Err(Error::InvalidConfiguration(format!(
                "seed cell size must be positive, got {}",
                self.seed_cell_size
            )));
        }
        if !(self.raster_cell_size > 0. && self.raster_cell_size.is_finite()) {
            return Err(Error::InvalidConfiguration(format!(
                "raster cell size must be positive, got {}",
                self.raster_cell_size
            )));
        }
        if !(self.dist_threshold >= 0. && self.dist_threshold.is_finite()) {
            return Err(Error::InvalidConfiguration(format!(
                "distance threshold must be non-negative, got {}",
                self.dist_threshold
            )));
        }
        if !(0. ..=90.).contains(&self.max_angle) {
            return Err(Error::InvalidConfiguration(format!(
                "max angle must be within [0, 90] degrees, got {}",
                self.max_angle
            )));
        }
        if self.num_threads == 0 {
            return Err(Error::InvalidConfiguration(
                "at least one thread is needed".to_string(),
            ));
        }
        Ok(())
    }
}
