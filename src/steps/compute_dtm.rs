use crate::geometry::{Point3D, PointCloud};
use crate::parameters::DtmParameters;
use crate::raster::Dfm;
use crate::steps::{rasterize_multithread, GroundFilter};
use crate::tin::Tin;
use crate::{Result, SEED_BUFFER_CELLS};

use log::info;
use std::time::Instant;

/// Ground classify `cloud` in place and rasterize a TIN of its ground points
///
/// `progress` receives the fraction of raster rows finished since the last call.
pub fn compute_dtm(
    cloud: &mut PointCloud,
    params: &DtmParameters,
    progress: impl FnMut(f32),
) -> Result<Dfm> {
    params.validate()?;
    let extent = params.extent.unwrap_or(cloud.bounds);

    // the seed grid reaches outside of the extent in xy, z clips noise
    let seed_area = extent.buffered(SEED_BUFFER_CELLS * params.seed_cell_size);
    let clipped: Vec<Point3D> = cloud
        .points
        .iter()
        .filter(|p| seed_area.contains(p))
        .copied()
        .collect();
    info!(
        "{} of {} points within the buffered extent, area {:.3} sqkm",
        clipped.len(),
        cloud.len(),
        extent.width() * extent.height() / 1_000_000.
    );

    let now = Instant::now();
    let ground_filter = GroundFilter::new(&clipped, extent, params)?;
    let ground = ground_filter.filter(cloud)?;
    info!("Ground filtering done in {:.2} sec", now.elapsed().as_secs_f32());

    let now = Instant::now();
    let ground_tin = Tin::from_points(ground)?;
    let dfm = rasterize_multithread(
        &ground_tin,
        &extent,
        params.raster_cell_size,
        params.num_threads,
        progress,
    )?;
    info!(
        "Rasterized {}x{} cells in {:.2} sec, {} without data",
        dfm.width,
        dfm.height,
        now.elapsed().as_secs_f32(),
        dfm.num_nodata()
    );

    Ok(dfm)
}
