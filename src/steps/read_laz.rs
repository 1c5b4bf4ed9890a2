use crate::geometry::{Extent, Point3D, PointCloud};
use crate::Result;

use las::Reader;
use log::{debug, warn};
use std::path::Path;

/// All points of a las/laz-file, in file order, with the bounds from its header
///
/// Unreadable point records are an error, withheld points are kept so that
/// point indices line up with the file.
pub fn read_laz(las_path: &Path) -> Result<PointCloud> {
    let mut las_reader = Reader::from_path(las_path)?;

    let header = las_reader.header();
    let bounds = Extent::from(header.bounds());
    let number_of_points = header.number_of_points();
    debug!(
        "Reading {} points from {}",
        number_of_points,
        las_path.to_string_lossy()
    );

    let points = las_reader
        .points()
        .map(|p| p.map(|p| Point3D::new(p.x, p.y, p.z)))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    if points.len() as u64 != number_of_points {
        warn!(
            "Header of {} announces {} points, read {}",
            las_path.to_string_lossy(),
            number_of_points,
            points.len()
        );
    }

    Ok(PointCloud::new(points, bounds))
}
