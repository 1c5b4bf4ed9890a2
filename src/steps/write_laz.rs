use crate::geometry::{PointCloud, GROUND_CHANNEL};
use crate::{Error, Result};

use las::{point::Classification, Reader, Writer};
use log::debug;
use std::path::Path;

/// Copy `input` to `output` with every point reclassified from the ground channel
/// of `cloud`, `Ground` for ground points and `Unclassified` for the rest
///
/// `cloud` must have been read from `input`.
pub fn write_classified_laz(input: &Path, output: &Path, cloud: &PointCloud) -> Result<()> {
    let labels = cloud.channel(GROUND_CHANNEL).ok_or_else(|| {
        Error::InvalidConfiguration(format!("point cloud has no {GROUND_CHANNEL} channel"))
    })?;

    let mut las_reader = Reader::from_path(input)?;
    let header = las_reader.header().clone();
    if header.number_of_points() != cloud.len() as u64 {
        return Err(Error::InvalidConfiguration(format!(
            "{} holds {} points but the point cloud has {}",
            input.to_string_lossy(),
            header.number_of_points(),
            cloud.len()
        )));
    }
    let mut las_writer = Writer::from_path(output, header)?;

    let mut num_written = 0;
    for (point, &label) in las_reader.points().zip(labels) {
        let mut point = point?;
        point.classification = if label == 0 {
            Classification::Unclassified
        } else {
            Classification::Ground
        };
        las_writer.write_point(point)?;
        num_written += 1;
    }
    las_writer.close()?;

    debug!("Wrote {} points to {}", num_written, output.to_string_lossy());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Extent, GroundLabel, Point3D};
    use crate::steps::read_laz;
    use las::{Builder, Point};

    fn write_input(path: &Path, points: &[Point3D]) {
        let mut builder = Builder::from((1, 4));
        builder.transforms = las::Vector {
            x: las::Transform { scale: 1., offset: 0. },
            y: las::Transform { scale: 1., offset: 0. },
            z: las::Transform { scale: 1., offset: 0. },
        };
        let mut writer = Writer::from_path(path, builder.into_header().unwrap()).unwrap();
        for p in points {
            writer
                .write_point(Point {
                    x: p.x,
                    y: p.y,
                    z: p.z,
                    classification: Classification::LowPoint,
                    ..Default::default()
                })
                .unwrap();
        }
        writer.close().unwrap();
    }

    #[test]
    fn test_read_and_reclassify() {
        let dir = std::env::temp_dir().join(format!("tin_dtm_laz_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let input = dir.join("input.las");
        let output = dir.join("output.las");

        let points = vec![
            Point3D::new(1., 2., 3.),
            Point3D::new(4., 5., 6.),
            Point3D::new(7., 8., 9.),
        ];
        write_input(&input, &points);

        let mut cloud = read_laz(&input).unwrap();
        assert_eq!(cloud.points, points);
        assert_eq!(
            cloud.bounds,
            Extent::from_slice(&[1., 2., 3., 7., 8., 9.]).unwrap()
        );

        assert!(write_classified_laz(&input, &output, &cloud).is_err());

        cloud.declare_channel(GROUND_CHANNEL)[1] = GroundLabel::Ground as u8;
        write_classified_laz(&input, &output, &cloud).unwrap();

        let mut reader = Reader::from_path(&output).unwrap();
        let classes: Vec<Classification> = reader
            .points()
            .map(|p| p.unwrap().classification)
            .collect();
        assert_eq!(
            classes,
            vec![
                Classification::Unclassified,
                Classification::Ground,
                Classification::Unclassified
            ]
        );

        std::fs::remove_dir_all(dir).unwrap();
    }
}
