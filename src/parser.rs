use std::path::PathBuf;

use clap::Parser;
use tin_dtm::geometry::Extent;
use tin_dtm::parameters::DtmParameters;
use tin_dtm::Result;

/// Classify the ground points of a lidar point cloud and rasterize them into a terrain model
#[derive(Parser, Clone, Debug)]
pub struct Args {
    /// Path to input .las/.laz-file
    #[arg(short, long)]
    pub in_file: PathBuf,

    /// Path to output directory, creates a new dir if given path doesn't exist, defaults to current working directory
    #[arg(short, long, default_value = ".")]
    pub output_directory: PathBuf,

    /// Side length in meters of the cells whose lowest points seed the ground TIN, default 30.0
    #[arg(short, long, default_value_t = 30.)]
    pub seed_cell_size: f64,

    /// Grid cell size in meters of the terrain model, default 0.5
    #[arg(short, long, default_value_t = 0.5)]
    pub grid_size: f64,

    /// Max distance in meters from a ground point to its supporting seed triangle, default 5.0
    #[arg(short, long, default_value_t = 5.)]
    pub dist_threshold: f64,

    /// Max angle in degrees between a ground point and the corners of its supporting seed triangle, default 30.0
    #[arg(short = 'a', long, default_value_t = 30.)]
    pub max_angle: f64,

    /// Area to process as minx miny minz maxx maxy maxz, defaults to the bounds of the input
    #[arg(short, long, num_args = 6, allow_negative_numbers = true)]
    pub extent: Option<Vec<f64>>,

    /// Value written to cells outside of the ground TIN, default -9999
    #[arg(short, long, default_value_t = -9999., allow_negative_numbers = true)]
    pub nodata: f64,

    /// Number of threads used in rasterization, defaults to all available threads
    #[arg(short, long, default_value_t = std::thread::available_parallelism().map_or(1, |n| n.get()))]
    pub threads: usize,

    /// Write the input with ground classification codes to ground_<name>.laz
    #[clap(short, long, action)]
    pub write_laz: bool,

    /// Log more, -v for debug and -vv for trace output
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn parameters(&self) -> Result<DtmParameters> {
        let extent = self
            .extent
            .as_deref()
            .map(Extent::from_slice)
            .transpose()?;

        let params = DtmParameters {
            extent,
            seed_cell_size: self.seed_cell_size,
            dist_threshold: self.dist_threshold,
            max_angle: self.max_angle,
            raster_cell_size: self.grid_size,
            nodata: self.nodata,
            num_threads: self.threads,
        };
        params.validate()?;
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let args = Args::try_parse_from([
            "TinDtm", "-i", "tile.laz", "-e", "0", "-10", "-5", "100", "50", "20", "-g", "1",
        ])
        .unwrap();

        let params = args.parameters().unwrap();
        assert_eq!(params.raster_cell_size, 1.);
        assert_eq!(params.seed_cell_size, 30.);
        assert_eq!(
            params.extent.unwrap().to_array(),
            [0., -10., -5., 100., 50., 20.]
        );
        assert!(!args.write_laz);

        let args = Args::try_parse_from(["TinDtm", "-i", "tile.laz", "-g", "0"]).unwrap();
        assert!(args.parameters().is_err());

        assert!(Args::try_parse_from(["TinDtm", "-i", "tile.laz", "-e", "0", "1"]).is_err());
    }
}
