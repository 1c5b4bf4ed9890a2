use crate::geometry::{grid_steps, Extent};
use crate::raster::Dfm;
use crate::tin::{interpolate, Tin};
use crate::{Error, Result};

use geo::Coord;
use log::debug;

use std::sync::mpsc;
use std::thread;

fn empty_dfm(bbox: &Extent, cell_size: f64) -> Result<Dfm> {
    if !(cell_size > 0. && cell_size.is_finite()) {
        return Err(Error::InvalidConfiguration(format!(
            "raster cell size must be positive, got {cell_size}"
        )));
    }
    let width = grid_steps(bbox.min.x, bbox.max.x, cell_size);
    let height = grid_steps(bbox.min.y, bbox.max.y, cell_size);
    let origin = Coord {
        x: bbox.min.x,
        y: bbox.min.y,
    };
    debug!("Rasterizing {width}x{height} cells of size {cell_size}");

    Ok(Dfm::new(width, height, origin, cell_size))
}

fn interpolate_row(tin: &mut Tin, dfm: &Dfm, yi: usize) -> Vec<f64> {
    (0..dfm.width)
        .map(|xi| {
            let coords = dfm.index2coord(xi, yi);
            interpolate(tin, coords.x, coords.y)
        })
        .collect()
}

/// Sample the TIN at every cell center of a grid covering `bbox`
pub fn rasterize(tin: &mut Tin, bbox: &Extent, cell_size: f64) -> Result<Dfm> {
    let mut dfm = empty_dfm(bbox, cell_size)?;

    for yi in 0..dfm.height {
        let row = interpolate_row(tin, &dfm, yi);
        dfm.row_mut(yi).copy_from_slice(&row);
    }
    Ok(dfm)
}

/// Same result as [`rasterize`], with the rows striped over `num_threads` workers
///
/// `progress` is called with the completed fraction of every finished row.
pub fn rasterize_multithread(
    tin: &Tin,
    bbox: &Extent,
    cell_size: f64,
    num_threads: usize,
    mut progress: impl FnMut(f32),
) -> Result<Dfm> {
    if num_threads == 0 {
        return Err(Error::InvalidConfiguration(
            "at least one thread is needed".to_string(),
        ));
    }
    let mut dfm = empty_dfm(bbox, cell_size)?;
    if dfm.height == 0 {
        return Ok(dfm);
    }
    let inc_size = 1. / dfm.height as f32;

    let (sender, receiver) = mpsc::channel();
    thread::scope(|s| {
        let template = &dfm;

        for i in 0..num_threads {
            let thread_sender = sender.clone();
            let mut tin = tin.clone();

            s.spawn(move || {
                let mut y_index = i;
                while y_index < template.height {
                    let row = interpolate_row(&mut tin, template, y_index);
                    if thread_sender.send((y_index, row)).is_err() {
                        break;
                    }
                    y_index += num_threads;
                }
            });
        }
        drop(sender);

        let rows: Vec<(usize, Vec<f64>)> = receiver
            .iter()
            .inspect(|_| progress(inc_size))
            .collect();
        rows
    })
    .into_iter()
    .for_each(|(yi, row)| dfm.row_mut(yi).copy_from_slice(&row));

    Ok(dfm)
}
