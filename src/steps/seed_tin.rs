use crate::geometry::{grid_steps, has_three_non_collinear, Extent, Point3D};
use crate::{Error, Result, SEED_BUFFER_CELLS};

use log::debug;

/// Row-major grid of square cells covering an extent buffered by
/// `SEED_BUFFER_CELLS` cells on every side
#[derive(Clone, Debug, PartialEq)]
pub struct SeedGrid {
    pub min_x: f64,
    pub min_y: f64,
    pub cell_size: f64,
    pub width: usize,
    pub height: usize,
}

impl SeedGrid {
    pub fn new(bbox: &Extent, cell_size: f64) -> Result<SeedGrid> {
        if !(cell_size > 0. && cell_size.is_finite()) {
            return Err(Error::InvalidConfiguration(format!(
                "seed cell size must be positive, got {cell_size}"
            )));
        }
        let buffer = SEED_BUFFER_CELLS * cell_size;
        let min_x = bbox.min.x - buffer;
        let min_y = bbox.min.y - buffer;

        Ok(SeedGrid {
            min_x,
            min_y,
            cell_size,
            width: grid_steps(min_x, bbox.max.x + buffer, cell_size),
            height: grid_steps(min_y, bbox.max.y + buffer, cell_size),
        })
    }

    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cells are half-open, `[min, max)` in both directions,
    /// so every point inside the grid is in exactly one cell
    pub fn cell_index(&self, p: &Point3D) -> Option<usize> {
        let xi = ((p.x - self.min_x) / self.cell_size).floor();
        let yi = ((p.y - self.min_y) / self.cell_size).floor();

        if !(xi >= 0. && yi >= 0.) {
            return None;
        }
        let (xi, yi) = (xi as usize, yi as usize);
        if xi >= self.width || yi >= self.height {
            return None;
        }
        Some(yi * self.width + xi)
    }
}

/// The lowest point of every non-empty seed cell, in row-major cell order
///
/// Ties keep the point that comes first in `points`. A point on the border
/// shared by two cells only competes in the cell above or to the right of it,
/// so it can never be the seed of both.
pub fn extract_seed_points(points: &[Point3D], bbox: &Extent, cell_size: f64) -> Result<Vec<Point3D>> {
    let grid = SeedGrid::new(bbox, cell_size)?;

    let mut lowest: Vec<Option<usize>> = vec![None; grid.len()];
    for (i, p) in points.iter().enumerate() {
        if !p.z.is_finite() {
            continue;
        }
        let Some(ci) = grid.cell_index(p) else {
            continue;
        };
        match lowest[ci] {
            Some(j) if points[j].z <= p.z => (),
            _ => lowest[ci] = Some(i),
        }
    }

    let seeds: Vec<Point3D> = lowest.into_iter().flatten().map(|i| points[i]).collect();
    debug!(
        "Seed grid of {}x{} cells gave {} seed points",
        grid.width,
        grid.height,
        seeds.len()
    );

    if !has_three_non_collinear(&seeds) {
        return Err(Error::EmptyCellSet { seeds: seeds.len() });
    }
    Ok(seeds)
}
