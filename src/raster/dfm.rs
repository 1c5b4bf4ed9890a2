use crate::Result;

use geo::Coord;
use tiff::encoder::{colortype::Gray32Float, TiffEncoder};

use std::ops::{Index, IndexMut};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

/// Digital elevation raster, row 0 is the southernmost row
///
/// NaN marks cells without data.
#[derive(Clone, Debug, PartialEq)]
pub struct Dfm {
    pub field: Vec<f64>,
    pub width: usize,
    pub height: usize,
    /// lower left corner of the lower left cell
    pub origin: Coord,
    pub cell_size: f64,
}

impl Dfm {
    pub fn new(width: usize, height: usize, origin: Coord, cell_size: f64) -> Dfm {
        Dfm {
            field: vec![f64::NAN; width * height],
            width,
            height,
            origin,
            cell_size,
        }
    }

    /// Center of the cell at column `xi` and row `yi`
    #[inline]
    pub fn index2coord(&self, xi: usize, yi: usize) -> Coord {
        Coord {
            x: self.origin.x + (xi as f64 + 0.5) * self.cell_size,
            y: self.origin.y + (yi as f64 + 0.5) * self.cell_size,
        }
    }

    pub fn row(&self, yi: usize) -> &[f64] {
        &self.field[yi * self.width..(yi + 1) * self.width]
    }

    pub fn row_mut(&mut self, yi: usize) -> &mut [f64] {
        &mut self.field[yi * self.width..(yi + 1) * self.width]
    }

    pub fn num_nodata(&self) -> usize {
        self.field.iter().filter(|z| z.is_nan()).count()
    }

    /// Writes a single band float tiff at `tiff_path` and a world file next to it
    pub fn write_to_tiff(&self, tiff_path: &Path, nodata: f64) -> Result<()> {
        let mut tiff = File::create(tiff_path)?;
        let mut tiff = TiffEncoder::new(&mut tiff)?;

        // tiffs are stored north up
        let data: Vec<f32> = (0..self.height)
            .rev()
            .flat_map(|yi| self.row(yi))
            .map(|&z| if z.is_nan() { nodata as f32 } else { z as f32 })
            .collect();

        tiff.write_image::<Gray32Float>(self.width as u32, self.height as u32, &data)?;

        let tfw = File::create(tiff_path.with_extension("tfw"))?;
        let mut tfw = BufWriter::new(tfw);
        tfw.write_all(self.world_file().as_bytes())?;
        tfw.flush()?;
        Ok(())
    }

    /// Affine transform to the center of the upper left pixel
    pub fn world_file(&self) -> String {
        format!(
            "{}\n0\n0\n-{}\n{}\n{}\n",
            self.cell_size,
            self.cell_size,
            self.origin.x + self.cell_size / 2.,
            self.origin.y + (self.height as f64) * self.cell_size - self.cell_size / 2.
        )
    }
}

impl Index<(usize, usize)> for Dfm {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.field[index.0 * self.width + index.1]
    }
}

impl IndexMut<(usize, usize)> for Dfm {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        &mut self.field[index.0 * self.width + index.1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiff::decoder::{Decoder, DecodingResult};

    fn small_dfm() -> Dfm {
        let mut dfm = Dfm::new(3, 2, Coord { x: 100., y: 200. }, 0.5);
        for yi in 0..2 {
            for xi in 0..3 {
                dfm[(yi, xi)] = (yi * 10 + xi) as f64;
            }
        }
        dfm[(1, 2)] = f64::NAN;
        dfm
    }

    #[test]
    fn test_indexing() {
        let dfm = small_dfm();
        assert_eq!(&dfm.row(1)[..2], &[10., 11.]);
        assert_eq!(dfm.index2coord(2, 1), Coord { x: 101.25, y: 200.75 });
        assert_eq!(dfm.num_nodata(), 1);
    }

    #[test]
    fn test_write_to_tiff() {
        let dir = std::env::temp_dir().join(format!("tin_dtm_dfm_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("small.tiff");

        small_dfm().write_to_tiff(&path, -9999.).unwrap();

        let tfw = std::fs::read_to_string(path.with_extension("tfw")).unwrap();
        assert_eq!(tfw, "0.5\n0\n0\n-0.5\n100.25\n200.75\n");

        let mut decoder = Decoder::new(File::open(&path).unwrap()).unwrap();
        assert_eq!(decoder.dimensions().unwrap(), (3, 2));
        let DecodingResult::F32(data) = decoder.read_image().unwrap() else {
            panic!("expected a float image");
        };
        // north row first
        assert_eq!(data, vec![10., 11., -9999., 0., 1., 2.]);

        std::fs::remove_dir_all(dir).unwrap();
    }
}
