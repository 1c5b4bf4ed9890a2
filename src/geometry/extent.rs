use super::Point3D;
use crate::{Error, Result};

/// Axis aligned bounding box, `[minx, miny, minz, maxx, maxy, maxz]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min: Point3D,
    pub max: Point3D,
}

impl Extent {
    pub fn new(min: Point3D, max: Point3D) -> Result<Extent> {
        let all_finite = [min.x, min.y, min.z, max.x, max.y, max.z]
            .iter()
            .all(|v| v.is_finite());

        if !all_finite || min.x >= max.x || min.y >= max.y || min.z > max.z {
            return Err(Error::InvalidConfiguration(format!(
                "malformed bounding box [{}, {}, {}, {}, {}, {}]",
                min.x, min.y, min.z, max.x, max.y, max.z
            )));
        }
        Ok(Extent { min, max })
    }

    /// Parse the 6-element form `[minx, miny, minz, maxx, maxy, maxz]`
    pub fn from_slice(bbox: &[f64]) -> Result<Extent> {
        match bbox {
            &[minx, miny, minz, maxx, maxy, maxz] => Extent::new(
                Point3D::new(minx, miny, minz),
                Point3D::new(maxx, maxy, maxz),
            ),
            _ => Err(Error::InvalidConfiguration(format!(
                "a bounding box needs 6 elements, got {}",
                bbox.len()
            ))),
        }
    }

    /// Smallest extent containing all points
    pub fn from_points(points: &[Point3D]) -> Result<Extent> {
        let mut min = Point3D::new(f64::MAX, f64::MAX, f64::MAX);
        let mut max = Point3D::new(f64::MIN, f64::MIN, f64::MIN);

        for p in points {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }
        Extent::new(min, max)
    }

    pub fn to_array(&self) -> [f64; 6] {
        [
            self.min.x, self.min.y, self.min.z, self.max.x, self.max.y, self.max.z,
        ]
    }

    /// Grow the xy-extent by `margin` on every side, z is left as is
    pub fn buffered(&self, margin: f64) -> Extent {
        Extent {
            min: Point3D::new(self.min.x - margin, self.min.y - margin, self.min.z),
            max: Point3D::new(self.max.x + margin, self.max.y + margin, self.max.z),
        }
    }

    /// inclusive on all six bounds
    pub fn contains(&self, p: &Point3D) -> bool {
        self.contains_xy(p) && self.min.z <= p.z && p.z <= self.max.z
    }

    fn contains_xy(&self, p: &Point3D) -> bool {
        self.min.x <= p.x && p.x <= self.max.x && self.min.y <= p.y && p.y <= self.max.y
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// Number of steps in the walk `v = start + i * step while v < end`
pub fn grid_steps(start: f64, end: f64, step: f64) -> usize {
    let mut n = ((end - start) / step).floor().max(0.) as usize;
    while start + (n as f64) * step < end {
        n += 1;
    }
    while n > 0 && start + ((n - 1) as f64) * step >= end {
        n -= 1;
    }
    n
}

impl From<las::Bounds> for Extent {
    fn from(b: las::Bounds) -> Self {
        Extent {
            min: Point3D::new(b.min.x, b.min.y, b.min.z),
            max: Point3D::new(b.max.x, b.max.y, b.max.z),
        }
    }
}
