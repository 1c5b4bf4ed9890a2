use spade::{HasPosition, Point2};
use std::ops::{Add, Mul, Sub};

/// A lidar return or a TIN vertex in a projected CRS
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub const fn new(x: f64, y: f64, z: f64) -> Point3D {
        Point3D { x, y, z }
    }

    pub fn dot(&self, other: &Point3D) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Point3D) -> Point3D {
        Point3D {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn length(&self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn distance(&self, other: &Point3D) -> f64 {
        (*self - *other).length()
    }

    pub fn distance_2d(&self, other: &Point3D) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// z-component of (a - self) x (b - self), positive for a counterclockwise turn
    pub fn consecutive_orientation(&self, a: &Point3D, b: &Point3D) -> f64 {
        (a.x - self.x) * (b.y - self.y) - (a.y - self.y) * (b.x - self.x)
    }
}

impl Add for Point3D {
    type Output = Point3D;

    fn add(self, rhs: Point3D) -> Self::Output {
        Point3D::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3D {
    type Output = Point3D;

    fn sub(self, rhs: Point3D) -> Self::Output {
        Point3D::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Point3D {
    type Output = Point3D;

    fn mul(self, rhs: f64) -> Self::Output {
        Point3D::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl HasPosition for Point3D {
    type Scalar = f64;

    fn position(&self) -> Point2<Self::Scalar> {
        Point2::new(self.x, self.y)
    }
}

/// Center of the circle through the xy-projections of three points,
/// `None` if they are collinear
pub fn circumcenter(a: &Point3D, b: &Point3D, c: &Point3D) -> Option<geo::Coord> {
    let d = 2. * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    if d == 0. {
        return None;
    }

    let a2 = a.x * a.x + a.y * a.y;
    let b2 = b.x * b.x + b.y * b.y;
    let c2 = c.x * c.x + c.y * c.y;

    Some(geo::Coord {
        x: (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d,
        y: (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d,
    })
}

/// true if at least three of the points span a non-degenerate triangle in the xy-plane
pub fn has_three_non_collinear(points: &[Point3D]) -> bool {
    if points.len() < 3 {
        return false;
    }
    let first = points[0];

    // the point furthest from the first defines a stable base line
    let Some(second) = points
        .iter()
        .skip(1)
        .max_by(|a, b| first.distance_2d(a).total_cmp(&first.distance_2d(b)))
    else {
        return false;
    };
    let base = first.distance_2d(second);
    if base == 0. {
        return false;
    }

    points
        .iter()
        .any(|p| (first.consecutive_orientation(second, p) / base).abs() > 1e-9)
}
