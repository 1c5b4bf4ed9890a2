use crate::geometry::{Extent, GroundLabel, Point3D, PointCloud, GROUND_CHANNEL};
use crate::parameters::DtmParameters;
use crate::steps::extract_seed_points;
use crate::tin::{Location, Tin, Triangle};
use crate::{Error, Result};

use log::{debug, info, trace};

/// |n·p + k| below this means the point already lies on the plane
pub const ON_PLANE_EPSILON: f64 = 1e-6;

/// How far a cosine may drift outside of [-1, 1] before it is a fault
pub const COS_TOLERANCE: f64 = 1e-6;

/// Label every point against the seed TIN, in input order
///
/// A point is ground if its distance to the plane of its supporting
/// triangle is at most `dist_threshold` and none of the three incidence
/// angles exceeds `max_angle` degrees.
pub fn classify(
    points: &[Point3D],
    seed_tin: &Tin,
    dist_threshold: f64,
    max_angle: f64,
) -> Result<Vec<GroundLabel>> {
    points
        .iter()
        .map(|p| classify_point(p, seed_tin, dist_threshold, max_angle))
        .collect()
}

/// Points with a non-finite coordinate are never ground
pub fn classify_point(
    p: &Point3D,
    seed_tin: &Tin,
    dist_threshold: f64,
    max_angle: f64,
) -> Result<GroundLabel> {
    if !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()) {
        return Ok(GroundLabel::NotGround);
    }
    let Some(tri) = supporting_triangle(seed_tin, p) else {
        return Ok(GroundLabel::NotGround);
    };
    let vertices = seed_tin.triangle_points(&tri);

    let Some(d) = plane_intersection(&vertices, p) else {
        trace!("degenerate supporting triangle for ({}, {})", p.x, p.y);
        return Ok(GroundLabel::NotGround);
    };

    if p.distance(&d) > dist_threshold {
        return Ok(GroundLabel::NotGround);
    }

    for v in &vertices {
        if incidence_angle(v, &d, p)? > max_angle {
            return Ok(GroundLabel::NotGround);
        }
    }
    Ok(GroundLabel::Ground)
}

/// The enclosing triangle, or the first triangle around the closest vertex
/// for points outside of the convex hull
pub fn supporting_triangle(tin: &Tin, p: &Point3D) -> Option<Triangle> {
    match tin.locate(p.x, p.y) {
        Location::Found(tri) => Some(tri),
        Location::NotFound => {
            let closest = tin.closest_vertex(p.x, p.y)?;
            let tri = tin.incident_triangles(closest).first().copied();
            if tri.is_none() {
                trace!("no supporting triangle for ({}, {})", p.x, p.y);
            }
            tri
        }
    }
}

/// Foot of the perpendicular from `p` onto the plane through the triangle,
/// `p` itself when it is already on the plane
///
/// None if the triangle has no normal.
pub fn plane_intersection(triangle: &[Point3D; 3], p: &Point3D) -> Option<Point3D> {
    let [a, b, c] = triangle;
    let n = (*b - *a).cross(&(*c - *a));
    let nn = n.dot(&n);
    if nn == 0. {
        return None;
    }

    let k = -n.dot(a);
    let s = n.dot(p) + k;
    if s.abs() < ON_PLANE_EPSILON {
        return Some(*p);
    }
    Some(*p + n * (-s / nn))
}

/// Angle in degrees at `v` between the directions to `d` and to `p`,
/// with `d` the foot of `p` on a plane through `v`
pub fn incidence_angle(v: &Point3D, d: &Point3D, p: &Point3D) -> Result<f64> {
    let vd = v.distance(d);
    let vp = v.distance(p);
    if vd == 0. || vp == 0. {
        return Ok(0.);
    }

    let cos = vd / vp;
    if !(-1. - COS_TOLERANCE..=1. + COS_TOLERANCE).contains(&cos) {
        return Err(Error::NumericDomainFault { cos });
    }
    Ok(cos.clamp(-1., 1.).acos().to_degrees())
}

/// Ground classification of a point cloud against a TIN seeded from its grid minima
pub struct GroundFilter {
    seed_tin: Tin,
    extent: Extent,
    dist_threshold: f64,
    max_angle: f64,
}

impl GroundFilter {
    /// Seeds are taken from `points` on the extent buffered by the seed grid margin
    pub fn new(points: &[Point3D], extent: Extent, params: &DtmParameters) -> Result<GroundFilter> {
        params.validate()?;

        let seeds = extract_seed_points(points, &extent, params.seed_cell_size)?;
        let seed_tin = Tin::from_points(seeds)?;
        debug!(
            "Seed TIN has {} vertices and {} triangles",
            seed_tin.num_vertices(),
            seed_tin.num_triangles()
        );

        Ok(GroundFilter {
            seed_tin,
            extent,
            dist_threshold: params.dist_threshold,
            max_angle: params.max_angle,
        })
    }

    pub fn seed_tin(&self) -> &Tin {
        &self.seed_tin
    }

    /// Writes the ground channel of `cloud` and returns the ground points
    /// followed by the seed TIN's hull vertices
    ///
    /// Only points inside the extent are classified, the rest stay `NotGround`.
    pub fn filter(&self, cloud: &mut PointCloud) -> Result<Vec<Point3D>> {
        let mut labels = vec![GroundLabel::NotGround; cloud.len()];
        let mut ground = Vec::new();

        for (label, p) in labels.iter_mut().zip(cloud.points.iter()) {
            if !self.extent.contains(p) {
                continue;
            }
            *label = classify_point(p, &self.seed_tin, self.dist_threshold, self.max_angle)?;
            if label.is_ground() {
                ground.push(*p);
            }
        }

        let channel = cloud.declare_channel(GROUND_CHANNEL);
        for (c, label) in channel.iter_mut().zip(labels) {
            *c = label as u8;
        }

        let num_ground = ground.len();
        ground.extend(
            self.seed_tin
                .convex_hull_vertices()
                .into_iter()
                .map(|v| self.seed_tin.point_at(v)),
        );
        info!(
            "Classified {} of {} points as ground",
            num_ground,
            cloud.len()
        );

        Ok(ground)
    }
}
