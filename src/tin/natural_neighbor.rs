use super::{Tin, VertexId};
use crate::geometry::circumcenter;

use std::ops::Deref;

/// A temporary vertex that is removed from the TIN when dropped
struct Probe<'a> {
    tin: &'a mut Tin,
    id: VertexId,
}

impl<'a> Probe<'a> {
    fn insert(tin: &'a mut Tin, x: f64, y: f64) -> Option<Probe<'a>> {
        let id = tin.insert_one(x, y, 0.).ok()?;
        Some(Probe { tin, id })
    }
}

impl Deref for Probe<'_> {
    type Target = Tin;

    fn deref(&self) -> &Self::Target {
        self.tin
    }
}

impl Drop for Probe<'_> {
    fn drop(&mut self) {
        self.tin.remove(self.id);
    }
}

/// Laplace (non-Sibsonian) natural neighbor interpolation of the elevation at (x, y)
///
/// The point is temporarily inserted into `tin` and every natural neighbor q
/// gets the weight |voronoi edge between probe and q| / |probe q|.
/// Returns NaN where the surface is undefined, i.e. outside of or on the
/// convex hull, or when the weights sum to zero. The TIN is unchanged on return.
pub fn interpolate(tin: &mut Tin, x: f64, y: f64) -> f64 {
    // inserting on top of a vertex would overwrite it
    if let Some(v) = tin.vertex_at(x, y) {
        return tin.point_at(v).z;
    }
    if !tin.is_inside_convex_hull(x, y) {
        return f64::NAN;
    }

    let Some(probe) = Probe::insert(tin, x, y) else {
        return f64::NAN;
    };
    if probe.is_on_convex_hull(probe.id) {
        return f64::NAN;
    }

    let probe_point = probe.point_at(probe.id);
    let triangles = probe.incident_triangles(probe.id);

    let mut neighbors = Vec::with_capacity(triangles.len());
    for (i, tri) in triangles.iter().enumerate() {
        let next = &triangles[(i + 1) % triangles.len()];

        // the edge shared by consecutive triangles joins the probe and a natural neighbor
        let Some(&neighbor) = tri
            .0
            .iter()
            .find(|&&v| v != probe.id && next.contains(v))
        else {
            continue;
        };

        let [a, b, c] = probe.triangle_points(tri);
        let [d, e, f] = probe.triangle_points(next);
        let (Some(cc1), Some(cc2)) = (circumcenter(&a, &b, &c), circumcenter(&d, &e, &f)) else {
            continue;
        };

        let q = probe.point_at(neighbor);
        let voronoi_edge = ((cc1.x - cc2.x).powi(2) + (cc1.y - cc2.y).powi(2)).sqrt();
        neighbors.push((voronoi_edge / probe_point.distance_2d(&q), q.z));
    }

    weighted_average(&neighbors)
}

/// Mean of (weight, z) pairs, NaN if the weights sum to zero
fn weighted_average(neighbors: &[(f64, f64)]) -> f64 {
    let weight_sum: f64 = neighbors.iter().map(|(w, _)| w).sum();
    if weight_sum == 0. {
        return f64::NAN;
    }
    neighbors.iter().map(|(w, z)| w * z).sum::<f64>() / weight_sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point3D;
    use approx::assert_abs_diff_eq;

    // slightly irregular grid to stay clear of cocircular vertices
    fn jittered_grid(f: impl Fn(f64, f64) -> f64) -> Tin {
        let mut points = Vec::new();
        for yi in 0..8 {
            for xi in 0..8 {
                let x = xi as f64 * 2. + ((xi * 7 + yi * 3) % 5) as f64 * 0.13;
                let y = yi as f64 * 2. + ((xi * 11 + yi * 5) % 7) as f64 * 0.09;
                points.push(Point3D::new(x, y, f(x, y)));
            }
        }
        Tin::from_points(points).unwrap()
    }

    #[test]
    fn test_reproduces_plane() {
        let plane = |x: f64, y: f64| 2. * x - 0.5 * y + 3.;
        let mut tin = jittered_grid(plane);

        for (x, y) in [(3.3, 4.1), (7.77, 9.2), (10.5, 2.6), (5., 5.)] {
            let z = interpolate(&mut tin, x, y);
            assert_abs_diff_eq!(z, plane(x, y), epsilon = 1e-8);
        }
    }

    #[test]
    fn test_flat_surface() {
        let mut tin = jittered_grid(|_, _| 12.5);
        assert_abs_diff_eq!(interpolate(&mut tin, 6.1, 6.9), 12.5, epsilon = 1e-9);
    }

    #[test]
    fn test_at_vertex() {
        let mut tin = jittered_grid(|x, y| (x * 0.3).sin() + y * y * 0.01);
        let vertex = tin.points().nth(20).unwrap();

        let z = interpolate(&mut tin, vertex.x, vertex.y);
        assert_abs_diff_eq!(z, vertex.z, epsilon = 1e-12);
        assert_eq!(tin.num_vertices(), 64);
    }

    #[test]
    fn test_outside_hull_leaves_tin_unchanged() {
        let mut tin = jittered_grid(|x, _| x);
        let num_vertices = tin.num_vertices();
        let num_triangles = tin.num_triangles();

        assert!(interpolate(&mut tin, -5., 3.).is_nan());
        assert!(interpolate(&mut tin, 3., 100.).is_nan());
        assert_eq!(tin.num_vertices(), num_vertices);
        assert_eq!(tin.num_triangles(), num_triangles);

        // interior queries must not leak the probe either
        interpolate(&mut tin, 4.4, 4.4);
        assert_eq!(tin.num_vertices(), num_vertices);
        assert_eq!(tin.num_triangles(), num_triangles);
    }

    #[test]
    fn test_weighted_average() {
        assert_abs_diff_eq!(
            weighted_average(&[(1., 2.), (3., 6.)]),
            5.,
            epsilon = 1e-12
        );
        assert!(weighted_average(&[(0., 2.), (0., 6.)]).is_nan());
        assert!(weighted_average(&[]).is_nan());
    }

    #[test]
    fn test_on_hull_edge_is_nan() {
        let mut tin = Tin::from_points(vec![
            Point3D::new(0., 0., 1.),
            Point3D::new(10., 0., 1.),
            Point3D::new(10., 10., 1.),
            Point3D::new(0., 10., 1.),
            Point3D::new(4., 6., 1.),
        ])
        .unwrap();

        assert!(interpolate(&mut tin, 5., 0.).is_nan());
        assert_eq!(tin.num_vertices(), 5);
        assert_abs_diff_eq!(interpolate(&mut tin, 5., 5.), 1., epsilon = 1e-12);
    }
}
