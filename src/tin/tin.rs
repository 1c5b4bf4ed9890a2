use crate::geometry::Point3D;
use crate::Result;

use spade::handles::{FaceHandle, FixedVertexHandle, InnerTag};
use spade::{DelaunayTriangulation, Point2, PositionInTriangulation, Triangulation};

pub type VertexId = FixedVertexHandle;

/// Vertex ids into the owning [`Tin`], counterclockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Triangle(pub [VertexId; 3]);

impl Triangle {
    pub fn contains(&self, v: VertexId) -> bool {
        self.0.contains(&v)
    }
}

/// Result of a point location query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Found(Triangle),
    NotFound,
}

/// Triangulated irregular network over 3D points, triangulated in the xy-plane
#[derive(Clone, Default)]
pub struct Tin {
    dt: DelaunayTriangulation<Point3D>,
}

impl Tin {
    pub fn new() -> Tin {
        Tin::default()
    }

    pub fn from_points(points: Vec<Point3D>) -> Result<Tin> {
        Ok(Tin {
            dt: DelaunayTriangulation::bulk_load_stable(points)?,
        })
    }

    pub fn insert(&mut self, points: &[Point3D]) -> Result<()> {
        for p in points {
            self.dt.insert(*p)?;
        }
        Ok(())
    }

    /// A point at the position of an existing vertex replaces that vertex
    pub fn insert_one(&mut self, x: f64, y: f64, z: f64) -> Result<VertexId> {
        Ok(self.dt.insert(Point3D::new(x, y, z))?)
    }

    pub fn remove(&mut self, v: VertexId) -> Point3D {
        self.dt.remove(v)
    }

    pub fn locate(&self, x: f64, y: f64) -> Location {
        match self.dt.locate(Point2::new(x, y)) {
            PositionInTriangulation::OnFace(face) => {
                Location::Found(Self::triangle(self.dt.face(face)))
            }
            PositionInTriangulation::OnEdge(edge) => {
                let edge = self.dt.directed_edge(edge);
                match edge.face().as_inner().or(edge.rev().face().as_inner()) {
                    Some(face) => Location::Found(Self::triangle(face)),
                    None => Location::NotFound,
                }
            }
            PositionInTriangulation::OnVertex(v) => match self.incident_triangles(v).first() {
                Some(tri) => Location::Found(*tri),
                None => Location::NotFound,
            },
            PositionInTriangulation::OutsideOfConvexHull(_)
            | PositionInTriangulation::NoTriangulation => Location::NotFound,
        }
    }

    /// The vertex sitting exactly at (x, y), if any
    pub fn vertex_at(&self, x: f64, y: f64) -> Option<VertexId> {
        self.dt.locate_vertex(Point2::new(x, y)).map(|v| v.fix())
    }

    pub fn is_inside_convex_hull(&self, x: f64, y: f64) -> bool {
        !matches!(
            self.dt.locate(Point2::new(x, y)),
            PositionInTriangulation::OutsideOfConvexHull(_)
                | PositionInTriangulation::NoTriangulation
        )
    }

    pub fn closest_vertex(&self, x: f64, y: f64) -> Option<VertexId> {
        self.dt.nearest_neighbor(Point2::new(x, y)).map(|v| v.fix())
    }

    /// Inner triangles around a vertex in counterclockwise order
    pub fn incident_triangles(&self, v: VertexId) -> Vec<Triangle> {
        self.dt
            .vertex(v)
            .out_edges()
            .filter_map(|e| e.face().as_inner())
            .map(Self::triangle)
            .collect()
    }

    /// The hull vertices in clockwise order
    pub fn convex_hull_vertices(&self) -> Vec<VertexId> {
        self.dt.convex_hull().map(|e| e.from().fix()).collect()
    }

    pub fn is_on_convex_hull(&self, v: VertexId) -> bool {
        self.dt
            .vertex(v)
            .out_edges()
            .any(|e| e.face().as_inner().is_none())
    }

    pub fn point_at(&self, v: VertexId) -> Point3D {
        *self.dt.vertex(v).data()
    }

    pub fn triangle_points(&self, tri: &Triangle) -> [Point3D; 3] {
        tri.0.map(|v| self.point_at(v))
    }

    /// (minx, miny, maxx, maxy) of all vertices
    pub fn bounding_box(&self) -> Option<(f64, f64, f64, f64)> {
        let mut vertices = self.dt.vertices().map(|v| *v.data());
        let first = vertices.next()?;

        Some(vertices.fold(
            (first.x, first.y, first.x, first.y),
            |(minx, miny, maxx, maxy), p| {
                (minx.min(p.x), miny.min(p.y), maxx.max(p.x), maxy.max(p.y))
            },
        ))
    }

    pub fn points(&self) -> impl Iterator<Item = Point3D> + '_ {
        self.dt.vertices().map(|v| *v.data())
    }

    pub fn num_vertices(&self) -> usize {
        self.dt.num_vertices()
    }

    pub fn num_triangles(&self) -> usize {
        self.dt.num_inner_faces()
    }

    fn triangle(face: FaceHandle<'_, InnerTag, Point3D, (), (), ()>) -> Triangle {
        Triangle(face.vertices().map(|v| v.fix()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Tin {
        Tin::from_points(vec![
            Point3D::new(0., 0., 0.),
            Point3D::new(10., 0., 1.),
            Point3D::new(10., 10., 2.),
            Point3D::new(0., 10., 3.),
        ])
        .unwrap()
    }

    #[test]
    fn test_locate() {
        let tin = square();
        assert_eq!(tin.num_vertices(), 4);
        assert_eq!(tin.num_triangles(), 2);

        match tin.locate(2., 3.) {
            Location::Found(tri) => {
                for p in tin.triangle_points(&tri) {
                    assert!(p.x == 0. || p.x == 10.);
                }
            }
            Location::NotFound => panic!("point inside the square was not located"),
        }

        // on a hull edge, and on a vertex
        assert!(matches!(tin.locate(5., 0.), Location::Found(_)));
        assert!(matches!(tin.locate(10., 10.), Location::Found(_)));

        assert_eq!(tin.locate(11., 5.), Location::NotFound);
        assert_eq!(Tin::new().locate(1., 1.), Location::NotFound);
    }

    #[test]
    fn test_closest_vertex_and_hull() {
        let mut tin = square();
        let center = tin.insert_one(5., 5., 9.).unwrap();

        let closest = tin.closest_vertex(12., 11.).unwrap();
        assert_eq!(tin.point_at(closest), Point3D::new(10., 10., 2.));

        let hull = tin.convex_hull_vertices();
        assert_eq!(hull.len(), 4);
        assert!(!hull.contains(&center));
        assert!(!tin.is_on_convex_hull(center));
        assert!(tin.is_on_convex_hull(closest));

        assert_eq!(tin.incident_triangles(center).len(), 4);
        assert_eq!(tin.vertex_at(5., 5.), Some(center));
        assert_eq!(tin.vertex_at(5., 5.5), None);

        assert_eq!(tin.remove(center), Point3D::new(5., 5., 9.));
        assert_eq!(tin.num_vertices(), 4);
        assert_eq!(tin.bounding_box(), Some((0., 0., 10., 10.)));

        tin.insert(&[Point3D::new(2., 8., 0.), Point3D::new(-4., 5., 0.)])
            .unwrap();
        assert_eq!(tin.num_vertices(), 6);
        assert_eq!(tin.bounding_box(), Some((-4., 0., 10., 10.)));
        assert!(tin.insert(&[Point3D::new(f64::NAN, 1., 0.)]).is_err());
    }
}
