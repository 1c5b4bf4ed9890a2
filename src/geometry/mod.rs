pub mod extent;
pub mod point;
pub mod point_cloud;

pub use self::extent::{grid_steps, Extent};
pub use self::point::{circumcenter, has_three_non_collinear, Point3D};
pub use self::point_cloud::{GroundLabel, PointCloud, GROUND_CHANNEL};
