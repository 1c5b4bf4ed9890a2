pub mod classify_ground;
pub mod compute_dtm;
pub mod rasterize;
pub mod read_laz;
pub mod seed_tin;
pub mod write_laz;

pub use self::classify_ground::{classify, GroundFilter};
pub use self::compute_dtm::compute_dtm;
pub use self::rasterize::{rasterize, rasterize_multithread};
pub use self::read_laz::read_laz;
pub use self::seed_tin::{extract_seed_points, SeedGrid};
pub use self::write_laz::write_classified_laz;
