pub mod natural_neighbor;
#[allow(clippy::module_inception)]
pub mod tin;

pub use self::natural_neighbor::interpolate;
pub use self::tin::{Location, Tin, Triangle, VertexId};
