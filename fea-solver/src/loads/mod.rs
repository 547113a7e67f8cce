//! Member loads and load combinations

mod distributed;
mod load_combo;
mod point_load;

pub use distributed::DistributedLoad;
pub use load_combo::LoadCombination;
pub use point_load::{LoadDirection, PointLoad};
