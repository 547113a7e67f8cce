//! Structural elements module

mod material;
mod member;
mod node;
mod section;
mod support;

pub use material::{shear_modulus, Material};
pub use member::{Member, Segment};
pub use node::Node;
pub(crate) use node::station_tolerance;
pub use section::Section;
pub use support::Support;
