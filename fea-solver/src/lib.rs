//! FEA Solver - A native Rust frame analysis library
//!
//! This library provides a 3D frame analysis engine inspired by PyNite,
//! supporting:
//! - Frame elements (beams, columns) with 6 DOF per node
//! - Member point loads and linearly varying distributed loads
//! - Automatic member subdivision at intermediate nodes
//! - Load combinations and linear static analysis
//!
//! ## Example
//! ```rust
//! use fea_solver::prelude::*;
//!
//! let mut model = FEModel::new();
//!
//! // Add material
//! model.add_material("Steel", Material::new(200e9, 77e9, 0.3, 7850.0)).unwrap();
//!
//! // Add section
//! model.add_section("W12x26", Section::new(7.65e-3, 204e-6, 17.3e-6, 0.3e-6)).unwrap();
//!
//! // Add nodes
//! model.add_node("N1", Node::new(0.0, 0.0, 0.0)).unwrap();
//! model.add_node("N2", Node::new(10.0, 0.0, 0.0)).unwrap();
//!
//! // Add member
//! model.add_member("M1", Member::new("N1", "N2", "Steel", "W12x26")).unwrap();
//!
//! // Add supports
//! model.add_support("N1", Support::fixed()).unwrap();
//!
//! // Add loads
//! model.add_member_point_load("M1", PointLoad::new(-10000.0, 10.0, LoadDirection::Fy, "Dead")).unwrap();
//! model.add_load_combo(LoadCombination::single("Dead", "Dead")).unwrap();
//!
//! // Analyze
//! model.analyze_linear().unwrap();
//!
//! // Get results
//! let displacement = model.node_displacement("N2", "Dead").unwrap();
//! assert!(displacement.dy < 0.0);
//! ```

pub mod analysis;
pub mod elements;
pub mod error;
pub mod loads;
pub mod math;
pub mod model;
pub mod results;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::AnalysisOptions;
    pub use crate::elements::{Material, Member, Node, Section, Support};
    pub use crate::error::{FEAError, FEAResult};
    pub use crate::loads::{DistributedLoad, LoadCombination, LoadDirection, PointLoad};
    pub use crate::model::FEModel;
    pub use crate::results::{AnalysisSummary, MemberForces, NodeDisplacement, Reactions};
}
