//! Beam Loader - beam description files to analyzable frame models
//!
//! A beam file names a single beam, its section and material attributes,
//! its point supports and its loads grouped into load cases. Loading runs
//! a fixed pipeline:
//! - rows are read with [`reader`] and coerced field by field with [`coerce`]
//! - [`schema`] dispatches on the file layout to the [`attributes`],
//!   [`supports`] and [`loads`] parsers
//! - [`record`] validates the result and synthesizes nodes with [`topology`]
//! - [`builder`] emits the model through the [`engine::AnalysisEngine`] trait
//!
//! ## Example
//! ```rust
//! use beam_loader::prelude::*;
//! use fea_solver::model::FEModel;
//!
//! let text = "\
//! Simple beam
//! 6000, 200000, 80e6
//! 0:P, 6000:R
//! POINT:Fy, -10000, 3000, case:Live
//! ";
//! let record = parse_beam(text, &LoaderConfig::default()).unwrap();
//! let mut model: FEModel = build_model(&record, &BuildConfig::default()).unwrap();
//! model.analyze_linear().unwrap();
//!
//! let left = model.node_reactions("N0", "Live").unwrap();
//! assert!((left.fy - 5000.0).abs() < 1e-6);
//! ```

use std::path::Path;

pub mod attributes;
pub mod builder;
pub mod coerce;
pub mod config;
pub mod engine;
pub mod error;
pub mod formulas;
pub mod loads;
pub mod reader;
pub mod record;
pub mod schema;
pub mod supports;
pub mod topology;

use crate::config::LoaderConfig;
use crate::error::LoaderResult;
use crate::reader::RawRow;
use crate::record::BeamRecord;

pub mod prelude {
    pub use crate::attributes::BeamAttributes;
    pub use crate::builder::{build_model, populate};
    pub use crate::coerce::Field;
    pub use crate::config::{eurocode_0, BuildConfig, FactoredCombination, LoaderConfig, PipelineConfig};
    pub use crate::engine::{AnalysisEngine, SectionProperties};
    pub use crate::error::{LoaderError, LoaderResult};
    pub use crate::loads::{LoadKind, LoadRecord};
    pub use crate::record::{BeamDescription, BeamRecord};
    pub use crate::schema::{NamedBeamData, SchemaVersion};
    pub use crate::supports::{DuplicateSupportPolicy, SupportType, Supports};
    pub use crate::topology::NodeTopology;
    pub use crate::{load_beam, parse_beam};
}

fn record_from_rows(rows: &[RawRow], config: &LoaderConfig) -> LoaderResult<BeamRecord> {
    let description = schema::parse_description(rows, config)?;
    BeamRecord::from_description(description)
}

/// Read and parse a beam file into a complete record
pub fn load_beam(path: impl AsRef<Path>, config: &LoaderConfig) -> LoaderResult<BeamRecord> {
    let rows = reader::read_path(path)?;
    record_from_rows(&rows, config)
}

/// Parse beam text into a complete record
pub fn parse_beam(text: &str, config: &LoaderConfig) -> LoaderResult<BeamRecord> {
    let rows = reader::read_str(text)?;
    record_from_rows(&rows, config)
}
