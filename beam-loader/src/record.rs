//! Canonical beam records

use log::debug;
use serde::{Deserialize, Serialize};

use crate::attributes::BeamAttributes;
use crate::error::{LoaderError, LoaderResult};
use crate::loads::{case_names, LoadRecord};
use crate::supports::Supports;
use crate::topology::NodeTopology;

/// A parsed beam before node synthesis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamDescription {
    pub name: String,
    pub attributes: BeamAttributes,
    pub supports: Supports,
    pub loads: Vec<LoadRecord>,
}

/// A complete beam: description plus node topology. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamRecord {
    name: String,
    attributes: BeamAttributes,
    supports: Supports,
    loads: Vec<LoadRecord>,
    nodes: NodeTopology,
}

impl BeamRecord {
    /// Check supports and loads against the beam length and synthesize nodes
    pub fn from_description(description: BeamDescription) -> LoaderResult<Self> {
        let BeamDescription {
            name,
            attributes,
            supports,
            loads,
        } = description;
        let length = attributes.length;
        let outside = |x: f64| !(0.0..=length).contains(&x);

        if let Some(support) = supports.iter().find(|s| outside(s.location)) {
            return Err(LoaderError::SupportOutOfRange {
                location: support.location,
                length,
            });
        }

        for (index, load) in loads.iter().enumerate() {
            let (start, end) = load.extent();
            if let Some(location) = [start, end].into_iter().find(|&x| outside(x)) {
                return Err(LoaderError::LoadOutOfRange {
                    index,
                    kind: load.kind().to_string(),
                    location,
                    length,
                });
            }
            if end < start {
                return Err(LoaderError::InvalidLoad {
                    index,
                    reason: format!("distributed load ends at {} before it starts at {}", end, start),
                });
            }
        }

        let nodes = NodeTopology::synthesize(supports.locations(), length);
        debug!(
            "Beam '{}': {} node(s), {} support(s), {} load(s)",
            name,
            nodes.len(),
            supports.len(),
            loads.len()
        );

        Ok(Self {
            name,
            attributes,
            supports,
            loads,
            nodes,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &BeamAttributes {
        &self.attributes
    }

    pub fn supports(&self) -> &Supports {
        &self.supports
    }

    pub fn loads(&self) -> &[LoadRecord] {
        &self.loads
    }

    pub fn nodes(&self) -> &NodeTopology {
        &self.nodes
    }

    /// Distinct load cases in first-encounter order
    pub fn cases(&self) -> Vec<String> {
        case_names(&self.loads)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::supports::{parse_supports, DuplicateSupportPolicy};
    use fea_solver::loads::LoadDirection;

    fn description(supports: &[&str], loads: Vec<LoadRecord>) -> BeamDescription {
        BeamDescription {
            name: "B1".to_string(),
            attributes: BeamAttributes::from_values(&[10000.0, 200000.0, 1e8], 1.0).unwrap(),
            supports: parse_supports(supports, 3, DuplicateSupportPolicy::default()).unwrap(),
            loads,
        }
    }

    #[test]
    fn test_record_has_topology() {
        let desc = description(
            &["1000:P", "4000:R", "8000:R"],
            vec![LoadRecord::uniform(LoadDirection::Fy, -1.0, 0.0, 10000.0, "Dead")],
        );
        let record = BeamRecord::from_description(desc).unwrap();

        assert_eq!(record.nodes().len(), 5);
        assert_eq!(record.nodes().id_at(8000.0), Some("N3"));
        assert_eq!(record.cases(), vec!["Dead"]);
    }

    #[test]
    fn test_support_outside_beam() {
        let desc = description(&["0:P", "10500:R"], vec![]);
        let err = BeamRecord::from_description(desc).unwrap_err();
        assert!(matches!(err, LoaderError::SupportOutOfRange { location, .. } if location == 10500.0));
    }

    #[test]
    fn test_load_outside_beam() {
        let point = LoadRecord::Point {
            direction: LoadDirection::Fy,
            magnitude: -1.0,
            location: -5.0,
            case: "Live".to_string(),
        };
        let desc = description(&["0:P", "10000:R"], vec![point]);
        let err = BeamRecord::from_description(desc).unwrap_err();
        assert!(matches!(err, LoaderError::LoadOutOfRange { index: 0, ref kind, .. } if kind == "Point"));
    }

    #[test]
    fn test_reversed_distributed_load() {
        let load = LoadRecord::uniform(LoadDirection::Fy, -1.0, 6000.0, 2000.0, "Dead");
        let desc = description(&["0:P", "10000:R"], vec![load]);
        assert!(matches!(
            BeamRecord::from_description(desc),
            Err(LoaderError::InvalidLoad { index: 0, .. })
        ));
    }
}
