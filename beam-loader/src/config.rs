//! Pipeline configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LoaderError, LoaderResult};
use crate::schema::SchemaVersion;
use crate::supports::DuplicateSupportPolicy;

/// Options for reading and parsing a beam file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Row layout of the input
    pub schema: SchemaVersion,
    /// Handling of repeated support locations
    pub duplicate_supports: DuplicateSupportPolicy,
    /// Value of omitted optional attributes (Iy, A, J, nu, rho)
    pub default_attribute: f64,
    /// Load case for formats without case tags
    pub default_case: String,
    /// Beam name for formats without a name line
    pub default_name: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            schema: SchemaVersion::default(),
            duplicate_supports: DuplicateSupportPolicy::default(),
            default_attribute: 1.0,
            default_case: "Case 1".to_string(),
            default_name: "Beam".to_string(),
        }
    }
}

impl LoaderConfig {
    pub fn with_schema(mut self, schema: SchemaVersion) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_duplicate_supports(mut self, policy: DuplicateSupportPolicy) -> Self {
        self.duplicate_supports = policy;
        self
    }

    pub fn with_default_attribute(mut self, value: f64) -> Self {
        self.default_attribute = value;
        self
    }

    pub fn with_default_case(mut self, case: &str) -> Self {
        self.default_case = case.to_string();
        self
    }

    pub fn with_default_name(mut self, name: &str) -> Self {
        self.default_name = name.to_string();
        self
    }
}

/// A named combination of load cases with their factors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactoredCombination {
    pub name: String,
    pub factors: Vec<(String, f64)>,
}

impl FactoredCombination {
    pub fn new(name: &str, factors: &[(&str, f64)]) -> Self {
        Self {
            name: name.to_string(),
            factors: factors.iter().map(|(c, f)| (c.to_string(), *f)).collect(),
        }
    }

    /// Factor applied to `case`, zero when the case is not part of the combination
    pub fn factor(&self, case: &str) -> f64 {
        self.factors
            .iter()
            .find(|(c, _)| c == case)
            .map(|(_, f)| *f)
            .unwrap_or(0.0)
    }
}

/// Ultimate limit state combinations of EN 1990 over dead (`D`),
/// live (`L`) and wind (`W`) cases
pub fn eurocode_0() -> Vec<FactoredCombination> {
    vec![
        FactoredCombination::new("LC1", &[("D", 1.35)]),
        FactoredCombination::new("LC2", &[("D", 1.35), ("L", 1.5)]),
        FactoredCombination::new("LC3", &[("D", 1.35), ("L", 1.05), ("W", 1.5)]),
        FactoredCombination::new("LC4", &[("D", 1.35), ("L", 1.5), ("W", 0.9)]),
        FactoredCombination::new("LC5", &[("D", 1.0), ("W", 1.5)]),
    ]
}

/// Options for turning a beam record into an analysis model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub material_name: String,
    pub member_name: String,
    /// Hold DZ, RX and RY at pins and rollers
    pub restrain_out_of_plane: bool,
    /// Registered after the one-per-case combinations
    pub factored_combinations: Vec<FactoredCombination>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            material_name: "default".to_string(),
            member_name: "M0".to_string(),
            restrain_out_of_plane: true,
            factored_combinations: Vec::new(),
        }
    }
}

impl BuildConfig {
    pub fn with_material_name(mut self, name: &str) -> Self {
        self.material_name = name.to_string();
        self
    }

    pub fn with_member_name(mut self, name: &str) -> Self {
        self.member_name = name.to_string();
        self
    }

    pub fn with_out_of_plane_restraints(mut self, restrain: bool) -> Self {
        self.restrain_out_of_plane = restrain;
        self
    }

    pub fn with_factored_combinations(mut self, combos: Vec<FactoredCombination>) -> Self {
        self.factored_combinations = combos;
        self
    }
}

/// Both configuration halves, as stored in a JSON config file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub loader: LoaderConfig,
    pub build: BuildConfig,
}

impl PipelineConfig {
    pub fn from_json(text: &str) -> LoaderResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> LoaderResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoaderConfig::default();
        assert_eq!(config.schema, SchemaVersion::V3);
        assert_eq!(config.duplicate_supports, DuplicateSupportPolicy::LastWriteWins);
        assert_eq!(config.default_attribute, 1.0);
        assert_eq!(config.default_case, "Case 1");

        let build = BuildConfig::default();
        assert!(build.restrain_out_of_plane);
        assert!(build.factored_combinations.is_empty());
    }

    #[test]
    fn test_eurocode_table() {
        let table = eurocode_0();
        let names: Vec<&str> = table.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["LC1", "LC2", "LC3", "LC4", "LC5"]);
        assert_eq!(table[2].factor("L"), 1.05);
        assert_eq!(table[4].factor("L"), 0.0);
    }

    #[test]
    fn test_partial_json_config() {
        let config = PipelineConfig::from_json(
            r#"{"loader": {"schema": "2", "duplicate_supports": "Reject"},
                "build": {"restrain_out_of_plane": false}}"#,
        )
        .unwrap();

        assert_eq!(config.loader.schema, SchemaVersion::V2);
        assert_eq!(config.loader.duplicate_supports, DuplicateSupportPolicy::Reject);
        assert_eq!(config.loader.default_case, "Case 1");
        assert!(!config.build.restrain_out_of_plane);
        assert_eq!(config.build.member_name, "M0");
    }

    #[test]
    fn test_bad_json_config() {
        let err = PipelineConfig::from_json("{\"loader\": 3}").unwrap_err();
        assert!(matches!(err, LoaderError::Config(_)));
    }
}
