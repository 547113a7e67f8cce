//! Versioned beam file layouts

use std::fmt;
use std::str::FromStr;

use fea_solver::loads::LoadDirection;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::attributes::{numeric_values, BeamAttributes, REQUIRED_ATTRIBUTES};
use crate::coerce::Field;
use crate::config::LoaderConfig;
use crate::error::{LoaderError, LoaderResult};
use crate::loads::{parse_loads, LoadRecord};
use crate::reader::RawRow;
use crate::record::BeamDescription;
use crate::supports::{parse_supports, SupportType, Supports};

/// Layout of a beam file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemaVersion {
    /// Unnamed beam, bare support locations, UDL rows
    #[serde(rename = "v1", alias = "1", alias = "V1")]
    V1,
    /// Named beam, bare support locations, `w,x1,x2` rows
    #[serde(rename = "v2", alias = "2", alias = "V2")]
    V2,
    /// Named beam, typed supports, tagged load rows
    #[default]
    #[serde(rename = "v3", alias = "3", alias = "V3")]
    V3,
}

impl FromStr for SchemaVersion {
    type Err = LoaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "v1" => Ok(SchemaVersion::V1),
            "2" | "v2" => Ok(SchemaVersion::V2),
            "3" | "v3" => Ok(SchemaVersion::V3),
            _ => Err(LoaderError::UnsupportedSchema(s.to_string())),
        }
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaVersion::V1 => f.write_str("v1"),
            SchemaVersion::V2 => f.write_str("v2"),
            SchemaVersion::V3 => f.write_str("v3"),
        }
    }
}

/// Named beam data of the older layouts, keyed as in the input vocabulary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedBeamData {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "L")]
    pub length: f64,
    #[serde(rename = "E")]
    pub e: f64,
    #[serde(rename = "Iz")]
    pub iz: f64,
    #[serde(rename = "Supports")]
    pub supports: Vec<f64>,
    /// `[w, x1, x2]` uniform loads
    #[serde(rename = "Loads")]
    pub loads: Vec<[f64; 3]>,
}

impl NamedBeamData {
    /// Expand into a beam description. The last support is pinned and
    /// the others are rollers; every load is a uniform `Fy` load under
    /// the default case.
    pub fn into_description(self, config: &LoaderConfig) -> LoaderResult<BeamDescription> {
        let attributes =
            BeamAttributes::from_values(&[self.length, self.e, self.iz], config.default_attribute)?;

        let mut supports = Supports::new();
        let last = self.supports.len().saturating_sub(1);
        for (i, location) in self.supports.into_iter().enumerate() {
            let kind = if i == last {
                SupportType::Pinned
            } else {
                SupportType::Roller
            };
            supports.insert(location, kind, config.duplicate_supports, 0)?;
        }

        let loads = self
            .loads
            .into_iter()
            .map(|[w, x1, x2]| LoadRecord::uniform(LoadDirection::Fy, w, x1, x2, &config.default_case))
            .collect();

        Ok(BeamDescription {
            name: self.name,
            attributes,
            supports,
            loads,
        })
    }
}

/// Parse rows into a beam description using the configured layout
pub fn parse_description(rows: &[RawRow], config: &LoaderConfig) -> LoaderResult<BeamDescription> {
    debug!("Parsing {} row(s) as schema {}", rows.len(), config.schema);
    match config.schema {
        SchemaVersion::V1 => parse_v1(rows, config)?.into_description(config),
        SchemaVersion::V2 => parse_v2(rows, config)?.into_description(config),
        SchemaVersion::V3 => parse_v3(rows, config),
    }
}

fn section<'a>(rows: &'a [RawRow], index: usize, name: &'static str) -> LoaderResult<&'a RawRow> {
    rows.get(index).ok_or(LoaderError::MissingSection { section: name })
}

/// `L,E,Iz` of the older layouts
fn required_attributes(row: &RawRow) -> LoaderResult<[f64; 3]> {
    let values = numeric_values(row)?;
    let attributes = BeamAttributes::from_values(&values, 1.0)?;
    if values.len() > REQUIRED_ATTRIBUTES {
        warn!(
            "line {}: only L, E and Iz are read in this layout; {} extra value(s) ignored",
            row.line,
            values.len() - REQUIRED_ATTRIBUTES
        );
    }
    Ok([attributes.length, attributes.e, attributes.iz])
}

fn support_locations(row: &RawRow) -> LoaderResult<Vec<f64>> {
    row.fields
        .iter()
        .map(|token| Field::coerce(token).require_numeric(row.line, "support location"))
        .collect()
}

/// A `w,x1,x2` row, or a bare `w` spanning the whole beam when `full_span` is given
fn uniform_load(row: &RawRow, full_span: Option<f64>) -> LoaderResult<[f64; 3]> {
    let values = numeric_values_named(row, &["w", "x1", "x2"])?;
    match (values.as_slice(), full_span) {
        ([w], Some(length)) => Ok([*w, 0.0, length]),
        ([w, x1, x2], _) => Ok([*w, *x1, *x2]),
        (_, Some(_)) => Err(LoaderError::format(
            row.line,
            &row.fields.join(","),
            "load row takes 'w' or 'w,x1,x2'",
        )),
        (_, None) => Err(LoaderError::format(
            row.line,
            &row.fields.join(","),
            "load row takes 'w,x1,x2'",
        )),
    }
}

fn numeric_values_named(row: &RawRow, names: &[&str]) -> LoaderResult<Vec<f64>> {
    row.fields
        .iter()
        .enumerate()
        .map(|(i, token)| {
            let name = names.get(i).copied().unwrap_or("value");
            Field::coerce(token).require_numeric(row.line, name)
        })
        .collect()
}

/// Unnamed layout: attributes, support locations, then `w` or `w,x1,x2` rows
pub fn parse_v1(rows: &[RawRow], config: &LoaderConfig) -> LoaderResult<NamedBeamData> {
    let [length, e, iz] = required_attributes(section(rows, 0, "attributes")?)?;
    let supports = support_locations(section(rows, 1, "supports")?)?;
    let loads = rows[2..]
        .iter()
        .map(|row| uniform_load(row, Some(length)))
        .collect::<LoaderResult<Vec<_>>>()?;

    Ok(NamedBeamData {
        name: config.default_name.clone(),
        length,
        e,
        iz,
        supports,
        loads,
    })
}

/// Named layout: name, attributes, support locations, then `w,x1,x2` rows
pub fn parse_v2(rows: &[RawRow], _config: &LoaderConfig) -> LoaderResult<NamedBeamData> {
    let name = beam_name(section(rows, 0, "name")?);
    let [length, e, iz] = required_attributes(section(rows, 1, "attributes")?)?;
    let supports = support_locations(section(rows, 2, "supports")?)?;
    let loads = rows[3..]
        .iter()
        .map(|row| uniform_load(row, None))
        .collect::<LoaderResult<Vec<_>>>()?;

    Ok(NamedBeamData {
        name,
        length,
        e,
        iz,
        supports,
        loads,
    })
}

/// Tagged layout: name, attributes, typed supports, then POINT/DIST rows
pub fn parse_v3(rows: &[RawRow], config: &LoaderConfig) -> LoaderResult<BeamDescription> {
    let name = beam_name(section(rows, 0, "name")?);
    let attributes = BeamAttributes::parse_row(section(rows, 1, "attributes")?, config.default_attribute)?;
    let support_row = section(rows, 2, "supports")?;
    let supports = parse_supports(&support_row.fields, support_row.line, config.duplicate_supports)?;
    let loads = parse_loads(&rows[3..])?;

    Ok(BeamDescription {
        name,
        attributes,
        supports,
        loads,
    })
}

fn beam_name(row: &RawRow) -> String {
    if row.fields.len() > 1 {
        warn!("line {}: beam name has extra fields; using the first", row.line);
    }
    row.fields.first().cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read_str;

    #[test]
    fn test_version_strings() {
        assert_eq!("1".parse::<SchemaVersion>().unwrap(), SchemaVersion::V1);
        assert_eq!("V2".parse::<SchemaVersion>().unwrap(), SchemaVersion::V2);
        assert_eq!(" v3 ".parse::<SchemaVersion>().unwrap(), SchemaVersion::V3);
        for bad in ["4", "v0", "latest", ""] {
            assert!(matches!(
                bad.parse::<SchemaVersion>(),
                Err(LoaderError::UnsupportedSchema(_))
            ));
        }
    }

    #[test]
    fn test_v2_named_data() {
        let rows = read_str(
            "Roof beam\n4800, 19200, 1e9\n0, 3000, 4800\n-100, 500, 4800\n-200, 3600, 4800\n",
        )
        .unwrap();
        let data = parse_v2(&rows, &LoaderConfig::default()).unwrap();

        let expected = serde_json::json!({
            "Name": "Roof beam",
            "L": 4800.0,
            "E": 19200.0,
            "Iz": 1e9,
            "Supports": [0.0, 3000.0, 4800.0],
            "Loads": [[-100.0, 500.0, 4800.0], [-200.0, 3600.0, 4800.0]],
        });
        assert_eq!(serde_json::to_value(&data).unwrap(), expected);
    }

    #[test]
    fn test_v2_description_support_types() {
        let rows = read_str("B\n4800,19200,1e9\n0,3000,4800\n-100,500,4800\n").unwrap();
        let config = LoaderConfig::default().with_schema(SchemaVersion::V2);
        let desc = parse_description(&rows, &config).unwrap();

        assert_eq!(desc.supports.to_tokens(), vec!["0:R", "3000:R", "4800:P"]);
        assert_eq!(
            desc.loads,
            vec![LoadRecord::uniform(LoadDirection::Fy, -100.0, 500.0, 4800.0, "Case 1")]
        );
    }

    #[test]
    fn test_v1_full_span_load() {
        let rows = read_str("4800, 200000, 437000000\n0, 3000\n-10\n").unwrap();
        let config = LoaderConfig::default().with_schema(SchemaVersion::V1);
        let desc = parse_description(&rows, &config).unwrap();

        assert_eq!(desc.name, "Beam");
        assert_eq!(desc.attributes.iz, 437e6);
        assert_eq!(desc.supports.get(3000.0), Some(SupportType::Pinned));
        assert_eq!(desc.supports.get(0.0), Some(SupportType::Roller));
        assert_eq!(desc.loads[0].extent(), (0.0, 4800.0));
    }

    #[test]
    fn test_v3_description() {
        let text = "\
# tagged layout
Roof beam
4800, 200000, 437e6
0:P, 4800:R
POINT:Fy, -1000, 2400, case:Live
DIST:Fy, -5, -5, 0, 4800, case:Dead
";
        let desc = parse_description(&read_str(text).unwrap(), &LoaderConfig::default()).unwrap();

        assert_eq!(desc.name, "Roof beam");
        assert_eq!(desc.supports.len(), 2);
        assert_eq!(desc.loads.len(), 2);
        assert_eq!(desc.loads[0].case(), "Live");
    }

    #[test]
    fn test_missing_sections() {
        let rows = read_str("Roof beam\n4800, 200000, 437e6\n").unwrap();
        let err = parse_v3(&rows, &LoaderConfig::default()).unwrap_err();
        assert!(matches!(err, LoaderError::MissingSection { section: "supports" }));

        let err = parse_v1(&[], &LoaderConfig::default()).unwrap_err();
        assert!(matches!(err, LoaderError::MissingSection { section: "attributes" }));
    }

    #[test]
    fn test_v2_rejects_short_load_rows() {
        let rows = read_str("B\n4800,19200,1e9\n0,4800\n-100\n").unwrap();
        let err = parse_v2(&rows, &LoaderConfig::default()).unwrap_err();
        assert!(matches!(err, LoaderError::Format { .. }));
    }
}
