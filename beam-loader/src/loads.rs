//! Load rows: `POINT:<dir>,...,case:<label>` and `DIST:<dir>,...,case:<label>`

use std::fmt;

use fea_solver::loads::LoadDirection;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::coerce::Field;
use crate::error::{LoaderError, LoaderResult};
use crate::reader::RawRow;

/// The two load shapes a row can describe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadKind {
    Point,
    Dist,
}

impl LoadKind {
    /// Numeric fields between the type tag and the case tag
    pub fn field_names(self) -> &'static [&'static str] {
        match self {
            LoadKind::Point => &["magnitude", "location"],
            LoadKind::Dist => &["startMagnitude", "endMagnitude", "startLocation", "endLocation"],
        }
    }
}

impl fmt::Display for LoadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadKind::Point => f.write_str("Point"),
            LoadKind::Dist => f.write_str("Dist"),
        }
    }
}

/// One load applied to the beam under a named case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LoadRecord {
    Point {
        direction: LoadDirection,
        magnitude: f64,
        location: f64,
        case: String,
    },
    #[serde(rename = "Dist")]
    Distributed {
        direction: LoadDirection,
        #[serde(rename = "startMagnitude")]
        start_magnitude: f64,
        #[serde(rename = "endMagnitude")]
        end_magnitude: f64,
        #[serde(rename = "startLocation")]
        start_location: f64,
        #[serde(rename = "endLocation")]
        end_location: f64,
        case: String,
    },
}

impl LoadRecord {
    /// A full-intensity uniform load between two stations
    pub fn uniform(direction: LoadDirection, w: f64, x1: f64, x2: f64, case: &str) -> Self {
        LoadRecord::Distributed {
            direction,
            start_magnitude: w,
            end_magnitude: w,
            start_location: x1,
            end_location: x2,
            case: case.to_string(),
        }
    }

    pub fn kind(&self) -> LoadKind {
        match self {
            LoadRecord::Point { .. } => LoadKind::Point,
            LoadRecord::Distributed { .. } => LoadKind::Dist,
        }
    }

    pub fn case(&self) -> &str {
        match self {
            LoadRecord::Point { case, .. } | LoadRecord::Distributed { case, .. } => case,
        }
    }

    pub fn direction(&self) -> LoadDirection {
        match self {
            LoadRecord::Point { direction, .. } | LoadRecord::Distributed { direction, .. } => *direction,
        }
    }

    /// First and last station the load touches
    pub fn extent(&self) -> (f64, f64) {
        match self {
            LoadRecord::Point { location, .. } => (*location, *location),
            LoadRecord::Distributed {
                start_location,
                end_location,
                ..
            } => (*start_location, *end_location),
        }
    }

    /// Resultant force of the load
    pub fn total(&self) -> f64 {
        match self {
            LoadRecord::Point { magnitude, .. } => *magnitude,
            LoadRecord::Distributed {
                start_magnitude,
                end_magnitude,
                start_location,
                end_location,
                ..
            } => (start_magnitude + end_magnitude) / 2.0 * (end_location - start_location),
        }
    }
}

/// Parse a single load row
pub fn parse_load_row(row: &RawRow) -> LoaderResult<LoadRecord> {
    let line = row.line;
    let (tag, rest) = row
        .fields
        .split_first()
        .ok_or_else(|| LoaderError::format(line, "", "empty load row"))?;

    let (kind, direction) = tag
        .split_once(':')
        .ok_or_else(|| LoaderError::format(line, tag, "expected '<POINT|DIST>:<direction>'"))?;
    let kind = match kind.trim() {
        "POINT" => LoadKind::Point,
        "DIST" => LoadKind::Dist,
        other => {
            return Err(LoaderError::format(
                line,
                tag,
                format!("unknown load type '{}' (expected POINT or DIST)", other),
            ))
        }
    };
    let direction: LoadDirection = direction
        .trim()
        .parse()
        .map_err(|_| LoaderError::format(line, tag, "direction must be Fx, Fy or Fz"))?;

    let (case_tag, values) = rest
        .split_last()
        .ok_or_else(|| LoaderError::format(line, tag, "missing 'case:<label>' tag"))?;
    let case = match case_tag.split_once(':') {
        Some((key, label)) if key.trim() == "case" && !label.trim().is_empty() => label.trim().to_string(),
        _ => return Err(LoaderError::format(line, case_tag, "expected 'case:<label>' as the last field")),
    };

    let names = kind.field_names();
    if values.len() != names.len() {
        return Err(LoaderError::format(
            line,
            tag,
            format!(
                "{} load takes {} numeric field(s), found {}",
                kind,
                names.len(),
                values.len()
            ),
        ));
    }

    let numbers = values
        .iter()
        .zip(names)
        .map(|(token, name)| Field::coerce(token).require_numeric(line, name))
        .collect::<LoaderResult<Vec<f64>>>()?;

    let record = match kind {
        LoadKind::Point => LoadRecord::Point {
            direction,
            magnitude: numbers[0],
            location: numbers[1],
            case,
        },
        LoadKind::Dist => LoadRecord::Distributed {
            direction,
            start_magnitude: numbers[0],
            end_magnitude: numbers[1],
            start_location: numbers[2],
            end_location: numbers[3],
            case,
        },
    };
    Ok(record)
}

/// Parse load rows, keeping their order
pub fn parse_loads(rows: &[RawRow]) -> LoaderResult<Vec<LoadRecord>> {
    let loads = rows.iter().map(parse_load_row).collect::<LoaderResult<Vec<_>>>()?;
    debug!("Parsed {} load(s)", loads.len());
    Ok(loads)
}

/// Distinct case labels in first-encounter order
pub fn case_names(loads: &[LoadRecord]) -> Vec<String> {
    let mut cases: Vec<String> = Vec::new();
    for load in loads {
        if !cases.iter().any(|c| c == load.case()) {
            cases.push(load.case().to_string());
        }
    }
    cases
}
