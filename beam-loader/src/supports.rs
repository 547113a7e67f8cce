//! Support tokens: `<location>:<type>`

use std::fmt;
use std::str::FromStr;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::coerce::Field;
use crate::error::{LoaderError, LoaderResult};

/// Kind of point support
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SupportType {
    /// Restrains both in-plane translations
    #[serde(rename = "P")]
    Pinned,
    /// Restrains the transverse translation only
    #[serde(rename = "R")]
    Roller,
    /// Restrains all translations and rotations
    #[serde(rename = "F")]
    Fixed,
}

impl SupportType {
    pub fn code(self) -> &'static str {
        match self {
            SupportType::Pinned => "P",
            SupportType::Roller => "R",
            SupportType::Fixed => "F",
        }
    }

    /// Restraint flags `[DX, DY, DZ, RX, RY, RZ]` for a beam on global X
    /// bending in the XY plane.
    ///
    /// With `out_of_plane` set, pins and rollers also hold `DZ`, `RX` and
    /// `RY` so the planar beam stays stable in a 3D solver.
    pub fn restraints(self, out_of_plane: bool) -> [bool; 6] {
        let oop = out_of_plane;
        match self {
            SupportType::Pinned => [true, true, oop, oop, oop, false],
            SupportType::Roller => [false, true, oop, oop, oop, false],
            SupportType::Fixed => [true; 6],
        }
    }
}

impl fmt::Display for SupportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for SupportType {
    type Err = String;

    /// Case-sensitive: only `P`, `R` and `F` are accepted
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "P" => Ok(SupportType::Pinned),
            "R" => Ok(SupportType::Roller),
            "F" => Ok(SupportType::Fixed),
            other => Err(format!("unknown support type '{}' (expected P, R or F)", other)),
        }
    }
}

/// What to do when a support location is given twice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DuplicateSupportPolicy {
    /// The later entry replaces the earlier one in place
    #[default]
    LastWriteWins,
    /// Fail with `DuplicateSupport`
    Reject,
}

/// A support at a distance from the beam origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupportPoint {
    pub location: f64,
    #[serde(rename = "type")]
    pub kind: SupportType,
}

/// Supports keyed by location, in first-insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Supports {
    points: Vec<SupportPoint>,
}

impl Supports {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a support, applying `policy` when the location already exists
    pub fn insert(
        &mut self,
        location: f64,
        kind: SupportType,
        policy: DuplicateSupportPolicy,
        line: u64,
    ) -> LoaderResult<()> {
        match self.points.iter_mut().find(|p| p.location == location) {
            Some(existing) => match policy {
                DuplicateSupportPolicy::Reject => Err(LoaderError::DuplicateSupport { line, location }),
                DuplicateSupportPolicy::LastWriteWins => {
                    warn!(
                        "line {}: support at {} redefined ({} -> {})",
                        line, location, existing.kind, kind
                    );
                    existing.kind = kind;
                    Ok(())
                }
            },
            None => {
                self.points.push(SupportPoint { location, kind });
                Ok(())
            }
        }
    }

    /// Support type at exactly `location`
    pub fn get(&self, location: f64) -> Option<SupportType> {
        self.points
            .iter()
            .find(|p| p.location == location)
            .map(|p| p.kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SupportPoint> {
        self.points.iter()
    }

    pub fn locations(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.location)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Serialize back to `<location>:<type>` tokens
    pub fn to_tokens(&self) -> Vec<String> {
        self.points
            .iter()
            .map(|p| format!("{}:{}", p.location, p.kind))
            .collect()
    }
}

/// Parse a single `<location>:<type>` token
pub fn parse_support_token(token: &str, line: u64) -> LoaderResult<SupportPoint> {
    let (location, code) = token
        .split_once(':')
        .ok_or_else(|| LoaderError::format(line, token, "expected '<location>:<type>'"))?;

    let location = Field::coerce(location)
        .as_f64()
        .ok_or_else(|| LoaderError::format(line, token, "support location is not a number"))?
        + 0.0;

    let kind = code
        .trim()
        .parse::<SupportType>()
        .map_err(|reason| LoaderError::format(line, token, reason))?;

    Ok(SupportPoint { location, kind })
}

/// Parse a row of support tokens
pub fn parse_supports<S: AsRef<str>>(
    tokens: &[S],
    line: u64,
    policy: DuplicateSupportPolicy,
) -> LoaderResult<Supports> {
    let mut supports = Supports::new();
    for token in tokens {
        let point = parse_support_token(token.as_ref(), line)?;
        supports.insert(point.location, point.kind, policy, line)?;
    }
    debug!("Parsed {} support(s)", supports.len());
    Ok(supports)
}
