//! Point loads on members

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FEAError;

/// Direction of a member load, in the member's local axes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum LoadDirection {
    /// Force along the member (axial)
    Fx,
    /// Force in member's local y direction
    Fy,
    /// Force in member's local z direction
    Fz,
}

impl LoadDirection {
    /// Index of the matching translational DOF (0=x, 1=y, 2=z)
    pub fn dof_index(self) -> usize {
        match self {
            LoadDirection::Fx => 0,
            LoadDirection::Fy => 1,
            LoadDirection::Fz => 2,
        }
    }
}

impl fmt::Display for LoadDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LoadDirection::Fx => "Fx",
            LoadDirection::Fy => "Fy",
            LoadDirection::Fz => "Fz",
        };
        f.write_str(label)
    }
}

impl FromStr for LoadDirection {
    type Err = FEAError;

    /// Parses `Fx`/`Fy`/`Fz` in any letter case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fx" => Ok(LoadDirection::Fx),
            "fy" => Ok(LoadDirection::Fy),
            "fz" => Ok(LoadDirection::Fz),
            _ => Err(FEAError::UnknownDirection(s.to_string())),
        }
    }
}

/// A concentrated load on a member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointLoad {
    /// Load magnitude
    pub magnitude: f64,
    /// Distance from i-node
    pub position: f64,
    /// Load direction
    pub direction: LoadDirection,
    /// Load case
    pub case: String,
}

impl PointLoad {
    /// Create a new point load
    pub fn new(magnitude: f64, position: f64, direction: LoadDirection, case: &str) -> Self {
        Self {
            magnitude,
            position,
            direction,
            case: case.to_string(),
        }
    }

    /// Create a downward (negative local y) point load
    pub fn downward(magnitude: f64, position: f64, case: &str) -> Self {
        Self::new(-magnitude.abs(), position, LoadDirection::Fy, case)
    }
}
