//! Node element - a point in 3D space

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Geometric tolerance used when checking whether a node lies on a member
pub(crate) const ON_AXIS_TOLERANCE: f64 = 1e-9;

/// A 3D node in the finite element model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub x: f64,
    pub y: f64,
    pub z: f64,

    /// Internal ID assigned during analysis
    #[serde(skip)]
    pub(crate) id: Option<usize>,

    /// Displacement results by load combination [DX, DY, DZ, RX, RY, RZ]
    #[serde(skip)]
    pub(crate) displacements: HashMap<String, [f64; 6]>,

    /// Reaction results by load combination [FX, FY, FZ, MX, MY, MZ]
    #[serde(skip)]
    pub(crate) reactions: HashMap<String, [f64; 6]>,
}

impl Node {
    /// Create a new node at the given coordinates
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            id: None,
            displacements: HashMap::new(),
            reactions: HashMap::new(),
        }
    }

    pub fn coords(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Calculate distance to another node
    pub fn distance_to(&self, other: &Node) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Distance of this node along the line from `start` towards `end`.
    ///
    /// Returns `None` when the node is off the line or outside the closed
    /// interval between the two end nodes. Stations within
    /// `station_tolerance` of an end are snapped onto it.
    pub fn station_between(&self, start: &Node, end: &Node) -> Option<f64> {
        let length = start.distance_to(end);
        if length < ON_AXIS_TOLERANCE {
            return None;
        }
        let axis = [
            (end.x - start.x) / length,
            (end.y - start.y) / length,
            (end.z - start.z) / length,
        ];
        let rel = [self.x - start.x, self.y - start.y, self.z - start.z];
        let station = rel[0] * axis[0] + rel[1] * axis[1] + rel[2] * axis[2];

        let off_axis = [
            rel[0] - station * axis[0],
            rel[1] - station * axis[1],
            rel[2] - station * axis[2],
        ];
        let off = (off_axis[0].powi(2) + off_axis[1].powi(2) + off_axis[2].powi(2)).sqrt();

        let tol = station_tolerance(length);
        if off > tol || station < -tol || station > length + tol {
            return None;
        }
        Some(station.clamp(0.0, length))
    }
}

/// Smallest separation along a member of the given length at which two
/// stations count as distinct
pub(crate) fn station_tolerance(length: f64) -> f64 {
    ON_AXIS_TOLERANCE * length.max(1.0)
}

impl Default for Node {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}
