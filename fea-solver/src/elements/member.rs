//! Member element - 3D frame element (beam/column)
//!
//! A member is a physical member: it spans from its i-node to its j-node and
//! is split during analysis into [`Segment`]s at every model node lying on its
//! axis. Loads are always positioned relative to the member's i-node.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One analysis sub-element of a member, between two consecutive nodes on it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub i_node: String,
    pub j_node: String,
    /// Start station measured from the member's i-node
    pub x_start: f64,
    /// End station measured from the member's i-node
    pub x_end: f64,
}

impl Segment {
    pub fn length(&self) -> f64 {
        self.x_end - self.x_start
    }

    /// Whether the station `x` falls inside this segment (ends inclusive)
    pub fn contains(&self, x: f64) -> bool {
        x >= self.x_start && x <= self.x_end
    }
}

/// A 3D frame member (beam or column)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// Name of the i-node (start)
    pub i_node: String,
    /// Name of the j-node (end)
    pub j_node: String,
    /// Name of the material
    pub material: String,
    /// Name of the section
    pub section: String,

    /// Calculated length
    #[serde(skip)]
    pub(crate) length: Option<f64>,

    /// Sub-elements produced by subdividing at intermediate nodes
    #[serde(skip)]
    pub(crate) segments: Vec<Segment>,

    /// Local end forces of every segment by load combination
    /// [Fx_i, Fy_i, Fz_i, Mx_i, My_i, Mz_i, Fx_j, Fy_j, Fz_j, Mx_j, My_j, Mz_j]
    #[serde(skip)]
    pub(crate) segment_forces: HashMap<String, Vec<[f64; 12]>>,
}

impl Member {
    /// Create a new member
    pub fn new(i_node: &str, j_node: &str, material: &str, section: &str) -> Self {
        Self {
            i_node: i_node.to_string(),
            j_node: j_node.to_string(),
            material: material.to_string(),
            section: section.to_string(),
            length: None,
            segments: Vec::new(),
            segment_forces: HashMap::new(),
        }
    }

    /// Get the member length (available after analysis)
    pub fn length(&self) -> Option<f64> {
        self.length
    }

    /// Sub-elements used by the last analysis
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Index of the segment holding station `x`; the first match wins at shared nodes
    pub(crate) fn segment_at(&self, x: f64) -> Option<usize> {
        self.segments.iter().position(|s| s.contains(x))
    }

    /// Local end forces of each segment for a combination
    pub fn segment_forces(&self, combo_name: &str) -> Option<&[[f64; 12]]> {
        self.segment_forces.get(combo_name).map(Vec::as_slice)
    }

    /// Maximum absolute bending moment about local z over all segment ends
    pub fn max_moment_z(&self, combo_name: &str) -> Option<f64> {
        let forces = self.segment_forces.get(combo_name)?;
        forces
            .iter()
            .map(|f| f[5].abs().max(f[11].abs()))
            .reduce(f64::max)
    }
}
