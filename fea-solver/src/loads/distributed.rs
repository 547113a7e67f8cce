//! Distributed loads on members

use serde::{Deserialize, Serialize};
use super::point_load::LoadDirection;

/// A linearly varying distributed (line) load on a member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributedLoad {
    /// Start magnitude (at start position)
    pub w1: f64,
    /// End magnitude (at end position)
    pub w2: f64,
    /// Start position (distance from i-node)
    pub x1: f64,
    /// End position (distance from i-node)
    pub x2: f64,
    /// Load direction
    pub direction: LoadDirection,
    /// Load case
    pub case: String,
}

impl DistributedLoad {
    /// Create a new distributed load
    pub fn new(w1: f64, w2: f64, x1: f64, x2: f64, direction: LoadDirection, case: &str) -> Self {
        Self {
            w1,
            w2,
            x1,
            x2,
            direction,
            case: case.to_string(),
        }
    }

    /// Uniform load between two stations
    pub fn uniform(w: f64, x1: f64, x2: f64, direction: LoadDirection, case: &str) -> Self {
        Self::new(w, w, x1, x2, direction, case)
    }

    /// Check if the load is uniform (constant magnitude)
    pub fn is_uniform(&self) -> bool {
        (self.w1 - self.w2).abs() < 1e-10
    }

    /// Intensity at station `x`, interpolated between the load's end points
    pub fn intensity_at(&self, x: f64) -> f64 {
        let span = self.x2 - self.x1;
        if span.abs() < 1e-12 {
            return self.w1;
        }
        self.w1 + (self.w2 - self.w1) * (x - self.x1) / span
    }

    /// Get the total force from this load
    pub fn total_force(&self) -> f64 {
        (self.w1 + self.w2) / 2.0 * (self.x2 - self.x1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangular_load() {
        let load = DistributedLoad::new(0.0, 10.0, 2.0, 6.0, LoadDirection::Fy, "Snow");
        assert!(!load.is_uniform());
        assert!((load.intensity_at(4.0) - 5.0).abs() < 1e-12);
        assert!((load.total_force() - 20.0).abs() < 1e-12);
    }
}
