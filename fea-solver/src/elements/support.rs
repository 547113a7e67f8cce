//! Support conditions

use serde::{Deserialize, Serialize};

/// Support conditions at a node.
///
/// Each flag restrains one degree of freedom, in the order
/// `[DX, DY, DZ, RX, RY, RZ]` used throughout the solver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Support {
    pub dx: bool,
    pub dy: bool,
    pub dz: bool,
    pub rx: bool,
    pub ry: bool,
    pub rz: bool,
}

impl Support {
    /// Create a new support with no restraints
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a support from a `[DX, DY, DZ, RX, RY, RZ]` restraint array
    pub fn from_flags(flags: [bool; 6]) -> Self {
        Self {
            dx: flags[0],
            dy: flags[1],
            dz: flags[2],
            rx: flags[3],
            ry: flags[4],
            rz: flags[5],
        }
    }

    /// Fully fixed support (all DOFs restrained)
    pub fn fixed() -> Self {
        Self::from_flags([true; 6])
    }

    /// Pinned support (translations restrained, rotations free)
    pub fn pinned() -> Self {
        Self::from_flags([true, true, true, false, false, false])
    }

    /// Restraint flags as `[DX, DY, DZ, RX, RY, RZ]`
    pub fn as_array(&self) -> [bool; 6] {
        [self.dx, self.dy, self.dz, self.rx, self.ry, self.rz]
    }

    /// Indices (0-5) of restrained DOFs
    pub fn restrained_dofs(&self) -> Vec<usize> {
        self.as_array()
            .iter()
            .enumerate()
            .filter_map(|(i, &r)| r.then_some(i))
            .collect()
    }

    /// Check if any DOF is restrained
    pub fn is_supported(&self) -> bool {
        self.as_array().iter().any(|&r| r)
    }

    pub fn num_restrained(&self) -> usize {
        self.restrained_dofs().len()
    }
}
