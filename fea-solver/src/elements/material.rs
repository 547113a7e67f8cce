//! Material properties

use serde::{Deserialize, Serialize};

/// Isotropic material properties for structural analysis.
///
/// Units are whatever the model is built in; the solver never converts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    /// Modulus of elasticity
    pub e: f64,
    /// Shear modulus
    pub g: f64,
    /// Poisson's ratio
    pub nu: f64,
    /// Density
    pub rho: f64,
}

impl Material {
    /// Create a new material with given properties
    pub fn new(e: f64, g: f64, nu: f64, rho: f64) -> Self {
        Self { e, g, nu, rho }
    }

    /// Create an isotropic material from E and nu.
    /// G is calculated as E / (2 * (1 + nu))
    pub fn isotropic(e: f64, nu: f64, rho: f64) -> Self {
        Self::new(e, shear_modulus(e, nu), nu, rho)
    }

    /// Structural steel in SI base units (Pa, kg/m³)
    pub fn steel() -> Self {
        Self::isotropic(200e9, 0.3, 7850.0)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::steel()
    }
}

/// Shear modulus of an isotropic material
pub fn shear_modulus(e: f64, nu: f64) -> f64 {
    e / (2.0 * (1.0 + nu))
}
