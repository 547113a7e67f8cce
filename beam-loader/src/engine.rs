//! The analysis engine seen by the model builder

use fea_solver::elements::{Material, Member, Node, Section, Support};
use fea_solver::error::FEAError;
use fea_solver::loads::{DistributedLoad, LoadCombination, LoadDirection, PointLoad};
use fea_solver::model::FEModel;
use serde::{Deserialize, Serialize};

/// Cross-section properties carried by a member
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionProperties {
    pub iy: f64,
    pub iz: f64,
    pub j: f64,
    pub a: f64,
}

/// Model construction calls a structural analysis engine must accept.
///
/// Creating an empty model is `Default::default()`; analysis and result
/// queries belong to the concrete engine.
pub trait AnalysisEngine {
    type Error: std::error::Error + Send + Sync + 'static;

    fn add_node(&mut self, name: &str, x: f64, y: f64, z: f64) -> Result<(), Self::Error>;

    /// Restraint flags `[DX, DY, DZ, RX, RY, RZ]`
    fn define_support(&mut self, node: &str, restraints: [bool; 6]) -> Result<(), Self::Error>;

    fn add_material(&mut self, name: &str, e: f64, g: f64, nu: f64, rho: f64) -> Result<(), Self::Error>;

    fn add_member(
        &mut self,
        name: &str,
        i_node: &str,
        j_node: &str,
        material: &str,
        section: SectionProperties,
    ) -> Result<(), Self::Error>;

    fn add_point_load(
        &mut self,
        member: &str,
        direction: LoadDirection,
        magnitude: f64,
        location: f64,
        case: &str,
    ) -> Result<(), Self::Error>;

    #[allow(clippy::too_many_arguments)]
    fn add_distributed_load(
        &mut self,
        member: &str,
        direction: LoadDirection,
        w1: f64,
        w2: f64,
        x1: f64,
        x2: f64,
        case: &str,
    ) -> Result<(), Self::Error>;

    fn add_load_combination(&mut self, name: &str, factors: &[(&str, f64)]) -> Result<(), Self::Error>;
}

impl AnalysisEngine for FEModel {
    type Error = FEAError;

    fn add_node(&mut self, name: &str, x: f64, y: f64, z: f64) -> Result<(), FEAError> {
        FEModel::add_node(self, name, Node::new(x, y, z))
    }

    fn define_support(&mut self, node: &str, restraints: [bool; 6]) -> Result<(), FEAError> {
        self.add_support(node, Support::from_flags(restraints))
    }

    fn add_material(&mut self, name: &str, e: f64, g: f64, nu: f64, rho: f64) -> Result<(), FEAError> {
        FEModel::add_material(self, name, Material::new(e, g, nu, rho))
    }

    /// The section is registered under the member's name
    fn add_member(
        &mut self,
        name: &str,
        i_node: &str,
        j_node: &str,
        material: &str,
        section: SectionProperties,
    ) -> Result<(), FEAError> {
        self.add_section(name, Section::new(section.a, section.iy, section.iz, section.j))?;
        FEModel::add_member(self, name, Member::new(i_node, j_node, material, name))
    }

    fn add_point_load(
        &mut self,
        member: &str,
        direction: LoadDirection,
        magnitude: f64,
        location: f64,
        case: &str,
    ) -> Result<(), FEAError> {
        self.add_member_point_load(member, PointLoad::new(magnitude, location, direction, case))
    }

    fn add_distributed_load(
        &mut self,
        member: &str,
        direction: LoadDirection,
        w1: f64,
        w2: f64,
        x1: f64,
        x2: f64,
        case: &str,
    ) -> Result<(), FEAError> {
        self.add_member_dist_load(member, DistributedLoad::new(w1, w2, x1, x2, direction, case))
    }

    fn add_load_combination(&mut self, name: &str, factors: &[(&str, f64)]) -> Result<(), FEAError> {
        let combo = factors
            .iter()
            .fold(LoadCombination::new(name), |combo, (case, factor)| combo.with_case(case, *factor));
        self.add_load_combo(combo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_gets_its_own_section() {
        let mut model = FEModel::new();
        AnalysisEngine::add_node(&mut model, "N0", 0.0, 0.0, 0.0).unwrap();
        AnalysisEngine::add_node(&mut model, "N1", 5.0, 0.0, 0.0).unwrap();
        AnalysisEngine::add_material(&mut model, "default", 200e9, 77e9, 0.3, 7850.0).unwrap();

        let section = SectionProperties {
            iy: 1.0,
            iz: 2e-4,
            j: 1.0,
            a: 0.01,
        };
        AnalysisEngine::add_member(&mut model, "M0", "N0", "N1", "default", section).unwrap();

        assert_eq!(model.sections["M0"].iz, 2e-4);
        assert_eq!(model.members["M0"].section, "M0");
    }

    #[test]
    fn test_engine_errors_pass_through() {
        let mut model = FEModel::new();
        let err = model.define_support("missing", [true; 6]).unwrap_err();
        assert!(matches!(err, FEAError::NodeNotFound(_)));

        let err = model
            .add_load_combination("Live", &[("Live", 1.0)])
            .and_then(|_| model.add_load_combination("Live", &[("Live", 1.0)]))
            .unwrap_err();
        assert!(matches!(err, FEAError::DuplicateName { .. }));
    }
}
