//! FE Model - Main structural model container

use std::collections::HashMap;
use std::iter;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisOptions;
use crate::elements::{station_tolerance, Material, Member, Node, Section, Segment, Support};
use crate::error::{FEAError, FEAResult};
use crate::loads::{DistributedLoad, LoadCombination, PointLoad};
use crate::math::{self, Mat, Mat12, Vec as FEVec, Vec12};
use crate::results::{AnalysisSummary, MemberForces, NodeDisplacement, Reactions};

/// Tolerance on load stations falling just outside a member
const STATION_TOLERANCE: f64 = 1e-9;

fn duplicate(kind: &'static str, name: &str) -> FEAError {
    FEAError::DuplicateName {
        kind,
        name: name.to_string(),
    }
}

/// The main 3D finite element model
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FEModel {
    /// Nodes in the model
    pub nodes: HashMap<String, Node>,
    /// Materials in the model
    pub materials: HashMap<String, Material>,
    /// Sections in the model
    pub sections: HashMap<String, Section>,
    /// Members (frame elements) in the model
    pub members: HashMap<String, Member>,
    /// Support conditions at nodes
    pub supports: HashMap<String, Support>,
    /// Member point loads
    pub member_point_loads: HashMap<String, Vec<PointLoad>>,
    /// Member distributed loads
    pub member_dist_loads: HashMap<String, Vec<DistributedLoad>>,
    /// Load combinations
    pub load_combos: HashMap<String, LoadCombination>,

    /// Whether results are current
    #[serde(skip)]
    analyzed: bool,
}

impl FEModel {
    /// Create a new empty model
    pub fn new() -> Self {
        Self::default()
    }

    // ========================
    // Model Building Methods
    // ========================

    /// Add a node to the model
    pub fn add_node(&mut self, name: &str, node: Node) -> FEAResult<()> {
        if self.nodes.contains_key(name) {
            return Err(duplicate("Node", name));
        }
        self.nodes.insert(name.to_string(), node);
        self.analyzed = false;
        Ok(())
    }

    /// Add a material to the model
    pub fn add_material(&mut self, name: &str, material: Material) -> FEAResult<()> {
        if self.materials.contains_key(name) {
            return Err(duplicate("Material", name));
        }
        self.materials.insert(name.to_string(), material);
        Ok(())
    }

    /// Add a section to the model
    pub fn add_section(&mut self, name: &str, section: Section) -> FEAResult<()> {
        if self.sections.contains_key(name) {
            return Err(duplicate("Section", name));
        }
        self.sections.insert(name.to_string(), section);
        Ok(())
    }

    /// Add a member to the model
    pub fn add_member(&mut self, name: &str, member: Member) -> FEAResult<()> {
        if !self.nodes.contains_key(&member.i_node) {
            return Err(FEAError::NodeNotFound(member.i_node.clone()));
        }
        if !self.nodes.contains_key(&member.j_node) {
            return Err(FEAError::NodeNotFound(member.j_node.clone()));
        }
        if !self.materials.contains_key(&member.material) {
            return Err(FEAError::MaterialNotFound(member.material.clone()));
        }
        if !self.sections.contains_key(&member.section) {
            return Err(FEAError::SectionNotFound(member.section.clone()));
        }
        if self.members.contains_key(name) {
            return Err(duplicate("Member", name));
        }

        self.members.insert(name.to_string(), member);
        self.analyzed = false;
        Ok(())
    }

    /// Add (or replace) the support condition of a node
    pub fn add_support(&mut self, node_name: &str, support: Support) -> FEAResult<()> {
        if !self.nodes.contains_key(node_name) {
            return Err(FEAError::NodeNotFound(node_name.to_string()));
        }
        self.supports.insert(node_name.to_string(), support);
        self.analyzed = false;
        Ok(())
    }

    /// Add a point load to a member
    pub fn add_member_point_load(&mut self, member_name: &str, load: PointLoad) -> FEAResult<()> {
        if !self.members.contains_key(member_name) {
            return Err(FEAError::MemberNotFound(member_name.to_string()));
        }
        self.member_point_loads
            .entry(member_name.to_string())
            .or_default()
            .push(load);
        self.analyzed = false;
        Ok(())
    }

    /// Add a distributed load to a member
    pub fn add_member_dist_load(&mut self, member_name: &str, load: DistributedLoad) -> FEAResult<()> {
        if !self.members.contains_key(member_name) {
            return Err(FEAError::MemberNotFound(member_name.to_string()));
        }
        if load.x2 < load.x1 {
            return Err(FEAError::ReversedLoad {
                member: member_name.to_string(),
                x1: load.x1,
                x2: load.x2,
            });
        }
        self.member_dist_loads
            .entry(member_name.to_string())
            .or_default()
            .push(load);
        self.analyzed = false;
        Ok(())
    }

    /// Add a load combination
    pub fn add_load_combo(&mut self, combo: LoadCombination) -> FEAResult<()> {
        let name = combo.name.clone();
        if self.load_combos.contains_key(&name) {
            return Err(FEAError::DuplicateName {
                kind: "Load combination",
                name,
            });
        }
        self.load_combos.insert(name, combo);
        self.analyzed = false;
        Ok(())
    }

    // ========================
    // Analysis Methods
    // ========================

    /// Run linear static analysis
    pub fn analyze_linear(&mut self) -> FEAResult<()> {
        self.analyze(AnalysisOptions::linear())
    }

    /// Run analysis with custom options
    pub fn analyze(&mut self, options: AnalysisOptions) -> FEAResult<()> {
        // Ensure at least one load combination exists
        if self.load_combos.is_empty() {
            let combo = LoadCombination::default();
            self.load_combos.insert(combo.name.clone(), combo);
        }

        self.prepare_model()?;

        let k_global = self.build_global_stiffness()?;
        let (free_dofs, restrained_dofs) = self.partition_dofs();
        if free_dofs.is_empty() {
            return Err(FEAError::NoFreeDofs);
        }

        let n_free = free_dofs.len();
        let k11 = Mat::from_fn(n_free, n_free, |i, j| k_global[(free_dofs[i], free_dofs[j])]);

        if options.check_stability {
            let pivot = math::min_pivot_ratio(&k11);
            if pivot < options.pivot_tolerance {
                return Err(FEAError::Unstable {
                    pivot,
                    tolerance: options.pivot_tolerance,
                });
            }
        }

        let mut combo_names: Vec<String> = self
            .load_combos
            .keys()
            .filter(|name| options.includes(name))
            .cloned()
            .collect();
        combo_names.sort();

        for combo_name in &combo_names {
            let combo = self
                .load_combos
                .get(combo_name)
                .cloned()
                .ok_or_else(|| FEAError::LoadCombinationNotFound(combo_name.clone()))?;

            // Equivalent nodal loads are the negated fixed end reactions
            let fer_global = self.build_fer_vector(&combo)?;
            let p1 = FEVec::from_fn(n_free, |i, _| -fer_global[free_dofs[i]]);

            let d1 = math::solve_linear_system(&k11, &p1).ok_or_else(|| FEAError::SingularMatrix(combo_name.clone()))?;

            let mut d_full = FEVec::zeros(k_global.nrows());
            for (i, &dof) in free_dofs.iter().enumerate() {
                d_full[dof] = d1[i];
            }

            self.store_displacements(combo_name, &d_full);

            // Support reactions: R = K * D + FER at restrained DOFs
            let forces = &k_global * &d_full + &fer_global;
            self.store_reactions(combo_name, &forces, &restrained_dofs);

            self.calculate_segment_forces(&combo, &d_full)?;

            if options.log {
                info!("Analyzed load combination '{}'", combo_name);
            } else {
                debug!("Analyzed load combination '{}'", combo_name);
            }
        }

        self.analyzed = true;
        Ok(())
    }

    /// Assign node IDs, compute member lengths and subdivide members at
    /// intermediate nodes
    fn prepare_model(&mut self) -> FEAResult<()> {
        let mut ordered: Vec<(&String, &mut Node)> = self.nodes.iter_mut().collect();
        ordered.sort_by(|a, b| a.0.cmp(b.0));
        for (i, (_, node)) in ordered.into_iter().enumerate() {
            node.id = Some(i);
            node.displacements.clear();
            node.reactions.clear();
        }

        for (member_name, member) in self.members.iter_mut() {
            let i_node = self
                .nodes
                .get(&member.i_node)
                .ok_or_else(|| FEAError::NodeNotFound(member.i_node.clone()))?;
            let j_node = self
                .nodes
                .get(&member.j_node)
                .ok_or_else(|| FEAError::NodeNotFound(member.j_node.clone()))?;
            let length = i_node.distance_to(j_node);

            if length < 1e-10 {
                return Err(FEAError::ZeroLengthMember(member_name.clone()));
            }

            // Nodes on the member axis, end nodes included, so that a node
            // sitting on top of an end is reported rather than left hanging
            let mut stations: Vec<(f64, String)> = self
                .nodes
                .iter()
                .filter(|(name, _)| **name != member.i_node && **name != member.j_node)
                .filter_map(|(name, node)| {
                    node.station_between(i_node, j_node)
                        .map(|x| (x, name.clone()))
                })
                .collect();
            stations.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

            let tol = station_tolerance(length);
            let mut segments = Vec::with_capacity(stations.len() + 1);
            let mut start = (0.0, member.i_node.clone());
            for (x, name) in stations.into_iter().chain(iter::once((length, member.j_node.clone()))) {
                if x - start.0 <= tol {
                    return Err(FEAError::CoincidentNodes {
                        member: member_name.clone(),
                        first: start.1,
                        second: name,
                    });
                }
                segments.push(Segment {
                    i_node: start.1.clone(),
                    j_node: name.clone(),
                    x_start: start.0,
                    x_end: x,
                });
                start = (x, name);
            }

            debug!(
                "Member '{}' (L = {}) split into {} segment(s)",
                member_name,
                length,
                segments.len()
            );

            member.length = Some(length);
            member.segments = segments;
            member.segment_forces.clear();
        }

        self.check_load_stations()
    }

    /// Reject member loads positioned outside their member
    fn check_load_stations(&self) -> FEAResult<()> {
        for (member_name, member) in &self.members {
            let length = member.length.unwrap_or(0.0);
            let outside = |x: f64| x < -STATION_TOLERANCE || x > length + STATION_TOLERANCE;

            for load in self.member_point_loads.get(member_name).into_iter().flatten() {
                if outside(load.position) {
                    return Err(FEAError::LoadOutsideMember {
                        member: member_name.clone(),
                        reason: format!("point load at {} on a member of length {}", load.position, length),
                    });
                }
            }
            for load in self.member_dist_loads.get(member_name).into_iter().flatten() {
                if outside(load.x1) || outside(load.x2) {
                    return Err(FEAError::LoadOutsideMember {
                        member: member_name.clone(),
                        reason: format!(
                            "distributed load from {} to {} on a member of length {}",
                            load.x1, load.x2, length
                        ),
                    });
                }
            }
        }
        Ok(())
    }

    /// First global DOF index of a node
    fn node_dof(&self, node_name: &str) -> FEAResult<usize> {
        self.nodes
            .get(node_name)
            .and_then(|node| node.id)
            .map(|id| id * 6)
            .ok_or_else(|| FEAError::NodeNotFound(node_name.to_string()))
    }

    /// The 12 global DOF indices of a segment, i-end first
    fn segment_dofs(&self, segment: &Segment) -> FEAResult<[usize; 12]> {
        let i_dof = self.node_dof(&segment.i_node)?;
        let j_dof = self.node_dof(&segment.j_node)?;
        let mut dofs = [0; 12];
        for (a, dof) in dofs.iter_mut().enumerate() {
            *dof = if a < 6 { i_dof + a } else { j_dof + a - 6 };
        }
        Ok(dofs)
    }

    fn member_transformation(&self, member: &Member) -> FEAResult<Mat12> {
        let i_node = self
            .nodes
            .get(&member.i_node)
            .ok_or_else(|| FEAError::NodeNotFound(member.i_node.clone()))?;
        let j_node = self
            .nodes
            .get(&member.j_node)
            .ok_or_else(|| FEAError::NodeNotFound(member.j_node.clone()))?;
        Ok(math::member_transformation_matrix(&i_node.coords(), &j_node.coords()))
    }

    fn segment_stiffness(&self, member: &Member, segment: &Segment) -> FEAResult<Mat12> {
        let material = self
            .materials
            .get(&member.material)
            .ok_or_else(|| FEAError::MaterialNotFound(member.material.clone()))?;
        let section = self
            .sections
            .get(&member.section)
            .ok_or_else(|| FEAError::SectionNotFound(member.section.clone()))?;

        Ok(math::member_local_stiffness(
            material.e,
            material.g,
            section.a,
            section.iy,
            section.iz,
            section.j,
            segment.length(),
        ))
    }

    /// Build the global stiffness matrix
    fn build_global_stiffness(&self) -> FEAResult<Mat> {
        let n_dofs = self.nodes.len() * 6;
        let mut k_global = Mat::zeros(n_dofs, n_dofs);

        for member in self.members.values() {
            let t = self.member_transformation(member)?;

            for segment in &member.segments {
                let k_local = self.segment_stiffness(member, segment)?;
                // K_global = T^T * K_local * T
                let k_segment = t.transpose() * k_local * t;
                let dofs = self.segment_dofs(segment)?;

                for (a, &row) in dofs.iter().enumerate() {
                    for (b, &col) in dofs.iter().enumerate() {
                        k_global[(row, col)] += k_segment[(a, b)];
                    }
                }
            }
        }

        Ok(k_global)
    }

    /// Local fixed end reactions of every segment of a member for one combination
    fn segment_fers(
        &self,
        member_name: &str,
        member: &Member,
        combo: &LoadCombination,
    ) -> FEAResult<Vec<Vec12>> {
        let mut fers = vec![Vec12::zeros(); member.segments.len()];

        for load in self.member_point_loads.get(member_name).into_iter().flatten() {
            let factor = combo.factor(&load.case);
            if factor.abs() < 1e-10 {
                continue;
            }
            let position = load.position.clamp(0.0, member.length.unwrap_or(f64::INFINITY));
            let idx = member.segment_at(position).ok_or_else(|| FEAError::LoadOutsideMember {
                member: member_name.to_string(),
                reason: format!("no segment holds station {}", load.position),
            })?;
            let segment = &member.segments[idx];
            fers[idx] += math::fer_point_load(
                factor * load.magnitude,
                position - segment.x_start,
                segment.length(),
                load.direction.dof_index(),
            );
        }

        for load in self.member_dist_loads.get(member_name).into_iter().flatten() {
            let factor = combo.factor(&load.case);
            if factor.abs() < 1e-10 {
                continue;
            }
            for (idx, segment) in member.segments.iter().enumerate() {
                let start = load.x1.max(segment.x_start);
                let end = load.x2.min(segment.x_end);
                if end - start <= 1e-12 {
                    continue;
                }
                fers[idx] += math::fer_linear_load(
                    factor * load.intensity_at(start),
                    factor * load.intensity_at(end),
                    start - segment.x_start,
                    end - segment.x_start,
                    segment.length(),
                    load.direction.dof_index(),
                );
            }
        }

        Ok(fers)
    }

    /// Assemble the global fixed end reaction vector for a load combination
    fn build_fer_vector(&self, combo: &LoadCombination) -> FEAResult<FEVec> {
        let mut fer_global = FEVec::zeros(self.nodes.len() * 6);

        for (member_name, member) in &self.members {
            let t = self.member_transformation(member)?;
            let fers = self.segment_fers(member_name, member, combo)?;

            for (segment, fer_local) in member.segments.iter().zip(fers) {
                let fer = t.transpose() * fer_local;
                for (a, dof) in self.segment_dofs(segment)?.into_iter().enumerate() {
                    fer_global[dof] += fer[a];
                }
            }
        }

        Ok(fer_global)
    }

    /// Split global DOFs into free and restrained sets, ordered by node ID
    fn partition_dofs(&self) -> (Vec<usize>, Vec<usize>) {
        let mut free_dofs = Vec::new();
        let mut restrained_dofs = Vec::new();

        let mut ordered: Vec<(&String, &Node)> = self.nodes.iter().collect();
        ordered.sort_by_key(|(_, node)| node.id);

        for (name, node) in ordered {
            let Some(id) = node.id else { continue };
            let flags = self
                .supports
                .get(name)
                .map(Support::as_array)
                .unwrap_or([false; 6]);
            for (i, restrained) in flags.into_iter().enumerate() {
                if restrained {
                    restrained_dofs.push(id * 6 + i);
                } else {
                    free_dofs.push(id * 6 + i);
                }
            }
        }

        (free_dofs, restrained_dofs)
    }

    fn store_displacements(&mut self, combo_name: &str, d_full: &FEVec) {
        for node in self.nodes.values_mut() {
            if let Some(id) = node.id {
                let base = id * 6;
                let mut disp = [0.0; 6];
                for (i, value) in disp.iter_mut().enumerate() {
                    *value = d_full[base + i];
                }
                node.displacements.insert(combo_name.to_string(), disp);
            }
        }
    }

    /// Store reactions on supported nodes, masked to restrained DOFs
    fn store_reactions(&mut self, combo_name: &str, forces: &FEVec, restrained_dofs: &[usize]) {
        for (name, node) in self.nodes.iter_mut() {
            let (Some(id), Some(support)) = (node.id, self.supports.get(name)) else {
                continue;
            };
            if !support.is_supported() {
                continue;
            }
            let base = id * 6;
            let mut reactions = [0.0; 6];
            for (i, value) in reactions.iter_mut().enumerate() {
                if restrained_dofs.contains(&(base + i)) {
                    *value = forces[base + i];
                }
            }
            node.reactions.insert(combo_name.to_string(), reactions);
        }
    }

    /// Calculate segment end forces from displacements
    ///
    /// The total segment forces are:
    ///   F_total = K_local * d_local + FER
    ///
    /// where FER accounts for loads applied between the segment's nodes.
    fn calculate_segment_forces(&mut self, combo: &LoadCombination, d_full: &FEVec) -> FEAResult<()> {
        let mut all_forces: Vec<(String, Vec<[f64; 12]>)> = Vec::with_capacity(self.members.len());

        for (member_name, member) in &self.members {
            let t = self.member_transformation(member)?;
            let fers = self.segment_fers(member_name, member, combo)?;
            let mut member_forces = Vec::with_capacity(member.segments.len());

            for (segment, fer) in member.segments.iter().zip(fers) {
                let dofs = self.segment_dofs(segment)?;
                let d_global = Vec12::from_fn(|a, _| d_full[dofs[a]]);
                let d_local = t * d_global;
                let k_local = self.segment_stiffness(member, segment)?;
                let f_local = k_local * d_local + fer;

                let mut forces = [0.0; 12];
                forces.copy_from_slice(f_local.as_slice());
                member_forces.push(forces);
            }

            all_forces.push((member_name.clone(), member_forces));
        }

        for (member_name, forces) in all_forces {
            if let Some(member) = self.members.get_mut(&member_name) {
                member.segment_forces.insert(combo.name.clone(), forces);
            }
        }

        Ok(())
    }

    // ========================
    // Result Access Methods
    // ========================

    /// Get node displacement
    pub fn node_displacement(&self, node_name: &str, combo_name: &str) -> FEAResult<NodeDisplacement> {
        let node = self
            .nodes
            .get(node_name)
            .ok_or_else(|| FEAError::NodeNotFound(node_name.to_string()))?;

        let disp = node.displacements.get(combo_name).ok_or(FEAError::NotAnalyzed)?;

        Ok(NodeDisplacement::from_array(*disp))
    }

    /// Get node reactions (all zero for an unsupported node)
    pub fn node_reactions(&self, node_name: &str, combo_name: &str) -> FEAResult<Reactions> {
        let node = self
            .nodes
            .get(node_name)
            .ok_or_else(|| FEAError::NodeNotFound(node_name.to_string()))?;

        if !node.displacements.contains_key(combo_name) {
            return Err(FEAError::NotAnalyzed);
        }

        Ok(node
            .reactions
            .get(combo_name)
            .map(|rxn| Reactions::from_array(*rxn))
            .unwrap_or_default())
    }

    /// Get the end forces of every segment of a member, as (i-end, j-end) pairs
    pub fn member_segment_forces(
        &self,
        member_name: &str,
        combo_name: &str,
    ) -> FEAResult<Vec<(MemberForces, MemberForces)>> {
        let member = self
            .members
            .get(member_name)
            .ok_or_else(|| FEAError::MemberNotFound(member_name.to_string()))?;

        let forces = member.segment_forces(combo_name).ok_or(FEAError::NotAnalyzed)?;

        Ok(forces
            .iter()
            .map(|f| (MemberForces::from_i_node_forces(f), MemberForces::from_j_node_forces(f)))
            .collect())
    }

    /// Get analysis summary
    pub fn summary(&self, combo_name: &str) -> FEAResult<AnalysisSummary> {
        if !self.analyzed {
            return Err(FEAError::NotAnalyzed);
        }
        if !self.load_combos.contains_key(combo_name) {
            return Err(FEAError::LoadCombinationNotFound(combo_name.to_string()));
        }

        let restrained: usize = self.supports.values().map(Support::num_restrained).sum();
        let mut summary = AnalysisSummary {
            combo: combo_name.to_string(),
            num_nodes: self.nodes.len(),
            num_members: self.members.len(),
            num_segments: self.members.values().map(|m| m.segments.len()).sum(),
            total_dofs: self.nodes.len() * 6,
            free_dofs: self.nodes.len() * 6 - restrained,
            ..Default::default()
        };

        for (name, node) in &self.nodes {
            if let Some(disp) = node.displacements.get(combo_name) {
                let mag = NodeDisplacement::from_array(*disp).translation_magnitude();
                if mag > summary.max_displacement {
                    summary.max_displacement = mag;
                    summary.max_disp_node = name.clone();
                }
            }
            if let Some(rxn) = node.reactions.get(combo_name) {
                let reactions = Reactions::from_array(*rxn);
                summary.total_reaction_fy += reactions.fy;
                if reactions.force_magnitude() > summary.max_reaction {
                    summary.max_reaction = reactions.force_magnitude();
                    summary.max_reaction_node = name.clone();
                }
            }
        }

        for (name, member) in &self.members {
            if let Some(moment) = member.max_moment_z(combo_name) {
                if moment > summary.max_moment {
                    summary.max_moment = moment;
                    summary.max_moment_member = name.clone();
                }
            }
        }

        Ok(summary)
    }

    /// Check if model has been analyzed
    pub fn is_analyzed(&self) -> bool {
        self.analyzed
    }

    /// Get all load combination names, sorted
    pub fn combo_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.load_combos.keys().cloned().collect();
        names.sort();
        names
    }

    /// Get all load case names referenced by member loads, sorted
    pub fn load_cases(&self) -> Vec<String> {
        let point_cases = self.member_point_loads.values().flatten().map(|l| &l.case);
        let dist_cases = self.member_dist_loads.values().flatten().map(|l| &l.case);

        let mut cases: Vec<String> = point_cases.chain(dist_cases).cloned().collect();
        cases.sort();
        cases.dedup();
        cases
    }
}
