//! Beam record to analysis model

use log::{debug, info, warn};

use crate::config::BuildConfig;
use crate::engine::{AnalysisEngine, SectionProperties};
use crate::error::{LoaderError, LoaderResult};
use crate::loads::LoadRecord;
use crate::record::BeamRecord;

/// Build a fresh engine model from a record. Nothing is returned on failure.
pub fn build_model<E>(record: &BeamRecord, config: &BuildConfig) -> LoaderResult<E>
where
    E: AnalysisEngine + Default,
{
    let mut engine = E::default();
    populate(&mut engine, record, config)?;
    Ok(engine)
}

/// Emit the construction calls for `record` against `engine`
pub fn populate<E: AnalysisEngine>(
    engine: &mut E,
    record: &BeamRecord,
    config: &BuildConfig,
) -> LoaderResult<()> {
    let nodes = record.nodes();
    for node in nodes.iter() {
        engine
            .add_node(&node.id, node.x, 0.0, 0.0)
            .map_err(|e| LoaderError::engine(format!("node {}", node.id), e))?;
    }

    for support in record.supports().iter() {
        let node = nodes
            .id_at(support.location)
            .ok_or(LoaderError::SupportOutOfRange {
                location: support.location,
                length: record.attributes().length,
            })?;
        engine
            .define_support(node, support.kind.restraints(config.restrain_out_of_plane))
            .map_err(|e| LoaderError::engine(format!("support at {}", node), e))?;
    }

    let attrs = record.attributes();
    engine
        .add_material(&config.material_name, attrs.e, attrs.shear_modulus(), attrs.nu, attrs.rho)
        .map_err(|e| LoaderError::engine(format!("material {}", config.material_name), e))?;

    let (first, last) = match (nodes.first(), nodes.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(LoaderError::MissingSection { section: "supports" }),
    };
    let section = SectionProperties {
        iy: attrs.iy,
        iz: attrs.iz,
        j: attrs.j,
        a: attrs.a,
    };
    let member = config.member_name.as_str();
    engine
        .add_member(member, &first.id, &last.id, &config.material_name, section)
        .map_err(|e| LoaderError::engine(format!("member {}", member), e))?;

    for (index, load) in record.loads().iter().enumerate() {
        let result = match load {
            LoadRecord::Point {
                direction,
                magnitude,
                location,
                case,
            } => engine.add_point_load(member, *direction, *magnitude, *location, case),
            LoadRecord::Distributed {
                direction,
                start_magnitude,
                end_magnitude,
                start_location,
                end_location,
                case,
            } => engine.add_distributed_load(
                member,
                *direction,
                *start_magnitude,
                *end_magnitude,
                *start_location,
                *end_location,
                case,
            ),
        };
        result.map_err(|e| LoaderError::engine(format!("load #{}", index), e))?;
    }

    let cases = record.cases();
    for case in &cases {
        engine
            .add_load_combination(case, &[(case.as_str(), 1.0)])
            .map_err(|e| LoaderError::engine(format!("load combination {}", case), e))?;
    }

    for combo in &config.factored_combinations {
        if cases.contains(&combo.name) {
            warn!(
                "Skipping factored combination '{}': a load case has the same name",
                combo.name
            );
            continue;
        }
        let factors: Vec<(&str, f64)> = combo.factors.iter().map(|(c, f)| (c.as_str(), *f)).collect();
        engine
            .add_load_combination(&combo.name, &factors)
            .map_err(|e| LoaderError::engine(format!("load combination {}", combo.name), e))?;
        debug!("Registered factored combination '{}'", combo.name);
    }

    info!(
        "Built beam '{}': {} node(s), {} support(s), {} load(s), {} case(s)",
        record.name(),
        nodes.len(),
        record.supports().len(),
        record.loads().len(),
        cases.len()
    );
    Ok(())
}
