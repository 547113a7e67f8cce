use std::path::PathBuf;

use anyhow::Context;
use beam_loader::prelude::*;
use clap::Parser;
use env_logger::Env;
use fea_solver::analysis::AnalysisOptions;
use fea_solver::model::FEModel;

#[derive(Parser)]
#[command(name = "beam-loader")]
#[command(about = "Load a beam description file, analyze it and print reactions and deflections", long_about = None)]
#[command(version)]
struct Cli {
    /// Beam description file
    #[arg(value_hint = clap::ValueHint::FilePath)]
    file: PathBuf,

    /// File layout: 1, 2 or 3 (overrides the config file)
    #[arg(short, long)]
    schema: Option<SchemaVersion>,

    /// JSON configuration file with "loader" and "build" sections
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Fail when a support location is given twice
    #[arg(long)]
    reject_duplicate_supports: bool,

    /// Add the EN 1990 combinations LC1..LC5 over cases D, L and W
    #[arg(long)]
    eurocode: bool,

    /// Print the parsed beam record as JSON and exit
    #[arg(long)]
    json: bool,

    /// Log pipeline progress
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_path(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    if let Some(schema) = cli.schema {
        config.loader.schema = schema;
    }
    if cli.reject_duplicate_supports {
        config.loader.duplicate_supports = DuplicateSupportPolicy::Reject;
    }
    if cli.eurocode {
        config.build.factored_combinations.extend(eurocode_0());
    }

    let record = load_beam(&cli.file, &config.loader)
        .with_context(|| format!("Failed to load beam from {}", cli.file.display()))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    let mut model: FEModel =
        build_model(&record, &config.build).context("Failed to build the analysis model")?;
    model
        .analyze(AnalysisOptions::linear().with_logging())
        .context("Analysis failed")?;

    println!("=== {} ===", record.name());
    println!(
        "L = {}, E = {}, Iz = {}, {} support(s), {} load(s)\n",
        record.attributes().length,
        record.attributes().e,
        record.attributes().iz,
        record.supports().len(),
        record.loads().len()
    );

    for combo in model.combo_names() {
        println!("--- {} ---", combo);

        println!("Reactions:");
        for support in record.supports().iter() {
            let Some(node) = record.nodes().id_at(support.location) else {
                continue;
            };
            let rxn = model.node_reactions(node, &combo)?;
            println!(
                "  {:>4} ({}) x = {:<10} Fx = {:>14.4} Fy = {:>14.4} Mz = {:>14.4}",
                node, support.kind, support.location, rxn.fx, rxn.fy, rxn.mz
            );
        }

        println!("Deflections:");
        for node in record.nodes().iter() {
            let disp = model.node_displacement(&node.id, &combo)?;
            println!(
                "  {:>4} x = {:<10} dy = {:>14.6e} rz = {:>14.6e}",
                node.id, node.x, disp.dy, disp.rz
            );
        }

        let summary = model.summary(&combo)?;
        println!(
            "Sum of Fy reactions = {:.4}, max |M| = {:.4}\n",
            summary.total_reaction_fy, summary.max_moment
        );
    }

    Ok(())
}
