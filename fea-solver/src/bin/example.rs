//! FEA Solver Example - Two-span continuous beam

use fea_solver::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("=== FEA Solver Example: Continuous Beam ===\n");

    let mut model = FEModel::new();

    model.add_material("Steel", Material::steel())?;

    // 300 x 500 solid rectangle
    model.add_section("R300x500", Section::rectangular(0.3, 0.5))?;

    //   w = 10 kN/m over both spans, 25 kN at 2.5 m
    //  ====================================
    //  N1 --------------- N2 --------------- N3
    //  ^                  o                  o
    //  pin              roller             roller
    //  |<----- 5 m ----->|<----- 5 m ----->|
    let span = 5.0;

    model.add_node("N1", Node::new(0.0, 0.0, 0.0))?;
    model.add_node("N2", Node::new(span, 0.0, 0.0))?;
    model.add_node("N3", Node::new(2.0 * span, 0.0, 0.0))?;

    // One physical member; N2 splits it into two segments during analysis
    model.add_member("M1", Member::new("N1", "N3", "Steel", "R300x500"))?;

    model.add_support("N1", Support::from_flags([true, true, true, true, true, false]))?;
    model.add_support("N2", Support::from_flags([false, true, true, true, true, false]))?;
    model.add_support("N3", Support::from_flags([false, true, true, true, true, false]))?;

    model.add_member_dist_load(
        "M1",
        DistributedLoad::uniform(-10e3, 0.0, 2.0 * span, LoadDirection::Fy, "Dead"),
    )?;
    model.add_member_point_load("M1", PointLoad::downward(25e3, 2.5, "Live"))?;

    model.add_load_combo(LoadCombination::single("D", "Dead"))?;
    model.add_load_combo(
        LoadCombination::new("1.35D + 1.5L")
            .with_case("Dead", 1.35)
            .with_case("Live", 1.5),
    )?;

    model.analyze(AnalysisOptions::linear().with_logging())?;

    for combo in model.combo_names() {
        println!("--- {} ---", combo);

        println!("Support reactions:");
        for node in ["N1", "N2", "N3"] {
            let rxn = model.node_reactions(node, &combo)?;
            println!("  {}: Fy = {:>12.3} N", node, rxn.fy);
        }

        println!("Segment end moments (M1):");
        for (i, (fi, fj)) in model.member_segment_forces("M1", &combo)?.iter().enumerate() {
            println!(
                "  segment {}: Mz_i = {:>12.3} N·m, Mz_j = {:>12.3} N·m",
                i, fi.moment_z, fj.moment_z
            );
        }

        let summary = model.summary(&combo)?;
        println!(
            "Max displacement {:.6e} m at {}, total Fy = {:.3} N\n",
            summary.max_displacement, summary.max_disp_node, summary.total_reaction_fy
        );
    }

    Ok(())
}
