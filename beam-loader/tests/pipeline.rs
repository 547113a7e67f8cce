use std::io::Write;

use approx::assert_relative_eq;
use beam_loader::formulas::ss_cantilever_reactions;
use beam_loader::prelude::*;
use fea_solver::model::FEModel;

fn analyze(text: &str, loader: &LoaderConfig, build: &BuildConfig) -> (BeamRecord, FEModel) {
    let record = parse_beam(text, loader).unwrap();
    let mut model: FEModel = build_model(&record, build).unwrap();
    model.analyze_linear().unwrap();
    (record, model)
}

fn fy(model: &FEModel, node: &str, combo: &str) -> f64 {
    model.node_reactions(node, combo).unwrap().fy
}

#[test]
fn midspan_point_load_on_pin_and_roller() {
    let text = "\
Simple span
8000, 200000, 300e6
0:P, 8000:R
POINT:Fy, -12000, 4000, case:Live
";
    let (record, model) = analyze(text, &LoaderConfig::default(), &BuildConfig::default());

    assert_eq!(record.nodes().len(), 2);
    let left = fy(&model, "N0", "Live");
    let right = fy(&model, "N1", "Live");
    assert_relative_eq!(left + right, 12000.0, max_relative = 1e-10);
    assert_relative_eq!(left, 6000.0, max_relative = 1e-10);

    // Midspan is not a node; the end rotation PL^2 / 16EI checks the stiffness
    let rz = model.node_displacement("N0", "Live").unwrap().rz;
    assert_relative_eq!(rz, -12000.0 * 8000.0_f64.powi(2) / (16.0 * 200000.0 * 300e6), max_relative = 1e-8);
}

#[test]
fn simple_span_with_cantilever_matches_closed_form() {
    // Roller at 0, pin at the end of the 4500 backspan, 2350 overhang
    let text = "SS cant\n6850, 200000, 1e9\n0, 4500\n50, 0, 6850\n";
    let loader = LoaderConfig::default().with_schema(SchemaVersion::V2);
    let (record, model) = analyze(text, &loader, &BuildConfig::default());

    assert_eq!(record.supports().get(4500.0), Some(SupportType::Pinned));
    assert_eq!(record.nodes().coordinates(), vec![0.0, 4500.0, 6850.0]);

    let (r1, r2) = ss_cantilever_reactions(50.0, 4500.0, 2350.0);
    assert_relative_eq!(fy(&model, "N1", "Case 1"), r1, max_relative = 1e-8);
    assert_relative_eq!(fy(&model, "N0", "Case 1"), r2, max_relative = 1e-8);
    assert_relative_eq!(fy(&model, "N2", "Case 1"), 0.0);
}

#[test]
fn continuous_beam_reaction_split() {
    let text = "\
Two spans
10000, 30000, 2e9
0:P, 5000:R, 10000:R
DIST:Fy, -8, -8, 0, 10000, case:Dead
";
    let (_, model) = analyze(text, &LoaderConfig::default(), &BuildConfig::default());

    let w_span = 8.0 * 5000.0;
    assert_relative_eq!(fy(&model, "N0", "Dead"), 3.0 / 8.0 * w_span, max_relative = 1e-8);
    assert_relative_eq!(fy(&model, "N1", "Dead"), 10.0 / 8.0 * w_span, max_relative = 1e-8);
    assert_relative_eq!(fy(&model, "N2", "Dead"), 3.0 / 8.0 * w_span, max_relative = 1e-8);
    assert_eq!(model.members["M0"].segments().len(), 2);
}

#[test]
fn fixed_support_cantilever() {
    let text = "\
Cantilever
2000, 200000, 50e6, 20e6, 5000, 1e6, 0.3, 7.85e-6
0:F
POINT:Fy, -1000, 2000, case:Live
";
    let (record, model) = analyze(text, &LoaderConfig::default(), &BuildConfig::default());

    assert_eq!(record.attributes().nu, 0.3);
    let rxn = model.node_reactions("N0", "Live").unwrap();
    assert_relative_eq!(rxn.fy, 1000.0, max_relative = 1e-10);
    assert_relative_eq!(rxn.mz, 2e6, max_relative = 1e-10);

    let tip = model.node_displacement("N1", "Live").unwrap();
    assert_relative_eq!(tip.dy, -1000.0 * 2000.0_f64.powi(3) / (3.0 * 200000.0 * 50e6), max_relative = 1e-8);
}

#[test]
fn two_cases_register_two_combinations() {
    let text = "\
Two cases
6000, 200000, 80e6
0:P, 6000:R
POINT:Fy, -5000, 2000, case:Live
DIST:Fy, -1, -1, 0, 6000, case:Dead
POINT:Fy, -5000, 4000, case:Live
";
    let record = parse_beam(text, &LoaderConfig::default()).unwrap();
    assert_eq!(record.cases(), vec!["Live", "Dead"]);

    let mut model: FEModel = build_model(&record, &BuildConfig::default()).unwrap();
    model.analyze_linear().unwrap();

    assert_eq!(model.combo_names(), vec!["Dead", "Live"]);
    assert_relative_eq!(model.summary("Live").unwrap().total_reaction_fy, 10000.0, max_relative = 1e-10);
    assert_relative_eq!(model.summary("Dead").unwrap().total_reaction_fy, 6000.0, max_relative = 1e-10);
}

#[test]
fn eurocode_combinations_are_analyzed() {
    let text = "\
Roof
6000, 200000, 80e6
0:P, 6000:R
DIST:Fy, -2, -2, 0, 6000, case:D
DIST:Fy, -3, -3, 0, 6000, case:L
";
    let build = BuildConfig::default().with_factored_combinations(eurocode_0());
    let (_, model) = analyze(text, &LoaderConfig::default(), &build);

    let lc2 = model.summary("LC2").unwrap().total_reaction_fy;
    assert_relative_eq!(lc2, (1.35 * 2.0 + 1.5 * 3.0) * 6000.0, max_relative = 1e-10);
    assert_eq!(model.combo_names().len(), 7);
}

#[test]
fn configured_names_and_defaults_reach_the_model() {
    let text = "4000, 10000, 5e8\n0, 4000\n-2\n";
    let loader = LoaderConfig::default()
        .with_schema(SchemaVersion::V1)
        .with_default_attribute(0.5)
        .with_default_case("Dead")
        .with_default_name("Purlin");
    let build = BuildConfig::default()
        .with_material_name("Timber")
        .with_member_name("B1");
    let (record, model) = analyze(text, &loader, &build);

    assert_eq!(record.name(), "Purlin");
    assert_eq!(record.attributes().nu, 0.5);
    assert_eq!(record.attributes().rho, 0.5);
    assert_eq!(record.cases(), vec!["Dead"]);

    assert!(model.materials.contains_key("Timber"));
    assert!(model.members.contains_key("B1"));
    assert_eq!(model.members["B1"].material, "Timber");
    assert_eq!(model.combo_names(), vec!["Dead"]);
    assert_relative_eq!(model.summary("Dead").unwrap().total_reaction_fy, 8000.0, max_relative = 1e-10);
}

#[test]
fn reads_beam_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "# roof beam, tagged layout\nRoof beam\n4800, 200000, 437e6\n0:P, 3000:R\n\nDIST:Fy, -10, -10, 0, 4800, case:Dead\n"
    )
    .unwrap();

    let record = load_beam(file.path(), &LoaderConfig::default()).unwrap();
    assert_eq!(record.name(), "Roof beam");
    assert_eq!(record.nodes().coordinates(), vec![0.0, 3000.0, 4800.0]);
    assert_eq!(record.loads().len(), 1);
}

#[test]
fn duplicate_support_policy() {
    let text = "B\n4800, 200000, 437e6\n0:P, 4800:R, 4800:F\n";

    let record = parse_beam(text, &LoaderConfig::default()).unwrap();
    assert_eq!(record.supports().get(4800.0), Some(SupportType::Fixed));
    assert_eq!(record.supports().len(), 2);

    let strict = LoaderConfig::default().with_duplicate_supports(DuplicateSupportPolicy::Reject);
    assert!(matches!(
        parse_beam(text, &strict),
        Err(LoaderError::DuplicateSupport { .. })
    ));
}

#[test]
fn unstable_beam_is_reported_by_the_engine() {
    // A single roller cannot hold the beam
    let text = "B\n4800, 200000, 437e6\n2400:R\nPOINT:Fy, -1, 1000, case:Live\n";
    let record = parse_beam(text, &LoaderConfig::default()).unwrap();
    let mut model: FEModel = build_model(&record, &BuildConfig::default()).unwrap();

    assert!(matches!(
        model.analyze_linear(),
        Err(fea_solver::error::FEAError::Unstable { .. })
    ));
}

#[test]
fn support_next_to_beam_end_is_reported_as_coincident() {
    let text = "B\n20000, 200000, 6480e6\n0:P, 0.00001:R, 20000:R\nPOINT:Fy, -1000, 10000, case:Live\n";
    let record = parse_beam(text, &LoaderConfig::default()).unwrap();
    assert_eq!(record.nodes().len(), 3);

    let mut model: FEModel = build_model(&record, &BuildConfig::default()).unwrap();
    assert!(matches!(
        model.analyze_linear(),
        Err(fea_solver::error::FEAError::CoincidentNodes { .. })
    ));
}

#[test]
fn out_of_range_input_is_rejected_before_building() {
    let support = "B\n4800, 200000, 437e6\n0:P, 5000:R\n";
    assert!(matches!(
        parse_beam(support, &LoaderConfig::default()),
        Err(LoaderError::SupportOutOfRange { .. })
    ));

    let load = "B\n4800, 200000, 437e6\n0:P, 4800:R\nPOINT:Fy, -1, 4801, case:Live\n";
    assert!(matches!(
        parse_beam(load, &LoaderConfig::default()),
        Err(LoaderError::LoadOutOfRange { .. })
    ));
}

#[test]
fn record_serializes_to_json() {
    let text = "B\n4800, 200000, 437e6\n0:P, 4800:R\nPOINT:fy, -1, 100, case:Live\n";
    let record = parse_beam(text, &LoaderConfig::default()).unwrap();
    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json["name"], "B");
    assert_eq!(json["attributes"]["Iz"], 437e6);
    assert_eq!(json["supports"][1]["type"], "R");
    assert_eq!(json["loads"][0]["type"], "Point");
    assert_eq!(json["loads"][0]["direction"], "Fy");
    assert_eq!(json["nodes"][1]["id"], "N1");
}
