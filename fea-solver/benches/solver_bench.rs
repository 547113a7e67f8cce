//! Benchmarks for FEA solver

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fea_solver::prelude::*;

fn create_cantilever_model() -> FEModel {
    let mut model = FEModel::new();

    model.add_material("Steel", Material::steel()).unwrap();
    model.add_section("Section", Section::rectangular(0.3, 0.5)).unwrap();

    model.add_node("N1", Node::new(0.0, 0.0, 0.0)).unwrap();
    model.add_node("N2", Node::new(10.0, 0.0, 0.0)).unwrap();

    model.add_member("M1", Member::new("N1", "N2", "Steel", "Section")).unwrap();
    model.add_support("N1", Support::fixed()).unwrap();
    model
        .add_member_point_load("M1", PointLoad::downward(10000.0, 10.0, "Case 1"))
        .unwrap();

    model
}

/// One member over `spans` equal spans, supported at every span end
fn create_continuous_beam(spans: usize) -> FEModel {
    let mut model = FEModel::new();

    model.add_material("Steel", Material::steel()).unwrap();
    model.add_section("Beam", Section::rectangular(0.3, 0.6)).unwrap();

    let span = 6.0;
    let length = spans as f64 * span;

    for i in 0..=spans {
        let name = format!("N{}", i);
        model.add_node(&name, Node::new(i as f64 * span, 0.0, 0.0)).unwrap();
        let support = if i == 0 {
            Support::from_flags([true, true, true, true, true, false])
        } else {
            Support::from_flags([false, true, true, true, true, false])
        };
        model.add_support(&name, support).unwrap();
    }

    let last = format!("N{}", spans);
    model.add_member("M1", Member::new("N0", &last, "Steel", "Beam")).unwrap();

    model
        .add_member_dist_load("M1", DistributedLoad::uniform(-10e3, 0.0, length, LoadDirection::Fy, "Dead"))
        .unwrap();
    for i in 0..spans {
        let x = (i as f64 + 0.5) * span;
        model
            .add_member_point_load("M1", PointLoad::downward(20e3, x, "Live"))
            .unwrap();
    }

    model.add_load_combo(LoadCombination::single("D", "Dead")).unwrap();
    model
        .add_load_combo(LoadCombination::new("D+L").with_case("Dead", 1.0).with_case("Live", 1.0))
        .unwrap();

    model
}

fn bench_cantilever(c: &mut Criterion) {
    c.bench_function("cantilever_analysis", |b| {
        b.iter(|| {
            let mut model = create_cantilever_model();
            model.analyze_linear().unwrap();
            black_box(model.node_displacement("N2", "Combo 1").unwrap())
        })
    });
}

fn bench_continuous_beam(c: &mut Criterion) {
    let mut group = c.benchmark_group("continuous_beam");

    for spans in [2, 5, 10, 20] {
        group.bench_function(format!("{}_spans", spans), |b| {
            b.iter(|| {
                let mut model = create_continuous_beam(spans);
                model.analyze_linear().unwrap();
                black_box(model.summary("D+L").unwrap())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_cantilever, bench_continuous_beam);
criterion_main!(benches);
