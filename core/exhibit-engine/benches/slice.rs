//! FILENAME: core/exhibit-engine/benches/slice.rs
//! Benchmarks for slicing and refreshing a loss development exhibit.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use engine::Workbook;
use exhibit_engine::{slice, Exhibit, ExhibitConfig, FilterRegistry, LossDevelopmentExhibit};
use triangle::{Triangle, TriangleBuilder};

/// `lines` x 2 types x 2 measures over `periods` x `periods`, upper-left filled.
fn triangle(lines: usize, periods: usize) -> Triangle {
    let origins: Vec<String> = (0..periods).map(|i| format!("{}", 2000 + i)).collect();
    let devs: Vec<String> = (1..=periods).map(|i| format!("{}", i * 12)).collect();
    let mut builder = TriangleBuilder::new(["Line", "Type"])
        .measures(["Paid", "Reported"])
        .origins(origins.iter().cloned())
        .developments(devs.iter().cloned())
        .cumulative(true);

    for l in 0..lines {
        let line = format!("Line{}", l);
        for kind in ["Paid", "Incurred"] {
            for measure in ["Paid", "Reported"] {
                for (oi, origin) in origins.iter().enumerate() {
                    for dev in devs.iter().take(periods - oi) {
                        builder
                            .record(&[line.as_str(), kind], measure, origin, dev, (l + oi) as f64)
                            .expect("bench record");
                    }
                }
            }
        }
    }
    builder.build().expect("bench triangle")
}

fn bench_slice(c: &mut Criterion) {
    let mut group = c.benchmark_group("slice");
    for periods in [10, 40] {
        let tri = triangle(20, periods);
        let registry = FilterRegistry::from_dataset(&tri, "Amount").expect("registry");
        let selection = registry.initial_selection();
        group.bench_with_input(BenchmarkId::from_parameter(periods), &periods, |b, _| {
            b.iter(|| slice(black_box(&tri), &registry, &selection).expect("slice"))
        });
    }
    group.finish();
}

fn bench_refresh(c: &mut Criterion) {
    let mut exhibit =
        LossDevelopmentExhibit::new(triangle(20, 20), Workbook::new(), ExhibitConfig::default());
    exhibit.load().expect("load");
    let control = exhibit.control_for("Line").expect("line control");
    let labels = ["Line0", "Line7"];
    let mut turn = 0usize;

    c.bench_function("refresh_after_selection", |b| {
        b.iter(|| {
            turn += 1;
            exhibit.host_mut().select(control, labels[turn % 2]).expect("select");
            black_box(exhibit.dispatch_pending())
        })
    });
}

criterion_group!(benches, bench_slice, bench_refresh);
criterion_main!(benches);
