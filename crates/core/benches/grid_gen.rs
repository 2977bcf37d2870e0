use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hexmove::{grid::range, GridConfig, HexGrid, HexPoint, Point3};

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid");

    let config = GridConfig {
        radius: 50,
        ..Default::default()
    };
    group.bench_function("grid gen", |b| {
        b.iter(|| HexGrid::from_config(Point3::origin(), black_box(&config)))
    });

    let grid = HexGrid::from_config(Point3::origin(), &config).unwrap();
    group.bench_function("reachable", |b| {
        b.iter(|| range::reachable(&grid, black_box(HexPoint::ORIGIN), 3))
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
