use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dockscreen::grid::{SearchBox, DEFAULT_PADDING};
use dockscreen::io::COORDINATE_COLUMNS;
use nalgebra::Vector3;

fn synthetic_coordinates(count: usize) -> Vec<Vector3<f64>> {
    (0..count)
        .map(|i| {
            let t = i as f64 * 0.37;
            Vector3::new(t.sin() * 30.0, t.cos() * 25.0, (i % 100) as f64 * 0.4)
        })
        .collect()
}

fn bench_padded_enclosing(c: &mut Criterion) {
    let coordinates = synthetic_coordinates(10_000);

    c.bench_function("padded_enclosing_10k", |b| {
        b.iter(|| {
            let bbox = SearchBox::padded_enclosing(&coordinates, DEFAULT_PADDING);
            black_box(bbox)
        })
    });
}

fn bench_coordinate_record_parse(c: &mut Criterion) {
    let records: Vec<String> = synthetic_coordinates(1_000)
        .into_iter()
        .map(|p| {
            format!(
                "{:<30}{:>8.3}{:>8.3}{:>8.3}  1.00  0.00           C",
                "ATOM      1  CA  ALA A   1", p.x, p.y, p.z
            )
        })
        .collect();

    c.bench_function("coordinate_record_parse_1k", |b| {
        b.iter(|| {
            for record in &records {
                black_box(COORDINATE_COLUMNS.coordinates(record));
            }
        })
    });
}

criterion_group!(
    grid_benches,
    bench_padded_enclosing,
    bench_coordinate_record_parse
);
criterion_main!(grid_benches);
