use criterion::{black_box, criterion_group, criterion_main, Criterion};

use radius_check::classify::parse_line;
use radius_check::{haversine_km, Coordinate, ReferencePoint};

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("haversine", |b| {
        b.iter(|| haversine_km(black_box(51.301389), black_box(6.953333), black_box(50.823194), black_box(6.186389)))
    });

    let reference = ReferencePoint::new(Coordinate::new(40.7128, -74.0060), 50.0);
    c.bench_function("parse_and_classify", |b| {
        b.iter(|| {
            let point = parse_line(black_box("40.730610 -73.935242")).unwrap();
            reference.classify(&point)
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
