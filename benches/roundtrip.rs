use criterion::{criterion_group, criterion_main, Criterion};
use geocore::{Point, Reader, Writer};

fn roundtrip(npoints: usize) {
    let mut writer = Writer::default();
    for _ in 0..npoints {
        writer.write_point(Point::default()).unwrap();
    }
    let mut reader = Reader::new(writer.into_inner().unwrap()).unwrap();
    for point in reader.points() {
        let _ = point.unwrap();
    }
}

fn bench_roundtrip(c: &mut Criterion) {
    let mut group = c.benchmark_group("roundtrip");
    for npoints in [0, 1, 100, 10_000] {
        group.bench_function(format!("{npoints}_points"), |b| {
            b.iter(|| roundtrip(npoints))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_roundtrip);
criterion_main!(benches);
