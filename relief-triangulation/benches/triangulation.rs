use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use relief_core::Heightmap;
use relief_triangulation::Triangulator;

fn wave_map(size: usize) -> Heightmap {
    let k = std::f32::consts::TAU / (size - 1) as f32;
    Heightmap::from_fn(size, size, |x, y| {
        (x as f32 * k).sin() * (y as f32 * k).sin() * 0.5 + 0.5
    })
    .unwrap()
}

fn bench_refinement(c: &mut Criterion) {
    let mut group = c.benchmark_group("refinement");
    for size in [64, 128, 256] {
        let hm = wave_map(size);
        group.bench_with_input(BenchmarkId::new("wave", size), &hm, |b, hm| {
            b.iter(|| {
                let mut tri = Triangulator::new(black_box(hm)).unwrap();
                tri.run(0.001, 0, 0);
                black_box(tri.triangle_count())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_refinement);
criterion_main!(benches);
