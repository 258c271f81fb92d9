use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use toroidal_life::Life;

fn bench_advance(c: &mut Criterion) {
    let mut group = c.benchmark_group("advance");
    for size in [50_usize, 150, 400] {
        let mut rng = StdRng::seed_from_u64(0x11FE);
        let mut seed = Life::new(size, size);
        seed.randomize(50, &mut rng);

        group.bench_function(format!("{size}x{size}"), |b| {
            b.iter_batched(
                || seed.clone(),
                |mut life| {
                    life.advance();
                    life
                },
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_neighbor_index(c: &mut Criterion) {
    c.bench_function("neighbor_index_150x150", |b| {
        b.iter(|| toroidal_life::NeighborIndex::build(150, 150))
    });
}

criterion_group!(benches, bench_advance, bench_neighbor_index);
criterion_main!(benches);
