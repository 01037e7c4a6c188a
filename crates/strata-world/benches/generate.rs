use std::sync::Arc;
use std::time::Duration;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use strata_chunk::{ChunkManager, ChunkStore};
use strata_world::{Generator, GeneratorSettings, Overworld};

fn world(seed: i64) -> (Arc<ChunkStore>, Overworld) {
    let store = Arc::new(ChunkStore::new());
    let overworld = Overworld::new(store.clone(), seed, GeneratorSettings::default());
    (store, overworld)
}

fn bench_generate_chunk(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_chunk");
    group.measurement_time(Duration::from_secs(10));
    let (_, overworld) = world(12345);
    group.bench_function("build_0_0", |b| {
        b.iter(|| black_box(overworld.build_chunk(black_box(0), black_box(0))))
    });
    let mut cx = 0;
    group.bench_function("build_walk", |b| {
        b.iter(|| {
            cx += 1;
            black_box(overworld.build_chunk(cx, -cx))
        })
    });
    group.finish();
}

fn bench_populate_chunk(c: &mut Criterion) {
    let mut group = c.benchmark_group("populate_chunk");
    group.sample_size(20);
    let (store, overworld) = world(12345);
    for cx in 0..2 {
        for cz in 0..2 {
            overworld.generate_chunk(cx, cz);
        }
    }
    let pristine: Vec<_> = store.coords().into_iter().filter_map(|(x, z)| store.get_chunk(x, z, false)).map(|c| c.lock().clone()).collect();
    group.bench_function("populate_0_0", |b| {
        b.iter(|| {
            for chunk in &pristine {
                store.set_chunk(chunk.clone());
            }
            black_box(overworld.populate_chunk(0, 0)).ok();
        })
    });
    group.finish();
}

criterion_group!(benches, bench_generate_chunk, bench_populate_chunk);
criterion_main!(benches);
