use std::sync::Arc;

use strata_chunk::{Chunk, ChunkManager, ChunkStore};
use strata_runtime::{Runtime, RuntimeConfig};
use strata_world::{Generator, GeneratorSettings, Overworld};

fn snapshot(store: &ChunkStore) -> Vec<((i32, i32), Chunk)> {
    store
        .coords()
        .into_iter()
        .filter_map(|(x, z)| store.get_chunk(x, z, false).map(|c| ((x, z), c.lock().clone())))
        .collect()
}

fn sequential(seed: i64) -> Arc<ChunkStore> {
    let store = Arc::new(ChunkStore::new());
    let overworld = Overworld::new(store.clone(), seed, GeneratorSettings::default());
    for cx in -1..=2 {
        for cz in -1..=1 {
            overworld.generate_chunk(cx, cz);
        }
    }
    for cx in -1..2 {
        for cz in -1..1 {
            overworld.populate_chunk(cx, cz).expect("window generated");
        }
    }
    store
}

fn parallel(seed: i64, workers: usize) -> Arc<ChunkStore> {
    let store = Arc::new(ChunkStore::new());
    let overworld = Overworld::new(store.clone(), seed, GeneratorSettings::default());
    let cfg = RuntimeConfig { workers, max_inflight: 3 };
    let runtime = Runtime::new(overworld, cfg).expect("worker pool");
    let report = runtime.generate_region(-1, -1, 2, 1).expect("region");
    assert_eq!(report.generated, 12);
    assert_eq!(report.populated, 6);
    store
}

#[test]
fn worker_count_does_not_change_the_world() {
    let one = snapshot(&parallel(4242, 1));
    let four = snapshot(&parallel(4242, 4));
    assert_eq!(one.len(), 12);
    assert!(one == four);
}

#[test]
fn parallel_region_matches_a_sequential_run() {
    let expected = snapshot(&sequential(777));
    let actual = snapshot(&parallel(777, 3));
    assert!(expected == actual);
}

#[test]
fn structure_starts_are_reported() {
    let store = Arc::new(ChunkStore::new());
    let overworld = Overworld::new(store, 1, GeneratorSettings::default());
    let runtime = Runtime::new(overworld, RuntimeConfig::with_workers(2)).expect("worker pool");
    let report = runtime.generate_region(-3, -3, 3, 3).expect("region");
    assert_eq!(report.chunks, 49);
    let total: usize = report.structures.iter().map(|(_, n)| *n).sum();
    assert_eq!(total, runtime.overworld().structures().counts().iter().map(|(_, n)| *n).sum::<usize>());
}
