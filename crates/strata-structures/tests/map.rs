use strata_blocks::{Block, ids};
use strata_chunk::Chunk;
use strata_geom::{BlockPos, BoundingBox};
use strata_noise::JavaRandom;
use strata_structures::biomes::PLAINS;
use strata_structures::{BiomeSource, Mineshaft, StructureMap};

struct Uniform(u8);

impl BiomeSource for Uniform {
    fn biome(&self, _x: i32, _z: i32) -> u8 {
        self.0
    }

    fn are_biomes_viable(&self, _x: i32, _z: i32, _radius: i32, allowed: &[u8]) -> bool {
        allowed.contains(&self.0)
    }

    fn find_biome_position(&self, x: i32, z: i32, _r: i32, allowed: &[u8], _rng: &mut JavaRandom) -> Option<BlockPos> {
        allowed.contains(&self.0).then_some(BlockPos::new(x, 0, z))
    }
}

// Far from the origin every region passes the distance roll, so with a
// chance of one every chunk tries to start a mineshaft.
fn crowded(seed: i64) -> StructureMap<Mineshaft> {
    StructureMap::new(seed, Mineshaft::with_chance(1.0))
}

fn accepted(map: &StructureMap<Mineshaft>) -> Vec<((i32, i32), Vec<BoundingBox>)> {
    map.cache()
        .entries()
        .into_iter()
        .map(|(key, cached)| (key, cached.start.lock().components.iter().map(|c| c.frame.bbox).collect()))
        .collect()
}

fn solid(cx: i32, cz: i32) -> Chunk {
    let mut chunk = Chunk::new(cx, cz);
    for x in 0..16 {
        for z in 0..16 {
            for y in 0..80 {
                chunk.set_block(x, y, z, Block::of(ids::STONE));
            }
        }
    }
    chunk
}

#[test]
fn starts_from_neighbouring_regions_never_share_space() {
    let map = crowded(11);
    map.prepare(200, 200, &Uniform(PLAINS));
    map.prepare(214, 193, &Uniform(PLAINS));
    let starts = accepted(&map);
    assert!(starts.len() > 1, "only {} starts kept", starts.len());
    // the two neighbourhoods cover 548 regions, all of which try to spawn
    assert!(starts.len() < 548, "nothing was dropped");
    for (i, (a, parts_a)) in starts.iter().enumerate() {
        for (b, parts_b) in &starts[i + 1..] {
            let clash = parts_a.iter().any(|p| parts_b.iter().any(|q| p.intersects(q)));
            assert!(!clash, "starts {a:?} and {b:?} overlap");
        }
    }
}

#[test]
fn kept_starts_do_not_depend_on_preparation_order() {
    let first = crowded(11);
    first.prepare(200, 200, &Uniform(PLAINS));
    first.prepare(214, 193, &Uniform(PLAINS));
    let second = crowded(11);
    second.prepare(214, 193, &Uniform(PLAINS));
    second.prepare(200, 200, &Uniform(PLAINS));
    assert_eq!(accepted(&first), accepted(&second));
}

#[test]
fn stamping_a_chunk_does_not_depend_on_what_was_stamped_before() {
    let alone = crowded(5);
    let after = crowded(5);
    alone.prepare(300, 300, &Uniform(PLAINS));
    after.prepare(300, 300, &Uniform(PLAINS));
    let (cx, cz) = alone.cache().entries().first().map(|(key, _)| *key).expect("a start near (300, 300)");

    let mut direct = solid(cx, cz);
    assert!(alone.generate(&mut direct, cx, cz));

    for (nx, nz) in [(cx - 1, cz), (cx + 1, cz), (cx, cz - 1), (cx, cz + 1)] {
        let mut neighbour = solid(nx, nz);
        after.generate(&mut neighbour, nx, nz);
    }
    let mut late = solid(cx, cz);
    assert!(after.generate(&mut late, cx, cz));
    assert!(direct == late);
    assert!(direct != solid(cx, cz));

    // a chunk is stamped once
    assert!(!after.generate(&mut late, cx, cz));
}
