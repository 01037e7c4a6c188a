//! Structure placement: per-region starts, component trees and chunk stamping.
#![forbid(unsafe_code)]

pub mod biomes;
mod cache;
pub mod component;
pub mod mineshaft;
pub mod scattered;
mod start;
pub mod stronghold;
pub mod stronghold_pieces;
pub mod village;
pub mod village_pieces;

pub use cache::{CachedStart, StructureCache};
pub use component::{Frame, Piece, StructureComponent};
pub use mineshaft::Mineshaft;
pub use scattered::ScatteredFeature;
pub use start::StructureStart;
pub use stronghold::Stronghold;
pub use village::Village;

use std::sync::Arc;

use hashbrown::HashMap;
use parking_lot::Mutex;
use strata_chunk::WorldAccess;
use strata_geom::{BlockPos, BoundingBox};
use strata_noise::JavaRandom;

/// Water surface level structures settle against.
pub const SEA_LEVEL: i32 = 63;

/// Biome lookups structure placement is gated on.
pub trait BiomeSource: Sync {
    /// Biome id of the block column at `(x, z)`.
    fn biome(&self, x: i32, z: i32) -> u8;

    /// True when every coarse cell within `radius` blocks of `(x, z)` is in `allowed`.
    fn are_biomes_viable(&self, x: i32, z: i32, radius: i32, allowed: &[u8]) -> bool;

    /// Picks a random matching block position within `radius`, drawing from `rng`.
    fn find_biome_position(
        &self,
        x: i32,
        z: i32,
        radius: i32,
        allowed: &[u8],
        rng: &mut JavaRandom,
    ) -> Option<BlockPos>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StructureKind {
    Mineshaft,
    Village,
    Stronghold,
    Scattered,
}

impl StructureKind {
    pub fn name(self) -> &'static str {
        match self {
            StructureKind::Mineshaft => "mineshaft",
            StructureKind::Village => "village",
            StructureKind::Stronghold => "stronghold",
            StructureKind::Scattered => "temple",
        }
    }
}

/// Placement rule and tree builder for one structure type.
pub trait StructureGenerator: Send + Sync {
    fn kind(&self) -> StructureKind;

    /// Whether a start belongs to the chunk region. `rng` is the region-seeded
    /// source the start is then built from.
    fn can_spawn_at(&self, cx: i32, cz: i32, rng: &mut JavaRandom, biomes: &dyn BiomeSource) -> bool;

    fn start_at(&self, cx: i32, cz: i32, rng: &mut JavaRandom, biomes: &dyn BiomeSource) -> StructureStart;

    /// Random source the start at `(cx, cz)` is stamped with. It is derived
    /// from the start alone, so stamping never advances the population stream.
    fn stamp_rng(&self, world_seed: i64, cx: i32, cz: i32) -> JavaRandom {
        JavaRandom::new(region_seed(world_seed, cx, cz, 0))
    }
}

/// Boxes of a built start, kept to settle overlaps between neighbouring starts.
struct Footprint {
    bbox: BoundingBox,
    parts: Vec<BoundingBox>,
}

impl Footprint {
    fn of(start: &StructureStart) -> Self {
        Self { bbox: start.bbox, parts: start.components.iter().map(|c| c.frame.bbox).collect() }
    }

    fn overlaps(&self, other: &Footprint) -> bool {
        self.bbox.intersects(&other.bbox)
            && self.parts.iter().any(|a| other.parts.iter().any(|b| a.intersects(b)))
    }
}

/// One structure type bound to a world seed, with its start cache.
pub struct StructureMap<G> {
    seed: i64,
    range: i32,
    generator: G,
    cache: StructureCache,
    footprints: Mutex<HashMap<(i32, i32), Option<Arc<Footprint>>>>,
}

impl<G: StructureGenerator> StructureMap<G> {
    pub fn new(seed: i64, generator: G) -> Self {
        Self { seed, range: 8, generator, cache: StructureCache::default(), footprints: Mutex::new(HashMap::new()) }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn cache(&self) -> &StructureCache {
        &self.cache
    }

    /// Builds the start of region `(rx, rz)` from its own seed, if one spawns there.
    fn build(&self, rx: i32, rz: i32, biomes: &dyn BiomeSource) -> Option<StructureStart> {
        let mut rng = JavaRandom::new(self.seed);
        let a = rng.next_long();
        let b = rng.next_long();
        rng.set_seed((rx as i64).wrapping_mul(a) ^ (rz as i64).wrapping_mul(b) ^ self.seed);
        rng.next_int();
        if !self.generator.can_spawn_at(rx, rz, &mut rng, biomes) {
            return None;
        }
        Some(self.generator.start_at(rx, rz, &mut rng, biomes))
    }

    fn footprint(&self, rx: i32, rz: i32, biomes: &dyn BiomeSource) -> Option<Arc<Footprint>> {
        if let Some(known) = self.footprints.lock().get(&(rx, rz)) {
            return known.clone();
        }
        let built = self.build(rx, rz, biomes).filter(|s| s.sizeable).map(|s| Arc::new(Footprint::of(&s)));
        self.footprints.lock().insert((rx, rz), built.clone());
        built
    }

    /// Whether a start from a lower region in the neighbourhood already
    /// occupies any of `mine`'s space. Lower regions win regardless of their
    /// own fate, so the outcome does not depend on which chunk asked first.
    fn blocked(&self, rx: i32, rz: i32, mine: &Footprint, biomes: &dyn BiomeSource) -> Option<(i32, i32)> {
        let reach = self.range * 2;
        for qx in rx - reach..=rx {
            for qz in rz - reach..=rz + reach {
                if (qx, qz) >= (rx, rz) {
                    break;
                }
                if let Some(other) = self.footprint(qx, qz, biomes) {
                    if other.overlaps(mine) {
                        return Some((qx, qz));
                    }
                }
            }
        }
        None
    }

    /// Builds the starts of every region within range of chunk `(cx, cz)` that
    /// has not been looked at yet. A start that runs into one from a lower
    /// region is dropped.
    pub fn prepare(&self, cx: i32, cz: i32, biomes: &dyn BiomeSource) {
        for rx in cx - self.range..=cx + self.range {
            for rz in cz - self.range..=cz + self.range {
                if !self.cache.claim(rx, rz) {
                    continue;
                }
                let Some(start) = self.build(rx, rz, biomes) else {
                    continue;
                };
                if start.sizeable {
                    let mine = Footprint::of(&start);
                    if let Some((qx, qz)) = self.blocked(rx, rz, &mine, biomes) {
                        log::debug!(
                            target: "structures",
                            "{} start at chunk ({rx}, {rz}) overlaps the one at ({qx}, {qz}); dropped",
                            self.generator.kind().name()
                        );
                        continue;
                    }
                }
                log::debug!(
                    target: "structures",
                    "{} start at chunk ({rx}, {rz}) with {} components",
                    self.generator.kind().name(),
                    start.components.len()
                );
                self.cache.insert(start);
            }
        }
    }

    /// Stamps every start crossing chunk `(cx, cz)` into that chunk's column.
    /// Returns true when anything was stamped.
    pub fn generate(&self, w: &mut dyn WorldAccess, cx: i32, cz: i32) -> bool {
        let clip = BoundingBox::chunk_column(cx, cz);
        let mut stamped = false;
        for shared in self.cache.intersecting(&clip) {
            let mut start = shared.lock();
            if start.is_processed(cx, cz) {
                continue;
            }
            let mut rng = self.generator.stamp_rng(self.seed, start.chunk_x, start.chunk_z);
            start.generate(w, &mut rng, &clip);
            start.mark_processed(cx, cz);
            stamped = true;
        }
        if stamped {
            log::trace!(target: "structures", "{} stamped into chunk ({cx}, {cz})", self.generator.kind().name());
        }
        stamped
    }
}

/// Seed mix for grid cell `(a, b)` of a grid-placed structure.
pub fn region_seed(world_seed: i64, a: i32, b: i32, salt: i64) -> i64 {
    (a as i64)
        .wrapping_mul(341_873_128_712)
        .wrapping_add((b as i64).wrapping_mul(132_897_987_541))
        .wrapping_add(world_seed)
        .wrapping_add(salt)
}

/// Grid-placed start check shared by villages and scattered features: one
/// candidate chunk per `spacing`-sized cell, offset by `spread` random chunks.
/// Also hands back the cell's random source after the two offset draws.
pub fn grid_rng(world_seed: i64, cx: i32, cz: i32, spacing: i32, spread: i32, salt: i64) -> ((i32, i32), JavaRandom) {
    let gx = (if cx < 0 { cx - (spacing - 1) } else { cx }) / spacing;
    let gz = (if cz < 0 { cz - (spacing - 1) } else { cz }) / spacing;
    let mut rng = JavaRandom::new(region_seed(world_seed, gx, gz, salt));
    let x = gx * spacing + rng.next_bounded_int(spread);
    let z = gz * spacing + rng.next_bounded_int(spread);
    ((x, z), rng)
}

pub fn grid_candidate(world_seed: i64, cx: i32, cz: i32, spacing: i32, spread: i32, salt: i64) -> (i32, i32) {
    grid_rng(world_seed, cx, cz, spacing, spread, salt).0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_chunks_share_the_cell_below() {
        let (x, z) = grid_candidate(42, -1, -1, 32, 24, 10387312);
        assert!((-32..-8).contains(&x), "{x}");
        assert!((-32..-8).contains(&z), "{z}");
        let (x, z) = grid_candidate(42, 31, 0, 32, 24, 10387312);
        assert!((0..24).contains(&x) && (0..24).contains(&z));
    }

    #[test]
    fn candidate_is_stable_within_a_cell() {
        let a = grid_candidate(7, 33, 40, 32, 24, 14357617);
        let b = grid_candidate(7, 63, 63, 32, 24, 14357617);
        assert_eq!(a, b);
    }
}
