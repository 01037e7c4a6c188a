//! The overworld generator: terrain, surface and carving per chunk, then
//! structures, lakes, dungeons and decoration once the neighbours exist.

use std::sync::Arc;

use strata_blocks::{Block, ids};
use strata_chunk::{Chunk, ChunkHandles, ChunkManager, ChunkWindow, WorldAccess};
use strata_geom::BlockPos;
use strata_noise::JavaRandom;
use strata_structures::{
    Mineshaft, ScatteredFeature, StructureGenerator, StructureKind, StructureMap, Stronghold, Village,
};

use crate::biome::{self, ClimateNoise, SurfaceBuilder};
use crate::carver::{Caves, Ravines};
use crate::config::{GenError, GeneratorSettings};
use crate::decorator::{self, Decorator};
use crate::layer::LayerStack;
use crate::terrain::{BIOME_WINDOW, TerrainGenerator};
use crate::Generator;

/// Ids the spawn search looks through: air, water, lava and leaves.
const SPAWN_SKIP: [u8; 7] = [
    ids::AIR,
    ids::FLOWING_WATER,
    ids::WATER,
    ids::FLOWING_LAVA,
    ids::LAVA,
    ids::LEAVES,
    ids::LEAVES2,
];
const FALLBACK_SPAWN: BlockPos = BlockPos::new(0, 65, 0);

/// Structure maps of one world, shared by every generator working on it.
pub struct Structures {
    mineshafts: Option<StructureMap<Mineshaft>>,
    villages: Option<StructureMap<Village>>,
    strongholds: Option<StructureMap<Stronghold>>,
    scattered: Option<StructureMap<ScatteredFeature>>,
}

impl Structures {
    pub fn new(seed: i64, settings: &GeneratorSettings) -> Self {
        let stronghold_biomes: Vec<u8> =
            biome::all().iter().filter(|b| b.base_height > 0.0).map(|b| b.id).collect();
        Self {
            mineshafts: settings.mineshafts.then(|| StructureMap::new(seed, Mineshaft::new())),
            villages: settings.villages.then(|| StructureMap::new(seed, Village::new(seed))),
            strongholds: settings
                .strongholds
                .then(|| StructureMap::new(seed, Stronghold::new(seed, stronghold_biomes))),
            scattered: settings.temples.then(|| StructureMap::new(seed, ScatteredFeature::new(seed))),
        }
    }

    fn prepare(&self, cx: i32, cz: i32, layers: &LayerStack) {
        if let Some(m) = &self.mineshafts {
            m.prepare(cx, cz, layers);
        }
        if let Some(m) = &self.villages {
            m.prepare(cx, cz, layers);
        }
        if let Some(m) = &self.strongholds {
            m.prepare(cx, cz, layers);
        }
        if let Some(m) = &self.scattered {
            m.prepare(cx, cz, layers);
        }
    }

    /// Stamps every type in fixed order. Returns whether a village landed
    /// in the chunk.
    fn stamp(&self, w: &mut dyn WorldAccess, cx: i32, cz: i32) -> bool {
        if let Some(m) = &self.mineshafts {
            m.generate(w, cx, cz);
        }
        let village = self.villages.as_ref().is_some_and(|m| m.generate(w, cx, cz));
        if let Some(m) = &self.strongholds {
            m.generate(w, cx, cz);
        }
        if let Some(m) = &self.scattered {
            m.generate(w, cx, cz);
        }
        village
    }

    /// Cached starts per structure type, in stamping order.
    pub fn counts(&self) -> Vec<(StructureKind, usize)> {
        fn count<G: StructureGenerator>(m: &Option<StructureMap<G>>) -> Option<(StructureKind, usize)> {
            m.as_ref().map(|m| (m.generator().kind(), m.cache().len()))
        }
        [count(&self.mineshafts), count(&self.villages), count(&self.strongholds), count(&self.scattered)]
            .into_iter()
            .flatten()
            .collect()
    }
}

/// Lakes are never placed when population runs in one of these.
fn is_ocean_or_river(id: u8) -> bool {
    use biome::ids::{DEEP_OCEAN, FROZEN_OCEAN, FROZEN_RIVER, OCEAN, RIVER};
    matches!(id, OCEAN | FROZEN_OCEAN | DEEP_OCEAN | RIVER | FROZEN_RIVER)
}

/// Seed for chunk-local randomness during generation.
fn chunk_seed(cx: i32, cz: i32) -> i64 {
    i64::from(cx)
        .wrapping_mul(341_873_128_712)
        .wrapping_add(i64::from(cz).wrapping_mul(132_897_987_541))
}

/// Seed of the population stream for chunk `(cx, cz)`.
pub fn population_seed(world_seed: i64, cx: i32, cz: i32) -> i64 {
    let mut rng = JavaRandom::new(world_seed);
    let k = rng.next_long() / 2 * 2 + 1;
    let l = rng.next_long() / 2 * 2 + 1;
    i64::from(cx).wrapping_mul(k).wrapping_add(i64::from(cz).wrapping_mul(l)) ^ world_seed
}

/// Overworld generator bound to one chunk manager and world seed. The
/// noise fields are owned per instance; structure caches are shared with
/// every instance forked from it.
pub struct Overworld {
    seed: i64,
    settings: GeneratorSettings,
    manager: Arc<dyn ChunkManager>,
    terrain: TerrainGenerator,
    layers: LayerStack,
    surface: SurfaceBuilder,
    caves: Caves,
    ravines: Ravines,
    structures: Arc<Structures>,
}

impl Overworld {
    pub fn new(manager: Arc<dyn ChunkManager>, seed: i64, settings: GeneratorSettings) -> Self {
        let structures = Arc::new(Structures::new(seed, &settings));
        Self::with_structures(manager, seed, settings, structures)
    }

    fn with_structures(
        manager: Arc<dyn ChunkManager>,
        seed: i64,
        settings: GeneratorSettings,
        structures: Arc<Structures>,
    ) -> Self {
        log::debug!(target: "worldgen", "building overworld generator for seed {seed}");
        Self {
            seed,
            terrain: TerrainGenerator::new(seed, &settings),
            layers: LayerStack::new(seed, &settings),
            surface: SurfaceBuilder::new(seed, settings.sea_level, ClimateNoise::new()),
            caves: Caves::new(seed, settings.max_height),
            ravines: Ravines::new(seed, settings.max_height),
            manager,
            settings,
            structures,
        }
    }

    /// A fresh generator over the same world: its own noise fields, the
    /// same chunk manager and structure caches.
    pub fn fork(&self) -> Self {
        Self::with_structures(self.manager.clone(), self.seed, self.settings.clone(), self.structures.clone())
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    pub fn layers(&self) -> &LayerStack {
        &self.layers
    }

    pub fn structures(&self) -> &Structures {
        &self.structures
    }

    pub fn manager(&self) -> &Arc<dyn ChunkManager> {
        &self.manager
    }

    /// Builds chunk `(cx, cz)` without storing it.
    pub fn build_chunk(&self, cx: i32, cz: i32) -> Chunk {
        let mut rng = JavaRandom::new(chunk_seed(cx, cz));
        let mut chunk = Chunk::new(cx, cz);

        let window = BIOME_WINDOW;
        let coarse = self.layers.quarter_grid(cx * 4 - 2, cz * 4 - 2, window, window);
        let density = self.terrain.density(cx, cz, &coarse);
        self.terrain.rasterize(&mut chunk, &density);

        let biomes = self.layers.block_grid(cx * 16, cz * 16, 16, 16);
        // carvers re-top breached columns from the stored biome
        for z in 0..16 {
            for x in 0..16 {
                let b = biome::biome(biomes[(x + z * 16) as usize].clamp(0, 255) as u8);
                chunk.set_biome(x, z, b.id);
                chunk.set_biome_color(x, z, b.color());
            }
        }
        let noise = self.terrain.surface_noise(cx, cz);
        for i in 0..16 {
            for j in 0..16 {
                let n = (j + i * 16) as usize;
                let b = biome::biome(biomes[n].clamp(0, 255) as u8);
                self.surface.build_column(&mut chunk, &mut rng, b, cx * 16 + i, cz * 16 + j, noise[n]);
            }
        }

        if self.settings.caves {
            self.caves.generate(&mut chunk);
        }
        if self.settings.ravines {
            self.ravines.generate(&mut chunk);
        }

        chunk.recompute_heightmap();
        chunk
    }

    fn populate_window(&self, w: &mut ChunkWindow<'_>, cx: i32, cz: i32) {
        let (x0, z0) = (cx * 16, cz * 16);
        let origin = BlockPos::new(x0, 0, z0);
        let biome = biome::biome(self.layers.population_biome(x0 + 16, z0 + 16));
        let s = &self.settings;

        let mut rng = JavaRandom::new(population_seed(self.seed, cx, cz));
        let village = self.structures.stamp(w, cx, cz);
        let climate = self.surface.climate();

        let wet = is_ocean_or_river(biome.id);
        let desert = biome.id == biome::ids::DESERT || biome.id == biome::ids::DESERT_HILLS;
        if !desert && !wet && s.water_lakes && !village && rng.next_bounded_int(s.water_lake_chance) == 0 {
            let p = origin.add(rng.next_bounded_int(16) + 8, rng.next_bounded_int(256), rng.next_bounded_int(16) + 8);
            decorator::lake(w, &mut rng, climate, p, Block::of(ids::WATER));
        }

        if !village && !wet && rng.next_bounded_int((s.lava_lake_chance / 10).max(1)) == 0 && s.lava_lakes {
            let x = rng.next_bounded_int(16) + 8;
            let bound = rng.next_bounded_int(248) + 8;
            let y = rng.next_bounded_int(bound);
            let z = rng.next_bounded_int(16) + 8;
            if y < s.sea_level || rng.next_bounded_int((s.lava_lake_chance / 8).max(1)) == 0 {
                decorator::lake(w, &mut rng, climate, origin.add(x, y, z), Block::of(ids::LAVA));
            }
        }

        if s.dungeons {
            for _ in 0..s.dungeon_chance {
                let p = origin.add(rng.next_bounded_int(16) + 8, rng.next_bounded_int(256), rng.next_bounded_int(16) + 8);
                decorator::dungeon(w, &mut rng, p);
            }
        }

        if s.decoration {
            Decorator::new(climate).decorate(w, &mut rng, biome, origin);
        }

        for i in 0..16 {
            for j in 0..16 {
                decorator::freeze_column(w, climate, x0 + 8 + i, z0 + 8 + j);
            }
        }
    }
}

impl Generator for Overworld {
    fn init(&mut self, manager: Arc<dyn ChunkManager>, seed: i64) {
        *self = Overworld::new(manager, seed, self.settings.clone());
    }

    fn generate_chunk(&self, cx: i32, cz: i32) {
        let chunk = self.build_chunk(cx, cz);
        self.structures.prepare(cx, cz, &self.layers);
        self.manager.set_chunk(chunk);
        log::trace!(target: "worldgen", "generated chunk ({cx}, {cz})");
    }

    fn populate_chunk(&self, cx: i32, cz: i32) -> Result<(), GenError> {
        let handles = ChunkHandles::collect(self.manager.as_ref(), (cx, cz), (cx + 1, cz + 1)).map_err(|missing| {
            if missing == (cx, cz) {
                GenError::ChunkMissing { cx, cz }
            } else {
                log::debug!(target: "worldgen", "cannot populate ({cx}, {cz}) yet: ({}, {}) missing", missing.0, missing.1);
                GenError::NeighborMissing { cx: missing.0, cz: missing.1 }
            }
        })?;
        let mut window = handles.lock();
        if window.chunk(cx, cz).is_some_and(Chunk::is_populated) {
            return Ok(());
        }

        self.populate_window(&mut window, cx, cz);

        for (x, z) in [(cx, cz), (cx + 1, cz), (cx, cz + 1), (cx + 1, cz + 1)] {
            if let Some(chunk) = window.chunk_mut(x, z) {
                chunk.recompute_heightmap();
            }
        }
        if let Some(chunk) = window.chunk_mut(cx, cz) {
            chunk.set_populated(true);
        }
        log::trace!(target: "worldgen", "populated chunk ({cx}, {cz})");
        Ok(())
    }

    /// Top of the first solid block in column (0, 0) with two free blocks
    /// above it.
    fn spawn(&self) -> BlockPos {
        if !self.manager.has_chunk(0, 0) {
            self.generate_chunk(0, 0);
        }
        let top = self.settings.max_height - 1;
        let Some(y) = (0..=top).rev().find(|&y| !SPAWN_SKIP.contains(&self.manager.block_id(0, y, 0))) else {
            return FALLBACK_SPAWN;
        };
        if self.manager.block_id(0, y + 1, 0) == ids::AIR && self.manager.block_id(0, y + 2, 0) == ids::AIR {
            BlockPos::new(0, y + 1, 0)
        } else {
            FALLBACK_SPAWN
        }
    }

    fn name(&self) -> &'static str {
        "overworld"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_chunk::ChunkStore;

    fn world(seed: i64) -> (Arc<ChunkStore>, Overworld) {
        let store = Arc::new(ChunkStore::new());
        let world_gen = Overworld::new(store.clone(), seed, GeneratorSettings::default());
        (store, world_gen)
    }

    #[test]
    fn generated_chunks_are_reproducible() {
        let (_, a) = world(12345);
        let (_, b) = world(12345);
        // generating other chunks first must not change the result
        b.build_chunk(5, -3);
        assert!(a.build_chunk(0, 0) == b.build_chunk(0, 0));
        assert!(a.build_chunk(-1, 2) == b.fork().build_chunk(-1, 2));
    }

    #[test]
    fn origin_chunk_has_stone_and_a_surface() {
        let (_, world_gen) = world(12345);
        let chunk = world_gen.build_chunk(0, 0);
        assert!(chunk.histogram()[ids::STONE as usize] > 0);
        for x in 0..16 {
            for z in 0..16 {
                assert!(chunk.height(x, z) > 0, "empty column {x},{z}");
                assert_eq!(chunk.block(x, 0, z).id, ids::BEDROCK);
            }
        }
    }

    #[test]
    fn carved_columns_keep_their_biome_top() {
        let settings =
            GeneratorSettings { fixed_biome: Some(biome::ids::MUSHROOM_ISLAND), ..GeneratorSettings::default() };
        let world_gen = Overworld::new(Arc::new(ChunkStore::new()), 12345, settings);
        let mut columns = 0;
        for cx in -10..10 {
            let chunk = world_gen.build_chunk(cx, 0);
            for x in 0..16 {
                for z in 0..16 {
                    if chunk.biome(x, z) != biome::ids::MUSHROOM_ISLAND {
                        continue;
                    }
                    columns += 1;
                    for y in 0..256 {
                        assert_ne!(chunk.block(x, y, z).id, ids::GRASS, "grass in mushroom column {cx}:{x},{y},{z}");
                    }
                }
            }
        }
        assert!(columns > 0);
    }

    fn lake_settings(fixed: u8, lakes: bool) -> GeneratorSettings {
        GeneratorSettings {
            fixed_biome: Some(fixed),
            water_lakes: lakes,
            water_lake_chance: 1,
            lava_lakes: lakes,
            lava_lake_chance: 10,
            dungeons: false,
            decoration: false,
            mineshafts: false,
            villages: false,
            strongholds: false,
            temples: false,
            ..GeneratorSettings::default()
        }
    }

    fn populated(seed: i64, settings: GeneratorSettings) -> Vec<Chunk> {
        let store = Arc::new(ChunkStore::new());
        let world_gen = Overworld::new(store.clone(), seed, settings);
        for cx in 0..3 {
            for cz in 0..3 {
                world_gen.generate_chunk(cx, cz);
            }
        }
        for cx in 0..2 {
            for cz in 0..2 {
                assert_eq!(world_gen.populate_chunk(cx, cz), Ok(()));
            }
        }
        store.coords().into_iter().filter_map(|(x, z)| store.get_chunk(x, z, false).map(|c| c.lock().clone())).collect()
    }

    #[test]
    fn lakes_skip_oceans_and_rivers() {
        assert!(is_ocean_or_river(biome::ids::FROZEN_RIVER));
        assert!(!is_ocean_or_river(biome::ids::BEACH));
        let ocean = populated(5, lake_settings(biome::ids::OCEAN, true));
        assert!(ocean == populated(5, lake_settings(biome::ids::OCEAN, false)));
        // the same odds on land do dig lakes
        let plains = populated(5, lake_settings(biome::ids::PLAINS, true));
        assert!(plains != populated(5, lake_settings(biome::ids::PLAINS, false)));
    }

    #[test]
    fn population_reads_the_unzoomed_biome() {
        let (_, world_gen) = world(114514);
        let quarter = world_gen.layers().quarter_grid(40, -24, 1, 1)[0];
        assert_eq!(i32::from(world_gen.layers().population_biome(40, -24)), quarter);
    }

    #[test]
    fn population_waits_for_neighbours() {
        let (_, world_gen) = world(7);
        assert_eq!(world_gen.populate_chunk(0, 0), Err(GenError::ChunkMissing { cx: 0, cz: 0 }));
        world_gen.generate_chunk(0, 0);
        world_gen.generate_chunk(1, 0);
        assert!(matches!(world_gen.populate_chunk(0, 0), Err(GenError::NeighborMissing { .. })));
    }

    #[test]
    fn population_marks_the_chunk_and_is_idempotent() {
        let (store, world_gen) = world(7);
        for cx in 0..2 {
            for cz in 0..2 {
                world_gen.generate_chunk(cx, cz);
            }
        }
        assert_eq!(world_gen.populate_chunk(0, 0), Ok(()));
        let first = store.get_chunk(0, 0, false).map(|c| c.lock().clone());
        assert!(first.as_ref().is_some_and(Chunk::is_populated));
        assert_eq!(world_gen.populate_chunk(0, 0), Ok(()));
        let second = store.get_chunk(0, 0, false).map(|c| c.lock().clone());
        assert!(first == second);
    }

    #[test]
    fn population_seed_mixes_both_coordinates() {
        assert_ne!(population_seed(1, 0, 1), population_seed(1, 1, 0));
        assert_eq!(population_seed(1, 3, 4), population_seed(1, 3, 4));
        assert_eq!(population_seed(99, 0, 0), 99);
    }

    #[test]
    fn spawn_stands_on_the_origin_column() {
        let (_, world_gen) = world(12345);
        let spawn = world_gen.spawn();
        assert_eq!((spawn.x, spawn.z), (0, 0));
        assert!((1..256).contains(&spawn.y));
        assert_eq!(world_gen.name(), "overworld");
    }
}
