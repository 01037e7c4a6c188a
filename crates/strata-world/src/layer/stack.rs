use std::sync::Arc;

use strata_geom::BlockPos;
use strata_noise::JavaRandom;
use strata_structures::BiomeSource;

use super::*;
use crate::config::GeneratorSettings;

/// The assembled overworld chain for one world seed.
#[derive(Clone)]
pub struct LayerStack {
    biomes: LayerRef,
    blocks: LayerRef,
}

impl LayerStack {
    pub fn new(world_seed: i64, settings: &GeneratorSettings) -> Self {
        let s = world_seed;
        let mut land: LayerRef = Arc::new(Island::new(1, s));
        land = Arc::new(Zoom::fuzzy(2000, s, land));
        land = Arc::new(AddIsland::new(1, s, land));
        land = Arc::new(Zoom::new(2001, s, land));
        land = Arc::new(AddIsland::new(2, s, land));
        land = Arc::new(AddIsland::new(50, s, land));
        land = Arc::new(AddIsland::new(70, s, land));
        land = Arc::new(RemoveTooMuchOcean::new(2, s, land));
        land = Arc::new(AddSnow::new(2, s, land));
        land = Arc::new(AddIsland::new(3, s, land));
        land = Arc::new(Edge::new(2, s, land, EdgeMode::CoolWarm));
        land = Arc::new(Edge::new(2, s, land, EdgeMode::HeatIce));
        land = Arc::new(Edge::new(3, s, land, EdgeMode::Special));
        land = Arc::new(Zoom::new(2002, s, land));
        land = Arc::new(Zoom::new(2003, s, land));
        land = Arc::new(AddIsland::new(4, s, land));
        land = Arc::new(AddMushroomIsland::new(5, s, land));
        land = Arc::new(DeepOcean::new(land));
        let land = magnify(1000, s, land, 0);

        let river_init: LayerRef = Arc::new(RiverInit::new(100, s, magnify(1000, s, land.clone(), 0)));

        let mut biomes: LayerRef = Arc::new(BiomeAssign::new(200, s, land, settings.fixed_biome));
        biomes = magnify(1000, s, biomes, 2);
        biomes = Arc::new(BiomeEdge::new(1000, s, biomes));

        // the hills layer never passes the world seed on to its river input
        let mut hills_noise = river_init.clone();
        for salt in 1000..1002 {
            hills_noise = Arc::new(Zoom::unseeded(salt, hills_noise));
        }
        biomes = Arc::new(Hills::new(1000, s, biomes, hills_noise));

        let mut rivers = magnify(1000, s, river_init, 2);
        rivers = magnify(1000, s, rivers, settings.river_size.max(0) as usize);
        rivers = Arc::new(River::new(1, s, rivers));
        rivers = Arc::new(Smooth::new(1000, s, rivers));

        biomes = Arc::new(RareBiome::new(1001, s, biomes));
        for k in 0..settings.biome_size {
            biomes = Arc::new(Zoom::new(1000 + i64::from(k), s, biomes));
            if k == 0 {
                biomes = Arc::new(AddIsland::new(3, s, biomes));
            }
            if k == 1 || settings.biome_size == 1 {
                biomes = Arc::new(Shore::new(1000, s, biomes));
            }
        }
        biomes = Arc::new(Smooth::new(1000, s, biomes));

        let mixed: LayerRef = Arc::new(RiverMix::new(100, s, biomes, rivers));
        let blocks: LayerRef = Arc::new(VoronoiZoom::new(10, s, mixed.clone()));
        log::debug!(target: "worldgen", "built layer stack for seed {world_seed}");
        Self { biomes: mixed, blocks }
    }

    /// Biome ids at quarter resolution (one cell per 4x4 blocks).
    pub fn biomes(&self) -> &LayerRef {
        &self.biomes
    }

    /// Biome ids per block.
    pub fn blocks(&self) -> &LayerRef {
        &self.blocks
    }

    pub fn quarter_grid(&self, x: i32, z: i32, width: usize, height: usize) -> Vec<i32> {
        self.biomes.get_ints(x, z, width, height)
    }

    pub fn block_grid(&self, x: i32, z: i32, width: usize, height: usize) -> Vec<i32> {
        self.blocks.get_ints(x, z, width, height)
    }

    /// Biome that drives population of the chunk whose corner is `(x - 16, z - 16)`:
    /// the quarter-resolution cell addressed with the block coordinates as they are.
    pub fn population_biome(&self, x: i32, z: i32) -> u8 {
        self.biomes.get_ints(x, z, 1, 1).first().map_or(0, |&v| v.clamp(0, 255) as u8)
    }

    pub fn biome_at(&self, x: i32, z: i32) -> u8 {
        self.blocks.get_ints(x, z, 1, 1).first().map_or(0, |&v| v.clamp(0, 255) as u8)
    }

    fn quarter_area(x: i32, z: i32, radius: i32) -> (i32, i32, usize, usize) {
        let x0 = (x - radius) >> 2;
        let z0 = (z - radius) >> 2;
        let x1 = (x + radius) >> 2;
        let z1 = (z + radius) >> 2;
        (x0, z0, (x1 - x0 + 1) as usize, (z1 - z0 + 1) as usize)
    }

    /// Whether every quarter cell within `radius` blocks of `(x, z)` holds
    /// one of `allowed`.
    pub fn are_biomes_viable(&self, x: i32, z: i32, radius: i32, allowed: &[u8]) -> bool {
        let (x0, z0, w, h) = Self::quarter_area(x, z, radius);
        self.biomes
            .get_ints(x0, z0, w, h)
            .iter()
            .all(|&v| allowed.contains(&crate::biome::biome(v.clamp(0, 255) as u8).id))
    }

    /// A random block position (reservoir sampled) among the quarter cells
    /// near `(x, z)` whose biome is in `allowed`.
    pub fn find_biome_position(
        &self,
        x: i32,
        z: i32,
        radius: i32,
        allowed: &[u8],
        rng: &mut JavaRandom,
    ) -> Option<BlockPos> {
        let (x0, z0, w, h) = Self::quarter_area(x, z, radius);
        let grid = self.biomes.get_ints(x0, z0, w, h);
        let mut found = None;
        let mut hits = 0;
        for (n, &v) in grid.iter().enumerate() {
            let bx = (x0 + (n % w) as i32) << 2;
            let bz = (z0 + (n / w) as i32) << 2;
            if allowed.contains(&crate::biome::biome(v.clamp(0, 255) as u8).id)
                && (found.is_none() || rng.next_bounded_int(hits + 1) == 0)
            {
                found = Some(BlockPos::new(bx, 0, bz));
                hits += 1;
            }
        }
        found
    }
}

impl BiomeSource for LayerStack {
    fn biome(&self, x: i32, z: i32) -> u8 {
        self.biome_at(x, z)
    }

    fn are_biomes_viable(&self, x: i32, z: i32, radius: i32, allowed: &[u8]) -> bool {
        LayerStack::are_biomes_viable(self, x, z, radius, allowed)
    }

    fn find_biome_position(
        &self,
        x: i32,
        z: i32,
        radius: i32,
        allowed: &[u8],
        rng: &mut JavaRandom,
    ) -> Option<BlockPos> {
        LayerStack::find_biome_position(self, x, z, radius, allowed, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::ids;

    fn stack(seed: i64) -> LayerStack {
        LayerStack::new(seed, &GeneratorSettings::default())
    }

    #[test]
    fn stack_is_deterministic() {
        let a = stack(114514).block_grid(0, 0, 16, 16);
        let b = stack(114514).block_grid(0, 0, 16, 16);
        assert_eq!(a, b);
        assert!(a.iter().all(|v| (0..256).contains(v)));
    }

    #[test]
    fn quarter_and_block_grids_agree_on_registered_ids() {
        let s = stack(12345);
        for v in s.quarter_grid(-32, -32, 64, 64) {
            assert!(crate::biome::lookup(v).is_some(), "unregistered id {v}");
        }
    }

    #[test]
    fn viability_matches_the_grid() {
        let s = stack(12345);
        let grid = s.quarter_grid(0, 0, 1, 1);
        let here = grid[0] as u8;
        assert!(s.are_biomes_viable(0, 0, 0, &[here]));
        let other = if here == ids::PLAINS { ids::DESERT } else { ids::PLAINS };
        assert!(!s.are_biomes_viable(0, 0, 0, &[other]));
    }

    #[test]
    fn found_positions_have_the_biome() {
        let s = stack(3);
        let all: Vec<u8> = crate::biome::all().iter().map(|b| b.id).collect();
        let mut rng = JavaRandom::new(1);
        let pos = s.find_biome_position(100, -100, 64, &all, &mut rng);
        let pos = pos.expect("every biome allowed");
        assert_eq!(pos.x & 3, 0);
        assert!((100 - 68..=100 + 68).contains(&pos.x));
        assert!(s.find_biome_position(0, 0, 64, &[], &mut rng).is_none());
    }

    #[test]
    fn block_grid_matches_the_captured_world() {
        const P: i32 = ids::PLAINS as i32;
        const S: i32 = ids::SAVANNA as i32;
        #[rustfmt::skip]
        let expected: [[i32; 16]; 16] = [
            [P, P, P, P, P, P, P, P, P, S, S, S, S, S, S, S],
            [P, P, P, P, P, P, P, P, S, S, S, S, S, S, S, S],
            [P, P, P, P, P, P, P, P, S, S, S, S, S, S, S, S],
            [P, P, P, P, P, P, P, P, S, S, S, S, S, S, S, S],
            [P, P, P, P, P, P, P, P, S, S, S, S, S, S, S, S],
            [P, P, P, P, P, P, P, P, S, S, S, S, S, S, S, S],
            [P, P, P, P, P, P, P, P, S, S, S, S, S, S, S, S],
            [P, P, P, P, P, P, P, P, S, S, S, S, S, S, S, S],
            [P, P, P, P, P, P, P, P, S, S, P, P, P, P, S, S],
            [P, P, P, P, P, P, P, P, P, P, P, P, P, P, S, S],
            [P, P, P, P, P, P, P, P, P, P, P, P, P, S, S, S],
            [P, P, P, P, P, P, P, P, P, P, P, P, P, S, S, S],
            [P, P, P, P, P, P, P, P, P, P, P, P, S, S, S, S],
            [P, P, P, P, P, P, P, P, P, P, P, P, P, S, P, P],
            [P, P, P, P, P, P, P, P, P, P, P, P, P, P, P, P],
            [P, P, P, P, P, P, P, P, P, P, P, P, P, P, P, P],
        ];
        let grid = stack(114514).block_grid(0, 0, 16, 16);
        for (z, row) in expected.iter().enumerate() {
            assert_eq!(&grid[z * 16..z * 16 + 16], row, "row {z}");
        }
        assert_eq!(stack(114514).quarter_grid(0, 0, 4, 4), vec![P, P, S, S, P, P, S, S, P, P, P, S, P, P, P, P]);
    }

    #[test]
    fn hills_noise_ignores_the_world_seed() {
        // with a world-seeded river input these cells mutate into 129 and 166
        let s = stack(114514);
        assert!(s.quarter_grid(-192, -416, 8, 8).iter().all(|&v| v == i32::from(ids::ROOFED_FOREST)));
        assert!(s.quarter_grid(128, -352, 8, 4).iter().all(|&v| v == i32::from(ids::MESA_PLATEAU_F)));
    }
}
