//! Chunk decoration: ores, ground patches, trees, plants and liquid
//! springs, placed in a fixed order with biome-specific extras before and
//! after the shared pass.

mod giant;
mod lakes;
mod misc;
mod ore;
mod plants;
mod trees;

pub use giant::{MushroomKind, huge_mushroom};
pub use lakes::{dungeon, lake, spring};
pub use misc::{boulder, desert_well, freeze_column, ice_path, ice_spike};
pub use ore::{Vein, natural_stone};
pub use plants::{DoublePlant, Flower};
pub use trees::TreeKind;

use strata_blocks::{Block, ids};
use strata_chunk::WorldAccess;
use strata_geom::BlockPos;
use strata_noise::JavaRandom;

use crate::biome::{Biome, ClimateNoise, Decor, Family, ForestType, TaigaType};

#[inline]
pub(crate) fn get(w: &dyn WorldAccess, p: BlockPos) -> Block {
    w.block(p.x, p.y, p.z)
}

#[inline]
pub(crate) fn put(w: &mut dyn WorldAccess, p: BlockPos, b: Block) -> bool {
    w.set_block(p.x, p.y, p.z, b)
}

/// `pos` jittered by a symmetric triangular offset on each axis.
pub(crate) fn scatter(rng: &mut JavaRandom, pos: BlockPos, xz: i32, y: i32) -> BlockPos {
    let dx = rng.next_bounded_int(xz) - rng.next_bounded_int(xz);
    let dy = rng.next_bounded_int(y) - rng.next_bounded_int(y);
    let dz = rng.next_bounded_int(xz) - rng.next_bounded_int(xz);
    pos.add(dx, dy, dz)
}

/// Ground a sapling would take root in.
pub(crate) fn is_soil(b: Block) -> bool {
    matches!(b.id, ids::GRASS | ids::DIRT | ids::FARMLAND)
}

/// Turns the ground under a trunk into dirt, keeping dirt variants.
pub(crate) fn set_dirt(w: &mut dyn WorldAccess, p: BlockPos) {
    if get(w, p).id != ids::DIRT {
        put(w, p, Block::of(ids::DIRT));
    }
}

fn surface(w: &dyn WorldAccess, x: i32, z: i32) -> BlockPos {
    BlockPos::new(x, w.height(x, z), z)
}

/// Runs the decoration pass for one chunk. `origin` is the chunk's
/// minimum corner; features land in the 16x16 area offset by 8 so they
/// straddle the four chunks of the population window.
pub struct Decorator<'a> {
    climate: &'a ClimateNoise,
}

impl<'a> Decorator<'a> {
    pub fn new(climate: &'a ClimateNoise) -> Self {
        Self { climate }
    }

    pub fn decorate(&self, w: &mut dyn WorldAccess, rng: &mut JavaRandom, biome: &Biome, origin: BlockPos) {
        let mut decor = biome.decor;
        match biome.family {
            Family::Plains { sunflowers } => {
                let d = self.climate.grass((origin.x + 8) as f64 / 200.0, (origin.z + 8) as f64 / 200.0);
                if d < -0.8 {
                    decor.flowers = 15;
                    decor.grass = 5;
                } else {
                    decor.flowers = 4;
                    decor.grass = 10;
                    self.scatter_double_plants(w, rng, origin, DoublePlant::Grass, 7);
                }
                if sunflowers {
                    self.scatter_double_plants(w, rng, origin, DoublePlant::Sunflower, 10);
                }
            }
            Family::Forest(kind) => {
                if kind == ForestType::Roofed {
                    self.roofed_canopy(w, rng, biome, origin);
                }
                let mut n = rng.next_bounded_int(5) - 3;
                if kind == ForestType::Flower {
                    n += 2;
                }
                self.forest_double_plants(w, rng, origin, n);
            }
            Family::MutatedBirchForest => {
                let n = rng.next_bounded_int(5) - 3;
                self.forest_double_plants(w, rng, origin, n);
            }
            Family::Taiga(kind) => {
                if kind != TaigaType::Normal {
                    for _ in 0..rng.next_bounded_int(3) {
                        let x = origin.x + rng.next_bounded_int(16) + 8;
                        let z = origin.z + rng.next_bounded_int(16) + 8;
                        let p = surface(w, x, z);
                        misc::boulder(w, rng, p, 0);
                    }
                }
                self.scatter_double_plants(w, rng, origin, DoublePlant::Fern, 7);
            }
            Family::Savanna => self.scatter_double_plants(w, rng, origin, DoublePlant::Grass, 7),
            Family::Snow { spikes: true } => {
                for _ in 0..3 {
                    let x = origin.x + rng.next_bounded_int(16) + 8;
                    let z = origin.z + rng.next_bounded_int(16) + 8;
                    let p = surface(w, x, z);
                    misc::ice_spike(w, rng, p);
                }
                for _ in 0..2 {
                    let x = origin.x + rng.next_bounded_int(16) + 8;
                    let z = origin.z + rng.next_bounded_int(16) + 8;
                    let p = surface(w, x, z);
                    misc::ice_path(w, rng, p, 4);
                }
            }
            _ => {}
        }

        self.shared_pass(w, rng, biome, &decor, origin);

        match biome.family {
            Family::Jungle { .. } => {
                let x = origin.x + rng.next_bounded_int(16) + 8;
                let z = origin.z + rng.next_bounded_int(16) + 8;
                let y = rng.next_bounded_int((w.height(x, z) * 2).max(1));
                plants::melons(w, rng, BlockPos::new(x, y, z));
                for _ in 0..50 {
                    let x = origin.x + rng.next_bounded_int(16) + 8;
                    let z = origin.z + rng.next_bounded_int(16) + 8;
                    plants::climbing_vines(w, rng, BlockPos::new(x, 128, z));
                }
            }
            Family::Hills(_) => ore::mountain_ores(w, rng, origin),
            Family::Desert => {
                if rng.next_bounded_int(1000) == 0 {
                    let x = origin.x + rng.next_bounded_int(16) + 8;
                    let z = origin.z + rng.next_bounded_int(16) + 8;
                    let p = surface(w, x, z);
                    misc::desert_well(w, p.up(1));
                }
                self.fossil_roll(rng, origin);
            }
            Family::Swamp => self.fossil_roll(rng, origin),
            _ => {}
        }
    }

    /// Fossils are not built; only their chance roll is kept so the
    /// stream stays aligned.
    fn fossil_roll(&self, rng: &mut JavaRandom, origin: BlockPos) {
        if rng.next_bounded_int(64) == 0 {
            log::trace!(target: "worldgen", "skipped fossil near {},{}", origin.x, origin.z);
        }
    }

    fn shared_pass(&self, w: &mut dyn WorldAccess, rng: &mut JavaRandom, biome: &Biome, decor: &Decor, origin: BlockPos) {
        ore::standard_ores(w, rng, origin);
        if matches!(biome.family, Family::Mesa { .. }) {
            ore::mesa_gold(w, rng, origin);
        }

        for _ in 0..decor.sand_patches {
            let p = self.solid_top(w, rng, origin);
            plants::patch(w, rng, p, Block::of(ids::SAND), 7);
        }
        for _ in 0..decor.clay {
            let p = self.solid_top(w, rng, origin);
            plants::clay(w, rng, p, 4);
        }
        for _ in 0..decor.gravel_patches {
            let p = self.solid_top(w, rng, origin);
            plants::patch(w, rng, p, Block::of(ids::GRAVEL), 6);
        }

        let mut trees = decor.trees;
        if rng.next_float() < decor.extra_tree_chance {
            trees += 1;
        }
        for _ in 0..trees {
            let x = origin.x + rng.next_bounded_int(16) + 8;
            let z = origin.z + rng.next_bounded_int(16) + 8;
            let kind = pick_tree(biome, rng);
            let p = surface(w, x, z);
            if kind.grow(w, rng, p) {
                kind.dress(w, rng, p);
            }
        }

        for _ in 0..decor.big_mushrooms {
            let x = origin.x + rng.next_bounded_int(16) + 8;
            let z = origin.z + rng.next_bounded_int(16) + 8;
            let p = surface(w, x, z);
            giant::huge_mushroom(w, rng, p, None);
        }

        for _ in 0..decor.flowers {
            let x = origin.x + rng.next_bounded_int(16) + 8;
            let z = origin.z + rng.next_bounded_int(16) + 8;
            let bound = w.height(x, z) + 32;
            if bound > 0 {
                let p = BlockPos::new(x, rng.next_bounded_int(bound), z);
                let flower = self.pick_flower(biome, rng, p);
                plants::flowers(w, rng, p, flower);
            }
        }

        for _ in 0..decor.grass {
            if let Some(p) = doubled_height_point(w, rng, origin) {
                let meta = grass_meta(biome, rng);
                plants::tall_grass(w, rng, p, meta);
            }
        }

        for _ in 0..decor.dead_bushes {
            if let Some(p) = doubled_height_point(w, rng, origin) {
                plants::dead_bush(w, rng, p);
            }
        }

        for _ in 0..decor.waterlilies {
            if let Some(mut p) = doubled_height_point(w, rng, origin) {
                while p.y > 0 && w.is_air(p.x, p.y - 1, p.z) {
                    p = p.down(1);
                }
                plants::waterlilies(w, rng, p);
            }
        }

        let brown = Block::of(ids::BROWN_MUSHROOM);
        let red = Block::of(ids::RED_MUSHROOM);
        for _ in 0..decor.mushrooms {
            if rng.next_bounded_int(4) == 0 {
                let x = origin.x + rng.next_bounded_int(16) + 8;
                let z = origin.z + rng.next_bounded_int(16) + 8;
                let p = surface(w, x, z);
                plants::mushrooms(w, rng, p, brown);
            }
            if rng.next_bounded_int(8) == 0 {
                if let Some(p) = doubled_height_point(w, rng, origin) {
                    plants::mushrooms(w, rng, p, red);
                }
            }
        }
        if rng.next_bounded_int(4) == 0 {
            if let Some(p) = doubled_height_point(w, rng, origin) {
                plants::mushrooms(w, rng, p, brown);
            }
        }
        if rng.next_bounded_int(8) == 0 {
            if let Some(p) = doubled_height_point(w, rng, origin) {
                plants::mushrooms(w, rng, p, red);
            }
        }

        for _ in 0..decor.reeds + 10 {
            if let Some(p) = doubled_height_point(w, rng, origin) {
                plants::reeds(w, rng, p);
            }
        }

        if rng.next_bounded_int(32) == 0 {
            if let Some(p) = doubled_height_point(w, rng, origin) {
                plants::pumpkins(w, rng, p);
            }
        }

        for _ in 0..decor.cacti {
            if let Some(p) = doubled_height_point(w, rng, origin) {
                plants::cacti(w, rng, p);
            }
        }

        for _ in 0..50 {
            let x = origin.x + rng.next_bounded_int(16) + 8;
            let z = origin.z + rng.next_bounded_int(16) + 8;
            let bound = rng.next_bounded_int(248) + 8;
            let y = rng.next_bounded_int(bound);
            lakes::spring(w, BlockPos::new(x, y, z), Block::of(ids::FLOWING_WATER));
        }
        for _ in 0..20 {
            let x = origin.x + rng.next_bounded_int(16) + 8;
            let z = origin.z + rng.next_bounded_int(16) + 8;
            let inner = rng.next_bounded_int(240) + 8;
            let bound = rng.next_bounded_int(inner) + 8;
            let y = rng.next_bounded_int(bound);
            lakes::spring(w, BlockPos::new(x, y, z), Block::of(ids::FLOWING_LAVA));
        }
    }

    fn solid_top(&self, w: &dyn WorldAccess, rng: &mut JavaRandom, origin: BlockPos) -> BlockPos {
        let x = origin.x + rng.next_bounded_int(16) + 8;
        let z = origin.z + rng.next_bounded_int(16) + 8;
        BlockPos::new(x, w.top_solid_or_liquid(x, z), z)
    }

    fn scatter_double_plants(
        &self,
        w: &mut dyn WorldAccess,
        rng: &mut JavaRandom,
        origin: BlockPos,
        kind: DoublePlant,
        count: i32,
    ) {
        for _ in 0..count {
            let x = origin.x + rng.next_bounded_int(16) + 8;
            let z = origin.z + rng.next_bounded_int(16) + 8;
            let y = rng.next_bounded_int(w.height(x, z) + 32);
            plants::double_plants(w, rng, BlockPos::new(x, y, z), kind);
        }
    }

    /// Forest shrubs: each of `count` picks a kind and gets up to five
    /// placement tries.
    fn forest_double_plants(&self, w: &mut dyn WorldAccess, rng: &mut JavaRandom, origin: BlockPos, count: i32) {
        for _ in 0..count {
            let kind = match rng.next_bounded_int(3) {
                0 => DoublePlant::Syringa,
                1 => DoublePlant::Rose,
                _ => DoublePlant::Paeonia,
            };
            for _ in 0..5 {
                let x = origin.x + rng.next_bounded_int(16) + 8;
                let z = origin.z + rng.next_bounded_int(16) + 8;
                let y = rng.next_bounded_int(w.height(x, z) + 32);
                if plants::double_plants(w, rng, BlockPos::new(x, y, z), kind) {
                    break;
                }
            }
        }
    }

    /// The roofed forest's 4x4 grid of dark oaks and huge mushrooms.
    fn roofed_canopy(&self, w: &mut dyn WorldAccess, rng: &mut JavaRandom, biome: &Biome, origin: BlockPos) {
        for i in 0..4 {
            for j in 0..4 {
                let x = origin.x + i * 4 + 9 + rng.next_bounded_int(3);
                let z = origin.z + j * 4 + 9 + rng.next_bounded_int(3);
                let p = surface(w, x, z);
                if rng.next_bounded_int(20) == 0 {
                    giant::huge_mushroom(w, rng, p, None);
                } else {
                    let kind = pick_tree(biome, rng);
                    if kind.grow(w, rng, p) {
                        kind.dress(w, rng, p);
                    }
                }
            }
        }
    }

    fn pick_flower(&self, biome: &Biome, rng: &mut JavaRandom, pos: BlockPos) -> Flower {
        match biome.family {
            Family::Plains { .. } => {
                let d = self.climate.grass(pos.x as f64 / 200.0, pos.z as f64 / 200.0);
                if d < -0.8 {
                    match rng.next_bounded_int(4) {
                        0 => Flower::OrangeTulip,
                        1 => Flower::RedTulip,
                        2 => Flower::PinkTulip,
                        _ => Flower::WhiteTulip,
                    }
                } else if rng.next_bounded_int(3) > 0 {
                    match rng.next_bounded_int(3) {
                        0 => Flower::Poppy,
                        1 => Flower::Houstonia,
                        _ => Flower::OxeyeDaisy,
                    }
                } else {
                    Flower::Dandelion
                }
            }
            Family::Forest(ForestType::Flower) => {
                let t = ((1.0 + self.climate.grass(pos.x as f64 / 48.0, pos.z as f64 / 48.0)) / 2.0).clamp(0.0, 0.9999);
                match Flower::GRADIENT[(t * Flower::GRADIENT.len() as f64) as usize] {
                    Flower::BlueOrchid => Flower::Poppy,
                    f => f,
                }
            }
            Family::Swamp => Flower::BlueOrchid,
            _ => default_flower(rng),
        }
    }
}

fn default_flower(rng: &mut JavaRandom) -> Flower {
    if rng.next_bounded_int(3) > 0 { Flower::Dandelion } else { Flower::Poppy }
}

/// A column in the decoration area with a y drawn below twice its height;
/// None when the column is empty.
fn doubled_height_point(w: &dyn WorldAccess, rng: &mut JavaRandom, origin: BlockPos) -> Option<BlockPos> {
    let x = origin.x + rng.next_bounded_int(16) + 8;
    let z = origin.z + rng.next_bounded_int(16) + 8;
    let bound = w.height(x, z) * 2;
    (bound > 0).then(|| BlockPos::new(x, rng.next_bounded_int(bound), z))
}

fn default_tree(rng: &mut JavaRandom) -> TreeKind {
    if rng.next_bounded_int(10) == 0 { TreeKind::BigOak } else { TreeKind::Oak }
}

/// The tree a biome grows for one attempt.
pub fn pick_tree(biome: &Biome, rng: &mut JavaRandom) -> TreeKind {
    match biome.family {
        Family::Plains { .. } => {
            if rng.next_bounded_int(3) == 0 {
                TreeKind::BigOak
            } else {
                TreeKind::Oak
            }
        }
        Family::Forest(kind) => {
            if kind == ForestType::Roofed && rng.next_bounded_int(3) > 0 {
                TreeKind::DarkOak
            } else if kind != ForestType::Birch && rng.next_bounded_int(5) != 0 {
                default_tree(rng)
            } else {
                TreeKind::Birch
            }
        }
        Family::MutatedBirchForest => {
            if rng.next_bool() {
                TreeKind::TallBirch
            } else {
                TreeKind::Birch
            }
        }
        Family::Taiga(kind) => {
            if kind != TaigaType::Normal && rng.next_bounded_int(3) == 0 {
                if kind != TaigaType::MegaSpruce && rng.next_bounded_int(13) != 0 {
                    TreeKind::MegaPine
                } else {
                    TreeKind::MegaSpruce
                }
            } else if rng.next_bounded_int(3) == 0 {
                TreeKind::Pine
            } else {
                TreeKind::Spruce
            }
        }
        Family::Swamp => TreeKind::Swamp,
        Family::Jungle { edge } => {
            if rng.next_bounded_int(10) == 0 {
                TreeKind::BigOak
            } else if rng.next_bounded_int(2) == 0 {
                TreeKind::JungleShrub
            } else if !edge && rng.next_bounded_int(3) == 0 {
                TreeKind::MegaJungle
            } else {
                TreeKind::Jungle { base_height: 4 + rng.next_bounded_int(7) }
            }
        }
        Family::Savanna | Family::MutatedSavanna => {
            if rng.next_bounded_int(5) > 0 {
                TreeKind::Savanna
            } else {
                TreeKind::Oak
            }
        }
        Family::Hills(_) => {
            if rng.next_bounded_int(3) > 0 {
                TreeKind::Spruce
            } else {
                default_tree(rng)
            }
        }
        Family::Snow { .. } => TreeKind::Spruce,
        Family::Mesa { .. } => TreeKind::Oak,
        _ => default_tree(rng),
    }
}

/// Tall grass meta: 1 for grass, 2 for fern.
fn grass_meta(biome: &Biome, rng: &mut JavaRandom) -> u8 {
    let fern = match biome.family {
        Family::Taiga(_) => rng.next_bounded_int(5) > 0,
        Family::Jungle { .. } => rng.next_bounded_int(4) == 0,
        _ => false,
    };
    if fern { 2 } else { 1 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::{self, ids as biome_ids};
    use strata_chunk::{Chunk, ChunkHandles, ChunkManager, ChunkStore};

    /// A 2x2 block of flat chunks: stone to y 62, grass at 63.
    fn flat_store(biome_id: u8) -> ChunkStore {
        let store = ChunkStore::new();
        for cx in 0..2 {
            for cz in 0..2 {
                let mut c = Chunk::new(cx, cz);
                for x in 0..16 {
                    for z in 0..16 {
                        c.set_block(x, 0, z, Block::of(ids::BEDROCK));
                        for y in 1..63 {
                            c.set_block(x, y, z, Block::of(ids::STONE));
                        }
                        c.set_block(x, 63, z, Block::of(ids::GRASS));
                        c.set_biome(x, z, biome_id);
                    }
                }
                store.set_chunk(c);
            }
        }
        store
    }

    fn decorate_window(store: &ChunkStore, biome_id: u8, seed: i64) -> [u32; 256] {
        let climate = ClimateNoise::new();
        let handles = ChunkHandles::collect(store, (0, 0), (1, 1)).expect("window present");
        let mut window = handles.lock();
        let mut rng = JavaRandom::new(seed);
        Decorator::new(&climate).decorate(&mut window, &mut rng, biome::biome(biome_id), BlockPos::new(0, 0, 0));
        let mut total = [0u32; 256];
        for (cx, cz) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            let h = window.chunk(cx, cz).map(|c| c.histogram()).unwrap_or([0; 256]);
            for (t, v) in total.iter_mut().zip(h) {
                *t += v;
            }
        }
        total
    }

    #[test]
    fn decoration_is_deterministic() {
        let a = decorate_window(&flat_store(biome_ids::FOREST), biome_ids::FOREST, 77);
        let b = decorate_window(&flat_store(biome_ids::FOREST), biome_ids::FOREST, 77);
        assert_eq!(a, b);
    }

    #[test]
    fn forests_grow_trees() {
        let h = decorate_window(&flat_store(biome_ids::FOREST), biome_ids::FOREST, 1);
        assert!(h[ids::LOG as usize] > 0);
        assert!(h[ids::LEAVES as usize] > 0);
        assert!(h[ids::COAL_ORE as usize] > 0);
    }

    #[test]
    fn plains_get_grass_and_flowers() {
        let mut grass = 0;
        let mut flowers = 0;
        for seed in 0..12 {
            let h = decorate_window(&flat_store(biome_ids::PLAINS), biome_ids::PLAINS, seed);
            grass += h[ids::TALLGRASS as usize];
            flowers += h[ids::YELLOW_FLOWER as usize] + h[ids::RED_FLOWER as usize] + h[ids::DOUBLE_PLANT as usize];
        }
        assert!(grass > 0);
        assert!(flowers > 0);
    }

    #[test]
    fn decoration_stays_in_the_window() {
        let store = flat_store(biome_ids::JUNGLE);
        decorate_window(&store, biome_ids::JUNGLE, 9);
        // only the four window chunks exist; nothing leaked into new ones
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn tree_pickers_follow_the_biome() {
        let mut rng = JavaRandom::new(3);
        for _ in 0..50 {
            assert_eq!(pick_tree(biome::biome(biome_ids::SWAMPLAND), &mut rng), TreeKind::Swamp);
            let taiga = pick_tree(biome::biome(biome_ids::TAIGA), &mut rng);
            assert!(matches!(taiga, TreeKind::Pine | TreeKind::Spruce));
            let birch = pick_tree(biome::biome(biome_ids::BIRCH_FOREST), &mut rng);
            assert_eq!(birch, TreeKind::Birch);
        }
    }

    #[test]
    fn scatter_stays_within_its_spread() {
        let mut rng = JavaRandom::new(0);
        for _ in 0..200 {
            let p = scatter(&mut rng, BlockPos::new(0, 64, 0), 8, 4);
            assert!((-7..=7).contains(&p.x) && (-7..=7).contains(&p.z));
            assert!((61..=67).contains(&p.y));
        }
    }
}
