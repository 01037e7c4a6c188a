//! Static biome table and the per-biome rules generation consults: climate,
//! height parameters, surface blocks and decoration counts.

mod mesa;
mod surface;

pub use mesa::MesaBands;
pub use surface::{ClimateNoise, SurfaceBuilder};

use std::sync::OnceLock;

use strata_blocks::{Block, ids as block};

/// Numeric biome ids.
pub mod ids {
    pub const OCEAN: u8 = 0;
    pub const PLAINS: u8 = 1;
    pub const DESERT: u8 = 2;
    pub const EXTREME_HILLS: u8 = 3;
    pub const FOREST: u8 = 4;
    pub const TAIGA: u8 = 5;
    pub const SWAMPLAND: u8 = 6;
    pub const RIVER: u8 = 7;
    pub const FROZEN_OCEAN: u8 = 10;
    pub const FROZEN_RIVER: u8 = 11;
    pub const ICE_PLAINS: u8 = 12;
    pub const ICE_MOUNTAINS: u8 = 13;
    pub const MUSHROOM_ISLAND: u8 = 14;
    pub const MUSHROOM_ISLAND_SHORE: u8 = 15;
    pub const BEACH: u8 = 16;
    pub const DESERT_HILLS: u8 = 17;
    pub const FOREST_HILLS: u8 = 18;
    pub const TAIGA_HILLS: u8 = 19;
    pub const EXTREME_HILLS_EDGE: u8 = 20;
    pub const JUNGLE: u8 = 21;
    pub const JUNGLE_HILLS: u8 = 22;
    pub const JUNGLE_EDGE: u8 = 23;
    pub const DEEP_OCEAN: u8 = 24;
    pub const STONE_BEACH: u8 = 25;
    pub const COLD_BEACH: u8 = 26;
    pub const BIRCH_FOREST: u8 = 27;
    pub const BIRCH_FOREST_HILLS: u8 = 28;
    pub const ROOFED_FOREST: u8 = 29;
    pub const COLD_TAIGA: u8 = 30;
    pub const COLD_TAIGA_HILLS: u8 = 31;
    pub const MEGA_TAIGA: u8 = 32;
    pub const MEGA_TAIGA_HILLS: u8 = 33;
    pub const EXTREME_HILLS_PLUS: u8 = 34;
    pub const SAVANNA: u8 = 35;
    pub const SAVANNA_PLATEAU: u8 = 36;
    pub const MESA: u8 = 37;
    pub const MESA_PLATEAU_F: u8 = 38;
    pub const MESA_PLATEAU: u8 = 39;
    pub const SUNFLOWER_PLAINS: u8 = 129;
    pub const DESERT_M: u8 = 130;
    pub const EXTREME_HILLS_M: u8 = 131;
    pub const FLOWER_FOREST: u8 = 132;
    pub const TAIGA_M: u8 = 133;
    pub const SWAMPLAND_M: u8 = 134;
    pub const ICE_SPIKES: u8 = 140;
    pub const JUNGLE_M: u8 = 149;
    pub const JUNGLE_EDGE_M: u8 = 151;
    pub const BIRCH_FOREST_M: u8 = 155;
    pub const BIRCH_FOREST_HILLS_M: u8 = 156;
    pub const ROOFED_FOREST_M: u8 = 157;
    pub const COLD_TAIGA_M: u8 = 158;
    pub const MEGA_SPRUCE_TAIGA: u8 = 160;
    pub const MEGA_SPRUCE_TAIGA_HILLS: u8 = 161;
    pub const EXTREME_HILLS_PLUS_M: u8 = 162;
    pub const SAVANNA_M: u8 = 163;
    pub const SAVANNA_PLATEAU_M: u8 = 164;
    pub const MESA_BRYCE: u8 = 165;
    pub const MESA_PLATEAU_F_M: u8 = 166;
    pub const MESA_PLATEAU_M: u8 = 167;
}

use ids::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HillsType {
    Normal,
    ExtraTrees,
    Mutated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForestType {
    Normal,
    Flower,
    Birch,
    Roofed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaigaType {
    Normal,
    Mega,
    MegaSpruce,
}

/// Behavioural class of a biome. Two biomes of the same class count as
/// "equal" for the layer neighbourhood tests regardless of their payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Family {
    Ocean,
    Plains { sunflowers: bool },
    Desert,
    Hills(HillsType),
    Forest(ForestType),
    MutatedBirchForest,
    Taiga(TaigaType),
    Swamp,
    River,
    Snow { spikes: bool },
    MushroomIsland,
    Beach,
    StoneBeach,
    Jungle { edge: bool },
    Savanna,
    MutatedSavanna,
    Mesa { bryce: bool, forest: bool },
}

impl Family {
    #[inline]
    pub fn same_class(self, other: Family) -> bool {
        std::mem::discriminant(&self) == std::mem::discriminant(&other)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TempCategory {
    Ocean,
    Cold,
    Medium,
    Warm,
}

/// Per-chunk decoration counts. Negative counts disable a feature while
/// still consuming the draws that precede it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decor {
    pub trees: i32,
    pub extra_tree_chance: f32,
    pub flowers: i32,
    pub grass: i32,
    pub dead_bushes: i32,
    pub mushrooms: i32,
    pub reeds: i32,
    pub cacti: i32,
    pub sand_patches: i32,
    pub clay: i32,
    pub gravel_patches: i32,
    pub big_mushrooms: i32,
    pub waterlilies: i32,
}

impl Decor {
    pub const DEFAULT: Decor = Decor {
        trees: 0,
        extra_tree_chance: 0.1,
        flowers: 2,
        grass: 1,
        dead_bushes: 0,
        mushrooms: 0,
        reeds: 0,
        cacti: 0,
        sand_patches: 3,
        clay: 1,
        gravel_patches: 1,
        big_mushrooms: 0,
        waterlilies: 0,
    };
}

/// Immutable description of one biome.
#[derive(Clone, Copy, Debug)]
pub struct Biome {
    pub id: u8,
    pub name: &'static str,
    pub family: Family,
    pub base_height: f32,
    pub height_variation: f32,
    pub temperature: f32,
    pub rainfall: f32,
    pub snow: bool,
    pub top: Block,
    pub filler: Block,
    pub decor: Decor,
}

const GRASS: Block = Block::of(block::GRASS);
const DIRT: Block = Block::of(block::DIRT);
const SAND: Block = Block::of(block::SAND);
const RED_SAND: Block = Block::new(block::SAND, 1);
const STONE: Block = Block::of(block::STONE);
const MYCELIUM: Block = Block::of(block::MYCELIUM);
const SNOW_BLOCK: Block = Block::of(block::SNOW);
const WHITE_CLAY: Block = Block::of(block::STAINED_HARDENED_CLAY);

const fn entry(id: u8, name: &'static str, family: Family, height: (f32, f32), climate: (f32, f32)) -> Biome {
    Biome {
        id,
        name,
        family,
        base_height: height.0,
        height_variation: height.1,
        temperature: climate.0,
        rainfall: climate.1,
        snow: false,
        top: GRASS,
        filler: DIRT,
        decor: Decor::DEFAULT,
    }
}

const fn snowy(b: Biome) -> Biome {
    Biome { snow: true, ..b }
}

const fn surface(b: Biome, top: Block, filler: Block) -> Biome {
    Biome { top, filler, ..b }
}

const fn decor(b: Biome, decor: Decor) -> Biome {
    Biome { decor, ..b }
}

const D: Decor = Decor::DEFAULT;
const NO_TREES: Decor = Decor { trees: -999, dead_bushes: 0, reeds: 0, cacti: 0, ..D };
const PLAINS_DECOR: Decor = Decor { trees: 0, extra_tree_chance: 0.05, flowers: 4, grass: 10, ..D };
const DESERT_DECOR: Decor = Decor { trees: -999, dead_bushes: 2, reeds: 50, cacti: 10, ..D };
const HILLS_TREES: Decor = Decor { trees: 3, ..D };
const FOREST_DECOR: Decor = Decor { trees: 10, grass: 2, ..D };
const FLOWER_FOREST_DECOR: Decor = Decor { trees: 6, flowers: 100, grass: 1, ..D };
const ROOFED_DECOR: Decor = Decor { trees: -999, grass: 2, ..D };
const TAIGA_DECOR: Decor = Decor { trees: 10, grass: 1, mushrooms: 1, ..D };
const MEGA_TAIGA_DECOR: Decor = Decor { trees: 10, grass: 7, dead_bushes: 1, mushrooms: 3, ..D };
const SWAMP_DECOR: Decor = Decor {
    trees: 2,
    flowers: 1,
    dead_bushes: 1,
    mushrooms: 8,
    reeds: 10,
    clay: 1,
    waterlilies: 4,
    sand_patches: 0,
    gravel_patches: 0,
    grass: 5,
    ..D
};
const MUSHROOM_DECOR: Decor = Decor { trees: -100, flowers: -100, grass: -100, mushrooms: 1, big_mushrooms: 1, ..D };
const JUNGLE_DECOR: Decor = Decor { trees: 50, grass: 25, flowers: 4, ..D };
const JUNGLE_EDGE_DECOR: Decor = Decor { trees: 2, grass: 25, flowers: 4, ..D };
const SAVANNA_DECOR: Decor = Decor { trees: 1, flowers: 4, grass: 20, ..D };
const SAVANNA_M_DECOR: Decor = Decor { trees: 2, flowers: 2, grass: 5, ..D };
const MESA_DECOR: Decor = Decor { trees: -999, dead_bushes: 20, reeds: 3, cacti: 5, flowers: 0, ..D };
const MESA_FOREST_DECOR: Decor = Decor { trees: 5, ..MESA_DECOR };

const PLAINS_F: Family = Family::Plains { sunflowers: false };
const HILLS: Family = Family::Hills(HillsType::Normal);
const HILLS_EXTRA: Family = Family::Hills(HillsType::ExtraTrees);
const HILLS_M: Family = Family::Hills(HillsType::Mutated);
const FOREST_F: Family = Family::Forest(ForestType::Normal);
const BIRCH_F: Family = Family::Forest(ForestType::Birch);
const ROOFED_F: Family = Family::Forest(ForestType::Roofed);
const TAIGA_F: Family = Family::Taiga(TaigaType::Normal);
const MEGA_F: Family = Family::Taiga(TaigaType::Mega);
const MEGA_SPRUCE_F: Family = Family::Taiga(TaigaType::MegaSpruce);
const SNOW_F: Family = Family::Snow { spikes: false };
const MESA_F: Family = Family::Mesa { bryce: false, forest: false };
const MESA_FOREST_F: Family = Family::Mesa { bryce: false, forest: true };

static TABLE: [Biome; 59] = [
    entry(OCEAN, "ocean", Family::Ocean, (-1.0, 0.1), (0.5, 0.5)),
    decor(entry(PLAINS, "plains", PLAINS_F, (0.125, 0.05), (0.8, 0.4)), PLAINS_DECOR),
    decor(surface(entry(DESERT, "desert", Family::Desert, (0.125, 0.05), (2.0, 0.0)), SAND, SAND), DESERT_DECOR),
    entry(EXTREME_HILLS, "extreme_hills", HILLS, (1.0, 0.5), (0.2, 0.3)),
    decor(entry(FOREST, "forest", FOREST_F, (0.1, 0.2), (0.7, 0.8)), FOREST_DECOR),
    decor(entry(TAIGA, "taiga", TAIGA_F, (0.2, 0.2), (0.25, 0.8)), TAIGA_DECOR),
    decor(entry(SWAMPLAND, "swampland", Family::Swamp, (-0.2, 0.1), (0.8, 0.9)), SWAMP_DECOR),
    entry(RIVER, "river", Family::River, (-0.5, 0.0), (0.5, 0.5)),
    snowy(entry(FROZEN_OCEAN, "frozen_ocean", Family::Ocean, (-1.0, 0.1), (0.0, 0.5))),
    snowy(entry(FROZEN_RIVER, "frozen_river", Family::River, (-0.5, 0.0), (0.0, 0.5))),
    snowy(entry(ICE_PLAINS, "ice_flats", SNOW_F, (0.125, 0.05), (0.0, 0.5))),
    snowy(entry(ICE_MOUNTAINS, "ice_mountains", SNOW_F, (0.45, 0.3), (0.0, 0.5))),
    decor(
        surface(entry(MUSHROOM_ISLAND, "mushroom_island", Family::MushroomIsland, (0.2, 0.3), (0.9, 1.0)), MYCELIUM, DIRT),
        MUSHROOM_DECOR,
    ),
    decor(
        surface(
            entry(MUSHROOM_ISLAND_SHORE, "mushroom_island_shore", Family::MushroomIsland, (0.0, 0.025), (0.9, 1.0)),
            MYCELIUM,
            DIRT,
        ),
        MUSHROOM_DECOR,
    ),
    decor(surface(entry(BEACH, "beaches", Family::Beach, (0.0, 0.025), (0.8, 0.4)), SAND, SAND), NO_TREES),
    decor(surface(entry(DESERT_HILLS, "desert_hills", Family::Desert, (0.45, 0.3), (2.0, 0.0)), SAND, SAND), DESERT_DECOR),
    decor(entry(FOREST_HILLS, "forest_hills", FOREST_F, (0.45, 0.3), (0.7, 0.8)), FOREST_DECOR),
    decor(entry(TAIGA_HILLS, "taiga_hills", TAIGA_F, (0.45, 0.3), (0.25, 0.8)), TAIGA_DECOR),
    decor(entry(EXTREME_HILLS_EDGE, "smaller_extreme_hills", HILLS_EXTRA, (0.8, 0.3), (0.2, 0.3)), HILLS_TREES),
    decor(entry(JUNGLE, "jungle", Family::Jungle { edge: false }, (0.1, 0.2), (0.95, 0.9)), JUNGLE_DECOR),
    decor(entry(JUNGLE_HILLS, "jungle_hills", Family::Jungle { edge: false }, (0.45, 0.3), (0.95, 0.9)), JUNGLE_DECOR),
    decor(entry(JUNGLE_EDGE, "jungle_edge", Family::Jungle { edge: true }, (0.1, 0.2), (0.95, 0.8)), JUNGLE_EDGE_DECOR),
    entry(DEEP_OCEAN, "deep_ocean", Family::Ocean, (-1.8, 0.1), (0.5, 0.5)),
    decor(surface(entry(STONE_BEACH, "stone_beach", Family::StoneBeach, (0.1, 0.8), (0.2, 0.3)), STONE, STONE), NO_TREES),
    decor(
        snowy(surface(entry(COLD_BEACH, "cold_beach", Family::Beach, (0.0, 0.025), (0.05, 0.3)), SAND, SAND)),
        NO_TREES,
    ),
    decor(entry(BIRCH_FOREST, "birch_forest", BIRCH_F, (0.1, 0.2), (0.6, 0.6)), FOREST_DECOR),
    decor(entry(BIRCH_FOREST_HILLS, "birch_forest_hills", BIRCH_F, (0.45, 0.3), (0.6, 0.6)), FOREST_DECOR),
    decor(entry(ROOFED_FOREST, "roofed_forest", ROOFED_F, (0.1, 0.2), (0.7, 0.8)), ROOFED_DECOR),
    decor(snowy(entry(COLD_TAIGA, "taiga_cold", TAIGA_F, (0.2, 0.2), (-0.5, 0.4))), TAIGA_DECOR),
    decor(snowy(entry(COLD_TAIGA_HILLS, "taiga_cold_hills", TAIGA_F, (0.45, 0.3), (-0.5, 0.4))), TAIGA_DECOR),
    decor(entry(MEGA_TAIGA, "redwood_taiga", MEGA_F, (0.2, 0.2), (0.3, 0.8)), MEGA_TAIGA_DECOR),
    decor(entry(MEGA_TAIGA_HILLS, "redwood_taiga_hills", MEGA_F, (0.45, 0.3), (0.3, 0.8)), MEGA_TAIGA_DECOR),
    decor(entry(EXTREME_HILLS_PLUS, "extreme_hills_with_trees", HILLS_EXTRA, (1.0, 0.5), (0.2, 0.3)), HILLS_TREES),
    decor(entry(SAVANNA, "savanna", Family::Savanna, (0.125, 0.05), (1.2, 0.0)), SAVANNA_DECOR),
    decor(entry(SAVANNA_PLATEAU, "savanna_rock", Family::Savanna, (1.5, 0.025), (1.0, 0.0)), SAVANNA_DECOR),
    decor(surface(entry(MESA, "mesa", MESA_F, (0.1, 0.2), (2.0, 0.0)), RED_SAND, WHITE_CLAY), MESA_DECOR),
    decor(
        surface(entry(MESA_PLATEAU_F, "mesa_rock", MESA_FOREST_F, (1.5, 0.025), (2.0, 0.0)), RED_SAND, WHITE_CLAY),
        MESA_FOREST_DECOR,
    ),
    decor(surface(entry(MESA_PLATEAU, "mesa_clear_rock", MESA_F, (1.5, 0.025), (2.0, 0.0)), RED_SAND, WHITE_CLAY), MESA_DECOR),
    decor(
        entry(SUNFLOWER_PLAINS, "mutated_plains", Family::Plains { sunflowers: true }, (0.125, 0.05), (0.8, 0.4)),
        PLAINS_DECOR,
    ),
    decor(surface(entry(DESERT_M, "mutated_desert", Family::Desert, (0.225, 0.25), (2.0, 0.0)), SAND, SAND), DESERT_DECOR),
    entry(EXTREME_HILLS_M, "mutated_extreme_hills", HILLS_M, (1.0, 0.5), (0.2, 0.3)),
    decor(entry(FLOWER_FOREST, "mutated_forest", Family::Forest(ForestType::Flower), (0.1, 0.4), (0.7, 0.8)), FLOWER_FOREST_DECOR),
    decor(entry(TAIGA_M, "mutated_taiga", TAIGA_F, (0.3, 0.4), (0.25, 0.8)), TAIGA_DECOR),
    decor(entry(SWAMPLAND_M, "mutated_swampland", Family::Swamp, (-0.1, 0.3), (0.8, 0.9)), SWAMP_DECOR),
    surface(
        snowy(entry(ICE_SPIKES, "mutated_ice_flats", Family::Snow { spikes: true }, (0.425, 0.45), (0.0, 0.5))),
        SNOW_BLOCK,
        DIRT,
    ),
    decor(entry(JUNGLE_M, "mutated_jungle", Family::Jungle { edge: false }, (0.2, 0.4), (0.95, 0.9)), JUNGLE_DECOR),
    decor(entry(JUNGLE_EDGE_M, "mutated_jungle_edge", Family::Jungle { edge: true }, (0.2, 0.4), (0.95, 0.8)), JUNGLE_EDGE_DECOR),
    decor(entry(BIRCH_FOREST_M, "mutated_birch_forest", Family::MutatedBirchForest, (0.2, 0.4), (0.6, 0.6)), FOREST_DECOR),
    decor(
        entry(BIRCH_FOREST_HILLS_M, "mutated_birch_forest_hills", Family::MutatedBirchForest, (0.55, 0.5), (0.6, 0.6)),
        FOREST_DECOR,
    ),
    decor(entry(ROOFED_FOREST_M, "mutated_roofed_forest", ROOFED_F, (0.2, 0.4), (0.7, 0.8)), ROOFED_DECOR),
    decor(snowy(entry(COLD_TAIGA_M, "mutated_taiga_cold", TAIGA_F, (0.3, 0.4), (-0.5, 0.4))), TAIGA_DECOR),
    decor(entry(MEGA_SPRUCE_TAIGA, "mutated_redwood_taiga", MEGA_SPRUCE_F, (0.2, 0.2), (0.25, 0.8)), MEGA_TAIGA_DECOR),
    decor(
        entry(MEGA_SPRUCE_TAIGA_HILLS, "mutated_redwood_taiga_hills", MEGA_SPRUCE_F, (0.2, 0.2), (0.25, 0.8)),
        MEGA_TAIGA_DECOR,
    ),
    entry(EXTREME_HILLS_PLUS_M, "mutated_extreme_hills_with_trees", HILLS_M, (1.0, 0.5), (0.2, 0.3)),
    decor(entry(SAVANNA_M, "mutated_savanna", Family::MutatedSavanna, (0.3625, 1.225), (1.1, 0.0)), SAVANNA_M_DECOR),
    decor(entry(SAVANNA_PLATEAU_M, "mutated_savanna_rock", Family::MutatedSavanna, (1.05, 1.2125), (1.0, 0.0)), SAVANNA_M_DECOR),
    decor(
        surface(entry(MESA_BRYCE, "mutated_mesa", Family::Mesa { bryce: true, forest: false }, (0.1, 0.2), (2.0, 0.0)), RED_SAND, WHITE_CLAY),
        MESA_DECOR,
    ),
    decor(
        surface(entry(MESA_PLATEAU_F_M, "mutated_mesa_rock", MESA_FOREST_F, (0.45, 0.3), (2.0, 0.0)), RED_SAND, WHITE_CLAY),
        MESA_FOREST_DECOR,
    ),
    decor(surface(entry(MESA_PLATEAU_M, "mutated_mesa_clear_rock", MESA_F, (0.45, 0.3), (2.0, 0.0)), RED_SAND, WHITE_CLAY), MESA_DECOR),
];

/// Base id to mutated id.
const MUTATIONS: [(u8, u8); 21] = [
    (PLAINS, SUNFLOWER_PLAINS),
    (DESERT, DESERT_M),
    (EXTREME_HILLS, EXTREME_HILLS_M),
    (FOREST, FLOWER_FOREST),
    (TAIGA, TAIGA_M),
    (SWAMPLAND, SWAMPLAND_M),
    (ICE_PLAINS, ICE_SPIKES),
    (JUNGLE, JUNGLE_M),
    (JUNGLE_EDGE, JUNGLE_EDGE_M),
    (BIRCH_FOREST, BIRCH_FOREST_M),
    (BIRCH_FOREST_HILLS, BIRCH_FOREST_HILLS_M),
    (ROOFED_FOREST, ROOFED_FOREST_M),
    (COLD_TAIGA, COLD_TAIGA_M),
    (MEGA_TAIGA, MEGA_SPRUCE_TAIGA),
    (MEGA_TAIGA_HILLS, MEGA_SPRUCE_TAIGA_HILLS),
    (EXTREME_HILLS_PLUS, EXTREME_HILLS_PLUS_M),
    (SAVANNA, SAVANNA_M),
    (SAVANNA_PLATEAU, SAVANNA_PLATEAU_M),
    (MESA, MESA_BRYCE),
    (MESA_PLATEAU_F, MESA_PLATEAU_F_M),
    (MESA_PLATEAU, MESA_PLATEAU_M),
];

fn by_id() -> &'static [Option<&'static Biome>; 256] {
    static LOOKUP: OnceLock<[Option<&'static Biome>; 256]> = OnceLock::new();
    LOOKUP.get_or_init(|| {
        let mut out = [None; 256];
        for b in TABLE.iter() {
            out[b.id as usize] = Some(b);
        }
        out
    })
}

/// Registered biome for `id`, if any.
#[inline]
pub fn lookup(id: i32) -> Option<&'static Biome> {
    if (0..256).contains(&id) { by_id()[id as usize] } else { None }
}

/// Biome for `id`; unknown ids resolve to ocean.
#[inline]
pub fn biome(id: u8) -> &'static Biome {
    by_id()[id as usize].unwrap_or(&TABLE[0])
}

pub fn all() -> &'static [Biome] {
    &TABLE
}

/// Mutated counterpart of a base biome.
pub fn mutation(id: i32) -> Option<i32> {
    MUTATIONS.iter().find(|(base, _)| i32::from(*base) == id).map(|(_, m)| i32::from(*m))
}

pub fn is_mutation(id: i32) -> bool {
    MUTATIONS.iter().any(|(_, m)| i32::from(*m) == id)
}

#[inline]
pub fn is_oceanic(id: i32) -> bool {
    id == OCEAN as i32 || id == DEEP_OCEAN as i32 || id == FROZEN_OCEAN as i32
}

pub fn is_mesa(id: i32) -> bool {
    matches!(lookup(id), Some(b) if matches!(b.family, Family::Mesa { .. }))
}

/// Equality used by the layer neighbourhood rules: same id, same class, or
/// both mesa plateaus.
pub fn equal_or_mesa_plateau(a: i32, b: i32) -> bool {
    if a == b {
        return true;
    }
    match (lookup(a), lookup(b)) {
        (Some(ba), Some(bb)) => {
            if ba.id != MESA_PLATEAU_F && ba.id != MESA_PLATEAU {
                ba.family.same_class(bb.family)
            } else {
                bb.id == MESA_PLATEAU_F || bb.id == MESA_PLATEAU
            }
        }
        _ => false,
    }
}

/// Whether two biomes may share an edge without an intermediate biome.
pub fn can_be_neighbors(a: i32, b: i32) -> bool {
    if equal_or_mesa_plateau(a, b) {
        return true;
    }
    match (lookup(a), lookup(b)) {
        (Some(ba), Some(bb)) => {
            let (ta, tb) = (ba.temp_category(), bb.temp_category());
            ta == tb || ta == TempCategory::Medium || tb == TempCategory::Medium
        }
        _ => false,
    }
}

const COLOR_CORNERS: [[f64; 3]; 4] = [
    [71.0, 208.0, 51.0],
    [108.0, 180.0, 147.0],
    [191.0, 182.0, 85.0],
    [128.0, 180.0, 151.0],
];

fn lerp_rgb(a: [f64; 3], b: [f64; 3], s: f64) -> [f64; 3] {
    let inv = 1.0 - s;
    [
        (a[0] * inv + b[0] * s).trunc(),
        (a[1] * inv + b[1] * s).trunc(),
        (a[2] * inv + b[2] * s).trunc(),
    ]
}

impl Biome {
    pub fn temp_category(&self) -> TempCategory {
        if self.family == Family::Ocean {
            TempCategory::Ocean
        } else if self.temperature < 0.2 {
            TempCategory::Cold
        } else if self.temperature < 1.0 {
            TempCategory::Medium
        } else {
            TempCategory::Warm
        }
    }

    pub fn is_snowy(&self) -> bool {
        self.snow
    }

    /// Tint for the column as opaque ARGB, interpolated over the four
    /// grass-colour corners. Temperature and rainfall are clamped to 0..=1.
    pub fn color(&self) -> u32 {
        let temp = f64::from(self.temperature).clamp(0.0, 1.0);
        let rain = f64::from(self.rainfall).clamp(0.0, 1.0);
        let x = (1.0 - temp) * 255.0 / 256.0;
        let z = (1.0 - rain * temp) * 255.0 / 256.0;
        let top = lerp_rgb(COLOR_CORNERS[0], COLOR_CORNERS[1], x);
        let bottom = lerp_rgb(COLOR_CORNERS[2], COLOR_CORNERS[3], x);
        let [r, g, b] = lerp_rgb(top, bottom, z);
        0xFF00_0000 | (r as u32) << 16 | (g as u32) << 8 | b as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_ids_are_unique() {
        let mut seen = [false; 256];
        for b in all() {
            assert!(!seen[b.id as usize], "duplicate id {}", b.id);
            seen[b.id as usize] = true;
        }
    }

    #[test]
    fn unknown_ids_fall_back_to_ocean() {
        assert_eq!(biome(8).id, OCEAN);
        assert_eq!(biome(200).id, OCEAN);
        assert!(lookup(-1).is_none());
        assert!(lookup(300).is_none());
    }

    #[test]
    fn mutations_point_at_registered_biomes() {
        for (base, m) in MUTATIONS {
            assert!(lookup(i32::from(base)).is_some());
            assert!(lookup(i32::from(m)).is_some());
            assert!(is_mutation(i32::from(m)));
            assert!(!is_mutation(i32::from(base)));
        }
        assert_eq!(mutation(i32::from(PLAINS)), Some(i32::from(SUNFLOWER_PLAINS)));
        assert_eq!(mutation(i32::from(DESERT_HILLS)), None);
    }

    #[test]
    fn class_equality_and_plateaus() {
        assert!(equal_or_mesa_plateau(FOREST as i32, BIRCH_FOREST as i32));
        assert!(!equal_or_mesa_plateau(BIRCH_FOREST as i32, BIRCH_FOREST_M as i32));
        assert!(equal_or_mesa_plateau(MESA_PLATEAU as i32, MESA_PLATEAU_F as i32));
        assert!(!equal_or_mesa_plateau(MESA_PLATEAU as i32, MESA as i32));
        assert!(equal_or_mesa_plateau(MESA as i32, MESA_PLATEAU as i32));
        assert!(!equal_or_mesa_plateau(SAVANNA as i32, SAVANNA_M as i32));
        assert!(!equal_or_mesa_plateau(99, 99 + 1));
    }

    #[test]
    fn neighbour_rules_follow_temperature() {
        assert!(can_be_neighbors(DESERT as i32, PLAINS as i32));
        assert!(!can_be_neighbors(DESERT as i32, ICE_PLAINS as i32));
        assert_eq!(biome(EXTREME_HILLS).temp_category(), TempCategory::Medium);
        assert_eq!(biome(FROZEN_OCEAN).temp_category(), TempCategory::Ocean);
        assert_eq!(biome(COLD_TAIGA).temp_category(), TempCategory::Cold);
    }

    #[test]
    fn mutated_birch_keeps_the_birch_climate() {
        for id in [BIRCH_FOREST_M, BIRCH_FOREST_HILLS_M] {
            let (m, base) = (biome(id), biome(BIRCH_FOREST));
            assert_eq!((m.temperature, m.rainfall), (base.temperature, base.rainfall), "{}", m.name);
            assert_eq!(m.color(), base.color());
        }
    }

    #[test]
    fn colors_are_opaque_and_bounded() {
        for b in all() {
            let c = b.color();
            assert_eq!(c >> 24, 0xFF, "{}", b.name);
        }
        // hot and dry sits next to the third corner
        assert_eq!(biome(DESERT).color(), 0xFFBE_B654);
    }
}
