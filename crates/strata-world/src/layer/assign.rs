//! Layers that turn climate codes into concrete biome ids and refine them
//! along their borders.

use super::{GenLayer, LayerRef, LayerSeed, Padded};
use crate::biome::{self, ids};

const WARM: [u8; 6] = [ids::DESERT, ids::DESERT, ids::DESERT, ids::SAVANNA, ids::SAVANNA, ids::PLAINS];
const MEDIUM: [u8; 6] = [ids::FOREST, ids::ROOFED_FOREST, ids::EXTREME_HILLS, ids::PLAINS, ids::BIRCH_FOREST, ids::SWAMPLAND];
const COLD: [u8; 4] = [ids::FOREST, ids::EXTREME_HILLS, ids::TAIGA, ids::PLAINS];
const ICE: [u8; 4] = [ids::ICE_PLAINS, ids::ICE_PLAINS, ids::ICE_PLAINS, ids::COLD_TAIGA];

#[inline]
fn id(v: u8) -> i32 {
    i32::from(v)
}

/// Picks a biome from the weighted list for each climate code.
pub struct BiomeAssign {
    seed: LayerSeed,
    parent: LayerRef,
    fixed: Option<u8>,
}

impl BiomeAssign {
    pub fn new(salt: i64, world_seed: i64, parent: LayerRef, fixed: Option<u8>) -> Self {
        Self { seed: LayerSeed::new(salt, world_seed), parent, fixed }
    }
}

impl GenLayer for BiomeAssign {
    fn get_ints(&self, x: i32, z: i32, width: usize, height: usize) -> Vec<i32> {
        let input = self.parent.get_ints(x, z, width, height);
        let mut out = vec![0; width * height];
        for j in 0..height {
            for i in 0..width {
                let n = i + j * width;
                let mut r = self.seed.cell(x + i as i32, z + j as i32);
                let special = (input[n] & 0xF00) >> 8;
                let k = input[n] & !0xF00;
                let pick = |r: &mut super::CellRng, list: &[u8]| id(list[r.next_int(list.len() as i32) as usize]);
                out[n] = if let Some(f) = self.fixed {
                    id(f)
                } else if biome::is_oceanic(k) || k == id(ids::MUSHROOM_ISLAND) {
                    k
                } else {
                    match k {
                        1 if special > 0 => {
                            if r.next_int(3) == 0 { id(ids::MESA_PLATEAU) } else { id(ids::MESA_PLATEAU_F) }
                        }
                        1 => pick(&mut r, &WARM),
                        2 if special > 0 => id(ids::JUNGLE),
                        2 => pick(&mut r, &MEDIUM),
                        3 if special > 0 => id(ids::MEGA_TAIGA),
                        3 => pick(&mut r, &COLD),
                        4 => pick(&mut r, &ICE),
                        _ => id(ids::MUSHROOM_ISLAND),
                    }
                };
            }
        }
        out
    }
}

/// Inserts transition biomes where incompatible biomes meet.
pub struct BiomeEdge {
    parent: LayerRef,
}

impl BiomeEdge {
    pub fn new(_salt: i64, _world_seed: i64, parent: LayerRef) -> Self {
        Self { parent }
    }
}

/// Replacement when `k` is in the class of `target` and a neighbour cannot
/// border `target` directly.
fn replace_if_incompatible(k: i32, cross: [i32; 4], target: u8, with: u8) -> Option<i32> {
    if !biome::equal_or_mesa_plateau(k, id(target)) {
        return None;
    }
    let ok = cross.iter().all(|&n| biome::can_be_neighbors(n, id(target)));
    Some(if ok { k } else { id(with) })
}

/// Replacement when `k` is exactly `target` and any neighbour is of
/// another class.
fn replace_if_bordered(k: i32, cross: [i32; 4], target: u8, with: u8) -> Option<i32> {
    if k != id(target) {
        return None;
    }
    let inside = cross.iter().all(|&n| biome::equal_or_mesa_plateau(n, id(target)));
    Some(if inside { k } else { id(with) })
}

impl GenLayer for BiomeEdge {
    fn get_ints(&self, x: i32, z: i32, width: usize, height: usize) -> Vec<i32> {
        let p = Padded::fetch(self.parent.as_ref(), x, z, width, height);
        let mut out = vec![0; width * height];
        for j in 0..height {
            for i in 0..width {
                let k = p.center(i, j);
                let cross = p.cross(i, j);
                out[i + j * width] = replace_if_incompatible(k, cross, ids::EXTREME_HILLS, ids::EXTREME_HILLS_EDGE)
                    .or_else(|| replace_if_bordered(k, cross, ids::MESA_PLATEAU_F, ids::MESA))
                    .or_else(|| replace_if_bordered(k, cross, ids::MESA_PLATEAU, ids::MESA))
                    .or_else(|| replace_if_bordered(k, cross, ids::MEGA_TAIGA, ids::TAIGA))
                    .unwrap_or_else(|| {
                        if k == id(ids::DESERT) {
                            if cross.contains(&id(ids::ICE_PLAINS)) { id(ids::EXTREME_HILLS_PLUS) } else { k }
                        } else if k == id(ids::SWAMPLAND) {
                            let cold = [id(ids::DESERT), id(ids::COLD_TAIGA), id(ids::ICE_PLAINS)];
                            if cross.iter().any(|n| cold.contains(n)) {
                                id(ids::PLAINS)
                            } else if cross.contains(&id(ids::JUNGLE)) {
                                id(ids::JUNGLE_EDGE)
                            } else {
                                k
                            }
                        } else {
                            k
                        }
                    });
            }
        }
        out
    }
}

/// Raises uniform areas into their hills variants and applies mutations
/// keyed off the river noise.
pub struct Hills {
    seed: LayerSeed,
    parent: LayerRef,
    river: LayerRef,
}

impl Hills {
    pub fn new(salt: i64, world_seed: i64, parent: LayerRef, river: LayerRef) -> Self {
        Self { seed: LayerSeed::new(salt, world_seed), parent, river }
    }
}

fn hills_variant(k: i32, r: &mut super::CellRng) -> i32 {
    match k as u8 {
        _ if k < 0 || k > 255 => k,
        ids::DESERT => id(ids::DESERT_HILLS),
        ids::FOREST => id(ids::FOREST_HILLS),
        ids::BIRCH_FOREST => id(ids::BIRCH_FOREST_HILLS),
        ids::ROOFED_FOREST => id(ids::PLAINS),
        ids::TAIGA => id(ids::TAIGA_HILLS),
        ids::MEGA_TAIGA => id(ids::MEGA_TAIGA_HILLS),
        ids::COLD_TAIGA => id(ids::COLD_TAIGA_HILLS),
        ids::PLAINS => {
            if r.next_int(3) == 0 { id(ids::FOREST_HILLS) } else { id(ids::FOREST) }
        }
        ids::ICE_PLAINS => id(ids::ICE_MOUNTAINS),
        ids::JUNGLE => id(ids::JUNGLE_HILLS),
        ids::OCEAN => id(ids::DEEP_OCEAN),
        ids::EXTREME_HILLS => id(ids::EXTREME_HILLS_PLUS),
        ids::SAVANNA => id(ids::SAVANNA_PLATEAU),
        _ if biome::equal_or_mesa_plateau(k, id(ids::MESA_PLATEAU_F)) => id(ids::MESA),
        ids::DEEP_OCEAN if r.next_int(3) == 0 => {
            if r.next_int(2) == 0 { id(ids::PLAINS) } else { id(ids::FOREST) }
        }
        _ => k,
    }
}

impl GenLayer for Hills {
    fn get_ints(&self, x: i32, z: i32, width: usize, height: usize) -> Vec<i32> {
        let p = Padded::fetch(self.parent.as_ref(), x, z, width, height);
        let rivers = Padded::fetch(self.river.as_ref(), x, z, width, height);
        let mut out = vec![0; width * height];
        for j in 0..height {
            for i in 0..width {
                let mut r = self.seed.cell(x + i as i32, z + j as i32);
                let k = p.center(i, j);
                let l = rivers.center(i, j);
                let mutate = (l - 2) % 29 == 0;
                if k > 255 {
                    log::debug!(target: "worldgen", "hills layer saw out of range biome {k}");
                }
                out[i + j * width] = if k != 0 && l >= 2 && (l - 2) % 29 == 1 && !biome::is_mutation(k) {
                    biome::mutation(k).unwrap_or(k)
                } else if r.next_int(3) != 0 && !mutate {
                    k
                } else {
                    let mut variant = hills_variant(k, &mut r);
                    if mutate && variant != k {
                        variant = biome::mutation(variant).unwrap_or(k);
                    }
                    if variant == k {
                        k
                    } else {
                        let same = p.cross(i, j).iter().filter(|&&n| biome::equal_or_mesa_plateau(n, k)).count();
                        if same >= 3 { variant } else { k }
                    }
                };
            }
        }
        out
    }
}

/// One plains cell in 57 becomes sunflower plains.
pub struct RareBiome {
    seed: LayerSeed,
    parent: LayerRef,
}

impl RareBiome {
    pub fn new(salt: i64, world_seed: i64, parent: LayerRef) -> Self {
        Self { seed: LayerSeed::new(salt, world_seed), parent }
    }
}

impl GenLayer for RareBiome {
    fn get_ints(&self, x: i32, z: i32, width: usize, height: usize) -> Vec<i32> {
        let p = Padded::fetch(self.parent.as_ref(), x, z, width, height);
        let mut out = vec![0; width * height];
        for j in 0..height {
            for i in 0..width {
                let mut r = self.seed.cell(x + i as i32, z + j as i32);
                let k = p.center(i, j);
                out[i + j * width] = if r.next_int(57) == 0 && k == id(ids::PLAINS) { id(ids::SUNFLOWER_PLAINS) } else { k };
            }
        }
        out
    }
}

/// Beaches, stone shores and jungle edges along coastlines.
pub struct Shore {
    parent: LayerRef,
}

impl Shore {
    pub fn new(_salt: i64, _world_seed: i64, parent: LayerRef) -> Self {
        Self { parent }
    }
}

fn jungle_compatible(v: i32) -> bool {
    if matches!(biome::lookup(v), Some(b) if matches!(b.family, biome::Family::Jungle { .. })) {
        return true;
    }
    v == id(ids::FOREST) || v == id(ids::TAIGA) || biome::is_oceanic(v)
}

fn beach_if_coastal(k: i32, cross: [i32; 4], beach: u8) -> i32 {
    if biome::is_oceanic(k) {
        k
    } else if cross.iter().any(|&n| biome::is_oceanic(n)) {
        id(beach)
    } else {
        k
    }
}

impl GenLayer for Shore {
    fn get_ints(&self, x: i32, z: i32, width: usize, height: usize) -> Vec<i32> {
        let p = Padded::fetch(self.parent.as_ref(), x, z, width, height);
        let mut out = vec![0; width * height];
        for j in 0..height {
            for i in 0..width {
                let k = p.center(i, j);
                let cross = p.cross(i, j);
                let b = biome::lookup(k);
                let hills = [ids::EXTREME_HILLS, ids::EXTREME_HILLS_PLUS, ids::EXTREME_HILLS_EDGE].map(id);
                out[i + j * width] = if k == id(ids::MUSHROOM_ISLAND) {
                    if cross.contains(&id(ids::OCEAN)) { id(ids::MUSHROOM_ISLAND_SHORE) } else { k }
                } else if matches!(b, Some(b) if matches!(b.family, biome::Family::Jungle { .. })) {
                    if !cross.iter().all(|&n| jungle_compatible(n)) {
                        id(ids::JUNGLE_EDGE)
                    } else if cross.iter().any(|&n| biome::is_oceanic(n)) {
                        id(ids::BEACH)
                    } else {
                        k
                    }
                } else if hills.contains(&k) {
                    beach_if_coastal(k, cross, ids::STONE_BEACH)
                } else if matches!(b, Some(b) if b.is_snowy()) {
                    beach_if_coastal(k, cross, ids::COLD_BEACH)
                } else if k == id(ids::MESA) || k == id(ids::MESA_PLATEAU_F) {
                    if cross.iter().all(|&n| !biome::is_oceanic(n)) {
                        if cross.iter().all(|&n| biome::is_mesa(n)) { k } else { id(ids::DESERT) }
                    } else {
                        k
                    }
                } else if k != id(ids::OCEAN) && k != id(ids::DEEP_OCEAN) && k != id(ids::RIVER) && k != id(ids::SWAMPLAND) {
                    if cross.iter().any(|&n| biome::is_oceanic(n)) { id(ids::BEACH) } else { k }
                } else {
                    k
                };
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    /// A fixed grid repeated over the plane.
    struct Tiled {
        cells: Vec<i32>,
        size: i32,
    }

    impl GenLayer for Tiled {
        fn get_ints(&self, x: i32, z: i32, width: usize, height: usize) -> Vec<i32> {
            let mut out = Vec::with_capacity(width * height);
            for j in 0..height as i32 {
                for i in 0..width as i32 {
                    let (tx, tz) = ((x + i).rem_euclid(self.size), (z + j).rem_euclid(self.size));
                    out.push(self.cells[(tx + tz * self.size) as usize]);
                }
            }
            out
        }
    }

    fn constant(v: u8) -> LayerRef {
        Arc::new(Tiled { cells: vec![id(v)], size: 1 })
    }

    /// 3x3 tile with `center` surrounded by `ring`.
    fn island(center: u8, ring: u8) -> LayerRef {
        let mut cells = vec![id(ring); 9];
        cells[4] = id(center);
        Arc::new(Tiled { cells, size: 3 })
    }

    #[test]
    fn climate_codes_map_to_their_lists() {
        for (code, list) in [(1, &WARM[..]), (2, &MEDIUM[..]), (3, &COLD[..]), (4, &ICE[..])] {
            let layer = BiomeAssign::new(200, 99, Arc::new(Tiled { cells: vec![code], size: 1 }), None);
            for v in layer.get_ints(-20, 7, 24, 24) {
                assert!(list.contains(&(v as u8)), "code {code} -> {v}");
            }
        }
        let special = BiomeAssign::new(200, 99, Arc::new(Tiled { cells: vec![2 | 0x300], size: 1 }), None);
        assert!(special.get_ints(0, 0, 8, 8).iter().all(|&v| v == id(ids::JUNGLE)));
    }

    #[test]
    fn fixed_biome_overrides_everything() {
        let layer = BiomeAssign::new(200, 1, Arc::new(Tiled { cells: vec![0, 1, 2, 3], size: 2 }), Some(ids::SAVANNA));
        assert!(layer.get_ints(0, 0, 6, 6).iter().all(|&v| v == id(ids::SAVANNA)));
    }

    #[test]
    fn desert_next_to_ice_becomes_wooded_hills() {
        let edge = BiomeEdge::new(1000, 1, island(ids::DESERT, ids::ICE_PLAINS));
        assert_eq!(edge.get_ints(1, 1, 1, 1), vec![id(ids::EXTREME_HILLS_PLUS)]);
        let swamp = BiomeEdge::new(1000, 1, island(ids::SWAMPLAND, ids::JUNGLE));
        assert_eq!(swamp.get_ints(1, 1, 1, 1), vec![id(ids::JUNGLE_EDGE)]);
        let mesa = BiomeEdge::new(1000, 1, island(ids::MESA_PLATEAU, ids::PLAINS));
        assert_eq!(mesa.get_ints(1, 1, 1, 1), vec![id(ids::MESA)]);
    }

    #[test]
    fn uniform_regions_pass_through_edges() {
        let edge = BiomeEdge::new(1000, 1, constant(ids::MEGA_TAIGA));
        assert!(edge.get_ints(-4, -4, 8, 8).iter().all(|&v| v == id(ids::MEGA_TAIGA)));
    }

    #[test]
    fn shores_follow_the_coast() {
        let shore = Shore::new(1000, 1, island(ids::PLAINS, ids::OCEAN));
        assert_eq!(shore.get_ints(1, 1, 1, 1), vec![id(ids::BEACH)]);
        let cold = Shore::new(1000, 1, island(ids::ICE_PLAINS, ids::OCEAN));
        assert_eq!(cold.get_ints(1, 1, 1, 1), vec![id(ids::COLD_BEACH)]);
        let hills = Shore::new(1000, 1, island(ids::EXTREME_HILLS, ids::DEEP_OCEAN));
        assert_eq!(hills.get_ints(1, 1, 1, 1), vec![id(ids::STONE_BEACH)]);
        let mushroom = Shore::new(1000, 1, island(ids::MUSHROOM_ISLAND, ids::OCEAN));
        assert_eq!(mushroom.get_ints(1, 1, 1, 1), vec![id(ids::MUSHROOM_ISLAND_SHORE)]);
        let jungle = Shore::new(1000, 1, island(ids::JUNGLE, ids::DESERT));
        assert_eq!(jungle.get_ints(1, 1, 1, 1), vec![id(ids::JUNGLE_EDGE)]);
    }

    #[test]
    fn hills_only_rise_inside_uniform_areas() {
        let rivers = Arc::new(Tiled { cells: vec![0], size: 1 });
        let lone = Hills::new(1000, 5, island(ids::DESERT, ids::PLAINS), rivers.clone());
        for v in lone.get_ints(-30, -30, 60, 60) {
            assert_ne!(v, id(ids::DESERT_HILLS));
        }
        let wide = Hills::new(1000, 5, constant(ids::DESERT), rivers);
        let grid = wide.get_ints(0, 0, 32, 32);
        assert!(grid.iter().all(|&v| v == id(ids::DESERT) || v == id(ids::DESERT_HILLS)));
        assert!(grid.contains(&id(ids::DESERT_HILLS)));
    }

    #[test]
    fn river_noise_triggers_mutations() {
        // (l - 2) % 29 == 1 mutates unconditionally
        let rivers = Arc::new(Tiled { cells: vec![3], size: 1 });
        let hills = Hills::new(1000, 5, constant(ids::JUNGLE), rivers);
        assert!(hills.get_ints(0, 0, 8, 8).iter().all(|&v| v == id(ids::JUNGLE_M)));
    }
}
