use super::{GenLayer, LayerRef, LayerSeed, Padded};
use crate::biome::ids;

/// Seeds the river noise: every land cell gets a large random value.
pub struct RiverInit {
    seed: LayerSeed,
    parent: LayerRef,
}

impl RiverInit {
    pub fn new(salt: i64, world_seed: i64, parent: LayerRef) -> Self {
        Self { seed: LayerSeed::new(salt, world_seed), parent }
    }
}

impl GenLayer for RiverInit {
    fn get_ints(&self, x: i32, z: i32, width: usize, height: usize) -> Vec<i32> {
        let mut out = self.parent.get_ints(x, z, width, height);
        for (n, v) in out.iter_mut().enumerate() {
            let mut r = self.seed.cell(x + (n % width) as i32, z + (n / width) as i32);
            *v = if *v > 0 { r.next_int(299_999) + 2 } else { 0 };
        }
        out
    }
}

#[inline]
fn river_filter(v: i32) -> i32 {
    if v >= 2 { 2 + (v & 1) } else { v }
}

/// Marks cells where the parity of the zoomed river noise changes.
pub struct River {
    parent: LayerRef,
}

impl River {
    pub fn new(_salt: i64, _world_seed: i64, parent: LayerRef) -> Self {
        Self { parent }
    }
}

impl GenLayer for River {
    fn get_ints(&self, x: i32, z: i32, width: usize, height: usize) -> Vec<i32> {
        let p = Padded::fetch(self.parent.as_ref(), x, z, width, height);
        let mut out = vec![0; width * height];
        for j in 0..height {
            for i in 0..width {
                let center = river_filter(p.center(i, j));
                let same = p.cross(i, j).iter().all(|&n| river_filter(n) == center);
                out[i + j * width] = if same { -1 } else { i32::from(ids::RIVER) };
            }
        }
        out
    }
}

/// Removes single-cell notches: a cell between two equal opposite
/// neighbours takes their value.
pub struct Smooth {
    seed: LayerSeed,
    parent: LayerRef,
}

impl Smooth {
    pub fn new(salt: i64, world_seed: i64, parent: LayerRef) -> Self {
        Self { seed: LayerSeed::new(salt, world_seed), parent }
    }
}

impl GenLayer for Smooth {
    fn get_ints(&self, x: i32, z: i32, width: usize, height: usize) -> Vec<i32> {
        let p = Padded::fetch(self.parent.as_ref(), x, z, width, height);
        let mut out = vec![0; width * height];
        for j in 0..height {
            for i in 0..width {
                let [north, east, west, south] = p.cross(i, j);
                let mut v = p.center(i, j);
                if west == east && north == south {
                    let mut r = self.seed.cell(x + i as i32, z + j as i32);
                    v = if r.next_int(2) == 0 { west } else { north };
                } else {
                    if west == east {
                        v = west;
                    }
                    if north == south {
                        v = north;
                    }
                }
                out[i + j * width] = v;
            }
        }
        out
    }
}

/// Overlays the river chain on the biome chain. Oceans always win; rivers
/// freeze on ice plains and become shore on mushroom islands.
pub struct RiverMix {
    biomes: LayerRef,
    rivers: LayerRef,
}

impl RiverMix {
    pub fn new(_salt: i64, _world_seed: i64, biomes: LayerRef, rivers: LayerRef) -> Self {
        Self { biomes, rivers }
    }
}

impl GenLayer for RiverMix {
    fn get_ints(&self, x: i32, z: i32, width: usize, height: usize) -> Vec<i32> {
        let mut out = self.biomes.get_ints(x, z, width, height);
        let rivers = self.rivers.get_ints(x, z, width, height);
        let river = i32::from(ids::RIVER);
        for (b, &r) in out.iter_mut().zip(&rivers) {
            if *b == i32::from(ids::OCEAN) || *b == i32::from(ids::DEEP_OCEAN) || r != river {
                continue;
            }
            *b = if *b == i32::from(ids::ICE_PLAINS) {
                i32::from(ids::FROZEN_RIVER)
            } else if *b == i32::from(ids::MUSHROOM_ISLAND) || *b == i32::from(ids::MUSHROOM_ISLAND_SHORE) {
                i32::from(ids::MUSHROOM_ISLAND_SHORE)
            } else {
                r & 255
            };
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct Grid(Vec<i32>, usize);

    impl GenLayer for Grid {
        fn get_ints(&self, x: i32, z: i32, width: usize, height: usize) -> Vec<i32> {
            let n = self.1 as i32;
            let mut out = Vec::with_capacity(width * height);
            for j in 0..height as i32 {
                for i in 0..width as i32 {
                    out.push(self.0[((x + i).rem_euclid(n) + (z + j).rem_euclid(n) * n) as usize]);
                }
            }
            out
        }
    }

    #[test]
    fn river_marks_parity_changes() {
        // left half even noise, right half odd
        let cells = vec![2, 2, 3, 3, 2, 2, 3, 3, 2, 2, 3, 3, 2, 2, 3, 3];
        let river = River::new(1, 0, Arc::new(Grid(cells, 4)));
        let out = river.get_ints(0, 0, 4, 1);
        assert_eq!(out, vec![7, 7, 7, 7]);
        let flat = River::new(1, 0, Arc::new(Grid(vec![4], 1)));
        assert_eq!(flat.get_ints(5, 5, 3, 3), vec![-1; 9]);
    }

    #[test]
    fn river_init_keeps_ocean() {
        let init = RiverInit::new(100, 3, Arc::new(Grid(vec![0, 1, 1, 0], 2)));
        let out = init.get_ints(0, 0, 2, 2);
        assert_eq!(out[0], 0);
        assert_eq!(out[3], 0);
        assert!((2..300_001).contains(&out[1]));
    }

    #[test]
    fn smooth_fills_notches() {
        // a lone 9 inside 1s
        let mut cells = vec![1; 9];
        cells[4] = 9;
        let smooth = Smooth::new(1000, 8, Arc::new(Grid(cells, 3)));
        assert_eq!(smooth.get_ints(1, 1, 1, 1), vec![1]);
    }

    #[test]
    fn river_mix_branch_order() {
        let biomes = Arc::new(Grid(
            vec![
                i32::from(ids::OCEAN),
                i32::from(ids::ICE_PLAINS),
                i32::from(ids::MUSHROOM_ISLAND),
                i32::from(ids::PLAINS),
            ],
            2,
        ));
        let rivers = Arc::new(Grid(vec![i32::from(ids::RIVER)], 1));
        let mix = RiverMix::new(100, 0, biomes, rivers);
        assert_eq!(
            mix.get_ints(0, 0, 2, 2),
            vec![
                i32::from(ids::OCEAN),
                i32::from(ids::FROZEN_RIVER),
                i32::from(ids::MUSHROOM_ISLAND_SHORE),
                i32::from(ids::RIVER),
            ]
        );
    }
}
