//! Early layers working on land/ocean flags and climate codes (0 ocean,
//! 1 warm, 2 medium, 3 cold, 4 frozen; bits 8..12 mark special variants).

use super::{GenLayer, LayerRef, LayerSeed, Padded};
use crate::biome::ids;

/// Root of the chain: one land cell in ten, with the origin always land.
pub struct Island {
    seed: LayerSeed,
}

impl Island {
    pub fn new(salt: i64, world_seed: i64) -> Self {
        Self { seed: LayerSeed::new(salt, world_seed) }
    }
}

impl GenLayer for Island {
    fn get_ints(&self, x: i32, z: i32, width: usize, height: usize) -> Vec<i32> {
        let mut out = vec![0; width * height];
        for j in 0..height {
            for i in 0..width {
                let mut r = self.seed.cell(x + i as i32, z + j as i32);
                out[i + j * width] = i32::from(r.next_int(10) == 0);
            }
        }
        let (w, h) = (width as i32, height as i32);
        if x > -w && x <= 0 && z > -h && z <= 0 {
            out[(-x + -z * w) as usize] = 1;
        }
        out
    }
}

/// Grows and erodes coastlines using the diagonal neighbours.
pub struct AddIsland {
    seed: LayerSeed,
    parent: LayerRef,
}

impl AddIsland {
    pub fn new(salt: i64, world_seed: i64, parent: LayerRef) -> Self {
        Self { seed: LayerSeed::new(salt, world_seed), parent }
    }
}

impl GenLayer for AddIsland {
    fn get_ints(&self, x: i32, z: i32, width: usize, height: usize) -> Vec<i32> {
        let p = Padded::fetch(self.parent.as_ref(), x, z, width, height);
        let mut out = vec![0; width * height];
        for j in 0..height {
            for i in 0..width {
                let corners = p.corners(i, j);
                let center = p.center(i, j);
                let mut r = self.seed.cell(x + i as i32, z + j as i32);
                out[i + j * width] = if center != 0 || corners.iter().all(|&c| c == 0) {
                    if center > 0 && corners.contains(&0) {
                        if r.next_int(5) == 0 {
                            if center == 4 { 4 } else { 0 }
                        } else {
                            center
                        }
                    } else {
                        center
                    }
                } else {
                    // ocean next to land: adopt one land corner, picked by reservoir draw
                    let mut picked = 1;
                    let mut seen = 1;
                    for c in corners {
                        if c != 0 {
                            if r.next_int(seen) == 0 {
                                picked = c;
                            }
                            seen += 1;
                        }
                    }
                    if r.next_int(3) == 0 {
                        picked
                    } else if picked == 4 {
                        4
                    } else {
                        0
                    }
                };
            }
        }
        out
    }
}

/// Turns half of the fully enclosed ocean cells into land.
pub struct RemoveTooMuchOcean {
    seed: LayerSeed,
    parent: LayerRef,
}

impl RemoveTooMuchOcean {
    pub fn new(salt: i64, world_seed: i64, parent: LayerRef) -> Self {
        Self { seed: LayerSeed::new(salt, world_seed), parent }
    }
}

impl GenLayer for RemoveTooMuchOcean {
    fn get_ints(&self, x: i32, z: i32, width: usize, height: usize) -> Vec<i32> {
        let p = Padded::fetch(self.parent.as_ref(), x, z, width, height);
        let mut out = vec![0; width * height];
        for j in 0..height {
            for i in 0..width {
                let center = p.center(i, j);
                let mut r = self.seed.cell(x + i as i32, z + j as i32);
                let mut v = center;
                if center == 0 && p.cross(i, j).iter().all(|&c| c == 0) && r.next_int(2) == 0 {
                    v = 1;
                }
                out[i + j * width] = v;
            }
        }
        out
    }
}

/// Assigns a climate code to every land cell.
pub struct AddSnow {
    seed: LayerSeed,
    parent: LayerRef,
}

impl AddSnow {
    pub fn new(salt: i64, world_seed: i64, parent: LayerRef) -> Self {
        Self { seed: LayerSeed::new(salt, world_seed), parent }
    }
}

impl GenLayer for AddSnow {
    fn get_ints(&self, x: i32, z: i32, width: usize, height: usize) -> Vec<i32> {
        let p = Padded::fetch(self.parent.as_ref(), x, z, width, height);
        let mut out = vec![0; width * height];
        for j in 0..height {
            for i in 0..width {
                let center = p.center(i, j);
                let mut r = self.seed.cell(x + i as i32, z + j as i32);
                out[i + j * width] = if center == 0 {
                    0
                } else {
                    match r.next_int(6) {
                        0 => 4,
                        1 => 3,
                        _ => 1,
                    }
                };
            }
        }
        out
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeMode {
    /// Warm cells touching cold or frozen ones become temperate.
    CoolWarm,
    /// Frozen cells touching warm or temperate ones become cold.
    HeatIce,
    /// Marks one land cell in thirteen with a special-variant tag.
    Special,
}

pub struct Edge {
    seed: LayerSeed,
    parent: LayerRef,
    mode: EdgeMode,
}

impl Edge {
    pub fn new(salt: i64, world_seed: i64, parent: LayerRef, mode: EdgeMode) -> Self {
        Self { seed: LayerSeed::new(salt, world_seed), parent, mode }
    }

    fn soften(&self, x: i32, z: i32, width: usize, height: usize, from: i32, near: [i32; 2], to: i32) -> Vec<i32> {
        let p = Padded::fetch(self.parent.as_ref(), x, z, width, height);
        let mut out = vec![0; width * height];
        for j in 0..height {
            for i in 0..width {
                let mut v = p.center(i, j);
                if v == from && p.cross(i, j).iter().any(|c| near.contains(c)) {
                    v = to;
                }
                out[i + j * width] = v;
            }
        }
        out
    }

    fn special(&self, x: i32, z: i32, width: usize, height: usize) -> Vec<i32> {
        let mut out = self.parent.get_ints(x, z, width, height);
        for (n, v) in out.iter_mut().enumerate() {
            let mut r = self.seed.cell(x + (n % width) as i32, z + (n / width) as i32);
            if *v != 0 && r.next_int(13) == 0 {
                *v |= ((1 + r.next_int(15)) << 8) & 0xF00;
            }
        }
        out
    }
}

impl GenLayer for Edge {
    fn get_ints(&self, x: i32, z: i32, width: usize, height: usize) -> Vec<i32> {
        match self.mode {
            EdgeMode::CoolWarm => self.soften(x, z, width, height, 1, [3, 4], 2),
            EdgeMode::HeatIce => self.soften(x, z, width, height, 4, [2, 1], 3),
            EdgeMode::Special => self.special(x, z, width, height),
        }
    }
}

/// Rare mushroom islands in open ocean.
pub struct AddMushroomIsland {
    seed: LayerSeed,
    parent: LayerRef,
}

impl AddMushroomIsland {
    pub fn new(salt: i64, world_seed: i64, parent: LayerRef) -> Self {
        Self { seed: LayerSeed::new(salt, world_seed), parent }
    }
}

impl GenLayer for AddMushroomIsland {
    fn get_ints(&self, x: i32, z: i32, width: usize, height: usize) -> Vec<i32> {
        let p = Padded::fetch(self.parent.as_ref(), x, z, width, height);
        let mut out = vec![0; width * height];
        for j in 0..height {
            for i in 0..width {
                let center = p.center(i, j);
                let mut r = self.seed.cell(x + i as i32, z + j as i32);
                let open = center == 0 && p.corners(i, j).iter().all(|&c| c == 0);
                out[i + j * width] = if open && r.next_int(100) == 0 { ids::MUSHROOM_ISLAND as i32 } else { center };
            }
        }
        out
    }
}

/// Ocean cells with ocean on all four sides become deep ocean.
pub struct DeepOcean {
    parent: LayerRef,
}

impl DeepOcean {
    pub fn new(parent: LayerRef) -> Self {
        Self { parent }
    }
}

impl GenLayer for DeepOcean {
    fn get_ints(&self, x: i32, z: i32, width: usize, height: usize) -> Vec<i32> {
        let p = Padded::fetch(self.parent.as_ref(), x, z, width, height);
        let mut out = vec![0; width * height];
        for j in 0..height {
            for i in 0..width {
                let center = p.center(i, j);
                let enclosed = p.cross(i, j).iter().all(|&c| c == 0);
                out[i + j * width] = if center == 0 && enclosed { ids::DEEP_OCEAN as i32 } else { center };
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct Constant(i32);

    impl GenLayer for Constant {
        fn get_ints(&self, _x: i32, _z: i32, width: usize, height: usize) -> Vec<i32> {
            vec![self.0; width * height]
        }
    }

    #[test]
    fn origin_is_always_land() {
        for seed in [0, 1, 114514, -7] {
            let island = Island::new(1, seed);
            assert_eq!(island.get_ints(0, 0, 1, 1), vec![1]);
            let grid = island.get_ints(-3, -2, 5, 5);
            assert_eq!(grid[3 + 2 * 5], 1);
        }
    }

    #[test]
    fn all_ocean_becomes_deep_ocean() {
        let deep = DeepOcean::new(Arc::new(Constant(0)));
        assert!(deep.get_ints(10, -4, 6, 3).iter().all(|&v| v == ids::DEEP_OCEAN as i32));
        let land = DeepOcean::new(Arc::new(Constant(1)));
        assert!(land.get_ints(0, 0, 4, 4).iter().all(|&v| v == 1));
    }

    #[test]
    fn snow_only_touches_land() {
        let snow = AddSnow::new(2, 99, Arc::new(Constant(0)));
        assert!(snow.get_ints(0, 0, 8, 8).iter().all(|&v| v == 0));
        let snow = AddSnow::new(2, 99, Arc::new(Constant(1)));
        assert!(snow.get_ints(0, 0, 8, 8).iter().all(|v| [1, 3, 4].contains(v)));
    }

    #[test]
    fn special_tags_keep_the_climate_bits() {
        let edge = Edge::new(3, 5, Arc::new(Constant(2)), EdgeMode::Special);
        let grid = edge.get_ints(-50, -50, 40, 40);
        assert!(grid.iter().all(|v| v & 0xFF == 2));
        assert!(grid.iter().any(|v| v & 0xF00 != 0));
    }
}
