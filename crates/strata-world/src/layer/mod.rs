//! Biome layer chain: integer grid transforms that turn a coarse land/ocean
//! seed into per-block biome ids.
//!
//! Every layer is a pure function of its region. A layer asks its parent for
//! the region it needs (usually padded by one cell), reseeds a small LCG per
//! output cell and writes one value per cell. Nothing is cached; asking the
//! same layer for overlapping regions yields the same values in the overlap.

mod assign;
mod climate;
mod river;
mod stack;
mod zoom;

use std::sync::Arc;

pub use assign::{BiomeAssign, BiomeEdge, Hills, RareBiome, Shore};
pub use climate::{AddIsland, AddMushroomIsland, AddSnow, DeepOcean, Edge, EdgeMode, Island, RemoveTooMuchOcean};
pub use river::{River, RiverInit, RiverMix, Smooth};
pub use stack::LayerStack;
pub use zoom::{VoronoiZoom, Zoom, magnify};

/// One stage of the chain.
pub trait GenLayer: Send + Sync {
    /// Values for the `width` x `height` cells starting at `(x, z)`, row-major in z.
    fn get_ints(&self, x: i32, z: i32, width: usize, height: usize) -> Vec<i32>;
}

pub type LayerRef = Arc<dyn GenLayer>;

const MUL: i64 = 6_364_136_223_846_793_005;
const ADD: i64 = 1_442_695_040_888_963_407;

#[inline]
fn mix(current: i64, add: i64) -> i64 {
    current.wrapping_mul(current.wrapping_mul(MUL).wrapping_add(ADD)).wrapping_add(add)
}

/// Per-layer seed pair: the salt a layer was built with, folded with the
/// world seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayerSeed {
    base: i64,
    world: i64,
}

impl LayerSeed {
    pub fn new(salt: i64, world_seed: i64) -> Self {
        let mut base = salt;
        for _ in 0..3 {
            base = mix(base, salt);
        }
        let mut world = world_seed;
        for _ in 0..3 {
            world = mix(world, base);
        }
        Self { base, world }
    }

    /// Seed of a layer that world seeding never reaches. Its cells draw
    /// from a zero world seed.
    pub fn unseeded(salt: i64) -> Self {
        Self { world: 0, ..Self::new(salt, 0) }
    }

    pub fn base(&self) -> i64 {
        self.base
    }

    pub fn world(&self) -> i64 {
        self.world
    }

    /// Random source for the cell at `(x, z)`.
    #[inline]
    pub fn cell(&self, x: i32, z: i32) -> CellRng {
        let (x, z) = (x as i64, z as i64);
        let mut s = mix(self.world, x);
        s = mix(s, z);
        s = mix(s, x);
        s = mix(s, z);
        CellRng { state: s, world: self.world }
    }
}

/// The cell-local LCG a layer draws from after reseeding.
#[derive(Clone, Copy, Debug)]
pub struct CellRng {
    state: i64,
    world: i64,
}

impl CellRng {
    #[inline]
    pub fn next_int(&mut self, bound: i32) -> i32 {
        let mut v = ((self.state >> 24) % bound as i64) as i32;
        if v < 0 {
            v += bound;
        }
        self.state = mix(self.state, self.world);
        v
    }

    #[inline]
    pub fn choose(&mut self, values: &[i32]) -> i32 {
        values[self.next_int(values.len() as i32) as usize]
    }
}

/// Parent cells around an output region padded by one on every side.
pub(crate) struct Padded {
    cells: Vec<i32>,
    width: usize,
}

impl Padded {
    pub(crate) fn fetch(parent: &dyn GenLayer, x: i32, z: i32, width: usize, height: usize) -> Self {
        Self { cells: parent.get_ints(x - 1, z - 1, width + 2, height + 2), width: width + 2 }
    }

    /// Cell at output `(i, j)` shifted by `(dx, dz)` in `-1..=1`.
    #[inline]
    pub(crate) fn at(&self, i: usize, j: usize, dx: isize, dz: isize) -> i32 {
        let x = (i as isize + 1 + dx) as usize;
        let z = (j as isize + 1 + dz) as usize;
        self.cells[x + z * self.width]
    }

    #[inline]
    pub(crate) fn center(&self, i: usize, j: usize) -> i32 {
        self.at(i, j, 0, 0)
    }

    /// North, east, west and south neighbours.
    #[inline]
    pub(crate) fn cross(&self, i: usize, j: usize) -> [i32; 4] {
        [self.at(i, j, 0, -1), self.at(i, j, 1, 0), self.at(i, j, -1, 0), self.at(i, j, 0, 1)]
    }

    /// The four diagonal neighbours.
    #[inline]
    pub(crate) fn corners(&self, i: usize, j: usize) -> [i32; 4] {
        [self.at(i, j, -1, -1), self.at(i, j, 1, -1), self.at(i, j, -1, 1), self.at(i, j, 1, 1)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_mix_with_wrapping_arithmetic() {
        // mix(0, a) is a; mix(1, 0) is one LCG step from 1
        assert_eq!(mix(0, 5), 5);
        assert_eq!(mix(1, 0), MUL.wrapping_add(ADD));
        let a = LayerSeed::new(2000, 114514);
        let b = LayerSeed::new(2000, 114514);
        assert_eq!(a, b);
        assert_ne!(LayerSeed::new(2001, 114514), a);
        assert_ne!(LayerSeed::new(2000, 114515), a);
    }

    #[test]
    fn cell_draws_stay_in_bounds() {
        let seed = LayerSeed::new(1, -42);
        for x in -20..20 {
            for z in -20..20 {
                let mut r = seed.cell(x, z);
                for bound in [1, 2, 3, 10, 57, 299_999] {
                    let v = r.next_int(bound);
                    assert!((0..bound).contains(&v));
                }
            }
        }
    }

    #[test]
    fn cell_rng_depends_only_on_position() {
        let seed = LayerSeed::new(100, 7);
        let draw = |x, z| {
            let mut r = seed.cell(x, z);
            (r.next_int(1024), r.next_int(1024))
        };
        assert_eq!(draw(3, -9), draw(3, -9));
        assert_ne!(draw(3, -9), draw(-9, 3));
    }

    #[test]
    fn unseeded_layers_draw_from_a_zero_world() {
        let seeded = LayerSeed::new(1000, 114514);
        let unseeded = LayerSeed::unseeded(1000);
        assert_eq!(unseeded.base(), seeded.base());
        assert_eq!(unseeded.world(), 0);
        // the first mix of a zero world is the coordinate itself
        let mut r = unseeded.cell(0, 0);
        assert_eq!(r.next_int(1 << 20), 0);
        assert_ne!(unseeded.cell(5, 9).next_int(1 << 20), seeded.cell(5, 9).next_int(1 << 20));
    }
}
