use strata_blocks::{Block, ids};
use strata_chunk::WorldAccess;
use strata_geom::BlockPos;
use strata_noise::{JavaRandom, math};

use super::put;

/// Stone, granite, diorite and andesite; polished variants excluded.
pub fn natural_stone(b: Block) -> bool {
    b.id == ids::STONE && matches!(b.meta, 0 | 1 | 3 | 5)
}

/// An elongated blob of `block` written over blocks accepted by `fits`.
#[derive(Clone, Copy, Debug)]
pub struct Vein {
    pub block: Block,
    pub size: i32,
    pub fits: fn(Block) -> bool,
}

impl Vein {
    pub const fn new(block: Block, size: i32) -> Self {
        Self { block, size, fits: natural_stone }
    }

    pub fn generate(&self, w: &mut dyn WorldAccess, rng: &mut JavaRandom, pos: BlockPos) -> bool {
        let n = self.size as f32;
        let angle = rng.next_float() * std::f32::consts::PI;
        let (s, c) = (math::sin(angle), math::cos(angle));
        let x0 = ((pos.x + 8) as f32 + s * n / 8.0) as f64;
        let x1 = ((pos.x + 8) as f32 - s * n / 8.0) as f64;
        let z0 = ((pos.z + 8) as f32 + c * n / 8.0) as f64;
        let z1 = ((pos.z + 8) as f32 - c * n / 8.0) as f64;
        let y0 = (pos.y + rng.next_bounded_int(3) - 2) as f64;
        let y1 = (pos.y + rng.next_bounded_int(3) - 2) as f64;

        for i in 0..self.size {
            let t = i as f32 / n;
            let cx = x0 + (x1 - x0) * t as f64;
            let cy = y0 + (y1 - y0) * t as f64;
            let cz = z0 + (z1 - z0) * t as f64;
            let spread = rng.next_double() * self.size as f64 / 16.0;
            let swell = (math::sin(std::f32::consts::PI * t) + 1.0) as f64;
            let dh = swell * spread + 1.0;
            let dv = swell * spread + 1.0;
            let (bx0, bx1) = (math::floor(cx - dh / 2.0), math::floor(cx + dh / 2.0));
            let (by0, by1) = (math::floor(cy - dv / 2.0), math::floor(cy + dv / 2.0));
            let (bz0, bz1) = (math::floor(cz - dh / 2.0), math::floor(cz + dh / 2.0));
            for x in bx0..=bx1 {
                let ex = (x as f64 + 0.5 - cx) / (dh / 2.0);
                if ex * ex >= 1.0 {
                    continue;
                }
                for y in by0..=by1 {
                    let ey = (y as f64 + 0.5 - cy) / (dv / 2.0);
                    if ex * ex + ey * ey >= 1.0 {
                        continue;
                    }
                    for z in bz0..=bz1 {
                        let ez = (z as f64 + 0.5 - cz) / (dh / 2.0);
                        if ex * ex + ey * ey + ez * ez < 1.0 && (self.fits)(w.block(x, y, z)) {
                            w.set_block(x, y, z, self.block);
                        }
                    }
                }
            }
        }
        true
    }
}

/// `count` veins spread uniformly over `min..max` in the chunk at `origin`.
pub fn uniform(
    w: &mut dyn WorldAccess,
    rng: &mut JavaRandom,
    origin: BlockPos,
    count: i32,
    vein: &Vein,
    mut min: i32,
    mut max: i32,
) {
    if max < min {
        std::mem::swap(&mut min, &mut max);
    } else if max == min {
        if min < 255 {
            max += 1;
        } else {
            min -= 1;
        }
    }
    for _ in 0..count {
        let p = origin.add(rng.next_bounded_int(16), rng.next_bounded_int(max - min) + min, rng.next_bounded_int(16));
        vein.generate(w, rng, p);
    }
}

/// `count` veins whose heights follow a triangle centred on `center`.
pub fn triangular(
    w: &mut dyn WorldAccess,
    rng: &mut JavaRandom,
    origin: BlockPos,
    count: i32,
    vein: &Vein,
    center: i32,
    spread: i32,
) {
    for _ in 0..count {
        let p = origin.add(
            rng.next_bounded_int(16),
            rng.next_bounded_int(spread) + rng.next_bounded_int(spread) + center - spread,
            rng.next_bounded_int(16),
        );
        vein.generate(w, rng, p);
    }
}

/// The standard ore pass of every overworld chunk.
pub fn standard_ores(w: &mut dyn WorldAccess, rng: &mut JavaRandom, origin: BlockPos) {
    let table: [(Vein, i32, i32, i32); 10] = [
        (Vein::new(Block::of(ids::DIRT), 33), 10, 0, 256),
        (Vein::new(Block::of(ids::GRAVEL), 33), 8, 0, 256),
        (Vein::new(Block::new(ids::STONE, 3), 33), 10, 0, 80),
        (Vein::new(Block::new(ids::STONE, 1), 33), 10, 0, 80),
        (Vein::new(Block::new(ids::STONE, 5), 33), 10, 0, 80),
        (Vein::new(Block::of(ids::COAL_ORE), 17), 20, 0, 128),
        (Vein::new(Block::of(ids::IRON_ORE), 9), 20, 0, 64),
        (Vein::new(Block::of(ids::GOLD_ORE), 9), 2, 0, 32),
        (Vein::new(Block::of(ids::REDSTONE_ORE), 8), 8, 0, 16),
        (Vein::new(Block::of(ids::DIAMOND_ORE), 8), 1, 0, 16),
    ];
    for (vein, count, min, max) in &table {
        uniform(w, rng, origin, *count, vein, *min, *max);
    }
    triangular(w, rng, origin, 1, &Vein::new(Block::of(ids::LAPIS_ORE), 7), 16, 16);
}

/// Extra gold in mesa biomes.
pub fn mesa_gold(w: &mut dyn WorldAccess, rng: &mut JavaRandom, origin: BlockPos) {
    uniform(w, rng, origin, 20, &Vein::new(Block::of(ids::GOLD_ORE), 9), 32, 80);
}

/// Single emerald ores and silverfish stone in mountain biomes.
pub fn mountain_ores(w: &mut dyn WorldAccess, rng: &mut JavaRandom, origin: BlockPos) {
    let emeralds = 3 + rng.next_bounded_int(6);
    for _ in 0..emeralds {
        let p = origin.add(rng.next_bounded_int(16), rng.next_bounded_int(28) + 4, rng.next_bounded_int(16));
        if w.block(p.x, p.y, p.z).id == ids::STONE {
            put(w, p, Block::of(ids::EMERALD_ORE));
        }
    }
    let silverfish = Vein::new(Block::new(ids::MONSTER_EGG, 0), 9);
    for _ in 0..7 {
        let p = origin.add(rng.next_bounded_int(16), rng.next_bounded_int(64), rng.next_bounded_int(16));
        silverfish.generate(w, rng, p);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_chunk::Chunk;

    fn solid() -> Chunk {
        let mut c = Chunk::new(0, 0);
        for x in 0..16 {
            for z in 0..16 {
                for y in 0..100 {
                    c.set_block(x, y, z, Block::of(ids::STONE));
                }
            }
        }
        c
    }

    #[test]
    fn veins_only_replace_natural_stone() {
        let mut c = solid();
        for y in 0..100 {
            c.set_block(8, y, 8, Block::new(ids::STONE, 2));
        }
        let vein = Vein::new(Block::of(ids::COAL_ORE), 17);
        for seed in 0..30 {
            vein.generate(&mut c, &mut JavaRandom::new(seed), BlockPos::new(0, 40, 0));
        }
        assert!(c.histogram()[ids::COAL_ORE as usize] > 0);
        for y in 0..100 {
            assert_eq!(c.block(8, y, 8), Block::new(ids::STONE, 2));
        }
    }

    #[test]
    fn ore_pass_is_deterministic_and_bounded() {
        let mut a = solid();
        let mut b = solid();
        standard_ores(&mut a, &mut JavaRandom::new(99), BlockPos::new(0, 0, 0));
        standard_ores(&mut b, &mut JavaRandom::new(99), BlockPos::new(0, 0, 0));
        assert_eq!(a.histogram(), b.histogram());
        let h = a.histogram();
        assert!(h[ids::IRON_ORE as usize] > 0);
        // nothing above the stone
        assert_eq!(h[0], 16 * 16 * (256 - 100));
    }

    #[test]
    fn diamonds_stay_deep() {
        let mut c = solid();
        let vein = Vein::new(Block::of(ids::DIAMOND_ORE), 8);
        let mut rng = JavaRandom::new(5);
        uniform(&mut c, &mut rng, BlockPos::new(0, 0, 0), 50, &vein, 0, 16);
        for x in 0..16 {
            for z in 0..16 {
                for y in 24..100 {
                    assert_ne!(c.block(x, y, z).id, ids::DIAMOND_ORE);
                }
            }
        }
    }

    #[test]
    fn natural_stone_variants() {
        assert!(natural_stone(Block::new(ids::STONE, 0)));
        assert!(natural_stone(Block::new(ids::STONE, 5)));
        assert!(!natural_stone(Block::new(ids::STONE, 6)));
        assert!(!natural_stone(Block::of(ids::COBBLESTONE)));
    }
}
