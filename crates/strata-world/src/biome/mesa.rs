use strata_blocks::{Block, ids};
use strata_noise::{JavaRandom, PerlinNoise};

const HARDENED: Block = Block::of(ids::HARDENED_CLAY);
const WHITE: Block = Block::new(ids::STAINED_HARDENED_CLAY, 0);
const ORANGE: Block = Block::new(ids::STAINED_HARDENED_CLAY, 1);
const YELLOW: Block = Block::new(ids::STAINED_HARDENED_CLAY, 4);
const SILVER: Block = Block::new(ids::STAINED_HARDENED_CLAY, 8);
const BROWN: Block = Block::new(ids::STAINED_HARDENED_CLAY, 12);
const RED: Block = Block::new(ids::STAINED_HARDENED_CLAY, 14);

/// Terracotta strata for the badlands family: a 64-entry colour band table
/// indexed by absolute y, plus the noise that shapes the spire tops.
#[derive(Clone, Debug)]
pub struct MesaBands {
    bands: [Block; 64],
    offset: PerlinNoise,
    pillar: PerlinNoise,
    pillar_roof: PerlinNoise,
}

fn paint(bands: &mut [Block; 64], rng: &mut JavaRandom, extra_len: i32, base_len: i32, block: Block) {
    let runs = rng.next_bounded_int(4) + 2;
    for _ in 0..runs {
        let len = rng.next_bounded_int(extra_len) + base_len;
        let start = rng.next_bounded_int(64);
        let mut i = 0;
        while start + i < 64 && i < len {
            bands[(start + i) as usize] = block;
            i += 1;
        }
    }
}

impl MesaBands {
    pub fn new(world_seed: i64) -> Self {
        let mut bands = [HARDENED; 64];
        let mut rng = JavaRandom::new(world_seed);
        let offset = PerlinNoise::new(&mut rng, 1);

        let mut y = 0;
        while y < 64 {
            y += rng.next_bounded_int(5) + 1;
            if y < 64 {
                bands[y as usize] = ORANGE;
            }
            y += 1;
        }
        paint(&mut bands, &mut rng, 3, 1, YELLOW);
        paint(&mut bands, &mut rng, 3, 2, BROWN);
        paint(&mut bands, &mut rng, 3, 1, RED);

        let stripes = rng.next_bounded_int(3) + 3;
        let mut at = 0;
        for _ in 0..stripes {
            at += rng.next_bounded_int(16) + 4;
            if at < 64 {
                bands[at as usize] = WHITE;
                if at > 1 && rng.next_bool() {
                    bands[(at - 1) as usize] = SILVER;
                }
                if at < 63 && rng.next_bool() {
                    bands[(at + 1) as usize] = SILVER;
                }
            }
        }

        // The spire noise is always seeded with zero.
        let mut pillar_rng = JavaRandom::new(0);
        let pillar = PerlinNoise::new(&mut pillar_rng, 4);
        let pillar_roof = PerlinNoise::new(&mut pillar_rng, 1);
        Self { bands, offset, pillar, pillar_roof }
    }

    /// Band at absolute `y`, shifted by a slow wave along `x`.
    pub fn band(&self, x: i32, y: i32) -> Block {
        let shift = (self.offset.value(f64::from(x) / 512.0, f64::from(x) / 512.0) * 2.0 + 0.5).floor() as i32;
        self.bands[(y + shift + 64).rem_euclid(64) as usize]
    }

    pub fn bands(&self) -> &[Block; 64] {
        &self.bands
    }

    /// Height the spire column reaches, or 0 when the column has none.
    pub fn pillar_height(&self, x: i32, z: i32, noise: f64) -> f64 {
        let px = (x & -16) + (z & 15);
        let pz = (z & -16) + (x & 15);
        let d0 = noise.abs().min(self.pillar.value(f64::from(px) * 0.25, f64::from(pz) * 0.25));
        if d0 <= 0.0 {
            return 0.0;
        }
        let scale = 0.001953125;
        let roof = self.pillar_roof.value(f64::from(px) * scale, f64::from(pz) * scale).abs();
        let cap = (roof * 50.0).ceil() + 14.0;
        (d0 * d0 * 2.5).min(cap) + 64.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_are_terracotta() {
        let bands = MesaBands::new(114514);
        for b in bands.bands() {
            assert!(b.id == ids::HARDENED_CLAY || b.id == ids::STAINED_HARDENED_CLAY);
        }
        assert!(bands.bands().iter().any(|b| *b == ORANGE));
    }

    #[test]
    fn bands_depend_on_the_seed() {
        let a = MesaBands::new(1);
        let b = MesaBands::new(2);
        assert_ne!(a.bands(), b.bands());
        assert_eq!(a.bands(), MesaBands::new(1).bands());
    }

    #[test]
    fn pillars_are_capped() {
        let bands = MesaBands::new(7);
        for x in -64..64 {
            let h = bands.pillar_height(x * 3, x * 5, 4.0);
            assert!(h == 0.0 || (64.0..=64.0 + 64.0).contains(&h), "{h}");
        }
    }
}
