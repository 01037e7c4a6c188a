//! Density lattice and rasterizer: turns octave noise plus blended biome
//! height parameters into the raw stone/water profile of a chunk.

use strata_blocks::{Block, ids};
use strata_chunk::Chunk;
use strata_noise::math::clamped_lerp;
use strata_noise::{JavaRandom, OctavesNoise, PerlinNoise};

use crate::biome::{Biome, biome};
use crate::config::GeneratorSettings;

const STONE: Block = Block::of(ids::STONE);
const WATER: Block = Block::of(ids::WATER);

/// Horizontal lattice points per chunk axis.
pub const LATTICE_XZ: usize = 5;
/// Side of the biome window sampled around a chunk's lattice.
pub const BIOME_WINDOW: usize = 10;

#[inline]
fn biome_of(v: i32) -> &'static Biome {
    biome(v.clamp(0, 255) as u8)
}

/// Every noise field the overworld draws from one world seed, in the order
/// they consume the seed's random sequence.
#[derive(Clone, Debug)]
pub struct TerrainGenerator {
    min_limit: OctavesNoise,
    max_limit: OctavesNoise,
    main: OctavesNoise,
    surface: PerlinNoise,
    scale: OctavesNoise,
    depth: OctavesNoise,
    forest: OctavesNoise,
    flower: PerlinNoise,
    weights: [f32; 25],
    settings: GeneratorSettings,
}

impl TerrainGenerator {
    pub fn new(world_seed: i64, settings: &GeneratorSettings) -> Self {
        let mut rng = JavaRandom::new(world_seed);
        let min_limit = OctavesNoise::new(&mut rng, 16);
        let max_limit = OctavesNoise::new(&mut rng, 16);
        let main = OctavesNoise::new(&mut rng, 8);
        let surface = PerlinNoise::new(&mut rng, 4);
        let scale = OctavesNoise::new(&mut rng, 10);
        let depth = OctavesNoise::new(&mut rng, 16);
        let forest = OctavesNoise::new(&mut rng, 8);
        let flower = PerlinNoise::new(&mut rng, 1);

        let mut weights = [0.0f32; 25];
        for i in -2i32..=2 {
            for j in -2i32..=2 {
                let f = 10.0 / ((i * i + j * j) as f32 + 0.2).sqrt();
                weights[(i + 2 + (j + 2) * 5) as usize] = f;
            }
        }
        Self { min_limit, max_limit, main, surface, scale, depth, forest, flower, weights, settings: settings.clone() }
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Vertical lattice levels for the configured world height.
    pub fn levels(&self) -> usize {
        (self.settings.max_height / 8 + 1) as usize
    }

    /// The scale, forest and flower fields only advance the seed sequence so
    /// the world-seeded stream matches; density never reads them.
    pub fn scale_noise(&self) -> &OctavesNoise {
        &self.scale
    }

    pub fn forest_noise(&self) -> &OctavesNoise {
        &self.forest
    }

    pub fn flower_noise(&self) -> &PerlinNoise {
        &self.flower
    }

    /// Density lattice for the chunk whose lattice origin is `(cx*4, cz*4)`.
    /// `biomes` is the 10x10 quarter-resolution window starting two cells
    /// before the chunk on both axes. The result is indexed
    /// `(x * 5 + z) * levels + y`.
    pub fn density(&self, cx: i32, cz: i32, biomes: &[i32]) -> Vec<f64> {
        debug_assert_eq!(biomes.len(), BIOME_WINDOW * BIOME_WINDOW);
        let s = &self.settings;
        let levels = self.levels();
        let (x0, z0) = (cx * 4, cz * 4);

        let mut depth_region = Vec::new();
        let mut main_region = Vec::new();
        let mut min_region = Vec::new();
        let mut max_region = Vec::new();
        self.depth.generate_2d(
            &mut depth_region,
            x0,
            z0,
            LATTICE_XZ,
            LATTICE_XZ,
            f64::from(s.depth_noise_scale_x),
            f64::from(s.depth_noise_scale_z),
        );
        let f = s.coordinate_scale;
        let f1 = s.height_scale;
        self.main.generate(
            &mut main_region,
            x0,
            0,
            z0,
            LATTICE_XZ,
            levels,
            LATTICE_XZ,
            f64::from(f / s.main_noise_scale_x),
            f64::from(f1 / s.main_noise_scale_y),
            f64::from(f / s.main_noise_scale_z),
        );
        self.min_limit.generate(
            &mut min_region,
            x0,
            0,
            z0,
            LATTICE_XZ,
            levels,
            LATTICE_XZ,
            f64::from(f),
            f64::from(f1),
            f64::from(f),
        );
        self.max_limit.generate(
            &mut max_region,
            x0,
            0,
            z0,
            LATTICE_XZ,
            levels,
            LATTICE_XZ,
            f64::from(f),
            f64::from(f1),
            f64::from(f),
        );

        let mut out = vec![0.0; LATTICE_XZ * LATTICE_XZ * levels];
        let taper_from = levels as i32 - 4;
        let mut i = 0;
        let mut j = 0;
        for k in 0..LATTICE_XZ {
            for l in 0..LATTICE_XZ {
                let (variation, height) = self.blend(biomes, k, l);
                let mut d7 = depth_region[j] / 8000.0;
                if d7 < 0.0 {
                    d7 = -d7 * 0.3;
                }
                d7 = d7 * 3.0 - 2.0;
                if d7 < 0.0 {
                    d7 /= 2.0;
                    if d7 < -1.0 {
                        d7 = -1.0;
                    }
                    d7 /= 1.4;
                    d7 /= 2.0;
                } else {
                    if d7 > 1.0 {
                        d7 = 1.0;
                    }
                    d7 /= 8.0;
                }
                j += 1;

                let mut d8 = f64::from(height);
                let d9 = f64::from(variation);
                d8 += d7 * 0.2;
                d8 = d8 * f64::from(s.base_size) / 8.0;
                let d0 = f64::from(s.base_size) + d8 * 4.0;

                for l1 in 0..levels as i32 {
                    let mut d1 = (f64::from(l1) - d0) * f64::from(s.stretch_y) * 128.0 / 256.0 / d9;
                    if d1 < 0.0 {
                        d1 *= 4.0;
                    }
                    let d2 = min_region[i] / f64::from(s.lower_limit_scale);
                    let d3 = max_region[i] / f64::from(s.upper_limit_scale);
                    let d4 = (main_region[i] / 10.0 + 1.0) / 2.0;
                    let mut d5 = clamped_lerp(d2, d3, d4) - d1;
                    if l1 > taper_from {
                        let d6 = f64::from((l1 - taper_from) as f32 / 3.0);
                        d5 = d5 * (1.0 - d6) + -10.0 * d6;
                    }
                    out[i] = d5;
                    i += 1;
                }
            }
        }
        out
    }

    /// Distance-weighted average of the height parameters around lattice
    /// column `(k, l)`; returns `(variation, height)` after rescaling.
    fn blend(&self, biomes: &[i32], k: usize, l: usize) -> (f32, f32) {
        let s = &self.settings;
        let center = biome_of(biomes[k + 2 + (l + 2) * BIOME_WINDOW]);
        let mut f2 = 0.0f32;
        let mut f3 = 0.0f32;
        let mut f4 = 0.0f32;
        for j1 in 0..5 {
            for k1 in 0..5 {
                let b = biome_of(biomes[k + j1 + (l + k1) * BIOME_WINDOW]);
                let f5 = s.biome_depth_offset + b.base_height * s.biome_depth_weight;
                let f6 = s.biome_scale_offset + b.height_variation * s.biome_scale_weight;
                let mut f7 = self.weights[j1 + k1 * 5] / (f5 + 2.0);
                if b.base_height > center.base_height {
                    f7 /= 2.0;
                }
                f2 += f6 * f7;
                f3 += f5 * f7;
                f4 += f7;
            }
        }
        f2 /= f4;
        f3 /= f4;
        f2 = f2 * 0.9 + 0.1;
        f3 = (f3 * 4.0 - 1.0) / 8.0;
        (f2, f3)
    }

    /// Trilinear interpolation of the lattice: stone where density is
    /// positive, water below sea level, air elsewhere.
    pub fn rasterize(&self, chunk: &mut Chunk, density: &[f64]) {
        let levels = self.levels();
        let sea = self.settings.sea_level;
        let max_y = self.settings.max_height;
        for i in 0..4 {
            let j = i * 5;
            let k = (i + 1) * 5;
            for l in 0..4 {
                let i1 = (j + l) * levels;
                let j1 = (j + l + 1) * levels;
                let k1 = (k + l) * levels;
                let l1 = (k + l + 1) * levels;
                for i2 in 0..levels - 1 {
                    let mut d1 = density[i1 + i2];
                    let mut d2 = density[j1 + i2];
                    let mut d3 = density[k1 + i2];
                    let mut d4 = density[l1 + i2];
                    let d5 = (density[i1 + i2 + 1] - d1) * 0.125;
                    let d6 = (density[j1 + i2 + 1] - d2) * 0.125;
                    let d7 = (density[k1 + i2 + 1] - d3) * 0.125;
                    let d8 = (density[l1 + i2 + 1] - d4) * 0.125;
                    for j2 in 0..8 {
                        let y = (i2 * 8 + j2) as i32;
                        let mut d10 = d1;
                        let mut d11 = d2;
                        let d12 = (d3 - d1) * 0.25;
                        let d13 = (d4 - d2) * 0.25;
                        for k2 in 0..4 {
                            let d16 = (d11 - d10) * 0.25;
                            let mut v = d10 - d16;
                            for l2 in 0..4 {
                                v += d16;
                                let (x, z) = ((i * 4 + k2) as i32, (l * 4 + l2) as i32);
                                if y >= max_y {
                                    continue;
                                }
                                if v > 0.0 {
                                    chunk.set_block(x, y, z, STONE);
                                } else if y < sea {
                                    chunk.set_block(x, y, z, WATER);
                                }
                            }
                            d10 += d12;
                            d11 += d13;
                        }
                        d1 += d5;
                        d2 += d6;
                        d3 += d7;
                        d4 += d8;
                    }
                }
            }
        }
    }

    /// Surface roughness for the 16x16 columns of chunk `(cx, cz)`,
    /// indexed `z + x * 16` in the rotated order the surface pass reads.
    pub fn surface_noise(&self, cx: i32, cz: i32) -> Vec<f64> {
        let mut out = Vec::new();
        self.surface.region(
            &mut out,
            f64::from(cx * 16),
            f64::from(cz * 16),
            16,
            16,
            0.0625,
            0.0625,
            1.0,
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::ids as biomes;

    fn terrain(seed: i64) -> TerrainGenerator {
        TerrainGenerator::new(seed, &GeneratorSettings::default())
    }

    fn uniform(id: u8) -> Vec<i32> {
        vec![i32::from(id); BIOME_WINDOW * BIOME_WINDOW]
    }

    #[test]
    fn kernel_weights_peak_in_the_middle() {
        let t = terrain(1);
        assert!(t.weights[12] > t.weights[11]);
        assert!((t.weights[12] - 10.0 / 0.2f32.sqrt()).abs() < 1e-4);
        assert_eq!(t.weights[0], t.weights[24]);
    }

    #[test]
    fn density_is_deterministic_and_tapers() {
        let t = terrain(12345);
        let a = t.density(0, 0, &uniform(biomes::PLAINS));
        let b = terrain(12345).density(0, 0, &uniform(biomes::PLAINS));
        assert_eq!(a, b);
        assert_eq!(a.len(), 5 * 5 * 33);
        // the top lattice level is pulled to -10
        for col in 0..25 {
            assert!((a[col * 33 + 32] + 10.0).abs() < 1e-9);
        }
    }

    #[test]
    fn oceans_sit_lower_than_hills() {
        let t = terrain(7);
        let ocean = t.density(3, 3, &uniform(biomes::DEEP_OCEAN));
        let hills = t.density(3, 3, &uniform(biomes::EXTREME_HILLS));
        let at = |d: &[f64]| d[(2 * 5 + 2) * 33 + 8];
        assert!(at(&hills) > at(&ocean));
    }

    #[test]
    fn rasterized_plains_have_stone_and_sea() {
        let t = terrain(12345);
        let d = t.density(0, 0, &uniform(biomes::PLAINS));
        let mut chunk = Chunk::new(0, 0);
        t.rasterize(&mut chunk, &d);
        assert_eq!(chunk.block(0, 1, 0), STONE);
        assert!(chunk.block(8, 255, 8).is_air());
        let ocean = t.density(0, 0, &uniform(biomes::DEEP_OCEAN));
        let mut wet = Chunk::new(0, 0);
        t.rasterize(&mut wet, &ocean);
        assert_eq!(wet.block(8, 62, 8), WATER);
        assert!(wet.block(8, 63, 8).is_air());
    }

    #[test]
    fn short_worlds_stay_below_their_ceiling() {
        let settings = GeneratorSettings { max_height: 128, sea_level: 40, ..GeneratorSettings::default() };
        let t = TerrainGenerator::new(99, &settings);
        assert_eq!(t.levels(), 17);
        let d = t.density(0, 0, &uniform(biomes::EXTREME_HILLS));
        let mut chunk = Chunk::new(0, 0);
        t.rasterize(&mut chunk, &d);
        for x in 0..16 {
            for z in 0..16 {
                for y in 128..256 {
                    assert!(chunk.block(x, y, z).is_air());
                }
            }
        }
    }

    #[test]
    fn surface_noise_covers_a_chunk() {
        let n = terrain(5).surface_noise(-2, 9);
        assert_eq!(n.len(), 256);
        assert!(n.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn flower_field_closes_the_seed_sequence() {
        let mut rng = JavaRandom::new(2024);
        for count in [16, 16, 8] {
            OctavesNoise::new(&mut rng, count);
        }
        PerlinNoise::new(&mut rng, 4);
        for count in [10, 16, 8] {
            OctavesNoise::new(&mut rng, count);
        }
        let flower = PerlinNoise::new(&mut rng, 1);
        let t = terrain(2024);
        for (x, z) in [(0.5, 0.25), (-31.0, 7.75), (812.5, -90.0)] {
            assert_eq!(t.flower_noise().value(x, z), flower.value(x, z));
        }
    }
}
