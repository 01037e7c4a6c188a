//! Column dressing: replaces the raw stone/water profile with each biome's
//! top and filler blocks, bedrock, and the per-family variants.

use strata_blocks::{Block, Material, ids};
use strata_chunk::Chunk;
use strata_noise::{JavaRandom, PerlinNoise};

use super::{Biome, Family, HillsType, MesaBands, TaigaType};

const AIR: Block = Block::AIR;
const STONE: Block = Block::of(ids::STONE);
const BEDROCK: Block = Block::of(ids::BEDROCK);
const GRAVEL: Block = Block::of(ids::GRAVEL);
const WATER: Block = Block::of(ids::WATER);
const ICE: Block = Block::of(ids::ICE);
const GRASS: Block = Block::of(ids::GRASS);
const DIRT: Block = Block::of(ids::DIRT);
const COARSE_DIRT: Block = Block::new(ids::DIRT, 1);
const PODZOL: Block = Block::new(ids::DIRT, 2);
const WATERLILY: Block = Block::of(ids::WATERLILY);
const SANDSTONE: Block = Block::of(ids::SANDSTONE);
const RED_SANDSTONE: Block = Block::of(ids::RED_SANDSTONE);
const HARDENED_CLAY: Block = Block::of(ids::HARDENED_CLAY);
const WHITE_CLAY: Block = Block::new(ids::STAINED_HARDENED_CLAY, 0);
const ORANGE_CLAY: Block = Block::new(ids::STAINED_HARDENED_CLAY, 1);

/// The two world-independent climate fields: temperature variation with
/// height and the grass-colour field several biomes key features off.
#[derive(Clone, Debug)]
pub struct ClimateNoise {
    temperature: PerlinNoise,
    grass: PerlinNoise,
}

impl Default for ClimateNoise {
    fn default() -> Self {
        Self::new()
    }
}

impl ClimateNoise {
    pub fn new() -> Self {
        Self {
            temperature: PerlinNoise::new(&mut JavaRandom::new(1234), 1),
            grass: PerlinNoise::new(&mut JavaRandom::new(2345), 1),
        }
    }

    /// Biome temperature at a block; cools with altitude above y 64.
    pub fn temperature(&self, biome: &Biome, x: i32, y: i32, z: i32) -> f32 {
        if y > 64 {
            let f = (self.temperature.value(f64::from(x as f32 / 8.0), f64::from(z as f32 / 8.0)) * 4.0) as f32;
            biome.temperature - (f + y as f32 - 64.0) * 0.05 / 30.0
        } else {
            biome.temperature
        }
    }

    pub fn grass(&self, x: f64, z: f64) -> f64 {
        self.grass.value(x, z)
    }
}

/// Applies biome surfaces to freshly rasterized chunks.
#[derive(Clone, Debug)]
pub struct SurfaceBuilder {
    climate: ClimateNoise,
    mesa: MesaBands,
    sea_level: i32,
}

impl SurfaceBuilder {
    pub fn new(world_seed: i64, sea_level: i32, climate: ClimateNoise) -> Self {
        Self { climate, mesa: MesaBands::new(world_seed), sea_level }
    }

    pub fn climate(&self) -> &ClimateNoise {
        &self.climate
    }

    /// Dresses one column. `(x, z)` are the coordinates the climate fields
    /// are sampled at; the column written is local `(z & 15, x & 15)`.
    pub fn build_column(&self, chunk: &mut Chunk, rng: &mut JavaRandom, biome: &Biome, x: i32, z: i32, noise: f64) {
        match biome.family {
            Family::Hills(kind) => {
                let (top, filler) = if (noise < -1.0 || noise > 2.0) && kind == HillsType::Mutated {
                    (GRAVEL, GRAVEL)
                } else if noise > 1.0 && kind != HillsType::ExtraTrees {
                    (STONE, STONE)
                } else {
                    (GRASS, DIRT)
                };
                self.default_column(chunk, rng, biome, top, filler, x, z, noise);
            }
            Family::MutatedSavanna => {
                let (top, filler) = if noise > 1.75 {
                    (STONE, STONE)
                } else if noise > -0.5 {
                    (COARSE_DIRT, DIRT)
                } else {
                    (GRASS, DIRT)
                };
                self.default_column(chunk, rng, biome, top, filler, x, z, noise);
            }
            Family::Taiga(TaigaType::Mega | TaigaType::MegaSpruce) => {
                let top = if noise > 1.75 {
                    COARSE_DIRT
                } else if noise > -0.95 {
                    PODZOL
                } else {
                    GRASS
                };
                self.default_column(chunk, rng, biome, top, DIRT, x, z, noise);
            }
            Family::Swamp => {
                self.swamp_puddle(chunk, x, z);
                self.default_column(chunk, rng, biome, biome.top, biome.filler, x, z, noise);
            }
            Family::Mesa { bryce, forest } => self.mesa_column(chunk, rng, biome, bryce, forest, x, z, noise),
            _ => self.default_column(chunk, rng, biome, biome.top, biome.filler, x, z, noise),
        }
    }

    fn swamp_puddle(&self, chunk: &mut Chunk, x: i32, z: i32) {
        let d0 = self.climate.grass(f64::from(x) * 0.25, f64::from(z) * 0.25);
        if d0 <= 0.0 {
            return;
        }
        let (lx, lz) = (z & 15, x & 15);
        for y in (0..256).rev() {
            let b = chunk.block(lx, y, lz);
            if b.material() != Material::Air {
                if y == 62 && b.id != ids::WATER {
                    chunk.set_block(lx, y, lz, WATER);
                    if d0 < 0.12 {
                        chunk.set_block(lx, y + 1, lz, WATERLILY);
                    }
                }
                break;
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn default_column(
        &self,
        chunk: &mut Chunk,
        rng: &mut JavaRandom,
        biome: &Biome,
        biome_top: Block,
        biome_filler: Block,
        x: i32,
        z: i32,
        noise: f64,
    ) {
        let sea = self.sea_level;
        let mut top = biome_top;
        let mut filler = biome_filler;
        let mut run = -1;
        let depth = (noise / 3.0 + 3.0 + rng.next_double() * 0.25) as i32;
        let (lx, lz) = (z & 15, x & 15);
        for y in (0..256).rev() {
            if y <= rng.next_bounded_int(5) {
                chunk.set_block(lx, y, lz, BEDROCK);
                continue;
            }
            let current = chunk.block(lx, y, lz);
            if current.material() == Material::Air {
                run = -1;
            } else if current.id == ids::STONE {
                if run == -1 {
                    if depth <= 0 {
                        top = AIR;
                        filler = STONE;
                    } else if y >= sea - 4 && y <= sea + 1 {
                        top = biome_top;
                        filler = biome_filler;
                    }
                    if y < sea && top.material() == Material::Air {
                        top = if self.climate.temperature(biome, x, y, z) < 0.15 { ICE } else { WATER };
                    }
                    run = depth;
                    if y >= sea - 1 {
                        chunk.set_block(lx, y, lz, top);
                    } else if y < sea - 7 - depth {
                        top = AIR;
                        filler = STONE;
                        chunk.set_block(lx, y, lz, GRAVEL);
                    } else {
                        chunk.set_block(lx, y, lz, filler);
                    }
                } else if run > 0 {
                    run -= 1;
                    chunk.set_block(lx, y, lz, filler);
                    if run == 0 && filler.id == ids::SAND && depth > 1 {
                        run = rng.next_bounded_int(4) + (y - 63).max(0);
                        filler = if filler.meta == 1 { RED_SANDSTONE } else { SANDSTONE };
                    }
                }
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn mesa_column(
        &self,
        chunk: &mut Chunk,
        rng: &mut JavaRandom,
        biome: &Biome,
        bryce: bool,
        forest: bool,
        x: i32,
        z: i32,
        noise: f64,
    ) {
        let pillar = if bryce { self.mesa.pillar_height(x, z, noise) } else { 0.0 };
        let pillar_top = pillar as i32;
        let (lx, lz) = (z & 15, x & 15);
        let sea = self.sea_level;
        let mut top = WHITE_CLAY;
        let mut filler = biome.filler;
        let depth = (noise / 3.0 + 3.0 + rng.next_double() * 0.25) as i32;
        let plain = (noise / 3.0 * std::f64::consts::PI).cos() > 0.0;
        let mut run = -1;
        let mut sandy = false;
        let mut dressed = 0;

        for y in (0..256).rev() {
            if chunk.block(lx, y, lz).material() == Material::Air && y < pillar_top {
                chunk.set_block(lx, y, lz, STONE);
            }
            if y <= rng.next_bounded_int(5) {
                chunk.set_block(lx, y, lz, BEDROCK);
                continue;
            }
            if dressed >= 15 && !bryce {
                continue;
            }
            let current = chunk.block(lx, y, lz);
            if current.material() == Material::Air {
                run = -1;
            } else if current.id == ids::STONE {
                if run == -1 {
                    sandy = false;
                    if depth <= 0 {
                        top = AIR;
                        filler = STONE;
                    } else if y >= sea - 4 && y <= sea + 1 {
                        top = WHITE_CLAY;
                        filler = biome.filler;
                    }
                    if y < sea && top.material() == Material::Air {
                        top = WATER;
                    }
                    run = depth + (y - sea).max(0);
                    if y >= sea - 1 {
                        if forest && y > 86 + depth * 2 {
                            chunk.set_block(lx, y, lz, if plain { COARSE_DIRT } else { GRASS });
                        } else if y > sea + 3 + depth {
                            let b = if (64..=127).contains(&y) {
                                if plain { HARDENED_CLAY } else { self.mesa.band(x, y) }
                            } else {
                                ORANGE_CLAY
                            };
                            chunk.set_block(lx, y, lz, b);
                        } else {
                            chunk.set_block(lx, y, lz, biome.top);
                            sandy = true;
                        }
                    } else {
                        let b = if filler.id == ids::STAINED_HARDENED_CLAY { ORANGE_CLAY } else { filler };
                        chunk.set_block(lx, y, lz, b);
                    }
                } else if run > 0 {
                    run -= 1;
                    let b = if sandy { ORANGE_CLAY } else { self.mesa.band(x, y) };
                    chunk.set_block(lx, y, lz, b);
                }
                dressed += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::{biome, ids as biomes};

    fn flat_chunk(surface: i32) -> Chunk {
        let mut chunk = Chunk::new(0, 0);
        for x in 0..16 {
            for z in 0..16 {
                for y in 0..=surface {
                    chunk.set_block(x, y, z, STONE);
                }
                for y in surface + 1..63 {
                    chunk.set_block(x, y, z, WATER);
                }
            }
        }
        chunk
    }

    fn builder() -> SurfaceBuilder {
        SurfaceBuilder::new(12345, 63, ClimateNoise::new())
    }

    #[test]
    fn plains_get_grass_over_dirt_and_bedrock_floor() {
        let mut chunk = flat_chunk(70);
        let mut rng = JavaRandom::new(1);
        builder().build_column(&mut chunk, &mut rng, biome(biomes::PLAINS), 3, 5, 0.0);
        // column written at local (5, 3)
        assert_eq!(chunk.block(5, 70, 3), GRASS);
        assert_eq!(chunk.block(5, 69, 3), DIRT);
        assert_eq!(chunk.block(5, 0, 3), BEDROCK);
        assert_eq!(chunk.block(3, 70, 5), STONE);
    }

    #[test]
    fn desert_sand_turns_to_sandstone_below() {
        let mut chunk = flat_chunk(80);
        let mut rng = JavaRandom::new(9);
        builder().build_column(&mut chunk, &mut rng, biome(biomes::DESERT), 0, 0, 1.0);
        assert_eq!(chunk.block(0, 80, 0).id, ids::SAND);
        let below: Vec<u8> = (60..80).map(|y| chunk.block(0, y, 0).id).collect();
        assert!(below.contains(&ids::SANDSTONE));
    }

    #[test]
    fn deep_floors_get_gravel() {
        let mut chunk = flat_chunk(40);
        let mut rng = JavaRandom::new(3);
        builder().build_column(&mut chunk, &mut rng, biome(biomes::OCEAN), 0, 0, 0.0);
        assert_eq!(chunk.block(0, 40, 0), GRAVEL);
        assert_eq!(chunk.block(0, 41, 0), WATER);
    }

    #[test]
    fn mesa_surface_is_sand_or_terracotta() {
        let mut chunk = flat_chunk(90);
        let mut rng = JavaRandom::new(5);
        builder().build_column(&mut chunk, &mut rng, biome(biomes::MESA), 0, 0, 0.5);
        let top = chunk.block(0, 90, 0).id;
        assert!([ids::SAND, ids::HARDENED_CLAY, ids::STAINED_HARDENED_CLAY].contains(&top), "{top}");
    }

    #[test]
    fn temperature_drops_with_height() {
        let climate = ClimateNoise::new();
        let plains = biome(biomes::PLAINS);
        assert_eq!(climate.temperature(plains, 0, 64, 0), plains.temperature);
        assert!(climate.temperature(plains, 0, 200, 0) < climate.temperature(plains, 0, 70, 0));
    }
}
