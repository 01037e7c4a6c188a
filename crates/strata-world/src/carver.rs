//! Tunnel carvers. Each chunk is visited by every region within `range`
//! chunks; a region re-seeds from the world seed and its coordinates and may
//! start one or more random walks that clear an ellipsoid at every step.

use std::f32::consts::PI;

use strata_blocks::{Block, ids};
use strata_chunk::Chunk;
use strata_noise::JavaRandom;
use strata_noise::math::{cos, floor, sin};

use crate::biome::biome;

const CARVE_RANGE: i32 = 8;

/// Runs `region` for every region within `range` of the chunk, re-seeding
/// `rng` per region.
fn for_each_region(world_seed: i64, range: i32, cx: i32, cz: i32, mut region: impl FnMut(&mut JavaRandom, i32, i32)) {
    let mut rng = JavaRandom::new(world_seed);
    let j = rng.next_long();
    let k = rng.next_long();
    for rx in cx - range..=cx + range {
        for rz in cz - range..=cz + range {
            let a = i64::from(rx).wrapping_mul(j);
            let b = i64::from(rz).wrapping_mul(k);
            rng.set_seed(a ^ b ^ world_seed);
            region(&mut rng, rx, rz);
        }
    }
}

/// One random walk in flight.
#[derive(Clone, Copy, Debug)]
struct Walk {
    x: f64,
    y: f64,
    z: f64,
    size: f32,
    yaw: f32,
    pitch: f32,
    step: i32,
    length: i32,
    height_scale: f64,
}

/// Chunk-local box a tube segment can touch.
#[derive(Clone, Copy, Debug)]
struct Span {
    x0: i32,
    x1: i32,
    y0: i32,
    y1: i32,
    z0: i32,
    z1: i32,
}

impl Span {
    fn around(chunk: &Chunk, w: &Walk, radius: f64, half_height: f64, ceiling: i32) -> Self {
        let (bx, bz) = (chunk.cx * 16, chunk.cz * 16);
        Self {
            x0: (floor(w.x - radius) - bx - 1).max(0),
            x1: (floor(w.x + radius) - bx + 1).min(16),
            y0: (floor(w.y - half_height) - 1).max(1),
            y1: (floor(w.y + half_height) + 1).min(ceiling),
            z0: (floor(w.z - radius) - bz - 1).max(0),
            z1: (floor(w.z + radius) - bz + 1).min(16),
        }
    }

    /// Whether water sits anywhere on the box's shell. Inner columns only
    /// check just above and just below the box.
    fn touches_water(&self, chunk: &Chunk) -> bool {
        for x in self.x0..self.x1 {
            for z in self.z0..self.z1 {
                let mut y = self.y1 + 1;
                while y >= self.y0 - 1 {
                    if (0..256).contains(&y) {
                        if is_water(chunk.block(x, y, z)) {
                            return true;
                        }
                        if y != self.y0 - 1 && x != self.x0 && x != self.x1 - 1 && z != self.z0 && z != self.z1 - 1 {
                            y = self.y0;
                        }
                    }
                    y -= 1;
                }
            }
        }
        false
    }
}

#[inline]
fn is_water(b: Block) -> bool {
    b.id == ids::WATER || b.id == ids::FLOWING_WATER
}

/// Biome top block at a chunk-local column, in its default variant.
fn top_block(chunk: &Chunk, x: i32, z: i32) -> Block {
    Block::of(biome(chunk.biome(x, z)).top.id)
}

/// Drift applied to a walk's yaw and pitch, itself perturbed each step.
struct Heading {
    yaw_drift: f32,
    pitch_drift: f32,
}

/// Winding tunnels and the occasional room.
#[derive(Clone, Debug)]
pub struct Caves {
    world_seed: i64,
    range: i32,
    ceiling: i32,
}

impl Caves {
    pub fn new(world_seed: i64, max_height: i32) -> Self {
        Self { world_seed, range: CARVE_RANGE, ceiling: max_height - 8 }
    }

    pub fn generate(&self, chunk: &mut Chunk) {
        let (cx, cz) = (chunk.cx, chunk.cz);
        for_each_region(self.world_seed, self.range, cx, cz, |rng, rx, rz| self.region(rng, rx, rz, chunk));
    }

    fn region(&self, rng: &mut JavaRandom, rx: i32, rz: i32, chunk: &mut Chunk) {
        let a = rng.next_bounded_int(15) + 1;
        let b = rng.next_bounded_int(a) + 1;
        let mut nodes = rng.next_bounded_int(b);
        if rng.next_bounded_int(7) != 0 {
            nodes = 0;
        }
        for _ in 0..nodes {
            let x = f64::from(rx * 16 + rng.next_bounded_int(16));
            let bound = rng.next_bounded_int(120) + 8;
            let y = f64::from(rng.next_bounded_int(bound));
            let z = f64::from(rz * 16 + rng.next_bounded_int(16));
            let mut count = 1;
            if rng.next_bounded_int(4) == 0 {
                let seed = rng.next_long();
                let size = 1.0 + rng.next_float() * 6.0;
                let room =
                    Walk { x, y, z, size, yaw: 0.0, pitch: 0.0, step: -1, length: -1, height_scale: 0.5 };
                self.tunnel(seed, chunk, room);
                count += rng.next_bounded_int(4);
            }
            for _ in 0..count {
                let yaw = rng.next_float() * (PI * 2.0);
                let pitch = (rng.next_float() - 0.5) * 2.0 / 8.0;
                let mut size = rng.next_float() * 2.0 + rng.next_float();
                if rng.next_bounded_int(10) == 0 {
                    size *= rng.next_float() * rng.next_float() * 3.0 + 1.0;
                }
                let seed = rng.next_long();
                let walk = Walk { x, y, z, size, yaw, pitch, step: 0, length: 0, height_scale: 1.0 };
                self.tunnel(seed, chunk, walk);
            }
        }
    }

    fn tunnel(&self, seed: i64, chunk: &mut Chunk, mut w: Walk) {
        let center_x = f64::from(chunk.cx * 16 + 8);
        let center_z = f64::from(chunk.cz * 16 + 8);
        let mut heading = Heading { yaw_drift: 0.0, pitch_drift: 0.0 };
        let mut rng = JavaRandom::new(seed);
        if w.length <= 0 {
            let i = self.range * 16 - 16;
            w.length = i - rng.next_bounded_int(i / 4);
        }
        let mut single = false;
        if w.step == -1 {
            w.step = w.length / 2;
            single = true;
        }
        let branch_at = rng.next_bounded_int(w.length / 2) + w.length / 4;
        let steep = rng.next_bounded_int(6) == 0;

        while w.step < w.length {
            let radius = 1.5 + f64::from(sin(w.step as f32 * PI / w.length as f32) * w.size);
            let half_height = radius * w.height_scale;
            let f2 = cos(w.pitch);
            let f3 = sin(w.pitch);
            w.x += f64::from(cos(w.yaw) * f2);
            w.y += f64::from(f3);
            w.z += f64::from(sin(w.yaw) * f2);
            w.pitch *= if steep { 0.92 } else { 0.7 };
            w.pitch += heading.pitch_drift * 0.1;
            w.yaw += heading.yaw_drift * 0.1;
            heading.pitch_drift *= 0.9;
            heading.yaw_drift *= 0.75;
            heading.pitch_drift += (rng.next_float() - rng.next_float()) * rng.next_float() * 2.0;
            heading.yaw_drift += (rng.next_float() - rng.next_float()) * rng.next_float() * 4.0;

            if !single && w.step == branch_at && w.size > 1.0 && w.length > 0 {
                for turn in [-PI / 2.0, PI / 2.0] {
                    let seed = rng.next_long();
                    let size = rng.next_float() * 0.5 + 0.5;
                    let child = Walk { size, yaw: w.yaw + turn, pitch: w.pitch / 3.0, height_scale: 1.0, ..w };
                    self.tunnel(seed, chunk, child);
                }
                return;
            }

            if single || rng.next_bounded_int(4) != 0 {
                let d4 = w.x - center_x;
                let d5 = w.z - center_z;
                let d6 = f64::from(w.length - w.step);
                let d7 = f64::from(w.size + 2.0 + 16.0);
                if d4 * d4 + d5 * d5 - d6 * d6 > d7 * d7 {
                    return;
                }
                let reach = 16.0 + radius * 2.0;
                if w.x >= center_x - reach
                    && w.z >= center_z - reach
                    && w.x <= center_x + reach
                    && w.z <= center_z + reach
                {
                    let span = Span::around(chunk, &w, radius, half_height, self.ceiling);
                    if !span.touches_water(chunk) {
                        self.hollow(chunk, &span, &w, radius, half_height);
                        if single {
                            break;
                        }
                    }
                }
            }
            w.step += 1;
        }
    }

    fn hollow(&self, chunk: &mut Chunk, s: &Span, w: &Walk, radius: f64, half_height: f64) {
        let (bx, bz) = (chunk.cx * 16, chunk.cz * 16);
        for x in s.x0..s.x1 {
            let dx = (f64::from(x + bx) + 0.5 - w.x) / radius;
            for z in s.z0..s.z1 {
                let dz = (f64::from(z + bz) + 0.5 - w.z) / radius;
                let mut grassy = false;
                if dx * dx + dz * dz >= 1.0 {
                    continue;
                }
                let mut y = s.y1;
                while y > s.y0 {
                    let dy = (f64::from(y - 1) + 0.5 - w.y) / half_height;
                    if dy > -0.7 && dx * dx + dy * dy + dz * dz < 1.0 {
                        let here = chunk.block(x, y, z);
                        let above = chunk.block(x, y + 1, z);
                        if here.id == ids::GRASS || here.id == ids::MYCELIUM {
                            grassy = true;
                        }
                        if cave_replaceable(here, above) {
                            if y - 1 < 10 {
                                chunk.set_block(x, y, z, Block::of(ids::LAVA));
                            } else {
                                chunk.set_block(x, y, z, Block::AIR);
                                if grassy && chunk.block(x, y - 1, z).id == ids::DIRT {
                                    let top = top_block(chunk, x, z);
                                    chunk.set_block(x, y - 1, z, top);
                                }
                            }
                        }
                    }
                    y -= 1;
                }
            }
        }
    }
}

fn cave_replaceable(b: Block, above: Block) -> bool {
    match b.id {
        ids::STONE
        | ids::DIRT
        | ids::GRASS
        | ids::HARDENED_CLAY
        | ids::STAINED_HARDENED_CLAY
        | ids::SANDSTONE
        | ids::RED_SANDSTONE
        | ids::MYCELIUM
        | ids::SNOW_LAYER => true,
        ids::SAND | ids::GRAVEL => !is_water(above),
        _ => false,
    }
}

/// Tall, narrow gorges with stepped walls.
#[derive(Clone, Debug)]
pub struct Ravines {
    world_seed: i64,
    range: i32,
    ceiling: i32,
}

impl Ravines {
    pub fn new(world_seed: i64, max_height: i32) -> Self {
        Self { world_seed, range: CARVE_RANGE, ceiling: max_height - 8 }
    }

    pub fn generate(&self, chunk: &mut Chunk) {
        let (cx, cz) = (chunk.cx, chunk.cz);
        for_each_region(self.world_seed, self.range, cx, cz, |rng, rx, rz| {
            if rng.next_bounded_int(50) != 0 {
                return;
            }
            let x = f64::from(rx * 16 + rng.next_bounded_int(16));
            let bound = rng.next_bounded_int(40) + 8;
            let y = f64::from(rng.next_bounded_int(bound) + 20);
            let z = f64::from(rz * 16 + rng.next_bounded_int(16));
            let yaw = rng.next_float() * (PI * 2.0);
            let pitch = (rng.next_float() - 0.5) * 2.0 / 8.0;
            let size = (rng.next_float() * 2.0 + rng.next_float()) * 2.0;
            let seed = rng.next_long();
            let walk = Walk { x, y, z, size, yaw, pitch, step: 0, length: 0, height_scale: 3.0 };
            self.gorge(seed, chunk, walk);
        });
    }

    fn gorge(&self, seed: i64, chunk: &mut Chunk, mut w: Walk) {
        let mut rng = JavaRandom::new(seed);
        let center_x = f64::from(chunk.cx * 16 + 8);
        let center_z = f64::from(chunk.cz * 16 + 8);
        let mut heading = Heading { yaw_drift: 0.0, pitch_drift: 0.0 };
        if w.length <= 0 {
            let i = self.range * 16 - 16;
            w.length = i - rng.next_bounded_int(i / 4);
        }
        let mut single = false;
        if w.step == -1 {
            w.step = w.length / 2;
            single = true;
        }

        // per-layer wall roughness
        let mut walls = [0.0f32; 256];
        let mut f2 = 1.0f32;
        for (j, wall) in walls.iter_mut().enumerate() {
            if j == 0 || rng.next_bounded_int(3) == 0 {
                f2 = 1.0 + rng.next_float() * rng.next_float();
            }
            *wall = f2 * f2;
        }

        while w.step < w.length {
            let mut radius = 1.5 + f64::from(sin(w.step as f32 * PI / w.length as f32) * w.size);
            let mut half_height = radius * w.height_scale;
            radius *= f64::from(rng.next_float()) * 0.25 + 0.75;
            half_height *= f64::from(rng.next_float()) * 0.25 + 0.75;
            let f3 = cos(w.pitch);
            let f4 = sin(w.pitch);
            w.x += f64::from(cos(w.yaw) * f3);
            w.y += f64::from(f4);
            w.z += f64::from(sin(w.yaw) * f3);
            w.pitch *= 0.7;
            w.pitch += heading.pitch_drift * 0.05;
            w.yaw += heading.yaw_drift * 0.05;
            heading.pitch_drift *= 0.8;
            heading.yaw_drift *= 0.5;
            heading.pitch_drift += (rng.next_float() - rng.next_float()) * rng.next_float() * 2.0;
            heading.yaw_drift += (rng.next_float() - rng.next_float()) * rng.next_float() * 4.0;

            if single || rng.next_bounded_int(4) != 0 {
                let d3 = w.x - center_x;
                let d4 = w.z - center_z;
                let d5 = f64::from(w.length - w.step);
                let d6 = f64::from(w.size + 2.0 + 16.0);
                if d3 * d3 + d4 * d4 - d5 * d5 > d6 * d6 {
                    return;
                }
                let reach = 16.0 + radius * 2.0;
                if w.x >= center_x - reach
                    && w.z >= center_z - reach
                    && w.x <= center_x + reach
                    && w.z <= center_z + reach
                {
                    let span = Span::around(chunk, &w, radius, half_height, self.ceiling);
                    if !span.touches_water(chunk) {
                        Self::hollow(chunk, &span, &w, radius, half_height, &walls);
                        if single {
                            break;
                        }
                    }
                }
            }
            w.step += 1;
        }
    }

    fn hollow(chunk: &mut Chunk, s: &Span, w: &Walk, radius: f64, half_height: f64, walls: &[f32; 256]) {
        let (bx, bz) = (chunk.cx * 16, chunk.cz * 16);
        for x in s.x0..s.x1 {
            let dx = (f64::from(x + bx) + 0.5 - w.x) / radius;
            for z in s.z0..s.z1 {
                let dz = (f64::from(z + bz) + 0.5 - w.z) / radius;
                let mut grassy = false;
                if dx * dx + dz * dz >= 1.0 {
                    continue;
                }
                let mut y = s.y1;
                while y > s.y0 {
                    let dy = (f64::from(y - 1) + 0.5 - w.y) / half_height;
                    let wall = f64::from(walls[(y - 1).clamp(0, 255) as usize]);
                    if (dx * dx + dz * dz) * wall + dy * dy / 6.0 < 1.0 {
                        let here = chunk.block(x, y, z);
                        if here.id == ids::GRASS {
                            grassy = true;
                        }
                        if matches!(here.id, ids::STONE | ids::DIRT | ids::GRASS) {
                            if y - 1 < 10 {
                                chunk.set_block(x, y, z, Block::of(ids::FLOWING_LAVA));
                            } else {
                                chunk.set_block(x, y, z, Block::AIR);
                                if grassy && chunk.block(x, y - 1, z).id == ids::DIRT {
                                    let top = top_block(chunk, x, z);
                                    chunk.set_block(x, y - 1, z, top);
                                }
                            }
                        }
                    }
                    y -= 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layered(cx: i32, cz: i32) -> Chunk {
        let mut chunk = Chunk::new(cx, cz);
        for x in 0..16 {
            for z in 0..16 {
                chunk.set_block(x, 0, z, Block::of(ids::BEDROCK));
                for y in 1..=62 {
                    chunk.set_block(x, y, z, Block::of(ids::STONE));
                }
                for y in 63..=68 {
                    chunk.set_block(x, y, z, Block::of(ids::WATER));
                }
            }
        }
        chunk
    }

    fn carved_cells(chunk: &Chunk) -> usize {
        let mut n = 0;
        for x in 0..16 {
            for z in 0..16 {
                for y in 1..=62 {
                    if chunk.block(x, y, z).id != ids::STONE {
                        n += 1;
                    }
                }
            }
        }
        n
    }

    #[test]
    fn region_seeds_depend_on_coordinates() {
        let mut seen = Vec::new();
        for_each_region(114514, 1, 0, 0, |rng, rx, rz| seen.push((rx, rz, rng.next_long())));
        assert_eq!(seen.len(), 9);
        assert_eq!(seen[0].0, -1);
        assert_ne!(seen[0].2, seen[1].2);
    }

    #[test]
    fn caves_are_deterministic_and_do_carve() {
        let caves = Caves::new(114514, 256);
        let mut total = 0;
        for cx in 0..4 {
            for cz in 0..4 {
                let mut a = layered(cx, cz);
                let mut b = layered(cx, cz);
                caves.generate(&mut a);
                caves.generate(&mut b);
                assert!(a == b);
                total += carved_cells(&a);
            }
        }
        assert!(total > 0);
    }

    #[test]
    fn caves_keep_the_floor_and_the_sea() {
        let caves = Caves::new(114514, 256);
        for cx in -2..2 {
            for cz in -2..2 {
                let mut chunk = layered(cx, cz);
                caves.generate(&mut chunk);
                for x in 0..16 {
                    for z in 0..16 {
                        assert_eq!(chunk.block(x, 0, z).id, ids::BEDROCK);
                        assert_eq!(chunk.block(x, 1, z).id, ids::STONE);
                        for y in 1..=68 {
                            let b = chunk.block(x, y, z);
                            if b.is_air() {
                                assert!(y >= 10, "air carved at {y}");
                                assert!(!is_water(chunk.block(x, y + 1, z)), "sea breached at {x},{y},{z}");
                            }
                        }
                    }
                }
            }
        }
    }

    /// First carved cell with water on any of its six faces inside the chunk.
    fn open_to_water(chunk: &Chunk) -> Option<(i32, i32, i32)> {
        for x in 0..16 {
            for z in 0..16 {
                for y in 1..=62 {
                    if !chunk.block(x, y, z).is_air() {
                        continue;
                    }
                    let faces = [(x - 1, y, z), (x + 1, y, z), (x, y - 1, z), (x, y + 1, z), (x, y, z - 1), (x, y, z + 1)];
                    let wet = faces.iter().any(|&(a, b, c)| {
                        (0..16).contains(&a) && (0..16).contains(&c) && is_water(chunk.block(a, b, c))
                    });
                    if wet {
                        return Some((x, y, z));
                    }
                }
            }
        }
        None
    }

    #[test]
    fn carving_never_opens_the_sea_or_the_floor() {
        for seed in [1, 42, 114514, -7_654_321, 9_001] {
            let caves = Caves::new(seed, 256);
            let ravines = Ravines::new(seed, 256);
            for cx in -2..2 {
                for cz in -2..2 {
                    let mut chunk = layered(cx, cz);
                    caves.generate(&mut chunk);
                    ravines.generate(&mut chunk);
                    assert_eq!(open_to_water(&chunk), None, "seed {seed}, chunk {cx},{cz}");
                    for x in 0..16 {
                        for z in 0..16 {
                            assert_eq!(chunk.block(x, 0, z).id, ids::BEDROCK);
                            assert_eq!(chunk.block(x, 1, z).id, ids::STONE);
                            for y in 2..11 {
                                assert!(!chunk.block(x, y, z).is_air(), "hollow below the lava line at {x},{y},{z}");
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn ravines_stay_inside_their_band() {
        let ravines = Ravines::new(42, 256);
        for cx in -3..3 {
            for cz in -3..3 {
                let mut chunk = layered(cx, cz);
                ravines.generate(&mut chunk);
                for x in 0..16 {
                    for z in 0..16 {
                        assert_eq!(chunk.block(x, 1, z).id, ids::STONE);
                        for y in 63..=68 {
                            assert!(is_water(chunk.block(x, y, z)));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn cave_materials() {
        let water = Block::of(ids::WATER);
        assert!(cave_replaceable(Block::of(ids::STONE), water));
        assert!(!cave_replaceable(Block::of(ids::SAND), water));
        assert!(cave_replaceable(Block::of(ids::GRAVEL), Block::AIR));
        assert!(!cave_replaceable(Block::of(ids::BEDROCK), Block::AIR));
    }
}
