//! Lakes, dungeons and liquid springs.

use strata_blocks::{Block, Material, ids};
use strata_chunk::WorldAccess;
use strata_geom::{BlockPos, Facing};
use strata_noise::JavaRandom;

use super::{get, put};
use crate::biome::{self, ClimateNoise};

const FREEZE_BELOW: f32 = 0.15;

fn lake_index(x: i32, z: i32, y: i32) -> usize {
    ((x * 16 + z) * 8 + y) as usize
}

/// A blob-shaped pool of `liquid` sunk into the ground, open above its
/// fourth layer.
pub fn lake(w: &mut dyn WorldAccess, rng: &mut JavaRandom, climate: &ClimateNoise, pos: BlockPos, liquid: Block) -> bool {
    let mut pos = pos.add(-8, 0, -8);
    while pos.y > 5 && w.is_air(pos.x, pos.y, pos.z) {
        pos = pos.down(1);
    }
    if pos.y <= 4 {
        return false;
    }
    pos = pos.down(4);

    let mut shape = [false; 2048];
    let blobs = rng.next_bounded_int(4) + 4;
    for _ in 0..blobs {
        let sx = rng.next_double() * 6.0 + 3.0;
        let sy = rng.next_double() * 4.0 + 2.0;
        let sz = rng.next_double() * 6.0 + 3.0;
        let cx = rng.next_double() * (16.0 - sx - 2.0) + 1.0 + sx / 2.0;
        let cy = rng.next_double() * (8.0 - sy - 4.0) + 2.0 + sy / 2.0;
        let cz = rng.next_double() * (16.0 - sz - 2.0) + 1.0 + sz / 2.0;
        for x in 1..15 {
            for z in 1..15 {
                for y in 1..7 {
                    let dx = (x as f64 - cx) / (sx / 2.0);
                    let dy = (y as f64 - cy) / (sy / 2.0);
                    let dz = (z as f64 - cz) / (sz / 2.0);
                    if dx * dx + dy * dy + dz * dz < 1.0 {
                        shape[lake_index(x, z, y)] = true;
                    }
                }
            }
        }
    }

    let inside = |x: i32, z: i32, y: i32| shape[lake_index(x, z, y)];
    let rim = |x: i32, z: i32, y: i32| {
        !inside(x, z, y)
            && (x < 15 && inside(x + 1, z, y)
                || x > 0 && inside(x - 1, z, y)
                || z < 15 && inside(x, z + 1, y)
                || z > 0 && inside(x, z - 1, y)
                || y < 7 && inside(x, z, y + 1)
                || y > 0 && inside(x, z, y - 1))
    };

    for x in 0..16 {
        for z in 0..16 {
            for y in 0..8 {
                if !rim(x, z, y) {
                    continue;
                }
                let b = get(w, pos.add(x, y, z));
                let m = b.material();
                if y >= 4 && m.is_liquid() {
                    return false;
                }
                if y < 4 && !m.blocks_movement() && b.id != liquid.id {
                    return false;
                }
            }
        }
    }

    for x in 0..16 {
        for z in 0..16 {
            for y in 0..8 {
                if inside(x, z, y) {
                    put(w, pos.add(x, y, z), if y >= 4 { Block::AIR } else { liquid });
                }
            }
        }
    }

    // exposed dirt on the rim regrows its biome's top
    for x in 0..16 {
        for z in 0..16 {
            for y in 4..8 {
                if !inside(x, z, y) {
                    continue;
                }
                let p = pos.add(x, y - 1, z);
                let open = pos.y + y >= w.height(p.x, p.z);
                if get(w, p).id == ids::DIRT && open {
                    let top = column_biome(w, p.x, p.z).top;
                    put(w, p, if top.id == ids::MYCELIUM { top } else { Block::of(ids::GRASS) });
                }
            }
        }
    }

    if liquid.material() == Material::Lava {
        for x in 0..16 {
            for z in 0..16 {
                for y in 0..8 {
                    if rim(x, z, y) && (y < 4 || rng.next_bounded_int(2) != 0) {
                        let p = pos.add(x, y, z);
                        if get(w, p).material().blocks_movement() {
                            put(w, p, Block::of(ids::STONE));
                        }
                    }
                }
            }
        }
    }

    if liquid.material() == Material::Water {
        for x in 0..16 {
            for z in 0..16 {
                let p = pos.add(x, 4, z);
                let b = get(w, p);
                let still = (b.id == ids::WATER || b.id == ids::FLOWING_WATER) && b.meta == 0;
                if still && climate.temperature(column_biome(w, p.x, p.z), p.x, p.y, p.z) < FREEZE_BELOW {
                    put(w, p, Block::of(ids::ICE));
                }
            }
        }
    }
    true
}

fn column_biome(w: &dyn WorldAccess, x: i32, z: i32) -> &'static biome::Biome {
    biome::biome(w.biome(x, z).unwrap_or(biome::ids::PLAINS))
}

/// A cobblestone room with a spawner and up to two chests. Needs a solid
/// floor and ceiling and one to five wall openings at floor level.
pub fn dungeon(w: &mut dyn WorldAccess, rng: &mut JavaRandom, pos: BlockPos) -> bool {
    let rx = rng.next_bounded_int(2) + 2;
    let (x0, x1) = (-rx - 1, rx + 1);
    let rz = rng.next_bounded_int(2) + 2;
    let (z0, z1) = (-rz - 1, rz + 1);

    let mut openings = 0;
    for dx in x0..=x1 {
        for dy in -1..=4 {
            for dz in z0..=z1 {
                let p = pos.add(dx, dy, dz);
                let solid = get(w, p).material().blocks_movement();
                if dy == -1 && !solid || dy == 4 && !solid {
                    return false;
                }
                let wall = dx == x0 || dx == x1 || dz == z0 || dz == z1;
                if wall && dy == 0 && w.is_air(p.x, p.y, p.z) && w.is_air(p.x, p.y + 1, p.z) {
                    openings += 1;
                }
            }
        }
    }
    if !(1..=5).contains(&openings) {
        return false;
    }

    for dx in x0..=x1 {
        for dy in (-1..=3).rev() {
            for dz in z0..=z1 {
                let p = pos.add(dx, dy, dz);
                let shell = dx == x0 || dy == -1 || dz == z0 || dx == x1 || dy == 4 || dz == z1;
                if !shell {
                    if get(w, p).id != ids::CHEST {
                        put(w, p, Block::AIR);
                    }
                } else if p.y >= 0 && !get(w, p.down(1)).material().blocks_movement() {
                    put(w, p, Block::AIR);
                } else if get(w, p).material().blocks_movement() && get(w, p).id != ids::CHEST {
                    let block = if dy == -1 && rng.next_bounded_int(4) != 0 {
                        ids::MOSSY_COBBLESTONE
                    } else {
                        ids::COBBLESTONE
                    };
                    put(w, p, Block::of(block));
                }
            }
        }
    }

    for _ in 0..2 {
        for _ in 0..3 {
            let x = pos.x + rng.next_bounded_int(rx * 2 + 1) - rx;
            let z = pos.z + rng.next_bounded_int(rz * 2 + 1) - rz;
            let p = BlockPos::new(x, pos.y, z);
            if !w.is_air(p.x, p.y, p.z) {
                continue;
            }
            let walls: Vec<Facing> = Facing::PLANE
                .into_iter()
                .filter(|&f| get(w, p.offset(f, 1)).material().blocks_movement())
                .collect();
            if let [wall] = walls[..] {
                put(w, p, Block::new(ids::CHEST, wall.opposite().meta_index()));
                // loot table seed
                rng.next_long();
                break;
            }
        }
    }

    put(w, pos, Block::of(ids::MOB_SPAWNER));
    // spawner mob pick
    rng.next_bounded_int(4);
    log::trace!(target: "worldgen", "dungeon at {},{},{}", pos.x, pos.y, pos.z);
    true
}

/// A single source block set into a wall with exactly one open side.
pub fn spring(w: &mut dyn WorldAccess, pos: BlockPos, liquid: Block) -> bool {
    let is_stone = |b: Block| b.id == ids::STONE;
    if !is_stone(get(w, pos.up(1))) || !is_stone(get(w, pos.down(1))) {
        return false;
    }
    let here = get(w, pos);
    if !here.is_air() && !is_stone(here) {
        return false;
    }
    let sides = Facing::PLANE.map(|f| get(w, pos.offset(f, 1)));
    let stone = sides.iter().filter(|b| is_stone(**b)).count();
    let air = sides.iter().filter(|b| b.is_air()).count();
    if stone == 3 && air == 1 {
        put(w, pos, liquid);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_chunk::Chunk;

    fn ground(top: i32) -> Chunk {
        let mut c = Chunk::new(0, 0);
        for x in 0..16 {
            for z in 0..16 {
                for y in 0..top {
                    c.set_block(x, y, z, Block::of(ids::STONE));
                }
                c.set_block(x, top, z, Block::of(ids::DIRT));
                c.set_biome(x, z, biome::ids::PLAINS);
            }
        }
        c
    }

    #[test]
    fn water_lake_sinks_into_flat_ground() {
        let climate = ClimateNoise::new();
        let mut water = 0;
        for seed in 0..8 {
            let mut c = ground(60);
            if lake(&mut c, &mut JavaRandom::new(seed), &climate, BlockPos::new(8, 100, 8), Block::of(ids::WATER)) {
                water += c.histogram()[ids::WATER as usize];
                // the lake body lies in the four layers under the surface
                for x in 0..16 {
                    for z in 0..16 {
                        for y in 61..256 {
                            assert_ne!(c.block(x, y, z).id, ids::WATER);
                        }
                    }
                }
            }
        }
        assert!(water > 0);
    }

    #[test]
    fn lakes_fail_over_the_void() {
        let climate = ClimateNoise::new();
        let mut c = Chunk::new(0, 0);
        assert!(!lake(&mut c, &mut JavaRandom::new(1), &climate, BlockPos::new(8, 100, 8), Block::of(ids::WATER)));
    }

    #[test]
    fn dungeon_needs_an_opening() {
        let mut sealed = ground(80);
        assert!(!dungeon(&mut sealed, &mut JavaRandom::new(3), BlockPos::new(8, 40, 8)));

        let mut c = ground(80);
        // a one-wide tunnel reaching the room from the east
        for x in 8..16 {
            c.set_block(x, 40, 8, Block::AIR);
            c.set_block(x, 41, 8, Block::AIR);
        }
        assert!(dungeon(&mut c, &mut JavaRandom::new(3), BlockPos::new(8, 40, 8)));
        assert_eq!(c.block(8, 40, 8).id, ids::MOB_SPAWNER);
        let h = c.histogram();
        assert!(h[ids::COBBLESTONE as usize] + h[ids::MOSSY_COBBLESTONE as usize] > 0);
    }

    #[test]
    fn spring_needs_one_open_side() {
        let mut c = ground(80);
        c.set_block(9, 50, 8, Block::AIR);
        spring(&mut c, BlockPos::new(8, 50, 8), Block::of(ids::FLOWING_WATER));
        assert_eq!(c.block(8, 50, 8).id, ids::FLOWING_WATER);
        spring(&mut c, BlockPos::new(8, 30, 8), Block::of(ids::FLOWING_LAVA));
        assert_eq!(c.block(8, 30, 8).id, ids::STONE);
    }
}
