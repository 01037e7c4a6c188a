use strata_blocks::{Block, Material, ids};
use strata_chunk::WorldAccess;
use strata_geom::BlockPos;
use strata_noise::JavaRandom;

use super::{get, put};
use crate::biome::{self, ClimateNoise};

const FREEZE_BELOW: f32 = 0.15;

fn drop_through_air(w: &dyn WorldAccess, mut pos: BlockPos) -> BlockPos {
    while w.is_air(pos.x, pos.y, pos.z) && pos.y > 2 {
        pos = pos.down(1);
    }
    pos
}

fn melts_into_ice(b: Block) -> bool {
    b.is_air() || matches!(b.id, ids::DIRT | ids::SNOW | ids::ICE)
}

/// A packed ice spire rising from snow, mirrored below ground and anchored
/// by a few ice roots.
pub fn ice_spike(w: &mut dyn WorldAccess, rng: &mut JavaRandom, pos: BlockPos) -> bool {
    let mut pos = drop_through_air(w, pos);
    if get(w, pos).id != ids::SNOW {
        return false;
    }
    pos = pos.up(rng.next_bounded_int(4));
    let height = rng.next_bounded_int(4) + 7;
    let girth = height / 4 + rng.next_bounded_int(2);
    if girth > 1 && rng.next_bounded_int(60) == 0 {
        pos = pos.up(10 + rng.next_bounded_int(30));
    }
    let packed = Block::of(ids::PACKED_ICE);
    for k in 0..height {
        let f = (1.0 - k as f32 / height as f32) * girth as f32;
        let l = f.ceil() as i32;
        for i in -l..=l {
            let fi = i.abs() as f32 - 0.25;
            for j in -l..=l {
                let fj = j.abs() as f32 - 0.25;
                let in_disc = i == 0 && j == 0 || fi * fi + fj * fj <= f * f;
                let rim = i == -l || i == l || j == -l || j == l;
                if !in_disc || rim && rng.next_float() > 0.75 {
                    continue;
                }
                let p = pos.add(i, k, j);
                if melts_into_ice(get(w, p)) {
                    put(w, p, packed);
                }
                if k != 0 && l > 1 {
                    let q = pos.add(i, -k, j);
                    if melts_into_ice(get(w, q)) {
                        put(w, q, packed);
                    }
                }
            }
        }
    }

    let root = (girth - 1).clamp(0, 1);
    for i in -root..=root {
        for j in -root..=root {
            let mut p = pos.add(i, -1, j);
            let mut run = if i.abs() == 1 && j.abs() == 1 { rng.next_bounded_int(5) } else { 50 };
            while p.y > 50 {
                let b = get(w, p);
                if !melts_into_ice(b) && b.id != ids::PACKED_ICE {
                    break;
                }
                put(w, p, packed);
                p = p.down(1);
                run -= 1;
                if run <= 0 {
                    p = p.down(rng.next_bounded_int(5) + 1);
                    run = rng.next_bounded_int(5);
                }
            }
        }
    }
    true
}

/// A flat disc of packed ice replacing snow, ice and dirt.
pub fn ice_path(w: &mut dyn WorldAccess, rng: &mut JavaRandom, pos: BlockPos, width: i32) -> bool {
    let pos = drop_through_air(w, pos);
    if get(w, pos).id != ids::SNOW {
        return false;
    }
    let r = rng.next_bounded_int(width - 2) + 2;
    for x in pos.x - r..=pos.x + r {
        for z in pos.z - r..=pos.z + r {
            let dx = x - pos.x;
            let dz = z - pos.z;
            if dx * dx + dz * dz > r * r {
                continue;
            }
            for y in pos.y - 1..=pos.y + 1 {
                if matches!(w.block(x, y, z).id, ids::DIRT | ids::SNOW | ids::ICE) {
                    w.set_block(x, y, z, Block::of(ids::PACKED_ICE));
                }
            }
        }
    }
    true
}

/// Mossy boulders resting on grass, dirt or stone.
pub fn boulder(w: &mut dyn WorldAccess, rng: &mut JavaRandom, mut pos: BlockPos, radius: i32) -> bool {
    loop {
        if pos.y <= 3 {
            return false;
        }
        let below = get(w, pos.down(1));
        if !below.is_air() && matches!(below.id, ids::GRASS | ids::DIRT | ids::STONE) {
            break;
        }
        pos = pos.down(1);
    }
    let block = Block::of(ids::MOSSY_COBBLESTONE);
    for _ in 0..3 {
        let rx = radius + rng.next_bounded_int(2);
        let ry = radius + rng.next_bounded_int(2);
        let rz = radius + rng.next_bounded_int(2);
        let f = (rx + ry + rz) as f32 * 0.333 + 0.5;
        let limit = (f * f) as f64;
        for x in -rx..=rx {
            for y in -ry..=ry {
                for z in -rz..=rz {
                    let p = pos.add(x, y, z);
                    if p.distance_sq(pos) <= limit {
                        put(w, p, block);
                    }
                }
            }
        }
        pos = pos.add(
            -(radius + 1) + rng.next_bounded_int(2 + radius * 2),
            -rng.next_bounded_int(2),
            -(radius + 1) + rng.next_bounded_int(2 + radius * 2),
        );
    }
    true
}

/// A small sandstone well dug into desert sand.
pub fn desert_well(w: &mut dyn WorldAccess, pos: BlockPos) -> bool {
    let pos = drop_through_air(w, pos);
    if get(w, pos).id != ids::SAND {
        return false;
    }
    for i in -2..=2 {
        for j in -2..=2 {
            if w.is_air(pos.x + i, pos.y - 1, pos.z + j) && w.is_air(pos.x + i, pos.y - 2, pos.z + j) {
                return false;
            }
        }
    }
    let sandstone = Block::of(ids::SANDSTONE);
    let slab = Block::new(ids::STONE_SLAB, 1);
    let water = Block::of(ids::FLOWING_WATER);
    for y in -1..=0 {
        for x in -2..=2 {
            for z in -2..=2 {
                put(w, pos.add(x, y, z), sandstone);
            }
        }
    }
    for (x, z) in [(0, 0), (-1, 0), (1, 0), (0, -1), (0, 1)] {
        put(w, pos.add(x, 0, z), water);
    }
    for x in -2..=2 {
        for z in -2..=2 {
            if x == -2 || x == 2 || z == -2 || z == 2 {
                put(w, pos.add(x, 1, z), sandstone);
            }
        }
    }
    for (x, z) in [(2, 0), (-2, 0), (0, 2), (0, -2)] {
        put(w, pos.add(x, 1, z), slab);
    }
    for x in -1..=1 {
        for z in -1..=1 {
            put(w, pos.add(x, 4, z), if x == 0 && z == 0 { sandstone } else { slab });
        }
    }
    for y in 1..=3 {
        for (x, z) in [(-1, -1), (-1, 1), (1, -1), (1, 1)] {
            put(w, pos.add(x, y, z), sandstone);
        }
    }
    true
}

fn snow_can_rest_on(b: Block) -> bool {
    if b.id == ids::ICE || b.id == ids::PACKED_ICE {
        return false;
    }
    b.material() == Material::Leaves || b.material().is_opaque()
}

/// Freezes still surface water and lays snow on one column when the
/// height-adjusted temperature is cold enough.
pub fn freeze_column(w: &mut dyn WorldAccess, climate: &ClimateNoise, x: i32, z: i32) {
    let top = w.precipitation_height(x, z);
    let Some(id) = w.biome(x, z) else {
        return;
    };
    let b = biome::biome(id);
    let water = BlockPos::new(x, top - 1, z);
    if (0..w.max_height()).contains(&water.y) && climate.temperature(b, x, water.y, z) < FREEZE_BELOW {
        let here = get(w, water);
        if (here.id == ids::WATER || here.id == ids::FLOWING_WATER) && here.meta == 0 {
            put(w, water, Block::of(ids::ICE));
        }
    }
    let snow = BlockPos::new(x, top, z);
    if (0..w.max_height()).contains(&snow.y)
        && climate.temperature(b, x, snow.y, z) < FREEZE_BELOW
        && w.is_air(x, snow.y, z)
        && snow_can_rest_on(get(w, snow.down(1)))
    {
        put(w, snow, Block::of(ids::SNOW_LAYER));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_chunk::Chunk;

    fn flat(top: Block, biome_id: u8) -> Chunk {
        let mut c = Chunk::new(0, 0);
        for x in 0..16 {
            for z in 0..16 {
                for y in 0..63 {
                    c.set_block(x, y, z, Block::of(ids::STONE));
                }
                c.set_block(x, 63, z, top);
                c.set_biome(x, z, biome_id);
            }
        }
        c
    }

    #[test]
    fn spikes_grow_from_snow() {
        let mut c = flat(Block::of(ids::SNOW), biome::ids::ICE_PLAINS);
        assert!(ice_spike(&mut c, &mut JavaRandom::new(6), BlockPos::new(8, 90, 8)));
        assert!(c.histogram()[ids::PACKED_ICE as usize] >= 7);
        let mut grass = flat(Block::of(ids::GRASS), biome::ids::PLAINS);
        assert!(!ice_spike(&mut grass, &mut JavaRandom::new(6), BlockPos::new(8, 90, 8)));
    }

    #[test]
    fn boulders_rest_on_the_ground() {
        let mut c = flat(Block::of(ids::GRASS), biome::ids::MEGA_TAIGA);
        assert!(boulder(&mut c, &mut JavaRandom::new(2), BlockPos::new(8, 120, 8), 0));
        assert!(c.histogram()[ids::MOSSY_COBBLESTONE as usize] > 0);
        for y in 70..256 {
            assert!(c.block(8, y, 8).is_air());
        }
    }

    #[test]
    fn wells_need_sand() {
        let mut c = flat(Block::of(ids::SAND), biome::ids::DESERT);
        assert!(desert_well(&mut c, BlockPos::new(8, 70, 8)));
        assert_eq!(c.block(8, 63, 8).id, ids::FLOWING_WATER);
        assert_eq!(c.block(8, 67, 8).id, ids::SANDSTONE);
        let mut grass = flat(Block::of(ids::GRASS), biome::ids::PLAINS);
        assert!(!desert_well(&mut grass, BlockPos::new(8, 70, 8)));
    }

    #[test]
    fn cold_columns_freeze_and_snow() {
        let climate = ClimateNoise::new();
        let mut c = flat(Block::of(ids::WATER), biome::ids::ICE_PLAINS);
        c.set_block(3, 63, 3, Block::of(ids::GRASS));
        freeze_column(&mut c, &climate, 8, 8);
        freeze_column(&mut c, &climate, 3, 3);
        assert_eq!(c.block(8, 63, 8).id, ids::ICE);
        assert_eq!(c.block(8, 64, 8), Block::AIR);
        assert_eq!(c.block(3, 64, 3).id, ids::SNOW_LAYER);

        let mut warm = flat(Block::of(ids::WATER), biome::ids::PLAINS);
        freeze_column(&mut warm, &climate, 8, 8);
        assert_eq!(warm.block(8, 63, 8).id, ids::WATER);
    }
}
