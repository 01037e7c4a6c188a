use strata_blocks::{Block, Material, ids};
use strata_chunk::WorldAccess;
use strata_geom::{BlockPos, Facing};
use strata_noise::JavaRandom;

use super::trees::{VINE_EAST, VINE_NORTH, VINE_SOUTH, VINE_WEST, is_full, vine};
use super::{get, put, scatter};

/// Single-block flowers, in the order of the flower forest gradient.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flower {
    Dandelion,
    Poppy,
    BlueOrchid,
    Allium,
    Houstonia,
    RedTulip,
    OrangeTulip,
    WhiteTulip,
    PinkTulip,
    OxeyeDaisy,
}

impl Flower {
    pub const GRADIENT: [Flower; 10] = [
        Flower::Dandelion,
        Flower::Poppy,
        Flower::BlueOrchid,
        Flower::Allium,
        Flower::Houstonia,
        Flower::RedTulip,
        Flower::OrangeTulip,
        Flower::WhiteTulip,
        Flower::PinkTulip,
        Flower::OxeyeDaisy,
    ];

    pub fn block(self) -> Block {
        match self {
            Flower::Dandelion => Block::of(ids::YELLOW_FLOWER),
            other => Block::new(ids::RED_FLOWER, other as u8 - 1),
        }
    }
}

/// Two-block plants; the discriminant is the lower half's meta.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DoublePlant {
    Sunflower = 0,
    Syringa = 1,
    Grass = 2,
    Fern = 3,
    Rose = 4,
    Paeonia = 5,
}

const UPPER_HALF: u8 = 10;

fn is_soil(b: Block) -> bool {
    matches!(b.id, ids::GRASS | ids::DIRT | ids::FARMLAND)
}

/// Flowers and grass survive on soil; light is not modelled.
fn bush_can_stay(w: &dyn WorldAccess, p: BlockPos) -> bool {
    is_soil(get(w, p.down(1)))
}

/// Up to 64 flowers around `pos`.
pub fn flowers(w: &mut dyn WorldAccess, rng: &mut JavaRandom, pos: BlockPos, flower: Flower) -> bool {
    for _ in 0..64 {
        let p = scatter(rng, pos, 8, 4);
        if w.is_air(p.x, p.y, p.z) && bush_can_stay(w, p) {
            put(w, p, flower.block());
        }
    }
    true
}

/// Tall grass (meta 1) or fern (meta 2), dropped to the ground first.
pub fn tall_grass(w: &mut dyn WorldAccess, rng: &mut JavaRandom, mut pos: BlockPos, meta: u8) -> bool {
    loop {
        let m = get(w, pos).material();
        if !(m == Material::Air || m == Material::Leaves) || pos.y <= 0 {
            break;
        }
        pos = pos.down(1);
    }
    let block = Block::new(ids::TALLGRASS, meta);
    for _ in 0..128 {
        let p = scatter(rng, pos, 8, 4);
        if w.is_air(p.x, p.y, p.z) && bush_can_stay(w, p) {
            put(w, p, block);
        }
    }
    true
}

pub fn dead_bush(w: &mut dyn WorldAccess, rng: &mut JavaRandom, mut pos: BlockPos) -> bool {
    loop {
        let m = get(w, pos).material();
        if !(m == Material::Air || m == Material::Leaves) || pos.y <= 0 {
            break;
        }
        pos = pos.down(1);
    }
    for _ in 0..4 {
        let p = scatter(rng, pos, 8, 4);
        let below = get(w, p.down(1)).id;
        let stays = matches!(below, ids::SAND | ids::HARDENED_CLAY | ids::STAINED_HARDENED_CLAY | ids::DIRT);
        if w.is_air(p.x, p.y, p.z) && stays {
            put(w, p, Block::of(ids::DEADBUSH));
        }
    }
    true
}

pub fn waterlilies(w: &mut dyn WorldAccess, rng: &mut JavaRandom, pos: BlockPos) -> bool {
    for _ in 0..10 {
        let x = pos.x + rng.next_bounded_int(8) - rng.next_bounded_int(8);
        let y = pos.y + rng.next_bounded_int(4) - rng.next_bounded_int(4);
        let z = pos.z + rng.next_bounded_int(8) - rng.next_bounded_int(8);
        let below = w.block(x, y - 1, z);
        let on_still_water = below.id == ids::WATER && below.meta == 0 || below.id == ids::ICE;
        if w.is_air(x, y, z) && on_still_water {
            w.set_block(x, y, z, Block::of(ids::WATERLILY));
        }
    }
    true
}

/// Mushrooms stay on mycelium or podzol, or on any full block when
/// something overhead shades them.
fn mushroom_can_stay(w: &dyn WorldAccess, p: BlockPos) -> bool {
    if p.y < 0 || p.y >= w.max_height() {
        return false;
    }
    let below = get(w, p.down(1));
    if below.id == ids::MYCELIUM || below.id == ids::DIRT && below.meta == 2 {
        return true;
    }
    w.height(p.x, p.z) > p.y + 1 && is_full(below)
}

/// A patch of up to 64 small mushrooms.
pub fn mushrooms(w: &mut dyn WorldAccess, rng: &mut JavaRandom, pos: BlockPos, block: Block) -> bool {
    for _ in 0..64 {
        let p = scatter(rng, pos, 8, 4);
        if w.is_air(p.x, p.y, p.z) && mushroom_can_stay(w, p) {
            put(w, p, block);
        }
    }
    true
}

fn water_beside(w: &dyn WorldAccess, p: BlockPos) -> bool {
    Facing::PLANE.into_iter().any(|f| get(w, p.offset(f, 1)).material() == Material::Water)
}

fn reed_can_stay(w: &dyn WorldAccess, p: BlockPos) -> bool {
    let below = p.down(1);
    match get(w, below).id {
        ids::REEDS => true,
        ids::GRASS | ids::DIRT | ids::SAND => water_beside(w, below),
        _ => false,
    }
}

pub fn reeds(w: &mut dyn WorldAccess, rng: &mut JavaRandom, pos: BlockPos) -> bool {
    for _ in 0..20 {
        let p = pos.add(rng.next_bounded_int(4) - rng.next_bounded_int(4), 0, rng.next_bounded_int(4) - rng.next_bounded_int(4));
        if !w.is_air(p.x, p.y, p.z) || !water_beside(w, p.down(1)) {
            continue;
        }
        let bound = rng.next_bounded_int(3) + 1;
        let height = 2 + rng.next_bounded_int(bound);
        for dy in 0..height {
            if reed_can_stay(w, p) {
                put(w, p.up(dy), Block::of(ids::REEDS));
            }
        }
    }
    true
}

pub fn pumpkins(w: &mut dyn WorldAccess, rng: &mut JavaRandom, pos: BlockPos) -> bool {
    for _ in 0..64 {
        let p = scatter(rng, pos, 8, 4);
        if w.is_air(p.x, p.y, p.z) && get(w, p.down(1)).id == ids::GRASS {
            let facing = Facing::PLANE[rng.next_bounded_int(4) as usize];
            put(w, p, Block::new(ids::PUMPKIN, facing.horizontal_index() as u8));
        }
    }
    true
}

pub fn melons(w: &mut dyn WorldAccess, rng: &mut JavaRandom, pos: BlockPos) -> bool {
    for _ in 0..64 {
        let p = scatter(rng, pos, 8, 4);
        if get(w, p).material().is_replaceable() && get(w, p.down(1)).id == ids::GRASS {
            put(w, p, Block::of(ids::MELON_BLOCK));
        }
    }
    true
}

fn cactus_can_stay(w: &dyn WorldAccess, p: BlockPos) -> bool {
    for f in Facing::PLANE {
        let m = get(w, p.offset(f, 1)).material();
        if m.blocks_movement() || m == Material::Lava {
            return false;
        }
    }
    let below = get(w, p.down(1)).id;
    below == ids::CACTUS || below == ids::SAND && !get(w, p.up(1)).material().is_liquid()
}

pub fn cacti(w: &mut dyn WorldAccess, rng: &mut JavaRandom, pos: BlockPos) -> bool {
    for _ in 0..10 {
        let p = scatter(rng, pos, 8, 4);
        if !w.is_air(p.x, p.y, p.z) {
            continue;
        }
        let bound = rng.next_bounded_int(3) + 1;
        let height = 1 + rng.next_bounded_int(bound);
        for dy in 0..height {
            if cactus_can_stay(w, p) {
                put(w, p.up(dy), Block::of(ids::CACTUS));
            }
        }
    }
    true
}

pub fn double_plants(w: &mut dyn WorldAccess, rng: &mut JavaRandom, pos: BlockPos, kind: DoublePlant) -> bool {
    let mut placed = false;
    for _ in 0..64 {
        let p = scatter(rng, pos, 8, 4);
        let fits = w.is_air(p.x, p.y, p.z)
            && get(w, p).material().is_replaceable()
            && w.is_air(p.x, p.y + 1, p.z)
            && bush_can_stay(w, p);
        if fits {
            put(w, p, Block::new(ids::DOUBLE_PLANT, kind as u8));
            put(w, p.up(1), Block::new(ids::DOUBLE_PLANT, UPPER_HALF));
            placed = true;
        }
    }
    placed
}

fn vine_support(b: Block) -> bool {
    b.material().is_opaque() || b.material() == Material::Leaves
}

/// Climbs from `pos` to the build limit, hanging a vine on the first
/// supporting side of every air cell and wandering sideways when blocked.
pub fn climbing_vines(w: &mut dyn WorldAccess, rng: &mut JavaRandom, mut pos: BlockPos) -> bool {
    while pos.y < w.max_height() {
        if w.is_air(pos.x, pos.y, pos.z) {
            let above = get(w, pos.up(1));
            let open_above = above.is_air() || above.id == ids::VINE || vine_support(above);
            for f in Facing::PLANE {
                let support = pos.offset(f.opposite(), 1);
                if open_above && vine_support(get(w, support)) {
                    let side = match f {
                        Facing::North => VINE_SOUTH,
                        Facing::East => VINE_WEST,
                        Facing::South => VINE_NORTH,
                        Facing::West => VINE_EAST,
                    };
                    put(w, pos, vine(side));
                    break;
                }
            }
        } else {
            pos = pos.add(rng.next_bounded_int(4) - rng.next_bounded_int(4), 0, rng.next_bounded_int(4) - rng.next_bounded_int(4));
        }
        pos = pos.up(1);
    }
    true
}

/// Replaces grass or dirt around `pos` with `block`. Needs water at the
/// centre.
pub fn patch(w: &mut dyn WorldAccess, rng: &mut JavaRandom, pos: BlockPos, block: Block, radius: i32) -> bool {
    if get(w, pos).material() != Material::Water {
        return false;
    }
    let r = rng.next_bounded_int(radius - 2) + 2;
    for x in pos.x - r..=pos.x + r {
        for z in pos.z - r..=pos.z + r {
            let dx = x - pos.x;
            let dz = z - pos.z;
            if dx * dx + dz * dz > r * r {
                continue;
            }
            for y in pos.y - 2..=pos.y + 2 {
                let id = w.block(x, y, z).id;
                if id == ids::DIRT || id == ids::GRASS {
                    w.set_block(x, y, z, block);
                }
            }
        }
    }
    true
}

/// Clay disc: one block up and down, replacing dirt and clay.
pub fn clay(w: &mut dyn WorldAccess, rng: &mut JavaRandom, pos: BlockPos, radius: i32) -> bool {
    if get(w, pos).material() != Material::Water {
        return false;
    }
    let r = rng.next_bounded_int(radius - 2) + 2;
    for x in pos.x - r..=pos.x + r {
        for z in pos.z - r..=pos.z + r {
            let dx = x - pos.x;
            let dz = z - pos.z;
            if dx * dx + dz * dz > r * r {
                continue;
            }
            for y in pos.y - 1..=pos.y + 1 {
                let id = w.block(x, y, z).id;
                if id == ids::DIRT || id == ids::CLAY {
                    w.set_block(x, y, z, Block::of(ids::CLAY));
                }
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_chunk::Chunk;

    fn ground(top: Block) -> Chunk {
        let mut c = Chunk::new(0, 0);
        for x in 0..16 {
            for z in 0..16 {
                for y in 0..63 {
                    c.set_block(x, y, z, Block::of(ids::STONE));
                }
                c.set_block(x, 63, z, top);
            }
        }
        c
    }

    fn count(c: &Chunk, id: u8) -> u32 {
        c.histogram()[id as usize]
    }

    #[test]
    fn flowers_sit_on_soil_only() {
        let mut c = ground(Block::of(ids::GRASS));
        flowers(&mut c, &mut JavaRandom::new(1), BlockPos::new(8, 64, 8), Flower::Dandelion);
        assert!(count(&c, ids::YELLOW_FLOWER) > 0);
        for x in 0..16 {
            for z in 0..16 {
                for y in 0..256 {
                    if c.block(x, y, z).id == ids::YELLOW_FLOWER {
                        assert_eq!(y, 64);
                    }
                }
            }
        }
        let mut sand = ground(Block::of(ids::SAND));
        flowers(&mut sand, &mut JavaRandom::new(1), BlockPos::new(8, 64, 8), Flower::Poppy);
        assert_eq!(count(&sand, ids::RED_FLOWER), 0);
    }

    #[test]
    fn flower_blocks() {
        assert_eq!(Flower::Dandelion.block(), Block::of(ids::YELLOW_FLOWER));
        assert_eq!(Flower::Poppy.block(), Block::new(ids::RED_FLOWER, 0));
        assert_eq!(Flower::OxeyeDaisy.block(), Block::new(ids::RED_FLOWER, 8));
    }

    #[test]
    fn grass_drops_from_the_sky() {
        let mut c = ground(Block::of(ids::GRASS));
        tall_grass(&mut c, &mut JavaRandom::new(4), BlockPos::new(8, 120, 8), 1);
        assert!(count(&c, ids::TALLGRASS) > 10);
        assert_eq!(c.block(8, 100, 8), Block::AIR);
    }

    #[test]
    fn cacti_need_sand_and_open_sides() {
        let mut c = ground(Block::of(ids::SAND));
        for seed in 0..20 {
            cacti(&mut c, &mut JavaRandom::new(seed), BlockPos::new(8, 64, 8));
        }
        assert!(count(&c, ids::CACTUS) > 0);
        let mut grass = ground(Block::of(ids::GRASS));
        cacti(&mut grass, &mut JavaRandom::new(0), BlockPos::new(8, 64, 8));
        assert_eq!(count(&grass, ids::CACTUS), 0);
    }

    #[test]
    fn reeds_need_water_next_to_their_base() {
        let mut c = ground(Block::of(ids::GRASS));
        reeds(&mut c, &mut JavaRandom::new(2), BlockPos::new(8, 64, 8));
        assert_eq!(count(&c, ids::REEDS), 0);
        for z in 0..16 {
            c.set_block(8, 63, z, Block::of(ids::WATER));
        }
        for seed in 0..10 {
            reeds(&mut c, &mut JavaRandom::new(seed), BlockPos::new(8, 64, 8));
        }
        assert!(count(&c, ids::REEDS) > 0);
    }

    #[test]
    fn patches_need_water_at_the_centre() {
        let mut c = ground(Block::of(ids::GRASS));
        assert!(!patch(&mut c, &mut JavaRandom::new(1), BlockPos::new(8, 63, 8), Block::of(ids::SAND), 7));
        c.set_block(8, 63, 8, Block::of(ids::WATER));
        assert!(patch(&mut c, &mut JavaRandom::new(1), BlockPos::new(8, 63, 8), Block::of(ids::SAND), 7));
        assert_eq!(c.block(9, 63, 8).id, ids::SAND);
        assert_eq!(c.block(8, 63, 8).id, ids::WATER);
    }

    #[test]
    fn double_plants_take_two_cells() {
        let mut c = ground(Block::of(ids::GRASS));
        assert!(double_plants(&mut c, &mut JavaRandom::new(8), BlockPos::new(8, 64, 8), DoublePlant::Sunflower));
        assert_eq!(count(&c, ids::DOUBLE_PLANT) % 2, 0);
        for x in 0..16 {
            for z in 0..16 {
                if c.block(x, 64, z).id == ids::DOUBLE_PLANT {
                    assert_eq!(c.block(x, 64, z).meta, 0);
                    assert_eq!(c.block(x, 65, z), Block::new(ids::DOUBLE_PLANT, UPPER_HALF));
                }
            }
        }
    }

    #[test]
    fn vines_cling_to_walls() {
        let mut c = ground(Block::of(ids::GRASS));
        for y in 64..80 {
            c.set_block(9, y, 8, Block::of(ids::STONE));
        }
        climbing_vines(&mut c, &mut JavaRandom::new(0), BlockPos::new(8, 64, 8));
        // the wall is east of the column, so the vine hangs on its east side
        assert_eq!(c.block(8, 64, 8), vine(VINE_EAST));
        assert_eq!(c.block(8, 79, 8), vine(VINE_EAST));
        assert_eq!(c.block(8, 80, 8), Block::AIR);
    }
}
