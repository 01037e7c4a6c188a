use strata_blocks::{Block, Material, ids};
use strata_chunk::WorldAccess;
use strata_geom::{BlockPos, Facing};
use strata_noise::JavaRandom;

use super::giant;
use super::{get, is_soil, put, set_dirt};

pub const OAK_LOG: Block = Block::new(ids::LOG, 0);
pub const SPRUCE_LOG: Block = Block::new(ids::LOG, 1);
pub const BIRCH_LOG: Block = Block::new(ids::LOG, 2);
pub const JUNGLE_LOG: Block = Block::new(ids::LOG, 3);
pub const ACACIA_LOG: Block = Block::new(ids::LOG2, 0);
pub const DARK_OAK_LOG: Block = Block::new(ids::LOG2, 1);

pub const OAK_LEAVES: Block = Block::new(ids::LEAVES, 0);
pub const SPRUCE_LEAVES: Block = Block::new(ids::LEAVES, 1);
pub const BIRCH_LEAVES: Block = Block::new(ids::LEAVES, 2);
pub const JUNGLE_LEAVES: Block = Block::new(ids::LEAVES, 3);
pub const ACACIA_LEAVES: Block = Block::new(ids::LEAVES2, 0);
pub const DARK_OAK_LEAVES: Block = Block::new(ids::LEAVES2, 1);

/// Every tree shape a biome can ask for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeKind {
    Oak,
    BigOak,
    Birch,
    TallBirch,
    Spruce,
    Pine,
    MegaPine,
    MegaSpruce,
    Swamp,
    /// Small jungle tree with trunk vines and cocoa; its base height is
    /// drawn when the kind is picked.
    Jungle { base_height: i32 },
    JungleShrub,
    MegaJungle,
    Savanna,
    DarkOak,
}

impl TreeKind {
    /// Grows the tree with its lowest log at `pos`. Returns false when the
    /// site is unsuitable; nothing is written in that case except where a
    /// shape writes while it checks space.
    pub fn grow(self, w: &mut dyn WorldAccess, rng: &mut JavaRandom, pos: BlockPos) -> bool {
        match self {
            TreeKind::Oak => small_tree(w, rng, pos, 4, OAK_LOG, OAK_LEAVES, false),
            TreeKind::Jungle { base_height } => small_tree(w, rng, pos, base_height, JUNGLE_LOG, JUNGLE_LEAVES, true),
            TreeKind::Birch => birch(w, rng, pos, false),
            TreeKind::TallBirch => birch(w, rng, pos, true),
            TreeKind::Spruce => spruce(w, rng, pos),
            TreeKind::Pine => pine(w, rng, pos),
            TreeKind::Swamp => swamp_oak(w, rng, pos),
            TreeKind::Savanna => acacia(w, rng, pos),
            TreeKind::DarkOak => dark_oak(w, rng, pos),
            TreeKind::JungleShrub => shrub(w, rng, pos),
            TreeKind::BigOak => giant::big_oak(w, rng, pos),
            TreeKind::MegaJungle => giant::mega_jungle(w, rng, pos),
            TreeKind::MegaPine => giant::mega_pine(w, rng, pos, false),
            TreeKind::MegaSpruce => giant::mega_pine(w, rng, pos, true),
        }
    }

    /// Ground dressing after a successful grow. Only the giant conifers
    /// have one: a podzol skirt.
    pub fn dress(self, w: &mut dyn WorldAccess, rng: &mut JavaRandom, pos: BlockPos) {
        if matches!(self, TreeKind::MegaPine | TreeKind::MegaSpruce) {
            giant::podzol_skirt(w, rng, pos);
        }
    }
}

/// Blocks a growing tree may overwrite.
pub(crate) fn can_grow_into(b: Block) -> bool {
    matches!(b.material(), Material::Air | Material::Leaves)
        || matches!(b.id, ids::GRASS | ids::DIRT | ids::LOG | ids::LOG2 | ids::SAPLING | ids::VINE)
}

fn air_or_leaves(b: Block) -> bool {
    matches!(b.material(), Material::Air | Material::Leaves)
}

fn air_leaves_or_vine(b: Block) -> bool {
    matches!(b.material(), Material::Air | Material::Leaves | Material::Vine)
}

/// Whether a block occupies its whole cell; foliage never overwrites those.
pub(crate) fn is_full(b: Block) -> bool {
    b.material().is_opaque()
}

/// Checks the column of boxes `pos.y..=top`, each `radius(y)` wide, for
/// blocks the tree may not grow into.
fn has_room(
    w: &dyn WorldAccess,
    pos: BlockPos,
    top: i32,
    radius: impl Fn(i32) -> i32,
    fits: impl Fn(Block) -> bool,
) -> bool {
    for y in pos.y..=top {
        let r = radius(y);
        for x in pos.x - r..=pos.x + r {
            for z in pos.z - r..=pos.z + r {
                if y < 0 || y >= w.max_height() || !fits(w.block(x, y, z)) {
                    return false;
                }
            }
        }
    }
    true
}

/// Shared space test of the round-crowned trees: a single column at the
/// base, radius 1 along the trunk and 2 at the crown.
fn round_room(w: &dyn WorldAccess, pos: BlockPos, height: i32) -> bool {
    let crown = pos.y + 1 + height - 2;
    has_room(
        w,
        pos,
        pos.y + 1 + height,
        |y| {
            if y >= crown {
                2
            } else if y == pos.y {
                0
            } else {
                1
            }
        },
        can_grow_into,
    )
}

/// Four leaf layers around the trunk top, radius 2 in the lower two and 1
/// above, with randomly trimmed corners.
fn round_crown(
    w: &mut dyn WorldAccess,
    rng: &mut JavaRandom,
    pos: BlockPos,
    height: i32,
    spread: i32,
    leaves: Block,
    fits: fn(Block) -> bool,
) {
    let top = pos.y + height;
    for y in top - 3..=top {
        let dy = y - top;
        let r = spread - dy / 2;
        for x in pos.x - r..=pos.x + r {
            let dx = x - pos.x;
            for z in pos.z - r..=pos.z + r {
                let dz = z - pos.z;
                if dx.abs() != r || dz.abs() != r || rng.next_bounded_int(2) != 0 && dy != 0 {
                    let p = BlockPos::new(x, y, z);
                    if fits(get(w, p)) {
                        put(w, p, leaves);
                    }
                }
            }
        }
    }
}

pub(crate) const VINE_SOUTH: u8 = 1;
pub(crate) const VINE_WEST: u8 = 2;
pub(crate) const VINE_NORTH: u8 = 4;
pub(crate) const VINE_EAST: u8 = 8;

pub(crate) fn vine(side: u8) -> Block {
    Block::new(ids::VINE, side)
}

/// A vine that hangs up to four more blocks down through air.
fn hanging_vine(w: &mut dyn WorldAccess, pos: BlockPos, side: u8) {
    put(w, pos, vine(side));
    let mut p = pos.down(1);
    let mut left = 4;
    while left > 0 && w.is_air(p.x, p.y, p.z) {
        put(w, p, vine(side));
        p = p.down(1);
        left -= 1;
    }
}

fn small_tree(
    w: &mut dyn WorldAccess,
    rng: &mut JavaRandom,
    pos: BlockPos,
    base_height: i32,
    log: Block,
    leaves: Block,
    vines: bool,
) -> bool {
    let height = rng.next_bounded_int(3) + base_height;
    if pos.y < 1 || pos.y + height + 1 > w.max_height() || !round_room(w, pos, height) {
        return false;
    }
    if !is_soil(get(w, pos.down(1))) || pos.y >= w.max_height() - height - 1 {
        return false;
    }
    set_dirt(w, pos.down(1));
    round_crown(w, rng, pos, height, 1, leaves, air_leaves_or_vine);

    for dy in 0..height {
        let p = pos.up(dy);
        if !air_leaves_or_vine(get(w, p)) {
            continue;
        }
        put(w, p, log);
        if vines && dy > 0 {
            for (dx, dz, side) in [(-1, 0, VINE_EAST), (1, 0, VINE_WEST), (0, -1, VINE_SOUTH), (0, 1, VINE_NORTH)] {
                let q = p.add(dx, 0, dz);
                if rng.next_bounded_int(3) > 0 && w.is_air(q.x, q.y, q.z) {
                    put(w, q, vine(side));
                }
            }
        }
    }

    if vines {
        let top = pos.y + height;
        for y in top - 3..=top {
            let r = 2 - (y - top) / 2;
            for x in pos.x - r..=pos.x + r {
                for z in pos.z - r..=pos.z + r {
                    if get(w, BlockPos::new(x, y, z)).material() != Material::Leaves {
                        continue;
                    }
                    for (dx, dz, side) in [(-1, 0, VINE_EAST), (1, 0, VINE_WEST), (0, -1, VINE_SOUTH), (0, 1, VINE_NORTH)] {
                        let q = BlockPos::new(x + dx, y, z + dz);
                        if rng.next_bounded_int(4) == 0 && w.is_air(q.x, q.y, q.z) {
                            hanging_vine(w, q, side);
                        }
                    }
                }
            }
        }
        if rng.next_bounded_int(5) == 0 && height > 5 {
            for level in 0..2 {
                for facing in Facing::PLANE {
                    if rng.next_bounded_int(4 - level) == 0 {
                        let age = rng.next_bounded_int(3) as u8;
                        let (dx, dz) = facing.opposite().step();
                        let meta = facing.horizontal_index() as u8 | age << 2;
                        put(w, pos.add(dx, height - 5 + level, dz), Block::new(ids::COCOA, meta));
                    }
                }
            }
        }
    }
    true
}

fn birch(w: &mut dyn WorldAccess, rng: &mut JavaRandom, pos: BlockPos, tall: bool) -> bool {
    let mut height = rng.next_bounded_int(3) + 5;
    if tall {
        height += rng.next_bounded_int(7);
    }
    if pos.y < 1 || pos.y + height + 1 > w.max_height() || !round_room(w, pos, height) {
        return false;
    }
    if !is_soil(get(w, pos.down(1))) || pos.y >= w.max_height() - height - 1 {
        return false;
    }
    set_dirt(w, pos.down(1));
    round_crown(w, rng, pos, height, 1, BIRCH_LEAVES, air_or_leaves);
    for dy in 0..height {
        if air_or_leaves(get(w, pos.up(dy))) {
            put(w, pos.up(dy), BIRCH_LOG);
        }
    }
    true
}

fn spruce(w: &mut dyn WorldAccess, rng: &mut JavaRandom, pos: BlockPos) -> bool {
    let height = rng.next_bounded_int(4) + 6;
    let bare = 1 + rng.next_bounded_int(2);
    let crown = height - bare;
    let max_radius = 2 + rng.next_bounded_int(2);
    if pos.y < 1 || pos.y + height + 1 > w.max_height() {
        return false;
    }
    let room = has_room(
        w,
        pos,
        pos.y + 1 + height,
        |y| if y - pos.y < bare { 0 } else { max_radius },
        air_or_leaves,
    );
    if !room || !is_soil(get(w, pos.down(1))) || pos.y >= w.max_height() - height - 1 {
        return false;
    }
    set_dirt(w, pos.down(1));

    let mut radius = rng.next_bounded_int(2);
    let mut limit = 1;
    let mut reset = 0;
    for step in 0..=crown {
        let y = pos.y + height - step;
        for x in pos.x - radius..=pos.x + radius {
            let dx = x - pos.x;
            for z in pos.z - radius..=pos.z + radius {
                let dz = z - pos.z;
                if dx.abs() != radius || dz.abs() != radius || radius <= 0 {
                    let p = BlockPos::new(x, y, z);
                    if !is_full(get(w, p)) {
                        put(w, p, SPRUCE_LEAVES);
                    }
                }
            }
        }
        if radius >= limit {
            radius = reset;
            reset = 1;
            limit = (limit + 1).min(max_radius);
        } else {
            radius += 1;
        }
    }

    let trunk = height - rng.next_bounded_int(3);
    for dy in 0..trunk {
        if air_or_leaves(get(w, pos.up(dy))) {
            put(w, pos.up(dy), SPRUCE_LOG);
        }
    }
    true
}

fn pine(w: &mut dyn WorldAccess, rng: &mut JavaRandom, pos: BlockPos) -> bool {
    let height = rng.next_bounded_int(5) + 7;
    let bare = height - rng.next_bounded_int(2) - 3;
    let crown = height - bare;
    let max_radius = 1 + rng.next_bounded_int(crown + 1);
    if pos.y < 1 || pos.y + height + 1 > w.max_height() {
        return false;
    }
    let room = has_room(
        w,
        pos,
        pos.y + 1 + height,
        |y| if y - pos.y < bare { 0 } else { max_radius },
        can_grow_into,
    );
    if !room || !is_soil(get(w, pos.down(1))) || pos.y >= w.max_height() - height - 1 {
        return false;
    }
    set_dirt(w, pos.down(1));

    let mut radius = 0;
    let mut y = pos.y + height;
    while y >= pos.y + bare {
        for x in pos.x - radius..=pos.x + radius {
            let dx = x - pos.x;
            for z in pos.z - radius..=pos.z + radius {
                let dz = z - pos.z;
                if dx.abs() != radius || dz.abs() != radius || radius <= 0 {
                    let p = BlockPos::new(x, y, z);
                    if !is_full(get(w, p)) {
                        put(w, p, SPRUCE_LEAVES);
                    }
                }
            }
        }
        if radius >= 1 && y == pos.y + bare + 1 {
            radius -= 1;
        } else if radius < max_radius {
            radius += 1;
        }
        y -= 1;
    }

    for dy in 0..height - 1 {
        if air_or_leaves(get(w, pos.up(dy))) {
            put(w, pos.up(dy), SPRUCE_LOG);
        }
    }
    true
}

fn is_water_id(id: u8) -> bool {
    id == ids::WATER || id == ids::FLOWING_WATER
}

/// Swamp oak: sinks to the bottom of shallow water, wide crown, vines.
fn swamp_oak(w: &mut dyn WorldAccess, rng: &mut JavaRandom, mut pos: BlockPos) -> bool {
    let height = rng.next_bounded_int(4) + 5;
    while get(w, pos.down(1)).material() == Material::Water {
        pos = pos.down(1);
    }
    if pos.y < 1 || pos.y + height + 1 > w.max_height() {
        return false;
    }
    let crown = pos.y + 1 + height - 2;
    for y in pos.y..=pos.y + 1 + height {
        let r = if y >= crown {
            3
        } else if y == pos.y {
            0
        } else {
            1
        };
        for x in pos.x - r..=pos.x + r {
            for z in pos.z - r..=pos.z + r {
                if y < 0 || y >= w.max_height() {
                    return false;
                }
                let b = w.block(x, y, z);
                if !air_or_leaves(b) && (!is_water_id(b.id) || y > pos.y) {
                    return false;
                }
            }
        }
    }
    let soil = get(w, pos.down(1)).id;
    if !(soil == ids::GRASS || soil == ids::DIRT) || pos.y >= w.max_height() - height - 1 {
        return false;
    }
    set_dirt(w, pos.down(1));

    let top = pos.y + height;
    for y in top - 3..=top {
        let dy = y - top;
        let r = 2 - dy / 2;
        for x in pos.x - r..=pos.x + r {
            let dx = x - pos.x;
            for z in pos.z - r..=pos.z + r {
                let dz = z - pos.z;
                if dx.abs() != r || dz.abs() != r || rng.next_bounded_int(2) != 0 && dy != 0 {
                    let p = BlockPos::new(x, y, z);
                    if !is_full(get(w, p)) {
                        put(w, p, OAK_LEAVES);
                    }
                }
            }
        }
    }
    for dy in 0..height {
        let b = get(w, pos.up(dy));
        if air_or_leaves(b) || is_water_id(b.id) {
            put(w, pos.up(dy), OAK_LOG);
        }
    }
    for y in top - 3..=top {
        let r = 2 - (y - top) / 2;
        for x in pos.x - r..=pos.x + r {
            for z in pos.z - r..=pos.z + r {
                if get(w, BlockPos::new(x, y, z)).material() != Material::Leaves {
                    continue;
                }
                for (dx, dz, side) in [(-1, 0, VINE_EAST), (1, 0, VINE_WEST), (0, -1, VINE_SOUTH), (0, 1, VINE_NORTH)] {
                    let q = BlockPos::new(x + dx, y, z + dz);
                    if rng.next_bounded_int(4) == 0 && w.is_air(q.x, q.y, q.z) {
                        hanging_vine(w, q, side);
                    }
                }
            }
        }
    }
    true
}

/// Acacia: a trunk that bends once toward a random side, sometimes with a
/// second branch, each ending in a flat canopy.
fn acacia(w: &mut dyn WorldAccess, rng: &mut JavaRandom, pos: BlockPos) -> bool {
    let height = rng.next_bounded_int(3) + rng.next_bounded_int(3) + 5;
    if pos.y < 1 || pos.y + height + 1 > w.max_height() || !round_room(w, pos, height) {
        return false;
    }
    if !is_soil(get(w, pos.down(1))) || pos.y >= w.max_height() - height - 1 {
        return false;
    }
    set_dirt(w, pos.down(1));

    let lean = Facing::PLANE[rng.next_bounded_int(4) as usize];
    let bend_at = height - rng.next_bounded_int(4) - 1;
    let mut shift = 3 - rng.next_bounded_int(3);
    let (mut x, mut z) = (pos.x, pos.z);
    let mut top = 0;
    for dy in 0..height {
        let y = pos.y + dy;
        if dy >= bend_at && shift > 0 {
            let (sx, sz) = lean.step();
            x += sx;
            z += sz;
            shift -= 1;
        }
        let p = BlockPos::new(x, y, z);
        if air_or_leaves(get(w, p)) {
            put(w, p, ACACIA_LOG);
            top = y;
        }
    }
    let canopy = BlockPos::new(x, top, z);
    for dx in -3i32..=3 {
        for dz in -3i32..=3 {
            if dx.abs() != 3 || dz.abs() != 3 {
                acacia_leaf(w, canopy.add(dx, 0, dz));
            }
        }
    }
    let cap = canopy.up(1);
    for dx in -1..=1 {
        for dz in -1..=1 {
            acacia_leaf(w, cap.add(dx, 0, dz));
        }
    }
    for (dx, dz) in [(2, 0), (-2, 0), (0, 2), (0, -2)] {
        acacia_leaf(w, cap.add(dx, 0, dz));
    }

    let branch = Facing::PLANE[rng.next_bounded_int(4) as usize];
    if branch != lean {
        let mut dy = bend_at - rng.next_bounded_int(2) - 1;
        let mut left = 1 + rng.next_bounded_int(3);
        let (mut x, mut z) = (pos.x, pos.z);
        let mut top = 0;
        while dy < height && left > 0 {
            if dy >= 1 {
                let y = pos.y + dy;
                let (sx, sz) = branch.step();
                x += sx;
                z += sz;
                let p = BlockPos::new(x, y, z);
                if air_or_leaves(get(w, p)) {
                    put(w, p, ACACIA_LOG);
                    top = y;
                }
            }
            dy += 1;
            left -= 1;
        }
        if top > 0 {
            let canopy = BlockPos::new(x, top, z);
            for dx in -2i32..=2 {
                for dz in -2i32..=2 {
                    if dx.abs() != 2 || dz.abs() != 2 {
                        acacia_leaf(w, canopy.add(dx, 0, dz));
                    }
                }
            }
            let cap = canopy.up(1);
            for dx in -1..=1 {
                for dz in -1..=1 {
                    acacia_leaf(w, cap.add(dx, 0, dz));
                }
            }
        }
    }
    true
}

fn acacia_leaf(w: &mut dyn WorldAccess, p: BlockPos) {
    if air_or_leaves(get(w, p)) {
        put(w, p, ACACIA_LEAVES);
    }
}

/// Dark oak: a 2x2 trunk that may lean, a wide flat crown and a few
/// hanging side branches.
fn dark_oak(w: &mut dyn WorldAccess, rng: &mut JavaRandom, pos: BlockPos) -> bool {
    let height = rng.next_bounded_int(3) + rng.next_bounded_int(2) + 6;
    if pos.y < 1 || pos.y + height + 1 >= w.max_height() {
        return false;
    }
    let soil = get(w, pos.down(1)).id;
    if soil != ids::GRASS && soil != ids::DIRT {
        return false;
    }
    let room = (0..=height + 1).all(|dy| {
        let r = if dy == 0 {
            0
        } else if dy >= height - 1 {
            2
        } else {
            1
        };
        (-r..=r).all(|dx| (-r..=r).all(|dz| can_grow_into(get(w, pos.add(dx, dy, dz)))))
    });
    if !room {
        return false;
    }
    let below = pos.down(1);
    for (dx, dz) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
        set_dirt(w, below.add(dx, 0, dz));
    }

    let lean = Facing::PLANE[rng.next_bounded_int(4) as usize];
    let bend_at = height - rng.next_bounded_int(4);
    let mut shift = 2 - rng.next_bounded_int(3);
    let (mut x, mut z) = (pos.x, pos.z);
    let top = pos.y + height - 1;
    for dy in 0..height {
        if dy >= bend_at && shift > 0 {
            let (sx, sz) = lean.step();
            x += sx;
            z += sz;
            shift -= 1;
        }
        let p = BlockPos::new(x, pos.y + dy, z);
        if air_or_leaves(get(w, p)) {
            for (dx, dz) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
                dark_log(w, p.add(dx, 0, dz));
            }
        }
    }

    for i in -2..=0 {
        for j in -2..=0 {
            let mut dy = -1;
            dark_leaf(w, BlockPos::new(x + i, top + dy, z + j));
            dark_leaf(w, BlockPos::new(1 + x - i, top + dy, z + j));
            dark_leaf(w, BlockPos::new(x + i, top + dy, 1 + z - j));
            dark_leaf(w, BlockPos::new(1 + x - i, top + dy, 1 + z - j));
            if (i > -2 || j > -1) && (i != -1 || j != -2) {
                dy = 1;
                dark_leaf(w, BlockPos::new(x + i, top + dy, z + j));
                dark_leaf(w, BlockPos::new(1 + x - i, top + dy, z + j));
                dark_leaf(w, BlockPos::new(x + i, top + dy, 1 + z - j));
                dark_leaf(w, BlockPos::new(1 + x - i, top + dy, 1 + z - j));
            }
        }
    }
    if rng.next_bool() {
        for (dx, dz) in [(0, 0), (1, 0), (1, 1), (0, 1)] {
            dark_leaf(w, BlockPos::new(x + dx, top + 2, z + dz));
        }
    }
    for i in -3i32..=4 {
        for j in -3i32..=4 {
            let corner = (i == -3 || i == 4) && (j == -3 || j == 4);
            if !corner && (i.abs() < 3 || j.abs() < 3) {
                dark_leaf(w, BlockPos::new(x + i, top, z + j));
            }
        }
    }
    for i in -1..=2 {
        for j in -1..=2 {
            if (i < 0 || i > 1 || j < 0 || j > 1) && rng.next_bounded_int(3) <= 0 {
                let length = rng.next_bounded_int(3) + 2;
                // hanging branches grow from the unshifted trunk column
                for k in 0..length {
                    dark_log(w, BlockPos::new(pos.x + i, top - k - 1, pos.z + j));
                }
                for dx in -1..=1 {
                    for dz in -1..=1 {
                        dark_leaf(w, BlockPos::new(x + i + dx, top, z + j + dz));
                    }
                }
                for dx in -2i32..=2 {
                    for dz in -2i32..=2 {
                        if dx.abs() != 2 || dz.abs() != 2 {
                            dark_leaf(w, BlockPos::new(x + i + dx, top - 1, z + j + dz));
                        }
                    }
                }
            }
        }
    }
    true
}

fn dark_log(w: &mut dyn WorldAccess, p: BlockPos) {
    if can_grow_into(get(w, p)) {
        put(w, p, DARK_OAK_LOG);
    }
}

fn dark_leaf(w: &mut dyn WorldAccess, p: BlockPos) {
    if get(w, p).is_air() {
        put(w, p, DARK_OAK_LEAVES);
    }
}

/// Jungle bush: one log on the ground under a small leaf mound.
fn shrub(w: &mut dyn WorldAccess, rng: &mut JavaRandom, mut pos: BlockPos) -> bool {
    while air_or_leaves(get(w, pos)) && pos.y > 0 {
        pos = pos.down(1);
    }
    let ground = get(w, pos).id;
    if ground == ids::DIRT || ground == ids::GRASS {
        pos = pos.up(1);
        put(w, pos, JUNGLE_LOG);
        for y in pos.y..=pos.y + 2 {
            let r = 2 - (y - pos.y);
            for x in pos.x - r..=pos.x + r {
                let dx = x - pos.x;
                for z in pos.z - r..=pos.z + r {
                    let dz = z - pos.z;
                    if dx.abs() != r || dz.abs() != r || rng.next_bounded_int(2) != 0 {
                        let p = BlockPos::new(x, y, z);
                        if air_or_leaves(get(w, p)) {
                            put(w, p, OAK_LEAVES);
                        }
                    }
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

    /// Flat grass at y 63 over stone.
    fn meadow() -> Chunk {
        let mut c = Chunk::new(0, 0);
        for x in 0..16 {
            for z in 0..16 {
                for y in 0..63 {
                    c.set_block(x, y, z, Block::of(ids::STONE));
                }
                c.set_block(x, 63, z, Block::of(ids::GRASS));
            }
        }
        c
    }

    fn count(c: &Chunk, b: Block) -> usize {
        let mut n = 0;
        for x in 0..16 {
            for z in 0..16 {
                for y in 0..256 {
                    if c.block(x, y, z) == b {
                        n += 1;
                    }
                }
            }
        }
        n
    }

    #[test]
    fn oak_grows_on_grass_and_turns_soil_to_dirt() {
        let mut c = meadow();
        let mut rng = JavaRandom::new(7);
        assert!(TreeKind::Oak.grow(&mut c, &mut rng, BlockPos::new(8, 64, 8)));
        assert_eq!(c.block(8, 63, 8).id, ids::DIRT);
        assert_eq!(c.block(8, 64, 8), OAK_LOG);
        let logs = count(&c, OAK_LOG);
        assert!((4..=6).contains(&logs), "{logs} logs");
        assert!(count(&c, OAK_LEAVES) > 10);
    }

    #[test]
    fn trees_refuse_bad_ground() {
        let mut c = meadow();
        c.set_block(8, 63, 8, Block::of(ids::SAND));
        let mut rng = JavaRandom::new(7);
        for kind in [TreeKind::Oak, TreeKind::Birch, TreeKind::Spruce, TreeKind::Pine, TreeKind::Savanna] {
            assert!(!kind.grow(&mut c, &mut rng, BlockPos::new(8, 64, 8)), "{kind:?}");
        }
        assert_eq!(count(&c, OAK_LOG), 0);
    }

    #[test]
    fn crowded_sites_are_rejected() {
        let mut c = meadow();
        c.set_block(9, 66, 8, Block::of(ids::STONE));
        let mut rng = JavaRandom::new(1);
        assert!(!TreeKind::Birch.grow(&mut c, &mut rng, BlockPos::new(8, 64, 8)));
    }

    #[test]
    fn conifers_use_spruce_wood() {
        for (seed, kind) in [(3, TreeKind::Spruce), (4, TreeKind::Pine)] {
            let mut c = meadow();
            let mut rng = JavaRandom::new(seed);
            assert!(kind.grow(&mut c, &mut rng, BlockPos::new(8, 64, 8)));
            assert!(count(&c, SPRUCE_LOG) >= 4);
            assert!(count(&c, SPRUCE_LEAVES) > 0);
        }
    }

    #[test]
    fn swamp_oak_sinks_through_water() {
        let mut c = meadow();
        c.set_block(8, 63, 8, Block::of(ids::GRASS));
        for x in 0..16 {
            for z in 0..16 {
                c.set_block(x, 64, z, Block::of(ids::WATER));
            }
        }
        let mut rng = JavaRandom::new(11);
        assert!(TreeKind::Swamp.grow(&mut c, &mut rng, BlockPos::new(8, 65, 8)));
        assert_eq!(c.block(8, 64, 8), OAK_LOG);
        assert_eq!(c.block(8, 63, 8).id, ids::DIRT);
    }

    #[test]
    fn dark_oak_plants_a_two_by_two_trunk() {
        let mut c = meadow();
        let mut rng = JavaRandom::new(5);
        assert!(TreeKind::DarkOak.grow(&mut c, &mut rng, BlockPos::new(6, 64, 6)));
        for (x, z) in [(6, 6), (7, 6), (6, 7), (7, 7)] {
            assert_eq!(c.block(x, 63, z).id, ids::DIRT);
            assert_eq!(c.block(x, 64, z), DARK_OAK_LOG);
        }
    }

    #[test]
    fn jungle_shrub_settles_on_the_ground() {
        let mut c = meadow();
        let mut rng = JavaRandom::new(2);
        assert!(TreeKind::JungleShrub.grow(&mut c, &mut rng, BlockPos::new(8, 80, 8)));
        assert_eq!(c.block(8, 64, 8), JUNGLE_LOG);
        assert_eq!(c.block(8, 65, 8), OAK_LEAVES);
    }
}
