//! Large features: fancy oaks, 2x2 trees and huge mushrooms.

use std::f64::consts::PI;

use strata_blocks::{Block, Material, ids};
use strata_chunk::WorldAccess;
use strata_geom::BlockPos;
use strata_noise::{JavaRandom, math};

use super::trees::{
    JUNGLE_LEAVES, JUNGLE_LOG, OAK_LEAVES, OAK_LOG, SPRUCE_LEAVES, SPRUCE_LOG, VINE_EAST, VINE_NORTH,
    VINE_SOUTH, VINE_WEST, can_grow_into, is_full, vine,
};
use super::{get, put, set_dirt};

const LEAF_DISTANCE: i32 = 5;

/// A fancy oak in progress. The shape uses its own generator seeded from
/// the decoration stream.
struct BigOak {
    rng: JavaRandom,
    base: BlockPos,
    height_limit: i32,
    height: i32,
    nodes: Vec<(BlockPos, i32)>,
}

pub(super) fn big_oak(w: &mut dyn WorldAccess, rng: &mut JavaRandom, pos: BlockPos) -> bool {
    let mut rng = JavaRandom::new(rng.next_long());
    let height_limit = 5 + rng.next_bounded_int(12);
    let mut tree = BigOak { rng, base: pos, height_limit, height: 0, nodes: Vec::new() };
    if !tree.valid_location(w) {
        return false;
    }
    tree.place_nodes(w);
    tree.leaves(w);
    tree.limb(w, tree.base, tree.base.up(tree.height));
    tree.branches(w);
    true
}

impl BigOak {
    fn valid_location(&mut self, w: &dyn WorldAccess) -> bool {
        let soil = get(w, self.base.down(1)).id;
        if !matches!(soil, ids::GRASS | ids::DIRT | ids::FARMLAND) {
            return false;
        }
        match check_line(w, self.base, self.base.up(self.height_limit - 1)) {
            None => true,
            Some(free) if free < 6 => false,
            Some(free) => {
                self.height_limit = free;
                true
            }
        }
    }

    fn layer_size(&self, y: i32) -> f32 {
        if (y as f32) < self.height_limit as f32 * 0.3 {
            return -1.0;
        }
        let half = self.height_limit as f32 / 2.0;
        let off = half - y as f32;
        let mut r = ((half * half - off * off) as f64).sqrt() as f32;
        if off == 0.0 {
            r = half;
        } else if off.abs() >= half {
            return 0.0;
        }
        r * 0.5
    }

    fn place_nodes(&mut self, w: &dyn WorldAccess) {
        self.height = (self.height_limit as f64 * 0.618) as i32;
        if self.height >= self.height_limit {
            self.height = self.height_limit - 1;
        }
        let per_layer = ((1.382 + (self.height_limit as f64 / 13.0).powi(2)) as i32).max(1);
        let top = self.base.y + self.height;
        let mut k = self.height_limit - LEAF_DISTANCE;
        self.nodes.push((self.base.up(k), top));
        while k >= 0 {
            let f = self.layer_size(k);
            if f >= 0.0 {
                for _ in 0..per_layer {
                    let d0 = f as f64 * (self.rng.next_float() as f64 + 0.328);
                    let d1 = (self.rng.next_float() * 2.0) as f64 * PI;
                    let d2 = d0 * d1.sin() + 0.5;
                    let d3 = d0 * d1.cos() + 0.5;
                    let node = BlockPos::new(
                        math::floor(self.base.x as f64 + d2),
                        math::floor((self.base.y + k - 1) as f64),
                        math::floor(self.base.z as f64 + d3),
                    );
                    if check_line(w, node, node.up(LEAF_DISTANCE)).is_some() {
                        continue;
                    }
                    let dx = self.base.x - node.x;
                    let dz = self.base.z - node.z;
                    let d4 = node.y as f64 - ((dx * dx + dz * dz) as f64).sqrt() * 0.381;
                    let foot_y = if d4 > top as f64 { top } else { d4 as i32 };
                    let foot = BlockPos::new(self.base.x, foot_y, self.base.z);
                    if check_line(w, foot, node).is_none() {
                        self.nodes.push((node, foot_y));
                    }
                }
            }
            k -= 1;
        }
    }

    fn leaves(&self, w: &mut dyn WorldAccess) {
        for &(node, _) in &self.nodes {
            for i in 0..LEAF_DISTANCE {
                let size = if i != 0 && i != LEAF_DISTANCE - 1 { 3.0 } else { 2.0 };
                cross_section(w, node.up(i), size);
            }
        }
    }

    fn branches(&self, w: &mut dyn WorldAccess) {
        for &(node, foot_y) in &self.nodes {
            let foot = BlockPos::new(self.base.x, foot_y, self.base.z);
            if foot != node && (foot_y - self.base.y) as f64 >= self.height_limit as f64 * 0.2 {
                self.limb(w, foot, node);
            }
        }
    }

    /// A straight run of logs with their axis following the dominant
    /// direction.
    fn limb(&self, w: &mut dyn WorldAccess, from: BlockPos, to: BlockPos) {
        let Some((n, fx, fy, fz)) = line_steps(from, to) else {
            return;
        };
        for j in 0..=n {
            let p = line_point(from, j, fx, fy, fz);
            let dx = (p.x - from.x).abs();
            let dz = (p.z - from.z).abs();
            let k = dx.max(dz);
            let axis = if k > 0 && dx == k {
                4
            } else if k > 0 && dz == k {
                8
            } else {
                0
            };
            put(w, p, Block::new(ids::LOG, OAK_LOG.meta | axis));
        }
    }
}

fn line_steps(from: BlockPos, to: BlockPos) -> Option<(i32, f32, f32, f32)> {
    let d = to - from;
    let n = d.x.abs().max(d.y.abs()).max(d.z.abs());
    if n == 0 {
        return None;
    }
    Some((n, d.x as f32 / n as f32, d.y as f32 / n as f32, d.z as f32 / n as f32))
}

fn line_point(from: BlockPos, j: i32, fx: f32, fy: f32, fz: f32) -> BlockPos {
    BlockPos::new(
        math::floor(from.x as f64 + (0.5 + j as f32 * fx) as f64),
        math::floor(from.y as f64 + (0.5 + j as f32 * fy) as f64),
        math::floor(from.z as f64 + (0.5 + j as f32 * fz) as f64),
    )
}

/// Index of the first step along the line a tree may not grow into.
fn check_line(w: &dyn WorldAccess, from: BlockPos, to: BlockPos) -> Option<i32> {
    let (n, fx, fy, fz) = line_steps(from, to)?;
    (0..=n).find(|&j| !can_grow_into(get(w, line_point(from, j, fx, fy, fz))))
}

fn cross_section(w: &mut dyn WorldAccess, center: BlockPos, radius: f32) {
    let r = (radius as f64 + 0.618) as i32;
    let limit = (radius * radius) as f64;
    for j in -r..=r {
        for k in -r..=r {
            let a = j.abs() as f64 + 0.5;
            let b = k.abs() as f64 + 0.5;
            if a * a + b * b > limit {
                continue;
            }
            let p = center.add(j, 0, k);
            if matches!(get(w, p).material(), Material::Air | Material::Leaves) {
                put(w, p, OAK_LEAVES);
            }
        }
    }
}

fn huge_height(rng: &mut JavaRandom, base: i32, extra: i32) -> i32 {
    let mut h = rng.next_bounded_int(3) + base;
    if extra > 1 {
        h += rng.next_bounded_int(extra);
    }
    h
}

fn huge_room(w: &dyn WorldAccess, pos: BlockPos, height: i32) -> bool {
    if pos.y < 1 || pos.y + height + 1 > w.max_height() {
        return false;
    }
    for i in 0..=height + 1 {
        let r = if i == 0 { 1 } else { 2 };
        for dx in -r..=r {
            for dz in -r..=r {
                let y = pos.y + i;
                if y < 0 || y >= w.max_height() || !can_grow_into(get(w, pos.add(dx, i, dz))) {
                    return false;
                }
            }
        }
    }
    true
}

/// Turns the 2x2 footprint under a huge tree to dirt; fails unless the
/// corner it stands on is grass or dirt.
fn huge_soil(w: &mut dyn WorldAccess, pos: BlockPos) -> bool {
    let below = pos.down(1);
    let id = get(w, below).id;
    if !(id == ids::GRASS || id == ids::DIRT) || pos.y < 2 {
        return false;
    }
    for (dx, dz) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
        set_dirt(w, below.add(dx, 0, dz));
    }
    true
}

/// Disc of leaves centred between the four trunk columns.
fn leaves_layer_strict(w: &mut dyn WorldAccess, center: BlockPos, width: i32, leaves: Block) {
    let r2 = width * width;
    for dx in -width..=width + 1 {
        for dz in -width..=width + 1 {
            let a = dx - 1;
            let b = dz - 1;
            if dx * dx + dz * dz <= r2 || a * a + b * b <= r2 || dx * dx + b * b <= r2 || a * a + dz * dz <= r2 {
                leaf(w, center.add(dx, 0, dz), leaves);
            }
        }
    }
}

fn leaves_layer(w: &mut dyn WorldAccess, center: BlockPos, width: i32, leaves: Block) {
    let r2 = width * width;
    for dx in -width..=width {
        for dz in -width..=width {
            if dx * dx + dz * dz <= r2 {
                leaf(w, center.add(dx, 0, dz), leaves);
            }
        }
    }
}

fn leaf(w: &mut dyn WorldAccess, p: BlockPos, leaves: Block) {
    let m = get(w, p).material();
    if m == Material::Air || m == Material::Leaves {
        put(w, p, leaves);
    }
}

pub(super) fn mega_jungle(w: &mut dyn WorldAccess, rng: &mut JavaRandom, pos: BlockPos) -> bool {
    let height = huge_height(rng, 10, 20);
    if !huge_room(w, pos, height) || !huge_soil(w, pos) {
        return false;
    }
    let top = pos.up(height);
    for dy in -2..=0 {
        leaves_layer_strict(w, top.up(dy), 3 - dy, JUNGLE_LEAVES);
    }

    let mut j = pos.y + height - 2 - rng.next_bounded_int(4);
    while j > pos.y + height / 2 {
        let f = rng.next_float() * (std::f32::consts::PI * 2.0);
        let (mut k, mut l) = (pos.x, pos.z);
        for i in 0..5 {
            k = pos.x + (1.5 + math::cos(f) * i as f32) as i32;
            l = pos.z + (1.5 + math::sin(f) * i as f32) as i32;
            put(w, BlockPos::new(k, j - 3 + i / 2, l), JUNGLE_LOG);
        }
        let spread = 1 + rng.next_bounded_int(2);
        for y in j - spread..=j {
            leaves_layer(w, BlockPos::new(k, y, l), 1 - (y - j), JUNGLE_LEAVES);
        }
        j -= 2 + rng.next_bounded_int(4);
    }

    for dy in 0..height {
        let p = pos.up(dy);
        if can_grow_into(get(w, p)) {
            put(w, p, JUNGLE_LOG);
            if dy > 0 {
                trunk_vine(w, rng, p.add(-1, 0, 0), VINE_EAST);
                trunk_vine(w, rng, p.add(0, 0, -1), VINE_SOUTH);
            }
        }
        if dy < height - 1 {
            let e = p.add(1, 0, 0);
            if can_grow_into(get(w, e)) {
                put(w, e, JUNGLE_LOG);
                if dy > 0 {
                    trunk_vine(w, rng, e.add(1, 0, 0), VINE_WEST);
                    trunk_vine(w, rng, e.add(0, 0, -1), VINE_SOUTH);
                }
            }
            let se = p.add(1, 0, 1);
            if can_grow_into(get(w, se)) {
                put(w, se, JUNGLE_LOG);
                if dy > 0 {
                    trunk_vine(w, rng, se.add(1, 0, 0), VINE_WEST);
                    trunk_vine(w, rng, se.add(0, 0, 1), VINE_NORTH);
                }
            }
            let s = p.add(0, 0, 1);
            if can_grow_into(get(w, s)) {
                put(w, s, JUNGLE_LOG);
                if dy > 0 {
                    trunk_vine(w, rng, s.add(-1, 0, 0), VINE_EAST);
                    trunk_vine(w, rng, s.add(0, 0, 1), VINE_NORTH);
                }
            }
        }
    }
    true
}

fn trunk_vine(w: &mut dyn WorldAccess, rng: &mut JavaRandom, p: BlockPos, side: u8) {
    if rng.next_bounded_int(3) > 0 && w.is_air(p.x, p.y, p.z) {
        put(w, p, vine(side));
    }
}

/// Giant spruce. With `tall_crown` the crown covers most of the trunk.
pub(super) fn mega_pine(w: &mut dyn WorldAccess, rng: &mut JavaRandom, pos: BlockPos, tall_crown: bool) -> bool {
    let height = huge_height(rng, 13, 15);
    if !huge_room(w, pos, height) || !huge_soil(w, pos) {
        return false;
    }
    let crown = rng.next_bounded_int(5) + if tall_crown { 13 } else { 3 };
    let top_y = pos.y + height;
    let mut previous = 0;
    for y in top_y - crown..=top_y {
        let dy = top_y - y;
        let width = math::floor_f32(dy as f32 / crown as f32 * 3.5);
        let bump = i32::from(dy > 0 && width == previous && (y & 1) == 0);
        leaves_layer_strict(w, BlockPos::new(pos.x, y, pos.z), width + bump, SPRUCE_LEAVES);
        previous = width;
    }

    for dy in 0..height {
        for (dx, dz) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            let p = pos.add(dx, dy, dz);
            if dy < height - 1 || (dx, dz) == (0, 0) {
                let m = get(w, p).material();
                if m == Material::Air || m == Material::Leaves {
                    put(w, p, SPRUCE_LOG);
                }
            }
        }
    }
    true
}

pub const PODZOL: Block = Block::new(ids::DIRT, 2);

/// Podzol patches scattered around a giant spruce.
pub(super) fn podzol_skirt(w: &mut dyn WorldAccess, rng: &mut JavaRandom, pos: BlockPos) {
    podzol_circle(w, pos.add(-1, 0, -1));
    podzol_circle(w, pos.add(2, 0, -1));
    podzol_circle(w, pos.add(-1, 0, 2));
    podzol_circle(w, pos.add(2, 0, 2));
    for _ in 0..5 {
        let j = rng.next_bounded_int(64);
        let k = j % 8;
        let l = j / 8;
        if k == 0 || k == 7 || l == 0 || l == 7 {
            podzol_circle(w, pos.add(-3 + k, 0, -3 + l));
        }
    }
}

fn podzol_circle(w: &mut dyn WorldAccess, center: BlockPos) {
    for dx in -2i32..=2 {
        for dz in -2i32..=2 {
            if dx.abs() != 2 || dz.abs() != 2 {
                podzol_at(w, center.add(dx, 0, dz));
            }
        }
    }
}

fn podzol_at(w: &mut dyn WorldAccess, pos: BlockPos) {
    for dy in (-3..=2).rev() {
        let p = pos.up(dy);
        let b = get(w, p);
        if b.id == ids::GRASS || b.id == ids::DIRT {
            put(w, p, PODZOL);
            break;
        }
        if !b.is_air() && dy < 0 {
            break;
        }
    }
}

/// Huge mushroom cap shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MushroomKind {
    Brown,
    Red,
}

const STEM: u8 = 10;

/// A huge mushroom; the kind is drawn unless given.
pub fn huge_mushroom(
    w: &mut dyn WorldAccess,
    rng: &mut JavaRandom,
    pos: BlockPos,
    kind: Option<MushroomKind>,
) -> bool {
    let kind = match kind {
        Some(k) => k,
        None if rng.next_bool() => MushroomKind::Brown,
        None => MushroomKind::Red,
    };
    let cap_block = match kind {
        MushroomKind::Brown => ids::BROWN_MUSHROOM_BLOCK,
        MushroomKind::Red => ids::RED_MUSHROOM_BLOCK,
    };
    let mut height = rng.next_bounded_int(3) + 4;
    if rng.next_bounded_int(12) == 0 {
        height *= 2;
    }
    if pos.y < 1 || pos.y + height + 1 >= w.max_height() {
        return false;
    }
    for y in pos.y..=pos.y + 1 + height {
        let r = if y <= pos.y + 3 { 0 } else { 3 };
        for x in pos.x - r..=pos.x + r {
            for z in pos.z - r..=pos.z + r {
                if y < 0 || y >= w.max_height() {
                    return false;
                }
                let m = w.block(x, y, z).material();
                if m != Material::Air && m != Material::Leaves {
                    return false;
                }
            }
        }
    }
    let soil = get(w, pos.down(1));
    if !matches!(soil.id, ids::DIRT | ids::GRASS | ids::MYCELIUM) {
        return false;
    }

    let top = pos.y + height;
    let first = match kind {
        MushroomKind::Red => pos.y + height - 3,
        MushroomKind::Brown => top,
    };
    for y in first..=top {
        let mut r = 1;
        if y < top {
            r += 1;
        }
        if kind == MushroomKind::Brown {
            r = 3;
        }
        let (x0, x1, z0, z1) = (pos.x - r, pos.x + r, pos.z - r, pos.z + r);
        for x in x0..=x1 {
            for z in z0..=z1 {
                let mut meta = 5;
                if x == x0 {
                    meta -= 1;
                } else if x == x1 {
                    meta += 1;
                }
                if z == z0 {
                    meta -= 3;
                } else if z == z1 {
                    meta += 3;
                }
                if kind == MushroomKind::Brown || y < top {
                    if (x == x0 || x == x1) && (z == z0 || z == z1) {
                        continue;
                    }
                    if x == pos.x - (r - 1) && z == z0 {
                        meta = 1;
                    }
                    if x == x0 && z == pos.z - (r - 1) {
                        meta = 1;
                    }
                    if x == pos.x + (r - 1) && z == z0 {
                        meta = 3;
                    }
                    if x == x1 && z == pos.z - (r - 1) {
                        meta = 3;
                    }
                    if x == pos.x - (r - 1) && z == z1 {
                        meta = 7;
                    }
                    if x == x0 && z == pos.z + (r - 1) {
                        meta = 7;
                    }
                    if x == pos.x + (r - 1) && z == z1 {
                        meta = 9;
                    }
                    if x == x1 && z == pos.z + (r - 1) {
                        meta = 9;
                    }
                }
                if meta == 5 && y < top {
                    meta = 0;
                }
                let p = BlockPos::new(x, y, z);
                if meta != 0 && !is_full(get(w, p)) {
                    put(w, p, Block::new(cap_block, meta));
                }
            }
        }
    }
    for dy in 0..height {
        if !is_full(get(w, pos.up(dy))) {
            put(w, pos.up(dy), Block::new(cap_block, STEM));
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_chunk::Chunk;

    fn meadow(cx: i32, cz: i32) -> Chunk {
        let mut c = Chunk::new(cx, cz);
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

    fn ids_in(c: &Chunk, id: u8) -> usize {
        c.histogram()[id as usize] as usize
    }

    #[test]
    fn big_oak_draws_its_own_generator() {
        let mut a = meadow(0, 0);
        let mut b = meadow(0, 0);
        let mut r1 = JavaRandom::new(42);
        let mut r2 = JavaRandom::new(42);
        assert!(big_oak(&mut a, &mut r1, BlockPos::new(8, 64, 8)));
        assert!(big_oak(&mut b, &mut r2, BlockPos::new(8, 64, 8)));
        // one long drawn from the caller's stream, nothing more
        let mut r3 = JavaRandom::new(42);
        r3.next_long();
        assert_eq!(r1.next_long(), r3.next_long());
        assert_eq!(a.histogram(), b.histogram());
        assert!(ids_in(&a, ids::LOG) >= 3);
        assert!(ids_in(&a, ids::LEAVES) > 0);
    }

    #[test]
    fn mega_jungle_needs_room() {
        let mut c = meadow(0, 0);
        let mut rng = JavaRandom::new(9);
        assert!(mega_jungle(&mut c, &mut rng, BlockPos::new(7, 64, 7)));
        for (x, z) in [(7, 7), (8, 7), (7, 8), (8, 8)] {
            assert_eq!(c.block(x, 64, z), JUNGLE_LOG);
        }
        let mut roofed = meadow(0, 0);
        roofed.set_block(7, 70, 9, Block::of(ids::STONE));
        assert!(!mega_jungle(&mut roofed, &mut JavaRandom::new(9), BlockPos::new(7, 64, 7)));
    }

    #[test]
    fn mega_pine_leaves_podzol_behind() {
        let mut c = meadow(0, 0);
        let mut rng = JavaRandom::new(17);
        let pos = BlockPos::new(7, 64, 7);
        assert!(mega_pine(&mut c, &mut rng, pos, true));
        podzol_skirt(&mut c, &mut rng, pos);
        assert!((0..16).any(|x| (0..16).any(|z| c.block(x, 63, z) == PODZOL)));
        assert!(ids_in(&c, ids::LOG) >= 4 * 12);
    }

    #[test]
    fn huge_mushrooms_need_soil() {
        let mut c = meadow(0, 0);
        let mut rng = JavaRandom::new(3);
        assert!(huge_mushroom(&mut c, &mut rng, BlockPos::new(8, 64, 8), Some(MushroomKind::Red)));
        assert_eq!(c.block(8, 64, 8), Block::new(ids::RED_MUSHROOM_BLOCK, STEM));
        c.set_block(3, 63, 3, Block::of(ids::SAND));
        assert!(!huge_mushroom(&mut c, &mut rng, BlockPos::new(3, 64, 3), Some(MushroomKind::Brown)));
    }
}
