//! Oriented piece frames and the block-placement helpers every structure piece stamps through.
//!
//! A piece is authored in a local frame: `x` across, `y` up (relative to the
//! box floor), `z` away from the entrance. Directional blocks are authored as
//! they would look for a piece facing north, so "north" in a layout means
//! local `+z` and "east" means local `+x`. [`Frame`] maps both positions and
//! block metadata into the world.

use strata_blocks::{Block, ids};
use strata_chunk::WorldAccess;
use strata_geom::{BlockPos, BoundingBox, Facing};
use strata_noise::JavaRandom;

use crate::mineshaft::MineshaftPiece;
use crate::scattered::ScatteredPiece;
use crate::stronghold_pieces::StrongholdPiece;
use crate::village_pieces::VillagePiece;

/// Local cuboid `[x0, y0, z0, x1, y1, z1]`. Loops run from the first corner to
/// the second and are empty when a min exceeds its max.
pub type Span = [i32; 6];

/// Box of a piece in the world plus the facing its local axes map through.
/// Pieces without a facing use world coordinates directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    pub bbox: BoundingBox,
    pub facing: Option<Facing>,
}

impl Frame {
    pub fn new(bbox: BoundingBox, facing: Facing) -> Self {
        Self { bbox, facing: Some(facing) }
    }

    pub fn fixed(bbox: BoundingBox) -> Self {
        Self { bbox, facing: None }
    }

    pub fn world_x(&self, x: i32, z: i32) -> i32 {
        match self.facing {
            Some(Facing::North | Facing::South) => self.bbox.min_x + x,
            Some(Facing::West) => self.bbox.max_x - z,
            Some(Facing::East) => self.bbox.min_x + z,
            None => x,
        }
    }

    pub fn world_y(&self, y: i32) -> i32 {
        match self.facing {
            None => y,
            Some(_) => y + self.bbox.min_y,
        }
    }

    pub fn world_z(&self, x: i32, z: i32) -> i32 {
        match self.facing {
            Some(Facing::North) => self.bbox.max_z - z,
            Some(Facing::South) => self.bbox.min_z + z,
            Some(Facing::West | Facing::East) => self.bbox.min_z + x,
            None => z,
        }
    }

    pub fn world_pos(&self, x: i32, y: i32, z: i32) -> BlockPos {
        BlockPos::new(self.world_x(x, z), self.world_y(y), self.world_z(x, z))
    }

    /// World direction of a direction authored in the local frame.
    pub fn orient(&self, dir: Facing) -> Facing {
        use Facing::*;
        match self.facing {
            None | Some(North) => dir,
            Some(South) => match dir {
                North => South,
                South => North,
                other => other,
            },
            Some(West) => match dir {
                North => West,
                South => East,
                West => North,
                East => South,
            },
            Some(East) => match dir {
                North => East,
                South => West,
                West => North,
                East => South,
            },
        }
    }

    /// Rewrites the metadata of directional blocks from the local frame into the world.
    pub fn orient_block(&self, block: Block) -> Block {
        if matches!(self.facing, None | Some(Facing::North)) {
            return block;
        }
        let swaps_axes = matches!(self.facing, Some(Facing::West | Facing::East));
        let meta = match family(block.id) {
            Family::Stairs => {
                let dir = decode(Family::Stairs, block.meta & 3);
                dir.map_or(block.meta, |d| (block.meta & !3) | encode(Family::Stairs, self.orient(d)))
            }
            Family::Door if block.meta & 8 == 0 => {
                let dir = decode(Family::Door, block.meta & 3);
                dir.map_or(block.meta, |d| (block.meta & !3) | encode(Family::Door, self.orient(d)))
            }
            Family::Horizontal => {
                let dir = decode(Family::Horizontal, block.meta & 3);
                dir.map_or(block.meta, |d| {
                    (block.meta & !3) | encode(Family::Horizontal, self.orient(d))
                })
            }
            f @ (Family::Wall | Family::Torch) => match decode(f, block.meta & 7) {
                Some(d) => (block.meta & !7) | encode(f, self.orient(d)),
                None => block.meta,
            },
            Family::Vine => {
                let mut out = 0;
                for d in [Facing::South, Facing::West, Facing::North, Facing::East] {
                    if block.meta & vine_bit(d) != 0 {
                        out |= vine_bit(self.orient(d));
                    }
                }
                out
            }
            Family::Rail if swaps_axes && block.meta <= 1 => block.meta ^ 1,
            Family::Log if swaps_axes => match block.meta & 12 {
                4 => (block.meta & 3) | 8,
                8 => (block.meta & 3) | 4,
                _ => block.meta,
            },
            _ => block.meta,
        };
        Block::new(block.id, meta)
    }

    /// Reads a local cell; cells outside `clip` read as air.
    pub fn get(&self, w: &dyn WorldAccess, x: i32, y: i32, z: i32, clip: &BoundingBox) -> Block {
        let p = self.world_pos(x, y, z);
        if clip.contains_pos(p) { w.block(p.x, p.y, p.z) } else { Block::AIR }
    }

    /// Places a block at a local cell when it falls inside `clip`.
    pub fn set(&self, w: &mut dyn WorldAccess, block: Block, x: i32, y: i32, z: i32, clip: &BoundingBox) {
        let p = self.world_pos(x, y, z);
        if clip.contains_pos(p) {
            w.set_block(p.x, p.y, p.z, self.orient_block(block));
        }
    }

    /// Fills a local cuboid: `edge` on its faces and `inside` elsewhere. With
    /// `existing_only` cells that are currently air are left alone.
    pub fn fill(
        &self,
        w: &mut dyn WorldAccess,
        clip: &BoundingBox,
        span: Span,
        edge: Block,
        inside: Block,
        existing_only: bool,
    ) {
        let [x0, y0, z0, x1, y1, z1] = span;
        for y in y0..=y1 {
            for x in x0..=x1 {
                for z in z0..=z1 {
                    if existing_only && self.get(w, x, y, z, clip).is_air() {
                        continue;
                    }
                    let face = y == y0 || y == y1 || x == x0 || x == x1 || z == z0 || z == z1;
                    self.set(w, if face { edge } else { inside }, x, y, z, clip);
                }
            }
        }
    }

    pub fn fill_with(&self, w: &mut dyn WorldAccess, clip: &BoundingBox, span: Span, block: Block) {
        self.fill(w, clip, span, block, block, false);
    }

    pub fn fill_air(&self, w: &mut dyn WorldAccess, clip: &BoundingBox, span: Span) {
        self.fill(w, clip, span, Block::AIR, Block::AIR, false);
    }

    /// Fills a cuboid with blocks picked per cell by `select(rng, on_face)`.
    /// Without `existing_only` the selector runs for every cell, clipped or
    /// not; with it, cells outside `clip` read as air and are skipped.
    #[allow(clippy::too_many_arguments)]
    pub fn fill_random(
        &self,
        w: &mut dyn WorldAccess,
        clip: &BoundingBox,
        span: Span,
        existing_only: bool,
        rng: &mut JavaRandom,
        select: &mut dyn FnMut(&mut JavaRandom, bool) -> Block,
    ) {
        let [x0, y0, z0, x1, y1, z1] = span;
        for y in y0..=y1 {
            for x in x0..=x1 {
                for z in z0..=z1 {
                    if existing_only && self.get(w, x, y, z, clip).is_air() {
                        continue;
                    }
                    let face = y == y0 || y == y1 || x == x0 || x == x1 || z == z0 || z == z1;
                    let block = select(rng, face);
                    self.set(w, block, x, y, z, clip);
                }
            }
        }
    }

    /// Like [`Frame::fill`] but every cell is only written with probability
    /// `chance`. With `dark_only` cells open to the sky are skipped.
    #[allow(clippy::too_many_arguments)]
    pub fn fill_maybe(
        &self,
        w: &mut dyn WorldAccess,
        clip: &BoundingBox,
        rng: &mut JavaRandom,
        chance: f32,
        span: Span,
        edge: Block,
        inside: Block,
        existing_only: bool,
        dark_only: bool,
    ) {
        let [x0, y0, z0, x1, y1, z1] = span;
        for y in y0..=y1 {
            for x in x0..=x1 {
                for z in z0..=z1 {
                    if rng.next_float() > chance {
                        continue;
                    }
                    if existing_only && self.get(w, x, y, z, clip).is_air() {
                        continue;
                    }
                    if dark_only && self.sky_light(w, x, y, z, clip) >= 8 {
                        continue;
                    }
                    let face = y == y0 || y == y1 || x == x0 || x == x1 || z == z0 || z == z1;
                    self.set(w, if face { edge } else { inside }, x, y, z, clip);
                }
            }
        }
    }

    /// Places `block` with probability `chance`.
    #[allow(clippy::too_many_arguments)]
    pub fn place_maybe(
        &self,
        w: &mut dyn WorldAccess,
        clip: &BoundingBox,
        rng: &mut JavaRandom,
        chance: f32,
        x: i32,
        y: i32,
        z: i32,
        block: Block,
    ) {
        if rng.next_float() < chance {
            self.set(w, block, x, y, z, clip);
        }
    }

    /// Fills the ellipsoid inscribed in a cuboid.
    pub fn fill_ellipsoid(
        &self,
        w: &mut dyn WorldAccess,
        clip: &BoundingBox,
        span: Span,
        block: Block,
        existing_only: bool,
    ) {
        let [x0, y0, z0, x1, y1, z1] = span;
        let fx = (x1 - x0 + 1) as f32;
        let fy = (y1 - y0 + 1) as f32;
        let fz = (z1 - z0 + 1) as f32;
        let cx = x0 as f32 + fx / 2.0;
        let cz = z0 as f32 + fz / 2.0;
        for y in y0..=y1 {
            let dy = (y - y0) as f32 / fy;
            for x in x0..=x1 {
                let dx = (x as f32 - cx) / (fx * 0.5);
                for z in z0..=z1 {
                    let dz = (z as f32 - cz) / (fz * 0.5);
                    if existing_only && self.get(w, x, y, z, clip).is_air() {
                        continue;
                    }
                    if dx * dx + dy * dy + dz * dz <= 1.05 {
                        self.set(w, block, x, y, z, clip);
                    }
                }
            }
        }
    }

    /// Extends a foundation column down through air and liquid.
    pub fn fill_downwards(&self, w: &mut dyn WorldAccess, block: Block, x: i32, y: i32, z: i32, clip: &BoundingBox) {
        let mut p = self.world_pos(x, y, z);
        if !clip.contains_pos(p) {
            return;
        }
        while p.y > 1 {
            let here = w.block(p.x, p.y, p.z);
            if !here.is_air() && !here.material().is_liquid() {
                break;
            }
            w.set_block(p.x, p.y, p.z, block);
            p.y -= 1;
        }
    }

    /// Clears everything above a local cell up to the first air block.
    pub fn clear_upwards(&self, w: &mut dyn WorldAccess, x: i32, y: i32, z: i32, clip: &BoundingBox) {
        let mut p = self.world_pos(x, y, z);
        if !clip.contains_pos(p) {
            return;
        }
        let top = w.max_height() - 1;
        while !w.block(p.x, p.y, p.z).is_air() && p.y < top {
            w.set_block(p.x, p.y, p.z, Block::AIR);
            p.y += 1;
        }
    }

    /// Whether any liquid touches the faces of the piece box (clamped to `clip`).
    pub fn touches_liquid(&self, w: &dyn WorldAccess, clip: &BoundingBox) -> bool {
        let b = &self.bbox;
        let x0 = (b.min_x - 1).max(clip.min_x);
        let y0 = (b.min_y - 1).max(clip.min_y);
        let z0 = (b.min_z - 1).max(clip.min_z);
        let x1 = (b.max_x + 1).min(clip.max_x);
        let y1 = (b.max_y + 1).min(clip.max_y);
        let z1 = (b.max_z + 1).min(clip.max_z);
        let liquid = |x: i32, y: i32, z: i32| w.block(x, y, z).material().is_liquid();
        for x in x0..=x1 {
            for z in z0..=z1 {
                if liquid(x, y0, z) || liquid(x, y1, z) {
                    return true;
                }
            }
        }
        for x in x0..=x1 {
            for y in y0..=y1 {
                if liquid(x, y, z0) || liquid(x, y, z1) {
                    return true;
                }
            }
        }
        for z in z0..=z1 {
            for y in y0..=y1 {
                if liquid(x0, y, z) || liquid(x1, y, z) {
                    return true;
                }
            }
        }
        false
    }

    /// Coarse sky light: full at or above the column height, dark below it and
    /// outside `clip`.
    pub fn sky_light(&self, w: &dyn WorldAccess, x: i32, y: i32, z: i32, clip: &BoundingBox) -> u8 {
        let p = self.world_pos(x, y, z);
        if clip.contains_pos(p) && p.y >= w.height(p.x, p.z) { 15 } else { 0 }
    }

    /// Places a chest turned away from its single solid neighbour. Returns
    /// whether a chest was placed.
    pub fn place_chest(&self, w: &mut dyn WorldAccess, clip: &BoundingBox, x: i32, y: i32, z: i32) -> bool {
        let p = self.world_pos(x, y, z);
        if !clip.contains_pos(p) || w.block(p.x, p.y, p.z).id == ids::CHEST {
            return false;
        }
        let solid = |f: Facing| {
            let (dx, dz) = f.step();
            let b = w.block(p.x + dx, p.y, p.z + dz);
            (b.id, b.material().is_opaque())
        };
        let mut wall: Option<Facing> = None;
        let mut crowded = false;
        for f in Facing::PLANE {
            let (id, opaque) = solid(f);
            if id == ids::CHEST {
                w.set_block(p.x, p.y, p.z, Block::of(ids::CHEST));
                return true;
            }
            if opaque {
                if wall.is_some() {
                    crowded = true;
                    break;
                }
                wall = Some(f);
            }
        }
        let facing = match wall {
            Some(f) if !crowded => f.opposite(),
            _ => {
                let mut f = Facing::North;
                if solid(f).1 {
                    f = f.opposite();
                }
                if solid(f).1 {
                    f = f.rotate_cw();
                }
                if solid(f).1 {
                    f = f.opposite();
                }
                f
            }
        };
        w.set_block(p.x, p.y, p.z, Block::new(ids::CHEST, facing.meta_index()));
        true
    }

    /// Two-block door; `facing` is the local direction the door faces.
    #[allow(clippy::too_many_arguments)]
    pub fn place_door(
        &self,
        w: &mut dyn WorldAccess,
        clip: &BoundingBox,
        id: u8,
        x: i32,
        y: i32,
        z: i32,
        facing: Facing,
    ) {
        self.set(w, facing_block(id, facing), x, y, z, clip);
        self.set(w, Block::new(id, 8), x, y + 1, z, clip);
    }

    /// Mean column top (floored at `floor`) over the part of the piece inside
    /// `clip`, sampled at the piece footprint. `None` when no column is inside.
    pub fn average_ground(&self, w: &dyn WorldAccess, clip: &BoundingBox, floor: i32) -> Option<i32> {
        let mut total = 0;
        let mut count = 0;
        for z in self.bbox.min_z..=self.bbox.max_z {
            for x in self.bbox.min_x..=self.bbox.max_x {
                if clip.contains(x, 64, z) {
                    total += w.top_solid_or_liquid(x, z).max(floor);
                    count += 1;
                }
            }
        }
        (count > 0).then(|| total / count)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Family {
    Plain,
    Stairs,
    /// Wall-mounted 2..=5 facings: ladders, chests, furnaces, wall signs, dispensers.
    Wall,
    /// Torches, buttons and levers, 1..=4.
    Torch,
    /// Two-bit horizontal index: beds, pumpkins, gates, hooks, repeaters, portal frames.
    Horizontal,
    Door,
    Vine,
    Rail,
    Log,
}

fn family(id: u8) -> Family {
    match id {
        ids::OAK_STAIRS
        | ids::STONE_STAIRS
        | ids::BRICK_STAIRS
        | ids::STONE_BRICK_STAIRS
        | ids::NETHER_BRICK_STAIRS
        | ids::SANDSTONE_STAIRS
        | ids::SPRUCE_STAIRS
        | ids::BIRCH_STAIRS
        | ids::JUNGLE_STAIRS
        | ids::QUARTZ_STAIRS
        | ids::ACACIA_STAIRS
        | ids::DARK_OAK_STAIRS
        | ids::RED_SANDSTONE_STAIRS => Family::Stairs,
        ids::LADDER
        | ids::CHEST
        | ids::TRAPPED_CHEST
        | ids::ENDER_CHEST
        | ids::FURNACE
        | ids::LIT_FURNACE
        | ids::WALL_SIGN
        | ids::DISPENSER
        | ids::PISTON
        | ids::STICKY_PISTON => Family::Wall,
        ids::TORCH | ids::REDSTONE_TORCH | ids::STONE_BUTTON | ids::WOODEN_BUTTON | ids::LEVER => {
            Family::Torch
        }
        ids::BED
        | ids::PUMPKIN
        | ids::LIT_PUMPKIN
        | ids::FENCE_GATE
        | ids::TRIPWIRE_HOOK
        | ids::UNPOWERED_REPEATER
        | ids::END_PORTAL_FRAME => Family::Horizontal,
        ids::WOODEN_DOOR | ids::IRON_DOOR | ids::SPRUCE_DOOR | ids::ACACIA_DOOR => Family::Door,
        ids::VINE => Family::Vine,
        ids::RAIL => Family::Rail,
        ids::LOG | ids::LOG2 => Family::Log,
        _ => Family::Plain,
    }
}

fn encode(f: Family, d: Facing) -> u8 {
    use Facing::*;
    match f {
        Family::Stairs => match d {
            East => 0,
            West => 1,
            South => 2,
            North => 3,
        },
        Family::Wall => d.meta_index(),
        Family::Torch => match d {
            East => 1,
            West => 2,
            South => 3,
            North => 4,
        },
        Family::Horizontal => d.horizontal_index() as u8,
        Family::Door => match d {
            East => 0,
            South => 1,
            West => 2,
            North => 3,
        },
        Family::Vine => vine_bit(d),
        _ => 0,
    }
}

fn decode(f: Family, meta: u8) -> Option<Facing> {
    use Facing::*;
    let all = [North, South, West, East];
    match f {
        Family::Vine | Family::Plain | Family::Rail | Family::Log => None,
        Family::Wall if !(2..=5).contains(&meta) => None,
        Family::Torch if !(1..=4).contains(&meta) => None,
        _ => all.into_iter().find(|d| encode(f, *d) == meta),
    }
}

fn vine_bit(d: Facing) -> u8 {
    match d {
        Facing::South => 1,
        Facing::West => 2,
        Facing::North => 4,
        Facing::East => 8,
    }
}

/// A directional block pointing `dir` in the local frame. For stairs `dir` is
/// the side the steps climb toward; for torches and wall blocks it is the
/// direction they face away from their support.
pub fn facing_block(id: u8, dir: Facing) -> Block {
    Block::new(id, encode(family(id), dir))
}

/// Upside-down variant of [`facing_block`] for stairs.
pub fn inverted_stairs(id: u8, dir: Facing) -> Block {
    Block::new(id, encode(Family::Stairs, dir) | 4)
}

pub const TORCH_UP: Block = Block { id: ids::TORCH, meta: 5 };

/// One piece of a structure: frame, generation depth and the typed payload.
#[derive(Clone, Debug)]
pub struct StructureComponent {
    pub frame: Frame,
    pub depth: i32,
    pub piece: Piece,
}

#[derive(Clone, Debug)]
pub enum Piece {
    Village(VillagePiece),
    Stronghold(StrongholdPiece),
    Mineshaft(MineshaftPiece),
    Scattered(ScatteredPiece),
}

impl StructureComponent {
    pub fn bbox(&self) -> &BoundingBox {
        &self.frame.bbox
    }

    /// Stamps the part of the piece inside `clip`. Returns `false` when the
    /// piece refuses to generate and should be dropped from its start.
    pub fn add_parts(&mut self, w: &mut dyn WorldAccess, rng: &mut JavaRandom, clip: &BoundingBox) -> bool {
        match &mut self.piece {
            Piece::Village(p) => crate::village_pieces::add_parts(&mut self.frame, p, w, rng, clip),
            Piece::Stronghold(p) => crate::stronghold_pieces::add_parts(&self.frame, p, w, rng, clip),
            Piece::Mineshaft(p) => crate::mineshaft::add_parts(&self.frame, p, w, rng, clip),
            Piece::Scattered(p) => crate::scattered::add_parts(&mut self.frame, p, w, rng, clip),
        }
    }

    pub fn is_village_road(&self) -> bool {
        matches!(&self.piece, Piece::Village(p) if p.is_road())
    }
}

/// First component whose box overlaps `bbox`.
pub fn find_intersecting<'a>(list: &'a [StructureComponent], bbox: &BoundingBox) -> Option<&'a StructureComponent> {
    list.iter().find(|c| c.frame.bbox.intersects(bbox))
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_chunk::Chunk;

    fn frame(f: Facing) -> Frame {
        Frame::new(BoundingBox::new(0, 64, 0, 4, 70, 8), f)
    }

    #[test]
    fn north_frame_keeps_block_meta() {
        let f = frame(Facing::North);
        let b = facing_block(ids::OAK_STAIRS, Facing::North);
        assert_eq!(f.orient_block(b), b);
    }

    #[test]
    fn south_frame_flips_stairs_and_ladders() {
        let f = frame(Facing::South);
        assert_eq!(f.orient_block(Block::new(ids::OAK_STAIRS, 3)).meta, 2);
        assert_eq!(f.orient_block(Block::new(ids::OAK_STAIRS, 3 | 4)).meta, 2 | 4);
        assert_eq!(f.orient_block(Block::new(ids::LADDER, 2)).meta, 3);
        assert_eq!(f.orient_block(Block::new(ids::OAK_STAIRS, 0)).meta, 0);
    }

    #[test]
    fn west_and_east_frames_match_legacy_tables() {
        let w = frame(Facing::West);
        let e = frame(Facing::East);
        for (from, west, east) in [(0, 2, 2), (1, 3, 3), (2, 0, 1), (3, 1, 0)] {
            assert_eq!(w.orient_block(Block::new(ids::STONE_STAIRS, from)).meta, west);
            assert_eq!(e.orient_block(Block::new(ids::STONE_STAIRS, from)).meta, east);
        }
        for (from, west, east) in [(2, 4, 5), (3, 5, 4), (4, 2, 2), (5, 3, 3)] {
            assert_eq!(w.orient_block(Block::new(ids::LADDER, from)).meta, west);
            assert_eq!(e.orient_block(Block::new(ids::LADDER, from)).meta, east);
        }
    }

    #[test]
    fn rails_and_logs_swap_axis_sideways() {
        let w = frame(Facing::West);
        assert_eq!(w.orient_block(Block::new(ids::RAIL, 0)).meta, 1);
        assert_eq!(w.orient_block(Block::new(ids::LOG, 4 | 1)).meta, 8 | 1);
        assert_eq!(frame(Facing::South).orient_block(Block::new(ids::RAIL, 0)).meta, 0);
    }

    #[test]
    fn upright_torch_and_upper_door_are_untouched() {
        let f = frame(Facing::East);
        assert_eq!(f.orient_block(TORCH_UP), TORCH_UP);
        assert_eq!(f.orient_block(Block::new(ids::WOODEN_DOOR, 8)).meta, 8);
    }

    #[test]
    fn frames_map_local_origin_to_entrance_corner() {
        let b = BoundingBox::new(10, 64, 20, 14, 70, 28);
        assert_eq!(Frame::new(b, Facing::North).world_pos(0, 0, 0), BlockPos::new(10, 64, 28));
        assert_eq!(Frame::new(b, Facing::South).world_pos(0, 0, 0), BlockPos::new(10, 64, 20));
        assert_eq!(Frame::new(b, Facing::West).world_pos(0, 0, 0), BlockPos::new(14, 64, 20));
        assert_eq!(Frame::new(b, Facing::East).world_pos(1, 2, 3), BlockPos::new(13, 66, 21));
        assert_eq!(Frame::fixed(b).world_pos(1, 2, 3), BlockPos::new(1, 2, 3));
    }

    #[test]
    fn fill_is_clipped_and_hollow() {
        let mut chunk = Chunk::new(0, 0);
        let f = Frame::new(BoundingBox::new(0, 60, 0, 4, 64, 4), Facing::South);
        let clip = BoundingBox::new(0, 0, 0, 15, 255, 15);
        let stone = Block::of(ids::STONE);
        f.fill(&mut chunk, &clip, [0, 0, 0, 4, 4, 4], stone, Block::AIR, false);
        assert_eq!(WorldAccess::block(&chunk, 0, 60, 0), stone);
        assert_eq!(WorldAccess::block(&chunk, 2, 62, 2), Block::AIR);
        let narrow = BoundingBox::new(0, 0, 0, 1, 255, 15);
        let mut other = Chunk::new(0, 0);
        f.fill_with(&mut other, &narrow, [0, 0, 0, 4, 4, 4], stone);
        assert_eq!(WorldAccess::block(&other, 1, 61, 1), stone);
        assert_eq!(WorldAccess::block(&other, 2, 61, 1), Block::AIR);
    }

    #[test]
    fn foundations_stop_at_ground() {
        let mut chunk = Chunk::new(0, 0);
        let stone = Block::of(ids::STONE);
        for y in 0..=60 {
            chunk.set_block(3, y, 3, stone);
        }
        let f = Frame::fixed(BoundingBox::new(0, 0, 0, 15, 255, 15));
        let clip = BoundingBox::new(0, 0, 0, 15, 255, 15);
        f.fill_downwards(&mut chunk, Block::of(ids::COBBLESTONE), 3, 64, 3, &clip);
        assert_eq!(WorldAccess::block(&chunk, 3, 61, 3).id, ids::COBBLESTONE);
        assert_eq!(WorldAccess::block(&chunk, 3, 60, 3), stone);
    }
}
