//! Abandoned mineshafts: a dirt room at the root and a depth-first tree of
//! corridors, crossings and stairs hanging off it.

use strata_blocks::{Block, ids};
use strata_chunk::WorldAccess;
use strata_geom::{Axis, BoundingBox, Facing};
use strata_noise::JavaRandom;

use crate::component::{Frame, Piece, StructureComponent, facing_block, find_intersecting};
use crate::{BiomeSource, SEA_LEVEL, StructureGenerator, StructureKind, StructureStart, biomes, region_seed};

const MAX_DEPTH: i32 = 8;
const MAX_REACH: i32 = 80;

pub struct Mineshaft {
    chance: f64,
}

impl Mineshaft {
    pub fn new() -> Self {
        Self { chance: 0.004 }
    }

    pub fn with_chance(chance: f64) -> Self {
        Self { chance }
    }
}

impl Default for Mineshaft {
    fn default() -> Self {
        Self::new()
    }
}

impl StructureGenerator for Mineshaft {
    fn kind(&self) -> StructureKind {
        StructureKind::Mineshaft
    }

    fn can_spawn_at(&self, cx: i32, cz: i32, rng: &mut JavaRandom, _biomes: &dyn BiomeSource) -> bool {
        rng.next_double() < self.chance && rng.next_bounded_int(80) < cx.abs().max(cz.abs())
    }

    fn start_at(&self, cx: i32, cz: i32, rng: &mut JavaRandom, biomes: &dyn BiomeSource) -> StructureStart {
        let mesa = biomes::is_mesa(biomes.biome((cx << 4) + 8, (cz << 4) + 8));
        let components = ShaftBuilder::new(rng, mesa).build(cx, cz);
        let mut start = StructureStart::new(StructureKind::Mineshaft, cx, cz);
        start.components = components;
        start.update_bbox();
        if mesa {
            let dy = SEA_LEVEL - start.bbox.max_y + start.bbox.y_size() / 2 + 5;
            start.offset(dy);
        } else {
            start.mark_available_height(rng, 10);
        }
        start
    }

    fn stamp_rng(&self, world_seed: i64, cx: i32, cz: i32) -> JavaRandom {
        let mut rng = JavaRandom::new(region_seed(world_seed, cx, cz, 0));
        rng.next_double();
        rng
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MineshaftKind {
    /// Exits are kept relative to the room's minimum corner so they follow
    /// the start when it is moved.
    Room { exits: Vec<BoundingBox> },
    Corridor { rails: bool, spiders: bool, sections: i32, spawner_placed: bool },
    Cross { direction: Facing, tall: bool },
    Stairs,
}

#[derive(Clone, Debug)]
pub struct MineshaftPiece {
    pub kind: MineshaftKind,
    /// Mesa shafts use dark oak and sit near the surface.
    pub mesa: bool,
}

impl MineshaftPiece {
    fn planks(&self) -> Block {
        Block::new(ids::PLANKS, if self.mesa { 5 } else { 0 })
    }

    fn fence(&self) -> Block {
        Block::of(if self.mesa { ids::DARK_OAK_FENCE } else { ids::FENCE })
    }
}

impl From<MineshaftPiece> for Piece {
    fn from(p: MineshaftPiece) -> Self {
        Piece::Mineshaft(p)
    }
}

struct ShaftBuilder<'a> {
    rng: &'a mut JavaRandom,
    mesa: bool,
    components: Vec<StructureComponent>,
}

impl<'a> ShaftBuilder<'a> {
    fn new(rng: &'a mut JavaRandom, mesa: bool) -> Self {
        Self { rng, mesa, components: Vec::new() }
    }

    fn build(mut self, cx: i32, cz: i32) -> Vec<StructureComponent> {
        let x = (cx << 4) + 2;
        let z = (cz << 4) + 2;
        let max_x = x + 7 + self.rng.next_bounded_int(6);
        let max_y = 54 + self.rng.next_bounded_int(6);
        let max_z = z + 7 + self.rng.next_bounded_int(6);
        let bbox = BoundingBox::new(x, 50, z, max_x, max_y, max_z);
        self.push(Frame::fixed(bbox), 0, MineshaftKind::Room { exits: Vec::new() });
        self.expand_room(&bbox);
        self.components
    }

    fn push(&mut self, frame: Frame, depth: i32, kind: MineshaftKind) -> usize {
        let piece = MineshaftPiece { kind, mesa: self.mesa };
        self.components.push(StructureComponent { frame, depth, piece: piece.into() });
        self.components.len() - 1
    }

    fn expand_room(&mut self, bb: &BoundingBox) {
        let depth = 0;
        let span = (bb.y_size() - 4).max(1);
        let mut exits = Vec::new();

        let mut k = 0;
        while k < bb.x_size() {
            k += self.rng.next_bounded_int(bb.x_size());
            if k + 3 > bb.x_size() {
                break;
            }
            let y = bb.min_y + self.rng.next_bounded_int(span) + 1;
            if let Some(c) = self.add_piece(bb.min_x + k, y, bb.min_z - 1, Facing::North, depth) {
                exits.push(BoundingBox::new(c.min_x, c.min_y, bb.min_z, c.max_x, c.max_y, bb.min_z + 1));
            }
            k += 4;
        }
        k = 0;
        while k < bb.x_size() {
            k += self.rng.next_bounded_int(bb.x_size());
            if k + 3 > bb.x_size() {
                break;
            }
            let y = bb.min_y + self.rng.next_bounded_int(span) + 1;
            if let Some(c) = self.add_piece(bb.min_x + k, y, bb.max_z + 1, Facing::South, depth) {
                exits.push(BoundingBox::new(c.min_x, c.min_y, bb.max_z - 1, c.max_x, c.max_y, bb.max_z));
            }
            k += 4;
        }
        k = 0;
        while k < bb.z_size() {
            k += self.rng.next_bounded_int(bb.z_size());
            if k + 3 > bb.z_size() {
                break;
            }
            let y = bb.min_y + self.rng.next_bounded_int(span) + 1;
            if let Some(c) = self.add_piece(bb.min_x - 1, y, bb.min_z + k, Facing::West, depth) {
                exits.push(BoundingBox::new(bb.min_x, c.min_y, c.min_z, bb.min_x + 1, c.max_y, c.max_z));
            }
            k += 4;
        }
        k = 0;
        while k < bb.z_size() {
            k += self.rng.next_bounded_int(bb.z_size());
            if k + 3 > bb.z_size() {
                break;
            }
            let y = bb.min_y + self.rng.next_bounded_int(span) + 1;
            if let Some(c) = self.add_piece(bb.max_x + 1, y, bb.min_z + k, Facing::East, depth) {
                exits.push(BoundingBox::new(bb.max_x - 1, c.min_y, c.min_z, bb.max_x, c.max_y, c.max_z));
            }
            k += 4;
        }

        for e in &mut exits {
            e.offset(-bb.min_x, -bb.min_y, -bb.min_z);
        }
        if let Piece::Mineshaft(MineshaftPiece { kind: MineshaftKind::Room { exits: slot }, .. }) =
            &mut self.components[0].piece
        {
            *slot = exits;
        }
    }

    /// Creates, registers and immediately expands a piece attached at
    /// `(x, y, z)`. Returns the new piece's box.
    fn add_piece(&mut self, x: i32, y: i32, z: i32, facing: Facing, depth: i32) -> Option<BoundingBox> {
        let root = self.components[0].frame.bbox;
        if depth > MAX_DEPTH || (x - root.min_x).abs() > MAX_REACH || (z - root.min_z).abs() > MAX_REACH {
            return None;
        }
        let depth = depth + 1;
        let roll = self.rng.next_bounded_int(100);
        let (frame, kind) = if roll >= 80 {
            let bbox = self.crossing_box(x, y, z, facing)?;
            (Frame::fixed(bbox), MineshaftKind::Cross { direction: facing, tall: bbox.y_size() > 3 })
        } else if roll >= 70 {
            let bbox = self.stairs_box(x, y, z, facing)?;
            (Frame::new(bbox, facing), MineshaftKind::Stairs)
        } else {
            let bbox = self.corridor_box(x, y, z, facing)?;
            let rails = self.rng.next_bounded_int(3) == 0;
            let spiders = !rails && self.rng.next_bounded_int(23) == 0;
            let len = if facing.axis() == Axis::Z { bbox.z_size() } else { bbox.x_size() };
            (Frame::new(bbox, facing), MineshaftKind::Corridor { rails, spiders, sections: len / 5, spawner_placed: false })
        };
        let bbox = frame.bbox;
        self.push(frame, depth, kind.clone());
        match kind {
            MineshaftKind::Corridor { .. } => self.expand_corridor(&bbox, facing, depth),
            MineshaftKind::Cross { direction, tall } => self.expand_cross(&bbox, direction, tall, depth),
            MineshaftKind::Stairs => self.expand_stairs(&bbox, facing, depth),
            MineshaftKind::Room { .. } => {}
        }
        Some(bbox)
    }

    fn free(&self, bbox: BoundingBox) -> Option<BoundingBox> {
        find_intersecting(&self.components, &bbox).is_none().then_some(bbox)
    }

    fn corridor_box(&mut self, x: i32, y: i32, z: i32, facing: Facing) -> Option<BoundingBox> {
        let mut sections = self.rng.next_bounded_int(3) + 2;
        while sections > 0 {
            let len = sections * 5 - 1;
            let bbox = match facing {
                Facing::North => BoundingBox::new(x, y, z - len, x + 2, y + 2, z),
                Facing::South => BoundingBox::new(x, y, z, x + 2, y + 2, z + len),
                Facing::West => BoundingBox::new(x - len, y, z, x, y + 2, z + 2),
                Facing::East => BoundingBox::new(x, y, z, x + len, y + 2, z + 2),
            };
            if self.free(bbox).is_some() {
                return Some(bbox);
            }
            sections -= 1;
        }
        None
    }

    fn crossing_box(&mut self, x: i32, y: i32, z: i32, facing: Facing) -> Option<BoundingBox> {
        let top = if self.rng.next_bounded_int(4) == 0 { y + 6 } else { y + 2 };
        let bbox = match facing {
            Facing::North => BoundingBox::new(x - 1, y, z - 4, x + 3, top, z),
            Facing::South => BoundingBox::new(x - 1, y, z, x + 3, top, z + 4),
            Facing::West => BoundingBox::new(x - 4, y, z - 1, x, top, z + 3),
            Facing::East => BoundingBox::new(x, y, z - 1, x + 4, top, z + 3),
        };
        self.free(bbox)
    }

    fn stairs_box(&self, x: i32, y: i32, z: i32, facing: Facing) -> Option<BoundingBox> {
        let bbox = match facing {
            Facing::North => BoundingBox::new(x, y - 5, z - 8, x + 2, y + 2, z),
            Facing::South => BoundingBox::new(x, y - 5, z, x + 2, y + 2, z + 8),
            Facing::West => BoundingBox::new(x - 8, y - 5, z, x, y + 2, z + 2),
            Facing::East => BoundingBox::new(x, y - 5, z, x + 8, y + 2, z + 2),
        };
        self.free(bbox)
    }

    fn expand_corridor(&mut self, bb: &BoundingBox, facing: Facing, depth: i32) {
        let turn = self.rng.next_bounded_int(4);
        let y = bb.min_y - 1 + self.rng.next_bounded_int(3);
        match facing {
            Facing::North => match turn {
                0 | 1 => self.add_piece(bb.min_x, y, bb.min_z - 1, facing, depth),
                2 => self.add_piece(bb.min_x - 1, y, bb.min_z, Facing::West, depth),
                _ => self.add_piece(bb.max_x + 1, y, bb.min_z, Facing::East, depth),
            },
            Facing::South => match turn {
                0 | 1 => self.add_piece(bb.min_x, y, bb.max_z + 1, facing, depth),
                2 => self.add_piece(bb.min_x - 1, y, bb.max_z - 3, Facing::West, depth),
                _ => self.add_piece(bb.max_x + 1, y, bb.max_z - 3, Facing::East, depth),
            },
            Facing::West => match turn {
                0 | 1 => self.add_piece(bb.min_x - 1, y, bb.min_z, facing, depth),
                2 => self.add_piece(bb.min_x, y, bb.min_z - 1, Facing::North, depth),
                _ => self.add_piece(bb.min_x, y, bb.max_z + 1, Facing::South, depth),
            },
            Facing::East => match turn {
                0 | 1 => self.add_piece(bb.max_x + 1, y, bb.min_z, facing, depth),
                2 => self.add_piece(bb.max_x - 3, y, bb.min_z - 1, Facing::North, depth),
                _ => self.add_piece(bb.max_x - 3, y, bb.max_z + 1, Facing::South, depth),
            },
        };
        if depth >= MAX_DEPTH {
            return;
        }
        if facing.axis() == Axis::X {
            let mut x = bb.min_x + 3;
            while x + 3 <= bb.max_x {
                match self.rng.next_bounded_int(5) {
                    0 => self.add_piece(x, bb.min_y, bb.min_z - 1, Facing::North, depth + 1),
                    1 => self.add_piece(x, bb.min_y, bb.max_z + 1, Facing::South, depth + 1),
                    _ => None,
                };
                x += 5;
            }
        } else {
            let mut z = bb.min_z + 3;
            while z + 3 <= bb.max_z {
                match self.rng.next_bounded_int(5) {
                    0 => self.add_piece(bb.min_x - 1, bb.min_y, z, Facing::West, depth + 1),
                    1 => self.add_piece(bb.max_x + 1, bb.min_y, z, Facing::East, depth + 1),
                    _ => None,
                };
                z += 5;
            }
        }
    }

    fn expand_cross(&mut self, bb: &BoundingBox, direction: Facing, tall: bool, depth: i32) {
        let north = (bb.min_x + 1, bb.min_z - 1, Facing::North);
        let south = (bb.min_x + 1, bb.max_z + 1, Facing::South);
        let west = (bb.min_x - 1, bb.min_z + 1, Facing::West);
        let east = (bb.max_x + 1, bb.min_z + 1, Facing::East);
        let exits = match direction {
            Facing::North => [north, west, east],
            Facing::South => [south, west, east],
            Facing::West => [north, south, west],
            Facing::East => [north, south, east],
        };
        for (x, z, f) in exits {
            self.add_piece(x, bb.min_y, z, f, depth);
        }
        if tall {
            for (x, z, f) in [north, west, east, south] {
                if self.rng.next_bool() {
                    self.add_piece(x, bb.min_y + 4, z, f, depth);
                }
            }
        }
    }

    fn expand_stairs(&mut self, bb: &BoundingBox, facing: Facing, depth: i32) {
        match facing {
            Facing::North => self.add_piece(bb.min_x, bb.min_y, bb.min_z - 1, facing, depth),
            Facing::South => self.add_piece(bb.min_x, bb.min_y, bb.max_z + 1, facing, depth),
            Facing::West => self.add_piece(bb.min_x - 1, bb.min_y, bb.min_z, facing, depth),
            Facing::East => self.add_piece(bb.max_x + 1, bb.min_y, bb.min_z, facing, depth),
        };
    }
}

pub(crate) fn add_parts(
    frame: &Frame,
    piece: &mut MineshaftPiece,
    w: &mut dyn WorldAccess,
    rng: &mut JavaRandom,
    clip: &BoundingBox,
) -> bool {
    if frame.touches_liquid(w, clip) {
        return false;
    }
    let planks = piece.planks();
    let fence = piece.fence();
    match &mut piece.kind {
        MineshaftKind::Room { exits } => room(frame, exits, w, clip),
        MineshaftKind::Corridor { rails, spiders, sections, spawner_placed } => {
            let shaft = Shaft { f: frame, clip, planks, fence };
            shaft.corridor(w, rng, *rails, *spiders, *sections, spawner_placed);
        }
        MineshaftKind::Cross { tall, .. } => cross(frame, *tall, planks, w, clip),
        MineshaftKind::Stairs => {
            frame.fill_air(w, clip, [0, 5, 0, 2, 7, 1]);
            frame.fill_air(w, clip, [0, 0, 7, 2, 2, 8]);
            for i in 0..5 {
                let low = 5 - i - i32::from(i < 4);
                frame.fill_air(w, clip, [0, low, 2 + i, 2, 7 - i, 2 + i]);
            }
        }
    }
    true
}

fn room(f: &Frame, exits: &[BoundingBox], w: &mut dyn WorldAccess, clip: &BoundingBox) {
    let b = f.bbox;
    f.fill(w, clip, [b.min_x, b.min_y, b.min_z, b.max_x, b.min_y, b.max_z], Block::of(ids::DIRT), Block::AIR, true);
    f.fill_air(w, clip, [b.min_x, b.min_y + 1, b.min_z, b.max_x, (b.min_y + 3).min(b.max_y), b.max_z]);
    for e in exits {
        let top = e.max_y + b.min_y;
        f.fill_air(w, clip, [e.min_x + b.min_x, top - 2, e.min_z + b.min_z, e.max_x + b.min_x, top, e.max_z + b.min_z]);
    }
    f.fill_ellipsoid(w, clip, [b.min_x, b.min_y + 4, b.min_z, b.max_x, b.max_y, b.max_z], Block::AIR, false);
}

fn cross(f: &Frame, tall: bool, planks: Block, w: &mut dyn WorldAccess, clip: &BoundingBox) {
    let b = f.bbox;
    if tall {
        f.fill_air(w, clip, [b.min_x + 1, b.min_y, b.min_z, b.max_x - 1, b.min_y + 2, b.max_z]);
        f.fill_air(w, clip, [b.min_x, b.min_y, b.min_z + 1, b.max_x, b.min_y + 2, b.max_z - 1]);
        f.fill_air(w, clip, [b.min_x + 1, b.max_y - 2, b.min_z, b.max_x - 1, b.max_y, b.max_z]);
        f.fill_air(w, clip, [b.min_x, b.max_y - 2, b.min_z + 1, b.max_x, b.max_y, b.max_z - 1]);
        f.fill_air(w, clip, [b.min_x + 1, b.min_y + 3, b.min_z + 1, b.max_x - 1, b.min_y + 3, b.max_z - 1]);
    } else {
        f.fill_air(w, clip, [b.min_x + 1, b.min_y, b.min_z, b.max_x - 1, b.max_y, b.max_z]);
        f.fill_air(w, clip, [b.min_x, b.min_y, b.min_z + 1, b.max_x, b.max_y, b.max_z - 1]);
    }
    for (x, z) in [(b.min_x + 1, b.min_z + 1), (b.min_x + 1, b.max_z - 1), (b.max_x - 1, b.min_z + 1), (b.max_x - 1, b.max_z - 1)] {
        if !f.get(w, x, b.max_y + 1, z, clip).is_air() {
            f.fill(w, clip, [x, b.min_y, z, x, b.max_y, z], planks, Block::AIR, false);
        }
    }
    for x in b.min_x..=b.max_x {
        for z in b.min_z..=b.max_z {
            if f.get(w, x, b.min_y - 1, z, clip).is_air() && f.sky_light(w, x, b.min_y - 1, z, clip) < 8 {
                f.set(w, planks, x, b.min_y - 1, z, clip);
            }
        }
    }
}

/// Corridor painter: a 3-wide tunnel of `sections` five-block bays.
struct Shaft<'a> {
    f: &'a Frame,
    clip: &'a BoundingBox,
    planks: Block,
    fence: Block,
}

impl Shaft<'_> {
    fn corridor(
        &self,
        w: &mut dyn WorldAccess,
        rng: &mut JavaRandom,
        rails: bool,
        spiders: bool,
        sections: i32,
        spawner_placed: &mut bool,
    ) {
        let (f, clip) = (self.f, self.clip);
        let end = sections * 5 - 1;
        let web = Block::of(ids::WEB);
        f.fill_air(w, clip, [0, 0, 0, 2, 1, end]);
        f.fill_maybe(w, clip, rng, 0.8, [0, 2, 0, 2, 2, end], Block::AIR, Block::AIR, false, false);
        if spiders {
            f.fill_maybe(w, clip, rng, 0.6, [0, 0, 0, 2, 1, end], web, Block::AIR, false, true);
        }

        for s in 0..sections {
            let z = 2 + s * 5;
            self.support(w, rng, z);
            for (chance, dz) in [(0.1, -1), (0.1, 1), (0.05, -2), (0.05, 2)] {
                self.cobweb(w, rng, chance, 0, z + dz);
                self.cobweb(w, rng, chance, 2, z + dz);
            }
            if rng.next_bounded_int(100) == 0 {
                self.chest_cart(w, rng, 2, z - 1);
            }
            if rng.next_bounded_int(100) == 0 {
                self.chest_cart(w, rng, 0, z + 1);
            }
            if spiders && !*spawner_placed {
                let sz = z - 1 + rng.next_bounded_int(3);
                let p = f.world_pos(1, 0, sz);
                if clip.contains_pos(p) && f.sky_light(w, 1, 0, sz, clip) < 8 {
                    *spawner_placed = true;
                    w.set_block(p.x, p.y, p.z, Block::of(ids::MOB_SPAWNER));
                }
            }
        }

        for x in 0..=2 {
            for z in 0..=end {
                if f.get(w, x, -1, z, clip).is_air() && f.sky_light(w, x, -1, z, clip) < 8 {
                    f.set(w, self.planks, x, -1, z, clip);
                }
            }
        }

        if rails {
            let rail = Block::new(ids::RAIL, 0);
            for z in 0..=end {
                let below = f.get(w, 1, -1, z, clip);
                if !below.is_air() && below.material().is_opaque() {
                    let chance = if f.sky_light(w, 1, 0, z, clip) > 8 { 0.9 } else { 0.7 };
                    f.place_maybe(w, clip, rng, chance, 1, 0, z, rail);
                }
            }
        }
    }

    /// Fence posts and a plank beam across bay `z`, only where the ceiling holds.
    fn support(&self, w: &mut dyn WorldAccess, rng: &mut JavaRandom, z: i32) {
        let (f, clip) = (self.f, self.clip);
        if (0..=2).any(|x| f.get(w, x, 3, z, clip).is_air()) {
            return;
        }
        f.fill(w, clip, [0, 0, z, 0, 1, z], self.fence, Block::AIR, false);
        f.fill(w, clip, [2, 0, z, 2, 1, z], self.fence, Block::AIR, false);
        if rng.next_bounded_int(4) == 0 {
            f.set(w, self.planks, 0, 2, z, clip);
            f.set(w, self.planks, 2, 2, z, clip);
        } else {
            f.fill(w, clip, [0, 2, z, 2, 2, z], self.planks, Block::AIR, false);
            f.place_maybe(w, clip, rng, 0.05, 1, 2, z - 1, facing_block(ids::TORCH, Facing::South));
            f.place_maybe(w, clip, rng, 0.05, 1, 2, z + 1, facing_block(ids::TORCH, Facing::North));
        }
    }

    fn cobweb(&self, w: &mut dyn WorldAccess, rng: &mut JavaRandom, chance: f32, x: i32, z: i32) {
        if self.f.sky_light(w, x, 2, z, self.clip) < 8 {
            self.f.place_maybe(w, self.clip, rng, chance, x, 2, z, Block::of(ids::WEB));
        }
    }

    /// Rail under a chest minecart. The cart itself is an entity and is not stored.
    fn chest_cart(&self, w: &mut dyn WorldAccess, rng: &mut JavaRandom, x: i32, z: i32) {
        let p = self.f.world_pos(x, 0, z);
        if self.clip.contains_pos(p) && w.block(p.x, p.y, p.z).is_air() && !w.block(p.x, p.y - 1, p.z).is_air() {
            let shape = if rng.next_bool() { 0 } else { 1 };
            self.f.set(w, Block::new(ids::RAIL, shape), x, 0, z, self.clip);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_chunk::Chunk;
    use strata_geom::BlockPos;

    struct Fixed(u8);

    impl BiomeSource for Fixed {
        fn biome(&self, _x: i32, _z: i32) -> u8 {
            self.0
        }

        fn are_biomes_viable(&self, _x: i32, _z: i32, _radius: i32, _allowed: &[u8]) -> bool {
            true
        }

        fn find_biome_position(&self, _: i32, _: i32, _: i32, _: &[u8], _: &mut JavaRandom) -> Option<BlockPos> {
            None
        }
    }

    fn start(seed: i64, biome: u8) -> StructureStart {
        let mut rng = JavaRandom::new(seed);
        Mineshaft::new().start_at(3, -5, &mut rng, &Fixed(biome))
    }

    #[test]
    fn tree_respects_depth_reach_and_overlap() {
        let s = start(99, biomes::PLAINS);
        let root = s.components[0].frame.bbox;
        assert!(matches!(&s.components[0].piece, Piece::Mineshaft(p) if matches!(p.kind, MineshaftKind::Room { .. })));
        for (i, a) in s.components.iter().enumerate() {
            assert!(a.depth <= MAX_DEPTH + 1);
            assert!((a.frame.bbox.min_x - root.min_x).abs() <= MAX_REACH + 20);
            for b in &s.components[i + 1..] {
                assert!(!a.frame.bbox.intersects(&b.frame.bbox));
            }
        }
    }

    #[test]
    fn mesa_shafts_use_dark_oak_and_sit_high() {
        let normal = start(7, biomes::PLAINS);
        let mesa = start(7, biomes::MESA);
        assert_eq!(normal.components.len(), mesa.components.len());
        let Piece::Mineshaft(p) = &mesa.components[0].piece else {
            panic!("root is not a mineshaft piece");
        };
        assert!(p.mesa);
        assert_eq!(p.planks(), Block::new(ids::PLANKS, 5));
        assert_eq!(mesa.bbox.max_y - mesa.bbox.y_size() / 2, SEA_LEVEL + 5);
    }

    #[test]
    fn spawn_chance_grows_with_distance() {
        let shaft = Mineshaft::with_chance(1.0);
        let mut rng = JavaRandom::new(1);
        assert!(!shaft.can_spawn_at(0, 0, &mut rng, &Fixed(1)));
        assert!(shaft.can_spawn_at(500, 0, &mut rng, &Fixed(1)));
    }

    #[test]
    fn room_carves_floor_and_air() {
        let mut chunk = Chunk::new(0, 0);
        for x in 0..16 {
            for z in 0..16 {
                for y in 0..80 {
                    chunk.set_block(x, y, z, Block::of(ids::STONE));
                }
            }
        }
        let bbox = BoundingBox::new(2, 50, 2, 10, 55, 10);
        let mut piece = MineshaftPiece { kind: MineshaftKind::Room { exits: Vec::new() }, mesa: false };
        let clip = BoundingBox::new(0, 1, 0, 15, 255, 15);
        let mut rng = JavaRandom::new(3);
        assert!(add_parts(&Frame::fixed(bbox), &mut piece, &mut chunk, &mut rng, &clip));
        assert_eq!(WorldAccess::block(&chunk, 5, 50, 5).id, ids::DIRT);
        assert!(WorldAccess::block(&chunk, 5, 52, 5).is_air());
        assert_eq!(WorldAccess::block(&chunk, 5, 49, 5).id, ids::STONE);
    }
}
