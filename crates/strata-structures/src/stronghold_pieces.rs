//! Stronghold piece kinds, factory table and block layouts.

use strata_blocks::{Block, ids};
use strata_chunk::WorldAccess;
use strata_geom::{BoundingBox, Facing};
use strata_noise::JavaRandom;

use crate::component::{Frame, Span, TORCH_UP, facing_block};

/// What fills the entrance of a stronghold piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Door {
    Opening,
    WoodDoor,
    Grates,
    IronDoor,
}

impl Door {
    pub fn random(rng: &mut JavaRandom) -> Self {
        match rng.next_bounded_int(5) {
            2 => Door::WoodDoor,
            3 => Door::Grates,
            4 => Door::IronDoor,
            _ => Door::Opening,
        }
    }
}

/// Piece types the stronghold factory chooses between.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceType {
    Straight,
    Prison,
    LeftTurn,
    RightTurn,
    RoomCrossing,
    StairsStraight,
    Stairs,
    Crossing,
    ChestCorridor,
    Library,
    PortalRoom,
}

impl PieceType {
    /// `(type, weight, limit)` in factory order; a limit of 0 is unlimited.
    pub const TABLE: [(PieceType, i32, i32); 11] = [
        (PieceType::Straight, 40, 0),
        (PieceType::Prison, 5, 5),
        (PieceType::LeftTurn, 20, 0),
        (PieceType::RightTurn, 20, 0),
        (PieceType::RoomCrossing, 10, 6),
        (PieceType::StairsStraight, 5, 5),
        (PieceType::Stairs, 5, 5),
        (PieceType::Crossing, 5, 4),
        (PieceType::ChestCorridor, 5, 4),
        (PieceType::Library, 10, 2),
        (PieceType::PortalRoom, 20, 1),
    ];

    /// Minimum generation depth before the type may be placed.
    pub fn min_depth(self) -> i32 {
        match self {
            PieceType::Library => 5,
            PieceType::PortalRoom => 6,
            _ => 0,
        }
    }

    /// `[ox, oy, oz, w, h, l]` of the piece relative to its doorway.
    pub fn extent(self) -> [i32; 6] {
        match self {
            PieceType::Straight | PieceType::ChestCorridor => [-1, -1, 0, 5, 5, 7],
            PieceType::Prison => [-1, -1, 0, 9, 5, 11],
            PieceType::LeftTurn | PieceType::RightTurn => [-1, -1, 0, 5, 5, 5],
            PieceType::RoomCrossing => [-4, -1, 0, 11, 7, 11],
            PieceType::StairsStraight => [-1, -7, 0, 5, 11, 8],
            PieceType::Stairs => [-1, -7, 0, 5, 11, 5],
            PieceType::Crossing => [-4, -3, 0, 10, 9, 11],
            PieceType::Library => [-4, -1, 0, 14, 11, 15],
            PieceType::PortalRoom => [-4, -1, 0, 11, 8, 16],
        }
    }

    /// Builds the piece, drawing the choices it makes at construction.
    pub fn create(self, rng: &mut JavaRandom, bbox: &BoundingBox) -> StrongholdPiece {
        if self == PieceType::PortalRoom {
            return StrongholdPiece::new(StrongholdKind::PortalRoom { spawner_placed: false });
        }
        let door = Door::random(rng);
        let kind = match self {
            PieceType::Straight => StrongholdKind::Straight {
                expands_x: rng.next_bounded_int(2) == 0,
                expands_z: rng.next_bounded_int(2) == 0,
            },
            PieceType::Prison => StrongholdKind::Prison,
            PieceType::LeftTurn => StrongholdKind::LeftTurn,
            PieceType::RightTurn => StrongholdKind::RightTurn,
            PieceType::RoomCrossing => StrongholdKind::RoomCrossing { room: rng.next_bounded_int(5) },
            PieceType::StairsStraight => StrongholdKind::StairsStraight,
            PieceType::Stairs => StrongholdKind::Stairs,
            PieceType::Crossing => {
                let left_low = rng.next_bool();
                let left_high = rng.next_bool();
                let right_low = rng.next_bool();
                let right_high = rng.next_bounded_int(3) > 0;
                StrongholdKind::Crossing { left_low, left_high, right_low, right_high }
            }
            PieceType::ChestCorridor => StrongholdKind::ChestCorridor { chest_placed: false },
            PieceType::Library => StrongholdKind::Library { large: bbox.y_size() > 6 },
            PieceType::PortalRoom => StrongholdKind::PortalRoom { spawner_placed: false },
        };
        StrongholdPiece { kind, door }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StrongholdKind {
    /// Spiral stairs at the surface end that seed the tree.
    Entrance,
    Straight { expands_x: bool, expands_z: bool },
    Prison,
    LeftTurn,
    RightTurn,
    RoomCrossing { room: i32 },
    StairsStraight,
    Stairs,
    Crossing { left_low: bool, left_high: bool, right_low: bool, right_high: bool },
    ChestCorridor { chest_placed: bool },
    /// Filler used when no weighted piece fits.
    Corridor { steps: i32 },
    Library { large: bool },
    PortalRoom { spawner_placed: bool },
}

#[derive(Clone, Debug)]
pub struct StrongholdPiece {
    pub kind: StrongholdKind,
    pub door: Door,
}

impl StrongholdPiece {
    pub fn new(kind: StrongholdKind) -> Self {
        Self { kind, door: Door::Opening }
    }

    pub fn is_portal_room(&self) -> bool {
        matches!(self.kind, StrongholdKind::PortalRoom { .. })
    }
}

pub(crate) fn add_parts(
    frame: &Frame,
    piece: &mut StrongholdPiece,
    w: &mut dyn WorldAccess,
    rng: &mut JavaRandom,
    clip: &BoundingBox,
) -> bool {
    let mut m = Mason { f: frame, w, clip };
    let door = piece.door;
    match &mut piece.kind {
        StrongholdKind::Entrance | StrongholdKind::Stairs => m.spiral_stairs(rng, door),
        StrongholdKind::Straight { expands_x, expands_z } => m.straight(rng, door, *expands_x, *expands_z),
        StrongholdKind::Prison => m.prison(rng, door),
        StrongholdKind::LeftTurn => m.turn(rng, door, true),
        StrongholdKind::RightTurn => m.turn(rng, door, false),
        StrongholdKind::RoomCrossing { room } => m.room_crossing(rng, door, *room),
        StrongholdKind::StairsStraight => m.stairs_straight(rng, door),
        StrongholdKind::Crossing { left_low, left_high, right_low, right_high } => {
            m.crossing(rng, door, [*left_low, *left_high, *right_low, *right_high])
        }
        StrongholdKind::ChestCorridor { chest_placed } => m.chest_corridor(rng, door, chest_placed),
        StrongholdKind::Corridor { steps } => m.corridor(*steps),
        StrongholdKind::Library { large } => m.library(rng, door, *large),
        StrongholdKind::PortalRoom { spawner_placed } => m.portal_room(rng, spawner_placed),
    }
    true
}

const BRICK: Block = Block::of(ids::STONEBRICK);
const SLAB: Block = Block::of(ids::STONE_SLAB);
const BRICK_SLAB: Block = Block::new(ids::STONE_SLAB, 5);
const BARS: Block = Block::of(ids::IRON_BARS);
const COBBLE: Block = Block::of(ids::COBBLESTONE);
const PLANKS: Block = Block::of(ids::PLANKS);
const BOOKSHELF: Block = Block::of(ids::BOOKSHELF);
const FENCE: Block = Block::of(ids::FENCE);
const LAVA: Block = Block::of(ids::FLOWING_LAVA);

/// Worn stone brick mix used for stronghold walls; interiors are carved to air.
fn stones(rng: &mut JavaRandom, wall: bool) -> Block {
    if !wall {
        return Block::AIR;
    }
    let f = rng.next_float();
    if f < 0.2 {
        Block::new(ids::STONEBRICK, 2)
    } else if f < 0.5 {
        Block::new(ids::STONEBRICK, 1)
    } else if f < 0.55 {
        Block::new(ids::MONSTER_EGG, 2)
    } else {
        BRICK
    }
}

struct Mason<'a> {
    f: &'a Frame,
    w: &'a mut dyn WorldAccess,
    clip: &'a BoundingBox,
}

impl Mason<'_> {
    fn set(&mut self, block: Block, x: i32, y: i32, z: i32) {
        self.f.set(self.w, block, x, y, z, self.clip);
    }

    fn fill(&mut self, span: Span, block: Block) {
        self.f.fill_with(self.w, self.clip, span, block);
    }

    fn air(&mut self, span: Span) {
        self.f.fill_air(self.w, self.clip, span);
    }

    /// Shell of worn brick with a hollow interior.
    fn shell(&mut self, rng: &mut JavaRandom, span: Span, existing_only: bool) {
        self.f.fill_random(self.w, self.clip, span, existing_only, rng, &mut stones);
    }

    fn torch(&mut self, dir: Facing, x: i32, y: i32, z: i32) {
        self.set(facing_block(ids::TORCH, dir), x, y, z);
    }

    fn door(&mut self, door: Door, x: i32, y: i32, z: i32) {
        match door {
            Door::Opening => self.air([x, y, z, x + 2, y + 2, z]),
            Door::WoodDoor | Door::IronDoor => {
                for (dx, dy) in [(0, 0), (0, 1), (0, 2), (1, 2), (2, 2), (2, 1), (2, 0)] {
                    self.set(BRICK, x + dx, y + dy, z);
                }
                let id = if door == Door::WoodDoor { ids::WOODEN_DOOR } else { ids::IRON_DOOR };
                self.f.place_door(self.w, self.clip, id, x + 1, y, z, Facing::North);
                if door == Door::IronDoor {
                    self.set(facing_block(ids::STONE_BUTTON, Facing::North), x + 2, y + 1, z + 1);
                    self.set(facing_block(ids::STONE_BUTTON, Facing::South), x + 2, y + 1, z - 1);
                }
            }
            Door::Grates => {
                self.set(Block::AIR, x + 1, y, z);
                self.set(Block::AIR, x + 1, y + 1, z);
                for (dx, dy) in [(0, 0), (0, 1), (0, 2), (1, 2), (2, 2), (2, 1), (2, 0)] {
                    self.set(BARS, x + dx, y + dy, z);
                }
            }
        }
    }

    fn spiral_stairs(&mut self, rng: &mut JavaRandom, door: Door) {
        self.shell(rng, [0, 0, 0, 4, 10, 4], true);
        self.door(door, 1, 7, 0);
        self.door(Door::Opening, 1, 1, 4);
        for (block, x, y, z) in [
            (BRICK, 2, 6, 1),
            (BRICK, 1, 5, 1),
            (SLAB, 1, 6, 1),
            (BRICK, 1, 5, 2),
            (BRICK, 1, 4, 3),
            (SLAB, 1, 5, 3),
            (BRICK, 2, 4, 3),
            (BRICK, 3, 3, 3),
            (SLAB, 3, 4, 3),
            (BRICK, 3, 3, 2),
            (BRICK, 3, 2, 1),
            (SLAB, 3, 3, 1),
            (BRICK, 2, 2, 1),
            (BRICK, 1, 1, 1),
            (SLAB, 1, 2, 1),
            (BRICK, 1, 1, 2),
            (SLAB, 1, 1, 3),
        ] {
            self.set(block, x, y, z);
        }
    }

    fn straight(&mut self, rng: &mut JavaRandom, door: Door, expands_x: bool, expands_z: bool) {
        self.shell(rng, [0, 0, 0, 4, 4, 6], true);
        self.door(door, 1, 1, 0);
        self.door(Door::Opening, 1, 1, 6);
        let east = facing_block(ids::TORCH, Facing::East);
        let west = facing_block(ids::TORCH, Facing::West);
        for (x, z, torch) in [(1, 1, east), (3, 1, west), (1, 5, east), (3, 5, west)] {
            self.f.place_maybe(self.w, self.clip, rng, 0.1, x, 2, z, torch);
        }
        if expands_x {
            self.air([0, 1, 2, 0, 3, 4]);
        }
        if expands_z {
            self.air([4, 1, 2, 4, 3, 4]);
        }
    }

    fn prison(&mut self, rng: &mut JavaRandom, door: Door) {
        self.shell(rng, [0, 0, 0, 8, 4, 10], true);
        self.door(door, 1, 1, 0);
        self.air([1, 1, 10, 3, 3, 10]);
        for z in [1, 3, 7, 9] {
            self.shell(rng, [4, 1, z, 4, 3, z], false);
        }
        for y in 1..=3 {
            for (x, z) in [(4, 4), (4, 5), (4, 6), (5, 5), (6, 5), (7, 5)] {
                self.set(BARS, x, y, z);
            }
        }
        self.set(BARS, 4, 3, 2);
        self.set(BARS, 4, 3, 8);
        self.f.place_door(self.w, self.clip, ids::IRON_DOOR, 4, 1, 2, Facing::West);
        self.f.place_door(self.w, self.clip, ids::IRON_DOOR, 4, 1, 8, Facing::West);
    }

    fn turn(&mut self, rng: &mut JavaRandom, door: Door, left: bool) {
        self.shell(rng, [0, 0, 0, 4, 4, 4], true);
        self.door(door, 1, 1, 0);
        let flipped = !matches!(self.f.facing, Some(Facing::North | Facing::East));
        if left == flipped {
            self.air([4, 1, 1, 4, 3, 3]);
        } else {
            self.air([0, 1, 1, 0, 3, 3]);
        }
    }

    fn room_crossing(&mut self, rng: &mut JavaRandom, door: Door, room: i32) {
        self.shell(rng, [0, 0, 0, 10, 6, 10], true);
        self.door(door, 4, 1, 0);
        self.air([4, 1, 10, 6, 3, 10]);
        self.air([0, 1, 4, 0, 3, 6]);
        self.air([10, 1, 4, 10, 3, 6]);
        match room {
            0 => {
                for y in 1..=3 {
                    self.set(BRICK, 5, y, 5);
                }
                self.torch(Facing::West, 4, 3, 5);
                self.torch(Facing::East, 6, 3, 5);
                self.torch(Facing::South, 5, 3, 4);
                self.torch(Facing::North, 5, 3, 6);
                for (x, z) in [(4, 4), (4, 5), (4, 6), (6, 4), (6, 5), (6, 6), (5, 4), (5, 6)] {
                    self.set(SLAB, x, 1, z);
                }
            }
            1 => {
                for i in 0..5 {
                    self.set(BRICK, 3, 1, 3 + i);
                    self.set(BRICK, 7, 1, 3 + i);
                    self.set(BRICK, 3 + i, 1, 3);
                    self.set(BRICK, 3 + i, 1, 7);
                }
                for y in 1..=3 {
                    self.set(BRICK, 5, y, 5);
                }
                self.set(Block::of(ids::FLOWING_WATER), 5, 4, 5);
            }
            2 => {
                for i in 1..=9 {
                    self.set(COBBLE, 1, 3, i);
                    self.set(COBBLE, 9, 3, i);
                }
                for i in 1..=9 {
                    self.set(COBBLE, i, 3, 1);
                    self.set(COBBLE, i, 3, 9);
                }
                for (x, y, z) in [(5, 1, 4), (5, 1, 6), (5, 3, 4), (5, 3, 6), (4, 1, 5), (6, 1, 5), (4, 3, 5), (6, 3, 5)] {
                    self.set(COBBLE, x, y, z);
                }
                for y in 1..=3 {
                    for (x, z) in [(4, 4), (6, 4), (4, 6), (6, 6)] {
                        self.set(COBBLE, x, y, z);
                    }
                }
                self.set(TORCH_UP, 5, 3, 5);
                for z in 2..=8 {
                    self.set(PLANKS, 2, 3, z);
                    self.set(PLANKS, 3, 3, z);
                    if z <= 3 || z >= 7 {
                        for x in 4..=6 {
                            self.set(PLANKS, x, 3, z);
                        }
                    }
                    self.set(PLANKS, 7, 3, z);
                    self.set(PLANKS, 8, 3, z);
                }
                for y in 1..=3 {
                    self.set(facing_block(ids::LADDER, Facing::West), 9, y, 3);
                }
                self.f.place_chest(self.w, self.clip, 3, 4, 8);
            }
            _ => {}
        }
    }

    fn stairs_straight(&mut self, rng: &mut JavaRandom, door: Door) {
        self.shell(rng, [0, 0, 0, 4, 10, 7], true);
        self.door(door, 1, 7, 0);
        self.door(Door::Opening, 1, 1, 7);
        let step = facing_block(ids::STONE_STAIRS, Facing::South);
        for i in 0..6 {
            for x in 1..=3 {
                self.set(step, x, 6 - i, 1 + i);
                if i < 5 {
                    self.set(BRICK, x, 5 - i, 1 + i);
                }
            }
        }
    }

    fn crossing(&mut self, rng: &mut JavaRandom, door: Door, exits: [bool; 4]) {
        let [left_low, left_high, right_low, right_high] = exits;
        self.shell(rng, [0, 0, 0, 9, 8, 10], true);
        self.door(door, 4, 3, 0);
        if left_low {
            self.air([0, 3, 1, 0, 5, 3]);
        }
        if right_low {
            self.air([9, 3, 1, 9, 5, 3]);
        }
        if left_high {
            self.air([0, 5, 7, 0, 7, 9]);
        }
        if right_high {
            self.air([9, 5, 7, 9, 7, 9]);
        }
        self.air([5, 1, 10, 7, 3, 10]);
        self.shell(rng, [1, 2, 1, 8, 2, 6], false);
        self.fill([4, 1, 5, 4, 4, 9], BRICK);
        self.fill([8, 1, 5, 8, 4, 9], BRICK);
        self.fill([1, 4, 7, 3, 4, 9], BRICK);
        self.fill([1, 3, 5, 3, 3, 6], BRICK);
        self.fill([1, 3, 4, 3, 3, 4], SLAB);
        self.fill([1, 4, 6, 3, 4, 6], SLAB);
        self.fill([5, 1, 7, 7, 1, 8], BRICK);
        self.fill([5, 1, 9, 7, 1, 9], SLAB);
        self.fill([5, 2, 7, 7, 2, 7], SLAB);
        self.fill([4, 5, 7, 4, 5, 9], SLAB);
        self.fill([8, 5, 7, 8, 5, 9], SLAB);
        self.fill([5, 5, 7, 7, 5, 9], Block::of(ids::DOUBLE_STONE_SLAB));
        self.torch(Facing::South, 6, 5, 6);
    }

    fn chest_corridor(&mut self, rng: &mut JavaRandom, door: Door, chest_placed: &mut bool) {
        self.shell(rng, [0, 0, 0, 4, 4, 6], true);
        self.door(door, 1, 1, 0);
        self.door(Door::Opening, 1, 1, 6);
        self.fill([3, 1, 2, 3, 1, 4], BRICK);
        for (x, y, z) in [(3, 1, 1), (3, 1, 5), (3, 2, 2), (3, 2, 4)] {
            self.set(BRICK_SLAB, x, y, z);
        }
        for z in 2..=4 {
            self.set(BRICK_SLAB, 2, 1, z);
        }
        if !*chest_placed && self.clip.contains_pos(self.f.world_pos(3, 2, 3)) {
            *chest_placed = true;
            self.f.place_chest(self.w, self.clip, 3, 2, 3);
        }
    }

    fn corridor(&mut self, steps: i32) {
        for z in 0..steps {
            for x in 0..=4 {
                self.set(BRICK, x, 0, z);
                self.set(BRICK, x, 4, z);
            }
            for y in 1..=3 {
                self.set(BRICK, 0, y, z);
                for x in 1..=3 {
                    self.set(Block::AIR, x, y, z);
                }
                self.set(BRICK, 4, y, z);
            }
        }
    }

    fn library(&mut self, rng: &mut JavaRandom, door: Door, large: bool) {
        let height = if large { 11 } else { 6 };
        self.shell(rng, [0, 0, 0, 13, height - 1, 14], true);
        self.door(door, 4, 1, 0);
        let web = Block::of(ids::WEB);
        self.f.fill_maybe(self.w, self.clip, rng, 0.07, [2, 1, 1, 11, 4, 13], web, web, false, false);

        for z in 1..=13 {
            let column = if (z - 1) % 4 == 0 { PLANKS } else { BOOKSHELF };
            self.fill([1, 1, z, 1, 4, z], column);
            self.fill([12, 1, z, 12, 4, z], column);
            if column == PLANKS {
                self.torch(Facing::East, 2, 3, z);
                self.torch(Facing::West, 11, 3, z);
            }
            if large {
                self.fill([1, 6, z, 1, 9, z], column);
                self.fill([12, 6, z, 12, 9, z], column);
            }
        }
        for z in (3..12).step_by(2) {
            self.fill([3, 1, z, 4, 3, z], BOOKSHELF);
            self.fill([6, 1, z, 7, 3, z], BOOKSHELF);
            self.fill([9, 1, z, 10, 3, z], BOOKSHELF);
        }

        if large {
            self.fill([1, 5, 1, 3, 5, 13], PLANKS);
            self.fill([10, 5, 1, 12, 5, 13], PLANKS);
            self.fill([4, 5, 1, 9, 5, 2], PLANKS);
            self.fill([4, 5, 12, 9, 5, 13], PLANKS);
            for (x, z) in [(9, 11), (8, 11), (9, 10)] {
                self.set(PLANKS, x, 5, z);
            }
            self.fill([3, 6, 3, 3, 6, 11], FENCE);
            self.fill([10, 6, 3, 10, 6, 9], FENCE);
            self.fill([4, 6, 2, 9, 6, 2], FENCE);
            self.fill([4, 6, 12, 7, 6, 12], FENCE);
            for (x, z) in [(3, 2), (3, 12), (10, 2)] {
                self.set(FENCE, x, 6, z);
            }
            for i in 0..=2 {
                self.set(FENCE, 8 + i, 6, 12 - i);
                if i != 2 {
                    self.set(FENCE, 8 + i, 6, 11 - i);
                }
            }
            for y in 1..=7 {
                self.set(facing_block(ids::LADDER, Facing::South), 10, y, 13);
            }
            for (x, y) in [(6, 9), (7, 9), (6, 8), (7, 8), (6, 7), (7, 7)] {
                self.set(FENCE, x, y, 7);
            }
            for (x, z) in [(5, 7), (8, 7), (6, 6), (6, 8), (7, 6), (7, 8)] {
                self.set(FENCE, x, 7, z);
                self.set(TORCH_UP, x, 8, z);
            }
        }

        self.f.place_chest(self.w, self.clip, 3, 3, 5);
        if large {
            self.set(Block::AIR, 12, 9, 1);
            self.f.place_chest(self.w, self.clip, 12, 8, 1);
        }
    }

    fn portal_room(&mut self, rng: &mut JavaRandom, spawner_placed: &mut bool) {
        self.shell(rng, [0, 0, 0, 10, 7, 15], false);
        self.door(Door::Grates, 4, 1, 0);
        self.shell(rng, [1, 6, 1, 1, 6, 14], false);
        self.shell(rng, [9, 6, 1, 9, 6, 14], false);
        self.shell(rng, [2, 6, 1, 8, 6, 2], false);
        self.shell(rng, [2, 6, 14, 8, 6, 14], false);
        self.shell(rng, [1, 1, 1, 2, 1, 4], false);
        self.shell(rng, [8, 1, 1, 9, 1, 4], false);
        self.fill([1, 1, 1, 1, 1, 3], LAVA);
        self.fill([9, 1, 1, 9, 1, 3], LAVA);
        self.shell(rng, [3, 1, 8, 7, 1, 12], false);
        self.fill([4, 1, 9, 6, 1, 11], LAVA);
        for z in (3..14).step_by(2) {
            self.fill([0, 3, z, 0, 4, z], BARS);
            self.fill([10, 3, z, 10, 4, z], BARS);
        }
        for x in (2..9).step_by(2) {
            self.fill([x, 3, 15, x, 4, 15], BARS);
        }
        self.shell(rng, [4, 1, 5, 6, 1, 7], false);
        self.shell(rng, [4, 2, 6, 6, 2, 7], false);
        self.shell(rng, [4, 3, 7, 6, 3, 7], false);
        let step = facing_block(ids::STONE_BRICK_STAIRS, Facing::North);
        for x in 4..=6 {
            self.set(step, x, 1, 4);
            self.set(step, x, 2, 5);
            self.set(step, x, 3, 6);
        }

        let mut eyes = [false; 12];
        for eye in &mut eyes {
            *eye = rng.next_float() > 0.9;
        }
        let frames = [
            (Facing::North, 4, 8),
            (Facing::North, 5, 8),
            (Facing::North, 6, 8),
            (Facing::South, 4, 12),
            (Facing::South, 5, 12),
            (Facing::South, 6, 12),
            (Facing::East, 3, 9),
            (Facing::East, 3, 10),
            (Facing::East, 3, 11),
            (Facing::West, 7, 9),
            (Facing::West, 7, 10),
            (Facing::West, 7, 11),
        ];
        for ((dir, x, z), eye) in frames.into_iter().zip(eyes) {
            let frame = facing_block(ids::END_PORTAL_FRAME, dir);
            let meta = if eye { frame.meta | 4 } else { frame.meta };
            self.set(Block::new(ids::END_PORTAL_FRAME, meta), x, 3, z);
        }
        if eyes.iter().all(|&e| e) {
            self.fill([4, 3, 9, 6, 3, 11], Block::of(ids::END_PORTAL));
        }

        let spawner = self.f.world_pos(5, 3, 6);
        if !*spawner_placed && self.clip.contains_pos(spawner) {
            *spawner_placed = true;
            self.w.set_block(spawner.x, spawner.y, spawner.z, Block::of(ids::MOB_SPAWNER));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_chunk::Chunk;

    #[test]
    fn door_draws_one_value() {
        let mut a = JavaRandom::new(5);
        let mut b = JavaRandom::new(5);
        Door::random(&mut a);
        b.next_bounded_int(5);
        assert_eq!(a.next_int(), b.next_int());
    }

    #[test]
    fn library_shrinks_when_short() {
        let mut rng = JavaRandom::new(1);
        let tall = BoundingBox::new(0, 20, 0, 13, 30, 14);
        let short = BoundingBox::new(0, 20, 0, 13, 25, 14);
        assert!(matches!(PieceType::Library.create(&mut rng, &tall).kind, StrongholdKind::Library { large: true }));
        assert!(matches!(PieceType::Library.create(&mut rng, &short).kind, StrongholdKind::Library { large: false }));
    }

    #[test]
    fn corridor_is_hollow_inside_stone() {
        let mut chunk = Chunk::new(0, 0);
        for x in 0..16 {
            for z in 0..16 {
                for y in 0..40 {
                    chunk.set_block(x, y, z, Block::of(ids::STONE));
                }
            }
        }
        let frame = Frame::new(BoundingBox::new(2, 20, 2, 6, 24, 5), Facing::South);
        let mut piece = StrongholdPiece::new(StrongholdKind::Corridor { steps: 4 });
        let clip = BoundingBox::new(0, 1, 0, 15, 255, 15);
        let mut rng = JavaRandom::new(0);
        add_parts(&frame, &mut piece, &mut chunk, &mut rng, &clip);
        assert_eq!(WorldAccess::block(&chunk, 3, 21, 3), Block::AIR);
        assert_eq!(WorldAccess::block(&chunk, 2, 21, 3).id, ids::STONEBRICK);
        assert_eq!(WorldAccess::block(&chunk, 4, 20, 5).id, ids::STONEBRICK);
    }

    #[test]
    fn portal_room_places_one_spawner() {
        let mut chunk = Chunk::new(0, 0);
        let frame = Frame::new(BoundingBox::new(0, 10, 0, 10, 17, 15), Facing::South);
        let mut piece = StrongholdPiece::new(StrongholdKind::PortalRoom { spawner_placed: false });
        let clip = BoundingBox::new(0, 1, 0, 15, 255, 15);
        let mut rng = JavaRandom::new(3);
        add_parts(&frame, &mut piece, &mut chunk, &mut rng, &clip);
        assert!(matches!(piece.kind, StrongholdKind::PortalRoom { spawner_placed: true }));
        assert_eq!(WorldAccess::block(&chunk, 5, 13, 6).id, ids::MOB_SPAWNER);
        assert_eq!(WorldAccess::block(&chunk, 4, 13, 8).id, ids::END_PORTAL_FRAME);
    }
}
