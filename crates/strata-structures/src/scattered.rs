//! Single-piece features placed on a 32-chunk grid: desert pyramids, jungle
//! temples, swamp huts and igloos.

use strata_blocks::{Block, ids};
use strata_chunk::WorldAccess;
use strata_geom::{Axis, BoundingBox, Facing};
use strata_noise::JavaRandom;

use crate::biomes::{COLD_TAIGA, DESERT, DESERT_HILLS, ICE_PLAINS, JUNGLE, JUNGLE_HILLS, SWAMPLAND};
use crate::component::{Frame, Piece, Span, StructureComponent, facing_block};
use crate::{BiomeSource, StructureGenerator, StructureKind, StructureStart, grid_candidate, grid_rng};

pub const SCATTERED_BIOMES: [u8; 7] = [DESERT, DESERT_HILLS, JUNGLE, JUNGLE_HILLS, SWAMPLAND, ICE_PLAINS, COLD_TAIGA];

const SPACING: i32 = 32;
const SEPARATION: i32 = 8;
const SALT: i64 = 14_357_617;

pub struct ScatteredFeature {
    seed: i64,
}

impl ScatteredFeature {
    pub fn new(seed: i64) -> Self {
        Self { seed }
    }

    /// Feature built for `biome`, if any.
    pub fn kind_for(biome: u8) -> Option<ScatteredKind> {
        match biome {
            JUNGLE | JUNGLE_HILLS => Some(ScatteredKind::JungleTemple {
                main_chest: false,
                hidden_chest: false,
                traps: [false; 2],
            }),
            SWAMPLAND => Some(ScatteredKind::SwampHut),
            DESERT | DESERT_HILLS => Some(ScatteredKind::DesertPyramid { chests: [false; 4] }),
            ICE_PLAINS | COLD_TAIGA => Some(ScatteredKind::Igloo),
            _ => None,
        }
    }
}

impl StructureGenerator for ScatteredFeature {
    fn kind(&self) -> StructureKind {
        StructureKind::Scattered
    }

    fn can_spawn_at(&self, cx: i32, cz: i32, _rng: &mut JavaRandom, biomes: &dyn BiomeSource) -> bool {
        let (x, z) = grid_candidate(self.seed, cx, cz, SPACING, SPACING - SEPARATION, SALT);
        x == cx && z == cz && SCATTERED_BIOMES.contains(&biomes.biome(cx * 16 + 8, cz * 16 + 8))
    }

    fn start_at(&self, cx: i32, cz: i32, rng: &mut JavaRandom, biomes: &dyn BiomeSource) -> StructureStart {
        let mut start = StructureStart::new(StructureKind::Scattered, cx, cz);
        if let Some(kind) = Self::kind_for(biomes.biome(cx * 16 + 8, cz * 16 + 8)) {
            start.components.push(ScatteredPiece::place(rng, cx * 16, cz * 16, kind));
            start.update_bbox();
            log::debug!(target: "structures", "scattered feature at chunk ({cx}, {cz})");
        }
        start
    }

    fn stamp_rng(&self, world_seed: i64, cx: i32, cz: i32) -> JavaRandom {
        grid_rng(world_seed, cx, cz, SPACING, SPACING - SEPARATION, SALT).1
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScatteredKind {
    DesertPyramid { chests: [bool; 4] },
    JungleTemple { main_chest: bool, hidden_chest: bool, traps: [bool; 2] },
    SwampHut,
    Igloo,
}

impl ScatteredKind {
    /// Local `(width, height, depth)`.
    pub fn size(&self) -> (i32, i32, i32) {
        match self {
            ScatteredKind::DesertPyramid { .. } => (21, 15, 21),
            ScatteredKind::JungleTemple { .. } => (12, 10, 15),
            ScatteredKind::SwampHut => (7, 7, 9),
            ScatteredKind::Igloo => (7, 5, 8),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ScatteredPiece {
    pub kind: ScatteredKind,
    /// Ground height once the piece has settled onto terrain.
    pub ground: Option<i32>,
}

impl ScatteredPiece {
    /// Builds the component with a random facing at block `(x, 64, z)`.
    pub fn place(rng: &mut JavaRandom, x: i32, z: i32, kind: ScatteredKind) -> StructureComponent {
        let (w, h, d) = kind.size();
        let facing = Facing::PLANE[rng.next_bounded_int(4) as usize];
        let bbox = if facing.axis() == Axis::Z {
            BoundingBox::new(x, 64, z, x + w - 1, 64 + h - 1, z + d - 1)
        } else {
            BoundingBox::new(x, 64, z, x + d - 1, 64 + h - 1, z + w - 1)
        };
        StructureComponent { frame: Frame::new(bbox, facing), depth: 0, piece: ScatteredPiece { kind, ground: None }.into() }
    }
}

impl From<ScatteredPiece> for Piece {
    fn from(p: ScatteredPiece) -> Self {
        Piece::Scattered(p)
    }
}

/// Moves the piece onto the mean terrain height under the part of it inside
/// `clip`, once. Fails when none of it is inside.
fn settle(frame: &mut Frame, piece: &mut ScatteredPiece, w: &dyn WorldAccess, clip: &BoundingBox, dy: i32) -> bool {
    if piece.ground.is_some() {
        return true;
    }
    let Some(ground) = frame.average_ground(w, clip, 64) else {
        return false;
    };
    piece.ground = Some(ground);
    frame.bbox.offset(0, ground - frame.bbox.min_y + dy, 0);
    true
}

pub(crate) fn add_parts(
    frame: &mut Frame,
    piece: &mut ScatteredPiece,
    w: &mut dyn WorldAccess,
    rng: &mut JavaRandom,
    clip: &BoundingBox,
) -> bool {
    let dy = match piece.kind {
        ScatteredKind::DesertPyramid { .. } => None,
        ScatteredKind::Igloo => Some(-1),
        _ => Some(0),
    };
    if let Some(dy) = dy
        && !settle(frame, piece, w, clip, dy)
    {
        return false;
    }
    let mut b = Builder { f: frame, w, clip };
    match &mut piece.kind {
        ScatteredKind::DesertPyramid { chests } => b.desert_pyramid(chests),
        ScatteredKind::JungleTemple { main_chest, hidden_chest, traps } => {
            b.jungle_temple(rng, main_chest, hidden_chest, traps)
        }
        ScatteredKind::SwampHut => b.swamp_hut(),
        ScatteredKind::Igloo => b.igloo(rng),
    }
    true
}

const SANDSTONE: Block = Block::of(ids::SANDSTONE);
const CHISELED: Block = Block::new(ids::SANDSTONE, 1);
const SMOOTH: Block = Block::new(ids::SANDSTONE, 2);
const ORANGE: Block = Block::new(ids::STAINED_HARDENED_CLAY, 1);
const BLUE: Block = Block::new(ids::STAINED_HARDENED_CLAY, 11);
const MOSSY: Block = Block::of(ids::MOSSY_COBBLESTONE);
const WIRE: Block = Block::of(ids::REDSTONE_WIRE);
const SPRUCE: Block = Block::new(ids::PLANKS, 1);
const LOG: Block = Block::of(ids::LOG);
const FENCE: Block = Block::of(ids::FENCE);
const SNOW: Block = Block::of(ids::SNOW);

fn jungle_stones(rng: &mut JavaRandom, _wall: bool) -> Block {
    if rng.next_float() < 0.4 { Block::of(ids::COBBLESTONE) } else { MOSSY }
}

struct Builder<'a> {
    f: &'a Frame,
    w: &'a mut dyn WorldAccess,
    clip: &'a BoundingBox,
}

impl Builder<'_> {
    fn set(&mut self, block: Block, x: i32, y: i32, z: i32) {
        self.f.set(self.w, block, x, y, z, self.clip);
    }

    fn fill(&mut self, span: Span, block: Block) {
        self.f.fill_with(self.w, self.clip, span, block);
    }

    fn shell(&mut self, span: Span, edge: Block) {
        self.f.fill(self.w, self.clip, span, edge, Block::AIR, false);
    }

    fn air(&mut self, span: Span) {
        self.f.fill_air(self.w, self.clip, span);
    }

    fn stones(&mut self, rng: &mut JavaRandom, span: Span) {
        self.f.fill_random(self.w, self.clip, span, false, rng, &mut jungle_stones);
    }

    fn chest(&mut self, x: i32, y: i32, z: i32) -> bool {
        self.f.place_chest(self.w, self.clip, x, y, z)
    }

    fn desert_pyramid(&mut self, chests: &mut [bool; 4]) {
        let (w, d) = (21, 21);
        let stairs = |dir| facing_block(ids::SANDSTONE_STAIRS, dir);
        self.fill([0, -4, 0, w - 1, 0, d - 1], SANDSTONE);
        for i in 1..=9 {
            self.fill([i, i, i, w - 1 - i, i, d - 1 - i], SANDSTONE);
            self.air([i + 1, i, i + 1, w - 2 - i, i, d - 2 - i]);
        }
        for x in 0..w {
            for z in 0..d {
                self.f.fill_downwards(self.w, SANDSTONE, x, -5, z, self.clip);
            }
        }

        // corner towers
        for (x0, x1) in [(0, 4), (w - 5, w - 1)] {
            self.shell([x0, 0, 0, x1, 9, 4], SANDSTONE);
            self.fill([x0 + 1, 10, 1, x1 - 1, 10, 3], SANDSTONE);
            self.set(stairs(Facing::North), x0 + 2, 10, 0);
            self.set(stairs(Facing::South), x0 + 2, 10, 4);
            self.set(stairs(Facing::East), x0, 10, 2);
            self.set(stairs(Facing::West), x1, 10, 2);
        }

        // entrance
        self.shell([8, 0, 0, 12, 4, 4], SANDSTONE);
        self.air([9, 1, 0, 11, 3, 4]);
        for (x, y) in [(9, 1), (9, 2), (9, 3), (10, 3), (11, 3), (11, 2), (11, 1)] {
            self.set(SMOOTH, x, y, 1);
        }
        self.shell([4, 1, 1, 8, 3, 3], SANDSTONE);
        self.air([4, 1, 2, 8, 2, 2]);
        self.shell([12, 1, 1, 16, 3, 3], SANDSTONE);
        self.air([12, 1, 2, 16, 2, 2]);

        // hall
        self.fill([5, 4, 5, w - 6, 4, d - 6], SANDSTONE);
        self.air([9, 4, 9, 11, 4, 11]);
        for (x, z) in [(8, 8), (12, 8), (8, 12), (12, 12)] {
            self.fill([x, 1, z, x, 3, z], SMOOTH);
        }
        self.fill([1, 1, 5, 4, 4, 11], SANDSTONE);
        self.fill([w - 5, 1, 5, w - 2, 4, 11], SANDSTONE);
        self.fill([6, 7, 9, 6, 7, 11], SANDSTONE);
        self.fill([w - 7, 7, 9, w - 7, 7, 11], SANDSTONE);
        self.fill([5, 5, 9, 5, 7, 11], SMOOTH);
        self.fill([w - 6, 5, 9, w - 6, 7, 11], SMOOTH);
        for (x, y) in [(5, 5), (5, 6), (6, 6), (w - 6, 5), (w - 6, 6), (w - 7, 6)] {
            self.set(Block::AIR, x, y, 10);
        }
        self.air([2, 4, 4, 2, 6, 4]);
        self.air([w - 3, 4, 4, w - 3, 6, 4]);
        for x in [2, w - 3] {
            self.set(stairs(Facing::North), x, 4, 5);
            self.set(stairs(Facing::North), x, 3, 4);
        }
        self.fill([1, 1, 3, 2, 2, 3], SANDSTONE);
        self.fill([w - 3, 1, 3, w - 2, 2, 3], SANDSTONE);
        self.set(SANDSTONE, 1, 1, 2);
        self.set(SANDSTONE, w - 2, 1, 2);
        self.set(Block::new(ids::STONE_SLAB, 1), 1, 2, 2);
        self.set(Block::new(ids::STONE_SLAB, 1), w - 2, 2, 2);
        self.set(stairs(Facing::West), 2, 1, 2);
        self.set(stairs(Facing::East), w - 3, 1, 2);
        self.fill([4, 3, 5, 4, 3, 18], SANDSTONE);
        self.fill([w - 5, 3, 5, w - 5, 3, 17], SANDSTONE);
        self.air([3, 1, 5, 4, 2, 16]);
        self.air([w - 6, 1, 5, w - 5, 2, 16]);
        for z in (5..=17).step_by(2) {
            for x in [4, w - 5] {
                self.set(SMOOTH, x, 1, z);
                self.set(CHISELED, x, 2, z);
            }
        }

        // floor mosaic
        for (x, z) in [(10, 7), (10, 8), (9, 9), (11, 9), (8, 10), (12, 10), (7, 10), (13, 10), (9, 11), (11, 11), (10, 12), (10, 13)] {
            self.set(ORANGE, x, 0, z);
        }
        self.set(BLUE, 10, 0, 10);

        // tower facades
        let facade = [
            [SMOOTH, ORANGE, SMOOTH],
            [SMOOTH, ORANGE, SMOOTH],
            [ORANGE, CHISELED, ORANGE],
            [SMOOTH, ORANGE, SMOOTH],
            [ORANGE, CHISELED, ORANGE],
            [ORANGE, ORANGE, ORANGE],
            [SMOOTH, SMOOTH, SMOOTH],
        ];
        for x in [0, w - 1] {
            for (i, row) in facade.iter().enumerate() {
                for (dz, &block) in row.iter().enumerate() {
                    self.set(block, x, 2 + i as i32, 1 + dz as i32);
                }
            }
        }
        for x in [2, w - 3] {
            for (i, row) in facade.iter().enumerate() {
                for (dx, &block) in row.iter().enumerate() {
                    self.set(block, x - 1 + dx as i32, 2 + i as i32, 0);
                }
            }
        }
        self.fill([8, 4, 0, 12, 6, 0], SMOOTH);
        self.set(Block::AIR, 8, 6, 0);
        self.set(Block::AIR, 12, 6, 0);
        self.set(ORANGE, 9, 5, 0);
        self.set(CHISELED, 10, 5, 0);
        self.set(ORANGE, 11, 5, 0);

        // treasure chamber
        self.fill([8, -14, 8, 12, -11, 12], SMOOTH);
        self.fill([8, -10, 8, 12, -10, 12], CHISELED);
        self.fill([8, -9, 8, 12, -9, 12], SMOOTH);
        self.fill([8, -8, 8, 12, -1, 12], SANDSTONE);
        self.air([9, -11, 9, 11, -1, 11]);
        self.set(Block::of(ids::STONE_PRESSURE_PLATE), 10, -11, 10);
        self.shell([9, -13, 9, 11, -13, 11], Block::of(ids::TNT));
        for (dx, dz) in [(-2, 0), (2, 0), (0, -2), (0, 2)] {
            self.set(Block::AIR, 10 + dx, -11, 10 + dz);
            self.set(Block::AIR, 10 + dx, -10, 10 + dz);
            self.set(CHISELED, 10 + dx + dx.signum(), -10, 10 + dz + dz.signum());
            self.set(SMOOTH, 10 + dx + dx.signum(), -11, 10 + dz + dz.signum());
        }
        for (i, facing) in Facing::PLANE.into_iter().enumerate() {
            if !chests[i] {
                let (dx, dz) = facing.step();
                chests[i] = self.chest(10 + dx * 2, -11, 10 + dz * 2);
            }
        }
    }

    fn jungle_temple(&mut self, rng: &mut JavaRandom, main_chest: &mut bool, hidden_chest: &mut bool, traps: &mut [bool; 2]) {
        let (w, d) = (12, 15);
        let stairs = |dir| facing_block(ids::STONE_STAIRS, dir);
        self.stones(rng, [0, -4, 0, w - 1, 0, d - 1]);
        for span in [
            [2, 1, 2, 9, 2, 2],
            [2, 1, 12, 9, 2, 12],
            [2, 1, 3, 2, 2, 11],
            [9, 1, 3, 9, 2, 11],
            [1, 3, 1, 10, 6, 1],
            [1, 3, 13, 10, 6, 13],
            [1, 3, 2, 1, 6, 12],
            [10, 3, 2, 10, 6, 12],
            [2, 3, 2, 9, 3, 12],
            [2, 6, 2, 9, 6, 12],
            [3, 7, 3, 8, 7, 11],
            [4, 8, 4, 7, 8, 10],
        ] {
            self.stones(rng, span);
        }
        for span in [
            [3, 1, 3, 8, 2, 11],
            [4, 3, 6, 7, 3, 9],
            [2, 4, 2, 9, 5, 12],
            [4, 6, 5, 7, 6, 9],
            [5, 7, 6, 6, 7, 8],
            [5, 1, 2, 6, 2, 2],
            [5, 2, 12, 6, 2, 12],
            [5, 5, 1, 6, 5, 1],
            [5, 5, 13, 6, 5, 13],
        ] {
            self.air(span);
        }
        for (x, z) in [(1, 5), (10, 5), (1, 9), (10, 9)] {
            self.set(Block::AIR, x, 5, z);
        }
        for z in [0, 14] {
            for x in [2, 4, 7, 9] {
                self.stones(rng, [x, 4, z, x, 5, z]);
            }
        }
        self.stones(rng, [5, 6, 0, 6, 6, 0]);
        for x in [0, 11] {
            for z in (2..=12).step_by(2) {
                self.stones(rng, [x, 4, z, x, 5, z]);
            }
            self.stones(rng, [x, 6, 5, x, 6, 5]);
            self.stones(rng, [x, 6, 9, x, 6, 9]);
        }
        for span in [
            [2, 7, 2, 2, 9, 2],
            [9, 7, 2, 9, 9, 2],
            [2, 7, 12, 2, 9, 12],
            [9, 7, 12, 9, 9, 12],
            [4, 9, 4, 4, 9, 4],
            [7, 9, 4, 7, 9, 4],
            [4, 9, 10, 4, 9, 10],
            [7, 9, 10, 7, 9, 10],
            [5, 9, 7, 6, 9, 7],
        ] {
            self.stones(rng, span);
        }
        self.set(stairs(Facing::North), 5, 9, 6);
        self.set(stairs(Facing::North), 6, 9, 6);
        self.set(stairs(Facing::South), 5, 9, 8);
        self.set(stairs(Facing::South), 6, 9, 8);
        for x in 4..=7 {
            self.set(stairs(Facing::North), x, 0, 0);
        }
        for x in [4, 7] {
            self.set(stairs(Facing::North), x, 1, 8);
            self.set(stairs(Facing::North), x, 2, 9);
            self.set(stairs(Facing::North), x, 3, 10);
        }
        self.stones(rng, [4, 1, 9, 4, 1, 9]);
        self.stones(rng, [7, 1, 9, 7, 1, 9]);
        self.stones(rng, [4, 1, 10, 7, 2, 10]);
        self.stones(rng, [5, 4, 5, 6, 4, 5]);
        self.set(stairs(Facing::East), 4, 4, 5);
        self.set(stairs(Facing::West), 7, 4, 5);
        for k in 0..4 {
            self.set(stairs(Facing::South), 5, -k, 6 + k);
            self.set(stairs(Facing::South), 6, -k, 6 + k);
            self.air([5, -k, 7 + k, 6, -k, 9 + k]);
        }

        // lower floor
        self.air([1, -3, 12, 10, -1, 13]);
        self.air([1, -3, 1, 3, -1, 13]);
        self.air([1, -3, 1, 9, -1, 5]);
        for z in (1..=13).step_by(2) {
            self.stones(rng, [1, -3, z, 1, -2, z]);
        }
        for z in (2..=12).step_by(2) {
            self.stones(rng, [1, -1, z, 3, -1, z]);
        }
        self.stones(rng, [2, -2, 1, 5, -2, 1]);
        self.stones(rng, [7, -2, 1, 9, -2, 1]);
        self.stones(rng, [6, -3, 1, 6, -3, 1]);
        self.stones(rng, [6, -1, 1, 6, -1, 1]);

        // arrow traps
        let hook = |dir| Block::new(ids::TRIPWIRE_HOOK, facing_block(ids::TRIPWIRE_HOOK, dir).meta | 4);
        let tripwire = Block::new(ids::TRIPWIRE, 4);
        self.set(hook(Facing::East), 1, -3, 8);
        self.set(hook(Facing::West), 4, -3, 8);
        self.set(tripwire, 2, -3, 8);
        self.set(tripwire, 3, -3, 8);
        for (x, z) in [(5, 7), (5, 6), (5, 5), (5, 4), (5, 3), (5, 2), (5, 1), (4, 1), (3, 1)] {
            self.set(WIRE, x, -3, z);
        }
        if !traps[0] {
            traps[0] = self.dispenser(3, -2, 1, Facing::North);
        }
        self.set(Block::new(ids::VINE, 1), 3, -2, 2);
        self.set(hook(Facing::North), 7, -3, 1);
        self.set(hook(Facing::South), 7, -3, 5);
        for z in 2..=4 {
            self.set(tripwire, 7, -3, z);
        }
        self.set(WIRE, 8, -3, 6);
        self.set(WIRE, 9, -3, 6);
        self.set(WIRE, 9, -3, 5);
        self.set(MOSSY, 9, -3, 4);
        self.set(WIRE, 9, -2, 4);
        if !traps[1] {
            traps[1] = self.dispenser(9, -2, 3, Facing::West);
        }
        self.set(Block::new(ids::VINE, 8), 8, -1, 3);
        self.set(Block::new(ids::VINE, 8), 8, -2, 3);
        if !*main_chest {
            *main_chest = self.chest(8, -3, 3);
        }
        for (x, y, z) in [(9, -3, 2), (8, -3, 1), (4, -3, 5), (5, -2, 5), (5, -1, 5), (6, -3, 5), (7, -2, 5), (7, -1, 5), (8, -3, 5)] {
            self.set(MOSSY, x, y, z);
        }
        self.stones(rng, [9, -1, 1, 9, -1, 5]);

        // lever puzzle
        self.air([8, -3, 8, 10, -1, 10]);
        for x in 8..=10 {
            self.set(Block::new(ids::STONEBRICK, 3), x, -2, 11);
            self.set(facing_block(ids::LEVER, Facing::North), x, -2, 12);
        }
        self.stones(rng, [8, -3, 8, 8, -3, 10]);
        self.stones(rng, [10, -3, 8, 10, -3, 10]);
        self.set(MOSSY, 10, -2, 9);
        self.set(WIRE, 8, -2, 9);
        self.set(WIRE, 8, -2, 10);
        self.set(WIRE, 10, -1, 9);
        self.set(Block::new(ids::STICKY_PISTON, 1), 9, -2, 8);
        self.set(facing_block(ids::STICKY_PISTON, Facing::West), 10, -2, 8);
        self.set(facing_block(ids::STICKY_PISTON, Facing::West), 10, -1, 8);
        self.set(facing_block(ids::UNPOWERED_REPEATER, Facing::North), 10, -2, 10);
        if !*hidden_chest {
            *hidden_chest = self.chest(9, -3, 10);
        }
    }

    fn dispenser(&mut self, x: i32, y: i32, z: i32, dir: Facing) -> bool {
        let p = self.f.world_pos(x, y, z);
        if !self.clip.contains_pos(p) || self.w.block(p.x, p.y, p.z).id == ids::DISPENSER {
            return false;
        }
        self.set(facing_block(ids::DISPENSER, dir), x, y, z);
        true
    }

    fn swamp_hut(&mut self) {
        let stairs = |dir| facing_block(ids::SPRUCE_STAIRS, dir);
        for span in [
            [1, 1, 1, 5, 1, 7],
            [1, 4, 2, 5, 4, 7],
            [2, 1, 0, 4, 1, 0],
            [2, 2, 2, 3, 3, 2],
            [1, 2, 3, 1, 3, 6],
            [5, 2, 3, 5, 3, 6],
            [2, 2, 7, 4, 3, 7],
        ] {
            self.fill(span, SPRUCE);
        }
        for (x, z) in [(1, 2), (5, 2), (1, 7), (5, 7)] {
            self.fill([x, 0, z, x, 3, z], LOG);
        }
        self.set(FENCE, 2, 3, 2);
        self.set(FENCE, 3, 3, 7);
        self.set(Block::AIR, 1, 3, 4);
        self.set(Block::AIR, 5, 3, 4);
        self.set(Block::AIR, 5, 3, 5);
        self.set(Block::of(ids::FLOWER_POT), 1, 3, 5);
        self.set(Block::of(ids::CRAFTING_TABLE), 3, 2, 6);
        self.set(Block::of(ids::CAULDRON), 4, 2, 6);
        self.set(FENCE, 1, 2, 1);
        self.set(FENCE, 5, 2, 1);
        self.fill([0, 4, 1, 6, 4, 1], stairs(Facing::North));
        self.fill([0, 4, 2, 0, 4, 7], stairs(Facing::East));
        self.fill([6, 4, 2, 6, 4, 7], stairs(Facing::West));
        self.fill([0, 4, 8, 6, 4, 8], stairs(Facing::South));
        for z in [2, 7] {
            for x in [1, 5] {
                self.f.fill_downwards(self.w, LOG, x, -1, z, self.clip);
            }
        }
    }

    fn igloo(&mut self, rng: &mut JavaRandom) {
        let mirrored = rng.next_bounded_int(4) % 2 == 1;
        self.fill([1, 0, 1, 5, 0, 7], SNOW);
        self.shell([0, 1, 1, 6, 2, 7], SNOW);
        self.shell([1, 3, 2, 5, 3, 6], SNOW);
        self.fill([2, 4, 3, 4, 4, 5], SNOW);
        self.air([1, 1, 2, 5, 2, 6]);
        self.air([2, 3, 3, 4, 3, 5]);
        self.fill([2, 1, 0, 4, 2, 0], SNOW);
        self.air([3, 1, 0, 3, 2, 1]);
        self.set(Block::of(ids::ICE), 0, 2, 4);
        self.set(Block::of(ids::ICE), 6, 2, 4);
        let (bed_x, table_x) = if mirrored { (5, 1) } else { (1, 5) };
        self.set(Block::new(ids::CARPET, 14), 3, 1, 4);
        self.set(Block::of(ids::CRAFTING_TABLE), table_x, 1, 6);
        self.set(facing_block(ids::FURNACE, Facing::South), table_x, 1, 5);
        self.set(facing_block(ids::BED, Facing::South), bed_x, 1, 5);
        self.set(Block::new(ids::BED, facing_block(ids::BED, Facing::South).meta | 8), bed_x, 1, 6);
        self.set(facing_block(ids::REDSTONE_TORCH, Facing::South), 3, 2, 6);

        if rng.next_double() >= 0.5 {
            self.set(Block::of(ids::CARPET), 3, 0, 5);
            return;
        }
        let flights = rng.next_bounded_int(8) + 4;
        let bottom = -3 * flights - 1;
        self.set(Block::of(ids::TRAPDOOR), 3, 0, 5);
        let brick = Block::of(ids::STONEBRICK);
        for y in bottom..0 {
            self.shell([2, y, 4, 4, y, 6], brick);
            self.set(facing_block(ids::LADDER, Facing::North), 3, y, 5);
        }
        let floor = bottom - 4;
        self.shell([0, floor, 1, 6, bottom, 7], brick);
        self.air([1, floor + 1, 2, 5, bottom - 1, 6]);
        for y in floor + 1..bottom {
            self.set(facing_block(ids::LADDER, Facing::North), 3, y, 5);
        }
        self.set(Block::of(ids::BREWING_STAND), 1, floor + 1, 2);
        self.set(Block::of(ids::CAULDRON), 5, floor + 1, 2);
        self.set(facing_block(ids::REDSTONE_TORCH, Facing::South), 3, floor + 2, 2);
        self.chest(5, floor + 1, 6);
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

    fn flat(top: i32) -> Chunk {
        let mut c = Chunk::new(0, 0);
        for x in 0..16 {
            for z in 0..16 {
                for y in 0..=top {
                    c.set_block(x, y, z, Block::of(if y == top { ids::GRASS } else { ids::STONE }));
                }
            }
        }
        c
    }

    #[test]
    fn one_candidate_per_grid_cell_in_matching_biome() {
        let f = ScatteredFeature::new(12345);
        let mut rng = JavaRandom::new(0);
        let hits: Vec<_> = (0..32)
            .flat_map(|x| (0..32).map(move |z| (x, z)))
            .filter(|&(x, z)| f.can_spawn_at(x, z, &mut JavaRandom::new(0), &Fixed(DESERT)))
            .collect();
        assert_eq!(hits.len(), 1);
        let (x, z) = hits[0];
        assert!(x < 24 && z < 24);
        assert!(!f.can_spawn_at(x, z, &mut rng, &Fixed(crate::biomes::PLAINS)));
    }

    #[test]
    fn biome_picks_the_feature_and_its_footprint() {
        let f = ScatteredFeature::new(1);
        let mut rng = JavaRandom::new(9);
        let start = f.start_at(2, 3, &mut rng, &Fixed(JUNGLE));
        assert_eq!(start.components.len(), 1);
        let bb = start.components[0].frame.bbox;
        assert_eq!((bb.min_x, bb.min_y, bb.min_z), (32, 64, 48));
        assert_eq!(bb.y_size(), 10);
        assert_eq!(bb.x_size() * bb.z_size(), 12 * 15);
        assert!(f.start_at(2, 3, &mut rng, &Fixed(crate::biomes::PLAINS)).components.is_empty());
    }

    #[test]
    fn swamp_hut_settles_on_ground_once() {
        let mut chunk = flat(70);
        let mut rng = JavaRandom::new(4);
        let mut c = ScatteredPiece::place(&mut rng, 2, 2, ScatteredKind::SwampHut);
        let clip = BoundingBox::new(0, 1, 0, 15, 255, 15);
        assert!(c.add_parts(&mut chunk, &mut rng, &clip));
        assert_eq!(c.frame.bbox.min_y, 71);
        assert!(c.add_parts(&mut chunk, &mut rng, &clip));
        assert_eq!(c.frame.bbox.min_y, 71);
    }

    #[test]
    fn pyramid_hides_tnt_under_the_plate() {
        let mut chunk = flat(63);
        let mut rng = JavaRandom::new(4);
        let kind = ScatteredKind::DesertPyramid { chests: [false; 4] };
        let mut c = StructureComponent {
            frame: Frame::new(BoundingBox::new(-5, 64, -5, 15, 78, 15), Facing::South),
            depth: 0,
            piece: ScatteredPiece { kind, ground: None }.into(),
        };
        let clip = BoundingBox::new(0, 1, 0, 15, 255, 15);
        assert!(c.add_parts(&mut chunk, &mut rng, &clip));
        let plate = c.frame.world_pos(10, -11, 10);
        let tnt = c.frame.world_pos(10, -13, 10);
        assert_eq!(WorldAccess::block(&chunk, plate.x, plate.y, plate.z).id, ids::STONE_PRESSURE_PLATE);
        assert_eq!(WorldAccess::block(&chunk, tnt.x, tnt.y, tnt.z).id, ids::TNT);
        let Piece::Scattered(p) = &c.piece else { panic!("not a scattered piece") };
        assert_eq!(p.kind, ScatteredKind::DesertPyramid { chests: [true; 4] });
    }

    #[test]
    fn features_outside_the_clip_refuse_to_settle() {
        let mut chunk = flat(64);
        let mut rng = JavaRandom::new(4);
        let mut c = ScatteredPiece::place(&mut rng, 200, 200, ScatteredKind::Igloo);
        let clip = BoundingBox::new(0, 1, 0, 15, 255, 15);
        assert!(!c.add_parts(&mut chunk, &mut rng, &clip));
    }
}
