//! Village piece kinds, their construction-time draws and block layouts.

use strata_blocks::{Block, ids};
use strata_chunk::WorldAccess;
use strata_geom::{BoundingBox, Facing};
use strata_noise::JavaRandom;
use strata_noise::math::rand_range as range;

use crate::SEA_LEVEL;
use crate::component::{Frame, Span, facing_block};

/// Regional material set a village is built from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VillageStyle {
    #[default]
    Plains,
    Desert,
    Savanna,
    Taiga,
}

impl VillageStyle {
    pub fn for_biome(biome: u8) -> Self {
        use crate::biomes::*;
        match biome {
            DESERT | DESERT_HILLS | MUTATED_DESERT => VillageStyle::Desert,
            SAVANNA | SAVANNA_PLATEAU | MUTATED_SAVANNA | MUTATED_SAVANNA_ROCK => VillageStyle::Savanna,
            TAIGA | TAIGA_HILLS | COLD_TAIGA | COLD_TAIGA_HILLS | REDWOOD_TAIGA | REDWOOD_TAIGA_HILLS
            | MUTATED_TAIGA | MUTATED_TAIGA_COLD | MUTATED_REDWOOD_TAIGA | MUTATED_REDWOOD_TAIGA_HILLS => {
                VillageStyle::Taiga
            }
            _ => VillageStyle::Plains,
        }
    }

    /// Substitutes the regional variant of a building block.
    pub fn swap(self, b: Block) -> Block {
        match self {
            VillageStyle::Plains => b,
            VillageStyle::Desert => match b.id {
                ids::LOG | ids::LOG2 | ids::COBBLESTONE | ids::GRAVEL => Block::of(ids::SANDSTONE),
                ids::PLANKS => Block::new(ids::SANDSTONE, 2),
                ids::OAK_STAIRS | ids::STONE_STAIRS => Block::new(ids::SANDSTONE_STAIRS, b.meta),
                _ => b,
            },
            VillageStyle::Taiga => match b.id {
                ids::LOG | ids::LOG2 => Block::new(ids::LOG, (b.meta & 12) | 1),
                ids::PLANKS => Block::new(ids::PLANKS, 1),
                ids::OAK_STAIRS => Block::new(ids::SPRUCE_STAIRS, b.meta),
                ids::FENCE => Block::of(ids::SPRUCE_FENCE),
                _ => b,
            },
            VillageStyle::Savanna => match b.id {
                ids::LOG | ids::LOG2 => Block::new(ids::LOG2, b.meta & 12),
                ids::PLANKS => Block::new(ids::PLANKS, 4),
                ids::OAK_STAIRS => Block::new(ids::ACACIA_STAIRS, b.meta),
                ids::FENCE => Block::of(ids::ACACIA_FENCE),
                _ => b,
            },
        }
    }

    pub fn door(self) -> u8 {
        match self {
            VillageStyle::Savanna => ids::ACACIA_DOOR,
            VillageStyle::Taiga => ids::SPRUCE_DOOR,
            _ => ids::WOODEN_DOOR,
        }
    }
}

/// Buildings a village factory can pick, in weight-list order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HouseType {
    House4Garden,
    Church,
    Library,
    WoodHut,
    Hall,
    Field1,
    Field2,
    Smithy,
    House3,
}

impl HouseType {
    pub const ALL: [HouseType; 9] = [
        HouseType::House4Garden,
        HouseType::Church,
        HouseType::Library,
        HouseType::WoodHut,
        HouseType::Hall,
        HouseType::Field1,
        HouseType::Field2,
        HouseType::Smithy,
        HouseType::House3,
    ];

    /// `(width, height, depth)` of the building in its local frame.
    pub fn size(self) -> (i32, i32, i32) {
        match self {
            HouseType::House4Garden => (5, 6, 5),
            HouseType::Church => (5, 12, 9),
            HouseType::Library => (9, 9, 6),
            HouseType::WoodHut => (4, 6, 5),
            HouseType::Hall => (9, 7, 11),
            HouseType::Field1 => (13, 4, 9),
            HouseType::Field2 => (7, 4, 9),
            HouseType::Smithy => (10, 6, 7),
            HouseType::House3 => (9, 7, 12),
        }
    }

    /// `(weight, limit)` for a village of the given size class.
    pub fn weight(self, rng: &mut JavaRandom, size: i32) -> (i32, i32) {
        match self {
            HouseType::House4Garden => (4, range(rng, 2 + size, 4 + size * 2)),
            HouseType::Church => (20, range(rng, size, 1 + size)),
            HouseType::Library => (20, range(rng, size, 2 + size)),
            HouseType::WoodHut => (3, range(rng, 2 + size, 5 + size * 3)),
            HouseType::Hall => (15, range(rng, size, 2 + size)),
            HouseType::Field1 => (3, range(rng, 1 + size, 4 + size)),
            HouseType::Field2 => (3, range(rng, 2 + size, 4 + size * 2)),
            HouseType::Smithy => (15, range(rng, 0, 1 + size)),
            HouseType::House3 => (8, range(rng, size, 3 + size * 2)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VillageKind {
    Well,
    Road { length: i32 },
    Torch,
    House4Garden { roof_terrace: bool },
    Church,
    Library,
    WoodHut { tall: bool, table: i32 },
    Hall,
    Field1 { crops: [u8; 4] },
    Field2 { crops: [u8; 2] },
    Smithy { chest_placed: bool },
    House3,
}

#[derive(Clone, Debug)]
pub struct VillagePiece {
    pub kind: VillageKind,
    pub style: VillageStyle,
    pub zombie: bool,
    /// Ground level the piece was settled on; negative until first stamped.
    pub avg_ground: i32,
}

impl VillagePiece {
    pub fn new(kind: VillageKind, style: VillageStyle, zombie: bool) -> Self {
        Self { kind, style, zombie, avg_ground: -1 }
    }

    pub fn is_road(&self) -> bool {
        matches!(self.kind, VillageKind::Road { .. })
    }

    /// Builds a house, drawing whatever the building decides at construction.
    pub fn house(ty: HouseType, style: VillageStyle, zombie: bool, rng: &mut JavaRandom) -> Self {
        let kind = match ty {
            HouseType::House4Garden => VillageKind::House4Garden { roof_terrace: rng.next_bool() },
            HouseType::Church => VillageKind::Church,
            HouseType::Library => VillageKind::Library,
            HouseType::WoodHut => {
                let tall = rng.next_bool();
                VillageKind::WoodHut { tall, table: rng.next_bounded_int(3) }
            }
            HouseType::Hall => VillageKind::Hall,
            HouseType::Field1 => VillageKind::Field1 {
                crops: [random_crop(rng), random_crop(rng), random_crop(rng), random_crop(rng)],
            },
            HouseType::Field2 => VillageKind::Field2 { crops: [random_crop(rng), random_crop(rng)] },
            HouseType::Smithy => VillageKind::Smithy { chest_placed: false },
            HouseType::House3 => VillageKind::House3,
        };
        Self::new(kind, style, zombie)
    }

    /// Height used when settling the piece onto the average ground level.
    fn settle_height(&self) -> Option<i32> {
        Some(match &self.kind {
            VillageKind::Road { .. } => return None,
            VillageKind::Well | VillageKind::Torch => 4,
            VillageKind::House4Garden { .. } | VillageKind::WoodHut { .. } | VillageKind::Smithy { .. } => 6,
            VillageKind::Church => 12,
            VillageKind::Library => 9,
            VillageKind::Hall | VillageKind::House3 => 7,
            VillageKind::Field1 { .. } | VillageKind::Field2 { .. } => 4,
        })
    }
}

fn random_crop(rng: &mut JavaRandom) -> u8 {
    match rng.next_bounded_int(10) {
        0 | 1 => ids::CARROTS,
        2 | 3 => ids::POTATOES,
        4 => ids::BEETROOTS,
        _ => ids::WHEAT,
    }
}

fn crop_age(rng: &mut JavaRandom, crop: u8) -> u8 {
    let max = if crop == ids::BEETROOTS { 3 } else { 7 };
    range(rng, max / 3, max) as u8
}

pub(crate) fn add_parts(
    frame: &mut Frame,
    piece: &mut VillagePiece,
    w: &mut dyn WorldAccess,
    rng: &mut JavaRandom,
    clip: &BoundingBox,
) -> bool {
    if let Some(height) = piece.settle_height()
        && piece.avg_ground < 0
    {
        let Some(avg) = frame.average_ground(w, clip, SEA_LEVEL) else {
            return true;
        };
        piece.avg_ground = avg;
        frame.bbox.offset(0, avg - frame.bbox.max_y + height - 1, 0);
    }
    let mut p = Painter { frame, w, clip, style: piece.style, zombie: piece.zombie };
    match &mut piece.kind {
        VillageKind::Well => p.well(),
        VillageKind::Road { .. } => p.road(),
        VillageKind::Torch => p.lamp(),
        VillageKind::House4Garden { roof_terrace } => p.house4_garden(*roof_terrace),
        VillageKind::Church => p.church(),
        VillageKind::Library => p.library(),
        VillageKind::WoodHut { tall, table } => p.wood_hut(*tall, *table),
        VillageKind::Hall => p.hall(),
        VillageKind::Field1 { crops } => p.field(rng, crops),
        VillageKind::Field2 { crops } => p.field(rng, crops),
        VillageKind::Smithy { chest_placed } => p.smithy(chest_placed),
        VillageKind::House3 => p.house3(),
    }
    true
}

const fn b(id: u8) -> Block {
    Block::of(id)
}

const COBBLE: Block = b(ids::COBBLESTONE);
const PLANKS: Block = b(ids::PLANKS);
const LOG: Block = b(ids::LOG);
const FENCE: Block = b(ids::FENCE);
const GLASS_PANE: Block = b(ids::GLASS_PANE);
const PLATE: Block = b(ids::WOODEN_PRESSURE_PLATE);
const DOUBLE_SLAB: Block = b(ids::DOUBLE_STONE_SLAB);

/// Layout writer bound to one piece, one clip box and one material style.
struct Painter<'a> {
    frame: &'a Frame,
    w: &'a mut dyn WorldAccess,
    clip: &'a BoundingBox,
    style: VillageStyle,
    zombie: bool,
}

impl Painter<'_> {
    fn set(&mut self, block: Block, x: i32, y: i32, z: i32) {
        let block = self.style.swap(block);
        self.frame.set(self.w, block, x, y, z, self.clip);
    }

    fn get(&self, x: i32, y: i32, z: i32) -> Block {
        self.frame.get(&*self.w, x, y, z, self.clip)
    }

    fn fill(&mut self, span: Span, block: Block) {
        let block = self.style.swap(block);
        self.frame.fill_with(self.w, self.clip, span, block);
    }

    fn shell(&mut self, span: Span, edge: Block, inside: Block) {
        let (edge, inside) = (self.style.swap(edge), self.style.swap(inside));
        self.frame.fill(self.w, self.clip, span, edge, inside, false);
    }

    fn air(&mut self, span: Span) {
        self.frame.fill_air(self.w, self.clip, span);
    }

    fn stairs(&mut self, id: u8, dir: Facing, x: i32, y: i32, z: i32) {
        self.set(facing_block(id, dir), x, y, z);
    }

    fn torch(&mut self, dir: Facing, x: i32, y: i32, z: i32) {
        if !self.zombie {
            self.set(facing_block(ids::TORCH, dir), x, y, z);
        }
    }

    fn door(&mut self, x: i32, y: i32, z: i32, dir: Facing) {
        if !self.zombie {
            self.frame.place_door(self.w, self.clip, self.style.door(), x, y, z, dir);
        }
    }

    /// Front step below a door when the ground drops away in front of it.
    fn doorstep(&mut self, x: i32) {
        if self.get(x, 0, -1).is_air() && !self.get(x, -1, -1).is_air() {
            self.stairs(ids::STONE_STAIRS, Facing::North, x, 0, -1);
            if self.get(x, -1, -1).id == ids::GRASS_PATH {
                self.set(b(ids::GRASS), x, -1, -1);
            }
        }
    }

    /// Clears overhangs above the footprint and extends foundations below it.
    fn settle(&mut self, xs: core::ops::Range<i32>, zs: core::ops::Range<i32>, clear_from: Option<i32>, base: Block) {
        let base = self.style.swap(base);
        for z in zs {
            for x in xs.clone() {
                if let Some(y) = clear_from {
                    self.frame.clear_upwards(self.w, x, y, z, self.clip);
                }
                self.frame.fill_downwards(self.w, base, x, -1, z, self.clip);
            }
        }
    }

    fn well(&mut self) {
        self.shell([1, 0, 1, 4, 12, 4], COBBLE, b(ids::FLOWING_WATER));
        for (x, z) in [(2, 2), (3, 2), (2, 3), (3, 3)] {
            self.set(Block::AIR, x, 12, z);
        }
        for (x, z) in [(1, 1), (4, 1), (1, 4), (4, 4)] {
            self.set(FENCE, x, 13, z);
            self.set(FENCE, x, 14, z);
        }
        self.fill([1, 15, 1, 4, 15, 4], COBBLE);
        for z in 0..=5 {
            for x in 0..=5 {
                if x == 0 || x == 5 || z == 0 || z == 5 {
                    self.set(COBBLE, x, 11, z);
                    self.frame.clear_upwards(self.w, x, 12, z, self.clip);
                }
            }
        }
    }

    fn road(&mut self) {
        let path = b(ids::GRASS_PATH);
        let planks = self.style.swap(PLANKS);
        let gravel = self.style.swap(b(ids::GRAVEL));
        let cobble = self.style.swap(COBBLE);
        let bb = self.frame.bbox;
        for x in bb.min_x..=bb.max_x {
            for z in bb.min_z..=bb.max_z {
                if !self.clip.contains(x, 64, z) {
                    continue;
                }
                let mut y = (self.w.top_solid_or_liquid(x, z) - 1).max(SEA_LEVEL - 1);
                while y >= SEA_LEVEL - 1 {
                    let here = self.w.block(x, y, z);
                    if here.id == ids::GRASS && self.w.is_air(x, y + 1, z) {
                        self.w.set_block(x, y, z, path);
                        break;
                    }
                    if here.material().is_liquid() {
                        self.w.set_block(x, y, z, planks);
                        break;
                    }
                    if matches!(here.id, ids::SAND | ids::SANDSTONE | ids::RED_SANDSTONE) {
                        self.w.set_block(x, y, z, gravel);
                        self.w.set_block(x, y - 1, z, cobble);
                        break;
                    }
                    y -= 1;
                }
            }
        }
    }

    fn lamp(&mut self) {
        self.air([0, 0, 0, 2, 3, 1]);
        for y in 0..=2 {
            self.set(FENCE, 1, y, 0);
        }
        self.set(Block::new(ids::WOOL, 15), 1, 3, 0);
        self.torch(Facing::East, 2, 3, 0);
        self.torch(Facing::North, 1, 3, 1);
        self.torch(Facing::West, 0, 3, 0);
        self.torch(Facing::South, 1, 3, -1);
    }

    fn library(&mut self) {
        self.air([1, 1, 1, 7, 5, 4]);
        self.fill([0, 0, 0, 8, 0, 5], COBBLE);
        self.fill([0, 5, 0, 8, 5, 5], COBBLE);
        self.fill([0, 6, 1, 8, 6, 4], COBBLE);
        self.fill([0, 7, 2, 8, 7, 3], COBBLE);
        for i in -1..=2 {
            for x in 0..=8 {
                self.stairs(ids::OAK_STAIRS, Facing::North, x, 6 + i, i);
                self.stairs(ids::OAK_STAIRS, Facing::South, x, 6 + i, 5 - i);
            }
        }
        self.fill([0, 1, 0, 0, 1, 5], COBBLE);
        self.fill([1, 1, 5, 8, 1, 5], COBBLE);
        self.fill([8, 1, 0, 8, 1, 4], COBBLE);
        self.fill([2, 1, 0, 7, 1, 0], COBBLE);
        self.fill([0, 2, 0, 0, 4, 0], COBBLE);
        self.fill([0, 2, 5, 0, 4, 5], COBBLE);
        self.fill([8, 2, 5, 8, 4, 5], COBBLE);
        self.fill([8, 2, 0, 8, 4, 0], COBBLE);
        self.fill([0, 2, 1, 0, 4, 4], PLANKS);
        self.fill([1, 2, 5, 7, 4, 5], PLANKS);
        self.fill([8, 2, 1, 8, 4, 4], PLANKS);
        self.fill([1, 2, 0, 7, 4, 0], PLANKS);
        for (x, y, z) in [
            (4, 2, 0),
            (5, 2, 0),
            (6, 2, 0),
            (4, 3, 0),
            (5, 3, 0),
            (6, 3, 0),
            (0, 2, 2),
            (0, 2, 3),
            (0, 3, 2),
            (0, 3, 3),
            (8, 2, 2),
            (8, 2, 3),
            (8, 3, 2),
            (8, 3, 3),
            (2, 2, 5),
            (3, 2, 5),
            (5, 2, 5),
            (6, 2, 5),
        ] {
            self.set(GLASS_PANE, x, y, z);
        }
        self.fill([1, 4, 1, 7, 4, 1], PLANKS);
        self.fill([1, 4, 4, 7, 4, 4], PLANKS);
        self.fill([1, 3, 4, 7, 3, 4], b(ids::BOOKSHELF));
        self.set(PLANKS, 7, 1, 4);
        self.stairs(ids::OAK_STAIRS, Facing::East, 7, 1, 3);
        for x in 3..=6 {
            self.stairs(ids::OAK_STAIRS, Facing::North, x, 1, 4);
        }
        self.set(FENCE, 6, 1, 3);
        self.set(PLATE, 6, 2, 3);
        self.set(FENCE, 4, 1, 3);
        self.set(PLATE, 4, 2, 3);
        self.set(b(ids::CRAFTING_TABLE), 7, 1, 1);
        self.air([1, 1, 0, 1, 2, 0]);
        self.door(1, 1, 0, Facing::North);
        self.doorstep(1);
        self.settle(0..9, 0..6, Some(9), COBBLE);
    }

    fn field(&mut self, rng: &mut JavaRandom, crops: &[u8]) {
        let width = crops.len() as i32 * 3;
        self.air([0, 1, 0, width, 4, 8]);
        for (i, _) in crops.iter().enumerate() {
            let x = i as i32 * 3;
            self.fill([x + 1, 0, 1, x + 2, 0, 7], b(ids::FARMLAND));
        }
        for x in (0..=width).step_by(6) {
            self.fill([x, 0, 0, x, 0, 8], LOG);
        }
        self.fill([1, 0, 0, width - 1, 0, 0], LOG);
        self.fill([1, 0, 8, width - 1, 0, 8], LOG);
        for i in 0..crops.len() as i32 / 2 {
            let x = 3 + i * 6;
            self.fill([x, 0, 1, x, 0, 7], b(ids::WATER));
        }
        for z in 1..=7 {
            for (i, &crop) in crops.iter().enumerate() {
                let x = i as i32 * 3 + 1;
                let first = crop_age(rng, crop);
                self.set(Block::new(crop, first), x, 1, z);
                let second = crop_age(rng, crop);
                self.set(Block::new(crop, second), x + 1, 1, z);
            }
        }
        self.settle(0..width + 1, 0..9, Some(4), b(ids::DIRT));
    }

    fn smithy(&mut self, chest_placed: &mut bool) {
        self.air([0, 1, 0, 9, 4, 6]);
        self.fill([0, 0, 0, 9, 0, 6], COBBLE);
        self.fill([0, 4, 0, 9, 4, 6], COBBLE);
        self.fill([0, 5, 0, 9, 5, 6], b(ids::STONE_SLAB));
        self.air([1, 5, 1, 8, 5, 5]);
        self.fill([1, 1, 0, 2, 3, 0], PLANKS);
        self.fill([0, 1, 0, 0, 4, 0], LOG);
        self.fill([3, 1, 0, 3, 4, 0], LOG);
        self.fill([0, 1, 6, 0, 4, 6], LOG);
        self.set(PLANKS, 3, 3, 1);
        self.fill([3, 1, 2, 3, 3, 2], PLANKS);
        self.fill([4, 1, 3, 5, 3, 3], PLANKS);
        self.fill([0, 1, 1, 0, 3, 5], PLANKS);
        self.fill([1, 1, 6, 5, 3, 6], PLANKS);
        self.fill([5, 1, 0, 5, 3, 0], FENCE);
        self.fill([9, 1, 0, 9, 3, 0], FENCE);
        self.fill([6, 1, 4, 9, 4, 6], COBBLE);
        self.set(b(ids::FLOWING_LAVA), 7, 1, 5);
        self.set(b(ids::FLOWING_LAVA), 8, 1, 5);
        self.set(b(ids::IRON_BARS), 9, 2, 5);
        self.set(b(ids::IRON_BARS), 9, 2, 4);
        self.air([7, 2, 4, 8, 2, 5]);
        self.set(COBBLE, 6, 1, 3);
        self.set(facing_block(ids::FURNACE, Facing::North), 6, 2, 3);
        self.set(facing_block(ids::FURNACE, Facing::North), 6, 3, 3);
        self.set(DOUBLE_SLAB, 8, 1, 1);
        for (x, z) in [(0, 2), (0, 4), (2, 6), (4, 6)] {
            self.set(GLASS_PANE, x, 2, z);
        }
        self.set(FENCE, 2, 1, 4);
        self.set(PLATE, 2, 2, 4);
        self.set(PLANKS, 1, 1, 5);
        self.stairs(ids::OAK_STAIRS, Facing::North, 2, 1, 5);
        self.stairs(ids::OAK_STAIRS, Facing::West, 1, 1, 4);
        if !*chest_placed && self.clip.contains_pos(self.frame.world_pos(5, 1, 5)) {
            *chest_placed = self.frame.place_chest(self.w, self.clip, 5, 1, 5);
        }
        for x in 6..=8 {
            self.doorstep(x);
        }
        self.air([1, 1, 0, 1, 2, 0]);
        self.door(1, 1, 0, Facing::North);
        self.settle(0..10, 0..7, Some(6), COBBLE);
    }

    fn house3(&mut self) {
        self.air([1, 1, 1, 7, 4, 4]);
        self.air([2, 1, 6, 8, 4, 10]);
        self.fill([2, 0, 5, 8, 0, 10], PLANKS);
        self.fill([1, 0, 1, 7, 0, 4], PLANKS);
        self.fill([0, 0, 0, 0, 3, 5], COBBLE);
        self.fill([8, 0, 0, 8, 3, 10], COBBLE);
        self.fill([1, 0, 0, 7, 2, 0], COBBLE);
        self.fill([1, 0, 5, 2, 1, 5], COBBLE);
        self.fill([2, 0, 6, 2, 3, 10], COBBLE);
        self.fill([3, 0, 10, 7, 3, 10], COBBLE);
        self.fill([1, 2, 0, 7, 3, 0], PLANKS);
        self.fill([1, 2, 5, 2, 3, 5], PLANKS);
        self.fill([0, 4, 1, 8, 4, 1], PLANKS);
        self.fill([0, 4, 4, 3, 4, 4], PLANKS);
        self.fill([0, 5, 2, 8, 5, 3], PLANKS);
        for (x, z) in [(0, 2), (0, 3), (8, 2), (8, 3), (8, 4)] {
            self.set(PLANKS, x, 4, z);
        }
        for i in -1..=2 {
            for x in 0..=8 {
                self.stairs(ids::OAK_STAIRS, Facing::North, x, 4 + i, i);
                if (i > -1 || x <= 1) && (i > 0 || x <= 3) && (i > 1 || x <= 4 || x >= 6) {
                    self.stairs(ids::OAK_STAIRS, Facing::South, x, 4 + i, 5 - i);
                }
            }
        }
        self.fill([3, 4, 5, 3, 4, 10], PLANKS);
        self.fill([7, 4, 2, 7, 4, 10], PLANKS);
        self.fill([4, 5, 4, 4, 5, 10], PLANKS);
        self.fill([6, 5, 4, 6, 5, 10], PLANKS);
        self.fill([5, 6, 3, 5, 6, 10], PLANKS);
        for k in (1..=4).rev() {
            self.set(PLANKS, k, 2 + k, 7 - k);
            for z in 8 - k..=10 {
                self.stairs(ids::OAK_STAIRS, Facing::East, k, 2 + k, z);
            }
        }
        self.set(PLANKS, 6, 6, 3);
        self.set(PLANKS, 7, 5, 4);
        self.stairs(ids::OAK_STAIRS, Facing::West, 6, 6, 4);
        for x in 6..=8 {
            for z in 5..=10 {
                self.stairs(ids::OAK_STAIRS, Facing::West, x, 12 - x, z);
            }
        }
        for (x, y, z) in [
            (0, 2, 1),
            (0, 2, 4),
            (4, 2, 0),
            (6, 2, 0),
            (8, 2, 1),
            (8, 2, 4),
            (8, 2, 6),
            (8, 2, 9),
            (2, 2, 6),
            (2, 2, 9),
            (4, 4, 10),
            (6, 4, 10),
        ] {
            self.set(LOG, x, y, z);
        }
        for (x, y, z) in [
            (0, 2, 2),
            (0, 2, 3),
            (5, 2, 0),
            (8, 2, 2),
            (8, 2, 3),
            (8, 2, 7),
            (8, 2, 8),
            (2, 2, 7),
            (2, 2, 8),
            (5, 4, 10),
        ] {
            self.set(GLASS_PANE, x, y, z);
        }
        self.set(PLANKS, 8, 2, 5);
        self.set(PLANKS, 5, 5, 10);
        self.air([2, 1, 0, 2, 2, 0]);
        self.torch(Facing::North, 2, 3, 1);
        self.door(2, 1, 0, Facing::North);
        self.doorstep(2);
        self.settle(0..9, 0..5, Some(7), COBBLE);
        self.settle(2..9, 5..11, Some(7), COBBLE);
    }

    fn house4_garden(&mut self, roof_terrace: bool) {
        self.fill([0, 0, 0, 4, 0, 4], COBBLE);
        self.fill([0, 4, 0, 4, 4, 4], LOG);
        self.fill([1, 4, 1, 3, 4, 3], PLANKS);
        for (x, z) in [(0, 0), (4, 0), (0, 4), (4, 4)] {
            for y in 1..=3 {
                self.set(COBBLE, x, y, z);
            }
        }
        self.fill([0, 1, 1, 0, 3, 3], PLANKS);
        self.fill([4, 1, 1, 4, 3, 3], PLANKS);
        self.fill([1, 1, 4, 3, 3, 4], PLANKS);
        self.set(GLASS_PANE, 0, 2, 2);
        self.set(GLASS_PANE, 2, 2, 4);
        self.set(GLASS_PANE, 4, 2, 2);
        for (x, y) in [(1, 1), (1, 2), (1, 3), (2, 3), (3, 3), (3, 2), (3, 1)] {
            self.set(PLANKS, x, y, 0);
        }
        self.air([1, 1, 1, 3, 3, 3]);
        if roof_terrace {
            for i in 0..=4 {
                self.set(FENCE, i, 5, 0);
                self.set(FENCE, i, 5, 4);
            }
            for z in 1..=3 {
                self.set(FENCE, 4, 5, z);
                self.set(FENCE, 0, 5, z);
            }
            for y in 1..=4 {
                self.set(facing_block(ids::LADDER, Facing::South), 3, y, 3);
            }
        }
        self.torch(Facing::North, 2, 3, 1);
        self.air([2, 1, 0, 2, 2, 0]);
        self.door(2, 1, 0, Facing::North);
        self.doorstep(2);
        self.settle(0..5, 0..5, Some(6), COBBLE);
    }

    fn hall(&mut self) {
        self.air([1, 1, 1, 7, 4, 4]);
        self.air([2, 1, 6, 8, 4, 10]);
        self.fill([2, 0, 6, 8, 0, 10], b(ids::DIRT));
        self.set(COBBLE, 6, 0, 6);
        self.fill([2, 1, 6, 2, 1, 10], FENCE);
        self.fill([8, 1, 6, 8, 1, 10], FENCE);
        self.fill([3, 1, 10, 7, 1, 10], FENCE);
        self.fill([1, 0, 1, 7, 0, 4], PLANKS);
        self.fill([0, 0, 0, 0, 3, 5], COBBLE);
        self.fill([8, 0, 0, 8, 3, 5], COBBLE);
        self.fill([1, 0, 0, 7, 1, 0], COBBLE);
        self.fill([1, 0, 5, 7, 1, 5], COBBLE);
        self.fill([1, 2, 0, 7, 3, 0], PLANKS);
        self.fill([1, 2, 5, 7, 3, 5], PLANKS);
        self.fill([0, 4, 1, 8, 4, 1], PLANKS);
        self.fill([0, 4, 4, 8, 4, 4], PLANKS);
        self.fill([0, 5, 2, 8, 5, 3], PLANKS);
        for (x, z) in [(0, 2), (0, 3), (8, 2), (8, 3)] {
            self.set(PLANKS, x, 4, z);
        }
        for i in -1..=2 {
            for x in 0..=8 {
                self.stairs(ids::OAK_STAIRS, Facing::North, x, 4 + i, i);
                self.stairs(ids::OAK_STAIRS, Facing::South, x, 4 + i, 5 - i);
            }
        }
        for (x, z) in [(0, 1), (0, 4), (8, 1), (8, 4)] {
            self.set(LOG, x, 2, z);
        }
        for (x, z) in [(0, 2), (0, 3), (8, 2), (8, 3), (2, 5), (3, 5), (5, 0), (6, 5)] {
            self.set(GLASS_PANE, x, 2, z);
        }
        self.set(FENCE, 2, 1, 3);
        self.set(PLATE, 2, 2, 3);
        self.set(PLANKS, 1, 1, 4);
        self.stairs(ids::OAK_STAIRS, Facing::North, 2, 1, 4);
        self.stairs(ids::OAK_STAIRS, Facing::West, 1, 1, 3);
        self.fill([5, 0, 1, 7, 0, 3], DOUBLE_SLAB);
        self.set(DOUBLE_SLAB, 6, 1, 1);
        self.set(DOUBLE_SLAB, 6, 1, 2);
        self.air([2, 1, 0, 2, 2, 0]);
        self.torch(Facing::North, 2, 3, 1);
        self.door(2, 1, 0, Facing::North);
        self.doorstep(2);
        self.air([6, 1, 5, 6, 2, 5]);
        self.torch(Facing::South, 6, 3, 4);
        self.door(6, 1, 5, Facing::South);
        self.settle(0..9, 0..5, Some(7), COBBLE);
    }

    fn wood_hut(&mut self, tall: bool, table: i32) {
        self.air([1, 1, 1, 3, 5, 4]);
        self.fill([0, 0, 0, 3, 0, 4], COBBLE);
        self.fill([1, 0, 1, 2, 0, 3], b(ids::DIRT));
        if tall {
            self.fill([1, 4, 1, 2, 4, 3], LOG);
        } else {
            self.fill([1, 5, 1, 2, 5, 3], LOG);
        }
        for (x, z) in [(1, 0), (2, 0), (1, 4), (2, 4), (0, 1), (0, 2), (0, 3), (3, 1), (3, 2), (3, 3)] {
            self.set(LOG, x, 4, z);
        }
        self.fill([0, 1, 0, 0, 3, 0], LOG);
        self.fill([3, 1, 0, 3, 3, 0], LOG);
        self.fill([0, 1, 4, 0, 3, 4], LOG);
        self.fill([3, 1, 4, 3, 3, 4], LOG);
        self.fill([0, 1, 1, 0, 3, 3], PLANKS);
        self.fill([3, 1, 1, 3, 3, 3], PLANKS);
        self.fill([1, 1, 0, 2, 3, 0], PLANKS);
        self.fill([1, 1, 4, 2, 3, 4], PLANKS);
        self.set(GLASS_PANE, 0, 2, 2);
        self.set(GLASS_PANE, 3, 2, 2);
        if table > 0 {
            self.set(FENCE, table, 1, 3);
            self.set(PLATE, table, 2, 3);
        }
        self.air([1, 1, 0, 1, 2, 0]);
        self.door(1, 1, 0, Facing::North);
        self.doorstep(1);
        self.settle(0..4, 0..5, Some(6), COBBLE);
    }

    fn church(&mut self) {
        self.air([1, 1, 1, 3, 3, 7]);
        self.air([1, 5, 1, 3, 9, 3]);
        self.fill([1, 0, 0, 3, 0, 8], COBBLE);
        self.fill([1, 1, 0, 3, 10, 0], COBBLE);
        self.fill([0, 1, 1, 0, 10, 3], COBBLE);
        self.fill([4, 1, 1, 4, 10, 3], COBBLE);
        self.fill([0, 0, 4, 0, 4, 7], COBBLE);
        self.fill([4, 0, 4, 4, 4, 7], COBBLE);
        self.fill([1, 1, 8, 3, 4, 8], COBBLE);
        self.fill([1, 5, 4, 3, 10, 4], COBBLE);
        self.fill([1, 5, 5, 3, 5, 7], COBBLE);
        self.fill([0, 9, 0, 4, 9, 4], COBBLE);
        self.fill([0, 4, 0, 4, 4, 4], COBBLE);
        for (x, z) in [(0, 2), (4, 2), (2, 0), (2, 4)] {
            self.set(COBBLE, x, 11, z);
        }
        for (x, z) in [(1, 6), (1, 7), (2, 7), (3, 6), (3, 7)] {
            self.set(COBBLE, x, 1, z);
        }
        self.stairs(ids::STONE_STAIRS, Facing::North, 1, 1, 5);
        self.stairs(ids::STONE_STAIRS, Facing::North, 2, 1, 6);
        self.stairs(ids::STONE_STAIRS, Facing::North, 3, 1, 5);
        self.stairs(ids::STONE_STAIRS, Facing::West, 1, 2, 7);
        self.stairs(ids::STONE_STAIRS, Facing::East, 3, 2, 7);
        for (x, y, z) in [
            (0, 2, 2),
            (0, 3, 2),
            (4, 2, 2),
            (4, 3, 2),
            (0, 6, 2),
            (0, 7, 2),
            (4, 6, 2),
            (4, 7, 2),
            (2, 6, 0),
            (2, 7, 0),
            (2, 6, 4),
            (2, 7, 4),
            (0, 3, 6),
            (4, 3, 6),
            (2, 3, 8),
        ] {
            self.set(GLASS_PANE, x, y, z);
        }
        self.torch(Facing::South, 2, 4, 7);
        self.torch(Facing::East, 1, 4, 6);
        self.torch(Facing::West, 3, 4, 6);
        self.torch(Facing::North, 2, 4, 5);
        for y in 1..=9 {
            self.set(facing_block(ids::LADDER, Facing::West), 3, y, 3);
        }
        self.air([2, 1, 0, 2, 2, 0]);
        self.door(2, 1, 0, Facing::North);
        self.doorstep(2);
        self.settle(0..5, 0..9, Some(12), COBBLE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desert_villages_use_sandstone() {
        let s = VillageStyle::Desert;
        assert_eq!(s.swap(COBBLE).id, ids::SANDSTONE);
        assert_eq!(s.swap(PLANKS), Block::new(ids::SANDSTONE, 2));
        let stairs = facing_block(ids::OAK_STAIRS, Facing::West);
        assert_eq!(s.swap(stairs), Block::new(ids::SANDSTONE_STAIRS, stairs.meta));
        assert_eq!(s.swap(FENCE), FENCE);
    }

    #[test]
    fn taiga_and_savanna_swap_wood() {
        assert_eq!(VillageStyle::Taiga.swap(LOG), Block::new(ids::LOG, 1));
        assert_eq!(VillageStyle::Taiga.door(), ids::SPRUCE_DOOR);
        assert_eq!(VillageStyle::Savanna.swap(Block::new(ids::LOG, 8)), Block::new(ids::LOG2, 8));
        assert_eq!(VillageStyle::Savanna.swap(FENCE).id, ids::ACACIA_FENCE);
        assert_eq!(VillageStyle::Plains.swap(COBBLE), COBBLE);
    }

    #[test]
    fn fields_draw_crops_when_built() {
        let mut a = JavaRandom::new(7);
        let mut b = a.clone();
        let piece = VillagePiece::house(HouseType::Field1, VillageStyle::Plains, false, &mut a);
        let VillageKind::Field1 { crops } = piece.kind else {
            panic!("field expected");
        };
        for crop in crops {
            assert!(matches!(crop, ids::WHEAT | ids::CARROTS | ids::POTATOES | ids::BEETROOTS));
        }
        for _ in 0..4 {
            b.next_bounded_int(10);
        }
        assert_eq!(a.next_int(), b.next_int());
    }

    #[test]
    fn weight_limits_respect_size() {
        let mut rng = JavaRandom::new(1);
        for ty in HouseType::ALL {
            let (weight, limit) = ty.weight(&mut rng, 0);
            assert!(weight > 0);
            assert!(limit >= 0);
        }
        assert_eq!(HouseType::Church.size(), (5, 12, 9));
    }
}
