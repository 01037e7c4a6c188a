//! Stronghold ring placement and the piece tree builder.

use std::f64::consts::PI;
use std::sync::OnceLock;

use strata_geom::{Axis, BoundingBox, Facing};
use strata_noise::JavaRandom;

use crate::component::{Frame, Piece, StructureComponent, find_intersecting};
use crate::stronghold_pieces::{PieceType, StrongholdKind, StrongholdPiece};
use crate::{BiomeSource, StructureGenerator, StructureKind, StructureStart};

const COUNT: usize = 128;
const DISTANCE: f64 = 32.0;
const FIRST_RING: usize = 3;
/// Starts rebuilt this many times without a portal room are kept as they are.
const MAX_ATTEMPTS: usize = 256;
const MAX_REACH: i32 = 112;

pub struct Stronghold {
    seed: i64,
    allowed: Vec<u8>,
    positions: OnceLock<Vec<(i32, i32)>>,
}

impl Stronghold {
    /// `allowed` lists the biomes a stronghold may be nudged into.
    pub fn new(seed: i64, allowed: Vec<u8>) -> Self {
        Self { seed, allowed, positions: OnceLock::new() }
    }

    /// Chunk positions of every stronghold in the world, computed on first use.
    pub fn positions(&self, biomes: &dyn BiomeSource) -> &[(i32, i32)] {
        self.positions.get_or_init(|| ring_positions(self.seed, &self.allowed, biomes))
    }
}

fn ring_positions(seed: i64, allowed: &[u8], biomes: &dyn BiomeSource) -> Vec<(i32, i32)> {
    let mut rng = JavaRandom::new(seed);
    let mut angle = rng.next_double() * PI * 2.0;
    let mut ring = 0;
    let mut in_ring = 0;
    let mut spread = FIRST_RING;
    let mut out = Vec::with_capacity(COUNT);
    for k in 0..COUNT {
        let dist = 4.0 * DISTANCE + DISTANCE * ring as f64 * 6.0 + (rng.next_double() - 0.5) * DISTANCE * 2.5;
        let mut cx = (angle.cos() * dist + 0.5).floor() as i32;
        let mut cz = (angle.sin() * dist + 0.5).floor() as i32;
        if let Some(p) = biomes.find_biome_position((cx << 4) + 8, (cz << 4) + 8, 112, allowed, &mut rng) {
            cx = p.x >> 4;
            cz = p.z >> 4;
        }
        out.push((cx, cz));
        angle += PI * 2.0 / spread as f64;
        in_ring += 1;
        if in_ring == spread {
            ring += 1;
            in_ring = 0;
            spread += 2 * spread / (ring + 1);
            spread = spread.min(COUNT - k);
            angle += rng.next_double() * PI * 2.0;
        }
    }
    log::debug!(target: "structures", "placed {} stronghold positions", out.len());
    out
}

impl StructureGenerator for Stronghold {
    fn kind(&self) -> StructureKind {
        StructureKind::Stronghold
    }

    fn can_spawn_at(&self, cx: i32, cz: i32, _rng: &mut JavaRandom, biomes: &dyn BiomeSource) -> bool {
        self.positions(biomes).contains(&(cx, cz))
    }

    fn start_at(&self, cx: i32, cz: i32, rng: &mut JavaRandom, _biomes: &dyn BiomeSource) -> StructureStart {
        let mut attempt = 1;
        let mut built = StrongholdBuilder::new(rng, cx, cz).build();
        while !built.1 {
            if attempt == MAX_ATTEMPTS {
                log::warn!(target: "structures", "stronghold at ({cx}, {cz}) has no portal room after {attempt} attempts");
                break;
            }
            attempt += 1;
            built = StrongholdBuilder::new(rng, cx, cz).build();
        }
        built.0
    }
}

struct Weight {
    ty: PieceType,
    weight: i32,
    limit: i32,
    spawned: i32,
}

impl Weight {
    fn can_spawn_more(&self) -> bool {
        self.limit == 0 || self.spawned < self.limit
    }

    fn can_spawn_at_depth(&self, depth: i32) -> bool {
        self.can_spawn_more() && depth >= self.ty.min_depth()
    }
}

/// One attempt at a stronghold tree. Pieces live in an arena; unexpanded
/// ones wait in `pending` and are expanded in random order.
struct StrongholdBuilder<'a> {
    rng: &'a mut JavaRandom,
    chunk: (i32, i32),
    weights: Vec<Weight>,
    forced: Option<PieceType>,
    last_placed: Option<PieceType>,
    components: Vec<StructureComponent>,
    pending: Vec<usize>,
    has_portal_room: bool,
}

impl<'a> StrongholdBuilder<'a> {
    fn new(rng: &'a mut JavaRandom, cx: i32, cz: i32) -> Self {
        let weights = PieceType::TABLE
            .iter()
            .map(|&(ty, weight, limit)| Weight { ty, weight, limit, spawned: 0 })
            .collect();
        let x = (cx << 4) + 2;
        let z = (cz << 4) + 2;
        let facing = Facing::PLANE[rng.next_bounded_int(4) as usize];
        let entrance = StructureComponent {
            frame: Frame::new(BoundingBox::new(x, 64, z, x + 4, 74, z + 4), facing),
            depth: 0,
            piece: StrongholdPiece::new(StrongholdKind::Entrance).into(),
        };
        Self {
            rng,
            chunk: (cx, cz),
            weights,
            forced: None,
            last_placed: None,
            components: vec![entrance],
            pending: Vec::new(),
            has_portal_room: false,
        }
    }

    /// Returns the start and whether it reached a portal room.
    fn build(mut self) -> (StructureStart, bool) {
        self.expand(0);
        while !self.pending.is_empty() {
            let i = self.rng.next_bounded_int(self.pending.len() as i32) as usize;
            let next = self.pending.remove(i);
            self.expand(next);
        }
        let (cx, cz) = self.chunk;
        let mut start = StructureStart::new(StructureKind::Stronghold, cx, cz);
        start.components = self.components;
        start.update_bbox();
        start.mark_available_height(self.rng, 10);
        (start, self.has_portal_room)
    }

    fn expand(&mut self, index: usize) {
        let c = &self.components[index];
        let Piece::Stronghold(piece) = &c.piece else {
            return;
        };
        let kind = piece.kind.clone();
        let (bb, depth) = (c.frame.bbox, c.depth);
        let Some(facing) = c.frame.facing else {
            return;
        };
        let step = Exits { bb, facing, depth };
        let north_or_east = matches!(facing, Facing::North | Facing::East);
        match kind {
            StrongholdKind::Entrance => {
                self.forced = Some(PieceType::Crossing);
                self.forward(&step, 1, 1);
            }
            StrongholdKind::Stairs
            | StrongholdKind::StairsStraight
            | StrongholdKind::Prison
            | StrongholdKind::ChestCorridor { .. } => self.forward(&step, 1, 1),
            StrongholdKind::Straight { expands_x, expands_z } => {
                self.forward(&step, 1, 1);
                if expands_x {
                    self.left(&step, 1, 2);
                }
                if expands_z {
                    self.right(&step, 1, 2);
                }
            }
            StrongholdKind::LeftTurn => {
                if north_or_east {
                    self.left(&step, 1, 1);
                } else {
                    self.right(&step, 1, 1);
                }
            }
            StrongholdKind::RightTurn => {
                if north_or_east {
                    self.right(&step, 1, 1);
                } else {
                    self.left(&step, 1, 1);
                }
            }
            StrongholdKind::RoomCrossing { .. } => {
                self.forward(&step, 4, 1);
                self.left(&step, 1, 4);
                self.right(&step, 1, 4);
            }
            StrongholdKind::Crossing { left_low, left_high, right_low, right_high } => {
                let (low, high) = if matches!(facing, Facing::West | Facing::North) { (5, 3) } else { (3, 5) };
                self.forward(&step, 5, 1);
                if left_low {
                    self.left(&step, low, 1);
                }
                if left_high {
                    self.left(&step, high, 7);
                }
                if right_low {
                    self.right(&step, low, 1);
                }
                if right_high {
                    self.right(&step, high, 7);
                }
            }
            StrongholdKind::PortalRoom { .. } => self.has_portal_room = true,
            StrongholdKind::Corridor { .. } | StrongholdKind::Library { .. } => {}
        }
    }

    /// Child straight ahead, `ox` across and `oy` up from the piece corner.
    fn forward(&mut self, e: &Exits, ox: i32, oy: i32) {
        let bb = &e.bb;
        let (x, z) = match e.facing {
            Facing::North => (bb.min_x + ox, bb.min_z - 1),
            Facing::South => (bb.min_x + ox, bb.max_z + 1),
            Facing::West => (bb.min_x - 1, bb.min_z + ox),
            Facing::East => (bb.max_x + 1, bb.min_z + ox),
        };
        self.add_piece(x, bb.min_y + oy, z, e.facing, e.depth);
    }

    /// Child off the low-coordinate side, `oy` up and `oxz` along the piece.
    fn left(&mut self, e: &Exits, oy: i32, oxz: i32) {
        let bb = &e.bb;
        match e.facing.axis() {
            Axis::Z => self.add_piece(bb.min_x - 1, bb.min_y + oy, bb.min_z + oxz, Facing::West, e.depth),
            _ => self.add_piece(bb.min_x + oxz, bb.min_y + oy, bb.min_z - 1, Facing::North, e.depth),
        }
    }

    /// Child off the high-coordinate side.
    fn right(&mut self, e: &Exits, oy: i32, oxz: i32) {
        let bb = &e.bb;
        match e.facing.axis() {
            Axis::Z => self.add_piece(bb.max_x + 1, bb.min_y + oy, bb.min_z + oxz, Facing::East, e.depth),
            _ => self.add_piece(bb.min_x + oxz, bb.min_y + oy, bb.max_z + 1, Facing::South, e.depth),
        }
    }

    fn add_piece(&mut self, x: i32, y: i32, z: i32, facing: Facing, depth: i32) {
        let origin = self.components[0].frame.bbox;
        if depth > 50 || (x - origin.min_x).abs() > MAX_REACH || (z - origin.min_z).abs() > MAX_REACH {
            return;
        }
        if let Some(component) = self.piece_at_door(x, y, z, facing, depth + 1) {
            self.pending.push(self.components.len());
            self.components.push(component);
        }
    }

    fn piece_at_door(&mut self, x: i32, y: i32, z: i32, facing: Facing, depth: i32) -> Option<StructureComponent> {
        if !self.weights.iter().any(|w| w.limit > 0 && w.spawned < w.limit) {
            return None;
        }
        let total: i32 = self.weights.iter().map(|w| w.weight).sum();

        if let Some(ty) = self.forced.take()
            && let Some(component) = self.try_piece(ty, x, y, z, facing, depth)
        {
            return Some(component);
        }

        for _ in 0..5 {
            let mut roll = self.rng.next_bounded_int(total);
            for k in 0..self.weights.len() {
                roll -= self.weights[k].weight;
                if roll >= 0 {
                    continue;
                }
                let ty = self.weights[k].ty;
                if !self.weights[k].can_spawn_at_depth(depth) || self.last_placed == Some(ty) {
                    break;
                }
                if let Some(component) = self.try_piece(ty, x, y, z, facing, depth) {
                    self.weights[k].spawned += 1;
                    self.last_placed = Some(ty);
                    if !self.weights[k].can_spawn_more() {
                        self.weights.remove(k);
                    }
                    return Some(component);
                }
            }
        }

        let bbox = self.corridor_box(x, y, z, facing).filter(|b| b.min_y > 1)?;
        let steps = if facing.axis() == Axis::Z { bbox.z_size() } else { bbox.x_size() };
        Some(StructureComponent {
            frame: Frame::new(bbox, facing),
            depth,
            piece: StrongholdPiece::new(StrongholdKind::Corridor { steps }).into(),
        })
    }

    fn fits(&self, bbox: &BoundingBox) -> bool {
        bbox.min_y > 10 && find_intersecting(&self.components, bbox).is_none()
    }

    fn try_piece(
        &mut self,
        ty: PieceType,
        x: i32,
        y: i32,
        z: i32,
        facing: Facing,
        depth: i32,
    ) -> Option<StructureComponent> {
        let [ox, oy, oz, w, h, l] = ty.extent();
        let mut bbox = BoundingBox::oriented(x, y, z, ox, oy, oz, w, h, l, facing);
        if !self.fits(&bbox) {
            if ty != PieceType::Library {
                return None;
            }
            bbox = BoundingBox::oriented(x, y, z, ox, oy, oz, w, 6, l, facing);
            if !self.fits(&bbox) {
                return None;
            }
        }
        let piece = ty.create(self.rng, &bbox);
        Some(StructureComponent { frame: Frame::new(bbox, facing), depth, piece: piece.into() })
    }

    /// Short corridor that runs up to the piece blocking a doorway, if that
    /// piece sits on the same floor.
    fn corridor_box(&self, x: i32, y: i32, z: i32, facing: Facing) -> Option<BoundingBox> {
        let candidate = BoundingBox::oriented(x, y, z, -1, -1, 0, 5, 5, 4, facing);
        let hit = find_intersecting(&self.components, &candidate)?.frame.bbox;
        if hit.min_y != candidate.min_y {
            return None;
        }
        (1..=3)
            .rev()
            .find(|&len| !hit.intersects(&unordered_box(x, y, z, len - 1, facing)))
            .map(|len| BoundingBox::oriented(x, y, z, -1, -1, 0, 5, 5, len, facing))
    }
}

/// Corridor box of length `len` built without normalising its corners, so a
/// zero length yields an inverted, empty box.
fn unordered_box(x: i32, y: i32, z: i32, len: i32, facing: Facing) -> BoundingBox {
    let (min_y, max_y) = (y - 1, y + 3);
    let (min_x, min_z, max_x, max_z) = match facing {
        Facing::North => (x - 1, z - len + 1, x + 3, z),
        Facing::South => (x - 1, z, x + 3, z + len - 1),
        Facing::West => (x - len + 1, z - 1, x, z + 3),
        Facing::East => (x, z - 1, x + len - 1, z + 3),
    };
    BoundingBox { min_x, min_y, min_z, max_x, max_y, max_z }
}

struct Exits {
    bb: BoundingBox,
    facing: Facing,
    depth: i32,
}

impl From<StrongholdPiece> for Piece {
    fn from(p: StrongholdPiece) -> Self {
        Piece::Stronghold(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_geom::BlockPos;

    struct Land;

    impl BiomeSource for Land {
        fn biome(&self, _x: i32, _z: i32) -> u8 {
            1
        }

        fn are_biomes_viable(&self, _x: i32, _z: i32, _radius: i32, _allowed: &[u8]) -> bool {
            true
        }

        fn find_biome_position(
            &self,
            x: i32,
            z: i32,
            _radius: i32,
            _allowed: &[u8],
            _rng: &mut JavaRandom,
        ) -> Option<BlockPos> {
            Some(BlockPos::new(x, 0, z))
        }
    }

    #[test]
    fn first_ring_has_three_positions_at_ring_distance() {
        let s = Stronghold::new(12345, vec![1]);
        let positions = s.positions(&Land);
        assert_eq!(positions.len(), COUNT);
        for &(x, z) in &positions[..3] {
            let d = ((x * x + z * z) as f64).sqrt();
            assert!((86.0..=170.0).contains(&d), "{d}");
        }
        let (x, z) = positions[3];
        let d = ((x * x + z * z) as f64).sqrt();
        assert!((278.0..=362.0).contains(&d), "{d}");
    }

    #[test]
    fn start_reaches_a_portal_room_underground() {
        let s = Stronghold::new(42, vec![1]);
        let mut rng = JavaRandom::new(42);
        let start = s.start_at(0, 0, &mut rng, &Land);
        let c = &start.components;
        assert!(c.iter().any(|c| matches!(&c.piece, Piece::Stronghold(p) if p.is_portal_room())));
        assert!(start.bbox.min_y >= 1);
        let solid: Vec<_> = c
            .iter()
            .filter(|c| !matches!(&c.piece, Piece::Stronghold(p) if matches!(p.kind, StrongholdKind::Corridor { .. })))
            .collect();
        for i in 0..solid.len() {
            for j in i + 1..solid.len() {
                assert!(!solid[i].frame.bbox.intersects(&solid[j].frame.bbox));
            }
        }
    }

    #[test]
    fn zero_length_candidate_is_inverted() {
        let b = unordered_box(10, 40, 10, 0, Facing::North);
        assert!(b.min_z > b.max_z);
        assert_eq!(unordered_box(10, 40, 10, 3, Facing::East), BoundingBox::oriented(10, 40, 10, -1, -1, 0, 5, 5, 3, Facing::East));
    }
}
