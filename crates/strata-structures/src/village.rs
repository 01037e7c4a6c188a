//! Village placement and the road/house growth queues.

use strata_geom::{BoundingBox, Facing};
use strata_noise::JavaRandom;

use crate::biomes::{DESERT, PLAINS, SAVANNA, TAIGA};
use crate::component::{Frame, Piece, StructureComponent, find_intersecting};
use crate::village_pieces::{HouseType, VillageKind, VillagePiece, VillageStyle};
use crate::{BiomeSource, StructureGenerator, StructureKind, StructureStart, grid_candidate, grid_rng};

/// Biomes a village may be centred in.
pub const VILLAGE_BIOMES: [u8; 4] = [PLAINS, DESERT, SAVANNA, TAIGA];

const SPACING: i32 = 32;
const SEPARATION: i32 = 8;
const SALT: i64 = 10_387_312;
/// Farthest a piece may be from the well, in blocks.
const MAX_REACH: i32 = 112;

pub struct Village {
    seed: i64,
    size: i32,
}

impl Village {
    pub fn new(seed: i64) -> Self {
        Self { seed, size: 0 }
    }
}

impl StructureGenerator for Village {
    fn kind(&self) -> StructureKind {
        StructureKind::Village
    }

    fn can_spawn_at(&self, cx: i32, cz: i32, _rng: &mut JavaRandom, biomes: &dyn BiomeSource) -> bool {
        let candidate = grid_candidate(self.seed, cx, cz, SPACING, SPACING - SEPARATION, SALT);
        candidate == (cx, cz) && biomes.are_biomes_viable(cx * 16 + 8, cz * 16 + 8, 0, &VILLAGE_BIOMES)
    }

    fn start_at(&self, cx: i32, cz: i32, rng: &mut JavaRandom, biomes: &dyn BiomeSource) -> StructureStart {
        VillageBuilder::new(rng, self.size, cx, cz, biomes).build()
    }

    fn stamp_rng(&self, world_seed: i64, cx: i32, cz: i32) -> JavaRandom {
        grid_rng(world_seed, cx, cz, SPACING, SPACING - SEPARATION, SALT).1
    }
}

#[derive(Debug)]
struct PieceWeight {
    ty: HouseType,
    weight: i32,
    limit: i32,
    spawned: i32,
}

impl PieceWeight {
    fn can_spawn_more(&self) -> bool {
        self.limit == 0 || self.spawned < self.limit
    }
}

/// Grows one village: roads and houses are appended to an arena and queued by
/// index, then expanded in random order until both queues drain.
struct VillageBuilder<'a> {
    rng: &'a mut JavaRandom,
    size: i32,
    chunk: (i32, i32),
    style: VillageStyle,
    zombie: bool,
    weights: Vec<PieceWeight>,
    last_placed: Option<HouseType>,
    components: Vec<StructureComponent>,
    pending_roads: Vec<usize>,
    pending_houses: Vec<usize>,
}

impl<'a> VillageBuilder<'a> {
    fn new(rng: &'a mut JavaRandom, size: i32, cx: i32, cz: i32, biomes: &dyn BiomeSource) -> Self {
        let weights = HouseType::ALL
            .iter()
            .map(|&ty| {
                let (weight, limit) = ty.weight(rng, size);
                PieceWeight { ty, weight, limit, spawned: 0 }
            })
            .filter(|w| w.limit > 0)
            .collect();

        let x = (cx << 4) + 2;
        let z = (cz << 4) + 2;
        let facing = Facing::PLANE[rng.next_bounded_int(4) as usize];
        let well = BoundingBox::new(x, 64, z, x + 5, 78, z + 5);
        let style = VillageStyle::for_biome(biomes.biome(x, z));
        let zombie = rng.next_bounded_int(50) == 0;

        let mut builder = Self {
            rng,
            size,
            chunk: (cx, cz),
            style,
            zombie,
            weights,
            last_placed: None,
            components: Vec::new(),
            pending_roads: Vec::new(),
            pending_houses: Vec::new(),
        };
        builder.components.push(StructureComponent {
            frame: Frame::new(well, facing),
            depth: 0,
            piece: VillagePiece::new(VillageKind::Well, style, zombie).into(),
        });
        builder
    }

    fn build(mut self) -> StructureStart {
        self.expand_well();
        while !self.pending_roads.is_empty() || !self.pending_houses.is_empty() {
            let next = if self.pending_roads.is_empty() {
                let i = self.rng.next_bounded_int(self.pending_houses.len() as i32) as usize;
                self.pending_houses.remove(i)
            } else {
                let i = self.rng.next_bounded_int(self.pending_roads.len() as i32) as usize;
                self.pending_roads.remove(i)
            };
            if self.components[next].is_village_road() {
                self.expand_road(next);
            }
        }

        let (cx, cz) = self.chunk;
        let mut start = StructureStart::new(StructureKind::Village, cx, cz);
        let buildings = self.components.iter().filter(|c| !c.is_village_road()).count();
        start.components = self.components;
        start.update_bbox();
        start.sizeable = buildings > 2;
        start
    }

    fn origin(&self) -> &BoundingBox {
        &self.components[0].frame.bbox
    }

    fn within_reach(&self, x: i32, z: i32) -> bool {
        let o = self.origin();
        (x - o.min_x).abs() <= MAX_REACH && (z - o.min_z).abs() <= MAX_REACH
    }

    fn expand_well(&mut self) {
        let bb = self.components[0].frame.bbox;
        let depth = self.components[0].depth;
        self.add_road(bb.min_x - 1, bb.max_y - 4, bb.min_z + 1, Facing::West, depth);
        self.add_road(bb.max_x + 1, bb.max_y - 4, bb.min_z + 1, Facing::East, depth);
        self.add_road(bb.min_x + 1, bb.max_y - 4, bb.min_z - 1, Facing::North, depth);
        self.add_road(bb.min_x + 1, bb.max_y - 4, bb.max_z + 1, Facing::South, depth);
    }

    fn expand_road(&mut self, index: usize) {
        let road = &self.components[index];
        let (bb, facing, depth) = (road.frame.bbox, road.frame.facing, road.depth);
        let Some(facing) = facing else {
            return;
        };
        let length = bb.x_size().max(bb.z_size());

        let mut placed = false;
        let mut i = self.rng.next_bounded_int(5);
        while i < length - 8 {
            let (x, z, dir) = match facing {
                Facing::North | Facing::South => (bb.min_x - 1, bb.min_z + i, Facing::West),
                _ => (bb.min_x + i, bb.min_z - 1, Facing::North),
            };
            if let Some(extent) = self.add_house(x, bb.min_y, z, dir, depth) {
                i += extent;
                placed = true;
            }
            i += 2 + self.rng.next_bounded_int(5);
        }
        let mut j = self.rng.next_bounded_int(5);
        while j < length - 8 {
            let (x, z, dir) = match facing {
                Facing::North | Facing::South => (bb.max_x + 1, bb.min_z + j, Facing::East),
                _ => (bb.min_x + j, bb.max_z + 1, Facing::South),
            };
            if let Some(extent) = self.add_house(x, bb.min_y, z, dir, depth) {
                j += extent;
                placed = true;
            }
            j += 2 + self.rng.next_bounded_int(5);
        }

        if placed && self.rng.next_bounded_int(3) > 0 {
            let (x, z, dir) = match facing {
                Facing::North => (bb.min_x - 1, bb.min_z, Facing::West),
                Facing::South => (bb.min_x - 1, bb.max_z - 2, Facing::West),
                Facing::West => (bb.min_x, bb.min_z - 1, Facing::North),
                Facing::East => (bb.max_x - 2, bb.min_z - 1, Facing::North),
            };
            self.add_road(x, bb.min_y, z, dir, depth);
        }
        if placed && self.rng.next_bounded_int(3) > 0 {
            let (x, z, dir) = match facing {
                Facing::North => (bb.max_x + 1, bb.min_z, Facing::East),
                Facing::South => (bb.max_x + 1, bb.max_z - 2, Facing::East),
                Facing::West => (bb.min_x, bb.max_z + 1, Facing::South),
                Facing::East => (bb.max_x - 2, bb.max_z + 1, Facing::South),
            };
            self.add_road(x, bb.min_y, z, dir, depth);
        }
    }

    fn add_road(&mut self, x: i32, y: i32, z: i32, facing: Facing, depth: i32) {
        if depth > 3 + self.size || !self.within_reach(x, z) {
            return;
        }
        let mut length = 7 * (self.rng.next_bounded_int(3) + 3);
        while length >= 7 {
            let bbox = BoundingBox::oriented(x, y, z, 0, 0, 0, 3, 3, length, facing);
            if find_intersecting(&self.components, &bbox).is_none() {
                if bbox.min_y > 10 {
                    let piece = VillagePiece::new(VillageKind::Road { length }, self.style, self.zombie);
                    self.pending_roads.push(self.components.len());
                    self.components.push(StructureComponent {
                        frame: Frame::new(bbox, facing),
                        depth,
                        piece: piece.into(),
                    });
                }
                return;
            }
            length -= 7;
        }
    }

    /// Places a building beside a road. Returns the larger horizontal extent of
    /// what was placed.
    fn add_house(&mut self, x: i32, y: i32, z: i32, facing: Facing, depth: i32) -> Option<i32> {
        if depth > 50 || !self.within_reach(x, z) {
            return None;
        }
        let component = self.pick_building(x, y, z, facing, depth + 1)?;
        let bb = component.frame.bbox;
        self.pending_houses.push(self.components.len());
        self.components.push(component);
        Some(bb.x_size().max(bb.z_size()))
    }

    fn pick_building(&mut self, x: i32, y: i32, z: i32, facing: Facing, depth: i32) -> Option<StructureComponent> {
        let total: i32 = self.weights.iter().map(|w| w.weight).sum();
        if !self.weights.iter().any(|w| w.limit > 0 && w.spawned < w.limit) || total <= 0 {
            return None;
        }

        for _ in 0..5 {
            let mut roll = self.rng.next_bounded_int(total);
            for k in 0..self.weights.len() {
                roll -= self.weights[k].weight;
                if roll >= 0 {
                    continue;
                }
                let ty = self.weights[k].ty;
                if !self.weights[k].can_spawn_more() || (self.last_placed == Some(ty) && self.weights.len() > 1) {
                    break;
                }
                if let Some(component) = self.try_house(ty, x, y, z, facing, depth) {
                    self.weights[k].spawned += 1;
                    self.last_placed = Some(ty);
                    if !self.weights[k].can_spawn_more() {
                        self.weights.remove(k);
                    }
                    return Some(component);
                }
            }
        }

        let bbox = BoundingBox::oriented(x, y, z, 0, 0, 0, 3, 4, 2, facing);
        if find_intersecting(&self.components, &bbox).is_some() {
            return None;
        }
        Some(StructureComponent {
            frame: Frame::new(bbox, facing),
            depth,
            piece: VillagePiece::new(VillageKind::Torch, self.style, self.zombie).into(),
        })
    }

    fn try_house(
        &mut self,
        ty: HouseType,
        x: i32,
        y: i32,
        z: i32,
        facing: Facing,
        depth: i32,
    ) -> Option<StructureComponent> {
        let (w, h, l) = ty.size();
        let bbox = BoundingBox::oriented(x, y, z, 0, 0, 0, w, h, l, facing);
        if bbox.min_y <= 10 || find_intersecting(&self.components, &bbox).is_some() {
            return None;
        }
        let piece = VillagePiece::house(ty, self.style, self.zombie, self.rng);
        Some(StructureComponent { frame: Frame::new(bbox, facing), depth, piece: piece.into() })
    }
}

impl From<VillagePiece> for Piece {
    fn from(p: VillagePiece) -> Self {
        Piece::Village(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_geom::BlockPos;

    struct Uniform(u8);

    impl BiomeSource for Uniform {
        fn biome(&self, _x: i32, _z: i32) -> u8 {
            self.0
        }

        fn are_biomes_viable(&self, _x: i32, _z: i32, _radius: i32, allowed: &[u8]) -> bool {
            allowed.contains(&self.0)
        }

        fn find_biome_position(
            &self,
            x: i32,
            z: i32,
            _radius: i32,
            allowed: &[u8],
            _rng: &mut JavaRandom,
        ) -> Option<BlockPos> {
            allowed.contains(&self.0).then_some(BlockPos::new(x, 0, z))
        }
    }

    fn village(seed: i64, biome: u8) -> StructureStart {
        let mut rng = JavaRandom::new(seed);
        Village::new(seed).start_at(0, 0, &mut rng, &Uniform(biome))
    }

    #[test]
    fn village_grows_past_its_roads_without_overlap() {
        let start = village(12345, PLAINS);
        let c = &start.components;
        assert!(c.iter().filter(|c| !c.is_village_road()).count() > 2);
        for i in 0..c.len() {
            for j in i + 1..c.len() {
                assert!(!c[i].frame.bbox.intersects(&c[j].frame.bbox), "{i} overlaps {j}");
            }
        }
        for comp in c {
            assert!(start.bbox.intersects(&comp.frame.bbox));
        }
    }

    #[test]
    fn building_is_identical_for_the_same_seed() {
        let a = village(99, PLAINS);
        let b = village(99, PLAINS);
        let boxes = |s: &StructureStart| s.components.iter().map(|c| c.frame.bbox).collect::<Vec<_>>();
        assert_eq!(boxes(&a), boxes(&b));
    }

    #[test]
    fn desert_start_uses_desert_style() {
        let start = village(3, DESERT);
        for comp in &start.components {
            let Piece::Village(p) = &comp.piece else {
                panic!("village piece expected");
            };
            assert_eq!(p.style, VillageStyle::Desert);
        }
    }

    #[test]
    fn pieces_stay_near_the_well() {
        let start = village(2024, SAVANNA);
        let well = start.components[0].frame.bbox;
        for comp in &start.components {
            let bb = comp.frame.bbox;
            assert!((bb.min_x - well.min_x).abs() <= MAX_REACH + 64);
            assert!((bb.min_z - well.min_z).abs() <= MAX_REACH + 64);
        }
    }

    #[test]
    fn only_grid_candidates_in_village_biomes_spawn() {
        let v = Village::new(12345);
        let mut rng = JavaRandom::new(0);
        let mut found = 0;
        for cx in 0..32 {
            for cz in 0..32 {
                if v.can_spawn_at(cx, cz, &mut rng, &Uniform(PLAINS)) {
                    found += 1;
                }
                assert!(!v.can_spawn_at(cx, cz, &mut rng, &Uniform(crate::biomes::OCEAN)));
            }
        }
        assert_eq!(found, 1);
    }
}
