use proptest::prelude::*;
use strata_geom::BlockPos;
use strata_noise::JavaRandom;
use strata_structures::biomes::{DESERT, PLAINS};
use strata_structures::stronghold_pieces::StrongholdKind;
use strata_structures::{BiomeSource, Mineshaft, Piece, StructureGenerator, StructureStart, Stronghold, Village};

struct Uniform(u8);

impl BiomeSource for Uniform {
    fn biome(&self, _x: i32, _z: i32) -> u8 {
        self.0
    }

    fn are_biomes_viable(&self, _x: i32, _z: i32, _radius: i32, allowed: &[u8]) -> bool {
        allowed.contains(&self.0)
    }

    fn find_biome_position(&self, x: i32, z: i32, _r: i32, allowed: &[u8], _rng: &mut JavaRandom) -> Option<BlockPos> {
        allowed.contains(&self.0).then_some(BlockPos::new(x, 0, z))
    }
}

fn overlapping(start: &StructureStart, skip: impl Fn(&Piece) -> bool) -> Option<(usize, usize)> {
    let c = &start.components;
    for i in 0..c.len() {
        for j in i + 1..c.len() {
            if skip(&c[i].piece) || skip(&c[j].piece) {
                continue;
            }
            if c[i].frame.bbox.intersects(&c[j].frame.bbox) {
                return Some((i, j));
            }
        }
    }
    None
}

fn chunk() -> impl Strategy<Value = i32> {
    -200i32..=200
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn village_components_are_disjoint(seed in any::<i64>(), cx in chunk(), cz in chunk(), desert in any::<bool>()) {
        let mut rng = JavaRandom::new(seed);
        let biome = if desert { DESERT } else { PLAINS };
        let start = Village::new(seed).start_at(cx, cz, &mut rng, &Uniform(biome));
        prop_assert!(!start.components.is_empty());
        prop_assert_eq!(overlapping(&start, |_| false), None);
    }

    #[test]
    fn mineshaft_components_are_disjoint(seed in any::<i64>(), cx in chunk(), cz in chunk()) {
        let mut rng = JavaRandom::new(seed);
        let start = Mineshaft::new().start_at(cx, cz, &mut rng, &Uniform(PLAINS));
        prop_assert_eq!(overlapping(&start, |_| false), None);
        for c in &start.components {
            prop_assert!(c.depth <= 9);
            prop_assert!(c.frame.bbox.min_y >= 1);
        }
    }

    #[test]
    fn start_building_is_deterministic(seed in any::<i64>(), cx in chunk(), cz in chunk()) {
        let build = || {
            let mut rng = JavaRandom::new(seed);
            Mineshaft::new().start_at(cx, cz, &mut rng, &Uniform(PLAINS))
        };
        let boxes = |s: StructureStart| s.components.iter().map(|c| c.frame.bbox).collect::<Vec<_>>();
        prop_assert_eq!(boxes(build()), boxes(build()));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    // Corridor fillers run into the wall of the piece they meet, so they are
    // left out of the check.
    #[test]
    fn stronghold_rooms_are_disjoint(seed in any::<i64>(), cx in -20i32..=20, cz in -20i32..=20) {
        let mut rng = JavaRandom::new(seed);
        let start = Stronghold::new(seed, vec![PLAINS]).start_at(cx, cz, &mut rng, &Uniform(PLAINS));
        let filler = |p: &Piece| matches!(p, Piece::Stronghold(s) if matches!(s.kind, StrongholdKind::Corridor { .. }));
        prop_assert_eq!(overlapping(&start, filler), None);
    }
}
