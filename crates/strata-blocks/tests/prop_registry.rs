use proptest::prelude::*;
use strata_blocks::{Block, Material, block_info, id_by_name, ids};

proptest! {
    // Every id resolves and reports itself
    #[test]
    fn every_id_resolves(id in any::<u8>()) {
        prop_assert_eq!(block_info(id).id, id);
    }

    // Named ids round-trip through the name table
    #[test]
    fn names_round_trip(id in any::<u8>()) {
        let info = block_info(id);
        if info.name != "unknown" {
            prop_assert_eq!(id_by_name(info.name), Some(id));
        }
    }

    // Metadata is always clamped to four bits
    #[test]
    fn meta_is_four_bits(id in any::<u8>(), meta in any::<u8>()) {
        prop_assert!(Block::new(id, meta).meta < 16);
    }
}

#[test]
fn liquids_do_not_block_movement() {
    for id in [ids::WATER, ids::FLOWING_WATER, ids::LAVA, ids::FLOWING_LAVA] {
        let m = block_info(id).material;
        assert!(m.is_liquid());
        assert!(!m.blocks_movement());
    }
    assert!(Block::of(ids::STONE).material().blocks_movement());
    assert_eq!(Block::of(ids::TALLGRASS).material(), Material::Vine);
    assert!(Block::of(ids::SNOW_LAYER).material().is_replaceable());
}
