use proptest::prelude::*;
use strata_blocks::{Block, ids};
use strata_chunk::{Chunk, ChunkHandles, ChunkManager, ChunkStore, WORLD_HEIGHT, WorldAccess};

fn any_coord() -> impl Strategy<Value = i32> {
    -64i32..=320
}

proptest! {
    // Writes land only inside the chunk volume and read back exactly
    #[test]
    fn writes_are_bounds_checked(x in -4i32..20, y in any_coord(), z in -4i32..20, id in 1u8..=255, meta in 0u8..16) {
        let mut c = Chunk::new(0, 0);
        let inside = (0..16).contains(&x) && (0..16).contains(&z) && (0..WORLD_HEIGHT).contains(&y);
        let wrote = c.set_block(x, y, z, Block::new(id, meta));
        prop_assert_eq!(wrote, inside);
        if inside {
            prop_assert_eq!(c.block(x, y, z), Block::new(id, meta));
        } else {
            prop_assert_eq!(c.top_filled_y(), -1);
        }
    }

    // World-coordinate access through a window agrees with direct chunk access
    #[test]
    fn window_matches_chunks(wx in -16i32..32, y in 0i32..WORLD_HEIGHT, wz in -16i32..32) {
        let store = ChunkStore::new();
        for cx in -1..=1 {
            for cz in -1..=1 {
                store.set_chunk(Chunk::new(cx, cz));
            }
        }
        let handles = ChunkHandles::collect(&store, (-1, -1), (1, 1)).expect("all present");
        {
            let mut w = handles.lock();
            prop_assert!(w.set_block(wx, y, wz, Block::of(ids::STONE)));
            prop_assert_eq!(w.block(wx, y, wz), Block::of(ids::STONE));
            prop_assert_eq!(WorldAccess::height(&w, wx, wz), y + 1);
        }
        prop_assert_eq!(store.block_id(wx, y, wz), ids::STONE);
    }
}

#[test]
fn window_drops_writes_outside() {
    let store = ChunkStore::new();
    store.set_chunk(Chunk::new(0, 0));
    let handles = ChunkHandles::collect(&store, (0, 0), (0, 0)).expect("present");
    let mut w = handles.lock();
    assert!(!w.set_block(16, 64, 0, Block::of(ids::STONE)));
    assert_eq!(w.block(-1, 64, 0), Block::AIR);
}

#[test]
fn collect_reports_missing_neighbour() {
    let store = ChunkStore::new();
    store.set_chunk(Chunk::new(0, 0));
    store.set_chunk(Chunk::new(1, 0));
    let missing = ChunkHandles::collect(&store, (0, 0), (1, 1)).err();
    assert_eq!(missing, Some((0, 1)));
}

#[test]
fn store_create_and_stats() {
    let store = ChunkStore::new();
    assert!(store.get_chunk(3, 4, false).is_none());
    let c = store.get_chunk(3, 4, true).expect("created");
    assert_eq!(c.lock().cx, 3);
    assert!(store.has_chunk(3, 4));
    let s = store.stats();
    assert_eq!(s.created, 1);
    assert_eq!(s.misses, 2);
    assert_eq!(s.entries, 1);
    assert_eq!(store.coords(), vec![(3, 4)]);
}

#[test]
fn surface_lookups() {
    let mut c = Chunk::new(0, 0);
    for y in 0..60 {
        c.set_block(5, y, 5, Block::of(ids::STONE));
    }
    c.set_block(5, 60, 5, Block::of(ids::WATER));
    c.set_block(5, 70, 5, Block::of(ids::LEAVES));
    assert_eq!(WorldAccess::top_solid_or_liquid(&c, 5, 5), 60);
    assert_eq!(WorldAccess::precipitation_height(&c, 5, 5), 71);
    assert_eq!(WorldAccess::height(&c, 5, 5), 71);
}
