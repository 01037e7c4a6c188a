use parking_lot::MutexGuard;
use strata_blocks::Block;

use crate::{Chunk, ChunkManager, ChunkRef, WorldAccess};

/// Handles to a rectangle of stored chunks, collected so the chunks can be
/// locked together for one population pass.
pub struct ChunkHandles {
    handles: Vec<ChunkRef>,
}

impl ChunkHandles {
    /// Collects chunks `cx0..=cx1` by `cz0..=cz1` in ascending order. Returns
    /// the first missing coordinate when any chunk is absent.
    pub fn collect<M: ChunkManager + ?Sized>(
        manager: &M,
        (cx0, cz0): (i32, i32),
        (cx1, cz1): (i32, i32),
    ) -> Result<Self, (i32, i32)> {
        let mut handles = Vec::new();
        for cx in cx0..=cx1 {
            for cz in cz0..=cz1 {
                match manager.get_chunk(cx, cz, false) {
                    Some(h) => handles.push(h),
                    None => return Err((cx, cz)),
                }
            }
        }
        Ok(Self { handles })
    }

    /// Locks every chunk, always in ascending coordinate order.
    pub fn lock(&self) -> ChunkWindow<'_> {
        ChunkWindow {
            guards: self.handles.iter().map(|h| h.lock()).collect(),
        }
    }
}

/// Exclusive view over a few neighbouring chunks in world coordinates.
pub struct ChunkWindow<'a> {
    guards: Vec<MutexGuard<'a, Chunk>>,
}

impl<'a> ChunkWindow<'a> {
    #[inline]
    fn find(&self, cx: i32, cz: i32) -> Option<&Chunk> {
        self.guards
            .iter()
            .find(|g| g.cx == cx && g.cz == cz)
            .map(|g| &**g)
    }

    #[inline]
    fn find_mut(&mut self, cx: i32, cz: i32) -> Option<&mut Chunk> {
        self.guards
            .iter_mut()
            .find(|g| g.cx == cx && g.cz == cz)
            .map(|g| &mut **g)
    }

    pub fn chunk(&self, cx: i32, cz: i32) -> Option<&Chunk> {
        self.find(cx, cz)
    }

    pub fn chunk_mut(&mut self, cx: i32, cz: i32) -> Option<&mut Chunk> {
        self.find_mut(cx, cz)
    }

    pub fn contains_column(&self, x: i32, z: i32) -> bool {
        self.find(x >> 4, z >> 4).is_some()
    }
}

impl<'a> WorldAccess for ChunkWindow<'a> {
    fn block(&self, x: i32, y: i32, z: i32) -> Block {
        match self.find(x >> 4, z >> 4) {
            Some(c) => c.block(x & 15, y, z & 15),
            None => Block::AIR,
        }
    }

    fn set_block(&mut self, x: i32, y: i32, z: i32, block: Block) -> bool {
        match self.find_mut(x >> 4, z >> 4) {
            Some(c) => c.set_block(x & 15, y, z & 15, block),
            None => false,
        }
    }

    fn biome(&self, x: i32, z: i32) -> Option<u8> {
        self.find(x >> 4, z >> 4).map(|c| c.biome(x & 15, z & 15))
    }

    fn height(&self, x: i32, z: i32) -> i32 {
        match self.find(x >> 4, z >> 4) {
            Some(c) => c.height(x & 15, z & 15),
            None => 0,
        }
    }
}
