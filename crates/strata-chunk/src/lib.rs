//! Voxel chunk storage and the world-facing traits generation writes through.
#![forbid(unsafe_code)]

mod chunk;
mod store;
mod window;

pub use chunk::{CHUNK_WIDTH, Chunk, DEFAULT_BIOME_COLOR, SECTION_COUNT, Section, WORLD_HEIGHT};
pub use store::{ChunkStore, ChunkStoreStats};
pub use window::{ChunkHandles, ChunkWindow};

use std::sync::Arc;

use parking_lot::Mutex;
use strata_blocks::{Block, block_info};

/// Shared handle to a stored chunk.
pub type ChunkRef = Arc<Mutex<Chunk>>;

/// Chunk storage the generator writes into. Storage itself lives outside the
/// generator; implementations decide persistence and eviction.
pub trait ChunkManager: Send + Sync {
    /// Returns the stored chunk, or a fresh empty one when `create` is set.
    fn get_chunk(&self, cx: i32, cz: i32, create: bool) -> Option<ChunkRef>;

    fn set_chunk(&self, chunk: Chunk);

    fn has_chunk(&self, cx: i32, cz: i32) -> bool {
        self.get_chunk(cx, cz, false).is_some()
    }

    fn block_id(&self, x: i32, y: i32, z: i32) -> u8 {
        match self.get_chunk(x >> 4, z >> 4, false) {
            Some(chunk) => chunk.lock().block(x & 15, y, z & 15).id,
            None => 0,
        }
    }

    fn set_block(&self, x: i32, y: i32, z: i32, block: Block) -> bool {
        match self.get_chunk(x >> 4, z >> 4, false) {
            Some(chunk) => chunk.lock().set_block(x & 15, y, z & 15, block),
            None => false,
        }
    }

    fn height(&self, x: i32, z: i32) -> i32 {
        match self.get_chunk(x >> 4, z >> 4, false) {
            Some(chunk) => chunk.lock().height(x & 15, z & 15),
            None => 0,
        }
    }
}

/// Block-level view in world coordinates used by structures and decoration.
/// Reads outside the view return air and writes are dropped.
pub trait WorldAccess {
    fn block(&self, x: i32, y: i32, z: i32) -> Block;

    fn set_block(&mut self, x: i32, y: i32, z: i32, block: Block) -> bool;

    fn max_height(&self) -> i32 {
        WORLD_HEIGHT
    }

    fn is_air(&self, x: i32, y: i32, z: i32) -> bool {
        self.block(x, y, z).is_air()
    }

    /// Biome id of the column when the view carries biome data.
    fn biome(&self, _x: i32, _z: i32) -> Option<u8> {
        None
    }

    /// One above the highest light-stopping block of the column.
    fn height(&self, x: i32, z: i32) -> i32 {
        let mut y = self.max_height() - 1;
        while y >= 0 {
            if block_info(self.block(x, y, z).id).material.blocks_light() {
                return y + 1;
            }
            y -= 1;
        }
        0
    }

    /// First y above the topmost block that blocks movement and is not foliage.
    fn top_solid_or_liquid(&self, x: i32, z: i32) -> i32 {
        let mut y = self.max_height() - 1;
        while y >= 0 {
            let m = self.block(x, y, z).material();
            if m.blocks_movement() && m != strata_blocks::Material::Leaves {
                return y + 1;
            }
            y -= 1;
        }
        0
    }

    /// First y above the topmost block that blocks movement or is liquid.
    fn precipitation_height(&self, x: i32, z: i32) -> i32 {
        let mut y = self.max_height() - 1;
        while y >= 0 {
            let m = self.block(x, y, z).material();
            if m.blocks_movement() || m.is_liquid() {
                return y + 1;
            }
            y -= 1;
        }
        0
    }
}

impl WorldAccess for Chunk {
    fn block(&self, x: i32, y: i32, z: i32) -> Block {
        if x >> 4 != self.cx || z >> 4 != self.cz {
            return Block::AIR;
        }
        Chunk::block(self, x & 15, y, z & 15)
    }

    fn set_block(&mut self, x: i32, y: i32, z: i32, block: Block) -> bool {
        if x >> 4 != self.cx || z >> 4 != self.cz {
            return false;
        }
        Chunk::set_block(self, x & 15, y, z & 15, block)
    }

    fn biome(&self, x: i32, z: i32) -> Option<u8> {
        (x >> 4 == self.cx && z >> 4 == self.cz).then(|| Chunk::biome(self, x & 15, z & 15))
    }

    fn height(&self, x: i32, z: i32) -> i32 {
        if x >> 4 != self.cx || z >> 4 != self.cz {
            return 0;
        }
        Chunk::height(self, x & 15, z & 15)
    }
}
