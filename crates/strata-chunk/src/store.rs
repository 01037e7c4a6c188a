use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use hashbrown::HashMap;
use parking_lot::{Mutex, RwLock};

use crate::{Chunk, ChunkManager, ChunkRef};

#[derive(Clone, Copy, Debug, Default)]
pub struct ChunkStoreStats {
    pub hits: u64,
    pub misses: u64,
    pub created: u64,
    pub entries: usize,
}

/// In-memory chunk manager keyed by chunk coordinate. Chunks are never
/// evicted; the store lives as long as the world.
#[derive(Default)]
pub struct ChunkStore {
    entries: RwLock<HashMap<(i32, i32), ChunkRef>>,
    hits: AtomicU64,
    misses: AtomicU64,
    created: AtomicU64,
}

impl ChunkStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stored coordinates in ascending `(cx, cz)` order.
    pub fn coords(&self) -> Vec<(i32, i32)> {
        let mut out: Vec<_> = self.entries.read().keys().copied().collect();
        out.sort_unstable();
        out
    }

    pub fn remove(&self, cx: i32, cz: i32) -> Option<ChunkRef> {
        self.entries.write().remove(&(cx, cz))
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn stats(&self) -> ChunkStoreStats {
        ChunkStoreStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            created: self.created.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }

    fn lookup(&self, cx: i32, cz: i32) -> Option<ChunkRef> {
        self.entries.read().get(&(cx, cz)).cloned()
    }
}

impl ChunkManager for ChunkStore {
    fn get_chunk(&self, cx: i32, cz: i32, create: bool) -> Option<ChunkRef> {
        if let Some(chunk) = self.lookup(cx, cz) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Some(chunk);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        if !create {
            return None;
        }
        let mut entries = self.entries.write();
        let chunk = entries.entry((cx, cz)).or_insert_with(|| {
            self.created.fetch_add(1, Ordering::Relaxed);
            Arc::new(Mutex::new(Chunk::new(cx, cz)))
        });
        Some(Arc::clone(chunk))
    }

    fn set_chunk(&self, chunk: Chunk) {
        let key = (chunk.cx, chunk.cz);
        self.entries.write().insert(key, Arc::new(Mutex::new(chunk)));
    }

    fn has_chunk(&self, cx: i32, cz: i32) -> bool {
        self.entries.read().contains_key(&(cx, cz))
    }
}
