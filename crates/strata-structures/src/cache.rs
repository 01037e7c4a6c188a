use std::collections::BTreeMap;
use std::sync::Arc;

use hashbrown::HashSet;
use parking_lot::{Mutex, RwLock};
use strata_geom::BoundingBox;

use crate::start::StructureStart;

/// Cached start together with the copy of its box used for lock-free scans.
#[derive(Clone)]
pub struct CachedStart {
    pub bbox: BoundingBox,
    pub sizeable: bool,
    pub start: Arc<Mutex<StructureStart>>,
}

/// Region-keyed start cache owned by one structure type for the lifetime of a
/// world. Regions are claimed once; only spawning regions keep a start.
#[derive(Default)]
pub struct StructureCache {
    visited: RwLock<HashSet<(i32, i32)>>,
    starts: RwLock<BTreeMap<(i32, i32), CachedStart>>,
}

impl StructureCache {
    /// Marks region `(rx, rz)` as looked at. Returns false when another caller
    /// already claimed it.
    pub fn claim(&self, rx: i32, rz: i32) -> bool {
        if self.visited.read().contains(&(rx, rz)) {
            return false;
        }
        self.visited.write().insert((rx, rz))
    }

    pub fn insert(&self, start: StructureStart) {
        let key = (start.chunk_x, start.chunk_z);
        let entry = CachedStart { bbox: start.bbox, sizeable: start.sizeable, start: Arc::new(Mutex::new(start)) };
        self.starts.write().insert(key, entry);
    }

    pub fn get(&self, rx: i32, rz: i32) -> Option<Arc<Mutex<StructureStart>>> {
        self.starts.read().get(&(rx, rz)).map(|c| c.start.clone())
    }

    /// Sizeable starts whose column footprint crosses `clip`, in ascending
    /// region order.
    pub fn intersecting(&self, clip: &BoundingBox) -> Vec<Arc<Mutex<StructureStart>>> {
        self.starts
            .read()
            .values()
            .filter(|c| c.sizeable && c.bbox.intersects_xz(clip.min_x, clip.min_z, clip.max_x, clip.max_z))
            .map(|c| c.start.clone())
            .collect()
    }

    /// Snapshot of every cached start in region order.
    pub fn entries(&self) -> Vec<((i32, i32), CachedStart)> {
        self.starts.read().iter().map(|(k, v)| (*k, v.clone())).collect()
    }

    pub fn len(&self) -> usize {
        self.starts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StructureKind;

    #[test]
    fn regions_are_claimed_once() {
        let cache = StructureCache::default();
        assert!(cache.claim(3, -2));
        assert!(!cache.claim(3, -2));
        assert!(cache.claim(-2, 3));
    }

    #[test]
    fn intersecting_is_ordered_and_skips_small_starts() {
        let cache = StructureCache::default();
        for (x, z) in [(1, 0), (0, 1), (0, 0)] {
            cache.insert(StructureStart::new(StructureKind::Village, x, z));
        }
        let mut small = StructureStart::new(StructureKind::Village, -1, 0);
        small.sizeable = false;
        cache.insert(small);
        let clip = BoundingBox::new(-64, 0, -64, 64, 255, 64);
        let found: Vec<_> = cache
            .intersecting(&clip)
            .iter()
            .map(|s| {
                let s = s.lock();
                (s.chunk_x, s.chunk_z)
            })
            .collect();
        assert_eq!(found, vec![(0, 0), (0, 1), (1, 0)]);
        assert_eq!(cache.len(), 4);
    }
}
