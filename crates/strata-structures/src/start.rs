use hashbrown::HashSet;
use strata_chunk::WorldAccess;
use strata_geom::BoundingBox;
use strata_noise::JavaRandom;

use crate::component::StructureComponent;
use crate::{SEA_LEVEL, StructureKind};

/// Root of one placed structure: the component arena built for a region and
/// the chunks it has already been stamped into.
#[derive(Debug)]
pub struct StructureStart {
    pub kind: StructureKind,
    pub chunk_x: i32,
    pub chunk_z: i32,
    pub bbox: BoundingBox,
    pub components: Vec<StructureComponent>,
    /// Starts that are too small to count are kept but never stamped.
    pub sizeable: bool,
    processed: HashSet<(i32, i32)>,
}

impl StructureStart {
    pub fn new(kind: StructureKind, chunk_x: i32, chunk_z: i32) -> Self {
        let x = chunk_x << 4;
        let z = chunk_z << 4;
        Self {
            kind,
            chunk_x,
            chunk_z,
            bbox: BoundingBox::new(x, 0, z, x + 15, 0, z + 15),
            components: Vec::new(),
            sizeable: true,
            processed: HashSet::new(),
        }
    }

    /// Recomputes the start box as the union of its component boxes.
    pub fn update_bbox(&mut self) {
        let mut it = self.components.iter();
        let Some(first) = it.next() else {
            return;
        };
        let mut bbox = first.frame.bbox;
        for c in it {
            bbox.expand_to(&c.frame.bbox);
        }
        self.bbox = bbox;
    }

    /// Moves the whole structure down so it sits at least `min_depth` blocks
    /// under sea level, with a random extra drop.
    pub fn mark_available_height(&mut self, rng: &mut JavaRandom, min_depth: i32) {
        let limit = SEA_LEVEL - min_depth;
        let mut top = self.bbox.y_size() + 1;
        if top < limit {
            top += rng.next_bounded_int(limit - top);
        }
        self.offset(top - self.bbox.max_y);
    }

    pub fn offset(&mut self, dy: i32) {
        self.bbox.offset(0, dy, 0);
        for c in &mut self.components {
            c.frame.bbox.offset(0, dy, 0);
        }
    }

    /// Stamps every component crossing `clip`; components that refuse are dropped.
    pub fn generate(&mut self, w: &mut dyn WorldAccess, rng: &mut JavaRandom, clip: &BoundingBox) {
        self.components.retain_mut(|c| !c.frame.bbox.intersects(clip) || c.add_parts(w, rng, clip));
    }

    pub fn is_processed(&self, cx: i32, cz: i32) -> bool {
        self.processed.contains(&(cx, cz))
    }

    pub fn mark_processed(&mut self, cx: i32, cz: i32) {
        self.processed.insert((cx, cz));
    }
}
