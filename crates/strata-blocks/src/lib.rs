//! Block ids, the static block table, and material predicates used by generation.
#![forbid(unsafe_code)]

pub mod ids;
pub mod material;
pub mod registry;

pub use material::Material;
pub use registry::{BlockInfo, block_info, id_by_name};

/// A voxel cell: numeric block id plus 4-bit metadata.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Block {
    pub id: u8,
    pub meta: u8,
}

impl Block {
    pub const AIR: Block = Block { id: ids::AIR, meta: 0 };

    #[inline]
    pub const fn new(id: u8, meta: u8) -> Self {
        Self { id, meta: meta & 15 }
    }

    #[inline]
    pub const fn of(id: u8) -> Self {
        Self { id, meta: 0 }
    }

    #[inline]
    pub fn material(self) -> Material {
        block_info(self.id).material
    }

    #[inline]
    pub fn is_air(self) -> bool {
        self.id == ids::AIR
    }
}
