//! Integer geometry shared by the generator crates: block positions, facings and structure boxes.
#![forbid(unsafe_code)]

mod bbox;
mod facing;

pub use bbox::BoundingBox;
pub use facing::{Axis, Facing};

use core::ops::{Add, Sub};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const ORIGIN: BlockPos = BlockPos { x: 0, y: 0, z: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn add(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    #[inline]
    pub const fn up(self, n: i32) -> Self {
        self.add(0, n, 0)
    }

    #[inline]
    pub const fn down(self, n: i32) -> Self {
        self.add(0, -n, 0)
    }

    /// Step `n` blocks in a horizontal direction.
    #[inline]
    pub fn offset(self, facing: Facing, n: i32) -> Self {
        let (dx, dz) = facing.step();
        self.add(dx * n, 0, dz * n)
    }

    #[inline]
    pub const fn chunk_x(self) -> i32 {
        self.x >> 4
    }

    #[inline]
    pub const fn chunk_z(self) -> i32 {
        self.z >> 4
    }

    /// Squared euclidean distance, as used by structure ring placement.
    #[inline]
    pub fn distance_sq(self, other: BlockPos) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        let dz = (self.z - other.z) as f64;
        dx * dx + dy * dy + dz * dz
    }
}

impl Add for BlockPos {
    type Output = BlockPos;
    #[inline]
    fn add(self, rhs: BlockPos) -> BlockPos {
        BlockPos::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for BlockPos {
    type Output = BlockPos;
    #[inline]
    fn sub(self, rhs: BlockPos) -> BlockPos {
        BlockPos::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn offset_then_back_is_identity(p in any::<BlockPos>(), f in any::<Facing>(), n in -64i32..64) {
            let p = BlockPos::new(p.x % 1_000_000, p.y % 1_000_000, p.z % 1_000_000);
            prop_assert_eq!(p.offset(f, n).offset(f.opposite(), n), p);
        }
    }

    #[test]
    fn chunk_coords_floor_negative() {
        assert_eq!(BlockPos::new(-1, 0, -17).chunk_x(), -1);
        assert_eq!(BlockPos::new(-1, 0, -17).chunk_z(), -2);
        assert_eq!(BlockPos::new(15, 0, 16).chunk_z(), 1);
    }
}
