/// Horizontal axis of a facing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Z,
}

/// One of the four horizontal directions. Structure pieces are built in a local
/// frame and mapped into the world through their facing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum Facing {
    North,
    South,
    West,
    East,
}

impl Facing {
    /// Draw order used when a piece picks a random horizontal facing.
    pub const PLANE: [Facing; 4] = [Facing::North, Facing::East, Facing::South, Facing::West];

    /// Horizontal index order: south, west, north, east.
    pub const BY_HORIZONTAL_INDEX: [Facing; 4] =
        [Facing::South, Facing::West, Facing::North, Facing::East];

    #[inline]
    pub const fn horizontal_index(self) -> usize {
        match self {
            Facing::South => 0,
            Facing::West => 1,
            Facing::North => 2,
            Facing::East => 3,
        }
    }

    #[inline]
    pub const fn from_horizontal_index(i: usize) -> Facing {
        Self::BY_HORIZONTAL_INDEX[i & 3]
    }

    #[inline]
    pub const fn opposite(self) -> Facing {
        match self {
            Facing::North => Facing::South,
            Facing::South => Facing::North,
            Facing::West => Facing::East,
            Facing::East => Facing::West,
        }
    }

    /// Clockwise quarter turn seen from above.
    #[inline]
    pub const fn rotate_cw(self) -> Facing {
        match self {
            Facing::North => Facing::East,
            Facing::East => Facing::South,
            Facing::South => Facing::West,
            Facing::West => Facing::North,
        }
    }

    #[inline]
    pub const fn rotate_ccw(self) -> Facing {
        match self {
            Facing::North => Facing::West,
            Facing::West => Facing::South,
            Facing::South => Facing::East,
            Facing::East => Facing::North,
        }
    }

    #[inline]
    pub const fn axis(self) -> Axis {
        match self {
            Facing::North | Facing::South => Axis::Z,
            Facing::West | Facing::East => Axis::X,
        }
    }

    /// Unit step `(dx, dz)`.
    #[inline]
    pub const fn step(self) -> (i32, i32) {
        match self {
            Facing::North => (0, -1),
            Facing::South => (0, 1),
            Facing::West => (-1, 0),
            Facing::East => (1, 0),
        }
    }

    /// Block metadata value of this facing for directional blocks (2..=5).
    #[inline]
    pub const fn meta_index(self) -> u8 {
        match self {
            Facing::North => 2,
            Facing::South => 3,
            Facing::West => 4,
            Facing::East => 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotations_cycle() {
        for f in Facing::PLANE {
            assert_eq!(f.rotate_cw().rotate_ccw(), f);
            assert_eq!(f.rotate_cw().rotate_cw(), f.opposite());
            assert_eq!(Facing::from_horizontal_index(f.horizontal_index()), f);
        }
    }

    #[test]
    fn steps_are_opposed() {
        for f in Facing::PLANE {
            let (dx, dz) = f.step();
            let (ox, oz) = f.opposite().step();
            assert_eq!((dx + ox, dz + oz), (0, 0));
        }
    }
}
