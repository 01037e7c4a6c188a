use crate::{BlockPos, Facing};

/// Axis-aligned integer cuboid, inclusive on both ends. `min <= max` on every
/// axis; constructors swap reversed corners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub min_x: i32,
    pub min_y: i32,
    pub min_z: i32,
    pub max_x: i32,
    pub max_y: i32,
    pub max_z: i32,
}

impl BoundingBox {
    pub fn new(x1: i32, y1: i32, z1: i32, x2: i32, y2: i32, z2: i32) -> Self {
        Self {
            min_x: x1.min(x2),
            min_y: y1.min(y2),
            min_z: z1.min(z2),
            max_x: x1.max(x2),
            max_y: y1.max(y2),
            max_z: z1.max(z2),
        }
    }

    /// Horizontal box spanning the full height range `[y0, y1]`.
    pub fn from_columns(x1: i32, z1: i32, x2: i32, z2: i32, y0: i32, y1: i32) -> Self {
        Self::new(x1, y0, z1, x2, y1, z2)
    }

    /// Box for a piece of size `w x h x l` (in its local frame) attached at
    /// `(x, y, z)` with local offset `(ox, oy, oz)`, extending away from the
    /// attachment point in the direction of `facing`.
    #[allow(clippy::too_many_arguments)]
    pub fn oriented(
        x: i32,
        y: i32,
        z: i32,
        ox: i32,
        oy: i32,
        oz: i32,
        w: i32,
        h: i32,
        l: i32,
        facing: Facing,
    ) -> Self {
        match facing {
            Facing::North => Self::new(
                x + ox,
                y + oy,
                z - l + 1 + oz,
                x + w - 1 + ox,
                y + h - 1 + oy,
                z + oz,
            ),
            Facing::South => Self::new(
                x + ox,
                y + oy,
                z + oz,
                x + w - 1 + ox,
                y + h - 1 + oy,
                z + l - 1 + oz,
            ),
            Facing::West => Self::new(
                x - l + 1 + oz,
                y + oy,
                z + ox,
                x + oz,
                y + h - 1 + oy,
                z + w - 1 + ox,
            ),
            Facing::East => Self::new(
                x + oz,
                y + oy,
                z + ox,
                x + l - 1 + oz,
                y + h - 1 + oy,
                z + w - 1 + ox,
            ),
        }
    }

    /// Full column of one chunk, `[0, 255]` in y. Structures are stamped
    /// through it one chunk at a time.
    pub fn chunk_column(cx: i32, cz: i32) -> Self {
        let x = cx << 4;
        let z = cz << 4;
        Self::new(x, 0, z, x + 15, 255, z + 15)
    }

    #[inline]
    pub fn intersects(&self, o: &BoundingBox) -> bool {
        self.max_x >= o.min_x
            && self.min_x <= o.max_x
            && self.max_z >= o.min_z
            && self.min_z <= o.max_z
            && self.max_y >= o.min_y
            && self.min_y <= o.max_y
    }

    /// Footprint overlap ignoring y.
    #[inline]
    pub fn intersects_xz(&self, min_x: i32, min_z: i32, max_x: i32, max_z: i32) -> bool {
        self.max_x >= min_x && self.min_x <= max_x && self.max_z >= min_z && self.min_z <= max_z
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        x >= self.min_x
            && x <= self.max_x
            && z >= self.min_z
            && z <= self.max_z
            && y >= self.min_y
            && y <= self.max_y
    }

    #[inline]
    pub fn contains_pos(&self, p: BlockPos) -> bool {
        self.contains(p.x, p.y, p.z)
    }

    /// Grow to include `o`.
    pub fn expand_to(&mut self, o: &BoundingBox) {
        self.min_x = self.min_x.min(o.min_x);
        self.min_y = self.min_y.min(o.min_y);
        self.min_z = self.min_z.min(o.min_z);
        self.max_x = self.max_x.max(o.max_x);
        self.max_y = self.max_y.max(o.max_y);
        self.max_z = self.max_z.max(o.max_z);
    }

    pub fn offset(&mut self, dx: i32, dy: i32, dz: i32) {
        self.min_x += dx;
        self.min_y += dy;
        self.min_z += dz;
        self.max_x += dx;
        self.max_y += dy;
        self.max_z += dz;
    }

    #[inline]
    pub fn x_size(&self) -> i32 {
        self.max_x - self.min_x + 1
    }

    #[inline]
    pub fn y_size(&self) -> i32 {
        self.max_y - self.min_y + 1
    }

    #[inline]
    pub fn z_size(&self) -> i32 {
        self.max_z - self.min_z + 1
    }

    pub fn center(&self) -> BlockPos {
        BlockPos::new(
            self.min_x + (self.max_x - self.min_x + 1) / 2,
            self.min_y + (self.max_y - self.min_y + 1) / 2,
            self.min_z + (self.max_z - self.min_z + 1) / 2,
        )
    }
}

impl core::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "({},{},{} -> {},{},{})",
            self.min_x, self.min_y, self.min_z, self.max_x, self.max_y, self.max_z
        )
    }
}
