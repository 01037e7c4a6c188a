use strata_blocks::{Block, block_info};

pub const CHUNK_WIDTH: i32 = 16;
pub const SECTION_COUNT: usize = 16;
pub const WORLD_HEIGHT: i32 = SECTION_COUNT as i32 * 16;
/// Plains grass tint used until the generator writes real colours.
pub const DEFAULT_BIOME_COLOR: u32 = 0xFF7C_A800;

const SECTION_VOLUME: usize = 16 * 16 * 16;

/// A 16-block-tall slab of a chunk. Ids and metadata are stored in parallel
/// arrays indexed `(y << 8) | (z << 4) | x`.
#[derive(Clone, Debug)]
pub struct Section {
    ids: Box<[u8]>,
    meta: Box<[u8]>,
    non_air: u16,
}

impl Section {
    fn new() -> Self {
        Self {
            ids: vec![0; SECTION_VOLUME].into_boxed_slice(),
            meta: vec![0; SECTION_VOLUME].into_boxed_slice(),
            non_air: 0,
        }
    }

    #[inline]
    fn idx(x: usize, y: usize, z: usize) -> usize {
        (y << 8) | (z << 4) | x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> Block {
        let i = Self::idx(x, y, z);
        Block {
            id: self.ids[i],
            meta: self.meta[i],
        }
    }

    fn set(&mut self, x: usize, y: usize, z: usize, block: Block) {
        let i = Self::idx(x, y, z);
        let was_air = self.ids[i] == 0;
        let is_air = block.id == 0;
        if was_air && !is_air {
            self.non_air += 1;
        } else if !was_air && is_air {
            self.non_air -= 1;
        }
        self.ids[i] = block.id;
        self.meta[i] = block.meta & 15;
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.non_air == 0
    }
}

/// A 16x16 column of sections plus per-column biome data and heightmap.
#[derive(Clone, Debug)]
pub struct Chunk {
    pub cx: i32,
    pub cz: i32,
    sections: [Option<Section>; SECTION_COUNT],
    biomes: [u8; 256],
    biome_colors: [u32; 256],
    heightmap: [i32; 256],
    populated: bool,
}

#[inline]
fn column(x: i32, z: i32) -> usize {
    ((z << 4) | x) as usize
}

#[inline]
fn in_column(x: i32, z: i32) -> bool {
    (0..CHUNK_WIDTH).contains(&x) && (0..CHUNK_WIDTH).contains(&z)
}

impl Chunk {
    pub fn new(cx: i32, cz: i32) -> Self {
        Self {
            cx,
            cz,
            sections: Default::default(),
            biomes: [0; 256],
            biome_colors: [DEFAULT_BIOME_COLOR; 256],
            heightmap: [0; 256],
            populated: false,
        }
    }

    /// Block at local coordinates; anything out of range reads as air.
    #[inline]
    pub fn block(&self, x: i32, y: i32, z: i32) -> Block {
        if !in_column(x, z) || !(0..WORLD_HEIGHT).contains(&y) {
            return Block::AIR;
        }
        match &self.sections[(y >> 4) as usize] {
            Some(s) => s.get(x as usize, (y & 15) as usize, z as usize),
            None => Block::AIR,
        }
    }

    #[inline]
    pub fn block_id(&self, x: i32, y: i32, z: i32) -> u8 {
        self.block(x, y, z).id
    }

    /// Writes a block at local coordinates. Out-of-range positions are a no-op
    /// and return `false`.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, block: Block) -> bool {
        if !in_column(x, z) || !(0..WORLD_HEIGHT).contains(&y) {
            return false;
        }
        let si = (y >> 4) as usize;
        if self.sections[si].is_none() {
            if block.is_air() {
                return true;
            }
            self.sections[si] = Some(Section::new());
        }
        if let Some(section) = self.sections[si].as_mut() {
            section.set(x as usize, (y & 15) as usize, z as usize, block);
        }
        self.update_height(x, y, z, block);
        true
    }

    fn update_height(&mut self, x: i32, y: i32, z: i32, block: Block) {
        let col = column(x, z);
        let h = self.heightmap[col];
        if block_info(block.id).material.blocks_light() {
            if y >= h {
                self.heightmap[col] = y + 1;
            }
        } else if y == h - 1 {
            let mut ny = y - 1;
            while ny >= 0 && !block_info(self.block(x, ny, z).id).material.blocks_light() {
                ny -= 1;
            }
            self.heightmap[col] = ny + 1;
        }
    }

    /// One above the highest light-stopping block in the column.
    #[inline]
    pub fn height(&self, x: i32, z: i32) -> i32 {
        if !in_column(x, z) {
            return 0;
        }
        self.heightmap[column(x, z)]
    }

    pub fn recompute_heightmap(&mut self) {
        for z in 0..CHUNK_WIDTH {
            for x in 0..CHUNK_WIDTH {
                let mut y = self.top_filled_y();
                while y >= 0 && !block_info(self.block(x, y, z).id).material.blocks_light() {
                    y -= 1;
                }
                self.heightmap[column(x, z)] = y + 1;
            }
        }
    }

    /// Highest y that could hold a block: the top of the highest non-empty section.
    pub fn top_filled_y(&self) -> i32 {
        for (i, s) in self.sections.iter().enumerate().rev() {
            if s.as_ref().is_some_and(|s| !s.is_empty()) {
                return i as i32 * 16 + 15;
            }
        }
        -1
    }

    #[inline]
    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index).and_then(|s| s.as_ref())
    }

    #[inline]
    pub fn biome(&self, x: i32, z: i32) -> u8 {
        if !in_column(x, z) {
            return 0;
        }
        self.biomes[column(x, z)]
    }

    pub fn set_biome(&mut self, x: i32, z: i32, id: u8) {
        if in_column(x, z) {
            self.biomes[column(x, z)] = id;
        }
    }

    #[inline]
    pub fn biomes(&self) -> &[u8; 256] {
        &self.biomes
    }

    #[inline]
    pub fn biome_color(&self, x: i32, z: i32) -> u32 {
        if !in_column(x, z) {
            return DEFAULT_BIOME_COLOR;
        }
        self.biome_colors[column(x, z)]
    }

    pub fn set_biome_color(&mut self, x: i32, z: i32, argb: u32) {
        if in_column(x, z) {
            self.biome_colors[column(x, z)] = argb;
        }
    }

    #[inline]
    pub fn is_populated(&self) -> bool {
        self.populated
    }

    pub fn set_populated(&mut self, populated: bool) {
        self.populated = populated;
    }

    /// Count of every block id in the chunk, air included.
    pub fn histogram(&self) -> [u32; 256] {
        let mut out = [0u32; 256];
        let mut counted = 0u32;
        for s in self.sections.iter().flatten() {
            for &id in s.ids.iter() {
                out[id as usize] += 1;
            }
            counted += SECTION_VOLUME as u32;
        }
        out[0] += (WORLD_HEIGHT as u32 * 256) - counted;
        out
    }
}

impl PartialEq for Chunk {
    fn eq(&self, other: &Self) -> bool {
        if self.cx != other.cx
            || self.cz != other.cz
            || self.biomes != other.biomes
            || self.biome_colors != other.biome_colors
        {
            return false;
        }
        for y in 0..WORLD_HEIGHT {
            for z in 0..CHUNK_WIDTH {
                for x in 0..CHUNK_WIDTH {
                    if self.block(x, y, z) != other.block(x, y, z) {
                        return false;
                    }
                }
            }
        }
        true
    }
}

impl Eq for Chunk {}
