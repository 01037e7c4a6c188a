/// Coarse physical class of a block; generation rules are phrased against it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Material {
    Air,
    Rock,
    Ground,
    Grass,
    Sand,
    Clay,
    Wood,
    Leaves,
    Plants,
    Vine,
    Water,
    Lava,
    Ice,
    PackedIce,
    SnowLayer,
    Snow,
    Cactus,
    Gourd,
    Web,
    Glass,
    Cloth,
    Carpet,
    Circuits,
    Iron,
    Misc,
}

impl Material {
    #[inline]
    pub fn is_liquid(self) -> bool {
        matches!(self, Material::Water | Material::Lava)
    }

    /// Whether an entity cannot pass through the block; drives the
    /// "top solid or liquid" lookups used for ground levelling.
    #[inline]
    pub fn blocks_movement(self) -> bool {
        !matches!(
            self,
            Material::Air
                | Material::Water
                | Material::Lava
                | Material::Plants
                | Material::Vine
                | Material::SnowLayer
                | Material::Web
                | Material::Carpet
                | Material::Circuits
        )
    }

    #[inline]
    pub fn is_solid(self) -> bool {
        self.blocks_movement()
    }

    /// Blocks a growing plant or tree may overwrite.
    #[inline]
    pub fn is_replaceable(self) -> bool {
        matches!(
            self,
            Material::Air | Material::Water | Material::Lava | Material::Vine | Material::SnowLayer
        )
    }

    /// Whether the block stops the column heightmap; thin plants, rails and
    /// glass let it pass.
    #[inline]
    pub fn blocks_light(self) -> bool {
        !matches!(
            self,
            Material::Air
                | Material::Plants
                | Material::Vine
                | Material::Circuits
                | Material::Glass
                | Material::SnowLayer
                | Material::Carpet
        )
    }

    #[inline]
    pub fn is_opaque(self) -> bool {
        self.blocks_movement() && !matches!(self, Material::Leaves | Material::Glass | Material::Ice)
    }
}
