use std::sync::OnceLock;

use crate::Material;
use crate::ids::*;

/// Static description of one block id.
#[derive(Clone, Copy, Debug)]
pub struct BlockInfo {
    pub id: u8,
    pub name: &'static str,
    pub material: Material,
}

const TABLE: &[(u8, &str, Material)] = &[
    (AIR, "air", Material::Air),
    (STONE, "stone", Material::Rock),
    (GRASS, "grass", Material::Grass),
    (DIRT, "dirt", Material::Ground),
    (COBBLESTONE, "cobblestone", Material::Rock),
    (PLANKS, "planks", Material::Wood),
    (SAPLING, "sapling", Material::Plants),
    (BEDROCK, "bedrock", Material::Rock),
    (FLOWING_WATER, "flowing_water", Material::Water),
    (WATER, "water", Material::Water),
    (FLOWING_LAVA, "flowing_lava", Material::Lava),
    (LAVA, "lava", Material::Lava),
    (SAND, "sand", Material::Sand),
    (GRAVEL, "gravel", Material::Sand),
    (GOLD_ORE, "gold_ore", Material::Rock),
    (IRON_ORE, "iron_ore", Material::Rock),
    (COAL_ORE, "coal_ore", Material::Rock),
    (LOG, "log", Material::Wood),
    (LEAVES, "leaves", Material::Leaves),
    (GLASS, "glass", Material::Glass),
    (LAPIS_ORE, "lapis_ore", Material::Rock),
    (DISPENSER, "dispenser", Material::Rock),
    (SANDSTONE, "sandstone", Material::Rock),
    (BED, "bed", Material::Cloth),
    (GOLDEN_RAIL, "golden_rail", Material::Circuits),
    (STICKY_PISTON, "sticky_piston", Material::Misc),
    (WEB, "web", Material::Web),
    (TALLGRASS, "tallgrass", Material::Vine),
    (DEADBUSH, "deadbush", Material::Vine),
    (PISTON, "piston", Material::Misc),
    (WOOL, "wool", Material::Cloth),
    (YELLOW_FLOWER, "yellow_flower", Material::Plants),
    (RED_FLOWER, "red_flower", Material::Plants),
    (BROWN_MUSHROOM, "brown_mushroom", Material::Plants),
    (RED_MUSHROOM, "red_mushroom", Material::Plants),
    (GOLD_BLOCK, "gold_block", Material::Iron),
    (IRON_BLOCK, "iron_block", Material::Iron),
    (DOUBLE_STONE_SLAB, "double_stone_slab", Material::Rock),
    (STONE_SLAB, "stone_slab", Material::Rock),
    (BRICK_BLOCK, "brick_block", Material::Rock),
    (TNT, "tnt", Material::Misc),
    (BOOKSHELF, "bookshelf", Material::Wood),
    (MOSSY_COBBLESTONE, "mossy_cobblestone", Material::Rock),
    (OBSIDIAN, "obsidian", Material::Rock),
    (TORCH, "torch", Material::Circuits),
    (MOB_SPAWNER, "mob_spawner", Material::Rock),
    (OAK_STAIRS, "oak_stairs", Material::Wood),
    (CHEST, "chest", Material::Wood),
    (REDSTONE_WIRE, "redstone_wire", Material::Circuits),
    (DIAMOND_ORE, "diamond_ore", Material::Rock),
    (CRAFTING_TABLE, "crafting_table", Material::Wood),
    (WHEAT, "wheat", Material::Plants),
    (FARMLAND, "farmland", Material::Ground),
    (FURNACE, "furnace", Material::Rock),
    (LIT_FURNACE, "lit_furnace", Material::Rock),
    (STANDING_SIGN, "standing_sign", Material::Wood),
    (WOODEN_DOOR, "wooden_door", Material::Wood),
    (LADDER, "ladder", Material::Circuits),
    (RAIL, "rail", Material::Circuits),
    (STONE_STAIRS, "stone_stairs", Material::Rock),
    (WALL_SIGN, "wall_sign", Material::Wood),
    (LEVER, "lever", Material::Circuits),
    (STONE_PRESSURE_PLATE, "stone_pressure_plate", Material::Rock),
    (IRON_DOOR, "iron_door", Material::Iron),
    (WOODEN_PRESSURE_PLATE, "wooden_pressure_plate", Material::Wood),
    (REDSTONE_ORE, "redstone_ore", Material::Rock),
    (REDSTONE_TORCH, "redstone_torch", Material::Circuits),
    (STONE_BUTTON, "stone_button", Material::Circuits),
    (SNOW_LAYER, "snow_layer", Material::SnowLayer),
    (ICE, "ice", Material::Ice),
    (SNOW, "snow", Material::Snow),
    (CACTUS, "cactus", Material::Cactus),
    (CLAY, "clay", Material::Clay),
    (REEDS, "reeds", Material::Plants),
    (FENCE, "fence", Material::Wood),
    (PUMPKIN, "pumpkin", Material::Gourd),
    (NETHERRACK, "netherrack", Material::Rock),
    (GLOWSTONE, "glowstone", Material::Glass),
    (LIT_PUMPKIN, "lit_pumpkin", Material::Gourd),
    (UNPOWERED_REPEATER, "unpowered_repeater", Material::Circuits),
    (TRAPDOOR, "trapdoor", Material::Wood),
    (MONSTER_EGG, "monster_egg", Material::Clay),
    (STONEBRICK, "stonebrick", Material::Rock),
    (BROWN_MUSHROOM_BLOCK, "brown_mushroom_block", Material::Wood),
    (RED_MUSHROOM_BLOCK, "red_mushroom_block", Material::Wood),
    (IRON_BARS, "iron_bars", Material::Iron),
    (GLASS_PANE, "glass_pane", Material::Glass),
    (MELON_BLOCK, "melon_block", Material::Gourd),
    (VINE, "vine", Material::Vine),
    (FENCE_GATE, "fence_gate", Material::Wood),
    (BRICK_STAIRS, "brick_stairs", Material::Rock),
    (STONE_BRICK_STAIRS, "stone_brick_stairs", Material::Rock),
    (MYCELIUM, "mycelium", Material::Grass),
    (WATERLILY, "waterlily", Material::Plants),
    (NETHER_BRICK, "nether_brick", Material::Rock),
    (NETHER_BRICK_STAIRS, "nether_brick_stairs", Material::Rock),
    (BREWING_STAND, "brewing_stand", Material::Iron),
    (CAULDRON, "cauldron", Material::Iron),
    (END_PORTAL, "end_portal", Material::Misc),
    (END_PORTAL_FRAME, "end_portal_frame", Material::Rock),
    (DOUBLE_WOODEN_SLAB, "double_wooden_slab", Material::Wood),
    (WOODEN_SLAB, "wooden_slab", Material::Wood),
    (COCOA, "cocoa", Material::Plants),
    (SANDSTONE_STAIRS, "sandstone_stairs", Material::Rock),
    (EMERALD_ORE, "emerald_ore", Material::Rock),
    (ENDER_CHEST, "ender_chest", Material::Rock),
    (TRIPWIRE_HOOK, "tripwire_hook", Material::Circuits),
    (TRIPWIRE, "tripwire", Material::Circuits),
    (SPRUCE_STAIRS, "spruce_stairs", Material::Wood),
    (BIRCH_STAIRS, "birch_stairs", Material::Wood),
    (JUNGLE_STAIRS, "jungle_stairs", Material::Wood),
    (COBBLESTONE_WALL, "cobblestone_wall", Material::Rock),
    (FLOWER_POT, "flower_pot", Material::Circuits),
    (CARROTS, "carrots", Material::Plants),
    (POTATOES, "potatoes", Material::Plants),
    (WOODEN_BUTTON, "wooden_button", Material::Circuits),
    (TRAPPED_CHEST, "trapped_chest", Material::Wood),
    (QUARTZ_STAIRS, "quartz_stairs", Material::Rock),
    (STAINED_HARDENED_CLAY, "stained_hardened_clay", Material::Rock),
    (LEAVES2, "leaves2", Material::Leaves),
    (LOG2, "log2", Material::Wood),
    (ACACIA_STAIRS, "acacia_stairs", Material::Wood),
    (DARK_OAK_STAIRS, "dark_oak_stairs", Material::Wood),
    (CARPET, "carpet", Material::Carpet),
    (HARDENED_CLAY, "hardened_clay", Material::Rock),
    (PACKED_ICE, "packed_ice", Material::PackedIce),
    (DOUBLE_PLANT, "double_plant", Material::Vine),
    (RED_SANDSTONE, "red_sandstone", Material::Rock),
    (RED_SANDSTONE_STAIRS, "red_sandstone_stairs", Material::Rock),
    (SPRUCE_FENCE, "spruce_fence", Material::Wood),
    (DARK_OAK_FENCE, "dark_oak_fence", Material::Wood),
    (ACACIA_FENCE, "acacia_fence", Material::Wood),
    (SPRUCE_DOOR, "spruce_door", Material::Wood),
    (ACACIA_DOOR, "acacia_door", Material::Wood),
    (GRASS_PATH, "grass_path", Material::Ground),
    (BEETROOTS, "beetroots", Material::Plants),
];

fn by_id() -> &'static [BlockInfo; 256] {
    static LOOKUP: OnceLock<[BlockInfo; 256]> = OnceLock::new();
    LOOKUP.get_or_init(|| {
        let mut out = [BlockInfo {
            id: 0,
            name: "unknown",
            material: Material::Misc,
        }; 256];
        for (i, slot) in out.iter_mut().enumerate() {
            slot.id = i as u8;
        }
        for &(id, name, material) in TABLE {
            out[id as usize] = BlockInfo { id, name, material };
        }
        out
    })
}

/// Lookup by id; ids without an entry report `"unknown"` with a solid material.
#[inline]
pub fn block_info(id: u8) -> &'static BlockInfo {
    &by_id()[id as usize]
}

pub fn id_by_name(name: &str) -> Option<u8> {
    TABLE.iter().find(|(_, n, _)| *n == name).map(|(id, _, _)| *id)
}
