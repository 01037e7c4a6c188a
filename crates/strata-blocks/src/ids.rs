//! Numeric block ids.

pub const AIR: u8 = 0;
pub const STONE: u8 = 1;
pub const GRASS: u8 = 2;
pub const DIRT: u8 = 3;
pub const COBBLESTONE: u8 = 4;
pub const PLANKS: u8 = 5;
pub const SAPLING: u8 = 6;
pub const BEDROCK: u8 = 7;
pub const FLOWING_WATER: u8 = 8;
pub const WATER: u8 = 9;
pub const FLOWING_LAVA: u8 = 10;
pub const LAVA: u8 = 11;
pub const SAND: u8 = 12;
pub const GRAVEL: u8 = 13;
pub const GOLD_ORE: u8 = 14;
pub const IRON_ORE: u8 = 15;
pub const COAL_ORE: u8 = 16;
pub const LOG: u8 = 17;
pub const LEAVES: u8 = 18;
pub const GLASS: u8 = 20;
pub const LAPIS_ORE: u8 = 21;
pub const DISPENSER: u8 = 23;
pub const SANDSTONE: u8 = 24;
pub const BED: u8 = 26;
pub const GOLDEN_RAIL: u8 = 27;
pub const STICKY_PISTON: u8 = 29;
pub const WEB: u8 = 30;
pub const TALLGRASS: u8 = 31;
pub const DEADBUSH: u8 = 32;
pub const PISTON: u8 = 33;
pub const WOOL: u8 = 35;
pub const YELLOW_FLOWER: u8 = 37;
pub const RED_FLOWER: u8 = 38;
pub const BROWN_MUSHROOM: u8 = 39;
pub const RED_MUSHROOM: u8 = 40;
pub const GOLD_BLOCK: u8 = 41;
pub const IRON_BLOCK: u8 = 42;
pub const DOUBLE_STONE_SLAB: u8 = 43;
pub const STONE_SLAB: u8 = 44;
pub const BRICK_BLOCK: u8 = 45;
pub const TNT: u8 = 46;
pub const BOOKSHELF: u8 = 47;
pub const MOSSY_COBBLESTONE: u8 = 48;
pub const OBSIDIAN: u8 = 49;
pub const TORCH: u8 = 50;
pub const MOB_SPAWNER: u8 = 52;
pub const OAK_STAIRS: u8 = 53;
pub const CHEST: u8 = 54;
pub const REDSTONE_WIRE: u8 = 55;
pub const DIAMOND_ORE: u8 = 56;
pub const CRAFTING_TABLE: u8 = 58;
pub const WHEAT: u8 = 59;
pub const FARMLAND: u8 = 60;
pub const FURNACE: u8 = 61;
pub const LIT_FURNACE: u8 = 62;
pub const STANDING_SIGN: u8 = 63;
pub const WOODEN_DOOR: u8 = 64;
pub const LADDER: u8 = 65;
pub const RAIL: u8 = 66;
pub const STONE_STAIRS: u8 = 67;
pub const WALL_SIGN: u8 = 68;
pub const LEVER: u8 = 69;
pub const STONE_PRESSURE_PLATE: u8 = 70;
pub const IRON_DOOR: u8 = 71;
pub const WOODEN_PRESSURE_PLATE: u8 = 72;
pub const REDSTONE_ORE: u8 = 73;
pub const REDSTONE_TORCH: u8 = 76;
pub const STONE_BUTTON: u8 = 77;
pub const SNOW_LAYER: u8 = 78;
pub const ICE: u8 = 79;
pub const SNOW: u8 = 80;
pub const CACTUS: u8 = 81;
pub const CLAY: u8 = 82;
pub const REEDS: u8 = 83;
pub const FENCE: u8 = 85;
pub const PUMPKIN: u8 = 86;
pub const NETHERRACK: u8 = 87;
pub const GLOWSTONE: u8 = 89;
pub const LIT_PUMPKIN: u8 = 91;
pub const UNPOWERED_REPEATER: u8 = 93;
pub const TRAPDOOR: u8 = 96;
pub const MONSTER_EGG: u8 = 97;
pub const STONEBRICK: u8 = 98;
pub const BROWN_MUSHROOM_BLOCK: u8 = 99;
pub const RED_MUSHROOM_BLOCK: u8 = 100;
pub const IRON_BARS: u8 = 101;
pub const GLASS_PANE: u8 = 102;
pub const MELON_BLOCK: u8 = 103;
pub const VINE: u8 = 106;
pub const FENCE_GATE: u8 = 107;
pub const BRICK_STAIRS: u8 = 108;
pub const STONE_BRICK_STAIRS: u8 = 109;
pub const MYCELIUM: u8 = 110;
pub const WATERLILY: u8 = 111;
pub const NETHER_BRICK: u8 = 112;
pub const NETHER_BRICK_STAIRS: u8 = 114;
pub const BREWING_STAND: u8 = 117;
pub const CAULDRON: u8 = 118;
pub const END_PORTAL: u8 = 119;
pub const END_PORTAL_FRAME: u8 = 120;
pub const DOUBLE_WOODEN_SLAB: u8 = 125;
pub const WOODEN_SLAB: u8 = 126;
pub const COCOA: u8 = 127;
pub const SANDSTONE_STAIRS: u8 = 128;
pub const EMERALD_ORE: u8 = 129;
pub const ENDER_CHEST: u8 = 130;
pub const TRIPWIRE_HOOK: u8 = 131;
pub const TRIPWIRE: u8 = 132;
pub const SPRUCE_STAIRS: u8 = 134;
pub const BIRCH_STAIRS: u8 = 135;
pub const JUNGLE_STAIRS: u8 = 136;
pub const COBBLESTONE_WALL: u8 = 139;
pub const FLOWER_POT: u8 = 140;
pub const CARROTS: u8 = 141;
pub const POTATOES: u8 = 142;
pub const WOODEN_BUTTON: u8 = 143;
pub const TRAPPED_CHEST: u8 = 146;
pub const QUARTZ_STAIRS: u8 = 156;
pub const STAINED_HARDENED_CLAY: u8 = 159;
pub const LEAVES2: u8 = 161;
pub const LOG2: u8 = 162;
pub const ACACIA_STAIRS: u8 = 163;
pub const DARK_OAK_STAIRS: u8 = 164;
pub const CARPET: u8 = 171;
pub const HARDENED_CLAY: u8 = 172;
pub const PACKED_ICE: u8 = 174;
pub const DOUBLE_PLANT: u8 = 175;
pub const RED_SANDSTONE: u8 = 179;
pub const RED_SANDSTONE_STAIRS: u8 = 180;
pub const SPRUCE_FENCE: u8 = 188;
pub const DARK_OAK_FENCE: u8 = 191;
pub const ACACIA_FENCE: u8 = 192;
pub const SPRUCE_DOOR: u8 = 193;
pub const ACACIA_DOOR: u8 = 196;
pub const GRASS_PATH: u8 = 198;
pub const BEETROOTS: u8 = 207;
