//! Biome ids structure placement tests against.

pub const OCEAN: u8 = 0;
pub const PLAINS: u8 = 1;
pub const DESERT: u8 = 2;
pub const TAIGA: u8 = 5;
pub const SWAMPLAND: u8 = 6;
pub const ICE_PLAINS: u8 = 12;
pub const DESERT_HILLS: u8 = 17;
pub const TAIGA_HILLS: u8 = 19;
pub const JUNGLE: u8 = 21;
pub const JUNGLE_HILLS: u8 = 22;
pub const COLD_TAIGA: u8 = 30;
pub const COLD_TAIGA_HILLS: u8 = 31;
pub const REDWOOD_TAIGA: u8 = 32;
pub const REDWOOD_TAIGA_HILLS: u8 = 33;
pub const SAVANNA: u8 = 35;
pub const SAVANNA_PLATEAU: u8 = 36;
pub const MESA: u8 = 37;
pub const MESA_ROCK: u8 = 38;
pub const MESA_CLEAR_ROCK: u8 = 39;
pub const MUTATED_DESERT: u8 = 130;
pub const MUTATED_TAIGA: u8 = 133;
pub const MUTATED_TAIGA_COLD: u8 = 158;
pub const MUTATED_REDWOOD_TAIGA: u8 = 160;
pub const MUTATED_REDWOOD_TAIGA_HILLS: u8 = 161;
pub const MUTATED_SAVANNA: u8 = 163;
pub const MUTATED_SAVANNA_ROCK: u8 = 164;
pub const MUTATED_MESA: u8 = 165;
pub const MUTATED_MESA_ROCK: u8 = 166;
pub const MUTATED_MESA_CLEAR_ROCK: u8 = 167;

pub fn is_mesa(id: u8) -> bool {
    matches!(
        id,
        MESA | MESA_ROCK | MESA_CLEAR_ROCK | MUTATED_MESA | MUTATED_MESA_ROCK | MUTATED_MESA_CLEAR_ROCK
    )
}
