use proptest::prelude::*;
use strata_world::GeneratorSettings;
use strata_world::biome;
use strata_world::layer::LayerStack;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    // Overlapping queries agree cell for cell on their shared area
    #[test]
    fn overlapping_block_queries_agree(seed in any::<i64>(), x in -2000i32..2000, z in -2000i32..2000, shift in 1i32..12) {
        let stack = LayerStack::new(seed, &GeneratorSettings::default());
        let a = stack.block_grid(x, z, 16, 16);
        let b = stack.block_grid(x + shift, z + shift, 16, 16);
        let n = (16 - shift) as usize;
        let s = shift as usize;
        for j in 0..n {
            for i in 0..n {
                prop_assert_eq!(a[(i + s) + (j + s) * 16], b[i + j * 16]);
            }
        }
    }

    #[test]
    fn overlapping_quarter_queries_agree(seed in any::<i64>(), x in -500i32..500, z in -500i32..500) {
        let stack = LayerStack::new(seed, &GeneratorSettings::default());
        let wide = stack.quarter_grid(x, z, 12, 12);
        let narrow = stack.quarter_grid(x + 4, z + 4, 8, 8);
        for j in 0..8 {
            for i in 0..8 {
                prop_assert_eq!(wide[(i + 4) + (j + 4) * 12], narrow[i + j * 8]);
            }
        }
    }

    // Every produced id is one the biome table knows
    #[test]
    fn biome_ids_are_registered(seed in any::<i64>(), x in -4000i32..4000, z in -4000i32..4000) {
        let stack = LayerStack::new(seed, &GeneratorSettings::default());
        for v in stack.block_grid(x, z, 8, 8) {
            prop_assert!(biome::lookup(v).is_some(), "unregistered id {}", v);
        }
    }
}

#[test]
fn fixed_biome_fills_the_land() {
    let settings = GeneratorSettings { fixed_biome: Some(biome::ids::DESERT), ..GeneratorSettings::default() };
    let stack = LayerStack::new(114514, &settings);
    let grid = stack.quarter_grid(-64, -64, 128, 128);
    let land: Vec<i32> = grid.into_iter().filter(|&v| !biome::is_oceanic(v)).collect();
    assert!(!land.is_empty());
    assert!(land.iter().any(|&v| v == i32::from(biome::ids::DESERT)));
}
