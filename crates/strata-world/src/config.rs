use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse generator config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid generator config: {0}")]
    Invalid(String),
}

/// Raised by generation entry points that need chunks the manager lacks.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GenError {
    #[error("neighbour chunk ({cx}, {cz}) is not generated yet")]
    NeighborMissing { cx: i32, cz: i32 },
    #[error("chunk ({cx}, {cz}) is not generated")]
    ChunkMissing { cx: i32, cz: i32 },
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub terrain: TerrainConfig,
    #[serde(default)]
    pub features: FeatureConfig,
    #[serde(default)]
    pub layers: LayerConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TerrainConfig {
    #[serde(default = "d_coord_scale")]
    pub coordinate_scale: f32,
    #[serde(default = "d_coord_scale")]
    pub height_scale: f32,
    #[serde(default = "d_limit_scale")]
    pub lower_limit_scale: f32,
    #[serde(default = "d_limit_scale")]
    pub upper_limit_scale: f32,
    #[serde(default = "d_depth_scale")]
    pub depth_noise_scale_x: f32,
    #[serde(default = "d_depth_scale")]
    pub depth_noise_scale_z: f32,
    #[serde(default = "d_depth_exponent")]
    pub depth_noise_scale_exponent: f32,
    #[serde(default = "d_main_xz")]
    pub main_noise_scale_x: f32,
    #[serde(default = "d_main_y")]
    pub main_noise_scale_y: f32,
    #[serde(default = "d_main_xz")]
    pub main_noise_scale_z: f32,
    #[serde(default = "d_base_size")]
    pub base_size: f32,
    #[serde(default = "d_stretch_y")]
    pub stretch_y: f32,
    #[serde(default)]
    pub biome_depth_offset: f32,
    #[serde(default = "d_one")]
    pub biome_depth_weight: f32,
    #[serde(default)]
    pub biome_scale_offset: f32,
    #[serde(default = "d_one")]
    pub biome_scale_weight: f32,
    #[serde(default = "d_sea_level")]
    pub sea_level: i32,
    #[serde(default = "d_max_height")]
    pub max_height: i32,
}

fn d_coord_scale() -> f32 {
    684.412
}
fn d_limit_scale() -> f32 {
    512.0
}
fn d_depth_scale() -> f32 {
    200.0
}
fn d_depth_exponent() -> f32 {
    0.5
}
fn d_main_xz() -> f32 {
    80.0
}
fn d_main_y() -> f32 {
    160.0
}
fn d_base_size() -> f32 {
    8.5
}
fn d_stretch_y() -> f32 {
    12.0
}
fn d_one() -> f32 {
    1.0
}
fn d_sea_level() -> i32 {
    63
}
fn d_max_height() -> i32 {
    256
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            coordinate_scale: d_coord_scale(),
            height_scale: d_coord_scale(),
            lower_limit_scale: d_limit_scale(),
            upper_limit_scale: d_limit_scale(),
            depth_noise_scale_x: d_depth_scale(),
            depth_noise_scale_z: d_depth_scale(),
            depth_noise_scale_exponent: d_depth_exponent(),
            main_noise_scale_x: d_main_xz(),
            main_noise_scale_y: d_main_y(),
            main_noise_scale_z: d_main_xz(),
            base_size: d_base_size(),
            stretch_y: d_stretch_y(),
            biome_depth_offset: 0.0,
            biome_depth_weight: d_one(),
            biome_scale_offset: 0.0,
            biome_scale_weight: d_one(),
            sea_level: d_sea_level(),
            max_height: d_max_height(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct FeatureConfig {
    #[serde(default = "d_true")]
    pub caves: bool,
    #[serde(default = "d_true")]
    pub ravines: bool,
    #[serde(default = "d_true")]
    pub dungeons: bool,
    #[serde(default = "d_dungeon_chance")]
    pub dungeon_chance: i32,
    #[serde(default = "d_true")]
    pub strongholds: bool,
    #[serde(default = "d_true")]
    pub villages: bool,
    #[serde(default = "d_true")]
    pub mineshafts: bool,
    #[serde(default = "d_true")]
    pub temples: bool,
    #[serde(default = "d_true")]
    pub water_lakes: bool,
    #[serde(default = "d_water_lake_chance")]
    pub water_lake_chance: i32,
    #[serde(default = "d_true")]
    pub lava_lakes: bool,
    #[serde(default = "d_lava_lake_chance")]
    pub lava_lake_chance: i32,
    #[serde(default = "d_true")]
    pub decoration: bool,
}

fn d_true() -> bool {
    true
}
fn d_dungeon_chance() -> i32 {
    8
}
fn d_water_lake_chance() -> i32 {
    4
}
fn d_lava_lake_chance() -> i32 {
    80
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            caves: true,
            ravines: true,
            dungeons: true,
            dungeon_chance: d_dungeon_chance(),
            strongholds: true,
            villages: true,
            mineshafts: true,
            temples: true,
            water_lakes: true,
            water_lake_chance: d_water_lake_chance(),
            lava_lakes: true,
            lava_lake_chance: d_lava_lake_chance(),
            decoration: true,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct LayerConfig {
    #[serde(default = "d_layer_size")]
    pub biome_size: i32,
    #[serde(default = "d_layer_size")]
    pub river_size: i32,
    /// Forces every column to one biome id; negative disables.
    #[serde(default = "d_fixed_biome")]
    pub fixed_biome: i32,
}

fn d_layer_size() -> i32 {
    4
}
fn d_fixed_biome() -> i32 {
    -1
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self { biome_size: d_layer_size(), river_size: d_layer_size(), fixed_biome: d_fixed_biome() }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let h = self.terrain.max_height;
        if h % 16 != 0 || !(16..=256).contains(&h) {
            return Err(ConfigError::Invalid(format!(
                "max_height must be a multiple of 16 in 16..=256, got {h}"
            )));
        }
        if !(1..h).contains(&self.terrain.sea_level) {
            return Err(ConfigError::Invalid(format!(
                "sea_level {} is outside 1..{h}",
                self.terrain.sea_level
            )));
        }
        let f = &self.features;
        for (name, v) in [
            ("dungeon_chance", f.dungeon_chance),
            ("water_lake_chance", f.water_lake_chance),
            ("lava_lake_chance", f.lava_lake_chance),
        ] {
            if v <= 0 {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {v}")));
            }
        }
        // the lava draw divides the chance by 10
        if f.lava_lakes && f.lava_lake_chance < 10 {
            return Err(ConfigError::Invalid(format!(
                "lava_lake_chance must be at least 10, got {}",
                f.lava_lake_chance
            )));
        }
        if self.layers.biome_size < 1 || self.layers.river_size < 1 {
            return Err(ConfigError::Invalid("layer sizes must be at least 1".into()));
        }
        if self.layers.fixed_biome > 255 {
            return Err(ConfigError::Invalid(format!(
                "fixed_biome {} is not a biome id",
                self.layers.fixed_biome
            )));
        }
        Ok(())
    }
}

/// Flattened knobs read by the hot loops. Scales stay single precision so
/// products are rounded the same way on every run.
#[derive(Clone, Debug)]
pub struct GeneratorSettings {
    pub coordinate_scale: f32,
    pub height_scale: f32,
    pub lower_limit_scale: f32,
    pub upper_limit_scale: f32,
    pub depth_noise_scale_x: f32,
    pub depth_noise_scale_z: f32,
    pub depth_noise_scale_exponent: f32,
    pub main_noise_scale_x: f32,
    pub main_noise_scale_y: f32,
    pub main_noise_scale_z: f32,
    pub base_size: f32,
    pub stretch_y: f32,
    pub biome_depth_offset: f32,
    pub biome_depth_weight: f32,
    pub biome_scale_offset: f32,
    pub biome_scale_weight: f32,
    pub sea_level: i32,
    pub max_height: i32,
    pub caves: bool,
    pub ravines: bool,
    pub dungeons: bool,
    pub dungeon_chance: i32,
    pub strongholds: bool,
    pub villages: bool,
    pub mineshafts: bool,
    pub temples: bool,
    pub water_lakes: bool,
    pub water_lake_chance: i32,
    pub lava_lakes: bool,
    pub lava_lake_chance: i32,
    pub decoration: bool,
    pub biome_size: i32,
    pub river_size: i32,
    pub fixed_biome: Option<u8>,
}

impl GeneratorSettings {
    pub fn from_config(cfg: &GeneratorConfig) -> Self {
        let t = &cfg.terrain;
        let f = &cfg.features;
        Self {
            coordinate_scale: t.coordinate_scale,
            height_scale: t.height_scale,
            lower_limit_scale: t.lower_limit_scale,
            upper_limit_scale: t.upper_limit_scale,
            depth_noise_scale_x: t.depth_noise_scale_x,
            depth_noise_scale_z: t.depth_noise_scale_z,
            depth_noise_scale_exponent: t.depth_noise_scale_exponent,
            main_noise_scale_x: t.main_noise_scale_x,
            main_noise_scale_y: t.main_noise_scale_y,
            main_noise_scale_z: t.main_noise_scale_z,
            base_size: t.base_size,
            stretch_y: t.stretch_y,
            biome_depth_offset: t.biome_depth_offset,
            biome_depth_weight: t.biome_depth_weight,
            biome_scale_offset: t.biome_scale_offset,
            biome_scale_weight: t.biome_scale_weight,
            sea_level: t.sea_level,
            max_height: t.max_height,
            caves: f.caves,
            ravines: f.ravines,
            dungeons: f.dungeons,
            dungeon_chance: f.dungeon_chance,
            strongholds: f.strongholds,
            villages: f.villages,
            mineshafts: f.mineshafts,
            temples: f.temples,
            water_lakes: f.water_lakes,
            water_lake_chance: f.water_lake_chance,
            lava_lakes: f.lava_lakes,
            lava_lake_chance: f.lava_lake_chance,
            decoration: f.decoration,
            biome_size: cfg.layers.biome_size,
            river_size: cfg.layers.river_size,
            fixed_biome: u8::try_from(cfg.layers.fixed_biome).ok(),
        }
    }
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self::from_config(&GeneratorConfig::default())
    }
}

pub fn parse_config(text: &str) -> Result<GeneratorConfig, ConfigError> {
    let cfg: GeneratorConfig = toml::from_str(text)?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn load_config_from_path(path: &Path) -> Result<GeneratorConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
    parse_config(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = parse_config("").unwrap();
        let s = GeneratorSettings::from_config(&cfg);
        assert_eq!(s.sea_level, 63);
        assert_eq!(s.max_height, 256);
        assert_eq!(s.coordinate_scale, 684.412);
        assert_eq!(s.water_lake_chance, 4);
        assert_eq!(s.lava_lake_chance, 80);
        assert_eq!(s.dungeon_chance, 8);
        assert_eq!(s.fixed_biome, None);
        assert!(s.caves && s.villages && s.decoration);
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let cfg = parse_config(
            "[terrain]\nsea_level = 40\n[features]\nvillages = false\n[layers]\nfixed_biome = 2\n",
        )
        .unwrap();
        let s = GeneratorSettings::from_config(&cfg);
        assert_eq!(s.sea_level, 40);
        assert_eq!(s.base_size, 8.5);
        assert!(!s.villages);
        assert!(s.strongholds);
        assert_eq!(s.fixed_biome, Some(2));
    }

    #[test]
    fn bad_heights_are_rejected() {
        for text in ["[terrain]\nmax_height = 100\n", "[terrain]\nmax_height = 512\n"] {
            assert!(matches!(parse_config(text), Err(ConfigError::Invalid(_))), "{text}");
        }
        assert!(parse_config("[terrain]\nmax_height = 128\n").is_ok());
    }

    #[test]
    fn non_positive_chances_are_rejected() {
        let err = parse_config("[features]\nwater_lake_chance = 0\n").unwrap_err();
        assert!(err.to_string().contains("water_lake_chance"));
    }

    #[test]
    fn syntax_errors_surface_as_parse() {
        assert!(matches!(parse_config("[terrain\n"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_is_io() {
        let err = load_config_from_path(Path::new("/nonexistent/strata.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
