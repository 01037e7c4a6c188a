//! Overworld generation: configuration, biome layers, terrain, carvers, decoration.
#![forbid(unsafe_code)]

pub mod biome;
pub mod carver;
pub mod config;
pub mod decorator;
pub mod layer;
pub mod overworld;
pub mod terrain;

use std::sync::Arc;

use strata_chunk::ChunkManager;
use strata_geom::BlockPos;

pub use biome::{Biome, ClimateNoise};
pub use config::{ConfigError, GenError, GeneratorConfig, GeneratorSettings, load_config_from_path};
pub use layer::{GenLayer, LayerStack};
pub use overworld::{Overworld, Structures, population_seed};
pub use terrain::TerrainGenerator;

/// A world generator writing into a chunk manager it does not own.
///
/// `generate_chunk` touches only the target chunk. `populate_chunk` also
/// writes into the +x, +z and +xz neighbours, so two chunks whose windows
/// overlap must not be populated at the same time.
pub trait Generator: Send + Sync {
    /// Rebinds the generator to `manager` and reseeds every field.
    fn init(&mut self, manager: Arc<dyn ChunkManager>, seed: i64);

    fn generate_chunk(&self, cx: i32, cz: i32);

    /// Fails without writing anything when the chunk or one of its
    /// population neighbours is not generated yet.
    fn populate_chunk(&self, cx: i32, cz: i32) -> Result<(), GenError>;

    fn spawn(&self) -> BlockPos;

    fn name(&self) -> &'static str;
}
