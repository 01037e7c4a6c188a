use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Deserialize;
use strata_chunk::ChunkStore;
use strata_runtime::{Runtime, RuntimeConfig};
use strata_world::{GeneratorConfig, GeneratorSettings, Generator, Overworld, biome, load_config_from_path};

#[derive(Parser, Debug)]
#[command(author, version, about = "Deterministic overworld generator", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate and populate a square of chunks around the origin
    Generate {
        #[arg(long, allow_negative_numbers = true)]
        seed: i64,
        #[arg(long, default_value_t = 4)]
        radius: i32,
        /// TOML file with [terrain], [features], [layers] and [runtime] tables
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        workers: Option<usize>,
    },
    /// Print a grid of biome ids
    Biomes {
        #[arg(long, allow_negative_numbers = true)]
        seed: i64,
        #[arg(long, allow_negative_numbers = true, default_value_t = 0)]
        x: i32,
        #[arg(long, allow_negative_numbers = true, default_value_t = 0)]
        z: i32,
        #[arg(long, default_value_t = 16)]
        width: usize,
        #[arg(long, default_value_t = 16)]
        height: usize,
        /// Block resolution (zoomed) instead of quarter resolution
        #[arg(long)]
        voronoi: bool,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the spawn point
    Spawn {
        #[arg(long, allow_negative_numbers = true)]
        seed: i64,
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Default, Deserialize)]
struct RuntimeSection {
    #[serde(default)]
    runtime: RuntimeConfig,
}

fn load_settings(path: Option<&Path>) -> Result<GeneratorSettings, Box<dyn Error>> {
    let Some(path) = path else {
        return Ok(GeneratorSettings::default());
    };
    if !path.exists() {
        log::warn!("config {} not found, using defaults", path.display());
        return Ok(GeneratorSettings::default());
    }
    let cfg: GeneratorConfig = load_config_from_path(path)?;
    log::info!("loaded generator config from {}", path.display());
    Ok(GeneratorSettings::from_config(&cfg))
}

fn load_runtime(path: Option<&Path>) -> Result<RuntimeConfig, Box<dyn Error>> {
    match path {
        Some(path) if path.exists() => {
            let text = fs::read_to_string(path)?;
            let section: RuntimeSection = toml::from_str(&text)?;
            Ok(section.runtime)
        }
        _ => Ok(RuntimeConfig::default()),
    }
}

fn generate(seed: i64, radius: i32, config: Option<&Path>, workers: Option<usize>) -> Result<(), Box<dyn Error>> {
    let settings = load_settings(config)?;
    let mut runtime_cfg = load_runtime(config)?;
    if let Some(n) = workers {
        runtime_cfg.workers = n;
    }
    let store = Arc::new(ChunkStore::new());
    let overworld = Overworld::new(store.clone(), seed, settings);
    let runtime = Runtime::new(overworld, runtime_cfg)?;
    let radius = radius.max(1);
    let report = runtime.generate_region(-radius, -radius, radius, radius)?;

    log::info!(
        "seed {}: {} chunks ({} generated, {} populated, {} deferred)",
        seed,
        report.chunks,
        report.generated,
        report.populated,
        report.deferred
    );
    log::info!("generate {:?}, populate {:?}", report.generate_time, report.populate_time);
    for (id, count) in report.top_blocks(8) {
        log::info!("  block {:>3}: {}", id, count);
    }
    for (kind, count) in &report.structures {
        log::info!("  {} starts: {}", kind.name(), count);
    }
    let stats = store.stats();
    log::debug!("chunk store: {} hits, {} misses", stats.hits, stats.misses);
    Ok(())
}

fn biomes(seed: i64, x: i32, z: i32, width: usize, height: usize, voronoi: bool, config: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let settings = load_settings(config)?;
    let store = Arc::new(ChunkStore::new());
    let overworld = Overworld::new(store, seed, settings);
    let grid = if voronoi {
        overworld.layers().block_grid(x, z, width, height)
    } else {
        overworld.layers().quarter_grid(x, z, width, height)
    };
    for row in grid.chunks(width.max(1)) {
        let line: Vec<String> = row.iter().map(|id| format!("{id:>3}")).collect();
        println!("{}", line.join(" "));
    }
    let mut seen: Vec<i32> = grid.clone();
    seen.sort_unstable();
    seen.dedup();
    for id in seen {
        if let Some(b) = biome::lookup(id) {
            log::info!("{:>3} {}", id, b.name);
        }
    }
    Ok(())
}

fn spawn(seed: i64, config: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let settings = load_settings(config)?;
    let store = Arc::new(ChunkStore::new());
    let overworld = Overworld::new(store, seed, settings);
    let pos = overworld.spawn();
    println!("{} {} {}", pos.x, pos.y, pos.z);
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    match args.command {
        Command::Generate { seed, radius, config, workers } => generate(seed, radius, config.as_deref(), workers),
        Command::Biomes { seed, x, z, width, height, voronoi, config } => {
            biomes(seed, x, z, width, height, voronoi, config.as_deref())
        }
        Command::Spawn { seed, config } => spawn(seed, config.as_deref()),
    }
}
