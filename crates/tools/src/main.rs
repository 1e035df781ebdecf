use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use arena_core::{AllocatorError, Coord, MapError, MapGenerator, MapSet, Obstacle, PlacementReport};
use clap::{Parser, Subcommand, ValueEnum};
use log::{LevelFilter, info, warn};
use serde::Serialize;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Map set file (.json or .toml); the built-in maps are used when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one map and print it
    Generate {
        #[arg(short, long, default_value_t = 0)]
        index: usize,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Ascii)]
        format: OutputFormat,
    },
    /// Draw spawn tiles from one map
    Draw {
        #[arg(short, long, default_value_t = 0)]
        index: usize,
        #[arg(short = 'n', long, default_value_t = 10)]
        count: usize,
        /// Permanently remove every drawn tile
        #[arg(short, long, default_value_t = false)]
        remove: bool,
    },
    /// Regenerate map `i` for wave `i` and draw its enemy spawn tiles
    Waves {
        #[arg(short, long, default_value_t = 5)]
        enemies: usize,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Ascii,
    Json,
}

#[derive(Serialize)]
struct MapSummary<'a> {
    index: usize,
    width: usize,
    height: usize,
    seed: u64,
    center: Coord,
    report: &'a PlacementReport,
    obstacles: &'a [Obstacle],
    open_tiles: Vec<Coord>,
}

fn load_maps(path: Option<&Path>) -> Result<MapSet> {
    match path {
        Some(path) => MapSet::from_path(path)
            .with_context(|| format!("Failed to load map set: {}", path.display())),
        None => Ok(MapSet::default()),
    }
}

fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

fn generate(generator: &mut MapGenerator, index: usize, format: OutputFormat) -> Result<()> {
    let map = generator.generate_map(index).with_context(|| format!("Map {index} failed"))?;
    match format {
        OutputFormat::Ascii => {
            print!("{}", map.grid().render_ascii(map.center()));
            let report = map.report();
            println!(
                "obstacles: {}/{} ({} attempts, {} rejected, {} boundary)",
                report.placed,
                report.target,
                report.attempts,
                report.rejected,
                report.boundary_placed
            );
            println!("open tiles: {}", map.open_tiles().len());
        }
        OutputFormat::Json => {
            let summary = MapSummary {
                index,
                width: map.grid().width(),
                height: map.grid().height(),
                seed: map.config().seed,
                center: map.center(),
                report: map.report(),
                obstacles: map.obstacles(),
                open_tiles: map.open_tiles().iter().collect(),
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(())
}

fn draw(generator: &mut MapGenerator, index: usize, count: usize, remove: bool) -> Result<()> {
    generator.generate_map(index).with_context(|| format!("Map {index} failed"))?;
    for draw_index in 0..count {
        let handle = match generator.random_open_tile() {
            Ok(handle) => handle,
            Err(MapError::Allocator(AllocatorError::Exhausted)) => {
                println!("No tiles left after {draw_index} draws.");
                break;
            }
            Err(err) => return Err(err.into()),
        };
        println!("{draw_index}: {} (tile {})", handle.coord(), handle.index());
        if remove {
            generator.remove_open_tile(handle.coord())?;
        }
    }
    Ok(())
}

fn waves(generator: &mut MapGenerator, enemies: usize) -> Result<()> {
    for wave in 0..generator.maps().len() {
        generator
            .generate_map(wave)
            .with_context(|| format!("Map for wave {} failed", wave + 1))?;
        info!("map updated for wave {}", wave + 1);

        let mut spawns = Vec::with_capacity(enemies);
        for _ in 0..enemies {
            match generator.random_open_tile() {
                Ok(handle) => spawns.push(handle.coord()),
                Err(MapError::Allocator(AllocatorError::Exhausted)) => {
                    warn!("wave {} has no open tiles; skipping remaining spawns", wave + 1);
                    break;
                }
                Err(err) => return Err(err.into()),
            }
        }

        let listed: Vec<String> = spawns.iter().map(ToString::to_string).collect();
        println!("Wave {}: {}", wave + 1, listed.join(" "));
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let maps = load_maps(args.config.as_deref())?;
    let mut generator = MapGenerator::new(maps);

    match args.command {
        Commands::Generate { index, format } => generate(&mut generator, index, format),
        Commands::Draw { index, count, remove } => draw(&mut generator, index, count, remove),
        Commands::Waves { enemies } => waves(&mut generator, enemies),
    }
}
