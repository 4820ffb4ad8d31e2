//! # Hexterra
//!
//! Command-line driver for the neighbour-support hex terrain generator.
//!
//! Loads `hexterra.toml` (or the file given with `--config`), applies
//! command-line overrides, generates one terrain and prints a text preview.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

mod config;
mod preview;

use anyhow::{Context, Result};
use clap::Parser;
use hexterra_world::{HexGrid, LandscapeCatalog, TerrainGenerator};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::TerrainConfig;
use crate::preview::Legend;

#[derive(Parser, Debug)]
#[command(name = "hexterra")]
#[command(about = "Generate a hex terrain map by neighbour-support smoothing")]
struct Args {
    /// Configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of rings around the central cell
    #[arg(short, long)]
    radius: Option<u32>,

    /// Smoothing passes after seeding
    #[arg(short, long)]
    passes: Option<u32>,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Skip the map and print only the histogram
    #[arg(long)]
    no_map: bool,

    /// Write the effective configuration to this path and exit
    #[arg(long)]
    write_config: Option<PathBuf>,
}

/// Main entry point.
fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("hexterra=info".parse()?))
        .init();

    let args = Args::parse();

    let mut config = TerrainConfig::load_from(args.config.unwrap_or_else(TerrainConfig::default_path));
    if let Some(radius) = args.radius {
        config.radius = radius;
    }
    if let Some(passes) = args.passes {
        config.passes = passes;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate();

    if let Some(path) = args.write_config {
        config
            .save_to(&path)
            .with_context(|| format!("writing {}", path.display()))?;
        return Ok(());
    }

    let seed = config.seed.unwrap_or_else(|| fastrand::u64(..));
    info!("Generating terrain with seed: {seed}");
    info!("Radius: {}, passes: {}", config.radius, config.passes);

    let catalog = LandscapeCatalog::new(&config.catalog).context("invalid landscape catalog")?;
    let legend = Legend::new(&catalog);
    let mut generator = TerrainGenerator::new(catalog, config.generator, fastrand::Rng::with_seed(seed))
        .context("invalid generator settings")?;

    let mut grid = HexGrid::new(config.radius);
    let stats = generator.generate(&mut grid, config.passes)?;
    for (pass, s) in stats.iter().enumerate() {
        info!(
            "Pass {}: {} accepted, {} exhausted, {} changed, {:.1} draws/cell",
            pass + 1,
            s.accepted,
            s.exhausted,
            s.changed,
            s.attempts as f64 / s.cells.max(1) as f64
        );
    }

    if !args.no_map {
        println!("{}", preview::render(&grid, &legend));
        print!("{}", legend.describe(generator.catalog()));
        println!();
    }
    print!("{}", preview::histogram(&grid, generator.catalog()));

    Ok(())
}
