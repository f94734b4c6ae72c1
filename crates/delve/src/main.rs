//! delve: dungeon layout generator
//!
//! Generates a level and prints it as ASCII, or runs the pathfinding demo.

mod ascii;
mod pathfind;

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{LevelFilter, info};

use delve_core::world::fallback_for_sprite;
use delve_core::{GeneratorConfig, RoomLayoutGenerator, Size, World};

use crate::ascii::AsciiCanvas;

/// Procedural dungeon layouts
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(author, version, about = "Carve dungeon levels out of solid rock", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Write log output to this file instead of stderr
    #[arg(long = "log-file", global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a level and print it
    Generate(GenerateArgs),
    /// Find a path across the built-in demo map
    Pathfind {
        /// Use terminal colors
        #[arg(long)]
        color: bool,
    },
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Level width in tiles
    #[arg(long, default_value_t = 22, value_parser = clap::value_parser!(i32).range(1..))]
    width: i32,

    /// Level height in tiles
    #[arg(long, default_value_t = 22, value_parser = clap::value_parser!(i32).range(1..))]
    height: i32,

    /// RNG seed; random when omitted
    #[arg(short = 's', long)]
    seed: Option<u64>,

    /// JSON file with generator settings
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Use terminal colors
    #[arg(long)]
    color: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    match cli.command {
        Command::Generate(args) => generate(&args),
        Command::Pathfind { color } => {
            let demo = pathfind::run()?;
            let mut canvas = AsciiCanvas::new(demo.tiles.size(), pathfind::demo_fallback);
            demo.draw(&mut canvas);
            canvas
                .render(&mut io::stdout().lock(), color)
                .context("failed to print demo map")
        }
    }
}

fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<()> {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).format(|buf, record| {
        writeln!(buf, "[{}] {} - {}", record.level(), record.target(), record.args())
    });

    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.try_init().context("failed to install logger")
}

fn load_config(path: Option<&Path>) -> Result<GeneratorConfig> {
    let Some(path) = path else {
        return Ok(GeneratorConfig::default());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: GeneratorConfig = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    info!("loaded config from {}", path.display());
    Ok(config)
}

fn generate(args: &GenerateArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let size = Size::new(args.width, args.height);

    let generator = match args.seed {
        Some(seed) => RoomLayoutGenerator::with_seed(size, seed),
        None => RoomLayoutGenerator::new(size),
    };
    let mut generator = generator.with_config(config);
    let seed = generator.seed();

    let layout = generator
        .generate_layout()
        .with_context(|| format!("generation failed for {size} level with seed {seed}"))?;
    info!(
        "{} rooms, {} components, {} corridors dug",
        layout.rooms.len(),
        layout.connection.components_found,
        layout.connection.joins
    );

    let world = World::from_tiles(&layout.tiles);
    let mut canvas = AsciiCanvas::new(layout.tiles.size(), fallback_for_sprite);
    world.draw(&mut canvas);

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "seed: {seed}")?;
    canvas
        .render(&mut stdout, args.color)
        .context("failed to print level")
}
