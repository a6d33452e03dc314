use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use minefield_core::*;
use tracing_subscriber::filter::LevelFilter;

mod render;

#[derive(Parser, Debug)]
#[command(version, about = "Play a minefield game stored in a local file", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Game file to read and update
    #[arg(short, long, default_value = "minefield.json", global = true)]
    file: PathBuf,

    /// Print the client view as JSON instead of a board
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start a new game, bombs are placed on the first reveal
    New {
        #[arg(long, default_value_t = MIN_SIZE)]
        width: Coord,
        #[arg(long, default_value_t = MIN_SIZE)]
        height: Coord,
        #[arg(long, default_value_t = DEFAULT_DENSITY)]
        density: f64,
    },
    /// Reveal a hidden tile
    Reveal {
        x: Coord,
        y: Coord,
        /// Force a seed instead of random, only used by the first reveal
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Toggle the flag on a hidden tile
    Flag { x: Coord, y: Coord },
    /// Print the current game
    Show,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose.log_level_filter());
    let modifies = !matches!(args.command, Command::Show);

    let game = match args.command {
        Command::New {
            width,
            height,
            density,
        } => {
            let config = GameConfig::new((width, height), density)?;
            Game::new(config)?
        }
        Command::Reveal { x, y, seed } => {
            let mut game = load(&args.file)?;
            ensure_playable(&game, (x, y))?;
            let seed = seed.unwrap_or_else(rand::random);
            log::debug!("seed: {}", seed);
            let outcome = game
                .reveal((x, y), &mut ReservoirGenerator::from_seed(seed))
                .with_context(|| format!("Could not reveal ({x}, {y})"))?;
            log::info!("reveal ({}, {}): {:?}", x, y, outcome);
            game
        }
        Command::Flag { x, y } => {
            let mut game = load(&args.file)?;
            ensure_playable(&game, (x, y))?;
            let outcome = game
                .flag((x, y))
                .with_context(|| format!("Could not flag ({x}, {y})"))?;
            log::info!("flag ({}, {}): {:?}", x, y, outcome);
            game
        }
        Command::Show => load(&args.file)?,
    };

    if modifies {
        save(&args.file, &game)?;
    }

    let view = game.client_view();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render::board(&view));
    }
    Ok(())
}

fn init_logging(level: log::LevelFilter) {
    let level = match level {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

/// Bounds and terminal checks, done before any move reaches the engine.
fn ensure_playable(game: &Game, (x, y): Coord2) -> Result<()> {
    let (width, height) = game.size();
    if x >= width || y >= height {
        bail!("({x}, {y}) is outside the {width}x{height} board");
    }
    if game.is_finished() {
        bail!("Game already ended ({:?})", game.state());
    }
    Ok(())
}

fn load(path: &Path) -> Result<Game> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Could not read game file {}", path.display()))?;
    let record: GameRecord = serde_json::from_str(&text)
        .with_context(|| format!("Malformed game file {}", path.display()))?;
    Game::from_record(&record).with_context(|| format!("Invalid game in {}", path.display()))
}

fn save(path: &Path, game: &Game) -> Result<()> {
    let text = serde_json::to_string_pretty(&game.to_record())?;
    fs::write(path, text).with_context(|| format!("Could not write game file {}", path.display()))
}
