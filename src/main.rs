mod config;
mod error;
mod events;
mod game;
mod grid;
mod level;
mod logging;
mod render;
mod solar;
mod state;
mod utils;

use clap::Parser;
use log::{LevelFilter, error, info};
use macroquad::prelude::*;
use std::path::PathBuf;
use std::process;

use crate::config::GameConfig;

// --- Command Line Arguments ---
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the saved game configuration.
    #[arg(long, default_value = config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Grid size override for this session.
    #[arg(long)]
    grid_size: Option<i32>,

    /// Start over at level 1 with a zero score, ignoring saved progress.
    #[arg(long)]
    fresh: bool,

    /// Debug filter to specify log topics (e.g., "state,level,solar,input")
    /// Available topics: state, level, solar, input
    #[arg(long)]
    debug_filter: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn window_conf() -> Conf {
    let board = config::DEFAULT_GRID_SIZE * config::DEFAULT_TILE_SIZE;
    Conf {
        window_title: "Sunvac".to_owned(),
        window_width: board + config::UI_PANEL_WIDTH,
        window_height: board.max(config::MIN_WINDOW_HEIGHT),
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize the logger
    let log_level = match args.log_level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };

    // Setup logger with debug filters if provided
    if let Err(e) = logging::init_logger(log_level, args.debug_filter) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }

    info!("Initializing Sunvac...");

    // Load the saved configuration and apply session overrides
    let mut game_config = match GameConfig::load(&args.config) {
        Ok(loaded) => loaded,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };
    if let Some(grid_size) = args.grid_size {
        game_config.grid_size = grid_size;
    }
    if args.fresh {
        game_config.last_level = 1;
        game_config.last_score = 0;
    }
    if let Err(e) = game_config.validate() {
        error!("{}", e);
        process::exit(1);
    }

    // Size the window for the configured board
    let renderer = render::Renderer::new(game_config.grid_size, game_config.tile_size);
    let (window_width, window_height) = renderer.window_size();
    request_new_screen_size(window_width, window_height);

    // Create the game and run the loop
    let mut game = game::Game::new(game_config, args.config).expect("Failed to create game");
    game.run(&renderer).await.expect("Game loop failed");
}
