//! # Gloam Main Entry Point
//!
//! Parses arguments, sets up logging, generates the first level and runs the
//! macroquad window loop.

use clap::Parser;
use gloam::{GameState, GenerationConfig, GloamError, GloamResult, InputHandler, MacroquadDisplay, PlayerInput};
use log::{error, info, warn};
use macroquad::prelude::*;
use std::path::PathBuf;

/// Command line arguments for Gloam.
#[derive(Parser, Debug)]
#[command(name = "gloam")]
#[command(about = "A tile-based dungeon crawler with fog of war")]
#[command(version)]
struct Args {
    /// Random seed for cave generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON file overriding generation settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start with the fog of war switched on
    #[arg(long)]
    shadow: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[macroquad::main("Gloam")]
async fn main() {
    let args = Args::parse();

    if let Err(e) = initialize_logging(&args.log_level) {
        eprintln!("{}", e);
    }

    info!("Starting Gloam v{}", gloam::VERSION);

    if let Err(e) = run_game(&args).await {
        error!("Game aborted: {}", e);
        std::process::exit(1);
    }
}

/// Initializes env_logger; `RUST_LOG` takes precedence over `--log-level`.
fn initialize_logging(log_level: &str) -> GloamResult<()> {
    env_logger::Builder::new()
        .parse_filters(log_level)
        .parse_default_env()
        .try_init()
        .map_err(|e| GloamError::InvalidState(format!("Logger already set: {}", e)))
}

/// Builds the generation config from the command line.
fn load_config(args: &Args) -> GloamResult<GenerationConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            GenerationConfig::from_json_file(path)?
        }
        None => GenerationConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    Ok(config)
}

/// Runs the main game loop with macroquad graphics.
async fn run_game(args: &Args) -> GloamResult<()> {
    let config = load_config(args)?;
    info!("Generating level with seed: {}", config.seed);

    let mut game_state = GameState::with_config(config)?;
    if args.shadow {
        game_state.toggle_shadow();
    }

    let mut display = MacroquadDisplay::new();
    let (width, height) = display.window_size(game_state.grid.columns(), game_state.grid.rows());
    request_new_screen_size(width, height);

    // A failed placement still leaves a drawable grid, so keep going
    if let Err(e) = game_state.start_level() {
        warn!("Level setup incomplete: {}", e);
        display.add_message(format!("Level setup incomplete: {}", e));
    }

    display.add_message("Welcome to Gloam!".to_string());
    display.add_message("Press T to toggle the shadow, F1 for help".to_string());

    let input_handler = InputHandler::new();

    loop {
        if let Some(input) = input_handler.get_input() {
            match input {
                PlayerInput::Quit => {
                    info!("Player quit the game");
                    break;
                }

                PlayerInput::Help => {
                    display.add_message(
                        "Help: WASD/arrows=move, T=shadow, R=new level, ESC=quit".to_string(),
                    );
                }

                _ => match input_handler.apply(input, &mut game_state) {
                    Ok(Some(message)) => display.add_message(message),
                    Ok(None) => {}
                    Err(e) => {
                        warn!("{}", e);
                        display.add_message(format!("Error: {}", e));
                    }
                },
            }
        }

        display.render_game(&mut game_state);

        next_frame().await;
    }

    info!("Game loop ended");
    Ok(())
}
