// Entry point for the Minesweeper TUI application
// Loads configuration, starts file logging, and launches the main UI

use std::error::Error;
use tracing::{info, warn};

// Module declarations
mod xtm_audio;   // Terminal bell cues for game events
mod xtm_board;   // Difficulty presets, grids, mine placement
mod xtm_color;   // Palette mapped to the terminal's colour depth
mod xtm_config;  // TOML configuration and data locations
mod xtm_error;   // Application error type
mod xtm_lang;    // Multi-language string resources
mod xtm_layout;  // Board geometry and pointer hit-testing
mod xtm_log;     // tracing subscriber writing to a log file
mod xtm_reveal;  // Flood-fill reveal and victory check
mod xtm_score;   // Score formula and persistent top-10 table
mod xtm_screen;  // Screen state machine
mod xtm_session; // One game in progress
mod xtm_ui;      // Terminal UI rendering and event handling

use xtm_config::{Config, data_dir, load_or_create_config};
use xtm_lang::Lang;
use xtm_ui::run as run_ui;

fn main() -> Result<(), Box<dyn Error>> {
    // Load or create user configuration; a broken file falls back to defaults
    let (mut cfg, load_error) = match load_or_create_config() {
        Ok(cfg) => (cfg, None),
        Err(e) => (Config::default(), Some(e)),
    };

    // Logging goes to a file since the terminal belongs to the UI
    if let Ok(dir) = data_dir() {
        if let Ok(path) = xtm_log::init(&dir, &cfg.log_level) {
            info!(log = %path.display(), "xtmines {}", env!("CARGO_PKG_VERSION"));
        }
    }
    if let Some(e) = load_error {
        warn!(error = %e, "config unreadable, using defaults");
    }

    // Initialize language resources based on saved or system language
    let lang = Lang::new(&cfg.language);

    // Launch the main UI loop
    run_ui(&mut cfg, &lang)
}
