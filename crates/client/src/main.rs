//! Terminal client for the tower.
//!
//! Composition root: reads configuration from the environment, sets up file
//! logging, loads content, and hands the terminal to [`app::App`].
//!
//! ```bash
//! TOWER_DATA_DIR=./my-tower TOWER_START_FLOOR=MT2 cargo run -p tower-client
//! ```
mod app;
mod config;
mod input;
mod logging;
mod message;
mod presentation;

use anyhow::Result;

use crate::app::App;
use crate::config::ClientConfig;
use crate::presentation::terminal;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = ClientConfig::from_env();
    let log_file = logging::setup(config.log_dir.as_deref(), config.session_id.as_deref())?;

    tracing::info!("Starting tower client");
    tracing::info!("Log file: {}", log_file.display());
    tracing::info!("Data directory: {}", config.data_dir.display());
    tracing::info!("Start floor: {}", config.start_floor);

    // Content errors surface on stdout before the terminal is taken over.
    let app = App::bootstrap(&config)?;

    let mut terminal = terminal::init()?;
    let _guard = terminal::TerminalGuard;

    let result = app.run(&mut terminal);
    if let Err(err) = &result {
        tracing::error!("Client error: {err:#}");
    }

    tracing::info!("Tower client exiting");
    result
}
