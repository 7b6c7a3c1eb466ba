//! Terminal sporktris runner (default binary).
//!
//! Draws the pixel matrix on the alternate screen and reads the keyboard as
//! the controller. Sessions repeat after a game over until the player exits.

mod cli;

use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use sporktris::core::SimpleRng;
use sporktris::engine::{Session, SessionConfig, SystemClock};
use sporktris::input::KeyboardController;
use sporktris::term::TerminalDisplay;
use sporktris::types::PlayOutcome;

use crate::cli::Cli;

// Time to look at the final board before the next session starts.
const GAME_OVER_PAUSE_MS: u64 = 1500;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = cli.session_config();
    config.validate()?;

    let mut display = TerminalDisplay::enter(config.width, config.height)?;
    let result = run(&cli, config, &mut display);

    // Always try to restore terminal state.
    let _ = display.exit();
    result
}

/// Log to a file; the terminal belongs to the game.
fn init_logging(cli: &Cli) -> Result<()> {
    #[cfg(unix)]
    let null_device = "/dev/null";
    #[cfg(windows)]
    let null_device = "NUL";

    let path = cli.log_path();
    let log_file = File::create(&path)
        .or_else(|_| File::create(null_device))
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(cli: &Cli, config: SessionConfig, display: &mut TerminalDisplay) -> Result<()> {
    let base_seed = cli.seed.unwrap_or_else(clock_seed);
    info!(seed = base_seed, "starting");

    // Each session gets its own seed, reproducible from the base seed.
    let mut seeds = SimpleRng::new(base_seed);
    let mut controller = KeyboardController::new().with_release_timeout_ms(cli.release_ms);
    let clock = SystemClock::new();

    loop {
        let mut session = Session::new(config, seeds.next_u32())?;
        let outcome = session.play(&mut controller, display, &clock)?;
        if outcome.exit_requested() || controller.interrupted() {
            return Ok(());
        }
        debug_assert_eq!(outcome, PlayOutcome::GameOver);
        std::thread::sleep(Duration::from_millis(GAME_OVER_PAUSE_MS));
        controller.release_all();
    }
}

fn clock_seed() -> u32 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    (now.as_secs() as u32) ^ now.subsec_nanos()
}
