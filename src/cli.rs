//! Command-line interface for sporktris.

use std::path::PathBuf;

use clap::Parser;

use sporktris::engine::SessionConfig;
use sporktris::types::{
    BOARD_HEIGHT, BOARD_WIDTH, MOVE_REPEAT_MS, ROTATE_REPEAT_MS, TICK_MS,
};

/// Falling-block puzzle on a terminal pixel matrix
#[derive(Parser, Debug)]
#[command(name = "sporktris")]
#[command(about = "Falling-block puzzle on a terminal pixel matrix", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Board width in pixels
    #[arg(long, default_value_t = BOARD_WIDTH)]
    pub width: u8,

    /// Board height in pixels
    #[arg(long, default_value_t = BOARD_HEIGHT)]
    pub height: u8,

    /// Milliseconds per gravity step
    #[arg(long, default_value_t = TICK_MS)]
    pub tick_ms: u64,

    /// Minimum milliseconds between left, right and down moves
    #[arg(long, default_value_t = MOVE_REPEAT_MS)]
    pub move_repeat_ms: u64,

    /// Minimum milliseconds between rotations
    #[arg(long, default_value_t = ROTATE_REPEAT_MS)]
    pub rotate_repeat_ms: u64,

    /// Seed for piece selection. Derived from the clock if omitted.
    #[arg(long)]
    pub seed: Option<u32>,

    /// Log file path (defaults to sporktris.log in the temp directory)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Milliseconds a key counts as held after its last press event
    #[arg(long, default_value_t = 150)]
    pub release_ms: u64,
}

impl Cli {
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            width: self.width,
            height: self.height,
            tick_ms: self.tick_ms,
            move_repeat_ms: self.move_repeat_ms,
            rotate_repeat_ms: self.rotate_repeat_ms,
        }
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("sporktris.log"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_session_defaults() {
        let cli = Cli::parse_from(["sporktris"]);
        assert_eq!(cli.session_config(), SessionConfig::default());
        assert_eq!(cli.seed, None);
        assert_eq!(cli.release_ms, 150);
        assert!(cli.log_path().ends_with("sporktris.log"));
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "sporktris",
            "--width",
            "8",
            "--height",
            "16",
            "--tick-ms",
            "250",
            "--seed",
            "42",
            "--log-file",
            "/tmp/x.log",
        ]);
        let config = cli.session_config();
        assert_eq!((config.width, config.height, config.tick_ms), (8, 16, 250));
        assert_eq!(cli.seed, Some(42));
        assert_eq!(cli.log_path(), PathBuf::from("/tmp/x.log"));
    }

    #[test]
    fn test_width_must_fit_u8() {
        assert!(Cli::try_parse_from(["sporktris", "--width", "300"]).is_err());
    }
}
