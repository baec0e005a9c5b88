//! Command-line options for the terminal binary.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{ensure, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::types::{
    GameConfig, BOARD_HEIGHT, BOARD_WIDTH, FALL_INTERVAL_MS, MAX_BOARD_EDGE, MIN_BOARD_EDGE, TICK_MS,
};

#[derive(Clone, Debug, Parser)]
#[command(name = "blockfall", version, about = "Falling-block puzzle game for the terminal")]
pub struct Options {
    /// Board width in cells
    #[arg(long, default_value_t = BOARD_WIDTH)]
    pub width: u8,

    /// Board height in cells
    #[arg(long, default_value_t = BOARD_HEIGHT)]
    pub height: u8,

    /// Milliseconds between automatic fall steps
    #[arg(long, default_value_t = FALL_INTERVAL_MS)]
    pub fall_ms: u32,

    /// Milliseconds per frame
    #[arg(long, default_value_t = TICK_MS)]
    pub tick_ms: u32,

    /// Seed for a reproducible piece sequence
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Log spec (e.g. `info`, `debug`); logging is off when absent
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Directory for the log file
    #[arg(long, default_value = ".")]
    pub log_dir: PathBuf,
}

impl Options {
    /// Validate the options and turn them into game rules.
    pub fn game_config(&self) -> Result<GameConfig> {
        ensure!(
            (MIN_BOARD_EDGE..=MAX_BOARD_EDGE).contains(&self.width),
            "width must be between {MIN_BOARD_EDGE} and {MAX_BOARD_EDGE}, got {}",
            self.width
        );
        ensure!(
            (MIN_BOARD_EDGE..=MAX_BOARD_EDGE).contains(&self.height),
            "height must be between {MIN_BOARD_EDGE} and {MAX_BOARD_EDGE}, got {}",
            self.height
        );
        ensure!(self.fall_ms > 0, "fall interval must be positive");
        ensure!(self.tick_ms > 0, "tick interval must be positive");

        Ok(GameConfig::with_size(self.width, self.height)
            .with_fall_interval(Duration::from_millis(self.fall_ms as u64)))
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms as u64)
    }

    /// Piece source: seeded when `--seed` is given, from OS entropy otherwise.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            fall_ms: FALL_INTERVAL_MS,
            tick_ms: TICK_MS,
            seed: None,
            log_level: None,
            log_dir: PathBuf::from("."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RandomSource;

    #[test]
    fn defaults_match_reference_config() {
        let options = Options::parse_from(["blockfall"]);
        assert_eq!(options.game_config().unwrap(), GameConfig::default());
        assert_eq!(options.tick(), Duration::from_millis(16));
    }

    #[test]
    fn custom_size_and_speed() {
        let options =
            Options::parse_from(["blockfall", "--width", "12", "--height", "24", "--fall-ms", "250"]);
        let config = options.game_config().unwrap();
        assert_eq!(config.width, 12);
        assert_eq!(config.height, 24);
        assert_eq!(config.spawn_x, 4);
        assert_eq!(config.fall_interval, Duration::from_millis(250));
    }

    #[test]
    fn rejects_out_of_range_values() {
        let narrow = Options {
            width: 3,
            ..Options::default()
        };
        assert!(narrow.game_config().is_err());

        let tall = Options {
            height: 65,
            ..Options::default()
        };
        assert!(tall.game_config().is_err());

        let frozen = Options {
            fall_ms: 0,
            ..Options::default()
        };
        assert!(frozen.game_config().is_err());
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let options = Options {
            seed: Some(42),
            ..Options::default()
        };
        let mut a = options.rng();
        let mut b = options.rng();
        for _ in 0..32 {
            assert_eq!(a.next_range(7), b.next_range(7));
        }
    }
}
