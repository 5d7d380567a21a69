use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::geometry::{Position, Size};

/// Fastest accepted tick rate in milliseconds
pub const MIN_TICK_RATE_MS: u64 = 25;
/// Slowest accepted tick rate in milliseconds
pub const MAX_TICK_RATE_MS: u64 = 2000;
/// Largest accepted grid width or height
pub const MAX_GRID_SIDE: usize = 1024;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "grid sides must be in [1, {}] with room for food, got {width}x{height}",
        MAX_GRID_SIDE
    )]
    InvalidGrid { width: usize, height: usize },

    #[error(
        "tick rate must be in [{}, {}] ms, got {0}",
        MIN_TICK_RATE_MS,
        MAX_TICK_RATE_MS
    )]
    InvalidTickRate(u64),

    #[error("start position ({x}, {y}) is outside the {width}x{height} grid")]
    StartOutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Milliseconds between two ticks
    pub tick_rate_ms: u64,
    /// Column the snake spawns in
    pub start_x: i32,
    /// Row the snake spawns in
    pub start_y: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            tick_rate_ms: 150,
            start_x: 0,
            start_y: 0,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Read a TOML config file, missing keys take their default value
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn size(&self) -> Size {
        Size::new(self.grid_width as i32, self.grid_height as i32)
    }

    pub fn start_position(&self) -> Position {
        Position::new(self.start_x, self.start_y)
    }

    /// Check that the grid, tick rate and start position are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        let in_range = |n: usize| (1..=MAX_GRID_SIDE).contains(&n);
        if !in_range(self.grid_width)
            || !in_range(self.grid_height)
            || self.grid_width.saturating_mul(self.grid_height) < 2
        {
            return Err(ConfigError::InvalidGrid {
                width: self.grid_width,
                height: self.grid_height,
            });
        }

        validate_tick_rate(self.tick_rate_ms)?;

        if !self.size().contains(self.start_position()) {
            return Err(ConfigError::StartOutOfBounds {
                x: self.start_x,
                y: self.start_y,
                width: self.grid_width,
                height: self.grid_height,
            });
        }

        Ok(())
    }
}

pub fn validate_tick_rate(ms: u64) -> Result<(), ConfigError> {
    if !(MIN_TICK_RATE_MS..=MAX_TICK_RATE_MS).contains(&ms) {
        return Err(ConfigError::InvalidTickRate(ms));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.tick_rate_ms, 150);
        assert_eq!(config.start_position(), Position::new(0, 0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 12);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 12);
        assert_eq!(config.size(), Size::new(15, 12));
    }

    #[test]
    fn test_invalid_grid() {
        assert!(matches!(
            GameConfig::new(0, 10).validate(),
            Err(ConfigError::InvalidGrid { .. })
        ));
        assert!(matches!(
            GameConfig::new(1, 1).validate(),
            Err(ConfigError::InvalidGrid { .. })
        ));
        assert!(GameConfig::new(2, 1).validate().is_ok());
    }

    #[test]
    fn test_grid_side_is_capped() {
        assert!(GameConfig::new(MAX_GRID_SIDE, MAX_GRID_SIDE).validate().is_ok());
        assert!(matches!(
            GameConfig::new(MAX_GRID_SIDE + 1, 10).validate(),
            Err(ConfigError::InvalidGrid { .. })
        ));
        assert!(matches!(
            GameConfig::new(100_000, 100_000).validate(),
            Err(ConfigError::InvalidGrid { .. })
        ));
    }

    #[test]
    fn test_invalid_tick_rate() {
        let mut config = GameConfig::default();
        config.tick_rate_ms = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTickRate(0))
        ));

        config.tick_rate_ms = MAX_TICK_RATE_MS + 1;
        assert!(config.validate().is_err());

        config.tick_rate_ms = MIN_TICK_RATE_MS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_start_out_of_bounds() {
        let mut config = GameConfig::new(5, 5);
        config.start_x = 5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::StartOutOfBounds { x: 5, y: 0, .. })
        ));

        config.start_x = -1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "grid_width = 30\ntick_rate_ms = 100").unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.grid_width, 30);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.tick_rate_ms, 100);
    }

    #[test]
    fn test_load_errors() {
        let missing = GameConfig::load(Path::new("/definitely/not/here.toml"));
        assert!(matches!(missing, Err(ConfigError::Read { .. })));

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "grid_width = \"wide\"").unwrap();
        let bad = GameConfig::load(file.path());
        assert!(matches!(bad, Err(ConfigError::Parse { .. })));
    }
}
