use std::fmt;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::grid::{Grid, GridError};

/// Speed tier; also selects which leaderboard a score lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    /// Starting time between ticks in milliseconds
    pub fn tick_ms(self) -> u64 {
        match self {
            Difficulty::Easy => 150,
            Difficulty::Normal => 125,
            Difficulty::Hard => 90,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// When a self-collision is noticed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Move first, then look for an overlap
    #[default]
    PostMove,
    /// Look ahead and end the game before the losing move is drawn
    Predictive,
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed number of rows; fitted to the viewport when unset
    pub rows: Option<usize>,
    /// Fixed number of columns; fitted to the viewport when unset
    pub cols: Option<usize>,
    /// Smallest fitted side length
    pub min_cells: usize,
    /// Largest fitted side length
    pub max_cells: usize,

    pub difficulty: Difficulty,
    /// Milliseconds taken off the tick interval per food eaten
    pub speedup_per_food_ms: u64,
    /// Floor for the tick interval
    pub min_tick_ms: u64,
    pub collision_policy: CollisionPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: None,
            cols: None,
            min_cells: 10,
            max_cells: 15,
            difficulty: Difficulty::Normal,
            speedup_per_food_ms: 2,
            min_tick_ms: 50,
            collision_policy: CollisionPolicy::PostMove,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a fixed grid size
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows: Some(rows),
            cols: Some(cols),
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Load from a JSON file; missing fields keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        serde_json::from_str(&json).with_context(|| format!("Failed to parse config {:?}", path))
    }

    pub fn is_fixed_size(&self) -> bool {
        self.rows.is_some() && self.cols.is_some()
    }

    /// Grid for a viewport measured in cells.
    ///
    /// Fixed dimensions win; otherwise a square grid is fitted between
    /// `min_cells` and `max_cells`.
    pub fn grid_for_viewport(&self, width: usize, height: usize) -> Result<Grid, GridError> {
        match (self.rows, self.cols) {
            (Some(rows), Some(cols)) => Grid::new(rows, cols),
            _ => Grid::fit_viewport(width, height, self.min_cells, self.max_cells, 1),
        }
    }

    /// Starting tick interval for the configured difficulty
    pub fn initial_tick(&self) -> Duration {
        Duration::from_millis(self.difficulty.tick_ms().max(self.min_tick_ms))
    }

    /// Tick interval after one more food
    pub fn sped_up(&self, current: Duration) -> Duration {
        let floor = Duration::from_millis(self.min_tick_ms);
        current
            .saturating_sub(Duration::from_millis(self.speedup_per_food_ms))
            .max(floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.difficulty, Difficulty::Normal);
        assert_eq!(config.min_cells, 10);
        assert_eq!(config.max_cells, 15);
        assert!(!config.is_fixed_size());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(12, 18);
        assert!(config.is_fixed_size());
        let grid = config.grid_for_viewport(1, 1).unwrap();
        assert_eq!((grid.rows(), grid.cols()), (12, 18));
    }

    #[test]
    fn test_viewport_fitting() {
        let config = GameConfig::default();
        let grid = config.grid_for_viewport(80, 12).unwrap();
        assert_eq!((grid.rows(), grid.cols()), (12, 12));

        let grid = config.grid_for_viewport(200, 60).unwrap();
        assert_eq!(grid.rows(), 15);
    }

    #[test]
    fn test_difficulty_intervals() {
        assert!(Difficulty::Easy.tick_ms() > Difficulty::Normal.tick_ms());
        assert!(Difficulty::Normal.tick_ms() > Difficulty::Hard.tick_ms());
        assert_eq!(GameConfig::default().initial_tick(), Duration::from_millis(125));
    }

    #[test]
    fn test_speed_up_stops_at_floor() {
        let config = GameConfig {
            speedup_per_food_ms: 30,
            min_tick_ms: 60,
            ..GameConfig::default()
        };
        let tick = config.sped_up(Duration::from_millis(125));
        assert_eq!(tick, Duration::from_millis(95));
        let tick = config.sped_up(tick);
        assert_eq!(tick, Duration::from_millis(65));
        let tick = config.sped_up(tick);
        assert_eq!(tick, Duration::from_millis(60));
    }

    #[test]
    fn test_load_partial_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"difficulty":"hard","collision_policy":"predictive"}}"#).unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.collision_policy, CollisionPolicy::Predictive);
        assert_eq!(config.max_cells, 15);
    }

    #[test]
    fn test_load_missing_file_errors() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(GameConfig::load(&dir.path().join("nope.json")).is_err());
    }
}
