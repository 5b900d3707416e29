use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{
    direction::Direction,
    grid::{GridSpec, Position},
    state::Snake,
};
use crate::error::{GameError, GameResult};

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Grid rows; `None` fits the grid to the terminal
    pub grid_rows: Option<usize>,
    /// Grid columns; `None` fits the grid to the terminal
    pub grid_cols: Option<usize>,
    /// Head cell of the snake when a session starts
    pub initial_head: Position,
    /// Heading when a session starts
    pub initial_heading: Direction,
    /// Initial length of the snake
    pub initial_length: usize,
    /// Milliseconds between ticks
    pub tick_interval_ms: u64,
    /// Points added per food eaten
    pub points_per_food: u32,
    /// Where the high score is kept
    pub high_score_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_rows: None,
            grid_cols: None,
            initial_head: Position::new(2, 8),
            initial_heading: Direction::Left,
            initial_length: 1,
            tick_interval_ms: 300,
            points_per_food: 10,
            high_score_path: PathBuf::from("highscore.json"),
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a fixed grid size
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            grid_rows: Some(rows),
            grid_cols: Some(cols),
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Read a TOML config file. Missing keys take their defaults.
    pub fn from_toml_file(path: &Path) -> GameResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| GameError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| GameError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    /// The explicit grid, if both dimensions are configured
    pub fn fixed_grid(&self) -> Option<GameResult<GridSpec>> {
        match (self.grid_rows, self.grid_cols) {
            (Some(rows), Some(cols)) => Some(GridSpec::new(rows, cols)),
            _ => None,
        }
    }

    /// The snake every session starts with, checked against `grid`
    pub fn initial_snake(&self, grid: &GridSpec) -> GameResult<Snake> {
        if self.initial_length == 0 {
            return Err(GameError::EmptySnake);
        }

        let snake = Snake::new(self.initial_head, self.initial_heading, self.initial_length);
        if let Some(outside) = snake.segments().find(|pos| !grid.contains(*pos)) {
            return Err(GameError::PlacementOutsideGrid {
                position: outside,
                rows: grid.rows(),
                cols: grid.cols(),
            });
        }

        Ok(snake)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.initial_head, Position::new(2, 8));
        assert_eq!(config.initial_heading, Direction::Left);
        assert_eq!(config.initial_length, 1);
        assert_eq!(config.tick_interval(), Duration::from_millis(300));
        assert_eq!(config.points_per_food, 10);
        assert!(config.fixed_grid().is_none());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 12);
        let grid = config.fixed_grid().unwrap().unwrap();
        assert_eq!(grid.rows(), 15);
        assert_eq!(grid.cols(), 12);
    }

    #[test]
    fn test_initial_snake_must_fit() {
        let config = GameConfig::default();

        let tiny = GridSpec::new(3, 5).unwrap();
        assert!(matches!(
            config.initial_snake(&tiny),
            Err(GameError::PlacementOutsideGrid { .. })
        ));

        let grid = GridSpec::new(10, 10).unwrap();
        let snake = config.initial_snake(&grid).unwrap();
        assert_eq!(snake.head(), Position::new(2, 8));
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn test_long_initial_snake_trails_behind() {
        let grid = GridSpec::new(10, 10).unwrap();

        // Heading left, so the body extends to the right of the head
        let config = GameConfig {
            initial_length: 2,
            ..GameConfig::default()
        };
        let snake = config.initial_snake(&grid).unwrap();
        assert_eq!(snake.tail(), Position::new(2, 9));

        let too_long = GameConfig {
            initial_length: 3,
            ..GameConfig::default()
        };
        assert!(too_long.initial_snake(&grid).is_err());
    }

    #[test]
    fn test_zero_length_rejected() {
        let config = GameConfig {
            initial_length: 0,
            ..GameConfig::default()
        };
        let grid = GridSpec::new(10, 10).unwrap();
        assert!(matches!(config.initial_snake(&grid), Err(GameError::EmptySnake)));
    }

    #[test]
    fn test_toml_partial_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snake.toml");
        std::fs::write(
            &path,
            "grid_rows = 12\ngrid_cols = 16\ntick_interval_ms = 150\ninitial_heading = \"up\"\n",
        )
        .unwrap();

        let config = GameConfig::from_toml_file(&path).unwrap();
        assert_eq!(config.grid_rows, Some(12));
        assert_eq!(config.grid_cols, Some(16));
        assert_eq!(config.tick_interval_ms, 150);
        assert_eq!(config.initial_heading, Direction::Up);
        assert_eq!(config.points_per_food, 10);
    }

    #[test]
    fn test_toml_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "grid_rows = \"many\"").unwrap();

        assert!(matches!(
            GameConfig::from_toml_file(&path),
            Err(GameError::ConfigParse { .. })
        ));
    }
}
