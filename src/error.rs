use std::path::PathBuf;

use crate::game::Position;

/// Errors surfaced by the game library.
///
/// Collisions are not errors; they come back from a tick as
/// [`TickOutcome::Collided`](crate::game::TickOutcome::Collided).
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("grid must have at least one row and one column (got {rows}x{cols})")]
    InvalidGrid { rows: usize, cols: usize },

    #[error("initial snake segment {position:?} lies outside a {rows}x{cols} grid")]
    PlacementOutsideGrid {
        position: Position,
        rows: usize,
        cols: usize,
    },

    #[error("initial snake length must be at least 1")]
    EmptySnake,

    #[error("high score store I/O failed for {path:?}")]
    StoreIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("high score store at {path:?} is malformed")]
    StoreFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse config file {path:?}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to read config file {path:?}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type GameResult<T> = std::result::Result<T, GameError>;
