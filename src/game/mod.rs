//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.

pub mod arbiter;
pub mod config;
pub mod direction;
pub mod engine;
pub mod food;
pub mod grid;
pub mod state;

// Re-export commonly used types
pub use arbiter::InputArbiter;
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{TickEngine, TickOutcome};
pub use food::FoodPlacer;
pub use grid::{GridSpec, Position};
pub use state::{CollisionType, Snake};
