//! Grid Snake - a grid-based snake game
//!
//! This library provides:
//! - The game-state engine: grid, snake, food placement, input arbitration and
//!   the per-tick transition (game module)
//! - Session lifecycle with cancellable timers and high score persistence
//!   (session module)
//! - A terminal front end (input, render and modes modules)

pub mod error;
pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod session;

pub use error::{GameError, GameResult};
