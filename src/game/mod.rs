//! Core game logic module for Snake
//!
//! Everything in here is free of I/O and rendering. A `GameSession` is
//! advanced one tick at a time and hands back a `Snapshot` for whoever
//! draws it.

pub mod action;
pub mod config;
pub mod food;
pub mod geometry;
pub mod session;
pub mod snake;

// Re-export commonly used types
pub use action::{steer, Direction};
pub use config::{ConfigError, GameConfig, MAX_GRID_SIDE, MAX_TICK_RATE_MS, MIN_TICK_RATE_MS};
pub use food::place_food;
pub use geometry::{Point, Position, Size, Vector};
pub use session::{Collision, GameSession, Lifecycle, Snapshot, TickEvent, TickReport};
pub use snake::Snake;
