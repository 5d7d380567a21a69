//! Tick-driven Snake for the terminal
//!
//! This library provides:
//! - Core game logic, free of I/O (game module)
//! - Render adapter and TUI drawing (render module)
//! - Keyboard mapping (input module)
//! - The interactive driver that owns the tick timer (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
