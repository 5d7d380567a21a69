pub mod handler;

pub use handler::{InputHandler, KeyAction, TICK_RATE_STEP_MS};
