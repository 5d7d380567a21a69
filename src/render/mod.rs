pub mod field;
pub mod renderer;

pub use field::{Canvas, Cell, Field, RenderError};
pub use renderer::Renderer;
