pub mod renderer;

pub use renderer::{Renderer, sprite_glyph};
