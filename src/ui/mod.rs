pub mod color;
pub mod compositor;
pub mod input;
pub mod render;
