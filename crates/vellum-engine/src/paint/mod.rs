//! Colors used by the draw and clear calls.

mod clear;
mod color;

pub use clear::ClearColor;
pub use color::Color;
