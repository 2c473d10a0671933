//! Window + runtime loop.
//!
//! Owns the `winit` event loop and the single window, and drives an
//! [`crate::core::App`] with a [`crate::graphics::Graphics`] bound to it.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
