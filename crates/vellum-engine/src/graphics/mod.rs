//! The render state.
//!
//! [`Graphics`] ties the GPU context, the sprite and rect pipelines and the
//! current render target together. It is the type-level entry point; the
//! [`crate::gfx`] facade wraps one instance per process.

mod context;
mod error;
mod target;

pub use context::Graphics;
pub use error::GraphicsError;
pub use target::{TargetScope, TargetState};
