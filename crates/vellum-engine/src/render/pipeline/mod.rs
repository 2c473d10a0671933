//! Draw pipelines.
//!
//! Both pipelines share the unit-quad geometry in [`common`] and differ only
//! in their uniforms and fragment stage.

mod common;

pub mod rect;
pub mod sprite;

pub use rect::{RectParams, RectPipeline};
pub use sprite::{SpriteParams, SpritePipeline};
