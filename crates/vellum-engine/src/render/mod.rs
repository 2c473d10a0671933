//! GPU rendering subsystem.
//!
//! Pipelines draw one axis-aligned rectangle per call and submit it right
//! away, so uniform writes and target switches apply strictly in call order.
//!
//! Convention:
//! - CPU geometry is in target pixels (top-left origin, +Y down).
//! - Vertex shaders convert to NDC using the resolution uniform and invert
//!   Y again while a canvas is the target (see [`Orientation`]).

mod clear;
mod ctx;
pub mod pipeline;
mod readback;

pub use clear::clear;
pub use ctx::{DrawTarget, Orientation, RenderCtx};
pub(crate) use readback::read_texture;
