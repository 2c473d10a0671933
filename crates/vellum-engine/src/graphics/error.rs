use thiserror::Error;

use crate::device::SurfaceErrorAction;

/// Errors surfaced by the render state and the `gfx` facade.
///
/// Apart from [`GraphicsError::FrameSkipped`], all of them are programmer
/// errors or startup failures; none is retried.
#[derive(Debug, Error)]
pub enum GraphicsError {
    #[error("call `gfx::init` before calling any drawing functions")]
    Uninitialized,

    #[error("a render state is already initialized in this process")]
    AlreadyInitialized,

    #[error("could not initialize the GPU context: {0}")]
    ContextUnavailable(String),

    #[error("only a canvas can be selected as render target")]
    NotARenderTarget,

    #[error("the active canvas cannot be drawn into itself")]
    FeedbackLoop,

    #[error("texture size {width}x{height} is empty")]
    InvalidSize { width: u32, height: u32 },

    #[error("expected {expected} bytes of RGBA pixels, got {actual}")]
    PixelDataMismatch { expected: usize, actual: usize },

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("failed to acquire a screen frame: {0}")]
    Surface(#[from] wgpu::SurfaceError),

    /// The screen had no frame to hand out this time (timeout, occluded
    /// window). The next frame may succeed.
    #[error("screen frame skipped: {0}")]
    FrameSkipped(wgpu::SurfaceError),

    #[error("failed to read pixels back: {0}")]
    Readback(String),
}

impl GraphicsError {
    /// Wraps a context-acquisition failure, keeping the whole cause chain.
    pub(crate) fn context(err: anyhow::Error) -> Self {
        GraphicsError::ContextUnavailable(format!("{err:#}"))
    }

    /// Classifies a failed screen-frame acquisition: only fatal surface
    /// errors become [`GraphicsError::Surface`].
    pub(crate) fn acquire(err: wgpu::SurfaceError) -> Self {
        match SurfaceErrorAction::for_error(&err) {
            SurfaceErrorAction::Fatal => GraphicsError::Surface(err),
            SurfaceErrorAction::SkipFrame | SurfaceErrorAction::Reconfigured => {
                GraphicsError::FrameSkipped(err)
            }
        }
    }

    /// True when dropping the current frame and carrying on is enough.
    pub fn is_transient(&self) -> bool {
        matches!(self, GraphicsError::FrameSkipped(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uninitialized_names_init() {
        assert!(GraphicsError::Uninitialized.to_string().contains("init"));
    }

    #[test]
    fn context_keeps_cause_chain() {
        let err = anyhow::anyhow!("no adapter").context("failed to request adapter");
        let msg = GraphicsError::context(err).to_string();
        assert!(msg.contains("failed to request adapter"));
        assert!(msg.contains("no adapter"));
    }

    #[test]
    fn skipped_frames_are_transient() {
        for err in [wgpu::SurfaceError::Timeout, wgpu::SurfaceError::Other] {
            let err = GraphicsError::acquire(err);
            assert!(matches!(err, GraphicsError::FrameSkipped(_)));
            assert!(err.is_transient());
        }
    }

    #[test]
    fn out_of_memory_is_not_transient() {
        let err = GraphicsError::acquire(wgpu::SurfaceError::OutOfMemory);
        assert!(matches!(err, GraphicsError::Surface(wgpu::SurfaceError::OutOfMemory)));
        assert!(!err.is_transient());
    }

    #[test]
    fn invalid_size_reports_dimensions() {
        let msg = GraphicsError::InvalidSize { width: 0, height: 12 }.to_string();
        assert!(msg.contains("0x12"));
    }
}
