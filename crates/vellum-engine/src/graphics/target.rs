use std::ops::{Deref, DerefMut};

use crate::coords::Viewport;
use crate::render::Orientation;
use crate::texture::Canvas;

use super::Graphics;

/// The single mutable "current render target".
///
/// `None` is the visible screen. The viewport is the pixel size of whatever
/// was selected last.
#[derive(Debug, Clone)]
pub struct TargetState {
    active: Option<Canvas>,
    viewport: Viewport,
}

impl TargetState {
    /// The screen selected, with its current pixel size.
    pub(crate) fn screen(size: Viewport) -> Self {
        Self {
            active: None,
            viewport: size,
        }
    }

    pub(crate) fn select(&mut self, canvas: Option<&Canvas>, screen_size: Viewport) {
        self.viewport = match canvas {
            Some(c) => Viewport::new(c.width(), c.height()),
            None => screen_size,
        };
        self.active = canvas.cloned();
    }

    /// Active canvas, or `None` while drawing to the screen.
    pub fn active(&self) -> Option<&Canvas> {
        self.active.as_ref()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn orientation(&self) -> Orientation {
        match self.active {
            Some(_) => Orientation::FramebufferSpace,
            None => Orientation::ScreenSpace,
        }
    }

    /// True when `canvas` is the active target.
    pub fn is_active(&self, canvas: &Canvas) -> bool {
        self.active.as_ref().is_some_and(|a| a.same_target(canvas))
    }
}

/// Guard returned by [`Graphics::scoped_target`].
///
/// Derefs to the render state, so drawing goes through the guard; the
/// previously active target is selected again when it drops.
pub struct TargetScope<'g, 'w> {
    graphics: &'g mut Graphics<'w>,
    previous: Option<Canvas>,
}

impl<'g, 'w> TargetScope<'g, 'w> {
    pub(crate) fn new(graphics: &'g mut Graphics<'w>, previous: Option<Canvas>) -> Self {
        Self { graphics, previous }
    }
}

impl<'w> Deref for TargetScope<'_, 'w> {
    type Target = Graphics<'w>;

    fn deref(&self) -> &Self::Target {
        self.graphics
    }
}

impl DerefMut for TargetScope<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.graphics
    }
}

impl Drop for TargetScope<'_, '_> {
    fn drop(&mut self) {
        let previous = self.previous.take();
        self.graphics.set_canvas(previous.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_state_uses_screen_size() {
        let state = TargetState::screen(Viewport::new(1000, 800));
        assert!(state.active().is_none());
        assert_eq!(state.viewport(), Viewport::new(1000, 800));
        assert_eq!(state.orientation(), Orientation::ScreenSpace);
    }

    #[test]
    fn selecting_screen_takes_current_size() {
        let mut state = TargetState::screen(Viewport::new(1000, 800));
        state.select(None, Viewport::new(640, 480));
        assert_eq!(state.viewport(), Viewport::new(640, 480));
    }
}
