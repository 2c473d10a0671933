//! Process-wide drawing facade.
//!
//! Free functions over one [`Graphics`] owned by the thread that initialized
//! it. Until [`init`], [`init_headless`] or [`install`] succeeds, every
//! operation except [`new_quad`] fails with [`GraphicsError::Uninitialized`].
//! Initialization succeeds at most once per process; later attempts fail
//! with [`GraphicsError::AlreadyInitialized`], and other threads see the
//! facade as uninitialized.
//!
//! Prefer [`Graphics`] directly when a value can be threaded through.

use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::coords::{Quad, Viewport};
use crate::device::GpuInit;
use crate::graphics::{Graphics, GraphicsError};
use crate::paint::{ClearColor, Color};
use crate::texture::{self, Canvas, Image, TextureResource};

thread_local! {
    static GRAPHICS: RefCell<Option<Graphics<'static>>> = const { RefCell::new(None) };
}

static CLAIMED: AtomicBool = AtomicBool::new(false);

fn claim() -> Result<(), GraphicsError> {
    CLAIMED
        .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
        .map(|_| ())
        .map_err(|_| GraphicsError::AlreadyInitialized)
}

fn store(created: Result<Graphics<'static>, GraphicsError>) -> Result<(), GraphicsError> {
    match created {
        Ok(graphics) => {
            GRAPHICS.with(|slot| *slot.borrow_mut() = Some(graphics));
            log::info!("gfx initialized");
            Ok(())
        }
        Err(err) => {
            // A failed attempt does not count as the process's init.
            CLAIMED.store(false, Ordering::Release);
            Err(err)
        }
    }
}

/// Initializes the facade against a window (e.g. an `Arc<winit::window::Window>`)
/// whose drawable size is `size` physical pixels.
pub fn init(
    window: impl Into<wgpu::SurfaceTarget<'static>>,
    size: Viewport,
    init: GpuInit,
) -> Result<(), GraphicsError> {
    claim()?;
    store(Graphics::for_window(window, size, init))
}

/// Initializes the facade with an offscreen `width` × `height` screen.
pub fn init_headless(width: u32, height: u32, init: GpuInit) -> Result<(), GraphicsError> {
    claim()?;
    store(Graphics::headless(width, height, init))
}

/// Hands an already built render state to the facade.
pub fn install(graphics: Graphics<'static>) -> Result<(), GraphicsError> {
    claim()?;
    store(Ok(graphics))
}

/// Runs `f` with the facade's render state.
///
/// # Panics
///
/// If `f` calls back into the facade.
pub fn with_graphics<R>(f: impl FnOnce(&mut Graphics<'static>) -> R) -> Result<R, GraphicsError> {
    GRAPHICS.with(|slot| {
        let mut slot = slot.borrow_mut();
        let graphics = slot.as_mut().ok_or(GraphicsError::Uninitialized)?;
        Ok(f(graphics))
    })
}

/// See [`Graphics::set_target`].
pub fn set_target(target: Option<&TextureResource>) -> Result<(), GraphicsError> {
    with_graphics(|g| g.set_target(target))?
}

/// See [`Graphics::clear`].
pub fn clear(color: ClearColor) -> Result<(), GraphicsError> {
    with_graphics(|g| g.clear(color))?
}

/// See [`Graphics::draw`].
pub fn draw(
    texture: impl Into<TextureResource>,
    quad: Quad,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
) -> Result<(), GraphicsError> {
    with_graphics(|g| g.draw(texture, quad, x, y, width, height))?
}

/// See [`Graphics::rectangle`].
pub fn rectangle(x: f32, y: f32, width: f32, height: f32) -> Result<(), GraphicsError> {
    with_graphics(|g| g.rectangle(x, y, width, height))?
}

pub fn set_color(color: Color) -> Result<(), GraphicsError> {
    with_graphics(|g| g.set_color(color))
}

pub fn new_image(pixels: &[u8], width: u32, height: u32) -> Result<Image, GraphicsError> {
    with_graphics(|g| g.new_image(pixels, width, height))?
}

pub fn new_canvas(width: u32, height: u32) -> Result<Canvas, GraphicsError> {
    with_graphics(|g| g.new_canvas(width, height))?
}

/// Pure; usable before initialization.
pub fn new_quad(x: f32, y: f32, width: f32, height: f32, owner: &TextureResource) -> Quad {
    texture::new_quad(x, y, width, height, owner)
}

pub fn present() -> Result<(), GraphicsError> {
    with_graphics(|g| g.present())
}

pub fn viewport() -> Result<Viewport, GraphicsError> {
    with_graphics(|g| g.viewport())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uninitialized<T: std::fmt::Debug>(result: Result<T, GraphicsError>) -> bool {
        matches!(result, Err(GraphicsError::Uninitialized))
    }

    #[test]
    fn every_operation_fails_before_init() {
        assert!(uninitialized(set_target(None)));
        assert!(uninitialized(clear(ClearColor::default())));
        assert!(uninitialized(rectangle(0.0, 0.0, 10.0, 10.0)));
        assert!(uninitialized(set_color(Color::BLACK)));
        assert!(uninitialized(new_image(&[0; 16], 2, 2)));
        assert!(uninitialized(new_canvas(500, 400)));
        assert!(uninitialized(present()));
        assert!(uninitialized(viewport()));
        assert!(uninitialized(with_graphics(|_| ())));
    }
}
