use vellum_engine::device::GpuInit;
use vellum_engine::{
    new_quad, ClearColor, Color, FilterMode, Graphics, GraphicsError, Image, Quad,
    TextureResource, Viewport,
};

const RED: [u8; 4] = [255, 0, 0, 255];
const GREEN: [u8; 4] = [0, 255, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];
const WHITE: [u8; 4] = [255, 255, 255, 255];
const BLACK: [u8; 4] = [0, 0, 0, 255];

/// Headless render state, or `None` on machines without a usable adapter.
fn headless(width: u32, height: u32) -> Option<Graphics<'static>> {
    match Graphics::headless(width, height, GpuInit::headless()) {
        Ok(graphics) => Some(graphics),
        Err(err) => {
            eprintln!("skipping GPU test: {err}");
            None
        }
    }
}

fn pixel(data: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * width + x) * 4) as usize;
    [data[i], data[i + 1], data[i + 2], data[i + 3]]
}

/// `width` × `height` RGBA buffer filled by `f(x, y)`.
fn pixels(width: u32, height: u32, f: impl Fn(u32, u32) -> [u8; 4]) -> Vec<u8> {
    let mut out = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            out.extend_from_slice(&f(x, y));
        }
    }
    out
}

fn nearest(image: &Image) -> TextureResource {
    let resource = TextureResource::from(image);
    resource.set_filter(FilterMode::Nearest, FilterMode::Nearest);
    resource
}

#[test]
fn cleared_canvas_is_opaque_black() {
    let Some(mut g) = headless(64, 64) else { return };

    let canvas = g.new_canvas(500, 400).unwrap();
    g.set_target(Some(&canvas.clone().into())).unwrap();
    assert_eq!(g.viewport(), Viewport::new(500, 400));

    g.clear(ClearColor::default()).unwrap();
    let data = g.read_pixels(&canvas).unwrap();
    assert_eq!(data.len(), 500 * 400 * 4);
    assert!(data.chunks_exact(4).all(|px| px == BLACK));
}

#[test]
fn selecting_the_screen_restores_its_viewport() {
    let Some(mut g) = headless(320, 240) else { return };
    let canvas = g.new_canvas(500, 400).unwrap();

    g.set_target(None).unwrap();
    assert_eq!(g.viewport(), Viewport::new(320, 240));
    g.set_canvas(Some(&canvas));
    assert_eq!(g.viewport(), Viewport::new(500, 400));
    assert!(g.active_target().is_some());
    g.set_target(None).unwrap();
    assert_eq!(g.viewport(), Viewport::new(320, 240));
    assert!(g.active_target().is_none());
}

#[test]
fn images_cannot_be_render_targets() {
    let Some(mut g) = headless(32, 32) else { return };
    let canvas = g.new_canvas(16, 8).unwrap();
    let image = g.new_image(&pixels(2, 2, |_, _| WHITE), 2, 2).unwrap();

    g.set_canvas(Some(&canvas));
    let err = g.set_target(Some(&image.into())).unwrap_err();
    assert!(matches!(err, GraphicsError::NotARenderTarget));

    // Unchanged.
    assert_eq!(g.viewport(), Viewport::new(16, 8));
    assert!(g.active_target().is_some_and(|c| c.same_target(&canvas)));
}

#[test]
fn rectangle_fills_with_the_latest_color() {
    let Some(mut g) = headless(32, 32) else { return };
    let canvas = g.new_canvas(8, 8).unwrap();
    g.set_canvas(Some(&canvas));
    g.clear(ClearColor::default()).unwrap();

    assert!(!g.blend_enabled());
    g.set_color(Color::rgb(1.0, 0.0, 0.0));
    g.rectangle(0.0, 0.0, 8.0, 8.0).unwrap();
    assert!(g.blend_enabled());
    assert!(g.read_pixels(&canvas).unwrap().chunks_exact(4).all(|px| px == RED));

    g.set_color(Color::rgb(0.0, 1.0, 0.0));
    g.rectangle(0.0, 0.0, 8.0, 4.0).unwrap();
    let data = g.read_pixels(&canvas).unwrap();
    assert_eq!(pixel(&data, 8, 3, 0), GREEN);
    assert_eq!(pixel(&data, 8, 3, 3), GREEN);
    assert_eq!(pixel(&data, 8, 3, 4), RED);
    assert_eq!(pixel(&data, 8, 3, 7), RED);
}

#[test]
fn draws_land_at_screen_space_positions_in_canvases() {
    let Some(mut g) = headless(32, 32) else { return };
    let canvas = g.new_canvas(4, 4).unwrap();
    g.set_canvas(Some(&canvas));
    g.clear(ClearColor::default()).unwrap();

    // Top-left 2x2 block.
    g.set_color(Color::WHITE);
    g.rectangle(0.0, 0.0, 2.0, 2.0).unwrap();

    let data = g.read_pixels(&canvas).unwrap();
    assert_eq!(pixel(&data, 4, 0, 0), WHITE);
    assert_eq!(pixel(&data, 4, 1, 1), WHITE);
    assert_eq!(pixel(&data, 4, 3, 3), BLACK);
    assert_eq!(pixel(&data, 4, 0, 3), BLACK);
}

#[test]
fn quads_select_a_sub_rectangle() {
    let Some(mut g) = headless(32, 32) else { return };

    // 4x4 image, one color per 2x2 quadrant.
    let data = pixels(4, 4, |x, y| match (x < 2, y < 2) {
        (true, true) => RED,
        (false, true) => GREEN,
        (true, false) => BLUE,
        (false, false) => WHITE,
    });
    let image = nearest(&g.new_image(&data, 4, 4).unwrap());
    let top_right = new_quad(2.0, 0.0, 2.0, 2.0, &image);
    assert_eq!(top_right, Quad::new(0.5, 0.0, 0.5, 0.5));

    let canvas = g.new_canvas(2, 2).unwrap();
    g.set_canvas(Some(&canvas));
    g.draw(&image, top_right, 0.0, 0.0, 2.0, 2.0).unwrap();

    let out = g.read_pixels(&canvas).unwrap();
    assert!(out.chunks_exact(4).all(|px| px == GREEN));
}

#[test]
fn composited_canvases_stay_upright() {
    let Some(mut g) = headless(32, 32) else { return };

    // Top row red, bottom row blue.
    let source = pixels(2, 2, |_, y| if y == 0 { RED } else { BLUE });
    let image = nearest(&g.new_image(&source, 2, 2).unwrap());

    let first = g.new_canvas(2, 2).unwrap();
    g.set_canvas(Some(&first));
    g.draw(&image, Quad::FULL, 0.0, 0.0, 2.0, 2.0).unwrap();

    let data = g.read_pixels(&first).unwrap();
    assert_eq!(pixel(&data, 2, 0, 0), RED);
    assert_eq!(pixel(&data, 2, 1, 1), BLUE);

    // Canvas into canvas: the flipped source is sampled with v inverted.
    let second = g.new_canvas(2, 2).unwrap();
    let first_res = TextureResource::from(&first);
    first_res.set_filter(FilterMode::Nearest, FilterMode::Nearest);
    assert!(first_res.flipped());

    g.set_canvas(Some(&second));
    g.draw(&first_res, Quad::FULL, 0.0, 0.0, 2.0, 2.0).unwrap();

    let data = g.read_pixels(&second).unwrap();
    assert_eq!(pixel(&data, 2, 1, 0), RED);
    assert_eq!(pixel(&data, 2, 0, 1), BLUE);

    // And onto the screen.
    g.set_target(None).unwrap();
    g.clear(ClearColor::default()).unwrap();
    g.draw(&second, Quad::FULL, 0.0, 0.0, 32.0, 32.0).unwrap();
    g.present();
}

#[test]
fn drawing_the_active_canvas_into_itself_fails() {
    let Some(mut g) = headless(32, 32) else { return };
    let canvas = g.new_canvas(8, 8).unwrap();
    g.set_canvas(Some(&canvas));

    let err = g.draw(&canvas, Quad::FULL, 0.0, 0.0, 8.0, 8.0).unwrap_err();
    assert!(matches!(err, GraphicsError::FeedbackLoop));
}

#[test]
fn scoped_target_restores_previous_target() {
    let Some(mut g) = headless(64, 48) else { return };
    let outer = g.new_canvas(16, 16).unwrap();
    let inner = g.new_canvas(8, 4).unwrap();

    g.set_canvas(Some(&outer));
    {
        let mut scope = g.scoped_target(&inner);
        assert_eq!(scope.viewport(), Viewport::new(8, 4));
        scope.clear_rgba(0.0, 0.0, 1.0, 1.0).unwrap();
    }
    assert!(g.active_target().is_some_and(|c| c.same_target(&outer)));
    assert_eq!(g.viewport(), Viewport::new(16, 16));

    g.set_canvas(None);
    drop(g.scoped_target(&inner));
    assert!(g.active_target().is_none());
    assert_eq!(g.viewport(), Viewport::new(64, 48));

    let data = g.read_pixels(&inner).unwrap();
    assert!(data.chunks_exact(4).all(|px| px == BLUE));
}

#[test]
fn invalid_resources_are_rejected() {
    let Some(g) = headless(16, 16) else { return };

    assert!(matches!(
        g.new_canvas(0, 10),
        Err(GraphicsError::InvalidSize { width: 0, height: 10 })
    ));
    assert!(matches!(
        g.new_image(&[0; 12], 2, 2),
        Err(GraphicsError::PixelDataMismatch { expected: 16, actual: 12 })
    ));
    assert!(matches!(
        g.new_image_from_bytes(b"not a png"),
        Err(GraphicsError::Decode(_))
    ));
}
