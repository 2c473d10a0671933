use anyhow::Result;
use vellum_engine::core::{App, AppControl, FrameCtx};
use vellum_engine::logging::{init_logging, LoggingConfig};
use vellum_engine::window::{Runtime, RuntimeConfig};
use vellum_engine::winit::dpi::LogicalSize;
use vellum_engine::{
    new_quad, Canvas, ClearColor, Color, FilterMode, Graphics, Image, Quad, TextureResource,
};

const SHEET_SIZE: u32 = 128;
const FRAME_SIZE: u32 = 32;
const SCENE_WIDTH: u32 = 500;
const SCENE_HEIGHT: u32 = 400;
const ORBITING_SPRITES: usize = 1000;
const WINDOW_WIDTH: f32 = 1000.0;
const WINDOW_HEIGHT: f32 = 800.0;

/// Renders a sprite scene into a 500x400 canvas that is never fully cleared
/// (a translucent rectangle fades old frames), then stretches the canvas
/// over the window.
///
/// Pass a 128x128 PNG sprite sheet as the first argument, or a generated
/// sheet is used.
fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let sheet_path = std::env::args().nth(1);
    let config = RuntimeConfig {
        title: "vellum demo".to_string(),
        initial_size: LogicalSize::new(WINDOW_WIDTH as f64, WINDOW_HEIGHT as f64),
        resizable: false,
        ..RuntimeConfig::default()
    };

    Runtime::run(config, Demo::new(sheet_path))
}

struct Scene {
    sheet: TextureResource,
    big_quad: Quad,
    screen: Canvas,
}

struct Demo {
    sheet_path: Option<String>,
    scene: Option<Scene>,
}

impl Demo {
    fn new(sheet_path: Option<String>) -> Self {
        Self {
            sheet_path,
            scene: None,
        }
    }
}

impl App for Demo {
    fn setup(&mut self, g: &mut Graphics<'_>) -> Result<()> {
        let sheet: Image = match &self.sheet_path {
            Some(path) => g.new_image_from_path(path)?,
            None => g.new_image(&sprite_sheet(), SHEET_SIZE, SHEET_SIZE)?,
        };
        sheet.set_filter(FilterMode::Linear, FilterMode::Nearest);
        let sheet = TextureResource::from(sheet);

        let big_quad = new_quad(32.0, 32.0, 64.0, 64.0, &sheet);
        log::info!("quad {big_quad:?}");

        let screen = g.new_canvas(SCENE_WIDTH, SCENE_HEIGHT)?;
        screen.set_filter(FilterMode::Nearest, FilterMode::Nearest);
        g.set_canvas(Some(&screen));
        g.clear(ClearColor::new(0.0, 0.0, 0.0, 1.0))?;

        self.scene = Some(Scene {
            sheet,
            big_quad,
            screen,
        });
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> Result<AppControl> {
        let Some(scene) = &self.scene else {
            return Ok(AppControl::Continue);
        };
        // The composite covers the fixed 1000x800 logical window; the screen
        // target is in physical pixels.
        let scale = ctx.scale_factor();
        let g = &mut *ctx.graphics;
        let t = ctx.time.elapsed_ms();

        g.set_canvas(Some(&scene.screen));
        g.set_color(Color::new(0.0, 0.0, 0.0, 0.02));
        g.rectangle(0.0, 0.0, 1000.0, 800.0)?;

        g.draw(&scene.sheet, scene.big_quad, 70.0, 1.0, 64.0, 64.0)?;
        g.draw(
            &scene.sheet,
            scene.big_quad,
            (t / 500.0).sin() * 300.0 + 500.0,
            (t / 400.0).cos() * 300.0 + 400.0,
            64.0,
            64.0,
        )?;

        let frame = ((t / 1000.0).floor() as u32 % 4) * FRAME_SIZE;
        let small_quad = new_quad(
            frame as f32,
            0.0,
            FRAME_SIZE as f32,
            FRAME_SIZE as f32,
            &scene.sheet,
        );
        for i in 0..ORBITING_SPRITES {
            let angle = i as f32 + t / 1000.0;
            let radius = 50.0 + i as f32;
            g.draw(
                &scene.sheet,
                small_quad,
                angle.sin() * radius + 150.0,
                angle.cos() * radius + 150.0,
                FRAME_SIZE as f32,
                FRAME_SIZE as f32,
            )?;
        }

        g.set_canvas(None);
        g.clear(ClearColor::new(0.0, 0.0, 0.0, 1.0))?;
        g.draw(
            &scene.screen,
            Quad::FULL,
            0.0,
            0.0,
            WINDOW_WIDTH * scale,
            WINDOW_HEIGHT * scale,
        )?;

        if ctx.time.frame_index % 600 == 0 {
            log::debug!("frame {} ({:.1} ms)", ctx.time.frame_index, ctx.time.dt * 1000.0);
        }
        Ok(AppControl::Continue)
    }
}

/// 128x128 RGBA sheet: four 32x32 animation frames along the top row
/// (a ring that grows frame by frame), a checkerboard elsewhere, and a
/// framed face in the 64x64 block at (32, 32).
fn sprite_sheet() -> Vec<u8> {
    const FRAME_COLORS: [[u8; 3]; 4] = [[255, 96, 64], [255, 200, 64], [96, 220, 96], [80, 160, 255]];

    let mut out = Vec::with_capacity((SHEET_SIZE * SHEET_SIZE * 4) as usize);
    for y in 0..SHEET_SIZE {
        for x in 0..SHEET_SIZE {
            let px = if y < FRAME_SIZE {
                let frame = (x / FRAME_SIZE) as usize;
                let dx = (x % FRAME_SIZE) as f32 - 15.5;
                let dy = y as f32 - 15.5;
                let d = (dx * dx + dy * dy).sqrt();
                let r = 6.0 + frame as f32 * 3.0;
                if (d - r).abs() < 2.5 {
                    let [cr, cg, cb] = FRAME_COLORS[frame];
                    [cr, cg, cb, 255]
                } else {
                    [0, 0, 0, 0]
                }
            } else if (32..96).contains(&x) && (32..96).contains(&y) {
                face(x - 32, y - 32)
            } else if ((x / 8) + (y / 8)) % 2 == 0 {
                [60, 60, 80, 255]
            } else {
                [40, 40, 56, 255]
            };
            out.extend_from_slice(&px);
        }
    }
    out
}

fn face(x: u32, y: u32) -> [u8; 4] {
    let border = x < 4 || y < 4 || x >= 60 || y >= 60;
    let eye = (y / 8 == 2) && (x / 8 == 2 || x / 8 == 5);
    let mouth = y / 4 == 11 && (12..52).contains(&x);
    if border {
        [255, 255, 255, 255]
    } else if eye || mouth {
        [20, 20, 20, 255]
    } else {
        [240, 200, 60, 255]
    }
}
