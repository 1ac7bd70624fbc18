#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Garden Snake.
//!
//! The dependency on macroquad disables its default `audio` feature: the
//! audio stack needs native ALSA development libraries that headless build
//! hosts lack, and this game plays no sound. Consumers that want playback
//! can re-enable `macroquad/audio` in their own dependency specification.
//!
//! The frame loop doubles as the tick driver: each iteration reads the
//! monotonic clock, forwards the delta and the polled input to the update
//! closure, draws the scene through a projection that is recomputed only
//! when the surface dimensions change, and re-arms itself with
//! `next_frame().await` until the closure requests exit.

mod display;

pub use display::DisplayConfig;

use anyhow::Result;
use garden_snake_core::{DirectionKey, GridPosition, GridSize};
use garden_snake_rendering::{
    Color, FrameControl, FrameInput, Presentation, Projection, RenderingBackend, Scene,
};
use macroquad::input::{is_key_pressed, KeyCode};
use std::time::Duration;

const SCORE_FONT_SIZE: f32 = 24.0;
const SCORE_MARGIN: f32 = 6.0;

/// Rendering backend implemented on top of macroquad.
#[derive(Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
    window_width: i32,
    window_height: i32,
}

impl MacroquadBackend {
    /// Creates a backend with the default window configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
            window_width: 960,
            window_height: 960,
        }
    }

    /// Creates a backend from a loaded display configuration.
    #[must_use]
    pub fn from_display_config(config: &DisplayConfig) -> Self {
        Self {
            swap_interval: config.swap_interval,
            show_fps: config.show_fps,
            window_width: config.window_width,
            window_height: config.window_height,
        }
    }

    /// Overrides the swap interval requested from the windowing platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: i32) -> Self {
        self.swap_interval = Some(swap_interval);
        self
    }

    /// Enables the per-second frame-rate report on stdout.
    #[must_use]
    pub fn with_show_fps(mut self, show_fps: bool) -> Self {
        self.show_fps = show_fps;
        self
    }
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameControl + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
            window_width,
            window_height,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width,
            window_height,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut frame_clock = FrameClock::default();
            let mut viewport = Viewport::default();
            let mut fps_counter = FpsCounter::default();

            loop {
                let frame_input = poll_frame_input();
                let quit_requested = frame_input.quit_requested;

                macroquad::window::clear_background(background);

                let frame_dt = frame_clock.advance(macroquad::time::get_time());
                let control = update_scene(frame_dt, frame_input, &mut scene);

                let screen_width = macroquad::window::screen_width();
                let screen_height = macroquad::window::screen_height();
                let projection = viewport.project(screen_width, screen_height, scene.grid_size);

                draw_board(&scene, &projection);
                draw_apple(&scene, &projection);
                draw_snake(&scene, &projection);
                draw_score(&scene, &projection);

                if show_fps {
                    if let Some(per_second) = fps_counter.record_frame(frame_dt) {
                        println!("FPS: {per_second:.2}");
                    }
                }

                macroquad::window::next_frame().await;

                if quit_requested || control == FrameControl::Exit {
                    break;
                }
            }
        });

        Ok(())
    }
}

/// Collects the frame's edge-triggered key signals.
///
/// WASD and the arrow keys steer; `Escape` or `Q` request teardown. The
/// polling order is stable so repeated presses within one frame reach the
/// input mapper in a deterministic sequence.
fn poll_frame_input() -> FrameInput {
    let mut pressed = Vec::new();
    if is_key_pressed(KeyCode::W) || is_key_pressed(KeyCode::Up) {
        pressed.push(DirectionKey::Up);
    }
    if is_key_pressed(KeyCode::A) || is_key_pressed(KeyCode::Left) {
        pressed.push(DirectionKey::Left);
    }
    if is_key_pressed(KeyCode::S) || is_key_pressed(KeyCode::Down) {
        pressed.push(DirectionKey::Down);
    }
    if is_key_pressed(KeyCode::D) || is_key_pressed(KeyCode::Right) {
        pressed.push(DirectionKey::Right);
    }

    let quit_requested = is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q);

    FrameInput {
        pressed,
        quit_requested,
    }
}

/// Derives frame deltas from the host's monotonic clock.
#[derive(Debug, Default)]
struct FrameClock {
    previous_seconds: Option<f64>,
}

impl FrameClock {
    /// Returns the elapsed time since the previous call, clamped to zero.
    ///
    /// The first frame has no predecessor and yields a zero delta.
    fn advance(&mut self, now_seconds: f64) -> Duration {
        let dt = match self.previous_seconds {
            Some(previous) => (now_seconds - previous).max(0.0),
            None => 0.0,
        };
        self.previous_seconds = Some(now_seconds);
        Duration::from_secs_f64(dt)
    }
}

/// Caches the projection between frames.
///
/// The fit is recomputed only when the surface dimensions or the grid size
/// change; unchanged frames reuse the cached value bit-for-bit.
#[derive(Debug, Default)]
struct Viewport {
    cached: Option<(f32, f32, GridSize, Projection)>,
}

impl Viewport {
    fn project(&mut self, width: f32, height: f32, grid_size: GridSize) -> Projection {
        if let Some((cached_width, cached_height, cached_grid, projection)) = self.cached {
            if cached_width == width && cached_height == height && cached_grid == grid_size {
                return projection;
            }
        }

        let projection = Projection::fit(width, height, grid_size);
        self.cached = Some((width, height, grid_size, projection));
        projection
    }
}

#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
}

impl FpsCounter {
    /// Records a frame and returns the average rate once a second elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<f32> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let per_second = self.frames as f32 / self.elapsed.as_secs_f32();
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(per_second)
    }
}

fn draw_board(scene: &Scene, projection: &Projection) {
    let origin = projection.offset();
    let size = projection.board_size(scene.grid_size);
    macroquad::shapes::draw_rectangle(
        origin.x,
        origin.y,
        size.x,
        size.y,
        to_macroquad_color(scene.board.base_color),
    );

    let checker = to_macroquad_color(scene.board.checker_color);
    let step = projection.scale_factor();
    for row in 0..scene.grid_size.get() {
        for column in 0..scene.grid_size.get() {
            if (column + row) % 2 == 1 {
                let tile = projection.tile_origin(GridPosition::new(column, row));
                macroquad::shapes::draw_rectangle(tile.x, tile.y, step, step, checker);
            }
        }
    }
}

fn draw_apple(scene: &Scene, projection: &Projection) {
    if let Some(apple) = scene.apple {
        draw_tile(apple.position, apple.color, projection);
    }
}

fn draw_snake(scene: &Scene, projection: &Projection) {
    for segment in &scene.snake.tail {
        draw_tile(*segment, scene.snake.tail_color, projection);
    }
    draw_tile(scene.snake.head, scene.snake.head_color, projection);
}

fn draw_tile(position: GridPosition, color: Color, projection: &Projection) {
    let origin = projection.tile_origin(position);
    let size = projection.tile_size();
    macroquad::shapes::draw_rectangle(origin.x, origin.y, size.x, size.y, to_macroquad_color(color));
}

fn draw_score(scene: &Scene, projection: &Projection) {
    let label = if scene.ended {
        format!("Final score: {}", scene.score)
    } else {
        format!("Score: {}", scene.score)
    };
    let origin = projection.offset();
    let baseline = (origin.y - SCORE_MARGIN).max(SCORE_FONT_SIZE);
    macroquad::text::draw_text(
        &label,
        origin.x + SCORE_MARGIN,
        baseline,
        SCORE_FONT_SIZE,
        macroquad::color::WHITE,
    );
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
