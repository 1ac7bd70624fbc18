#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Garden Snake adapters.
//!
//! Backends borrow the render surface per frame and present a declarative
//! [`Scene`]; the simulation never reads pixels back. The [`Projection`]
//! captures the scale-factor/offset fit of the square grid into the current
//! surface and is recomputed only when the surface dimensions change.

use anyhow::Result as AnyResult;
use garden_snake_core::{DirectionKey, GridPosition, GridSize};
use glam::Vec2;
use std::{error::Error, fmt, time::Duration};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Directional key signals observed this frame, in arrival order.
    pub pressed: Vec<DirectionKey>,
    /// Whether the adapter detected a quit request on this frame.
    pub quit_requested: bool,
}

/// Mapping from grid cells to surface coordinates for one surface size.
///
/// The fit places the largest centered square grid into the surface,
/// letterboxing the longer axis. Construction is pure: identical surface
/// dimensions always produce a bit-identical projection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    scale_factor: f32,
    offset: Vec2,
}

impl Projection {
    /// Computes the projection for a surface of the provided dimensions.
    #[must_use]
    pub fn fit(surface_width: f32, surface_height: f32, grid_size: GridSize) -> Self {
        if grid_size.get() == 0 {
            return Self {
                scale_factor: 0.0,
                offset: Vec2::new(surface_width * 0.5, surface_height * 0.5),
            };
        }

        let cells = grid_size.get() as f32;
        let scale_factor = surface_width.min(surface_height) / cells;
        let side = scale_factor * cells;
        let offset = Vec2::new(
            (surface_width - side) * 0.5,
            (surface_height - side) * 0.5,
        );

        Self {
            scale_factor,
            offset,
        }
    }

    /// Surface units covered by a single grid cell.
    #[must_use]
    pub const fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    /// Translation that centers the grid within the surface.
    #[must_use]
    pub const fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Surface-space origin of the tile at the provided grid cell.
    #[must_use]
    pub fn tile_origin(&self, position: GridPosition) -> Vec2 {
        self.offset
            + self.scale_factor * Vec2::new(position.column() as f32, position.row() as f32)
    }

    /// Surface-space dimensions of a single square tile.
    #[must_use]
    pub fn tile_size(&self) -> Vec2 {
        Vec2::splat(self.scale_factor)
    }

    /// Surface-space dimensions of the whole board.
    #[must_use]
    pub fn board_size(&self, grid_size: GridSize) -> Vec2 {
        Vec2::splat(self.scale_factor * grid_size.get() as f32)
    }
}

/// Describes the checkerboard play field rendered behind the snake.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardPresentation {
    /// Fill color of the even-parity tiles.
    pub base_color: Color,
    /// Fill color of the odd-parity tiles.
    pub checker_color: Color,
}

impl BoardPresentation {
    /// Amount by which the checker tiles are lightened from the base color.
    pub const CHECKER_LIGHTEN: f32 = 0.35;

    /// Creates a board with explicit tile colors.
    #[must_use]
    pub const fn new(base_color: Color, checker_color: Color) -> Self {
        Self {
            base_color,
            checker_color,
        }
    }

    /// Creates a board whose checker tiles derive from the base color.
    #[must_use]
    pub fn from_base(base_color: Color) -> Self {
        Self {
            base_color,
            checker_color: base_color.lighten(Self::CHECKER_LIGHTEN),
        }
    }
}

/// Snake rendered as one head tile plus trailing tail tiles.
#[derive(Clone, Debug, PartialEq)]
pub struct SnakePresentation {
    /// Cell occupied by the head.
    pub head: GridPosition,
    /// Trailing segments ordered oldest-first.
    pub tail: Vec<GridPosition>,
    /// Fill color of the head tile.
    pub head_color: Color,
    /// Fill color of each tail tile.
    pub tail_color: Color,
}

/// Apple rendered as a single filled tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ApplePresentation {
    /// Cell occupied by the apple.
    pub position: GridPosition,
    /// Fill color of the apple tile.
    pub color: Color,
}

/// Scene description combining the board, the snake and the apple.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Edge length of the square play grid.
    pub grid_size: GridSize,
    /// Checkerboard drawn behind the inhabitants.
    pub board: BoardPresentation,
    /// Snake drawn on top of the board.
    pub snake: SnakePresentation,
    /// Apple drawn on top of the board, absent between spawns.
    pub apple: Option<ApplePresentation>,
    /// Score shown alongside the play field.
    pub score: u32,
    /// Whether the session has reached its terminal state.
    pub ended: bool,
}

impl Scene {
    /// Creates a new scene descriptor.
    ///
    /// Returns an error when the grid has no cells, since no surface fit
    /// exists for an empty grid.
    pub fn new(
        grid_size: GridSize,
        board: BoardPresentation,
        snake: SnakePresentation,
        apple: Option<ApplePresentation>,
    ) -> Result<Self, RenderingError> {
        if grid_size.get() == 0 {
            return Err(RenderingError::EmptyGrid);
        }

        Ok(Self {
            grid_size,
            board,
            snake,
            apple,
            score: 0,
            ended: false,
        })
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Decision returned by the per-frame update, steering the frame loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameControl {
    /// Draw the frame and re-arm for the next one.
    Continue,
    /// Draw the frame, then stop re-arming and tear the session down.
    Exit,
}

/// Rendering backend capable of presenting Garden Snake scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until the update closure requests exit.
    ///
    /// The `update_scene` closure receives the frame delta computed from the
    /// host's monotonic timestamps and the input captured by the adapter; it
    /// may mutate the scene before the frame is drawn. Returning
    /// [`FrameControl::Exit`] stops the loop after the current frame.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameControl + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq, Eq)]
pub enum RenderingError {
    /// The grid must contain at least one cell to be presentable.
    EmptyGrid,
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => {
                write!(f, "grid must contain at least one cell")
            }
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: GridSize = GridSize::new(15);

    fn sample_snake() -> SnakePresentation {
        SnakePresentation {
            head: GridPosition::new(7, 7),
            tail: Vec::new(),
            head_color: Color::from_rgb_u8(0x00, 0x00, 0x8b),
            tail_color: Color::from_rgb_u8(0x00, 0x00, 0xff),
        }
    }

    #[test]
    fn fit_letterboxes_the_taller_surface() {
        let projection = Projection::fit(300.0, 450.0, SIZE);

        assert_eq!(projection.scale_factor(), 20.0);
        assert_eq!(projection.offset(), Vec2::new(0.0, 75.0));
    }

    #[test]
    fn fit_letterboxes_the_wider_surface() {
        let projection = Projection::fit(450.0, 300.0, SIZE);

        assert_eq!(projection.scale_factor(), 20.0);
        assert_eq!(projection.offset(), Vec2::new(75.0, 0.0));
    }

    #[test]
    fn fit_is_idempotent_for_unchanged_dimensions() {
        let first = Projection::fit(1024.0, 768.0, SIZE);
        let second = Projection::fit(1024.0, 768.0, SIZE);

        assert_eq!(first, second);
    }

    #[test]
    fn tile_origin_applies_offset_and_scale() {
        let projection = Projection::fit(300.0, 450.0, SIZE);

        let origin = projection.tile_origin(GridPosition::new(2, 3));

        assert_eq!(origin, Vec2::new(40.0, 135.0));
        assert_eq!(projection.tile_size(), Vec2::splat(20.0));
        assert_eq!(projection.board_size(SIZE), Vec2::splat(300.0));
    }

    #[test]
    fn scene_rejects_an_empty_grid() {
        let error = Scene::new(
            GridSize::new(0),
            BoardPresentation::from_base(Color::from_rgb_u8(0, 0x80, 0)),
            sample_snake(),
            None,
        )
        .expect_err("empty grids have no surface fit");

        assert_eq!(error, RenderingError::EmptyGrid);
    }

    #[test]
    fn scene_accepts_a_populated_grid() {
        let scene = Scene::new(
            SIZE,
            BoardPresentation::from_base(Color::from_rgb_u8(0, 0x80, 0)),
            sample_snake(),
            Some(ApplePresentation {
                position: GridPosition::new(3, 3),
                color: Color::from_rgb_u8(0xff, 0, 0),
            }),
        )
        .expect("populated grid is valid");

        assert_eq!(scene.score, 0);
        assert!(!scene.ended);
    }

    #[test]
    fn lighten_moves_channels_toward_white() {
        let color = Color::from_rgb_u8(0, 0x80, 0).lighten(0.5);

        assert!(color.red > 0.0);
        assert!(color.green > 0x80 as f32 / 255.0);
        assert_eq!(color.alpha, 1.0);
    }

    #[test]
    fn lighten_clamps_the_amount() {
        let color = Color::from_rgb_u8(10, 20, 30).lighten(5.0);

        assert_eq!(color.red, 1.0);
        assert_eq!(color.green, 1.0);
        assert_eq!(color.blue, 1.0);
    }
}
