#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Garden Snake engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative level, and pure systems. Adapters and systems submit
//! [`Command`] values describing desired mutations, the level executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! for systems to react to deterministically. Systems consume event streams,
//! query immutable snapshots, and respond exclusively with new command
//! batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Garden Snake.";

/// Commands that express all permissible level mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Rebuilds the level around a square grid with the provided edge length.
    ConfigureGrid {
        /// Number of cells along each edge of the square grid.
        size: GridSize,
    },
    /// Retunes the cadence of the fixed-step movement gate.
    ConfigureStepRate {
        /// Number of snake steps per second of simulated time. Zero is
        /// discarded, keeping the current cadence.
        steps_per_second: u32,
    },
    /// Advances the simulation clock by the provided delta time.
    ///
    /// At most one snake step is taken per tick even when `dt` spans several
    /// step intervals; the surplus stays in the accumulator. Under severe
    /// frame drops the snake therefore appears to slow down rather than
    /// catching up.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Proposes a steering heading for the snake's next step.
    ///
    /// A candidate that reverses the heading applied by the most recent step
    /// is discarded, as is [`Heading::Idle`]. The latest accepted candidate
    /// overwrites earlier ones; nothing is queued.
    SetHeading {
        /// Candidate heading for the next movement step.
        heading: Heading,
    },
    /// Proposes an apple placement chosen by the spawning system.
    PlaceApple {
        /// Cell the apple should occupy. Must be free at the apply instant.
        position: GridPosition,
    },
    /// Reports that the spawning system found no free cell for an apple.
    DeclareBoardFull,
}

/// Events broadcast by the level after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the level was rebuilt around a new grid.
    GridConfigured {
        /// Edge length of the freshly configured grid.
        size: GridSize,
    },
    /// Confirms that the fixed-step cadence changed.
    StepRateChanged {
        /// Number of snake steps per second now in effect.
        steps_per_second: u32,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that a steering candidate became the pending heading.
    HeadingChanged {
        /// Heading that will drive the next movement step.
        heading: Heading,
    },
    /// Confirms that the snake's head moved between two cells.
    SnakeAdvanced {
        /// Cell the head occupied before the step.
        from: GridPosition,
        /// Cell the head occupies after the step, wrapped at the grid edges.
        to: GridPosition,
    },
    /// Confirms that the snake's head landed on the apple.
    AppleEaten {
        /// Cell the apple occupied when it was eaten.
        position: GridPosition,
        /// Score after the apple was consumed.
        score: u32,
    },
    /// Requests a fresh apple placement from the spawning system.
    AppleSpawnNeeded,
    /// Confirms that an apple placement proposal was accepted.
    ApplePlaced {
        /// Cell the apple now occupies.
        position: GridPosition,
    },
    /// Announces that the session reached its terminal state.
    SessionEnded {
        /// Final score at the instant the session ended.
        score: u32,
        /// Outcome that terminated the session.
        reason: EndReason,
    },
}

/// Outcomes that terminate a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndReason {
    /// The snake's head landed on its own tail.
    SelfCollision,
    /// No free cell remained for an apple placement.
    BoardFull,
}

/// Edge length of the square play grid measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridSize(u32);

impl GridSize {
    /// Creates a new grid size wrapper.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the underlying edge length.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Total number of cells contained in the square grid.
    #[must_use]
    pub const fn cell_count(&self) -> u64 {
        self.0 as u64 * self.0 as u64
    }

    /// Cell at the center of the grid, rounding towards the origin.
    #[must_use]
    pub const fn center(&self) -> GridPosition {
        GridPosition::new(self.0 / 2, self.0 / 2)
    }

    /// Reports whether the provided cell lies inside the grid bounds.
    #[must_use]
    pub const fn contains(&self, position: GridPosition) -> bool {
        position.column() < self.0 && position.row() < self.0
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPosition {
    column: u32,
    row: u32,
}

impl GridPosition {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Applies a signed step to the position, wrapping at the grid edges.
    ///
    /// The grid is a torus: moving past an edge on either axis re-enters at
    /// the opposite edge, so the result is always reduced modulo the grid
    /// size. A zero-sized grid collapses every position onto the origin.
    #[must_use]
    pub fn offset_wrapped(self, step: GridVector, size: GridSize) -> Self {
        Self {
            column: wrap_axis(self.column, step.dx(), size.get()),
            row: wrap_axis(self.row, step.dy(), size.get()),
        }
    }
}

fn wrap_axis(value: u32, delta: i32, modulus: u32) -> u32 {
    if modulus == 0 {
        return 0;
    }

    let shifted = i64::from(value) + i64::from(delta);
    shifted.rem_euclid(i64::from(modulus)) as u32
}

/// Value-semantic signed step between two grid cells.
///
/// Copied, never aliased: every arithmetic helper returns a fresh vector so
/// head, heading and tail entries can never share mutable state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridVector {
    dx: i32,
    dy: i32,
}

impl GridVector {
    /// The zero step.
    pub const ZERO: Self = Self::new(0, 0);

    /// Creates a new step from signed per-axis deltas.
    #[must_use]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Signed column delta of the step.
    #[must_use]
    pub const fn dx(&self) -> i32 {
        self.dx
    }

    /// Signed row delta of the step.
    #[must_use]
    pub const fn dy(&self) -> i32 {
        self.dy
    }

    /// Returns the step with both axes negated.
    #[must_use]
    pub const fn negated(&self) -> Self {
        Self {
            dx: -self.dx,
            dy: -self.dy,
        }
    }
}

/// Steering state of the snake.
///
/// [`Heading::Idle`] is the valid "not yet moving" initial state; the four
/// cardinal headings each map to a unit step on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    /// The snake has not started moving.
    Idle,
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Heading {
    /// Unit step vector associated with the heading.
    #[must_use]
    pub const fn vector(&self) -> GridVector {
        match self {
            Self::Idle => GridVector::ZERO,
            Self::North => GridVector::new(0, -1),
            Self::East => GridVector::new(1, 0),
            Self::South => GridVector::new(0, 1),
            Self::West => GridVector::new(-1, 0),
        }
    }

    /// Reports whether the heading is the exact reversal of `previous`.
    ///
    /// Only non-idle pairs can reverse each other: an idle snake accepts any
    /// first heading, and an idle candidate never counts as a reversal.
    #[must_use]
    pub fn is_reversal_of(self, previous: Heading) -> bool {
        self != Self::Idle && previous != Self::Idle && self.vector() == previous.vector().negated()
    }
}

/// Discrete directional key signal delivered by input adapters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DirectionKey {
    /// The upward directional key.
    Up,
    /// The downward directional key.
    Down,
    /// The leftward directional key.
    Left,
    /// The rightward directional key.
    Right,
}
