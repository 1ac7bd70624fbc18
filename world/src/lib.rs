#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative level state management for Garden Snake.
//!
//! The [`Level`] owns the snake, the apple, the fixed-step accumulator and
//! the session state machine. All mutation flows through [`apply`]; read
//! access goes through the [`query`] module.

use std::{collections::VecDeque, time::Duration};

use garden_snake_core::{
    Command, EndReason, Event, GridPosition, GridSize, Heading, WELCOME_BANNER,
};

const DEFAULT_GRID_SIZE: GridSize = GridSize::new(15);
const DEFAULT_STEP_RATE: u32 = 3;
const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// Lifecycle state of the play session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    /// The simulation accepts ticks and steering.
    Running,
    /// Terminal state reached; only score readout remains.
    Ended {
        /// Final score at the instant the session ended.
        score: u32,
        /// Outcome that terminated the session.
        reason: EndReason,
    },
}

impl SessionStatus {
    /// Reports whether the session is still accepting simulation work.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }
}

/// Represents the authoritative Garden Snake level state.
#[derive(Debug)]
pub struct Level {
    banner: &'static str,
    grid_size: GridSize,
    snake: Snake,
    apple: Option<GridPosition>,
    accumulator: Duration,
    session: SessionStatus,
}

impl Level {
    /// Creates a new level with the default grid, ready for simulation.
    ///
    /// The snake starts at the grid center with an empty tail and an idle
    /// heading; the first [`Event::AppleSpawnNeeded`] is emitted by the
    /// [`Command::ConfigureGrid`] that callers issue before the first tick.
    #[must_use]
    pub fn new() -> Self {
        Self {
            banner: WELCOME_BANNER,
            grid_size: DEFAULT_GRID_SIZE,
            snake: Snake::centered_in(DEFAULT_GRID_SIZE, DEFAULT_STEP_RATE),
            apple: None,
            accumulator: Duration::ZERO,
            session: SessionStatus::Running,
        }
    }

    fn step_interval(&self) -> Duration {
        Duration::from_nanos(NANOS_PER_SECOND / u64::from(self.snake.speed))
    }

    fn is_occupied(&self, cell: GridPosition) -> bool {
        self.snake.head == cell || self.snake.tail.contains(&cell)
    }

    /// Advances the snake by exactly one step.
    ///
    /// The tail snapshot uses the pre-move head position, so the cell the
    /// head vacates becomes the new trailing segment. Collision checks run
    /// against the post-move head.
    fn step(&mut self, out_events: &mut Vec<Event>) {
        if self.snake.growth_pending {
            self.snake.tail.push_back(self.snake.head);
            self.snake.growth_pending = false;
        } else if !self.snake.tail.is_empty() {
            let _ = self.snake.tail.pop_front();
            self.snake.tail.push_back(self.snake.head);
        }

        let from = self.snake.head;
        let to = from.offset_wrapped(self.snake.heading.vector(), self.grid_size);
        self.snake.head = to;
        self.snake.last_step_heading = self.snake.heading;
        if self.snake.heading != Heading::Idle {
            out_events.push(Event::SnakeAdvanced { from, to });
        }

        if self.apple == Some(to) {
            self.apple = None;
            self.snake.score = self.snake.score.saturating_add(1);
            self.snake.growth_pending = true;
            out_events.push(Event::AppleEaten {
                position: to,
                score: self.snake.score,
            });
            out_events.push(Event::AppleSpawnNeeded);
        }

        if self.snake.tail.contains(&to) {
            self.end_session(EndReason::SelfCollision, out_events);
        }
    }

    fn end_session(&mut self, reason: EndReason, out_events: &mut Vec<Event>) {
        self.snake.alive = false;
        self.session = SessionStatus::Ended {
            score: self.snake.score,
            reason,
        };
        out_events.push(Event::SessionEnded {
            score: self.snake.score,
            reason,
        });
    }
}

/// Applies the provided command to the level, mutating state deterministically.
pub fn apply(level: &mut Level, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureGrid { size } => {
            let speed = level.snake.speed;
            level.grid_size = size;
            level.snake = Snake::centered_in(size, speed);
            level.apple = None;
            level.accumulator = Duration::ZERO;
            level.session = SessionStatus::Running;
            out_events.push(Event::GridConfigured { size });
            out_events.push(Event::AppleSpawnNeeded);
        }
        Command::ConfigureStepRate { steps_per_second } => {
            if steps_per_second == 0 {
                return;
            }
            level.snake.speed = steps_per_second;
            out_events.push(Event::StepRateChanged { steps_per_second });
        }
        Command::Tick { dt } => {
            if !level.session.is_running() {
                return;
            }
            out_events.push(Event::TimeAdvanced { dt });
            level.accumulator = level.accumulator.saturating_add(dt);
            let interval = level.step_interval();
            if level.accumulator >= interval {
                level.accumulator -= interval;
                level.step(out_events);
            }
        }
        Command::SetHeading { heading } => {
            if !level.session.is_running() || heading == Heading::Idle {
                return;
            }
            if heading.is_reversal_of(level.snake.last_step_heading) {
                return;
            }
            if level.snake.heading != heading {
                level.snake.heading = heading;
                out_events.push(Event::HeadingChanged { heading });
            }
        }
        Command::PlaceApple { position } => {
            if !level.session.is_running() {
                return;
            }
            if !level.grid_size.contains(position) || level.is_occupied(position) {
                out_events.push(Event::AppleSpawnNeeded);
                return;
            }
            level.apple = Some(position);
            out_events.push(Event::ApplePlaced { position });
        }
        Command::DeclareBoardFull => {
            if level.session.is_running() {
                level.end_session(EndReason::BoardFull, out_events);
            }
        }
    }
}

/// Query functions that provide read-only access to the level state.
pub mod query {
    use std::time::Duration;

    use super::{Level, SessionStatus};
    use garden_snake_core::{GridPosition, GridSize, Heading};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(level: &Level) -> &'static str {
        level.banner
    }

    /// Edge length of the level's square grid.
    #[must_use]
    pub fn grid_size(level: &Level) -> GridSize {
        level.grid_size
    }

    /// Current apple position, if one is placed.
    #[must_use]
    pub fn apple(level: &Level) -> Option<GridPosition> {
        level.apple
    }

    /// Current lifecycle state of the session.
    #[must_use]
    pub fn session(level: &Level) -> SessionStatus {
        level.session
    }

    /// Simulated time accumulated toward the next movement step.
    #[must_use]
    pub fn accumulated(level: &Level) -> Duration {
        level.accumulator
    }

    /// Interval between movement steps at the current cadence.
    #[must_use]
    pub fn step_interval(level: &Level) -> Duration {
        level.step_interval()
    }

    /// Captures a read-only view of the snake.
    #[must_use]
    pub fn snake_view(level: &Level) -> SnakeView {
        SnakeView {
            head: level.snake.head,
            tail: level.snake.tail.iter().copied().collect(),
            heading: level.snake.heading,
            last_step_heading: level.snake.last_step_heading,
            growth_pending: level.snake.growth_pending,
            alive: level.snake.alive,
            score: level.snake.score,
            speed: level.snake.speed,
        }
    }

    /// Enumerates every cell occupied by the snake, head first.
    ///
    /// This is the exclusion set the spawning system samples against.
    #[must_use]
    pub fn occupied_cells(level: &Level) -> Vec<GridPosition> {
        let mut cells = Vec::with_capacity(level.snake.tail.len() + 1);
        cells.push(level.snake.head);
        cells.extend(level.snake.tail.iter().copied());
        cells
    }

    /// Immutable representation of the snake's state used for queries.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct SnakeView {
        /// Cell currently occupied by the head.
        pub head: GridPosition,
        /// Trailing segments ordered oldest-first.
        pub tail: Vec<GridPosition>,
        /// Heading that will drive the next movement step.
        pub heading: Heading,
        /// Heading applied by the most recent movement step.
        pub last_step_heading: Heading,
        /// Indicates that the next step appends to the tail without dropping.
        pub growth_pending: bool,
        /// Whether the snake is still alive.
        pub alive: bool,
        /// Number of apples eaten this session.
        pub score: u32,
        /// Movement cadence in steps per second.
        pub speed: u32,
    }
}

#[derive(Debug)]
struct Snake {
    head: GridPosition,
    tail: VecDeque<GridPosition>,
    heading: Heading,
    last_step_heading: Heading,
    growth_pending: bool,
    alive: bool,
    score: u32,
    speed: u32,
}

impl Snake {
    fn centered_in(size: GridSize, speed: u32) -> Self {
        Self {
            head: size.center(),
            tail: VecDeque::new(),
            heading: Heading::Idle,
            last_step_heading: Heading::Idle,
            growth_pending: false,
            alive: true,
            score: 0,
            speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured(size: u32) -> (Level, Vec<Event>) {
        let mut level = Level::new();
        let mut events = Vec::new();
        apply(
            &mut level,
            Command::ConfigureGrid {
                size: GridSize::new(size),
            },
            &mut events,
        );
        (level, events)
    }

    #[test]
    fn configure_centers_snake_and_requests_apple() {
        let (level, events) = configured(15);

        let snake = query::snake_view(&level);
        assert_eq!(snake.head, GridPosition::new(7, 7));
        assert!(snake.tail.is_empty());
        assert_eq!(snake.heading, Heading::Idle);
        assert_eq!(snake.score, 0);
        assert!(snake.alive);
        assert_eq!(query::apple(&level), None);
        assert_eq!(
            events,
            vec![
                Event::GridConfigured {
                    size: GridSize::new(15)
                },
                Event::AppleSpawnNeeded,
            ]
        );
    }

    #[test]
    fn zero_step_rate_is_discarded() {
        let (mut level, _) = configured(15);
        let mut events = Vec::new();

        apply(
            &mut level,
            Command::ConfigureStepRate {
                steps_per_second: 0,
            },
            &mut events,
        );

        assert!(events.is_empty());
        assert_eq!(query::snake_view(&level).speed, 3);
    }

    #[test]
    fn step_interval_follows_step_rate() {
        let (mut level, _) = configured(15);
        let mut events = Vec::new();

        apply(
            &mut level,
            Command::ConfigureStepRate {
                steps_per_second: 4,
            },
            &mut events,
        );

        assert_eq!(query::step_interval(&level), Duration::from_millis(250));
        assert_eq!(
            events,
            vec![Event::StepRateChanged {
                steps_per_second: 4
            }]
        );
    }

    #[test]
    fn tick_below_threshold_accumulates_without_stepping() {
        let (mut level, _) = configured(15);
        let mut events = Vec::new();
        let before = query::snake_view(&level);

        apply(
            &mut level,
            Command::Tick {
                dt: Duration::from_millis(100),
            },
            &mut events,
        );

        assert_eq!(query::snake_view(&level), before);
        assert_eq!(query::accumulated(&level), Duration::from_millis(100));
        assert_eq!(
            events,
            vec![Event::TimeAdvanced {
                dt: Duration::from_millis(100)
            }]
        );
    }

    #[test]
    fn oversized_tick_takes_a_single_step_and_keeps_the_surplus() {
        let (mut level, _) = configured(15);
        let mut events = Vec::new();
        apply(
            &mut level,
            Command::SetHeading {
                heading: Heading::East,
            },
            &mut events,
        );

        let interval = query::step_interval(&level);
        events.clear();
        apply(&mut level, Command::Tick { dt: interval * 3 }, &mut events);

        let advances = events
            .iter()
            .filter(|event| matches!(event, Event::SnakeAdvanced { .. }))
            .count();
        assert_eq!(advances, 1, "one step per tick regardless of surplus");
        assert_eq!(query::accumulated(&level), interval * 2);
        assert_eq!(query::snake_view(&level).head, GridPosition::new(8, 7));
    }

    #[test]
    fn surplus_time_drives_a_step_on_the_next_tick() {
        let (mut level, _) = configured(15);
        let mut events = Vec::new();
        apply(
            &mut level,
            Command::SetHeading {
                heading: Heading::East,
            },
            &mut events,
        );
        let interval = query::step_interval(&level);
        apply(&mut level, Command::Tick { dt: interval * 2 }, &mut events);

        events.clear();
        apply(
            &mut level,
            Command::Tick { dt: Duration::ZERO },
            &mut events,
        );

        assert!(events
            .iter()
            .any(|event| matches!(event, Event::SnakeAdvanced { .. })));
        assert_eq!(query::snake_view(&level).head, GridPosition::new(9, 7));
    }

    #[test]
    fn idle_heading_commands_are_ignored() {
        let (mut level, _) = configured(15);
        let mut events = Vec::new();

        apply(
            &mut level,
            Command::SetHeading {
                heading: Heading::Idle,
            },
            &mut events,
        );

        assert!(events.is_empty());
        assert_eq!(query::snake_view(&level).heading, Heading::Idle);
    }

    #[test]
    fn heading_can_swap_freely_before_the_first_step() {
        let (mut level, _) = configured(15);
        let mut events = Vec::new();

        apply(
            &mut level,
            Command::SetHeading {
                heading: Heading::East,
            },
            &mut events,
        );
        apply(
            &mut level,
            Command::SetHeading {
                heading: Heading::West,
            },
            &mut events,
        );

        assert_eq!(query::snake_view(&level).heading, Heading::West);
    }

    #[test]
    fn reversal_after_a_step_is_discarded() {
        let (mut level, _) = configured(15);
        let mut events = Vec::new();
        apply(
            &mut level,
            Command::SetHeading {
                heading: Heading::East,
            },
            &mut events,
        );
        let interval = query::step_interval(&level);
        apply(&mut level, Command::Tick { dt: interval }, &mut events);

        events.clear();
        apply(
            &mut level,
            Command::SetHeading {
                heading: Heading::West,
            },
            &mut events,
        );

        assert!(events.is_empty());
        assert_eq!(query::snake_view(&level).heading, Heading::East);
    }

    #[test]
    fn apple_placement_on_occupied_cell_is_rejected() {
        let (mut level, _) = configured(15);
        let mut events = Vec::new();

        apply(
            &mut level,
            Command::PlaceApple {
                position: GridPosition::new(7, 7),
            },
            &mut events,
        );

        assert_eq!(query::apple(&level), None);
        assert_eq!(events, vec![Event::AppleSpawnNeeded]);
    }

    #[test]
    fn apple_placement_outside_the_grid_is_rejected() {
        let (mut level, _) = configured(15);
        let mut events = Vec::new();

        apply(
            &mut level,
            Command::PlaceApple {
                position: GridPosition::new(15, 2),
            },
            &mut events,
        );

        assert_eq!(query::apple(&level), None);
        assert_eq!(events, vec![Event::AppleSpawnNeeded]);
    }

    #[test]
    fn apple_placement_on_a_free_cell_is_accepted() {
        let (mut level, _) = configured(15);
        let mut events = Vec::new();
        let position = GridPosition::new(2, 3);

        apply(&mut level, Command::PlaceApple { position }, &mut events);

        assert_eq!(query::apple(&level), Some(position));
        assert_eq!(events, vec![Event::ApplePlaced { position }]);
    }

    #[test]
    fn board_full_declaration_ends_the_session() {
        let (mut level, _) = configured(15);
        let mut events = Vec::new();

        apply(&mut level, Command::DeclareBoardFull, &mut events);

        assert_eq!(
            query::session(&level),
            SessionStatus::Ended {
                score: 0,
                reason: EndReason::BoardFull
            }
        );
        assert_eq!(
            events,
            vec![Event::SessionEnded {
                score: 0,
                reason: EndReason::BoardFull
            }]
        );

        events.clear();
        apply(&mut level, Command::DeclareBoardFull, &mut events);
        assert!(events.is_empty(), "session ends at most once");
    }
}
