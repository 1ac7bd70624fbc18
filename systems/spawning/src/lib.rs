#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system responsible for proposing apple placements.
//!
//! The spawner reacts to [`Event::AppleSpawnNeeded`] by drawing grid
//! coordinates uniformly at random, one independent draw per axis, and
//! rejecting draws that land inside the exclusion set of occupied cells.
//! Expected attempts grow with `total_cells / free_cells`, so sampling is
//! capped: after [`MAX_SAMPLE_ATTEMPTS`] rejections a deterministic row-major
//! sweep picks the first free cell instead. When no free cell exists at all
//! the spawner emits [`Command::DeclareBoardFull`] and the level ends the
//! session, so a crowded board terminates instead of looping forever.

use garden_snake_core::{Command, Event, GridPosition, GridSize};

const RNG_MULTIPLIER: u64 = 6_364_136_223_846_793_005;
const RNG_INCREMENT: u64 = 1;

/// Upper bound on random placement attempts before falling back to a sweep.
pub const MAX_SAMPLE_ATTEMPTS: u32 = 1024;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided random seed.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }
}

/// Pure system that deterministically proposes apple placements.
#[derive(Debug)]
pub struct AppleSpawner {
    rng_state: u64,
}

impl AppleSpawner {
    /// Creates a new spawner using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng_state: config.rng_seed,
        }
    }

    /// Consumes events and the exclusion set to emit a placement command.
    ///
    /// At most one proposal is emitted per batch: a level holds a single
    /// apple, so several [`Event::AppleSpawnNeeded`] entries in one batch
    /// collapse into one placement.
    pub fn handle(
        &mut self,
        events: &[Event],
        occupied: &[GridPosition],
        size: GridSize,
        out: &mut Vec<Command>,
    ) {
        if !events
            .iter()
            .any(|event| matches!(event, Event::AppleSpawnNeeded))
        {
            return;
        }

        match self.place(occupied, size) {
            Some(position) => out.push(Command::PlaceApple { position }),
            None => out.push(Command::DeclareBoardFull),
        }
    }

    fn place(&mut self, occupied: &[GridPosition], size: GridSize) -> Option<GridPosition> {
        if size.get() == 0 {
            return None;
        }

        for _ in 0..MAX_SAMPLE_ATTEMPTS {
            let candidate = self.draw(size);
            if !occupied.contains(&candidate) {
                return Some(candidate);
            }
        }

        first_free_cell(occupied, size)
    }

    fn draw(&mut self, size: GridSize) -> GridPosition {
        // The low bits of a power-of-two LCG have short periods, so each
        // axis draws from the high half of the state.
        let side = u64::from(size.get());
        let column = ((self.advance_rng() >> 32) % side) as u32;
        let row = ((self.advance_rng() >> 32) % side) as u32;
        GridPosition::new(column, row)
    }

    fn advance_rng(&mut self) -> u64 {
        self.rng_state = self
            .rng_state
            .wrapping_mul(RNG_MULTIPLIER)
            .wrapping_add(RNG_INCREMENT);
        self.rng_state
    }
}

fn first_free_cell(occupied: &[GridPosition], size: GridSize) -> Option<GridPosition> {
    for row in 0..size.get() {
        for column in 0..size.get() {
            let cell = GridPosition::new(column, row);
            if !occupied.contains(&cell) {
                return Some(cell);
            }
        }
    }
    None
}
