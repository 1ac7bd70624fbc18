#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Input mapping system that turns key signals into steering commands.
//!
//! The mapper translates the four discrete directional key signals into the
//! four cardinal headings and applies the no-180°-turn rule against the
//! heading applied by the most recent movement step. Rejected signals are
//! discarded silently; accepted signals become [`Command::SetHeading`]
//! proposals. Nothing is queued: when several signals arrive in one frame,
//! each accepted one overwrites the previous, so only the most recent valid
//! signal before the next step takes effect.

use garden_snake_core::{Command, DirectionKey, Heading};
use garden_snake_world::query::SnakeView;

/// Pure system that maps directional key signals to heading commands.
#[derive(Debug, Default)]
pub struct InputMapper;

impl InputMapper {
    /// Consumes the frame's key signals and emits steering commands.
    ///
    /// Signals are processed in arrival order. A candidate that is the exact
    /// reversal of the snake's last applied heading is dropped; every other
    /// candidate is forwarded, letting the level keep the latest one.
    pub fn handle(&self, pressed: &[DirectionKey], snake: &SnakeView, out: &mut Vec<Command>) {
        for key in pressed {
            let candidate = heading_for(*key);
            if candidate.is_reversal_of(snake.last_step_heading) {
                continue;
            }
            out.push(Command::SetHeading { heading: candidate });
        }
    }
}

fn heading_for(key: DirectionKey) -> Heading {
    match key {
        DirectionKey::Up => Heading::North,
        DirectionKey::Down => Heading::South,
        DirectionKey::Left => Heading::West,
        DirectionKey::Right => Heading::East,
    }
}
