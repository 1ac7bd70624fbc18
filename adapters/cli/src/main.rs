#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Garden Snake experience.
//!
//! The binary wires the authoritative level, the pure systems and the
//! macroquad backend together: every frame it maps key signals to steering
//! commands, ticks the level, lets the spawner answer placement requests,
//! repopulates the scene from queries, and finally hands the one-shot
//! session report to the terminal leaderboard glue once the window closes.

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    sync::mpsc,
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use garden_snake_core::{Command, EndReason, Event, GridSize};
use garden_snake_leaderboard::{EntryRange, InMemoryLeaderboard, Leaderboard};
use garden_snake_rendering::{
    ApplePresentation, BoardPresentation, Color, FrameControl, Presentation, RenderingBackend,
    Scene, SnakePresentation,
};
use garden_snake_rendering_macroquad::{DisplayConfig, MacroquadBackend};
use garden_snake_system_input::InputMapper;
use garden_snake_system_session::{SessionReport, SessionTracker};
use garden_snake_system_spawning::{AppleSpawner, Config as SpawnerConfig};
use garden_snake_world::{self as world, query, Level};

const BOARD_GREEN: Color = Color::from_rgb_u8(0x00, 0x80, 0x00);
const SNAKE_HEAD_BLUE: Color = Color::from_rgb_u8(0x00, 0x00, 0x8b);
const SNAKE_TAIL_BLUE: Color = Color::from_rgb_u8(0x00, 0x00, 0xff);
const APPLE_RED: Color = Color::from_rgb_u8(0xff, 0x00, 0x00);
const CLEAR_COLOR: Color = Color::from_rgb_u8(0x10, 0x10, 0x10);
const LEADERBOARD_PAGE: usize = 10;

/// Command-line arguments accepted by the Garden Snake binary.
#[derive(Debug, Parser)]
#[command(name = "garden-snake", about = "Discrete-grid snake on a wrapping board")]
struct Args {
    /// Number of cells along each edge of the square grid.
    #[arg(long, default_value_t = 15)]
    grid_size: u32,

    /// Snake speed in steps per second.
    #[arg(long, default_value_t = 3)]
    speed: u32,

    /// Seed for the apple spawner; drawn from entropy when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Path to an optional TOML display configuration.
    #[arg(long)]
    display_config: Option<PathBuf>,

    /// Print a per-second frame-rate report to stdout.
    #[arg(long)]
    show_fps: bool,
}

/// Entry point for the Garden Snake command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    if args.grid_size == 0 {
        bail!("grid size must be at least one cell");
    }
    if args.speed == 0 {
        bail!("speed must be at least one step per second");
    }

    let mut level = Level::new();
    let mut startup_events = Vec::new();
    world::apply(
        &mut level,
        Command::ConfigureGrid {
            size: GridSize::new(args.grid_size),
        },
        &mut startup_events,
    );
    world::apply(
        &mut level,
        Command::ConfigureStepRate {
            steps_per_second: args.speed,
        },
        &mut startup_events,
    );

    println!("{}", query::welcome_banner(&level));

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut spawner = AppleSpawner::new(SpawnerConfig::new(seed));
    let mapper = InputMapper;
    let mut tracker = SessionTracker::new();

    pump_spawner(&mut level, &mut spawner, &mut startup_events);

    let backend = build_backend(&args)?;
    let scene = build_scene(&level)?;
    let presentation = Presentation::new("Garden Snake", CLEAR_COLOR, scene);

    let (report_sender, report_receiver) = mpsc::channel::<SessionReport>();

    backend.run(presentation, move |dt, frame_input, scene| {
        let mut events = Vec::new();

        let snake = query::snake_view(&level);
        let mut commands = Vec::new();
        mapper.handle(&frame_input.pressed, &snake, &mut commands);
        for command in commands {
            world::apply(&mut level, command, &mut events);
        }

        world::apply(&mut level, Command::Tick { dt }, &mut events);
        pump_spawner(&mut level, &mut spawner, &mut events);

        if let Some(report) = tracker.handle(&events) {
            let _ = report_sender.send(report);
        }

        refresh_scene(scene, &level);

        if tracker.is_ended() {
            FrameControl::Exit
        } else {
            FrameControl::Continue
        }
    })?;

    if let Ok(report) = report_receiver.try_recv() {
        record_score(report)?;
    }

    Ok(())
}

fn build_backend(args: &Args) -> Result<MacroquadBackend> {
    let config = match &args.display_config {
        Some(path) => DisplayConfig::load(path)?,
        None => DisplayConfig::default(),
    };
    let show_fps = args.show_fps || config.show_fps;
    Ok(MacroquadBackend::from_display_config(&config).with_show_fps(show_fps))
}

fn build_scene(level: &Level) -> Result<Scene> {
    let snake = query::snake_view(level);
    let mut scene = Scene::new(
        query::grid_size(level),
        BoardPresentation::from_base(BOARD_GREEN),
        SnakePresentation {
            head: snake.head,
            tail: snake.tail,
            head_color: SNAKE_HEAD_BLUE,
            tail_color: SNAKE_TAIL_BLUE,
        },
        query::apple(level).map(|position| ApplePresentation {
            position,
            color: APPLE_RED,
        }),
    )
    .context("failed to build the initial scene")?;
    scene.score = snake.score;
    Ok(scene)
}

/// Lets the spawner answer every placement request in the frame's batch.
///
/// Each event is handed to the spawner exactly once; a proposal that bounces
/// off an occupied cell re-queues itself in the same batch and is retried
/// before the frame ends.
fn pump_spawner(level: &mut Level, spawner: &mut AppleSpawner, events: &mut Vec<Event>) {
    let mut cursor = 0;
    while cursor < events.len() {
        let batch = events[cursor..].to_vec();
        cursor = events.len();

        let mut commands = Vec::new();
        spawner.handle(
            &batch,
            &query::occupied_cells(level),
            query::grid_size(level),
            &mut commands,
        );
        for command in commands {
            world::apply(level, command, events);
        }
    }
}

fn refresh_scene(scene: &mut Scene, level: &Level) {
    let snake = query::snake_view(level);
    scene.snake.head = snake.head;
    scene.snake.tail = snake.tail;
    scene.score = snake.score;
    scene.apple = query::apple(level).map(|position| ApplePresentation {
        position,
        color: APPLE_RED,
    });
    scene.ended = !query::session(level).is_running();
}

/// Collects a display name and forwards the final score to the leaderboard.
fn record_score(report: SessionReport) -> Result<()> {
    match report.reason {
        EndReason::SelfCollision => println!("Game ended. Final score: {}", report.score),
        EndReason::BoardFull => println!("Board filled! Final score: {}", report.score),
    }

    print!("Enter a name for the leaderboard (blank to skip): ");
    io::stdout().flush().context("failed to flush stdout")?;
    let mut name = String::new();
    let _ = io::stdin()
        .lock()
        .read_line(&mut name)
        .context("failed to read the display name")?;
    let name = name.trim();
    if name.is_empty() {
        println!("Score not submitted.");
        return Ok(());
    }

    let mut leaderboard = InMemoryLeaderboard::new();
    let _ = leaderboard.create(name, report.score);

    println!("Leaderboard:");
    for (index, entry) in leaderboard
        .list(EntryRange::new(0, LEADERBOARD_PAGE))
        .iter()
        .enumerate()
    {
        println!("{:>3}. {:<20} {:>6}", index + 1, entry.name, entry.score);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Args;
    use clap::{CommandFactory, Parser};

    #[test]
    fn argument_definitions_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults_match_the_classic_session() {
        let args = Args::parse_from(["garden-snake"]);

        assert_eq!(args.grid_size, 15);
        assert_eq!(args.speed, 3);
        assert_eq!(args.seed, None);
        assert!(!args.show_fps);
    }

    #[test]
    fn seed_and_grid_overrides_parse() {
        let args = Args::parse_from([
            "garden-snake",
            "--grid-size",
            "9",
            "--speed",
            "5",
            "--seed",
            "1234",
        ]);

        assert_eq!(args.grid_size, 9);
        assert_eq!(args.speed, 5);
        assert_eq!(args.seed, Some(1234));
    }
}
