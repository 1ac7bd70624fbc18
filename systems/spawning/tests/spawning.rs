use garden_snake_core::{Command, EndReason, Event, GridSize};
use garden_snake_system_spawning::{AppleSpawner, Config};
use garden_snake_world::{self as world, query, Level, SessionStatus};

fn pump(level: &mut Level, spawner: &mut AppleSpawner, events: Vec<Event>) -> Vec<Event> {
    let mut commands = Vec::new();
    spawner.handle(
        &events,
        &query::occupied_cells(level),
        query::grid_size(level),
        &mut commands,
    );

    let mut produced = Vec::new();
    for command in commands {
        world::apply(level, command, &mut produced);
    }
    produced
}

#[test]
fn initial_spawn_lands_on_a_free_cell() {
    let mut level = Level::new();
    let mut events = Vec::new();
    world::apply(
        &mut level,
        Command::ConfigureGrid {
            size: GridSize::new(15),
        },
        &mut events,
    );
    let mut spawner = AppleSpawner::new(Config::new(0xdead_beef));

    let produced = pump(&mut level, &mut spawner, events);

    let apple = query::apple(&level).expect("expected an apple after the pump");
    assert!(!query::occupied_cells(&level).contains(&apple));
    assert!(produced
        .iter()
        .any(|event| matches!(event, Event::ApplePlaced { .. })));
}

#[test]
fn spawning_on_a_single_cell_grid_ends_the_session() {
    let mut level = Level::new();
    let mut events = Vec::new();
    world::apply(
        &mut level,
        Command::ConfigureGrid {
            size: GridSize::new(1),
        },
        &mut events,
    );
    let mut spawner = AppleSpawner::new(Config::new(1));

    // The snake's head occupies the only cell, so no apple can be placed.
    let produced = pump(&mut level, &mut spawner, events);

    assert_eq!(
        query::session(&level),
        SessionStatus::Ended {
            score: 0,
            reason: EndReason::BoardFull
        }
    );
    assert!(produced.contains(&Event::SessionEnded {
        score: 0,
        reason: EndReason::BoardFull,
    }));
}

#[test]
fn identical_seeds_reproduce_identical_sessions() {
    let mut first_level = Level::new();
    let mut second_level = Level::new();
    let mut first_events = Vec::new();
    let mut second_events = Vec::new();
    world::apply(
        &mut first_level,
        Command::ConfigureGrid {
            size: GridSize::new(15),
        },
        &mut first_events,
    );
    world::apply(
        &mut second_level,
        Command::ConfigureGrid {
            size: GridSize::new(15),
        },
        &mut second_events,
    );

    let mut first_spawner = AppleSpawner::new(Config::new(0x5eed));
    let mut second_spawner = AppleSpawner::new(Config::new(0x5eed));
    let first_produced = pump(&mut first_level, &mut first_spawner, first_events);
    let second_produced = pump(&mut second_level, &mut second_spawner, second_events);

    assert_eq!(first_produced, second_produced);
    assert_eq!(query::apple(&first_level), query::apple(&second_level));
}
