use std::time::Duration;

use voxel_siege_core::{Command, Event, GridCell, Position, CELL_SIZE};
use voxel_siege_system_pursuit::Pursuit;
use voxel_siege_world::{self as world, query, World};

fn tick(world: &mut World, dt: Duration) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::Tick { dt }, &mut events);
    events
}

fn run_pursuit_frame(world: &mut World, pursuit: &Pursuit) -> Vec<Event> {
    let tick_events = tick(world, Duration::from_millis(16));

    let mut commands = Vec::new();
    pursuit.handle(
        &tick_events,
        &query::zombie_view(world),
        query::player(world),
        &mut commands,
    );

    let mut events = Vec::new();
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

#[test]
fn zombies_close_in_on_the_player_each_frame() {
    let mut world = World::new();
    let pursuit = Pursuit;
    let start = Position::new(0.0, 300.0);
    let mut events = Vec::new();
    world::apply(&mut world, Command::SpawnZombie { position: start }, &mut events);

    let player = query::player_position(&world);
    let mut previous = start.distance_to(player);
    for _ in 0..10 {
        let frame_events = run_pursuit_frame(&mut world, &pursuit);
        assert!(frame_events
            .iter()
            .all(|event| matches!(event, Event::ZombieAdvanced { .. })));

        let position = query::zombie_view(&world).into_vec()[0].position;
        let distance = position.distance_to(player);
        assert!(
            distance < previous,
            "distance must shrink: {distance} >= {previous}"
        );
        assert!((previous - distance - 1.5).abs() < 1e-4, "step length is the speed");
        previous = distance;
    }
}

#[test]
fn zombie_walking_into_a_block_is_crushed() {
    let mut world = World::new();
    let pursuit = Pursuit;

    // Wall cell directly between the zombie and the player, with the zombie
    // close enough to cross into it on the first step.
    let player = query::player_position(&world);
    let cell = GridCell::containing(Position::new(player.x() - CELL_SIZE * 2.5, player.y()));
    let zombie_start = Position::new(CELL_SIZE * (cell.x() as f32) - 0.5, player.y());

    let mut events = Vec::new();
    world::apply(&mut world, Command::PlaceBlock { cell }, &mut events);
    world::apply(
        &mut world,
        Command::SpawnZombie {
            position: zombie_start,
        },
        &mut events,
    );

    let frame_events = run_pursuit_frame(&mut world, &pursuit);

    match frame_events.as_slice() {
        [Event::ZombieCrushed { cell: crushed, .. }] => assert_eq!(*crushed, cell),
        other => panic!("unexpected events: {other:?}"),
    }
    assert!(query::zombie_view(&world).is_empty());
    assert!(query::is_alive(&world));
}

#[test]
fn zombie_reaching_the_player_stops_the_session() {
    let mut world = World::new();
    let pursuit = Pursuit;
    let player = query::player_position(&world);

    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::SpawnZombie {
            position: player.offset(21.0, 0.0),
        },
        &mut events,
    );

    let frame_events = run_pursuit_frame(&mut world, &pursuit);

    assert!(frame_events
        .iter()
        .any(|event| matches!(event, Event::PlayerKilled { .. })));
    assert!(!query::is_alive(&world));
}
