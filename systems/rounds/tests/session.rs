//! Headless full-session loop exercising world, pursuit and rounds together.

use std::time::Duration;

use voxel_siege_core::{Command, Event, GridCell};
use voxel_siege_system_pursuit::Pursuit;
use voxel_siege_system_rounds::{Config, Rounds};
use voxel_siege_world::{self as world, query, World};

const FRAME: Duration = Duration::from_millis(16);

struct Session {
    world: World,
    pursuit: Pursuit,
    rounds: Rounds,
}

impl Session {
    fn new() -> Self {
        Self {
            world: World::new(),
            pursuit: Pursuit,
            rounds: Rounds::new(Config::new(Duration::from_millis(3000), 3, 0xdead_beef)),
        }
    }

    /// One simulation frame: tick, pursue, then let the round machine react.
    fn frame(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        world::apply(&mut self.world, Command::Tick { dt: FRAME }, &mut events);

        let mut step_commands = Vec::new();
        self.pursuit.handle(
            &events,
            &query::zombie_view(&self.world),
            query::player(&self.world),
            &mut step_commands,
        );
        for command in step_commands {
            world::apply(&mut self.world, command, &mut events);
        }

        let playfield = query::playfield(&self.world);
        let dimensions = (playfield.width(), playfield.height());
        let mut spawn_commands = Vec::new();
        self.rounds.handle(
            &events,
            query::zombie_view(&self.world).len(),
            dimensions,
            &mut spawn_commands,
        );
        for command in spawn_commands {
            world::apply(&mut self.world, command, &mut events);
        }

        events
    }

    /// Places a block in the cell every zombie is about to enter so the next
    /// frame crushes the entire wave.
    fn wall_off_every_zombie(&mut self) {
        let player = query::player_position(&self.world);
        let zombies = query::zombie_view(&self.world).into_vec();
        for zombie in zombies {
            let dx = player.x() - zombie.position.x();
            let dy = player.y() - zombie.position.y();
            let distance = (dx * dx + dy * dy).sqrt();
            let next = zombie
                .position
                .offset((dx / distance) * zombie.speed, (dy / distance) * zombie.speed);
            let mut events = Vec::new();
            world::apply(
                &mut self.world,
                Command::PlaceBlock {
                    cell: GridCell::containing(next),
                },
                &mut events,
            );
        }
    }
}

#[test]
fn first_round_activates_after_the_intermission() {
    let mut session = Session::new();

    let mut elapsed = Duration::ZERO;
    while elapsed < Duration::from_millis(3000) {
        let events = session.frame();
        elapsed += FRAME;
        if elapsed < Duration::from_millis(3000) {
            assert!(
                !events
                    .iter()
                    .any(|event| matches!(event, Event::ZombieSpawned { .. })),
                "no zombie may appear before the intermission elapses"
            );
        }
    }

    let snapshot = session.rounds.snapshot();
    assert!(snapshot.active);
    assert_eq!(snapshot.round, 1);
    assert_eq!(query::zombie_view(&session.world).len(), 3);

    let playfield = query::playfield(&session.world);
    for zombie in query::zombie_view(&session.world).iter() {
        let position = zombie.position;
        let on_edge = position.x() == 0.0
            || position.x() == playfield.width()
            || position.y() == 0.0
            || position.y() == playfield.height();
        assert!(on_edge, "zombie spawned off the boundary: {position:?}");
    }
}

#[test]
fn clearing_a_wave_scales_the_next_round() {
    let mut session = Session::new();

    while !session.rounds.snapshot().active {
        let _ = session.frame();
    }
    assert_eq!(query::zombie_view(&session.world).len(), 3);

    // Crushing may destroy the wall cell, letting a trailing zombie slip
    // through, so keep rebuilding the wall until the pool drains.
    let mut crushed = 0;
    for _ in 0..32 {
        session.wall_off_every_zombie();
        let events = session.frame();
        crushed += events
            .iter()
            .filter(|event| matches!(event, Event::ZombieCrushed { .. }))
            .count();
        if query::zombie_view(&session.world).is_empty() {
            break;
        }
    }
    assert_eq!(crushed, 3, "the whole wave walks into the wall");
    assert!(query::zombie_view(&session.world).is_empty());

    let snapshot = session.rounds.snapshot();
    assert!(!snapshot.active, "empty pool ends the active round");
    assert_eq!(snapshot.round, 2);
    assert_eq!(snapshot.zombies_to_spawn, 6);

    let clock_at_clear = query::clock(&session.world);
    while !session.rounds.snapshot().active {
        let _ = session.frame();
    }
    let waited = query::clock(&session.world) - clock_at_clear;
    assert!(
        waited >= Duration::from_millis(3000),
        "round two started after only {waited:?}"
    );
    assert_eq!(query::zombie_view(&session.world).len(), 6);
}

#[test]
fn unhindered_zombies_eventually_end_the_session() {
    let mut session = Session::new();

    let mut killed = false;
    for _ in 0..2000 {
        let events = session.frame();
        if events
            .iter()
            .any(|event| matches!(event, Event::PlayerKilled { .. }))
        {
            killed = true;
            break;
        }
    }

    assert!(killed, "an untouched wave must reach the player");
    assert!(!query::is_alive(&session.world));

    // The session is frozen: further frames only advance the clock.
    let events = session.frame();
    assert!(events
        .iter()
        .all(|event| matches!(event, Event::TimeAdvanced { .. })));
}
