use std::time::Duration;

use voxel_siege_core::{Command, Event};
use voxel_siege_system_rounds::{Config, Rounds};

const PLAYFIELD: (f32, f32) = (800.0, 600.0);

fn time_advanced(millis: u64) -> Vec<Event> {
    vec![Event::TimeAdvanced {
        dt: Duration::from_millis(millis),
    }]
}

#[test]
fn first_round_waits_for_the_full_intermission() {
    let mut rounds = Rounds::new(Config::new(Duration::from_millis(3000), 3, 0x5eed));
    let mut out = Vec::new();

    rounds.handle(&time_advanced(2999), 0, PLAYFIELD, &mut out);
    assert!(out.is_empty(), "no spawn before the intermission elapses");
    assert!(!rounds.snapshot().active);

    rounds.handle(&time_advanced(1), 0, PLAYFIELD, &mut out);
    assert_eq!(out.len(), 3, "round one spawns three zombies");
    assert!(rounds.snapshot().active);
    assert_eq!(rounds.snapshot().round, 1);

    for command in &out {
        match command {
            Command::SpawnZombie { position } => {
                let on_vertical = position.x() == 0.0 || position.x() == PLAYFIELD.0;
                let on_horizontal = position.y() == 0.0 || position.y() == PLAYFIELD.1;
                assert!(
                    on_vertical || on_horizontal,
                    "spawn must sit on an edge: {position:?}"
                );
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}

#[test]
fn cleared_round_scales_the_next_wave_linearly() {
    let mut rounds = Rounds::new(Config::new(Duration::from_millis(3000), 3, 0x5eed));
    let mut out = Vec::new();

    rounds.handle(&time_advanced(3000), 0, PLAYFIELD, &mut out);
    assert_eq!(out.len(), 3);
    out.clear();

    // Pool drains to zero while active: the round is over.
    rounds.handle(&time_advanced(16), 0, PLAYFIELD, &mut out);
    assert!(out.is_empty(), "clearing a round spawns nothing immediately");
    let snapshot = rounds.snapshot();
    assert!(!snapshot.active);
    assert_eq!(snapshot.round, 2);
    assert_eq!(snapshot.zombies_to_spawn, 6);

    // The next wave only arrives after another full intermission.
    rounds.handle(&time_advanced(2900), 0, PLAYFIELD, &mut out);
    assert!(out.is_empty());
    rounds.handle(&time_advanced(100), 0, PLAYFIELD, &mut out);
    assert_eq!(out.len(), 6);
    assert!(rounds.snapshot().active);
}

#[test]
fn surviving_zombies_keep_the_round_active() {
    let mut rounds = Rounds::new(Config::new(Duration::from_millis(3000), 3, 0x5eed));
    let mut out = Vec::new();

    rounds.handle(&time_advanced(3000), 0, PLAYFIELD, &mut out);
    out.clear();

    for _ in 0..100 {
        rounds.handle(&time_advanced(100), 2, PLAYFIELD, &mut out);
    }

    assert!(out.is_empty(), "no spawns while zombies remain");
    assert!(rounds.snapshot().active);
    assert_eq!(rounds.snapshot().round, 1);
}

#[test]
fn spawn_sequence_is_deterministic_for_a_seed() {
    let spawn_positions = |seed: u64| {
        let mut rounds = Rounds::new(Config::new(Duration::from_millis(3000), 3, seed));
        let mut out = Vec::new();
        rounds.handle(&time_advanced(3000), 0, PLAYFIELD, &mut out);
        out.iter()
            .map(|command| match command {
                Command::SpawnZombie { position } => (position.x(), position.y()),
                other => panic!("unexpected command: {other:?}"),
            })
            .collect::<Vec<_>>()
    };

    assert_eq!(spawn_positions(0xabcd), spawn_positions(0xabcd));
    assert_ne!(spawn_positions(0xabcd), spawn_positions(0xabce));
}
