#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic pursuit system that steers zombies toward the player.
//!
//! The system owns no entity state. Each tick it reads the immutable zombie
//! and player views and emits one [`Command::StepZombie`] per zombie, with
//! the step vector normalized to the zombie's speed. The world re-validates
//! and resolves collisions when it applies the commands.

use voxel_siege_core::{Command, Event, PlayerSnapshot, ZombieView};

/// Distance below which a pursuit direction is considered undefined.
///
/// A zombie exactly on top of the player would otherwise divide by zero
/// when normalizing its chase vector; such zombies skip movement entirely.
pub const DISTANCE_EPSILON: f32 = 1e-6;

/// Pure system that reacts to world events and emits chase commands.
#[derive(Debug, Default)]
pub struct Pursuit;

impl Pursuit {
    /// Consumes events and immutable views to emit one step per zombie.
    ///
    /// Steps are only produced for ticks in which simulated time advanced,
    /// and never once the player is dead.
    pub fn handle(
        &self,
        events: &[Event],
        zombies: &ZombieView,
        player: PlayerSnapshot,
        out: &mut Vec<Command>,
    ) {
        if !player.alive {
            return;
        }

        if !events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }))
        {
            return;
        }

        for zombie in zombies.iter() {
            let dx = player.position.x() - zombie.position.x();
            let dy = player.position.y() - zombie.position.y();
            let distance = (dx * dx + dy * dy).sqrt();
            if distance < DISTANCE_EPSILON {
                continue;
            }

            out.push(Command::StepZombie {
                zombie_id: zombie.id,
                dx: (dx / distance) * zombie.speed,
                dy: (dy / distance) * zombie.speed,
            });
        }
    }
}
