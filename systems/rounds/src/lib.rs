#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Round state machine that paces zombie waves.
//!
//! The machine alternates between `Idle` (intermission) and `Active` (a wave
//! is in play). A round ends exactly when the zombie pool empties while
//! active; the next one starts once the intermission has elapsed, spawning
//! `round * spawns_per_round` zombies at uniformly random playfield edges.

use std::time::Duration;

use voxel_siege_core::{Command, Event, Position};

const RNG_MULTIPLIER: u64 = 6_364_136_223_846_793_005;
const RNG_INCREMENT: u64 = 1;

/// Configuration parameters required to construct the round machine.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    intermission: Duration,
    spawns_per_round: u32,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration from an intermission, scale factor and seed.
    #[must_use]
    pub const fn new(intermission: Duration, spawns_per_round: u32, rng_seed: u64) -> Self {
        Self {
            intermission,
            spawns_per_round,
            rng_seed,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Duration::from_millis(3000), 3, 0x853c_49e6_748f_ea9b)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle { since: Duration },
    Active,
}

/// Read-only summary of the round machine for HUDs and announcements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundSnapshot {
    /// One-based index of the current round.
    pub round: u32,
    /// Number of zombies the next activation will spawn.
    pub zombies_to_spawn: u32,
    /// Whether a wave is currently in play.
    pub active: bool,
}

/// Pure system that tracks round progression and emits spawn commands.
#[derive(Debug)]
pub struct Rounds {
    round: u32,
    zombies_to_spawn: u32,
    phase: Phase,
    clock: Duration,
    intermission: Duration,
    spawns_per_round: u32,
    rng_state: u64,
}

impl Rounds {
    /// Creates a new round machine using the supplied configuration.
    ///
    /// The machine starts idle with the intermission measured from session
    /// start, so the first round begins after one full delay.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            round: 1,
            zombies_to_spawn: config.spawns_per_round,
            phase: Phase::Idle {
                since: Duration::ZERO,
            },
            clock: Duration::ZERO,
            intermission: config.intermission,
            spawns_per_round: config.spawns_per_round,
            rng_state: config.rng_seed,
        }
    }

    /// Consumes events and the current pool size to drive round transitions.
    ///
    /// `playfield` supplies the edge-spawn bounds. Spawn commands for a full
    /// wave are pushed into `out` the moment the machine activates.
    pub fn handle(
        &mut self,
        events: &[Event],
        zombie_count: usize,
        playfield: (f32, f32),
        out: &mut Vec<Command>,
    ) {
        let mut accumulated = Duration::ZERO;
        for event in events {
            if let Event::TimeAdvanced { dt } = event {
                accumulated = accumulated.saturating_add(*dt);
            }
        }
        self.clock = self.clock.saturating_add(accumulated);

        if self.phase == Phase::Active && zombie_count == 0 {
            self.phase = Phase::Idle { since: self.clock };
            self.round += 1;
            self.zombies_to_spawn = self.round * self.spawns_per_round;
            return;
        }

        if let Phase::Idle { since } = self.phase {
            if self.clock.saturating_sub(since) >= self.intermission {
                for _ in 0..self.zombies_to_spawn {
                    let position = self.edge_spawn_position(playfield.0, playfield.1);
                    out.push(Command::SpawnZombie { position });
                }
                self.phase = Phase::Active;
            }
        }
    }

    /// Captures the machine's externally observable state.
    #[must_use]
    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            round: self.round,
            zombies_to_spawn: self.zombies_to_spawn,
            active: self.phase == Phase::Active,
        }
    }

    fn edge_spawn_position(&mut self, width: f32, height: f32) -> Position {
        // The low bits of the LCG cycle with a short period; draw the edge
        // from the high bits so consecutive spawns can hit any edge.
        let edge = (self.advance_rng() >> 33) % 4;
        match edge {
            0 => Position::new(0.0, self.unit_fraction() * height),
            1 => Position::new(width, self.unit_fraction() * height),
            2 => Position::new(self.unit_fraction() * width, 0.0),
            _ => Position::new(self.unit_fraction() * width, height),
        }
    }

    fn advance_rng(&mut self) -> u64 {
        self.rng_state = self
            .rng_state
            .wrapping_mul(RNG_MULTIPLIER)
            .wrapping_add(RNG_INCREMENT);
        self.rng_state
    }

    // Uniform fraction in [0, 1) built from the top 24 bits of the stream.
    fn unit_fraction(&mut self) -> f32 {
        (self.advance_rng() >> 40) as f32 / (1u64 << 24) as f32
    }
}

impl Default for Rounds {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
