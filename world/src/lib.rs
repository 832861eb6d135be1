#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Voxel Siege.
//!
//! The world owns the player, the block store, and the zombie pool. All
//! mutation flows through [`apply`], which executes a single [`Command`] and
//! appends the resulting [`Event`]s for systems and adapters to observe.

use std::{collections::HashSet, time::Duration};

use voxel_siege_core::{Command, Event, GridCell, MoveIntent, Position, ZombieId, WELCOME_BANNER};

const DEFAULT_PLAYFIELD_WIDTH: f32 = 800.0;
const DEFAULT_PLAYFIELD_HEIGHT: f32 = 600.0;
const DEFAULT_PLAYER_SPEED: f32 = 2.0;
const DEFAULT_PLAYER_RADIUS: f32 = 10.0;
const DEFAULT_ZOMBIE_SPEED: f32 = 1.5;
const DEFAULT_CONTACT_SLACK: f32 = 10.0;
const DEFAULT_BLOCK_BREAK_PERCENT: u64 = 5;

const RUBBLE_SEED: u64 = 0x9e37_79b9_7f4a_7c15;

/// Behavioural constants for a session, surfaced as explicit configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldConfig {
    /// Width of the playfield measured in world units.
    pub playfield_width: f32,
    /// Height of the playfield measured in world units.
    pub playfield_height: f32,
    /// Distance the player covers per simulation step on each active axis.
    pub player_speed: f32,
    /// Radius used for both rendering and collision checks.
    pub player_radius: f32,
    /// Distance a zombie covers per simulation step.
    pub zombie_speed: f32,
    /// Extra reach added to the player radius for the kill check.
    pub contact_slack: f32,
    /// Percent chance that a crushed block is destroyed alongside the zombie.
    pub block_break_percent: u64,
    /// Seed for the deterministic stream backing block-destruction rolls.
    pub rubble_seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            playfield_width: DEFAULT_PLAYFIELD_WIDTH,
            playfield_height: DEFAULT_PLAYFIELD_HEIGHT,
            player_speed: DEFAULT_PLAYER_SPEED,
            player_radius: DEFAULT_PLAYER_RADIUS,
            zombie_speed: DEFAULT_ZOMBIE_SPEED,
            contact_slack: DEFAULT_CONTACT_SLACK,
            block_break_percent: DEFAULT_BLOCK_BREAK_PERCENT,
            rubble_seed: RUBBLE_SEED,
        }
    }
}

/// Describes the rectangular play area in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Playfield {
    width: f32,
    height: f32,
}

impl Playfield {
    const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Total width of the playfield measured in world units.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Total height of the playfield measured in world units.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Position at the center of the playfield.
    #[must_use]
    pub const fn center(&self) -> Position {
        Position::new(self.width / 2.0, self.height / 2.0)
    }
}

#[derive(Clone, Copy, Debug)]
struct Player {
    position: Position,
    radius: f32,
    speed: f32,
}

#[derive(Clone, Copy, Debug)]
struct Zombie {
    id: ZombieId,
    position: Position,
    speed: f32,
}

/// Set of occupied grid cells.
#[derive(Clone, Debug, Default)]
struct BlockStore {
    cells: HashSet<GridCell>,
}

impl BlockStore {
    fn contains(&self, cell: GridCell) -> bool {
        self.cells.contains(&cell)
    }

    fn insert(&mut self, cell: GridCell) -> bool {
        self.cells.insert(cell)
    }

    fn remove(&mut self, cell: GridCell) -> bool {
        self.cells.remove(&cell)
    }

    fn clear(&mut self) {
        self.cells.clear();
    }

    fn len(&self) -> usize {
        self.cells.len()
    }

    fn sorted_cells(&self) -> Vec<GridCell> {
        let mut cells: Vec<GridCell> = self.cells.iter().copied().collect();
        cells.sort();
        cells
    }
}

/// Represents the authoritative Voxel Siege session state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    playfield: Playfield,
    player: Player,
    blocks: BlockStore,
    zombies: Vec<Zombie>,
    next_zombie: u32,
    alive: bool,
    clock: Duration,
    rubble_rng: u64,
    config: WorldConfig,
}

impl World {
    /// Creates a new session with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(WorldConfig::default())
    }

    /// Creates a new session using the provided configuration.
    #[must_use]
    pub fn with_config(config: WorldConfig) -> Self {
        let playfield = Playfield::new(config.playfield_width, config.playfield_height);
        Self {
            banner: WELCOME_BANNER,
            playfield,
            player: Player {
                position: playfield.center(),
                radius: config.player_radius,
                speed: config.player_speed,
            },
            blocks: BlockStore::default(),
            zombies: Vec::new(),
            next_zombie: 0,
            alive: true,
            clock: Duration::ZERO,
            rubble_rng: config.rubble_seed,
            config,
        }
    }

    fn reset_playfield(&mut self, width: f32, height: f32) {
        self.playfield = Playfield::new(width, height);
        self.player.position = self.playfield.center();
        self.blocks.clear();
        self.zombies.clear();
        self.next_zombie = 0;
        self.alive = true;
        self.clock = Duration::ZERO;
        self.rubble_rng = self.config.rubble_seed;
    }

    fn zombie_index(&self, zombie_id: ZombieId) -> Option<usize> {
        self.zombies.iter().position(|zombie| zombie.id == zombie_id)
    }

    fn roll_block_break(&mut self) -> bool {
        self.rubble_rng = next_random(self.rubble_rng);
        (self.rubble_rng >> 33) % 100 < self.config.block_break_percent
    }

    fn move_player(&mut self, intent: MoveIntent, out_events: &mut Vec<Event>) {
        let speed = self.player.speed;
        let mut dx = 0.0;
        let mut dy = 0.0;
        if intent.up {
            dy -= speed;
        }
        if intent.down {
            dy += speed;
        }
        if intent.left {
            dx -= speed;
        }
        if intent.right {
            dx += speed;
        }

        let from = self.player.position;
        let candidate = from.offset(dx, dy);
        let cell = GridCell::containing(candidate);
        if self.blocks.contains(cell) {
            out_events.push(Event::PlayerBlocked { cell });
            return;
        }

        self.player.position = candidate;
        out_events.push(Event::PlayerMoved {
            from,
            to: candidate,
        });
    }

    fn step_zombie(&mut self, zombie_id: ZombieId, dx: f32, dy: f32, out_events: &mut Vec<Event>) {
        let Some(index) = self.zombie_index(zombie_id) else {
            return;
        };

        let (from, to) = {
            let zombie = &self.zombies[index];
            let from = zombie.position;
            let length = (dx * dx + dy * dy).sqrt();
            let (dx, dy) = if length > zombie.speed {
                let scale = zombie.speed / length;
                (dx * scale, dy * scale)
            } else {
                (dx, dy)
            };
            (from, from.offset(dx, dy))
        };
        self.zombies[index].position = to;

        let cell = GridCell::containing(to);
        if self.blocks.contains(cell) {
            let block_destroyed = self.roll_block_break();
            if block_destroyed {
                let _ = self.blocks.remove(cell);
            }
            let _ = self.zombies.swap_remove(index);
            out_events.push(Event::ZombieCrushed {
                zombie_id,
                cell,
                block_destroyed,
            });
            return;
        }

        let reach = self.player.radius + self.config.contact_slack;
        if to.distance_to(self.player.position) < reach {
            self.alive = false;
            out_events.push(Event::PlayerKilled { zombie_id });
            return;
        }

        out_events.push(Event::ZombieAdvanced {
            zombie_id,
            from,
            to,
        });
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigurePlayfield { width, height } => {
            world.reset_playfield(width, height);
        }
        Command::Tick { dt } => {
            world.clock = world.clock.saturating_add(dt);
            out_events.push(Event::TimeAdvanced { dt });
        }
        Command::MovePlayer { intent } => {
            if world.alive {
                world.move_player(intent, out_events);
            }
        }
        Command::PlaceBlock { cell } => {
            if world.alive && world.blocks.insert(cell) {
                out_events.push(Event::BlockPlaced { cell });
            }
        }
        Command::RemoveBlock { cell } => {
            if world.alive && world.blocks.remove(cell) {
                out_events.push(Event::BlockRemoved { cell });
            }
        }
        Command::SpawnZombie { position } => {
            if world.alive {
                let zombie_id = ZombieId::new(world.next_zombie);
                world.next_zombie = world.next_zombie.wrapping_add(1);
                world.zombies.push(Zombie {
                    id: zombie_id,
                    position,
                    speed: world.config.zombie_speed,
                });
                out_events.push(Event::ZombieSpawned {
                    zombie_id,
                    position,
                });
            }
        }
        Command::StepZombie { zombie_id, dx, dy } => {
            if world.alive {
                world.step_zombie(zombie_id, dx, dy, out_events);
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::{Playfield, World};
    use voxel_siege_core::{
        GridCell, PlayerSnapshot, Position, ZombieSnapshot, ZombieView,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the playfield definition.
    #[must_use]
    pub fn playfield(world: &World) -> &Playfield {
        &world.playfield
    }

    /// Captures an immutable snapshot of the player.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        PlayerSnapshot {
            position: world.player.position,
            radius: world.player.radius,
            alive: world.alive,
        }
    }

    /// Captures a read-only view of the zombies on the playfield.
    #[must_use]
    pub fn zombie_view(world: &World) -> ZombieView {
        let snapshots: Vec<ZombieSnapshot> = world
            .zombies
            .iter()
            .map(|zombie| ZombieSnapshot {
                id: zombie.id,
                position: zombie.position,
                speed: zombie.speed,
            })
            .collect();
        ZombieView::from_snapshots(snapshots)
    }

    /// Enumerates the occupied grid cells in deterministic order.
    #[must_use]
    pub fn block_cells(world: &World) -> Vec<GridCell> {
        world.blocks.sorted_cells()
    }

    /// Reports whether the provided cell is occupied by a block.
    #[must_use]
    pub fn contains_block(world: &World, cell: GridCell) -> bool {
        world.blocks.contains(cell)
    }

    /// Number of blocks currently stored.
    #[must_use]
    pub fn block_count(world: &World) -> usize {
        world.blocks.len()
    }

    /// Reports whether the session is still running.
    #[must_use]
    pub fn is_alive(world: &World) -> bool {
        world.alive
    }

    /// Total simulated time accumulated by the session.
    #[must_use]
    pub fn clock(world: &World) -> Duration {
        world.clock
    }

    /// Convenience accessor for the player's position.
    #[must_use]
    pub fn player_position(world: &World) -> Position {
        world.player.position
    }
}

fn next_random(state: u64) -> u64 {
    state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1)
}
