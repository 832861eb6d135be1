#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Voxel Siege engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Voxel Siege.";

/// Side length of a single grid cell expressed in world units.
pub const CELL_SIZE: f32 = 20.0;

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Resets the session onto a playfield with the provided dimensions.
    ConfigurePlayfield {
        /// Width of the playfield measured in world units.
        width: f32,
        /// Height of the playfield measured in world units.
        height: f32,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that the player move according to the sampled intent.
    MovePlayer {
        /// Per-axis movement intent captured by the input adapter.
        intent: MoveIntent,
    },
    /// Requests placement of a block at the provided grid cell.
    PlaceBlock {
        /// Cell that should become occupied.
        cell: GridCell,
    },
    /// Requests removal of the block at the provided grid cell.
    RemoveBlock {
        /// Cell that should become free.
        cell: GridCell,
    },
    /// Requests that a new zombie enter the playfield.
    SpawnZombie {
        /// World position the zombie should appear at.
        position: Position,
    },
    /// Requests that a zombie advance by the provided step vector.
    StepZombie {
        /// Identifier of the zombie attempting to move.
        zombie_id: ZombieId,
        /// Step along the horizontal axis in world units.
        dx: f32,
        /// Step along the vertical axis in world units.
        dy: f32,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that the player committed a candidate position.
    PlayerMoved {
        /// Position the player occupied before the move.
        from: Position,
        /// Position the player occupies after the move.
        to: Position,
    },
    /// Reports that a candidate player position was rejected by a block.
    PlayerBlocked {
        /// Cell that rejected the candidate position.
        cell: GridCell,
    },
    /// Confirms that a block now occupies the provided cell.
    BlockPlaced {
        /// Cell that became occupied.
        cell: GridCell,
    },
    /// Confirms that the block at the provided cell was removed.
    BlockRemoved {
        /// Cell that became free.
        cell: GridCell,
    },
    /// Confirms that a zombie entered the playfield.
    ZombieSpawned {
        /// Identifier assigned to the newly spawned zombie.
        zombie_id: ZombieId,
        /// World position the zombie appeared at.
        position: Position,
    },
    /// Confirms that a zombie advanced without colliding.
    ZombieAdvanced {
        /// Identifier of the zombie that advanced.
        zombie_id: ZombieId,
        /// Position the zombie occupied before moving.
        from: Position,
        /// Position the zombie occupies after moving.
        to: Position,
    },
    /// Reports that a zombie reached an occupied cell and was destroyed.
    ZombieCrushed {
        /// Identifier of the destroyed zombie.
        zombie_id: ZombieId,
        /// Cell the zombie collided with.
        cell: GridCell,
        /// Whether the collision also destroyed the block.
        block_destroyed: bool,
    },
    /// Reports that a zombie reached the player and ended the session.
    PlayerKilled {
        /// Identifier of the zombie that reached the player.
        zombie_id: ZombieId,
    },
}

/// Unique identifier assigned to a zombie.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ZombieId(u32);

impl ZombieId {
    /// Creates a new zombie identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as signed integer coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCell {
    x: i32,
    y: i32,
}

impl GridCell {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal index of the cell.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical index of the cell.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Computes the cell containing the provided world position.
    ///
    /// Uses floor division so that negative world coordinates map to the
    /// cell below rather than truncating toward zero.
    #[must_use]
    pub fn containing(position: Position) -> Self {
        Self {
            x: (position.x() / CELL_SIZE).floor() as i32,
            y: (position.y() / CELL_SIZE).floor() as i32,
        }
    }
}

/// World-space position expressed in floating point units.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Position {
    x: f32,
    y: f32,
}

impl Position {
    /// Creates a new world-space position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate in world units.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical coordinate in world units.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Returns the position displaced by the provided deltas.
    #[must_use]
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Computes the Euclidean distance to another position.
    #[must_use]
    pub fn distance_to(self, other: Position) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Per-axis movement intent sampled from the input adapter each frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct MoveIntent {
    /// Whether the player wants to move toward decreasing vertical values.
    pub up: bool,
    /// Whether the player wants to move toward increasing vertical values.
    pub down: bool,
    /// Whether the player wants to move toward decreasing horizontal values.
    pub left: bool,
    /// Whether the player wants to move toward increasing horizontal values.
    pub right: bool,
}

impl MoveIntent {
    /// Reports whether no direction is requested.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        !(self.up || self.down || self.left || self.right)
    }
}

/// Immutable representation of a single zombie's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZombieSnapshot {
    /// Unique identifier assigned to the zombie.
    pub id: ZombieId,
    /// World position currently occupied by the zombie.
    pub position: Position,
    /// Distance the zombie covers per simulation step.
    pub speed: f32,
}

/// Read-only snapshot describing all zombies on the playfield.
#[derive(Clone, Debug, Default)]
pub struct ZombieView {
    snapshots: Vec<ZombieSnapshot>,
}

impl ZombieView {
    /// Creates a new zombie view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ZombieSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured zombie snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &ZombieSnapshot> {
        self.snapshots.iter()
    }

    /// Number of zombies captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view contains no zombies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ZombieSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of the player's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// World position currently occupied by the player.
    pub position: Position,
    /// Radius used for both rendering and collision checks.
    pub radius: f32,
    /// Whether the player is still alive.
    pub alive: bool,
}
