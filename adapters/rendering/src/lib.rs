#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Voxel Siege adapters.
//!
//! Backends receive an immutable [`Scene`] rebuilt each frame from world
//! queries and must never mutate simulation state themselves. Input flows
//! the other way: backends sample a [`FrameInput`] snapshot and hand it to
//! the update closure supplied by the host.

use anyhow::Result as AnyResult;
use glam::Vec2;
use std::{error::Error, fmt, time::Duration};
use voxel_siege_core::{GridCell, MoveIntent, CELL_SIZE};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Input snapshot gathered by adapters before updating the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Whether the player is steering toward decreasing vertical values.
    pub move_up: bool,
    /// Whether the player is steering toward increasing vertical values.
    pub move_down: bool,
    /// Whether the player is steering toward decreasing horizontal values.
    pub move_left: bool,
    /// Whether the player is steering toward increasing horizontal values.
    pub move_right: bool,
    /// Cursor position expressed in world units, when inside the playfield.
    pub cursor_world_space: Option<Vec2>,
    /// Whether the adapter detected a block placement request this frame.
    pub place_block: bool,
    /// Whether the adapter detected a block removal request this frame.
    pub remove_block: bool,
}

impl FrameInput {
    /// Collapses the directional flags into a movement intent.
    #[must_use]
    pub const fn movement(&self) -> MoveIntent {
        MoveIntent {
            up: self.move_up,
            down: self.move_down,
            left: self.move_left,
            right: self.move_right,
        }
    }

    /// Grid cell under the cursor, when the cursor is inside the playfield.
    #[must_use]
    pub fn cursor_cell(&self) -> Option<GridCell> {
        self.cursor_world_space.map(|cursor| {
            GridCell::new(
                (cursor.x / CELL_SIZE).floor() as i32,
                (cursor.y / CELL_SIZE).floor() as i32,
            )
        })
    }
}

/// Describes the playfield rectangle that backends should present.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayfieldPresentation {
    /// Width of the playfield measured in world units.
    pub width: f32,
    /// Height of the playfield measured in world units.
    pub height: f32,
    /// Side length of a single grid cell expressed in world units.
    pub cell_length: f32,
}

impl PlayfieldPresentation {
    /// Creates a new playfield descriptor.
    ///
    /// Returns an error when `cell_length` is not strictly positive.
    pub fn new(width: f32, height: f32, cell_length: f32) -> Result<Self, RenderingError> {
        if cell_length <= 0.0 {
            return Err(RenderingError::InvalidCellLength { cell_length });
        }

        Ok(Self {
            width,
            height,
            cell_length,
        })
    }

    /// Reports whether the provided world position lies inside the playfield.
    ///
    /// The upper bounds are exclusive so that every accepted position maps
    /// to a cell inside the grid rather than one past the far boundary.
    #[must_use]
    pub fn contains(&self, position: Vec2) -> bool {
        position.x >= 0.0 && position.y >= 0.0 && position.x < self.width && position.y < self.height
    }
}

/// Block rendered as a filled cell-sized square.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockPresentation {
    /// Cell the block occupies.
    pub cell: GridCell,
    /// Fill color of the block.
    pub color: Color,
}

impl BlockPresentation {
    /// Creates a new block presentation descriptor.
    #[must_use]
    pub const fn new(cell: GridCell, color: Color) -> Self {
        Self { cell, color }
    }
}

/// Zombie rendered as a filled circle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZombiePresentation {
    /// Center of the zombie's body in world units.
    pub center: Vec2,
    /// Radius of the zombie's body in world units.
    pub radius: f32,
    /// Fill color of the zombie's body.
    pub color: Color,
}

impl ZombiePresentation {
    /// Creates a new zombie presentation descriptor.
    #[must_use]
    pub const fn new(center: Vec2, radius: f32, color: Color) -> Self {
        Self {
            center,
            radius,
            color,
        }
    }
}

/// Player rendered as a filled circle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerPresentation {
    /// Center of the player's body in world units.
    pub center: Vec2,
    /// Radius of the player's body in world units.
    pub radius: f32,
    /// Fill color of the player's body.
    pub color: Color,
}

impl PlayerPresentation {
    /// Creates a new player presentation descriptor.
    #[must_use]
    pub const fn new(center: Vec2, radius: f32, color: Color) -> Self {
        Self {
            center,
            radius,
            color,
        }
    }
}

/// Round and session status displayed by the HUD.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HudPresentation {
    /// One-based index of the current round.
    pub round: u32,
    /// Whether a wave is currently in play.
    pub round_active: bool,
    /// Whether the session has ended.
    pub game_over: bool,
}

/// Scene description combining the playfield and its inhabitants.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Playfield rectangle that frames the play area.
    pub playfield: PlayfieldPresentation,
    /// Blocks currently placed on the grid.
    pub blocks: Vec<BlockPresentation>,
    /// Zombies currently chasing the player.
    pub zombies: Vec<ZombiePresentation>,
    /// The player avatar.
    pub player: PlayerPresentation,
    /// Round and session status.
    pub hud: HudPresentation,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    pub const fn new(
        playfield: PlayfieldPresentation,
        blocks: Vec<BlockPresentation>,
        zombies: Vec<ZombiePresentation>,
        player: PlayerPresentation,
        hud: HudPresentation,
    ) -> Self {
        Self {
            playfield,
            blocks,
            zombies,
            player,
            hud,
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Voxel Siege scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// per-frame input captured by the adapter, and may mutate the scene
    /// before it is rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Cell length must be positive to avoid a degenerate grid.
    InvalidCellLength {
        /// Provided cell length that failed validation.
        cell_length: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCellLength { cell_length } => {
                write!(f, "cell_length must be positive (received {cell_length})")
            }
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playfield_creation_rejects_non_positive_cell_length() {
        let error = PlayfieldPresentation::new(800.0, 600.0, 0.0)
            .expect_err("zero cell_length must be rejected");
        assert!(matches!(
            error,
            RenderingError::InvalidCellLength { .. }
        ));
    }

    #[test]
    fn playfield_excludes_the_far_boundary() {
        let playfield =
            PlayfieldPresentation::new(800.0, 600.0, CELL_SIZE).expect("valid playfield");
        assert!(playfield.contains(Vec2::ZERO));
        assert!(playfield.contains(Vec2::new(799.9, 599.9)));
        assert!(!playfield.contains(Vec2::new(800.0, 10.0)));
        assert!(!playfield.contains(Vec2::new(10.0, 600.0)));
        assert!(!playfield.contains(Vec2::new(-0.1, 10.0)));
    }

    #[test]
    fn accepted_cursor_positions_map_to_in_field_cells() {
        let playfield =
            PlayfieldPresentation::new(800.0, 600.0, CELL_SIZE).expect("valid playfield");
        let columns = (800.0 / CELL_SIZE) as i32;
        let rows = (600.0 / CELL_SIZE) as i32;

        for position in [
            Vec2::ZERO,
            Vec2::new(799.9, 599.9),
            Vec2::new(400.0, 300.0),
        ] {
            assert!(playfield.contains(position));
            let input = FrameInput {
                cursor_world_space: Some(position),
                ..FrameInput::default()
            };
            let cell = input.cursor_cell().expect("cursor is inside");
            assert!((0..columns).contains(&cell.x()), "cell off grid: {cell:?}");
            assert!((0..rows).contains(&cell.y()), "cell off grid: {cell:?}");
        }
    }

    #[test]
    fn cursor_cell_maps_world_coordinates_onto_the_grid() {
        let input = FrameInput {
            cursor_world_space: Some(Vec2::new(45.0, 19.9)),
            ..FrameInput::default()
        };
        assert_eq!(input.cursor_cell(), Some(GridCell::new(2, 0)));

        let idle = FrameInput::default();
        assert_eq!(idle.cursor_cell(), None);
    }

    #[test]
    fn movement_flags_collapse_into_an_intent() {
        let input = FrameInput {
            move_up: true,
            move_left: true,
            ..FrameInput::default()
        };
        let intent = input.movement();
        assert!(intent.up && intent.left);
        assert!(!intent.down && !intent.right);
        assert!(!intent.is_idle());
    }
}
