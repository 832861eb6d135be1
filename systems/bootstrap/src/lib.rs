#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the Voxel Siege experience.

use voxel_siege_core::PlayerSnapshot;
use voxel_siege_world::{query, Playfield, World};

/// Produces data required to greet the player.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner(&self, world: &World) -> &'static str {
        query::welcome_banner(world)
    }

    /// Exposes the playfield configuration required for rendering.
    #[must_use]
    pub fn playfield<'world>(&self, world: &'world World) -> &'world Playfield {
        query::playfield(world)
    }

    /// Exposes the player's initial state for presentation purposes.
    #[must_use]
    pub fn player(&self, world: &World) -> PlayerSnapshot {
        query::player(world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_matches_the_world() {
        let world = World::new();
        let bootstrap = Bootstrap;
        assert_eq!(bootstrap.welcome_banner(&world), "Welcome to Voxel Siege.");
    }

    #[test]
    fn player_starts_at_the_playfield_center() {
        let world = World::new();
        let bootstrap = Bootstrap;
        let playfield = bootstrap.playfield(&world);
        let player = bootstrap.player(&world);
        assert_eq!(player.position, playfield.center());
        assert!(player.alive);
    }
}
