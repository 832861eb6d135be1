#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line launcher that wires the Voxel Siege systems to a window.
//!
//! The binary owns the frame loop glue: it translates backend input into
//! commands, applies them to the world, runs the pursuit and round systems,
//! and rebuilds the presented scene from world queries each frame.

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use voxel_siege_core::{Command, Event, CELL_SIZE};
use voxel_siege_rendering::{
    BlockPresentation, Color, FrameInput, HudPresentation, PlayerPresentation,
    PlayfieldPresentation, Presentation, RenderingBackend, Scene, ZombiePresentation,
};
use voxel_siege_rendering_macroquad::MacroquadBackend;
use voxel_siege_system_bootstrap::Bootstrap;
use voxel_siege_system_pursuit::Pursuit;
use voxel_siege_system_rounds::{Config as RoundsConfig, Rounds};
use voxel_siege_world::{apply, query, World, WorldConfig};

const WINDOW_TITLE: &str = "Voxel Siege";
const CLEAR_COLOR: Color = Color::new(0.2, 0.3, 0.3, 1.0);
const BLOCK_COLOR: Color = Color::new(0.8, 0.8, 0.2, 1.0);
const ZOMBIE_COLOR: Color = Color::new(0.0, 1.0, 0.0, 1.0);
const PLAYER_COLOR: Color = Color::new(1.0, 0.0, 0.0, 1.0);
const ZOMBIE_RADIUS: f32 = 10.0;

/// Survive escalating zombie waves by walling yourself in.
#[derive(Debug, Parser)]
#[command(name = "voxel-siege", version, about)]
struct Args {
    /// Seed for the session's random streams; omit for an entropy seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Width of the playfield in world units.
    #[arg(long, default_value_t = 800.0)]
    width: f32,

    /// Height of the playfield in world units.
    #[arg(long, default_value_t = 600.0)]
    height: f32,

    /// Render as fast as possible instead of syncing to the display.
    #[arg(long)]
    no_vsync: bool,

    /// Print the average frames-per-second once per second.
    #[arg(long)]
    show_fps: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut seed_rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let world = World::with_config(WorldConfig {
        playfield_width: args.width,
        playfield_height: args.height,
        rubble_seed: seed_rng.gen(),
        ..WorldConfig::default()
    });
    let rounds = Rounds::new(RoundsConfig::new(
        Duration::from_millis(3000),
        3,
        seed_rng.gen(),
    ));

    let bootstrap = Bootstrap;
    println!("{}", bootstrap.welcome_banner(&world));

    let playfield = bootstrap.playfield(&world);
    let playfield_presentation =
        PlayfieldPresentation::new(playfield.width(), playfield.height(), CELL_SIZE)?;
    let mut session = Session {
        world,
        pursuit: Pursuit,
        rounds,
        game_over: false,
    };

    let scene = session.build_scene(playfield_presentation);
    let presentation = Presentation::new(WINDOW_TITLE, CLEAR_COLOR, scene);

    let backend = MacroquadBackend::new()
        .with_vsync(!args.no_vsync)
        .with_show_fps(args.show_fps);
    backend.run(presentation, move |dt, input, scene| {
        session.frame(dt, input);
        *scene = session.build_scene(scene.playfield);
    })
}

/// Owns the simulation state and the system wiring for one play session.
struct Session {
    world: World,
    pursuit: Pursuit,
    rounds: Rounds,
    game_over: bool,
}

impl Session {
    /// Advances the simulation by one frame worth of input and time.
    fn frame(&mut self, dt: Duration, input: FrameInput) {
        if self.game_over {
            return;
        }

        let mut events = Vec::new();

        let intent = input.movement();
        if !intent.is_idle() {
            apply(&mut self.world, Command::MovePlayer { intent }, &mut events);
        }
        if let Some(cell) = input.cursor_cell() {
            if input.place_block {
                apply(&mut self.world, Command::PlaceBlock { cell }, &mut events);
            }
            if input.remove_block {
                apply(&mut self.world, Command::RemoveBlock { cell }, &mut events);
            }
        }

        apply(&mut self.world, Command::Tick { dt }, &mut events);

        let mut steps = Vec::new();
        self.pursuit.handle(
            &events,
            &query::zombie_view(&self.world),
            query::player(&self.world),
            &mut steps,
        );
        for command in steps {
            apply(&mut self.world, command, &mut events);
        }

        let playfield = query::playfield(&self.world);
        let bounds = (playfield.width(), playfield.height());
        let before = self.rounds.snapshot();
        let mut spawns = Vec::new();
        self.rounds.handle(
            &events,
            query::zombie_view(&self.world).len(),
            bounds,
            &mut spawns,
        );
        let after = self.rounds.snapshot();

        if before.active && !after.active {
            println!("Round {} will start soon!", after.round);
        }
        if !before.active && after.active {
            println!(
                "Spawning round {} with {} zombies!",
                after.round,
                spawns.len()
            );
        }

        for command in spawns {
            apply(&mut self.world, command, &mut events);
        }

        if events
            .iter()
            .any(|event| matches!(event, Event::PlayerKilled { .. }))
        {
            println!("Game Over! You were killed by a zombie.");
            self.game_over = true;
        }
    }

    /// Rebuilds the presented scene from world queries.
    fn build_scene(&self, playfield: PlayfieldPresentation) -> Scene {
        let blocks = query::block_cells(&self.world)
            .into_iter()
            .map(|cell| BlockPresentation::new(cell, BLOCK_COLOR))
            .collect();

        let zombies = query::zombie_view(&self.world)
            .iter()
            .map(|zombie| {
                ZombiePresentation::new(
                    Vec2::new(zombie.position.x(), zombie.position.y()),
                    ZOMBIE_RADIUS,
                    ZOMBIE_COLOR,
                )
            })
            .collect();

        let player = query::player(&self.world);
        let player_presentation = PlayerPresentation::new(
            Vec2::new(player.position.x(), player.position.y()),
            player.radius,
            PLAYER_COLOR,
        );

        let round = self.rounds.snapshot();
        let hud = HudPresentation {
            round: round.round,
            round_active: round.active,
            game_over: self.game_over,
        };

        Scene::new(playfield, blocks, zombies, player_presentation, hud)
    }
}
