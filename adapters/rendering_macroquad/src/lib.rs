#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Voxel Siege.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.

use anyhow::Result;
use glam::Vec2;
use macroquad::input::{
    is_key_down, is_key_pressed, is_mouse_button_down, mouse_position, KeyCode, MouseButton,
};
use std::time::Duration;
use voxel_siege_rendering::{Color, FrameInput, Presentation, RenderingBackend, Scene};

/// Rendering backend implemented on top of macroquad.
#[derive(Clone, Copy, Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the
    /// display refresh rate or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend prints frame metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Clone, Copy, Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
}

impl FpsCounter {
    /// Records a rendered frame and returns the average once a second passed.
    fn record_frame(&mut self, dt: Duration) -> Option<f32> {
        self.elapsed += dt;
        self.frames = self.frames.saturating_add(1);

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let per_second = if seconds <= f32::EPSILON {
            0.0
        } else {
            self.frames as f32 / seconds
        };
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(per_second)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: scene.playfield.width as i32,
            window_height: scene.playfield.height as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();

            loop {
                if is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q) {
                    break;
                }

                macroquad::window::clear_background(background);

                let screen_width = macroquad::window::screen_width();
                let screen_height = macroquad::window::screen_height();
                let metrics = SceneMetrics::from_scene(&scene, screen_width, screen_height);

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let frame_input = gather_frame_input(&scene, &metrics);

                update_scene(frame_dt, frame_input, &mut scene);

                let metrics = SceneMetrics::from_scene(&scene, screen_width, screen_height);
                draw_blocks(&scene, &metrics);
                draw_zombies(&scene, &metrics);
                draw_player(&scene, &metrics);
                draw_hud(&scene, screen_width, screen_height);

                if show_fps {
                    if let Some(per_second) = fps_counter.record_frame(frame_dt) {
                        println!("FPS: {per_second:.2}");
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

/// Mapping between world units and screen pixels for the current frame.
#[derive(Clone, Copy, Debug)]
struct SceneMetrics {
    scale: f32,
    offset_x: f32,
    offset_y: f32,
    cell_step: f32,
}

impl SceneMetrics {
    fn from_scene(scene: &Scene, screen_width: f32, screen_height: f32) -> Self {
        let world_width = scene.playfield.width;
        let world_height = scene.playfield.height;
        let scale = if world_width <= 0.0 || world_height <= 0.0 {
            1.0
        } else {
            (screen_width / world_width).min(screen_height / world_height)
        };

        let offset_x = (screen_width - world_width * scale) * 0.5;
        let offset_y = (screen_height - world_height * scale) * 0.5;

        Self {
            scale,
            offset_x,
            offset_y,
            cell_step: scene.playfield.cell_length * scale,
        }
    }

    fn world_to_screen(&self, position: Vec2) -> Vec2 {
        Vec2::new(
            self.offset_x + position.x * self.scale,
            self.offset_y + position.y * self.scale,
        )
    }

    fn screen_to_world(&self, position: Vec2) -> Vec2 {
        Vec2::new(
            (position.x - self.offset_x) / self.scale,
            (position.y - self.offset_y) / self.scale,
        )
    }
}

fn gather_frame_input(scene: &Scene, metrics: &SceneMetrics) -> FrameInput {
    let (cursor_x, cursor_y) = mouse_position();
    let cursor_world = metrics.screen_to_world(Vec2::new(cursor_x, cursor_y));
    let cursor_world_space = if scene.playfield.contains(cursor_world) {
        Some(cursor_world)
    } else {
        None
    };

    FrameInput {
        move_up: is_key_down(KeyCode::W),
        move_down: is_key_down(KeyCode::S),
        move_left: is_key_down(KeyCode::A),
        move_right: is_key_down(KeyCode::D),
        cursor_world_space,
        place_block: is_mouse_button_down(MouseButton::Left),
        remove_block: is_mouse_button_down(MouseButton::Right),
    }
}

fn draw_blocks(scene: &Scene, metrics: &SceneMetrics) {
    for block in &scene.blocks {
        let origin = metrics.world_to_screen(Vec2::new(
            block.cell.x() as f32 * scene.playfield.cell_length,
            block.cell.y() as f32 * scene.playfield.cell_length,
        ));
        macroquad::shapes::draw_rectangle(
            origin.x,
            origin.y,
            metrics.cell_step,
            metrics.cell_step,
            to_macroquad_color(block.color),
        );
    }
}

fn draw_zombies(scene: &Scene, metrics: &SceneMetrics) {
    for zombie in &scene.zombies {
        let center = metrics.world_to_screen(zombie.center);
        macroquad::shapes::draw_circle(
            center.x,
            center.y,
            zombie.radius * metrics.scale,
            to_macroquad_color(zombie.color),
        );
    }
}

fn draw_player(scene: &Scene, metrics: &SceneMetrics) {
    let player = scene.player;
    let center = metrics.world_to_screen(player.center);
    macroquad::shapes::draw_circle(
        center.x,
        center.y,
        player.radius * metrics.scale,
        to_macroquad_color(player.color),
    );
}

fn draw_hud(scene: &Scene, screen_width: f32, screen_height: f32) {
    let hud = scene.hud;
    if hud.game_over {
        let notice = "Game Over! You were killed by a zombie.";
        macroquad::text::draw_text(
            notice,
            screen_width * 0.5 - 220.0,
            screen_height * 0.5,
            32.0,
            macroquad::color::RED,
        );
        return;
    }

    let status = if hud.round_active {
        format!("Round {}", hud.round)
    } else {
        format!("Round {} will start soon!", hud.round)
    };
    macroquad::text::draw_text(&status, 12.0, 24.0, 24.0, macroquad::color::WHITE);
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
