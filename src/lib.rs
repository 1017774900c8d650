#[cfg(feature = "dev")]
mod dev_tools;
pub mod cmdline;
pub mod config;
pub mod game;
pub mod snake_game;

use std::time::Duration;

use bevy::{
    asset::AssetMetaCheck, log::LogPlugin, prelude::*, utils::Instant, window::WindowResolution,
};

use crate::config::GameConfig;
use crate::snake_game::GRID_SIZE;

pub const CELL_SIZE: f32 = 30.0;
/// Margin between the window edge and the board.
pub const BOARD_OFFSET: f32 = 75.0;
pub const WINDOW_SIZE: f32 = 2.0 * BOARD_OFFSET + CELL_SIZE * GRID_SIZE as f32;

pub struct AppPlugin {
    config: GameConfig,
}

impl AppPlugin {
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }
}

impl Plugin for AppPlugin {
    fn build(&self, app: &mut App) {
        // Order new `AppSet` variants by adding them here:
        app.configure_sets(
            Update,
            (AppSet::TickTimers, AppSet::RecordInput, AppSet::Update, AppSet::Render).chain(),
        );

        app.insert_resource(Settings(self.config.clone()));
        app.insert_resource(FrameLimiter::new(self.config.frame_interval()));

        // Spawn the main camera.
        app.add_systems(Startup, spawn_camera);
        app.add_systems(Last, limit_frame_rate);

        // Add Bevy plugins.
        app.add_plugins(
            DefaultPlugins
                .set(AssetPlugin {
                    file_path: self.config.asset_root().to_string_lossy().into_owned(),
                    // Wasm builds will check for meta files (that don't exist) if this isn't set.
                    meta_check: AssetMetaCheck::Never,
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Window {
                        title: "Retro Snake".to_string(),
                        resizable: false,
                        resolution: WindowResolution::new(WINDOW_SIZE, WINDOW_SIZE).with_scale_factor_override(1.0),
                        ..default()
                    }
                    .into(),
                    ..default()
                })
                .set(LogPlugin {
                    filter: "wgpu=error,naga=warn,retro_snake=debug".to_string(),
                    ..default()
                }),
        );

        // Add other plugins.
        app.add_plugins(game::plugin);

        // Enable dev tools for dev builds.
        #[cfg(feature = "dev")]
        app.add_plugins(dev_tools::plugin);
    }
}

/// High-level groupings of systems for the app in the `Update` schedule.
/// When adding a new variant, make sure to order it in the `configure_sets`
/// call above.
#[derive(SystemSet, Debug, Clone, Copy, Eq, PartialEq, Hash)]
enum AppSet {
    /// Tick timers.
    TickTimers,
    /// Record player input.
    RecordInput,
    /// Advance the game.
    Update,
    /// Sync sprites and text with the game.
    Render,
}

/// Settings the app was started with.
#[derive(Resource, Deref)]
pub struct Settings(pub GameConfig);

/// Caps the frame rate by sleeping at the end of each frame. The simulation
/// tick runs on its own timer, so this only affects how often we draw.
#[derive(Resource)]
struct FrameLimiter {
    frame: Duration,
    last_frame: Instant,
}

impl FrameLimiter {
    fn new(frame: Duration) -> Self {
        Self { frame, last_frame: Instant::now() }
    }
}

fn limit_frame_rate(mut limiter: ResMut<FrameLimiter>) {
    let elapsed = limiter.last_frame.elapsed();
    if elapsed < limiter.frame {
        std::thread::sleep(limiter.frame - elapsed);
    }
    limiter.last_frame = Instant::now();
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("Camera"),
        Camera2dBundle::default(),
        // Render all UI to this camera.
        IsDefaultUiCamera,
    ));
}
