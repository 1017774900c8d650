//! Player input and the fixed simulation tick.
//!
//! Key presses are read as events so several presses between two ticks are
//! applied in the order they happened. The snake itself only moves when the
//! [`SimulationClock`] finishes, independent of the frame rate.

use bevy::{
    input::{keyboard::KeyboardInput, ButtonState},
    prelude::*,
};

use crate::game::audio::sfx::PlaySfx;
use crate::snake_game::{Direction, SnakeGame};
use crate::{AppSet, Settings};

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<ActiveGame>();
    app.init_resource::<SimulationClock>();

    app.add_systems(Update, tick_simulation_clock.in_set(AppSet::TickTimers));
    app.add_systems(Update, record_input.in_set(AppSet::RecordInput));
    app.add_systems(Update, advance_game.in_set(AppSet::Update));
}

/// The one game owned by the app.
#[derive(Resource, Deref, DerefMut)]
pub struct ActiveGame(pub SnakeGame);

impl FromWorld for ActiveGame {
    fn from_world(world: &mut World) -> Self {
        let settings = world.resource::<Settings>();
        ActiveGame(SnakeGame::new(settings.seed))
    }
}

#[derive(Resource, Deref, DerefMut)]
pub struct SimulationClock(pub Timer);

impl FromWorld for SimulationClock {
    fn from_world(world: &mut World) -> Self {
        let settings = world.resource::<Settings>();
        SimulationClock(Timer::new(settings.tick_interval(), TimerMode::Repeating))
    }
}

pub fn direction_of_key(key: KeyCode) -> Option<Direction> {
    match key {
        KeyCode::ArrowUp    | KeyCode::KeyW => Some(Direction::Up),
        KeyCode::ArrowDown  | KeyCode::KeyS => Some(Direction::Down),
        KeyCode::ArrowLeft  | KeyCode::KeyA => Some(Direction::Left),
        KeyCode::ArrowRight | KeyCode::KeyD => Some(Direction::Right),
        _ => None,
    }
}

fn tick_simulation_clock(time: Res<Time>, mut clock: ResMut<SimulationClock>) {
    clock.tick(time.delta());
}

fn record_input(
    mut keys: EventReader<KeyboardInput>,
    mut game: ResMut<ActiveGame>,
    mut exit: EventWriter<AppExit>,
) {
    for key in keys.read() {
        if key.state != ButtonState::Pressed {
            continue;
        }
        if key.key_code == KeyCode::Escape {
            info!("quit requested");
            exit.send(AppExit::Success);
            return;
        }
        if let Some(direction) = direction_of_key(key.key_code) {
            game.handle_direction(direction);
        }
    }
}

fn advance_game(
    clock: Res<SimulationClock>,
    mut game: ResMut<ActiveGame>,
    mut commands: Commands,
) {
    for _ in 0..clock.times_finished_this_tick() {
        for event in game.update() {
            commands.trigger(PlaySfx::from(event));
        }
    }
}


#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::input::keyboard::{Key, NativeKey};

    use super::*;
    use crate::config::GameConfig;
    use crate::game::assets::SfxKey;
    use crate::snake_game::{GameState, GridPoint};

    #[derive(Resource, Default)]
    struct PlayedSfx(Vec<PlaySfx>);

    fn test_app() -> App {
        let mut app = App::new();
        app.insert_resource(Settings(GameConfig { seed: Some(5), ..default() }));
        app.add_event::<KeyboardInput>();
        app.init_resource::<ActiveGame>();
        app.init_resource::<SimulationClock>();
        app.add_systems(Update, (record_input, advance_game).chain());
        app
    }

    fn press(app: &mut App, key_code: KeyCode) {
        app.world_mut().send_event(KeyboardInput {
            key_code,
            logical_key: Key::Unidentified(NativeKey::Unidentified),
            state: ButtonState::Pressed,
            window: Entity::PLACEHOLDER,
        });
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(Some(Direction::Up), direction_of_key(KeyCode::ArrowUp));
        assert_eq!(Some(Direction::Left), direction_of_key(KeyCode::KeyA));
        assert_eq!(None, direction_of_key(KeyCode::Space));
    }

    #[test]
    fn test_direction_key_starts_round() {
        let mut app = test_app();
        assert_eq!(GameState::Stopped, app.world().resource::<ActiveGame>().state());
        press(&mut app, KeyCode::ArrowDown);
        app.update();
        let game = app.world().resource::<ActiveGame>();
        assert_eq!(GameState::Running, game.state());
        assert_eq!(Direction::Down, game.snake().direction());
    }

    #[test]
    fn test_other_keys_do_not_start() {
        let mut app = test_app();
        press(&mut app, KeyCode::Space);
        app.update();
        assert_eq!(GameState::Stopped, app.world().resource::<ActiveGame>().state());
    }

    #[test]
    fn test_presses_apply_in_order() {
        let mut app = test_app();
        // Both presses land before the tick; the later one wins.
        press(&mut app, KeyCode::ArrowUp);
        press(&mut app, KeyCode::ArrowLeft);
        app.update();
        assert_eq!(Direction::Left, app.world().resource::<ActiveGame>().snake().direction());
    }

    #[test]
    fn test_escape_quits() {
        let mut app = test_app();
        press(&mut app, KeyCode::Escape);
        app.update();
        let exits = app.world().resource::<Events<AppExit>>();
        assert_eq!(Some(&AppExit::Success), exits.iter_current_update_events().next());
    }

    #[test]
    fn test_snake_moves_only_on_tick() {
        let mut app = test_app();
        press(&mut app, KeyCode::ArrowRight);
        app.update();
        assert_eq!(GridPoint::new(6, 9), app.world().resource::<ActiveGame>().snake().head());

        app.world_mut().resource_mut::<SimulationClock>().tick(Duration::from_millis(200));
        app.update();
        assert_eq!(GridPoint::new(7, 9), app.world().resource::<ActiveGame>().snake().head());

        // The clock is not ticked again, so the snake stays put.
        app.world_mut().resource_mut::<SimulationClock>().tick(Duration::ZERO);
        app.update();
        assert_eq!(GridPoint::new(7, 9), app.world().resource::<ActiveGame>().snake().head());
    }

    #[test]
    fn test_tick_triggers_sound_effects() {
        let mut app = test_app();
        app.init_resource::<PlayedSfx>();
        app.observe(|trigger: Trigger<PlaySfx>, mut played: ResMut<PlayedSfx>| {
            played.0.push(*trigger.event());
        });

        press(&mut app, KeyCode::ArrowRight);
        app.update();
        app.world_mut().resource_mut::<ActiveGame>().place_food(GridPoint::new(7, 9));

        app.world_mut().resource_mut::<SimulationClock>().tick(Duration::from_millis(200));
        app.update();
        assert_eq!(vec![PlaySfx::Key(SfxKey::Eat)], app.world().resource::<PlayedSfx>().0);
        assert_eq!(1, app.world().resource::<ActiveGame>().score());
    }
}
