//! Development tools for the game. This plugin is only enabled in dev builds.

use bevy::{dev_tools::fps_overlay::FpsOverlayPlugin, prelude::*};

use crate::game::movement::ActiveGame;
use crate::snake_game::GameState;

pub(super) fn plugin(app: &mut App) {
    // Shows whether the frame cap holds.
    app.add_plugins(FpsOverlayPlugin::default());
    app.add_systems(Update, log_state_transitions);
}

fn log_state_transitions(game: Res<ActiveGame>, mut last: Local<Option<GameState>>) {
    let state = game.state();
    if *last != Some(state) {
        debug!("game state {:?} -> {:?} (score {})", *last, state, game.score());
        *last = Some(state);
    }
}
