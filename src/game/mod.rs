//! Game mechanics and content.

use bevy::prelude::*;

pub mod assets;
pub mod audio;
pub mod movement;
pub mod snake_visualizer;

pub(super) fn plugin(app: &mut App) {
    app.add_plugins((
        audio::plugin,
        assets::plugin,

        movement::plugin,
        snake_visualizer::plugin,
    ));
}
