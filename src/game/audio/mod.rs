//! Fire-and-forget sound effects.

use bevy::prelude::*;

pub mod sfx;

pub(super) fn plugin(app: &mut App) {
    app.add_plugins(sfx::plugin);
}
