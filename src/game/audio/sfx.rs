use bevy::{audio::PlaybackMode, prelude::*};

use crate::game::assets::{HandleMap, SfxKey};
use crate::snake_game::GameEvent;

pub(super) fn plugin(app: &mut App) {
    app.observe(play_sfx);
}

fn play_sfx(
    trigger: Trigger<PlaySfx>,
    mut commands: Commands,
    sfx_handles: Res<HandleMap<SfxKey>>,
) {
    let sfx_key = match trigger.event() {
        PlaySfx::Key(key) => *key,
    };
    let Some(source) = sfx_handles.get(&sfx_key) else {
        warn!("no sound loaded for {sfx_key:?}");
        return;
    };
    commands.spawn(AudioSourceBundle {
        source: source.clone_weak(),
        settings: PlaybackSettings {
            mode: PlaybackMode::Despawn,
            ..default()
        },
    });
}

/// Trigger this event to play a single sound effect.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaySfx {
    Key(SfxKey),
}

impl From<GameEvent> for PlaySfx {
    fn from(event: GameEvent) -> Self {
        match event {
            GameEvent::Eat     => PlaySfx::Key(SfxKey::Eat),
            GameEvent::WallHit => PlaySfx::Key(SfxKey::WallHit),
        }
    }
}
