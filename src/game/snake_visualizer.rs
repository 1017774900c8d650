//! Draws the board, the snake, the food and the text overlays from the
//! [`ActiveGame`] resource. Nothing here changes game state.

use bevy::{prelude::*, sprite::Anchor};

use crate::game::assets::{HandleMap, ImageKey};
use crate::game::movement::ActiveGame;
use crate::snake_game::{GameState, GridPoint, GRID_SIZE};
use crate::{AppSet, BOARD_OFFSET, CELL_SIZE, WINDOW_SIZE};

pub const LIGHT_GREEN: Color = Color::srgb(173.0 / 255.0, 204.0 / 255.0, 96.0 / 255.0);
pub const DARK_GREEN: Color = Color::srgb(43.0 / 255.0, 51.0 / 255.0, 24.0 / 255.0);

const BORDER_WIDTH: f32 = 5.0;
const TITLE_FONT_SIZE: f32 = 60.0;
const TEXT_FONT_SIZE: f32 = 40.0;

const Z_BOARD: f32 = 0.0;
const Z_FOOD: f32 = 1.0;
const Z_SNAKE: f32 = 2.0;
const Z_TEXT: f32 = 3.0;

pub(super) fn plugin(app: &mut App) {
    app.insert_resource(ClearColor(LIGHT_GREEN));
    app.add_systems(Startup, spawn_board);
    app.add_systems(
        Update,
        (sync_snake, sync_food, sync_texts).in_set(AppSet::Render),
    );
}

#[derive(Component)]
struct SnakeSegment;

#[derive(Component)]
struct FoodSprite;

#[derive(Component)]
struct ScoreText;

/// Shown only while waiting for the player to start a round.
#[derive(Component)]
struct WaitingText;

/// Centre of a grid cell in world coordinates. The camera looks at the window
/// centre with y pointing up, while grid rows count downward.
pub fn cell_to_world(pt: GridPoint) -> Vec2 {
    Vec2::new(
        -WINDOW_SIZE / 2.0 + BOARD_OFFSET + (pt.x as f32 + 0.5) * CELL_SIZE,
        WINDOW_SIZE / 2.0 - BOARD_OFFSET - (pt.y as f32 + 0.5) * CELL_SIZE,
    )
}

/// Converts a window position (origin top-left, y down) to world coordinates.
pub fn screen_to_world(x: f32, y: f32) -> Vec2 {
    Vec2::new(x - WINDOW_SIZE / 2.0, WINDOW_SIZE / 2.0 - y)
}

fn text_bundle(value: &str, font_size: f32, at: Vec2) -> Text2dBundle {
    Text2dBundle {
        text: Text::from_section(value, TextStyle {
            font_size,
            color: DARK_GREEN,
            ..default()
        }),
        text_anchor: Anchor::TopLeft,
        transform: Transform::from_translation(at.extend(Z_TEXT)),
        ..default()
    }
}

fn spawn_board(mut commands: Commands, image_handles: Res<HandleMap<ImageKey>>) {
    let board_size = CELL_SIZE * GRID_SIZE as f32;
    let board_center = screen_to_world(WINDOW_SIZE / 2.0, WINDOW_SIZE / 2.0);

    // The border is a dark square with the light board drawn on top of it.
    commands.spawn((
        Name::new("Border"),
        SpriteBundle {
            sprite: Sprite {
                color: DARK_GREEN,
                custom_size: Some(Vec2::splat(board_size + 2.0 * BORDER_WIDTH)),
                ..default()
            },
            transform: Transform::from_translation(board_center.extend(Z_BOARD)),
            ..default()
        },
    ));
    commands.spawn((
        Name::new("Board"),
        SpriteBundle {
            sprite: Sprite {
                color: LIGHT_GREEN,
                custom_size: Some(Vec2::splat(board_size)),
                ..default()
            },
            transform: Transform::from_translation(board_center.extend(Z_BOARD + 0.5)),
            ..default()
        },
    ));

    commands.spawn((
        Name::new("Food"),
        FoodSprite,
        SpriteBundle {
            texture: image_handles[&ImageKey::Food].clone_weak(),
            sprite: Sprite {
                custom_size: Some(Vec2::splat(CELL_SIZE)),
                ..default()
            },
            visibility: Visibility::Hidden,
            ..default()
        },
    ));

    commands.spawn((
        Name::new("Title"),
        text_bundle("Retro Snake", TITLE_FONT_SIZE, screen_to_world(BOARD_OFFSET - 5.0, 20.0)),
    ));
    commands.spawn((
        Name::new("Score"),
        ScoreText,
        text_bundle("Score: 0", TEXT_FONT_SIZE, screen_to_world(BOARD_OFFSET - 5.0, BOARD_OFFSET + board_size + 10.0)),
    ));
    commands.spawn((
        Name::new("Waiting"),
        WaitingText,
        text_bundle("GAME WAITING", TITLE_FONT_SIZE, screen_to_world(BOARD_OFFSET + 10.0, WINDOW_SIZE / 2.0 - 40.0)),
    ));
    commands.spawn((
        Name::new("Start prompt"),
        WaitingText,
        text_bundle("Press any arrow key to start", TEXT_FONT_SIZE, screen_to_world(BOARD_OFFSET + 10.0, WINDOW_SIZE / 2.0 + 10.0)),
    ));
}

/// Rebuilds the segment sprites whenever the game changed; at most 625 of them.
fn sync_snake(
    mut commands: Commands,
    game: Res<ActiveGame>,
    segments: Query<Entity, With<SnakeSegment>>,
) {
    if !game.is_changed() {
        return;
    }
    for entity in &segments {
        commands.entity(entity).despawn();
    }
    match game.state() {
        GameState::Stopped => {}
        GameState::Running => {
            for &pt in game.snake().body() {
                commands.spawn((
                    SnakeSegment,
                    SpriteBundle {
                        sprite: Sprite {
                            color: DARK_GREEN,
                            custom_size: Some(Vec2::splat(CELL_SIZE - 2.0)),
                            ..default()
                        },
                        transform: Transform::from_translation(cell_to_world(pt).extend(Z_SNAKE)),
                        ..default()
                    },
                ));
            }
        }
    }
}

fn sync_food(
    game: Res<ActiveGame>,
    mut food: Query<(&mut Transform, &mut Visibility), With<FoodSprite>>,
) {
    if !game.is_changed() {
        return;
    }
    for (mut transform, mut visibility) in &mut food {
        transform.translation = cell_to_world(game.food().position).extend(Z_FOOD);
        *visibility = match game.state() {
            GameState::Running => Visibility::Inherited,
            GameState::Stopped => Visibility::Hidden,
        };
    }
}

fn sync_texts(
    game: Res<ActiveGame>,
    mut score: Query<&mut Text, With<ScoreText>>,
    mut waiting: Query<&mut Visibility, With<WaitingText>>,
) {
    if !game.is_changed() {
        return;
    }
    for mut text in &mut score {
        text.sections[0].value = format!("Score: {}", game.score());
    }
    for mut visibility in &mut waiting {
        *visibility = match game.state() {
            GameState::Stopped => Visibility::Inherited,
            GameState::Running => Visibility::Hidden,
        };
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_to_world_corners() {
        assert_eq!(Vec2::new(-360.0, 360.0), cell_to_world(GridPoint::new(0, 0)));
        assert_eq!(Vec2::new(360.0, -360.0), cell_to_world(GridPoint::new(GRID_SIZE - 1, GRID_SIZE - 1)));
        assert_eq!(Vec2::new(-180.0, 90.0), cell_to_world(GridPoint::new(6, 9)));
    }

    #[test]
    fn test_screen_to_world() {
        assert_eq!(Vec2::ZERO, screen_to_world(WINDOW_SIZE / 2.0, WINDOW_SIZE / 2.0));
        assert_eq!(Vec2::new(-WINDOW_SIZE / 2.0, WINDOW_SIZE / 2.0), screen_to_world(0.0, 0.0));
    }

    #[test]
    fn test_board_fits_window() {
        assert_eq!(900.0, WINDOW_SIZE);
        let top_left = cell_to_world(GridPoint::new(0, 0)) + Vec2::new(-CELL_SIZE, CELL_SIZE) / 2.0;
        assert_eq!(screen_to_world(BOARD_OFFSET, BOARD_OFFSET), top_left);
    }

    #[test]
    fn test_text_sizes() {
        assert_eq!(60.0, TITLE_FONT_SIZE);
        assert_eq!(40.0, TEXT_FONT_SIZE);
    }
}
