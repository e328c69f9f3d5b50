//! Title menu and score HUD. Both are plain UI nodes spawned on state entry
//! and torn down on exit.

use bevy::prelude::*;

use crate::game::Game;
use crate::render::LastFrame;
use crate::state::AppState;

/// Registers menu overlay and HUD spawn/despawn systems.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::Menu), spawn_menu)
            .add_systems(OnExit(AppState::Menu), despawn_with::<MainMenu>)
            .add_systems(OnEnter(AppState::Playing), spawn_hud)
            .add_systems(OnExit(AppState::Playing), despawn_with::<ScoreText>)
            .add_systems(
                Update,
                update_score_text.run_if(in_state(AppState::Playing)),
            );
    }
}

#[derive(Component)]
struct MainMenu;

#[derive(Component)]
struct ScoreText;

const MENU_LINES: [&str; 3] = ["1. NEW GAME", "2. CONTINUE", "3. EXIT"];
const HELP: &str = "ARROWS / A D TO MOVE    SPACE TO JUMP    ESC TO SAVE AND EXIT";

#[inline]
pub fn score_label(score: u32) -> String {
    format!("SCORE: {score}")
}

fn spawn_menu(mut commands: Commands) {
    commands
        .spawn((
            MainMenu,
            Name::new("MainMenu"),
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                row_gap: Val::Px(16.0),
                ..default()
            },
            BackgroundColor(Color::BLACK),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("PIXEL FOREST EXPLORER"),
                TextFont { font_size: 48.0, ..default() },
                TextColor(Color::WHITE),
                Node { margin: UiRect::bottom(Val::Px(40.0)), ..default() },
            ));
            for line in MENU_LINES {
                parent.spawn((
                    Text::new(line),
                    TextFont { font_size: 32.0, ..default() },
                    TextColor(Color::WHITE),
                ));
            }
            parent.spawn((
                Text::new(HELP),
                TextFont { font_size: 16.0, ..default() },
                TextColor(Color::srgb(0.6, 0.6, 0.6)),
                Node { margin: UiRect::top(Val::Px(40.0)), ..default() },
            ));
        });
}

fn spawn_hud(mut commands: Commands, game: Res<Game>) {
    commands.spawn((
        ScoreText,
        Name::new("ScoreText"),
        Text::new(score_label(game.world().score)),
        TextFont { font_size: 24.0, ..default() },
        TextColor(Color::BLACK),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
    ));
}

fn update_score_text(frame: Res<LastFrame>, mut q: Query<&mut Text, With<ScoreText>>) {
    let Some(snapshot) = &frame.0 else { return };
    let label = score_label(snapshot.score);
    for mut text in &mut q {
        if text.0 != label {
            text.0 = label.clone();
        }
    }
}

fn despawn_with<T: Component>(mut commands: Commands, query: Query<Entity, With<T>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}
