//! minimal bootstrap for the side‑scrolling forest explorer
//!
//! The simulation lives in plain structs (`game`, `world`, …) and steps on
//! `FixedUpdate`; bevy only gathers input, draws and shows the menu.
//! Works with **Bevy 0.15**.

mod camera;
mod catalog;
mod components;
mod constants;
mod game;
mod items;
mod player;
mod render;
mod save;
mod state;
mod terrain;
mod ui;
mod visibility;
mod world;

use bevy::diagnostic::{
    EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin,
    LogDiagnosticsPlugin,
};
use bevy::prelude::*;
use bevy::window::WindowMode;

use constants::{SCREEN_HEIGHT, SCREEN_WIDTH, TICK_HZ};
use game::{setup_game, simulation_tick_system, GameConfig};
use player::{player_input_system, PendingInput};
use render::{draw_world_system, hide_world_system, LastFrame, Palette, SpritePool};
use state::{command_input_system, AppState};
use ui::UiPlugin;

/* ------------------------------------------------------------------------ */
/* camera                                                                   */
/* ------------------------------------------------------------------------ */
fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/* ------------------------------------------------------------------------ */
/* main                                                                     */
/* ------------------------------------------------------------------------ */
fn main() {
    App::new()
        /* diagnostics ----------------------------------------------------- */
        .add_plugins((
            LogDiagnosticsPlugin::default(),
            FrameTimeDiagnosticsPlugin::default(),
            EntityCountDiagnosticsPlugin::default(),
        ))

        /* bevy core ------------------------------------------------------- */
        .insert_resource(ClearColor(Color::srgb_u8(135, 206, 235)))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Pixel Forest Explorer".into(),
                resolution: (SCREEN_WIDTH, SCREEN_HEIGHT).into(),
                resizable: false,
                mode: WindowMode::Windowed,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(Time::<Fixed>::from_hz(TICK_HZ))
        .init_state::<AppState>()

        /* game resources -------------------------------------------------- */
        .insert_resource(GameConfig::from_env())
        .init_resource::<PendingInput>()
        .init_resource::<SpritePool>()
        .init_resource::<Palette>()
        .init_resource::<LastFrame>()
        .add_plugins(UiPlugin)

        /* startup systems ------------------------------------------------- */
        .add_systems(Startup, (setup_game, setup_camera))

        /* frame‑update systems ------------------------------------------- */
        .add_systems(
            Update,
            (
                command_input_system, // menu 1/2/3, ESC save‑and‑exit
                player_input_system.run_if(in_state(AppState::Playing)),
                draw_world_system.run_if(in_state(AppState::Playing)),
            )
                .chain(),
        )
        .add_systems(OnEnter(AppState::Menu), hide_world_system)

        /* fixed‑rate simulation ------------------------------------------- */
        .add_systems(
            FixedUpdate,
            simulation_tick_system.run_if(in_state(AppState::Playing)),
        )
        .run();
}
