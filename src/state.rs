//! bevy state mirror of the game mode, plus the menu / save‑and‑exit keys

use bevy::input::ButtonInput;
use bevy::prelude::*;

use crate::game::{unix_now, Command, Game, Mode};

#[derive(States, Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
pub enum AppState {
    #[default]
    Menu,
    Playing,
}

impl From<Mode> for AppState {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Menu => AppState::Menu,
            Mode::Playing => AppState::Playing,
        }
    }
}

/// map this frame's key presses to a discrete command for the current state
pub fn command_for(keys: &ButtonInput<KeyCode>, state: AppState) -> Option<Command> {
    match state {
        AppState::Menu => {
            if keys.any_just_pressed([KeyCode::Digit1, KeyCode::Numpad1]) {
                Some(Command::NewGame)
            } else if keys.any_just_pressed([KeyCode::Digit2, KeyCode::Numpad2]) {
                Some(Command::Continue)
            } else if keys.any_just_pressed([KeyCode::Digit3, KeyCode::Numpad3]) {
                Some(Command::Quit)
            } else {
                None
            }
        }
        AppState::Playing => keys
            .just_pressed(KeyCode::Escape)
            .then_some(Command::SaveAndExit),
    }
}

pub fn command_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<State<AppState>>,
    mut next_state: ResMut<NextState<AppState>>,
    mut game: ResMut<Game>,
    mut exit: EventWriter<AppExit>,
) {
    let Some(command) = command_for(&keys, *state.get()) else { return };

    game.handle(command, unix_now(), &mut rand::thread_rng());
    if !game.running() {
        exit.send(AppExit::Success);
        return;
    }
    let target = AppState::from(game.mode());
    if target != *state.get() {
        next_state.set(target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_keys_map_to_commands() {
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::Digit2);
        assert_eq!(command_for(&keys, AppState::Menu), Some(Command::Continue));
        assert_eq!(command_for(&keys, AppState::Playing), None);
    }

    #[test]
    fn escape_only_counts_while_playing() {
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::Escape);
        assert_eq!(command_for(&keys, AppState::Playing), Some(Command::SaveAndExit));
        assert_eq!(command_for(&keys, AppState::Menu), None);
    }

    #[test]
    fn mode_maps_onto_state() {
        assert_eq!(AppState::from(Mode::Menu), AppState::Menu);
        assert_eq!(AppState::from(Mode::Playing), AppState::Playing);
    }
}
