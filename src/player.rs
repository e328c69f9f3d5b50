//! player input latching, gravity integration & platform landing

use bevy::input::ButtonInput;
use bevy::prelude::*;

use crate::components::{overlaps, Platform, Player};
use crate::constants::*;

/// one tick's worth of intent, consumed by the simulation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerInput {
    pub move_left: bool,
    pub move_right: bool,
    pub jump_pressed: bool,
}

/// Written every frame in `Update`, drained by the fixed‑rate tick. A jump
/// press stays latched until a tick consumes it.
#[derive(Resource, Default)]
pub struct PendingInput(pub PlayerInput);

impl PendingInput {
    pub fn take(&mut self) -> PlayerInput {
        let out = self.0;
        self.0.jump_pressed = false;
        out
    }
}

/* ===========================================================
   input (arrows / A‑D, Space / Up)
   =========================================================== */
pub fn player_input_system(keys: Res<ButtonInput<KeyCode>>, mut pending: ResMut<PendingInput>) {
    pending.0.move_left = keys.any_pressed([KeyCode::ArrowLeft, KeyCode::KeyA]);
    pending.0.move_right = keys.any_pressed([KeyCode::ArrowRight, KeyCode::KeyD]);
    if keys.any_just_pressed([KeyCode::Space, KeyCode::ArrowUp]) {
        pending.0.jump_pressed = true;
    }
}

/* ===========================================================
   horizontal movement (no collision, clamped later by the world)
   =========================================================== */
pub fn move_left(player: &mut Player) {
    player.pos.x -= WALK_SPEED;
}

pub fn move_right(player: &mut Player) {
    player.pos.x += WALK_SPEED;
}

/// no‑op while airborne
pub fn jump(player: &mut Player) {
    if !player.jumping {
        player.vel_y = JUMP_IMPULSE;
        player.jumping = true;
    }
}

/* ===========================================================
   gravity & landing
   =========================================================== */
/// One frame of vertical motion. Only a falling player lands, so after the
/// first snap later platforms in the list are skipped.
pub fn integrate(player: &mut Player, platforms: &[Platform]) {
    player.vel_y += GRAVITY;
    player.pos.y += player.vel_y;

    for platform in platforms {
        if player.vel_y > 0.0 && overlaps(player.bounds(), platform.bounds()) {
            player.pos.y = platform.top() - player.size.y;
            player.vel_y = 0.0;
            player.jumping = false;
        }
    }
}

/// apply one tick of input in the fixed order: walk, jump, integrate
pub fn step(player: &mut Player, input: PlayerInput, platforms: &[Platform]) {
    if input.move_left {
        move_left(player);
    }
    if input.move_right {
        move_right(player);
    }
    if input.jump_pressed {
        jump(player);
    }
    integrate(player, platforms);
}
