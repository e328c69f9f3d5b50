use bevy::math::Vec2;

use crate::components::Player;
use crate::constants::{SCROLL_LEFT_FRAC, SCROLL_RIGHT_FRAC};

/// world → screen; only x scrolls
#[inline]
pub fn project_to_screen(world: Vec2, camera_offset_x: f32) -> Vec2 {
    Vec2::new(world.x - camera_offset_x, world.y)
}

/// Horizontal dead‑zone follow.
///
/// The player may roam between 40 % and 60 % of the screen width. Past the
/// right edge of that band the camera advances to hold them at 60 %; past the
/// left edge it retreats to hold them at 40 %, but never below offset 0. Once
/// the camera rests at 0 the player is pinned to the 40 % line so they cannot
/// drift off the world's left edge.
///
/// Returns `true` if the camera moved.
pub fn follow(camera_offset_x: &mut f32, player: &mut Player, screen_width: f32) -> bool {
    let before = *camera_offset_x;
    let right_line = SCROLL_RIGHT_FRAC * screen_width;
    let left_line = SCROLL_LEFT_FRAC * screen_width;

    let on_screen = player.pos.x - *camera_offset_x;
    if on_screen > right_line {
        *camera_offset_x = player.pos.x - right_line;
    } else if on_screen < left_line && *camera_offset_x > 0.0 {
        *camera_offset_x = (player.pos.x - left_line).max(0.0);
    }

    if *camera_offset_x <= 0.0 {
        *camera_offset_x = 0.0;
        if player.pos.x < left_line {
            player.pos.x = left_line;
        }
    }

    *camera_offset_x != before
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SCREEN_WIDTH;

    fn player_at(x: f32) -> Player {
        Player::new(Vec2::new(x, 0.0))
    }

    #[test]
    fn projection_only_shifts_x() {
        let s = project_to_screen(Vec2::new(1200.0, 42.0), 1000.0);
        assert_eq!(s, Vec2::new(200.0, 42.0));
    }

    #[test]
    fn advances_to_hold_player_at_sixty_percent() {
        let mut cam = 0.0;
        let mut p = player_at(500.0);
        assert!(follow(&mut cam, &mut p, SCREEN_WIDTH));
        assert_eq!(cam, 500.0 - 0.6 * SCREEN_WIDTH);
        assert_eq!(p.pos.x - cam, 0.6 * SCREEN_WIDTH);
    }

    #[test]
    fn dead_zone_holds_camera() {
        let mut cam = 100.0;
        let mut p = player_at(100.0 + 0.5 * SCREEN_WIDTH);
        assert!(!follow(&mut cam, &mut p, SCREEN_WIDTH));
        assert_eq!(cam, 100.0);
    }

    #[test]
    fn retreats_to_hold_player_at_forty_percent() {
        let mut cam = 1000.0;
        let mut p = player_at(1000.0 + 0.3 * SCREEN_WIDTH);
        follow(&mut cam, &mut p, SCREEN_WIDTH);
        assert_eq!(p.pos.x - cam, 0.4 * SCREEN_WIDTH);
    }

    #[test]
    fn retreat_clamps_at_zero_and_pins_player() {
        let mut cam = 10.0;
        let mut p = player_at(300.0);
        follow(&mut cam, &mut p, SCREEN_WIDTH);
        assert_eq!(cam, 0.0);
        assert_eq!(p.pos.x, 0.4 * SCREEN_WIDTH);
    }

    #[test]
    fn resting_camera_pins_player_at_left_line() {
        let mut cam = 0.0;
        let mut p = player_at(315.0);
        follow(&mut cam, &mut p, SCREEN_WIDTH);
        assert_eq!(cam, 0.0);
        assert_eq!(p.pos.x, 0.4 * SCREEN_WIDTH);
    }
}
