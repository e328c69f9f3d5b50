//! per‑frame read‑only view of the world, culled to the screen

use bevy::math::Vec2;

use crate::camera::project_to_screen;
use crate::catalog::ItemKind;
use crate::components::DecorationKind;
use crate::constants::VISIBILITY_MARGIN;
use crate::world::WorldState;

#[derive(Clone, Debug, PartialEq)]
pub struct PlayerView {
    pub world_pos: Vec2,
    /// fixed column at half the screen width
    pub screen_pos: Vec2,
    pub size: Vec2,
    pub airborne: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenRect {
    pub pos: Vec2,
    pub size: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecorationView {
    pub kind: DecorationKind,
    pub world_x: f32,
    pub rect: ScreenRect,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemView {
    pub kind: ItemKind,
    pub rect: ScreenRect,
    pub visible: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderSnapshot {
    pub player: PlayerView,
    pub platforms: Vec<ScreenRect>,
    pub decorations: Vec<DecorationView>,
    pub items: Vec<ItemView>,
    pub score: u32,
}

/// anchor x strictly inside the padded screen band
#[inline]
fn anchor_visible(screen_x: f32, screen_width: f32) -> bool {
    -VISIBILITY_MARGIN < screen_x && screen_x < screen_width + VISIBILITY_MARGIN
}

/// any part of `[x, x+w)` inside the padded screen band
#[inline]
fn span_visible(screen_x: f32, width: f32, screen_width: f32) -> bool {
    screen_x + width > -VISIBILITY_MARGIN && screen_x < screen_width + VISIBILITY_MARGIN
}

impl RenderSnapshot {
    pub fn capture(world: &WorldState) -> Self {
        let cam = world.camera_offset_x;
        let sw = world.config().screen_width;
        let player = &world.player;

        let platforms = world
            .platforms
            .iter()
            .map(|p| ScreenRect { pos: project_to_screen(p.pos, cam), size: p.size })
            .filter(|r| span_visible(r.pos.x, r.size.x, sw))
            .collect();

        let decorations = world
            .decorations
            .iter()
            .map(|d| DecorationView {
                kind: d.kind,
                world_x: d.pos.x,
                rect: ScreenRect { pos: project_to_screen(d.pos, cam), size: d.size },
            })
            .filter(|d| anchor_visible(d.rect.pos.x, sw))
            .collect();

        let items = world
            .items
            .iter()
            .map(|i| ItemView {
                kind: i.kind,
                rect: ScreenRect { pos: project_to_screen(i.pos, cam), size: i.size },
                visible: i.blink_visible,
            })
            .filter(|i| anchor_visible(i.rect.pos.x, sw))
            .collect();

        Self {
            player: PlayerView {
                world_pos: player.pos,
                screen_pos: Vec2::new(sw / 2.0, player.pos.y),
                size: player.size,
                airborne: player.jumping,
            },
            platforms,
            decorations,
            items,
            score: world.score,
        }
    }
}
