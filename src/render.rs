//! draws the render snapshot with a pool of plain sprites
//!
//! The snapshot is in screen space (origin top‑left, y down); the 2‑D camera
//! sits at the origin, so every quad is re‑centred and flipped on the way out.

use bevy::prelude::*;
use noise::{NoiseFn, Perlin};
use rand::Rng;

use crate::catalog::ItemCatalog;
use crate::components::DecorationKind;
use crate::constants::*;
use crate::game::Game;
use crate::visibility::{RenderSnapshot, ScreenRect};

const DIRT: [u8; 3]  = [101, 67, 33];
const TURF: [u8; 3]  = [34, 139, 34];
const TRUNK: [u8; 3] = [139, 69, 19];
const LEAF: [u8; 3]  = [0, 100, 0];
const BUSH: [u8; 3]  = [0, 200, 0];
const GRASS: [u8; 3] = [50, 205, 50];
const SKIN: [u8; 3]  = [210, 180, 140];
const CLOTH: [u8; 3] = [100, 70, 50];
const HAT: [u8; 3]   = [50, 30, 20];

const TURF_DEPTH: f32 = 4.0;

/// sprites recycled frame to frame, index‑aligned with the quad list
#[derive(Resource, Default)]
pub struct SpritePool {
    sprites: Vec<Entity>,
}

#[derive(Component)]
pub struct PooledSprite;

/// the snapshot most recently drawn; the HUD reads the score from here
#[derive(Resource, Default)]
pub struct LastFrame(pub Option<RenderSnapshot>);

/// colour banding noise for decoration
#[derive(Resource)]
pub struct Palette {
    noise: Perlin,
}

impl Default for Palette {
    fn default() -> Self {
        Self { noise: Perlin::new(rand::thread_rng().gen()) }
    }
}

impl Palette {
    /// quantised brightness variation keyed on world position
    fn shade(&self, rgb: [u8; 3], world_x: f32, salt: f32) -> Color {
        let raw = self
            .noise
            .get([world_x as f64 * COLOR_NOISE_SCALE, salt as f64 * COLOR_NOISE_SCALE])
            as f32;

        let step = (((raw + 1.0) * 0.5) * COLOR_VARIATION_LEVELS as f32)
            .floor()
            .clamp(0.0, (COLOR_VARIATION_LEVELS - 1) as f32);
        let norm = step / (COLOR_VARIATION_LEVELS as f32 - 1.0) * 2.0 - 1.0;
        let factor = 1.0 + norm * COLOR_VARIATION_STRENGTH;

        let [r, g, b] = rgb.map(|c| (c as f32 / 255.0 * factor).clamp(0.0, 1.0));
        Color::srgb(r, g, b)
    }
}

#[inline]
fn flat(rgb: [u8; 3]) -> Color {
    Color::srgb_u8(rgb[0], rgb[1], rgb[2])
}

/// one filled rectangle in screen space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quad {
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Color,
    pub z: f32,
}

impl Quad {
    fn new(pos: Vec2, size: Vec2, color: Color, z: f32) -> Self {
        Self { pos, size, color, z }
    }
}

/// screen rect → bevy translation (centre, y up), snapped to whole pixels
#[inline]
pub fn to_bevy(pos: Vec2, size: Vec2, screen: Vec2) -> Vec2 {
    let centre = pos + size * 0.5;
    Vec2::new(centre.x - screen.x * 0.5, screen.y * 0.5 - centre.y).round()
}

/* ===========================================================
   snapshot → quads
   =========================================================== */
pub fn build_quads(snapshot: &RenderSnapshot, catalog: &ItemCatalog, palette: &Palette) -> Vec<Quad> {
    let mut quads = Vec::with_capacity(
        snapshot.platforms.len() * 2 + snapshot.decorations.len() * 2 + snapshot.items.len() + 5,
    );

    /* ground -------------------------------------------------------------- */
    for &ScreenRect { pos, size } in &snapshot.platforms {
        quads.push(Quad::new(pos, size, flat(DIRT), 0.0));
        quads.push(Quad::new(pos, Vec2::new(size.x, TURF_DEPTH), flat(TURF), 0.1));
    }

    /* decoration ---------------------------------------------------------- */
    for d in &snapshot.decorations {
        let ScreenRect { pos, size } = d.rect;
        match d.kind {
            DecorationKind::Tree => {
                let trunk_w = 6.0;
                quads.push(Quad::new(
                    Vec2::new(pos.x + (size.x - trunk_w) * 0.5, pos.y + size.y * 0.5),
                    Vec2::new(trunk_w, size.y * 0.5),
                    palette.shade(TRUNK, d.world_x, 1.0),
                    1.0,
                ));
                quads.push(Quad::new(
                    pos,
                    Vec2::new(size.x, size.y * 2.0 / 3.0),
                    palette.shade(LEAF, d.world_x, 2.0),
                    1.1,
                ));
            }
            DecorationKind::Bush => {
                quads.push(Quad::new(pos, size, palette.shade(BUSH, d.world_x, 3.0), 1.2));
            }
            DecorationKind::Grass => {
                quads.push(Quad::new(pos, size, palette.shade(GRASS, d.world_x, 4.0), 1.3));
            }
        }
    }

    /* items --------------------------------------------------------------- */
    for item in snapshot.items.iter().filter(|i| i.visible) {
        let color = flat(catalog.spec(item.kind).color);
        quads.push(Quad::new(item.rect.pos, item.rect.size, color, 2.0));
    }

    /* player -------------------------------------------------------------- */
    let p = &snapshot.player;
    let (x, y, w) = (p.screen_pos.x, p.screen_pos.y, p.size.x);
    quads.push(Quad::new(Vec2::new(x, y + 10.0), Vec2::new(w, 15.0), flat(CLOTH), 3.0));
    quads.push(Quad::new(Vec2::new(x + w * 0.5 - 6.0, y + 2.0), Vec2::new(12.0, 10.0), flat(SKIN), 3.1));
    quads.push(Quad::new(Vec2::new(x + w * 0.5 - 10.0, y), Vec2::new(20.0, 4.0), flat(HAT), 3.2));
    // two‑frame stride keyed on distance walked
    let stride = if p.airborne { 0.0 } else { ((p.world_pos.x / 10.0).floor() as i32).rem_euclid(2) as f32 * 2.0 };
    quads.push(Quad::new(Vec2::new(x + 3.0 + stride, y + 25.0), Vec2::new(5.0, 5.0), flat(CLOTH), 3.0));
    quads.push(Quad::new(Vec2::new(x + w - 8.0 - stride, y + 25.0), Vec2::new(5.0, 5.0), flat(CLOTH), 3.0));

    quads
}

/* ===========================================================
   draw_world_system – re‑dress pooled sprites every frame
   =========================================================== */
pub fn draw_world_system(
    mut commands: Commands,
    game: Res<Game>,
    palette: Res<Palette>,
    mut pool: ResMut<SpritePool>,
    mut last: ResMut<LastFrame>,
) {
    let world = game.world();
    let screen = Vec2::new(world.config().screen_width, world.config().screen_height);
    let snapshot = RenderSnapshot::capture(world);
    let quads = build_quads(&snapshot, world.catalog(), &palette);

    for (i, quad) in quads.iter().enumerate() {
        let sprite = Sprite {
            color: quad.color,
            custom_size: Some(quad.size),
            ..default()
        };
        let transform = Transform::from_translation(to_bevy(quad.pos, quad.size, screen).extend(quad.z));

        match pool.sprites.get(i).copied() {
            Some(e) => {
                commands.entity(e).insert((sprite, transform, Visibility::Visible));
            }
            None => {
                let e = commands.spawn((sprite, transform, PooledSprite)).id();
                pool.sprites.push(e);
            }
        }
    }

    for &e in pool.sprites.iter().skip(quads.len()) {
        commands.entity(e).insert(Visibility::Hidden);
    }
    last.0 = Some(snapshot);
}

/// park every pooled sprite while the menu is up
pub fn hide_world_system(mut commands: Commands, pool: Res<SpritePool>, mut last: ResMut<LastFrame>) {
    for &e in &pool.sprites {
        commands.entity(e).insert(Visibility::Hidden);
    }
    last.0 = None;
}
