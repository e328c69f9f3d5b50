//! world‑generation: gapped ground strips & the decoration laid over them
use bevy::log::debug;
use bevy::prelude::Vec2;
use rand::Rng;

use crate::components::{Decoration, DecorationKind, Platform};
use crate::constants::*;

/// freshly generated slice of world, appended by the caller
#[derive(Clone, Debug, Default)]
pub struct Strip {
    pub platforms: Vec<Platform>,
    pub decorations: Vec<Decoration>,
    pub rightmost: f32,
}

/// Lays ground left‑to‑right from a cursor. The only state carried between
/// calls is whether the last piece laid was a gap, so two gaps never touch.
#[derive(Clone, Debug)]
pub struct WorldGenerator {
    screen_width: f32,
    ends_in_gap: bool,
}

impl WorldGenerator {
    pub fn new(screen_width: f32) -> Self {
        Self { screen_width, ends_in_gap: false }
    }

    /// fresh world covering `[0, world_width)`, solid under the spawn point
    pub fn generate_initial(&mut self, world_width: f32, rng: &mut impl Rng) -> Strip {
        self.ends_in_gap = false;
        let strip = self.lay(0.0, world_width, self.screen_width, rng);
        debug!(
            "generated initial world: {} platforms, {} decorations, right edge {:.0}",
            strip.platforms.len(),
            strip.decorations.len(),
            strip.rightmost
        );
        strip
    }

    /// rebuild terrain for a restored session; no gaps before `solid_until`
    pub fn regenerate(
        &mut self,
        origin: f32,
        until: f32,
        solid_until: f32,
        rng: &mut impl Rng,
    ) -> Strip {
        self.ends_in_gap = false;
        self.lay(origin, until.max(origin), solid_until, rng)
    }

    /// append ground starting exactly at `current_rightmost`
    pub fn extend(&mut self, current_rightmost: f32, amount: f32, rng: &mut impl Rng) -> Strip {
        debug_assert!(amount > 0.0, "extend amount must be positive, got {amount}");
        let amount = amount.max(*SEGMENT_WIDTH.start());
        self.lay(current_rightmost, current_rightmost + amount, f32::MIN, rng)
    }

    fn lay(&mut self, start: f32, end: f32, solid_until: f32, rng: &mut impl Rng) -> Strip {
        let mut strip = Strip::default();
        let mut cursor = start;

        while cursor < end {
            let gap_allowed = !self.ends_in_gap && cursor >= solid_until;
            if gap_allowed && rng.gen_bool(GAP_CHANCE) {
                cursor += rng.gen_range(GAP_WIDTH);
                self.ends_in_gap = true;
                continue;
            }

            let platform = Platform::ground(cursor, rng.gen_range(SEGMENT_WIDTH));
            decorate(&platform, rng, &mut strip.decorations);
            strip.platforms.push(platform);
            cursor = platform.right();
            self.ends_in_gap = false;
        }

        strip.rightmost = cursor;
        strip
    }
}

/* ---------- decoration ---------- */

/// walk the top of one segment in small random steps, one draw per step
fn decorate(platform: &Platform, rng: &mut impl Rng, out: &mut Vec<Decoration>) {
    let mut x = platform.left();
    while x < platform.right() {
        let roll: f64 = rng.gen();
        let picked = if roll < TREE_CHANCE {
            Some((DecorationKind::Tree, TREE_WIDTH, rng.gen_range(TREE_HEIGHT)))
        } else if roll < TREE_CHANCE + BUSH_CHANCE {
            Some((DecorationKind::Bush, BUSH_WIDTH, rng.gen_range(BUSH_HEIGHT)))
        } else if roll < TREE_CHANCE + BUSH_CHANCE + GRASS_CHANCE {
            Some((DecorationKind::Grass, GRASS_WIDTH, rng.gen_range(GRASS_HEIGHT)))
        } else {
            None
        };

        if let Some((kind, width, height)) = picked {
            out.push(Decoration {
                kind,
                pos: Vec2::new(x, platform.top() - height),
                size: Vec2::new(width, height),
            });
        }
        x += rng.gen_range(DECOR_STEP);
    }
}

/* ---------- lookups ---------- */

/// first platform whose right edge lies beyond `x` (the one under `x`, or
/// the next one across a gap)
pub fn platform_at_or_after(platforms: &[Platform], x: f32) -> Option<&Platform> {
    platforms.iter().find(|p| p.spans(x) || p.left() > x)
}
