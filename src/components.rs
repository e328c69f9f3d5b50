use bevy::math::{Rect, Vec2};

use crate::catalog::ItemKind;
use crate::constants::*;

/// axis-aligned box from a top-left corner and a size
#[inline]
pub fn aabb(pos: Vec2, size: Vec2) -> Rect {
    Rect::from_corners(pos, pos + size)
}

/// strict overlap, touching edges do not count
#[inline]
pub fn overlaps(a: Rect, b: Rect) -> bool {
    !a.intersect(b).is_empty()
}

/* ===========================================================
   player
   =========================================================== */
/// `pos.x` is world-space, `pos.y` is screen-space (the view never scrolls
/// vertically).
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel_y: f32,
    pub jumping: bool,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            vel_y: 0.0,
            jumping: false,
        }
    }

    pub fn bounds(&self) -> Rect {
        aabb(self.pos, self.size)
    }
}

/* ===========================================================
   terrain
   =========================================================== */
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Platform {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Platform {
    pub fn ground(x: f32, width: f32) -> Self {
        Self {
            pos: Vec2::new(x, GROUND_Y),
            size: Vec2::new(width, PLATFORM_HEIGHT),
        }
    }

    pub fn bounds(&self) -> Rect {
        aabb(self.pos, self.size)
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn spans(&self, x: f32) -> bool {
        x >= self.left() && x < self.right()
    }
}

/* ===========================================================
   decoration (never mutated after generation)
   =========================================================== */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DecorationKind {
    Tree,
    Bush,
    Grass,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decoration {
    pub kind: DecorationKind,
    pub pos: Vec2,
    pub size: Vec2,
}

/* ===========================================================
   collectibles
   =========================================================== */
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub kind: ItemKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// absolute seconds since the unix epoch
    pub spawn_time: f64,
    pub blink_timer: f32,
    pub blink_visible: bool,
}

impl Item {
    pub fn new(kind: ItemKind, pos: Vec2, spawn_time: f64) -> Self {
        Self {
            kind,
            pos,
            size: Vec2::splat(ITEM_SIZE),
            spawn_time,
            blink_timer: 0.0,
            blink_visible: true,
        }
    }

    pub fn age(&self, now: f64) -> f64 {
        now - self.spawn_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_boxes_do_not_overlap() {
        let a = aabb(Vec2::ZERO, Vec2::splat(10.0));
        let b = aabb(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        assert!(!overlaps(a, b));
        let c = aabb(Vec2::new(9.5, 9.5), Vec2::splat(10.0));
        assert!(overlaps(a, c));
    }

    #[test]
    fn platform_span_is_half_open() {
        let p = Platform::ground(100.0, 50.0);
        assert!(p.spans(100.0));
        assert!(p.spans(149.9));
        assert!(!p.spans(150.0));
        assert_eq!(p.top(), GROUND_Y);
    }
}
