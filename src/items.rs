//! collectible spawn timing, expiry blink & pickup
use bevy::log::debug;
use bevy::math::{Rect, Vec2};
use rand::Rng;

use crate::camera::project_to_screen;
use crate::catalog::ItemCatalog;
use crate::components::{aabb, overlaps, Item};
use crate::constants::*;

/// where an item is in its life after this tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemPhase {
    Fresh,
    Warning,
    Expired,
}

/// Every `SPAWN_INTERVAL` seconds roll for a new item somewhere between the
/// middle of the screen and just past its right edge. The timer resets on
/// every roll, hit or miss.
pub fn maybe_spawn(
    now: f64,
    last_spawn: &mut f64,
    camera_offset_x: f32,
    screen_width: f32,
    catalog: &ItemCatalog,
    rng: &mut impl Rng,
) -> Option<Item> {
    if now - *last_spawn <= SPAWN_INTERVAL {
        return None;
    }
    *last_spawn = now;

    if !rng.gen_bool(SPAWN_CHANCE) {
        return None;
    }

    let kind = catalog.sample(rng);
    let x = camera_offset_x + rng.gen_range(screen_width / 2.0..=screen_width + 200.0);
    let item = Item::new(kind, Vec2::new(x, GROUND_Y - ITEM_GROUND_OFFSET), now);
    debug!("spawned {} at x={:.0}", kind, x);
    Some(item)
}

/// Age the item by one tick. In the last `ITEM_WARNING` seconds visibility
/// flips every `BLINK_INTERVAL` of accumulated frame time.
pub fn tick_item(item: &mut Item, now: f64) -> ItemPhase {
    let age = item.age(now);
    if age > ITEM_LIFETIME {
        return ItemPhase::Expired;
    }
    if age > ITEM_LIFETIME - ITEM_WARNING {
        item.blink_timer += FRAME_SECS;
        if item.blink_timer > BLINK_INTERVAL {
            item.blink_visible = !item.blink_visible;
            item.blink_timer = 0.0;
        }
        return ItemPhase::Warning;
    }
    item.blink_visible = true;
    ItemPhase::Fresh
}

/// player's box as drawn: fixed screen x, live y
pub fn player_screen_rect(player_y: f32, player_size: Vec2, screen_width: f32) -> Rect {
    aabb(Vec2::new(screen_width / 2.0, player_y), player_size)
}

/// overlap test in screen space
pub fn check_pickup(player_screen: Rect, item: &Item, camera_offset_x: f32) -> bool {
    let item_screen = aabb(project_to_screen(item.pos, camera_offset_x), item.size);
    overlaps(player_screen, item_screen)
}

/// unreachable once it has slid left of the world start
pub fn is_straggler(item: &Item, world_start_x: f32) -> bool {
    item.pos.x < world_start_x - ITEM_STRAGGLER_MARGIN
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ItemKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const NOW: f64 = 1_700_000_000.0;

    fn item_aged(secs: f64) -> Item {
        Item::new(ItemKind::ClayPot, Vec2::new(0.0, 0.0), NOW - secs)
    }

    #[test]
    fn old_item_expires() {
        let mut item = item_aged(16.0);
        assert_eq!(tick_item(&mut item, NOW), ItemPhase::Expired);
    }

    #[test]
    fn young_item_is_steady() {
        let mut item = item_aged(1.0);
        for _ in 0..60 {
            assert_eq!(tick_item(&mut item, NOW), ItemPhase::Fresh);
            assert!(item.blink_visible);
        }
    }

    #[test]
    fn warning_window_blinks() {
        let mut item = item_aged(13.0);
        let mut flips = 0;
        let mut last = item.blink_visible;
        for _ in 0..60 {
            assert_eq!(tick_item(&mut item, NOW), ItemPhase::Warning);
            if item.blink_visible != last {
                flips += 1;
                last = item.blink_visible;
            }
        }
        // one second of frames toggles roughly every 0.2s
        assert!((4..=5).contains(&flips), "flips = {flips}");
    }

    #[test]
    fn spawn_waits_for_interval() {
        let catalog = ItemCatalog::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut last = NOW;
        for step in 0..20 {
            let now = NOW + step as f64 * 0.1;
            assert!(maybe_spawn(now, &mut last, 0.0, SCREEN_WIDTH, &catalog, &mut rng).is_none());
        }
        assert_eq!(last, NOW);
    }

    #[test]
    fn spawn_roll_resets_timer_and_lands_ahead_of_camera() {
        let catalog = ItemCatalog::default();
        let mut rng = StdRng::seed_from_u64(9);
        let camera = 3000.0;
        let mut last = NOW;
        let mut spawned = 0;
        for i in 1..=200 {
            let now = NOW + i as f64 * 2.5;
            if let Some(item) = maybe_spawn(now, &mut last, camera, SCREEN_WIDTH, &catalog, &mut rng) {
                spawned += 1;
                assert!(item.pos.x >= camera + SCREEN_WIDTH / 2.0);
                assert!(item.pos.x <= camera + SCREEN_WIDTH + 200.0);
                assert_eq!(item.pos.y, GROUND_Y - ITEM_GROUND_OFFSET);
                assert_eq!(item.spawn_time, now);
            }
            assert_eq!(last, now);
        }
        // 30 % of 200 rolls
        assert!((30..=90).contains(&spawned), "spawned = {spawned}");
    }

    #[test]
    fn pickup_uses_fixed_player_column() {
        let player = player_screen_rect(GROUND_Y - PLAYER_HEIGHT, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT), SCREEN_WIDTH);
        let camera = 1000.0;
        let under = Item::new(
            ItemKind::GoldCoin,
            Vec2::new(camera + SCREEN_WIDTH / 2.0 + 5.0, GROUND_Y - ITEM_GROUND_OFFSET),
            NOW,
        );
        let far = Item::new(
            ItemKind::GoldCoin,
            Vec2::new(camera + 100.0, GROUND_Y - ITEM_GROUND_OFFSET),
            NOW,
        );
        assert!(check_pickup(player, &under, camera));
        assert!(!check_pickup(player, &far, camera));
    }

    #[test]
    fn stragglers_are_left_of_margin() {
        let item = Item::new(ItemKind::ClayBowl, Vec2::new(940.0, 0.0), NOW);
        assert!(is_straggler(&item, 1000.0));
        assert!(!is_straggler(&item, 980.0));
    }
}
