use std::ops::RangeInclusive;

/// -------- screen --------
pub const SCREEN_WIDTH: f32  = 800.0;
pub const SCREEN_HEIGHT: f32 = 600.0;
pub const TICK_HZ: f64       = 60.0;
pub const FRAME_SECS: f32    = 1.0 / 60.0;

/// -------- ground --------
pub const GROUND_Y: f32        = SCREEN_HEIGHT - 40.0;
pub const PLATFORM_HEIGHT: f32 = 40.0;

/// -------- player phys (units / frame) --------
pub const PLAYER_WIDTH: f32  = 20.0;
pub const PLAYER_HEIGHT: f32 = 30.0;
pub const GRAVITY: f32       = 0.5;
pub const JUMP_IMPULSE: f32  = -10.0;
pub const WALK_SPEED: f32    = 5.0;
pub const SPAWN_DROP: f32    = 100.0; // spawn this far above the ground

/// -------- camera --------
pub const SCROLL_RIGHT_FRAC: f32 = 0.6;
pub const SCROLL_LEFT_FRAC: f32  = 0.4;
pub const VISIBILITY_MARGIN: f32 = 50.0;

/// -------- world generation --------
pub const INITIAL_SCREENS: f32  = 3.0;
pub const EXTEND_AMOUNT: f32    = 1000.0;
pub const GAP_CHANCE: f64       = 0.10;
pub const GAP_WIDTH: RangeInclusive<f32>     = 15.0..=30.0;
pub const SEGMENT_WIDTH: RangeInclusive<f32> = 50.0..=200.0;
pub const DECOR_STEP: RangeInclusive<f32>    = 5.0..=20.0;

/// decoration odds, cumulative over one draw
pub const TREE_CHANCE: f64  = 0.05;
pub const BUSH_CHANCE: f64  = 0.15;
pub const GRASS_CHANCE: f64 = 0.70;

pub const TREE_WIDTH: f32  = 30.0;
pub const BUSH_WIDTH: f32  = 25.0;
pub const GRASS_WIDTH: f32 = 3.0;
pub const TREE_HEIGHT: RangeInclusive<f32>  = 60.0..=90.0;
pub const BUSH_HEIGHT: RangeInclusive<f32>  = 3.0..=9.0;
pub const GRASS_HEIGHT: RangeInclusive<f32> = 1.0..=2.0;

/// -------- items (seconds) --------
pub const ITEM_SIZE: f32            = 15.0;
pub const ITEM_LIFETIME: f64        = 15.0;
pub const ITEM_WARNING: f64         = 3.0;
pub const BLINK_INTERVAL: f32       = 0.2;
pub const SPAWN_INTERVAL: f64       = 2.0;
pub const SPAWN_CHANCE: f64         = 0.3;
pub const ITEM_GROUND_OFFSET: f32   = 30.0;
pub const ITEM_STRAGGLER_MARGIN: f32 = 50.0;

/// -------- persistence --------
pub const SAVE_FILE: &str    = "savegame.json";
pub const SAVE_ENV_VAR: &str = "PIXEL_FOREST_SAVE";

/// -------- colour‑variation --------
pub const COLOR_NOISE_SCALE: f64        = 0.05;
pub const COLOR_VARIATION_LEVELS: i32   = 4;
pub const COLOR_VARIATION_STRENGTH: f32 = 0.2;
