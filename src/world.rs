//! the simulated world: owns every entity collection and runs one tick

use bevy::log::{debug, info};
use bevy::math::Vec2;
use rand::Rng;

use crate::camera;
use crate::catalog::{ItemCatalog, ItemKind};
use crate::components::{Decoration, Item, Platform, Player};
use crate::constants::*;
use crate::items::{self, ItemPhase};
use crate::player::{self, PlayerInput};
use crate::terrain::{platform_at_or_after, Strip, WorldGenerator};

/// dimensions the simulation is built around
#[derive(Clone, Debug, PartialEq)]
pub struct WorldConfig {
    pub screen_width: f32,
    pub screen_height: f32,
    pub initial_world_width: f32,
    pub extend_amount: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            initial_world_width: INITIAL_SCREENS * SCREEN_WIDTH,
            extend_amount: EXTEND_AMOUNT,
        }
    }
}

/// the persisted subset of a session, already validated
#[derive(Clone, Debug, PartialEq)]
pub struct Resume {
    pub score: u32,
    pub camera_offset_x: f32,
    pub player_pos: Vec2,
    pub world_start_x: f32,
    pub items: Vec<Item>,
}

/// what happened during one tick
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub extended: bool,
    pub fell: bool,
    pub collected: Vec<ItemKind>,
    pub expired: usize,
}

pub struct WorldState {
    config: WorldConfig,
    catalog: ItemCatalog,
    generator: WorldGenerator,

    pub player: Player,
    pub platforms: Vec<Platform>,
    pub decorations: Vec<Decoration>,
    pub items: Vec<Item>,

    /// rightmost generated x
    pub world_width: f32,
    /// leftmost x the player may occupy; only ever grows
    pub world_start_x: f32,
    pub camera_offset_x: f32,
    pub score: u32,
    pub last_item_spawn: f64,
}

impl WorldState {
    /// a freshly generated world, ready for a new game
    pub fn new(config: WorldConfig, catalog: ItemCatalog, now: f64, rng: &mut impl Rng) -> Self {
        let generator = WorldGenerator::new(config.screen_width);
        let mut world = Self {
            player: Player::new(Vec2::ZERO),
            platforms: Vec::new(),
            decorations: Vec::new(),
            items: Vec::new(),
            world_width: 0.0,
            world_start_x: 0.0,
            camera_offset_x: 0.0,
            score: 0,
            last_item_spawn: now,
            config,
            catalog,
            generator,
        };
        world.reset(now, rng);
        world
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    pub fn spawn_point(&self) -> Vec2 {
        Vec2::new(self.config.screen_width / 2.0, GROUND_Y - SPAWN_DROP)
    }

    /// "new game": wipe progress and regenerate from x = 0
    pub fn reset(&mut self, now: f64, rng: &mut impl Rng) {
        self.player = Player::new(self.spawn_point());
        self.items.clear();
        self.score = 0;
        self.world_start_x = 0.0;
        self.camera_offset_x = 0.0;
        self.last_item_spawn = now;

        let strip = self.generator.generate_initial(self.config.initial_world_width, rng);
        self.install(strip);
    }

    /// "continue": adopt persisted progress and rebuild terrain around it
    pub fn restore(&mut self, resume: Resume, now: f64, rng: &mut impl Rng) {
        let sw = self.config.screen_width;
        self.score = resume.score;
        self.camera_offset_x = resume.camera_offset_x.max(0.0);
        self.world_start_x = resume.world_start_x.max(0.0);
        self.player = Player::new(resume.player_pos);
        self.player.pos.x = self.player.pos.x.max(self.world_start_x);
        self.items = resume.items;
        self.last_item_spawn = now;

        // a partial save may put the player far from the saved camera
        camera::follow(&mut self.camera_offset_x, &mut self.player, sw);
        self.world_start_x = self.world_start_x.max(self.camera_offset_x - sw);
        self.player.pos.x = self.player.pos.x.max(self.world_start_x);

        let origin = (self.world_start_x - sw).max(0.0);
        let until = self.camera_offset_x.max(self.player.pos.x) + INITIAL_SCREENS * sw;
        let solid_until = self.player.pos.x + sw / 2.0;
        let strip = self.generator.regenerate(origin, until, solid_until, rng);
        self.install(strip);
    }

    fn install(&mut self, strip: Strip) {
        self.platforms = strip.platforms;
        self.decorations = strip.decorations;
        self.world_width = strip.rightmost;
    }

    /* ---------- one simulation step ---------- */

    pub fn tick(&mut self, input: PlayerInput, now: f64, rng: &mut impl Rng) -> TickReport {
        let mut report = TickReport::default();
        let sw = self.config.screen_width;

        /* physics ---------------------------------------------------------- */
        player::step(&mut self.player, input, &self.platforms);

        /* camera & left bound ---------------------------------------------- */
        camera::follow(&mut self.camera_offset_x, &mut self.player, sw);
        self.world_start_x = self.world_start_x.max(self.camera_offset_x - sw);
        if self.player.pos.x < self.world_start_x {
            self.player.pos.x = self.world_start_x;
        }

        if self.player.pos.y > self.config.screen_height {
            self.recover_from_fall();
            report.fell = true;
        }

        /* generation ------------------------------------------------------- */
        while self.needs_extension() {
            self.extend(rng);
            report.extended = true;
        }

        /* items ------------------------------------------------------------ */
        if let Some(item) = items::maybe_spawn(
            now,
            &mut self.last_item_spawn,
            self.camera_offset_x,
            sw,
            &self.catalog,
            rng,
        ) {
            self.items.push(item);
        }
        self.update_items(now, &mut report);

        /* cleanup ---------------------------------------------------------- */
        self.prune_behind();
        report
    }

    /// keeps at least one screen of unseen ground ahead of the camera
    pub fn needs_extension(&self) -> bool {
        self.camera_offset_x > self.world_width - 2.0 * self.config.screen_width
    }

    fn extend(&mut self, rng: &mut impl Rng) {
        let before = self.world_width;
        let strip = self.generator.extend(before, self.config.extend_amount, rng);
        self.platforms.extend(strip.platforms);
        self.decorations.extend(strip.decorations);
        self.world_width = self.world_width.max(strip.rightmost);
        debug!("extended world {:.0} → {:.0}", before, self.world_width);
    }

    fn recover_from_fall(&mut self) {
        let x = self.player.pos.x;
        let (x, ground) = match platform_at_or_after(&self.platforms, x) {
            Some(p) => (x.max(p.left()), p.top()),
            None => (x, GROUND_Y),
        };
        info!("player fell at x={:.0}, respawning at x={:.0}", self.player.pos.x, x);
        self.player = Player::new(Vec2::new(x, ground - SPAWN_DROP));
    }

    fn update_items(&mut self, now: f64, report: &mut TickReport) {
        let player_rect =
            items::player_screen_rect(self.player.pos.y, self.player.size, self.config.screen_width);
        let camera_offset_x = self.camera_offset_x;
        let world_start_x = self.world_start_x;
        let catalog = &self.catalog;
        let score = &mut self.score;

        self.items.retain_mut(|item| {
            if items::tick_item(item, now) == ItemPhase::Expired {
                report.expired += 1;
                return false;
            }
            if items::check_pickup(player_rect, item, camera_offset_x) {
                *score = score.saturating_add(catalog.points(item.kind));
                report.collected.push(item.kind);
                debug!("picked up {} (+{})", item.kind, catalog.points(item.kind));
                return false;
            }
            !items::is_straggler(item, world_start_x)
        });
    }

    /// drop terrain nothing can ever see again
    fn prune_behind(&mut self) {
        let cutoff = self.world_start_x - self.config.screen_width;
        if cutoff <= 0.0 {
            return;
        }
        self.platforms.retain(|p| p.right() >= cutoff);
        self.decorations.retain(|d| d.pos.x >= cutoff);
    }
}
