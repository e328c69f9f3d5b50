//! top‑level application object: owns the world, the save store and the
//! menu/playing mode; everything the bevy layer does goes through here

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use bevy::prelude::*;
use rand::Rng;

use crate::catalog::ItemCatalog;
use crate::constants::*;
use crate::player::{PendingInput, PlayerInput};
use crate::save::{SaveData, SaveError, SaveStore};
use crate::world::{TickReport, WorldConfig, WorldState};

/// wall‑clock seconds; item lifetimes and the save file use absolute time
pub fn unix_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default()
}

/// Runtime configuration. The save location may be overridden through
/// `PIXEL_FOREST_SAVE`.
#[derive(Resource, Clone, Debug)]
pub struct GameConfig {
    pub save_path: PathBuf,
    pub world: WorldConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            save_path: PathBuf::from(SAVE_FILE),
            world: WorldConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(path) = std::env::var_os(SAVE_ENV_VAR) {
            config.save_path = PathBuf::from(path);
        }
        config
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Menu,
    Playing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    NewGame,
    Continue,
    SaveAndExit,
    Quit,
}

#[derive(Resource)]
pub struct Game {
    mode: Mode,
    world: WorldState,
    store: SaveStore,
    running: bool,
}

impl Game {
    pub fn new(config: &GameConfig, now: f64, rng: &mut impl Rng) -> Self {
        Self {
            mode: Mode::Menu,
            world: WorldState::new(config.world.clone(), ItemCatalog::default(), now, rng),
            store: SaveStore::new(config.save_path.clone()),
            running: true,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn world(&self) -> &WorldState {
        &self.world
    }

    pub fn running(&self) -> bool {
        self.running
    }

    /// Menu ⇄ Playing. Commands that make no sense in the current mode are
    /// ignored.
    pub fn handle(&mut self, command: Command, now: f64, rng: &mut impl Rng) -> Mode {
        match (self.mode, command) {
            (_, Command::Quit) => {
                info!("quit requested");
                self.running = false;
            }
            (Mode::Menu, Command::NewGame) => {
                self.world.reset(now, rng);
                self.mode = Mode::Playing;
                info!("new game");
            }
            (Mode::Menu, Command::Continue) => {
                self.resume(now, rng);
                self.mode = Mode::Playing;
            }
            (Mode::Playing, Command::SaveAndExit) => {
                let data = SaveData::capture(&self.world, now);
                match self.store.save(&data) {
                    Ok(()) => info!("saved progress to {}", self.store.path().display()),
                    Err(e) => warn!("could not save progress: {e}"),
                }
                self.mode = Mode::Menu;
            }
            (mode, command) => debug!("ignoring {command:?} while in {mode:?}"),
        }
        self.mode
    }

    /// any load failure degrades to a fresh world
    fn resume(&mut self, now: f64, rng: &mut impl Rng) {
        match self.store.load() {
            Ok(data) => {
                self.world.restore(data.into_resume(), now, rng);
                info!("continued saved game (score {})", self.world.score);
            }
            Err(SaveError::Missing { path }) => {
                info!("no save at {}, starting a new game", path.display());
                self.world.reset(now, rng);
            }
            Err(e) => {
                warn!("{e}; starting a new game");
                self.world.reset(now, rng);
            }
        }
    }

    /// one fixed step; the world only runs while playing
    pub fn tick(&mut self, input: PlayerInput, now: f64, rng: &mut impl Rng) -> Option<TickReport> {
        (self.mode == Mode::Playing).then(|| self.world.tick(input, now, rng))
    }
}

/// build the game from whatever configuration the app was started with
pub fn setup_game(mut commands: Commands, config: Res<GameConfig>) {
    info!("save file: {}", config.save_path.display());
    commands.insert_resource(Game::new(&config, unix_now(), &mut rand::thread_rng()));
}

/* ===========================================================
   fixed‑rate simulation step
   =========================================================== */
pub fn simulation_tick_system(mut game: ResMut<Game>, mut pending: ResMut<PendingInput>) {
    let input = pending.take();
    let Some(report) = game.tick(input, unix_now(), &mut rand::thread_rng()) else { return };

    if report.fell {
        debug!("fall recovery, score {}", game.world().score);
    }
    if report.extended {
        debug!("world extended to {:.0}", game.world().world_width);
    }
    if !report.collected.is_empty() {
        debug!("collected {:?}, score {}", report.collected, game.world().score);
    }
    if report.expired > 0 {
        trace!("{} item(s) expired", report.expired);
    }
}
