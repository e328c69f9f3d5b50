//! save file: flat JSON record of progress, written temp‑then‑rename

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bevy::log::warn;
use bevy::math::Vec2;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::catalog::{ItemKind, UnknownItemKind};
use crate::components::Item;
use crate::constants::*;
use crate::world::{Resume, WorldState};

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("no save file at {}", path.display())]
    Missing { path: PathBuf },
    #[error("save file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("save file i/o: {0}")]
    Io(#[from] io::Error),
    #[error("invalid item kind `{0}`")]
    InvalidItemKind(String),
}

impl From<UnknownItemKind> for SaveError {
    fn from(e: UnknownItemKind) -> Self {
        SaveError::InvalidItemKind(e.0)
    }
}

/* ===========================================================
   on‑disk layout
   =========================================================== */
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedItem {
    #[serde(rename = "type")]
    pub kind: String,
    pub x: f32,
    pub y: f32,
    pub spawn_time: f64,
}

impl SavedItem {
    pub fn from_item(item: &Item) -> Self {
        Self {
            kind: item.kind.name().to_owned(),
            x: item.pos.x,
            y: item.pos.y,
            spawn_time: item.spawn_time,
        }
    }

    pub fn to_item(&self) -> Result<Item, SaveError> {
        let kind: ItemKind = self.kind.parse()?;
        Ok(Item::new(kind, Vec2::new(self.x, self.y), self.spawn_time))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveData {
    pub score: u32,
    pub screen_offset_x: f32,
    pub player_x: f32,
    pub player_y: f32,
    pub world_start_x: f32,
    #[serde(deserialize_with = "lenient_items")]
    pub items: Vec<SavedItem>,
}

/// a malformed entry costs only that item, not the whole save
fn lenient_items<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<SavedItem>, D::Error> {
    let raw = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<SavedItem>(value) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!("skipping malformed saved item: {e}");
                None
            }
        })
        .collect())
}

impl Default for SaveData {
    fn default() -> Self {
        Self {
            score: 0,
            screen_offset_x: 0.0,
            player_x: SCREEN_WIDTH / 2.0,
            player_y: GROUND_Y - SPAWN_DROP,
            world_start_x: 0.0,
            items: Vec::new(),
        }
    }
}

impl SaveData {
    /// snapshot progress; items already past their lifetime are left out
    pub fn capture(world: &WorldState, now: f64) -> Self {
        Self {
            score: world.score,
            screen_offset_x: world.camera_offset_x,
            player_x: world.player.pos.x,
            player_y: world.player.pos.y,
            world_start_x: world.world_start_x,
            items: world
                .items
                .iter()
                .filter(|item| item.age(now) <= ITEM_LIFETIME)
                .map(SavedItem::from_item)
                .collect(),
        }
    }

    /// Validate into a `Resume`. Items with an unknown kind are skipped
    /// (and logged); everything else is kept.
    pub fn into_resume(self) -> Resume {
        let items = self
            .items
            .iter()
            .filter_map(|saved| match saved.to_item() {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!("skipping saved item: {e}");
                    None
                }
            })
            .collect();

        Resume {
            score: self.score,
            camera_offset_x: self.screen_offset_x.max(0.0),
            player_pos: Vec2::new(self.player_x, self.player_y),
            world_start_x: self.world_start_x.max(0.0),
            items,
        }
    }
}

/* ===========================================================
   file store
   =========================================================== */
#[derive(Clone, Debug)]
pub struct SaveStore {
    path: PathBuf,
}

impl SaveStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<SaveData, SaveError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(SaveError::Missing { path: self.path.clone() })
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&text)?)
    }

    /// overwrite the whole file; a crash mid‑write leaves the old save intact
    pub fn save(&self, data: &SaveData) -> Result<(), SaveError> {
        let json = serde_json::to_string_pretty(data)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ItemCatalog;
    use crate::world::WorldConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const NOW: f64 = 1_700_000_000.0;

    fn store_in(dir: &tempfile::TempDir) -> SaveStore {
        SaveStore::new(dir.path().join("savegame.json"))
    }

    #[test]
    fn missing_file_is_reported_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = store_in(&dir).load().unwrap_err();
        assert!(matches!(err, SaveError::Missing { .. }));
    }

    #[test]
    fn garbage_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "{ not json").unwrap();
        assert!(matches!(store.load().unwrap_err(), SaveError::Corrupt(_)));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let data: SaveData = serde_json::from_str(r#"{ "score": 12 }"#).unwrap();
        assert_eq!(data.score, 12);
        assert_eq!(data.screen_offset_x, 0.0);
        assert_eq!(data.world_start_x, 0.0);
        assert_eq!(data.player_x, SCREEN_WIDTH / 2.0);
        assert_eq!(data.player_y, GROUND_Y - SPAWN_DROP);
        assert!(data.items.is_empty());
    }

    #[test]
    fn unknown_item_kind_is_skipped() {
        let json = r#"{
            "score": 3,
            "items": [
                { "type": "DIAMOND",  "x": 10.0, "y": 530.0, "spawn_time": 1.0 },
                { "type": "CLAY_POT", "x": 20.0, "y": 530.0, "spawn_time": 2.0 }
            ]
        }"#;
        let data: SaveData = serde_json::from_str(json).unwrap();
        assert!(matches!(
            data.items[0].to_item(),
            Err(SaveError::InvalidItemKind(ref k)) if k == "DIAMOND"
        ));
        let resume = data.into_resume();
        assert_eq!(resume.items.len(), 1);
        assert_eq!(resume.items[0].kind, ItemKind::ClayPot);
    }

    #[test]
    fn item_missing_a_field_does_not_lose_the_save() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let json = r#"{
            "score": 50,
            "player_x": 900.0,
            "items": [
                { "type": "CLAY_POT", "x": 10.0, "y": 530.0 },
                { "type": "IRON_SWORD", "y": 530.0, "spawn_time": 4.0 },
                "not an item",
                { "type": "GOLD_COIN", "x": 30.0, "y": 530.0, "spawn_time": 5.0 }
            ]
        }"#;
        fs::write(store.path(), json).unwrap();

        let data = store.load().unwrap();
        assert_eq!(data.score, 50);
        assert_eq!(data.player_x, 900.0);
        assert_eq!(data.items.len(), 1);
        assert_eq!(data.items[0].kind, "GOLD_COIN");

        let resume = data.into_resume();
        assert_eq!(resume.items.len(), 1);
        assert_eq!(resume.items[0].kind, ItemKind::GoldCoin);
    }

    #[test]
    fn items_that_are_not_a_list_are_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), r#"{ "score": 1, "items": 7 }"#).unwrap();
        assert!(matches!(store.load().unwrap_err(), SaveError::Corrupt(_)));
    }

    #[test]
    fn negative_offsets_are_clamped() {
        let data = SaveData { screen_offset_x: -5.0, world_start_x: -1.0, ..SaveData::default() };
        let resume = data.into_resume();
        assert_eq!(resume.camera_offset_x, 0.0);
        assert_eq!(resume.world_start_x, 0.0);
    }

    #[test]
    fn save_then_load_round_trips_progress() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let mut rng = StdRng::seed_from_u64(1);
        let mut world = WorldState::new(WorldConfig::default(), ItemCatalog::default(), NOW, &mut rng);
        world.score = 17;
        world.camera_offset_x = 1234.5;
        world.world_start_x = 434.5;
        world.player.pos = Vec2::new(1700.25, 530.0);
        world.items = vec![
            Item::new(ItemKind::GoldCoin, Vec2::new(1800.0, 530.0), NOW - 2.5),
            Item::new(ItemKind::IronSword, Vec2::new(1900.0, 530.0), NOW - 14.0),
            Item::new(ItemKind::ClayPot, Vec2::new(2000.0, 530.0), NOW - 20.0),
        ];

        store.save(&SaveData::capture(&world, NOW)).unwrap();
        assert!(!store.path().with_extension("json.tmp").exists());

        let resume = store.load().unwrap().into_resume();
        assert_eq!(resume.score, 17);
        assert!((resume.camera_offset_x - 1234.5).abs() < 1e-3);
        assert!((resume.world_start_x - 434.5).abs() < 1e-3);
        assert!((resume.player_pos - Vec2::new(1700.25, 530.0)).length() < 1e-3);

        // the expired clay pot is not persisted
        let kept: Vec<_> = resume.items.iter().map(|i| (i.kind, i.pos, i.spawn_time)).collect();
        assert_eq!(
            kept,
            vec![
                (ItemKind::GoldCoin, Vec2::new(1800.0, 530.0), NOW - 2.5),
                (ItemKind::IronSword, Vec2::new(1900.0, 530.0), NOW - 14.0),
            ]
        );
    }

    #[test]
    fn save_overwrites_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save(&SaveData { score: 1, ..SaveData::default() }).unwrap();
        store.save(&SaveData { score: 2, ..SaveData::default() }).unwrap();
        assert_eq!(store.load().unwrap().score, 2);
    }
}
