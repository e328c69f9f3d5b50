//! collectible item kinds & their fixed spawn weights / point values

use rand::Rng;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemKind {
    ClayPot,
    ClayBowl,
    WoodenSword,
    IronSword,
    GoldCoin,
}

impl ItemKind {
    /// sampling order matters: cumulative thresholds are walked in this order
    pub const ALL: [ItemKind; 5] = [
        ItemKind::ClayPot,
        ItemKind::ClayBowl,
        ItemKind::WoodenSword,
        ItemKind::IronSword,
        ItemKind::GoldCoin,
    ];

    /// identifier written to the save file
    pub fn name(self) -> &'static str {
        match self {
            ItemKind::ClayPot => "CLAY_POT",
            ItemKind::ClayBowl => "CLAY_BOWL",
            ItemKind::WoodenSword => "WOODEN_SWORD",
            ItemKind::IronSword => "IRON_SWORD",
            ItemKind::GoldCoin => "GOLD_COIN",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown item kind `{0}`")]
pub struct UnknownItemKind(pub String);

impl FromStr for ItemKind {
    type Err = UnknownItemKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownItemKind(s.to_owned()))
    }
}

/// per-kind row of the catalog
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemSpec {
    pub kind: ItemKind,
    pub probability: f64,
    pub points: u32,
    pub color: [u8; 3],
}

/// Read-only lookup table built once at startup and handed to the world.
#[derive(Clone, Debug)]
pub struct ItemCatalog {
    entries: [ItemSpec; 5],
}

impl Default for ItemCatalog {
    fn default() -> Self {
        Self {
            entries: [
                ItemSpec { kind: ItemKind::ClayPot,     probability: 0.40, points: 5,  color: [139, 69, 19] },
                ItemSpec { kind: ItemKind::ClayBowl,    probability: 0.30, points: 3,  color: [150, 100, 50] },
                ItemSpec { kind: ItemKind::WoodenSword, probability: 0.20, points: 1,  color: [160, 120, 60] },
                ItemSpec { kind: ItemKind::IronSword,   probability: 0.09, points: 6,  color: [192, 192, 192] },
                ItemSpec { kind: ItemKind::GoldCoin,    probability: 0.01, points: 10, color: [255, 255, 0] },
            ],
        }
    }
}

impl ItemCatalog {
    pub fn spec(&self, kind: ItemKind) -> &ItemSpec {
        // entries are laid out in ItemKind::ALL order
        &self.entries[kind as usize]
    }

    pub fn points(&self, kind: ItemKind) -> u32 {
        self.spec(kind).points
    }

    /// Cumulative-threshold sampling over the fixed order. Anything past the
    /// last threshold (float slack) lands on the final kind.
    pub fn sample(&self, rng: &mut impl Rng) -> ItemKind {
        let roll: f64 = rng.gen();
        let mut threshold = 0.0;
        for entry in &self.entries {
            threshold += entry.probability;
            if roll < threshold {
                return entry.kind;
            }
        }
        self.entries[self.entries.len() - 1].kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn entries_follow_kind_order() {
        let catalog = ItemCatalog::default();
        for kind in ItemKind::ALL {
            assert_eq!(catalog.spec(kind).kind, kind);
        }
        let total: f64 = catalog.entries.iter().map(|e| e.probability).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn points_match_table() {
        let catalog = ItemCatalog::default();
        assert_eq!(catalog.points(ItemKind::ClayPot), 5);
        assert_eq!(catalog.points(ItemKind::ClayBowl), 3);
        assert_eq!(catalog.points(ItemKind::WoodenSword), 1);
        assert_eq!(catalog.points(ItemKind::IronSword), 6);
        assert_eq!(catalog.points(ItemKind::GoldCoin), 10);
    }

    #[test]
    fn names_parse_back() {
        assert_eq!("GOLD_COIN".parse::<ItemKind>(), Ok(ItemKind::GoldCoin));
        assert_eq!(
            "DIAMOND".parse::<ItemKind>(),
            Err(UnknownItemKind("DIAMOND".to_owned()))
        );
    }

    #[test]
    fn weighted_sampling_matches_distribution() {
        let catalog = ItemCatalog::default();
        let mut rng = StdRng::seed_from_u64(7);
        let n = 100_000;
        let mut counts = [0usize; 5];
        for _ in 0..n {
            counts[catalog.sample(&mut rng) as usize] += 1;
        }
        for (entry, &count) in catalog.entries.iter().zip(&counts) {
            let observed = count as f64 / n as f64;
            // ~5 sigma for the widest bucket at n = 100k
            assert!(
                (observed - entry.probability).abs() < 0.008,
                "{}: observed {observed}, expected {}",
                entry.kind,
                entry.probability
            );
        }
        assert!(counts[ItemKind::GoldCoin as usize] > 0);
    }
}
