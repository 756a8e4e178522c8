use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use packwise_core::{
    CardNeed, PlannerConfig, PoolSizes, Printing, ProductInfo, Rarity, WildcardBudget,
};

/// One printing as exported by the card database, rarity still raw.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawPrinting {
    pub set: String,
    pub rarity: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawPoolSize {
    pub set: String,
    pub rarity: String,
    pub size: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeckEntry {
    pub name: String,
    pub quantity: u32,
}

/// Card name to every printing the database knows about.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct PrintingsCache {
    pub cards: BTreeMap<String, Vec<RawPrinting>>,
}

impl PrintingsCache {
    /// Exact name first, then a case-insensitive match, then the front face
    /// of a double-faced `A // B` entry.
    pub fn lookup(&self, name: &str) -> Option<&[RawPrinting]> {
        if let Some(found) = self.cards.get(name) {
            return Some(found);
        }
        let wanted = name.trim().to_lowercase();
        self.cards
            .iter()
            .find(|(key, _)| {
                let key = key.to_lowercase();
                let front = key.split(" // ").next().map(str::trim);
                key == wanted || front == Some(wanted.as_str())
            })
            .map(|(_, printings)| printings.as_slice())
    }

    /// Printings usable for booster planning: known catalog product and an
    /// allowed tracked rarity.
    pub fn eligible(
        &self,
        name: &str,
        config: &PlannerConfig,
        allowed: &[Rarity],
    ) -> Vec<Printing> {
        let Some(raw) = self.lookup(name) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        for printing in raw {
            let Some(rarity) = Rarity::from_id(&printing.rarity) else {
                continue;
            };
            let set = printing.set.trim().to_lowercase();
            if !allowed.contains(&rarity) || !config.is_known_product(&set) {
                continue;
            }
            let printing = Printing::new(set, rarity);
            if !out.contains(&printing) {
                out.push(printing);
            }
        }
        out
    }
}

/// Everything the planner needs for one run.
#[derive(Debug, Clone)]
pub struct PlannerInputs {
    pub config: PlannerConfig,
    pub cards: Vec<CardNeed>,
    pub pools: PoolSizes,
    /// Names dropped because no usable printing was found.
    pub skipped: Vec<String>,
}
