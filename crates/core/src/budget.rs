use crate::Rarity;
use serde::{Deserialize, Serialize};

/// Wildcards available to the planner, one counter per tracked rarity.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WildcardBudget {
    pub rare: u32,
    pub mythic: u32,
}

impl WildcardBudget {
    pub fn new(rare: u32, mythic: u32) -> Self {
        Self { rare, mythic }
    }

    pub fn get(&self, rarity: Rarity) -> u32 {
        match rarity {
            Rarity::Rare => self.rare,
            Rarity::Mythic => self.mythic,
        }
    }

    fn slot_mut(&mut self, rarity: Rarity) -> &mut u32 {
        match rarity {
            Rarity::Rare => &mut self.rare,
            Rarity::Mythic => &mut self.mythic,
        }
    }

    /// Spends one wildcard of `rarity`. Returns false and leaves the counter
    /// untouched when none is left.
    pub fn try_spend(&mut self, rarity: Rarity) -> bool {
        let slot = self.slot_mut(rarity);
        match slot.checked_sub(1) {
            Some(left) => {
                *slot = left;
                true
            }
            None => false,
        }
    }

    pub fn add(&mut self, rarity: Rarity, count: u32) {
        let slot = self.slot_mut(rarity);
        *slot = slot.saturating_add(count);
    }

    pub fn is_exhausted(&self) -> bool {
        self.rare == 0 && self.mythic == 0
    }

    pub fn total(&self) -> u32 {
        self.rare.saturating_add(self.mythic)
    }
}
