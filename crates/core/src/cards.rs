use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Rarity tiers tracked by the planner. Declaration order is craft cost
/// order: a rare wildcard is cheaper than a mythic one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Rare,
    Mythic,
}

impl Rarity {
    pub const ALL: [Rarity; 2] = [Rarity::Rare, Rarity::Mythic];

    pub fn id(self) -> &'static str {
        match self {
            Rarity::Rare => "rare",
            Rarity::Mythic => "mythic",
        }
    }

    pub fn from_id(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "rare" | "r" => Some(Rarity::Rare),
            "mythic" | "mythic rare" | "m" => Some(Rarity::Mythic),
            _ => None,
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A product/rarity slot a card can be opened from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Printing {
    pub product: String,
    pub rarity: Rarity,
}

impl Printing {
    pub fn new(product: impl Into<String>, rarity: Rarity) -> Self {
        Self {
            product: product.into(),
            rarity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NeedError {
    #[error("card name cannot be empty")]
    EmptyName,
    #[error("no eligible printings for {0}")]
    NoEligiblePrintings(String),
}

/// One distinct card still missing from the deck. `remaining` only moves
/// down, one copy per craft, and stops at zero.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CardNeed {
    pub name: String,
    remaining: u32,
    printings: Vec<Printing>,
    craft_rarity: Rarity,
}

impl CardNeed {
    /// Builds a need from already-resolved printings. Duplicate printings are
    /// collapsed while keeping first-seen order.
    pub fn new(
        name: impl Into<String>,
        remaining: u32,
        printings: impl IntoIterator<Item = Printing>,
    ) -> Result<Self, NeedError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(NeedError::EmptyName);
        }
        let mut unique: Vec<Printing> = Vec::new();
        for printing in printings {
            if !unique.contains(&printing) {
                unique.push(printing);
            }
        }
        let craft_rarity = unique
            .iter()
            .map(|printing| printing.rarity)
            .min()
            .ok_or_else(|| NeedError::NoEligiblePrintings(name.clone()))?;
        Ok(Self {
            name,
            remaining,
            printings: unique,
            craft_rarity,
        })
    }

    pub fn from_quantities(
        name: impl Into<String>,
        deck_qty: u32,
        owned_qty: u32,
        printings: impl IntoIterator<Item = Printing>,
    ) -> Result<Self, NeedError> {
        Self::new(name, deck_qty.saturating_sub(owned_qty), printings)
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Removes one outstanding copy. Returns the new count, or `None` when the
    /// card was already satisfied.
    pub(crate) fn take_one(&mut self) -> Option<u32> {
        self.remaining = self.remaining.checked_sub(1)?;
        Some(self.remaining)
    }

    pub fn printings(&self) -> &[Printing] {
        &self.printings
    }

    pub fn craft_rarity(&self) -> Rarity {
        self.craft_rarity
    }

    pub fn is_satisfied(&self) -> bool {
        self.remaining == 0
    }

    /// Distinct products in printing order.
    pub fn products(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for printing in &self.printings {
            if !out.contains(&printing.product.as_str()) {
                out.push(printing.product.as_str());
            }
        }
        out
    }
}
