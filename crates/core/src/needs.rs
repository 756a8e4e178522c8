use crate::{CardNeed, Rarity};
use std::collections::{BTreeMap, BTreeSet};

/// `product -> rarity -> card names` for every card that still needs copies
/// and can be opened at that rarity in that product. Empty entries are pruned,
/// so every listed product has at least one need.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NeedsIndex {
    entries: BTreeMap<String, BTreeMap<Rarity, BTreeSet<String>>>,
}

impl NeedsIndex {
    pub fn build(cards: &[CardNeed]) -> Self {
        let mut index = Self::default();
        for card in cards.iter().filter(|card| card.remaining() > 0) {
            for printing in card.printings() {
                index
                    .entries
                    .entry(printing.product.clone())
                    .or_default()
                    .entry(printing.rarity)
                    .or_default()
                    .insert(card.name.clone());
            }
        }
        index
    }

    pub fn distinct_needed(&self, product: &str, rarity: Rarity) -> usize {
        self.entries
            .get(product)
            .and_then(|by_rarity| by_rarity.get(&rarity))
            .map(BTreeSet::len)
            .unwrap_or(0)
    }

    pub fn contains(&self, product: &str, rarity: Rarity, name: &str) -> bool {
        self.entries
            .get(product)
            .and_then(|by_rarity| by_rarity.get(&rarity))
            .is_some_and(|names| names.contains(name))
    }

    pub fn names(&self, product: &str, rarity: Rarity) -> impl Iterator<Item = &str> + '_ {
        self.entries
            .get(product)
            .and_then(|by_rarity| by_rarity.get(&rarity))
            .into_iter()
            .flat_map(|names| names.iter().map(String::as_str))
    }

    pub fn products(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    pub fn has_needs(&self, product: &str) -> bool {
        self.entries.contains_key(product)
    }

    pub fn any_at(&self, rarity: Rarity) -> bool {
        self.entries
            .values()
            .any(|by_rarity| by_rarity.contains_key(&rarity))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops `card` from every entry it occupies. Returns how many entries
    /// it was removed from.
    pub fn remove_card(&mut self, card: &CardNeed) -> usize {
        let mut removed = 0;
        for printing in card.printings() {
            let Some(by_rarity) = self.entries.get_mut(&printing.product) else {
                continue;
            };
            if let Some(names) = by_rarity.get_mut(&printing.rarity) {
                if names.remove(&card.name) {
                    removed += 1;
                }
                if names.is_empty() {
                    by_rarity.remove(&printing.rarity);
                }
            }
            if by_rarity.is_empty() {
                self.entries.remove(&printing.product);
            }
        }
        removed
    }

    /// True when the index holds exactly the registrations `cards` imply.
    pub fn is_consistent_with(&self, cards: &[CardNeed]) -> bool {
        *self == Self::build(cards)
    }
}
