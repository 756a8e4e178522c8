use crate::Rarity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CraftPhase {
    /// Crafted without emptying a need inside a protected product.
    Safe,
    /// Crafted after safe options ran out.
    Forced,
}

/// One wildcard spent on one copy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CraftRecord {
    pub rarity: Rarity,
    pub card: String,
    pub remaining_after: u32,
    pub phase: CraftPhase,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CraftSummary {
    pub rarity: Rarity,
    pub card: String,
    pub count: u32,
    pub remaining_after: u32,
}

/// Collapses the chronological log by `(rarity, card)`, keeping
/// first-appearance order and the last remaining count.
pub fn aggregate_crafts(log: &[CraftRecord]) -> Vec<CraftSummary> {
    let mut out: Vec<CraftSummary> = Vec::new();
    for record in log {
        match out
            .iter_mut()
            .find(|entry| entry.rarity == record.rarity && entry.card == record.card)
        {
            Some(entry) => {
                entry.count += 1;
                entry.remaining_after = record.remaining_after;
            }
            None => out.push(CraftSummary {
                rarity: record.rarity,
                card: record.card.clone(),
                count: 1,
                remaining_after: record.remaining_after,
            }),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(rarity: Rarity, card: &str, remaining_after: u32) -> CraftRecord {
        CraftRecord {
            rarity,
            card: card.to_string(),
            remaining_after,
            phase: CraftPhase::Safe,
        }
    }

    #[test]
    fn aggregates_by_rarity_and_card() {
        let log = vec![
            record(Rarity::Rare, "Fountainport", 3),
            record(Rarity::Mythic, "Overlord of the Hauntwoods", 1),
            record(Rarity::Rare, "Fountainport", 2),
            record(Rarity::Rare, "Cori-Steel Cutter", 0),
            record(Rarity::Mythic, "Overlord of the Hauntwoods", 0),
        ];
        let summary = aggregate_crafts(&log);
        assert_eq!(summary.len(), 3);
        assert_eq!(summary[0].card, "Fountainport");
        assert_eq!(summary[0].count, 2);
        assert_eq!(summary[0].remaining_after, 2);
        assert_eq!(summary[1].rarity, Rarity::Mythic);
        assert_eq!(summary[1].count, 2);
        assert_eq!(summary[1].remaining_after, 0);
        assert_eq!(summary[2].card, "Cori-Steel Cutter");
    }

    #[test]
    fn empty_log_has_no_summary() {
        assert!(aggregate_crafts(&[]).is_empty());
    }
}
