use crate::{
    aggregate_crafts, rank_products, CardNeed, CraftRecord, CraftSummary, NeedsIndex,
    PlannerConfig, PoolSizeProvider, ProductScore, Scorer, WildcardBudget, WildcardPlanner,
};
use serde::Serialize;
use std::collections::HashSet;

/// Everything a reporter needs after one planning run.
#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    pub before: Vec<ProductScore>,
    pub after: Vec<ProductScore>,
    pub protected: Vec<String>,
    pub crafts: Vec<CraftRecord>,
    pub summary: Vec<CraftSummary>,
    pub spent: WildcardBudget,
    pub unspent: WildcardBudget,
    pub cards: Vec<CardNeed>,
}

impl PlanReport {
    pub fn remaining_total(&self) -> u32 {
        self.cards.iter().map(CardNeed::remaining).sum()
    }
}

/// One run's owned need state plus the read-only facts it is scored against.
pub struct PlanRun<'a, P: PoolSizeProvider + ?Sized> {
    config: &'a PlannerConfig,
    pools: &'a P,
    cards: Vec<CardNeed>,
    index: NeedsIndex,
}

impl<'a, P: PoolSizeProvider + ?Sized> PlanRun<'a, P> {
    /// Satisfied cards are dropped; a repeated name keeps its first row.
    pub fn new(config: &'a PlannerConfig, pools: &'a P, cards: Vec<CardNeed>) -> Self {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(cards.len());
        for card in cards {
            if card.remaining() == 0 {
                continue;
            }
            if !seen.insert(card.name.clone()) {
                log::warn!("ignoring repeated need row for {}", card.name);
                continue;
            }
            kept.push(card);
        }
        let index = NeedsIndex::build(&kept);
        Self {
            config,
            pools,
            cards: kept,
            index,
        }
    }

    pub fn cards(&self) -> &[CardNeed] {
        &self.cards
    }

    pub fn index(&self) -> &NeedsIndex {
        &self.index
    }

    pub fn rank(&self) -> Vec<ProductScore> {
        let scorer = Scorer::new(self.config, self.pools);
        rank_products(scorer.score_all(&self.index), self.config)
    }

    pub fn plan(mut self, budget: WildcardBudget) -> PlanReport {
        let before = self.rank();
        let planner = WildcardPlanner::new(self.config, self.pools);
        let outcome = planner.plan(&mut self.cards, &mut self.index, budget);
        let after = self.rank();
        log::info!(
            "spent {} rare / {} mythic wildcards over {} crafts",
            outcome.spent.rare,
            outcome.spent.mythic,
            outcome.crafts.len()
        );
        PlanReport {
            before,
            after,
            protected: outcome.protected.products().map(str::to_string).collect(),
            summary: aggregate_crafts(&outcome.crafts),
            crafts: outcome.crafts,
            spent: outcome.spent,
            unspent: outcome.unspent,
            cards: self.cards,
        }
    }
}
