use crate::{
    rank_products, CardNeed, CraftPhase, CraftRecord, NeedsIndex, PlannerConfig,
    PoolSizeProvider, ProductScore, Rarity, Scorer, WildcardBudget,
};
use serde::Serialize;

/// Top products by direct value, frozen before any wildcard is spent.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ProtectedSet {
    scores: Vec<ProductScore>,
}

impl ProtectedSet {
    /// Takes the first `count` entries of an already ranked list, skipping
    /// products with nothing to offer.
    pub fn from_ranking(ranked: &[ProductScore], count: usize) -> Self {
        let scores = ranked
            .iter()
            .filter(|score| score.direct > 0.0)
            .take(count)
            .cloned()
            .collect();
        Self { scores }
    }

    pub fn compute<P: PoolSizeProvider + ?Sized>(
        scorer: &Scorer<'_, P>,
        index: &NeedsIndex,
    ) -> Self {
        let config = scorer.config();
        let ranked = rank_products(scorer.direct_scores(index), config);
        Self::from_ranking(&ranked, config.protected_count)
    }

    pub fn contains(&self, product: &str) -> bool {
        self.scores.iter().any(|score| score.product == product)
    }

    pub fn products(&self) -> impl Iterator<Item = &str> + '_ {
        self.scores.iter().map(|score| score.product.as_str())
    }

    pub fn scores(&self) -> &[ProductScore] {
        &self.scores
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn raw_score(&self, product: &str) -> Option<f64> {
        self.scores
            .iter()
            .find(|score| score.product == product)
            .map(|score| score.direct)
    }

    /// Sum of frozen protected scores over the card's distinct products.
    pub fn affinity(&self, card: &CardNeed) -> f64 {
        card.products()
            .into_iter()
            .filter_map(|product| self.raw_score(product))
            .sum()
    }

    pub fn touches(&self, card: &CardNeed) -> bool {
        card.products().into_iter().any(|product| self.contains(product))
    }

    /// True when crafting one copy would drop the card from a protected
    /// product's need set.
    pub fn would_empty(&self, index: &NeedsIndex, card: &CardNeed) -> bool {
        card.remaining() == 1
            && card.printings().iter().any(|printing| {
                self.contains(&printing.product)
                    && index.contains(&printing.product, printing.rarity, &card.name)
            })
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlanOutcome {
    pub protected: ProtectedSet,
    pub crafts: Vec<CraftRecord>,
    pub spent: WildcardBudget,
    pub unspent: WildcardBudget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum SafeTier {
    /// Copies left over afterwards and no protected product involved.
    Spare,
    /// Last copy, only registered outside protected products.
    Unprotected,
    /// Copies left over, but the card is also a protected product's need.
    Shielded,
    /// Last copy of a protected product's need. Only chosen when every other
    /// candidate of the rarity is the same kind of craft.
    LastResort,
}

#[derive(Debug, Clone, Copy)]
struct SafeCandidate {
    position: usize,
    tier: SafeTier,
    loss: f64,
    affinity: f64,
    remaining: u32,
}

/// Greedy wildcard spender. Phase one only empties a protected product's
/// need when no other craft of that rarity is left, picking the smallest
/// loss; phase two spends whatever is left on the weakest products.
pub struct WildcardPlanner<'a, P: PoolSizeProvider + ?Sized> {
    scorer: Scorer<'a, P>,
}

impl<'a, P: PoolSizeProvider + ?Sized> WildcardPlanner<'a, P> {
    pub fn new(config: &'a PlannerConfig, pools: &'a P) -> Self {
        Self {
            scorer: Scorer::new(config, pools),
        }
    }

    pub fn plan(
        &self,
        cards: &mut [CardNeed],
        index: &mut NeedsIndex,
        budget: WildcardBudget,
    ) -> PlanOutcome {
        let protected = ProtectedSet::compute(&self.scorer, index);
        self.plan_with(cards, index, budget, protected)
    }

    /// Runs both phases against a caller-supplied protected set.
    pub fn plan_with(
        &self,
        cards: &mut [CardNeed],
        index: &mut NeedsIndex,
        budget: WildcardBudget,
        protected: ProtectedSet,
    ) -> PlanOutcome {
        let mut ledger = Ledger {
            unspent: budget,
            spent: WildcardBudget::default(),
            crafts: Vec::new(),
        };
        log::debug!(
            "planning {} rare / {} mythic, protected: {:?}",
            budget.rare,
            budget.mythic,
            protected.products().collect::<Vec<_>>()
        );

        let safe = |cards: &[CardNeed], index: &NeedsIndex, rarity: Rarity| {
            self.select_safe(cards, index, &protected, rarity)
        };
        self.run_phase(cards, index, &mut ledger, CraftPhase::Safe, safe);
        if !ledger.unspent.is_exhausted() {
            log::debug!(
                "safe crafting stalled with {} rare / {} mythic left",
                ledger.unspent.rare,
                ledger.unspent.mythic
            );
            let forced = |cards: &[CardNeed], index: &NeedsIndex, rarity: Rarity| {
                self.select_forced(cards, index, rarity)
            };
            self.run_phase(cards, index, &mut ledger, CraftPhase::Forced, forced);
        }

        PlanOutcome {
            protected,
            crafts: ledger.crafts,
            spent: ledger.spent,
            unspent: ledger.unspent,
        }
    }

    fn run_phase<F>(
        &self,
        cards: &mut [CardNeed],
        index: &mut NeedsIndex,
        ledger: &mut Ledger,
        phase: CraftPhase,
        mut select: F,
    ) where
        F: FnMut(&[CardNeed], &NeedsIndex, Rarity) -> Option<usize>,
    {
        loop {
            if ledger.unspent.is_exhausted() {
                break;
            }
            let mut progressed = false;
            for rarity in Rarity::ALL {
                if ledger.unspent.get(rarity) == 0 {
                    continue;
                }
                let Some(position) = select(cards, index, rarity) else {
                    continue;
                };
                if ledger.craft(&mut cards[position], index, phase) {
                    progressed = true;
                }
            }
            if !progressed {
                break;
            }
        }
    }

    fn select_safe(
        &self,
        cards: &[CardNeed],
        index: &NeedsIndex,
        protected: &ProtectedSet,
        rarity: Rarity,
    ) -> Option<usize> {
        cards
            .iter()
            .enumerate()
            .filter(|(_, card)| card.craft_rarity() == rarity && card.remaining() > 0)
            .map(|(position, card)| {
                let eliminates = card.remaining() == 1;
                let tier = if protected.would_empty(index, card) {
                    SafeTier::LastResort
                } else if eliminates {
                    SafeTier::Unprotected
                } else if protected.touches(card) {
                    SafeTier::Shielded
                } else {
                    SafeTier::Spare
                };
                let loss = if eliminates {
                    self.scorer.elimination_loss(index, card)
                } else {
                    0.0
                };
                SafeCandidate {
                    position,
                    tier,
                    loss,
                    affinity: protected.affinity(card),
                    remaining: card.remaining(),
                }
            })
            .min_by(|a, b| {
                a.tier
                    .cmp(&b.tier)
                    .then_with(|| a.loss.total_cmp(&b.loss))
                    .then_with(|| a.affinity.total_cmp(&b.affinity))
                    .then_with(|| b.remaining.cmp(&a.remaining))
                    .then_with(|| cards[a.position].name.cmp(&cards[b.position].name))
            })
            .map(|candidate| candidate.position)
    }

    fn select_forced(
        &self,
        cards: &[CardNeed],
        index: &NeedsIndex,
        rarity: Rarity,
    ) -> Option<usize> {
        cards
            .iter()
            .enumerate()
            .filter(|(_, card)| card.craft_rarity() == rarity && card.remaining() > 0)
            .map(|(position, card)| (position, self.scorer.aggregate_direct(index, card)))
            .min_by(|a, b| {
                a.1.total_cmp(&b.1)
                    .then_with(|| cards[a.0].name.cmp(&cards[b.0].name))
            })
            .map(|(position, _)| position)
    }
}

struct Ledger {
    unspent: WildcardBudget,
    spent: WildcardBudget,
    crafts: Vec<CraftRecord>,
}

impl Ledger {
    fn craft(&mut self, card: &mut CardNeed, index: &mut NeedsIndex, phase: CraftPhase) -> bool {
        let rarity = card.craft_rarity();
        if card.remaining() == 0 || !self.unspent.try_spend(rarity) {
            return false;
        }
        let Some(remaining_after) = card.take_one() else {
            return false;
        };
        self.spent.add(rarity, 1);
        if remaining_after == 0 {
            let emptied = index.remove_card(card);
            log::debug!("{} satisfied, left {} need entries", card.name, emptied);
        }
        log::debug!(
            "{:?} craft {} {} ({} left)",
            phase,
            rarity,
            card.name,
            remaining_after
        );
        self.crafts.push(CraftRecord {
            rarity,
            card: card.name.clone(),
            remaining_after,
            phase,
        });
        true
    }
}
