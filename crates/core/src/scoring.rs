use crate::{pool_share, CardNeed, NeedsIndex, PlannerConfig, PoolSizeProvider, Rarity};
use serde::{Deserialize, Serialize};

/// Expected needed-card hits from opening one unit of a product.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProductScore {
    pub product: String,
    pub direct: f64,
    pub bonus: f64,
    pub wildcard: f64,
    pub total: f64,
}

impl ProductScore {
    pub fn zero(product: impl Into<String>) -> Self {
        Self {
            product: product.into(),
            ..Self::default()
        }
    }

    fn from_parts(product: &str, direct: f64, bonus: f64, wildcard: f64) -> Self {
        Self {
            product: product.to_string(),
            direct,
            bonus,
            wildcard,
            total: direct + bonus + wildcard,
        }
    }
}

pub struct Scorer<'a, P: PoolSizeProvider + ?Sized> {
    config: &'a PlannerConfig,
    pools: &'a P,
}

impl<'a, P: PoolSizeProvider + ?Sized> Scorer<'a, P> {
    pub fn new(config: &'a PlannerConfig, pools: &'a P) -> Self {
        Self { config, pools }
    }

    pub fn config(&self) -> &PlannerConfig {
        self.config
    }

    /// Chance that one slot of `product` at `rarity` is a needed card.
    pub fn slot_hit(&self, index: &NeedsIndex, product: &str, rarity: Rarity) -> f64 {
        let needed = index.distinct_needed(product, rarity);
        if needed == 0 {
            return 0.0;
        }
        let pool = self.pools.pool_size(product, rarity);
        self.config.slot_odds.get(rarity) * pool_share(needed as f64, pool)
    }

    pub fn direct_ev(&self, index: &NeedsIndex, product: &str) -> f64 {
        Rarity::ALL
            .iter()
            .map(|rarity| self.slot_hit(index, product, *rarity))
            .sum()
    }

    /// Expected hits inside one bonus product. Pinned slots all come from
    /// the most recent product; the remaining slots are spread evenly.
    pub fn bonus_product_ev(&self, index: &NeedsIndex) -> f64 {
        let eligible = self.config.eligible_products();
        let rule = self.config.bonus_product;
        if eligible.is_empty() || rule.slots == 0 {
            return 0.0;
        }
        let spread = rule.slots.saturating_sub(rule.pinned_slots) as f64 / eligible.len() as f64;
        eligible
            .iter()
            .map(|product| {
                let mut share = spread;
                if *product == self.config.most_recent {
                    share += rule.pinned_slots as f64;
                }
                share * self.direct_ev(index, product)
            })
            .sum()
    }

    /// Bonus product value per eligible pack opened.
    pub fn bonus_contribution(&self, index: &NeedsIndex) -> f64 {
        let packs = self.config.bonus_product.packs_per_bonus;
        if packs == 0 {
            return 0.0;
        }
        self.bonus_product_ev(index) / packs as f64
    }

    /// Wildcard track value per eligible pack. A rarity only counts while
    /// something of that rarity is still needed.
    pub fn wildcard_contribution(&self, index: &NeedsIndex) -> f64 {
        let rule = self.config.wildcard_accrual;
        Rarity::ALL
            .iter()
            .filter(|rarity| index.any_at(**rarity))
            .map(|rarity| rule.rate(*rarity) * rule.future_card_value)
            .sum()
    }

    pub fn score(&self, index: &NeedsIndex, product: &str) -> ProductScore {
        if !index.has_needs(product) {
            return ProductScore::zero(product);
        }
        let direct = self.direct_ev(index, product);
        if !self.config.is_bonus_eligible(product) {
            return ProductScore::from_parts(product, direct, 0.0, 0.0);
        }
        ProductScore::from_parts(
            product,
            direct,
            self.bonus_contribution(index),
            self.wildcard_contribution(index),
        )
    }

    /// Full scores for every product that still holds a need, in product
    /// code order.
    pub fn score_all(&self, index: &NeedsIndex) -> Vec<ProductScore> {
        let bonus = self.bonus_contribution(index);
        let wildcard = self.wildcard_contribution(index);
        index
            .products()
            .map(|product| {
                let direct = self.direct_ev(index, product);
                let score = if self.config.is_bonus_eligible(product) {
                    ProductScore::from_parts(product, direct, bonus, wildcard)
                } else {
                    ProductScore::from_parts(product, direct, 0.0, 0.0)
                };
                log::trace!("score {} = {:.4}", product, score.total);
                score
            })
            .collect()
    }

    /// Scores with both bonuses left out.
    pub fn direct_scores(&self, index: &NeedsIndex) -> Vec<ProductScore> {
        index
            .products()
            .map(|product| ProductScore::from_parts(product, self.direct_ev(index, product), 0.0, 0.0))
            .collect()
    }

    /// Direct value lost across every product if `card` stopped being needed.
    pub fn elimination_loss(&self, index: &NeedsIndex, card: &CardNeed) -> f64 {
        card.printings()
            .iter()
            .filter(|printing| index.contains(&printing.product, printing.rarity, &card.name))
            .map(|printing| {
                let pool = self.pools.pool_size(&printing.product, printing.rarity);
                pool_share(self.config.slot_odds.get(printing.rarity), pool)
            })
            .sum()
    }

    /// Sum of current direct value over the distinct products `card` can be
    /// opened from.
    pub fn aggregate_direct(&self, index: &NeedsIndex, card: &CardNeed) -> f64 {
        card.products()
            .into_iter()
            .map(|product| self.direct_ev(index, product))
            .sum()
    }
}
