use crate::Rarity;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SlotOdds {
    pub rare: f64,
    pub mythic: f64,
}

impl SlotOdds {
    pub fn get(&self, rarity: Rarity) -> f64 {
        match rarity {
            Rarity::Rare => self.rare,
            Rarity::Mythic => self.mythic,
        }
    }
}

impl Default for SlotOdds {
    fn default() -> Self {
        Self {
            rare: 7.0 / 8.0,
            mythic: 1.0 / 8.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductInfo {
    pub code: String,
    pub name: String,
}

impl ProductInfo {
    pub fn new(code: &str, name: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
        }
    }
}

/// Composition of the periodic bonus product. `pinned_slots` always come
/// from the most recent eligible product; the rest are spread evenly over
/// every eligible product.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BonusProductRule {
    pub packs_per_bonus: u32,
    pub slots: u32,
    pub pinned_slots: u32,
}

impl Default for BonusProductRule {
    fn default() -> Self {
        Self {
            packs_per_bonus: 10,
            slots: 6,
            pinned_slots: 2,
        }
    }
}

/// Wildcard track progress earned per eligible pack. One token every
/// `packs_per_token` packs; every `tokens_per_mythic`-th token is a mythic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WildcardAccrualRule {
    pub packs_per_token: u32,
    pub tokens_per_mythic: u32,
    pub future_card_value: f64,
}

impl WildcardAccrualRule {
    pub fn rate(&self, rarity: Rarity) -> f64 {
        if self.packs_per_token == 0 || self.tokens_per_mythic == 0 {
            return 0.0;
        }
        let tokens = 1.0 / self.packs_per_token as f64;
        let mythic_share = 1.0 / self.tokens_per_mythic as f64;
        match rarity {
            Rarity::Rare => tokens * (1.0 - mythic_share),
            Rarity::Mythic => tokens * mythic_share,
        }
    }
}

impl Default for WildcardAccrualRule {
    fn default() -> Self {
        Self {
            packs_per_token: 6,
            tokens_per_mythic: 5,
            future_card_value: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("slot odds for {rarity} must be within [0, 1], got {value}")]
    SlotOddsOutOfRange { rarity: Rarity, value: f64 },
    #[error("slot odds sum to {0}, more than one slot")]
    SlotOddsTooLarge(f64),
    #[error("{0} must be greater than zero")]
    ZeroRate(&'static str),
    #[error("bonus product pins {pinned} slots but only has {slots}")]
    PinnedSlotsExceedSlots { pinned: u32, slots: u32 },
    #[error("most recent product {0} is not bonus eligible")]
    MostRecentNotEligible(String),
    #[error("duplicate catalog product {0}")]
    DuplicateProduct(String),
    #[error("future card value must be finite and non-negative, got {0}")]
    InvalidCardValue(f64),
}

/// Fixed constants and reference lists shared by the scorer, ranker and
/// planner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlannerConfig {
    pub slot_odds: SlotOdds,
    /// Newest first. Position doubles as rotation age for tie-breaks.
    pub catalog: Vec<ProductInfo>,
    pub bonus_eligible: Vec<String>,
    pub most_recent: String,
    pub bonus_product: BonusProductRule,
    pub wildcard_accrual: WildcardAccrualRule,
    pub protected_count: usize,
    pub score_decimals: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            slot_odds: SlotOdds::default(),
            catalog: default_catalog(),
            bonus_eligible: [
                "eoe", "fin", "tdm", "dft", "fdn", "dsk", "blb", "otj", "mkm", "lci", "woe",
            ]
            .iter()
            .map(|code| code.to_string())
            .collect(),
            most_recent: "eoe".to_string(),
            bonus_product: BonusProductRule::default(),
            wildcard_accrual: WildcardAccrualRule::default(),
            protected_count: 3,
            score_decimals: 3,
        }
    }
}

impl PlannerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut total = 0.0;
        for rarity in Rarity::ALL {
            let value = self.slot_odds.get(rarity);
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::SlotOddsOutOfRange { rarity, value });
            }
            total += value;
        }
        if total > 1.0 + f64::EPSILON {
            return Err(ConfigError::SlotOddsTooLarge(total));
        }
        if self.bonus_product.packs_per_bonus == 0 {
            return Err(ConfigError::ZeroRate("packs_per_bonus"));
        }
        if self.wildcard_accrual.packs_per_token == 0 {
            return Err(ConfigError::ZeroRate("packs_per_token"));
        }
        if self.wildcard_accrual.tokens_per_mythic == 0 {
            return Err(ConfigError::ZeroRate("tokens_per_mythic"));
        }
        let value = self.wildcard_accrual.future_card_value;
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::InvalidCardValue(value));
        }
        let rule = self.bonus_product;
        if rule.pinned_slots > rule.slots {
            return Err(ConfigError::PinnedSlotsExceedSlots {
                pinned: rule.pinned_slots,
                slots: rule.slots,
            });
        }
        if !self.bonus_eligible.is_empty() && !self.is_bonus_eligible(&self.most_recent) {
            return Err(ConfigError::MostRecentNotEligible(self.most_recent.clone()));
        }
        let mut seen = HashSet::new();
        for product in &self.catalog {
            if !seen.insert(product.code.as_str()) {
                return Err(ConfigError::DuplicateProduct(product.code.clone()));
            }
        }
        Ok(())
    }

    /// Larger is older. Products missing from the catalog have no age and
    /// lose every tie.
    pub fn rotation_age(&self, code: &str) -> Option<usize> {
        self.catalog.iter().position(|product| product.code == code)
    }

    pub fn is_known_product(&self, code: &str) -> bool {
        self.rotation_age(code).is_some()
    }

    pub fn is_bonus_eligible(&self, code: &str) -> bool {
        self.bonus_eligible.iter().any(|eligible| eligible == code)
    }

    /// Eligible products without duplicates, in configured order.
    pub fn eligible_products(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for code in &self.bonus_eligible {
            if !out.contains(&code.as_str()) {
                out.push(code.as_str());
            }
        }
        out
    }

    pub fn product_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.catalog
            .iter()
            .find(|product| product.code == code)
            .map(|product| product.name.as_str())
            .unwrap_or(code)
    }
}

fn default_catalog() -> Vec<ProductInfo> {
    [
        ("eoe", "Edge of Eternities"),
        ("fin", "Final Fantasy"),
        ("tdm", "Tarkir: Dragonstorm"),
        ("dft", "Aetherdrift"),
        ("pio", "Pioneer Masters"),
        ("fdn", "Foundations"),
        ("dsk", "Duskmourn: House of Horror"),
        ("blb", "Bloomburrow"),
        ("mh3", "Modern Horizons 3"),
        ("otj", "Outlaws of Thunder Junction"),
        ("mkm", "Murders at Karlov Manor"),
        ("lci", "The Lost Caverns of Ixalan"),
        ("woe", "Wilds of Eldraine"),
        ("ltr", "The Lord of the Rings: Tales of Middle-earth"),
        ("mat", "March of the Machine: The Aftermath"),
        ("mom", "March of the Machine"),
        ("one", "Phyrexia: All Will Be One"),
        ("bro", "The Brothers' War"),
        ("dmu", "Dominaria United"),
        ("hbg", "Alchemy Horizons: Baldur's Gate"),
        ("snc", "Streets of New Capenna"),
        ("neo", "Kamigawa: Neon Dynasty"),
        ("vow", "Innistrad: Crimson Vow"),
        ("mid", "Innistrad: Midnight Hunt"),
        ("afr", "Adventures in the Forgotten Realms"),
        ("stx", "Strixhaven: School of Mages"),
        ("khm", "Kaldheim"),
        ("znr", "Zendikar Rising"),
        ("m21", "Core Set 2021"),
        ("iko", "Ikoria: Lair of Behemoths"),
        ("thb", "Theros Beyond Death"),
        ("eld", "Throne of Eldraine"),
        ("m20", "Core Set 2020"),
        ("war", "War of the Spark"),
        ("rna", "Ravnica Allegiance"),
        ("grn", "Guilds of Ravnica"),
        ("m19", "Core Set 2019"),
        ("xln", "Ixalan"),
        ("dom", "Dominaria"),
        ("ktk", "Khans of Tarkir"),
        ("rix", "Rivals of Ixalan"),
        ("sir", "Shadows over Innistrad Remastered"),
        ("akr", "Amonkhet Remastered"),
        ("klr", "Kaladesh Remastered"),
    ]
    .iter()
    .map(|(code, name)| ProductInfo::new(code, name))
    .collect()
}
