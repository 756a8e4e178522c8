use crate::deck::{load_collection, load_deck_list, missing_quantities};
use crate::schema::{
    CardNeed, PlannerConfig, PlannerInputs, PoolSizes, PrintingsCache, Rarity, RawPoolSize,
};
use anyhow::Context;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const DECK_FILE: &str = "deck.txt";
pub const COLLECTION_FILE: &str = "collection.txt";
pub const PRINTINGS_FILE: &str = "printings.json";
pub const POOLS_FILE: &str = "pools.json";
pub const CONFIG_FILE: &str = "config.json";

/// Reads a planner config if the file exists, otherwise the built-in
/// defaults. Either way the result is validated.
pub fn load_planner_config(path: &Path) -> anyhow::Result<PlannerConfig> {
    let config: PlannerConfig = if path.exists() {
        load_json(path)?
    } else {
        PlannerConfig::default()
    };
    config
        .validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(config)
}

pub fn load_printings(path: &Path) -> anyhow::Result<PrintingsCache> {
    load_json(path)
}

/// Rows with a rarity the planner does not track are skipped.
pub fn load_pool_sizes(path: &Path) -> anyhow::Result<PoolSizes> {
    let rows: Vec<RawPoolSize> = load_json(path)?;
    let mut pools = PoolSizes::new();
    for row in rows {
        let Some(rarity) = Rarity::from_id(&row.rarity) else {
            log::debug!("pool row {} {} ignored", row.set, row.rarity);
            continue;
        };
        pools.insert(row.set.trim().to_lowercase(), rarity, row.size);
    }
    Ok(pools)
}

/// Turns missing quantities into planner rows. Cards the database does not
/// know, or that have no usable printing, are logged and returned as skipped.
pub fn build_card_needs(
    missing: &BTreeMap<String, u32>,
    printings: &PrintingsCache,
    config: &PlannerConfig,
    allowed: &[Rarity],
) -> (Vec<CardNeed>, Vec<String>) {
    let mut cards = Vec::new();
    let mut skipped = Vec::new();
    for (name, remaining) in missing {
        if printings.lookup(name).is_none() {
            log::warn!("card not found: {}", name);
            skipped.push(name.clone());
            continue;
        }
        let eligible = printings.eligible(name, config, allowed);
        match CardNeed::new(name.as_str(), *remaining, eligible) {
            Ok(card) => cards.push(card),
            Err(err) => {
                log::warn!("skipping {}: {}", name, err);
                skipped.push(name.clone());
            }
        }
    }
    (cards, skipped)
}

/// Loads one planning directory: deck list, optional collection, printings
/// cache, pool sizes and optional config.
pub fn load_inputs(dir: &Path, allowed: &[Rarity]) -> anyhow::Result<PlannerInputs> {
    let config = load_planner_config(&dir.join(CONFIG_FILE))?;
    let deck = load_deck_list(&dir.join(DECK_FILE))?;
    let collection_path = dir.join(COLLECTION_FILE);
    let owned = if collection_path.exists() {
        load_collection(&collection_path)?
    } else {
        BTreeMap::new()
    };
    let printings = load_printings(&dir.join(PRINTINGS_FILE))?;
    let pools = load_pool_sizes(&dir.join(POOLS_FILE))?;

    let missing = missing_quantities(&deck, &owned);
    let (cards, skipped) = build_card_needs(&missing, &printings, &config, allowed);
    log::info!(
        "{} deck entries, {} still missing, {} plannable, {} skipped",
        deck.len(),
        missing.len(),
        cards.len(),
        skipped.len()
    );
    Ok(PlannerInputs {
        config,
        cards,
        pools,
        skipped,
    })
}

fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}
