use packwise_core::{CraftPhase, PlanRun, PoolSizeProvider, Rarity, WildcardBudget};
use packwise_data::{load_inputs, load_planner_config, load_pool_sizes, POOLS_FILE};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

fn assets_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("assets")
}

fn sample_dir() -> PathBuf {
    assets_root().join("sample")
}

fn unique_temp_dir(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "packwise_data_{}_{}_{}",
        tag,
        std::process::id(),
        nanos
    ));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn copy_sample(to: &Path, skip: &[&str]) {
    for entry in fs::read_dir(sample_dir()).expect("read sample") {
        let entry = entry.expect("entry");
        let name = entry.file_name();
        if skip.iter().any(|s| name.to_str() == Some(*s)) {
            continue;
        }
        fs::copy(entry.path(), to.join(name)).expect("copy");
    }
}

#[test]
fn loads_sample_directory() {
    let inputs = load_inputs(&sample_dir(), &Rarity::ALL).expect("load sample");

    assert_eq!(inputs.config.protected_count, 2);
    assert_eq!(inputs.config.most_recent, "eoe");
    assert_eq!(inputs.pools.len(), 10);
    assert_eq!(inputs.pools.pool_size("pio", Rarity::Rare), 96);

    let mut names: Vec<_> = inputs.cards.iter().map(|card| card.name.as_str()).collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "Fear of Missing Out",
            "Mosswood Dreadknight",
            "Overlord of the Hauntwoods",
            "Sheoldred, the Apocalypse",
            "The Wandering Emperor",
        ]
    );
    assert_eq!(
        inputs.skipped,
        vec![
            "Go for the Throat".to_string(),
            "Llanowar Elves".to_string(),
            "Unknown Homebrew Card".to_string(),
        ]
    );
    let sheoldred = inputs
        .cards
        .iter()
        .find(|card| card.name == "Sheoldred, the Apocalypse")
        .expect("sheoldred");
    assert_eq!(sheoldred.remaining(), 2);
    assert_eq!(sheoldred.craft_rarity(), Rarity::Rare);
}

#[test]
fn sample_ranking_and_plan() {
    let inputs = load_inputs(&sample_dir(), &Rarity::ALL).expect("load sample");
    let run = PlanRun::new(&inputs.config, &inputs.pools, inputs.cards.clone());

    let ranked = run.rank();
    let order: Vec<_> = ranked.iter().map(|s| s.product.as_str()).collect();
    assert_eq!(order, vec!["dsk", "woe", "pio", "neo", "dmu"]);

    let report = run.plan(WildcardBudget::new(2, 1));
    assert_eq!(report.protected, vec!["dsk".to_string(), "woe".to_string()]);
    let crafted: Vec<_> = report
        .crafts
        .iter()
        .map(|record| (record.rarity, record.card.as_str(), record.remaining_after))
        .collect();
    assert_eq!(
        crafted,
        vec![
            (Rarity::Rare, "Sheoldred, the Apocalypse", 1),
            (Rarity::Mythic, "The Wandering Emperor", 1),
            (Rarity::Rare, "Sheoldred, the Apocalypse", 0),
        ]
    );
    assert!(report.crafts.iter().all(|r| r.phase == CraftPhase::Safe));
    assert_eq!(report.summary.len(), 2);
    assert_eq!(report.summary[0].count, 2);
    let after: Vec<_> = report.after.iter().map(|s| s.product.as_str()).collect();
    assert_eq!(after, vec!["dsk", "woe", "neo"]);
}

#[test]
fn mythic_only_filter_drops_rare_printings() {
    let inputs = load_inputs(&sample_dir(), &[Rarity::Mythic]).expect("load sample");
    let sheoldred = inputs
        .cards
        .iter()
        .find(|card| card.name == "Sheoldred, the Apocalypse")
        .expect("sheoldred");
    assert_eq!(sheoldred.craft_rarity(), Rarity::Mythic);
    assert!(inputs.skipped.contains(&"Fear of Missing Out".to_string()));
}

#[test]
fn collection_and_config_are_optional() {
    let dir = unique_temp_dir("optional");
    copy_sample(&dir, &["collection.txt", "config.json"]);

    let inputs = load_inputs(&dir, &Rarity::ALL).expect("load without optional files");
    assert_eq!(inputs.config.protected_count, 3);
    let sheoldred = inputs
        .cards
        .iter()
        .find(|card| card.name == "Sheoldred, the Apocalypse")
        .expect("sheoldred");
    assert_eq!(sheoldred.remaining(), 3);
    assert!(inputs.cards.iter().any(|card| card.name == "Fable of the Mirror-Breaker"));

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn invalid_config_is_rejected() {
    let dir = unique_temp_dir("config");
    let path = dir.join("config.json");
    fs::write(&path, r#"{ "bonus_product": { "slots": 1, "pinned_slots": 3 } }"#).expect("write");

    let err = load_planner_config(&path).expect_err("pinned slots exceed slots");
    assert!(err.to_string().contains("validate"));

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn malformed_pool_file_names_the_path() {
    let dir = unique_temp_dir("pools");
    let path = dir.join(POOLS_FILE);
    fs::write(&path, "[{ \"set\": \"dsk\" ").expect("write");

    let err = load_pool_sizes(&path).expect_err("truncated json");
    assert!(err.to_string().contains(POOLS_FILE));

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn missing_deck_is_an_error() {
    let dir = unique_temp_dir("nodeck");
    copy_sample(&dir, &["deck.txt"]);

    let err = load_inputs(&dir, &Rarity::ALL).expect_err("deck is required");
    assert!(format!("{:#}", err).contains("deck.txt"));

    let _ = fs::remove_dir_all(dir);
}
