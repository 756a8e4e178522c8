use packwise_core::{CardNeed, CraftSummary, PlanReport, PlannerConfig, ProductScore};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;

/// JSON shape for `rank`.
#[derive(Debug, Serialize)]
pub struct RankOutput<'a> {
    pub ranked: Vec<&'a ProductScore>,
    pub skipped: &'a [String],
}

/// JSON shape for `plan`.
#[derive(Debug, Serialize)]
pub struct PlanOutput<'a> {
    #[serde(flatten)]
    pub report: &'a PlanReport,
    pub skipped: &'a [String],
}

/// Products worth opening, best first. Zero-score products are left out.
pub fn visible_scores(scores: &[ProductScore], top: usize) -> Vec<&ProductScore> {
    scores
        .iter()
        .filter(|score| score.total > 0.0)
        .take(top)
        .collect()
}

pub fn format_ranking(
    title: &str,
    scores: &[ProductScore],
    config: &PlannerConfig,
    top: usize,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count()));
    let visible = visible_scores(scores, top);
    if visible.is_empty() {
        let _ = writeln!(out, "  (no product offers a needed card)");
        return out;
    }
    for (rank, score) in visible.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}. {} ({}): {:.3}  [direct {:.3}, bonus {:.3}, wildcard {:.3}]",
            rank + 1,
            config.product_name(&score.product),
            score.product.to_uppercase(),
            score.total,
            score.direct,
            score.bonus,
            score.wildcard
        );
    }
    out
}

pub fn format_crafts(summary: &[CraftSummary]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Wildcards spent");
    let _ = writeln!(out, "===============");
    if summary.is_empty() {
        let _ = writeln!(out, "  (none)");
        return out;
    }
    for entry in summary {
        let _ = writeln!(
            out,
            "  {} x{} {} ({} still needed)",
            entry.rarity, entry.count, entry.card, entry.remaining_after
        );
    }
    out
}

/// Outstanding cards grouped under each product they can be opened from.
/// Products follow `order` first, then code order.
pub fn format_remaining(
    cards: &[CardNeed],
    order: &[ProductScore],
    config: &PlannerConfig,
) -> String {
    let mut by_product: BTreeMap<&str, Vec<(&str, u32)>> = BTreeMap::new();
    for card in cards.iter().filter(|card| card.remaining() > 0) {
        for product in card.products() {
            by_product
                .entry(product)
                .or_default()
                .push((card.name.as_str(), card.remaining()));
        }
    }

    let mut products: Vec<&str> = order
        .iter()
        .map(|score| score.product.as_str())
        .filter(|product| by_product.contains_key(product))
        .collect();
    for product in by_product.keys() {
        if !products.contains(product) {
            products.push(product);
        }
    }

    let mut out = String::new();
    let _ = writeln!(out, "Still needed");
    let _ = writeln!(out, "============");
    if products.is_empty() {
        let _ = writeln!(out, "  (deck complete)");
        return out;
    }
    for product in products {
        let _ = writeln!(
            out,
            "{} ({}):",
            config.product_name(product),
            product.to_uppercase()
        );
        let mut entries = by_product.remove(product).unwrap_or_default();
        entries.sort();
        for (name, remaining) in entries {
            let _ = writeln!(out, "   - {} (x{})", name, remaining);
        }
    }
    out
}

pub fn format_plan(report: &PlanReport, config: &PlannerConfig, top: usize) -> String {
    let mut out = String::new();
    out.push_str(&format_ranking("Before wildcards", &report.before, config, top));
    out.push('\n');
    let protected: Vec<String> = report
        .protected
        .iter()
        .map(|code| code.to_uppercase())
        .collect();
    if protected.is_empty() {
        let _ = writeln!(out, "Protected: -");
    } else {
        let _ = writeln!(out, "Protected: {}", protected.join(", "));
    }
    out.push('\n');
    out.push_str(&format_crafts(&report.summary));
    let _ = writeln!(
        out,
        "  unspent: {} rare, {} mythic",
        report.unspent.rare, report.unspent.mythic
    );
    out.push('\n');
    out.push_str(&format_ranking("After wildcards", &report.after, config, top));
    out.push('\n');
    out.push_str(&format_remaining(&report.cards, &report.after, config));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use packwise_core::{Printing, Rarity};

    fn score(product: &str, total: f64) -> ProductScore {
        ProductScore {
            product: product.to_string(),
            direct: total,
            total,
            ..ProductScore::default()
        }
    }

    #[test]
    fn zero_scores_are_hidden() {
        let scores = vec![score("dsk", 0.3), score("blb", 0.1), score("fdn", 0.0)];
        let visible = visible_scores(&scores, 10);
        assert_eq!(visible.len(), 2);
        assert_eq!(visible_scores(&scores, 1).len(), 1);
    }

    #[test]
    fn ranking_uses_product_names() {
        let config = PlannerConfig::default();
        let text = format_ranking("Ranking", &[score("blb", 0.25)], &config, 5);
        assert!(text.contains("1. Bloomburrow (BLB): 0.250"));
    }

    #[test]
    fn remaining_groups_by_product() {
        let config = PlannerConfig::default();
        let cards = vec![
            CardNeed::new(
                "Sheoldred, the Apocalypse",
                2,
                [
                    Printing::new("dmu", Rarity::Mythic),
                    Printing::new("pio", Rarity::Rare),
                ],
            )
            .expect("need"),
            CardNeed::new("Cut Down", 0, [Printing::new("dmu", Rarity::Rare)]).expect("need"),
        ];
        let text = format_remaining(&cards, &[score("pio", 0.1)], &config);
        let pio = text.find("Pioneer Masters (PIO)").expect("pio listed");
        let dmu = text.find("Dominaria United (DMU)").expect("dmu listed");
        assert!(pio < dmu);
        assert!(text.contains("   - Sheoldred, the Apocalypse (x2)"));
        assert!(!text.contains("Cut Down"));
    }
}
