use crate::{PlannerConfig, ProductScore};
use std::cmp::Ordering;

/// Total rounded to the configured precision, as an integer so ties compare
/// exactly.
pub fn rounded_score(total: f64, decimals: u32) -> i64 {
    let scale = 10f64.powi(decimals.min(12) as i32);
    (total * scale).round() as i64
}

/// Descending by rounded total; ties go to the older product, then to the
/// product code so the order is total.
pub fn compare_ranked(a: &ProductScore, b: &ProductScore, config: &PlannerConfig) -> Ordering {
    let decimals = config.score_decimals;
    rounded_score(b.total, decimals)
        .cmp(&rounded_score(a.total, decimals))
        .then_with(|| {
            config
                .rotation_age(&b.product)
                .cmp(&config.rotation_age(&a.product))
        })
        .then_with(|| a.product.cmp(&b.product))
}

pub fn rank_products(mut scores: Vec<ProductScore>, config: &PlannerConfig) -> Vec<ProductScore> {
    scores.sort_by(|a, b| compare_ranked(a, b, config));
    scores
}
