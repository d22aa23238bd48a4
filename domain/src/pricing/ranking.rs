//! Cheapest-provider selection

use crate::pricing::{
    category::ResourceCategory,
    provider::Provider,
    table::{PriceRow, PriceTable},
};
use serde::{Deserialize, Serialize};

/// Cheapest provider for one category.
///
/// `winner` and `price` are both `None` when no provider had a price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingResult {
    pub category: ResourceCategory,
    pub winner: Option<Provider>,
    pub price: Option<f64>,
}

/// Select the minimum defined price in a row.
///
/// Providers are scanned in [`Provider`] order and only a strictly lower price
/// replaces the current best, so ties go to the earlier provider.
pub fn rank(category: ResourceCategory, row: &PriceRow) -> RankingResult {
    let mut best: Option<(Provider, f64)> = None;

    for (provider, quote) in row {
        let Some(price) = quote.unit_price else {
            continue;
        };
        match best {
            Some((_, best_price)) if price >= best_price => {}
            _ => best = Some((*provider, price)),
        }
    }

    RankingResult {
        category,
        winner: best.map(|(provider, _)| provider),
        price: best.map(|(_, price)| price),
    }
}

/// Rank every row of a table in category order
pub fn rank_table(table: &PriceTable) -> Vec<RankingResult> {
    table
        .rows()
        .map(|(category, row)| rank(category, row))
        .collect()
}
