//! Price table aggregate

use crate::pricing::{category::ResourceCategory, provider::Provider, quote::PriceQuote};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One category's quotes keyed by provider, iterated in provider order
pub type PriceRow = BTreeMap<Provider, PriceQuote>;

/// Quotes for every collected (category, provider) cell.
///
/// A missing cell means "not collected"; a present cell whose quote has no
/// price means "collected, unavailable".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceTable {
    rows: BTreeMap<ResourceCategory, PriceRow>,
}

impl PriceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a quote into its (category, provider) cell.
    ///
    /// Returns the quote previously held by that cell, if any.
    pub fn insert(&mut self, quote: PriceQuote) -> Option<PriceQuote> {
        self.rows
            .entry(quote.category)
            .or_default()
            .insert(quote.provider, quote)
    }

    /// Get the row for a category
    pub fn row(&self, category: ResourceCategory) -> Option<&PriceRow> {
        self.rows.get(&category)
    }

    /// Get a single cell
    pub fn get(&self, category: ResourceCategory, provider: Provider) -> Option<&PriceQuote> {
        self.rows.get(&category).and_then(|row| row.get(&provider))
    }

    /// Iterate rows in category order
    pub fn rows(&self) -> impl Iterator<Item = (ResourceCategory, &PriceRow)> {
        self.rows.iter().map(|(category, row)| (*category, row))
    }

    /// Categories that have at least one collected cell
    pub fn categories(&self) -> impl Iterator<Item = ResourceCategory> + '_ {
        self.rows.keys().copied()
    }

    /// Number of collected cells
    pub fn len(&self) -> usize {
        self.rows.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
