//! Price quote value objects

use crate::pricing::{category::ResourceCategory, provider::Provider};
use serde::{Deserialize, Serialize};

/// Unit a quoted price is normalized to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceUnit {
    PerHour,
    PerGbMonth,
}

impl PriceUnit {
    /// Short suffix for display, e.g. `$0.05/hr`
    pub fn suffix(&self) -> &'static str {
        match self {
            PriceUnit::PerHour => "hr",
            PriceUnit::PerGbMonth => "GB-month",
        }
    }
}

/// One price observation for a provider and category.
///
/// `unit_price` is `None` when the source failed or had no matching record.
/// A quote never carries a negative or non-finite price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub provider: Provider,
    pub category: ResourceCategory,
    pub unit_price: Option<f64>,
    pub unit: PriceUnit,
}

impl PriceQuote {
    /// Creates a quote carrying a price.
    ///
    /// Negative, NaN or infinite prices are stored as absent.
    pub fn available(provider: Provider, category: ResourceCategory, price: f64) -> Self {
        let unit_price = (price.is_finite() && price >= 0.0).then_some(price);
        Self {
            provider,
            category,
            unit_price,
            unit: category.unit(),
        }
    }

    /// Creates a quote for a source that produced no usable price.
    pub fn unavailable(provider: Provider, category: ResourceCategory) -> Self {
        Self {
            provider,
            category,
            unit_price: None,
            unit: category.unit(),
        }
    }

    /// Returns `true` if this quote carries a price.
    pub fn is_available(&self) -> bool {
        self.unit_price.is_some()
    }
}
