//! Pricing subdomain: categories, providers, quotes, the price table and ranking.

pub mod category;
pub mod provider;
pub mod quote;
pub mod ranking;
pub mod table;

pub use category::ResourceCategory;
pub use provider::Provider;
pub use quote::{PriceQuote, PriceUnit};
pub use ranking::{RankingResult, rank, rank_table};
pub use table::{PriceRow, PriceTable};
