//! Price source adapters
//!
//! One [`PriceSource`](cloudcorp_application::PriceSource) implementation per
//! lookup strategy, plus the [`PriceSourceRegistry`] that picks one per
//! (provider, category) pair from configuration.

mod aws_pricing;
mod azure_retail;
mod fixed;
mod gcloud;
mod registry;

pub use aws_pricing::{AwsPricingCliSource, PRICING_API_REGION, parse_get_products};
pub use azure_retail::{AZURE_RETAIL_PRICES_URL, AzureRetailPriceSource, parse_retail_prices};
pub use fixed::FixedPriceSource;
pub use gcloud::{DEFAULT_FALLBACK_PRICE, GcloudMachineTypeSource, default_machine_prices};
pub use registry::{PriceSourceRegistry, UnsupportedSourceError, default_source_configs};
