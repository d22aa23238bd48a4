//! Application-level configuration.
//!
//! - [`PricingParams`]: aggregation control (lookup timeout, compared providers)

pub mod pricing_params;

pub use pricing_params::PricingParams;
