//! Application layer for cloudcorp
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::PricingParams;
pub use ports::{
    command_runner::{CommandError, CommandInvocation, CommandOutput, CommandRunner},
    instance_launcher::{InstanceLauncher, LaunchError},
    json_fetcher::JsonFetcher,
    price_source::{PriceSource, SourceError, price_from_json},
    progress::{NoProgress, ProgressNotifier},
};
pub use use_cases::compare_prices::{
    ComparePricesError, ComparePricesInput, ComparePricesUseCase, ComparisonReport,
};
pub use use_cases::provision_instance::ProvisionInstanceUseCase;
