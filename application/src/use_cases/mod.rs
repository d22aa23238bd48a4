//! Use cases (application services)
//!
//! - [`compare_prices`]: concurrent price aggregation and ranking
//! - [`provision_instance`]: resolve wizard answers and launch one instance

pub mod compare_prices;
pub mod provision_instance;
