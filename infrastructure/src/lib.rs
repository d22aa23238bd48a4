//! Infrastructure layer for cloudcorp
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod http;
pub mod pricing;
pub mod process;
pub mod provisioning;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileOutputConfig, FilePricingConfig,
    FileProvisioningConfig, FileSourceConfig, FileToolsConfig, SourceStrategy,
};
pub use http::ReqwestJsonFetcher;
pub use pricing::{PriceSourceRegistry, UnsupportedSourceError, default_source_configs};
pub use process::ProcessCommandRunner;
pub use provisioning::AwsCliInstanceLauncher;
