//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod output;
mod pricing;
mod provisioning;
mod tools;

pub use output::FileOutputConfig;
pub use pricing::{FilePricingConfig, FileSourceConfig, SourceStrategy};
pub use provisioning::FileProvisioningConfig;
pub use tools::FileToolsConfig;

use cloudcorp_domain::{Provider, ResourceCategory};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigValidationError {
    #[error("{field} cannot be 0")]
    ZeroTimeout { field: &'static str },

    #[error("price for {provider} {category} must be a non-negative number, got {price}")]
    InvalidPrice {
        provider: Provider,
        category: ResourceCategory,
        price: f64,
    },

    #[error("more than one [[pricing.sources]] entry for {provider} {category}")]
    DuplicateSource {
        provider: Provider,
        category: ResourceCategory,
    },

    #[error("provisioning.default_region '{0}' is not in provisioning.regions")]
    UnknownDefaultRegion(String),

    #[error("provisioning.default_storage_gb cannot be 0")]
    ZeroStorage,

    #[error("pricing.providers cannot be empty")]
    NoProviders,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Price lookup settings
    pub pricing: FilePricingConfig,
    /// External tool locations
    pub tools: FileToolsConfig,
    /// Deploy wizard defaults
    pub provisioning: FileProvisioningConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.pricing.timeout_seconds == 0 {
            return Err(ConfigValidationError::ZeroTimeout {
                field: "pricing.timeout_seconds",
            });
        }
        if self.provisioning.launch_timeout_seconds == 0 {
            return Err(ConfigValidationError::ZeroTimeout {
                field: "provisioning.launch_timeout_seconds",
            });
        }

        if self.pricing.providers.is_empty() {
            return Err(ConfigValidationError::NoProviders);
        }

        let mut seen = BTreeSet::new();
        for source in &self.pricing.sources {
            if !seen.insert((source.provider, source.category)) {
                return Err(ConfigValidationError::DuplicateSource {
                    provider: source.provider,
                    category: source.category,
                });
            }
            if let Some(price) = source.strategy.invalid_price() {
                return Err(ConfigValidationError::InvalidPrice {
                    provider: source.provider,
                    category: source.category,
                    price,
                });
            }
        }

        if self.provisioning.default_storage_gb == 0 {
            return Err(ConfigValidationError::ZeroStorage);
        }

        let default_region = &self.provisioning.default_region;
        if !self
            .provisioning
            .regions
            .iter()
            .any(|r| &r.region == default_region)
        {
            return Err(ConfigValidationError::UnknownDefaultRegion(
                default_region.clone(),
            ));
        }

        Ok(())
    }
}
