//! Price Source Registry
//!
//! The [`PriceSourceRegistry`] turns configuration into one
//! [`PriceSource`] per (provider, category) pair. It starts from the
//! built-in table and lets each `[[pricing.sources]]` entry replace a single
//! pair, so overriding Azure storage does not disturb anything else.
//!
//! # Usage
//!
//! ```ignore
//! let registry = PriceSourceRegistry::new(runner, fetcher).with_tools(&config.tools);
//! let sources = registry.build(&config.pricing.sources)?;
//! let use_case = ComparePricesUseCase::new(sources);
//! ```
//!
//! # Built-in sources
//!
//! | | AWS | Azure | GCP |
//! |-|-----|-------|-----|
//! | Compute | `aws pricing` t2.micro | Retail API Basic_A1 | `gcloud` e2-micro |
//! | VPN | 0.05 | 0.04 | 0.05 |
//! | Storage | 0.023 | 0.0184 | 0.020 |

use super::{
    AwsPricingCliSource, AzureRetailPriceSource, DEFAULT_FALLBACK_PRICE, FixedPriceSource,
    GcloudMachineTypeSource, default_machine_prices,
};
use crate::config::{FileSourceConfig, FileToolsConfig, SourceStrategy};
use cloudcorp_application::{CommandRunner, JsonFetcher, PriceSource};
use cloudcorp_domain::{Provider, ResourceCategory};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Strategies that only exist for one provider's compute offering
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} cannot price {provider} {category}")]
pub struct UnsupportedSourceError {
    pub kind: &'static str,
    pub provider: Provider,
    pub category: ResourceCategory,
}

/// Built-in source configuration for every pair
pub fn default_source_configs() -> Vec<FileSourceConfig> {
    use Provider::*;
    use ResourceCategory::*;

    let fixed = |provider, category, price| {
        FileSourceConfig::new(provider, category, SourceStrategy::Fixed { price })
    };

    vec![
        FileSourceConfig::new(
            Aws,
            Compute,
            SourceStrategy::AwsPricingCli {
                instance_type: "t2.micro".to_string(),
                location: "US East (N. Virginia)".to_string(),
            },
        ),
        FileSourceConfig::new(
            Azure,
            Compute,
            SourceStrategy::AzureRetail {
                sku: "Basic_A1".to_string(),
                endpoint: None,
            },
        ),
        FileSourceConfig::new(
            Gcp,
            Compute,
            SourceStrategy::GcloudMachineType {
                machine_type: "e2-micro".to_string(),
                region: "us-central1".to_string(),
                prices: None,
                fallback_price: None,
            },
        ),
        fixed(Aws, Vpn, 0.05),
        fixed(Azure, Vpn, 0.04),
        fixed(Gcp, Vpn, 0.05),
        fixed(Aws, Storage, 0.023),
        fixed(Azure, Storage, 0.0184),
        fixed(Gcp, Storage, 0.020),
    ]
}

/// Builds price sources from configuration
pub struct PriceSourceRegistry {
    runner: Arc<dyn CommandRunner>,
    fetcher: Arc<dyn JsonFetcher>,
    tools: FileToolsConfig,
}

impl PriceSourceRegistry {
    pub fn new(runner: Arc<dyn CommandRunner>, fetcher: Arc<dyn JsonFetcher>) -> Self {
        Self {
            runner,
            fetcher,
            tools: FileToolsConfig::default(),
        }
    }

    /// Use configured `aws`/`gcloud` executables
    pub fn with_tools(mut self, tools: &FileToolsConfig) -> Self {
        self.tools = tools.clone();
        self
    }

    /// Merge `overrides` over the built-in table and build one source per pair.
    ///
    /// Later entries for the same pair win.
    pub fn build(
        &self,
        overrides: &[FileSourceConfig],
    ) -> Result<Vec<Arc<dyn PriceSource>>, UnsupportedSourceError> {
        let mut merged: BTreeMap<(ResourceCategory, Provider), SourceStrategy> =
            BTreeMap::new();
        for entry in default_source_configs().iter().chain(overrides) {
            merged.insert((entry.category, entry.provider), entry.strategy.clone());
        }

        merged
            .into_iter()
            .map(|((category, provider), strategy)| {
                let source = self.build_one(provider, category, strategy)?;
                debug!(
                    "Price source for {} {}: {}",
                    provider,
                    category,
                    source.describe()
                );
                Ok(source)
            })
            .collect()
    }

    fn build_one(
        &self,
        provider: Provider,
        category: ResourceCategory,
        strategy: SourceStrategy,
    ) -> Result<Arc<dyn PriceSource>, UnsupportedSourceError> {
        let kind = strategy.kind();
        let unsupported = || UnsupportedSourceError {
            kind,
            provider,
            category,
        };

        let source: Arc<dyn PriceSource> = match strategy {
            SourceStrategy::Fixed { price } => {
                Arc::new(FixedPriceSource::new(provider, category, price))
            }
            SourceStrategy::AwsPricingCli {
                instance_type,
                location,
            } => {
                if (provider, category) != (Provider::Aws, ResourceCategory::Compute) {
                    return Err(unsupported());
                }
                Arc::new(
                    AwsPricingCliSource::new(self.runner.clone(), instance_type, location)
                        .with_program(&self.tools.aws),
                )
            }
            SourceStrategy::AzureRetail { sku, endpoint } => {
                if (provider, category) != (Provider::Azure, ResourceCategory::Compute) {
                    return Err(unsupported());
                }
                let source = AzureRetailPriceSource::new(self.fetcher.clone(), sku);
                match endpoint {
                    Some(endpoint) => Arc::new(source.with_endpoint(endpoint)),
                    None => Arc::new(source),
                }
            }
            SourceStrategy::GcloudMachineType {
                machine_type,
                region,
                prices,
                fallback_price,
            } => {
                if (provider, category) != (Provider::Gcp, ResourceCategory::Compute) {
                    return Err(unsupported());
                }
                let source =
                    GcloudMachineTypeSource::new(self.runner.clone(), machine_type, region)
                        .with_program(&self.tools.gcloud);
                if prices.is_some() || fallback_price.is_some() {
                    Arc::new(source.with_prices(
                        prices.unwrap_or_else(default_machine_prices),
                        fallback_price.unwrap_or(DEFAULT_FALLBACK_PRICE),
                    ))
                } else {
                    Arc::new(source)
                }
            }
        };

        Ok(source)
    }
}
