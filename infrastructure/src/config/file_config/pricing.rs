//! Price source configuration from TOML (`[pricing]` section)
//!
//! Each `[[pricing.sources]]` entry replaces the built-in source for one
//! (provider, category) pair:
//!
//! ```toml
//! [[pricing.sources]]
//! provider = "azure"
//! category = "compute"
//! kind = "azure-retail"
//! sku = "Standard_B1s"
//! ```

use cloudcorp_domain::{Provider, ResourceCategory};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Default per-lookup timeout
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Raw pricing configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePricingConfig {
    /// Timeout for each individual lookup; there is no unbounded setting
    pub timeout_seconds: u64,
    /// Providers to compare, in any order
    pub providers: Vec<Provider>,
    /// Per-pair overrides of the built-in sources
    pub sources: Vec<FileSourceConfig>,
}

impl Default for FilePricingConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            providers: Provider::ALL.to_vec(),
            sources: Vec::new(),
        }
    }
}

impl FilePricingConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// One configured price source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileSourceConfig {
    pub provider: Provider,
    pub category: ResourceCategory,
    #[serde(flatten)]
    pub strategy: SourceStrategy,
}

impl FileSourceConfig {
    pub fn new(provider: Provider, category: ResourceCategory, strategy: SourceStrategy) -> Self {
        Self {
            provider,
            category,
            strategy,
        }
    }
}

/// How a price is obtained
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SourceStrategy {
    /// `aws pricing get-products` for an instance type in a location
    AwsPricingCli {
        instance_type: String,
        /// Price List location name, e.g. "US East (N. Virginia)"
        location: String,
    },
    /// Azure Retail Prices API for a VM SKU
    AzureRetail {
        sku: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        endpoint: Option<String>,
    },
    /// `gcloud compute machine-types describe` plus a price table
    GcloudMachineType {
        machine_type: String,
        region: String,
        /// Replaces the built-in machine-type table when set
        #[serde(default, skip_serializing_if = "Option::is_none")]
        prices: Option<BTreeMap<String, f64>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fallback_price: Option<f64>,
    },
    /// A constant price
    Fixed { price: f64 },
}

impl SourceStrategy {
    /// Short strategy tag as written in TOML
    pub fn kind(&self) -> &'static str {
        match self {
            SourceStrategy::AwsPricingCli { .. } => "aws-pricing-cli",
            SourceStrategy::AzureRetail { .. } => "azure-retail",
            SourceStrategy::GcloudMachineType { .. } => "gcloud-machine-type",
            SourceStrategy::Fixed { .. } => "fixed",
        }
    }

    /// First configured price that is negative or not finite
    pub(crate) fn invalid_price(&self) -> Option<f64> {
        let bad = |p: f64| !p.is_finite() || p < 0.0;
        match self {
            SourceStrategy::Fixed { price } => Some(*price).filter(|p| bad(*p)),
            SourceStrategy::GcloudMachineType {
                prices,
                fallback_price,
                ..
            } => {
                let table = prices.iter().flat_map(|t| t.values().copied());
                let mut all = fallback_price.iter().copied().chain(table);
                all.find(|p| bad(*p))
            }
            _ => None,
        }
    }
}
