//! GCP machine-type price: availability check via `gcloud`, then a price table

use async_trait::async_trait;
use cloudcorp_application::{CommandInvocation, CommandRunner, PriceSource, SourceError};
use cloudcorp_domain::{Provider, ResourceCategory};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Price used for machine types missing from the table
pub const DEFAULT_FALLBACK_PRICE: f64 = 0.02;

/// Built-in hourly prices for common machine types
pub fn default_machine_prices() -> BTreeMap<String, f64> {
    [
        ("e2-micro", 0.0076),
        ("e2-medium", 0.026),
        ("n1-standard-1", 0.0475),
    ]
    .into_iter()
    .map(|(name, price)| (name.to_string(), price))
    .collect()
}

/// Confirms the machine type exists in the zone, then quotes it from a table.
///
/// Runs `gcloud compute machine-types describe <type> --zone=<region>-a
/// --format=json`. Only the exit status is used; GCP has no unauthenticated
/// per-SKU price lookup equivalent to the other providers.
pub struct GcloudMachineTypeSource {
    runner: Arc<dyn CommandRunner>,
    program: String,
    machine_type: String,
    region: String,
    prices: BTreeMap<String, f64>,
    fallback_price: f64,
}

impl GcloudMachineTypeSource {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        machine_type: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            runner,
            program: "gcloud".to_string(),
            machine_type: machine_type.into(),
            region: region.into(),
            prices: default_machine_prices(),
            fallback_price: DEFAULT_FALLBACK_PRICE,
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_prices(mut self, prices: BTreeMap<String, f64>, fallback_price: f64) -> Self {
        self.prices = prices;
        self.fallback_price = fallback_price;
        self
    }

    pub fn invocation(&self) -> CommandInvocation {
        CommandInvocation::new(&self.program)
            .args(["compute", "machine-types", "describe"])
            .arg(&self.machine_type)
            .arg(format!("--zone={}-a", self.region))
            .arg("--format=json")
    }

    fn table_price(&self) -> f64 {
        self.prices
            .get(&self.machine_type)
            .copied()
            .unwrap_or(self.fallback_price)
    }
}

#[async_trait]
impl PriceSource for GcloudMachineTypeSource {
    fn provider(&self) -> Provider {
        Provider::Gcp
    }

    fn category(&self) -> ResourceCategory {
        ResourceCategory::Compute
    }

    fn describe(&self) -> String {
        let (machine, region) = (&self.machine_type, &self.region);
        format!("gcloud-machine-type({}, {})", machine, region)
    }

    async fn lookup(&self) -> Result<f64, SourceError> {
        let output = self.runner.run(&self.invocation()).await?;
        if !output.success() {
            return Err(SourceError::NonZeroExit {
                code: output.exit_code,
                stderr: output.stderr.trim().to_string(),
            });
        }
        Ok(self.table_price())
    }
}
