//! Pricing parameters for price aggregation
//!
//! [`PricingParams`] groups the static parameters that control how
//! [`ComparePricesUseCase`](crate::use_cases::compare_prices::ComparePricesUseCase)
//! drives its price sources.

use cloudcorp_domain::Provider;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Aggregation control parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingParams {
    /// Upper bound for a single source lookup. `None` waits indefinitely.
    pub lookup_timeout: Option<Duration>,
    /// Providers compared for every requested category, in column order.
    pub providers: Vec<Provider>,
}

impl Default for PricingParams {
    fn default() -> Self {
        Self {
            lookup_timeout: Some(Duration::from_secs(30)),
            providers: Provider::ALL.to_vec(),
        }
    }
}

impl PricingParams {
    pub fn with_lookup_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    /// Restrict the compared providers; kept in fixed provider order without duplicates
    pub fn with_providers(mut self, mut providers: Vec<Provider>) -> Self {
        providers.sort();
        providers.dedup();
        self.providers = providers;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = PricingParams::default();
        assert_eq!(params.lookup_timeout, Some(Duration::from_secs(30)));
        assert_eq!(params.providers, Provider::ALL.to_vec());
    }

    #[test]
    fn test_builder() {
        let params = PricingParams::default()
            .with_lookup_timeout(None)
            .with_providers(vec![Provider::Gcp]);
        assert!(params.lookup_timeout.is_none());
        assert_eq!(params.providers, vec![Provider::Gcp]);
    }

    #[test]
    fn test_providers_are_ordered() {
        let params = PricingParams::default().with_providers(vec![
            Provider::Gcp,
            Provider::Aws,
            Provider::Gcp,
        ]);
        assert_eq!(params.providers, vec![Provider::Aws, Provider::Gcp]);
    }
}
