//! Fixed-price source for pairs without a live pricing feed

use async_trait::async_trait;
use cloudcorp_application::{PriceSource, SourceError};
use cloudcorp_domain::{Provider, ResourceCategory};

/// Returns a configured constant
#[derive(Debug, Clone)]
pub struct FixedPriceSource {
    provider: Provider,
    category: ResourceCategory,
    price: f64,
}

impl FixedPriceSource {
    pub fn new(provider: Provider, category: ResourceCategory, price: f64) -> Self {
        Self {
            provider,
            category,
            price,
        }
    }
}

#[async_trait]
impl PriceSource for FixedPriceSource {
    fn provider(&self) -> Provider {
        self.provider
    }

    fn category(&self) -> ResourceCategory {
        self.category
    }

    fn describe(&self) -> String {
        format!("fixed({})", self.price)
    }

    async fn lookup(&self) -> Result<f64, SourceError> {
        Ok(self.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_returns_constant() {
        let source = FixedPriceSource::new(Provider::Azure, ResourceCategory::Vpn, 0.04);
        assert_eq!(source.lookup().await.unwrap(), 0.04);
        assert_eq!(source.provider(), Provider::Azure);
        assert_eq!(source.category(), ResourceCategory::Vpn);
        assert_eq!(source.describe(), "fixed(0.04)");
    }
}
