//! Azure VM price via the public Retail Prices REST API

use async_trait::async_trait;
use cloudcorp_application::{JsonFetcher, PriceSource, SourceError, price_from_json};
use cloudcorp_domain::{Provider, ResourceCategory};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// Unauthenticated retail prices endpoint
pub const AZURE_RETAIL_PRICES_URL: &str = "https://prices.azure.com/api/retail/prices";

/// Looks up the retail price of one VM SKU.
///
/// Issues a single GET filtered on `serviceName` and `armSkuName` and reads
/// `retailPrice` from the first returned item.
pub struct AzureRetailPriceSource {
    fetcher: Arc<dyn JsonFetcher>,
    endpoint: String,
    service_name: String,
    sku_name: String,
}

impl AzureRetailPriceSource {
    pub fn new(fetcher: Arc<dyn JsonFetcher>, sku_name: impl Into<String>) -> Self {
        Self {
            fetcher,
            endpoint: AZURE_RETAIL_PRICES_URL.to_string(),
            service_name: "Virtual Machines".to_string(),
            sku_name: sku_name.into(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// OData `$filter` expression for this SKU
    pub fn filter(&self) -> String {
        format!(
            "serviceName eq '{}' and armSkuName eq '{}'",
            self.service_name, self.sku_name
        )
    }
}

#[async_trait]
impl PriceSource for AzureRetailPriceSource {
    fn provider(&self) -> Provider {
        Provider::Azure
    }

    fn category(&self) -> ResourceCategory {
        ResourceCategory::Compute
    }

    fn describe(&self) -> String {
        format!("azure-retail({})", self.sku_name)
    }

    async fn lookup(&self) -> Result<f64, SourceError> {
        let filter = self.filter();
        let body = self
            .fetcher
            .get_json(&self.endpoint, &[("$filter", filter.as_str())])
            .await?;
        parse_retail_prices(body)
    }
}

#[derive(Debug, Deserialize)]
struct RetailPricesPage {
    #[serde(rename = "Items", default)]
    items: Vec<Value>,
}

/// Read `retailPrice` from the first item of a Retail Prices page
pub fn parse_retail_prices(body: Value) -> Result<f64, SourceError> {
    let page: RetailPricesPage = serde_json::from_value(body)
        .map_err(|e| SourceError::Parse(format!("retail prices page: {}", e)))?;

    let item = page.items.first().ok_or(SourceError::NoMatchingRecord)?;
    let price = item
        .get("retailPrice")
        .ok_or_else(|| SourceError::Parse("item has no retailPrice".to_string()))?;

    price_from_json(price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeFetcher;
    use serde_json::json;

    #[test]
    fn test_parse_first_item() {
        let body = json!({
            "BillingCurrency": "USD",
            "Items": [
                {"armSkuName": "Basic_A1", "retailPrice": 0.018, "armRegionName": "eastus"},
                {"armSkuName": "Basic_A1", "retailPrice": 0.024, "armRegionName": "westeurope"}
            ],
            "Count": 2
        });
        assert_eq!(parse_retail_prices(body).unwrap(), 0.018);
    }

    #[test]
    fn test_parse_empty_items() {
        let body = json!({"Items": [], "Count": 0});
        assert_eq!(
            parse_retail_prices(body).unwrap_err(),
            SourceError::NoMatchingRecord
        );
    }

    #[test]
    fn test_parse_missing_items_key() {
        assert_eq!(
            parse_retail_prices(json!({"error": "throttled"})).unwrap_err(),
            SourceError::NoMatchingRecord
        );
    }

    #[test]
    fn test_parse_non_numeric_price() {
        let body = json!({"Items": [{"retailPrice": "free"}]});
        assert!(matches!(
            parse_retail_prices(body),
            Err(SourceError::InvalidPrice(_))
        ));
    }

    #[test]
    fn test_parse_item_without_price() {
        let body = json!({"Items": [{"armSkuName": "Basic_A1"}]});
        assert!(matches!(
            parse_retail_prices(body),
            Err(SourceError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn test_lookup_sends_filter() {
        let fetcher = Arc::new(FakeFetcher::returning(Ok(json!({
            "Items": [{"retailPrice": 0.018}]
        }))));
        let source = AzureRetailPriceSource::new(fetcher.clone(), "Basic_A1");

        assert_eq!(source.lookup().await.unwrap(), 0.018);

        let requests = fetcher.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, AZURE_RETAIL_PRICES_URL);
        assert_eq!(
            requests[0].1,
            vec![(
                "$filter".to_string(),
                "serviceName eq 'Virtual Machines' and armSkuName eq 'Basic_A1'".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_lookup_transport_failure() {
        let fetcher = Arc::new(FakeFetcher::returning(Err(SourceError::Transport(
            "dns error".to_string(),
        ))));
        let source = AzureRetailPriceSource::new(fetcher, "Basic_A1")
            .with_endpoint("http://localhost:1/prices");

        assert!(matches!(
            source.lookup().await,
            Err(SourceError::Transport(_))
        ));
    }
}
