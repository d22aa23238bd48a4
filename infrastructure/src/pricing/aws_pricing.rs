//! AWS EC2 on-demand price via `aws pricing get-products`

use async_trait::async_trait;
use cloudcorp_application::{
    CommandInvocation, CommandRunner, PriceSource, SourceError, price_from_json,
};
use cloudcorp_domain::{Provider, ResourceCategory};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// The Price List API is only served from a few regions; us-east-1 is one.
pub const PRICING_API_REGION: &str = "us-east-1";

/// Looks up the on-demand hourly price of one instance type.
///
/// Runs:
///
/// ```text
/// aws pricing get-products --service-code AmazonEC2
///     --filters Type=TERM_MATCH,Field=instanceType,Value=<type>
///               Type=TERM_MATCH,Field=location,Value=<location>
///     --region us-east-1 --output json --max-results 1
/// ```
pub struct AwsPricingCliSource {
    runner: Arc<dyn CommandRunner>,
    program: String,
    instance_type: String,
    location: String,
}

impl AwsPricingCliSource {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        instance_type: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            runner,
            program: "aws".to_string(),
            instance_type: instance_type.into(),
            location: location.into(),
        }
    }

    /// Use a different `aws` executable
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn invocation(&self) -> CommandInvocation {
        CommandInvocation::new(&self.program)
            .args(["pricing", "get-products"])
            .args(["--service-code", "AmazonEC2", "--filters"])
            .arg(format!(
                "Type=TERM_MATCH,Field=instanceType,Value={}",
                self.instance_type
            ))
            .arg(format!(
                "Type=TERM_MATCH,Field=location,Value={}",
                self.location
            ))
            .args(["--region", PRICING_API_REGION])
            .args(["--output", "json", "--max-results", "1"])
    }
}

#[async_trait]
impl PriceSource for AwsPricingCliSource {
    fn provider(&self) -> Provider {
        Provider::Aws
    }

    fn category(&self) -> ResourceCategory {
        ResourceCategory::Compute
    }

    fn describe(&self) -> String {
        format!("aws-pricing-cli({}, {})", self.instance_type, self.location)
    }

    async fn lookup(&self) -> Result<f64, SourceError> {
        let output = self.runner.run(&self.invocation()).await?;
        if !output.success() {
            return Err(SourceError::NonZeroExit {
                code: output.exit_code,
                stderr: output.stderr.trim().to_string(),
            });
        }
        parse_get_products(&output.stdout)
    }
}

#[derive(Debug, Deserialize)]
struct GetProductsResponse {
    /// Each entry is itself a JSON document, encoded as a string
    #[serde(rename = "PriceList", default)]
    price_list: Vec<String>,
}

/// Extract `terms.OnDemand.*.priceDimensions.*.pricePerUnit.USD` from the
/// first product.
///
/// Where the document holds several terms or dimensions, the first one in
/// document order is used.
pub fn parse_get_products(stdout: &str) -> Result<f64, SourceError> {
    let response: GetProductsResponse = serde_json::from_str(stdout)
        .map_err(|e| SourceError::Parse(format!("get-products output: {}", e)))?;

    let product = response
        .price_list
        .first()
        .ok_or(SourceError::NoMatchingRecord)?;
    let product: Value = serde_json::from_str(product)
        .map_err(|e| SourceError::Parse(format!("PriceList entry: {}", e)))?;

    let usd = product
        .pointer("/terms/OnDemand")
        .and_then(first_value)
        .and_then(|term| term.get("priceDimensions"))
        .and_then(first_value)
        .and_then(|dimension| dimension.pointer("/pricePerUnit/USD"))
        .ok_or_else(|| SourceError::Parse("no on-demand USD price in product".to_string()))?;

    price_from_json(usd)
}

fn first_value(value: &Value) -> Option<&Value> {
    value.as_object()?.values().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeRunner;
    use cloudcorp_application::CommandError;
    use serde_json::json;

    fn product(usd: Value) -> String {
        json!({
            "product": {"attributes": {"instanceType": "t2.micro"}},
            "terms": {
                "OnDemand": {
                    "ABCD.JRTCKXETXF": {
                        "priceDimensions": {
                            "ABCD.JRTCKXETXF.6YS6EN2CT7": {
                                "unit": "Hrs",
                                "pricePerUnit": {"USD": usd}
                            }
                        }
                    }
                }
            }
        })
        .to_string()
    }

    fn get_products_output(products: &[String]) -> String {
        json!({ "PriceList": products, "FormatVersion": "aws_v1" }).to_string()
    }

    #[test]
    fn test_parse_price() {
        let stdout = get_products_output(&[product(json!("0.0116000000"))]);
        assert_eq!(parse_get_products(&stdout).unwrap(), 0.0116);
    }

    #[test]
    fn test_parse_takes_first_product() {
        let stdout = get_products_output(&[product(json!("0.0116")), product(json!("0.5"))]);
        assert_eq!(parse_get_products(&stdout).unwrap(), 0.0116);
    }

    #[test]
    fn test_parse_takes_first_term_in_document_order() {
        let product = r#"{"terms": {"OnDemand": {
            "ZZZ.T": {"priceDimensions": {"ZZZ.T.D": {"pricePerUnit": {"USD": "0.5"}}}},
            "AAA.T": {"priceDimensions": {"AAA.T.D": {"pricePerUnit": {"USD": "0.9"}}}}
        }}}"#;
        let stdout = get_products_output(&[product.to_string()]);
        assert_eq!(parse_get_products(&stdout).unwrap(), 0.5);
    }

    #[test]
    fn test_parse_empty_price_list() {
        let stdout = get_products_output(&[]);
        assert_eq!(
            parse_get_products(&stdout).unwrap_err(),
            SourceError::NoMatchingRecord
        );
    }

    #[test]
    fn test_parse_non_numeric_price() {
        let stdout = get_products_output(&[product(json!("call us"))]);
        assert!(matches!(
            parse_get_products(&stdout),
            Err(SourceError::InvalidPrice(_))
        ));
    }

    #[test]
    fn test_parse_missing_terms() {
        let stdout = get_products_output(&[json!({"product": {}}).to_string()]);
        assert!(matches!(
            parse_get_products(&stdout),
            Err(SourceError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(
            parse_get_products("An error occurred (AccessDenied)"),
            Err(SourceError::Parse(_))
        ));
    }

    #[test]
    fn test_invocation_arguments() {
        let runner = Arc::new(FakeRunner::exits(0, "", ""));
        let source = AwsPricingCliSource::new(runner, "t2.micro", "US East (N. Virginia)");
        let invocation = source.invocation();

        assert_eq!(invocation.program, "aws");
        assert_eq!(
            invocation.args,
            vec![
                "pricing",
                "get-products",
                "--service-code",
                "AmazonEC2",
                "--filters",
                "Type=TERM_MATCH,Field=instanceType,Value=t2.micro",
                "Type=TERM_MATCH,Field=location,Value=US East (N. Virginia)",
                "--region",
                "us-east-1",
                "--output",
                "json",
                "--max-results",
                "1",
            ]
        );
    }

    #[tokio::test]
    async fn test_lookup_success() {
        let stdout = get_products_output(&[product(json!("0.0116"))]);
        let runner = Arc::new(FakeRunner::exits(0, &stdout, ""));
        let source = AwsPricingCliSource::new(runner.clone(), "t2.micro", "US East (N. Virginia)");

        assert_eq!(source.lookup().await.unwrap(), 0.0116);
        assert_eq!(runner.call_count(), 1);
    }

    #[tokio::test]
    async fn test_lookup_nonzero_exit() {
        let runner = Arc::new(FakeRunner::exits(255, "", "Unable to locate credentials\n"));
        let source = AwsPricingCliSource::new(runner, "t2.micro", "US East (N. Virginia)");

        assert_eq!(
            source.lookup().await.unwrap_err(),
            SourceError::NonZeroExit {
                code: Some(255),
                stderr: "Unable to locate credentials".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_lookup_cli_missing() {
        let err = CommandError::NotInstalled("aws".to_string());
        let runner = Arc::new(FakeRunner::fails(err));
        let source = AwsPricingCliSource::new(runner, "t2.micro", "US East (N. Virginia)")
            .with_program("aws");

        assert!(matches!(
            source.lookup().await,
            Err(SourceError::Command(CommandError::NotInstalled(_)))
        ));
    }
}
