//! Price source port
//!
//! A [`PriceSource`] produces one unit price for one (provider, category)
//! pair. Sources report failures as [`SourceError`]; the aggregation step
//! turns every error into an absent quote.

use crate::ports::command_runner::CommandError;
use async_trait::async_trait;
use cloudcorp_domain::{Provider, ResourceCategory};
use std::time::Duration;
use thiserror::Error;

/// Why a source produced no price
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    #[error("No price source configured")]
    NotConfigured,

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("Command exited with {code:?}: {stderr}")]
    NonZeroExit { code: Option<i32>, stderr: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("HTTP error: {status}")]
    Http { status: u16 },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("No matching price record")]
    NoMatchingRecord,

    #[error("Invalid price value: {0}")]
    InvalidPrice(String),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),
}

/// Source of one unit price
#[async_trait]
pub trait PriceSource: Send + Sync {
    fn provider(&self) -> Provider;

    fn category(&self) -> ResourceCategory;

    /// Short description for diagnostics, e.g. `azure-retail(Basic_A1)`
    fn describe(&self) -> String;

    /// Fetch the current unit price
    async fn lookup(&self) -> Result<f64, SourceError>;
}

/// Interpret a JSON price field.
///
/// Accepts a number or a decimal string (`"0.0116000000"`); anything else,
/// including negative or non-finite values, is [`SourceError::InvalidPrice`].
pub fn price_from_json(value: &serde_json::Value) -> Result<f64, SourceError> {
    let price = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match price {
        Some(p) if p.is_finite() && p >= 0.0 => Ok(p),
        _ => Err(SourceError::InvalidPrice(value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_price_from_number_and_string() {
        assert_eq!(price_from_json(&json!(0.04)).unwrap(), 0.04);
        assert_eq!(price_from_json(&json!("0.0116000000")).unwrap(), 0.0116);
        assert_eq!(price_from_json(&json!(0)).unwrap(), 0.0);
    }

    #[test]
    fn test_price_from_invalid_values() {
        for value in [json!("n/a"), json!(null), json!(-1.0), json!({"USD": "1"}), json!("inf")] {
            assert!(matches!(
                price_from_json(&value),
                Err(SourceError::InvalidPrice(_))
            ));
        }
    }

    #[test]
    fn test_command_error_converts() {
        let err: SourceError = CommandError::NotInstalled("aws".to_string()).into();
        assert_eq!(err.to_string(), "aws is not installed or not on PATH");
    }
}
