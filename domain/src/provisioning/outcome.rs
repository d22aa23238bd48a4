//! Provisioning outcome value object

use serde::{Deserialize, Serialize};

/// Result of a single launch attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisioningOutcome {
    pub succeeded: bool,
    /// Raw provider response (stdout of the creation call)
    pub raw_output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ProvisioningOutcome {
    pub fn success(raw_output: impl Into<String>) -> Self {
        Self {
            succeeded: true,
            raw_output: raw_output.into(),
            error_message: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            raw_output: String::new(),
            error_message: Some(error.into()),
        }
    }
}
