//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown resource category: {0}")]
    UnknownCategory(String),

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Invalid provisioning request: missing {}", .missing.join(", "))]
    InvalidProvisioningRequest { missing: Vec<&'static str> },
}
