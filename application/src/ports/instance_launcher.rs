//! Instance launcher port
//!
//! Issues the single resource-creation call for a resolved request.

use crate::ports::command_runner::CommandError;
use async_trait::async_trait;
use cloudcorp_domain::ProvisioningRequest;
use thiserror::Error;

/// Errors from the creation call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LaunchError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("Launch command exited with {code:?}: {stderr}")]
    NonZeroExit { code: Option<i32>, stderr: String },
}

#[async_trait]
pub trait InstanceLauncher: Send + Sync {
    /// Launch one instance, returning the provider's raw response
    async fn launch(&self, request: &ProvisioningRequest) -> Result<String, LaunchError>;
}
