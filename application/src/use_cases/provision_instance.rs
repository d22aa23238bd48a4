//! Provision Instance use case
//!
//! Resolves wizard answers into a launch request and issues exactly one
//! creation call for it. Invalid requests are rejected before anything is
//! sent to the provider.

use crate::ports::instance_launcher::InstanceLauncher;
use cloudcorp_domain::{
    ProvisioningDefaults, ProvisioningInput, ProvisioningOutcome, ProvisioningRequest, resolve,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Use case for launching a single instance
pub struct ProvisionInstanceUseCase<L: InstanceLauncher + 'static> {
    launcher: Arc<L>,
    defaults: ProvisioningDefaults,
}

impl<L: InstanceLauncher + 'static> ProvisionInstanceUseCase<L> {
    pub fn new(launcher: Arc<L>, defaults: ProvisioningDefaults) -> Self {
        Self { launcher, defaults }
    }

    /// Defaults used to fill blank answers
    pub fn defaults(&self) -> &ProvisioningDefaults {
        &self.defaults
    }

    /// Resolve raw answers against the configured defaults (no side effects)
    pub fn resolve(&self, input: &ProvisioningInput) -> ProvisioningRequest {
        resolve(input, &self.defaults)
    }

    /// Launch an already-resolved request.
    ///
    /// The launcher is called at most once and never retried.
    pub async fn execute(&self, request: &ProvisioningRequest) -> ProvisioningOutcome {
        if let Err(e) = request.validate() {
            warn!("Refusing to launch: {}", e);
            return ProvisioningOutcome::failure(e.to_string());
        }

        info!(
            "Launching {} in {} from {}",
            request.instance_type, request.region, request.image_id
        );

        match self.launcher.launch(request).await {
            Ok(raw_output) => {
                info!("Instance launch accepted in {}", request.region);
                ProvisioningOutcome::success(raw_output)
            }
            Err(e) => {
                warn!("Instance launch failed: {}", e);
                ProvisioningOutcome::failure(e.to_string())
            }
        }
    }

    /// Resolve and launch in one step
    pub async fn resolve_and_execute(&self, input: &ProvisioningInput) -> ProvisioningOutcome {
        let request = self.resolve(input);
        self.execute(&request).await
    }
}
