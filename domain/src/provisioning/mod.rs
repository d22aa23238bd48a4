//! Provisioning subdomain: defaults, resolution and the launch request.

pub mod defaults;
pub mod outcome;
pub mod request;
pub mod resolver;

pub use defaults::{ProvisioningDefaults, RegionImage};
pub use outcome::ProvisioningOutcome;
pub use request::{ProvisioningInput, ProvisioningRequest};
pub use resolver::resolve;
