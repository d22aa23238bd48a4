//! Resource category value object

use crate::core::error::DomainError;
use crate::pricing::quote::PriceUnit;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A class of equivalent cloud resource that can be compared across providers.
///
/// The derived ordering is the row order of every comparison report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceCategory {
    /// Virtual machine / compute instance (EC2, Azure VM, GCE)
    Compute,
    /// Site-to-site VPN gateway
    Vpn,
    /// Object/blob storage
    Storage,
}

impl ResourceCategory {
    /// All categories in report order
    pub const ALL: [ResourceCategory; 3] = [
        ResourceCategory::Compute,
        ResourceCategory::Vpn,
        ResourceCategory::Storage,
    ];

    /// Stable identifier used in configuration and JSON output
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceCategory::Compute => "compute",
            ResourceCategory::Vpn => "vpn",
            ResourceCategory::Storage => "storage",
        }
    }

    /// Row label shown in the comparison table
    pub fn display_name(&self) -> &'static str {
        match self {
            ResourceCategory::Compute => "EC2/VM",
            ResourceCategory::Vpn => "VPN",
            ResourceCategory::Storage => "Storage (per GB)",
        }
    }

    /// The unit every quote in this category is normalized to
    pub fn unit(&self) -> PriceUnit {
        match self {
            ResourceCategory::Compute | ResourceCategory::Vpn => PriceUnit::PerHour,
            ResourceCategory::Storage => PriceUnit::PerGbMonth,
        }
    }

    /// Parse a comma-separated selection such as `"ec2, vpn"`.
    ///
    /// Blank entries are skipped and duplicates collapse. Any unrecognized
    /// entry fails the whole selection.
    pub fn parse_selection(input: &str) -> Result<BTreeSet<ResourceCategory>, DomainError> {
        input
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<ResourceCategory>())
            .collect()
    }
}

impl std::fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ResourceCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compute" | "ec2" | "vm" => Ok(ResourceCategory::Compute),
            "vpn" => Ok(ResourceCategory::Vpn),
            "storage" | "s3" | "blob" => Ok(ResourceCategory::Storage),
            other => Err(DomainError::UnknownCategory(other.to_string())),
        }
    }
}
