//! Provisioning defaults (static region/image table and fixed fallbacks)

use serde::{Deserialize, Serialize};

/// Default instance type when the user leaves it blank
pub const DEFAULT_INSTANCE_TYPE: &str = "t2.micro";

/// Default root volume size in GB
pub const DEFAULT_STORAGE_GB: u32 = 8;

/// Region used when the menu selection is blank or out of range
pub const DEFAULT_REGION: &str = "us-east-1";

/// A supported region and the image launched there when none is given
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionImage {
    pub region: String,
    pub image_id: String,
}

impl RegionImage {
    pub fn new(region: impl Into<String>, image_id: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            image_id: image_id.into(),
        }
    }
}

/// Read-only defaults injected into the resolver.
///
/// `regions` is ordered: its order is the numbered region menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisioningDefaults {
    pub instance_type: String,
    pub storage_gb: u32,
    pub default_region: String,
    pub regions: Vec<RegionImage>,
}

impl ProvisioningDefaults {
    /// Region name at a 1-based menu position
    pub fn region_at(&self, choice: usize) -> Option<&str> {
        choice
            .checked_sub(1)
            .and_then(|index| self.regions.get(index))
            .map(|r| r.region.as_str())
    }

    /// Default image for a region, if the region has one
    pub fn image_for(&self, region: &str) -> Option<&str> {
        self.regions
            .iter()
            .find(|r| r.region == region)
            .map(|r| r.image_id.as_str())
    }
}

impl Default for ProvisioningDefaults {
    /// Ubuntu images for the four regions offered in the deploy menu
    fn default() -> Self {
        Self {
            instance_type: DEFAULT_INSTANCE_TYPE.to_string(),
            storage_gb: DEFAULT_STORAGE_GB,
            default_region: DEFAULT_REGION.to_string(),
            regions: vec![
                RegionImage::new("us-east-1", "ami-0fc5d935ebf8bc3bc"),
                RegionImage::new("us-west-1", "ami-0f8e81a3da6e2510a"),
                RegionImage::new("eu-west-1", "ami-00c90dbdc12232b58"),
                RegionImage::new("ap-south-1", "ami-0dee22c13ea7a9a67"),
            ],
        }
    }
}
