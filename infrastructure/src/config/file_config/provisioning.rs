//! Deploy wizard configuration from TOML (`[provisioning]` section)

use cloudcorp_domain::{ProvisioningDefaults, RegionImage};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default `aws ec2 run-instances` timeout
const DEFAULT_LAUNCH_TIMEOUT_SECONDS: u64 = 120;

/// Raw provisioning configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvisioningConfig {
    pub default_instance_type: String,
    pub default_storage_gb: u32,
    /// Region used when no valid menu entry is chosen
    pub default_region: String,
    /// Region menu, in display order
    pub regions: Vec<RegionImage>,
    /// Timeout for the launch command
    pub launch_timeout_seconds: u64,
}

impl Default for FileProvisioningConfig {
    fn default() -> Self {
        let defaults = ProvisioningDefaults::default();
        Self {
            default_instance_type: defaults.instance_type,
            default_storage_gb: defaults.storage_gb,
            default_region: defaults.default_region,
            regions: defaults.regions,
            launch_timeout_seconds: DEFAULT_LAUNCH_TIMEOUT_SECONDS,
        }
    }
}

impl FileProvisioningConfig {
    /// Convert to the resolver's defaults table
    pub fn to_defaults(&self) -> ProvisioningDefaults {
        ProvisioningDefaults {
            instance_type: self.default_instance_type.clone(),
            storage_gb: self.default_storage_gb,
            default_region: self.default_region.clone(),
            regions: self.regions.clone(),
        }
    }

    pub fn launch_timeout(&self) -> Duration {
        Duration::from_secs(self.launch_timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_domain_defaults() {
        let config = FileProvisioningConfig::default();
        assert_eq!(config.to_defaults(), ProvisioningDefaults::default());
        assert_eq!(config.launch_timeout(), Duration::from_secs(120));
    }

    #[test]
    fn test_regions_replace_builtin_menu() {
        let toml_str = r#"
[provisioning]
default_region = "eu-central-1"

[[provisioning.regions]]
region = "eu-central-1"
image_id = "ami-0aaa"

[[provisioning.regions]]
region = "eu-north-1"
image_id = "ami-0bbb"
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        let defaults = config.provisioning.to_defaults();

        assert_eq!(defaults.regions.len(), 2);
        assert_eq!(defaults.region_at(2), Some("eu-north-1"));
        assert_eq!(defaults.image_for("eu-central-1"), Some("ami-0aaa"));
        assert_eq!(defaults.instance_type, "t2.micro");
    }
}
