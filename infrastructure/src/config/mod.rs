//! Configuration file loading for cloudcorp
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `CLOUDCORP_*` environment variables (`__` separates nested keys)
//! 2. `--config <path>` specified file
//! 3. Project root: `./cloudcorp.toml` or `./.cloudcorp.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/cloudcorp/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileOutputConfig, FilePricingConfig,
    FileProvisioningConfig, FileSourceConfig, FileToolsConfig, SourceStrategy,
};
pub use loader::ConfigLoader;
