//! External tool configuration from TOML (`[tools]` section)

use serde::{Deserialize, Serialize};

/// Executables used by the CLI-backed sources and the EC2 launcher.
///
/// Bare names are looked up on `PATH`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileToolsConfig {
    pub aws: String,
    pub gcloud: String,
}

impl Default for FileToolsConfig {
    fn default() -> Self {
        Self {
            aws: "aws".to_string(),
            gcloud: "gcloud".to_string(),
        }
    }
}
