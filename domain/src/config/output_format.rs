//! Output format value object

use serde::{Deserialize, Serialize};

/// Output format for comparison reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Comparison table followed by the cheapest-provider summary (default)
    #[default]
    Table,
    /// JSON output
    Json,
}
