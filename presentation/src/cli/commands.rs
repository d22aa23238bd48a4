//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use cloudcorp_domain::{ProvisioningInput, ResourceCategory};
use std::path::PathBuf;

/// Output format for comparison results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored table plus the cheapest provider per category
    Table,
    /// JSON report
    Json,
}

impl From<OutputFormat> for cloudcorp_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Table => cloudcorp_domain::OutputFormat::Table,
            OutputFormat::Json => cloudcorp_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for cloudcorp
#[derive(Parser, Debug)]
#[command(name = "cloudcorp")]
#[command(author, version, about = "Compare cloud prices across AWS, Azure and GCP")]
#[command(long_about = r#"
cloudcorp looks up unit prices for equivalent resources on AWS, Azure and GCP
and reports the cheapest provider for each resource category. It can then
launch an EC2 instance through the AWS CLI.

Categories:
  compute (ec2, vm)    hourly price of a small VM
  vpn                  hourly price of a VPN gateway
  storage (s3, blob)   price per GB-month of object storage

Without a subcommand cloudcorp runs interactively: it asks which categories to
compare, prints the comparison, then offers to deploy an instance.

Configuration files are loaded from (in priority order):
1. CLOUDCORP_* environment variables
2. --config <path>       Explicit config file
3. ./cloudcorp.toml      Project-level config
4. ~/.config/cloudcorp/config.toml   Global config

Example:
  cloudcorp compare -s compute,storage
  cloudcorp --output json compare
  cloudcorp deploy --key-name ops --security-group-id sg-0abc --region 2
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Write logs to a daily file in this directory instead of stderr
    #[arg(long, value_name = "DIR", global = true)]
    pub log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compare prices and report the cheapest provider per category
    Compare(CompareArgs),
    /// Launch an EC2 instance
    Deploy(DeployArgs),
}

#[derive(Args, Debug, Default)]
pub struct CompareArgs {
    /// Categories to compare, comma separated (default: all)
    #[arg(
        short = 's',
        long = "services",
        value_name = "CATEGORY",
        value_delimiter = ',',
        value_parser = parse_category
    )]
    pub categories: Vec<ResourceCategory>,
}

impl CompareArgs {
    /// Requested categories, or every category when none were given
    pub fn selected(&self) -> Vec<ResourceCategory> {
        if self.categories.is_empty() {
            ResourceCategory::ALL.to_vec()
        } else {
            self.categories.clone()
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct DeployArgs {
    /// Instance type (default from config, t2.micro)
    #[arg(long)]
    pub instance_type: Option<String>,

    /// Region menu number (1-based)
    #[arg(long, value_name = "N")]
    pub region: Option<String>,

    /// Image id (default: the region's image)
    #[arg(long)]
    pub image_id: Option<String>,

    /// Root volume size in GB
    #[arg(long, value_name = "GB")]
    pub storage_gb: Option<String>,

    /// EC2 key pair name
    #[arg(long)]
    pub key_name: Option<String>,

    /// Security group id
    #[arg(long)]
    pub security_group_id: Option<String>,

    /// Launch without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

impl DeployArgs {
    /// Answers already supplied on the command line; the rest stay blank
    pub fn to_input(&self) -> ProvisioningInput {
        let value = |field: &Option<String>| field.clone().unwrap_or_default();
        ProvisioningInput {
            instance_type: value(&self.instance_type),
            region_choice: value(&self.region),
            image_id: value(&self.image_id),
            storage_gb: value(&self.storage_gb),
            key_name: value(&self.key_name),
            security_group_id: value(&self.security_group_id),
        }
    }
}

fn parse_category(s: &str) -> Result<ResourceCategory, String> {
    s.parse::<ResourceCategory>().map_err(|e| e.to_string())
}
