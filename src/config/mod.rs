pub mod settings;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ScaleAction;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;

pub use settings::AutoscaleSettings;
pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "cosmos-autoscale")]
#[command(about = "Scale a Cosmos DB container's provisioned throughput up or down")]
pub struct CliConfig {
    /// Up or Down (case-insensitive)
    #[arg(short, long, required_unless_present = "status")]
    pub action: Option<ScaleAction>,

    /// TOML config file; app settings are read from the environment when omitted
    #[arg(short, long)]
    pub config: Option<String>,

    /// Show what would change without writing the new throughput
    #[arg(long)]
    pub dry_run: bool,

    /// Print the current throughput and exit
    #[arg(long, conflicts_with = "action")]
    pub status: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn load_settings(&self) -> Result<AutoscaleSettings> {
        match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                Ok(TomlConfig::from_file(path)?.into_settings())
            }
            None => AutoscaleSettings::from_env(),
        }
    }
}
