pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::cosmos::CosmosClient;
pub use config::{AutoscaleSettings, TomlConfig};
pub use crate::core::autoscaler::{Autoscaler, ScaleOutcome};
pub use crate::core::{ScaleAction, ScaleDecision, ThroughputBounds};
pub use utils::error::{AutoscaleError, Result};
