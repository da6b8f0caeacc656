use crate::config::settings::{AutoscaleSettings, DEFAULT_REQUEST_TIMEOUT_SECONDS};
use crate::utils::error::{AutoscaleError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub cosmos: CosmosConfig,
    pub throughput: ThroughputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CosmosConfig {
    pub endpoint_url: String,
    pub authorization_key: String,
    pub database_name: String,
    pub collection_name: String,
    pub request_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThroughputConfig {
    pub min_authorized_ru: u32,
    pub max_authorized_ru: u32,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AutoscaleError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AutoscaleError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${COSMOS_KEY})，未設定的保留原字串
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AutoscaleError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn into_settings(self) -> AutoscaleSettings {
        AutoscaleSettings {
            endpoint_url: self.cosmos.endpoint_url,
            authorization_key: self.cosmos.authorization_key,
            database_name: self.cosmos.database_name,
            collection_name: self.cosmos.collection_name,
            min_authorized_ru: self.throughput.min_authorized_ru,
            max_authorized_ru: self.throughput.max_authorized_ru,
            request_timeout_seconds: self
                .cosmos
                .request_timeout_seconds
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECONDS),
        }
    }
}
