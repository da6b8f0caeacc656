use crate::core::{ConfigProvider, ThroughputBounds};
use crate::utils::error::{AutoscaleError, Result};
use crate::utils::validation::{
    validate_base64_key, validate_non_empty_string, validate_positive_number, validate_range,
    validate_url, Validate,
};
use std::env;
use std::str::FromStr;

pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

// Function App 的 app settings 名稱
pub const ENV_ENDPOINT_URL: &str = "EndpointUrl";
pub const ENV_AUTHORIZATION_KEY: &str = "AuthorizationKey";
pub const ENV_DATABASE_NAME: &str = "DatabaseName";
pub const ENV_COLLECTION_NAME: &str = "CollectionName";
pub const ENV_MAX_AUTHORIZED_RU: &str = "MaxAuthorizedRu";
pub const ENV_MIN_AUTHORIZED_RU: &str = "MinAuthorizedRu";
pub const ENV_REQUEST_TIMEOUT_SECONDS: &str = "RequestTimeoutSeconds";

#[derive(Clone)]
pub struct AutoscaleSettings {
    pub endpoint_url: String,
    pub authorization_key: String,
    pub database_name: String,
    pub collection_name: String,
    pub min_authorized_ru: u32,
    pub max_authorized_ru: u32,
    pub request_timeout_seconds: u64,
}

impl AutoscaleSettings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 從任意來源讀取設定（測試時不必動到行程的環境變數）
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| AutoscaleError::MissingConfigError {
                    field: name.to_string(),
                })
        };

        Ok(Self {
            endpoint_url: required(ENV_ENDPOINT_URL)?,
            authorization_key: required(ENV_AUTHORIZATION_KEY)?,
            database_name: required(ENV_DATABASE_NAME)?,
            collection_name: required(ENV_COLLECTION_NAME)?,
            max_authorized_ru: parse_number(ENV_MAX_AUTHORIZED_RU, &required(ENV_MAX_AUTHORIZED_RU)?)?,
            min_authorized_ru: parse_number(ENV_MIN_AUTHORIZED_RU, &required(ENV_MIN_AUTHORIZED_RU)?)?,
            request_timeout_seconds: match lookup(ENV_REQUEST_TIMEOUT_SECONDS) {
                Some(raw) if !raw.trim().is_empty() => {
                    parse_number(ENV_REQUEST_TIMEOUT_SECONDS, &raw)?
                }
                _ => DEFAULT_REQUEST_TIMEOUT_SECONDS,
            },
        })
    }
}

fn parse_number<T>(field: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| AutoscaleError::InvalidConfigValueError {
            field: field.to_string(),
            value: raw.to_string(),
            reason: e.to_string(),
        })
}

impl std::fmt::Debug for AutoscaleSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoscaleSettings")
            .field("endpoint_url", &self.endpoint_url)
            .field("authorization_key", &"<redacted>")
            .field("database_name", &self.database_name)
            .field("collection_name", &self.collection_name)
            .field("min_authorized_ru", &self.min_authorized_ru)
            .field("max_authorized_ru", &self.max_authorized_ru)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .finish()
    }
}

impl ConfigProvider for AutoscaleSettings {
    fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    fn authorization_key(&self) -> &str {
        &self.authorization_key
    }

    fn database_name(&self) -> &str {
        &self.database_name
    }

    fn collection_name(&self) -> &str {
        &self.collection_name
    }

    fn throughput_bounds(&self) -> ThroughputBounds {
        ThroughputBounds {
            min: self.min_authorized_ru,
            max: self.max_authorized_ru,
        }
    }

    fn request_timeout_seconds(&self) -> u64 {
        self.request_timeout_seconds
    }
}

impl Validate for AutoscaleSettings {
    fn validate(&self) -> Result<()> {
        validate_url("endpoint_url", &self.endpoint_url)?;
        validate_base64_key("authorization_key", &self.authorization_key)?;
        validate_non_empty_string("database_name", &self.database_name)?;
        validate_non_empty_string("collection_name", &self.collection_name)?;

        validate_positive_number("min_authorized_ru", self.min_authorized_ru, 1)?;
        ThroughputBounds::new(self.min_authorized_ru, self.max_authorized_ru)?;

        validate_range("request_timeout_seconds", self.request_timeout_seconds, 1, 300)?;

        tracing::debug!("✅ Autoscale configuration validation passed");
        Ok(())
    }
}
