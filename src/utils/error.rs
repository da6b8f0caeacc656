use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutoscaleError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid action '{value}', expected Up or Down")]
    InvalidAction { value: String },

    #[error("Cosmos DB returned {status}: {message}")]
    CosmosError { status: u16, message: String },

    #[error("No offer found for resource {resource}")]
    OfferNotFound { resource: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Service,
    Input,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AutoscaleError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AutoscaleError::ConfigError { .. }
            | AutoscaleError::MissingConfigError { .. }
            | AutoscaleError::InvalidConfigValueError { .. }
            | AutoscaleError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            AutoscaleError::ApiError(_) | AutoscaleError::IoError(_) => ErrorCategory::Network,
            AutoscaleError::CosmosError { .. } | AutoscaleError::OfferNotFound { .. } => {
                ErrorCategory::Service
            }
            AutoscaleError::InvalidAction { .. } => ErrorCategory::Input,
            AutoscaleError::SerializationError(_) | AutoscaleError::ProcessingError { .. } => {
                ErrorCategory::Data
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AutoscaleError::InvalidAction { .. } => ErrorSeverity::Low,
            // 429 / 5xx 稍後重試通常就會成功
            AutoscaleError::CosmosError { status, .. } if *status == 429 || *status >= 500 => {
                ErrorSeverity::Medium
            }
            AutoscaleError::ApiError(_) => ErrorSeverity::Medium,
            AutoscaleError::CosmosError { .. }
            | AutoscaleError::OfferNotFound { .. }
            | AutoscaleError::SerializationError(_)
            | AutoscaleError::ProcessingError { .. } => ErrorSeverity::High,
            AutoscaleError::ConfigError { .. }
            | AutoscaleError::MissingConfigError { .. }
            | AutoscaleError::InvalidConfigValueError { .. }
            | AutoscaleError::ConfigValidationError { .. }
            | AutoscaleError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AutoscaleError::MissingConfigError { field } => {
                format!("Required setting '{}' is not configured", field)
            }
            AutoscaleError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            AutoscaleError::CosmosError { status: 401, .. }
            | AutoscaleError::CosmosError { status: 403, .. } => {
                "Cosmos DB rejected the authorization key".to_string()
            }
            AutoscaleError::CosmosError { status: 404, .. } => {
                "Database or collection does not exist".to_string()
            }
            AutoscaleError::ApiError(_) => "Could not reach the Cosmos DB endpoint".to_string(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the app settings or the TOML config file and try again"
            }
            ErrorCategory::Network => "Verify the endpoint URL and network connectivity",
            ErrorCategory::Service => match self {
                AutoscaleError::CosmosError { status: 401, .. }
                | AutoscaleError::CosmosError { status: 403, .. } => {
                    "Regenerate or re-copy the account's primary key"
                }
                AutoscaleError::OfferNotFound { .. } => {
                    "Make sure the collection has dedicated (not shared database) throughput"
                }
                _ => "Retry later or inspect the Cosmos DB account in the portal",
            },
            ErrorCategory::Input => "Pass action=Up or action=Down",
            ErrorCategory::Data => {
                "The offer may use autoscale throughput, which cannot be set manually"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AutoscaleError>;
