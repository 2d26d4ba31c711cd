use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
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

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Store request failed ({status}): {message}")]
    StoreError { status: u16, message: String },

    #[error("Voice generation failed ({status}): {details}")]
    VoiceError { status: u16, details: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Input,
    Upstream,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AgentError {
    pub fn validation(message: impl Into<String>) -> Self {
        AgentError::ValidationError {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        AgentError::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            AgentError::ApiError(_) => ErrorCategory::Network,
            AgentError::ConfigError { .. }
            | AgentError::MissingConfigError { .. }
            | AgentError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            AgentError::ValidationError { .. } => ErrorCategory::Input,
            AgentError::StoreError { .. } | AgentError::VoiceError { .. } => {
                ErrorCategory::Upstream
            }
            AgentError::IoError(_) | AgentError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 上游暫時性錯誤，可重試
            AgentError::ApiError(_) => ErrorSeverity::Medium,
            AgentError::StoreError { status, .. } | AgentError::VoiceError { status, .. } => {
                if *status >= 500 || *status == 429 {
                    ErrorSeverity::Medium
                } else {
                    ErrorSeverity::High
                }
            }
            AgentError::ValidationError { .. }
            | AgentError::ConfigError { .. }
            | AgentError::MissingConfigError { .. }
            | AgentError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            AgentError::IoError(_) | AgentError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AgentError::ApiError(_) => "Could not reach an upstream service".to_string(),
            AgentError::MissingConfigError { field } => {
                format!("Required setting '{}' is not configured", field)
            }
            AgentError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            AgentError::ConfigError { message } | AgentError::ValidationError { message } => {
                message.clone()
            }
            AgentError::StoreError { status, .. } => {
                format!("The customer database rejected the request (HTTP {})", status)
            }
            AgentError::VoiceError { status, .. } => {
                format!("Voice generation failed (HTTP {})", status)
            }
            AgentError::IoError(e) => format!("File system error: {}", e),
            AgentError::SerializationError(e) => format!("Malformed data: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check network connectivity and retry",
            ErrorCategory::Configuration => {
                "Check the config file or the SUPABASE_* / ELEVENLABS_* environment variables"
            }
            ErrorCategory::Input => "Check the command arguments and try again",
            ErrorCategory::Upstream => "Verify the service credentials and retry later",
            ErrorCategory::System => "Check file permissions and the response format",
        }
    }
}

pub type Result<T> = std::result::Result<T, AgentError>;
