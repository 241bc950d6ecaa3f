use crate::domain::model::Source;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("{origin} unavailable while fetching '{language}' page {page}: {reason}")]
    SourceUnavailable {
        origin: Source,
        language: String,
        page: u32,
        reason: String,
    },

    #[error("Malformed page from {origin}: {message}")]
    MalformedPage { origin: Source, message: String },

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("HTTP client error: {0}")]
    HttpClientError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

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
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn source_unavailable(
        origin: Source,
        language: &str,
        page: u32,
        reason: impl Into<String>,
    ) -> Self {
        EtlError::SourceUnavailable {
            origin,
            language: language.to_string(),
            page,
            reason: reason.into(),
        }
    }

    /// 來源本身的失敗（可以跳過該來源繼續其他來源）
    pub fn is_source_failure(&self) -> bool {
        matches!(
            self,
            EtlError::SourceUnavailable { .. } | EtlError::MalformedPage { .. }
        )
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::SourceUnavailable { .. } | EtlError::HttpClientError(_) => {
                ErrorCategory::Network
            }
            EtlError::MalformedPage { .. } | EtlError::SerializationError(_) => ErrorCategory::Data,
            EtlError::ConfigError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            EtlError::ZipError(_) | EtlError::CsvError(_) | EtlError::IoError(_) => {
                ErrorCategory::Output
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::SourceUnavailable { origin, .. } => {
                format!("Could not reach {}: {}", origin, self)
            }
            EtlError::MalformedPage { origin, .. } => {
                format!("{} returned a response that could not be read", origin)
            }
            EtlError::MissingConfigError { field } => {
                format!("Required setting '{}' is missing", field)
            }
            EtlError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::SourceUnavailable { origin: Source::SuperJob, .. } => {
                "Check network access and that SUPERJOB_SECRET_KEY is a valid application key"
            }
            EtlError::SourceUnavailable { .. } | EtlError::HttpClientError(_) => {
                "Check network access or raise --timeout-seconds, then retry"
            }
            EtlError::MalformedPage { .. } | EtlError::SerializationError(_) => {
                "The vacancy API may have changed its response format; verify the endpoint"
            }
            EtlError::MissingConfigError { .. } => {
                "Provide the missing value via command-line flag, environment or config file"
            }
            EtlError::ConfigError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::ConfigValidationError { .. } => {
                "Fix the configuration value and run again"
            }
            EtlError::ZipError(_) | EtlError::CsvError(_) | EtlError::IoError(_) => {
                "Make sure the output path exists and is writable"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
