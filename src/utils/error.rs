use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("HTTP request to {source_name} failed: {message}")]
    NetworkError { source_name: String, message: String },

    #[error("Request to {source_name} timed out after {timeout_secs}s")]
    TimeoutError { source_name: String, timeout_secs: u64 },

    #[error("{source_name} answered with HTTP status {status}")]
    UnexpectedStatusError { source_name: String, status: u16 },

    #[error("Error decoding {source_name} response in JSON format: {message}")]
    DecodeError { source_name: String, message: String },

    #[error("Error creating the file {path}: {source}")]
    FileCreationError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

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

pub type Result<T> = std::result::Result<T, ScanError>;

impl ScanError {
    /// 將 reqwest 錯誤分類為逾時或一般網路錯誤
    pub fn from_reqwest(source_name: &str, err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            ScanError::TimeoutError {
                source_name: source_name.to_string(),
                timeout_secs: timeout.as_secs(),
            }
        } else {
            ScanError::NetworkError {
                source_name: source_name.to_string(),
                message: err.to_string(),
            }
        }
    }

    /// Only a failed output file stops the scan; source errors degrade to warnings.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            ScanError::NetworkError { .. }
                | ScanError::TimeoutError { .. }
                | ScanError::UnexpectedStatusError { .. }
                | ScanError::DecodeError { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ScanError::NetworkError { source_name, .. } => {
                format!("Error getting subdomains from {}", source_name)
            }
            ScanError::TimeoutError { source_name, timeout_secs } => format!(
                "{} did not answer within {} seconds",
                source_name, timeout_secs
            ),
            ScanError::UnexpectedStatusError { source_name, status } => {
                format!("{} rejected the request (HTTP {})", source_name, status)
            }
            ScanError::DecodeError { source_name, .. } => {
                format!("{} returned a response that could not be read", source_name)
            }
            ScanError::FileCreationError { path, .. } => {
                format!("Error creating the file {}", path)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ScanError::NetworkError { .. } => "Check your network connection and DNS settings",
            ScanError::TimeoutError { .. } => "Retry later or raise the limit with --timeout",
            ScanError::UnexpectedStatusError { .. } => {
                "Verify the API key and your account quota for this service"
            }
            ScanError::DecodeError { .. } => "The service may be rate limiting you, retry later",
            ScanError::FileCreationError { .. } | ScanError::IoError(_) => {
                "Check that the output directory exists and is writable"
            }
            ScanError::ConfigError { .. }
            | ScanError::MissingConfigError { .. }
            | ScanError::InvalidConfigValueError { .. }
            | ScanError::ConfigValidationError { .. } => {
                "Review the command line flags and the configuration file"
            }
        }
    }
}
