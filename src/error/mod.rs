//! Error types for the support router.
//!
//! Validation failures and empty lookups are conversational outcomes and never
//! show up here; this enum covers configuration, transport, provider and
//! storage failures that abort a turn or startup.

use thiserror::Error;

/// Primary error type for all support-router operations.
#[derive(Error, Debug)]
pub enum SupportError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Missing environment variable: {0}")]
    MissingEnv(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] mongodb::error::Error),

    #[error("Document encoding error: {0}")]
    Document(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limited: retry after {retry_after_ms:?}ms")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("Tool execution error: {tool_name} - {message}")]
    ToolExecution { tool_name: String, message: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Provider error: {provider} - {message}")]
    Provider { provider: String, message: String },
}

/// Broad error category used for logging and for deciding what a turn does next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Authentication,
    RateLimit,
    Network,
    Timeout,
    Server,
    Api,
    Serialization,
    Storage,
    ToolExecution,
    Unknown,
}

impl SupportError {
    /// Create an API error from a status code and response body.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a tool execution error.
    pub fn tool(tool_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolExecution {
            tool_name: tool_name.into(),
            message: message.into(),
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Configuration(_) | Self::MissingEnv(_) => ErrorCategory::Configuration,
            Self::Authentication(_) => ErrorCategory::Authentication,
            Self::RateLimited { .. } => ErrorCategory::RateLimit,
            Self::Network(_) => ErrorCategory::Network,
            Self::Timeout(_) => ErrorCategory::Timeout,
            Self::Serialization(_) | Self::Document(_) => ErrorCategory::Serialization,
            Self::Storage(_) => ErrorCategory::Storage,
            Self::Api { status, .. } => match status {
                401 | 403 => ErrorCategory::Authentication,
                429 => ErrorCategory::RateLimit,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Api,
            },
            Self::ToolExecution { .. } | Self::InvalidArgument(_) => ErrorCategory::ToolExecution,
            _ => ErrorCategory::Unknown,
        }
    }

    /// Errors the model can recover from when they are reported back as a tool result.
    pub fn is_tool_recoverable(&self) -> bool {
        matches!(self.category(), ErrorCategory::ToolExecution)
    }
}

impl From<mongodb::bson::ser::Error> for SupportError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        Self::Document(err.to_string())
    }
}

impl From<mongodb::bson::de::Error> for SupportError {
    fn from(err: mongodb::bson::de::Error) -> Self {
        Self::Document(err.to_string())
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, SupportError>;
