//! Shared error type across connmetrics crates.

use thiserror::Error;

/// Stable error codes (safe to match on in callers and tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// A metric with the same identifier is already registered.
    DuplicateMetric,
    /// Empty name or a name containing the scope delimiter.
    InvalidName,
    /// Malformed or out-of-range configuration.
    BadConfig,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation used in logs and assertions.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::DuplicateMetric => "DUPLICATE_METRIC",
            ErrorCode::InvalidName => "INVALID_NAME",
            ErrorCode::BadConfig => "BAD_CONFIG",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Unified error type used by core and runtime.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("metric already registered: {identifier}")]
    Duplicate { identifier: String },
    #[error("invalid metric name: {0}")]
    InvalidName(String),
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl MetricsError {
    /// Map the error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            MetricsError::Duplicate { .. } => ErrorCode::DuplicateMetric,
            MetricsError::InvalidName(_) => ErrorCode::InvalidName,
            MetricsError::BadConfig(_) => ErrorCode::BadConfig,
            MetricsError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            MetricsError::Internal(_) => ErrorCode::Internal,
        }
    }
}
