//! Error types for Drover
//!
//! Every orchestration-level failure in the workspace flows through this
//! enum. Per-task failures never appear here: they are data on the task
//! result, not control flow.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Drover error type
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration
    // ========================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    // ========================================================================
    // Task / Execution
    // ========================================================================
    #[error("Task error: {0}")]
    Task(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Cancelled")]
    Cancelled,

    // ========================================================================
    // General
    // ========================================================================
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Whether this error is worth retrying at a higher level
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Timeout(_))
    }

    /// Whether this error is safe to show to an end user
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Error::Config(_) | Error::InvalidInput(_) | Error::Validation(_) | Error::Cancelled
        )
    }

    /// Configuration error helper
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    /// Task error helper
    pub fn task(message: impl Into<String>) -> Self {
        Error::Task(message.into())
    }
}

// ============================================================================
// From conversions
// ============================================================================

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Internal(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Internal(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(Error::Timeout("attempt overran".into()).is_retryable());
        assert!(!Error::Config("bad ceiling".into()).is_retryable());
        assert!(Error::Config("bad ceiling".into()).is_user_facing());
        assert!(!Error::Internal("oops".into()).is_user_facing());
    }

    #[test]
    fn test_display() {
        let err = Error::config("max_concurrent must be greater than zero");
        assert_eq!(
            err.to_string(),
            "Configuration error: max_concurrent must be greater than zero"
        );
    }
}
