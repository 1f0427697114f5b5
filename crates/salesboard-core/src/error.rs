//! Error types for salesboard-core
//!
//! Every failure the core can produce carries an error code, a severity and
//! a detail builder so the API layer can log it and answer with a generic
//! message without inspecting the variant itself.

use thiserror::Error;
use serde::{Deserialize, Serialize};

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Upstream seed source could not be reached or answered with an error
    SeedFetchFailed,
    /// Upstream seed payload is not a JSON array of sale records
    SeedDecodeFailed,
    /// Record store query failed
    StoreError,
    /// Snapshot file could not be read or written
    SnapshotError,
    /// Internal error
    InternalError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::SeedFetchFailed => write!(f, "SEED_FETCH_FAILED"),
            ErrorCode::SeedDecodeFailed => write!(f, "SEED_DECODE_FAILED"),
            ErrorCode::StoreError => write!(f, "STORE_ERROR"),
            ErrorCode::SnapshotError => write!(f, "SNAPSHOT_ERROR"),
            ErrorCode::InternalError => write!(f, "INTERNAL_ERROR"),
        }
    }
}

/// Detailed error information for logs and API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    /// Add detail information
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
            ErrorSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Main error type for salesboard-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Failed to fetch seed data from {url}: {message}")]
    SeedFetch { url: String, message: String },

    #[error("Seed data is not a valid list of sale records: {message}")]
    SeedDecode { message: String },

    #[error("Store {operation} failed: {message}")]
    Store { operation: String, message: String },

    #[error("Snapshot {path} unusable: {message}")]
    Snapshot { path: String, message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CoreError {
    pub fn store(operation: &str, message: impl ToString) -> Self {
        CoreError::Store {
            operation: operation.to_string(),
            message: message.to_string(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::SeedFetch { .. } => ErrorCode::SeedFetchFailed,
            CoreError::SeedDecode { .. } => ErrorCode::SeedDecodeFailed,
            CoreError::Store { .. } => ErrorCode::StoreError,
            CoreError::Snapshot { .. } => ErrorCode::SnapshotError,
            CoreError::Internal { .. } => ErrorCode::InternalError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::SeedFetch { .. } => ErrorSeverity::Warning,
            CoreError::SeedDecode { .. } => ErrorSeverity::Error,
            CoreError::Store { .. } => ErrorSeverity::Error,
            CoreError::Snapshot { .. } => ErrorSeverity::Error,
            CoreError::Internal { .. } => ErrorSeverity::Critical,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::SeedFetch { url, .. } => {
                details = details.with_detail(serde_json::json!({ "url": url }));
                details = details.with_suggestion(
                    "Check that the seed source URL is reachable from this host.".to_string()
                );
                details = details.with_suggestion(
                    "Existing records were left untouched; retry /seed later.".to_string()
                );
            }
            CoreError::SeedDecode { message } => {
                details = details.with_detail(serde_json::json!({ "decode_message": message }));
                details = details.with_suggestion(
                    "The seed source must return a JSON array of sale records.".to_string()
                );
            }
            CoreError::Store { operation, .. } => {
                details = details.with_detail(serde_json::json!({ "operation": operation }));
            }
            CoreError::Snapshot { path, .. } => {
                details = details.with_suggestion(format!(
                    "Ensure '{}' is readable and its directory is writable.", path
                ));
            }
            CoreError::Internal { .. } => {}
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation being performed
    pub operation: String,
    /// Additional context data
    pub data: serde_json::Value,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            data: serde_json::json!({}),
        }
    }

    /// Add context data
    pub fn with_data(mut self, key: &str, value: serde_json::Value) -> Self {
        self.data[key] = value;
        self
    }
}

/// Error logger trait
pub trait ErrorLogger: Send + Sync {
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Debug, Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        match error.severity() {
            ErrorSeverity::Warning => log::warn!(
                target: "salesboard::error",
                "{} - Operation: {} - Data: {}",
                error.to_details(),
                context.operation,
                context.data
            ),
            _ => log::error!(
                target: "salesboard::error",
                "{} - Operation: {} - Data: {}",
                error.to_details(),
                context.operation,
                context.data
            ),
        }
    }
}

// ==================== Tests ====================
