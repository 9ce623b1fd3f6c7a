//! Error types for the valuation wizard and lead tracker.
//!
//! Field validation problems are never errors: they live in
//! [`FieldState`](crate::wizard::FieldState) as data. Denied wizard
//! transitions are silent no-ops. Everything that reaches this enum is either
//! an external-service failure, a persistence failure or an illegal mutation.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all valora operations.
#[derive(Error, Debug)]
pub enum ValoraError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Lead not found for the given ID
    #[error("Lead with ID {id} not found")]
    LeadNotFound { id: u64 },
    /// Task not found for the given ID
    #[error("Task with ID {id} not found")]
    TaskNotFound { id: u64 },
    /// Attempt to delete a task seeded by the system for its lead
    #[error("Task with ID {id} is a system task and cannot be deleted")]
    SystemTaskDeletion { id: u64 },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// The external valuation computation failed
    #[error("Valuation service error: {message}")]
    ValuationService { message: String },
    /// The notification dispatcher failed
    #[error("Notification error: {message}")]
    Notification { message: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> ValoraError {
        ValoraError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> ValoraError {
        ValoraError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl ValoraError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a new database error with additional context.
    pub fn database_error(message: &str, source: rusqlite::Error) -> Self {
        Self::database(message).with_source(source)
    }

    /// Wraps a `spawn_blocking` join failure.
    pub(crate) fn join(error: tokio::task::JoinError) -> Self {
        Self::Configuration {
            message: format!("Task join error: {error}"),
        }
    }

    /// Whether the error came from a collaborator outside this crate's
    /// control (valuation service, persistence, notification).
    pub fn is_external(&self) -> bool {
        matches!(
            self,
            ValoraError::Database { .. }
                | ValoraError::ValuationService { .. }
                | ValoraError::Notification { .. }
                | ValoraError::FileSystem { .. }
        )
    }

    /// Message safe to show an end user.
    ///
    /// External failures collapse into a generic retry prompt so transport
    /// details never reach the screen.
    pub fn user_message(&self) -> String {
        match self {
            ValoraError::SystemTaskDeletion { .. } => {
                "System tasks cannot be deleted.".to_string()
            }
            ValoraError::InvalidInput { field, reason } => format!("{field}: {reason}"),
            ValoraError::LeadNotFound { .. } | ValoraError::TaskNotFound { .. } => self.to_string(),
            _ => "Something went wrong on our side. Please try again.".to_string(),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| ValoraError::database(message).with_source(e))
    }
}

/// Result type alias for valora operations
pub type Result<T> = std::result::Result<T, ValoraError>;
