//! Custom error types for the household client
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for household client operations
#[derive(Error, Debug)]
pub enum HouseholdError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Client-side validation failures (no request was sent)
    #[error("{0}")]
    Validation(String),

    /// Entity not found in the current family snapshot
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("A {entity_type} with this name already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// The server answered with a non-success status
    #[error("Server error ({status}): {}", message.as_deref().unwrap_or("no message"))]
    Api {
        status: u16,
        message: Option<String>,
    },

    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// No session, or the server rejected the bearer token
    #[error("Session is no longer valid, please log in again")]
    SessionInvalid,

    /// Local storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// TUI errors
    #[error("TUI error: {0}")]
    Tui(String),
}

impl HouseholdError {
    /// Create a "not found" error for members
    pub fn member_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Member",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Create a duplicate-name error for members
    pub fn duplicate_member(name: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: "member",
            identifier: name.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if the session has to be discarded
    pub fn is_session_invalid(&self) -> bool {
        matches!(self, Self::SessionInvalid)
    }

    /// True for failures raised before any request left the client
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Duplicate { .. } | Self::NotFound { .. }
        )
    }

    /// Message suitable for a toast notification.
    ///
    /// Local failures always explain themselves. Server failures use the
    /// server-supplied message when there is one, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            Self::Duplicate { entity_type, .. } => {
                format!("A {} with this name already exists", entity_type)
            }
            Self::NotFound { .. } | Self::SessionInvalid => self.to_string(),
            Self::Api {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for HouseholdError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for HouseholdError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<reqwest::Error> for HouseholdError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Json(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Result type alias for household client operations
pub type HouseholdResult<T> = Result<T, HouseholdError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HouseholdError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = HouseholdError::member_not_found("Asha");
        assert_eq!(err.to_string(), "Member not found: Asha");
        assert!(err.is_not_found());
        assert!(err.is_local());
    }

    #[test]
    fn test_user_message_prefers_server_message() {
        let err = HouseholdError::Api {
            status: 400,
            message: Some("Member limit reached".into()),
        };
        assert_eq!(err.user_message("Error adding member"), "Member limit reached");
    }

    #[test]
    fn test_user_message_falls_back() {
        let err = HouseholdError::Api {
            status: 500,
            message: None,
        };
        assert_eq!(err.user_message("Error adding member"), "Error adding member");

        let err = HouseholdError::Network("connection refused".into());
        assert_eq!(err.user_message("Error deleting expense"), "Error deleting expense");
    }

    #[test]
    fn test_duplicate_message() {
        let err = HouseholdError::duplicate_member("asha");
        assert_eq!(
            err.user_message("unused"),
            "A member with this name already exists"
        );
        assert!(!err.is_validation());
        assert!(err.is_local());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: HouseholdError = io_err.into();
        assert!(matches!(err, HouseholdError::Io(_)));
    }
}
