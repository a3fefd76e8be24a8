//! Error types for the LitMT client core
//!
//! Every fallible operation returns [`ClientError`]. Errors are values
//! surfaced to the triggering caller and converted to UI state there;
//! nothing in this crate panics on a failed request or a corrupt local
//! store.

use thiserror::Error;

use crate::validate::ValidationError;

/// Crate-wide result type
pub type Result<T> = std::result::Result<T, ClientError>;

/// Client error taxonomy
#[derive(Debug, Error)]
pub enum ClientError {
    /// A local pre-submission check failed; no network call was made
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The server could not be reached (connection, DNS, timeout)
    #[error("Could not reach server: {0}")]
    Transport(String),

    /// The server answered with a non-success status
    #[error("Server returned {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Api { status: u16, detail: Option<String> },

    /// A success response carried a body this client could not parse
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// Local key-value storage failed
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ClientError {
    /// The message to show the user for this error.
    ///
    /// Server-provided detail is shown verbatim when present; transport
    /// failures get the generic unreachable-server line; anything else
    /// falls back to the action-specific `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Validation(err) => err.to_string(),
            ClientError::Transport(_) => {
                "Failed to connect to server. Make sure the backend is running.".to_string()
            }
            ClientError::Api {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => fallback.to_string(),
        }
    }

    /// HTTP status of an API error, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_detail_is_shown_verbatim() {
        let err = ClientError::Api {
            status: 400,
            detail: Some("Email already registered".to_string()),
        };
        assert_eq!(
            err.user_message("Account creation failed"),
            "Email already registered"
        );
    }

    #[test]
    fn missing_detail_falls_back_to_action_message() {
        let err = ClientError::Api {
            status: 500,
            detail: None,
        };
        assert_eq!(
            err.user_message("Account creation failed"),
            "Account creation failed"
        );
    }

    #[test]
    fn transport_errors_get_generic_message() {
        let err = ClientError::Transport("connection refused".to_string());
        assert!(err.user_message("x").contains("Failed to connect to server"));
    }
}
