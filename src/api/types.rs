//! Wire types for the LitMT backend API

use serde::{Deserialize, Serialize};

use crate::session::StoredUser;

// ============================================================================
// Accounts
// ============================================================================

/// Registration request body
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    /// Always false from the client; admins are promoted server-side
    pub isadmin: bool,
}

impl RegisterRequest {
    pub fn new(username: &str, email: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            isadmin: false,
        }
    }
}

/// Login response. Newer backends return `{user, access_token}`; legacy
/// ones return the bare user object with no token.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LoginPayload {
    Envelope {
        user: StoredUser,
        #[serde(default)]
        access_token: Option<String>,
    },
    Legacy(StoredUser),
}

impl LoginPayload {
    pub fn into_parts(self) -> (StoredUser, Option<String>) {
        match self {
            LoginPayload::Envelope { user, access_token } => (user, access_token),
            LoginPayload::Legacy(user) => (user, None),
        }
    }
}

// ============================================================================
// Books
// ============================================================================

/// Scalar metadata for book creation
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewBook {
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_language: Option<String>,

    /// Inline original text, for books created without a source file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Partial metadata update; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize)]
pub struct BookUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_language: Option<String>,
}

/// Response to an original-source upload
#[derive(Debug, Clone, Deserialize)]
pub struct SourceUpload {
    pub source_filename: String,
    pub source_file_id: String,
}

/// A file attached to an upload request
#[derive(Debug, Clone)]
pub struct FilePayload {
    pub filename: String,
    pub content: Vec<u8>,
}

impl FilePayload {
    pub fn new(filename: &str, content: Vec<u8>) -> Self {
        Self {
            filename: filename.to_string(),
            content,
        }
    }
}

// ============================================================================
// Suggestions
// ============================================================================

/// A book suggestion from any signed-in user
#[derive(Debug, Clone, Default, Serialize)]
pub struct SuggestionIn {
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_language: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A stored suggestion with its review state
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionOut {
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub original_language: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub submitter_id: Option<String>,

    #[serde(default)]
    pub submitter_username: Option<String>,

    #[serde(default)]
    pub created_at: Option<String>,

    /// True until an admin acknowledges the suggestion
    #[serde(default)]
    pub needs_review: bool,

    #[serde(default)]
    pub acknowledged: bool,

    #[serde(default)]
    pub acknowledged_by: Option<String>,

    #[serde(default)]
    pub acknowledged_at: Option<String>,
}
