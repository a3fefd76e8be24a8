//! Session types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The user object as the backend returns it and as it is persisted
/// locally
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredUser {
    pub id: String,

    pub username: String,

    #[serde(default)]
    pub email: Option<String>,

    /// Admin marker exactly as the backend sent it. Booleans, strings
    /// and numbers have all been observed in stored data, so the raw
    /// value is kept and [`parse_admin_flag`] decides.
    #[serde(default)]
    pub isadmin: Value,
}

impl StoredUser {
    /// Whether this user should see admin UI
    pub fn is_admin(&self) -> bool {
        parse_admin_flag(&self.isadmin)
    }
}

/// An authenticated session: the stored user plus the bearer token from
/// login. A missing token means a legacy login with no API-level
/// authorization.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: StoredUser,
    pub token: Option<String>,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.user.is_admin()
    }
}

/// Interpret a loosely-typed admin marker.
///
/// True iff the raw value is exactly `true`, `"true"`, `1` or `"1"`.
/// Everything else, including an absent field, is not admin.
pub fn parse_admin_flag(raw: &Value) -> bool {
    match raw {
        Value::Bool(flag) => *flag,
        Value::String(text) => text == "true" || text == "1",
        Value::Number(num) => num.as_i64() == Some(1),
        _ => false,
    }
}
