//! Configuration for the LitMT client core
//!
//! A [`Config`] is constructed once at startup and passed into the
//! components that need it. Nothing reads the environment at import
//! time; [`Config::from_env`] is the single place env vars are consulted.

use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the LitMT backend, normalized (scheme present, no
    /// trailing slash)
    pub backend_base_url: String,

    /// Optional static credential attached to write requests when no
    /// session token exists. Non-production convenience only; leave
    /// unset in production and the server decides whether anonymous
    /// writes are permitted.
    pub admin_fallback_key: Option<String>,

    /// Directory for the local key-value store (session, view prefs)
    pub state_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            backend_base_url: "http://127.0.0.1:8080".to_string(),
            admin_fallback_key: None,
            state_dir: PathBuf::from(".litmt"),
        }
    }
}

impl Config {
    /// Build a config for the given backend URL, normalizing it
    pub fn new(backend_base_url: &str) -> Self {
        Config {
            backend_base_url: normalize_backend_url(backend_base_url)
                .unwrap_or_else(|| Self::default().backend_base_url),
            ..Self::default()
        }
    }

    /// Load configuration from the environment, falling back to
    /// defaults for anything unset
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Config {
            backend_base_url: env::var("LITMT_BACKEND_URL")
                .ok()
                .and_then(|raw| normalize_backend_url(&raw))
                .unwrap_or(defaults.backend_base_url),
            admin_fallback_key: env::var("LITMT_ADMIN_FALLBACK_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            state_dir: env::var("LITMT_STATE_DIR")
                .ok()
                .map(PathBuf::from)
                .unwrap_or(defaults.state_dir),
        }
    }
}

/// Normalize a backend URL: trim, prefix `http://` when no scheme is
/// present, strip one trailing slash. Returns `None` for blank input so
/// callers fall back to the default.
fn normalize_backend_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lower = trimmed.to_ascii_lowercase();
    let with_scheme = if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };
    Some(
        with_scheme
            .strip_suffix('/')
            .unwrap_or(&with_scheme)
            .to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_host_gets_a_scheme() {
        assert_eq!(
            normalize_backend_url("api.litmt.org"),
            Some("http://api.litmt.org".to_string())
        );
    }

    #[test]
    fn existing_scheme_and_trailing_slash() {
        assert_eq!(
            normalize_backend_url(" https://api.litmt.org/ "),
            Some("https://api.litmt.org".to_string())
        );
        assert_eq!(
            normalize_backend_url("HTTP://api.litmt.org"),
            Some("HTTP://api.litmt.org".to_string())
        );
    }

    #[test]
    fn blank_input_falls_back_to_default() {
        assert_eq!(normalize_backend_url("   "), None);
        assert_eq!(
            Config::new("").backend_base_url,
            "http://127.0.0.1:8080".to_string()
        );
    }
}
