//! Session cookie and page boundary configuration.

use serde::{Deserialize, Serialize};

/// Session gate and boundary check configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Force the `Secure` cookie attribute on or off. Unset means
    /// "secure in production only".
    #[serde(default)]
    pub secure_cookies: Option<bool>,
    /// Where unauthenticated page requests are sent.
    #[serde(default = "default_login_path")]
    pub login_path: String,
    /// Where authenticated visitors of the login page are sent.
    #[serde(default = "default_dashboard_path")]
    pub dashboard_path: String,
    /// Path patterns the boundary check runs on. `/x/*` matches `/x` and
    /// everything below it; anything else matches exactly.
    #[serde(default = "default_matched_paths")]
    pub matched_paths: Vec<String>,
    /// Prefixes that require a live refresh credential.
    #[serde(default = "default_protected_paths")]
    pub protected_paths: Vec<String>,
    /// How long a rotated credential pair is shared with late requests that
    /// still carry the old refresh token.
    #[serde(default = "default_refresh_grace")]
    pub refresh_grace_seconds: u64,
    /// Upper bound on remembered refresh exchanges.
    #[serde(default = "default_refresh_capacity")]
    pub refresh_cache_capacity: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secure_cookies: None,
            login_path: default_login_path(),
            dashboard_path: default_dashboard_path(),
            matched_paths: default_matched_paths(),
            protected_paths: default_protected_paths(),
            refresh_grace_seconds: default_refresh_grace(),
            refresh_cache_capacity: default_refresh_capacity(),
        }
    }
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_dashboard_path() -> String {
    "/dashboard".to_string()
}

fn default_matched_paths() -> Vec<String> {
    vec![
        "/dashboard/*".to_string(),
        "/purchase/*".to_string(),
        "/profile/*".to_string(),
        "/login".to_string(),
        "/api/product".to_string(),
        "/product".to_string(),
    ]
}

fn default_protected_paths() -> Vec<String> {
    vec![
        "/dashboard".to_string(),
        "/profile".to_string(),
        "/api/product".to_string(),
        "/product".to_string(),
    ]
}

fn default_refresh_grace() -> u64 {
    10
}

fn default_refresh_capacity() -> u64 {
    10_000
}
