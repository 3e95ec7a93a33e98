//! Path rules applied before any handler runs.

use chrono::{DateTime, Utc};

use cashier_core::config::SessionConfig;
use cashier_core::types::parse_timestamp;

use crate::cookies::SessionCookies;

/// What the boundary check wants done with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryDecision {
    /// Let the request through untouched.
    Continue,
    /// Send the browser to the login page.
    RedirectToLogin,
    /// Send an already-authenticated browser to the dashboard.
    RedirectToDashboard,
    /// Let the request through after the session gate mints an access token.
    Refresh,
}

/// Which paths the boundary check watches and where it redirects.
#[derive(Debug, Clone)]
pub struct BoundaryRules {
    matched: Vec<PathPattern>,
    protected: Vec<String>,
    login_path: String,
    dashboard_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PathPattern {
    Exact(String),
    Subtree(String),
}

impl PathPattern {
    fn parse(raw: &str) -> Self {
        match raw.strip_suffix("/*") {
            Some(base) => Self::Subtree(base.to_string()),
            None => Self::Exact(raw.to_string()),
        }
    }

    fn matches(&self, path: &str) -> bool {
        match self {
            Self::Exact(p) => path == p,
            Self::Subtree(base) => {
                path == base
                    || path
                        .strip_prefix(base.as_str())
                        .is_some_and(|rest| rest.starts_with('/'))
            }
        }
    }
}

impl BoundaryRules {
    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            matched: config.matched_paths.iter().map(|p| PathPattern::parse(p)).collect(),
            protected: config.protected_paths.clone(),
            login_path: config.login_path.clone(),
            dashboard_path: config.dashboard_path.clone(),
        }
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn dashboard_path(&self) -> &str {
        &self.dashboard_path
    }

    /// Whether the boundary check runs on this path at all.
    pub fn applies_to(&self, path: &str) -> bool {
        self.matched.iter().any(|p| p.matches(path))
    }

    /// Whether this path needs a live refresh credential.
    pub fn is_protected(&self, path: &str) -> bool {
        self.protected.iter().any(|prefix| path.starts_with(prefix.as_str()))
    }

    /// Decide what to do with a request for `path` carrying `cookies`.
    pub fn decide(&self, path: &str, cookies: &SessionCookies, now: DateTime<Utc>) -> BoundaryDecision {
        let has_refresh = cookies.refresh_token.is_some();
        let expired = refresh_expired(cookies.refresh_valid_until.as_deref(), now);
        let live = has_refresh && !expired;

        if live && path == self.login_path {
            return BoundaryDecision::RedirectToDashboard;
        }
        if !live && self.is_protected(path) {
            return BoundaryDecision::RedirectToLogin;
        }
        if live && cookies.access_token.is_none() {
            return BoundaryDecision::Refresh;
        }
        BoundaryDecision::Continue
    }
}

/// A refresh credential is stale once its recorded expiry has passed. A
/// missing or unreadable expiry is not treated as stale.
pub fn refresh_expired(valid_until: Option<&str>, now: DateTime<Utc>) -> bool {
    valid_until
        .and_then(parse_timestamp)
        .is_some_and(|until| until <= now)
}
