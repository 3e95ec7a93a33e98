//! Single-flight refresh keyed by refresh token.
//!
//! Concurrent requests from one browser session all carry the same refresh
//! cookie. Only the first one talks to the backend; the others wait for it
//! and reuse its pair. A successful pair stays available for a short grace
//! window so late requests still holding the old cookies get the same
//! rotation instead of spending the already-rotated token. Failures are
//! never kept.

use std::future::Future;
use std::time::Duration;

use moka::future::Cache;

use cashier_core::result::AppResult;
use cashier_core::types::CredentialPair;

/// In-memory coalescer for refresh exchanges.
#[derive(Debug, Clone)]
pub struct RefreshCoalescer {
    recent: Cache<String, CredentialPair>,
}

impl RefreshCoalescer {
    /// Create a coalescer remembering at most `capacity` exchanges for `grace`.
    pub fn new(grace: Duration, capacity: u64) -> Self {
        let recent = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(grace.max(Duration::from_millis(1)))
            .build();

        Self { recent }
    }

    /// Run `exchange` for `refresh_token` unless an identical exchange is in
    /// flight or recently succeeded, in which case its result is shared.
    pub async fn run<F>(&self, refresh_token: &str, exchange: F) -> AppResult<CredentialPair>
    where
        F: Future<Output = AppResult<CredentialPair>>,
    {
        self.recent
            .try_get_with(refresh_token.to_string(), exchange)
            .await
            .map_err(|shared| shared.as_ref().clone())
    }
}
