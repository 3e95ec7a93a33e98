//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use cashier_auth::client::build_http_client;
use cashier_auth::{BackendAuthClient, BoundaryRules, SessionGate};
use cashier_core::config::AppConfig;
use cashier_core::result::AppResult;
use cashier_core::traits::TokenExchange;

use crate::upstream::BackendClient;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Session gate deciding which access token a request may use
    pub gate: Arc<SessionGate>,
    /// Client for the backend business endpoints
    pub backend: Arc<BackendClient>,
    /// Page boundary rules
    pub boundary: Arc<BoundaryRules>,
}

impl AppState {
    /// Wire up the gate and backend client over one shared connection pool.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let http = build_http_client(&config.backend)?;
        let exchange: Arc<dyn TokenExchange> = Arc::new(BackendAuthClient::new(
            http.clone(),
            config.backend.clone(),
        ));
        Ok(Self::with_exchange(config, http, exchange))
    }

    /// Same as [`AppState::new`] with a caller-supplied token exchange.
    pub fn with_exchange(
        config: AppConfig,
        http: reqwest::Client,
        exchange: Arc<dyn TokenExchange>,
    ) -> Self {
        let gate = SessionGate::from_config(exchange, &config);
        let backend = BackendClient::new(http, config.backend.clone());
        let boundary = BoundaryRules::from_config(&config.session);

        Self {
            config: Arc::new(config),
            gate: Arc::new(gate),
            backend: Arc::new(backend),
            boundary: Arc::new(boundary),
        }
    }
}
