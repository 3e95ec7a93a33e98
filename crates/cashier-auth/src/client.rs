//! Backend auth endpoints (`/api/login`, `/api/refresh`) over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, error, warn};

use cashier_core::config::BackendConfig;
use cashier_core::error::{AppError, ErrorKind};
use cashier_core::result::AppResult;
use cashier_core::traits::TokenExchange;
use cashier_core::types::{CredentialPair, ExchangeOutcome, parse_timestamp};

/// Backend success code inside the JSON envelope.
const SUCCESS_CODE: i64 = 200;

/// Build the process-wide HTTP client used for every backend call.
pub fn build_http_client(config: &BackendConfig) -> AppResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .build()
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Failed to build backend HTTP client: {e}"),
                e,
            )
        })
}

/// `{ "code": 200, "data": { ... }, "message": "..." }`
#[derive(Debug, Deserialize)]
struct AuthEnvelope {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct AuthData {
    #[serde(default)]
    access: Option<String>,
    #[serde(default)]
    access_valid_until: Option<String>,
    #[serde(default)]
    refresh: Option<String>,
    #[serde(default)]
    refresh_valid_until: Option<String>,
}

impl AuthData {
    fn into_pair(self) -> CredentialPair {
        CredentialPair {
            access_token: self.access.filter(|t| !t.is_empty()),
            access_valid_until: timestamp_field("access_valid_until", self.access_valid_until),
            refresh_token: self.refresh.filter(|t| !t.is_empty()),
            refresh_valid_until: timestamp_field("refresh_valid_until", self.refresh_valid_until),
        }
    }
}

fn timestamp_field(field: &str, raw: Option<String>) -> Option<chrono::DateTime<chrono::Utc>> {
    let raw = raw?;
    let parsed = parse_timestamp(&raw);
    if parsed.is_none() {
        warn!(field, "Backend sent an unparsable expiry, ignoring it");
    }
    parsed
}

/// HTTP implementation of [`TokenExchange`] against the business backend.
#[derive(Debug, Clone)]
pub struct BackendAuthClient {
    http: reqwest::Client,
    config: BackendConfig,
}

impl BackendAuthClient {
    /// Create a client sharing an existing connection pool.
    pub fn new(http: reqwest::Client, config: BackendConfig) -> Self {
        Self { http, config }
    }

    async fn exchange(&self, path: &str, body: Value) -> AppResult<ExchangeOutcome> {
        let url = self.config.endpoint(path);

        let response = self.http.post(&url).json(&body).send().await.map_err(|e| {
            error!(path, error = %e, "Backend auth exchange failed");
            AppError::with_source(ErrorKind::ExternalService, "Backend unreachable", e)
        })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| {
            error!(path, error = %e, "Failed to read backend auth response");
            AppError::with_source(ErrorKind::ExternalService, "Backend response unreadable", e)
        })?;

        let envelope: AuthEnvelope = serde_json::from_slice(&bytes).map_err(|e| {
            error!(path, status = status.as_u16(), error = %e, "Backend auth response is not JSON");
            AppError::with_source(ErrorKind::ExternalService, "Backend response unreadable", e)
        })?;

        match envelope.code {
            Some(SUCCESS_CODE) => {
                let data = match envelope.data {
                    Some(value) => serde_json::from_value::<AuthData>(value).map_err(|e| {
                        error!(path, error = %e, "Backend auth payload has an unexpected shape");
                        AppError::with_source(
                            ErrorKind::ExternalService,
                            "Backend response unreadable",
                            e,
                        )
                    })?,
                    None => AuthData::default(),
                };
                debug!(path, "Backend issued credentials");
                Ok(ExchangeOutcome::Issued(data.into_pair()))
            }
            code => {
                let code = code.unwrap_or_default();
                debug!(path, code, "Backend rejected credential exchange");
                Ok(ExchangeOutcome::Rejected {
                    code,
                    message: envelope.message,
                })
            }
        }
    }
}

#[async_trait]
impl TokenExchange for BackendAuthClient {
    async fn refresh(&self, refresh_token: &str) -> AppResult<ExchangeOutcome> {
        self.exchange("/api/refresh", json!({ "refresh": refresh_token }))
            .await
    }

    async fn login(&self, username: &str, password: &str) -> AppResult<ExchangeOutcome> {
        self.exchange(
            "/api/login",
            json!({ "username": username, "password": password }),
        )
        .await
    }
}
