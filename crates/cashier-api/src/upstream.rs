//! Authenticated calls to the business backend.
//!
//! Every call carries `Authorization: Bearer <token>` and resolves to the
//! backend's JSON body. Failures are classified so the HTTP layer can relay
//! them: a backend error status (or an envelope `code` other than 200)
//! becomes [`ErrorKind::Upstream`], and an unreachable or unreadable backend
//! becomes [`ErrorKind::ExternalService`].

use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use cashier_core::config::BackendConfig;
use cashier_core::error::{AppError, ErrorKind};
use cashier_core::result::AppResult;

const SUCCESS_CODE: i64 = 200;

/// HTTP client for the backend's business endpoints.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    config: BackendConfig,
}

impl BackendClient {
    /// Create a client sharing an existing connection pool.
    pub fn new(http: reqwest::Client, config: BackendConfig) -> Self {
        Self { http, config }
    }

    fn url(&self, path: &str, query: Option<&str>) -> String {
        let base = self.config.endpoint(path);
        match query.filter(|q| !q.is_empty()) {
            Some(q) => format!("{base}?{q}"),
            None => base,
        }
    }

    /// `GET path[?query]`. The query string is relayed verbatim.
    pub async fn get(
        &self,
        token: &str,
        path: &str,
        query: Option<&str>,
        failure: &str,
    ) -> AppResult<Value> {
        let request = self.http.get(self.url(path, query)).bearer_auth(token);
        self.dispatch(request, path, failure).await
    }

    /// `POST path` with a JSON body.
    pub async fn post_json<B>(&self, token: &str, path: &str, body: &B, failure: &str) -> AppResult<Value>
    where
        B: Serialize + ?Sized,
    {
        let request = self
            .http
            .post(self.url(path, None))
            .bearer_auth(token)
            .json(body);
        self.dispatch(request, path, failure).await
    }

    /// `PUT path` with a JSON body.
    pub async fn put_json<B>(&self, token: &str, path: &str, body: &B, failure: &str) -> AppResult<Value>
    where
        B: Serialize + ?Sized,
    {
        let request = self
            .http
            .put(self.url(path, None))
            .bearer_auth(token)
            .json(body);
        self.dispatch(request, path, failure).await
    }

    /// `DELETE path`.
    pub async fn delete(&self, token: &str, path: &str, failure: &str) -> AppResult<Value> {
        let request = self.http.delete(self.url(path, None)).bearer_auth(token);
        self.dispatch(request, path, failure).await
    }

    /// `POST path` with an opaque body, e.g. a multipart upload.
    pub async fn post_raw(
        &self,
        token: &str,
        path: &str,
        content_type: Option<&str>,
        body: Bytes,
        failure: &str,
    ) -> AppResult<Value> {
        let mut request = self
            .http
            .post(self.url(path, None))
            .bearer_auth(token)
            .body(body);
        if let Some(content_type) = content_type {
            request = request.header(CONTENT_TYPE, content_type);
        }
        self.dispatch(request, path, failure).await
    }

    async fn dispatch(
        &self,
        request: reqwest::RequestBuilder,
        path: &str,
        failure: &str,
    ) -> AppResult<Value> {
        let response = request.send().await.map_err(|e| {
            error!(path, error = %e, "Backend request failed");
            AppError::with_source(ErrorKind::ExternalService, "Backend unreachable", e)
        })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| {
            error!(path, error = %e, "Failed to read backend response");
            AppError::with_source(ErrorKind::ExternalService, "Backend response unreadable", e)
        })?;

        if !status.is_success() {
            debug!(path, status = status.as_u16(), "Backend returned an error status");
            let message = backend_message(&bytes).unwrap_or_else(|| failure.to_string());
            return Err(AppError::upstream(status.as_u16(), message));
        }

        if bytes.is_empty() {
            return Ok(Value::Null);
        }

        let body: Value = serde_json::from_slice(&bytes).map_err(|e| {
            error!(path, error = %e, "Backend response is not JSON");
            AppError::with_source(ErrorKind::ExternalService, "Backend response unreadable", e)
        })?;

        match body.get("code").and_then(Value::as_i64) {
            Some(code) if code != SUCCESS_CODE => {
                debug!(path, code, "Backend envelope reports a failure");
                let message = body
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| failure.to_string());
                let status = u16::try_from(code).unwrap_or_default();
                Err(AppError::upstream(status, message))
            }
            _ => Ok(body),
        }
    }
}

fn backend_message(bytes: &[u8]) -> Option<String> {
    let body: Value = serde_json::from_slice(bytes).ok()?;
    body.get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
