//! The session gate: the single authority deciding whether a request may
//! reach the backend, and with which access token.
//!
//! The gate looks only at the request cookies:
//!
//! 1. no refresh token: not authenticated, the backend is never contacted;
//! 2. access token present: forwarded as-is, nothing to rotate;
//! 3. otherwise exactly one (coalesced) refresh exchange, whose result is
//!    both the token to forward and the cookies to rotate.
//!
//! The `accessValidUntil` cookie is not consulted. The browser drops the
//! access cookie at its own `Expires`, and a token the backend no longer
//! accepts comes back as a 401 that is relayed to the browser.

use std::sync::Arc;
use std::time::Duration;

use axum_extra::extract::cookie::CookieJar;
use tracing::{debug, warn};

use cashier_core::config::AppConfig;
use cashier_core::error::AppError;
use cashier_core::result::AppResult;
use cashier_core::traits::TokenExchange;
use cashier_core::types::{CredentialPair, ExchangeOutcome};

use crate::coalesce::RefreshCoalescer;
use crate::cookies::{CookiePolicy, CookieRotation, SessionCookies};

/// A usable access token, plus the cookies to write if it was just minted.
#[derive(Debug, Clone)]
pub struct Authorization {
    /// Bearer token to forward to the backend.
    pub access_token: String,
    /// Rotated session cookies, present only after a refresh.
    pub rotation: Option<CookieRotation>,
}

impl Authorization {
    /// Authorization for a token the browser already holds.
    pub fn existing(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            rotation: None,
        }
    }
}

/// Decides per request whether the caller holds a usable access credential.
#[derive(Debug, Clone)]
pub struct SessionGate {
    exchange: Arc<dyn TokenExchange>,
    policy: CookiePolicy,
    coalescer: RefreshCoalescer,
}

impl SessionGate {
    pub fn new(
        exchange: Arc<dyn TokenExchange>,
        policy: CookiePolicy,
        coalescer: RefreshCoalescer,
    ) -> Self {
        Self {
            exchange,
            policy,
            coalescer,
        }
    }

    /// Build a gate with the cookie policy and refresh grace from configuration.
    pub fn from_config(exchange: Arc<dyn TokenExchange>, config: &AppConfig) -> Self {
        let coalescer = RefreshCoalescer::new(
            Duration::from_secs(config.session.refresh_grace_seconds),
            config.session.refresh_cache_capacity,
        );
        Self::new(exchange, CookiePolicy::new(config.secure_cookies()), coalescer)
    }

    /// Cookie attributes this gate writes with.
    pub fn policy(&self) -> CookiePolicy {
        self.policy
    }

    /// Authorize a request from its cookie jar.
    pub async fn authorize(&self, jar: &CookieJar) -> AppResult<Authorization> {
        self.authorize_cookies(&SessionCookies::from_jar(jar)).await
    }

    /// Authorize a request from already-parsed session cookies.
    pub async fn authorize_cookies(&self, cookies: &SessionCookies) -> AppResult<Authorization> {
        let Some(refresh_token) = cookies.refresh_token.as_deref() else {
            return Err(AppError::not_authenticated());
        };

        if let Some(access_token) = &cookies.access_token {
            return Ok(Authorization::existing(access_token.clone()));
        }

        let pair = self.refresh(refresh_token).await?;
        let Some(access_token) = pair.access_token.clone() else {
            warn!("Refresh succeeded without an access token");
            return Err(AppError::not_authenticated());
        };

        Ok(Authorization {
            access_token,
            rotation: Some(self.policy.rotation(&pair)),
        })
    }

    /// Trade a refresh token for a rotated pair.
    ///
    /// Concurrent calls with the same token share one backend exchange. A
    /// backend rejection becomes an authentication error; an unreachable or
    /// unreadable backend becomes an external-service error.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<CredentialPair> {
        let exchange = Arc::clone(&self.exchange);
        let token = refresh_token.to_string();

        self.coalescer
            .run(refresh_token, async move {
                match exchange.refresh(&token).await {
                    Ok(ExchangeOutcome::Issued(pair)) => {
                        debug!("Session refreshed");
                        Ok(pair)
                    }
                    Ok(ExchangeOutcome::Rejected { code, .. }) => {
                        debug!(code, "Refresh token rejected");
                        Err(AppError::not_authenticated())
                    }
                    Err(e) => Err(e),
                }
            })
            .await
    }

    /// Log in with a username and password, returning the issued pair and
    /// the cookies that establish the session.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> AppResult<(CredentialPair, CookieRotation)> {
        match self.exchange.login(username, password).await? {
            ExchangeOutcome::Issued(pair) if pair.access_token.is_some() => {
                let rotation = self.policy.rotation(&pair);
                Ok((pair, rotation))
            }
            ExchangeOutcome::Issued(_) => {
                warn!(username, "Login succeeded without an access token");
                Err(AppError::not_authenticated())
            }
            ExchangeOutcome::Rejected { code, message } => {
                debug!(username, code, "Login rejected");
                Err(AppError::authentication(
                    message.unwrap_or_else(|| "Invalid username or password".to_string()),
                ))
            }
        }
    }

    /// Cookies that end the session.
    pub fn logout(&self) -> CookieRotation {
        self.policy.clear_all()
    }
}
