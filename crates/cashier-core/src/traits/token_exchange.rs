//! Credential exchange trait for the backend auth endpoints.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::ExchangeOutcome;

/// Something that can trade credentials for a fresh [`CredentialPair`].
///
/// `Ok(ExchangeOutcome::Rejected { .. })` means the backend answered and said
/// no; `Err(_)` means it could not be reached or its answer was unreadable.
///
/// [`CredentialPair`]: crate::types::CredentialPair
#[async_trait]
pub trait TokenExchange: Send + Sync + std::fmt::Debug + 'static {
    /// Trade a refresh token for a rotated credential pair.
    async fn refresh(&self, refresh_token: &str) -> AppResult<ExchangeOutcome>;

    /// Trade a username and password for an initial credential pair.
    async fn login(&self, username: &str, password: &str) -> AppResult<ExchangeOutcome>;
}
