//! Response DTOs.

use serde::{Deserialize, Serialize};

use cashier_core::types::{CredentialPair, format_timestamp};

/// `{ "message": ... }`, the shape the front end reads for errors and notices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `{ "error": ... }`, used by the logout route for unsupported methods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Tokens handed back by the explicit refresh-token endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenResponse {
    pub access_token: Option<String>,
    pub access_valid_until: Option<String>,
    pub refresh_token: Option<String>,
    pub refresh_valid_until: Option<String>,
}

impl From<&CredentialPair> for RefreshTokenResponse {
    fn from(pair: &CredentialPair) -> Self {
        Self {
            access_token: pair.access_token.clone(),
            access_valid_until: pair.access_valid_until.as_ref().map(format_timestamp),
            refresh_token: pair.refresh_token.clone(),
            refresh_valid_until: pair.refresh_valid_until.as_ref().map(format_timestamp),
        }
    }
}
