//! Access/refresh credential types issued by the backend.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A credential pair as issued by a login or refresh exchange.
///
/// Every field is optional: the backend may omit any of them and the
/// gateway only ever sets cookies for the fields it actually received.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPair {
    /// Short-lived bearer token.
    pub access_token: Option<String>,
    /// When the access token stops being accepted.
    pub access_valid_until: Option<DateTime<Utc>>,
    /// Long-lived token used only to obtain a new pair.
    pub refresh_token: Option<String>,
    /// When the refresh token stops being accepted.
    pub refresh_valid_until: Option<DateTime<Utc>>,
}

/// Result of a credential exchange the backend answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeOutcome {
    /// The backend reported success and issued credentials.
    Issued(CredentialPair),
    /// The backend answered with a non-success code.
    Rejected {
        /// The `code` field of the backend envelope.
        code: i64,
        /// Optional backend message.
        message: Option<String>,
    },
}

/// Parse a backend or cookie timestamp.
///
/// Accepts RFC 3339 and, for backends that omit the offset, a naive
/// `YYYY-MM-DDTHH:MM:SS[.fff]` which is taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Format a timestamp the way expiry cookies store it
/// (`2030-01-01T00:00:00.000Z`).
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
