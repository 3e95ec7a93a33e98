//! The four session cookies shared with the browser.
//!
//! All of them are HTTP-only and site-wide. `Secure` follows the
//! [`CookiePolicy`], and each carries the expiry of the credential it holds.

use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, HeaderValue};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use chrono::{DateTime, Utc};
use time::OffsetDateTime;
use tracing::warn;

use cashier_core::types::{CredentialPair, format_timestamp};

/// Cookie holding the access token.
pub const ACCESS_TOKEN: &str = "accessToken";
/// Cookie holding the access token expiry as an ISO-8601 string.
pub const ACCESS_VALID_UNTIL: &str = "accessValidUntil";
/// Cookie holding the refresh token.
pub const REFRESH_TOKEN: &str = "refreshToken";
/// Cookie holding the refresh token expiry as an ISO-8601 string.
pub const REFRESH_VALID_UNTIL: &str = "refreshValidUntil";

/// All session cookie names, in the order they are written.
pub const ALL: [&str; 4] = [ACCESS_TOKEN, ACCESS_VALID_UNTIL, REFRESH_TOKEN, REFRESH_VALID_UNTIL];

/// Session values read from an inbound request. Empty cookies count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionCookies {
    pub access_token: Option<String>,
    pub access_valid_until: Option<String>,
    pub refresh_token: Option<String>,
    pub refresh_valid_until: Option<String>,
}

impl SessionCookies {
    /// Read the session cookies out of a request cookie jar.
    pub fn from_jar(jar: &CookieJar) -> Self {
        let read = |name: &str| {
            jar.get(name)
                .map(|c| c.value().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            access_token: read(ACCESS_TOKEN),
            access_valid_until: read(ACCESS_VALID_UNTIL),
            refresh_token: read(REFRESH_TOKEN),
            refresh_valid_until: read(REFRESH_VALID_UNTIL),
        }
    }

    /// Read the session cookies straight from request headers.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self::from_jar(&CookieJar::from_headers(headers))
    }
}

/// Attributes shared by every session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookiePolicy {
    /// Whether cookies carry the `Secure` attribute.
    pub secure: bool,
}

impl CookiePolicy {
    pub fn new(secure: bool) -> Self {
        Self { secure }
    }

    /// Build one session cookie.
    pub fn cookie(
        &self,
        name: &'static str,
        value: String,
        expires: Option<OffsetDateTime>,
    ) -> Cookie<'static> {
        let mut builder = Cookie::build((name, value))
            .http_only(true)
            .path("/")
            .secure(self.secure);
        if let Some(at) = expires {
            builder = builder.expires(at);
        }
        builder.build()
    }

    /// Cookies for a freshly issued pair. A cookie is only produced for a
    /// field the backend actually sent.
    pub fn rotation(&self, pair: &CredentialPair) -> CookieRotation {
        let access_expiry = pair.access_valid_until.as_ref().and_then(to_offset);
        let refresh_expiry = pair.refresh_valid_until.as_ref().and_then(to_offset);
        let mut cookies = Vec::with_capacity(4);

        if let Some(token) = pair.access_token.as_ref().filter(|t| !t.is_empty()) {
            cookies.push(self.cookie(ACCESS_TOKEN, token.clone(), access_expiry));
        }
        if let Some(at) = &pair.access_valid_until {
            cookies.push(self.cookie(ACCESS_VALID_UNTIL, format_timestamp(at), access_expiry));
        }
        if let Some(token) = pair.refresh_token.as_ref().filter(|t| !t.is_empty()) {
            cookies.push(self.cookie(REFRESH_TOKEN, token.clone(), refresh_expiry));
        }
        if let Some(at) = &pair.refresh_valid_until {
            cookies.push(self.cookie(REFRESH_VALID_UNTIL, format_timestamp(at), refresh_expiry));
        }

        CookieRotation { cookies }
    }

    /// Empty, already-expired versions of all four cookies.
    pub fn clear_all(&self) -> CookieRotation {
        let cookies = ALL
            .into_iter()
            .map(|name| self.cookie(name, String::new(), Some(OffsetDateTime::UNIX_EPOCH)))
            .collect();
        CookieRotation { cookies }
    }
}

/// A set of cookies to write on the outgoing response.
#[derive(Debug, Clone, Default)]
pub struct CookieRotation {
    cookies: Vec<Cookie<'static>>,
}

impl CookieRotation {
    pub fn cookies(&self) -> &[Cookie<'static>] {
        &self.cookies
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Look up a cookie in this rotation by name.
    pub fn get(&self, name: &str) -> Option<&Cookie<'static>> {
        self.cookies.iter().find(|c| c.name() == name)
    }

    /// Turn the rotation into a jar usable as a response part.
    pub fn into_jar(self) -> CookieJar {
        self.cookies
            .into_iter()
            .fold(CookieJar::new(), |jar, cookie| jar.add(cookie))
    }

    /// Append one `Set-Cookie` header per cookie to an existing response.
    pub fn append_to(&self, headers: &mut HeaderMap) {
        for cookie in &self.cookies {
            match HeaderValue::from_str(&cookie.encoded().to_string()) {
                Ok(value) => {
                    headers.append(SET_COOKIE, value);
                }
                Err(e) => warn!(cookie = cookie.name(), error = %e, "Dropping unencodable cookie"),
            }
        }
    }
}

fn to_offset(at: &DateTime<Utc>) -> Option<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp(at.timestamp()).ok()
}
