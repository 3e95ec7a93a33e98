//! `Session` extractor: a usable access token for the current request.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;

use cashier_auth::{Authorization, CookieRotation};

use crate::error::ApiError;
use crate::state::AppState;

/// Authorization resolved by the session gate.
///
/// When the boundary middleware already refreshed this request, its
/// authorization is reused and the middleware writes the cookies. Otherwise
/// the gate runs here and any rotation travels with the handler's response
/// through [`Session::respond`].
#[derive(Debug, Clone)]
pub struct Session(pub Authorization);

impl Session {
    /// Bearer token to forward to the backend.
    pub fn token(&self) -> &str {
        &self.0.access_token
    }

    /// Finish the request, attaching rotated cookies whether or not the
    /// backend call succeeded.
    pub fn respond<T, E>(self, result: Result<T, E>) -> Response
    where
        T: IntoResponse,
        E: Into<ApiError>,
    {
        let jar = self
            .0
            .rotation
            .map(CookieRotation::into_jar)
            .unwrap_or_else(CookieJar::new);

        match result {
            Ok(body) => (jar, body).into_response(),
            Err(err) => {
                let err: ApiError = err.into();
                (jar, err).into_response()
            }
        }
    }
}

impl FromRequestParts<AppState> for Session {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(existing) = parts.extensions.get::<Authorization>() {
            return Ok(Self(existing.clone()));
        }

        let jar = CookieJar::from_headers(&parts.headers);
        let authorization = state.gate.authorize(&jar).await?;
        Ok(Self(authorization))
    }
}
