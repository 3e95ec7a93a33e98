//! Page boundary enforcement.
//!
//! Redirects browsers without a live session away from protected pages,
//! sends logged-in browsers past the login page, and mints an access token
//! through the session gate when only the refresh cookie is left.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use chrono::Utc;
use tracing::{debug, warn};

use cashier_auth::{Authorization, BoundaryDecision, SessionCookies};

use crate::state::AppState;

/// Runs the boundary rules before any handler on matching paths.
pub async fn session_boundary(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    if !state.boundary.applies_to(&path) {
        return next.run(request).await;
    }

    let cookies = SessionCookies::from_headers(request.headers());
    match state.boundary.decide(&path, &cookies, Utc::now()) {
        BoundaryDecision::Continue => next.run(request).await,
        BoundaryDecision::RedirectToLogin => {
            debug!(path = %path, "No live session, redirecting to login");
            Redirect::temporary(state.boundary.login_path()).into_response()
        }
        BoundaryDecision::RedirectToDashboard => {
            Redirect::temporary(state.boundary.dashboard_path()).into_response()
        }
        BoundaryDecision::Refresh => match state.gate.authorize_cookies(&cookies).await {
            Ok(authorization) => {
                let rotation = authorization.rotation;
                request
                    .extensions_mut()
                    .insert(Authorization::existing(authorization.access_token));

                let mut response = next.run(request).await;
                if let Some(rotation) = rotation {
                    rotation.append_to(response.headers_mut());
                }
                response
            }
            Err(e) => {
                if !e.is_authentication() {
                    warn!(path = %path, error = %e, "Session refresh failed");
                }
                Redirect::temporary(state.boundary.login_path()).into_response()
            }
        },
    }
}
