//! Auth handlers: login, logout, refresh-token.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::http::header::ALLOW;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use tracing::info;

use cashier_core::error::AppError;

use crate::dto::request::{LoginRequest, RefreshTokenRequest};
use crate::dto::response::{ErrorResponse, MessageResponse, RefreshTokenResponse};
use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

const REFRESH_FAILED: &str = "Failed to refresh token";

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<(CookieJar, Json<MessageResponse>)> {
    let (_, rotation) = state.gate.login(&req.username, &req.password).await?;

    info!(username = %req.username, "User logged in");
    Ok((
        rotation.into_jar(),
        Json(MessageResponse::new("Login successful")),
    ))
}

/// POST /api/logout
pub async fn logout(State(state): State<AppState>) -> (CookieJar, Json<MessageResponse>) {
    (
        state.gate.logout().into_jar(),
        Json(MessageResponse::new("Logged out successfully")),
    )
}

/// Any other method on /api/logout
pub async fn logout_method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(ALLOW, "POST")],
        Json(ErrorResponse {
            error: "Method not allowed".to_string(),
        }),
    )
        .into_response()
}

/// POST /api/refresh-token
///
/// Exchanges an explicit `{ "refreshToken" }` body for a new pair. Cookies
/// are left alone.
pub async fn refresh_token(
    State(state): State<AppState>,
    body: Result<Json<RefreshTokenRequest>, JsonRejection>,
) -> ApiResult<Json<RefreshTokenResponse>> {
    let token = body
        .ok()
        .and_then(|Json(req)| req.refresh_token)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::authentication(REFRESH_FAILED))?;

    let pair = state.gate.refresh(&token).await.map_err(|e| {
        if e.is_authentication() {
            AppError::authentication(REFRESH_FAILED)
        } else {
            e
        }
    })?;

    Ok(Json(RefreshTokenResponse::from(&pair)))
}
