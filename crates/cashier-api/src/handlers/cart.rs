//! Cart handlers.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::Response;
use serde_json::Value;

use cashier_core::error::AppError;

use crate::error::ApiError;
use crate::extractors::Session;
use crate::handlers::parse_id;
use crate::state::AppState;

/// GET /api/cart
pub async fn list_carts(State(state): State<AppState>, session: Session) -> Response {
    let result = state
        .backend
        .get(session.token(), "/api/cart", None, "Failed to fetch carts")
        .await;
    session.respond(result.map(Json))
}

/// GET /api/cart/finished
pub async fn list_finished_carts(State(state): State<AppState>, session: Session) -> Response {
    let result = state
        .backend
        .get(session.token(), "/api/cart/finished", None, "Failed to fetch carts")
        .await;
    session.respond(result.map(Json))
}

/// POST /api/cart
pub async fn create_cart(
    State(state): State<AppState>,
    session: Session,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let result = async {
        let Json(body) = body.map_err(|r| AppError::validation(r.body_text()))?;
        let created = state
            .backend
            .post_json(session.token(), "/api/cart", &body, "Failed creating cart")
            .await?;
        Ok::<_, ApiError>(Json(created))
    }
    .await;
    session.respond(result)
}

/// DELETE /api/cart/{cart_id}
pub async fn delete_cart(
    State(state): State<AppState>,
    session: Session,
    Path(cart_id): Path<String>,
) -> Response {
    let result = async {
        let cart_id = parse_id(&cart_id, "Cart ID")?;
        let deleted = state
            .backend
            .delete(
                session.token(),
                &format!("/api/cart/{cart_id}"),
                "Failed to delete cart",
            )
            .await?;
        Ok::<_, ApiError>(Json(deleted))
    }
    .await;
    session.respond(result)
}
