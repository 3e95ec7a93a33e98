//! Cart item handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::Response;

use cashier_core::error::AppError;

use crate::dto::request::{AddCartItemRequest, CartItemQuery, UpdateCartItemRequest};
use crate::error::ApiError;
use crate::extractors::{Session, ValidatedJson};
use crate::handlers::parse_id;
use crate::state::AppState;

/// GET /api/cart-item?cartId={cart_id}
pub async fn list_items(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<CartItemQuery>,
) -> Response {
    let result = async {
        let raw = query
            .cart_id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| AppError::validation("Cart ID is required"))?;
        let cart_id = parse_id(&raw, "Cart ID")?;
        let items = state
            .backend
            .get(
                session.token(),
                &format!("/api/cart-item/{cart_id}"),
                None,
                "Failed to fetch cart items",
            )
            .await?;
        Ok::<_, ApiError>(Json(items))
    }
    .await;
    session.respond(result)
}

/// POST /api/cart-item/{cart_id}
pub async fn add_item(
    State(state): State<AppState>,
    session: Session,
    Path(cart_id): Path<String>,
    body: Result<ValidatedJson<AddCartItemRequest>, ApiError>,
) -> Response {
    let result = async {
        let cart_id = parse_id(&cart_id, "Cart ID")?;
        let ValidatedJson(req) = body?;
        let added = state
            .backend
            .post_json(
                session.token(),
                &format!("/api/cart-item/{cart_id}"),
                &req,
                "Failed to add item to cart",
            )
            .await?;
        Ok::<_, ApiError>(Json(added))
    }
    .await;
    session.respond(result)
}

/// PUT /api/cart-item/{cart_id}
pub async fn update_item(
    State(state): State<AppState>,
    session: Session,
    Path(cart_id): Path<String>,
    body: Result<ValidatedJson<UpdateCartItemRequest>, ApiError>,
) -> Response {
    let result = async {
        let cart_id = parse_id(&cart_id, "Cart ID")?;
        let ValidatedJson(req) = body?;
        let updated = state
            .backend
            .put_json(
                session.token(),
                &format!("/api/cart-item/{cart_id}"),
                &req,
                "Failed to update item",
            )
            .await?;
        Ok::<_, ApiError>(Json(updated))
    }
    .await;
    session.respond(result)
}

/// DELETE /api/cart-item/{item_id}
pub async fn delete_item(
    State(state): State<AppState>,
    session: Session,
    Path(item_id): Path<String>,
) -> Response {
    let result = async {
        let item_id = parse_id(&item_id, "Item ID")?;
        let deleted = state
            .backend
            .delete(
                session.token(),
                &format!("/api/cart-item/{item_id}"),
                "Failed to delete item",
            )
            .await?;
        Ok::<_, ApiError>(Json(deleted))
    }
    .await;
    session.respond(result)
}
