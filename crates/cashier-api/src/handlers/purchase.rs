//! Purchase handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::response::Response;

use crate::dto::request::{BackendPurchase, PurchaseRequest};
use crate::error::ApiError;
use crate::extractors::{Session, ValidatedJson};
use crate::handlers::parse_id;
use crate::state::AppState;

/// GET /api/purchase/{cart_id}
pub async fn get_purchase(
    State(state): State<AppState>,
    session: Session,
    Path(cart_id): Path<String>,
) -> Response {
    let result = async {
        let cart_id = parse_id(&cart_id, "Cart ID")?;
        let purchase = state
            .backend
            .get(
                session.token(),
                &format!("/api/purchase/{cart_id}"),
                None,
                "Failed to fetch purchase",
            )
            .await?;
        Ok::<_, ApiError>(Json(purchase))
    }
    .await;
    session.respond(result)
}

/// POST /api/purchase/{cart_id}
///
/// The backend takes the cart id in the body rather than the path.
pub async fn purchase_cart(
    State(state): State<AppState>,
    session: Session,
    Path(cart_id): Path<String>,
    body: Result<ValidatedJson<PurchaseRequest>, ApiError>,
) -> Response {
    let result = async {
        let cart_id = parse_id(&cart_id, "Cart ID")?;
        let ValidatedJson(req) = body?;
        let payload = BackendPurchase {
            cart_id,
            paid: req.paid,
            payment_method: &req.payment_method,
        };
        let receipt = state
            .backend
            .post_json(session.token(), "/api/purchase", &payload, "Failed to purchase cart")
            .await?;
        Ok::<_, ApiError>(Json(receipt))
    }
    .await;
    session.respond(result)
}
