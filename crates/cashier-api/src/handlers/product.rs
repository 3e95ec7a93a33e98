//! Product catalog and product image handlers.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, RawQuery, State};
use axum::http::HeaderMap;
use axum::http::header::CONTENT_TYPE;
use axum::response::Response;

use crate::dto::request::ProductRequest;
use crate::error::ApiError;
use crate::extractors::{Session, ValidatedJson};
use crate::handlers::parse_id;
use crate::state::AppState;

/// GET /api/product[?page=&per_page=]
pub async fn list_products(
    State(state): State<AppState>,
    session: Session,
    RawQuery(query): RawQuery,
) -> Response {
    let result = state
        .backend
        .get(
            session.token(),
            "/api/product",
            query.as_deref(),
            "Failed to fetch products",
        )
        .await;
    session.respond(result.map(Json))
}

/// POST /api/product
pub async fn create_product(
    State(state): State<AppState>,
    session: Session,
    body: Result<ValidatedJson<ProductRequest>, ApiError>,
) -> Response {
    let result = async {
        let ValidatedJson(req) = body?;
        let created = state
            .backend
            .post_json(session.token(), "/api/product", &req, "Failed to create product")
            .await?;
        Ok::<_, ApiError>(Json(created))
    }
    .await;
    session.respond(result)
}

/// PUT /api/product/{id}
pub async fn update_product(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    body: Result<ValidatedJson<ProductRequest>, ApiError>,
) -> Response {
    let result = async {
        let id = parse_id(&id, "Product ID")?;
        let ValidatedJson(req) = body?;
        let updated = state
            .backend
            .put_json(
                session.token(),
                &format!("/api/product/{id}"),
                &req,
                "Failed to update product",
            )
            .await?;
        Ok::<_, ApiError>(Json(updated))
    }
    .await;
    session.respond(result)
}

/// DELETE /api/product/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Response {
    let result = async {
        let id = parse_id(&id, "Product ID")?;
        let deleted = state
            .backend
            .delete(
                session.token(),
                &format!("/api/product/{id}"),
                "Failed to delete product",
            )
            .await?;
        Ok::<_, ApiError>(Json(deleted))
    }
    .await;
    session.respond(result)
}

/// GET /api/product/{id}/image
pub async fn list_images(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Response {
    let result = async {
        let id = parse_id(&id, "Product ID")?;
        let images = state
            .backend
            .get(
                session.token(),
                &format!("/api/product/{id}/image"),
                None,
                "Failed to fetch product images",
            )
            .await?;
        Ok::<_, ApiError>(Json(images))
    }
    .await;
    session.respond(result)
}

/// POST /api/product/{id}/image
///
/// The multipart body is relayed untouched with its original boundary.
pub async fn upload_image(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let result = async {
        let id = parse_id(&id, "Product ID")?;
        let content_type = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok());
        let uploaded = state
            .backend
            .post_raw(
                session.token(),
                &format!("/api/product/{id}/image"),
                content_type,
                body,
                "Failed to upload product image",
            )
            .await?;
        Ok::<_, ApiError>(Json(uploaded))
    }
    .await;
    session.respond(result)
}

/// DELETE /api/image/{image_id}
pub async fn delete_image(
    State(state): State<AppState>,
    session: Session,
    Path(image_id): Path<String>,
) -> Response {
    let result = async {
        let image_id = parse_id(&image_id, "Image ID")?;
        let deleted = state
            .backend
            .delete(
                session.token(),
                &format!("/api/image/{image_id}"),
                "Failed to delete image",
            )
            .await?;
        Ok::<_, ApiError>(Json(deleted))
    }
    .await;
    session.respond(result)
}
