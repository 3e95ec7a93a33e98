//! Route definitions for the cashier gateway.
//!
//! API routes are mounted under `/api`. Everything else is served from the
//! compiled front-end bundle, falling back to `index.html` so client-side
//! routes resolve.

use std::path::Path;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::services::{ServeDir, ServeFile};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with all routes and the session boundary.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_bytes;
    let static_dir = Path::new(&state.config.server.static_dir);
    let frontend =
        ServeDir::new(static_dir).not_found_service(ServeFile::new(static_dir.join("index.html")));

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(cart_routes())
        .merge(cart_item_routes())
        .merge(purchase_routes())
        .merge(product_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .fallback_service(frontend)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::boundary::session_boundary,
        ))
        .with_state(state)
}

/// Login, logout, explicit token refresh
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::auth::login))
        .route(
            "/logout",
            post(handlers::auth::logout).fallback(handlers::auth::logout_method_not_allowed),
        )
        .route("/refresh-token", post(handlers::auth::refresh_token))
}

/// Carts
fn cart_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/cart",
            get(handlers::cart::list_carts).post(handlers::cart::create_cart),
        )
        .route("/cart/finished", get(handlers::cart::list_finished_carts))
        .route("/cart/{cart_id}", delete(handlers::cart::delete_cart))
}

/// Items inside a cart
fn cart_item_routes() -> Router<AppState> {
    Router::new()
        .route("/cart-item", get(handlers::cart_item::list_items))
        .route(
            "/cart-item/{id}",
            post(handlers::cart_item::add_item)
                .put(handlers::cart_item::update_item)
                .delete(handlers::cart_item::delete_item),
        )
}

/// Checkout
fn purchase_routes() -> Router<AppState> {
    Router::new().route(
        "/purchase/{cart_id}",
        get(handlers::purchase::get_purchase).post(handlers::purchase::purchase_cart),
    )
}

/// Product catalog and images
fn product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/product",
            get(handlers::product::list_products).post(handlers::product::create_product),
        )
        .route(
            "/product/{id}",
            put(handlers::product::update_product)
                .delete(handlers::product::delete_product),
        )
        .route(
            "/product/{id}/image",
            get(handlers::product::list_images).post(handlers::product::upload_image),
        )
        .route("/image/{image_id}", delete(handlers::product::delete_image))
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
