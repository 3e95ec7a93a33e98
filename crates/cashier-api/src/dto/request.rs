//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Add an item to a cart by barcode.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddCartItemRequest {
    #[validate(length(min = 1, message = "Barcode is required"))]
    pub barcode: String,
    #[validate(range(min = 1, message = "Quantity must be greater than zero"))]
    pub quantity: i64,
}

/// Change the quantity of a product already in a cart.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateCartItemRequest {
    pub product_id: i64,
    #[validate(range(min = 1, message = "Quantity must be greater than zero"))]
    pub quantity: i64,
}

/// Pay for a cart. The cart id comes from the path.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PurchaseRequest {
    #[validate(range(min = 0.0, message = "Paid amount cannot be negative"))]
    pub paid: f64,
    #[validate(length(min = 1, message = "Payment method is required"))]
    pub payment_method: String,
}

/// Body forwarded to the backend purchase endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct BackendPurchase<'a> {
    pub cart_id: i64,
    pub paid: f64,
    pub payment_method: &'a str,
}

/// Create or update a catalog product.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProductRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Barcode is required"))]
    pub barcode: String,
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: i64,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: f64,
    #[validate(range(min = 0.0, message = "Discount cannot be negative"))]
    pub discount: f64,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Explicit refresh-token exchange used by client-side code.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefreshTokenRequest {
    #[serde(rename = "refreshToken", default)]
    pub refresh_token: Option<String>,
}

/// `?cartId=` on the cart-item listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CartItemQuery {
    #[serde(rename = "cartId", default)]
    pub cart_id: Option<String>,
}
