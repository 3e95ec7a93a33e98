//! Route handlers organized by domain.

pub mod auth;
pub mod cart;
pub mod cart_item;
pub mod health;
pub mod product;
pub mod purchase;

use cashier_core::error::AppError;
use cashier_core::result::AppResult;

/// Parse a numeric path segment, rejecting anything else before it reaches
/// a backend URL.
pub(crate) fn parse_id(raw: &str, label: &str) -> AppResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| AppError::validation(format!("{label} must be a number")))
}
