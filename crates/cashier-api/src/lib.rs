//! # cashier-api
//!
//! HTTP layer for the cashier gateway built on Axum.
//!
//! Relays the browser's API calls to the business backend with a bearer
//! token obtained from the session gate, enforces the page boundary, and
//! serves the compiled front-end bundle.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
pub mod upstream;

pub use app::build_app;
pub use error::{ApiError, ApiResult};
pub use state::AppState;
