//! # cashier-core
//!
//! Core crate for the cashier gateway. Contains configuration schemas,
//! session credential types, the token exchange trait, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other cashier crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
