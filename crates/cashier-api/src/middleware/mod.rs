//! Axum middleware stack.

pub mod boundary;
pub mod compression;
pub mod cors;
pub mod logging;
