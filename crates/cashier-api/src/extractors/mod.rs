//! Custom Axum extractors.

pub mod session;
pub mod validated;

pub use session::Session;
pub use validated::ValidatedJson;
