//! # cashier-auth
//!
//! Cookie-held session handling for the cashier gateway.
//!
//! ## Modules
//!
//! - `cookies`: the four session cookies: reading, rotating, clearing
//! - `client`: backend login/refresh exchange over HTTP
//! - `coalesce`: single-flight refresh keyed by refresh token
//! - `gate`: the session gate, the one authority on request credentials
//! - `boundary`: page/path rules deciding redirects before handlers run

pub mod boundary;
pub mod client;
pub mod coalesce;
pub mod cookies;
pub mod gate;

pub use boundary::{BoundaryDecision, BoundaryRules};
pub use client::BackendAuthClient;
pub use coalesce::RefreshCoalescer;
pub use cookies::{CookiePolicy, CookieRotation, SessionCookies};
pub use gate::{Authorization, SessionGate};
