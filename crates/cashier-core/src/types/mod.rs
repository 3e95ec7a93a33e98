//! Shared domain types.

pub mod credentials;

pub use credentials::{CredentialPair, ExchangeOutcome, format_timestamp, parse_timestamp};
