//! Core traits implemented by other crates.

pub mod token_exchange;

pub use token_exchange::TokenExchange;
