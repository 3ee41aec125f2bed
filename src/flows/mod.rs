//! Token Flows
//!
//! Credential exchanges with the authorization endpoint.

pub mod token_exchange;

pub use token_exchange::{TokenExchange, TokenExchangeImpl};
