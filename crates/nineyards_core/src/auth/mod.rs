//! Bearer token state and request authorization.
//!
//! # Responsibility
//! - Hold the current bearer token behind an explicit `TokenStore`.
//! - Build the `Authorization` header for authenticated requests.
//!
//! # Invariants
//! - There is no process-wide token; stores are passed to their users.
//! - Token values are never written to logs.

pub mod header;
pub mod token_store;

pub use header::{auth_header, Headers, AUTHORIZATION};
pub use token_store::{PersistedTokenStore, Token, TokenStore, TOKEN_KEY};
