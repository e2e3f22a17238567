//! Request building and response handling for the REST API.
//!
//! # Responsibility
//! - Describe endpoint requests with wire-format bodies.
//! - Dispatch through an injected `Transport` and decode typed results.
//!
//! # Invariants
//! - No HTTP stack is linked here; the transport is the only I/O seam.
//! - Authenticated requests take their token from an injected `TokenStore`.

pub mod client;
pub mod request;

pub use client::{ApiClient, ApiError, ApiResponse, ApiResult, Transport, TransportError};
pub use request::{ApiRequest, Method, API_V1, SIGNUP_PATH};
