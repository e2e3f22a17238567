//! Authorization header builder.

use super::token_store::TokenStore;
use std::collections::BTreeMap;

pub const AUTHORIZATION: &str = "Authorization";

/// Request headers by name.
pub type Headers = BTreeMap<String, String>;

/// Returns `Authorization: Bearer <token>` for the current token.
///
/// Signed-out stores yield no header rather than `Bearer null`.
pub fn auth_header(store: &dyn TokenStore) -> Headers {
    let mut headers = Headers::new();
    if let Some(token) = store.token() {
        headers.insert(AUTHORIZATION.to_string(), format!("Bearer {token}"));
    }
    headers
}
