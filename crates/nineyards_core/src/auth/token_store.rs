//! Token store backed by a persistence port.

use crate::storage::{PersistencePort, StorageResult};
use log::{info, warn};
use std::cell::RefCell;

/// Persistence key holding the JSON-encoded token (`"<token>"` or `null`).
pub const TOKEN_KEY: &str = "token";

/// Current bearer token; `None` when signed out.
pub type Token = Option<String>;

/// Read/write access to the current bearer token.
pub trait TokenStore {
    fn token(&self) -> Token;
    fn set_token(&self, token: Token) -> StorageResult<()>;
    /// Drops the token and wipes all persisted client state.
    fn logout(&self) -> StorageResult<()>;
}

impl<T: TokenStore + ?Sized> TokenStore for &T {
    fn token(&self) -> Token {
        (**self).token()
    }

    fn set_token(&self, token: Token) -> StorageResult<()> {
        (**self).set_token(token)
    }

    fn logout(&self) -> StorageResult<()> {
        (**self).logout()
    }
}

/// Token store that writes through to a `PersistencePort` on every update.
///
/// Single-threaded by construction (`RefCell`), like the event loop it serves.
pub struct PersistedTokenStore<P: PersistencePort> {
    port: P,
    current: RefCell<Token>,
}

impl<P: PersistencePort> PersistedTokenStore<P> {
    /// Loads the last stored token.
    ///
    /// A missing key or an unparsable value starts signed out.
    pub fn load(port: P) -> StorageResult<Self> {
        let current = match port.get(TOKEN_KEY)? {
            Some(raw) => decode_token(&raw),
            None => None,
        };
        info!(
            "event=token_load module=auth status=ok present={}",
            current.is_some()
        );
        Ok(Self {
            port,
            current: RefCell::new(current),
        })
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.borrow().is_some()
    }
}

impl<P: PersistencePort> TokenStore for PersistedTokenStore<P> {
    fn token(&self) -> Token {
        self.current.borrow().clone()
    }

    fn set_token(&self, token: Token) -> StorageResult<()> {
        self.port.set(TOKEN_KEY, &encode_token(&token))?;
        info!(
            "event=token_update module=auth status=ok present={}",
            token.is_some()
        );
        *self.current.borrow_mut() = token;
        Ok(())
    }

    fn logout(&self) -> StorageResult<()> {
        self.set_token(None)?;
        self.port.clear()?;
        info!("event=logout module=auth status=ok");
        Ok(())
    }
}

fn encode_token(token: &Token) -> String {
    match token {
        Some(value) => serde_json::Value::String(value.clone()).to_string(),
        None => serde_json::Value::Null.to_string(),
    }
}

fn decode_token(raw: &str) -> Token {
    match serde_json::from_str::<Token>(raw) {
        Ok(token) => token,
        Err(err) => {
            warn!(
                "event=token_load module=auth status=error error_code=token_unparsable error={}",
                err
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_token, encode_token, PersistedTokenStore, TokenStore, TOKEN_KEY};
    use crate::storage::{MemoryPersistence, PersistencePort};

    #[test]
    fn token_encoding_is_json() {
        assert_eq!(encode_token(&Some("abc".to_string())), "\"abc\"");
        assert_eq!(encode_token(&None), "null");
        assert_eq!(decode_token("\"abc\""), Some("abc".to_string()));
        assert_eq!(decode_token("null"), None);
        assert_eq!(decode_token("abc"), None);
    }

    #[test]
    fn set_token_writes_through_and_logout_clears_everything() {
        let port = MemoryPersistence::new();
        port.set("theme", "dark").unwrap();

        let store = PersistedTokenStore::load(&port).unwrap();
        assert_eq!(store.token(), None);

        store.set_token(Some("abc".to_string())).unwrap();
        assert!(store.is_authenticated());
        assert_eq!(port.get(TOKEN_KEY).unwrap().as_deref(), Some("\"abc\""));

        store.logout().unwrap();
        assert_eq!(store.token(), None);
        assert!(port.is_empty());
    }
}
