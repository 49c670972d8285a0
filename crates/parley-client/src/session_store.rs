//! Session store: the single bearer token held by this client.
//!
//! The store is a handle, not a global. Whoever needs the token is given a
//! clone of the handle; all clones see the same value.

use std::fmt;
use std::sync::Arc;

use tokio::sync::RwLock;

/// Opaque credential issued by the service on sign-in.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken([REDACTED])")
    }
}

/// Holds at most one token. Empty means unauthenticated.
#[derive(Clone, Default)]
pub struct SessionStore {
    token: Arc<RwLock<Option<SessionToken>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `token`, replacing any previous one.
    pub async fn set(&self, token: SessionToken) {
        *self.token.write().await = Some(token);
    }

    pub async fn get(&self) -> Option<SessionToken> {
        self.token.read().await.clone()
    }

    /// Forget the token. Returns true if one was held.
    pub async fn clear(&self) -> bool {
        self.token.write().await.take().is_some()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}
