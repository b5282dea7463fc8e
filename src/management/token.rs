use std::{collections::HashMap, sync::Arc};

use tokio::sync::Mutex;

use crate::types::Credential;

/// Session id of the single user this service talks to.
pub const SESSION_KEY: &str = "user";

/// In-memory credential slots, one per session id.
///
/// Cloning is cheap and every clone sees the same slots. Credentials are
/// never refreshed or expired; a new login simply replaces the old pair.
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    tokens: Arc<Mutex<HashMap<String, Credential>>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces whatever credential the session held before.
    pub async fn store(&self, session: &str, credential: Credential) {
        let mut tokens = self.tokens.lock().await;
        tokens.insert(session.to_string(), credential);
    }

    pub async fn get(&self, session: &str) -> Option<Credential> {
        let tokens = self.tokens.lock().await;
        tokens.get(session).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential(access: &str) -> Credential {
        Credential {
            access_token: access.to_string(),
            refresh_token: format!("{}-refresh", access),
        }
    }

    #[tokio::test]
    async fn test_empty_store_has_no_credential() {
        let store = TokenStore::new();
        assert!(store.get(SESSION_KEY).await.is_none());
    }

    #[tokio::test]
    async fn test_store_overwrites_previous_credential() {
        let store = TokenStore::new();
        store.store(SESSION_KEY, credential("first")).await;
        store.store(SESSION_KEY, credential("second")).await;

        assert_eq!(store.get(SESSION_KEY).await, Some(credential("second")));
    }

    #[tokio::test]
    async fn test_clones_share_slots() {
        let store = TokenStore::new();
        let handle = store.clone();
        handle.store(SESSION_KEY, credential("shared")).await;

        assert_eq!(store.get(SESSION_KEY).await, Some(credential("shared")));
    }
}
