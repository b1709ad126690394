use super::{KeyValueStorage, Session, User};
use crate::Result;
use std::sync::Arc;
use tracing::{debug, warn};

pub(crate) const TOKEN_KEY: &str = "token";
pub(crate) const USER_KEY: &str = "user";

/// The one process-wide session.
///
/// Reads are open to every component. Writes are crate-private and only the
/// auth session manager performs them.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Current session. Unreadable entries count as absent.
    pub fn get(&self) -> Session {
        let token = match self.storage.get_item(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!("Failed to read session token: {}", e);
                None
            }
        };

        if token.is_none() {
            return Session::default();
        }

        let user = match self.storage.get_item(USER_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!("Stored user record is malformed, ignoring it: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("Failed to read session user: {}", e);
                None
            }
        };

        Session { token, user }
    }

    pub fn is_authenticated(&self) -> bool {
        self.get().is_authenticated()
    }

    pub(crate) async fn set(&self, token: &str, user: Option<&User>) -> Result<()> {
        self.storage.set_item(TOKEN_KEY, token).await?;

        let written = match user {
            Some(user) => match serde_json::to_string(user) {
                Ok(raw) => self.storage.set_item(USER_KEY, &raw).await,
                Err(e) => Err(e.into()),
            },
            None => self.storage.remove_item(USER_KEY).await,
        };

        if let Err(e) = written {
            // Never leave a half-written session behind.
            self.clear().await;
            return Err(e);
        }

        debug!("Session stored");
        Ok(())
    }

    /// Removes both entries. Never fails; storage errors are logged.
    pub(crate) async fn clear(&self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.storage.remove_item(key).await {
                warn!("Failed to remove session entry '{}': {}", key, e);
            }
        }
        debug!("Session cleared");
    }
}
