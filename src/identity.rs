use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::{models::Identity, storage::LocalStorage};

/// Storage key of the signed-in identity record.
pub const IDENTITY_KEY: &str = "madras-foodie-user";

/// Current actor of one client session, written through to durable storage
/// on every change.
pub struct IdentityHolder {
    session: Uuid,
    storage: Arc<dyn LocalStorage>,
    current: Option<Identity>,
}

impl IdentityHolder {
    /// Restores the identity persisted for `session`. Missing, unreadable or
    /// unparseable records all mean signed-out.
    pub fn restore(session: Uuid, storage: Arc<dyn LocalStorage>) -> Self {
        let current = match storage.get_item(session, IDENTITY_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Identity>(&raw) {
                Ok(identity) => Some(identity),
                Err(err) => {
                    warn!("Ignoring unparseable identity for session {}: {}", session, err);
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                warn!("Failed to read identity for session {}: {:#}", session, err);
                None
            }
        };

        Self {
            session,
            storage,
            current,
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.current.as_ref()
    }

    /// Replaces the identity; `None` signs out. Persistence is best-effort.
    pub fn set_identity(&mut self, identity: Option<Identity>) {
        let persisted = match &identity {
            Some(identity) => serde_json::to_string(identity)
                .map_err(anyhow::Error::from)
                .and_then(|raw| self.storage.set_item(self.session, IDENTITY_KEY, &raw)),
            None => self.storage.remove_item(self.session, IDENTITY_KEY),
        };
        if let Err(err) = persisted {
            warn!("Failed to persist identity for session {}: {:#}", self.session, err);
        }

        match &identity {
            Some(identity) => info!(
                "Session {} signed in as {} ({:?})",
                self.session, identity.name, identity.role
            ),
            None => info!("Session {} signed out", self.session),
        }
        self.current = identity;
    }
}
