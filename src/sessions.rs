use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use anyhow::{Result, anyhow};
use uuid::Uuid;

use crate::{cart::Cart, identity::IdentityHolder, models::Identity, storage::LocalStorage};

/// State owned by one browsing context: who is signed in and what is in the
/// cart. The cart is not scoped to the identity and survives a sign-out.
pub struct ClientSession {
    pub identity: IdentityHolder,
    pub cart: Cart,
}

impl ClientSession {
    pub fn current_identity(&self) -> Option<&Identity> {
        self.identity.identity()
    }
}

/// All client sessions known to this process.
///
/// A session only takes up a slot once something changes it (sign-in, a cart
/// edit). Until then lookups restore its identity straight from storage, which
/// is how a reload after a restart keeps the user signed in.
///
/// Storage reads happen outside the registry lock. Identity writes are
/// synchronous and run under it; they are a single small file per sign-in or
/// sign-out.
pub struct SessionRegistry {
    sessions: Mutex<HashMap<Uuid, ClientSession>>,
    storage: Arc<dyn LocalStorage>,
}

impl SessionRegistry {
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            storage,
        }
    }

    /// Issues a new session id. Nothing is stored until the session is used.
    pub fn open(&self) -> Uuid {
        Uuid::new_v4()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Uuid, ClientSession>>> {
        self.sessions
            .lock()
            .map_err(|_| anyhow!("session registry lock poisoned"))
    }

    fn restore(&self, id: Uuid) -> ClientSession {
        ClientSession {
            identity: IdentityHolder::restore(id, self.storage.clone()),
            cart: Cart::new(),
        }
    }

    /// Runs `f` against the session, materializing it first if needed.
    pub fn with_session<R>(&self, id: Uuid, f: impl FnOnce(&mut ClientSession) -> R) -> Result<R> {
        let restored = if self.lock()?.contains_key(&id) {
            None
        } else {
            Some(self.restore(id))
        };

        let mut sessions = self.lock()?;
        let session = sessions
            .entry(id)
            .or_insert_with(|| restored.unwrap_or_else(|| self.restore(id)));
        Ok(f(session))
    }

    /// Runs `f` against the session without registering it.
    pub fn peek<R>(&self, id: Uuid, f: impl FnOnce(&ClientSession) -> R) -> Result<R> {
        {
            let sessions = self.lock()?;
            if let Some(session) = sessions.get(&id) {
                return Ok(f(session));
            }
        }
        Ok(f(&self.restore(id)))
    }

    pub fn identity(&self, id: Uuid) -> Result<Option<Identity>> {
        self.peek(id, |session| session.current_identity().cloned())
    }

    /// Number of sessions held in memory.
    pub fn session_count(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }
}
