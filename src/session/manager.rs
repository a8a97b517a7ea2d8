use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{MemorySessionStore, Session, SessionResult, SessionStore, UserIdentity};

/// Owns the current session and keeps its store in step
///
/// Shared between the gateway and the commands that log in and out.
pub struct SessionManager {
    current: RwLock<Session>,
    store: Arc<dyn SessionStore>,
}

impl SessionManager {
    /// Create a manager, restoring whatever the store holds
    pub fn new(store: Arc<dyn SessionStore>) -> SessionResult<Self> {
        let current = store.load()?.unwrap_or_default();

        if current.is_authenticated() {
            tracing::debug!("Restored persisted session");
        }

        Ok(Self {
            current: RwLock::new(current),
            store,
        })
    }

    /// Manager backed by an empty in-memory store
    pub fn in_memory() -> Self {
        Self {
            current: RwLock::new(Session::default()),
            store: Arc::new(MemorySessionStore::new()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Session> {
        self.current.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Session> {
        self.current.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Bearer token, when logged in
    pub fn token(&self) -> Option<String> {
        let session = self.read();
        if session.is_authenticated() {
            session.token.clone()
        } else {
            None
        }
    }

    pub fn user(&self) -> Option<UserIdentity> {
        self.read().user.clone()
    }

    pub fn snapshot(&self) -> Session {
        self.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_authenticated()
    }

    /// Replace the session after a successful login
    pub fn login(&self, token: impl Into<String>, user: Option<UserIdentity>) -> SessionResult<()> {
        let session = Session::authenticated(token, user);
        self.store.save(&session)?;
        *self.write() = session;

        tracing::info!("Session started");
        Ok(())
    }

    /// Drop the session. Idempotent.
    ///
    /// The in-memory copy is cleared even if the store fails, so a rejected
    /// token is never sent again by this process.
    pub fn clear(&self) -> SessionResult<()> {
        let was_authenticated = {
            let mut session = self.write();
            let was = session.is_authenticated();
            *session = Session::default();
            was
        };

        self.store.clear()?;

        if was_authenticated {
            tracing::info!("Session cleared");
        }
        Ok(())
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
