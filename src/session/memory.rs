/// In-memory session store

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::session::{Session, SessionError, SessionId, SessionStore};

/// Session store backed by a hash map
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<SessionId, Session>>, SessionError> {
        self.sessions.read().map_err(|_| SessionError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<SessionId, Session>>, SessionError> {
        self.sessions.write().map_err(|_| SessionError::LockPoisoned)
    }
}

fn not_found(id: &SessionId) -> SessionError {
    SessionError::NotFound {
        session_id: id.to_string(),
    }
}

impl SessionStore for InMemorySessionStore {
    fn create(&self, client_name: Option<String>) -> Result<Session, SessionError> {
        let session = Session::new(client_name);
        self.write()?.insert(session.id.clone(), session.clone());
        debug!(session = %session.id, "Session created");
        Ok(session)
    }

    fn get(&self, id: &SessionId) -> Result<Session, SessionError> {
        self.read()?.get(id).cloned().ok_or_else(|| not_found(id))
    }

    fn touch(&self, id: &SessionId) -> Result<Session, SessionError> {
        let mut sessions = self.write()?;
        let session = sessions.get_mut(id).ok_or_else(|| not_found(id))?;
        session.last_activity = Utc::now();
        Ok(session.clone())
    }

    fn remove(&self, id: &SessionId) -> Result<(), SessionError> {
        self.write()?
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }

    fn prune_inactive_since(&self, cutoff: DateTime<Utc>) -> Result<usize, SessionError> {
        let mut sessions = self.write()?;
        let before = sessions.len();
        sessions.retain(|_, session| session.last_activity >= cutoff);
        let pruned = before - sessions.len();
        if pruned > 0 {
            debug!(pruned, "Pruned idle sessions");
        }
        Ok(pruned)
    }

    fn count(&self) -> Result<usize, SessionError> {
        Ok(self.read()?.len())
    }
}
