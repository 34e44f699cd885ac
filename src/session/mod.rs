/// Session tracking for connected clients
///
/// A session records when a client connected and when it was last heard
/// from. The tool call core never reads sessions; the server keeps them to
/// attribute requests and drop clients that went quiet.

pub mod memory;

pub use memory::InMemorySessionStore;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during session store operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session not found: {session_id}")]
    NotFound { session_id: String },

    #[error("Session store lock poisoned")]
    LockPoisoned,
}

/// Opaque session identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Generate a new random session ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a session ID from its string form
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One connected client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    /// Client name reported during `initialize`, if any
    pub client_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl Session {
    /// Start a session now
    pub fn new(client_name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: SessionId::new(),
            client_name,
            created_at: now,
            last_activity: now,
        }
    }

    /// How long since the client was last heard from
    pub fn idle_for(&self, now: DateTime<Utc>) -> Duration {
        now - self.last_activity
    }
}

/// Keyed store of sessions
///
/// Implementations synchronize internally so a store can be shared across
/// tasks behind an `Arc`.
pub trait SessionStore: Send + Sync {
    /// Start and store a new session
    fn create(&self, client_name: Option<String>) -> Result<Session, SessionError>;

    /// Look up a session
    fn get(&self, id: &SessionId) -> Result<Session, SessionError>;

    /// Record activity on a session, returning its updated state
    fn touch(&self, id: &SessionId) -> Result<Session, SessionError>;

    /// Forget a session
    fn remove(&self, id: &SessionId) -> Result<(), SessionError>;

    /// Drop sessions whose last activity is before `cutoff`, returning how many
    fn prune_inactive_since(&self, cutoff: DateTime<Utc>) -> Result<usize, SessionError>;

    /// Number of live sessions
    fn count(&self) -> Result<usize, SessionError>;

    /// Drop sessions idle for longer than `max_idle`
    fn prune_idle(&self, max_idle: Duration) -> Result<usize, SessionError> {
        self.prune_inactive_since(Utc::now() - max_idle)
    }
}
