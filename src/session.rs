use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Identifier of a user as handed out by the authentication server.
///
/// The server may use numeric or string ids; both are carried through
/// untouched and rendered without quotes in paths and query strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(n) => write!(f, "{n}"),
            UserId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        UserId::Number(id)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        UserId::Text(id.to_string())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        UserId::Text(id)
    }
}

/// An authenticated user session: who the caller is and the bearer token
/// to present on their behalf.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: UserId,
    pub access_token: String,
}

impl Session {
    pub fn new(id: impl Into<UserId>, access_token: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            access_token: access_token.into(),
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// Source of the currently authenticated session.
pub trait SessionProvider: Send + Sync {
    fn current_session(&self) -> Option<Session>;
}

impl<P: SessionProvider + ?Sized> SessionProvider for Arc<P> {
    fn current_session(&self) -> Option<Session> {
        (**self).current_session()
    }
}

/// In-memory session slot shared between clones.
#[derive(Clone, Default)]
pub struct SessionStore {
    slot: Arc<RwLock<Option<Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        let store = Self::new();
        store.login(session);
        store
    }

    pub fn login(&self, session: Session) {
        debug!(target: "session", "Session established for user {}", session.id);
        *self.write_slot() = Some(session);
    }

    /// Swap in a renewed token. Returns false when nobody is logged in.
    pub fn replace_token(&self, access_token: impl Into<String>) -> bool {
        match self.write_slot().as_mut() {
            Some(session) => {
                session.access_token = access_token.into();
                debug!(target: "session", "Access token renewed for user {}", session.id);
                true
            }
            None => false,
        }
    }

    pub fn logout(&self) -> Option<Session> {
        let previous = self.write_slot().take();
        if let Some(session) = &previous {
            debug!(target: "session", "Session for user {} cleared", session.id);
        }
        previous
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_session().is_some()
    }

    // A poisoned lock still holds a valid Option<Session>.
    fn write_slot(&self) -> std::sync::RwLockWriteGuard<'_, Option<Session>> {
        self.slot.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl SessionProvider for SessionStore {
    fn current_session(&self) -> Option<Session> {
        self.slot
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}
