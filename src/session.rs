//! Per-user session state
//!
//! The only cross-message state is each user's [`Mode`]. Sessions live in
//! memory for the lifetime of the process.

use crate::runtime::{SessionError, SessionStore};
use crate::state_machine::Mode;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use tokio::sync::RwLock;

/// Telegram user id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserKey(pub u64);

/// Telegram chat id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChatKey(pub i64);

impl fmt::Display for UserKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ChatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// State kept for one user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Session {
    pub mode: Mode,
}

impl Session {
    pub fn chat_mode(&self) -> bool {
        self.mode.is_chat()
    }
}

/// Session store backed by a map
///
/// Individual loads and saves are atomic. A load-then-save across one update
/// is not, so two concurrent updates from the same user may lose a toggle.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<UserKey, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, user: UserKey) -> Result<Session, SessionError> {
        if let Some(session) = self.sessions.read().await.get(&user) {
            return Ok(*session);
        }
        let mut sessions = self.sessions.write().await;
        Ok(*sessions.entry(user).or_default())
    }

    async fn save(&self, user: UserKey, session: Session) -> Result<(), SessionError> {
        self.sessions.write().await.insert(user, session);
        Ok(())
    }
}
