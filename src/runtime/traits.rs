//! Trait abstractions for runtime I/O
//!
//! These traits enable testing the runtime with mock implementations.

use super::{SessionError, TransportError};
use crate::session::{ChatKey, Session, UserKey};
use crate::state_machine::Reply;
use async_trait::async_trait;
use std::sync::Arc;

/// Storage for per-user sessions
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Get the user's session, creating a default one on first access
    async fn load(&self, user: UserKey) -> Result<Session, SessionError>;

    /// Replace the user's session
    async fn save(&self, user: UserKey, session: Session) -> Result<(), SessionError>;
}

/// Outbound side of the messaging platform
#[async_trait]
pub trait Transport: Send + Sync {
    /// Deliver one reply to the chat
    async fn send_reply(&self, chat: ChatKey, reply: &Reply) -> Result<(), TransportError>;

    /// Show the "typing" presence indicator
    async fn send_typing(&self, chat: ChatKey) -> Result<(), TransportError>;
}

// ============================================================================
// Arc implementations for trait objects
// ============================================================================

#[async_trait]
impl<T: SessionStore + ?Sized> SessionStore for Arc<T> {
    async fn load(&self, user: UserKey) -> Result<Session, SessionError> {
        (**self).load(user).await
    }

    async fn save(&self, user: UserKey, session: Session) -> Result<(), SessionError> {
        (**self).save(user, session).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send_reply(&self, chat: ChatKey, reply: &Reply) -> Result<(), TransportError> {
        (**self).send_reply(chat, reply).await
    }

    async fn send_typing(&self, chat: ChatKey) -> Result<(), TransportError> {
        (**self).send_typing(chat).await
    }
}
