//! Runtime for executing dispatcher effects
//!
//! Loads the user's session, runs the pure transition, persists the new mode
//! and performs the resulting effects against the transport.

mod executor;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use executor::BotRuntime;
pub use traits::*;

use crate::session::InMemorySessionStore;
use crate::telegram::TelegramTransport;
use std::sync::Arc;
use thiserror::Error;

/// Type alias for production runtime with concrete implementations
pub type ProductionRuntime = BotRuntime<Arc<InMemorySessionStore>, TelegramTransport>;

/// Failure of the session store
#[derive(Debug, Error)]
#[error("session store error: {0}")]
pub struct SessionError(pub String);

/// Failure to deliver something to the chat
#[derive(Debug, Error)]
#[error("transport error: {0}")]
pub struct TransportError(pub String);

/// Errors that can escape a single update
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}
