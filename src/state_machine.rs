//! Per-user mode state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions: the
//! dispatcher decides, the runtime performs.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::{Effect, Reply, ReplyFormat};
pub use event::Event;
pub use state::Mode;
pub use transition::transition;
