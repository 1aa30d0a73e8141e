//! Per-update runtime executor

use super::traits::{SessionStore, Transport};
use super::RuntimeError;
use crate::generation::{self, GenerationFlow};
use crate::session::{ChatKey, Session, UserKey};
use crate::state_machine::{transition, Effect, Event, Reply};

/// Generic apology sent when an update cannot be handled
pub const ERROR_REPLY: &str =
    "😔 Вибачте, сталася помилка. Спробуйте ще раз або зверніться до адміністратора.";

/// Runtime that can work with any session store and transport implementation
pub struct BotRuntime<S, T>
where
    S: SessionStore,
    T: Transport,
{
    sessions: S,
    transport: T,
    generation: GenerationFlow,
}

impl<S, T> BotRuntime<S, T>
where
    S: SessionStore,
    T: Transport,
{
    pub fn new(sessions: S, transport: T, generation: GenerationFlow) -> Self {
        Self {
            sessions,
            transport,
            generation,
        }
    }

    /// Handle one inbound event for `user` in `chat`
    pub async fn handle(
        &self,
        chat: ChatKey,
        user: UserKey,
        event: Event,
    ) -> Result<(), RuntimeError> {
        let session = self.sessions.load(user).await?;
        let event_name = event.name();
        let result = transition(session.mode, event);

        tracing::debug!(
            chat_id = %chat,
            user_id = %user,
            event = event_name,
            chat_mode = session.chat_mode(),
            new_mode = %result.new_mode,
            effects = result.effects.len(),
            "Transition"
        );

        if result.new_mode != session.mode {
            self.sessions
                .save(
                    user,
                    Session {
                        mode: result.new_mode,
                    },
                )
                .await?;
            tracing::info!(
                user_id = %user,
                from = %session.mode,
                to = %result.new_mode,
                "Mode changed"
            );
        }

        for effect in result.effects {
            self.execute_effect(chat, effect).await?;
        }

        Ok(())
    }

    /// Handle one event; on failure log it and send a single apology.
    ///
    /// Never returns an error and never panics on I/O failure.
    pub async fn handle_or_report(&self, chat: ChatKey, user: UserKey, event: Event) {
        let context = format!("{event:?}");
        if let Err(e) = self.handle(chat, user, event).await {
            tracing::error!(
                chat_id = %chat,
                user_id = %user,
                update = %context,
                error = %e,
                "Update caused error"
            );

            if let Err(send_err) = self.transport.send_reply(chat, &Reply::plain(ERROR_REPLY)).await {
                tracing::error!(
                    chat_id = %chat,
                    error = %send_err,
                    "Failed to deliver error notice"
                );
            }
        }
    }

    async fn execute_effect(&self, chat: ChatKey, effect: Effect) -> Result<(), RuntimeError> {
        match effect {
            Effect::Reply(reply) => {
                self.transport.send_reply(chat, &reply).await?;
            }

            Effect::Generate { text } => {
                if let Err(e) = self.transport.send_typing(chat).await {
                    tracing::warn!(chat_id = %chat, error = %e, "Failed to send typing indicator");
                }

                let outcome = self.generation.generate(&text).await;
                let reply = Reply::plain(generation::reply_text(&outcome));
                self.transport.send_reply(chat, &reply).await?;
            }
        }
        Ok(())
    }
}
