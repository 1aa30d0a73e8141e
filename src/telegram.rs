//! Telegram transport
//!
//! Long-polling dispatcher built on teloxide. Inbound messages become
//! [`Event`]s for the runtime; the runtime talks back through
//! [`TelegramTransport`].

use crate::menu;
use crate::runtime::{ProductionRuntime, Transport, TransportError};
use crate::session::{ChatKey, UserKey};
use crate::state_machine::{Event, Reply, ReplyFormat};
use async_trait::async_trait;
use std::sync::Arc;
use teloxide::{
    dispatching::{Dispatcher, UpdateFilterExt},
    dptree,
    error_handlers::LoggingErrorHandler,
    prelude::*,
    types::{
        ChatAction, ChatId, KeyboardButton, KeyboardMarkup, Me, MessageEntity, MessageEntityKind,
        ParseMode, UserId,
    },
    utils::{command::BotCommands, html},
    RequestError,
};

/// Bot commands
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Доступні команди:")]
pub enum Command {
    #[command(description = "привітання та меню")]
    Start,
    #[command(description = "почати чат з Gemini")]
    Chat,
    #[command(description = "повернутися до головного меню")]
    Menu,
}

impl Command {
    fn into_event(self, mention: String) -> Event {
        match self {
            Command::Start => Event::Start { mention },
            Command::Chat => Event::StartChat,
            Command::Menu => Event::ShowMenu,
        }
    }
}

/// Where an inbound text message goes
#[derive(Debug, PartialEq, Eq)]
enum Route {
    Command(Command),
    Text,
    Ignored,
}

/// A message is a command only when its first entity is a `bot_command` at
/// offset 0. Command names match case-insensitively; unknown commands and
/// commands addressed to other bots are ignored.
fn route(text: &str, entities: &[MessageEntity], bot_name: &str) -> Route {
    let is_command = entities
        .first()
        .is_some_and(|e| e.offset == 0 && e.kind == MessageEntityKind::BotCommand);
    if !is_command {
        return Route::Text;
    }

    match Command::parse(&normalize_command(text), bot_name) {
        Ok(cmd) => Route::Command(cmd),
        Err(_) => Route::Ignored,
    }
}

/// Lowercase the command name, leaving any `@botname` and arguments intact
fn normalize_command(text: &str) -> String {
    let (head, rest) = match text.find(char::is_whitespace) {
        Some(i) => text.split_at(i),
        None => (text, ""),
    };
    let (name, target) = match head.find('@') {
        Some(i) => head.split_at(i),
        None => (head, ""),
    };
    format!("{}{target}{rest}", name.to_lowercase())
}

/// Persistent reply keyboard with every menu label
pub fn menu_keyboard() -> KeyboardMarkup {
    let rows = menu::KEYBOARD_ROWS
        .iter()
        .map(|row| row.iter().map(|label| KeyboardButton::new(*label)).collect::<Vec<_>>());
    KeyboardMarkup::new(rows).resize_keyboard()
}

/// HTML link that mentions the user by name
pub fn mention_html(user_id: UserId, full_name: &str) -> String {
    format!(
        "<a href=\"tg://user?id={user_id}\">{}</a>",
        html::escape(full_name)
    )
}

/// Outbound adapter over the Bot API
#[derive(Clone)]
pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

fn transport_error(e: &RequestError) -> TransportError {
    TransportError(e.to_string())
}

#[async_trait]
impl Transport for TelegramTransport {
    async fn send_reply(&self, chat: ChatKey, reply: &Reply) -> Result<(), TransportError> {
        let mut request = self.bot.send_message(ChatId(chat.0), reply.text.clone());
        if reply.format == ReplyFormat::Html {
            request = request.parse_mode(ParseMode::Html);
        }
        if reply.keyboard {
            request = request.reply_markup(menu_keyboard());
        }
        request.await.map_err(|e| transport_error(&e))?;
        Ok(())
    }

    async fn send_typing(&self, chat: ChatKey) -> Result<(), TransportError> {
        self.bot
            .send_chat_action(ChatId(chat.0), ChatAction::Typing)
            .await
            .map_err(|e| transport_error(&e))?;
        Ok(())
    }
}

/// Verify the token, drop queued updates and poll until Ctrl-C
pub async fn run(bot: Bot, runtime: Arc<ProductionRuntime>) -> Result<(), RequestError> {
    tracing::info!("Verifying bot token...");
    let me = bot.get_me().await?;
    tracing::info!(
        username = me.username.as_deref().unwrap_or("unknown"),
        id = %me.id,
        "Bot authenticated"
    );

    // Updates sent while the bot was down are discarded
    bot.delete_webhook().drop_pending_updates(true).await?;

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        tracing::warn!(error = %e, "Failed to register bot commands (continuing anyway)");
    }

    let handler = Update::filter_message().endpoint(message_handler);

    tracing::info!("Starting dispatcher with long polling");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![runtime, me])
        .default_handler(|upd| async move {
            tracing::debug!(update = ?upd, "Unhandled update");
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "Error in message handler",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    tracing::info!("Dispatcher stopped");
    Ok(())
}

async fn message_handler(
    msg: Message,
    me: Me,
    runtime: Arc<ProductionRuntime>,
) -> ResponseResult<()> {
    let (Some(user), Some(text)) = (msg.from.as_ref(), msg.text()) else {
        tracing::debug!(chat_id = msg.chat.id.0, "Message without sender or text ignored");
        return Ok(());
    };

    let bot_name = me.user.username.as_deref().unwrap_or_default();
    let event = match route(text, msg.entities().unwrap_or_default(), bot_name) {
        Route::Command(cmd) => {
            tracing::info!(chat_id = msg.chat.id.0, user_id = user.id.0, command = ?cmd, "Command received");
            cmd.into_event(mention_html(user.id, &user.full_name()))
        }
        Route::Text => {
            tracing::info!(
                chat_id = msg.chat.id.0,
                user_id = user.id.0,
                chars = text.chars().count(),
                "Message received"
            );
            Event::text(text)
        }
        Route::Ignored => {
            tracing::debug!(chat_id = msg.chat.id.0, user_id = user.id.0, "Unknown command ignored");
            return Ok(());
        }
    };

    runtime
        .handle_or_report(ChatKey(msg.chat.id.0), UserKey(user.id.0), event)
        .await;
    Ok(())
}
