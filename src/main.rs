//! Relay bot - Telegram menu bot with a Gemini chat mode
//!
//! Fixed menu buttons get canned replies; any other text is forwarded to
//! Google Gemini and the answer is sent back.

mod config;
mod generation;
mod llm;
mod menu;
mod runtime;
mod session;
mod state_machine;
mod telegram;

use config::BotConfig;
use generation::GenerationFlow;
use runtime::BotRuntime;
use session::InMemorySessionStore;
use std::sync::Arc;
use telegram::TelegramTransport;
use teloxide::Bot;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine; the process environment still applies
    let dotenv = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "relay_bot=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    if let Ok(path) = dotenv {
        tracing::info!(path = %path.display(), "Loaded environment file");
    }

    // Configuration
    let config = match BotConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };

    // Initialize Gemini
    let client = match &config.gemini {
        Some(gemini) => match gemini.build_service() {
            Ok(service) => {
                tracing::info!(model = %gemini.model, "Gemini client initialized");
                Some(service)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialize Gemini client");
                None
            }
        },
        None => {
            tracing::warn!("GEMINI_API_KEY is not set. Chat mode will answer with a fallback notice.");
            None
        }
    };

    let bot = Bot::new(config.bot_token.clone());
    let runtime = Arc::new(BotRuntime::new(
        Arc::new(InMemorySessionStore::new()),
        TelegramTransport::new(bot.clone()),
        GenerationFlow::new(client),
    ));

    telegram::run(bot, runtime).await?;

    Ok(())
}
