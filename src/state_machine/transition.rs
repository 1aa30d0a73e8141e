//! Pure state transition function
//!
//! Every event is accepted in every mode, so the function is total.

use super::{Effect, Event, Mode, Reply};
use crate::menu::{self, MenuAction};

/// Result of a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    pub new_mode: Mode,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(mode: Mode) -> Self {
        Self {
            new_mode: mode,
            effects: vec![],
        }
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Pure transition function
///
/// Given the same mode and event it always produces the same result, with no
/// I/O side effects.
pub fn transition(mode: Mode, event: Event) -> TransitionResult {
    match event {
        Event::Start { mention } => TransitionResult::new(mode)
            .with_effect(Effect::reply(Reply::html(menu::greeting(&mention)).with_keyboard())),

        Event::StartChat => start_chat(),

        Event::ShowMenu => TransitionResult::new(Mode::Menu)
            .with_effect(Effect::reply(Reply::plain(menu::MENU_REPLY).with_keyboard())),

        Event::Text { text } => match menu::lookup(&text).map(|entry| entry.action) {
            Some(MenuAction::Canned(reply)) => {
                TransitionResult::new(mode).with_effect(Effect::reply(Reply::html(reply)))
            }
            Some(MenuAction::StartChat) => start_chat(),

            // Unmatched text always goes to the model; there is no
            // "not understood" reply.
            None => match mode {
                Mode::Chat => TransitionResult::new(Mode::Chat).with_effect(Effect::generate(text)),
                Mode::Menu => TransitionResult::new(Mode::Chat)
                    .with_effect(Effect::reply(Reply::html(menu::AUTO_ACTIVATED_REPLY)))
                    .with_effect(Effect::generate(text)),
            },
        },
    }
}

fn start_chat() -> TransitionResult {
    TransitionResult::new(Mode::Chat)
        .with_effect(Effect::reply(Reply::html(menu::CHAT_ACTIVATED_REPLY)))
}
