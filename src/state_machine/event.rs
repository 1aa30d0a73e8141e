//! Inbound events the dispatcher reacts to

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// `/start`; `mention` is an HTML mention of the sender
    Start { mention: String },
    /// `/chat`
    StartChat,
    /// `/menu`
    ShowMenu,
    /// Any non-command text
    Text { text: String },
}

impl Event {
    pub fn text(text: impl Into<String>) -> Self {
        Event::Text { text: text.into() }
    }

    /// Short name for log fields
    pub fn name(&self) -> &'static str {
        match self {
            Event::Start { .. } => "start",
            Event::StartChat => "start_chat",
            Event::ShowMenu => "show_menu",
            Event::Text { .. } => "text",
        }
    }
}
