//! Mode types

/// Per-user routing mode
///
/// `Menu` corresponds to `chat_mode = false`, `Chat` to `chat_mode = true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Menu,
    Chat,
}

impl Mode {
    pub fn is_chat(self) -> bool {
        matches!(self, Mode::Chat)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Menu => "menu",
            Mode::Chat => "chat",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
