//! Fixed menu vocabulary and reply texts
//!
//! Labels are matched exactly against inbound text; there is no trimming or
//! case folding.

/// What a menu button does when pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Reply with fixed HTML text
    Canned(&'static str),
    /// Switch the user into chat mode
    StartChat,
}

/// A single keyboard button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: &'static str,
    pub action: MenuAction,
}

pub const STUDENT_LABEL: &str = "👤 Студент";
pub const IT_LABEL: &str = "💻 IT-технології";
pub const CONTACTS_LABEL: &str = "📞 Контакти";
pub const CHAT_LABEL: &str = "✍️ Чат з AI";

pub const STUDENT_REPLY: &str = "<b>Студентські дані:</b>\n\
    Прізвище: <i>Твоє Прізвище</i>\n\
    Група: <i>Твоя Група</i>";

pub const IT_REPLY: &str = "<b>IT-технології:</b>\n\
    Створення чат-ботів, машинне навчання, web-розробка, кібербезпека. \
    Я — приклад застосування <b>Rust</b> та <b>Telegram API</b>.";

pub const CONTACTS_REPLY: &str = "<b>Контактна інформація:</b>\n\
    Телефон: <code>+380 XXX XX XX XXX</code>\n\
    E-mail: <code>твоя_пошта@example.com</code>";

/// Sent when chat mode is switched on explicitly
pub const CHAT_ACTIVATED_REPLY: &str = "📝 <b>Режим Gemini активовано!</b> Надсилай свої запити.\n\n\
    Щоб вийти з режиму, натисни кнопку меню або набери <code>/menu</code>.";

/// Sent when free text arrives in menu mode
pub const AUTO_ACTIVATED_REPLY: &str = "✅ Автоматично активовано режим Gemini для твого запиту.\n\
    Щоб вийти, набери <code>/menu</code> або скористайся кнопками.";

pub const MENU_REPLY: &str = "👋 Ти повернувся до головного меню.";

/// All menu entries, in keyboard order
pub const MENU: [MenuEntry; 4] = [
    MenuEntry {
        label: STUDENT_LABEL,
        action: MenuAction::Canned(STUDENT_REPLY),
    },
    MenuEntry {
        label: IT_LABEL,
        action: MenuAction::Canned(IT_REPLY),
    },
    MenuEntry {
        label: CONTACTS_LABEL,
        action: MenuAction::Canned(CONTACTS_REPLY),
    },
    MenuEntry {
        label: CHAT_LABEL,
        action: MenuAction::StartChat,
    },
];

/// Button rows of the reply keyboard
pub const KEYBOARD_ROWS: [&[&str]; 3] = [
    &[STUDENT_LABEL],
    &[IT_LABEL, CONTACTS_LABEL],
    &[CHAT_LABEL],
];

/// Find the entry whose label equals `text` exactly
pub fn lookup(text: &str) -> Option<&'static MenuEntry> {
    MENU.iter().find(|entry| entry.label == text)
}

/// Greeting for `/start`; `mention` is already HTML
pub fn greeting(mention: &str) -> String {
    format!(
        "Привіт, {mention}! Я твій лабораторний бот. \
         Обери пункт меню або надрукуй <code>/chat</code> для запиту до Gemini."
    )
}
