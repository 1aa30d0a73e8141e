//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::*;
use crate::menu::{self, MenuAction, MENU};
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_mode() -> impl Strategy<Value = Mode> {
    prop_oneof![Just(Mode::Menu), Just(Mode::Chat)]
}

fn arb_label() -> impl Strategy<Value = &'static str> {
    prop::sample::select(MENU.iter().map(|e| e.label).collect::<Vec<_>>())
}

/// Free text that is never a menu label
fn arb_free_text() -> impl Strategy<Value = String> {
    "\\PC{1,80}".prop_filter("must not be a menu label", |t| menu::lookup(t).is_none())
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        "[a-zA-Z ]{1,20}".prop_map(|mention| Event::Start { mention }),
        Just(Event::StartChat),
        Just(Event::ShowMenu),
        arb_label().prop_map(Event::text),
        arb_free_text().prop_map(Event::text),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn transition_is_deterministic(mode in arb_mode(), event in arb_event()) {
        let a = transition(mode, event.clone());
        let b = transition(mode, event);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn every_event_produces_output(mode in arb_mode(), event in arb_event()) {
        let result = transition(mode, event);
        prop_assert!(!result.effects.is_empty());
    }

    #[test]
    fn generation_only_in_chat_mode(mode in arb_mode(), event in arb_event()) {
        let result = transition(mode, event);
        let generates = result.effects.iter().any(|e| matches!(e, Effect::Generate { .. }));
        if generates {
            prop_assert_eq!(result.new_mode, Mode::Chat);
        }
    }

    #[test]
    fn show_menu_always_returns_keyboard(mode in arb_mode()) {
        let result = transition(mode, Event::ShowMenu);
        prop_assert_eq!(result.new_mode, Mode::Menu);
        prop_assert!(matches!(&result.effects[..], [Effect::Reply(r)] if r.keyboard));
    }

    #[test]
    fn start_chat_always_enters_chat(mode in arb_mode()) {
        prop_assert_eq!(transition(mode, Event::StartChat).new_mode, Mode::Chat);
        prop_assert_eq!(transition(mode, Event::text(menu::CHAT_LABEL)).new_mode, Mode::Chat);
    }

    #[test]
    fn labels_reply_with_fixed_text(mode in arb_mode(), label in arb_label()) {
        let entry = menu::lookup(label).unwrap();
        let result = transition(mode, Event::text(label));
        match entry.action {
            MenuAction::Canned(text) => {
                prop_assert_eq!(result.new_mode, mode);
                prop_assert_eq!(result.effects, vec![Effect::reply(Reply::html(text))]);
            }
            MenuAction::StartChat => prop_assert_eq!(result.new_mode, Mode::Chat),
        }
    }

    #[test]
    fn free_text_forwarded_verbatim(mode in arb_mode(), text in arb_free_text()) {
        let result = transition(mode, Event::text(text.clone()));
        prop_assert_eq!(result.new_mode, Mode::Chat);
        prop_assert_eq!(result.effects.last(), Some(&Effect::generate(text)));

        let notices = result.effects.iter().filter(|e| matches!(e, Effect::Reply(_))).count();
        match mode {
            Mode::Menu => prop_assert_eq!(notices, 1),
            Mode::Chat => prop_assert_eq!(notices, 0),
        }
    }
}
