//! Scripted input for driving the wizard without a terminal.
//!
//! Menus read `PARKQWIK_TEST_MENU_EVENTS` (`DOWN,ENTER|ESC`), text prompts
//! read `PARKQWIK_TEST_TEXT_INPUTS` (`mh12ab1234|<BLANK>|<ESC>`) and yes/no
//! confirmations read `PARKQWIK_TEST_CONFIRMATIONS` (`y|n`). Segments are
//! consumed in order, one per prompt.

use once_cell::sync::Lazy;
use std::{
    collections::VecDeque,
    env,
    sync::{Mutex, MutexGuard, PoisonError},
};
use tracing::warn;

pub const MENU_EVENTS_VAR: &str = "PARKQWIK_TEST_MENU_EVENTS";
pub const TEXT_INPUTS_VAR: &str = "PARKQWIK_TEST_TEXT_INPUTS";
pub const CONFIRMATIONS_VAR: &str = "PARKQWIK_TEST_CONFIRMATIONS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuTestEvent {
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Enter,
    Esc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextTestInput {
    Value(String),
    Keep,
    Back,
    Help,
    Escape,
}

struct ScriptQueue<T> {
    enabled: bool,
    items: VecDeque<T>,
}

impl<T> ScriptQueue<T> {
    fn from_env(var: &str, parse: fn(&str) -> VecDeque<T>) -> Self {
        match env::var(var) {
            Ok(raw) => Self {
                enabled: true,
                items: parse(&raw),
            },
            Err(_) => Self {
                enabled: false,
                items: VecDeque::new(),
            },
        }
    }

    /// `None` when scripting is off. An exhausted script yields `fallback`
    /// so a short script ends the session instead of blocking on a TTY.
    fn next(&mut self, label: &str, fallback: impl FnOnce() -> T) -> Option<T> {
        if !self.enabled {
            return None;
        }
        Some(self.items.pop_front().unwrap_or_else(|| {
            warn!(prompt = label, "scripted input exhausted");
            fallback()
        }))
    }
}

static MENU_EVENTS: Lazy<Mutex<ScriptQueue<Vec<MenuTestEvent>>>> =
    Lazy::new(|| Mutex::new(ScriptQueue::from_env(MENU_EVENTS_VAR, parse_menu_sequences)));

static TEXT_INPUTS: Lazy<Mutex<ScriptQueue<TextTestInput>>> =
    Lazy::new(|| Mutex::new(ScriptQueue::from_env(TEXT_INPUTS_VAR, parse_text_sequences)));

static CONFIRMATIONS: Lazy<Mutex<ScriptQueue<bool>>> =
    Lazy::new(|| Mutex::new(ScriptQueue::from_env(CONFIRMATIONS_VAR, parse_confirmations)));

fn lock<T>(queue: &Mutex<T>) -> MutexGuard<'_, T> {
    queue.lock().unwrap_or_else(PoisonError::into_inner)
}

pub fn is_enabled() -> bool {
    lock(&MENU_EVENTS).enabled || lock(&TEXT_INPUTS).enabled || lock(&CONFIRMATIONS).enabled
}

pub fn next_menu_events(label: &str) -> Option<Vec<MenuTestEvent>> {
    lock(&MENU_EVENTS).next(label, || vec![MenuTestEvent::Esc])
}

pub fn next_text_input(label: &str) -> Option<TextTestInput> {
    lock(&TEXT_INPUTS).next(label, || TextTestInput::Escape)
}

pub fn next_confirmation(label: &str) -> Option<bool> {
    lock(&CONFIRMATIONS).next(label, || true)
}

fn parse_menu_event(token: &str) -> Option<MenuTestEvent> {
    match token.to_ascii_uppercase().as_str() {
        "UP" => Some(MenuTestEvent::Up),
        "DOWN" => Some(MenuTestEvent::Down),
        "HOME" => Some(MenuTestEvent::Home),
        "END" => Some(MenuTestEvent::End),
        "PAGEUP" | "PAGE_UP" => Some(MenuTestEvent::PageUp),
        "PAGEDOWN" | "PAGE_DOWN" => Some(MenuTestEvent::PageDown),
        "ENTER" | "RETURN" => Some(MenuTestEvent::Enter),
        "ESC" | "ESCAPE" => Some(MenuTestEvent::Esc),
        _ => None,
    }
}

fn parse_text_input(token: &str) -> TextTestInput {
    match token.to_ascii_uppercase().as_str() {
        "<ESC>" | "ESC" => TextTestInput::Escape,
        "<BACK>" => TextTestInput::Back,
        "<HELP>" => TextTestInput::Help,
        "<KEEP>" => TextTestInput::Keep,
        "<BLANK>" | "<EMPTY>" => TextTestInput::Value(String::new()),
        _ => TextTestInput::Value(token.to_string()),
    }
}

fn segments(raw: &str) -> impl Iterator<Item = &str> {
    raw.split('|')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
}

fn parse_menu_sequences(raw: &str) -> VecDeque<Vec<MenuTestEvent>> {
    segments(raw)
        .map(|segment| {
            segment
                .split(',')
                .filter_map(|token| parse_menu_event(token.trim()))
                .collect::<Vec<_>>()
        })
        .filter(|events| !events.is_empty())
        .collect()
}

fn parse_text_sequences(raw: &str) -> VecDeque<TextTestInput> {
    segments(raw).map(parse_text_input).collect()
}

fn parse_confirmations(raw: &str) -> VecDeque<bool> {
    segments(raw)
        .map(|token| matches!(token.to_ascii_lowercase().as_str(), "y" | "yes" | "true" | "1"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_menu_segments() {
        let parsed = parse_menu_sequences("DOWN,enter| ESC |bogus|");
        assert_eq!(
            parsed,
            VecDeque::from(vec![
                vec![MenuTestEvent::Down, MenuTestEvent::Enter],
                vec![MenuTestEvent::Esc],
            ])
        );
    }

    #[test]
    fn parses_text_tokens() {
        let parsed = parse_text_sequences("mh12ab1234|<BLANK>|<esc>|<BACK>");
        assert_eq!(
            parsed,
            VecDeque::from(vec![
                TextTestInput::Value("mh12ab1234".into()),
                TextTestInput::Value(String::new()),
                TextTestInput::Escape,
                TextTestInput::Back,
            ])
        );
    }

    #[test]
    fn parses_confirmations() {
        assert_eq!(
            parse_confirmations("y|no|YES|0"),
            VecDeque::from(vec![true, false, true, false])
        );
    }

    #[test]
    fn exhausted_queue_falls_back() {
        let mut queue: ScriptQueue<bool> = ScriptQueue {
            enabled: true,
            items: VecDeque::new(),
        };
        assert_eq!(queue.next("discard", || true), Some(true));

        queue.enabled = false;
        assert_eq!(queue.next("discard", || true), None);
    }
}
