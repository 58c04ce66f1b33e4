use colored::Colorize;
use std::env;
use std::fmt;
use std::sync::{OnceLock, RwLock};

use crate::config::Config;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Section,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OutputPreferences {
    pub plain_mode: bool,
    pub high_contrast_mode: bool,
}

impl OutputPreferences {
    /// Preferences from the loaded config. `NO_COLOR` forces plain output.
    pub fn from_config(config: &Config) -> Self {
        let no_color = env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty());
        Self {
            plain_mode: config.plain_mode || no_color,
            high_contrast_mode: config.high_contrast,
        }
    }
}

static PREFERENCES: OnceLock<RwLock<OutputPreferences>> = OnceLock::new();

pub fn set_preferences(prefs: OutputPreferences) {
    let lock = PREFERENCES.get_or_init(|| RwLock::new(OutputPreferences::default()));
    if let Ok(mut guard) = lock.write() {
        *guard = prefs;
    }
    if prefs.plain_mode {
        colored::control::set_override(false);
    }
}

pub fn current_preferences() -> OutputPreferences {
    PREFERENCES
        .get_or_init(|| RwLock::new(OutputPreferences::default()))
        .read()
        .map(|guard| *guard)
        .unwrap_or_default()
}

fn build_label(kind: MessageKind) -> (&'static str, &'static str) {
    match kind {
        MessageKind::Info => ("INFO", "•"),
        MessageKind::Success => ("OK", "✔"),
        MessageKind::Warning => ("WARNING", "⚠"),
        MessageKind::Error => ("ERROR", "✖"),
        MessageKind::Section => ("", ""),
    }
}

fn apply_style(kind: MessageKind, message: impl fmt::Display, prefs: &OutputPreferences) -> String {
    let text = message.to_string();

    if kind == MessageKind::Section {
        let base = format!("=== {} ===", text.trim());
        return if prefs.plain_mode {
            base
        } else {
            base.bold().to_string()
        };
    }

    let (label, icon) = build_label(kind);
    if prefs.plain_mode {
        return format!("{label}: {text}");
    }
    let formatted = format!("{icon} {text}");

    if prefs.high_contrast_mode {
        return match kind {
            MessageKind::Info => formatted,
            _ => formatted.bold().to_string(),
        };
    }

    match kind {
        MessageKind::Success => formatted.bright_green().to_string(),
        MessageKind::Warning => formatted.bright_yellow().to_string(),
        MessageKind::Error => formatted.bright_red().to_string(),
        MessageKind::Info | MessageKind::Section => formatted,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let prefs = current_preferences();
    let formatted = apply_style(kind, message, &prefs);
    match kind {
        MessageKind::Section => println!("\n{}", formatted),
        MessageKind::Error => eprintln!("{}", formatted),
        _ => println!("{}", formatted),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_mode_uses_text_labels() {
        let prefs = OutputPreferences {
            plain_mode: true,
            high_contrast_mode: false,
        };
        assert_eq!(
            apply_style(MessageKind::Warning, "Please select a date first", &prefs),
            "WARNING: Please select a date first"
        );
        assert_eq!(
            apply_style(MessageKind::Section, " Order Summary ", &prefs),
            "=== Order Summary ==="
        );
    }

    #[test]
    fn config_flags_flow_into_preferences() {
        let config = Config {
            plain_mode: true,
            high_contrast: true,
            ..Config::default()
        };
        let prefs = OutputPreferences::from_config(&config);
        assert!(prefs.plain_mode);
        assert!(prefs.high_contrast_mode);
    }
}
