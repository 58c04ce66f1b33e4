use std::fmt;

use colored::Colorize;

use crate::cli::output::{current_preferences, OutputPreferences};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Style {
    Header,
    Detail,
    Accent,
    Muted,
}

pub struct Formatter {
    prefs: OutputPreferences,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self {
            prefs: current_preferences(),
        }
    }

    pub fn with_preferences(prefs: OutputPreferences) -> Self {
        Self { prefs }
    }

    pub fn is_plain(&self) -> bool {
        self.prefs.plain_mode
    }

    pub fn print_header(&self, title: impl fmt::Display) {
        println!("\n{}", self.header_text(title));
    }

    pub fn header_text(&self, title: impl fmt::Display) -> String {
        self.colorize(format!("=== {} ===", title), Style::Header)
    }

    pub fn print_detail(&self, message: impl fmt::Display) {
        println!("{}", self.detail_text(message));
    }

    pub fn detail_text(&self, message: impl fmt::Display) -> String {
        self.colorize(message.to_string(), Style::Detail)
    }

    /// Emphasis for selected values and totals.
    pub fn accent_text(&self, message: impl fmt::Display) -> String {
        self.colorize(message.to_string(), Style::Accent)
    }

    /// De-emphasis for disabled entries such as past days or booked slots.
    pub fn muted_text(&self, message: impl fmt::Display) -> String {
        self.colorize(message.to_string(), Style::Muted)
    }

    fn colorize(&self, text: String, style: Style) -> String {
        if self.prefs.plain_mode {
            return text;
        }

        if self.prefs.high_contrast_mode {
            return match style {
                Style::Muted | Style::Detail => text,
                Style::Header | Style::Accent => text.bold().to_string(),
            };
        }

        match style {
            Style::Header => text.bold().to_string(),
            Style::Accent => text.bright_cyan().bold().to_string(),
            Style::Muted => text.dimmed().to_string(),
            Style::Detail => text,
        }
    }

    pub fn navigation_hint(&self) -> String {
        "(Use arrow keys to navigate, Enter to select, ESC to leave)".to_string()
    }

    pub fn print_two_column(&self, entries: &[(&str, String)]) {
        let label_width = entries
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0);
        for (label, value) in entries {
            println!("{}", self.format_two_column_row(label, value, label_width));
        }
    }

    pub fn format_two_column_row(&self, label: &str, description: &str, width: usize) -> String {
        if description.is_empty() {
            return format!("  {}", label);
        }
        let pad = width.saturating_sub(label.chars().count()) + 2;
        format!("  {}{}  {}", label, " ".repeat(pad), description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> Formatter {
        Formatter::with_preferences(OutputPreferences {
            plain_mode: true,
            high_contrast_mode: false,
        })
    }

    #[test]
    fn two_column_rows_align_on_char_width() {
        let formatter = plain();
        assert_eq!(
            formatter.format_two_column_row("Tax (18%)", "₹36", 9),
            "  Tax (18%)    ₹36"
        );
        assert_eq!(formatter.format_two_column_row("Exit", "", 10), "  Exit");
    }

    #[test]
    fn plain_headers_are_undecorated() {
        assert_eq!(plain().header_text("Order Summary"), "=== Order Summary ===");
        assert_eq!(plain().muted_text("2:00 PM"), "2:00 PM");
    }
}
