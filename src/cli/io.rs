use std::fmt;

use dialoguer::{theme::ColorfulTheme, Confirm};

use crate::cli::output;
use crate::cli::ui::test_mode;
use crate::errors::CliError;

pub fn print_info(message: impl fmt::Display) {
    output::info(message);
}

pub fn print_warning(message: impl fmt::Display) {
    output::warning(message);
}

pub fn print_success(message: impl fmt::Display) {
    output::success(message);
}

/// Yes/no question; scripted answers take precedence over the terminal.
pub fn confirm_action(prompt: &str, default: bool) -> Result<bool, CliError> {
    if let Some(answer) = test_mode::next_confirmation(prompt) {
        println!("{prompt} {}", if answer { "yes" } else { "no" });
        return Ok(answer);
    }
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(CliError::from)
}

/// Asked whenever ESC is pressed on a screen.
pub fn confirm_exit(prompt: &str) -> Result<bool, CliError> {
    confirm_action(prompt, false)
}
