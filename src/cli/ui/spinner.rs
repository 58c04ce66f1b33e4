//! Spinners shown while a simulated service call blocks.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::output::current_preferences;
use crate::cli::ui::test_mode;

pub struct ProgressSpinner {
    bar: ProgressBar,
}

impl ProgressSpinner {
    pub fn new(message: &str) -> Self {
        if test_mode::is_enabled() || current_preferences().plain_mode {
            println!("{message}");
            return Self {
                bar: ProgressBar::hidden(),
            };
        }

        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
            .template("{spinner:.cyan} {msg}")
        {
            bar.set_style(style);
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar }
    }

    /// Runs `work` while the spinner animates, then clears it.
    pub fn run<T>(message: &str, work: impl FnOnce() -> T) -> T {
        let spinner = Self::new(message);
        let result = work();
        spinner.finish();
        result
    }

    pub fn finish(self) {
        self.bar.finish_and_clear();
    }
}
