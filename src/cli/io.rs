use std::fmt;

use dialoguer::{theme::ColorfulTheme, Confirm};
use expense_config::Config;

use crate::cli::core::CommandError;
use crate::cli::output::{self, OutputPreferences};

/// Applies the output-related preferences of `config` to the global printers.
pub fn apply_config(config: &Config) {
    output::set_preferences(OutputPreferences {
        plain_mode: config.plain(),
        high_contrast_mode: config.accessibility.high_contrast,
    });
}

pub fn print_info(message: impl fmt::Display) {
    output::info(message);
}

pub fn print_warning(message: impl fmt::Display) {
    output::warning(message);
}

pub fn print_error(message: impl fmt::Display) {
    output::error(message);
}

pub fn print_success(message: impl fmt::Display) {
    output::success(message);
}

pub fn print_hint(message: impl fmt::Display) {
    output::hint(message);
}

/// Prompt the user for confirmation with a yes/no question.
pub fn confirm_action(
    theme: &ColorfulTheme,
    prompt: &str,
    default: bool,
) -> Result<bool, CommandError> {
    Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(CommandError::from)
}
