use colored::Colorize;
use std::fmt;
use std::sync::{OnceLock, RwLock};

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Hint,
    Section,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OutputPreferences {
    /// No colour and no icons.
    pub plain_mode: bool,
    pub high_contrast_mode: bool,
}

static PREFERENCES: OnceLock<RwLock<OutputPreferences>> = OnceLock::new();

pub fn set_preferences(prefs: OutputPreferences) {
    let lock = PREFERENCES.get_or_init(|| RwLock::new(OutputPreferences::default()));
    if let Ok(mut guard) = lock.write() {
        *guard = prefs;
    }
    if prefs.plain_mode {
        colored::control::set_override(false);
    } else {
        colored::control::unset_override();
    }
}

pub fn preferences() -> OutputPreferences {
    PREFERENCES
        .get_or_init(|| RwLock::new(OutputPreferences::default()))
        .read()
        .map(|guard| *guard)
        .unwrap_or_default()
}

fn build_label(kind: MessageKind) -> (&'static str, &'static str) {
    match kind {
        MessageKind::Info => ("INFO", "[i]"),
        MessageKind::Success => ("OK", "[✓]"),
        MessageKind::Warning => ("WARNING", "[!]"),
        MessageKind::Error => ("ERROR", "[x]"),
        MessageKind::Hint => ("HINT", ""),
        MessageKind::Section => ("", ""),
    }
}

/// Renders a message as it would be printed, without writing it.
pub fn format_message(
    kind: MessageKind,
    message: impl fmt::Display,
    prefs: &OutputPreferences,
) -> String {
    let text = message.to_string();
    let base = match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()),
        _ => {
            let (label, icon) = build_label(kind);
            if icon.is_empty() || prefs.plain_mode {
                format!("{label}: {text}")
            } else {
                format!("{label}: {icon} {text}")
            }
        }
    };

    if prefs.plain_mode {
        return base;
    }

    if prefs.high_contrast_mode {
        return match kind {
            MessageKind::Info | MessageKind::Hint => base,
            _ => base.bold().to_string(),
        };
    }

    match kind {
        MessageKind::Success => base.bright_green().to_string(),
        MessageKind::Warning => base.bright_yellow().to_string(),
        MessageKind::Error => base.bright_red().to_string(),
        MessageKind::Hint => base.dimmed().to_string(),
        MessageKind::Section => base.bold().to_string(),
        MessageKind::Info => base,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = format_message(kind, message, &preferences());
    match kind {
        MessageKind::Section => println!("\n{formatted}"),
        _ => println!("{formatted}"),
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

pub fn hint(message: impl fmt::Display) {
    print(MessageKind::Hint, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

/// Prints preformatted text such as tables and charts.
pub fn text(body: impl fmt::Display) {
    println!("{body}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_mode_drops_icons() {
        let prefs = OutputPreferences {
            plain_mode: true,
            high_contrast_mode: false,
        };
        assert_eq!(
            format_message(MessageKind::Success, "Saved", &prefs),
            "OK: Saved"
        );
        assert_eq!(
            format_message(MessageKind::Section, " Summary ", &prefs),
            "=== Summary ==="
        );
    }

    #[test]
    fn decorated_mode_keeps_icon() {
        let formatted = format_message(MessageKind::Warning, "careful", &OutputPreferences::default());
        assert!(formatted.contains("[!] careful"));
    }
}
