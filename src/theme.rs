//! Theme configuration for CLI output.
//!
//! Centralizes the colors used for the prompt, agent replies and errors.
//! Colors are disabled when `NO_COLOR` is set or stdout is not a terminal.

use crossterm::style::{Color, Stylize};

/// Colors for interactive output.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Primary text color (operator prompt)
    pub text_primary: Color,
    /// Secondary/dimmed text color (hints, farewell)
    pub text_secondary: Color,
    /// Accent color for agent replies
    pub accent: Color,
    /// Error/warning color
    pub error: Color,
    /// Whether escape codes are emitted at all
    pub enabled: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text_primary: Color::Grey,
            text_secondary: Color::DarkGrey,
            accent: Color::Green,
            error: Color::Red,
            enabled: true,
        }
    }
}

impl Theme {
    /// Theme that never emits escape codes.
    pub fn plain() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    fn paint(&self, color: Color, text: &str) -> String {
        if self.enabled {
            text.with(color).to_string()
        } else {
            text.to_string()
        }
    }

    /// Format text with the primary color.
    pub fn primary_text(&self, text: &str) -> String {
        self.paint(self.text_primary, text)
    }

    /// Format text with the secondary color.
    pub fn secondary_text(&self, text: &str) -> String {
        self.paint(self.text_secondary, text)
    }

    /// Format text with the accent color.
    pub fn accent_text(&self, text: &str) -> String {
        self.paint(self.accent, text)
    }

    /// Format text with the error color.
    pub fn error_text(&self, text: &str) -> String {
        self.paint(self.error, text)
    }
}

/// Theme for the current process.
pub fn current_theme() -> Theme {
    if std::env::var_os("NO_COLOR").is_some() || !atty::is(atty::Stream::Stdout) {
        Theme::plain()
    } else {
        Theme::default()
    }
}
