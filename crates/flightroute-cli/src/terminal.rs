//! Terminal styling and color utilities.

use std::io::IsTerminal;

/// ANSI escape codes used by the text renderers.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";
    /// Bright bold white for airport codes and the flight time.
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    /// Gray for labels.
    pub const GRAY: &str = "\x1b[90m";
    /// Cyan for airway routes.
    pub const CYAN: &str = "\x1b[36m";
    /// Green for direct routes.
    pub const GREEN: &str = "\x1b[32m";
}

/// Resolved color codes, either ANSI sequences or empty strings when color
/// is disabled.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub white_bold: &'static str,
    pub gray: &'static str,
    pub cyan: &'static str,
    pub green: &'static str,
}

impl ColorPalette {
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            white_bold: colors::WHITE_BOLD,
            gray: colors::GRAY,
            cyan: colors::CYAN,
            green: colors::GREEN,
        }
    }

    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            white_bold: "",
            gray: "",
            cyan: "",
            green: "",
        }
    }

    /// Pick a palette for stdout based on [`supports_color`].
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    /// Wrap `text` in `color`, followed by a reset when colors are active.
    pub fn paint(&self, color: &str, text: &str) -> String {
        if color.is_empty() {
            text.to_string()
        } else {
            format!("{color}{text}{}", self.reset)
        }
    }
}

/// Check whether stdout should receive ANSI colors.
///
/// Respects `NO_COLOR` and `TERM=dumb`, and never colors piped output.
#[must_use]
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.eq_ignore_ascii_case("dumb") {
            return false;
        }
    }
    std::io::stdout().is_terminal()
}
