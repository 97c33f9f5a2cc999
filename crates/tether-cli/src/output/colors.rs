//! Terminal color support detection and formatting.
//!
//! `auto` colors only when both stdout and stderr are terminals; `NO_COLOR`
//! is folded into the configured [`ColorMode`] before it reaches here.

use std::io::{self, IsTerminal};

use tether_config::ColorMode;

/// Color support detection and formatting
#[derive(Debug, Clone, Copy)]
pub struct ColorSupport {
    enabled: bool,
}

impl ColorSupport {
    /// Resolve a configured mode against the current terminal
    pub fn from_mode(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Always => Self::enabled(),
            ColorMode::Never => Self::disabled(),
            ColorMode::Auto => Self::detect(),
        }
    }

    /// Detect color support from the attached terminals
    pub fn detect() -> Self {
        Self {
            enabled: io::stderr().is_terminal() && io::stdout().is_terminal(),
        }
    }

    /// Force enable colors
    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    /// Force disable colors
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.enabled {
            format!("\x1b[{}m{}\x1b[0m", code, text)
        } else {
            text.to_string()
        }
    }

    pub fn green(&self, text: &str) -> String {
        self.paint("32", text)
    }

    pub fn yellow(&self, text: &str) -> String {
        self.paint("33", text)
    }

    pub fn red(&self, text: &str) -> String {
        self.paint("31", text)
    }

    /// Format text as dim/gray
    pub fn dim(&self, text: &str) -> String {
        self.paint("2", text)
    }

    pub fn bold(&self, text: &str) -> String {
        self.paint("1", text)
    }
}
