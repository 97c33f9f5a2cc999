//! Terminal output formatting and utilities.
//!
//! Reports go to stdout; diagnostics and logs go to stderr.

pub mod colors;
pub mod errors;
pub mod report;

use colors::ColorSupport;

/// Output handler for consistent terminal formatting
pub struct OutputHandler {
    colors: ColorSupport,
}

impl OutputHandler {
    pub fn new(colors: ColorSupport) -> Self {
        Self { colors }
    }

    pub fn colors(&self) -> ColorSupport {
        self.colors
    }

    /// Print pre-rendered text verbatim
    pub fn print(&self, text: &str) {
        print!("{}", text);
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        println!("{}", self.colors.dim(message));
    }
}

impl Default for OutputHandler {
    fn default() -> Self {
        Self::new(ColorSupport::detect())
    }
}
