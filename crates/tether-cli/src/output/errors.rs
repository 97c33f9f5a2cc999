//! Error message formatting with actionable suggestions.

use std::error::Error;

use tether_core::error::TetherError;

use super::colors::ColorSupport;

/// Error formatter with suggestions
pub struct ErrorFormatter {
    colors: ColorSupport,
}

impl ErrorFormatter {
    pub fn new(colors: ColorSupport) -> Self {
        Self { colors }
    }

    /// Format an error with its suggestion and source chain
    pub fn format_error(&self, error: &TetherError) -> String {
        let mut output = String::new();

        output.push_str(&self.colors.red("error"));
        output.push_str(": ");
        output.push_str(&error.to_string());
        output.push('\n');

        if let Some(suggestion) = error.suggestion() {
            output.push('\n');
            output.push_str(&self.colors.dim("help"));
            output.push_str(": ");
            output.push_str(suggestion);
            output.push('\n');
        }

        let mut source = error.source();
        while let Some(err) = source {
            output.push('\n');
            output.push_str(&self.colors.dim("caused by"));
            output.push_str(": ");
            output.push_str(&err.to_string());
            source = err.source();
        }

        output
    }
}

impl Default for ErrorFormatter {
    fn default() -> Self {
        Self::new(ColorSupport::detect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_includes_help_and_cause() {
        let error = TetherError::io(
            "Failed to read /plugins/installed_plugins.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied"),
        );
        let formatted = ErrorFormatter::new(ColorSupport::disabled()).format_error(&error);

        assert!(formatted.starts_with("error: IO error: Failed to read"));
        assert!(formatted.contains("help: Check that the plugins directory"));
        assert!(formatted.contains("caused by: permission denied"));
    }

    #[test]
    fn test_format_without_source() {
        let error = TetherError::ConfigValidation {
            field: "color".to_string(),
            reason: "bad".to_string(),
        };
        let formatted = ErrorFormatter::new(ColorSupport::disabled()).format_error(&error);

        assert!(!formatted.contains("caused by"));
        assert!(formatted.contains("help:"));
    }
}
