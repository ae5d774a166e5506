//! Diagnostic formatting for better error messages
//!
//! This module renders an [`ExprError`] with the offending source line and a
//! caret under the reported column.

use super::{ExprError, Position};
use colored::Colorize;

/// Diagnostic information for displaying errors with context
pub struct Diagnostic {
    error: ExprError,
    source: Option<String>,
    filename: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic from an error
    pub fn new(error: ExprError) -> Self {
        Self {
            error,
            source: None,
            filename: None,
        }
    }

    /// Create a diagnostic with source code context
    pub fn with_source(error: ExprError, source: &str) -> Self {
        Self {
            error,
            source: Some(source.to_string()),
            filename: None,
        }
    }

    /// Name the input in the location line
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Format the diagnostic with color and context
    pub fn format(&self) -> String {
        let mut output = String::new();

        let kind = self.error.kind().red().bold();
        output.push_str(&format!("{}: ", kind));
        output.push_str(&self.error.message());
        output.push('\n');

        if let Some(location) = self.error.location() {
            // Header and gutter are both 1-based.
            let line_col = format!("{}:{}", location.row + 1, location.col + 1);
            let shown = match self.filename {
                Some(ref file) => format!("{}:{}", file, line_col),
                None => line_col,
            };
            output.push_str(&format!("  {} {}\n", "-->".blue().bold(), shown));

            if let Some(ref source) = self.source {
                output.push_str(&self.format_source_context(source, location));
            }
        }

        output
    }

    /// Format source code context around the error location
    fn format_source_context(&self, source: &str, location: &Position) -> String {
        let mut output = String::new();
        // Split the way the scanner counts rows: `\r\n` is two breaks.
        let lines: Vec<&str> = source.split(|c: char| c == '\n' || c == '\r').collect();

        let line_idx = location.row;
        if line_idx >= lines.len() {
            return output;
        }

        // Rows are 0-based, gutter numbers are not.
        let line_num_width = (line_idx + 2).to_string().len();

        if line_idx > 0 {
            output.push_str(&format!(
                "  {} {}\n",
                format!("{:width$}", line_idx, width = line_num_width).blue(),
                lines[line_idx - 1]
            ));
        }

        output.push_str(&format!(
            "  {} {}\n",
            format!("{:width$}", line_idx + 1, width = line_num_width)
                .blue()
                .bold(),
            lines[line_idx]
        ));

        let indicator_padding = " ".repeat(line_num_width + 3 + location.col);
        output.push_str(&format!("{}{}\n", indicator_padding, "^".red().bold()));

        if line_idx + 1 < lines.len() {
            output.push_str(&format!(
                "  {} {}\n",
                format!("{:width$}", line_idx + 2, width = line_num_width).blue(),
                lines[line_idx + 1]
            ));
        }

        output
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.format())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Feature, Problem};

    #[test]
    fn test_diagnostic_without_source() {
        let err = ExprError::malformed(Problem::UnrecognizedCharacter('@'), Position::new(0, 0, 0));
        let formatted = Diagnostic::new(err).format();

        assert!(formatted.contains("Malformed Input"));
        assert!(formatted.contains("unrecognized character '@'"));
    }

    #[test]
    fn test_diagnostic_with_source() {
        let source = "1 + 2\n3 * x\n4";
        let err = ExprError::unimplemented(Feature::Identifier, Position::new(10, 1, 4));
        let formatted = Diagnostic::with_source(err, source).filename("calc.expr").format();

        assert!(formatted.contains("Unimplemented"));
        assert!(formatted.contains("calc.expr:2:5"));
        assert!(formatted.contains("3 * x"));
        assert!(formatted.contains("1 + 2"));
    }

    #[test]
    fn test_caret_sits_under_error_line_after_crlf() {
        colored::control::set_override(false);
        let source = "1\r\n)\n3\n4";
        let err = ExprError::malformed(Problem::UnexpectedRightParen, Position::new(3, 2, 0));
        let formatted = Diagnostic::with_source(err, source).format();
        let lines: Vec<&str> = formatted.lines().collect();

        assert_eq!(lines[1], "  --> 3:1");
        let caret = lines.iter().position(|l| l.trim() == "^").unwrap();
        assert_eq!(lines[caret - 1], "  3 )");
        assert_eq!(lines[caret], "    ^");
        assert_eq!(lines[caret + 1], "  4 3");
    }

    #[test]
    fn test_diagnostic_without_location_skips_context() {
        let err = ExprError::malformed_at_end(Problem::UnexpectedEndOfInput);
        let formatted = Diagnostic::with_source(err, "1 +").format();

        assert!(formatted.contains("unexpected end of input"));
        assert!(!formatted.contains("-->"));
    }
}
