//! User-friendly diagnostic messages.
//!
//! Every reported problem names what is wrong and, where possible, what to
//! do about it.

use std::fmt;

use crate::store::StorageError;
use crate::validation::ValidationResult;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when the draft fails validation.
    pub const FIX_FIELDS: &str = "Run `petposter set <field> <value>` to fix the fields above";

    /// Suggestion when loading keeps failing.
    pub const RETRY_LOAD: &str = "Run the command again to retry loading the draft";

    /// Destructive recovery when loading keeps failing.
    pub const CLEAR_ALL: &str = "Run `petposter reset --all` to clear all stored data and start over";

    /// Suggestion when storage is full.
    pub const FREE_SPACE: &str = "Remove photos or raise `store.quota_bytes` in the config";
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A diagnostic message with optional suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Severity level
    pub severity: Severity,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity: Severity::Error,
            context: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Create a new warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity: Severity::Warning,
            context: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Add context to the diagnostic.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Diagnostic listing every failing field of a validation result.
    pub fn for_validation(result: &ValidationResult) -> Self {
        let noun = if result.error_count == 1 { "field" } else { "fields" };
        let mut diag = Diagnostic::error(format!(
            "draft is not ready: {} invalid {}",
            result.error_count, noun
        ));
        for (field, message) in result.failures() {
            diag = diag.with_context(format!("{}: {}", field, message));
        }
        diag.with_suggestion(suggestions::FIX_FIELDS)
    }

    /// Diagnostic for a load that gave up.
    pub fn for_load_failure(reason: impl Into<String>) -> Self {
        Diagnostic::error("could not load the saved draft")
            .with_context(reason)
            .with_suggestion(suggestions::RETRY_LOAD)
            .with_suggestion(suggestions::CLEAR_ALL)
    }

    /// Warning for a write that failed; the change is kept in memory only.
    pub fn for_save_error(error: &StorageError) -> Self {
        let diag = Diagnostic::warning("draft was not saved").with_context(error.to_string());
        match error {
            StorageError::QuotaExceeded => diag.with_suggestion(suggestions::FREE_SPACE),
            _ => diag,
        }
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();

        // Severity prefix with optional color
        let severity_str = match (color, self.severity) {
            (true, Severity::Error) => "\x1b[1;31merror\x1b[0m",
            (true, Severity::Warning) => "\x1b[1;33mwarning\x1b[0m",
            (false, Severity::Error) => "error",
            (false, Severity::Warning) => "warning",
        };

        // Main message
        output.push_str(&format!("{}: {}\n", severity_str, self.message));

        // Context lines
        for ctx in &self.context {
            output.push_str(&format!("  -> {}\n", ctx));
        }

        // Suggestions
        if !self.suggestions.is_empty() {
            output.push('\n');
            let help_prefix = if color {
                "\x1b[1;32mhelp\x1b[0m"
            } else {
                "help"
            };
            output.push_str(&format!("{}: consider:\n", help_prefix));
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Record;
    use crate::validation::Validator;

    #[test]
    fn test_diagnostic_formatting() {
        let diag = Diagnostic::for_load_failure("failed to load draft after 3 attempts");

        let output = diag.format(false);
        assert!(output.contains("error: could not load"));
        assert!(output.contains("-> failed to load draft"));
        assert!(output.contains("help: consider:"));
        assert!(output.contains("2. Run `petposter reset --all`"));
    }

    #[test]
    fn test_validation_diagnostic_lists_fields() {
        let result = Validator::default().validate_form(&Record::default());
        let output = Diagnostic::for_validation(&result).format(false);
        assert!(output.contains("5 invalid fields"));
        assert!(output.contains("petName: This field is required"));
        assert!(output.contains("photos: Add at least one photo"));
    }

    #[test]
    fn test_save_diagnostic_suggests_space_on_quota() {
        let output = Diagnostic::for_save_error(&StorageError::QuotaExceeded).format(false);
        assert!(output.starts_with("warning: draft was not saved"));
        assert!(output.contains("quota_bytes"));
    }
}
